//! @ai:module:intent Metric types for project budget roll-ups
//! @ai:module:layer domain
//! @ai:module:public_api BudgetMetrics, MemberBreakdown, StatusCount, PortfolioSummary, ProjectOverview
//! @ai:module:stateless true

use crate::project::{Project, ProjectStatus};
use serde::{Deserialize, Serialize};

/// @ai:intent Derived financial totals for a single project
/// @ai:invariant adjusted_price == agreed_price + total_change_orders
/// @ai:invariant remaining_budget == adjusted_price - total_materials - total_labor_cost
/// @ai:invariant outstanding_balance == adjusted_price - total_invoices_paid
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetMetrics {
    pub adjusted_price: f64,
    pub total_materials: f64,
    pub total_change_orders: f64,
    pub remaining_budget: f64,
    pub total_labor_cost: f64,
    pub total_travel_expenses: f64,
    /// Legacy receipts not yet folded into invoices.
    pub total_payments: f64,
    /// Every invoice except cancelled ones.
    pub total_invoices: f64,
    pub total_invoices_paid: f64,
    pub outstanding_balance: f64,
}

/// @ai:intent Per-member hours, labor and travel totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberBreakdown {
    pub team_member_id: u64,
    pub name: String,
    pub role: String,
    pub hourly_rate: f64,
    pub total_hours: f64,
    pub labor_cost: f64,
    pub total_miles: f64,
    pub travel_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: ProjectStatus,
    pub count: u32,
}

/// @ai:intent Totals across every project in a store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub project_count: u32,
    pub by_status: Vec<StatusCount>,
    pub total_adjusted_price: f64,
    pub total_remaining_budget: f64,
    pub total_outstanding_balance: f64,
}

/// @ai:intent Everything the display layer needs for one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOverview {
    pub generated_at: String,
    pub project: Project,
    pub metrics: BudgetMetrics,
    pub members: Vec<MemberBreakdown>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metrics_are_zero() {
        let metrics = BudgetMetrics::default();
        assert_eq!(metrics.adjusted_price, 0.0);
        assert_eq!(metrics.outstanding_balance, 0.0);
        assert_eq!(metrics.total_travel_expenses, 0.0);
    }

    #[test]
    fn test_metrics_serialize_camel_case() {
        let metrics = BudgetMetrics {
            total_invoices_paid: 1000.0,
            ..Default::default()
        };

        let json = serde_json::to_string(&metrics).unwrap();
        assert!(json.contains("\"totalInvoicesPaid\":1000.0"));
        assert!(json.contains("\"remainingBudget\""));
    }
}
