//! @ai:module:intent Budget roll-up aggregation over a project's records
//! @ai:module:layer application
//! @ai:module:public_api MetricsAggregator, MetricsAggregatorTrait
//! @ai:module:stateless true

use crate::metrics::types::{BudgetMetrics, MemberBreakdown, PortfolioSummary, StatusCount};
use crate::project::{InvoiceStatus, Project, ProjectStatus};
use std::collections::{HashMap, HashSet};

/// @ai:intent Trait for budget metrics aggregation
pub trait MetricsAggregatorTrait: Send + Sync {
    /// @ai:intent Fold a project's child collections into budget totals
    /// @ai:post None yields an all-zero record
    fn aggregate(&self, project: Option<&Project>) -> BudgetMetrics;

    /// @ai:intent Hours, labor and travel per team member
    fn member_breakdown(&self, project: &Project) -> Vec<MemberBreakdown>;

    /// @ai:intent Totals and status counts across projects
    fn portfolio(&self, projects: &[Project]) -> PortfolioSummary;
}

/// @ai:intent Computes budget metrics; never fails
pub struct MetricsAggregator;

impl MetricsAggregator {
    /// @ai:intent Create a new metrics aggregator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Map member id to hourly rate, first match wins
    /// @ai:effects pure
    fn hourly_rates(project: &Project) -> HashMap<u64, f64> {
        let mut rates = HashMap::with_capacity(project.team_members.len());

        for member in &project.team_members {
            rates.entry(member.id).or_insert(member.hourly_rate);
        }
        rates
    }

    /// @ai:intent Labor cost of all logged hours
    /// @ai:edge_cases hours pointing at a missing member contribute 0
    /// @ai:effects pure
    fn labor_cost(project: &Project) -> f64 {
        let rates = Self::hourly_rates(project);

        total(project.hours.iter().map(|entry| {
            rates
                .get(&entry.team_member_id)
                .map(|rate| finite_or_zero(entry.hours) * finite_or_zero(*rate))
                .unwrap_or(0.0)
        }))
    }
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// @ai:intent Sum an iterator of f64, skipping values that are not finite
/// @ai:effects pure
fn total<I: Iterator<Item = f64>>(iter: I) -> f64 {
    iter.fold(0.0, |sum, v| sum + finite_or_zero(v))
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

impl MetricsAggregatorTrait for MetricsAggregator {
    /// @ai:intent Aggregate a project into budget metrics
    /// @ai:idempotent true
    /// @ai:complexity O(n) over all child collections
    /// @ai:effects pure
    fn aggregate(&self, project: Option<&Project>) -> BudgetMetrics {
        let Some(project) = project else {
            return BudgetMetrics::default();
        };

        let total_change_orders = total(project.change_orders.iter().map(|c| c.price));
        let total_materials = total(project.materials.iter().map(|m| m.cost));
        let total_labor_cost = Self::labor_cost(project);
        // Stored at entry time, fuel prices are not consulted here.
        let total_travel_expenses = total(project.travel_expenses.iter().map(|t| t.cost));
        let total_payments = total(project.payments.iter().map(|p| p.amount));

        let total_invoices = total(
            project
                .invoices
                .iter()
                .filter(|i| i.status != InvoiceStatus::Cancelled)
                .map(|i| i.amount),
        );
        let total_invoices_paid = total(
            project
                .invoices
                .iter()
                .filter(|i| i.status == InvoiceStatus::Paid)
                .map(|i| i.amount),
        );

        let adjusted_price = finite_or_zero(project.agreed_price) + total_change_orders;
        // Travel is reported but not deducted.
        let remaining_budget = adjusted_price - total_materials - total_labor_cost;
        let outstanding_balance = adjusted_price - total_invoices_paid;

        BudgetMetrics {
            adjusted_price,
            total_materials,
            total_change_orders,
            remaining_budget,
            total_labor_cost,
            total_travel_expenses,
            total_payments,
            total_invoices,
            total_invoices_paid,
            outstanding_balance,
        }
    }

    /// @ai:intent Per-member totals in team order
    /// @ai:edge_cases a repeated member id keeps only its first entry
    /// @ai:post labor_cost over all rows sums to aggregate's total_labor_cost
    /// @ai:effects pure
    fn member_breakdown(&self, project: &Project) -> Vec<MemberBreakdown> {
        let mut seen = HashSet::with_capacity(project.team_members.len());

        project
            .team_members
            .iter()
            .filter(|member| seen.insert(member.id))
            .map(|member| {
                let total_hours = project.total_hours(member.id);
                let trips: Vec<_> = project
                    .travel_expenses
                    .iter()
                    .filter(|t| t.team_member_id == member.id)
                    .collect();

                MemberBreakdown {
                    team_member_id: member.id,
                    name: member.name.clone(),
                    role: member.role.clone(),
                    hourly_rate: finite_or_zero(member.hourly_rate),
                    total_hours,
                    labor_cost: total_hours * finite_or_zero(member.hourly_rate),
                    total_miles: total(trips.iter().map(|t| t.miles)),
                    travel_cost: total(trips.iter().map(|t| t.cost)),
                }
            })
            .collect()
    }

    /// @ai:intent Summarize every project by status and money
    /// @ai:effects pure
    fn portfolio(&self, projects: &[Project]) -> PortfolioSummary {
        let metrics: Vec<_> = projects.iter().map(|p| self.aggregate(Some(p))).collect();

        let by_status = ProjectStatus::ALL
            .iter()
            .map(|status| StatusCount {
                status: *status,
                count: projects.iter().filter(|p| p.status == *status).count() as u32,
            })
            .collect();

        tracing::debug!("Aggregated portfolio of {} projects", projects.len());

        PortfolioSummary {
            project_count: projects.len() as u32,
            by_status,
            total_adjusted_price: total(metrics.iter().map(|m| m.adjusted_price)),
            total_remaining_budget: total(metrics.iter().map(|m| m.remaining_budget)),
            total_outstanding_balance: total(metrics.iter().map(|m| m.outstanding_balance)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{
        ChangeOrder, FuelPrices, FuelType, HoursEntry, Invoice, Material, Payment, TeamMember,
        TravelExpense,
    };
    use pretty_assertions::assert_eq;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.001
    }

    fn member(id: u64, rate: f64) -> TeamMember {
        TeamMember {
            id,
            name: format!("Member {}", id),
            role: "Carpenter".to_string(),
            hourly_rate: rate,
        }
    }

    fn hours(id: u64, member_id: u64, amount: f64) -> HoursEntry {
        HoursEntry {
            id,
            team_member_id: member_id,
            date: None,
            hours: amount,
        }
    }

    fn change_order(price: f64) -> ChangeOrder {
        ChangeOrder {
            id: 1,
            description: "Change".to_string(),
            price,
        }
    }

    fn invoice(amount: f64, status: InvoiceStatus) -> Invoice {
        Invoice {
            amount,
            status,
            ..Default::default()
        }
    }

    #[test]
    fn test_none_yields_all_zero() {
        let metrics = MetricsAggregator::new().aggregate(None);
        assert_eq!(metrics, BudgetMetrics::default());
    }

    #[test]
    fn test_adjusted_price_without_change_orders() {
        let project = Project::new(1, "Bath", 12000.0);
        let metrics = MetricsAggregator::new().aggregate(Some(&project));

        assert_eq!(metrics.adjusted_price, 12000.0);
        assert_eq!(metrics.total_change_orders, 0.0);
    }

    #[test]
    fn test_negative_change_order_lowers_adjusted_price() {
        let mut project = Project::new(1, "Bath", 12000.0);
        project.change_orders = vec![change_order(1500.0), change_order(-2000.0)];

        let metrics = MetricsAggregator::new().aggregate(Some(&project));

        assert!(approx(metrics.total_change_orders, -500.0));
        assert!(approx(metrics.adjusted_price, 11500.0));
    }

    #[test]
    fn test_labor_cost() {
        let mut project = Project::new(1, "Bath", 12000.0);
        project.team_members = vec![member(1, 50.0)];
        project.hours = vec![hours(1, 1, 10.0)];

        let metrics = MetricsAggregator::new().aggregate(Some(&project));
        assert!(approx(metrics.total_labor_cost, 500.0));
    }

    #[test]
    fn test_missing_member_contributes_zero_labor() {
        let mut project = Project::new(1, "Bath", 12000.0);
        project.team_members = vec![member(1, 50.0)];
        project.hours = vec![hours(1, 1, 10.0), hours(2, 2, 40.0)];

        let metrics = MetricsAggregator::new().aggregate(Some(&project));
        assert!(approx(metrics.total_labor_cost, 500.0));

        project.team_members.clear();
        let metrics = MetricsAggregator::new().aggregate(Some(&project));
        assert_eq!(metrics.total_labor_cost, 0.0);
        assert!(approx(metrics.remaining_budget, 12000.0));
    }

    #[test]
    fn test_duplicate_member_ids_use_first_rate() {
        let mut project = Project::new(1, "Bath", 0.0);
        project.team_members = vec![member(1, 50.0), member(1, 80.0)];
        project.hours = vec![hours(1, 1, 2.0)];

        let metrics = MetricsAggregator::new().aggregate(Some(&project));
        assert!(approx(metrics.total_labor_cost, 100.0));
    }

    #[test]
    fn test_total_materials() {
        let mut project = Project::new(1, "Bath", 1000.0);
        project.materials = vec![
            Material { cost: 100.0, ..Default::default() },
            Material { cost: 250.50, ..Default::default() },
        ];

        let metrics = MetricsAggregator::new().aggregate(Some(&project));
        assert!(approx(metrics.total_materials, 350.50));
    }

    #[test]
    fn test_invoice_totals_exclude_cancelled() {
        let mut project = Project::new(1, "Bath", 5000.0);
        project.invoices = vec![
            invoice(1000.0, InvoiceStatus::Paid),
            invoice(500.0, InvoiceStatus::Pending),
            invoice(200.0, InvoiceStatus::Cancelled),
        ];

        let metrics = MetricsAggregator::new().aggregate(Some(&project));

        assert!(approx(metrics.total_invoices, 1500.0));
        assert!(approx(metrics.total_invoices_paid, 1000.0));
        assert!(approx(metrics.outstanding_balance, 4000.0));
    }

    #[test]
    fn test_travel_uses_stored_cost() {
        let mut project = Project::new(1, "Bath", 5000.0);
        project.fuel_prices = FuelPrices { gas: 10.0, diesel: 10.0 };
        project.travel_expenses = vec![TravelExpense {
            team_member_id: 1,
            miles: 100.0,
            mpg: 25.0,
            fuel_type: FuelType::Gas,
            cost: 16.0,
            ..Default::default()
        }];

        let metrics = MetricsAggregator::new().aggregate(Some(&project));

        assert!(approx(metrics.total_travel_expenses, 16.0));
        // Not deducted from the remaining budget.
        assert!(approx(metrics.remaining_budget, 5000.0));
    }

    #[test]
    fn test_remaining_budget() {
        let mut project = Project::new(1, "Bath", 10000.0);
        project.change_orders = vec![change_order(1000.0)];
        project.materials = vec![Material { cost: 2500.0, ..Default::default() }];
        project.team_members = vec![member(1, 40.0)];
        project.hours = vec![hours(1, 1, 25.0)];

        let metrics = MetricsAggregator::new().aggregate(Some(&project));
        assert!(approx(metrics.remaining_budget, 7500.0));
    }

    #[test]
    fn test_legacy_payments_are_reported_only() {
        let mut project = Project::new(1, "Bath", 3000.0);
        project.payments = vec![Payment { amount: 700.0, ..Default::default() }];

        let metrics = MetricsAggregator::new().aggregate(Some(&project));

        assert!(approx(metrics.total_payments, 700.0));
        assert!(approx(metrics.outstanding_balance, 3000.0));

        project.upgrade_legacy_payments();
        let metrics = MetricsAggregator::new().aggregate(Some(&project));
        assert_eq!(metrics.total_payments, 0.0);
        assert!(approx(metrics.outstanding_balance, 2300.0));
    }

    #[test]
    fn test_non_finite_values_count_as_zero() {
        let mut project = Project::new(1, "Bath", f64::NAN);
        project.materials = vec![
            Material { cost: f64::INFINITY, ..Default::default() },
            Material { cost: 10.0, ..Default::default() },
        ];

        let metrics = MetricsAggregator::new().aggregate(Some(&project));

        assert_eq!(metrics.adjusted_price, 0.0);
        assert!(approx(metrics.total_materials, 10.0));
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let mut project = Project::new(1, "Bath", 9999.99);
        project.change_orders = vec![change_order(0.1), change_order(0.2)];
        project.team_members = vec![member(1, 33.33)];
        project.hours = vec![hours(1, 1, 7.25), hours(2, 1, 0.75)];

        let aggregator = MetricsAggregator::new();
        let first = aggregator.aggregate(Some(&project));
        let second = aggregator.aggregate(Some(&project));

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(first.adjusted_price.to_bits(), second.adjusted_price.to_bits());
    }

    #[test]
    fn test_member_breakdown() {
        let mut project = Project::new(1, "Bath", 0.0);
        project.team_members = vec![member(1, 50.0), member(2, 30.0)];
        project.hours = vec![hours(1, 1, 4.0), hours(2, 1, 6.0), hours(3, 2, 1.0)];
        project.travel_expenses = vec![TravelExpense {
            team_member_id: 2,
            miles: 40.0,
            cost: 6.4,
            ..Default::default()
        }];

        let breakdown = MetricsAggregator::new().member_breakdown(&project);

        assert_eq!(breakdown.len(), 2);
        assert!(approx(breakdown[0].total_hours, 10.0));
        assert!(approx(breakdown[0].labor_cost, 500.0));
        assert!(approx(breakdown[1].total_miles, 40.0));
        assert!(approx(breakdown[1].travel_cost, 6.4));
    }

    #[test]
    fn test_member_breakdown_with_duplicate_ids_matches_total_labor() {
        let aggregator = MetricsAggregator::new();
        let mut project = Project::new(1, "Bath", 0.0);
        project.team_members = vec![member(1, 50.0), member(1, 80.0), member(2, 30.0)];
        project.hours = vec![hours(1, 1, 2.0), hours(2, 2, 1.0), hours(3, 9, 5.0)];

        let breakdown = aggregator.member_breakdown(&project);
        let labor: f64 = breakdown.iter().map(|m| m.labor_cost).sum();

        assert_eq!(breakdown.len(), 2);
        assert!(approx(breakdown[0].hourly_rate, 50.0));
        assert!(approx(labor, aggregator.aggregate(Some(&project)).total_labor_cost));
        assert!(approx(labor, 130.0));
    }

    #[test]
    fn test_portfolio_summary() {
        let mut a = Project::new(1, "A", 1000.0);
        a.status = ProjectStatus::InProgress;
        let mut b = Project::new(2, "B", 2000.0);
        b.status = ProjectStatus::InProgress;
        b.invoices = vec![invoice(500.0, InvoiceStatus::Paid)];
        let c = Project::new(3, "C", 300.0);

        let summary = MetricsAggregator::new().portfolio(&[a, b, c]);

        assert_eq!(summary.project_count, 3);
        assert_eq!(summary.by_status.len(), ProjectStatus::ALL.len());
        let in_progress = summary
            .by_status
            .iter()
            .find(|s| s.status == ProjectStatus::InProgress)
            .unwrap();
        assert_eq!(in_progress.count, 2);
        assert!(approx(summary.total_adjusted_price, 3300.0));
        assert!(approx(summary.total_outstanding_balance, 2800.0));
    }
}
