//! @ai:module:intent Markdown report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api MarkdownReporter
//! @ai:module:stateless true

use crate::metrics::{BudgetMetrics, MemberBreakdown, ProjectOverview};
use crate::project::Project;
use crate::report::currency::{format_cents, format_currency, format_signed_currency};
use anyhow::Result;
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// @ai:intent Trait for Markdown report generation
pub trait MarkdownReporterTrait: Send + Sync {
    /// @ai:intent Generate Markdown report from a project overview
    fn generate(&self, overview: &ProjectOverview, output_path: &Path) -> Result<()>;
}

/// @ai:intent Renders a project overview as Markdown tables
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// @ai:intent Create a new Markdown reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Generate header with status and description
    /// @ai:effects pure
    fn generate_header(overview: &ProjectOverview) -> String {
        let mut output = String::new();
        let project = &overview.project;

        writeln!(output, "# {}", project.name).unwrap();
        writeln!(output).unwrap();
        writeln!(output, "**Status:** {}", project.status).unwrap();
        writeln!(output, "**Generated:** {}", overview.generated_at).unwrap();
        writeln!(output).unwrap();

        if let Some(description) = &project.description {
            writeln!(output, "{}", description).unwrap();
            writeln!(output).unwrap();
        }

        output
    }

    /// @ai:intent Generate budget overview table
    /// @ai:effects pure
    fn generate_budget_table(project: &Project, metrics: &BudgetMetrics) -> String {
        let mut output = String::new();

        writeln!(output, "## Budget Overview").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "| Metric | Amount |").unwrap();
        writeln!(output, "|--------|--------|").unwrap();

        let rows = [
            ("Original Price", format_currency(project.agreed_price)),
            ("Change Orders", format_signed_currency(metrics.total_change_orders)),
            ("Adjusted Price", format_currency(metrics.adjusted_price)),
            ("Materials Cost", format_currency(metrics.total_materials)),
            ("Labor Cost", format_currency(metrics.total_labor_cost)),
            ("Travel Expenses", format_cents(metrics.total_travel_expenses)),
            ("Remaining Budget", format_currency(metrics.remaining_budget)),
            ("Invoiced", format_currency(metrics.total_invoices)),
            ("Invoices Paid", format_currency(metrics.total_invoices_paid)),
            ("Outstanding Balance", format_currency(metrics.outstanding_balance)),
        ];

        for (label, amount) in rows {
            writeln!(output, "| {} | {} |", label, amount).unwrap();
        }

        if metrics.total_payments != 0.0 {
            writeln!(
                output,
                "| Legacy Payments | {} |",
                format_currency(metrics.total_payments)
            )
            .unwrap();
        }

        writeln!(output).unwrap();
        output
    }

    /// @ai:intent Generate per-member table
    /// @ai:effects pure
    fn generate_team_section(members: &[MemberBreakdown]) -> String {
        let mut output = String::new();

        if members.is_empty() {
            return output;
        }

        writeln!(output, "## Team").unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "| Name | Role | Rate | Hours | Labor | Miles | Travel |"
        )
        .unwrap();
        writeln!(output, "|------|------|------|-------|-------|-------|--------|").unwrap();

        for member in members {
            writeln!(
                output,
                "| {} | {} | {}/hr | {:.2} | {} | {:.1} | {} |",
                member.name,
                member.role,
                format_currency(member.hourly_rate),
                member.total_hours,
                format_currency(member.labor_cost),
                member.total_miles,
                format_cents(member.travel_cost)
            )
            .unwrap();
        }

        writeln!(output).unwrap();
        output
    }

    /// @ai:intent Render the full report
    /// @ai:effects pure
    pub fn render(overview: &ProjectOverview) -> String {
        let mut content = Self::generate_header(overview);
        content.push_str(&Self::generate_budget_table(
            &overview.project,
            &overview.metrics,
        ));
        content.push_str(&Self::generate_team_section(&overview.members));
        content
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownReporterTrait for MarkdownReporter {
    /// @ai:intent Generate Markdown report to file
    /// @ai:effects fs:write
    fn generate(&self, overview: &ProjectOverview, output_path: &Path) -> Result<()> {
        std::fs::write(output_path, Self::render(overview))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectStatus;

    fn overview() -> ProjectOverview {
        let mut project = Project::new(3, "Kitchen remodel", 25000.0);
        project.status = ProjectStatus::InProgress;
        project.description = Some("Full gut and rebuild".to_string());

        ProjectOverview {
            generated_at: "2026-01-19T00:00:00Z".to_string(),
            project,
            metrics: BudgetMetrics {
                total_change_orders: -500.0,
                adjusted_price: 24500.0,
                total_travel_expenses: 16.0,
                ..Default::default()
            },
            members: vec![MemberBreakdown {
                team_member_id: 1,
                name: "Ana".to_string(),
                role: "Carpenter".to_string(),
                hourly_rate: 50.0,
                total_hours: 10.0,
                labor_cost: 500.0,
                total_miles: 100.0,
                travel_cost: 16.0,
            }],
        }
    }

    #[test]
    fn test_render_budget_rows() {
        let content = MarkdownReporter::render(&overview());

        assert!(content.starts_with("# Kitchen remodel"));
        assert!(content.contains("**Status:** In Progress"));
        assert!(content.contains("| Change Orders | -$500 |"));
        assert!(content.contains("| Adjusted Price | $24,500 |"));
        assert!(content.contains("| Travel Expenses | $16.00 |"));
        assert!(!content.contains("Legacy Payments"));
    }

    #[test]
    fn test_render_team_table() {
        let content = MarkdownReporter::render(&overview());
        assert!(content.contains("| Ana | Carpenter | $50/hr | 10.00 | $500 | 100.0 | $16.00 |"));
    }
}
