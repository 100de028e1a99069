//! @ai:module:intent JSON report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter
//! @ai:module:stateless true

use crate::metrics::ProjectOverview;
use anyhow::Result;
use std::path::Path;

/// @ai:intent Trait for JSON report generation
pub trait JsonReporterTrait: Send + Sync {
    /// @ai:intent Generate JSON report from a project overview
    fn generate(&self, overview: &ProjectOverview, output_path: &Path) -> Result<()>;
}

/// @ai:intent Writes a project overview as pretty JSON
pub struct JsonReporter;

impl JsonReporter {
    /// @ai:intent Create a new JSON reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporterTrait for JsonReporter {
    /// @ai:intent Generate JSON report to file
    /// @ai:effects fs:write
    fn generate(&self, overview: &ProjectOverview, output_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(overview)?;
        std::fs::write(output_path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::BudgetMetrics;
    use crate::project::Project;
    use tempfile::TempDir;

    #[test]
    fn test_generate_json_report() {
        let reporter = JsonReporter::new();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("project-1.json");

        let overview = ProjectOverview {
            generated_at: "2026-01-19T00:00:00Z".to_string(),
            project: Project::new(1, "Basement finish", 32000.0),
            metrics: BudgetMetrics {
                adjusted_price: 32000.0,
                outstanding_balance: 32000.0,
                ..Default::default()
            },
            members: vec![],
        };

        reporter.generate(&overview, &output).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("Basement finish"));
        assert!(content.contains("\"outstandingBalance\": 32000.0"));

        let parsed: ProjectOverview = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, overview);
    }
}
