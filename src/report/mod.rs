//! @ai:module:intent Report generation for project budgets
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportGenerator, JsonReporter, MarkdownReporter, format_currency

pub mod currency;
pub mod json_report;
pub mod markdown_report;

pub use currency::{format_cents, format_currency, format_signed_currency};
pub use json_report::{JsonReporter, JsonReporterTrait};
pub use markdown_report::{MarkdownReporter, MarkdownReporterTrait};

use crate::metrics::ProjectOverview;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// @ai:intent Combined report generator
pub struct ReportGenerator {
    json: JsonReporter,
    markdown: MarkdownReporter,
}

impl ReportGenerator {
    /// @ai:intent Create a new report generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            json: JsonReporter::new(),
            markdown: MarkdownReporter::new(),
        }
    }

    /// @ai:intent Generate JSON and Markdown reports for one project
    /// @ai:post returns the paths written
    /// @ai:effects fs:write
    pub fn generate_all(
        &self,
        overview: &ProjectOverview,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(output_dir)?;

        let stem = format!("project-{}", overview.project.id);
        let json_path = output_dir.join(format!("{}.json", stem));
        let markdown_path = output_dir.join(format!("{}.md", stem));

        self.json.generate(overview, &json_path)?;
        self.markdown.generate(overview, &markdown_path)?;

        tracing::info!("Reports generated in {}", output_dir.display());
        Ok(vec![json_path, markdown_path])
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}
