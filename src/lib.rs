//! @ai:module:intent Job tracker library: project records and budget roll-ups
//! @ai:module:layer application
//! @ai:module:public_api config, error, metrics, project, report, service, store

pub mod config;
pub mod error;
pub mod metrics;
pub mod project;
pub mod report;
pub mod service;
pub mod store;

pub use config::TrackerConfig;
pub use error::{Error, Result};
pub use metrics::{BudgetMetrics, MetricsAggregator, MetricsAggregatorTrait, ProjectOverview};
pub use project::{Project, ProjectEdit, ProjectId, ProjectStatus};
pub use report::ReportGenerator;
pub use service::{NewProject, ProjectService};
pub use store::{InMemoryStore, JsonFileStore, ProjectStore};
