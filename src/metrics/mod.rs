//! @ai:module:intent Budget metrics aggregation
//! @ai:module:layer application
//! @ai:module:public_api BudgetMetrics, MemberBreakdown, PortfolioSummary, ProjectOverview, MetricsAggregator

pub mod aggregator;
pub mod types;

pub use aggregator::{MetricsAggregator, MetricsAggregatorTrait};
pub use types::{BudgetMetrics, MemberBreakdown, PortfolioSummary, ProjectOverview, StatusCount};
