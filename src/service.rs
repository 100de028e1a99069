//! @ai:module:intent Project operations over an injected store and aggregator
//! @ai:module:layer application
//! @ai:module:public_api ProjectService, NewProject
//! @ai:module:stateless false

use crate::error::{Error, Result};
use crate::metrics::{BudgetMetrics, MetricsAggregatorTrait, PortfolioSummary, ProjectOverview};
use crate::project::{
    next_id, FuelPrices, Project, ProjectDetails, ProjectEdit, ProjectId, ProjectStatus,
};
use crate::store::ProjectStore;

/// @ai:intent Fields a user supplies when creating a project
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub agreed_price: f64,
    pub description: Option<String>,
    pub status: ProjectStatus,
}

/// @ai:intent Coordinates store reads, edits and metrics for callers
pub struct ProjectService<S, A> {
    store: S,
    aggregator: A,
    default_fuel_prices: FuelPrices,
}

impl<S: ProjectStore, A: MetricsAggregatorTrait> ProjectService<S, A> {
    /// @ai:intent Create a service from its collaborators
    /// @ai:effects pure
    pub fn new(store: S, aggregator: A) -> Self {
        Self {
            store,
            aggregator,
            default_fuel_prices: FuelPrices::default(),
        }
    }

    /// @ai:intent Set the fuel prices given to newly created projects
    pub fn with_default_fuel_prices(mut self, prices: FuelPrices) -> Self {
        self.default_fuel_prices = prices;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// @ai:intent Create and persist a project with a fresh id
    /// @ai:effects store:write
    pub fn create_project(&self, new: NewProject) -> Result<Project> {
        let existing = self.store.list()?;
        let id = next_id(existing.iter().map(|p| p.id));

        let draft = Project {
            id,
            fuel_prices: self.default_fuel_prices,
            ..Default::default()
        };
        // Validation lives in the edit path.
        let project = draft.apply(ProjectEdit::UpdateDetails(ProjectDetails {
            name: new.name,
            agreed_price: new.agreed_price,
            description: new.description,
            status: new.status,
        }))?;

        self.store.put(&project)?;
        tracing::info!("Created project {} ({})", project.id, project.name);
        Ok(project)
    }

    /// @ai:intent Load a project or fail with ProjectNotFound
    /// @ai:effects store:read
    pub fn project(&self, id: ProjectId) -> Result<Project> {
        self.store.get(id)?.ok_or(Error::ProjectNotFound(id))
    }

    pub fn projects(&self) -> Result<Vec<Project>> {
        self.store.list()
    }

    /// @ai:intent Apply an edit and persist the replacement record
    /// @ai:effects store:read, store:write
    pub fn edit(&self, id: ProjectId, edit: ProjectEdit) -> Result<Project> {
        let current = self.project(id)?;
        let updated = current.apply(edit)?;

        self.store.put(&updated)?;
        Ok(updated)
    }

    /// @ai:intent Delete a project
    /// @ai:effects store:write
    pub fn delete(&self, id: ProjectId) -> Result<()> {
        if self.store.delete(id)? {
            Ok(())
        } else {
            Err(Error::ProjectNotFound(id))
        }
    }

    /// @ai:intent Budget metrics for a stored project
    /// @ai:effects store:read
    pub fn metrics(&self, id: ProjectId) -> Result<BudgetMetrics> {
        let project = self.project(id)?;
        Ok(self.aggregator.aggregate(Some(&project)))
    }

    /// @ai:intent Project, metrics and member breakdown for display
    /// @ai:effects store:read, time
    pub fn overview(&self, id: ProjectId) -> Result<ProjectOverview> {
        let project = self.project(id)?;

        Ok(ProjectOverview {
            generated_at: chrono::Utc::now().to_rfc3339(),
            metrics: self.aggregator.aggregate(Some(&project)),
            members: self.aggregator.member_breakdown(&project),
            project,
        })
    }

    /// @ai:intent Summary over all stored projects
    /// @ai:effects store:read
    pub fn portfolio(&self) -> Result<PortfolioSummary> {
        let projects = self.store.list()?;
        Ok(self.aggregator.portfolio(&projects))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricsAggregator;
    use crate::project::{HoursInput, TeamMemberInput};
    use crate::store::InMemoryStore;

    fn service() -> ProjectService<InMemoryStore, MetricsAggregator> {
        ProjectService::new(InMemoryStore::new(), MetricsAggregator::new())
            .with_default_fuel_prices(FuelPrices { gas: 3.5, diesel: 4.25 })
    }

    fn new_project(name: &str, price: f64) -> NewProject {
        NewProject {
            name: name.to_string(),
            agreed_price: price,
            description: None,
            status: ProjectStatus::Scheduling,
        }
    }

    #[test]
    fn test_create_assigns_id_and_fuel_prices() {
        let service = service();
        let project = service.create_project(new_project("Roof", 9000.0)).unwrap();

        assert_ne!(project.id, 0);
        assert_eq!(project.fuel_prices.diesel, 4.25);
        assert_eq!(service.project(project.id).unwrap(), project);
    }

    #[test]
    fn test_create_rejects_negative_price() {
        let result = service().create_project(new_project("Roof", -1.0));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_edit_persists_and_metrics_follow() {
        let service = service();
        let project = service.create_project(new_project("Roof", 9000.0)).unwrap();

        let project = service
            .edit(
                project.id,
                ProjectEdit::AddTeamMember(TeamMemberInput {
                    name: "Ana".to_string(),
                    role: "Roofer".to_string(),
                    hourly_rate: 50.0,
                }),
            )
            .unwrap();
        let member_id = project.team_members[0].id;
        service
            .edit(
                project.id,
                ProjectEdit::LogHours(HoursInput {
                    team_member_id: member_id,
                    date: None,
                    hours: 10.0,
                }),
            )
            .unwrap();

        let metrics = service.metrics(project.id).unwrap();
        assert!((metrics.total_labor_cost - 500.0).abs() < 0.001);
        assert!((metrics.remaining_budget - 8500.0).abs() < 0.001);

        let overview = service.overview(project.id).unwrap();
        assert_eq!(overview.members.len(), 1);
        assert!((overview.members[0].total_hours - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_failed_edit_leaves_store_untouched() {
        let service = service();
        let project = service.create_project(new_project("Roof", 9000.0)).unwrap();

        let result = service.edit(project.id, ProjectEdit::RemoveHours(123));

        assert!(result.is_err());
        assert_eq!(service.project(project.id).unwrap(), project);
    }

    #[test]
    fn test_missing_project() {
        let service = service();
        assert!(matches!(service.metrics(42), Err(Error::ProjectNotFound(42))));
        assert!(matches!(service.delete(42), Err(Error::ProjectNotFound(42))));
    }

    #[test]
    fn test_portfolio_counts_projects() {
        let service = service();
        service.create_project(new_project("A", 100.0)).unwrap();
        service.create_project(new_project("B", 200.0)).unwrap();

        let summary = service.portfolio().unwrap();
        assert_eq!(summary.project_count, 2);
        assert!((summary.total_adjusted_price - 300.0).abs() < 0.001);
    }
}
