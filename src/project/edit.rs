//! @ai:module:intent Replace-on-write edits that produce a new Project
//! @ai:module:layer domain
//! @ai:module:public_api ProjectEdit, ProjectDetails, TeamMemberInput, HoursInput, ChangeOrderInput, MaterialInput, TravelInput, InvoiceInput, travel_cost, next_id
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::project::model::{
    ChangeOrder, FuelPrices, FuelType, HoursEntry, Invoice, InvoiceStatus, Material,
    Project, ProjectStatus, TeamMember, TravelExpense,
};
use chrono::NaiveDate;

/// @ai:intent Editable top-level fields of a project
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetails {
    pub name: String,
    pub agreed_price: f64,
    pub description: Option<String>,
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamMemberInput {
    pub name: String,
    pub role: String,
    pub hourly_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoursInput {
    pub team_member_id: u64,
    pub date: Option<NaiveDate>,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeOrderInput {
    pub description: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialInput {
    pub name: String,
    pub cost: f64,
    pub quantity: String,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TravelInput {
    pub team_member_id: u64,
    pub date: Option<NaiveDate>,
    pub miles: f64,
    pub mpg: f64,
    pub fuel_type: FuelType,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceInput {
    pub amount: f64,
    pub date: Option<NaiveDate>,
    pub description: String,
    pub status: InvoiceStatus,
}

/// @ai:intent Every mutation a user can make to a project
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectEdit {
    UpdateDetails(ProjectDetails),
    AddTeamMember(TeamMemberInput),
    UpdateTeamMember { id: u64, member: TeamMemberInput },
    /// Also drops the member's hours entries.
    RemoveTeamMember(u64),
    LogHours(HoursInput),
    UpdateHours { id: u64, entry: HoursInput },
    RemoveHours(u64),
    AddChangeOrder(ChangeOrderInput),
    UpdateChangeOrder { id: u64, change_order: ChangeOrderInput },
    RemoveChangeOrder(u64),
    AddMaterial(MaterialInput),
    UpdateMaterial { id: u64, material: MaterialInput },
    RemoveMaterial(u64),
    AddTravelExpense(TravelInput),
    UpdateTravelExpense { id: u64, trip: TravelInput },
    RemoveTravelExpense(u64),
    /// Existing travel costs keep the price they were entered with.
    SetFuelPrices(FuelPrices),
    AddInvoice(InvoiceInput),
    UpdateInvoice { id: u64, invoice: InvoiceInput },
    SetInvoiceStatus { id: u64, status: InvoiceStatus },
    RemoveInvoice(u64),
}

/// Child records addressable by id.
pub(crate) trait Entry: Clone {
    const KIND: &'static str;

    fn id(&self) -> u64;
}

macro_rules! impl_entry {
    ($ty:ty, $kind:literal) => {
        impl Entry for $ty {
            const KIND: &'static str = $kind;

            fn id(&self) -> u64 {
                self.id
            }
        }
    };
}

impl_entry!(TeamMember, "team member");
impl_entry!(HoursEntry, "hours");
impl_entry!(ChangeOrder, "change order");
impl_entry!(Material, "material");
impl_entry!(TravelExpense, "travel expense");
impl_entry!(Invoice, "invoice");

/// @ai:intent Allocate an id unique within a collection
/// @ai:post result > every existing id and result > 0
/// @ai:effects time
pub fn next_id<I: IntoIterator<Item = u64>>(existing: I) -> u64 {
    let now = chrono::Utc::now().timestamp_millis().max(1) as u64;
    let highest = existing.into_iter().max().unwrap_or(0);
    now.max(highest.saturating_add(1))
}

/// @ai:intent Cost of a trip at the given fuel prices
/// @ai:example (100.0, 25.0, Gas, {gas: 4.0}) -> 16.0
/// @ai:edge_cases mpg <= 0 or non-finite input yields 0
/// @ai:effects pure
pub fn travel_cost(miles: f64, mpg: f64, fuel_type: FuelType, fuel_prices: &FuelPrices) -> f64 {
    if mpg <= 0.0 || !miles.is_finite() || !mpg.is_finite() {
        return 0.0;
    }

    let cost = miles / mpg * fuel_prices.price_for(fuel_type);
    if cost.is_finite() {
        cost
    } else {
        0.0
    }
}

fn ids<T: Entry>(entries: &[T]) -> impl Iterator<Item = u64> + '_ {
    entries.iter().map(Entry::id)
}

fn appended<T: Entry>(entries: &[T], entry: T) -> Vec<T> {
    let mut next = entries.to_vec();
    next.push(entry);
    next
}

fn replaced<T: Entry>(entries: &[T], id: u64, entry: T) -> Result<Vec<T>> {
    if !entries.iter().any(|e| e.id() == id) {
        return Err(Error::EntryNotFound { kind: T::KIND, id });
    }

    Ok(entries
        .iter()
        .map(|e| if e.id() == id { entry.clone() } else { e.clone() })
        .collect())
}

fn removed<T: Entry>(entries: &[T], id: u64) -> Result<Vec<T>> {
    if !entries.iter().any(|e| e.id() == id) {
        return Err(Error::EntryNotFound { kind: T::KIND, id });
    }

    Ok(entries.iter().filter(|e| e.id() != id).cloned().collect())
}

fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn non_negative(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidInput(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )))
    }
}

fn finite(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidInput(format!("{} must be a number", field)))
    }
}

impl Project {
    /// @ai:intent Produce a new project with one edit applied
    /// @ai:post self is unchanged
    /// @ai:effects pure (except id allocation reads the clock)
    pub fn apply(&self, edit: ProjectEdit) -> Result<Project> {
        let mut next = self.clone();

        match edit {
            ProjectEdit::UpdateDetails(details) => {
                next.name = required("project name", &details.name)?;
                next.agreed_price = non_negative("agreed price", details.agreed_price)?;
                next.description = details
                    .description
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty());
                next.status = details.status;
            }
            ProjectEdit::AddTeamMember(input) => {
                let member = team_member_from(next_id(ids(&self.team_members)), input)?;
                next.team_members = appended(&self.team_members, member);
            }
            ProjectEdit::UpdateTeamMember { id, member } => {
                let member = team_member_from(id, member)?;
                next.team_members = replaced(&self.team_members, id, member)?;
            }
            ProjectEdit::RemoveTeamMember(id) => {
                next.team_members = removed(&self.team_members, id)?;
                next.hours = self
                    .hours
                    .iter()
                    .filter(|h| h.team_member_id != id)
                    .cloned()
                    .collect();
            }
            ProjectEdit::LogHours(input) => {
                let entry = self.hours_from(next_id(ids(&self.hours)), input)?;
                next.hours = appended(&self.hours, entry);
            }
            ProjectEdit::UpdateHours { id, entry } => {
                let entry = self.hours_from(id, entry)?;
                next.hours = replaced(&self.hours, id, entry)?;
            }
            ProjectEdit::RemoveHours(id) => {
                next.hours = removed(&self.hours, id)?;
            }
            ProjectEdit::AddChangeOrder(input) => {
                let change_order =
                    change_order_from(next_id(ids(&self.change_orders)), input)?;
                next.change_orders = appended(&self.change_orders, change_order);
            }
            ProjectEdit::UpdateChangeOrder { id, change_order } => {
                let change_order = change_order_from(id, change_order)?;
                next.change_orders = replaced(&self.change_orders, id, change_order)?;
            }
            ProjectEdit::RemoveChangeOrder(id) => {
                next.change_orders = removed(&self.change_orders, id)?;
            }
            ProjectEdit::AddMaterial(input) => {
                let material = material_from(next_id(ids(&self.materials)), input)?;
                next.materials = appended(&self.materials, material);
            }
            ProjectEdit::UpdateMaterial { id, material } => {
                let material = material_from(id, material)?;
                next.materials = replaced(&self.materials, id, material)?;
            }
            ProjectEdit::RemoveMaterial(id) => {
                next.materials = removed(&self.materials, id)?;
            }
            ProjectEdit::AddTravelExpense(input) => {
                let trip = self.travel_from(next_id(ids(&self.travel_expenses)), input)?;
                next.travel_expenses = appended(&self.travel_expenses, trip);
            }
            ProjectEdit::UpdateTravelExpense { id, trip } => {
                let trip = self.travel_from(id, trip)?;
                next.travel_expenses = replaced(&self.travel_expenses, id, trip)?;
            }
            ProjectEdit::RemoveTravelExpense(id) => {
                next.travel_expenses = removed(&self.travel_expenses, id)?;
            }
            ProjectEdit::SetFuelPrices(prices) => {
                next.fuel_prices = FuelPrices {
                    gas: non_negative("gas price", prices.gas)?,
                    diesel: non_negative("diesel price", prices.diesel)?,
                };
            }
            ProjectEdit::AddInvoice(input) => {
                let invoice = invoice_from(next_id(ids(&self.invoices)), input)?;
                next.invoices = appended(&self.invoices, invoice);
            }
            ProjectEdit::UpdateInvoice { id, invoice } => {
                let invoice = invoice_from(id, invoice)?;
                next.invoices = replaced(&self.invoices, id, invoice)?;
            }
            ProjectEdit::SetInvoiceStatus { id, status } => {
                let current = self
                    .invoices
                    .iter()
                    .find(|i| i.id == id)
                    .ok_or(Error::EntryNotFound { kind: Invoice::KIND, id })?;
                let updated = Invoice {
                    status,
                    ..current.clone()
                };
                next.invoices = replaced(&self.invoices, id, updated)?;
            }
            ProjectEdit::RemoveInvoice(id) => {
                next.invoices = removed(&self.invoices, id)?;
            }
        }

        Ok(next)
    }

    fn require_member(&self, member_id: u64) -> Result<()> {
        match self.team_member(member_id) {
            Some(_) => Ok(()),
            None => Err(Error::TeamMemberNotFound(member_id)),
        }
    }

    fn hours_from(&self, id: u64, input: HoursInput) -> Result<HoursEntry> {
        self.require_member(input.team_member_id)?;

        Ok(HoursEntry {
            id,
            team_member_id: input.team_member_id,
            date: input.date,
            hours: non_negative("hours", input.hours)?,
        })
    }

    fn travel_from(&self, id: u64, input: TravelInput) -> Result<TravelExpense> {
        self.require_member(input.team_member_id)?;
        let miles = non_negative("miles", input.miles)?;

        if !(input.mpg.is_finite() && input.mpg > 0.0) {
            return Err(Error::InvalidInput(format!(
                "mpg must be greater than zero, got {}",
                input.mpg
            )));
        }

        Ok(TravelExpense {
            id,
            team_member_id: input.team_member_id,
            date: input.date,
            miles,
            mpg: input.mpg,
            fuel_type: input.fuel_type,
            cost: travel_cost(miles, input.mpg, input.fuel_type, &self.fuel_prices),
            description: input.description.trim().to_string(),
        })
    }
}

fn team_member_from(id: u64, input: TeamMemberInput) -> Result<TeamMember> {
    Ok(TeamMember {
        id,
        name: required("team member name", &input.name)?,
        role: input.role.trim().to_string(),
        hourly_rate: non_negative("hourly rate", input.hourly_rate)?,
    })
}

fn change_order_from(id: u64, input: ChangeOrderInput) -> Result<ChangeOrder> {
    Ok(ChangeOrder {
        id,
        description: required("change order description", &input.description)?,
        price: finite("change order price", input.price)?,
    })
}

fn material_from(id: u64, input: MaterialInput) -> Result<Material> {
    let quantity = input.quantity.trim();

    Ok(Material {
        id,
        name: required("material name", &input.name)?,
        cost: non_negative("material cost", input.cost)?,
        quantity: if quantity.is_empty() { "1".to_string() } else { quantity.to_string() },
        date: input.date,
    })
}

fn invoice_from(id: u64, input: InvoiceInput) -> Result<Invoice> {
    Ok(Invoice {
        id,
        amount: non_negative("invoice amount", input.amount)?,
        date: input.date,
        description: input.description.trim().to_string(),
        status: input.status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_with_member() -> Project {
        let mut project = Project::new(1, "Garage", 20000.0);
        project.team_members.push(TeamMember {
            id: 10,
            name: "Ana".to_string(),
            role: "Electrician".to_string(),
            hourly_rate: 50.0,
        });
        project.fuel_prices = FuelPrices { gas: 4.0, diesel: 5.0 };
        project
    }

    fn trip(miles: f64, mpg: f64, fuel_type: FuelType) -> TravelInput {
        TravelInput {
            team_member_id: 10,
            date: NaiveDate::from_ymd_opt(2024, 6, 1),
            miles,
            mpg,
            fuel_type,
            description: "Supply run".to_string(),
        }
    }

    #[test]
    fn test_travel_cost_precomputed() {
        let prices = FuelPrices { gas: 4.0, diesel: 0.0 };
        assert!((travel_cost(100.0, 25.0, FuelType::Gas, &prices) - 16.0).abs() < 1e-9);
        assert_eq!(travel_cost(100.0, 0.0, FuelType::Gas, &prices), 0.0);
        assert_eq!(travel_cost(100.0, 25.0, FuelType::Diesel, &prices), 0.0);
    }

    #[test]
    fn test_add_travel_expense_stores_cost() {
        let project = project_with_member();
        let updated = project
            .apply(ProjectEdit::AddTravelExpense(trip(100.0, 25.0, FuelType::Gas)))
            .unwrap();

        assert_eq!(updated.travel_expenses.len(), 1);
        assert!((updated.travel_expenses[0].cost - 16.0).abs() < 1e-9);
        assert!(project.travel_expenses.is_empty());
    }

    #[test]
    fn test_fuel_price_change_keeps_existing_costs() {
        let project = project_with_member()
            .apply(ProjectEdit::AddTravelExpense(trip(100.0, 25.0, FuelType::Gas)))
            .unwrap()
            .apply(ProjectEdit::SetFuelPrices(FuelPrices { gas: 8.0, diesel: 5.0 }))
            .unwrap();

        assert!((project.travel_expenses[0].cost - 16.0).abs() < 1e-9);
        assert_eq!(project.fuel_prices.gas, 8.0);
    }

    #[test]
    fn test_travel_rejects_zero_mpg() {
        let result = project_with_member()
            .apply(ProjectEdit::AddTravelExpense(trip(100.0, 0.0, FuelType::Gas)));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_log_hours_requires_known_member() {
        let result = project_with_member().apply(ProjectEdit::LogHours(HoursInput {
            team_member_id: 99,
            date: None,
            hours: 8.0,
        }));
        assert!(matches!(result, Err(Error::TeamMemberNotFound(99))));
    }

    #[test]
    fn test_remove_team_member_drops_their_hours() {
        let project = project_with_member()
            .apply(ProjectEdit::LogHours(HoursInput {
                team_member_id: 10,
                date: None,
                hours: 8.0,
            }))
            .unwrap()
            .apply(ProjectEdit::AddTravelExpense(trip(50.0, 25.0, FuelType::Gas)))
            .unwrap();

        let updated = project.apply(ProjectEdit::RemoveTeamMember(10)).unwrap();

        assert!(updated.team_members.is_empty());
        assert!(updated.hours.is_empty());
        assert_eq!(updated.travel_expenses.len(), 1);
        assert_eq!(updated.team_member_name(10), "Unknown");
    }

    #[test]
    fn test_new_ids_are_unique() {
        let mut project = project_with_member();

        for price in [100.0, 200.0, 300.0] {
            project = project
                .apply(ProjectEdit::AddChangeOrder(ChangeOrderInput {
                    description: "Extra".to_string(),
                    price,
                }))
                .unwrap();
        }

        let mut ids: Vec<_> = project.change_orders.iter().map(|c| c.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_material_quantity_defaults_to_one() {
        let project = project_with_member()
            .apply(ProjectEdit::AddMaterial(MaterialInput {
                name: " Drywall ".to_string(),
                cost: 250.5,
                quantity: "  ".to_string(),
                date: None,
            }))
            .unwrap();

        assert_eq!(project.materials[0].name, "Drywall");
        assert_eq!(project.materials[0].quantity, "1");
    }

    #[test]
    fn test_set_invoice_status() {
        let project = project_with_member()
            .apply(ProjectEdit::AddInvoice(InvoiceInput {
                amount: 1000.0,
                date: None,
                description: "Deposit".to_string(),
                status: InvoiceStatus::Sent,
            }))
            .unwrap();
        let id = project.invoices[0].id;

        let paid = project
            .apply(ProjectEdit::SetInvoiceStatus { id, status: InvoiceStatus::Paid })
            .unwrap();

        assert_eq!(paid.invoices[0].status, InvoiceStatus::Paid);
        assert_eq!(paid.invoices[0].amount, 1000.0);
        assert_eq!(project.invoices[0].status, InvoiceStatus::Sent);
    }

    #[test]
    fn test_unknown_entry_is_reported() {
        let result = project_with_member().apply(ProjectEdit::RemoveMaterial(5));
        assert!(matches!(
            result,
            Err(Error::EntryNotFound { kind: "material", id: 5 })
        ));
    }

    #[test]
    fn test_update_details_validates() {
        let project = project_with_member();
        let details = ProjectDetails {
            name: "  ".to_string(),
            agreed_price: 100.0,
            description: None,
            status: ProjectStatus::Quoting,
        };

        assert!(project.apply(ProjectEdit::UpdateDetails(details)).is_err());
    }

    #[test]
    fn test_update_details_blank_description_clears_it() {
        let mut project = project_with_member();
        project.description = Some("Old scope".to_string());
        let details = ProjectDetails {
            name: project.name.clone(),
            agreed_price: project.agreed_price,
            description: Some(String::new()),
            status: project.status,
        };

        let updated = project.apply(ProjectEdit::UpdateDetails(details)).unwrap();
        assert_eq!(updated.description, None);
    }
}
