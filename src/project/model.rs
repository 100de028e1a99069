//! @ai:module:intent Project record and its owned child collections
//! @ai:module:layer domain
//! @ai:module:public_api Project, ProjectStatus, TeamMember, HoursEntry, ChangeOrder, Material, TravelExpense, FuelType, FuelPrices, Invoice, InvoiceStatus, Payment
//! @ai:module:stateless true

use crate::project::lenient;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identifier of a project within a store.
pub type ProjectId = u64;

/// @ai:intent Lifecycle status of a construction project
/// @ai:effects pure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ProjectStatus {
    #[default]
    Scheduling,
    Quoting,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Awaiting Final Payment")]
    AwaitingFinalPayment,
    #[serde(rename = "Awaiting Materials Payment")]
    AwaitingMaterialsPayment,
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 6] = [
        ProjectStatus::Scheduling,
        ProjectStatus::Quoting,
        ProjectStatus::InProgress,
        ProjectStatus::AwaitingFinalPayment,
        ProjectStatus::AwaitingMaterialsPayment,
        ProjectStatus::Completed,
    ];

    /// @ai:intent Convert status to its display string
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Scheduling => "Scheduling",
            ProjectStatus::Quoting => "Quoting",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::AwaitingFinalPayment => "Awaiting Final Payment",
            ProjectStatus::AwaitingMaterialsPayment => "Awaiting Materials Payment",
            ProjectStatus::Completed => "Completed",
        }
    }

    /// @ai:intent Parse a status, accepting display strings and kebab/snake forms
    /// @ai:effects pure
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        Self::ALL.into_iter().find(|status| {
            status
                .as_str()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_ascii_lowercase()
                == normalized
        })
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown project status: {}", s))
    }
}

impl<'de> Deserialize<'de> for ProjectStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;

        Ok(value
            .as_ref()
            .and_then(Value::as_str)
            .and_then(Self::parse)
            .unwrap_or_default())
    }
}

/// @ai:intent Billing status of an invoice
/// @ai:effects pure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 5] = [
        InvoiceStatus::Pending,
        InvoiceStatus::Sent,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
        InvoiceStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Sent => "Sent",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Overdue => "Overdue",
            InvoiceStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown invoice status: {}", s))
    }
}

impl<'de> Deserialize<'de> for InvoiceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;

        Ok(value
            .as_ref()
            .and_then(Value::as_str)
            .and_then(Self::parse)
            .unwrap_or_default())
    }
}

/// @ai:intent Fuel burned on a trip, selects the price from FuelPrices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    #[default]
    Gas,
    Diesel,
}

impl FuelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Gas => "gas",
            FuelType::Diesel => "diesel",
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FuelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gas" => Ok(FuelType::Gas),
            "diesel" => Ok(FuelType::Diesel),
            other => Err(format!("unknown fuel type: {}", other)),
        }
    }
}

impl<'de> Deserialize<'de> for FuelType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;

        Ok(value
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default())
    }
}

/// @ai:intent Per-project price-per-gallon table used when a trip is entered
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelPrices {
    #[serde(default, deserialize_with = "lenient::amount")]
    pub gas: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub diesel: f64,
}

impl FuelPrices {
    /// @ai:intent Price per gallon for a fuel type
    /// @ai:effects pure
    pub fn price_for(&self, fuel_type: FuelType) -> f64 {
        match fuel_type {
            FuelType::Gas => self.gas,
            FuelType::Diesel => self.diesel,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub hourly_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoursEntry {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: u64,
    /// Loose reference into `Project::team_members`.
    #[serde(default, deserialize_with = "lenient::id")]
    pub team_member_id: u64,
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub hours: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeOrder {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    /// Signed; a negative change order lowers the adjusted price.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub cost: f64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub quantity: String,
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelExpense {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::id")]
    pub team_member_id: u64,
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub miles: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub mpg: f64,
    #[serde(default)]
    pub fuel_type: FuelType,
    /// Computed when the trip is entered; never recomputed from fuel prices.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub cost: f64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default)]
    pub status: InvoiceStatus,
}

/// @ai:intent Client payment from the earlier schema, superseded by Invoice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
}

/// @ai:intent A construction project with its owned financial records
/// @ai:invariant every child collection is owned solely by this project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: ProjectId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub agreed_price: f64,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub team_members: Vec<TeamMember>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub hours: Vec<HoursEntry>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub change_orders: Vec<ChangeOrder>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub materials: Vec<Material>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub travel_expenses: Vec<TravelExpense>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub invoices: Vec<Invoice>,
    /// Legacy receipts, folded into `invoices` on load.
    #[serde(
        default,
        deserialize_with = "lenient::or_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub payments: Vec<Payment>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub fuel_prices: FuelPrices,
}

impl Project {
    /// @ai:intent Create an empty project
    /// @ai:effects pure
    pub fn new(id: ProjectId, name: impl Into<String>, agreed_price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            agreed_price,
            ..Default::default()
        }
    }

    /// @ai:intent Find a team member by id, first match wins
    /// @ai:post returns None rather than failing when the reference is dangling
    /// @ai:effects pure
    pub fn team_member(&self, member_id: u64) -> Option<&TeamMember> {
        self.team_members.iter().find(|m| m.id == member_id)
    }

    /// @ai:intent Display name for a member reference
    /// @ai:effects pure
    pub fn team_member_name(&self, member_id: u64) -> &str {
        self.team_member(member_id)
            .map(|m| m.name.as_str())
            .unwrap_or("Unknown")
    }

    /// @ai:intent Total hours logged against one team member
    /// @ai:edge_cases non-finite entries count as zero
    /// @ai:effects pure
    pub fn total_hours(&self, member_id: u64) -> f64 {
        self.hours
            .iter()
            .filter(|h| h.team_member_id == member_id)
            .map(|h| h.hours)
            .filter(|h| h.is_finite())
            .sum()
    }
}
