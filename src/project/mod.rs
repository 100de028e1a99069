//! @ai:module:intent Project data model, lenient decoding and editing
//! @ai:module:layer domain
//! @ai:module:public_api Project, ProjectEdit, ProjectStatus, TeamMember, HoursEntry, ChangeOrder, Material, TravelExpense, Invoice, Payment

pub mod edit;
pub mod lenient;
pub mod model;
mod upgrade;

pub use edit::{
    next_id, travel_cost, ChangeOrderInput, HoursInput, InvoiceInput, MaterialInput,
    ProjectDetails, ProjectEdit, TeamMemberInput, TravelInput,
};
pub use model::{
    ChangeOrder, FuelPrices, FuelType, HoursEntry, Invoice, InvoiceStatus, Material, Payment,
    Project, ProjectId, ProjectStatus, TeamMember, TravelExpense,
};
