//! Production entry services

mod actual;
mod delete;
mod edit;
mod plan;

pub use actual::{generate_batch_no, ActualService};
pub use delete::DeleteEntryService;
pub use edit::EditEntryService;
pub use plan::PlanService;
