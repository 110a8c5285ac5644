pub mod table;
mod toasts;
pub mod user_form;

pub use table::{GenericTable, TableResponse, generic_table};
pub use toasts::toasts;
pub use user_form::user_form;
