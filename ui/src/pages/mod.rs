//! Pages of the application.
//!
//! - `dashboard`: users, invoices and roles tables plus the new-user drawer

mod dashboard;

pub use dashboard::{
    DashboardState, DashboardTab, LOADING_LABEL, NEW_USER_LABEL, RETRY_LABEL, apply_users_actions,
    dashboard_page,
};
