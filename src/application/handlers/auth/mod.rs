//! Admin authentication handlers.

mod login_admin;

pub use login_admin::{AdminCredentials, LoginAdminCommand, LoginAdminHandler};
