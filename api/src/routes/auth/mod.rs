//! Authentication and account administration handlers
//!
//! - Registration and login (public)
//! - User listing, update and deletion (administrators)

pub mod login;
pub mod register;
pub mod users;

pub use login::login;
pub use register::register;
pub use users::{delete_user, list_users, update_user};
