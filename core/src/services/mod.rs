//! Business services containing domain logic and use cases.

pub mod auth;
pub mod catalog;
pub mod earnings;
pub mod order;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, Registration, UserChanges};
pub use catalog::{CatalogService, NewProduct};
pub use earnings::{EarningsPeriod, EarningsService};
pub use order::{NewOrder, OrderLine, OrderService, Scope, TransitionRule};
pub use token::{TokenService, TokenServiceConfig};
