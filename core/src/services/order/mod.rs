//! Order service module
//!
//! - Order placement with server-side price snapshots
//! - Listings for clients and drivers
//! - Status transitions validated by a role/state table
//! - Driver assignment, tracking and live location

mod service;
mod transitions;


pub use service::{NewOrder, OrderLine, OrderService};
pub use transitions::{rule_for, Scope, TransitionRule, TRANSITIONS};
