pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

pub mod filter;

#[cfg(any(test, feature = "mock-services"))]
mod mock;


pub use filter::{OrderFilter, OrderUpdate};
pub use r#trait::OrderRepository;

#[cfg(any(test, feature = "mock-services"))]
pub use mock::MockOrderRepository;
