//! Repository interfaces for persistence, with in-memory implementations for tests.

pub mod order;
pub mod product;
pub mod user;

pub use order::{OrderFilter, OrderRepository, OrderUpdate};
pub use product::ProductRepository;
pub use user::UserRepository;

#[cfg(any(test, feature = "mock-services"))]
pub use order::MockOrderRepository;
#[cfg(any(test, feature = "mock-services"))]
pub use product::MockProductRepository;
#[cfg(any(test, feature = "mock-services"))]
pub use user::MockUserRepository;
