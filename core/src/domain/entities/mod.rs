//! Domain entities representing core business objects.

pub mod order;
pub mod product;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use order::{Order, OrderItem, OrderStatus, PaymentMethod, PaymentStatus};
pub use product::Product;
pub use token::Claims;
pub use user::{Role, User};
