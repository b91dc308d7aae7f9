//! Value objects representing immutable domain concepts and response shapes.

pub mod auth_response;
pub mod caller;
pub mod earnings;
pub mod order_view;
pub mod product_view;
pub mod user_profile;

// Re-export commonly used types
pub use auth_response::{AuthResponse, UserSummary};
pub use caller::Caller;
pub use earnings::{DeliveryRecord, EarningsSummary};
pub use order_view::{ClientRef, OrderView, PartyRef, TrackingView};
pub use product_view::{MerchantRef, ProductView};
pub use user_profile::UserProfile;
