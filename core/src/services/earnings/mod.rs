//! Earnings service module: delivered-order aggregates for drivers

mod period;
mod service;


pub use period::EarningsPeriod;
pub use service::EarningsService;
