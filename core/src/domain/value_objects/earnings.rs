//! Driver earnings aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One delivered order in an earnings report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRecord {
    pub order_id: Uuid,
    /// Empty when the client no longer exists
    pub customer_name: String,
    /// Empty when the merchant no longer exists
    pub restaurant: String,
    pub amount: f64,
    pub tip: f64,
    pub distance: f64,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EarningsSummary {
    pub total_earnings: f64,
    pub total_deliveries: u64,
    pub tips: f64,
    pub base_pay: f64,
    pub deliveries: Vec<DeliveryRecord>,
    pub average_per_delivery: f64,
}

impl EarningsSummary {
    /// Folds a delivery into the running totals
    pub fn record(&mut self, delivery: DeliveryRecord) {
        self.total_earnings += delivery.amount;
        self.total_deliveries += 1;
        self.tips += delivery.tip;
        self.base_pay += (delivery.amount - delivery.tip).max(0.0);
        self.deliveries.push(delivery);
        self.average_per_delivery = self.total_earnings / self.total_deliveries as f64;
    }
}
