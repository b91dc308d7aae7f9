use dm_core::services::EarningsPeriod;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EarningsQuery {
    pub period: Option<String>,
}

impl EarningsQuery {
    /// `today`, `week` or `month`; anything else reports over all time
    pub fn period(&self) -> Option<EarningsPeriod> {
        self.period.as_deref().and_then(EarningsPeriod::parse)
    }
}
