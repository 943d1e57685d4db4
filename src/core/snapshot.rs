use serde::Deserialize;

use crate::{
    core::forecast::ForecastSlot,
    quantity::{percent::Percent, rate::KilowattHourRate},
};

/// Battery working mode as reported by the gateway.
///
/// The gateway owns the actual mode transitions. Magpie never tracks a
/// charging flag of its own: the latest reported mode is the only state.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryMode {
    Normal,

    #[serde(rename = "charge")]
    Charging,

    #[serde(other)]
    #[default]
    Unknown,
}

/// Read-only snapshot of the gateway's live state, one per cycle.
#[derive(Clone, Debug)]
pub struct StateSnapshot {
    pub battery_mode: BatteryMode,
    pub state_of_charge: Percent,
    pub tariff: KilowattHourRate,
    pub forecast: Vec<ForecastSlot>,
}
