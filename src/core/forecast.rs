use chrono::{DateTime, Local};
use serde::Deserialize;

use crate::quantity::rate::KilowattHourRate;

/// One priced interval of the gateway's grid price forecast.
///
/// The gateway reports the slots in chronological order, one per hour,
/// starting at the current hour.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ForecastSlot {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,

    #[serde(rename = "value")]
    pub price: KilowattHourRate,
}
