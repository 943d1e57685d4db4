use bon::Builder;
use chrono::{DateTime, Local, Timelike};

use crate::{
    core::{
        band::TimeBand,
        snapshot::{BatteryMode, StateSnapshot},
    },
    quantity::{percent::Percent, rate::KilowattHourRate},
};

/// The cheapest price slot found inside a band, together with the snapshot
/// fields the decision engine needs. A per-cycle value object.
#[derive(Clone, Debug, PartialEq, Builder)]
pub struct SelectedWindow {
    pub price: KilowattHourRate,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub battery_mode: BatteryMode,
    pub soc_limit: Percent,
    pub tariff: KilowattHourRate,
    pub state_of_charge: Percent,
}

impl SelectedWindow {
    /// Window membership at hour granularity: minutes are truncated, so the
    /// check is `start.hour() <= now.hour() < end.hour()`. A window ending
    /// at `14:30` therefore does not cover hour 14.
    pub fn covers_hour(&self, now: DateTime<Local>) -> bool {
        (now.hour() >= self.start.hour()) && (now.hour() < self.end.hour())
    }
}

/// The configured band does not map onto the available forecast horizon.
///
/// A configuration/data-shape mismatch, deliberately distinct from transport
/// failures so it never gets mistaken for a network fault.
#[derive(Debug, Eq, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SelectError {
    #[display("band {start_hour}:00–{end_hour}:00 runs past the {n_slots}-slot forecast horizon")]
    BandOutOfRange { start_hour: u32, end_hour: u32, n_slots: usize },

    #[display("band is inverted: {start_hour}:00 starts after {end_hour}:00")]
    InvertedBand { start_hour: u32, end_hour: u32 },
}

/// Find the cheapest slot within the band.
///
/// Returns `Ok(None)` on an empty forecast: "no price data yet", which the
/// decision engine must treat as "no decision possible", never as free
/// energy. On ties the later slot wins, since the scan updates on `<=`.
pub fn select(
    snapshot: &StateSnapshot,
    band: &TimeBand,
) -> Result<Option<SelectedWindow>, SelectError> {
    let slots = &snapshot.forecast;
    if slots.is_empty() {
        return Ok(None);
    }
    if band.start_hour > band.end_hour {
        return Err(SelectError::InvertedBand {
            start_hour: band.start_hour,
            end_hour: band.end_hour,
        });
    }
    let (start, end) = (band.start_hour as usize, band.end_hour as usize);
    if end >= slots.len() {
        return Err(SelectError::BandOutOfRange {
            start_hour: band.start_hour,
            end_hour: band.end_hour,
            n_slots: slots.len(),
        });
    }

    let mut cheapest = &slots[start];
    for slot in &slots[start..=end] {
        if slot.price <= cheapest.price {
            cheapest = slot;
        }
    }

    let window = SelectedWindow::builder()
        .price(cheapest.price)
        .start(cheapest.start)
        .end(cheapest.end)
        .battery_mode(snapshot.battery_mode)
        .soc_limit(band.soc_limit)
        .tariff(snapshot.tariff)
        .state_of_charge(snapshot.state_of_charge)
        .build();
    Ok(Some(window))
}
