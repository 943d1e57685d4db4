use async_trait::async_trait;

use crate::{core::snapshot::StateSnapshot, prelude::*, quantity::rate::KilowattHourRate};

/// The smart-charging gateway as the core sees it: a forecast/state reader
/// plus a grid-charge-limit actuator.
///
/// Both calls are blocking round-trips. Delivery is at-least-once; the
/// device side is idempotent, so a repeated command is harmless.
#[async_trait]
pub trait ChargeGateway: Sync {
    /// Fetch the live device state and the price forecast in one snapshot.
    async fn get_state(&self) -> Result<StateSnapshot>;

    /// Push a grid-charge-limit threshold. Zero disables grid charging.
    async fn set_grid_charge_limit(&self, threshold: KilowattHourRate) -> Result;
}
