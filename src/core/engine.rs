use chrono::{DateTime, Local};

use crate::{
    core::{snapshot::BatteryMode, window::SelectedWindow},
    quantity::rate::KilowattHourRate,
};

/// What the cycle should tell the gateway's grid-charge-limit actuator.
///
/// Commanding a threshold of zero conventionally disables grid charging.
/// The gateway is idempotent, so re-sending the same command is harmless.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ChargeCommand {
    /// Permit grid charging below the given price threshold.
    Start(KilowattHourRate),

    /// Disable grid charging (threshold zero).
    Stop,

    /// Send nothing; the device already does the right thing.
    NoOp,
}

impl ChargeCommand {
    /// The threshold to push to the actuator, if any.
    pub const fn threshold(self) -> Option<KilowattHourRate> {
        match self {
            Self::Start(threshold) => Some(threshold),
            Self::Stop => Some(KilowattHourRate::ZERO),
            Self::NoOp => None,
        }
    }
}

/// Why a charging battery should be stopped.
///
/// The two reasons are evaluated independently and joined by OR: either one
/// alone forces a [`ChargeCommand::Stop`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StopReason {
    /// The live grid tariff rose above the selected window's price.
    PriceExceeded,

    /// The state-of-charge rose above the configured limit.
    SocExceeded,
}

/// Evaluate the stop conditions for a currently-charging battery.
pub fn stop_reasons(window: &SelectedWindow) -> Vec<StopReason> {
    let mut reasons = Vec::new();
    if window.tariff > window.price {
        reasons.push(StopReason::PriceExceeded);
    }
    if window.state_of_charge > window.soc_limit {
        reasons.push(StopReason::SocExceeded);
    }
    reasons
}

/// Decide what to command this cycle.
///
/// Stateless: the device's own reported mode is the state, re-read from the
/// snapshot every cycle, so the decision can never desync from the real
/// device. `None` means the forecast was empty and short-circuits to
/// [`ChargeCommand::NoOp`] — never a start at threshold zero.
pub fn decide(window: Option<&SelectedWindow>, now: DateTime<Local>) -> ChargeCommand {
    let Some(window) = window else {
        return ChargeCommand::NoOp;
    };
    match window.battery_mode {
        BatteryMode::Normal | BatteryMode::Unknown => {
            if window.covers_hour(now) && (window.state_of_charge < window.soc_limit) {
                ChargeCommand::Start(window.price)
            } else {
                ChargeCommand::NoOp
            }
        }

        BatteryMode::Charging => {
            if stop_reasons(window).is_empty() {
                // Still cheap and below the limit: let the device keep going.
                ChargeCommand::NoOp
            } else {
                ChargeCommand::Stop
            }
        }
    }
}
