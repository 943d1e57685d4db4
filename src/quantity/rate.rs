use std::fmt::{Debug, Display, Formatter};

use derive_more::From;
use serde::{Deserialize, Serialize};

/// Euro per kilowatt-hour.
#[derive(Copy, Clone, PartialEq, PartialOrd, From, Serialize, Deserialize)]
pub struct KilowattHourRate(pub f64);

impl KilowattHourRate {
    pub const ZERO: Self = Self(0.0);
}

impl Display for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3} €/kWh", self.0)
    }
}

impl Debug for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}€/kWh", self.0)
    }
}
