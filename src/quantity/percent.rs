use std::fmt::{Debug, Display, Formatter};

use derive_more::From;
use serde::{Deserialize, Serialize};

/// State-of-charge percentage as reported by the gateway.
#[derive(Copy, Clone, PartialEq, PartialOrd, From, Serialize, Deserialize)]
pub struct Percent(pub f64);

impl Display for Percent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}

impl Debug for Percent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}
