pub mod percent;
pub mod rate;
