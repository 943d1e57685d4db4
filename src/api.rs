pub mod client;
pub mod evcc;
pub mod gateway;
