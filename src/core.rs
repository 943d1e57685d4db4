pub mod band;
pub mod engine;
pub mod forecast;
pub mod snapshot;
pub mod window;
