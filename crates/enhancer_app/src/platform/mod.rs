//! Native side: config, logging, the engine-backed effect runner and the
//! headless driver behind the binary.
mod app;
pub mod config;
pub mod effects;
pub mod headless;
pub mod logging;

pub use app::run_app;
