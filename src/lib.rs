//! candle-chart: interactive candlestick chart core.
//!
//! The crate keeps viewport arithmetic, input handling and frame building
//! free of any drawing backend so they can be exercised headless. Backends
//! (Cairo, GTK4) are opt-in features.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
