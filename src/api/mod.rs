mod chart_style;
mod engine;
mod engine_config;
mod label_format;
mod layout_helpers;
mod render_frame_builder;
mod session;

pub use chart_style::ChartStyle;
pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
pub use render_frame_builder::{
    CrosshairReadout, GRID_DIVISIONS, TIME_LABEL_TARGET, build_render_frame, resolve_crosshair,
};
pub use session::ChartSession;
