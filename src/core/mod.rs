pub mod candle;
pub mod mapper;
pub mod primitives;
pub mod series;
pub mod types;
pub mod viewport;

pub use candle::{CANDLE_BODY_RATIO, Candle, CandleGeometry, RawCandle, project_candles};
pub use mapper::{CoordinateMapper, PRICE_PADDING_RATIO, padded_price_extent};
pub use series::{Interval, Range, Series, SeriesKey, price_extent};
pub use types::{Padding, PlotArea, Viewport};
pub use viewport::{
    CrosshairState, DragState, MAX_CANDLE_WIDTH, MIN_CANDLE_WIDTH, PAN_SENSITIVITY,
    ViewportState, VisibleWindow, ZOOM_INTENSITY, max_offset, visible_candle_count,
};
