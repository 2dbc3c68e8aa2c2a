use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Interval;

/// Damping applied to drag distance when panning.
pub const PAN_SENSITIVITY: f64 = 0.5;
/// Relative candle width change per wheel notch.
pub const ZOOM_INTENSITY: f64 = 0.1;
pub const MIN_CANDLE_WIDTH: f64 = 2.0;
pub const MAX_CANDLE_WIDTH: f64 = 100.0;

/// Drag bookkeeping captured when the pointer goes down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DragState {
    pub active: bool,
    pub start_x: f64,
    pub start_offset: f64,
}

/// Last known crosshair position in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CrosshairState {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
}

/// Contiguous range of the series drawn in one pass.
///
/// `[start, end)` is what fits in the plot; `draw_start` adds one leading
/// candle when one exists so the left edge is not cut short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleWindow {
    pub draw_start: usize,
    pub start: usize,
    pub end: usize,
}

impl VisibleWindow {
    #[must_use]
    pub fn draw_len(self) -> usize {
        self.end - self.draw_start
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.end <= self.draw_start
    }
}

/// Pan/zoom state plus transient pointer state.
///
/// `offset` counts candles scrolled back from the newest one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub offset: f64,
    pub candle_width: f64,
    pub drag: DragState,
    pub crosshair: CrosshairState,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::for_interval(Interval::default())
    }
}

/// `ceil(plot_width / candle_width)`; zero for an empty plot.
#[must_use]
pub fn visible_candle_count(plot_width: f64, candle_width: f64) -> usize {
    if !plot_width.is_finite() || !candle_width.is_finite() {
        return 0;
    }
    if plot_width <= 0.0 || candle_width <= 0.0 {
        return 0;
    }
    (plot_width / candle_width).ceil() as usize
}

#[must_use]
pub fn max_offset(series_len: usize, visible_count: usize) -> f64 {
    series_len.saturating_sub(visible_count) as f64
}

impl ViewportState {
    #[must_use]
    pub fn for_interval(interval: Interval) -> Self {
        Self {
            offset: 0.0,
            candle_width: interval.default_candle_width(),
            drag: DragState::default(),
            crosshair: CrosshairState::default(),
        }
    }

    /// Series change: back to the newest candle at the interval's width.
    ///
    /// Crosshair visibility survives since the pointer has not moved.
    pub fn reset_for_interval(&mut self, interval: Interval) {
        self.offset = 0.0;
        self.candle_width = interval.default_candle_width();
        self.drag = DragState::default();
    }

    #[must_use]
    pub fn visible_candle_count(&self, plot_width: f64) -> usize {
        visible_candle_count(plot_width, self.candle_width)
    }

    #[must_use]
    pub fn max_offset(&self, series_len: usize, plot_width: f64) -> f64 {
        max_offset(series_len, self.visible_candle_count(plot_width))
    }

    /// Pulls `offset` back into `[0, max_offset]`. Non-finite offsets reset to 0.
    pub fn clamp_offset(&mut self, series_len: usize, plot_width: f64) {
        let max = self.max_offset(series_len, plot_width);
        self.offset = if self.offset.is_finite() {
            self.offset.clamp(0.0, max)
        } else {
            0.0
        };
    }

    /// Window for the current offset. The offset is clamped on a copy.
    #[must_use]
    pub fn visible_window(&self, series_len: usize, plot_width: f64) -> VisibleWindow {
        let mut clamped = *self;
        clamped.clamp_offset(series_len, plot_width);
        let visible = clamped.visible_candle_count(plot_width);
        let end = series_len - (clamped.offset.floor() as usize).min(series_len);
        let start = end.saturating_sub(visible);
        let draw_start = start.saturating_sub(1);
        VisibleWindow {
            draw_start,
            start,
            end,
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.active
    }

    pub fn begin_drag(&mut self, x: f64) {
        self.drag = DragState {
            active: true,
            start_x: x,
            start_offset: self.offset,
        };
    }

    /// Pans relative to the drag origin. Dragging right reveals older candles.
    ///
    /// Returns `false` when no drag is active.
    pub fn drag_to(&mut self, x: f64, series_len: usize, plot_width: f64) -> bool {
        if !self.drag.active {
            return false;
        }
        let dx = x - self.drag.start_x;
        let max = self.max_offset(series_len, plot_width);
        let target = self.drag.start_offset + (dx / self.candle_width) * PAN_SENSITIVITY;
        self.offset = if target.is_finite() {
            target.clamp(0.0, max)
        } else {
            self.drag.start_offset.clamp(0.0, max)
        };
        trace!(dx, offset = self.offset, "viewport pan");
        true
    }

    pub fn end_drag(&mut self) {
        self.drag.active = false;
    }

    /// Wheel zoom anchored at the current offset.
    ///
    /// Negative `delta_y` (scroll up) widens candles. Returns `false` when the
    /// delta is zero or not finite.
    pub fn zoom(&mut self, delta_y: f64) -> bool {
        if !delta_y.is_finite() || delta_y == 0.0 {
            return false;
        }
        let factor = if delta_y < 0.0 {
            1.0 + ZOOM_INTENSITY
        } else {
            1.0 - ZOOM_INTENSITY
        };
        self.candle_width =
            (self.candle_width * factor).clamp(MIN_CANDLE_WIDTH, MAX_CANDLE_WIDTH);
        trace!(delta_y, candle_width = self.candle_width, "viewport zoom");
        true
    }

    pub fn show_crosshair(&mut self, x: f64, y: f64) {
        self.crosshair = CrosshairState { visible: true, x, y };
    }

    pub fn hide_crosshair(&mut self) {
        self.crosshair.visible = false;
    }
}
