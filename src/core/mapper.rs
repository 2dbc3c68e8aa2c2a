use serde::{Deserialize, Serialize};

use crate::core::series::price_extent;
use crate::core::{Candle, PlotArea};

/// Share of the price range added above and below the visible extrema.
pub const PRICE_PADDING_RATIO: f64 = 0.10;

/// Pure data-space to pixel-space transform for one render pass.
///
/// X is indexed by candle slot within the drawn slice; Y is linear in price
/// and inverted so that higher prices sit closer to the top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateMapper {
    plot: PlotArea,
    candle_width: f64,
    price_min: f64,
    price_max: f64,
}

impl CoordinateMapper {
    #[must_use]
    pub fn new(plot: PlotArea, candle_width: f64, price_min: f64, price_max: f64) -> Self {
        Self {
            plot,
            candle_width,
            price_min,
            price_max,
        }
    }

    #[must_use]
    pub fn plot(self) -> PlotArea {
        self.plot
    }

    #[must_use]
    pub fn candle_width(self) -> f64 {
        self.candle_width
    }

    #[must_use]
    pub fn price_range(self) -> (f64, f64) {
        (self.price_min, self.price_max)
    }

    /// Left edge of slot `index`. No bounds check.
    #[must_use]
    pub fn index_to_x(self, index: f64) -> f64 {
        self.plot.padding.left + index * self.candle_width
    }

    #[must_use]
    pub fn price_to_y(self, price: f64) -> f64 {
        let normalized = (price - self.price_min) / self.price_span();
        self.plot.padding.top + self.plot.height - normalized * self.plot.height
    }

    /// Inverse of [`Self::price_to_y`].
    #[must_use]
    pub fn y_to_price(self, y: f64) -> f64 {
        if self.plot.height <= 0.0 {
            return self.price_min;
        }
        let normalized = (self.plot.padding.top + self.plot.height - y) / self.plot.height;
        self.price_min + normalized * self.price_span()
    }

    /// Slot under a horizontal pixel, or `None` left of the plot.
    #[must_use]
    pub fn x_to_index(self, x: f64) -> Option<usize> {
        let relative = x - self.plot.padding.left;
        if !relative.is_finite() || relative < 0.0 || self.candle_width <= 0.0 {
            return None;
        }
        Some((relative / self.candle_width).floor() as usize)
    }

    fn price_span(self) -> f64 {
        let span = self.price_max - self.price_min;
        if span == 0.0 { 1.0 } else { span }
    }
}

/// Visible price extrema widened by [`PRICE_PADDING_RATIO`] of their range.
#[must_use]
pub fn padded_price_extent(candles: &[Candle]) -> Option<(f64, f64)> {
    let (low, high) = price_extent(candles)?;
    let pad = (high - low) * PRICE_PADDING_RATIO;
    Some((low - pad, high + pad))
}
