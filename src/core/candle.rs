use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::CoordinateMapper;
use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::{ChartError, ChartResult};

/// One OHLC sample.
///
/// `low <= min(open, close)` and `high >= max(open, close)` are expected but
/// not enforced: upstream feeds occasionally violate them and the renderer
/// draws whatever it is given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Seconds since the Unix epoch.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    /// Builds a candle after checking that every price is finite.
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64) -> ChartResult<Self> {
        if !open.is_finite() || !high.is_finite() || !low.is_finite() || !close.is_finite() {
            return Err(ChartError::InvalidData(
                "candle prices must be finite".to_owned(),
            ));
        }

        Ok(Self {
            time,
            open,
            high,
            low,
            close,
        })
    }

    /// Converts strongly-typed temporal/decimal input into a candle.
    pub fn from_decimal_time(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> ChartResult<Self> {
        Self::new(
            datetime_to_unix_seconds(time),
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
        )
    }

    /// Returns `true` when close price is greater than or equal to open price.
    #[must_use]
    pub fn is_bullish(self) -> bool {
        self.close >= self.open
    }
}

/// Provider payload row before cleaning. Any price may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawCandle {
    pub time: i64,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
}

impl RawCandle {
    /// Cleans one row.
    ///
    /// Rows without `open` or `close` (or with non-finite prices) are dropped.
    /// A missing `high`/`low` falls back to the body edge.
    #[must_use]
    pub fn into_candle(self) -> Option<Candle> {
        let open = self.open?;
        let close = self.close?;
        let high = self.high.unwrap_or(open.max(close));
        let low = self.low.unwrap_or(open.min(close));
        Candle::new(self.time, open, high, low, close).ok()
    }
}

/// Projected candle geometry in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub center_x: f64,
    pub body_left: f64,
    pub body_width: f64,
    pub body_top: f64,
    pub body_height: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub is_bullish: bool,
}

/// Fraction of the candle slot occupied by the body; the rest is the gap.
pub const CANDLE_BODY_RATIO: f64 = 0.8;

/// Projects a drawn slice into render geometry.
///
/// Candle `i` of the slice occupies the slot starting at
/// `mapper.index_to_x(first_slot + i)`. A negative `first_slot` places
/// leading candles left of the plot. Body height and width are at least one
/// pixel so doji candles and very narrow zoom levels stay visible.
#[must_use]
pub fn project_candles(
    candles: &[Candle],
    first_slot: f64,
    mapper: CoordinateMapper,
) -> Vec<CandleGeometry> {
    #[cfg(feature = "parallel-projection")]
    {
        candles
            .par_iter()
            .enumerate()
            .map(|(index, candle)| project_single_candle(first_slot + index as f64, *candle, mapper))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        candles
            .iter()
            .enumerate()
            .map(|(index, candle)| project_single_candle(first_slot + index as f64, *candle, mapper))
            .collect()
    }
}

fn project_single_candle(slot: f64, candle: Candle, mapper: CoordinateMapper) -> CandleGeometry {
    let slot_left = mapper.index_to_x(slot);
    let slot_width = mapper.candle_width();
    let body_width = (slot_width * CANDLE_BODY_RATIO).max(1.0);
    let center_x = slot_left + slot_width / 2.0;

    let open_y = mapper.price_to_y(candle.open);
    let close_y = mapper.price_to_y(candle.close);
    let high_y = mapper.price_to_y(candle.high);
    let low_y = mapper.price_to_y(candle.low);

    CandleGeometry {
        center_x,
        body_left: center_x - body_width / 2.0,
        body_width,
        body_top: open_y.min(close_y),
        body_height: (open_y - close_y).abs().max(1.0),
        wick_top: high_y.min(low_y),
        wick_bottom: high_y.max(low_y),
        is_bullish: candle.is_bullish(),
    }
}
