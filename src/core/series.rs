use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{Candle, RawCandle};
use crate::error::{ChartError, ChartResult};

/// Bar interval of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Interval {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[default]
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "1wk")]
    OneWeek,
    #[serde(rename = "1mo")]
    OneMonth,
}

impl Interval {
    pub const ALL: [Interval; 8] = [
        Interval::OneMinute,
        Interval::FiveMinutes,
        Interval::FifteenMinutes,
        Interval::ThirtyMinutes,
        Interval::OneHour,
        Interval::OneDay,
        Interval::OneWeek,
        Interval::OneMonth,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::FiveMinutes => "5m",
            Self::FifteenMinutes => "15m",
            Self::ThirtyMinutes => "30m",
            Self::OneHour => "1h",
            Self::OneDay => "1d",
            Self::OneWeek => "1wk",
            Self::OneMonth => "1mo",
        }
    }

    /// Nominal bar duration. Months are counted as 30 days.
    #[must_use]
    pub fn seconds(self) -> i64 {
        match self {
            Self::OneMinute => 60,
            Self::FiveMinutes => 300,
            Self::FifteenMinutes => 900,
            Self::ThirtyMinutes => 1_800,
            Self::OneHour => 3_600,
            Self::OneDay => 86_400,
            Self::OneWeek => 604_800,
            Self::OneMonth => 2_592_000,
        }
    }

    /// Intraday intervals label the time axis with time-of-day, others with dates.
    #[must_use]
    pub fn is_intraday(self) -> bool {
        self.seconds() < 86_400
    }

    /// Initial candle width in pixels after a series change.
    #[must_use]
    pub fn default_candle_width(self) -> f64 {
        match self {
            Self::OneMinute => 6.0,
            Self::FiveMinutes => 7.0,
            Self::FifteenMinutes => 8.0,
            Self::ThirtyMinutes => 9.0,
            Self::OneHour => 10.0,
            Self::OneDay => 12.0,
            Self::OneWeek => 16.0,
            Self::OneMonth => 20.0,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|interval| interval.as_str() == value)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown interval `{value}`")))
    }
}

/// History span requested from a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Range {
    #[serde(rename = "1d")]
    OneDay,
    #[default]
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "5y")]
    FiveYears,
}

impl Range {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::FiveDays => "5d",
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::FiveYears => "5y",
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cache and fetch key of one series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    pub ticker: String,
    pub interval: Interval,
    pub range: Range,
}

impl SeriesKey {
    #[must_use]
    pub fn new(ticker: impl Into<String>, interval: Interval, range: Range) -> Self {
        Self {
            ticker: ticker.into(),
            interval,
            range,
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.ticker, self.interval, self.range)
    }
}

/// Immutable, time-ordered candle sequence.
///
/// Cloning is cheap; a series is replaced wholesale, never edited in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    candles: Arc<[Candle]>,
}

impl Series {
    /// Builds a series, stable-sorting candles by time when needed.
    #[must_use]
    pub fn new(mut candles: Vec<Candle>) -> Self {
        if !candles.is_sorted_by_key(|candle| candle.time) {
            candles.sort_by_key(|candle| candle.time);
        }
        Self {
            candles: candles.into(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a series from provider rows, dropping rows missing open/close.
    #[must_use]
    pub fn from_raw(rows: impl IntoIterator<Item = RawCandle>) -> Self {
        Self::new(rows.into_iter().filter_map(RawCandle::into_candle).collect())
    }

    /// Parses a JSON array of provider rows.
    pub fn from_raw_json(input: &str) -> ChartResult<Self> {
        let rows: Vec<RawCandle> = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse candle rows: {e}")))?;
        Ok(Self::from_raw(rows))
    }

    #[must_use]
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<Candle> {
        self.candles.last().copied()
    }
}

impl From<Vec<Candle>> for Series {
    fn from(candles: Vec<Candle>) -> Self {
        Self::new(candles)
    }
}

/// Lowest `low` and highest `high` over a slice, `None` when empty.
#[must_use]
pub fn price_extent(candles: &[Candle]) -> Option<(f64, f64)> {
    let min = candles.iter().map(|c| OrderedFloat(c.low)).min()?;
    let max = candles.iter().map(|c| OrderedFloat(c.high)).max()?;
    Some((min.into_inner(), max.into_inner()))
}
