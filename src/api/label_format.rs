use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::core::{Candle, Interval};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimeLabelPattern {
    /// Time-axis tick on intraday series.
    TimeMinute,
    /// Time-axis tick on daily and coarser series.
    Date,
    /// Crosshair badge on intraday series.
    DateMinute,
}

impl TimeLabelPattern {
    fn format_str(self) -> &'static str {
        match self {
            Self::TimeMinute => "%H:%M",
            Self::Date => "%Y-%m-%d",
            Self::DateMinute => "%Y-%m-%d %H:%M",
        }
    }

    pub(crate) fn axis_for(interval: Interval) -> Self {
        if interval.is_intraday() {
            Self::TimeMinute
        } else {
            Self::Date
        }
    }

    pub(crate) fn crosshair_for(interval: Interval) -> Self {
        if interval.is_intraday() {
            Self::DateMinute
        } else {
            Self::Date
        }
    }
}

pub(crate) fn format_time_label(
    unix_seconds: i64,
    pattern: TimeLabelPattern,
    offset_minutes: i32,
) -> String {
    let Some(utc) = DateTime::from_timestamp(unix_seconds, 0) else {
        return unix_seconds.to_string();
    };
    let offset = FixedOffset::east_opt(offset_minutes.saturating_mul(60))
        .unwrap_or_else(|| Utc.fix());
    utc.with_timezone(&offset)
        .format(pattern.format_str())
        .to_string()
}

pub(crate) fn format_price(value: f64, precision: u8) -> String {
    if !value.is_finite() {
        return "-".to_owned();
    }
    format!("{value:.prec$}", prec = usize::from(precision))
}

pub(crate) fn format_ohlc_readout(candle: Candle, precision: u8) -> String {
    format!(
        "O {}  H {}  L {}  C {}",
        format_price(candle.open, precision),
        format_price(candle.high, precision),
        format_price(candle.low, precision),
        format_price(candle.close, precision),
    )
}
