use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> i64 {
    time.timestamp()
}

/// Rounds a price to `places` decimals using decimal (not binary) rounding.
///
/// Values that cannot be represented as `Decimal` are returned unchanged.
#[must_use]
pub fn round_price(value: f64, places: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|decimal| decimal.round_dp(places))
        .and_then(|decimal| decimal.to_f64())
        .unwrap_or(value)
}
