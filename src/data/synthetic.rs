use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::primitives::{datetime_to_unix_seconds, round_price};
use crate::core::{Candle, Series, SeriesKey};
use crate::error::{ChartError, ChartResult};

use super::SeriesProvider;

pub const SYNTHETIC_CANDLE_COUNT: usize = 500;

const START_PRICE: f64 = 10.0;
const VOLATILITY: f64 = 0.1;
const PRICE_DECIMALS: u32 = 2;

/// Random-walk candles ending at an anchor time, one interval apart.
///
/// Output is deterministic per `(key, anchor)` so repeated fallbacks for the
/// same key look identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticSeriesProvider {
    anchor: i64,
    candle_count: usize,
}

impl SyntheticSeriesProvider {
    #[must_use]
    pub fn new(anchor: DateTime<Utc>) -> Self {
        Self {
            anchor: datetime_to_unix_seconds(anchor),
            candle_count: SYNTHETIC_CANDLE_COUNT,
        }
    }

    #[must_use]
    pub fn anchored_now() -> Self {
        Self::new(Utc::now())
    }

    #[must_use]
    pub fn with_candle_count(mut self, candle_count: usize) -> Self {
        self.candle_count = candle_count;
        self
    }

    pub fn generate(&self, key: &SeriesKey) -> ChartResult<Series> {
        let step = key.interval.seconds();
        let count = i64::try_from(self.candle_count)
            .map_err(|_| ChartError::InvalidData("synthetic candle count too large".to_owned()))?;
        let start = self.anchor - count * step;
        let mut rng = StdRng::seed_from_u64(seed_for(key, self.anchor));

        let mut candles = Vec::with_capacity(self.candle_count);
        let mut open = START_PRICE;
        for index in 0..count {
            let change = rng.gen_range(-0.5..0.5) * VOLATILITY;
            let close = open + change;
            let high = open.max(close) + rng.gen_range(0.0..VOLATILITY * 0.5);
            let low = open.min(close) - rng.gen_range(0.0..VOLATILITY * 0.5);

            candles.push(Candle::new(
                start + index * step,
                round_price(open, PRICE_DECIMALS),
                round_price(high, PRICE_DECIMALS),
                round_price(low, PRICE_DECIMALS),
                round_price(close, PRICE_DECIMALS),
            )?);
            open = close;
        }

        Ok(Series::new(candles))
    }
}

impl SeriesProvider for SyntheticSeriesProvider {
    fn fetch(&mut self, key: &SeriesKey) -> ChartResult<Series> {
        self.generate(key)
    }
}

fn seed_for(key: &SeriesKey, anchor: i64) -> u64 {
    // FNV-1a: stable across toolchains, unlike `DefaultHasher`.
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    let parts = [
        key.ticker.as_bytes(),
        key.interval.as_str().as_bytes(),
        key.range.as_str().as_bytes(),
    ];
    let hash = parts
        .iter()
        .flat_map(|part| part.iter().chain(std::iter::once(&0xff)))
        .fold(OFFSET_BASIS, |hash, byte| {
            (hash ^ u64::from(*byte)).wrapping_mul(PRIME)
        });
    hash ^ (anchor as u64)
}
