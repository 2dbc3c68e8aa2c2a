use tracing::warn;

use crate::core::{Series, SeriesKey};
use crate::error::ChartResult;

use super::{SeriesProvider, SyntheticSeriesProvider};

/// Substitutes a synthetic series whenever the primary provider fails.
#[derive(Debug, Clone)]
pub struct FallbackSeriesProvider<P> {
    primary: P,
    fallback: SyntheticSeriesProvider,
}

impl<P: SeriesProvider> FallbackSeriesProvider<P> {
    #[must_use]
    pub fn new(primary: P, fallback: SyntheticSeriesProvider) -> Self {
        Self { primary, fallback }
    }
}

impl<P: SeriesProvider> SeriesProvider for FallbackSeriesProvider<P> {
    fn fetch(&mut self, key: &SeriesKey) -> ChartResult<Series> {
        match self.primary.fetch(key) {
            Ok(series) => Ok(series),
            Err(err) => {
                warn!(key = %key, error = %err, "series fetch failed, using synthetic data");
                self.fallback.fetch(key)
            }
        }
    }
}
