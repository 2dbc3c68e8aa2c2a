use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Series, SeriesKey};
use crate::error::ChartResult;

use super::SeriesProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Memoizes successful fetches per `(ticker, interval, range)`.
///
/// Entries live as long as the provider and are never expired. Failed
/// fetches are not cached, so a later call retries.
#[derive(Debug, Clone)]
pub struct CachedSeriesProvider<P> {
    inner: P,
    entries: IndexMap<SeriesKey, Series>,
    hits: u64,
    misses: u64,
}

impl<P: SeriesProvider> CachedSeriesProvider<P> {
    #[must_use]
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            entries: IndexMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }

    #[must_use]
    pub fn contains(&self, key: &SeriesKey) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: SeriesProvider> SeriesProvider for CachedSeriesProvider<P> {
    fn fetch(&mut self, key: &SeriesKey) -> ChartResult<Series> {
        if let Some(series) = self.entries.get(key) {
            self.hits += 1;
            debug!(key = %key, hits = self.hits, "series cache hit");
            return Ok(series.clone());
        }

        self.misses += 1;
        let series = self.inner.fetch(key)?;
        debug!(key = %key, candles = series.len(), "series cache fill");
        self.entries.insert(key.clone(), series.clone());
        Ok(series)
    }
}
