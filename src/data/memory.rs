use indexmap::IndexMap;

use crate::core::{Series, SeriesKey};
use crate::error::{ChartError, ChartResult};

use super::SeriesProvider;

/// Provider backed by preloaded series, e.g. recorded data or test fixtures.
#[derive(Debug, Clone, Default)]
pub struct InMemorySeriesProvider {
    series: IndexMap<SeriesKey, Series>,
}

impl InMemorySeriesProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_series(mut self, key: SeriesKey, series: Series) -> Self {
        self.insert(key, series);
        self
    }

    pub fn insert(&mut self, key: SeriesKey, series: Series) {
        self.series.insert(key, series);
    }
}

impl SeriesProvider for InMemorySeriesProvider {
    fn fetch(&mut self, key: &SeriesKey) -> ChartResult<Series> {
        self.series
            .get(key)
            .cloned()
            .ok_or_else(|| ChartError::Provider(format!("no series loaded for {key}")))
    }
}
