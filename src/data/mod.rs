//! Series Provider collaborators.
//!
//! Providers hand the engine a complete [`Series`] per [`SeriesKey`]. The
//! engine never learns whether a series is real, cached, or substituted.

mod cache;
mod catalog;
mod fallback;
mod memory;
mod synthetic;

pub use cache::{CacheStats, CachedSeriesProvider};
pub use catalog::{SymbolCatalog, SymbolInfo, ViewMode};
pub use fallback::FallbackSeriesProvider;
pub use memory::InMemorySeriesProvider;
pub use synthetic::{SYNTHETIC_CANDLE_COUNT, SyntheticSeriesProvider};

use crate::core::{Series, SeriesKey};
use crate::error::ChartResult;

/// Source of price series.
///
/// Calls are synchronous from the engine's point of view; hosts that fetch
/// in the background apply the result with `ChartEngine::set_series` when it
/// completes.
pub trait SeriesProvider {
    fn fetch(&mut self, key: &SeriesKey) -> ChartResult<Series>;
}

impl<P: SeriesProvider + ?Sized> SeriesProvider for Box<P> {
    fn fetch(&mut self, key: &SeriesKey) -> ChartResult<Series> {
        (**self).fetch(key)
    }
}
