use tracing::{debug, warn};

use crate::core::{Interval, Range, SeriesKey};
use crate::data::{SeriesProvider, SymbolCatalog, ViewMode};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::ChartEngine;

/// Viewer-level selection state: which symbol, interval and range are shown.
///
/// Loading goes through the provider and lands in the engine via
/// `ChartEngine::set_series`, which also resets the viewport.
#[derive(Debug)]
pub struct ChartSession<P: SeriesProvider> {
    catalog: SymbolCatalog,
    provider: P,
    view_mode: ViewMode,
    active_stock: String,
    interval: Interval,
    range: Range,
}

impl<P: SeriesProvider> ChartSession<P> {
    #[must_use]
    pub fn new(catalog: SymbolCatalog, provider: P) -> Self {
        let active_stock = catalog.default_symbol().to_owned();
        Self {
            catalog,
            provider,
            view_mode: ViewMode::default(),
            active_stock,
            interval: Interval::default(),
            range: Range::default(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    #[must_use]
    pub fn interval(&self) -> Interval {
        self.interval
    }

    #[must_use]
    pub fn range(&self) -> Range {
        self.range
    }

    /// Stock remembered for the tab view, even while the index is shown.
    #[must_use]
    pub fn active_stock(&self) -> &str {
        &self.active_stock
    }

    /// Symbol currently on screen.
    #[must_use]
    pub fn active_symbol(&self) -> &str {
        match self.view_mode {
            ViewMode::TopStocks => &self.active_stock,
            ViewMode::Index => self.catalog.index_symbol(),
        }
    }

    pub fn series_key(&self) -> ChartResult<SeriesKey> {
        let info = self.catalog.get(self.active_symbol())?;
        Ok(SeriesKey::new(info.ticker.clone(), self.interval, self.range))
    }

    /// Fetches the active series and hands it to the engine.
    pub fn load<R: Renderer>(&mut self, engine: &mut ChartEngine<R>) -> ChartResult<SeriesKey> {
        let key = self.series_key()?;
        debug!(symbol = self.active_symbol(), key = %key, "loading series");
        let series = self.provider.fetch(&key)?;
        engine.set_series(key.clone(), series);
        Ok(key)
    }

    /// Switches the stock tab. Ignored while the index view is active.
    ///
    /// Returns `true` when a new series was loaded.
    pub fn select_symbol<R: Renderer>(
        &mut self,
        symbol: &str,
        engine: &mut ChartEngine<R>,
    ) -> ChartResult<bool> {
        if self.view_mode == ViewMode::Index {
            return Ok(false);
        }
        self.catalog.get(symbol)?;
        if symbol == self.catalog.index_symbol() {
            return Err(ChartError::InvalidData(format!(
                "{symbol} is only available in the index view"
            )));
        }
        let symbol = symbol.to_owned();
        self.switch(engine, |session| session.active_stock = symbol)?;
        Ok(true)
    }

    /// Flips between the stock tabs and the index, then loads what is shown.
    pub fn toggle_view<R: Renderer>(&mut self, engine: &mut ChartEngine<R>) -> ChartResult<ViewMode> {
        self.switch(engine, |session| session.view_mode = session.view_mode.toggled())?;
        Ok(self.view_mode)
    }

    pub fn set_interval<R: Renderer>(
        &mut self,
        interval: Interval,
        engine: &mut ChartEngine<R>,
    ) -> ChartResult<SeriesKey> {
        self.switch(engine, |session| session.interval = interval)
    }

    pub fn set_range<R: Renderer>(
        &mut self,
        range: Range,
        engine: &mut ChartEngine<R>,
    ) -> ChartResult<SeriesKey> {
        self.switch(engine, |session| session.range = range)
    }

    /// Applies `change` and loads the result. On failure the previous
    /// selection is restored, so the session keeps matching the engine.
    fn switch<R: Renderer>(
        &mut self,
        engine: &mut ChartEngine<R>,
        change: impl FnOnce(&mut Self),
    ) -> ChartResult<SeriesKey> {
        let view_mode = self.view_mode;
        let active_stock = self.active_stock.clone();
        let interval = self.interval;
        let range = self.range;

        change(self);
        match self.load(engine) {
            Ok(key) => Ok(key),
            Err(error) => {
                warn!(%error, "load failed, keeping previous selection");
                self.view_mode = view_mode;
                self.active_stock = active_stock;
                self.interval = interval;
                self.range = range;
                Err(error)
            }
        }
    }
}
