use candle_chart::ChartError;
use candle_chart::api::{ChartEngine, ChartEngineConfig, ChartSession};
use candle_chart::core::{Candle, Interval, Range, Series, SeriesKey, Viewport};
use candle_chart::data::{
    CachedSeriesProvider, FallbackSeriesProvider, InMemorySeriesProvider, SYNTHETIC_CANDLE_COUNT,
    SeriesProvider, SymbolCatalog, SyntheticSeriesProvider, ViewMode,
};
use candle_chart::render::NullRenderer;
use chrono::{TimeZone, Utc};

struct FailingProvider {
    calls: usize,
}

impl SeriesProvider for FailingProvider {
    fn fetch(&mut self, key: &SeriesKey) -> candle_chart::ChartResult<Series> {
        self.calls += 1;
        Err(ChartError::Provider(format!("upstream unavailable for {key}")))
    }
}

fn synthetic() -> SyntheticSeriesProvider {
    SyntheticSeriesProvider::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
            .single()
            .expect("valid anchor"),
    )
    .with_candle_count(120)
}

fn engine() -> ChartEngine<NullRenderer> {
    ChartEngine::new(
        NullRenderer::default(),
        ChartEngineConfig::new(Viewport::new(580, 350)),
    )
    .expect("engine init")
}

#[test]
fn session_starts_on_default_stock_in_tab_view() {
    let session = ChartSession::new(SymbolCatalog::bursa_malaysia(), synthetic());
    assert_eq!(session.view_mode(), ViewMode::TopStocks);
    assert_eq!(session.active_symbol(), "MYX:MAYBANK");
    assert_eq!(session.interval(), Interval::FifteenMinutes);
    assert_eq!(session.range(), Range::FiveDays);

    let key = session.series_key().expect("key");
    assert_eq!(key.ticker, "1155.KL");
    assert_eq!(key.to_string(), "1155.KL/15m/5d");
}

#[test]
fn load_hands_series_to_engine() {
    let mut engine = engine();
    let mut session = ChartSession::new(SymbolCatalog::bursa_malaysia(), synthetic());

    let key = session.load(&mut engine).expect("load");
    assert_eq!(engine.series_key(), Some(&key));
    assert_eq!(engine.series().len(), 120);
    assert_eq!(engine.interval(), Interval::FifteenMinutes);
}

#[test]
fn selecting_a_stock_switches_ticker_and_resets_viewport() {
    let mut engine = engine();
    let mut session = ChartSession::new(SymbolCatalog::bursa_malaysia(), synthetic());
    session.load(&mut engine).expect("load");

    engine.pointer_down(0.0, 100.0);
    engine.pointer_move(400.0, 100.0);
    engine.pointer_up(400.0, 100.0);
    assert!(engine.viewport_state().offset > 0.0);

    assert!(session.select_symbol("MYX:TENAGA", &mut engine).expect("select"));
    assert_eq!(engine.series_key().expect("key").ticker, "5347.KL");
    assert_eq!(engine.viewport_state().offset, 0.0);
}

#[test]
fn unknown_symbol_is_rejected() {
    let mut engine = engine();
    let mut session = ChartSession::new(SymbolCatalog::bursa_malaysia(), synthetic());
    let err = session
        .select_symbol("MYX:NOPE", &mut engine)
        .expect_err("unknown symbol");
    assert!(matches!(err, ChartError::UnknownSymbol(_)));
    assert_eq!(session.active_symbol(), "MYX:MAYBANK");
}

#[test]
fn index_view_shows_index_and_ignores_stock_selection() {
    let mut engine = engine();
    let mut session = ChartSession::new(SymbolCatalog::bursa_malaysia(), synthetic());

    assert_eq!(session.toggle_view(&mut engine).expect("toggle"), ViewMode::Index);
    assert_eq!(session.active_symbol(), "FTSEMYX:FBMKLCI");
    assert_eq!(engine.series_key().expect("key").ticker, "^KLSE");

    assert!(!session.select_symbol("MYX:CIMB", &mut engine).expect("ignored"));
    assert_eq!(engine.series_key().expect("key").ticker, "^KLSE");

    assert_eq!(session.toggle_view(&mut engine).expect("toggle"), ViewMode::TopStocks);
    assert_eq!(session.active_symbol(), "MYX:MAYBANK");
}

#[test]
fn interval_change_reloads_with_interval_width() {
    let mut engine = engine();
    let mut session = ChartSession::new(SymbolCatalog::bursa_malaysia(), synthetic());
    session.load(&mut engine).expect("load");

    let key = session
        .set_interval(Interval::OneDay, &mut engine)
        .expect("interval");
    assert_eq!(key.interval, Interval::OneDay);
    assert_eq!(engine.viewport_state().candle_width, 12.0);

    let candles = engine.series().candles();
    assert!(candles.windows(2).all(|pair| pair[1].time - pair[0].time == 86_400));
}

fn maybank_only_session() -> ChartSession<InMemorySeriesProvider> {
    let key = SeriesKey::new("1155.KL", Interval::FifteenMinutes, Range::FiveDays);
    let series = synthetic().generate(&key).expect("synthetic");
    ChartSession::new(
        SymbolCatalog::bursa_malaysia(),
        InMemorySeriesProvider::new().with_series(key, series),
    )
}

fn assert_session_matches_engine(
    session: &ChartSession<InMemorySeriesProvider>,
    engine: &ChartEngine<NullRenderer>,
) {
    assert_eq!(
        engine.series_key(),
        Some(&session.series_key().expect("key"))
    );
}

#[test]
fn failed_interval_change_keeps_previous_selection() {
    let mut engine = engine();
    let mut session = maybank_only_session();
    session.load(&mut engine).expect("load");

    let err = session
        .set_interval(Interval::OneDay, &mut engine)
        .expect_err("missing daily series");
    assert!(matches!(err, ChartError::Provider(_)));
    assert_eq!(session.interval(), Interval::FifteenMinutes);
    assert_eq!(engine.interval(), Interval::FifteenMinutes);
    assert_session_matches_engine(&session, &engine);

    // a later reload still targets the series on screen
    let key = session.load(&mut engine).expect("reload");
    assert_eq!(key.interval, Interval::FifteenMinutes);
}

#[test]
fn failed_range_change_keeps_previous_selection() {
    let mut engine = engine();
    let mut session = maybank_only_session();
    session.load(&mut engine).expect("load");

    assert!(session.set_range(Range::OneYear, &mut engine).is_err());
    assert_eq!(session.range(), Range::FiveDays);
    assert_session_matches_engine(&session, &engine);
}

#[test]
fn failed_view_toggle_stays_on_stock_tabs() {
    let mut engine = engine();
    let mut session = maybank_only_session();
    session.load(&mut engine).expect("load");

    assert!(session.toggle_view(&mut engine).is_err());
    assert_eq!(session.view_mode(), ViewMode::TopStocks);
    assert_eq!(session.active_symbol(), "MYX:MAYBANK");
    assert_session_matches_engine(&session, &engine);
}

#[test]
fn failed_stock_selection_keeps_active_stock() {
    let mut engine = engine();
    let mut session = maybank_only_session();
    session.load(&mut engine).expect("load");

    assert!(session.select_symbol("MYX:TENAGA", &mut engine).is_err());
    assert_eq!(session.active_stock(), "MYX:MAYBANK");
    assert_session_matches_engine(&session, &engine);
}

#[test]
fn cache_serves_repeat_requests() {
    let mut engine = engine();
    let mut session = ChartSession::new(
        SymbolCatalog::bursa_malaysia(),
        CachedSeriesProvider::new(synthetic()),
    );

    session.load(&mut engine).expect("load");
    session.select_symbol("MYX:PBBANK", &mut engine).expect("select");
    session.select_symbol("MYX:MAYBANK", &mut engine).expect("select");

    let stats = session.provider().stats();
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.entries, 2);
}

#[test]
fn cache_does_not_store_failures() {
    let mut provider = CachedSeriesProvider::new(FailingProvider { calls: 0 });
    let key = SeriesKey::new("1155.KL", Interval::FifteenMinutes, Range::FiveDays);

    assert!(provider.fetch(&key).is_err());
    assert!(provider.fetch(&key).is_err());
    assert!(!provider.contains(&key));
    assert_eq!(provider.inner().calls, 2);
}

#[test]
fn fallback_substitutes_synthetic_series_on_provider_error() {
    let mut provider = FallbackSeriesProvider::new(FailingProvider { calls: 0 }, synthetic());
    let key = SeriesKey::new("1023.KL", Interval::FiveMinutes, Range::OneDay);

    let series = provider.fetch(&key).expect("fallback series");
    assert_eq!(series.len(), 120);
    assert_eq!(series, synthetic().generate(&key).expect("synthetic"));
}

#[test]
fn cached_fallback_session_loads_every_symbol_without_a_feed() {
    let mut engine = engine();
    let mut session = ChartSession::new(
        SymbolCatalog::bursa_malaysia(),
        CachedSeriesProvider::new(FallbackSeriesProvider::new(
            InMemorySeriesProvider::new(),
            synthetic(),
        )),
    );

    session.load(&mut engine).expect("load");
    assert_eq!(engine.series().len(), 120);
    session.set_interval(Interval::OneDay, &mut engine).expect("interval");
    session.toggle_view(&mut engine).expect("toggle");
    assert_eq!(engine.series_key().expect("key").ticker, "^KLSE");

    session.toggle_view(&mut engine).expect("toggle back");
    let stats = session.provider().stats();
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.hits, 1);
}

#[test]
fn fallback_passes_primary_series_through() {
    let key = SeriesKey::new("5183.KL", Interval::OneHour, Range::OneMonth);
    let candle = Candle::new(1_709_283_600, 7.1, 7.3, 7.0, 7.2).expect("valid candle");
    let primary = InMemorySeriesProvider::new().with_series(key.clone(), Series::new(vec![candle]));
    let mut provider = FallbackSeriesProvider::new(primary, synthetic());

    let series = provider.fetch(&key).expect("primary series");
    assert_eq!(series.len(), 1);
    assert_eq!(series.last(), Some(candle));
}

#[test]
fn in_memory_provider_reports_missing_series() {
    let mut provider = InMemorySeriesProvider::new();
    let key = SeriesKey::new("1155.KL", Interval::OneDay, Range::OneYear);
    let err = provider.fetch(&key).expect_err("missing");
    assert!(matches!(err, ChartError::Provider(_)));
}

#[test]
fn default_synthetic_provider_emits_fixed_candle_count() {
    let key = SeriesKey::new("1155.KL", Interval::OneMinute, Range::OneDay);
    let series = SyntheticSeriesProvider::anchored_now()
        .generate(&key)
        .expect("synthetic");
    assert_eq!(series.len(), SYNTHETIC_CANDLE_COUNT);
}

#[test]
fn raw_rows_with_missing_prices_are_dropped() {
    let series = Series::from_raw_json(
        r#"[
            {"time": 1709283600, "open": 1.0, "high": 1.2, "low": 0.9, "close": 1.1},
            {"time": 1709284500, "open": null, "high": 1.2, "low": 0.9, "close": 1.1},
            {"time": 1709285400, "open": 1.1, "high": null, "low": null, "close": 1.0}
        ]"#,
    )
    .expect("valid json");
    assert_eq!(series.len(), 2);
    let last = series.last().expect("last");
    assert_eq!(last.high, 1.1);
    assert_eq!(last.low, 1.0);
}
