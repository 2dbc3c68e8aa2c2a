use candle_chart::ChartError;
use candle_chart::api::{ChartEngine, ChartEngineConfig};
use candle_chart::core::{
    Candle, Interval, MAX_CANDLE_WIDTH, MIN_CANDLE_WIDTH, Range, Series, SeriesKey, Viewport,
};
use candle_chart::interaction::{InputEvent, InteractionMode};
use candle_chart::render::NullRenderer;

fn build_engine(len: usize) -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(580, 350));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    let candles = (0..len)
        .map(|i| {
            let price = 20.0 + (i as f64 * 0.37).sin();
            Candle::new(i as i64 * 3_600, price, price + 0.4, price - 0.4, price + 0.1)
                .expect("valid candle")
        })
        .collect::<Vec<_>>();
    engine.set_series(
        SeriesKey::new("1295.KL", Interval::OneHour, Range::FiveDays),
        Series::new(candles),
    );
    engine
}

#[test]
fn set_series_applies_interval_candle_width_and_resets_offset() {
    let mut engine = build_engine(100);
    assert_eq!(engine.viewport_state().candle_width, 10.0);
    assert_eq!(engine.visible_candle_count(), 50);
    assert_eq!(engine.max_offset(), 50.0);

    engine.pointer_down(100.0, 100.0);
    engine.pointer_move(300.0, 100.0);
    engine.pointer_up(300.0, 100.0);
    assert!(engine.viewport_state().offset > 0.0);

    engine.set_series(
        SeriesKey::new("1295.KL", Interval::OneDay, Range::OneYear),
        Series::new(Vec::new()),
    );
    assert_eq!(engine.viewport_state().offset, 0.0);
    assert_eq!(engine.viewport_state().candle_width, 12.0);
}

#[test]
fn render_clamps_offset_set_past_the_oldest_candle() {
    let mut engine = build_engine(100);
    let mut state = engine.viewport_state();
    state.offset = 60.0;
    engine.set_viewport_state(state);

    engine.render().expect("render");
    assert_eq!(engine.viewport_state().offset, 50.0);
}

#[test]
fn dragging_right_reveals_older_candles_at_half_speed() {
    let mut engine = build_engine(100);
    assert!(engine.pointer_down(100.0, 100.0));
    assert_eq!(engine.interaction_mode(), InteractionMode::Panning);

    // 100px at 10px per candle, halved
    engine.pointer_move(200.0, 100.0);
    assert!((engine.viewport_state().offset - 5.0).abs() <= 1e-9);

    engine.pointer_move(150.0, 100.0);
    assert!((engine.viewport_state().offset - 2.5).abs() <= 1e-9);

    engine.pointer_up(150.0, 100.0);
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
}

#[test]
fn pan_is_clamped_at_both_ends() {
    let mut engine = build_engine(100);
    engine.pointer_down(10.0, 100.0);
    engine.pointer_move(5_000.0, 100.0);
    assert_eq!(engine.viewport_state().offset, 50.0);

    engine.pointer_move(-5_000.0, 100.0);
    assert_eq!(engine.viewport_state().offset, 0.0);
}

#[test]
fn pointer_move_without_drag_only_moves_crosshair() {
    let mut engine = build_engine(100);
    assert!(engine.pointer_move(250.0, 120.0));
    let state = engine.viewport_state();
    assert_eq!(state.offset, 0.0);
    assert!(state.crosshair.visible);
    assert_eq!((state.crosshair.x, state.crosshair.y), (250.0, 120.0));
}

#[test]
fn pointer_leave_ends_an_active_drag() {
    let mut engine = build_engine(100);
    engine.pointer_down(100.0, 100.0);
    engine.pointer_leave();
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);

    engine.pointer_move(400.0, 100.0);
    assert_eq!(engine.viewport_state().offset, 0.0);
}

#[test]
fn wheel_up_zooms_in_and_shows_fewer_candles() {
    let mut engine = build_engine(200);
    let before = engine.visible_candle_count();

    assert!(engine.wheel(-1.0));
    assert!((engine.viewport_state().candle_width - 11.0).abs() <= 1e-9);
    assert!(engine.visible_candle_count() < before);

    assert!(engine.wheel(1.0));
    assert!((engine.viewport_state().candle_width - 9.9).abs() <= 1e-9);
}

#[test]
fn zoom_is_bounded() {
    let mut engine = build_engine(50);
    for _ in 0..200 {
        engine.wheel(-1.0);
    }
    assert_eq!(engine.viewport_state().candle_width, MAX_CANDLE_WIDTH);

    for _ in 0..200 {
        engine.wheel(3.0);
    }
    assert_eq!(engine.viewport_state().candle_width, MIN_CANDLE_WIDTH);
}

#[test]
fn zero_wheel_delta_is_ignored() {
    let mut engine = build_engine(50);
    assert!(!engine.wheel(0.0));
    assert!(!engine.wheel(f64::NAN));
    assert_eq!(engine.viewport_state().candle_width, 10.0);
}

#[test]
fn zoom_out_then_render_clamps_stale_offset() {
    let mut engine = build_engine(100);
    engine.pointer_down(0.0, 100.0);
    engine.pointer_move(1_000.0, 100.0);
    engine.pointer_up(1_000.0, 100.0);
    assert_eq!(engine.viewport_state().offset, 50.0);

    // narrower candles: more visible, less headroom
    for _ in 0..5 {
        engine.wheel(1.0);
    }
    let max = engine.max_offset();
    assert!(max < 50.0);

    engine.render().expect("render");
    assert_eq!(engine.viewport_state().offset, max);
}

#[test]
fn resize_updates_surface_and_keeps_offset_in_range() {
    let mut engine = build_engine(100);
    engine.pointer_down(0.0, 100.0);
    engine.pointer_move(1_000.0, 100.0);
    engine.pointer_up(1_000.0, 100.0);

    assert!(engine.resize(880, 400).expect("resize"));
    assert_eq!(engine.surface(), Viewport::new(880, 400));
    assert_eq!(engine.plot_area().width, 800.0);
    assert_eq!(engine.visible_candle_count(), 80);

    engine.render().expect("render");
    assert_eq!(engine.viewport_state().offset, 20.0);
}

#[test]
fn resize_to_zero_is_rejected() {
    let mut engine = build_engine(10);
    let err = engine
        .handle_input(InputEvent::Resize { width: 0, height: 300 })
        .expect_err("zero width must fail");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
    assert_eq!(engine.surface(), Viewport::new(580, 350));
}
