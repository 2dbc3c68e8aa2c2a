use candle_chart::core::{
    Candle, CoordinateMapper, Interval, Padding, PlotArea, Viewport, ViewportState,
    max_offset, visible_candle_count,
};

fn plot_500() -> PlotArea {
    PlotArea::new(Viewport::new(580, 350), Padding::default())
}

#[test]
fn default_padding_leaves_500px_plot_for_580px_surface() {
    let plot = plot_500();
    assert_eq!(plot.width, 500.0);
    assert_eq!(plot.height, 300.0);
    assert_eq!(plot.left(), 10.0);
    assert_eq!(plot.right(), 510.0);
    assert_eq!(plot.top(), 20.0);
    assert_eq!(plot.bottom(), 320.0);
}

#[test]
fn hundred_candles_at_width_ten_show_fifty_with_fifty_offset_headroom() {
    assert_eq!(visible_candle_count(500.0, 10.0), 50);
    assert_eq!(max_offset(100, 50), 50.0);
    assert_eq!(max_offset(30, 50), 0.0);
}

#[test]
fn visible_count_rounds_partial_slots_up() {
    assert_eq!(visible_candle_count(500.0, 7.0), 72);
    assert_eq!(visible_candle_count(0.0, 7.0), 0);
    assert_eq!(visible_candle_count(500.0, 0.0), 0);
}

#[test]
fn out_of_range_offset_is_clamped_to_max() {
    let mut state = ViewportState::for_interval(Interval::OneHour);
    state.offset = 60.0;
    state.clamp_offset(100, 500.0);
    assert_eq!(state.offset, 50.0);

    state.offset = -3.0;
    state.clamp_offset(100, 500.0);
    assert_eq!(state.offset, 0.0);
}

#[test]
fn visible_window_at_rest_covers_newest_candles_plus_one_on_the_left() {
    let state = ViewportState::for_interval(Interval::OneHour);
    let window = state.visible_window(100, 500.0);
    assert_eq!(window.end, 100);
    assert_eq!(window.start, 50);
    assert_eq!(window.draw_start, 49);
    assert_eq!(window.draw_len(), 51);
}

#[test]
fn visible_window_at_max_offset_starts_at_first_candle() {
    let mut state = ViewportState::for_interval(Interval::OneHour);
    state.offset = 50.0;
    let window = state.visible_window(100, 500.0);
    assert_eq!(window.end, 50);
    assert_eq!(window.start, 0);
    assert_eq!(window.draw_start, 0);
}

#[test]
fn fractional_offset_floors_window_end() {
    let mut state = ViewportState::for_interval(Interval::OneHour);
    state.offset = 12.7;
    let window = state.visible_window(100, 500.0);
    assert_eq!(window.end, 88);
    assert_eq!(window.start, 38);
}

#[test]
fn short_series_fits_entirely() {
    let state = ViewportState::for_interval(Interval::OneHour);
    let window = state.visible_window(10, 500.0);
    assert_eq!((window.draw_start, window.start, window.end), (0, 0, 10));
    assert!(ViewportState::default().visible_window(0, 500.0).is_empty());
}

#[test]
fn mapper_places_slots_left_to_right_and_prices_bottom_to_top() {
    let mapper = CoordinateMapper::new(plot_500(), 10.0, 100.0, 200.0);
    assert_eq!(mapper.index_to_x(0.0), 10.0);
    assert_eq!(mapper.index_to_x(30.0), 310.0);
    assert_eq!(mapper.price_to_y(200.0), 20.0);
    assert_eq!(mapper.price_to_y(100.0), 320.0);
    assert_eq!(mapper.price_to_y(150.0), 170.0);
}

#[test]
fn pointer_at_315_snaps_to_slot_30() {
    let mapper = CoordinateMapper::new(plot_500(), 10.0, 100.0, 200.0);
    assert_eq!(mapper.x_to_index(315.0), Some(30));
    assert_eq!(mapper.x_to_index(10.0), Some(0));
    assert_eq!(mapper.x_to_index(9.5), None);
}

#[test]
fn y_to_price_inverts_price_to_y() {
    let mapper = CoordinateMapper::new(plot_500(), 10.0, 12.5, 13.75);
    for price in [12.5, 12.9, 13.1, 13.75] {
        let y = mapper.price_to_y(price);
        assert!((mapper.y_to_price(y) - price).abs() <= 1e-9);
    }
}

#[test]
fn flat_price_range_maps_to_finite_coordinates() {
    let mapper = CoordinateMapper::new(plot_500(), 10.0, 5.0, 5.0);
    let y = mapper.price_to_y(5.0);
    assert!(y.is_finite());
    assert_eq!(y, 320.0);
}

#[test]
fn candle_rejects_non_finite_prices() {
    assert!(Candle::new(0, 1.0, f64::NAN, 1.0, 1.0).is_err());
    assert!(Candle::new(0, 1.0, 2.0, 0.5, 1.5).is_ok());
}
