use serde::Serialize;
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{
    Candle, CoordinateMapper, Interval, PlotArea, Series, ViewportState, VisibleWindow,
    padded_price_extent, project_candles,
};
use crate::render::{
    CanvasLayerKind, Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::ChartEngineConfig;
use super::label_format::{TimeLabelPattern, format_ohlc_readout, format_price, format_time_label};
use super::layout_helpers::{clamp_box_start, estimate_label_text_width_px};

/// Number of equal price bands between the horizontal grid lines.
pub const GRID_DIVISIONS: usize = 5;
/// Approximate number of time-axis labels per frame.
pub const TIME_LABEL_TARGET: usize = 5;

const BADGE_PADDING_X: f64 = 4.0;
const BADGE_PADDING_Y: f64 = 3.0;
const WICK_WIDTH_RATIO: f64 = 0.1;

/// Candle and price under the crosshair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrosshairReadout {
    /// Slot within the visible window, `floor((x - padding_left) / candle_width)`.
    pub slot: usize,
    /// Series index of the snapped candle, `None` when the slot is empty.
    pub index: Option<usize>,
    pub candle: Option<Candle>,
    /// Center of the snapped slot.
    pub snapped_x: f64,
    /// Price at the crosshair's vertical position.
    pub price: f64,
}

/// Resolved layout for one pass. `drawn` starts at `window.draw_start` and
/// `visible` at `window.start`, which sits at slot 0.
struct PlotContext<'a> {
    plot: PlotArea,
    window: VisibleWindow,
    drawn: &'a [Candle],
    visible: &'a [Candle],
    mapper: CoordinateMapper,
}

fn resolve_plot_context<'a>(
    series: &'a Series,
    state: &ViewportState,
    config: &ChartEngineConfig,
) -> Option<PlotContext<'a>> {
    let plot = config.plot_area();
    if plot.width <= 0.0 || plot.height <= 0.0 {
        return None;
    }
    let window = state.visible_window(series.len(), plot.width);
    if window.is_empty() {
        return None;
    }
    let candles = series.candles();
    let drawn = &candles[window.draw_start..window.end];
    let visible = &candles[window.start..window.end];
    let (price_min, price_max) = padded_price_extent(drawn)?;
    Some(PlotContext {
        plot,
        window,
        drawn,
        visible,
        mapper: CoordinateMapper::new(plot, state.candle_width, price_min, price_max),
    })
}

fn crosshair_in_context(context: &PlotContext<'_>, state: &ViewportState) -> Option<CrosshairReadout> {
    let crosshair = state.crosshair;
    if !crosshair.visible || !context.plot.contains(crosshair.x, crosshair.y) {
        return None;
    }
    let slot = context.mapper.x_to_index(crosshair.x)?;
    let candle = context.visible.get(slot).copied();
    Some(CrosshairReadout {
        slot,
        index: candle.map(|_| context.window.start + slot),
        candle,
        snapped_x: context.mapper.index_to_x(slot as f64) + context.mapper.candle_width() / 2.0,
        price: context.mapper.y_to_price(crosshair.y),
    })
}

/// Resolves the crosshair against the same window and price range a frame
/// would use. `None` when hidden, outside the plot, or nothing is drawn.
#[must_use]
pub fn resolve_crosshair(
    series: &Series,
    state: &ViewportState,
    config: &ChartEngineConfig,
) -> Option<CrosshairReadout> {
    let context = resolve_plot_context(series, state, config)?;
    crosshair_in_context(&context, state)
}

/// Builds the full scene for one pass.
///
/// Pure: identical inputs give an identical frame. The offset is clamped on
/// a copy, so callers that want the clamp persisted do it beforehand.
#[must_use]
pub fn build_render_frame(
    series: &Series,
    interval: Interval,
    state: &ViewportState,
    config: &ChartEngineConfig,
) -> RenderFrame {
    let mut frame = RenderFrame::new(config.viewport, config.pixel_ratio, config.style.background);

    if series.is_empty() {
        push_placeholder(&mut frame, config);
        return frame;
    }

    let Some(context) = resolve_plot_context(series, state, config) else {
        return frame;
    };

    push_price_grid(&mut frame, &context, config);
    push_time_labels(&mut frame, &context, interval, config);
    push_candles(&mut frame, &context, config);
    if let Some(last) = series.last() {
        push_last_price(&mut frame, &context, last, config);
    }
    if let Some(readout) = crosshair_in_context(&context, state) {
        push_crosshair(&mut frame, &context, state.crosshair.y, readout, interval, config);
    }

    trace!(
        draw_start = context.window.draw_start,
        end = context.window.end,
        candle_width = state.candle_width,
        "built render frame"
    );
    frame
}

fn push_placeholder(frame: &mut RenderFrame, config: &ChartEngineConfig) {
    let style = &config.style;
    frame.push_text(
        CanvasLayerKind::Grid,
        TextPrimitive::new(
            style.placeholder_text.clone(),
            f64::from(config.viewport.width) / 2.0,
            (f64::from(config.viewport.height) - style.font_size_px) / 2.0,
            style.font_size_px,
            style.text_color,
            TextHAlign::Center,
        ),
    );
}

fn push_price_grid(frame: &mut RenderFrame, context: &PlotContext<'_>, config: &ChartEngineConfig) {
    let style = &config.style;
    let (price_min, price_max) = context.mapper.price_range();
    let levels: SmallVec<[f64; GRID_DIVISIONS + 1]> = (0..=GRID_DIVISIONS)
        .map(|step| price_min + (price_max - price_min) * step as f64 / GRID_DIVISIONS as f64)
        .collect();
    let label_x = f64::from(config.viewport.width) - BADGE_PADDING_X;

    for price in levels {
        let y = context.mapper.price_to_y(price);
        frame.push_line(
            CanvasLayerKind::Grid,
            LinePrimitive::new(
                context.plot.left(),
                y,
                context.plot.right(),
                y,
                style.grid_line_width,
                style.grid_color,
            ),
        );
        frame.push_text(
            CanvasLayerKind::Grid,
            TextPrimitive::new(
                format_price(price, config.price_precision),
                label_x,
                y - style.font_size_px / 2.0,
                style.font_size_px,
                style.text_color,
                TextHAlign::Right,
            ),
        );
    }
}

fn push_time_labels(
    frame: &mut RenderFrame,
    context: &PlotContext<'_>,
    interval: Interval,
    config: &ChartEngineConfig,
) {
    let style = &config.style;
    let pattern = TimeLabelPattern::axis_for(interval);
    let step = context.visible.len().div_ceil(TIME_LABEL_TARGET).max(1);
    let y = context.plot.bottom() + BADGE_PADDING_Y;

    for (slot, candle) in context.visible.iter().enumerate().step_by(step) {
        let x = context.mapper.index_to_x(slot as f64) + context.mapper.candle_width() / 2.0;
        if x > context.plot.right() {
            break;
        }
        frame.push_text(
            CanvasLayerKind::Grid,
            TextPrimitive::new(
                format_time_label(candle.time, pattern, config.time_label_offset_minutes),
                x,
                y,
                style.font_size_px,
                style.text_color,
                TextHAlign::Center,
            ),
        );
    }
}

fn push_candles(frame: &mut RenderFrame, context: &PlotContext<'_>, config: &ChartEngineConfig) {
    let style = &config.style;
    let padding_slots = (context.window.start - context.window.draw_start) as f64;
    for geometry in project_candles(context.drawn, -padding_slots, context.mapper) {
        let color = style.candle_color(geometry.is_bullish);
        frame.push_line(
            CanvasLayerKind::Series,
            LinePrimitive::new(
                geometry.center_x,
                geometry.wick_top,
                geometry.center_x,
                geometry.wick_bottom,
                (geometry.body_width * WICK_WIDTH_RATIO).max(1.0),
                color,
            ),
        );
        frame.push_rect(
            CanvasLayerKind::Series,
            RectPrimitive::new(
                geometry.body_left,
                geometry.body_top,
                geometry.body_width,
                geometry.body_height,
                color,
            ),
        );
    }
}

fn push_last_price(
    frame: &mut RenderFrame,
    context: &PlotContext<'_>,
    last: Candle,
    config: &ChartEngineConfig,
) {
    let style = &config.style;
    let color = style.candle_color(last.is_bullish());
    let y = context.mapper.price_to_y(last.close);
    frame.push_line(
        CanvasLayerKind::Overlay,
        LinePrimitive::new(context.plot.left(), y, context.plot.right(), y, 1.0, color)
            .with_stroke_style(style.last_price_dash),
    );
    push_price_badge(frame, CanvasLayerKind::Overlay, context, last.close, y, color, config);
}

/// Badge in the right margin, centered on `y` but kept fully on the surface.
fn push_price_badge(
    frame: &mut RenderFrame,
    kind: CanvasLayerKind,
    context: &PlotContext<'_>,
    price: f64,
    y: f64,
    fill: Color,
    config: &ChartEngineConfig,
) {
    let style = &config.style;
    let text = format_price(price, config.price_precision);
    let width = config
        .padding
        .right
        .max(estimate_label_text_width_px(&text, style.font_size_px) + 2.0 * BADGE_PADDING_X);
    let height = style.font_size_px + 2.0 * BADGE_PADDING_Y;
    let top = clamp_box_start(y, height, 0.0, f64::from(config.viewport.height));
    let left = context.plot.right();

    frame.push_rect(kind, RectPrimitive::new(left, top, width, height, fill));
    frame.push_text(
        kind,
        TextPrimitive::new(
            text,
            left + BADGE_PADDING_X,
            top + BADGE_PADDING_Y,
            style.font_size_px,
            style.badge_text_color,
            TextHAlign::Left,
        ),
    );
}

fn push_crosshair(
    frame: &mut RenderFrame,
    context: &PlotContext<'_>,
    y: f64,
    readout: CrosshairReadout,
    interval: Interval,
    config: &ChartEngineConfig,
) {
    let style = &config.style;
    let plot = context.plot;

    frame.push_line(
        CanvasLayerKind::Crosshair,
        LinePrimitive::new(plot.left(), y, plot.right(), y, 1.0, style.crosshair_color)
            .with_stroke_style(style.crosshair_dash),
    );
    frame.push_line(
        CanvasLayerKind::Crosshair,
        LinePrimitive::new(
            readout.snapped_x,
            plot.top(),
            readout.snapped_x,
            plot.bottom(),
            1.0,
            style.crosshair_color,
        )
        .with_stroke_style(style.crosshair_dash),
    );
    push_price_badge(
        frame,
        CanvasLayerKind::Crosshair,
        context,
        readout.price,
        y,
        style.crosshair_badge_color,
        config,
    );

    let Some(candle) = readout.candle else {
        return;
    };

    let time_text = format_time_label(
        candle.time,
        TimeLabelPattern::crosshair_for(interval),
        config.time_label_offset_minutes,
    );
    let width = estimate_label_text_width_px(&time_text, style.font_size_px) + 2.0 * BADGE_PADDING_X;
    let height = style.font_size_px + 2.0 * BADGE_PADDING_Y;
    let left = clamp_box_start(
        readout.snapped_x,
        width,
        0.0,
        f64::from(config.viewport.width),
    );
    frame.push_rect(
        CanvasLayerKind::Crosshair,
        RectPrimitive::new(left, plot.bottom(), width, height, style.crosshair_badge_color),
    );
    frame.push_text(
        CanvasLayerKind::Crosshair,
        TextPrimitive::new(
            time_text,
            left + width / 2.0,
            plot.bottom() + BADGE_PADDING_Y,
            style.font_size_px,
            style.badge_text_color,
            TextHAlign::Center,
        ),
    );

    frame.push_text(
        CanvasLayerKind::Crosshair,
        TextPrimitive::new(
            format_ohlc_readout(candle, config.price_precision),
            plot.left() + BADGE_PADDING_X,
            ((plot.top() - style.font_size_px) / 2.0).max(0.0),
            style.font_size_px,
            style.text_color,
            TextHAlign::Left,
        ),
    );
}
