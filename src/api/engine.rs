use tracing::{debug, trace};

use crate::core::{Interval, PlotArea, Series, SeriesKey, Viewport, ViewportState};
use crate::error::ChartResult;
use crate::interaction::{InputEvent, InteractionContext, InteractionController, InteractionMode};
use crate::render::{RenderFrame, Renderer};

use super::render_frame_builder::{CrosshairReadout, build_render_frame, resolve_crosshair};
use super::ChartEngineConfig;

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Application state for one chart: the series store, viewport state and
/// surface configuration, plus the renderer that draws them.
///
/// Every mutation goes through this object; nothing is kept in globals.
pub struct ChartEngine<R: Renderer> {
    renderer: R,
    config: ChartEngineConfig,
    series: Series,
    series_key: Option<SeriesKey>,
    viewport: ViewportState,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            renderer,
            config,
            series: Series::empty(),
            series_key: None,
            viewport: ViewportState::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn surface(&self) -> Viewport {
        self.config.viewport
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.config.plot_area()
    }

    /// Resizes the logical surface. The device surface follows on the next render.
    pub fn set_surface(&mut self, viewport: Viewport, pixel_ratio: f64) -> ChartResult<()> {
        let mut config = self.config.clone();
        config.viewport = viewport;
        config.pixel_ratio = pixel_ratio;
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Replaces the store wholesale and resets the viewport for the key's interval.
    ///
    /// The last call wins; callers completing fetches out of order overwrite
    /// whatever was applied before.
    pub fn set_series(&mut self, key: SeriesKey, series: Series) {
        debug!(key = %key, candles = series.len(), "set series");
        self.viewport.reset_for_interval(key.interval);
        self.series = series;
        self.series_key = Some(key);
    }

    #[must_use]
    pub fn series(&self) -> &Series {
        &self.series
    }

    #[must_use]
    pub fn series_key(&self) -> Option<&SeriesKey> {
        self.series_key.as_ref()
    }

    #[must_use]
    pub fn interval(&self) -> Interval {
        self.series_key
            .as_ref()
            .map_or_else(Interval::default, |key| key.interval)
    }

    #[must_use]
    pub fn viewport_state(&self) -> ViewportState {
        self.viewport
    }

    /// Overrides the viewport state, e.g. to restore a saved position.
    /// Out-of-range offsets are corrected at the next render.
    pub fn set_viewport_state(&mut self, state: ViewportState) {
        self.viewport = state;
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        InteractionController::mode(&self.viewport)
    }

    #[must_use]
    pub fn visible_candle_count(&self) -> usize {
        self.viewport.visible_candle_count(self.plot_area().width)
    }

    #[must_use]
    pub fn max_offset(&self) -> f64 {
        self.viewport
            .max_offset(self.series.len(), self.plot_area().width)
    }

    fn interaction_context(&self) -> InteractionContext {
        InteractionContext {
            series_len: self.series.len(),
            plot_width: self.plot_area().width,
        }
    }

    /// Applies one input event. Returns `true` when a redraw is due.
    pub fn handle_input(&mut self, event: InputEvent) -> ChartResult<bool> {
        if let InputEvent::Resize { width, height } = event {
            self.set_surface(Viewport::new(width, height), self.config.pixel_ratio)?;
        }
        let transition =
            InteractionController::transition(self.viewport, event, self.interaction_context());
        trace!(?event, render = transition.render, "input transition");
        self.viewport = transition.state;
        Ok(transition.render)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.apply_pointer(InputEvent::PointerMove { x, y })
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.apply_pointer(InputEvent::PointerDown { x, y })
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.apply_pointer(InputEvent::PointerUp { x, y })
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.apply_pointer(InputEvent::PointerLeave)
    }

    pub fn wheel(&mut self, delta_y: f64) -> bool {
        self.apply_pointer(InputEvent::Wheel { delta_y })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> ChartResult<bool> {
        self.handle_input(InputEvent::Resize { width, height })
    }

    fn apply_pointer(&mut self, event: InputEvent) -> bool {
        let transition =
            InteractionController::transition(self.viewport, event, self.interaction_context());
        self.viewport = transition.state;
        transition.render
    }

    #[must_use]
    pub fn crosshair_readout(&self) -> Option<CrosshairReadout> {
        resolve_crosshair(&self.series, &self.viewport, &self.config)
    }

    /// Clamps the offset for the current series and surface, then builds the frame.
    pub fn build_frame(&mut self) -> RenderFrame {
        self.viewport
            .clamp_offset(self.series.len(), self.plot_area().width);
        build_render_frame(&self.series, self.interval(), &self.viewport, &self.config)
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_frame();
        self.renderer.render(&frame)
    }

    /// Renders the frame into an external cairo context.
    ///
    /// Used by GTK draw callbacks while keeping the renderer decoupled from
    /// GTK-specific APIs.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_frame();
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
