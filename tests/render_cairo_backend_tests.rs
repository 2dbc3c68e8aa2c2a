#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use candle_chart::ChartError;
use candle_chart::api::{ChartEngine, ChartEngineConfig};
use candle_chart::core::{Candle, Interval, Range, Series, SeriesKey, Viewport};
use candle_chart::render::CairoRenderer;

fn series(len: usize) -> Series {
    (0..len)
        .map(|i| {
            let open = 8.0 + (i % 5) as f64 * 0.1;
            Candle::new(i as i64 * 900, open, open + 0.3, open - 0.2, open + 0.1)
                .expect("valid candle")
        })
        .collect::<Vec<_>>()
        .into()
}

fn engine(width: u32, height: u32, pixel_ratio: f64) -> ChartEngine<CairoRenderer> {
    let renderer = CairoRenderer::new(1, 1).expect("renderer");
    let config =
        ChartEngineConfig::new(Viewport::new(width, height)).with_pixel_ratio(pixel_ratio);
    let mut engine = ChartEngine::new(renderer, config).expect("engine init");
    engine.set_series(
        SeriesKey::new("5347.KL", Interval::FifteenMinutes, Range::FiveDays),
        series(120),
    );
    engine
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_every_primitive() {
    let mut engine = engine(900, 500, 1.0);
    engine.pointer_move(300.0, 200.0);
    engine.render().expect("render");

    let frame = engine.build_frame();
    let stats = engine.renderer().last_stats();
    assert_eq!(stats.lines_drawn, frame.lines().count());
    assert_eq!(stats.rects_drawn, frame.rects().count());
    assert_eq!(stats.texts_drawn, frame.texts().count());
    assert!(stats.rects_drawn > 0);
}

#[test]
fn offscreen_surface_follows_pixel_ratio() {
    let mut engine = engine(400, 300, 2.0);
    engine.render().expect("render");
    let surface = engine.renderer().surface();
    assert_eq!((surface.width(), surface.height()), (800, 600));

    engine.resize(300, 200).expect("resize");
    engine.render().expect("render");
    let surface = engine.renderer().surface();
    assert_eq!((surface.width(), surface.height()), (600, 400));
}

#[test]
fn renders_png_snapshot() {
    let mut engine = engine(320, 200, 1.0);
    engine.render().expect("render");

    let mut png = Vec::new();
    engine.renderer().write_png(&mut png).expect("png");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn renders_into_external_context() {
    let surface = ImageSurface::create(Format::ARgb32, 640, 360).expect("surface");
    let context = Context::new(&surface).expect("context");

    let mut engine = engine(640, 360, 1.0);
    engine
        .render_on_cairo_context(&context)
        .expect("render on external context");
    assert!(engine.renderer().last_stats().rects_drawn > 0);
}
