#[cfg(feature = "cairo-backend")]
use std::fs::File;
#[cfg(feature = "cairo-backend")]
use std::path::PathBuf;

#[cfg(feature = "cairo-backend")]
const DEFAULT_OUTPUT_PATH: &str = "target/snapshots/chart.png";

#[cfg(feature = "cairo-backend")]
#[derive(Debug)]
struct CliArgs {
    symbol: String,
    interval: candle_chart::core::Interval,
    width: u32,
    height: u32,
    pixel_ratio: f64,
    crosshair: Option<(f64, f64)>,
    output: PathBuf,
}

#[cfg(feature = "cairo-backend")]
fn main() {
    let _ = candle_chart::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("this tool requires feature `cairo-backend`");
    std::process::exit(1);
}

#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), String> {
    use candle_chart::api::{ChartEngine, ChartEngineConfig, ChartSession};
    use candle_chart::core::Viewport;
    use candle_chart::data::{SymbolCatalog, SyntheticSeriesProvider};
    use candle_chart::render::CairoRenderer;

    let args = parse_args()?;
    let config = ChartEngineConfig::new(Viewport::new(args.width, args.height))
        .with_pixel_ratio(args.pixel_ratio);
    let renderer = CairoRenderer::new(1, 1).map_err(|err| format!("renderer init failed: {err}"))?;
    let mut engine =
        ChartEngine::new(renderer, config).map_err(|err| format!("engine init failed: {err}"))?;

    let mut session = ChartSession::new(
        SymbolCatalog::bursa_malaysia(),
        SyntheticSeriesProvider::anchored_now(),
    );
    session
        .set_interval(args.interval, &mut engine)
        .map_err(|err| format!("interval `{}` failed: {err}", args.interval))?;
    if args.symbol == session.catalog().index_symbol() {
        session
            .toggle_view(&mut engine)
            .map_err(|err| format!("index view failed: {err}"))?;
    } else if args.symbol != session.active_symbol() {
        session
            .select_symbol(&args.symbol, &mut engine)
            .map_err(|err| format!("symbol `{}` failed: {err}", args.symbol))?;
    }
    if let Some((x, y)) = args.crosshair {
        engine.pointer_move(x, y);
    }

    engine
        .render()
        .map_err(|err| format!("render failed: {err}"))?;

    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|err| format!("failed to create output dir `{}`: {err}", parent.display()))?;
    }
    let mut file = File::create(&args.output)
        .map_err(|err| format!("failed to create png `{}`: {err}", args.output.display()))?;
    engine
        .renderer()
        .write_png(&mut file)
        .map_err(|err| format!("failed to write png `{}`: {err}", args.output.display()))?;

    println!(
        "rendered {} [{}] {} candles -> {}",
        args.symbol,
        args.interval,
        engine.series().len(),
        args.output.display()
    );
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn parse_args() -> Result<CliArgs, String> {
    let mut parsed = CliArgs {
        symbol: "MYX:MAYBANK".to_owned(),
        interval: candle_chart::core::Interval::default(),
        width: 1280,
        height: 720,
        pixel_ratio: 1.0,
        crosshair: None,
        output: PathBuf::from(DEFAULT_OUTPUT_PATH),
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value_for = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match arg.as_str() {
            "--symbol" => parsed.symbol = value_for("--symbol")?,
            "--interval" => {
                parsed.interval = value_for("--interval")?
                    .parse()
                    .map_err(|err| format!("{err}"))?;
            }
            "--size" => parse_size(&value_for("--size")?, &mut parsed)?,
            "--pixel-ratio" => {
                parsed.pixel_ratio = value_for("--pixel-ratio")?
                    .parse()
                    .map_err(|err| format!("invalid --pixel-ratio: {err}"))?;
            }
            "--crosshair" => {
                let value = value_for("--crosshair")?;
                let (x, y) = value
                    .split_once(',')
                    .ok_or_else(|| format!("expected `x,y` for --crosshair, got `{value}`"))?;
                let x = x
                    .trim()
                    .parse()
                    .map_err(|err| format!("invalid crosshair x: {err}"))?;
                let y = y
                    .trim()
                    .parse()
                    .map_err(|err| format!("invalid crosshair y: {err}"))?;
                parsed.crosshair = Some((x, y));
            }
            "--output" => parsed.output = PathBuf::from(value_for("--output")?),
            "--help" | "-h" => {
                println!("{}", usage_message());
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(parsed)
}

#[cfg(feature = "cairo-backend")]
fn parse_size(value: &str, parsed: &mut CliArgs) -> Result<(), String> {
    let (width, height) = value
        .split_once('x')
        .ok_or_else(|| format!("expected `WIDTHxHEIGHT` for --size, got `{value}`"))?;
    parsed.width = width
        .parse()
        .map_err(|err| format!("invalid width: {err}"))?;
    parsed.height = height
        .parse()
        .map_err(|err| format!("invalid height: {err}"))?;
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn usage_message() -> String {
    format!(
        "Usage: cargo run --features cairo-backend --bin render_snapshot -- [options]\n\nOptions:\n  --symbol <symbol>        Catalog symbol (default: MYX:MAYBANK)\n  --interval <interval>    1m, 5m, 15m, 30m, 1h, 1d, 1wk or 1mo (default: 15m)\n  --size <WxH>             Logical surface size (default: 1280x720)\n  --pixel-ratio <ratio>    Device pixel ratio (default: 1)\n  --crosshair <x,y>        Place the crosshair before rendering\n  --output <path>          PNG path (default: {DEFAULT_OUTPUT_PATH})\n  -h, --help               Show this message"
    )
}
