#[cfg(feature = "gtk4-adapter")]
fn main() {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gtk4 as gtk;
    use gtk4::prelude::*;

    use candle_chart::api::{ChartEngine, ChartEngineConfig, ChartSession};
    use candle_chart::core::{Interval, Viewport};
    use candle_chart::data::{
        CachedSeriesProvider, FallbackSeriesProvider, InMemorySeriesProvider, SymbolCatalog,
        SyntheticSeriesProvider, ViewMode,
    };
    use candle_chart::platform_gtk::GtkChartAdapter;
    use candle_chart::render::CairoRenderer;

    type ViewerProvider = CachedSeriesProvider<FallbackSeriesProvider<InMemorySeriesProvider>>;
    type ViewerSession = ChartSession<ViewerProvider>;

    let _ = candle_chart::telemetry::init_default_tracing();

    let app = gtk::Application::builder()
        .application_id("rs.candle_chart.stock_viewer")
        .build();

    app.connect_activate(|app| {
        let engine = CairoRenderer::new(1, 1).and_then(|renderer| {
            ChartEngine::new(renderer, ChartEngineConfig::new(Viewport::new(1280, 720)))
        });
        let engine = match engine {
            Ok(engine) => engine,
            Err(err) => {
                eprintln!("failed to initialize chart engine: {err}");
                return;
            }
        };
        let adapter = Rc::new(GtkChartAdapter::new(engine));

        let session: Rc<RefCell<ViewerSession>> = Rc::new(RefCell::new(ChartSession::new(
            SymbolCatalog::bursa_malaysia(),
            // no live feed is bundled, so misses degrade to synthetic series
            CachedSeriesProvider::new(FallbackSeriesProvider::new(
                InMemorySeriesProvider::new(),
                SyntheticSeriesProvider::anchored_now(),
            )),
        )));

        let status = gtk::Label::new(None);
        status.set_xalign(0.0);

        let report = {
            let status = status.clone();
            let session = Rc::clone(&session);
            move |outcome: candle_chart::ChartResult<()>| {
                let Ok(session) = session.try_borrow() else {
                    return;
                };
                match outcome {
                    Ok(()) => status.set_text(&format!(
                        "{} | {} | {}",
                        session.active_symbol(),
                        session.interval(),
                        session.range()
                    )),
                    Err(err) => status.set_text(&format!("load failed: {err}")),
                }
            }
        };
        let report = Rc::new(report);

        let initial = adapter.update_engine(|engine| session.borrow_mut().load(engine).map(|_| ()));
        report(initial);

        let tabs = gtk::Box::new(gtk::Orientation::Horizontal, 4);
        let mut group_leader: Option<gtk::ToggleButton> = None;
        let stocks: Vec<(String, String)> = session
            .borrow()
            .catalog()
            .stocks()
            .map(|(symbol, info)| (symbol.to_owned(), info.name.clone()))
            .collect();
        let default_symbol = session.borrow().active_stock().to_owned();
        for (symbol, name) in stocks {
            let button = gtk::ToggleButton::with_label(&name);
            button.set_tooltip_text(Some(&symbol));
            if let Some(leader) = &group_leader {
                button.set_group(Some(leader));
            } else {
                group_leader = Some(button.clone());
            }
            button.set_active(symbol == default_symbol);

            let adapter = Rc::clone(&adapter);
            let session = Rc::clone(&session);
            let report = Rc::clone(&report);
            button.connect_toggled(move |button| {
                if !button.is_active() {
                    return;
                }
                let outcome = adapter.update_engine(|engine| {
                    session
                        .borrow_mut()
                        .select_symbol(&symbol, engine)
                        .map(|_| ())
                });
                report(outcome);
            });
            tabs.append(&button);
        }

        let index_toggle = gtk::ToggleButton::with_label("Index");
        {
            let adapter = Rc::clone(&adapter);
            let session = Rc::clone(&session);
            let report = Rc::clone(&report);
            let tabs = tabs.clone();
            index_toggle.connect_toggled(move |_| {
                let outcome =
                    adapter.update_engine(|engine| session.borrow_mut().toggle_view(engine));
                if let Ok(mode) = &outcome {
                    tabs.set_sensitive(*mode == ViewMode::TopStocks);
                }
                report(outcome.map(|_| ()));
            });
        }

        let interval_labels: Vec<&str> = Interval::ALL.iter().map(|i| i.as_str()).collect();
        let interval_picker = gtk::DropDown::from_strings(&interval_labels);
        let current = session.borrow().interval();
        if let Some(position) = Interval::ALL.iter().position(|i| *i == current) {
            interval_picker.set_selected(u32::try_from(position).unwrap_or(0));
        }
        {
            let adapter = Rc::clone(&adapter);
            let session = Rc::clone(&session);
            let report = Rc::clone(&report);
            interval_picker.connect_selected_notify(move |picker| {
                let Some(interval) = usize::try_from(picker.selected())
                    .ok()
                    .and_then(|idx| Interval::ALL.get(idx).copied())
                else {
                    return;
                };
                let outcome = adapter.update_engine(|engine| {
                    session
                        .borrow_mut()
                        .set_interval(interval, engine)
                        .map(|_| ())
                });
                report(outcome);
            });
        }

        let header = gtk::Box::new(gtk::Orientation::Horizontal, 8);
        header.append(&tabs);
        header.append(&index_toggle);
        header.append(&gtk::Label::new(Some("Interval:")));
        header.append(&interval_picker);

        let layout = gtk::Box::new(gtk::Orientation::Vertical, 6);
        layout.append(&header);
        layout.append(adapter.drawing_area());
        layout.append(&status);

        let window = gtk::ApplicationWindow::builder()
            .application(app)
            .title("candle-chart | Bursa Malaysia")
            .default_width(1280)
            .default_height(820)
            .build();
        window.set_child(Some(&layout));
        window.present();
    });

    let _ = app.run();
}

#[cfg(not(feature = "gtk4-adapter"))]
fn main() {
    println!("run with: cargo run --features desktop --bin stock_viewer");
}
