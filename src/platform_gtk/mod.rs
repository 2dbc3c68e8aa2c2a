//! GTK4 binding for [`ChartEngine`].
//!
//! Translates GTK input controllers into [`InputEvent`]s and queues a redraw
//! whenever the engine reports one is due. All state lives in the engine.

use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::ChartEngine;
use crate::error::ChartResult;
use crate::interaction::InputEvent;
use crate::render::CairoRenderer;

pub type SharedEngine = Rc<RefCell<ChartEngine<CairoRenderer>>>;

/// Owns a `DrawingArea` wired to a shared engine.
pub struct GtkChartAdapter {
    engine: SharedEngine,
    drawing_area: gtk::DrawingArea,
}

impl GtkChartAdapter {
    #[must_use]
    pub fn new(engine: ChartEngine<CairoRenderer>) -> Self {
        let engine = Rc::new(RefCell::new(engine));
        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_hexpand(true);
        drawing_area.set_vexpand(true);

        install_draw_func(&drawing_area, Rc::clone(&engine));
        install_interactions(&drawing_area, Rc::clone(&engine));

        Self {
            engine,
            drawing_area,
        }
    }

    #[must_use]
    pub fn engine(&self) -> SharedEngine {
        Rc::clone(&self.engine)
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    /// Runs `update` against the engine and schedules a redraw.
    pub fn update_engine<T>(
        &self,
        update: impl FnOnce(&mut ChartEngine<CairoRenderer>) -> ChartResult<T>,
    ) -> ChartResult<T> {
        let result = update(&mut self.engine.borrow_mut());
        self.drawing_area.queue_draw();
        result
    }
}

fn install_draw_func(drawing_area: &gtk::DrawingArea, engine: SharedEngine) {
    drawing_area.set_draw_func(move |_, context, _, _| {
        if let Ok(mut chart) = engine.try_borrow_mut() {
            if let Err(err) = chart.render_on_cairo_context(context) {
                warn!(error = %err, "chart draw failed");
            }
        }
    });
}

fn dispatch(engine: &SharedEngine, drawing_area: &gtk::DrawingArea, event: InputEvent) {
    let Ok(mut chart) = engine.try_borrow_mut() else {
        return;
    };
    match chart.handle_input(event) {
        Ok(true) => drawing_area.queue_draw(),
        Ok(false) => {}
        Err(err) => warn!(error = %err, ?event, "chart input rejected"),
    }
}

fn install_interactions(drawing_area: &gtk::DrawingArea, engine: SharedEngine) {
    drawing_area.set_focusable(true);

    {
        let engine = Rc::clone(&engine);
        drawing_area.connect_resize(move |area, width, height| {
            let width = u32::try_from(width.max(1)).unwrap_or(1);
            let height = u32::try_from(height.max(1)).unwrap_or(1);
            dispatch(&engine, area, InputEvent::Resize { width, height });
        });
    }

    let motion = gtk::EventControllerMotion::new();
    {
        let engine = Rc::clone(&engine);
        let drawing_area = drawing_area.clone();
        motion.connect_motion(move |_, x, y| {
            dispatch(&engine, &drawing_area, InputEvent::PointerMove { x, y });
        });
    }
    {
        let engine = Rc::clone(&engine);
        let drawing_area = drawing_area.clone();
        motion.connect_leave(move |_| {
            dispatch(&engine, &drawing_area, InputEvent::PointerLeave);
        });
    }
    drawing_area.add_controller(motion);

    let scroll = gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::VERTICAL);
    {
        let engine = Rc::clone(&engine);
        let drawing_area = drawing_area.clone();
        scroll.connect_scroll(move |_, _dx, dy| {
            dispatch(&engine, &drawing_area, InputEvent::Wheel { delta_y: dy });
            gtk::glib::Propagation::Stop
        });
    }
    drawing_area.add_controller(scroll);

    let drag = gtk::GestureDrag::new();
    {
        let engine = Rc::clone(&engine);
        let drawing_area = drawing_area.clone();
        drag.connect_drag_begin(move |_, x, y| {
            dispatch(&engine, &drawing_area, InputEvent::PointerDown { x, y });
        });
    }
    {
        let engine = Rc::clone(&engine);
        let drawing_area = drawing_area.clone();
        drag.connect_drag_update(move |gesture, offset_x, offset_y| {
            if let Some((start_x, start_y)) = gesture.start_point() {
                let event = InputEvent::PointerMove {
                    x: start_x + offset_x,
                    y: start_y + offset_y,
                };
                dispatch(&engine, &drawing_area, event);
            }
        });
    }
    {
        let engine = Rc::clone(&engine);
        let drawing_area = drawing_area.clone();
        drag.connect_drag_end(move |gesture, offset_x, offset_y| {
            let (start_x, start_y) = gesture.start_point().unwrap_or((0.0, 0.0));
            let event = InputEvent::PointerUp {
                x: start_x + offset_x,
                y: start_y + offset_y,
            };
            dispatch(&engine, &drawing_area, event);
        });
    }
    drawing_area.add_controller(drag);
}
