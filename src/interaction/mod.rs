//! Pure input-to-viewport transitions.
//!
//! Hosts translate their native pointer/wheel/resize callbacks into
//! [`InputEvent`]s and feed them through [`InteractionController::transition`].
//! Nothing here touches a drawing surface.

use serde::{Deserialize, Serialize};

use crate::core::ViewportState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
}

/// Raw input delivered by the host. Coordinates are surface-relative pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerMove { x: f64, y: f64 },
    PointerDown { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    PointerLeave,
    /// Vertical wheel delta; negative scrolls up.
    Wheel { delta_y: f64 },
    Resize { width: u32, height: u32 },
}

/// Series/layout facts a transition needs to clamp the offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionContext {
    pub series_len: usize,
    pub plot_width: f64,
}

/// Result of one transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: ViewportState,
    /// `true` when the host should schedule a redraw.
    pub render: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InteractionController;

impl InteractionController {
    #[must_use]
    pub fn mode(state: &ViewportState) -> InteractionMode {
        if state.is_dragging() {
            InteractionMode::Panning
        } else {
            InteractionMode::Idle
        }
    }

    #[must_use]
    pub fn transition(
        state: ViewportState,
        event: InputEvent,
        context: InteractionContext,
    ) -> Transition {
        let mut next = state;
        let render = match event {
            InputEvent::PointerMove { x, y } => {
                next.drag_to(x, context.series_len, context.plot_width);
                next.show_crosshair(x, y);
                true
            }
            InputEvent::PointerDown { x, y } => {
                next.begin_drag(x);
                next.show_crosshair(x, y);
                true
            }
            InputEvent::PointerUp { .. } => {
                next.end_drag();
                true
            }
            InputEvent::PointerLeave => {
                next.end_drag();
                next.hide_crosshair();
                true
            }
            InputEvent::Wheel { delta_y } => next.zoom(delta_y),
            // Layout is recomputed at render; the offset is clamped there too.
            InputEvent::Resize { .. } => true,
        };

        Transition {
            state: next,
            render,
        }
    }
}
