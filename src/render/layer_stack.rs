use serde::{Deserialize, Serialize};

use super::{LinePrimitive, RectPrimitive, TextPrimitive};

/// Paint layers, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    /// Grid lines, price and time axis labels, placeholder text.
    Grid,
    /// Candle wicks and bodies.
    Series,
    /// Last-price line and badge.
    Overlay,
    /// Crosshair lines, axis badges and OHLC readout.
    Crosshair,
}

impl CanvasLayerKind {
    pub const CANONICAL_ORDER: [CanvasLayerKind; 4] = [
        CanvasLayerKind::Grid,
        CanvasLayerKind::Series,
        CanvasLayerKind::Overlay,
        CanvasLayerKind::Crosshair,
    ];
}

/// Primitives of one layer. Backends paint lines, then rects, then texts.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: CanvasLayerKind,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    #[must_use]
    pub fn new(kind: CanvasLayerKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rects.is_empty() && self.texts.is_empty()
    }
}
