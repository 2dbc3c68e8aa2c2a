use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Drawing surface size in logical (CSS-like) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Margins reserved around the plot for axis labels and badges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 70.0,
            bottom: 30.0,
            left: 10.0,
        }
    }
}

impl Padding {
    pub fn validate(self) -> ChartResult<Self> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::Config(format!(
                    "padding `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Plot rectangle derived from a viewport and its padding.
///
/// Width and height never go negative: a surface smaller than its padding
/// yields an empty plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub padding: Padding,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn new(viewport: Viewport, padding: Padding) -> Self {
        let width = (f64::from(viewport.width) - padding.left - padding.right).max(0.0);
        let height = (f64::from(viewport.height) - padding.top - padding.bottom).max(0.0);
        Self {
            padding,
            width,
            height,
        }
    }

    #[must_use]
    pub fn left(self) -> f64 {
        self.padding.left
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.padding.left + self.width
    }

    #[must_use]
    pub fn top(self) -> f64 {
        self.padding.top
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.padding.top + self.height
    }

    /// Returns `true` when the point lies inside the plot, margins excluded.
    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.left() && x <= self.right() && y >= self.top() && y <= self.bottom()
    }
}
