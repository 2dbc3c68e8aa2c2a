use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LineStrokeStyle};

/// Palette and typography for one chart.
///
/// Defaults follow the dark card theme of the stock viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub background: Color,
    pub text_color: Color,
    pub grid_color: Color,
    pub up_color: Color,
    pub down_color: Color,
    pub crosshair_color: Color,
    pub crosshair_badge_color: Color,
    pub badge_text_color: Color,
    pub font_size_px: f64,
    pub grid_line_width: f64,
    pub last_price_dash: LineStrokeStyle,
    pub crosshair_dash: LineStrokeStyle,
    pub placeholder_text: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background: Color::rgb8(0x16, 0x1b, 0x22),
            text_color: Color::rgb8(0x8b, 0x94, 0x9e),
            grid_color: Color::rgb8(0x30, 0x36, 0x3d),
            up_color: Color::rgb8(0x2e, 0xa0, 0x43),
            down_color: Color::rgb8(0xda, 0x36, 0x33),
            crosshair_color: Color::rgb8(0x8b, 0x94, 0x9e).with_alpha(0.8),
            crosshair_badge_color: Color::rgb8(0x30, 0x36, 0x3d),
            badge_text_color: Color::rgb(1.0, 1.0, 1.0),
            font_size_px: 11.0,
            grid_line_width: 1.0,
            last_price_dash: LineStrokeStyle::Dashed {
                dash_px: 4.0,
                gap_px: 4.0,
            },
            crosshair_dash: LineStrokeStyle::Dashed {
                dash_px: 5.0,
                gap_px: 5.0,
            },
            placeholder_text: "No data available".to_owned(),
        }
    }
}

impl ChartStyle {
    #[must_use]
    pub fn candle_color(&self, is_bullish: bool) -> Color {
        if is_bullish {
            self.up_color
        } else {
            self.down_color
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.background,
            self.text_color,
            self.grid_color,
            self.up_color,
            self.down_color,
            self.crosshair_color,
            self.crosshair_badge_color,
            self.badge_text_color,
        ] {
            color.validate()?;
        }
        self.last_price_dash.validate()?;
        self.crosshair_dash.validate()?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::Config(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if !self.grid_line_width.is_finite() || self.grid_line_width <= 0.0 {
            return Err(ChartError::Config(
                "grid line width must be finite and > 0".to_owned(),
            ));
        }
        if self.placeholder_text.is_empty() {
            return Err(ChartError::Config(
                "placeholder text must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}
