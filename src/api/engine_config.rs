use serde::{Deserialize, Serialize};

use crate::core::{Padding, PlotArea, Viewport};
use crate::error::{ChartError, ChartResult};

use super::ChartStyle;

/// Public engine bootstrap configuration.
///
/// Serializable so host applications can persist/load chart setup without
/// inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: f64,
    #[serde(default)]
    pub padding: Padding,
    #[serde(default)]
    pub style: ChartStyle,
    /// Decimal places on price labels, badges and the OHLC readout.
    #[serde(default = "default_price_precision")]
    pub price_precision: u8,
    /// Offset from UTC applied to time labels, in minutes.
    #[serde(default)]
    pub time_label_offset_minutes: i32,
}

fn default_pixel_ratio() -> f64 {
    1.0
}

fn default_price_precision() -> u8 {
    2
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            pixel_ratio: default_pixel_ratio(),
            padding: Padding::default(),
            style: ChartStyle::default(),
            price_precision: default_price_precision(),
            time_label_offset_minutes: 0,
        }
    }

    #[must_use]
    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_time_label_offset_minutes(mut self, minutes: i32) -> Self {
        self.time_label_offset_minutes = minutes;
        self
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        PlotArea::new(self.viewport, self.padding)
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport.validate()?;
        if !self.pixel_ratio.is_finite() || self.pixel_ratio <= 0.0 {
            return Err(ChartError::Config(
                "pixel ratio must be finite and > 0".to_owned(),
            ));
        }
        self.padding.validate()?;
        self.style.validate()?;
        if self.price_precision > 8 {
            return Err(ChartError::Config(
                "price precision must be <= 8".to_owned(),
            ));
        }
        if self.time_label_offset_minutes.abs() >= 24 * 60 {
            return Err(ChartError::Config(
                "time label offset must be within one day".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::Config(format!("failed to serialize chart config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::Config(format!("failed to parse chart config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::ChartEngineConfig;
    use crate::core::Viewport;

    #[test]
    fn minimal_json_fills_defaults() {
        let config = ChartEngineConfig::from_json_str(r#"{"viewport":{"width":800,"height":400}}"#)
            .expect("minimal config");
        assert_eq!(config, ChartEngineConfig::new(Viewport::new(800, 400)));
    }

    #[test]
    fn json_round_trip_preserves_config() {
        let config = ChartEngineConfig::new(Viewport::new(640, 360))
            .with_pixel_ratio(2.0)
            .with_time_label_offset_minutes(480);
        let json = config.to_json_pretty().expect("serialize");
        let parsed = ChartEngineConfig::from_json_str(&json).expect("parse");
        assert_eq!(parsed.viewport, config.viewport);
        assert_eq!(parsed.pixel_ratio, 2.0);
        assert_eq!(parsed.time_label_offset_minutes, 480);
        assert_eq!(parsed.padding, config.padding);
        assert!((parsed.style.up_color.green - config.style.up_color.green).abs() < 1e-12);
    }

    #[test]
    fn zero_pixel_ratio_is_rejected() {
        let config = ChartEngineConfig::new(Viewport::new(640, 360)).with_pixel_ratio(0.0);
        assert!(config.validate().is_err());
    }
}
