//! Chart tuning knobs.
//!
//! Defaults reproduce the reference look (60/30/50/60 margins, 300px height
//! cap, 7 time ticks, 8 value ticks). Any subset can be overridden from a TOML
//! file:
//!
//! ```toml
//! max_plot_height = 400.0
//! locale = "de"
//!
//! [margins]
//! left = 80.0
//! ```
use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 60.0,
            right: 30.0,
            bottom: 50.0,
            left: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub margins: Margins,
    /// Upper bound for the plot-area height in pixels.
    pub max_plot_height: f64,
    /// Tick-count hint for the time axis.
    pub x_ticks: usize,
    /// Tick-count hint for the value axis.
    pub y_ticks: usize,
    pub marker_radius: f64,
    /// Radius of the hover anchor circle.
    pub focus_radius: f64,
    /// Base font size; `em` offsets resolve against it.
    pub font_px: f64,
    /// Number grouping for value tick labels (`en`, `de`, `fr`, ...).
    pub locale: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            max_plot_height: 300.0,
            x_ticks: 7,
            y_ticks: 8,
            marker_radius: 3.0,
            focus_radius: 5.0,
            font_px: 12.0,
            locale: "en".to_string(),
        }
    }
}

impl ChartConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ChartError::Config(e.to_string()))
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ChartError::Config(format!("{}: {e}", path.display())))?;
        let cfg = Self::from_toml_str(&text)?;
        log::debug!("loaded chart config from {}", path.display());
        Ok(cfg)
    }

    /// Load from `path` when given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_toml_file(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = ChartConfig::from_toml_str(
            r#"
            locale = "de"
            [margins]
            left = 80.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.locale, "de");
        assert_eq!(cfg.margins.left, 80.0);
        assert_eq!(cfg.margins.top, 60.0);
        assert_eq!(cfg.max_plot_height, 300.0);
        assert_eq!(cfg.x_ticks, 7);
    }

    #[test]
    fn bad_toml_is_config_error() {
        let e = ChartConfig::from_toml_str("x_ticks = \"many\"").unwrap_err();
        assert!(matches!(e, ChartError::Config(_)));
    }
}
