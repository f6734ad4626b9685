// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! TOML configuration for the demo.
//!
//! Every field is optional; anything left out falls back to the reference chart
//! (800x600 surface, 2x2 grid, padding `{20, 20, 60, 60}`, stock colors).
//!
//! ```toml
//! category_order = "lexicographic"
//! fallback_color = "#888888"
//!
//! [surface]
//! width = 1200
//! height = 600
//!
//! [grid]
//! rows = 2
//! cols = 3
//!
//! [colors]
//! TSLA = "rgb(227, 25, 55)"
//!
//! [style]
//! y_title = "Close (USD)"
//! background = "none"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::Deserialize;
use trellis_charts::{
    ColorEncoding, FallbackPolicy, GridShape, GridStyle, Padding, PanelStyle, Size, TrellisSpec,
};
use trellis_transforms::CategoryOrder;

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration")]
    Parse(#[from] toml::de::Error),
    #[error("{key}: cannot parse color {value:?} ({reason})")]
    Color {
        key: String,
        value: String,
        reason: String,
    },
}

/// Demo configuration, as read from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    surface: Option<Size>,
    grid: Option<GridShape>,
    padding: Option<Padding>,
    category_order: Option<CategoryOrder>,
    nice_values: bool,
    fallback_color: Option<String>,
    /// Category colors, merged over the stock palette.
    colors: BTreeMap<String, String>,
    style: StyleConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct StyleConfig {
    x_title: Option<String>,
    y_title: Option<String>,
    /// A CSS color, or `"none"`.
    background: Option<String>,
    grid: Option<bool>,
}

impl Config {
    /// Reads and parses a configuration file.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub(crate) fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Builds the trellis spec, starting from the reference defaults.
    pub(crate) fn to_spec(&self) -> Result<TrellisSpec, ConfigError> {
        let mut spec = TrellisSpec::default();
        if let Some(surface) = self.surface {
            spec.surface = surface;
        }
        if let Some(grid) = self.grid {
            spec.grid = grid;
        }
        if let Some(padding) = self.padding {
            spec.padding = padding;
        }
        if let Some(order) = self.category_order {
            spec.category_order = order;
        }
        spec.nice_values = self.nice_values;

        let mut colors = ColorEncoding::stock_default();
        for (category, value) in &self.colors {
            colors.insert(category.clone(), color(category, value)?);
        }
        if let Some(value) = &self.fallback_color {
            colors = colors.with_fallback(FallbackPolicy::Fixed(color("fallback_color", value)?));
        }
        spec.colors = colors;

        spec.style = self.style.apply(PanelStyle::default())?;
        Ok(spec)
    }
}

impl StyleConfig {
    fn apply(&self, mut style: PanelStyle) -> Result<PanelStyle, ConfigError> {
        if let Some(t) = &self.x_title {
            style = style.with_x_title(t.clone());
        }
        if let Some(t) = &self.y_title {
            style = style.with_y_title(t.clone());
        }
        match self.background.as_deref() {
            None => {}
            Some("none") => style = style.with_background(None),
            Some(value) => {
                style = style.with_background(Some(color("style.background", value)?.into()));
            }
        }
        if self.grid == Some(false) {
            style = style.with_grid(None);
        } else if self.grid == Some(true) && style.grid.is_none() {
            style = style.with_grid(Some(GridStyle::default()));
        }
        Ok(style)
    }
}

fn color(key: &str, value: &str) -> Result<Color, ConfigError> {
    parse_color(value)
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|err| ConfigError::Color {
            key: key.into(),
            value: value.into(),
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_the_reference_chart() {
        let spec = Config::from_toml_str("").unwrap().to_spec().unwrap();
        assert_eq!(spec, TrellisSpec::default());
    }

    #[test]
    fn fields_override_defaults() {
        let spec = Config::from_toml_str(
            r##"
            category_order = "lexicographic"
            nice_values = true

            [surface]
            width = 1200
            height = 600

            [grid]
            rows = 2
            cols = 3

            [padding]
            top = 10
            right = 10
            bottom = 50
            left = 50

            [colors]
            TSLA = "rgb(227, 25, 55)"
            AAPL = "#000000"

            [style]
            y_title = "Close (USD)"
            background = "none"
            grid = false
            "##,
        )
        .unwrap()
        .to_spec()
        .unwrap();

        assert_eq!(spec.surface, Size::new(1200.0, 600.0));
        assert_eq!(spec.grid, GridShape::new(2, 3));
        assert_eq!(spec.padding, Padding::new(10.0, 10.0, 50.0, 50.0));
        assert_eq!(spec.category_order, CategoryOrder::Lexicographic);
        assert!(spec.nice_values);
        assert_eq!(
            spec.colors.get("TSLA").map(|c| c.to_rgba8().to_u8_array()),
            Some([227, 25, 55, 255])
        );
        assert_eq!(
            spec.colors.get("AAPL").map(|c| c.to_rgba8().to_u8_array()),
            Some([0, 0, 0, 255])
        );
        // Overrides keep the stock table order; new categories are appended.
        let order: Vec<&str> = spec.colors.iter().map(|(k, _)| k).collect();
        assert_eq!(order, ["AAPL", "GOOGL", "META", "MSFT", "TSLA"]);
        assert_eq!(spec.style.y_title, "Close (USD)");
        assert_eq!(spec.style.x_title, "Date (by Month)");
        assert!(spec.style.background.is_none());
        assert!(spec.style.grid.is_none());
    }

    #[test]
    fn fallback_color_switches_policy() {
        let spec = Config::from_toml_str(r##"fallback_color = "#808080""##)
            .unwrap()
            .to_spec()
            .unwrap();
        let FallbackPolicy::Fixed(c) = spec.colors.fallback() else {
            panic!("expected a fixed fallback");
        };
        assert_eq!(c.to_rgba8().to_u8_array(), [128, 128, 128, 255]);
    }

    #[test]
    fn bad_color_names_its_key() {
        let err = Config::from_toml_str("[colors]\nAAPL = \"not-a-color\"\n")
            .unwrap()
            .to_spec()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Color { ref key, .. } if key == "AAPL"));
    }

    #[test]
    fn bundled_config_parses() {
        let spec = Config::from_toml_str(include_str!("../data/wide.toml"))
            .unwrap()
            .to_spec()
            .unwrap();
        assert_eq!(spec.grid.capacity(), 6);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::from_toml_str("colours = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
