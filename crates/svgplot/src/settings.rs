//! Settings bag and the typed per-chart configurations resolved from it.
//!
//! A [`Settings`] is an open, ordered map of raw string pairs; unknown keys
//! pass through untouched so later consumers can claim them. Each chart
//! family resolves the keys it advertises into a typed struct, coercing
//! string values and falling back to the documented defaults.

use crate::{Error, Result};
use indexmap::IndexMap;
use std::path::Path;
use svgplot_scene::{Color, hex_to_color};

#[derive(Debug, Clone, Default)]
pub struct Settings {
    values: IndexMap<String, String>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Loads a `key=value` file; blank lines and `#` comments are skipped.
    pub fn load_ini(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut values = IndexMap::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(Error::InvalidSettingsLine {
                    line: idx + 1,
                    text: raw.to_string(),
                });
            };
            values.insert(key.trim().to_string(), value.trim().to_string());
        }
        Ok(Self { values })
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Raw pairs in insertion order; parsing a file and exporting the pairs
    /// round-trips.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn f64_or(&self, key: &str, default: f64) -> Result<f64> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|_| Error::InvalidSetting {
                key: key.to_string(),
                value: raw.to_string(),
                expected: "a number",
            }),
        }
    }

    pub fn opt_f64(&self, key: &str) -> Result<Option<f64>> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() || raw.trim() == "None" => Ok(None),
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| Error::InvalidSetting {
                    key: key.to_string(),
                    value: raw.to_string(),
                    expected: "a number",
                }),
        }
    }

    pub fn usize_or(&self, key: &str, default: usize) -> Result<usize> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|_| Error::InvalidSetting {
                key: key.to_string(),
                value: raw.to_string(),
                expected: "a non-negative integer",
            }),
        }
    }

    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                _ => Err(Error::InvalidSetting {
                    key: key.to_string(),
                    value: raw.to_string(),
                    expected: "a boolean",
                }),
            },
        }
    }

    pub fn color_or(&self, key: &str, default: &str) -> Result<Color> {
        let raw = self.get(key).unwrap_or(default);
        hex_to_color(raw).map_err(|_| Error::InvalidSetting {
            key: key.to_string(),
            value: raw.to_string(),
            expected: "a hex color",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerType {
    #[default]
    Circle,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    Solid,
    #[default]
    TripleAxis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarDirection {
    #[default]
    Horizontal,
    Vertical,
}

/// Keys shared by every chart family.
#[derive(Debug, Clone)]
pub struct GraphSettings {
    pub width: f64,
    pub height: f64,
    pub fixed_width: Option<f64>,
    pub title_size: f64,
    pub x_label_size: f64,
    pub y_label_size: f64,
    pub y2_label_size: f64,
    pub left_margin: f64,
    pub right_margin: f64,
    pub top_margin: f64,
    pub bottom_margin: f64,
    pub title_space: f64,
    pub x_label_space: f64,
    pub y_label_space: f64,
    pub y2_label_space: f64,
    pub tooltip_size: f64,
}

impl GraphSettings {
    pub fn resolve(s: &Settings) -> Result<Self> {
        Ok(Self {
            width: s.f64_or("width", 300.0)?,
            height: s.f64_or("height", 200.0)?,
            fixed_width: s.opt_f64("fixedWidth")?,
            title_size: s.f64_or("titleSize", 10.0)?,
            x_label_size: s.f64_or("xLabelSize", 8.0)?,
            y_label_size: s.f64_or("yLabelSize", 8.0)?,
            y2_label_size: s.f64_or("y2LabelSize", 8.0)?,
            left_margin: s.f64_or("leftMargin", 10.0)?,
            right_margin: s.f64_or("rightMargin", 10.0)?,
            top_margin: s.f64_or("topMargin", 10.0)?,
            bottom_margin: s.f64_or("bottomMargin", 10.0)?,
            title_space: s.f64_or("titleSpace", 10.0)?,
            x_label_space: s.f64_or("xLabelSpace", 10.0)?,
            y_label_space: s.f64_or("yLabelSpace", 10.0)?,
            y2_label_space: s.f64_or("y2LabelSpace", 10.0)?,
            tooltip_size: s.f64_or("tooltipSize", 7.0)?,
        })
    }
}

/// Keys for the axis / background / border machinery shared by the unified
/// graph family.
#[derive(Debug, Clone)]
pub struct UnifiedSettings {
    pub x_axis_space: f64,
    pub y_axis_space: f64,
    pub y2_axis_space: f64,
    pub x_axis_text_height: f64,
    pub y_axis_text_height: f64,
    pub y2_axis_text_height: f64,
    pub bg: bool,
    pub bg_bar_dir: BarDirection,
    pub bg_bars: usize,
    pub bg_color1: Color,
    pub bg_color2: Color,
    pub canvas_border: bool,
    pub canvas_border_width: f64,
    pub canvas_border_color: Color,
    pub tooltip_x_offset: f64,
    pub tooltip_y_offset: f64,
    pub tooltip_x_padding: f64,
    pub tooltip_y_padding: f64,
}

impl UnifiedSettings {
    pub fn resolve(s: &Settings) -> Result<Self> {
        let bg_bar_dir = match s.get("bgBarDir").unwrap_or("horizontal") {
            "horizontal" => BarDirection::Horizontal,
            "vertical" => BarDirection::Vertical,
            other => {
                return Err(Error::InvalidSetting {
                    key: "bgBarDir".to_string(),
                    value: other.to_string(),
                    expected: "horizontal or vertical",
                });
            }
        };
        Ok(Self {
            x_axis_space: s.f64_or("xAxisSpace", 2.0)?,
            y_axis_space: s.f64_or("yAxisSpace", 2.0)?,
            y2_axis_space: s.f64_or("y2AxisSpace", 2.0)?,
            x_axis_text_height: s.f64_or("xAxisTextHeight", 6.0)?,
            y_axis_text_height: s.f64_or("yAxisTextHeight", 6.0)?,
            y2_axis_text_height: s.f64_or("y2AxisTextHeight", 6.0)?,
            bg: s.bool_or("bg", true)?,
            bg_bar_dir,
            bg_bars: s.usize_or("bgBars", 6)?,
            bg_color1: s.color_or("bgColor1", "#efefef")?,
            bg_color2: s.color_or("bgColor2", "#c1c1c1")?,
            canvas_border: s.bool_or("canvasBorder", true)?,
            canvas_border_width: s.f64_or("canvasBorderWidth", 1.0)?,
            canvas_border_color: s.color_or("canvasBorderColor", "#000")?,
            tooltip_x_offset: s.f64_or("tooltipXOffset", 10.0)?,
            tooltip_y_offset: s.f64_or("tooltipYOffset", 10.0)?,
            tooltip_x_padding: s.f64_or("tooltipXPadding", 20.0)?,
            tooltip_y_padding: s.f64_or("tooltipYPadding", 10.0)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ScatterSettings {
    pub marker_size: f64,
    pub marker_type: MarkerType,
    pub color_scheme: ColorScheme,
    pub color1: Color,
    pub color2: Color,
    pub color3: Color,
    pub regression: bool,
    pub reg_line_color: Color,
    pub reg_line_width: f64,
}

impl ScatterSettings {
    pub fn resolve(s: &Settings) -> Result<Self> {
        let marker_type = match s.get("markerType").unwrap_or("circle") {
            "circle" => MarkerType::Circle,
            "square" => MarkerType::Square,
            other => {
                return Err(Error::InvalidSetting {
                    key: "markerType".to_string(),
                    value: other.to_string(),
                    expected: "circle or square",
                });
            }
        };
        let color_scheme = match s.get("colorScheme").unwrap_or("tripleAxis") {
            "tripleAxis" => ColorScheme::TripleAxis,
            "solid" => ColorScheme::Solid,
            other => {
                return Err(Error::InvalidSetting {
                    key: "colorScheme".to_string(),
                    value: other.to_string(),
                    expected: "tripleAxis or solid",
                });
            }
        };
        Ok(Self {
            marker_size: s.f64_or("markerSize", 2.0)?,
            marker_type,
            color_scheme,
            color1: s.color_or("color1", "#f00")?,
            color2: s.color_or("color2", "#0f0")?,
            color3: s.color_or("color3", "#00f")?,
            regression: s.bool_or("regression", true)?,
            reg_line_color: s.color_or("regLineColor", "#000")?,
            reg_line_width: s.f64_or("regLineWidth", 1.0)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct BarSettings {
    pub bar_color: Color,
    pub bar_width: f64,
    pub bar_spacing: f64,
    pub blank_space: f64,
    pub horizontal: bool,
}

impl BarSettings {
    pub fn resolve(s: &Settings) -> Result<Self> {
        Ok(Self {
            bar_color: s.color_or("barColor", "#d20a0a")?,
            bar_width: s.f64_or("barWidth", 1.0)?,
            bar_spacing: s.f64_or("barSpacing", 0.1)?,
            blank_space: s.f64_or("blankSpace", 0.5)?,
            horizontal: s.bool_or("horizontal", false)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_from_empty_bag() {
        let s = Settings::new();
        let g = GraphSettings::resolve(&s).unwrap();
        assert_eq!(g.width, 300.0);
        assert_eq!(g.height, 200.0);
        assert_eq!(g.fixed_width, None);
        assert_eq!(g.tooltip_size, 7.0);

        let u = UnifiedSettings::resolve(&s).unwrap();
        assert!(u.bg);
        assert_eq!(u.bg_bars, 6);
        assert_eq!(u.bg_color1.to_string(), "rgb(239,239,239)");
        assert_eq!(u.canvas_border_color.to_string(), "rgb(0,0,0)");

        let sc = ScatterSettings::resolve(&s).unwrap();
        assert_eq!(sc.marker_type, MarkerType::Circle);
        assert_eq!(sc.color_scheme, ColorScheme::TripleAxis);

        let b = BarSettings::resolve(&s).unwrap();
        assert_eq!(b.bar_width, 1.0);
        assert_eq!(b.bar_spacing, 0.1);
        assert_eq!(b.blank_space, 0.5);
    }

    #[test]
    fn string_values_are_coerced() {
        let s = Settings::from_map([
            ("width", "450"),
            ("bg", "false"),
            ("bgBars", "4"),
            ("markerType", "square"),
            ("color1", "0xff8000"),
        ]);
        assert_eq!(GraphSettings::resolve(&s).unwrap().width, 450.0);
        let u = UnifiedSettings::resolve(&s).unwrap();
        assert!(!u.bg);
        assert_eq!(u.bg_bars, 4);
        let sc = ScatterSettings::resolve(&s).unwrap();
        assert_eq!(sc.marker_type, MarkerType::Square);
        assert_eq!(sc.color1.to_string(), "rgb(255,128,0)");
    }

    #[test]
    fn bad_coercions_name_the_key() {
        let s = Settings::from_map([("width", "wide")]);
        match GraphSettings::resolve(&s) {
            Err(Error::InvalidSetting { key, .. }) => assert_eq!(key, "width"),
            other => panic!("expected InvalidSetting, got {other:?}"),
        }
    }

    #[test]
    fn unknown_keys_pass_through() {
        let s = Settings::from_map([("futureKnob", "7"), ("width", "300")]);
        GraphSettings::resolve(&s).unwrap();
        assert_eq!(s.get("futureKnob"), Some("7"));
    }

    #[test]
    fn ini_round_trip_preserves_pairs() {
        let dir = std::env::temp_dir().join("svgplot-settings-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("chart.ini");
        std::fs::write(&path, "# chart settings\nwidth=400\nheight = 250\n\nbarColor=#00ff00\n")
            .unwrap();

        let s = Settings::load_ini(&path).unwrap();
        let pairs: Vec<_> = s.pairs().collect();
        assert_eq!(
            pairs,
            vec![
                ("width", "400"),
                ("height", "250"),
                ("barColor", "#00ff00"),
            ]
        );
    }

    #[test]
    fn ini_rejects_lines_without_equals() {
        let dir = std::env::temp_dir().join("svgplot-settings-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.ini");
        std::fs::write(&path, "width=300\nnot a setting\n").unwrap();
        match Settings::load_ini(&path) {
            Err(Error::InvalidSettingsLine { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected InvalidSettingsLine, got {other:?}"),
        }
    }
}
