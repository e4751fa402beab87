#![forbid(unsafe_code)]

//! Standalone interactive SVG charts.
//!
//! The user-facing types are the graph orchestrators in [`graph`]: construct
//! one with a [`Settings`] bag, feed it data, optionally set titles and
//! labels, then serialize. The emitted document is self-contained SVG 1.1
//! with inline scripts for hover highlights and tooltips.
//!
//! ```no_run
//! use svgplot::{ScatterPlot, Settings};
//!
//! let mut plot = ScatterPlot::new(&Settings::new())?;
//! plot.add_point(1.0, 10.0, None);
//! plot.add_point(2.0, 20.0, None);
//! plot.set_title("growth");
//! plot.save_path("growth.svg")?;
//! # Ok::<(), svgplot::Error>(())
//! ```

pub mod axis;
pub mod chart;
pub mod graph;
pub mod regression;
pub mod script;
pub mod settings;

pub use axis::{Axis, XAxis, YAxis};
pub use graph::{BarGraph, DoubleScatterPlot, LineChart, PieChart, ScatterPlot};
pub use settings::{
    BarDirection, BarSettings, ColorScheme, GraphSettings, MarkerType, ScatterSettings, Settings,
    UnifiedSettings,
};
pub use svgplot_scene::{Color, hex_to_color};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Scene(#[from] svgplot_scene::Error),

    #[error("invalid setting {key}={value:?}: expected {expected}")]
    InvalidSetting {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("invalid settings line {line}: {text:?}")]
    InvalidSettingsLine { line: usize, text: String },

    #[error("axis bounds are degenerate: lower == upper == {value}")]
    DegenerateAxis { value: f64 },

    #[error("{chart} has no data")]
    EmptyChart { chart: &'static str },

    #[error("regression requires at least two distinct x values")]
    DegenerateRegression,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
