//! Line chart orchestrator.

use crate::chart::LineCanvas;
use crate::graph::{AxisKind, AxisPlan, Frame, layout_unified};
use crate::settings::Settings;
use crate::Result;
use rustc_hash::FxHashMap;
use std::path::Path;
use svgplot_scene::Color;

pub struct LineChart {
    frame: Frame,
    chart: LineCanvas,
}

impl LineChart {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut frame = Frame::new(settings)?;
        let root = frame.doc.root();
        let chart = LineCanvas::new(&mut frame.doc.scene, root);
        Ok(Self { frame, chart })
    }

    /// Adds a series sampled at indices `0..values.len()`; `None` samples
    /// break the line.
    pub fn add_series(&mut self, name: &str, values: &[Option<f64>]) {
        self.chart.add_series(&mut self.frame.doc.scene, name, values);
    }

    pub fn set_series_names(&mut self, names: &[&str]) {
        self.chart.set_series_names(names);
    }

    pub fn set_colors(&mut self, colors: impl IntoIterator<Item = (String, Color)>) {
        self.chart.set_colors(colors.into_iter().collect::<FxHashMap<_, _>>());
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.frame.title = Some(title.into());
    }

    pub fn set_x_label(&mut self, label: impl Into<String>) {
        self.frame.x_label = Some(label.into());
    }

    pub fn set_y_label(&mut self, label: impl Into<String>) {
        self.frame.y_label = Some(label.into());
    }

    pub fn finalize(&mut self) -> Result<()> {
        if self.frame.finalized {
            return Ok(());
        }
        let b = self.chart.set_bounds()?;
        let plan = AxisPlan {
            x: Some(AxisKind::Linear {
                lower: b.min_x,
                upper: b.max_x,
            }),
            y: Some(AxisKind::Linear {
                lower: b.min_y,
                upper: b.max_y,
            }),
            y2: None,
        };
        layout_unified(&mut self.frame, &mut self.chart.canvas, &plan)?;
        self.chart.finalize(&mut self.frame.doc.scene)?;
        self.frame.finalized = true;
        Ok(())
    }

    pub fn to_svg_string(&mut self) -> Result<String> {
        self.finalize()?;
        Ok(self.frame.doc.to_svg_string())
    }

    pub fn save_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.finalize()?;
        self.frame.doc.save_path(path)?;
        Ok(())
    }

    pub fn write_to<W: std::io::Write>(&mut self, writer: &mut W) -> Result<()> {
        self.finalize()?;
        self.frame.doc.write_to(writer)?;
        Ok(())
    }
}
