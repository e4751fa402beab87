//! Scatter plot orchestrators.

use crate::chart::{DoubleScatterCanvas, ScatterCanvas};
use crate::graph::{AxisKind, AxisPlan, Frame, layout_unified};
use crate::settings::{ScatterSettings, Settings};
use crate::Result;
use std::path::Path;

pub struct ScatterPlot {
    frame: Frame,
    chart: ScatterCanvas,
}

impl ScatterPlot {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut frame = Frame::new(settings)?;
        let chart_settings = ScatterSettings::resolve(settings)?;
        let root = frame.doc.root();
        let chart = ScatterCanvas::new(&mut frame.doc.scene, root, chart_settings);
        Ok(Self { frame, chart })
    }

    pub fn add_point(&mut self, x: f64, y: f64, label: Option<&str>) {
        self.chart.add_point(&mut self.frame.doc.scene, x, y, label);
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

    /// Runs the layout pipeline once; later calls are no-ops.
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

/// Two scatter series over a shared x extent with independent y axes; the
/// secondary series reads against the right-hand axis.
pub struct DoubleScatterPlot {
    frame: Frame,
    chart: DoubleScatterCanvas,
}

impl DoubleScatterPlot {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut frame = Frame::new(settings)?;
        let chart_settings = ScatterSettings::resolve(settings)?;
        let root = frame.doc.root();
        let chart = DoubleScatterCanvas::new(&mut frame.doc.scene, root, chart_settings);
        Ok(Self { frame, chart })
    }

    pub fn add_point(&mut self, x: f64, y: f64, label: Option<&str>) {
        self.chart.add_point(&mut self.frame.doc.scene, x, y, label);
    }

    pub fn add_point2(&mut self, x: f64, y: f64, label: Option<&str>) {
        self.chart.add_point2(&mut self.frame.doc.scene, x, y, label);
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

    pub fn set_y2_label(&mut self, label: impl Into<String>) {
        self.frame.y2_label = Some(label.into());
    }

    pub fn finalize(&mut self) -> Result<()> {
        if self.frame.finalized {
            return Ok(());
        }
        let (b1, b2) = self.chart.set_bounds()?;
        let plan = AxisPlan {
            x: Some(AxisKind::Linear {
                lower: b1.min_x,
                upper: b1.max_x,
            }),
            y: Some(AxisKind::Linear {
                lower: b1.min_y,
                upper: b1.max_y,
            }),
            y2: Some((b2.min_y, b2.max_y)),
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
