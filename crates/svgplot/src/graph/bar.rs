//! Bar graph orchestrator, vertical or horizontal per the `horizontal`
//! setting.

use crate::chart::BarCanvas;
use crate::graph::{AxisKind, AxisPlan, Frame, layout_unified};
use crate::settings::{BarSettings, Settings};
use crate::Result;
use rustc_hash::FxHashMap;
use std::path::Path;
use svgplot_scene::Color;

pub struct BarGraph {
    frame: Frame,
    chart: BarCanvas,
}

impl BarGraph {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut frame = Frame::new(settings)?;
        let chart_settings = BarSettings::resolve(settings)?;
        let root = frame.doc.root();
        let chart = BarCanvas::new(&mut frame.doc.scene, root, chart_settings);
        Ok(Self { frame, chart })
    }

    pub fn add_bar(&mut self, name: &str, value: f64) {
        self.chart.add_bar(&mut self.frame.doc.scene, name, value);
    }

    pub fn add_group(&mut self, name: &str, items: &[(&str, f64)]) {
        self.chart.add_group(&mut self.frame.doc.scene, name, items);
    }

    pub fn add_space(&mut self) {
        self.chart.add_space();
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
        let categories = self.chart.category_centers();
        // Vertical bars carry rotated category labels on X; the horizontal
        // variant swaps the value axis onto X and the categories onto Y.
        let plan = if self.chart.is_horizontal() {
            AxisPlan {
                x: Some(AxisKind::Linear {
                    lower: b.min_x,
                    upper: b.max_x,
                }),
                y: Some(AxisKind::Categories {
                    labels: categories,
                    lower: b.min_y,
                    upper: b.max_y,
                    rotated: false,
                }),
                y2: None,
            }
        } else {
            AxisPlan {
                x: Some(AxisKind::Categories {
                    labels: categories,
                    lower: b.min_x,
                    upper: b.max_x,
                    rotated: true,
                }),
                y: Some(AxisKind::Linear {
                    lower: b.min_y,
                    upper: b.max_y,
                }),
                y2: None,
            }
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
