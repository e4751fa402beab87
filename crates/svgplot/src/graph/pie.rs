//! Pie chart orchestrator. Pies skip the axis machinery: wedges render in
//! pixel space around the canvas center.

use crate::chart::PieCanvas;
use crate::graph::Frame;
use crate::settings::Settings;
use crate::Result;
use rustc_hash::FxHashMap;
use std::path::Path;
use svgplot_scene::Color;

pub struct PieChart {
    frame: Frame,
    chart: PieCanvas,
}

impl PieChart {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut frame = Frame::new(settings)?;
        let root = frame.doc.root();
        let chart = PieCanvas::new(&mut frame.doc.scene, root);
        Ok(Self { frame, chart })
    }

    pub fn add_wedge(&mut self, name: &str, value: f64) {
        self.chart.add_wedge(name, value);
    }

    pub fn set_colors(&mut self, colors: impl IntoIterator<Item = (String, Color)>) {
        self.chart.set_colors(colors.into_iter().collect::<FxHashMap<_, _>>());
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.frame.title = Some(title.into());
    }

    pub fn finalize(&mut self) -> Result<()> {
        if self.frame.finalized {
            return Ok(());
        }
        let (x, y, w, h) = self.frame.content_rect();
        self.chart.canvas.move_to(&mut self.frame.doc.scene, x, y);
        self.chart.canvas.change_size(w, h);
        self.frame.draw_titles();
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
