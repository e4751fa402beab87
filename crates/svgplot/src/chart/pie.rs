//! Pie canvas: sectors laid out in pixel space around the canvas center.
//!
//! Wedges sort ascending by value and sweep counter-clockwise from the top
//! of the circle; the data group keeps the identity transform.

use crate::chart::GraphCanvas;
use crate::{Error, Result};
use rustc_hash::FxHashMap;
use std::f64::consts::{FRAC_PI_2, TAU};
use svgplot_scene::{Color, NodeId, NodeKind, Scene, Vector};
use tracing::warn;

const DEFAULT_FILL: Color = Color {
    red: 255.0,
    green: 0.0,
    blue: 0.0,
};

#[derive(Debug)]
pub struct PieCanvas {
    pub canvas: GraphCanvas,
    wedges: Vec<(String, f64)>,
    colors: FxHashMap<String, Color>,
}

impl PieCanvas {
    pub fn new(scene: &mut Scene, parent: NodeId) -> Self {
        Self {
            canvas: GraphCanvas::new(scene, parent, 0.0, 0.0, 1.0, 1.0),
            wedges: Vec::new(),
            colors: FxHashMap::default(),
        }
    }

    pub fn add_wedge(&mut self, name: &str, value: f64) {
        if value <= 0.0 {
            warn!(name, value, "dropping non-positive pie wedge");
            return;
        }
        self.wedges.push((name.to_string(), value));
    }

    pub fn set_colors(&mut self, colors: FxHashMap<String, Color>) {
        self.colors = colors;
    }

    /// Start angle and sweep per wedge, smallest value first, beginning at
    /// the top of the circle.
    pub fn wedge_layout(&self) -> Vec<(String, f64, f64)> {
        let mut sorted = self.wedges.clone();
        sorted.sort_by(|a, b| a.1.total_cmp(&b.1));
        let total: f64 = sorted.iter().map(|(_, v)| v).sum();
        let mut cursor = FRAC_PI_2;
        let mut out = Vec::with_capacity(sorted.len());
        for (name, value) in sorted {
            let sweep = value / total * TAU;
            out.push((name, cursor, sweep));
            cursor += sweep;
        }
        out
    }

    pub fn finalize(&mut self, scene: &mut Scene) -> Result<()> {
        if self.wedges.is_empty() {
            return Err(Error::EmptyChart { chart: "pie" });
        }
        let center = Vector::new(self.canvas.width / 2.0, self.canvas.height / 2.0);
        let radius = self.canvas.width.min(self.canvas.height) / 2.0;
        for (name, start, sweep) in self.wedge_layout() {
            let fill = self.colors.get(&name).copied().unwrap_or(DEFAULT_FILL);
            let highlight = fill.lighten(0.35)?;
            let wedge = scene.add(
                self.canvas.data,
                NodeKind::Sector {
                    radius,
                    start,
                    delta: sweep,
                },
            );
            let node = scene.node_mut(wedge);
            node.class = Some("wedge".to_string());
            node.position = center;
            node.set_style("fill", fill.to_string());
            node.set_style("stroke", "rgb(0,0,0)");
            node.set_style("strokeWidth", "0.5");
            let value = self
                .wedges
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| *v)
                .unwrap_or(0.0);
            node.set_attr("has-tooltip", "true");
            node.set_attr("tooltip-text", format!("{name}: {value}"));
            node.set_attr("has-highlight", "true");
            node.set_attr("highlight-fill", highlight.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgplot_scene::PrintableCanvas;

    fn pie() -> (PrintableCanvas, PieCanvas) {
        let mut doc = PrintableCanvas::new(300.0, 200.0);
        let root = doc.root();
        let chart = PieCanvas::new(&mut doc.scene, root);
        (doc, chart)
    }

    #[test]
    fn wedges_sort_ascending_and_sweep_from_the_top() {
        let (_, mut chart) = pie();
        chart.add_wedge("c", 3.0);
        chart.add_wedge("a", 1.0);
        chart.add_wedge("b", 2.0);

        let layout = chart.wedge_layout();
        let names: Vec<&str> = layout.iter().map(|(n, _, _)| n.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        let expected = [
            (FRAC_PI_2, TAU / 6.0),
            (FRAC_PI_2 + TAU / 6.0, 2.0 * TAU / 6.0),
            (FRAC_PI_2 + 3.0 * TAU / 6.0, 3.0 * TAU / 6.0),
        ];
        for ((_, start, sweep), (want_start, want_sweep)) in layout.iter().zip(expected) {
            assert!((start - want_start).abs() < 1e-9);
            assert!((sweep - want_sweep).abs() < 1e-9);
        }
    }

    #[test]
    fn non_positive_wedges_are_dropped() {
        let (mut doc, mut chart) = pie();
        chart.add_wedge("ok", 2.0);
        chart.add_wedge("zero", 0.0);
        chart.add_wedge("neg", -1.0);
        chart.canvas.change_size(100.0, 100.0);
        chart.finalize(&mut doc.scene).unwrap();
        assert_eq!(doc.scene.children(chart.canvas.data).len(), 1);
    }

    #[test]
    fn empty_pie_is_an_error() {
        let (mut doc, mut chart) = pie();
        assert!(matches!(
            chart.finalize(&mut doc.scene),
            Err(Error::EmptyChart { chart: "pie" })
        ));
    }

    #[test]
    fn named_colors_apply_with_default_red_fallback() {
        let (mut doc, mut chart) = pie();
        chart.add_wedge("a", 1.0);
        chart.add_wedge("b", 2.0);
        let mut colors = FxHashMap::default();
        colors.insert("b".to_string(), Color::new(0.0, 0.0, 255.0));
        chart.set_colors(colors);
        chart.canvas.change_size(100.0, 100.0);
        chart.finalize(&mut doc.scene).unwrap();

        let children = doc.scene.children(chart.canvas.data).to_vec();
        let a = doc.scene.node(children[0]);
        let b = doc.scene.node(children[1]);
        assert_eq!(a.style.get("fill").unwrap(), "rgb(255,0,0)");
        assert_eq!(b.style.get("fill").unwrap(), "rgb(0,0,255)");
    }
}
