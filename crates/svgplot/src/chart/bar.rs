//! Bar canvas: rectangles placed along a running category cursor, rebased
//! at finalize so every bar stands on the displayed minimum.

use crate::chart::{Bounds, GraphCanvas, inflate};
use crate::settings::BarSettings;
use crate::{Error, Result};
use rustc_hash::FxHashMap;
use svgplot_scene::{Color, NodeId, NodeKind, Scene, Vector};

#[derive(Debug)]
struct Bar {
    name: String,
    value: f64,
    /// Category-axis position of the bar's leading edge.
    position: f64,
    node: NodeId,
}

#[derive(Debug)]
pub struct BarCanvas {
    pub canvas: GraphCanvas,
    settings: BarSettings,
    bars: Vec<Bar>,
    cursor: f64,
    colors: FxHashMap<String, Color>,
}

impl BarCanvas {
    pub fn new(scene: &mut Scene, parent: NodeId, settings: BarSettings) -> Self {
        Self {
            canvas: GraphCanvas::new(scene, parent, 0.0, 0.0, 1.0, 1.0),
            settings,
            bars: Vec::new(),
            cursor: 0.0,
            colors: FxHashMap::default(),
        }
    }

    pub fn add_bar(&mut self, scene: &mut Scene, name: &str, value: f64) {
        let position = self.cursor;
        self.cursor += self.settings.bar_width + self.settings.bar_spacing;
        // Placeholder geometry; finalize rebases onto the value minimum.
        let kind = if self.settings.horizontal {
            NodeKind::Rect {
                width: value,
                height: self.settings.bar_width,
                absolute_size: false,
                world_dx: 0.0,
                world_dy: 0.0,
            }
        } else {
            NodeKind::Rect {
                width: self.settings.bar_width,
                height: value,
                absolute_size: false,
                world_dx: 0.0,
                world_dy: 0.0,
            }
        };
        let node = scene.add(self.canvas.data, kind);
        let rect = scene.node_mut(node);
        rect.class = Some("bar".to_string());
        rect.set_attr("has-tooltip", "true");
        rect.set_attr("tooltip-text", format!("{name}: {value}"));
        self.bars.push(Bar {
            name: name.to_string(),
            value,
            position,
            node,
        });
    }

    /// A named cluster of bars followed by a blank separator.
    pub fn add_group(&mut self, scene: &mut Scene, name: &str, items: &[(&str, f64)]) {
        for (key, value) in items {
            self.add_bar(scene, &format!("{name} {key}"), *value);
        }
        self.add_space();
    }

    pub fn add_space(&mut self) {
        self.cursor += self.settings.blank_space;
    }

    pub fn set_colors(&mut self, colors: FxHashMap<String, Color>) {
        self.colors = colors;
    }

    pub fn is_horizontal(&self) -> bool {
        self.settings.horizontal
    }

    /// Center of each bar along the category axis, for axis labels.
    pub fn category_centers(&self) -> Vec<(String, f64)> {
        self.bars
            .iter()
            .map(|b| (b.name.clone(), b.position + self.settings.bar_width / 2.0))
            .collect()
    }

    /// Category extent runs from zero through the trailing edge of the last
    /// bar; the value extent is padded 5%, or widened by one on each side
    /// when all values coincide.
    pub fn set_bounds(&mut self) -> Result<Bounds> {
        if self.bars.is_empty() {
            return Err(Error::EmptyChart { chart: "bar" });
        }
        let span = self.cursor - self.settings.bar_spacing;
        let mut min_v = f64::INFINITY;
        let mut max_v = f64::NEG_INFINITY;
        for bar in &self.bars {
            min_v = min_v.min(bar.value);
            max_v = max_v.max(bar.value);
        }
        let (min_v, max_v) = if min_v == max_v {
            (min_v - 1.0, max_v + 1.0)
        } else {
            inflate(min_v, max_v)
        };
        let bounds = if self.settings.horizontal {
            Bounds {
                min_x: min_v,
                max_x: max_v,
                min_y: 0.0,
                max_y: span,
            }
        } else {
            Bounds {
                min_x: 0.0,
                max_x: span,
                min_y: min_v,
                max_y: max_v,
            }
        };
        self.canvas.set_bounds(bounds);
        Ok(bounds)
    }

    pub fn finalize(&mut self, scene: &mut Scene) -> Result<()> {
        let b = self.canvas.bounds().ok_or(Error::EmptyChart { chart: "bar" })?;
        let base = if self.settings.horizontal { b.min_x } else { b.min_y };
        for bar in &self.bars {
            let fill = self.colors.get(&bar.name).copied().unwrap_or(self.settings.bar_color);
            let highlight = fill.lighten(0.35)?;
            let node = scene.node_mut(bar.node);
            // Rebase so the bar stands on the displayed minimum.
            if self.settings.horizontal {
                node.position = Vector::new(base, bar.position);
                if let NodeKind::Rect { width, .. } = &mut node.kind {
                    *width = bar.value - base;
                }
            } else {
                node.position = Vector::new(bar.position, base);
                if let NodeKind::Rect { height, .. } = &mut node.kind {
                    *height = bar.value - base;
                }
            }
            node.set_style("fill", fill.to_string());
            node.set_attr("has-highlight", "true");
            node.set_attr("highlight-fill", highlight.to_string());
        }
        self.canvas.apply_data_transform(scene, self.canvas.data, &b);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use svgplot_scene::PrintableCanvas;

    fn bar_chart(pairs: &[(&str, &str)]) -> (PrintableCanvas, BarCanvas) {
        let settings = BarSettings::resolve(&Settings::from_map(pairs.iter().copied())).unwrap();
        let mut doc = PrintableCanvas::new(300.0, 200.0);
        let root = doc.root();
        let chart = BarCanvas::new(&mut doc.scene, root, settings);
        (doc, chart)
    }

    #[test]
    fn cursor_advances_by_width_spacing_and_blanks() {
        let (mut doc, mut chart) = bar_chart(&[]);
        chart.add_bar(&mut doc.scene, "A", 5.0);
        chart.add_bar(&mut doc.scene, "B", 3.0);
        chart.add_space();
        chart.add_bar(&mut doc.scene, "C", 7.0);

        let positions: Vec<f64> = chart.bars.iter().map(|b| b.position).collect();
        assert!((positions[0] - 0.0).abs() < 1e-9);
        assert!((positions[1] - 1.1).abs() < 1e-9);
        assert!((positions[2] - 2.7).abs() < 1e-9);
    }

    #[test]
    fn bounds_pad_the_value_extent() {
        let (mut doc, mut chart) = bar_chart(&[]);
        chart.add_bar(&mut doc.scene, "A", 5.0);
        chart.add_bar(&mut doc.scene, "B", 3.0);
        chart.add_space();
        chart.add_bar(&mut doc.scene, "C", 7.0);
        let b = chart.set_bounds().unwrap();
        assert_eq!(b.min_x, 0.0);
        assert!((b.max_x - 3.7).abs() < 1e-9);
        assert!((b.min_y - 2.8).abs() < 1e-9);
        assert!((b.max_y - 7.2).abs() < 1e-9);
    }

    #[test]
    fn equal_values_widen_by_one() {
        let (mut doc, mut chart) = bar_chart(&[]);
        chart.add_bar(&mut doc.scene, "A", 5.0);
        let b = chart.set_bounds().unwrap();
        assert_eq!(b.min_y, 4.0);
        assert_eq!(b.max_y, 6.0);
    }

    #[test]
    fn finalize_rebases_bars_onto_the_minimum() {
        let (mut doc, mut chart) = bar_chart(&[]);
        chart.add_bar(&mut doc.scene, "A", 5.0);
        chart.add_bar(&mut doc.scene, "B", 3.0);
        let b = chart.set_bounds().unwrap();
        chart.canvas.change_size(100.0, 100.0);
        chart.finalize(&mut doc.scene).unwrap();

        let node = doc.scene.node(chart.bars[0].node);
        assert!((node.position.y - b.min_y).abs() < 1e-9);
        match &node.kind {
            NodeKind::Rect { height, .. } => assert!((height - (5.0 - b.min_y)).abs() < 1e-9),
            other => panic!("expected rect, got {other:?}"),
        }
    }

    #[test]
    fn horizontal_bars_swap_the_roles() {
        let (mut doc, mut chart) = bar_chart(&[("horizontal", "true")]);
        chart.add_bar(&mut doc.scene, "A", 10.0);
        chart.add_bar(&mut doc.scene, "B", 4.0);
        let b = chart.set_bounds().unwrap();
        assert_eq!(b.min_y, 0.0);
        assert!((b.max_y - 2.1).abs() < 1e-9);
        chart.canvas.change_size(100.0, 100.0);
        chart.finalize(&mut doc.scene).unwrap();
        let node = doc.scene.node(chart.bars[1].node);
        match &node.kind {
            NodeKind::Rect { width, height, .. } => {
                assert!((width - (4.0 - b.min_x)).abs() < 1e-9);
                assert_eq!(*height, 1.0);
            }
            other => panic!("expected rect, got {other:?}"),
        }
    }

    #[test]
    fn named_colors_override_the_default() {
        let (mut doc, mut chart) = bar_chart(&[]);
        chart.add_bar(&mut doc.scene, "A", 5.0);
        chart.add_bar(&mut doc.scene, "B", 3.0);
        let mut colors = FxHashMap::default();
        colors.insert("A".to_string(), Color::new(0.0, 128.0, 0.0));
        chart.set_colors(colors);
        chart.set_bounds().unwrap();
        chart.canvas.change_size(100.0, 100.0);
        chart.finalize(&mut doc.scene).unwrap();

        let a = doc.scene.node(chart.bars[0].node);
        let b = doc.scene.node(chart.bars[1].node);
        assert_eq!(a.style.get("fill").unwrap(), "rgb(0,128,0)");
        assert_eq!(b.style.get("fill").unwrap(), "rgb(210,10,10)");
    }

    #[test]
    fn groups_separate_with_a_blank() {
        let (mut doc, mut chart) = bar_chart(&[]);
        chart.add_group(&mut doc.scene, "Q1", &[("a", 1.0), ("b", 2.0)]);
        chart.add_bar(&mut doc.scene, "solo", 3.0);
        // Two group bars, a blank, then the solo bar.
        assert!((chart.bars[2].position - 2.7).abs() < 1e-9);
        let centers = chart.category_centers();
        assert_eq!(centers[0].0, "Q1 a");
        assert!((centers[0].1 - 0.5).abs() < 1e-9);
    }
}
