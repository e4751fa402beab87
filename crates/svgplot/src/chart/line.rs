//! Line canvas: one path per series over sample indices, with a circle at
//! every present sample for tooltip wiring.

use crate::chart::{Bounds, GraphCanvas, inflate};
use crate::{Error, Result};
use rustc_hash::FxHashMap;
use svgplot_scene::{Color, NodeId, NodeKind, PathElement, Scene, Vector, identity};

const POINT_RADIUS: f64 = 2.0;

#[derive(Debug)]
struct Series {
    name: String,
    values: Vec<Option<f64>>,
    path: NodeId,
    points: Vec<NodeId>,
}

#[derive(Debug)]
pub struct LineCanvas {
    pub canvas: GraphCanvas,
    series: Vec<Series>,
    colors: FxHashMap<String, Color>,
}

impl LineCanvas {
    pub fn new(scene: &mut Scene, parent: NodeId) -> Self {
        Self {
            canvas: GraphCanvas::new(scene, parent, 0.0, 0.0, 1.0, 1.0),
            series: Vec::new(),
            colors: FxHashMap::default(),
        }
    }

    /// Adds a series sampled at indices `0..values.len()`. `None` samples
    /// break the line; the next present sample starts a new segment.
    pub fn add_series(&mut self, scene: &mut Scene, name: &str, values: &[Option<f64>]) {
        let group = scene.add(
            self.canvas.data,
            NodeKind::Group {
                transform: identity(3),
                post_transforms: Vec::new(),
                transparent: false,
            },
        );
        scene.node_mut(group).class = Some("series".to_string());

        let mut elements = Vec::new();
        let mut pen_down = false;
        for (i, sample) in values.iter().enumerate() {
            match sample {
                Some(v) => {
                    let p = Vector::new(i as f64, *v);
                    if pen_down {
                        elements.push(PathElement::LineTo(p));
                    } else {
                        elements.push(PathElement::MoveTo(p));
                        pen_down = true;
                    }
                }
                None => pen_down = false,
            }
        }
        let path = scene.add(
            group,
            NodeKind::Path {
                elements,
                closed: false,
                post_transform: None,
            },
        );
        scene.node_mut(path).set_style("fill", "none");

        let point_group = scene.add(
            group,
            NodeKind::Group {
                transform: identity(3),
                post_transforms: Vec::new(),
                transparent: false,
            },
        );
        scene.node_mut(point_group).class = Some("point-group".to_string());
        let mut points = Vec::new();
        for (i, sample) in values.iter().enumerate() {
            let Some(v) = sample else { continue };
            let circle = scene.add(point_group, NodeKind::Circle { r: POINT_RADIUS });
            let node = scene.node_mut(circle);
            node.position = Vector::new(i as f64, *v);
            node.set_attr("has-tooltip", "true");
            node.set_attr("tooltip-text", format!("{name}: {v}"));
            points.push(circle);
        }

        self.series.push(Series {
            name: name.to_string(),
            values: values.to_vec(),
            path,
            points,
        });
    }

    /// Renames the series in order; colors are looked up under the new
    /// names at finalize.
    pub fn set_series_names(&mut self, names: &[&str]) {
        for (series, name) in self.series.iter_mut().zip(names) {
            series.name = (*name).to_string();
        }
    }

    pub fn set_colors(&mut self, colors: FxHashMap<String, Color>) {
        self.colors = colors;
    }

    pub fn series_names(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.name.as_str())
    }

    /// X runs over the sample indices; Y spans the present samples of every
    /// series, padded 5% or widened by one when flat.
    pub fn set_bounds(&mut self) -> Result<Bounds> {
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        let mut max_len = 0usize;
        for series in &self.series {
            max_len = max_len.max(series.values.len());
            for v in series.values.iter().flatten() {
                min_y = min_y.min(*v);
                max_y = max_y.max(*v);
            }
        }
        if max_len < 2 || !min_y.is_finite() {
            return Err(Error::EmptyChart { chart: "line" });
        }
        let (min_y, max_y) = if min_y == max_y {
            (min_y - 1.0, max_y + 1.0)
        } else {
            inflate(min_y, max_y)
        };
        let bounds = Bounds {
            min_x: 0.0,
            max_x: (max_len - 1) as f64,
            min_y,
            max_y,
        };
        self.canvas.set_bounds(bounds);
        Ok(bounds)
    }

    pub fn finalize(&mut self, scene: &mut Scene) -> Result<()> {
        let b = self.canvas.bounds().ok_or(Error::EmptyChart { chart: "line" })?;
        for series in &self.series {
            let color = self
                .colors
                .get(&series.name)
                .copied()
                .unwrap_or(Color::BLACK);
            scene
                .node_mut(series.path)
                .set_style("stroke", color.to_string());
            for point in &series.points {
                scene.node_mut(*point).set_style("fill", color.to_string());
            }
        }
        self.canvas.apply_data_transform(scene, self.canvas.data, &b);
        Ok(())
    }
}
