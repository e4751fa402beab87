//! Chart canvases: the plot-area layer between the scene graph and the
//! graph orchestrators.
//!
//! A [`GraphCanvas`] is a pixel-space group positioned inside the document
//! plus a data group whose 3x3 transform maps data coordinates to canvas
//! pixels. Chart-specific canvases add retained primitives in data space;
//! the transform is assigned once at finalize, and serialization resolves
//! every child through it.

pub mod bar;
pub mod line;
pub mod pie;
pub mod scatter;

pub use bar::BarCanvas;
pub use line::LineCanvas;
pub use pie::PieCanvas;
pub use scatter::{DoubleScatterCanvas, ScatterCanvas};

use crate::settings::{BarDirection, UnifiedSettings};
use svgplot_scene::{Matrix, NodeId, NodeKind, Scene, Vector, identity};

/// Fraction added to each side of the data extent so markers at the edge
/// stay inside the canvas.
pub const BOUNDS_PADDING: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Widens `[min, max]` by [`BOUNDS_PADDING`] on each side.
pub fn inflate(min: f64, max: f64) -> (f64, f64) {
    let pad = (max - min) * BOUNDS_PADDING;
    (min - pad, max + pad)
}

#[derive(Debug)]
pub struct GraphCanvas {
    /// Pixel-space group translated to `(x, y)`.
    pub group: NodeId,
    /// Data group; carries the data-to-pixel transform after finalize.
    pub data: NodeId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    bounds: Option<Bounds>,
}

impl GraphCanvas {
    pub fn new(scene: &mut Scene, parent: NodeId, x: f64, y: f64, width: f64, height: f64) -> Self {
        let group = scene.add(
            parent,
            NodeKind::Group {
                transform: Matrix::translation(x, y),
                post_transforms: Vec::new(),
                transparent: false,
            },
        );
        scene.node_mut(group).class = Some("graph-canvas".to_string());
        let data = Self::data_group(scene, group);
        Self {
            group,
            data,
            x,
            y,
            width,
            height,
            bounds: None,
        }
    }

    /// A second data group for charts with an independent value axis.
    pub fn add_data_group(&self, scene: &mut Scene) -> NodeId {
        Self::data_group(scene, self.group)
    }

    fn data_group(scene: &mut Scene, parent: NodeId) -> NodeId {
        let data = scene.add(
            parent,
            NodeKind::Group {
                transform: identity(3),
                post_transforms: Vec::new(),
                transparent: false,
            },
        );
        scene.node_mut(data).class = Some("data".to_string());
        data
    }

    pub fn move_to(&mut self, scene: &mut Scene, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        scene.set_group_transform(self.group, Matrix::translation(x, y));
    }

    pub fn change_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Data bounds are established exactly once, before layout continues.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        debug_assert!(self.bounds.is_none(), "bounds already set");
        self.bounds = Some(bounds);
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// The affine mapping data space onto canvas pixels: translate the
    /// lower-left data corner to the origin, scale to pixel extents, then
    /// flip Y so larger values render upward.
    pub fn make_transform(&self, b: &Bounds) -> Matrix {
        let t1 = Matrix::translation(-b.min_x, -b.min_y);
        let t2 = Matrix::scaling(self.width / b.width(), self.height / b.height());
        let mut t3 = Matrix::new(3, 3);
        t3.set(1, 1, -1.0);
        t3.set(1, 2, self.height);
        t3.mul(&t2).and_then(|m| m.mul(&t1)).expect("3x3 chain")
    }

    pub fn apply_data_transform(&self, scene: &mut Scene, data: NodeId, b: &Bounds) {
        let transform = self.make_transform(b);
        scene.set_group_transform(data, transform);
    }

    /// Alternating background stripes, inserted at the front of the data
    /// group so they render below every data element. Stripes live in data
    /// space and ride the same transform as the data.
    pub fn draw_background(&self, scene: &mut Scene, unified: &UnifiedSettings, b: &Bounds) {
        if !unified.bg || unified.bg_bars == 0 {
            return;
        }
        let n = unified.bg_bars;
        for i in 0..n {
            let (position, width, height) = match unified.bg_bar_dir {
                BarDirection::Horizontal => {
                    let band = b.height() / n as f64;
                    // Count bands from the top of the canvas.
                    let y = b.max_y - (i + 1) as f64 * band;
                    (Vector::new(b.min_x, y), b.width(), band)
                }
                BarDirection::Vertical => {
                    let band = b.width() / n as f64;
                    let x = b.min_x + i as f64 * band;
                    (Vector::new(x, b.min_y), band, b.height())
                }
            };
            let color = if i % 2 == 0 {
                unified.bg_color1
            } else {
                unified.bg_color2
            };
            let stripe = scene.add_detached(NodeKind::Rect {
                width,
                height,
                absolute_size: false,
                world_dx: 0.0,
                world_dy: 0.0,
            });
            {
                let node = scene.node_mut(stripe);
                node.position = position;
                node.class = Some("background".to_string());
                node.set_style("fill", color.to_string());
            }
            scene.insert(self.data, i, stripe);
        }
    }

    /// Canvas border in pixel space, drawn above the data.
    pub fn draw_border(&self, scene: &mut Scene, unified: &UnifiedSettings) {
        if !unified.canvas_border {
            return;
        }
        let border = scene.add(
            self.group,
            NodeKind::Rect {
                width: self.width,
                height: self.height,
                absolute_size: false,
                world_dx: 0.0,
                world_dy: 0.0,
            },
        );
        let node = scene.node_mut(border);
        node.class = Some("canvas-border".to_string());
        node.set_style("fill", "none");
        node.set_style("stroke", unified.canvas_border_color.to_string());
        node.set_style("strokeWidth", unified.canvas_border_width.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgplot_scene::PrintableCanvas;

    fn canvas() -> (PrintableCanvas, GraphCanvas) {
        let mut doc = PrintableCanvas::new(300.0, 200.0);
        let root = doc.root();
        let gc = GraphCanvas::new(&mut doc.scene, root, 0.0, 0.0, 100.0, 100.0);
        (doc, gc)
    }

    #[test]
    fn transform_maps_bounds_corners_to_canvas_corners() {
        let (_, gc) = canvas();
        let b = Bounds {
            min_x: 10.0,
            max_x: 20.0,
            min_y: 0.0,
            max_y: 50.0,
        };
        let t = gc.make_transform(&b);
        // Lower-left data corner lands at the bottom-left pixel corner.
        assert_eq!(t.apply_point(Vector::new(10.0, 0.0)), Vector::new(0.0, 100.0));
        // Upper-right corner lands at the top-right.
        assert_eq!(t.apply_point(Vector::new(20.0, 50.0)), Vector::new(100.0, 0.0));
    }

    #[test]
    fn inflate_widens_by_five_percent() {
        let (lo, hi) = inflate(0.0, 100.0);
        assert_eq!(lo, -5.0);
        assert_eq!(hi, 105.0);
    }

    #[test]
    fn background_stripes_lead_the_data_group() {
        let (mut doc, gc) = canvas();
        let marker = doc.scene.add(gc.data, NodeKind::Circle { r: 1.0 });
        let b = Bounds {
            min_x: 0.0,
            max_x: 10.0,
            min_y: 0.0,
            max_y: 10.0,
        };
        let unified = UnifiedSettings::resolve(&crate::Settings::new()).unwrap();
        gc.draw_background(&mut doc.scene, &unified, &b);

        let children = doc.scene.children(gc.data);
        assert_eq!(children.len(), 7);
        assert_eq!(*children.last().unwrap(), marker);
        let first = doc.scene.node(children[0]);
        assert_eq!(first.style.get("fill").unwrap(), "rgb(239,239,239)");
    }
}
