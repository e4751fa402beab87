//! User-facing graph orchestrators.
//!
//! Each graph owns a document, a settings snapshot, and a chart canvas.
//! Callers feed data through the family-specific methods, optionally set a
//! title and axis labels, and serialize; serialization triggers a one-shot
//! finalize that runs the layout pipeline in a fixed order: data bounds,
//! X-axis band reservation, Y-axis measurement and shift, secondary Y,
//! X-axis build, titles, background stripes, border, then the chart's own
//! finalize (data transform, regression, rebasing, colors).

pub mod bar;
pub mod line;
pub mod pie;
pub mod scatter;

pub use bar::BarGraph;
pub use line::LineChart;
pub use pie::PieChart;
pub use scatter::{DoubleScatterPlot, ScatterPlot};

use crate::axis::{Axis, XAxis, YAxis};
use crate::chart::GraphCanvas;
use crate::script;
use crate::settings::{GraphSettings, Settings, UnifiedSettings};
use crate::Result;
use svgplot_scene::{
    HorizontalAnchor, NodeKind, PrintableCanvas, Text, VerticalAnchor, identity,
};

/// Document frame shared by every graph family: the printable canvas, the
/// resolved shared settings, and the optional title and axis labels.
#[derive(Debug)]
pub(crate) struct Frame {
    pub doc: PrintableCanvas,
    pub graph: GraphSettings,
    pub unified: UnifiedSettings,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub y2_label: Option<String>,
    pub finalized: bool,
}

impl Frame {
    pub fn new(settings: &Settings) -> Result<Self> {
        let graph = GraphSettings::resolve(settings)?;
        let unified = UnifiedSettings::resolve(settings)?;
        let width = graph.fixed_width.unwrap_or(graph.width);
        let mut doc = PrintableCanvas::new(width, graph.height);
        doc.add_script(script::highlight_script());
        doc.add_script(script::tooltip_script(&graph, &unified));
        Ok(Self {
            doc,
            graph,
            unified,
            title: None,
            x_label: None,
            y_label: None,
            y2_label: None,
            finalized: false,
        })
    }

    pub fn width(&self) -> f64 {
        self.graph.fixed_width.unwrap_or(self.graph.width)
    }

    /// Canvas rectangle after reserving the outer margins plus a band for
    /// each label that is actually set.
    pub fn content_rect(&self) -> (f64, f64, f64, f64) {
        let mut x0 = self.graph.left_margin;
        let mut y0 = self.graph.top_margin;
        let mut x1 = self.width() - self.graph.right_margin;
        let mut y1 = self.graph.height - self.graph.bottom_margin;
        if self.title.is_some() {
            y0 += self.graph.title_size + self.graph.title_space;
        }
        if self.x_label.is_some() {
            y1 -= self.graph.x_label_size + self.graph.x_label_space;
        }
        if self.y_label.is_some() {
            x0 += self.graph.y_label_size + self.graph.y_label_space;
        }
        if self.y2_label.is_some() {
            x1 -= self.graph.y2_label_size + self.graph.y2_label_space;
        }
        (x0, y0, x1 - x0, y1 - y0)
    }

    /// Title across the top, X label along the bottom, Y labels rotated a
    /// quarter turn along the sides.
    pub fn draw_titles(&mut self) {
        let root = self.doc.root();
        let width = self.width();
        let height = self.graph.height;
        if let Some(title) = self.title.clone() {
            Text::new(title, width / 2.0, self.graph.top_margin, self.graph.title_size)
                .anchors(HorizontalAnchor::Center, VerticalAnchor::Top)
                .build(&mut self.doc.scene, root);
        }
        if let Some(label) = self.x_label.clone() {
            Text::new(
                label,
                width / 2.0,
                height - self.graph.bottom_margin,
                self.graph.x_label_size,
            )
            .anchors(HorizontalAnchor::Center, VerticalAnchor::Bottom)
            .build(&mut self.doc.scene, root);
        }
        if let Some(label) = self.y_label.clone() {
            let x = self.graph.left_margin;
            let y = height / 2.0;
            let holder = self.rotated_holder(-90.0, x, y);
            Text::new(label, x, y, self.graph.y_label_size)
                .anchors(HorizontalAnchor::Center, VerticalAnchor::Top)
                .build(&mut self.doc.scene, holder);
        }
        if let Some(label) = self.y2_label.clone() {
            let x = width - self.graph.right_margin;
            let y = height / 2.0;
            let holder = self.rotated_holder(90.0, x, y);
            Text::new(label, x, y, self.graph.y2_label_size)
                .anchors(HorizontalAnchor::Center, VerticalAnchor::Top)
                .build(&mut self.doc.scene, holder);
        }
    }

    fn rotated_holder(&mut self, angle: f64, x: f64, y: f64) -> svgplot_scene::NodeId {
        let root = self.doc.root();
        self.doc.scene.add(
            root,
            NodeKind::Group {
                transform: identity(3),
                post_transforms: vec![format!(
                    "rotate({},{},{})",
                    num(angle),
                    num(x),
                    num(y)
                )],
                transparent: false,
            },
        )
    }
}

/// One axis request for the unified layout.
#[derive(Debug)]
pub(crate) enum AxisKind {
    Linear {
        lower: f64,
        upper: f64,
    },
    /// Per-category labels at fixed data positions along `lower..upper`.
    Categories {
        labels: Vec<(String, f64)>,
        lower: f64,
        upper: f64,
        rotated: bool,
    },
}

#[derive(Debug, Default)]
pub(crate) struct AxisPlan {
    pub x: Option<AxisKind>,
    pub y: Option<AxisKind>,
    pub y2: Option<(f64, f64)>,
}

/// Runs the shared layout steps for the axis-bearing graph families. On
/// return the canvas rectangle is final and axes, titles, stripes, and the
/// border are in the scene; the caller finishes with the chart's own
/// finalize.
pub(crate) fn layout_unified(
    frame: &mut Frame,
    canvas: &mut GraphCanvas,
    plan: &AxisPlan,
) -> Result<()> {
    let root = frame.doc.root();
    let (x, y, w, h) = frame.content_rect();
    canvas.move_to(&mut frame.doc.scene, x, y);
    canvas.change_size(w, h);

    // Reserve the bottom band for x-axis text before the y extents freeze.
    if plan.x.is_some() {
        let band = frame.unified.x_axis_text_height + frame.unified.x_axis_space;
        canvas.change_size(canvas.width, canvas.height - band);
    }
    let x_baseline = canvas.y + canvas.height + frame.unified.x_axis_space;

    if let Some(kind) = &plan.y {
        let text_height = frame.unified.y_axis_text_height;
        match kind {
            AxisKind::Linear { lower, upper } => {
                let axis = Axis::new(canvas.y + canvas.height, canvas.y, *lower, *upper, None)?;
                let label_width = YAxis::measure(&axis, text_height);
                shift_past_y_labels(frame, canvas, label_width);
                let label_x = canvas.x - frame.unified.y_axis_space;
                YAxis::render(&mut frame.doc.scene, root, &axis, label_x, text_height, false);
            }
            AxisKind::Categories {
                labels,
                lower,
                upper,
                ..
            } => {
                let widest = labels
                    .iter()
                    .map(|(name, _)| Text::text_width(name, text_height))
                    .fold(0.0, f64::max);
                shift_past_y_labels(frame, canvas, widest);
                let label_x = canvas.x - frame.unified.y_axis_space;
                let group = frame.doc.scene.add(
                    root,
                    NodeKind::Group {
                        transform: identity(3),
                        post_transforms: Vec::new(),
                        transparent: false,
                    },
                );
                frame.doc.scene.node_mut(group).class = Some("y-axis".to_string());
                for (name, value) in labels {
                    let py = canvas.y + canvas.height
                        - (value - lower) / (upper - lower) * canvas.height;
                    Text::new(name.clone(), label_x, py, text_height)
                        .anchors(HorizontalAnchor::Right, VerticalAnchor::Middle)
                        .build(&mut frame.doc.scene, group);
                }
            }
        }
    }

    if let Some((lower, upper)) = plan.y2 {
        let text_height = frame.unified.y2_axis_text_height;
        let axis = Axis::new(canvas.y + canvas.height, canvas.y, lower, upper, None)?;
        let label_width = YAxis::measure(&axis, text_height);
        canvas.change_size(
            canvas.width - label_width - frame.unified.y2_axis_space,
            canvas.height,
        );
        let label_x = canvas.x + canvas.width + frame.unified.y2_axis_space;
        YAxis::render(&mut frame.doc.scene, root, &axis, label_x, text_height, true);
    }

    if let Some(kind) = &plan.x {
        let text_height = frame.unified.x_axis_text_height;
        match kind {
            AxisKind::Linear { lower, upper } => {
                let axis = Axis::new(canvas.x, canvas.x + canvas.width, *lower, *upper, None)?;
                XAxis::render(&mut frame.doc.scene, root, &axis, x_baseline, text_height);
            }
            AxisKind::Categories {
                labels,
                lower,
                upper,
                rotated,
            } => {
                let pixel_labels: Vec<(String, f64)> = labels
                    .iter()
                    .map(|(name, value)| {
                        let px = canvas.x + (value - lower) / (upper - lower) * canvas.width;
                        (name.clone(), px)
                    })
                    .collect();
                XAxis::render_categories(
                    &mut frame.doc.scene,
                    root,
                    &pixel_labels,
                    x_baseline,
                    text_height,
                    *rotated,
                );
            }
        }
    }

    frame.draw_titles();

    if let Some(bounds) = canvas.bounds() {
        canvas.draw_background(&mut frame.doc.scene, &frame.unified, &bounds);
    }
    canvas.draw_border(&mut frame.doc.scene, &frame.unified);
    Ok(())
}

/// Moves the canvas right and narrows it to clear a y-label column.
fn shift_past_y_labels(frame: &mut Frame, canvas: &mut GraphCanvas, label_width: f64) {
    let shift = label_width + frame.unified.y_axis_space;
    canvas.move_to(&mut frame.doc.scene, canvas.x + shift, canvas.y);
    canvas.change_size(canvas.width - shift, canvas.height);
}

fn num(v: f64) -> String {
    let r = (v * 1e6).round() / 1e6;
    format!("{r}")
}
