//! Scatter canvases: retained markers in data space, with regression lines
//! and per-point coloring applied at finalize.

use crate::chart::{Bounds, GraphCanvas, inflate};
use crate::regression;
use crate::settings::{ColorScheme, MarkerType, ScatterSettings};
use crate::{Error, Result};
use svgplot_scene::{Color, NodeId, NodeKind, Scene, Vector};

#[derive(Debug)]
struct Marker {
    x: f64,
    y: f64,
    node: NodeId,
}

#[derive(Debug)]
pub struct ScatterCanvas {
    pub canvas: GraphCanvas,
    /// Marker group nested inside the data group, so background stripes
    /// inserted at the front of the data group stay below the regression
    /// line and markers.
    pub series: NodeId,
    settings: ScatterSettings,
    markers: Vec<Marker>,
}

impl ScatterCanvas {
    pub fn new(scene: &mut Scene, parent: NodeId, settings: ScatterSettings) -> Self {
        let canvas = GraphCanvas::new(scene, parent, 0.0, 0.0, 1.0, 1.0);
        let series = series_group(scene, canvas.data);
        Self {
            canvas,
            series,
            settings,
            markers: Vec::new(),
        }
    }

    pub fn add_point(&mut self, scene: &mut Scene, x: f64, y: f64, label: Option<&str>) {
        let node = add_marker(scene, self.series, &self.settings, x, y, label);
        self.markers.push(Marker { x, y, node });
    }

    /// Computes and stores the padded data bounds.
    pub fn set_bounds(&mut self) -> Result<Bounds> {
        let bounds = marker_bounds(self.markers.iter().map(|m| (m.x, m.y)), "scatter")?;
        self.canvas.set_bounds(bounds);
        Ok(bounds)
    }

    /// Colors the markers, draws the regression line below them, and
    /// assigns the data transform. Runs once, after layout has fixed the
    /// canvas rectangle.
    pub fn finalize(&mut self, scene: &mut Scene) -> Result<()> {
        let b = self.canvas.bounds().ok_or(Error::EmptyChart { chart: "scatter" })?;
        if self.settings.regression {
            let pairs: Vec<_> = self.markers.iter().map(|m| (m.x, m.y)).collect();
            let fit = regression::least_squares(&pairs)?;
            draw_regression(scene, self.series, &self.settings, &b, &fit);
        }
        color_markers(scene, &self.settings, &b, &self.markers)?;
        self.canvas.apply_data_transform(scene, self.canvas.data, &b);
        Ok(())
    }
}

/// Two marker series sharing an x extent but scaled against independent y
/// axes. The second series gets its own data group and transform.
#[derive(Debug)]
pub struct DoubleScatterCanvas {
    pub canvas: GraphCanvas,
    pub data2: NodeId,
    series1: NodeId,
    series2: NodeId,
    settings: ScatterSettings,
    markers1: Vec<Marker>,
    markers2: Vec<Marker>,
    bounds2: Option<Bounds>,
}

impl DoubleScatterCanvas {
    pub fn new(scene: &mut Scene, parent: NodeId, settings: ScatterSettings) -> Self {
        let canvas = GraphCanvas::new(scene, parent, 0.0, 0.0, 1.0, 1.0);
        let data2 = canvas.add_data_group(scene);
        let series1 = series_group(scene, canvas.data);
        let series2 = series_group(scene, data2);
        Self {
            canvas,
            data2,
            series1,
            series2,
            settings,
            markers1: Vec::new(),
            markers2: Vec::new(),
            bounds2: None,
        }
    }

    pub fn add_point(&mut self, scene: &mut Scene, x: f64, y: f64, label: Option<&str>) {
        let node = add_marker(scene, self.series1, &self.settings, x, y, label);
        self.markers1.push(Marker { x, y, node });
    }

    pub fn add_point2(&mut self, scene: &mut Scene, x: f64, y: f64, label: Option<&str>) {
        let node = add_marker(scene, self.series2, &self.settings, x, y, label);
        self.markers2.push(Marker { x, y, node });
    }

    /// Bounds share the union of both x extents; each series keeps its own
    /// y extent. Returns `(primary, secondary)`.
    pub fn set_bounds(&mut self) -> Result<(Bounds, Bounds)> {
        let b1 = marker_bounds(self.markers1.iter().map(|m| (m.x, m.y)), "doubleScatter")?;
        let b2 = marker_bounds(self.markers2.iter().map(|m| (m.x, m.y)), "doubleScatter")?;
        let min_x = b1.min_x.min(b2.min_x);
        let max_x = b1.max_x.max(b2.max_x);
        let b1 = Bounds { min_x, max_x, ..b1 };
        let b2 = Bounds { min_x, max_x, ..b2 };
        self.canvas.set_bounds(b1);
        self.bounds2 = Some(b2);
        Ok((b1, b2))
    }

    pub fn finalize(&mut self, scene: &mut Scene) -> Result<()> {
        let b1 = self
            .canvas
            .bounds()
            .ok_or(Error::EmptyChart { chart: "doubleScatter" })?;
        let b2 = self.bounds2.ok_or(Error::EmptyChart { chart: "doubleScatter" })?;
        if self.settings.regression {
            let pairs: Vec<_> = self.markers1.iter().map(|m| (m.x, m.y)).collect();
            let fit = regression::least_squares(&pairs)?;
            draw_regression(scene, self.series1, &self.settings, &b1, &fit);
            let pairs: Vec<_> = self.markers2.iter().map(|m| (m.x, m.y)).collect();
            let fit = regression::least_squares(&pairs)?;
            draw_regression(scene, self.series2, &self.settings, &b2, &fit);
        }
        color_markers(scene, &self.settings, &b1, &self.markers1)?;
        color_markers(scene, &self.settings, &b2, &self.markers2)?;
        self.canvas.apply_data_transform(scene, self.canvas.data, &b1);
        self.canvas.apply_data_transform(scene, self.data2, &b2);
        Ok(())
    }
}

fn series_group(scene: &mut Scene, data: NodeId) -> NodeId {
    let group = scene.add(
        data,
        NodeKind::Group {
            transform: svgplot_scene::identity(3),
            post_transforms: Vec::new(),
            transparent: false,
        },
    );
    scene.node_mut(group).class = Some("series".to_string());
    group
}

fn add_marker(
    scene: &mut Scene,
    data: NodeId,
    settings: &ScatterSettings,
    x: f64,
    y: f64,
    label: Option<&str>,
) -> NodeId {
    let size = settings.marker_size;
    let kind = match settings.marker_type {
        MarkerType::Circle => NodeKind::Circle { r: size },
        // Squares keep their pixel size; only the position rides the
        // transform, and the world deltas re-center on the point.
        MarkerType::Square => NodeKind::Rect {
            width: size * 2.0,
            height: size * 2.0,
            absolute_size: true,
            world_dx: -size,
            world_dy: -size,
        },
    };
    let node = scene.add(data, kind);
    let marker = scene.node_mut(node);
    marker.class = Some("marker".to_string());
    marker.position = Vector::new(x, y);
    if let Some(text) = label {
        marker.set_attr("has-tooltip", "true");
        marker.set_attr("tooltip-text", text);
    }
    node
}

fn marker_bounds(
    points: impl Iterator<Item = (f64, f64)>,
    chart: &'static str,
) -> Result<Bounds> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut seen = false;
    for (x, y) in points {
        seen = true;
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if !seen {
        return Err(Error::EmptyChart { chart });
    }
    let (min_x, max_x) = inflate(min_x, max_x);
    let (min_y, max_y) = inflate(min_y, max_y);
    Ok(Bounds {
        min_x,
        max_x,
        min_y,
        max_y,
    })
}

/// Regression line across the full x extent, inserted below the markers.
fn draw_regression(
    scene: &mut Scene,
    data: NodeId,
    settings: &ScatterSettings,
    b: &Bounds,
    fit: &regression::Ols,
) {
    let line = scene.add_detached(NodeKind::Line {
        p1: Vector::new(b.min_x, fit.at(b.min_x)),
        p2: Vector::new(b.max_x, fit.at(b.max_x)),
    });
    {
        let node = scene.node_mut(line);
        node.class = Some("regression".to_string());
        node.set_style("stroke", settings.reg_line_color.to_string());
        node.set_style("strokeWidth", settings.reg_line_width.to_string());
    }
    scene.insert(data, 0, line);
}

fn color_markers(
    scene: &mut Scene,
    settings: &ScatterSettings,
    b: &Bounds,
    markers: &[Marker],
) -> Result<()> {
    for marker in markers {
        let fill = match settings.color_scheme {
            ColorScheme::Solid => settings.color1,
            ColorScheme::TripleAxis => triple_axis_color(settings, b, marker.x, marker.y)?,
        };
        let highlight = fill.lighten(0.35)?;
        let node = scene.node_mut(marker.node);
        node.set_style("fill", fill.to_string());
        node.set_attr("has-highlight", "true");
        node.set_attr("highlight-fill", highlight.to_string());
    }
    Ok(())
}

/// Blends the three scheme colors by the point's normalized position: the
/// x fraction pulls color2 toward color3, the y fraction pulls color2
/// toward color1, and the two blends meet halfway.
fn triple_axis_color(settings: &ScatterSettings, b: &Bounds, x: f64, y: f64) -> Result<Color> {
    let per_x = (x - b.min_x) / b.width();
    let per_y = (y - b.min_y) / b.height();
    let c1 = settings.color2.interpolate(settings.color3, per_x)?;
    let c2 = settings.color2.interpolate(settings.color1, per_y)?;
    Ok(c1.interpolate(c2, (per_y + (1.0 - per_x)) / 2.0)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use svgplot_scene::PrintableCanvas;

    fn scatter(pairs: &[(&str, &str)]) -> (PrintableCanvas, ScatterCanvas) {
        let settings = ScatterSettings::resolve(&Settings::from_map(pairs.iter().copied())).unwrap();
        let mut doc = PrintableCanvas::new(300.0, 200.0);
        let root = doc.root();
        let chart = ScatterCanvas::new(&mut doc.scene, root, settings);
        (doc, chart)
    }

    #[test]
    fn bounds_pad_the_extent() {
        let (mut doc, mut chart) = scatter(&[]);
        chart.add_point(&mut doc.scene, 0.0, 0.0, None);
        chart.add_point(&mut doc.scene, 10.0, 20.0, None);
        let b = chart.set_bounds().unwrap();
        assert_eq!(b.min_x, -0.5);
        assert_eq!(b.max_x, 10.5);
        assert_eq!(b.min_y, -1.0);
        assert_eq!(b.max_y, 21.0);
    }

    #[test]
    fn empty_chart_has_no_bounds() {
        let (_, mut chart) = scatter(&[]);
        assert!(matches!(
            chart.set_bounds(),
            Err(Error::EmptyChart { chart: "scatter" })
        ));
    }

    #[test]
    fn regression_line_leads_the_series_group() {
        let (mut doc, mut chart) = scatter(&[]);
        for (x, y) in [(1.0, 10.0), (2.0, 20.0), (3.0, 30.0), (4.0, 40.0)] {
            chart.add_point(&mut doc.scene, x, y, None);
        }
        chart.set_bounds().unwrap();
        chart.canvas.change_size(100.0, 100.0);
        chart.finalize(&mut doc.scene).unwrap();

        let children: Vec<_> = doc.scene.children(chart.series).to_vec();
        assert_eq!(children.len(), 5);
        let first = doc.scene.node(children[0]);
        assert_eq!(first.class.as_deref(), Some("regression"));
        // The fit renders as a line spanning the padded x extent.
        let b = chart.canvas.bounds().unwrap();
        match &first.kind {
            NodeKind::Line { p1, p2 } => {
                assert!((p1.x - b.min_x).abs() < 1e-9);
                assert!((p2.x - b.max_x).abs() < 1e-9);
                assert!((p1.y - 10.0 * b.min_x).abs() < 1e-6);
                assert!((p2.y - 10.0 * b.max_x).abs() < 1e-6);
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn regression_can_be_disabled() {
        let (mut doc, mut chart) = scatter(&[("regression", "false")]);
        chart.add_point(&mut doc.scene, 1.0, 1.0, None);
        chart.add_point(&mut doc.scene, 2.0, 5.0, None);
        chart.set_bounds().unwrap();
        chart.canvas.change_size(100.0, 100.0);
        chart.finalize(&mut doc.scene).unwrap();
        assert_eq!(doc.scene.children(chart.series).len(), 2);
    }

    #[test]
    fn solid_scheme_paints_color1() {
        let (mut doc, mut chart) = scatter(&[
            ("colorScheme", "solid"),
            ("color1", "#ff8000"),
            ("regression", "false"),
        ]);
        chart.add_point(&mut doc.scene, 0.0, 0.0, None);
        chart.add_point(&mut doc.scene, 1.0, 1.0, None);
        chart.set_bounds().unwrap();
        chart.canvas.change_size(100.0, 100.0);
        chart.finalize(&mut doc.scene).unwrap();

        let node = doc.scene.node(doc.scene.children(chart.series)[0]);
        assert_eq!(node.style.get("fill").unwrap(), "rgb(255,128,0)");
        assert!(node.attrs.contains_key("has-highlight"));
    }

    #[test]
    fn triple_axis_blends_toward_corners() {
        let settings = ScatterSettings::resolve(&Settings::new()).unwrap();
        let b = Bounds {
            min_x: 0.0,
            max_x: 1.0,
            min_y: 0.0,
            max_y: 1.0,
        };
        // Center of the range blends all three scheme colors evenly.
        let mid = triple_axis_color(&settings, &b, 0.5, 0.5).unwrap();
        let c1 = settings.color2.interpolate(settings.color3, 0.5).unwrap();
        let c2 = settings.color2.interpolate(settings.color1, 0.5).unwrap();
        assert_eq!(mid, c1.interpolate(c2, 0.5).unwrap());
    }

    #[test]
    fn triple_axis_rejects_points_outside_the_bounds() {
        let settings = ScatterSettings::resolve(&Settings::new()).unwrap();
        let b = Bounds {
            min_x: 0.0,
            max_x: 1.0,
            min_y: 0.0,
            max_y: 1.0,
        };
        // Fractions beyond [0, 1] surface as a scene error.
        assert!(matches!(
            triple_axis_color(&settings, &b, 2.0, 0.5),
            Err(Error::Scene(_))
        ));
    }

    #[test]
    fn square_markers_keep_pixel_size() {
        let (mut doc, mut chart) = scatter(&[("markerType", "square"), ("markerSize", "3")]);
        chart.add_point(&mut doc.scene, 5.0, 5.0, Some("p"));
        let node = doc.scene.node(doc.scene.children(chart.series)[0]);
        match &node.kind {
            NodeKind::Rect {
                width,
                height,
                absolute_size,
                world_dx,
                world_dy,
            } => {
                assert_eq!((*width, *height), (6.0, 6.0));
                assert!(absolute_size);
                assert_eq!((*world_dx, *world_dy), (-3.0, -3.0));
            }
            other => panic!("expected rect, got {other:?}"),
        }
        assert_eq!(node.attrs.get("tooltip-text").unwrap(), "p");
    }

    #[test]
    fn double_scatter_shares_the_x_extent() {
        let settings = ScatterSettings::resolve(&Settings::new()).unwrap();
        let mut doc = PrintableCanvas::new(300.0, 200.0);
        let root = doc.root();
        let mut chart = DoubleScatterCanvas::new(&mut doc.scene, root, settings);
        chart.add_point(&mut doc.scene, 0.0, 0.0, None);
        chart.add_point(&mut doc.scene, 4.0, 10.0, None);
        chart.add_point2(&mut doc.scene, 2.0, 100.0, None);
        chart.add_point2(&mut doc.scene, 8.0, 300.0, None);

        let (b1, b2) = chart.set_bounds().unwrap();
        assert_eq!(b1.min_x, b2.min_x);
        assert_eq!(b1.max_x, b2.max_x);
        // x extent is the union of the two padded series extents.
        assert!((b1.min_x + 0.2).abs() < 1e-9);
        assert!((b1.max_x - 8.3).abs() < 1e-9);
        assert_eq!(b1.max_y, 10.5);
        assert_eq!(b2.max_y, 310.0);
    }
}
