//! Axis tick selection and rendering.
//!
//! Tick increments come from a decade walk over the data range: find the
//! power of ten just below the range, then refine: drop a decade if fewer
//! than two ticks result, halve while fewer than five. The generated tick
//! list runs from the largest multiple of the increment at or below the
//! lower bound through the first multiple beyond the upper bound; renderers
//! skip ticks whose pixel position falls outside the axis extent.

use crate::{Error, Result};
use svgplot_scene::{
    HorizontalAnchor, Matrix, NodeId, NodeKind, Scene, Text, VerticalAnchor, identity,
};

#[derive(Debug, Clone)]
pub struct Axis {
    /// Pixel extent of the lower data bound.
    pub inf: f64,
    /// Pixel extent of the upper data bound.
    pub sup: f64,
    pub lower: f64,
    pub upper: f64,
    pub increment: f64,
    pub ticks: Vec<f64>,
}

impl Axis {
    /// Builds an axis over `[lower, upper]` mapped onto pixels
    /// `[inf, sup]`. An explicit increment bypasses the decade walk.
    pub fn new(inf: f64, sup: f64, lower: f64, upper: f64, increment: Option<f64>) -> Result<Self> {
        if lower == upper {
            return Err(Error::DegenerateAxis { value: lower });
        }
        let (increment, ticks) = match increment {
            Some(inc) => (inc, generate_ticks(lower, upper, inc)),
            None => choose_increment(lower, upper),
        };
        Ok(Self {
            inf,
            sup,
            lower,
            upper,
            increment,
            ticks,
        })
    }

    /// Linear interpolation of a data value into the pixel extent.
    pub fn pixel_of(&self, value: f64) -> f64 {
        self.inf + (value - self.lower) / (self.upper - self.lower) * (self.sup - self.inf)
    }

    fn in_range(&self, value: f64) -> bool {
        let eps = self.increment * 1e-9;
        value >= self.lower - eps && value <= self.upper + eps
    }
}

fn generate_ticks(lower: f64, upper: f64, increment: f64) -> Vec<f64> {
    let start = (lower / increment).floor() * increment;
    let mut ticks = Vec::new();
    let mut k = 0u32;
    loop {
        let v = start + f64::from(k) * increment;
        ticks.push(v);
        if v > upper {
            break;
        }
        k += 1;
    }
    ticks
}

fn choose_increment(lower: f64, upper: f64) -> (f64, Vec<f64>) {
    let range = upper - lower;
    let mut exponent = 0i32;
    if range / 10f64.powi(exponent) < 1.0 {
        while range / 10f64.powi(exponent) < 1.0 {
            exponent -= 1;
        }
    } else {
        while range / 10f64.powi(exponent) > 1.0 {
            exponent += 1;
        }
        exponent -= 1;
    }

    let mut increment = 10f64.powi(exponent);
    let mut ticks = generate_ticks(lower, upper, increment);
    while ticks.len() < 2 {
        exponent -= 1;
        increment = 10f64.powi(exponent);
        ticks = generate_ticks(lower, upper, increment);
    }
    while ticks.len() < 5 {
        increment /= 2.0;
        ticks = generate_ticks(lower, upper, increment);
    }
    (increment, ticks)
}

/// Trims a tick value for display.
pub fn tick_label(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    let mut s = format!("{rounded}");
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

#[derive(Debug)]
pub struct XAxis;

impl XAxis {
    /// Renders a horizontal row of tick labels along `y`; returns the axis
    /// group.
    pub fn render(scene: &mut Scene, parent: NodeId, axis: &Axis, y: f64, text_height: f64) -> NodeId {
        let group = axis_group(scene, parent, "x-axis");
        for &tick in &axis.ticks {
            if !axis.in_range(tick) {
                continue;
            }
            let x = axis.pixel_of(tick);
            Text::new(tick_label(tick), x, y, text_height)
                .anchors(HorizontalAnchor::Center, VerticalAnchor::Top)
                .build(scene, group);
        }
        group
    }

    /// Renders per-category labels at fixed pixel centers, optionally
    /// rotated a quarter turn for vertical bar charts.
    pub fn render_categories(
        scene: &mut Scene,
        parent: NodeId,
        labels: &[(String, f64)],
        y: f64,
        text_height: f64,
        rotated: bool,
    ) -> NodeId {
        let group = axis_group(scene, parent, "x-axis");
        for (label, x) in labels {
            if rotated {
                let holder = scene.add(
                    group,
                    NodeKind::Group {
                        transform: identity(3),
                        post_transforms: vec![format!(
                            "rotate(-90,{x},{y})",
                            x = svg_num(*x),
                            y = svg_num(y)
                        )],
                        transparent: false,
                    },
                );
                Text::new(label.clone(), *x, y, text_height)
                    .anchors(HorizontalAnchor::Right, VerticalAnchor::Middle)
                    .build(scene, holder);
            } else {
                Text::new(label.clone(), *x, y, text_height)
                    .anchors(HorizontalAnchor::Center, VerticalAnchor::Top)
                    .build(scene, group);
            }
        }
        group
    }
}

#[derive(Debug)]
pub struct YAxis {
    pub group: NodeId,
    /// Widest rendered label; the graph reserves this much horizontal
    /// margin for the axis.
    pub label_width: f64,
}

impl YAxis {
    /// Renders a vertical column of tick labels ending at `x`
    /// (right-aligned), or starting at `x` when `align_left` is set for a
    /// secondary axis.
    pub fn render(
        scene: &mut Scene,
        parent: NodeId,
        axis: &Axis,
        x: f64,
        text_height: f64,
        align_left: bool,
    ) -> YAxis {
        let group = axis_group(scene, parent, "y-axis");
        let mut label_width: f64 = 0.0;
        for &tick in &axis.ticks {
            if !axis.in_range(tick) {
                continue;
            }
            let label = tick_label(tick);
            label_width = label_width.max(Text::text_width(&label, text_height));
            let y = axis.pixel_of(tick);
            let anchor = if align_left {
                HorizontalAnchor::Left
            } else {
                HorizontalAnchor::Right
            };
            Text::new(label, x, y, text_height)
                .anchors(anchor, VerticalAnchor::Middle)
                .build(scene, group);
        }
        YAxis { group, label_width }
    }

    /// Measures the widest tick label without building geometry.
    pub fn measure(axis: &Axis, text_height: f64) -> f64 {
        let mut width: f64 = 0.0;
        for &tick in &axis.ticks {
            if !axis.in_range(tick) {
                continue;
            }
            width = width.max(Text::text_width(&tick_label(tick), text_height));
        }
        width
    }
}

fn axis_group(scene: &mut Scene, parent: NodeId, class: &str) -> NodeId {
    let group = scene.add(
        parent,
        NodeKind::Group {
            transform: Matrix::new(3, 3),
            post_transforms: Vec::new(),
            transparent: false,
        },
    );
    scene.node_mut(group).class = Some(class.to_string());
    group
}

fn svg_num(v: f64) -> String {
    let r = (v * 1e6).round() / 1e6;
    format!("{r}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decade_walk_picks_ten_for_0_to_37() {
        let axis = Axis::new(0.0, 100.0, 0.0, 37.0, None).unwrap();
        assert_eq!(axis.increment, 10.0);
        for expected in [0.0, 10.0, 20.0, 30.0] {
            assert!(axis.ticks.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn small_ranges_walk_the_exponent_down() {
        let axis = Axis::new(0.0, 100.0, 0.0, 0.5, None).unwrap();
        assert!(axis.increment <= 0.1);
        assert!(axis.ticks.len() >= 5);
    }

    #[test]
    fn every_axis_has_at_least_two_ticks() {
        for (lower, upper) in [(0.0, 37.0), (-3.0, 11.0), (0.2, 0.3), (5.0, 5.001)] {
            let axis = Axis::new(0.0, 10.0, lower, upper, None).unwrap();
            assert!(axis.ticks.len() >= 2, "{lower}..{upper}");
        }
    }

    #[test]
    fn degenerate_bounds_are_rejected() {
        assert!(matches!(
            Axis::new(0.0, 10.0, 4.0, 4.0, None),
            Err(Error::DegenerateAxis { value }) if value == 4.0
        ));
    }

    #[test]
    fn explicit_increment_bypasses_the_walk() {
        let axis = Axis::new(0.0, 10.0, 0.0, 37.0, Some(20.0)).unwrap();
        assert_eq!(axis.increment, 20.0);
        assert!(axis.ticks.contains(&20.0));
    }

    #[test]
    fn pixel_positions_interpolate_linearly() {
        let axis = Axis::new(100.0, 0.0, 0.0, 10.0, None).unwrap();
        assert_eq!(axis.pixel_of(0.0), 100.0);
        assert_eq!(axis.pixel_of(10.0), 0.0);
        assert_eq!(axis.pixel_of(5.0), 50.0);
    }

    #[test]
    fn tick_labels_trim_noise() {
        assert_eq!(tick_label(10.0), "10");
        assert_eq!(tick_label(0.5), "0.5");
        assert_eq!(tick_label(-0.0), "0");
    }
}
