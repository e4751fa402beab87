//! End-to-end scenarios over the emitted SVG text.

use svgplot::{Axis, BarGraph, PieChart, ScatterPlot, Settings, hex_to_color};
use svgplot_scene::Text;

/// First value of `key="..."` after `from` in `svg`.
fn attr_after(svg: &str, from: usize, key: &str) -> Option<f64> {
    let needle = format!(r#"{key}=""#);
    let i = svg[from..].find(&needle)? + from + needle.len();
    let end = svg[i..].find('"')? + i;
    svg[i..end].parse().ok()
}

fn circle_centers(svg: &str) -> Vec<(f64, f64)> {
    let mut out = Vec::new();
    let mut from = 0;
    while let Some(rel) = svg[from..].find("<circle") {
        let at = from + rel;
        let cx = attr_after(svg, at, "cx").unwrap();
        let cy = attr_after(svg, at, "cy").unwrap();
        out.push((cx, cy));
        from = at + 7;
    }
    out
}

/// Endpoints of the first `<line>` with the given class.
fn line_endpoints(svg: &str, class: &str) -> Option<[(f64, f64); 2]> {
    let marker = format!(r#"class="{class}""#);
    let at = svg.find(&marker)?;
    let x1 = attr_after(svg, at, "x1")?;
    let y1 = attr_after(svg, at, "y1")?;
    let x2 = attr_after(svg, at, "x2")?;
    let y2 = attr_after(svg, at, "y2")?;
    Some([(x1, y1), (x2, y2)])
}

#[test]
fn scatter_baseline_document() {
    let settings = Settings::from_map([("width", "300"), ("height", "200")]);
    let mut plot = ScatterPlot::new(&settings).unwrap();
    for (x, y) in [(1.0, 10.0), (2.0, 20.0), (3.0, 30.0), (4.0, 40.0)] {
        plot.add_point(x, y, None);
    }
    let svg = plot.to_svg_string().unwrap();

    assert!(svg.contains(r#"viewBox="0 0 300 200""#));
    let centers = circle_centers(&svg);
    assert_eq!(centers.len(), 4);

    // One regression <line> is emitted and the markers sit on it.
    assert_eq!(svg.matches("<line").count(), 1);
    let [(x1, y1), (x2, y2)] = line_endpoints(&svg, "regression").unwrap();
    let slope = (y2 - y1) / (x2 - x1);
    for (cx, cy) in centers {
        let expected = y1 + slope * (cx - x1);
        assert!((cy - expected).abs() < 1e-3, "marker off the fit: {cx},{cy}");
    }

    // The first element inside the data group is the light background
    // stripe.
    let data_at = svg.find(r#"<g class="data">"#).unwrap();
    let next_line = svg[data_at..].find('\n').unwrap() + data_at + 1;
    let first_child_end = svg[next_line..].find('\n').unwrap() + next_line;
    let first_child = &svg[next_line..first_child_end];
    assert!(first_child.contains(r#"class="background""#), "{first_child}");
    assert!(first_child.contains("rgb(239,239,239)"));
}

#[test]
fn bar_spacing_survives_into_pixels() {
    let mut graph = BarGraph::new(&Settings::new()).unwrap();
    graph.add_bar("A", 5.0);
    graph.add_bar("B", 3.0);
    graph.add_space();
    graph.add_bar("C", 7.0);
    let svg = graph.to_svg_string().unwrap();

    let mut xs = Vec::new();
    let mut from = 0;
    while let Some(rel) = svg[from..].find(r#"class="bar""#) {
        let at = from + rel;
        xs.push(attr_after(&svg, at, "x").unwrap());
        from = at + 1;
    }
    assert_eq!(xs.len(), 3);
    // Data-space leading edges 0, 1.1 and 2.7 keep their ratio under the
    // linear transform.
    let ratio = (xs[2] - xs[0]) / (xs[1] - xs[0]);
    assert!((ratio - 2.7 / 1.1).abs() < 1e-4, "ratio {ratio}");
}

#[test]
fn pie_emits_one_sector_per_wedge() {
    let mut pie = PieChart::new(&Settings::new()).unwrap();
    pie.add_wedge("a", 1.0);
    pie.add_wedge("b", 2.0);
    pie.add_wedge("c", 3.0);
    pie.set_title("shares");
    let svg = pie.to_svg_string().unwrap();

    assert_eq!(svg.matches(r#"class="wedge""#).count(), 3);
    // Sectors render as center-line-arc-close paths.
    assert_eq!(svg.matches(" A ").count(), 3);
    assert!(svg.contains("tooltip-text=\"c: 3\""));
}

#[test]
fn axis_increment_for_0_to_37() {
    let axis = Axis::new(0.0, 100.0, 0.0, 37.0, None).unwrap();
    assert_eq!(axis.increment, 10.0);
    for expected in [0.0, 10.0, 20.0, 30.0] {
        assert!(axis.ticks.contains(&expected));
    }
}

#[test]
fn hex_colors_parse_with_and_without_prefix() {
    let plain = hex_to_color("ff8000").unwrap();
    assert_eq!(plain.to_string(), "rgb(255,128,0)");
    assert_eq!(hex_to_color("0xff8000").unwrap(), plain);
    assert!(hex_to_color("zz").is_err());
}

#[test]
fn text_width_follows_the_glyph_table() {
    let w = Text::text_width("AB", 10.0);
    assert!((w - 10.0 * 1334.0 / 1050.0).abs() < 1e-9);
}

#[test]
fn interaction_scripts_are_inlined() {
    let mut plot = ScatterPlot::new(&Settings::new()).unwrap();
    plot.add_point(0.0, 0.0, Some("origin"));
    plot.add_point(1.0, 2.0, None);
    let svg = plot.to_svg_string().unwrap();

    assert!(svg.contains("<![CDATA["));
    assert!(svg.contains("has-tooltip"));
    assert!(svg.contains("has-highlight"));
    assert!(svg.contains(r#"tooltip-text="origin""#));
}

#[test]
fn labels_reserve_margin_space() {
    let settings = Settings::new();
    let mut bare = ScatterPlot::new(&settings).unwrap();
    bare.add_point(0.0, 0.0, None);
    bare.add_point(10.0, 10.0, None);
    let bare_svg = bare.to_svg_string().unwrap();

    let mut titled = ScatterPlot::new(&settings).unwrap();
    titled.add_point(0.0, 0.0, None);
    titled.add_point(10.0, 10.0, None);
    titled.set_title("Growth");
    titled.set_x_label("time");
    titled.set_y_label("value");
    let titled_svg = titled.to_svg_string().unwrap();

    // The titled canvas is strictly smaller than the bare one.
    let bare_border = bare_svg.find(r#"class="canvas-border""#).unwrap();
    let titled_border = titled_svg.find(r#"class="canvas-border""#).unwrap();
    let bare_h = attr_after(&bare_svg, bare_border, "height").unwrap();
    let titled_h = attr_after(&titled_svg, titled_border, "height").unwrap();
    assert!(titled_h < bare_h);
    assert!(titled_svg.contains(r##"<use xlink:href="#glyph-71""##)); // 'G'
}
