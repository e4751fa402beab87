use serde::Deserialize;
use std::io::Read;
use svgplot::{BarGraph, Color, DoubleScatterPlot, LineChart, PieChart, ScatterPlot, Settings};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Chart(svgplot::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Chart(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<svgplot::Error> for CliError {
    fn from(value: svgplot::Error) -> Self {
        Self::Chart(value)
    }
}

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "svgplot-cli\n\
\n\
USAGE:\n\
  svgplot-cli [<chart.json>|-] [--out <path>]\n\
\n\
NOTES:\n\
  - If <chart.json> is omitted or '-', the description is read from stdin.\n\
  - SVG is printed to stdout by default; use --out to write a file.\n\
  - The description carries {\"type\": \"scatter\"|\"doubleScatter\"|\"bar\"|\"line\"|\"pie\",\n\
    \"settings\": {..}, optional \"title\"/\"xLabel\"/\"yLabel\"/\"y2Label\", and the data\n\
    arrays for the chosen family.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            other if other.starts_with("--") => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }
    Ok(args)
}

#[derive(Debug, Deserialize)]
struct PointSpec {
    x: f64,
    y: f64,
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BarItemSpec {
    Group { name: String, items: Vec<(String, f64)> },
    Bar { name: String, value: f64 },
    Space { space: bool },
}

#[derive(Debug, Deserialize)]
struct SeriesSpec {
    name: String,
    values: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct WedgeSpec {
    name: String,
    value: f64,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ChartSpec {
    #[serde(rename = "scatter")]
    Scatter {
        #[serde(flatten)]
        common: CommonSpec,
        points: Vec<PointSpec>,
    },
    #[serde(rename = "doubleScatter")]
    DoubleScatter {
        #[serde(flatten)]
        common: CommonSpec,
        points: Vec<PointSpec>,
        points2: Vec<PointSpec>,
    },
    #[serde(rename = "bar")]
    Bar {
        #[serde(flatten)]
        common: CommonSpec,
        bars: Vec<BarItemSpec>,
        colors: Option<serde_json::Map<String, serde_json::Value>>,
    },
    #[serde(rename = "line")]
    Line {
        #[serde(flatten)]
        common: CommonSpec,
        series: Vec<SeriesSpec>,
        colors: Option<serde_json::Map<String, serde_json::Value>>,
    },
    #[serde(rename = "pie")]
    Pie {
        #[serde(flatten)]
        common: CommonSpec,
        wedges: Vec<WedgeSpec>,
        colors: Option<serde_json::Map<String, serde_json::Value>>,
    },
}

#[derive(Debug, Deserialize)]
struct CommonSpec {
    settings: Option<serde_json::Map<String, serde_json::Value>>,
    title: Option<String>,
    #[serde(rename = "xLabel")]
    x_label: Option<String>,
    #[serde(rename = "yLabel")]
    y_label: Option<String>,
    #[serde(rename = "y2Label")]
    y2_label: Option<String>,
}

/// JSON settings values may be strings or bare numbers/booleans; everything
/// funnels through the string-typed settings bag.
fn build_settings(raw: Option<&serde_json::Map<String, serde_json::Value>>) -> Settings {
    let mut settings = Settings::new();
    let Some(map) = raw else {
        return settings;
    };
    for (key, value) in map {
        let text = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        settings.set(key, text);
    }
    settings
}

fn build_colors(
    raw: Option<&serde_json::Map<String, serde_json::Value>>,
) -> Result<Vec<(String, Color)>, CliError> {
    let mut out = Vec::new();
    let Some(map) = raw else {
        return Ok(out);
    };
    for (name, value) in map {
        let serde_json::Value::String(hex) = value else {
            return Err(CliError::Usage("color values must be hex strings"));
        };
        let color = svgplot::hex_to_color(hex).map_err(svgplot::Error::from)?;
        out.push((name.clone(), color));
    }
    Ok(out)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn render(spec: ChartSpec) -> Result<String, CliError> {
    match spec {
        ChartSpec::Scatter { common, points } => {
            let settings = build_settings(common.settings.as_ref());
            let mut plot = ScatterPlot::new(&settings)?;
            for p in &points {
                plot.add_point(p.x, p.y, p.label.as_deref());
            }
            if let Some(t) = common.title {
                plot.set_title(t);
            }
            if let Some(l) = common.x_label {
                plot.set_x_label(l);
            }
            if let Some(l) = common.y_label {
                plot.set_y_label(l);
            }
            Ok(plot.to_svg_string()?)
        }
        ChartSpec::DoubleScatter {
            common,
            points,
            points2,
        } => {
            let settings = build_settings(common.settings.as_ref());
            let mut plot = DoubleScatterPlot::new(&settings)?;
            for p in &points {
                plot.add_point(p.x, p.y, p.label.as_deref());
            }
            for p in &points2 {
                plot.add_point2(p.x, p.y, p.label.as_deref());
            }
            if let Some(t) = common.title {
                plot.set_title(t);
            }
            if let Some(l) = common.x_label {
                plot.set_x_label(l);
            }
            if let Some(l) = common.y_label {
                plot.set_y_label(l);
            }
            if let Some(l) = common.y2_label {
                plot.set_y2_label(l);
            }
            Ok(plot.to_svg_string()?)
        }
        ChartSpec::Bar {
            common,
            bars,
            colors,
        } => {
            let settings = build_settings(common.settings.as_ref());
            let mut graph = BarGraph::new(&settings)?;
            for item in &bars {
                match item {
                    BarItemSpec::Bar { name, value } => graph.add_bar(name, *value),
                    BarItemSpec::Group { name, items } => {
                        let items: Vec<(&str, f64)> =
                            items.iter().map(|(k, v)| (k.as_str(), *v)).collect();
                        graph.add_group(name, &items);
                    }
                    BarItemSpec::Space { space } => {
                        if *space {
                            graph.add_space();
                        }
                    }
                }
            }
            graph.set_colors(build_colors(colors.as_ref())?);
            if let Some(t) = common.title {
                graph.set_title(t);
            }
            if let Some(l) = common.x_label {
                graph.set_x_label(l);
            }
            if let Some(l) = common.y_label {
                graph.set_y_label(l);
            }
            Ok(graph.to_svg_string()?)
        }
        ChartSpec::Line {
            common,
            series,
            colors,
        } => {
            let settings = build_settings(common.settings.as_ref());
            let mut chart = LineChart::new(&settings)?;
            for s in &series {
                chart.add_series(&s.name, &s.values);
            }
            chart.set_colors(build_colors(colors.as_ref())?);
            if let Some(t) = common.title {
                chart.set_title(t);
            }
            if let Some(l) = common.x_label {
                chart.set_x_label(l);
            }
            if let Some(l) = common.y_label {
                chart.set_y_label(l);
            }
            Ok(chart.to_svg_string()?)
        }
        ChartSpec::Pie {
            common,
            wedges,
            colors,
        } => {
            let settings = build_settings(common.settings.as_ref());
            let mut chart = PieChart::new(&settings)?;
            for w in &wedges {
                chart.add_wedge(&w.name, w.value);
            }
            chart.set_colors(build_colors(colors.as_ref())?);
            if let Some(title) = common.title {
                chart.set_title(title);
            }
            Ok(chart.to_svg_string()?)
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let spec: ChartSpec = serde_json::from_str(&text)?;
    let svg = render(spec)?;
    write_text(&svg, args.out.as_deref())
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
