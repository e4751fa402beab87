//! Retained-mode scene graph.
//!
//! Nodes live in an arena owned by [`Scene`] and reference each other by
//! [`NodeId`] handles; each node has at most one parent and an ordered child
//! list (painter order in the emitted document). Coordinates stay in parent
//! space until serialization, when the composed parent-chain transform is
//! applied to a copy of the geometry.

use crate::matrix::{Matrix, Vector, identity};
use crate::style;
use indexmap::IndexMap;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    MoveTo(Vector),
    LineTo(Vector),
    Close,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    /// `<g>`. A transparent group flattens its children into the parent
    /// without emitting a wrapper tag.
    Group {
        transform: Matrix,
        post_transforms: Vec<String>,
        transparent: bool,
    },
    /// `<svg>`: a canvas, possibly nested. Transform resolution for
    /// ordinary primitives stops below the nearest enclosing canvas.
    Svg {
        width: Option<f64>,
        height: Option<f64>,
        view_box: Option<[f64; 4]>,
    },
    /// Marker circle. The position is transformed; the radius is a fixed
    /// pixel size.
    Circle { r: f64 },
    Rect {
        width: f64,
        height: f64,
        /// Transform only the position and keep the pixel size.
        absolute_size: bool,
        /// Deltas applied after the transform, for marker centering.
        world_dx: f64,
        world_dy: f64,
    },
    Line { p1: Vector, p2: Vector },
    Path {
        elements: Vec<PathElement>,
        closed: bool,
        post_transform: Option<String>,
    },
    /// Pie wedge centered on the node position.
    Sector { radius: f64, start: f64, delta: f64 },
    Symbol { view_box: [f64; 4] },
    Use {
        href: String,
        width: Option<f64>,
        height: Option<f64>,
    },
    /// Pre-digitized path data, used by glyph symbols.
    RawPath {
        d: String,
        transform: Option<String>,
    },
    Script { code: String },
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub id: Option<String>,
    pub class: Option<String>,
    /// Position in parent coordinates.
    pub position: Vector,
    pub style: IndexMap<String, String>,
    /// Extra XML attributes carried through verbatim (tooltip wiring etc.).
    pub attrs: IndexMap<String, String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// Symbol nodes this element contributes to the document `<defs>`.
    pub(crate) defs: Vec<NodeId>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            id: None,
            class: None,
            position: Vector::default(),
            style: IndexMap::new(),
            attrs: IndexMap::new(),
            parent: None,
            children: Vec::new(),
            defs: Vec::new(),
        }
    }

    pub fn set_style(&mut self, key: &str, value: impl Into<String>) {
        self.style.insert(key.to_string(), value.into());
    }

    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        self.attrs.insert(key.to_string(), value.into());
    }
}

#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node without a parent. Detached nodes are reachable only
    /// through `defs` contributions or a later [`Scene::append`].
    pub fn add_detached(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind));
        id
    }

    pub fn add(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.add_detached(kind);
        self.append(parent, id);
        id
    }

    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes[child.0].parent.is_none());
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Inserts at a fixed child index; background stripes use index 0 so
    /// they render below every data element.
    pub fn insert(&mut self, parent: NodeId, index: usize, child: NodeId) {
        debug_assert!(self.nodes[child.0].parent.is_none());
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(index, child);
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn set_group_transform(&mut self, id: NodeId, transform: Matrix) {
        if let NodeKind::Group { transform: t, .. } = &mut self.nodes[id.0].kind {
            *t = transform;
        }
    }

    /// Registers a symbol contributed by `owner`; the pre-serialize
    /// traversal merges it into the document `<defs>`.
    pub fn contribute_def(&mut self, owner: NodeId, symbol: NodeId) {
        self.nodes[owner.0].defs.push(symbol);
    }

    /// Composes the parent-chain transforms of `id`, innermost first,
    /// stopping below the nearest enclosing `svg` node. This is the single
    /// choke point where nested group transforms become pixel coordinates.
    pub fn resolve_transform(&self, id: NodeId) -> Matrix {
        self.compose_transform(id, false)
    }

    /// Like [`Scene::resolve_transform`] but walks all the way to the root.
    pub fn world_transform(&self, id: NodeId) -> Matrix {
        self.compose_transform(id, true)
    }

    fn compose_transform(&self, id: NodeId, to_root: bool) -> Matrix {
        let mut acc = identity(3);
        let mut cursor = self.nodes[id.0].parent;
        while let Some(pid) = cursor {
            let node = &self.nodes[pid.0];
            match &node.kind {
                NodeKind::Svg { .. } if !to_root => break,
                NodeKind::Group { transform, .. } => {
                    // p_world = T_outer * (T_inner * p): outer transforms
                    // left-multiply the accumulated product.
                    acc = transform.mul(&acc).expect("3x3 transform chain");
                }
                _ => {}
            }
            cursor = node.parent;
        }
        acc
    }

    /// Resolves the supplied points through the parent-chain transform.
    pub fn apply_transform(&self, id: NodeId, points: &mut [Vector]) {
        let t = self.resolve_transform(id);
        for p in points.iter_mut() {
            *p = t.apply_point(*p);
        }
    }

    /// Pre-order traversal collecting every contributed symbol, keyed by
    /// symbol id; duplicates are dropped.
    pub fn collect_defs(&self, root: NodeId) -> IndexMap<String, NodeId> {
        let mut defs = IndexMap::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            for sym in &node.defs {
                if let Some(sym_id) = self.nodes[sym.0].id.as_deref() {
                    defs.entry(sym_id.to_string()).or_insert(*sym);
                }
            }
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
        }
        defs
    }

    pub fn write_node(&self, out: &mut String, id: NodeId, indent: usize) {
        let node = &self.nodes[id.0];
        match &node.kind {
            NodeKind::Group {
                post_transforms,
                transparent,
                ..
            } => {
                if *transparent {
                    for child in &node.children {
                        self.write_node(out, *child, indent);
                    }
                    return;
                }
                let mut attrs = self.common_attrs(node);
                if !post_transforms.is_empty() {
                    attrs.push(("transform", post_transforms.join(" ")));
                }
                self.write_container(out, id, indent, "g", &attrs);
            }
            NodeKind::Svg {
                width,
                height,
                view_box,
            } => {
                let mut attrs = self.common_attrs(node);
                if node.position.x != 0.0 || node.position.y != 0.0 {
                    attrs.push(("x", fmt(node.position.x)));
                    attrs.push(("y", fmt(node.position.y)));
                }
                if let Some(w) = width {
                    attrs.push(("width", fmt(*w)));
                }
                if let Some(h) = height {
                    attrs.push(("height", fmt(*h)));
                }
                if let Some([x, y, w, h]) = view_box {
                    attrs.push((
                        "viewBox",
                        format!("{} {} {} {}", fmt(*x), fmt(*y), fmt(*w), fmt(*h)),
                    ));
                }
                self.write_container(out, id, indent, "svg", &attrs);
            }
            NodeKind::Circle { r } => {
                let mut p = [node.position];
                self.apply_transform(id, &mut p);
                let mut attrs = self.common_attrs(node);
                attrs.push(("cx", fmt(p[0].x)));
                attrs.push(("cy", fmt(p[0].y)));
                attrs.push(("r", fmt(*r)));
                self.write_leaf(out, indent, "circle", &attrs, node);
            }
            NodeKind::Rect {
                width,
                height,
                absolute_size,
                world_dx,
                world_dy,
            } => {
                let (min, w, h) = if *absolute_size {
                    let mut p = [node.position];
                    self.apply_transform(id, &mut p);
                    (p[0], *width, *height)
                } else {
                    let mut p = [
                        node.position,
                        node.position + Vector::new(*width, *height),
                    ];
                    self.apply_transform(id, &mut p);
                    // The transform may flip an axis; reconfigure so min
                    // stays the top-left corner.
                    let min = Vector::new(p[0].x.min(p[1].x), p[0].y.min(p[1].y));
                    let max = Vector::new(p[0].x.max(p[1].x), p[0].y.max(p[1].y));
                    (min, max.x - min.x, max.y - min.y)
                };
                let mut attrs = self.common_attrs(node);
                attrs.push(("x", fmt(min.x + world_dx)));
                attrs.push(("y", fmt(min.y + world_dy)));
                attrs.push(("width", fmt(w)));
                attrs.push(("height", fmt(h)));
                self.write_leaf(out, indent, "rect", &attrs, node);
            }
            NodeKind::Line { p1, p2 } => {
                let mut p = [*p1 + node.position, *p2 + node.position];
                self.apply_transform(id, &mut p);
                let mut attrs = self.common_attrs(node);
                attrs.push(("x1", fmt(p[0].x)));
                attrs.push(("y1", fmt(p[0].y)));
                attrs.push(("x2", fmt(p[1].x)));
                attrs.push(("y2", fmt(p[1].y)));
                self.write_leaf(out, indent, "line", &attrs, node);
            }
            NodeKind::Path {
                elements,
                closed,
                post_transform,
            } => {
                // Work on a copy so transform application never mutates the
                // retained geometry.
                let t = self.resolve_transform(id);
                let mut d = String::new();
                let mut saw_close = false;
                for el in elements {
                    if !d.is_empty() {
                        d.push(' ');
                    }
                    match el {
                        PathElement::MoveTo(p) => {
                            let p = t.apply_point(*p + node.position);
                            let _ = write!(&mut d, "M {} {}", fmt(p.x), fmt(p.y));
                        }
                        PathElement::LineTo(p) => {
                            let p = t.apply_point(*p + node.position);
                            let _ = write!(&mut d, "L {} {}", fmt(p.x), fmt(p.y));
                        }
                        PathElement::Close => {
                            saw_close = true;
                            d.push('Z');
                        }
                    }
                }
                if *closed && !saw_close {
                    d.push_str(" Z");
                }
                let mut attrs = self.common_attrs(node);
                attrs.push(("d", d));
                if let Some(tr) = post_transform {
                    attrs.push(("transform", tr.clone()));
                }
                self.write_leaf(out, indent, "path", &attrs, node);
            }
            NodeKind::Sector {
                radius,
                start,
                delta,
            } => {
                // Normalize so the sweep is positive; a negative delta
                // subtracts from the start angle.
                let (start, delta) = if *delta < 0.0 {
                    (start + delta, -delta)
                } else {
                    (*start, *delta)
                };
                let t = self.resolve_transform(id);
                let origin = t.apply_point(node.position);
                let at = |angle: f64| {
                    Vector::new(
                        origin.x + radius * angle.cos(),
                        origin.y - radius * angle.sin(),
                    )
                };
                let p1 = at(start);
                let p2 = at(start + delta);
                let d = format!(
                    "M {} {} L {} {} A {r} {r} 1 0 0 {} {} Z",
                    fmt(origin.x),
                    fmt(origin.y),
                    fmt(p1.x),
                    fmt(p1.y),
                    fmt(p2.x),
                    fmt(p2.y),
                    r = fmt(*radius),
                );
                let mut attrs = self.common_attrs(node);
                attrs.push(("d", d));
                self.write_leaf(out, indent, "path", &attrs, node);
            }
            NodeKind::Symbol { view_box } => {
                let [x, y, w, h] = view_box;
                let mut attrs = self.common_attrs(node);
                attrs.push((
                    "viewBox",
                    format!("{} {} {} {}", fmt(*x), fmt(*y), fmt(*w), fmt(*h)),
                ));
                self.write_container(out, id, indent, "symbol", &attrs);
            }
            NodeKind::Use {
                href,
                width,
                height,
            } => {
                let mut p = [node.position];
                self.apply_transform(id, &mut p);
                let mut attrs = self.common_attrs(node);
                attrs.push(("xlink:href", format!("#{href}")));
                attrs.push(("x", fmt(p[0].x)));
                attrs.push(("y", fmt(p[0].y)));
                if let Some(w) = width {
                    attrs.push(("width", fmt(*w)));
                }
                if let Some(h) = height {
                    attrs.push(("height", fmt(*h)));
                }
                self.write_leaf(out, indent, "use", &attrs, node);
            }
            NodeKind::RawPath { d, transform } => {
                let mut attrs = self.common_attrs(node);
                attrs.push(("d", d.clone()));
                if let Some(tr) = transform {
                    attrs.push(("transform", tr.clone()));
                }
                self.write_leaf(out, indent, "path", &attrs, node);
            }
            NodeKind::Script { code } => {
                let pad = "  ".repeat(indent);
                let _ = writeln!(out, r#"{pad}<script type="text/ecmascript"><![CDATA["#);
                out.push_str(code);
                if !code.ends_with('\n') {
                    out.push('\n');
                }
                let _ = writeln!(out, "{pad}]]></script>");
            }
        }
    }

    fn common_attrs(&self, node: &Node) -> Vec<(&'static str, String)> {
        let mut attrs = Vec::new();
        if let Some(id) = &node.id {
            attrs.push(("id", id.clone()));
        }
        if let Some(class) = &node.class {
            attrs.push(("class", class.clone()));
        }
        attrs
    }

    fn write_open_tag(
        &self,
        out: &mut String,
        indent: usize,
        tag: &str,
        attrs: &[(&'static str, String)],
        node: &Node,
        self_close: bool,
    ) {
        let pad = "  ".repeat(indent);
        let _ = write!(out, "{pad}<{tag}");
        for (name, value) in attrs {
            let _ = write!(out, r#" {name}="{}""#, escape_xml(value));
        }
        if let Some(style) = style::serialize_style(&node.style) {
            let _ = write!(out, r#" style="{}""#, escape_xml(&style));
        }
        for (name, value) in &node.attrs {
            let _ = write!(out, r#" {name}="{}""#, escape_xml(value));
        }
        if self_close {
            out.push_str("/>\n");
        } else {
            out.push_str(">\n");
        }
    }

    fn write_leaf(
        &self,
        out: &mut String,
        indent: usize,
        tag: &str,
        attrs: &[(&'static str, String)],
        node: &Node,
    ) {
        self.write_open_tag(out, indent, tag, attrs, node, true);
    }

    fn write_container(
        &self,
        out: &mut String,
        id: NodeId,
        indent: usize,
        tag: &str,
        attrs: &[(&'static str, String)],
    ) {
        let node = &self.nodes[id.0];
        if node.children.is_empty() {
            // Empty containers collapse to the self-closing form.
            self.write_open_tag(out, indent, tag, attrs, node, true);
            return;
        }
        self.write_open_tag(out, indent, tag, attrs, node, false);
        for child in &node.children {
            self.write_node(out, *child, indent + 1);
        }
        let pad = "  ".repeat(indent);
        let _ = writeln!(out, "{pad}</{tag}>");
    }
}

/// Stringifies a coordinate the way browsers do: round-trippable decimal
/// form, with `-0` and tiny float noise from our own transforms snapped
/// away.
pub(crate) fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
