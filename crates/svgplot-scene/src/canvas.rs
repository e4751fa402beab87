//! Top-level SVG document.
//!
//! `PrintableCanvas` owns the scene, the root `<svg>` node, the collected
//! `<defs>`, and the registered inline scripts, and knows how to emit the
//! standalone document (XML prolog, SVG 1.1 doctype, namespaces).

use crate::Result;
use crate::matrix::Vector;
use crate::scene::{NodeId, NodeKind, Scene, escape_xml, fmt};
use std::fmt::Write as _;
use std::path::Path;

const XML_PROLOG: &str = r#"<?xml version="1.0" standalone="no"?>"#;
const SVG_DOCTYPE: &str = r#"<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">"#;

#[derive(Debug)]
pub struct PrintableCanvas {
    pub scene: Scene,
    root: NodeId,
    scripts: Vec<String>,
}

impl PrintableCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        let mut scene = Scene::new();
        let root = scene.add_detached(NodeKind::Svg {
            width: Some(width),
            height: Some(height),
            view_box: Some([0.0, 0.0, width, height]),
        });
        Self {
            scene,
            root,
            scripts: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Registers an inline script. Scripts are emitted before the document
    /// content, in reverse registration order.
    pub fn add_script(&mut self, code: impl Into<String>) {
        self.scripts.push(code.into());
    }

    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        out.push_str(XML_PROLOG);
        out.push('\n');
        out.push_str(SVG_DOCTYPE);
        out.push('\n');

        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" xmlns:ev="http://www.w3.org/2001/xml-events" version="1.1""#);
        let root = self.scene.node(self.root);
        if let Some(id) = &root.id {
            let _ = write!(&mut out, r#" id="{}""#, escape_xml(id));
        }
        if let NodeKind::Svg {
            width,
            height,
            view_box,
        } = &root.kind
        {
            if let Some(w) = width {
                let _ = write!(&mut out, r#" width="{}""#, fmt(*w));
            }
            if let Some(h) = height {
                let _ = write!(&mut out, r#" height="{}""#, fmt(*h));
            }
            if let Some([x, y, w, h]) = view_box {
                let _ = write!(
                    &mut out,
                    r#" viewBox="{} {} {} {}""#,
                    fmt(*x),
                    fmt(*y),
                    fmt(*w),
                    fmt(*h)
                );
            }
        }
        out.push_str(">\n");

        for code in self.scripts.iter().rev() {
            let _ = writeln!(&mut out, r#"  <script type="text/ecmascript"><![CDATA["#);
            out.push_str(code);
            if !code.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("  ]]></script>\n");
        }

        let defs = self.scene.collect_defs(self.root);
        if !defs.is_empty() {
            out.push_str("  <defs>\n");
            for symbol in defs.values() {
                self.scene.write_node(&mut out, *symbol, 2);
            }
            out.push_str("  </defs>\n");
        }

        for child in self.scene.children(self.root) {
            self.scene.write_node(&mut out, *child, 1);
        }

        out.push_str("</svg>\n");
        out
    }

    pub fn save_path(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_svg_string())?;
        Ok(())
    }

    pub fn write_to<W: std::io::Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(self.to_svg_string().as_bytes())?;
        Ok(())
    }

    /// Convenience for positioning the root child layers.
    pub fn set_position(&mut self, id: NodeId, x: f64, y: f64) {
        self.scene.node_mut(id).position = Vector::new(x, y);
    }
}
