//! Text rendered through the glyph library.
//!
//! A text run becomes a group of `<use>` references, one per character,
//! laid out left to right by accumulated advance widths. Each distinct
//! character registers one reusable `<symbol>` with the nearest defs
//! owner; the document serializer hoists those into the root `<defs>`.

use crate::glyphs::{self, UNITS_PER_EM, UNKNOWN_ADVANCE};
use crate::matrix::{Vector, identity};
use crate::scene::{NodeId, NodeKind, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAnchor {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAnchor {
    #[default]
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone)]
pub struct Text {
    pub content: String,
    pub position: Vector,
    pub height: f64,
    pub horizontal_anchor: HorizontalAnchor,
    pub vertical_anchor: VerticalAnchor,
}

/// Handle to a laid-out text run.
#[derive(Debug, Clone, Copy)]
pub struct TextLayout {
    pub group: NodeId,
    pub width: f64,
    pub height: f64,
}

impl Text {
    pub fn new(content: impl Into<String>, x: f64, y: f64, height: f64) -> Self {
        Self {
            content: content.into(),
            position: Vector::new(x, y),
            height,
            horizontal_anchor: HorizontalAnchor::default(),
            vertical_anchor: VerticalAnchor::default(),
        }
    }

    pub fn anchors(mut self, horizontal: HorizontalAnchor, vertical: VerticalAnchor) -> Self {
        self.horizontal_anchor = horizontal;
        self.vertical_anchor = vertical;
        self
    }

    /// Static width measurement; equals the rendered width of the same
    /// string at the same height, without building geometry.
    pub fn text_width(content: &str, height: f64) -> f64 {
        let mut units = 0.0;
        for c in content.chars() {
            units += glyphs::glyph(c).map_or(UNKNOWN_ADVANCE, |g| g.advance);
        }
        units / UNITS_PER_EM * height
    }

    /// Lays the run out under `parent` and returns the group handle with
    /// the measured extent.
    pub fn build(&self, scene: &mut Scene, parent: NodeId) -> TextLayout {
        let group = scene.add(
            parent,
            NodeKind::Group {
                transform: identity(3),
                post_transforms: Vec::new(),
                transparent: false,
            },
        );
        scene.node_mut(group).class = Some("text".to_string());

        let mut cursor = self.position.x;
        let mut uses: Vec<NodeId> = Vec::new();
        for c in self.content.chars() {
            let Some(glyph) = glyphs::glyph(c) else {
                // Unknown characters advance without drawing.
                tracing::debug!(character = %c, "no glyph for character, advancing only");
                cursor += UNKNOWN_ADVANCE / UNITS_PER_EM * self.height;
                continue;
            };
            let advance_px = glyph.advance / UNITS_PER_EM * self.height;
            if !glyph.path.is_empty() {
                let symbol_id = format!("glyph-{}", c as u32);
                self.register_symbol(scene, group, &symbol_id, glyph);
                let use_node = scene.add(
                    group,
                    NodeKind::Use {
                        href: symbol_id,
                        width: Some(advance_px),
                        height: Some(self.height),
                    },
                );
                scene.node_mut(use_node).position = Vector::new(cursor, self.position.y);
                uses.push(use_node);
            }
            cursor += advance_px;
        }

        let width = cursor - self.position.x;
        self.apply_anchors(scene, &uses, width);

        TextLayout {
            group,
            width,
            height: self.height,
        }
    }

    /// Registers the `<symbol>` for one character with the text group.
    /// Duplicate registrations are collapsed when the document collects
    /// defs by symbol id.
    fn register_symbol(
        &self,
        scene: &mut Scene,
        owner: NodeId,
        symbol_id: &str,
        glyph: &glyphs::Glyph,
    ) {
        let symbol = scene.add_detached(NodeKind::Symbol {
            view_box: [0.0, -800.0, glyph.advance, 250.0],
        });
        scene.node_mut(symbol).id = Some(symbol_id.to_string());
        let path = scene.add(
            symbol,
            NodeKind::RawPath {
                d: glyph.path.to_string(),
                // Font units are y-up; SVG is y-down.
                transform: Some("scale(1,-1)".to_string()),
            },
        );
        {
            let node = scene.node_mut(path);
            node.set_style("fill", "none");
            node.set_style("stroke", "#000");
            node.set_style("strokeWidth", "60");
        }
        scene.contribute_def(owner, symbol);
    }

    fn apply_anchors(&self, scene: &mut Scene, uses: &[NodeId], width: f64) {
        let dx = match self.horizontal_anchor {
            HorizontalAnchor::Left => 0.0,
            HorizontalAnchor::Center => -width / 2.0,
            HorizontalAnchor::Right => -width,
        };
        let dy = match self.vertical_anchor {
            VerticalAnchor::Top => 0.0,
            VerticalAnchor::Middle => -self.height / 2.0,
            VerticalAnchor::Bottom => -self.height,
        };
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        let delta = Vector::new(dx, dy);
        for id in uses {
            scene.node_mut(*id).position += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_with_root() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let root = scene.add_detached(NodeKind::Svg {
            width: None,
            height: None,
            view_box: None,
        });
        (scene, root)
    }

    #[test]
    fn static_width_matches_glyph_table() {
        // A and B both advance 667 font units.
        let w = Text::text_width("AB", 10.0);
        assert!((w - 10.0 * (667.0 + 667.0) / 1050.0).abs() < 1e-9);
    }

    #[test]
    fn rendered_width_equals_static_width() {
        let (mut scene, root) = scene_with_root();
        let layout = Text::new("Graph 12", 0.0, 0.0, 8.0).build(&mut scene, root);
        assert!((layout.width - Text::text_width("Graph 12", 8.0)).abs() < 1e-9);
    }

    #[test]
    fn unknown_characters_advance_only() {
        let (mut scene, root) = scene_with_root();
        let layout = Text::new("\u{263a}", 0.0, 0.0, 10.5).build(&mut scene, root);
        assert_eq!(scene.children(layout.group).len(), 0);
        assert!((layout.width - 3.0).abs() < 1e-9); // 300/1050 * 10.5
    }

    #[test]
    fn distinct_characters_register_one_symbol_each() {
        let (mut scene, root) = scene_with_root();
        Text::new("AAB", 0.0, 0.0, 10.0).build(&mut scene, root);
        let defs = scene.collect_defs(root);
        assert_eq!(defs.len(), 2);
        assert!(defs.contains_key("glyph-65"));
        assert!(defs.contains_key("glyph-66"));
    }

    #[test]
    fn center_anchor_shifts_glyphs_left_by_half_width() {
        let (mut scene, root) = scene_with_root();
        let layout = Text::new("II", 100.0, 0.0, 10.0)
            .anchors(HorizontalAnchor::Center, VerticalAnchor::Top)
            .build(&mut scene, root);
        let first = scene.children(layout.group)[0];
        let x = scene.node(first).position.x;
        assert!((x - (100.0 - layout.width / 2.0)).abs() < 1e-9);
    }
}
