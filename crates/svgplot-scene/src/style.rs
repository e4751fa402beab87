//! Style attribute vocabulary.
//!
//! Style maps use camelCase keys on the API side and are rewritten to the
//! CSS property names SVG understands. Unknown keys are tolerated: they log
//! a warning and are skipped, so forward-compatible input never fails
//! rendering.

use indexmap::IndexMap;
use std::fmt::Write as _;

/// Maps a camelCase style key to its CSS property name.
pub fn css_property(key: &str) -> Option<&'static str> {
    Some(match key {
        "fill" => "fill",
        "fillOpacity" => "fill-opacity",
        "stroke" => "stroke",
        "strokeWidth" => "stroke-width",
        "strokeOpacity" => "stroke-opacity",
        "strokeDasharray" => "stroke-dasharray",
        "strokeLinecap" => "stroke-linecap",
        "strokeLinejoin" => "stroke-linejoin",
        "opacity" => "opacity",
        "fontFamily" => "font-family",
        "fontSize" => "font-size",
        "fontWeight" => "font-weight",
        "textAnchor" => "text-anchor",
        "cursor" => "cursor",
        "display" => "display",
        "visibility" => "visibility",
        _ => return None,
    })
}

/// Serializes a style map to a `style="..."` attribute value, skipping
/// unknown keys with a diagnostic.
pub fn serialize_style(style: &IndexMap<String, String>) -> Option<String> {
    if style.is_empty() {
        return None;
    }
    let mut out = String::new();
    for (key, value) in style {
        match css_property(key) {
            Some(css) => {
                let _ = write!(&mut out, "{css}:{value};");
            }
            None => {
                tracing::warn!(key, "unknown style attribute, skipping");
            }
        }
    }
    if out.is_empty() { None } else { Some(out) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_are_rewritten() {
        let mut style = IndexMap::new();
        style.insert("fill".to_string(), "rgb(255,0,0)".to_string());
        style.insert("strokeWidth".to_string(), "1".to_string());
        assert_eq!(
            serialize_style(&style).unwrap(),
            "fill:rgb(255,0,0);stroke-width:1;"
        );
    }

    #[test]
    fn unknown_keys_are_skipped() {
        let mut style = IndexMap::new();
        style.insert("stokeWidth".to_string(), "1".to_string());
        assert_eq!(serialize_style(&style), None);
    }
}
