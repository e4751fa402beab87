//! Inline viewer scripts.
//!
//! The emitted document wires two behaviors at load time: markers carrying
//! `has-tooltip`/`tooltip-text` get a floating path-and-text tooltip, and
//! markers carrying `has-highlight`/`highlight-fill` swap their fill on
//! hover. The scripts run in the viewer; nothing here touches a DOM at
//! build time.

use crate::settings::{GraphSettings, UnifiedSettings};

const TOOLTIP_TEMPLATE: &str = r#"var svgplotTip = null;
var svgplotTipText = null;
function svgplotShowTip(evt) {
  var root = document.documentElement;
  if (svgplotTip === null) {
    svgplotTip = document.createElementNS('http://www.w3.org/2000/svg', 'g');
    var box = document.createElementNS('http://www.w3.org/2000/svg', 'path');
    box.setAttribute('fill', '#ffffc9');
    box.setAttribute('stroke', '#000');
    box.setAttribute('stroke-width', '0.5');
    svgplotTipText = document.createElementNS('http://www.w3.org/2000/svg', 'text');
    svgplotTipText.setAttribute('font-size', '__TIP_SIZE__');
    svgplotTip.appendChild(box);
    svgplotTip.appendChild(svgplotTipText);
    root.appendChild(svgplotTip);
  }
  while (svgplotTipText.firstChild) {
    svgplotTipText.removeChild(svgplotTipText.firstChild);
  }
  var label = evt.target.getAttribute('tooltip-text');
  svgplotTipText.appendChild(document.createTextNode(label));
  svgplotMoveTip(evt);
  svgplotTip.setAttribute('visibility', 'visible');
}
function svgplotMoveTip(evt) {
  if (svgplotTip === null) {
    return;
  }
  var x = evt.clientX + __TIP_X_OFFSET__;
  var y = evt.clientY + __TIP_Y_OFFSET__;
  var w = svgplotTipText.getComputedTextLength() + __TIP_X_PADDING__;
  var h = __TIP_SIZE__ + __TIP_Y_PADDING__;
  var box = svgplotTip.firstChild;
  box.setAttribute('d', 'M ' + x + ' ' + y + ' l ' + w + ' 0 l 0 ' + h +
    ' l -' + w + ' 0 Z');
  svgplotTipText.setAttribute('x', x + __TIP_X_PADDING__ / 2);
  svgplotTipText.setAttribute('y', y + h - __TIP_Y_PADDING__ / 2);
}
function svgplotHideTip(evt) {
  if (svgplotTip !== null) {
    svgplotTip.setAttribute('visibility', 'hidden');
  }
}
window.addEventListener('load', function () {
  var marked = document.querySelectorAll('[has-tooltip]');
  for (var i = 0; i < marked.length; i++) {
    marked[i].addEventListener('mouseover', svgplotShowTip);
    marked[i].addEventListener('mousemove', svgplotMoveTip);
    marked[i].addEventListener('mouseout', svgplotHideTip);
  }
});"#;

const HIGHLIGHT_SCRIPT: &str = r#"window.addEventListener('load', function () {
  var marked = document.querySelectorAll('[has-highlight]');
  for (var i = 0; i < marked.length; i++) {
    marked[i].addEventListener('mouseover', function (evt) {
      var el = evt.target;
      el.setAttribute('base-fill', el.style.fill);
      el.style.fill = el.getAttribute('highlight-fill');
    });
    marked[i].addEventListener('mouseout', function (evt) {
      var el = evt.target;
      el.style.fill = el.getAttribute('base-fill');
    });
  }
});"#;

/// Tooltip wiring with the settings-driven geometry substituted in.
pub fn tooltip_script(graph: &GraphSettings, unified: &UnifiedSettings) -> String {
    TOOLTIP_TEMPLATE
        .replace("__TIP_SIZE__", &num(graph.tooltip_size))
        .replace("__TIP_X_OFFSET__", &num(unified.tooltip_x_offset))
        .replace("__TIP_Y_OFFSET__", &num(unified.tooltip_y_offset))
        .replace("__TIP_X_PADDING__", &num(unified.tooltip_x_padding))
        .replace("__TIP_Y_PADDING__", &num(unified.tooltip_y_padding))
}

pub fn highlight_script() -> &'static str {
    HIGHLIGHT_SCRIPT
}

fn num(v: f64) -> String {
    let r = (v * 1e6).round() / 1e6;
    format!("{r}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn tooltip_script_substitutes_settings() {
        let s = Settings::from_map([("tooltipSize", "9"), ("tooltipXOffset", "15")]);
        let graph = GraphSettings::resolve(&s).unwrap();
        let unified = UnifiedSettings::resolve(&s).unwrap();
        let js = tooltip_script(&graph, &unified);
        assert!(js.contains("'font-size', '9'"));
        assert!(js.contains("clientX + 15"));
        assert!(!js.contains("__TIP_"));
    }
}
