//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! Projection and path generation are done by D3, which the page loads
//! before the WASM bundle. The helper functions live in `assets/js/*.js`
//! and are evaluated as globals (no ES modules). This module serializes
//! arguments, calls those globals and parses their JSON results.

use emig_core::label::{Label, LabelMeasure, Size};
use emig_core::MapConfig;
use serde::Deserialize;
use serde_json::json;

// Embed the D3 helpers at compile time
static PROJECTION_JS: &str = include_str!("../assets/js/projection.js");

/// SVG paths for one map, index-aligned with the regions that were projected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectedMap {
    pub outline: String,
    /// World countries drawn under the regions; empty without a background layer
    #[serde(default)]
    pub background: String,
    pub graticule: Vec<String>,
    pub regions: Vec<String>,
}

/// Evaluate JS that yields a string, `None` on exceptions or non-strings.
fn eval_string(code: &str) -> Option<String> {
    js_sys::eval(code).ok()?.as_string()
}

/// Load the projection helpers. Call once at app startup.
///
/// Evaluated unwrapped so the `function` declarations land on `window`.
pub fn init_projection() {
    let _ = js_sys::eval(PROJECTION_JS);
}

fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Project a GeoJSON feature collection, and the optional world background,
/// with the configured Albers projection.
///
/// Returns `None` when D3 is not loaded or projection fails.
pub fn project_regions(
    features: &serde_json::Value,
    background: Option<&serde_json::Value>,
    config: &MapConfig,
) -> Option<ProjectedMap> {
    let projection = json!({
        "center": config.projection.center,
        "rotate": config.projection.rotate,
        "parallels": config.projection.parallels,
        "scale": config.projection.scale,
        "graticule_step": config.projection.graticule_step,
        "width": config.map.width,
        "height": config.map.height,
    });
    let code = format!(
        "(function() {{ if (typeof d3 === 'undefined' || typeof emigProjectRegions === 'undefined') return ''; return emigProjectRegions({}, {}, {}); }})()",
        js_string(&features.to_string()),
        js_string(&background.map_or_else(|| "null".to_string(), |b| b.to_string())),
        js_string(&projection.to_string()),
    );
    let result = eval_string(&code).filter(|s| !s.is_empty())?;
    match serde_json::from_str(&result) {
        Ok(map) => Some(map),
        Err(e) => {
            log::error!("[EMIG] js_bridge: bad projection result: {}", e);
            None
        }
    }
}

/// On-screen size of the element with `id`.
pub fn measure_element(id: &str) -> Option<Size> {
    let code = format!(
        "(function() {{ return typeof emigMeasureElement === 'undefined' ? '' : emigMeasureElement({}); }})()",
        js_string(id)
    );
    let result = eval_string(&code).filter(|s| !s.is_empty())?;
    serde_json::from_str(&result).ok()
}

/// Inner size of the browser window.
pub fn viewport_size() -> Size {
    let window = web_sys::window();
    let read = |v: Option<Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>>| {
        v.and_then(|r| r.ok()).and_then(|js| js.as_f64()).unwrap_or(0.0)
    };
    Size::new(
        read(window.as_ref().map(|w| w.inner_width())),
        read(window.as_ref().map(|w| w.inner_height())),
    )
}

/// Measures the info label as laid out in the DOM.
pub struct DomLabelMeasure;

impl LabelMeasure for DomLabelMeasure {
    fn measure(&self, label: &Label) -> Option<Size> {
        measure_element(&label.id)
    }
}
