//! WASM bridge for Lariat: lasso selection for Cytoscape.js graphs.
//!
//! Compiled via `wasm-pack build --target web`. From JavaScript:
//!
//! ```js
//! const lasso = new LassoExtension(cy, { requirePrimaryButton: true });
//! lasso.setEnabled(true);
//! ```

mod bindings;
mod canvas;
#[cfg(target_arch = "wasm32")]
mod console;
mod cy_host;
mod js;
mod shared;

use lariat_core::config::LassoConfig;
use lariat_engine::{FeatureToggle, Phase};
use shared::SharedHandler;
use wasm_bindgen::prelude::*;

pub use bindings::DomBindings;
pub use canvas::CanvasSurface;
pub use cy_host::CyHost;

/// Lasso selection attached to one Cytoscape core.
///
/// Disabled on construction. Enabling inserts the lasso canvas and starts
/// listening; disabling removes both again.
#[wasm_bindgen]
pub struct LassoExtension {
    cy: JsValue,
    config: LassoConfig,
    toggle: FeatureToggle<SharedHandler>,
}

#[wasm_bindgen]
impl LassoExtension {
    /// `options` is an optional plain object of `LassoConfig` fields
    /// (camelCase). Unknown fields are ignored.
    #[wasm_bindgen(constructor)]
    pub fn new(cy: JsValue, options: JsValue) -> Result<LassoExtension, JsValue> {
        #[cfg(target_arch = "wasm32")]
        console::init();

        let config = parse_options(&options).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self {
            cy,
            config,
            toggle: FeatureToggle::new(),
        })
    }

    /// Turn lasso selection on or off. Returns `true` if the state changed.
    #[wasm_bindgen(js_name = setEnabled)]
    pub fn set_enabled(&mut self, enabled: bool) -> Result<bool, JsValue> {
        let (cy, config) = (&self.cy, &self.config);
        self.toggle
            .set_enabled(enabled, || shared::attach(cy, config))
            .map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(getter)]
    pub fn enabled(&self) -> bool {
        self.toggle.is_enabled()
    }

    /// `"idle"`, `"tracking"`, `"active"`, or `"disabled"`.
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        phase_name(self.toggle.get().and_then(SharedHandler::phase)).to_string()
    }

    /// Effective configuration as JSON.
    #[wasm_bindgen(js_name = configJson)]
    pub fn config_json(&self) -> String {
        serde_json::to_string(&self.config).unwrap_or_default()
    }

    /// Disable and release everything. Safe to call more than once.
    pub fn destroy(&mut self) {
        // Disabling never builds, so it cannot fail.
        let _ = self.toggle.set_enabled(false, || Err(String::new()));
    }
}

fn parse_options(options: &JsValue) -> Result<LassoConfig, String> {
    if options.is_undefined() || options.is_null() {
        return Ok(LassoConfig::default());
    }
    let json = js_sys::JSON::stringify(options).map_err(|e| js::describe("options", &e))?;
    LassoConfig::from_json(&String::from(json))
}

fn phase_name(phase: Option<Phase>) -> &'static str {
    match phase {
        None => "disabled",
        Some(Phase::Idle) => "idle",
        Some(Phase::Tracking) => "tracking",
        Some(Phase::Active) => "active",
    }
}

// ─── Standalone functions (no graph needed) ──────────────────────────────

/// Validate a lasso options object given as JSON. Returns
/// `{"ok":true,"config":{...}}` with defaults filled in, or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen(js_name = validateOptions)]
pub fn validate_options(json: &str) -> String {
    let report = match LassoConfig::from_json(json) {
        Ok(config) => serde_json::json!({ "ok": true, "config": config }),
        Err(error) => serde_json::json!({ "ok": false, "error": error }),
    };
    report.to_string()
}

/// Set the console log level (`"off"`, `"error"`, ..., `"trace"`). Returns
/// `false` for an unknown level.
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> bool {
    match level.parse::<log::LevelFilter>() {
        Ok(filter) => {
            log::set_max_level(filter);
            true
        }
        Err(_) => false,
    }
}
