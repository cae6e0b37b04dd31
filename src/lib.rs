//! Star Sphere - animated sphere of twinkling stars
//!
//! Points are scattered over a unit sphere in per-category azimuth
//! sectors, a handful of highlighted "user" stars among them, and drawn
//! as additive glow sprites that pulse in size under an orbit camera.
//!
//! `core` is platform independent; the egui app and GL renderer are
//! built with the `wasm` feature.

pub mod core;
pub mod time;

#[cfg(feature = "wasm")]
pub mod app;
#[cfg(feature = "wasm")]
pub mod stars;
#[cfg(feature = "wasm")]
pub mod theme;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod web {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::app::{StarSphereApp, CONFIG_GLOBAL};
    use crate::core::{ConfigError, SphereConfig};

    const CANVAS_ID: &str = "canvas";

    #[wasm_bindgen(start)]
    pub fn main() {
        console_error_panic_hook::set_once();

        // Initialize tracing for browser console
        tracing_wasm::set_as_global_default();

        let config = match page_config() {
            Ok(Some(config)) => {
                tracing::info!("Using page configuration");
                config
            }
            Ok(None) => SphereConfig::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Invalid page configuration, using defaults");
                SphereConfig::default()
            }
        };

        let web_options = eframe::WebOptions::default();

        wasm_bindgen_futures::spawn_local(async move {
            let canvas = match find_canvas(CANVAS_ID) {
                Ok(canvas) => canvas,
                Err(e) => {
                    tracing::error!(error = %e, "Cannot start star sphere");
                    return;
                }
            };

            let started = eframe::WebRunner::new()
                .start(
                    canvas,
                    web_options,
                    Box::new(|cc| Ok(Box::new(StarSphereApp::new(cc, config)))),
                )
                .await;
            if let Err(e) = started {
                tracing::error!(error = ?e, "Failed to start eframe");
            }
        });
    }

    /// Read `window.__star_sphere_config`: either a JSON string or a plain
    /// object. Absent means defaults.
    fn page_config() -> Result<Option<SphereConfig>, ConfigError> {
        let value = match js_sys::eval(CONFIG_GLOBAL) {
            Ok(v) if !v.is_undefined() && !v.is_null() => v,
            _ => return Ok(None),
        };

        let json = match value.as_string() {
            Some(s) => s,
            None => js_sys::JSON::stringify(&value)
                .map(String::from)
                .map_err(|e| ConfigError::Invalid(format!("{:?}", e)))?,
        };

        SphereConfig::from_json(&json).map(Some)
    }

    fn find_canvas(id: &str) -> Result<web_sys::HtmlCanvasElement, String> {
        let document = web_sys::window()
            .ok_or("no window")?
            .document()
            .ok_or("no document")?;
        document
            .get_element_by_id(id)
            .ok_or_else(|| format!("no #{} element", id))?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| format!("#{} is not a canvas element", id))
    }
}
