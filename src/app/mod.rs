//! Star Sphere egui app
//!
//! Owns the generated field, the orbit camera and the frame clock, ticks
//! the oscillator once per frame and hands the field to the star renderer.

mod diagnostics;
mod header;
mod settings;
mod sphere;

use eframe::{egui, glow};
use egui::mutex::Mutex;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::{OrbitCamera, SizeOscillator, SphereConfig, StarField};
use crate::stars::StarRenderer;
use crate::theme::night_visuals;
use crate::time::FrameClock;

/// Page-level JSON configuration (set before the wasm module starts)
pub const CONFIG_GLOBAL: &str = "window.__star_sphere_config";

pub struct StarSphereApp {
    pub(crate) config: SphereConfig,
    /// Shared with the paint callback
    pub(crate) field: Arc<Mutex<StarField>>,
    /// Bumped on every regeneration so the renderer reloads all buffers
    pub(crate) revision: u64,
    pub(crate) camera: OrbitCamera,
    pub(crate) clock: FrameClock,
    /// GL renderer (None in CPU mode)
    pub(crate) renderer: Option<Arc<Mutex<StarRenderer>>>,
    pub(crate) fps_counter: header::FpsCounter,
    pub(crate) show_settings: bool,
    pub(crate) show_diagnostics: bool,
    /// Seed text field in the settings sidebar
    pub(crate) seed_input: String,
    /// Last sphere viewport size, for responsive camera fitting
    pub(crate) last_viewport: Option<egui::Vec2>,
    /// Diagnostics: (min, max) current size after the last tick
    pub(crate) size_range: Option<(f32, f32)>,
    /// Diagnostics: stars painted by the CPU path last frame
    pub(crate) cpu_drawn: usize,
}

impl StarSphereApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: SphereConfig) -> Self {
        cc.egui_ctx.set_visuals(night_visuals());

        let renderer = match cc.gl.as_ref() {
            Some(gl) => match StarRenderer::new(gl) {
                Ok(r) => Some(Arc::new(Mutex::new(r))),
                Err(e) => {
                    warn!(error = %e, "Star renderer unavailable, falling back to CPU");
                    None
                }
            },
            None => {
                warn!("No GL context, falling back to CPU");
                None
            }
        };

        let field = StarField::generate(&config.generator, &config.appearance);
        info!(
            stars = field.len(),
            users = field.user_count(),
            seed = field.seed(),
            gpu = renderer.is_some(),
            "Star sphere started"
        );

        Self {
            seed_input: config
                .generator
                .seed
                .map(|s| s.to_string())
                .unwrap_or_default(),
            camera: OrbitCamera::new(&config.camera),
            field: Arc::new(Mutex::new(field)),
            revision: 0,
            clock: FrameClock::new(),
            renderer,
            fps_counter: header::FpsCounter::new(),
            show_settings: false,
            show_diagnostics: true,
            last_viewport: None,
            size_range: None,
            cpu_drawn: 0,
            config,
        }
    }

    pub(crate) fn use_cpu(&self) -> bool {
        self.renderer.is_none()
    }

    /// Discard the field and generate a new one (a remount: the clock
    /// restarts and the renderer reloads every buffer).
    pub(crate) fn regenerate(&mut self) {
        let seed = parse_seed(&self.seed_input);
        if seed.is_none() && !self.seed_input.trim().is_empty() {
            warn!(input = %self.seed_input, "Ignoring unparsable seed");
        }
        let generator = crate::core::GeneratorConfig {
            seed,
            ..self.config.generator.clone()
        };
        let field = StarField::generate(&generator, &self.config.appearance);
        info!(
            stars = field.len(),
            seed = field.seed(),
            overlap = generator.overlap,
            wrap = %generator.wrap_strategy,
            "Star field regenerated"
        );

        *self.field.lock() = field;
        self.revision += 1;
        self.clock.restart_at(crate::time::now_seconds());
    }

    fn tick(&mut self) {
        let frame = self.clock.tick();
        self.camera.advance(frame.delta as f32);

        let oscillator = SizeOscillator::from(self.config.oscillation);
        let mut field = self.field.lock();
        field.tick(&oscillator, frame.elapsed);
        self.size_range = field.sizes().range();
    }
}

/// Empty input means "draw a fresh seed"
fn parse_seed(input: &str) -> Option<u64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        trimmed.parse().ok()
    }
}

impl eframe::App for StarSphereApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Continuous animation
        ctx.request_repaint();
        self.fps_counter.tick();

        self.tick();

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::new().fill(crate::theme::colors::BG_PANEL).inner_margin(4.0))
            .show(ctx, |ui| {
                self.render_header(ui);
            });

        // Settings sidebar (left, must be shown before CentralPanel)
        if self.show_settings {
            self.render_settings(ctx);
        }

        if self.show_diagnostics {
            self.draw_diagnostics(ctx);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(crate::theme::rgb_to_color32(self.config.appearance.clear_color)))
            .show(ctx, |ui| {
                self.render_sphere(ui);
            });
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        if let (Some(gl), Some(renderer)) = (gl, self.renderer.as_ref()) {
            renderer.lock().destroy(gl);
            info!("Star renderer destroyed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_seed_accepts_numbers_and_blank() {
        assert_eq!(parse_seed("42"), Some(42));
        assert_eq!(parse_seed("  7 "), Some(7));
        assert_eq!(parse_seed(""), None);
        assert_eq!(parse_seed("   "), None);
        assert_eq!(parse_seed("abc"), None);
        assert_eq!(parse_seed("-1"), None);
    }
}
