//! Sphere viewport: orbit input, responsive fit, GL or CPU star drawing

use eframe::egui;
use glam::Vec2;
use tracing::debug;

use crate::stars::{paint_stars_cpu, star_callback, StarUniforms};
use super::StarSphereApp;

/// Scroll points per zoom step
const SCROLL_PER_ZOOM_STEP: f32 = 50.0;

impl StarSphereApp {
    pub(crate) fn render_sphere(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        if rect.width() < 1.0 || rect.height() < 1.0 {
            return;
        }

        self.fit_to_viewport(rect.size());
        self.handle_orbit_input(ui, &response);

        if response.double_clicked() {
            self.camera.reset(&self.config.camera, rect.width());
        }

        let aspect = rect.width() / rect.height();
        match &self.renderer {
            Some(renderer) => {
                let uniforms = StarUniforms {
                    model_view: self.camera.view_matrix(),
                    projection: self.camera.projection_matrix(aspect),
                    size_scale: self.config.appearance.size_scale,
                };
                painter.add(star_callback(
                    rect,
                    renderer.clone(),
                    self.field.clone(),
                    self.revision,
                    uniforms,
                ));
            }
            None => {
                let field = self.field.lock();
                self.cpu_drawn = paint_stars_cpu(
                    &painter,
                    rect,
                    &self.camera,
                    &field,
                    self.config.appearance.size_scale,
                    ui.ctx().pixels_per_point(),
                );
            }
        }
    }

    /// Refit the camera whenever the viewport size changes
    fn fit_to_viewport(&mut self, size: egui::Vec2) {
        if self.last_viewport == Some(size) {
            return;
        }
        self.last_viewport = Some(size);
        if self.camera.fit_viewport(size.x, &self.config.camera) {
            debug!(
                width = size.x,
                compact = self.camera.layout().compact,
                fov = self.camera.fov_y.to_degrees(),
                distance = self.camera.distance,
                "Camera layout changed"
            );
        }
    }

    fn handle_orbit_input(&mut self, ui: &egui::Ui, response: &egui::Response) {
        let height = response.rect.height();

        // Two fingers: pinch zooms, translation pans. One finger arrives
        // as a primary drag below.
        if let Some(touch) = ui.input(|i| i.multi_touch()) {
            self.camera.pan(to_vec2(touch.translation_delta), height);
            if touch.zoom_delta > 0.0 && touch.zoom_delta != 1.0 {
                self.camera.zoom(touch.zoom_delta.ln() * 10.0);
            }
            return;
        }

        if response.dragged_by(egui::PointerButton::Primary) {
            self.camera.rotate(to_vec2(response.drag_delta()), height);
        } else if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.camera.pan(to_vec2(response.drag_delta()), height);
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.camera.zoom(scroll / SCROLL_PER_ZOOM_STEP);
            }
        }
    }
}

fn to_vec2(v: egui::Vec2) -> Vec2 {
    Vec2::new(v.x, v.y)
}
