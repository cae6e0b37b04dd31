//! Header bar with controls and status

use eframe::egui;
use crate::theme::colors;
use crate::time::now_seconds;
use super::StarSphereApp;

impl StarSphereApp {
    pub(crate) fn render_header(&mut self, ui: &mut egui::Ui) {
        let (background, users, seed) = {
            let field = self.field.lock();
            (field.background_count(), field.user_count(), field.seed())
        };

        ui.horizontal(|ui| {
            let settings_text = if self.show_settings { "Settings <<<" } else { "Settings >>>" };
            if ui.button(egui::RichText::new(settings_text)).clicked() {
                self.show_settings = !self.show_settings;
            }

            ui.add_space(10.0);
            ui.label(egui::RichText::new("Star Sphere").color(colors::TEXT_PRIMARY).strong());

            // RIGHT: status and stats (right-to-left order)
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let stats_text = if self.show_diagnostics { "Stats ●" } else { "Stats ○" };
                if ui.selectable_label(self.show_diagnostics, stats_text).clicked() {
                    self.show_diagnostics = !self.show_diagnostics;
                }

                ui.add_space(10.0);

                ui.label(
                    egui::RichText::new(format!("seed {}", seed))
                        .color(colors::TEXT_MUTED),
                );
                ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED));

                ui.label(
                    egui::RichText::new(format!("{} users", users))
                        .color(colors::USER_ACCENT),
                );
                ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED));

                ui.label(
                    egui::RichText::new(star_count_label(background))
                        .color(colors::TEXT_MUTED),
                );
                ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED));

                ui.label(
                    egui::RichText::new(format!("{:.0} fps", self.fps_counter.fps()))
                        .color(colors::TEXT_SECONDARY),
                );

                if self.use_cpu() {
                    ui.add_space(10.0);
                    ui.colored_label(colors::WARNING, "CPU");
                }
            });
        });
    }
}

/// Background count readout; users are shown separately next to it
fn star_count_label(background: usize) -> String {
    format!("{} background", background)
}

/// FPS counter over a sliding window of frame timestamps
pub struct FpsCounter {
    frames: std::collections::VecDeque<f64>,
    window: usize,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::with_window(60)
    }

    pub fn with_window(window: usize) -> Self {
        let window = window.max(2);
        Self {
            frames: std::collections::VecDeque::with_capacity(window + 1),
            window,
        }
    }

    pub fn tick(&mut self) {
        self.tick_at(now_seconds());
    }

    pub fn tick_at(&mut self, now: f64) {
        self.frames.push_back(now);
        if self.frames.len() > self.window {
            self.frames.pop_front();
        }
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.frames.front(), self.frames.back()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if self.frames.len() < 2 || elapsed <= 0.0 {
            return 0.0;
        }
        (self.frames.len() as f64 - 1.0) / elapsed
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_from_steady_frames() {
        let mut fps = FpsCounter::with_window(10);
        for i in 0..30 {
            fps.tick_at(i as f64 / 60.0);
        }
        assert!((fps.fps() - 60.0).abs() < 1e-6);
    }

    #[test]
    fn window_is_clamped_before_sizing() {
        let mut fps = FpsCounter::with_window(0);
        assert_eq!(fps.window, 2);
        assert!(fps.frames.capacity() >= 3);
        for i in 0..5 {
            fps.tick_at(i as f64);
        }
        assert_eq!(fps.frames.len(), 2);
        assert!((fps.fps() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn star_count_names_background_only() {
        assert_eq!(star_count_label(1000), "1000 background");
    }

    #[test]
    fn fps_needs_two_frames() {
        let mut fps = FpsCounter::new();
        assert_eq!(fps.fps(), 0.0);
        fps.tick_at(1.0);
        assert_eq!(fps.fps(), 0.0);
        fps.tick_at(1.0);
        assert_eq!(fps.fps(), 0.0);
    }
}
