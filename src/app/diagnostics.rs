//! Stats overlay: clock, size range, camera and render path

use eframe::egui;
use crate::theme::colors;
use super::StarSphereApp;

/// Format a count with human-readable suffix (1234 → "1234", 25000 → "25.0k")
fn format_count(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 10_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Seconds as `m:ss.s`
fn format_elapsed(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor();
    format!("{}:{:04.1}", minutes as u64, seconds - minutes * 60.0)
}

impl StarSphereApp {
    pub(crate) fn draw_diagnostics(&self, ctx: &egui::Context) {
        let (indicator, mode_text, mode_color) = if self.use_cpu() {
            ("○", "CPU painter", colors::WARNING)
        } else {
            ("●", "GL points", egui::Color32::from_rgb(100, 200, 100))
        };
        let title = egui::RichText::new(format!("{} {}", indicator, mode_text)).color(mode_color);

        let drawn = match &self.renderer {
            Some(renderer) => renderer.lock().point_count(),
            None => self.cpu_drawn,
        };
        let categories = self.field.lock().category_count();

        egui::Area::new(egui::Id::new("diagnostics_area"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-8.0, 36.0))
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(colors::BG_OVERLAY)
                    .corner_radius(4.0)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        ui.set_min_width(220.0);
                        egui::CollapsingHeader::new(title)
                            .default_open(true)
                            .show(ui, |ui| {
                                ui.label(
                                    egui::RichText::new(format!(
                                        "{} drawn / {} categories",
                                        format_count(drawn),
                                        categories,
                                    ))
                                    .color(colors::TEXT_SECONDARY),
                                );

                                ui.label(
                                    egui::RichText::new(format!(
                                        "t = {}",
                                        format_elapsed(self.clock.elapsed()),
                                    ))
                                    .color(colors::TEXT_MUTED),
                                );

                                if let Some((min, max)) = self.size_range {
                                    ui.label(
                                        egui::RichText::new(format!("size {:.4} .. {:.4}", min, max))
                                            .color(colors::TEXT_MUTED),
                                    );
                                }

                                let camera = &self.camera;
                                ui.label(
                                    egui::RichText::new(format!(
                                        "distance {:.2}  fov {:.0}°  az {:.0}°",
                                        camera.distance,
                                        camera.fov_y.to_degrees(),
                                        camera.azimuth.to_degrees(),
                                    ))
                                    .color(colors::TEXT_MUTED),
                                );

                                if camera.layout().compact {
                                    ui.label(
                                        egui::RichText::new("compact viewport")
                                            .color(colors::USER_ACCENT),
                                    );
                                }
                            });
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_suffixes() {
        assert_eq!(format_count(1005), "1005");
        assert_eq!(format_count(25_000), "25.0k");
        assert_eq!(format_count(3_200_000), "3.2M");
    }

    #[test]
    fn elapsed_minutes_and_seconds() {
        assert_eq!(format_elapsed(0.0), "0:00.0");
        assert_eq!(format_elapsed(75.3), "1:15.3");
        assert_eq!(format_elapsed(-3.0), "0:00.0");
    }
}
