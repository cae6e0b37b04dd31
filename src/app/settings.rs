//! Settings sidebar: camera, oscillation, generator and seed

use eframe::egui;
use crate::core::WrapStrategy;
use crate::theme::colors;
use super::StarSphereApp;

impl StarSphereApp {
    pub(crate) fn render_settings(&mut self, ctx: &egui::Context) {
        let half_width = ctx.screen_rect().width() * 0.18;
        egui::SidePanel::left("settings")
            .default_width(half_width)
            .min_width(240.0)
            .resizable(true)
            .frame(egui::Frame::new().fill(colors::BG_PANEL).inner_margin(8.0))
            .show(ctx, |ui| {
                let group_frame = egui::Frame::new()
                    .stroke(egui::Stroke::new(1.0, colors::BORDER))
                    .corner_radius(4.0)
                    .inner_margin(6.0);

                egui::ScrollArea::vertical().show(ui, |ui| {
                    group_frame.show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        self.camera_settings(ui);
                    });

                    ui.add_space(8.0);

                    group_frame.show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        self.oscillation_settings(ui);
                    });

                    ui.add_space(8.0);

                    group_frame.show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        self.generator_settings(ui);
                    });
                });
            });
    }

    fn camera_settings(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Camera:").color(colors::TEXT_MUTED));

        ui.checkbox(&mut self.camera.auto_rotate, "Auto-rotate");
        if self.camera.auto_rotate {
            let speed_label = format!("Rotate speed: {:.2}", self.camera.auto_rotate_speed);
            ui.label(egui::RichText::new(speed_label).color(colors::TEXT_MUTED));
            ui.spacing_mut().slider_width = ui.available_width();
            let speed_response = ui.add(
                egui::Slider::new(&mut self.camera.auto_rotate_speed, 0.05..=4.0)
                    .logarithmic(true)
                    .clamping(egui::SliderClamping::Always)
                    .show_value(false),
            );
            if speed_response.double_clicked() {
                self.camera.auto_rotate_speed = self.config.camera.auto_rotate_speed;
            }
        }

        ui.horizontal(|ui| {
            ui.checkbox(&mut self.camera.enable_rotate, "Rotate");
            ui.checkbox(&mut self.camera.enable_zoom, "Zoom");
            ui.checkbox(&mut self.camera.enable_pan, "Pan");
        });

        if ui.button("Reset camera").clicked() {
            let width = self.last_viewport.map_or(f32::INFINITY, |v| v.x);
            self.camera.reset(&self.config.camera, width);
        }
    }

    fn oscillation_settings(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Twinkle:").color(colors::TEXT_MUTED));
        ui.spacing_mut().slider_width = ui.available_width() * 0.6;

        let oscillation = &mut self.config.oscillation;
        ui.add(
            egui::Slider::new(&mut oscillation.amplitude, 0.0..=0.1)
                .text("amplitude")
                .clamping(egui::SliderClamping::Always),
        );
        ui.add(
            egui::Slider::new(&mut oscillation.frequency, 0.0..=10.0)
                .text("frequency")
                .clamping(egui::SliderClamping::Always),
        );
    }

    fn generator_settings(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Field:").color(colors::TEXT_MUTED));

        let generator = &mut self.config.generator;
        egui::Grid::new("generator_grid")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                ui.label("Background");
                ui.add(egui::DragValue::new(&mut generator.background_count).range(0..=20_000));
                ui.end_row();

                ui.label("Users");
                ui.add(egui::DragValue::new(&mut generator.user_count).range(0..=1_000));
                ui.end_row();

                ui.label("Categories");
                ui.add(egui::DragValue::new(&mut generator.category_count).range(1..=64));
                ui.end_row();
            });

        ui.add(
            egui::Slider::new(&mut generator.overlap, 0.0..=0.5)
                .text("overlap")
                .clamping(egui::SliderClamping::Always),
        );

        ui.label(egui::RichText::new("Seam wrap:").color(colors::TEXT_MUTED));
        for &strategy in WrapStrategy::ALL {
            ui.radio_value(&mut generator.wrap_strategy, strategy, strategy.label());
        }

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label("Seed");
            ui.add(
                egui::TextEdit::singleline(&mut self.seed_input)
                    .hint_text("random")
                    .desired_width(120.0),
            );
        });

        let total = generator.background_count + generator.user_count;
        ui.label(
            egui::RichText::new(format!("{} stars after regenerate", total))
                .color(colors::TEXT_MUTED)
                .small(),
        );

        if ui.button("Regenerate").clicked() {
            self.regenerate();
        }
    }
}
