//! Night-sky theme: near-black navy panels, white text, one blue accent

use egui::Color32;

/// Night-sky palette
pub mod colors {
    use super::Color32;

    // === Backgrounds ===
    pub const BG_SKY: Color32 = Color32::from_rgb(0, 0, 16);              // #000010 - canvas clear color
    pub const BG_PANEL: Color32 = Color32::from_rgb(6, 6, 24);            // #060618 - sidebars
    pub const BG_HOVER: Color32 = Color32::from_rgb(20, 20, 44);          // #14142C - hover states
    pub const BG_OVERLAY: Color32 = Color32::from_rgba_premultiplied(4, 4, 18, 200);

    // === Text ===
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(255, 255, 255);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(170, 170, 190);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(90, 90, 120);

    // === Lines & Borders ===
    pub const BORDER: Color32 = Color32::from_rgb(36, 36, 64);

    // === Stars ===
    pub const USER_ACCENT: Color32 = Color32::from_rgb(77, 128, 255);     // (0.3, 0.5, 1.0)
    pub const WARNING: Color32 = Color32::from_rgb(220, 170, 90);
}

/// `[0, 1]` rgb triple to an opaque egui color
pub fn rgb_to_color32(rgb: [f32; 3]) -> Color32 {
    let [r, g, b] = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    Color32::from_rgb(r, g, b)
}

/// Create the night-sky egui Visuals
pub fn night_visuals() -> egui::Visuals {
    use colors::*;

    let mut visuals = egui::Visuals::dark();

    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_SKY;
    visuals.faint_bg_color = BG_HOVER;

    visuals.override_text_color = Some(TEXT_PRIMARY);

    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, TEXT_MUTED);
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, BORDER);

    visuals.widgets.inactive.bg_fill = BG_PANEL;
    visuals.widgets.inactive.weak_bg_fill = BG_PANEL;
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, BORDER);

    visuals.widgets.hovered.bg_fill = BG_HOVER;
    visuals.widgets.hovered.weak_bg_fill = BG_HOVER;
    visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, USER_ACCENT.gamma_multiply(0.6));

    visuals.widgets.active.bg_fill = BG_HOVER;
    visuals.widgets.active.weak_bg_fill = BG_HOVER;
    visuals.widgets.active.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(1.0, USER_ACCENT);

    visuals.selection.bg_fill = USER_ACCENT.gamma_multiply(0.5);
    visuals.selection.stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);

    visuals.hyperlink_color = USER_ACCENT;

    // Flat panels over the sky
    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_conversion_matches_palette() {
        assert_eq!(rgb_to_color32([0.3, 0.5, 1.0]), colors::USER_ACCENT);
        assert_eq!(rgb_to_color32([0.0, 0.0, 16.0 / 255.0]), colors::BG_SKY);
        assert_eq!(rgb_to_color32([2.0, -1.0, 1.0]), Color32::from_rgb(255, 0, 255));
    }
}
