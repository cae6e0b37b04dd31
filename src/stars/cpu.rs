//! CPU star painter (fallback when the GL renderer is unavailable)

use eframe::egui;
use glam::{Vec2, Vec3};

use crate::core::{OrbitCamera, StarField};

/// Relative radii and weights of the rings approximating the shader's
/// smoothstep falloff
const GLOW_RINGS: [(f32, f32); 3] = [(1.0, 0.15), (0.6, 0.35), (0.3, 0.6)];

/// Paint every star of `field` into `rect` with egui shapes.
/// Returns the number of stars that landed in front of the camera.
pub fn paint_stars_cpu(
    painter: &egui::Painter,
    rect: egui::Rect,
    camera: &OrbitCamera,
    field: &StarField,
    size_scale: f32,
    pixels_per_point: f32,
) -> usize {
    let viewport = Vec2::new(rect.width(), rect.height());
    let sizes = field.sizes().as_slice();
    let mut drawn = 0;

    for (i, xyz) in field.positions().chunks_exact(3).enumerate() {
        let Some(projected) = camera.project(Vec3::from_slice(xyz), viewport) else {
            continue;
        };
        // Same attenuation as the vertex stage, converted from pixels to points
        let diameter = sizes[i] * size_scale / projected.depth / pixels_per_point;
        if diameter <= 0.0 {
            continue;
        }
        let center = rect.min + egui::vec2(projected.screen.x, projected.screen.y);
        if !rect.contains(center) {
            continue;
        }

        let rgb = &field.colors()[i * 3..i * 3 + 3];
        let base = egui::Rgba::from_rgb(rgb[0], rgb[1], rgb[2]);
        for (radius, weight) in GLOW_RINGS {
            let color: egui::Color32 = (base * weight).into();
            painter.circle_filled(center, 0.5 * diameter * radius, color.additive());
        }
        drawn += 1;
    }
    drawn
}
