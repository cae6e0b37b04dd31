//! Orbit camera
//!
//! Spherical orbit around a target point with rotate / zoom / pan,
//! auto-rotation and a responsive field of view for narrow viewports.
//! Angles follow the usual orbit-control convention: azimuth around +Y
//! (0 = looking down -Z), polar angle measured from +Y.

use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::{PI, TAU};

use super::config::CameraConfig;

/// Keeps the eye off the poles so the up vector stays defined
const POLAR_EPSILON: f32 = 1e-4;
/// Distance factor per zoom step
const ZOOM_SCALE: f32 = 0.95;

const NEAR: f32 = 0.1;
const FAR: f32 = 100.0;

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    /// Angle around +Y (radians)
    pub azimuth: f32,
    /// Angle from +Y (radians), kept within (0, π)
    pub polar: f32,
    pub distance: f32,
    /// Vertical field of view (radians)
    pub fov_y: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    min_distance: f32,
    max_distance: f32,
    layout: CameraLayout,
}

/// Viewport class selected by `fit_viewport`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraLayout {
    pub compact: bool,
}

/// Projected star in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: Vec2,
    /// Distance in front of the eye along the view axis (positive)
    pub depth: f32,
}

impl OrbitCamera {
    pub fn new(config: &CameraConfig) -> Self {
        let mut camera = Self {
            target: Vec3::ZERO,
            azimuth: 0.0,
            polar: PI / 2.0,
            distance: config.distance,
            fov_y: config.fov_deg.to_radians(),
            auto_rotate: config.auto_rotate,
            auto_rotate_speed: config.auto_rotate_speed,
            enable_rotate: config.enable_rotate,
            enable_zoom: config.enable_zoom,
            enable_pan: config.enable_pan,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            layout: CameraLayout { compact: false },
        };
        camera.clamp();
        camera
    }

    /// Eye position in world space
    pub fn eye(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        self.target
            + self.distance * Vec3::new(sin_polar * sin_az, cos_polar, sin_polar * cos_az)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    /// OpenGL-style projection (clip z in [-1, 1])
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, aspect.max(1e-3), NEAR, FAR)
    }

    /// Drag rotation. A drag across the full viewport height is one turn.
    pub fn rotate(&mut self, delta_px: Vec2, viewport_height: f32) {
        if !self.enable_rotate || viewport_height <= 0.0 {
            return;
        }
        self.azimuth -= TAU * delta_px.x / viewport_height;
        self.polar -= TAU * delta_px.y / viewport_height;
        self.clamp();
    }

    /// Positive steps zoom in, negative zoom out
    pub fn zoom(&mut self, steps: f32) {
        if !self.enable_zoom {
            return;
        }
        self.distance *= ZOOM_SCALE.powf(steps);
        self.clamp();
    }

    /// Move the target in the view plane so the scene follows the pointer.
    pub fn pan(&mut self, delta_px: Vec2, viewport_height: f32) {
        if !self.enable_pan || viewport_height <= 0.0 {
            return;
        }
        let view = self.view_matrix();
        // Rows of the view rotation are the camera basis in world space
        let right = view.row(0).truncate();
        let up = view.row(1).truncate();
        let visible_height = 2.0 * self.distance * (self.fov_y / 2.0).tan();
        let scale = visible_height / viewport_height;
        self.target += -right * delta_px.x * scale + up * delta_px.y * scale;
    }

    /// Auto-rotation: `speed` = 1 is one turn per minute.
    pub fn advance(&mut self, dt: f32) {
        if self.auto_rotate && dt > 0.0 {
            self.azimuth -= TAU / 60.0 * self.auto_rotate_speed * dt;
            self.azimuth = self.azimuth.rem_euclid(TAU);
        }
    }

    /// Apply the compact or regular fov/distance for a viewport width.
    /// Returns true when the layout class changed.
    pub fn fit_viewport(&mut self, width: f32, config: &CameraConfig) -> bool {
        let compact = width < config.compact_width;
        if compact {
            self.distance = config.compact_distance;
            self.fov_y = config.compact_fov_deg.to_radians();
        } else {
            self.distance = config.distance;
            self.fov_y = config.fov_deg.to_radians();
        }
        self.clamp();
        let changed = self.layout.compact != compact;
        self.layout = CameraLayout { compact };
        changed
    }

    pub fn layout(&self) -> CameraLayout {
        self.layout
    }

    /// Back to the initial orbit around the origin
    pub fn reset(&mut self, config: &CameraConfig, viewport_width: f32) {
        self.target = Vec3::ZERO;
        self.azimuth = 0.0;
        self.polar = PI / 2.0;
        self.fit_viewport(viewport_width, config);
    }

    pub fn distance_limits(&self) -> (f32, f32) {
        (self.min_distance, self.max_distance)
    }

    /// World point to viewport pixels (origin top-left), None when behind
    /// the eye or outside the clip volume.
    pub fn project(&self, point: Vec3, viewport: Vec2) -> Option<Projected> {
        let view_pos = self.view_matrix().transform_point3(point);
        if view_pos.z >= -NEAR {
            return None;
        }
        let clip = self.projection_matrix(viewport.x / viewport.y) * view_pos.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        if ndc.z.abs() > 1.0 {
            return None;
        }
        let screen = Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.x,
            (1.0 - ndc.y) * 0.5 * viewport.y,
        );
        Some(Projected {
            screen,
            depth: -view_pos.z,
        })
    }

    fn clamp(&mut self) {
        self.polar = self.polar.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(&CameraConfig::default())
    }

    #[test]
    fn initial_eye_on_positive_z() {
        let cam = camera();
        assert!((cam.eye() - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-5);
        assert!((cam.fov_y - 60f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn origin_projects_to_viewport_center() {
        let cam = camera();
        let p = cam.project(Vec3::ZERO, Vec2::new(800.0, 600.0)).unwrap();
        assert!((p.screen - Vec2::new(400.0, 300.0)).length() < 1e-3);
        assert!((p.depth - 3.0).abs() < 1e-5);
    }

    #[test]
    fn up_is_up_on_screen() {
        let cam = camera();
        let p = cam.project(Vec3::new(0.0, 0.5, 0.0), Vec2::new(800.0, 600.0)).unwrap();
        assert!(p.screen.y < 300.0);
    }

    #[test]
    fn points_behind_eye_are_culled() {
        let cam = camera();
        assert!(cam.project(Vec3::new(0.0, 0.0, 5.0), Vec2::new(800.0, 600.0)).is_none());
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = camera();
        cam.zoom(1000.0);
        assert_eq!(cam.distance, 0.5);
        cam.zoom(-1000.0);
        assert_eq!(cam.distance, 3.0);
        cam.zoom(1.0);
        assert!((cam.distance - 2.85).abs() < 1e-5);
    }

    #[test]
    fn disabled_controls_do_nothing() {
        let mut cam = camera();
        cam.enable_zoom = false;
        cam.enable_rotate = false;
        cam.enable_pan = false;
        cam.zoom(5.0);
        cam.rotate(Vec2::new(100.0, 100.0), 600.0);
        cam.pan(Vec2::new(100.0, 100.0), 600.0);
        assert_eq!(cam.distance, 3.0);
        assert_eq!(cam.azimuth, 0.0);
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn full_height_drag_is_one_turn() {
        let mut cam = camera();
        cam.rotate(Vec2::new(600.0, 0.0), 600.0);
        assert!((cam.azimuth + TAU).abs() < 1e-4);
        assert!((cam.eye() - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-3);
    }

    #[test]
    fn polar_angle_is_clamped_off_the_poles() {
        let mut cam = camera();
        cam.rotate(Vec2::new(0.0, 10_000.0), 600.0);
        assert!(cam.polar >= POLAR_EPSILON);
        cam.rotate(Vec2::new(0.0, -10_000.0), 600.0);
        assert!(cam.polar <= PI - POLAR_EPSILON);
        assert!(cam.view_matrix().is_finite());
    }

    #[test]
    fn pan_moves_target_against_drag() {
        let mut cam = camera();
        cam.pan(Vec2::new(100.0, 0.0), 600.0);
        assert!(cam.target.x < 0.0);
        assert!(cam.target.y.abs() < 1e-6);
        cam.pan(Vec2::new(0.0, 100.0), 600.0);
        assert!(cam.target.y > 0.0);
    }

    #[test]
    fn auto_rotate_advances_azimuth() {
        let mut cam = camera();
        cam.advance(60.0);
        // speed 0.5: half a turn per minute
        assert!((cam.azimuth - PI).abs() < 1e-3);

        cam.auto_rotate = false;
        let before = cam.azimuth;
        cam.advance(10.0);
        assert_eq!(cam.azimuth, before);
    }

    #[test]
    fn narrow_viewport_widens_fov() {
        let config = CameraConfig::default();
        let mut cam = camera();
        assert!(cam.fit_viewport(400.0, &config));
        assert!((cam.fov_y - 80f32.to_radians()).abs() < 1e-6);
        // Compact distance 4 is clamped by the max orbit distance
        assert_eq!(cam.distance, 3.0);
        assert!(cam.layout().compact);

        assert!(!cam.fit_viewport(500.0, &config));
        assert!(cam.fit_viewport(1200.0, &config));
        assert!((cam.fov_y - 60f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn reset_restores_initial_orbit() {
        let config = CameraConfig::default();
        let mut cam = camera();
        cam.rotate(Vec2::new(120.0, 40.0), 600.0);
        cam.pan(Vec2::new(30.0, 30.0), 600.0);
        cam.zoom(4.0);
        cam.reset(&config, 1024.0);
        assert!((cam.eye() - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-5);
    }
}
