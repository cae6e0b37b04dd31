//! Sphere configuration
//!
//! Every field has a default matching the stock visualization, so a config
//! source only needs to name the values it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::sampling::WrapStrategy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config validation error: {0}")]
    Invalid(String),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub generator: GeneratorConfig,
    pub oscillation: OscillationConfig,
    pub appearance: AppearanceConfig,
    pub camera: CameraConfig,
}

/// Point generator parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub background_count: usize,
    pub user_count: usize,
    pub category_count: u32,
    /// Sector overlap as a fraction of one sector width
    pub overlap: f64,
    pub wrap_strategy: WrapStrategy,
    /// Fixed seed; `None` draws a fresh one from the OS on every generation
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            background_count: 1000,
            user_count: 5,
            category_count: 10,
            overlap: 0.0,
            wrap_strategy: WrapStrategy::default(),
            seed: None,
        }
    }
}

/// Twinkle parameters: `size = base + amplitude * sin(frequency * t + i)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OscillationConfig {
    pub amplitude: f32,
    pub frequency: f32,
}

impl Default for OscillationConfig {
    fn default() -> Self {
        Self {
            amplitude: 0.02,
            frequency: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    pub background_size: f32,
    pub user_size: f32,
    pub background_color: [f32; 3],
    pub user_color: [f32; 3],
    /// Canvas clear color (#000010)
    pub clear_color: [f32; 3],
    /// Numerator of the point size attenuation, `size * scale / -view_z`
    pub size_scale: f32,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            background_size: 0.03,
            user_size: 0.1,
            background_color: [1.0, 1.0, 1.0],
            user_color: [0.3, 0.5, 1.0],
            clear_color: [0.0, 0.0, 16.0 / 255.0],
            size_scale: 300.0,
        }
    }
}

/// Orbit camera settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_deg: f32,
    pub distance: f32,
    /// Viewports narrower than this use the compact fov/distance
    pub compact_width: f32,
    pub compact_fov_deg: f32,
    pub compact_distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub auto_rotate: bool,
    /// One full turn takes `60 / speed` seconds
    pub auto_rotate_speed: f32,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 60.0,
            distance: 3.0,
            compact_width: 600.0,
            compact_fov_deg: 80.0,
            compact_distance: 4.0,
            min_distance: 0.5,
            max_distance: 3.0,
            auto_rotate: true,
            auto_rotate_speed: 0.5,
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
        }
    }
}

impl SphereConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SphereConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Run all validations, collecting every violation into one error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let g = &self.generator;
        if g.category_count == 0 {
            errors.push("generator.category_count must be at least 1".into());
        }
        validate_range(&mut errors, "generator.overlap", g.overlap, 0.0, 0.5);

        let o = &self.oscillation;
        validate_non_negative(&mut errors, "oscillation.amplitude", o.amplitude);
        validate_non_negative(&mut errors, "oscillation.frequency", o.frequency);

        let a = &self.appearance;
        validate_positive(&mut errors, "appearance.background_size", a.background_size);
        validate_positive(&mut errors, "appearance.user_size", a.user_size);
        validate_positive(&mut errors, "appearance.size_scale", a.size_scale);
        validate_color(&mut errors, "appearance.background_color", a.background_color);
        validate_color(&mut errors, "appearance.user_color", a.user_color);
        validate_color(&mut errors, "appearance.clear_color", a.clear_color);

        let c = &self.camera;
        validate_fov(&mut errors, "camera.fov_deg", c.fov_deg);
        validate_fov(&mut errors, "camera.compact_fov_deg", c.compact_fov_deg);
        validate_positive(&mut errors, "camera.min_distance", c.min_distance);
        if c.min_distance > c.max_distance {
            errors.push(format!(
                "camera.min_distance ({}) exceeds camera.max_distance ({})",
                c.min_distance, c.max_distance
            ));
        }
        validate_positive(&mut errors, "camera.distance", c.distance);
        validate_positive(&mut errors, "camera.compact_distance", c.compact_distance);
        validate_non_negative(&mut errors, "camera.auto_rotate_speed", c.auto_rotate_speed);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors.join("; ")))
        }
    }
}

fn validate_range(errors: &mut Vec<String>, name: &str, value: f64, min: f64, max: f64) {
    if !(min..=max).contains(&value) {
        errors.push(format!("{name} must be within [{min}, {max}], got {value}"));
    }
}

fn validate_positive(errors: &mut Vec<String>, name: &str, value: f32) {
    if !(value > 0.0 && value.is_finite()) {
        errors.push(format!("{name} must be positive, got {value}"));
    }
}

fn validate_non_negative(errors: &mut Vec<String>, name: &str, value: f32) {
    if !(value >= 0.0 && value.is_finite()) {
        errors.push(format!("{name} must be non-negative, got {value}"));
    }
}

fn validate_fov(errors: &mut Vec<String>, name: &str, value: f32) {
    if !(value > 0.0 && value < 180.0) {
        errors.push(format!("{name} must be within (0, 180) degrees, got {value}"));
    }
}

fn validate_color(errors: &mut Vec<String>, name: &str, rgb: [f32; 3]) {
    if rgb.iter().any(|c| !(0.0..=1.0).contains(c)) {
        errors.push(format!("{name} components must be within [0, 1], got {rgb:?}"));
    }
}
