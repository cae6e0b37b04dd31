//! Platform-agnostic core module - shared between WASM dashboard and CLI

pub mod camera;
pub mod config;
pub mod field;
pub mod oscillator;
pub mod sampling;

pub use camera::{OrbitCamera, Projected};
pub use config::{AppearanceConfig, CameraConfig, ConfigError, GeneratorConfig, OscillationConfig, SphereConfig};
pub use field::{FieldExport, StarField, StarKind, StarPoint};
pub use oscillator::{SizeBuffer, SizeOscillator};
pub use sampling::{Sector, WrapStrategy};
