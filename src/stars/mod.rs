//! Star point rendering
//!
//! GPU path: GLSL point sprites with additive blending, drawn through a
//! glow paint callback. CPU path: the same stars projected on the CPU and
//! painted as additive circles, used when no GL context is available.

mod cpu;
mod renderer;

pub use cpu::paint_stars_cpu;
pub use renderer::{star_callback, RenderError, StarRenderer, StarUniforms};
