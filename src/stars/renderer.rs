//! GL point renderer for the star field.
//!
//! Draws directly into egui's framebuffer through a glow paint callback.
//! Positions and colors are uploaded once per field revision; the size
//! buffer is re-uploaded only when the field marks it dirty.

use eframe::{egui, egui_glow, glow};
use egui::mutex::Mutex;
use glam::Mat4;
use glow::HasContext as _;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::StarField;

const ATTR_POSITION: u32 = 0;
const ATTR_SIZE: u32 = 1;
const ATTR_COLOR: u32 = 2;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create {0}: {1}")]
    Create(&'static str, String),

    #[error("{0} shader compile error: {1}")]
    Compile(&'static str, String),

    #[error("program link error: {0}")]
    Link(String),
}

/// Per-frame uniforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarUniforms {
    pub model_view: Mat4,
    pub projection: Mat4,
    /// Numerator of the depth attenuation, `size * scale / -view_z`
    pub size_scale: f32,
}

/// Buffer work needed before a paint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncAction {
    /// Field revision changed: every buffer is replaced
    Reload,
    /// Same field, sizes changed since the last upload
    UploadSizes,
    Nothing,
}

impl SyncAction {
    fn decide(uploaded: Option<u64>, revision: u64, sizes_dirty: bool) -> Self {
        if uploaded != Some(revision) {
            SyncAction::Reload
        } else if sizes_dirty {
            SyncAction::UploadSizes
        } else {
            SyncAction::Nothing
        }
    }
}

pub struct StarRenderer {
    program: glow::Program,
    vertex_array: glow::VertexArray,
    position_buffer: glow::Buffer,
    color_buffer: glow::Buffer,
    size_buffer: glow::Buffer,
    point_count: i32,
    /// Field revision currently on the GPU
    revision: Option<u64>,
}

impl StarRenderer {
    pub fn new(gl: &glow::Context) -> Result<Self, RenderError> {
        let shader_version = egui_glow::ShaderVersion::get(gl);
        let program = unsafe { link_program(gl, shader_version)? };

        unsafe {
            let vertex_array = gl
                .create_vertex_array()
                .map_err(|e| RenderError::Create("vertex array", e))?;
            let position_buffer = gl
                .create_buffer()
                .map_err(|e| RenderError::Create("position buffer", e))?;
            let color_buffer = gl
                .create_buffer()
                .map_err(|e| RenderError::Create("color buffer", e))?;
            let size_buffer = gl
                .create_buffer()
                .map_err(|e| RenderError::Create("size buffer", e))?;

            gl.bind_vertex_array(Some(vertex_array));
            for (buffer, location, components) in [
                (position_buffer, ATTR_POSITION, 3),
                (size_buffer, ATTR_SIZE, 1),
                (color_buffer, ATTR_COLOR, 3),
            ] {
                gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
                gl.vertex_attrib_pointer_f32(location, components, glow::FLOAT, false, 0, 0);
                gl.enable_vertex_attrib_array(location);
            }
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            info!(?shader_version, "Star renderer initialized");

            Ok(Self {
                program,
                vertex_array,
                position_buffer,
                color_buffer,
                size_buffer,
                point_count: 0,
                revision: None,
            })
        }
    }

    /// Bring GPU buffers in line with `field`. A new revision reloads every
    /// buffer; otherwise only a dirty size buffer is re-uploaded.
    pub fn sync(&mut self, gl: &glow::Context, field: &mut StarField, revision: u64) {
        let dirty = field.sizes_mut().take_dirty();
        match SyncAction::decide(self.revision, revision, dirty) {
            SyncAction::Reload => {
                unsafe {
                    upload(gl, self.position_buffer, field.positions(), glow::STATIC_DRAW);
                    upload(gl, self.color_buffer, field.colors(), glow::STATIC_DRAW);
                    upload(gl, self.size_buffer, field.sizes().as_slice(), glow::DYNAMIC_DRAW);
                    gl.bind_buffer(glow::ARRAY_BUFFER, None);
                }
                self.point_count = field.len() as i32;
                self.revision = Some(revision);
                debug!(revision, points = self.point_count, "Star buffers reloaded");
            }
            SyncAction::UploadSizes => unsafe {
                gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.size_buffer));
                gl.buffer_sub_data_u8_slice(
                    glow::ARRAY_BUFFER,
                    0,
                    bytemuck::cast_slice(field.sizes().as_slice()),
                );
                gl.bind_buffer(glow::ARRAY_BUFFER, None);
            },
            SyncAction::Nothing => {}
        }
    }

    pub fn paint(&self, gl: &glow::Context, uniforms: &StarUniforms) {
        if self.point_count == 0 {
            return;
        }
        unsafe {
            gl.use_program(Some(self.program));
            // Locations are looked up per paint: web handles are not Send
            gl.uniform_matrix_4_f32_slice(
                gl.get_uniform_location(self.program, "u_model_view").as_ref(),
                false,
                &uniforms.model_view.to_cols_array(),
            );
            gl.uniform_matrix_4_f32_slice(
                gl.get_uniform_location(self.program, "u_projection").as_ref(),
                false,
                &uniforms.projection.to_cols_array(),
            );
            gl.uniform_1_f32(
                gl.get_uniform_location(self.program, "u_size_scale").as_ref(),
                uniforms.size_scale,
            );

            // Additive glow, no depth writes
            gl.enable(glow::BLEND);
            gl.blend_equation(glow::FUNC_ADD);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE);
            gl.disable(glow::DEPTH_TEST);
            gl.depth_mask(false);
            #[cfg(not(target_arch = "wasm32"))]
            gl.enable(glow::PROGRAM_POINT_SIZE);

            gl.bind_vertex_array(Some(self.vertex_array));
            gl.draw_arrays(glow::POINTS, 0, self.point_count);
            gl.bind_vertex_array(None);
            gl.use_program(None);
        }
    }

    pub fn point_count(&self) -> usize {
        self.point_count as usize
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_program(self.program);
            gl.delete_vertex_array(self.vertex_array);
            gl.delete_buffer(self.position_buffer);
            gl.delete_buffer(self.color_buffer);
            gl.delete_buffer(self.size_buffer);
        }
    }
}

/// Paint callback that syncs the field and draws it inside `rect`
pub fn star_callback(
    rect: egui::Rect,
    renderer: Arc<Mutex<StarRenderer>>,
    field: Arc<Mutex<StarField>>,
    revision: u64,
    uniforms: StarUniforms,
) -> egui::PaintCallback {
    egui::PaintCallback {
        rect,
        callback: Arc::new(egui_glow::CallbackFn::new(move |_info, painter| {
            let gl = painter.gl();
            let mut field = field.lock();
            let mut renderer = renderer.lock();
            renderer.sync(gl, &mut field, revision);
            renderer.paint(gl, &uniforms);
        })),
    }
}

unsafe fn upload(gl: &glow::Context, buffer: glow::Buffer, data: &[f32], usage: u32) {
    gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
    gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, bytemuck::cast_slice(data), usage);
}

unsafe fn link_program(
    gl: &glow::Context,
    shader_version: egui_glow::ShaderVersion,
) -> Result<glow::Program, RenderError> {
    let program = gl
        .create_program()
        .map_err(|e| RenderError::Create("program", e))?;

    let header = format!(
        "{}\n#define NEW_SHADER_INTERFACE {}\n",
        shader_version.version_declaration(),
        shader_version.is_new_shader_interface() as i32,
    );
    let sources = [
        (glow::VERTEX_SHADER, "vertex", include_str!("shader.vert")),
        (glow::FRAGMENT_SHADER, "fragment", include_str!("shader.frag")),
    ];

    let mut shaders = Vec::with_capacity(sources.len());
    for (kind, stage, source) in sources {
        let shader = gl
            .create_shader(kind)
            .map_err(|e| RenderError::Create("shader", e))?;
        gl.shader_source(shader, &format!("{header}{source}"));
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            for s in shaders {
                gl.delete_shader(s);
            }
            gl.delete_program(program);
            return Err(RenderError::Compile(stage, log));
        }
        gl.attach_shader(program, shader);
        shaders.push(shader);
    }

    gl.bind_attrib_location(program, ATTR_POSITION, "a_position");
    gl.bind_attrib_location(program, ATTR_SIZE, "a_size");
    gl.bind_attrib_location(program, ATTR_COLOR, "a_color");
    gl.link_program(program);

    let linked = gl.get_program_link_status(program);
    for shader in shaders {
        gl.detach_shader(program, shader);
        gl.delete_shader(shader);
    }
    if !linked {
        let log = gl.get_program_info_log(program);
        gl.delete_program(program);
        return Err(RenderError::Link(log));
    }
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sync_reloads() {
        assert_eq!(SyncAction::decide(None, 0, false), SyncAction::Reload);
        assert_eq!(SyncAction::decide(None, 0, true), SyncAction::Reload);
    }

    #[test]
    fn new_revision_reloads_even_when_clean() {
        assert_eq!(SyncAction::decide(Some(3), 4, false), SyncAction::Reload);
        assert_eq!(SyncAction::decide(Some(3), 4, true), SyncAction::Reload);
    }

    #[test]
    fn same_revision_uploads_only_dirty_sizes() {
        assert_eq!(SyncAction::decide(Some(4), 4, true), SyncAction::UploadSizes);
        assert_eq!(SyncAction::decide(Some(4), 4, false), SyncAction::Nothing);
    }
}
