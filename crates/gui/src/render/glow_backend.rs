//! OpenGL implementation of [`GraphicsBackend`] on top of `glow`.

use glam::{Mat4, Vec3};
use glow::HasContext;
use shared::Color;

use super::backend::{ContextInfo, GraphicsBackend, Primitive, ShaderStage};

const VEC3_STRIDE: i32 = std::mem::size_of::<Vec3>() as i32;

impl GraphicsBackend for glow::Context {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type VertexArray = glow::VertexArray;
    type Buffer = glow::Buffer;

    fn context_info(&self) -> ContextInfo {
        unsafe {
            ContextInfo {
                version: self.get_parameter_string(glow::VERSION),
                vendor: self.get_parameter_string(glow::VENDOR),
                renderer: self.get_parameter_string(glow::RENDERER),
            }
        }
    }

    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<glow::Shader, String> {
        let kind = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe {
            let shader = self.create_shader(kind)?;
            self.shader_source(shader, source);
            HasContext::compile_shader(self, shader);
            if !self.get_shader_compile_status(shader) {
                let log = self.get_shader_info_log(shader);
                HasContext::delete_shader(self, shader);
                return Err(log);
            }
            Ok(shader)
        }
    }

    fn link_program(
        &self,
        vertex: glow::Shader,
        fragment: glow::Shader,
    ) -> Result<glow::Program, String> {
        unsafe {
            let program = self.create_program()?;
            self.attach_shader(program, vertex);
            self.attach_shader(program, fragment);
            HasContext::link_program(self, program);

            let linked = self.get_program_link_status(program);
            let log = if linked {
                String::new()
            } else {
                self.get_program_info_log(program)
            };

            self.detach_shader(program, vertex);
            self.detach_shader(program, fragment);

            if !linked {
                HasContext::delete_program(self, program);
                return Err(log);
            }
            Ok(program)
        }
    }

    fn delete_shader(&self, shader: glow::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn delete_program(&self, program: glow::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn create_vertex_array(&self) -> Result<glow::VertexArray, String> {
        unsafe { HasContext::create_vertex_array(self) }
    }

    fn create_buffer(&self) -> Result<glow::Buffer, String> {
        unsafe { HasContext::create_buffer(self) }
    }

    fn delete_vertex_array(&self, vao: glow::VertexArray) {
        unsafe { HasContext::delete_vertex_array(self, vao) }
    }

    fn delete_buffer(&self, buffer: glow::Buffer) {
        unsafe { HasContext::delete_buffer(self, buffer) }
    }

    fn use_program(&self, program: Option<glow::Program>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn set_uniform_mat4(&self, program: glow::Program, name: &str, mat: &Mat4) {
        unsafe {
            let loc = self.get_uniform_location(program, name);
            self.uniform_matrix_4_f32_slice(loc.as_ref(), false, &mat.to_cols_array());
        }
    }

    fn set_uniform_color(&self, program: glow::Program, name: &str, color: Color) {
        unsafe {
            let loc = self.get_uniform_location(program, name);
            self.uniform_4_f32(loc.as_ref(), color.r, color.g, color.b, color.a);
        }
    }

    fn upload_vertices(&self, vao: glow::VertexArray, vbo: glow::Buffer, vertices: &[Vec3]) {
        unsafe {
            self.bind_vertex_array(Some(vao));
            self.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            self.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::STATIC_DRAW,
            );
            // position: location 0
            self.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, VEC3_STRIDE, 0);
            self.enable_vertex_attrib_array(0);
        }
    }

    fn draw_arrays(&self, primitive: Primitive, count: i32) {
        let mode = match primitive {
            Primitive::Triangles => glow::TRIANGLES,
            Primitive::LineLoop => glow::LINE_LOOP,
            Primitive::Lines => glow::LINES,
            Primitive::Points => glow::POINTS,
        };
        unsafe { HasContext::draw_arrays(self, mode, 0, count) }
    }

    fn unbind_vertex_array(&self) {
        unsafe { self.bind_vertex_array(None) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { HasContext::viewport(self, x, y, width, height) }
    }

    fn clear(&self, color: Color) {
        unsafe {
            self.clear_color(color.r, color.g, color.b, color.a);
            HasContext::clear(self, glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    fn enable_depth_test(&self) {
        unsafe {
            self.enable(glow::DEPTH_TEST);
            // outline is drawn over the fill at equal depth
            self.depth_func(glow::LEQUAL);
        }
    }
}
