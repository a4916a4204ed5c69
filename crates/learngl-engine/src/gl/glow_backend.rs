use glow::HasContext;

use super::api::GlApi;
use super::handles::{
    BufferId, BufferTarget, ClearMask, Primitive, ProgramId, ShaderId, ShaderStage, TextureId,
    UniformLocation, VertexArrayId,
};

/// [`GlApi`] implementation over a loaded `glow` context.
///
/// Only [`GlContext`](super::GlContext) constructs this type, right after making
/// its context current on the calling thread. That is the invariant every
/// `unsafe` block below relies on.
pub struct GlowBackend {
    gl: glow::Context,
}

impl GlowBackend {
    /// # Safety
    ///
    /// `gl` must have been loaded from a context that is current on this thread
    /// and stays current for the lifetime of the backend.
    pub(crate) unsafe fn new(gl: glow::Context) -> Self {
        Self { gl }
    }

    /// Returns the raw `glow` context for calls not covered by [`GlApi`].
    pub fn raw(&self) -> &glow::Context {
        &self.gl
    }
}

fn buffer_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
    }
}

fn shader_type(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn primitive_mode(mode: Primitive) -> u32 {
    match mode {
        Primitive::Triangles => glow::TRIANGLES,
        Primitive::TriangleStrip => glow::TRIANGLE_STRIP,
        Primitive::Lines => glow::LINES,
        Primitive::Points => glow::POINTS,
    }
}

fn native_location(location: UniformLocation) -> glow::NativeUniformLocation {
    glow::NativeUniformLocation(location.0)
}

impl GlApi for GlowBackend {
    fn create_buffer(&self) -> Result<BufferId, String> {
        let buffer = unsafe { self.gl.create_buffer() }?;
        Ok(BufferId(buffer.0))
    }

    fn delete_buffer(&self, buffer: BufferId) {
        unsafe { self.gl.delete_buffer(glow::NativeBuffer(buffer.0)) }
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>) {
        unsafe {
            self.gl
                .bind_buffer(buffer_target(target), buffer.map(|b| glow::NativeBuffer(b.0)))
        }
    }

    fn buffer_data_static(&self, target: BufferTarget, data: &[u8]) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(buffer_target(target), data, glow::STATIC_DRAW)
        }
    }

    fn create_vertex_array(&self) -> Result<VertexArrayId, String> {
        let vao = unsafe { self.gl.create_vertex_array() }?;
        Ok(VertexArrayId(vao.0))
    }

    fn delete_vertex_array(&self, vao: VertexArrayId) {
        unsafe { self.gl.delete_vertex_array(glow::NativeVertexArray(vao.0)) }
    }

    fn bind_vertex_array(&self, vao: Option<VertexArrayId>) {
        unsafe {
            self.gl
                .bind_vertex_array(vao.map(|v| glow::NativeVertexArray(v.0)))
        }
    }

    fn vertex_attrib_pointer_f32(&self, slot: u32, components: i32, stride: i32, offset: i32) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(slot, components, glow::FLOAT, false, stride, offset)
        }
    }

    fn enable_vertex_attrib_array(&self, slot: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(slot) }
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, String> {
        let shader = unsafe { self.gl.create_shader(shader_type(stage)) }?;
        Ok(ShaderId(shader.0))
    }

    fn delete_shader(&self, shader: ShaderId) {
        unsafe { self.gl.delete_shader(glow::NativeShader(shader.0)) }
    }

    fn shader_source(&self, shader: ShaderId, source: &str) {
        unsafe { self.gl.shader_source(glow::NativeShader(shader.0), source) }
    }

    fn compile_shader(&self, shader: ShaderId) {
        unsafe { self.gl.compile_shader(glow::NativeShader(shader.0)) }
    }

    fn shader_compile_status(&self, shader: ShaderId) -> bool {
        unsafe { self.gl.get_shader_compile_status(glow::NativeShader(shader.0)) }
    }

    fn shader_info_log(&self, shader: ShaderId) -> String {
        unsafe { self.gl.get_shader_info_log(glow::NativeShader(shader.0)) }
    }

    fn create_program(&self) -> Result<ProgramId, String> {
        let program = unsafe { self.gl.create_program() }?;
        Ok(ProgramId(program.0))
    }

    fn delete_program(&self, program: ProgramId) {
        unsafe { self.gl.delete_program(glow::NativeProgram(program.0)) }
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        unsafe {
            self.gl
                .attach_shader(glow::NativeProgram(program.0), glow::NativeShader(shader.0))
        }
    }

    fn detach_shader(&self, program: ProgramId, shader: ShaderId) {
        unsafe {
            self.gl
                .detach_shader(glow::NativeProgram(program.0), glow::NativeShader(shader.0))
        }
    }

    fn link_program(&self, program: ProgramId) {
        unsafe { self.gl.link_program(glow::NativeProgram(program.0)) }
    }

    fn program_link_status(&self, program: ProgramId) -> bool {
        unsafe { self.gl.get_program_link_status(glow::NativeProgram(program.0)) }
    }

    fn program_info_log(&self, program: ProgramId) -> String {
        unsafe { self.gl.get_program_info_log(glow::NativeProgram(program.0)) }
    }

    fn use_program(&self, program: Option<ProgramId>) {
        unsafe { self.gl.use_program(program.map(|p| glow::NativeProgram(p.0))) }
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        let location = unsafe {
            self.gl
                .get_uniform_location(glow::NativeProgram(program.0), name)
        };
        location.map(|l| UniformLocation(l.0))
    }

    fn uniform_1_i32(&self, location: UniformLocation, x: i32) {
        unsafe { self.gl.uniform_1_i32(Some(&native_location(location)), x) }
    }

    fn uniform_1_f32(&self, location: UniformLocation, x: f32) {
        unsafe { self.gl.uniform_1_f32(Some(&native_location(location)), x) }
    }

    fn uniform_2_f32(&self, location: UniformLocation, x: f32, y: f32) {
        unsafe { self.gl.uniform_2_f32(Some(&native_location(location)), x, y) }
    }

    fn uniform_3_f32(&self, location: UniformLocation, x: f32, y: f32, z: f32) {
        unsafe { self.gl.uniform_3_f32(Some(&native_location(location)), x, y, z) }
    }

    fn uniform_4_f32(&self, location: UniformLocation, x: f32, y: f32, z: f32, w: f32) {
        unsafe {
            self.gl
                .uniform_4_f32(Some(&native_location(location)), x, y, z, w)
        }
    }

    fn uniform_matrix_3_f32(&self, location: UniformLocation, value: &[f32; 9]) {
        unsafe {
            self.gl
                .uniform_matrix_3_f32_slice(Some(&native_location(location)), false, value)
        }
    }

    fn uniform_matrix_4_f32(&self, location: UniformLocation, value: &[f32; 16]) {
        unsafe {
            self.gl
                .uniform_matrix_4_f32_slice(Some(&native_location(location)), false, value)
        }
    }

    fn create_texture(&self) -> Result<TextureId, String> {
        let texture = unsafe { self.gl.create_texture() }?;
        Ok(TextureId(texture.0))
    }

    fn delete_texture(&self, texture: TextureId) {
        unsafe { self.gl.delete_texture(glow::NativeTexture(texture.0)) }
    }

    fn active_texture(&self, unit: u32) {
        unsafe { self.gl.active_texture(glow::TEXTURE0 + unit) }
    }

    fn bind_texture_2d(&self, texture: Option<TextureId>) {
        unsafe {
            self.gl
                .bind_texture(glow::TEXTURE_2D, texture.map(|t| glow::NativeTexture(t.0)))
        }
    }

    fn upload_texture_2d_rgba8(&self, width: u32, height: u32, pixels: &[u8]) {
        unsafe {
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);

            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(pixels),
            );
            self.gl.generate_mipmap(glow::TEXTURE_2D);
        }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { self.gl.clear_color(r, g, b, a) }
    }

    fn clear(&self, mask: ClearMask) {
        let mut bits = 0;
        if mask.color {
            bits |= glow::COLOR_BUFFER_BIT;
        }
        if mask.depth {
            bits |= glow::DEPTH_BUFFER_BIT;
        }
        unsafe { self.gl.clear(bits) }
    }

    fn enable_depth_test(&self) {
        unsafe { self.gl.enable(glow::DEPTH_TEST) }
    }

    fn draw_arrays(&self, mode: Primitive, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(primitive_mode(mode), first, count) }
    }

    fn draw_elements_u32(&self, mode: Primitive, count: i32) {
        unsafe {
            self.gl
                .draw_elements(primitive_mode(mode), count, glow::UNSIGNED_INT, 0)
        }
    }
}
