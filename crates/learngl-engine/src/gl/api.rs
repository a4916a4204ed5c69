use super::handles::{
    BufferId, BufferTarget, ClearMask, Primitive, ProgramId, ShaderId, ShaderStage, TextureId,
    UniformLocation, VertexArrayId,
};

/// The subset of OpenGL used by the graphics wrappers.
///
/// Every resource wrapper holds an `Rc<dyn GlApi>` and issues its calls through
/// it, so the same wrapper code runs against the real driver
/// ([`GlowBackend`](super::GlowBackend)) and against the recording double used in
/// unit tests.
///
/// Implementations are bound to the thread that owns the GL context. `Rc` keeps
/// every holder on that thread.
pub trait GlApi {
    // ── buffers ─────────────────────────────────────────────────────────────

    fn create_buffer(&self) -> Result<BufferId, String>;
    fn delete_buffer(&self, buffer: BufferId);
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>);
    /// Uploads `data` to the buffer bound at `target` with a static-draw hint.
    fn buffer_data_static(&self, target: BufferTarget, data: &[u8]);

    // ── vertex arrays ───────────────────────────────────────────────────────

    fn create_vertex_array(&self) -> Result<VertexArrayId, String>;
    fn delete_vertex_array(&self, vao: VertexArrayId);
    fn bind_vertex_array(&self, vao: Option<VertexArrayId>);
    /// Describes float attribute `slot` of the bound array buffer.
    fn vertex_attrib_pointer_f32(&self, slot: u32, components: i32, stride: i32, offset: i32);
    fn enable_vertex_attrib_array(&self, slot: u32);

    // ── shaders / programs ──────────────────────────────────────────────────

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, String>;
    fn delete_shader(&self, shader: ShaderId);
    fn shader_source(&self, shader: ShaderId, source: &str);
    fn compile_shader(&self, shader: ShaderId);
    fn shader_compile_status(&self, shader: ShaderId) -> bool;
    fn shader_info_log(&self, shader: ShaderId) -> String;

    fn create_program(&self) -> Result<ProgramId, String>;
    fn delete_program(&self, program: ProgramId);
    fn attach_shader(&self, program: ProgramId, shader: ShaderId);
    fn detach_shader(&self, program: ProgramId, shader: ShaderId);
    fn link_program(&self, program: ProgramId);
    fn program_link_status(&self, program: ProgramId) -> bool;
    fn program_info_log(&self, program: ProgramId) -> String;
    fn use_program(&self, program: Option<ProgramId>);

    // ── uniforms ────────────────────────────────────────────────────────────

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation>;
    fn uniform_1_i32(&self, location: UniformLocation, x: i32);
    fn uniform_1_f32(&self, location: UniformLocation, x: f32);
    fn uniform_2_f32(&self, location: UniformLocation, x: f32, y: f32);
    fn uniform_3_f32(&self, location: UniformLocation, x: f32, y: f32, z: f32);
    fn uniform_4_f32(&self, location: UniformLocation, x: f32, y: f32, z: f32, w: f32);
    /// Column-major, not transposed.
    fn uniform_matrix_3_f32(&self, location: UniformLocation, value: &[f32; 9]);
    /// Column-major, not transposed.
    fn uniform_matrix_4_f32(&self, location: UniformLocation, value: &[f32; 16]);

    // ── textures ────────────────────────────────────────────────────────────

    fn create_texture(&self) -> Result<TextureId, String>;
    fn delete_texture(&self, texture: TextureId);
    fn active_texture(&self, unit: u32);
    fn bind_texture_2d(&self, texture: Option<TextureId>);
    /// Uploads tightly packed RGBA8 pixels to the bound 2D texture and builds
    /// its mip chain. Wrap is repeat, filtering is trilinear.
    fn upload_texture_2d_rgba8(&self, width: u32, height: u32, pixels: &[u8]);

    // ── frame ───────────────────────────────────────────────────────────────

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear(&self, mask: ClearMask);
    fn enable_depth_test(&self);
    fn draw_arrays(&self, mode: Primitive, first: i32, count: i32);
    /// Draws `count` `u32` indices from the bound element buffer.
    fn draw_elements_u32(&self, mode: Primitive, count: i32);
}
