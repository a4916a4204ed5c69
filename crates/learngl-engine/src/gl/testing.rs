//! Recording [`GlApi`] double for unit tests.
//!
//! Hands out sequential non-zero handles, remembers every call in order and can
//! be primed to reject a shader stage or a link.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::rc::Rc;

use super::api::GlApi;
use super::handles::{
    BufferId, BufferTarget, ClearMask, Primitive, ProgramId, ShaderId, ShaderStage, TextureId,
    UniformLocation, VertexArrayId,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateBuffer(BufferId),
    DeleteBuffer(BufferId),
    BindBuffer(BufferTarget, Option<BufferId>),
    BufferData(BufferTarget, usize),

    CreateVertexArray(VertexArrayId),
    DeleteVertexArray(VertexArrayId),
    BindVertexArray(Option<VertexArrayId>),
    AttribPointer { slot: u32, components: i32, stride: i32, offset: i32 },
    EnableAttrib(u32),

    CreateShader(ShaderStage, ShaderId),
    DeleteShader(ShaderId),
    CompileShader(ShaderId),
    CreateProgram(ProgramId),
    DeleteProgram(ProgramId),
    AttachShader(ProgramId, ShaderId),
    DetachShader(ProgramId, ShaderId),
    LinkProgram(ProgramId),
    UseProgram(Option<ProgramId>),

    UniformI32(UniformLocation, i32),
    UniformF32(UniformLocation, Vec<f32>),

    CreateTexture(TextureId),
    DeleteTexture(TextureId),
    ActiveTexture(u32),
    BindTexture(Option<TextureId>),
    UploadTexture { width: u32, height: u32, len: usize },

    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear(ClearMask),
    EnableDepthTest,
    DrawArrays(Primitive, i32, i32),
    DrawElements(Primitive, i32),
}

#[derive(Default)]
pub(crate) struct RecordingGl {
    calls: RefCell<Vec<Call>>,
    next_id: Cell<u32>,
    stages: RefCell<HashMap<ShaderId, ShaderStage>>,
    sources: RefCell<HashMap<ShaderId, String>>,
    rejected_stage: RefCell<Option<(ShaderStage, String)>>,
    rejected_link: RefCell<Option<String>>,
    uniforms: RefCell<Vec<String>>,
}

impl RecordingGl {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Uniform names every linked program reports as active.
    pub(crate) fn with_uniforms(names: &[&str]) -> Rc<Self> {
        let gl = Self::default();
        *gl.uniforms.borrow_mut() = names.iter().map(|n| n.to_string()).collect();
        Rc::new(gl)
    }

    pub(crate) fn reject_compile(&self, stage: ShaderStage, log: &str) {
        *self.rejected_stage.borrow_mut() = Some((stage, log.to_string()));
    }

    pub(crate) fn reject_link(&self, log: &str) {
        *self.rejected_link.borrow_mut() = Some(log.to_string());
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub(crate) fn source_of(&self, shader: ShaderId) -> Option<String> {
        self.sources.borrow().get(&shader).cloned()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn next(&self) -> NonZeroU32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        NonZeroU32::new(id).expect("handle counter starts at 1")
    }
}

impl GlApi for RecordingGl {
    fn create_buffer(&self) -> Result<BufferId, String> {
        let id = BufferId(self.next());
        self.record(Call::CreateBuffer(id));
        Ok(id)
    }

    fn delete_buffer(&self, buffer: BufferId) {
        self.record(Call::DeleteBuffer(buffer));
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data_static(&self, target: BufferTarget, data: &[u8]) {
        self.record(Call::BufferData(target, data.len()));
    }

    fn create_vertex_array(&self) -> Result<VertexArrayId, String> {
        let id = VertexArrayId(self.next());
        self.record(Call::CreateVertexArray(id));
        Ok(id)
    }

    fn delete_vertex_array(&self, vao: VertexArrayId) {
        self.record(Call::DeleteVertexArray(vao));
    }

    fn bind_vertex_array(&self, vao: Option<VertexArrayId>) {
        self.record(Call::BindVertexArray(vao));
    }

    fn vertex_attrib_pointer_f32(&self, slot: u32, components: i32, stride: i32, offset: i32) {
        self.record(Call::AttribPointer { slot, components, stride, offset });
    }

    fn enable_vertex_attrib_array(&self, slot: u32) {
        self.record(Call::EnableAttrib(slot));
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, String> {
        let id = ShaderId(self.next());
        self.stages.borrow_mut().insert(id, stage);
        self.record(Call::CreateShader(stage, id));
        Ok(id)
    }

    fn delete_shader(&self, shader: ShaderId) {
        self.record(Call::DeleteShader(shader));
    }

    fn shader_source(&self, shader: ShaderId, source: &str) {
        self.sources.borrow_mut().insert(shader, source.to_string());
    }

    fn compile_shader(&self, shader: ShaderId) {
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: ShaderId) -> bool {
        let stage = self.stages.borrow().get(&shader).copied();
        match (&*self.rejected_stage.borrow(), stage) {
            (Some((rejected, _)), Some(stage)) => *rejected != stage,
            _ => true,
        }
    }

    fn shader_info_log(&self, _shader: ShaderId) -> String {
        self.rejected_stage
            .borrow()
            .as_ref()
            .map(|(_, log)| log.clone())
            .unwrap_or_default()
    }

    fn create_program(&self) -> Result<ProgramId, String> {
        let id = ProgramId(self.next());
        self.record(Call::CreateProgram(id));
        Ok(id)
    }

    fn delete_program(&self, program: ProgramId) {
        self.record(Call::DeleteProgram(program));
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        self.record(Call::AttachShader(program, shader));
    }

    fn detach_shader(&self, program: ProgramId, shader: ShaderId) {
        self.record(Call::DetachShader(program, shader));
    }

    fn link_program(&self, program: ProgramId) {
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, _program: ProgramId) -> bool {
        self.rejected_link.borrow().is_none()
    }

    fn program_info_log(&self, _program: ProgramId) -> String {
        self.rejected_link.borrow().clone().unwrap_or_default()
    }

    fn use_program(&self, program: Option<ProgramId>) {
        self.record(Call::UseProgram(program));
    }

    fn uniform_location(&self, _program: ProgramId, name: &str) -> Option<UniformLocation> {
        self.uniforms
            .borrow()
            .iter()
            .position(|n| n == name)
            .map(|i| UniformLocation(i as u32))
    }

    fn uniform_1_i32(&self, location: UniformLocation, x: i32) {
        self.record(Call::UniformI32(location, x));
    }

    fn uniform_1_f32(&self, location: UniformLocation, x: f32) {
        self.record(Call::UniformF32(location, vec![x]));
    }

    fn uniform_2_f32(&self, location: UniformLocation, x: f32, y: f32) {
        self.record(Call::UniformF32(location, vec![x, y]));
    }

    fn uniform_3_f32(&self, location: UniformLocation, x: f32, y: f32, z: f32) {
        self.record(Call::UniformF32(location, vec![x, y, z]));
    }

    fn uniform_4_f32(&self, location: UniformLocation, x: f32, y: f32, z: f32, w: f32) {
        self.record(Call::UniformF32(location, vec![x, y, z, w]));
    }

    fn uniform_matrix_3_f32(&self, location: UniformLocation, value: &[f32; 9]) {
        self.record(Call::UniformF32(location, value.to_vec()));
    }

    fn uniform_matrix_4_f32(&self, location: UniformLocation, value: &[f32; 16]) {
        self.record(Call::UniformF32(location, value.to_vec()));
    }

    fn create_texture(&self) -> Result<TextureId, String> {
        let id = TextureId(self.next());
        self.record(Call::CreateTexture(id));
        Ok(id)
    }

    fn delete_texture(&self, texture: TextureId) {
        self.record(Call::DeleteTexture(texture));
    }

    fn active_texture(&self, unit: u32) {
        self.record(Call::ActiveTexture(unit));
    }

    fn bind_texture_2d(&self, texture: Option<TextureId>) {
        self.record(Call::BindTexture(texture));
    }

    fn upload_texture_2d_rgba8(&self, width: u32, height: u32, pixels: &[u8]) {
        self.record(Call::UploadTexture { width, height, len: pixels.len() });
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Call::ClearColor([r, g, b, a]));
    }

    fn clear(&self, mask: ClearMask) {
        self.record(Call::Clear(mask));
    }

    fn enable_depth_test(&self) {
        self.record(Call::EnableDepthTest);
    }

    fn draw_arrays(&self, mode: Primitive, first: i32, count: i32) {
        self.record(Call::DrawArrays(mode, first, count));
    }

    fn draw_elements_u32(&self, mode: Primitive, count: i32) {
        self.record(Call::DrawElements(mode, count));
    }
}
