use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

use crate::gl::{GlApi, ProgramId, ShaderId, ShaderStage, UniformLocation};

use super::error::{GraphicsError, GraphicsResult};

/// Stage objects of a program under construction. Deleted when dropped.
struct StageObjects<'a> {
    gl: &'a dyn GlApi,
    shaders: Vec<(ShaderStage, ShaderId)>,
}

impl<'a> StageObjects<'a> {
    fn create(gl: &'a dyn GlApi, stages: &[ShaderStage]) -> GraphicsResult<Self> {
        let mut objects = Self {
            gl,
            shaders: Vec::with_capacity(stages.len()),
        };
        for &stage in stages {
            let id = gl
                .create_shader(stage)
                .map_err(|e| GraphicsError::allocation("shader", e))?;
            objects.shaders.push((stage, id));
        }
        Ok(objects)
    }

    fn compile(&self, sources: &[&str]) -> GraphicsResult<()> {
        for (&(stage, shader), source) in self.shaders.iter().zip(sources) {
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);

            if !self.gl.shader_compile_status(shader) {
                let log = self.gl.shader_info_log(shader);
                log::error!("{stage} shader failed to compile");
                return Err(GraphicsError::Compile { stage, log });
            }
        }
        Ok(())
    }

    fn attach(&self, program: ProgramId) {
        for &(_, shader) in &self.shaders {
            self.gl.attach_shader(program, shader);
        }
    }

    fn detach(&self, program: ProgramId) {
        for &(_, shader) in &self.shaders {
            self.gl.detach_shader(program, shader);
        }
    }
}

impl Drop for StageObjects<'_> {
    fn drop(&mut self) {
        for &(_, shader) in &self.shaders {
            self.gl.delete_shader(shader);
        }
    }
}

/// A linked vertex + fragment program.
///
/// Uniforms are looked up by name on every `set_*` call. A name the linker
/// does not report (misspelled, or optimized away) is an error.
pub struct ShaderProgram {
    gl: Rc<dyn GlApi>,
    id: Option<ProgramId>,
}

impl ShaderProgram {
    /// Reads both stage sources from disk and builds the program.
    pub fn from_files(
        gl: Rc<dyn GlApi>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> GraphicsResult<Self> {
        let vertex = read_source(vertex_path.as_ref())?;
        let fragment = read_source(fragment_path.as_ref())?;
        Self::from_sources(gl, &vertex, &fragment)
    }

    /// Compiles and links a program from in-memory GLSL.
    ///
    /// Every intermediate GL object is deleted on failure.
    pub fn from_sources(gl: Rc<dyn GlApi>, vertex: &str, fragment: &str) -> GraphicsResult<Self> {
        let id = link(gl.as_ref(), vertex, fragment)?;
        log::debug!("linked shader program {id:?}");
        Ok(Self { gl, id: Some(id) })
    }

    pub fn id(&self) -> Option<ProgramId> {
        self.id
    }

    pub fn use_program(&self) {
        self.gl.use_program(self.id);
    }

    pub fn unuse(&self) {
        self.gl.use_program(None);
    }

    pub fn set_bool(&self, name: &str, value: bool) -> GraphicsResult<()> {
        let location = self.location(name)?;
        self.gl.uniform_1_i32(location, value as i32);
        Ok(())
    }

    pub fn set_int(&self, name: &str, value: i32) -> GraphicsResult<()> {
        let location = self.location(name)?;
        self.gl.uniform_1_i32(location, value);
        Ok(())
    }

    pub fn set_float(&self, name: &str, value: f32) -> GraphicsResult<()> {
        let location = self.location(name)?;
        self.gl.uniform_1_f32(location, value);
        Ok(())
    }

    pub fn set_vec2(&self, name: &str, value: Vec2) -> GraphicsResult<()> {
        let location = self.location(name)?;
        self.gl.uniform_2_f32(location, value.x, value.y);
        Ok(())
    }

    pub fn set_vec3(&self, name: &str, value: Vec3) -> GraphicsResult<()> {
        let location = self.location(name)?;
        self.gl.uniform_3_f32(location, value.x, value.y, value.z);
        Ok(())
    }

    pub fn set_vec4(&self, name: &str, value: Vec4) -> GraphicsResult<()> {
        let location = self.location(name)?;
        self.gl.uniform_4_f32(location, value.x, value.y, value.z, value.w);
        Ok(())
    }

    pub fn set_mat3(&self, name: &str, value: &Mat3) -> GraphicsResult<()> {
        let location = self.location(name)?;
        self.gl.uniform_matrix_3_f32(location, &value.to_cols_array());
        Ok(())
    }

    pub fn set_mat4(&self, name: &str, value: &Mat4) -> GraphicsResult<()> {
        let location = self.location(name)?;
        self.gl.uniform_matrix_4_f32(location, &value.to_cols_array());
        Ok(())
    }

    fn location(&self, name: &str) -> GraphicsResult<UniformLocation> {
        self.id
            .and_then(|program| self.gl.uniform_location(program, name))
            .ok_or_else(|| GraphicsError::UniformNotFound { name: name.to_string() })
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.gl.delete_program(id);
            log::trace!("released shader program {id:?}");
        }
    }
}

fn read_source(path: &Path) -> GraphicsResult<String> {
    fs::read_to_string(path).map_err(|source| GraphicsError::ShaderRead {
        path: path.to_path_buf(),
        source,
    })
}

fn link(gl: &dyn GlApi, vertex: &str, fragment: &str) -> GraphicsResult<ProgramId> {
    let stages = StageObjects::create(gl, &[ShaderStage::Vertex, ShaderStage::Fragment])?;
    stages.compile(&[vertex, fragment])?;

    let program = gl
        .create_program()
        .map_err(|e| GraphicsError::allocation("program", e))?;

    stages.attach(program);
    gl.link_program(program);
    let linked = gl.program_link_status(program);
    stages.detach(program);

    if !linked {
        let log = gl.program_info_log(program);
        drop(stages);
        gl.delete_program(program);
        log::error!("shader program failed to link");
        return Err(GraphicsError::Link { log });
    }

    Ok(program)
}

impl fmt::Debug for ShaderProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram").field("id", &self.id).finish()
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        self.release();
    }
}
