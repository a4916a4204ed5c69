use std::path::Path;

use anyhow::{Context, Result};
use glam::{Mat3, Mat4, Vec3};

use learngl_engine::core::{App, AppControl, FrameCtx};
use learngl_engine::gl::{ClearMask, GlContext, Primitive};
use learngl_engine::graphics::{ShaderProgram, VertexArray, VertexBuffer};
use learngl_engine::input::InputState;

use super::FlyView;
use super::geometry::{self, LitVertex, CUBE_VERTEX_COUNT};

const CLEAR_COLOR: [f32; 4] = [0.1, 0.1, 0.1, 1.0];
const LIGHT_POSITION: Vec3 = Vec3::new(1.2, 1.0, 1.0);
const LIGHT_SCALE: f32 = 0.2;
const OBJECT_COLOR: Vec3 = Vec3::new(1.0, 0.5, 0.31);
const LIGHT_COLOR: Vec3 = Vec3::ONE;

fn light_model() -> Mat4 {
    Mat4::from_translation(LIGHT_POSITION) * Mat4::from_scale(Vec3::splat(LIGHT_SCALE))
}

/// Normal matrix: inverse-transpose of the model's upper 3x3.
fn normal_matrix(model: &Mat4) -> Mat3 {
    Mat3::from_mat4(*model).inverse().transpose()
}

/// Phong-lit cube beside a small emissive cube marking the light.
pub struct Lighting {
    view: FlyView,

    object: VertexArray,
    object_shader: ShaderProgram,
    light: VertexArray,
    light_shader: ShaderProgram,
}

impl Lighting {
    pub fn new(gl: &GlContext, shaders: &Path) -> Result<Self> {
        let api = gl.api();
        api.enable_depth_test();

        let mut light = VertexArray::new(api.clone())?;
        light.set_vertex_buffer(
            VertexBuffer::from_slice(api.clone(), &geometry::position_cube())?
                .with_layout(&geometry::position_layout()),
        )?;

        let mut object = VertexArray::new(api.clone())?;
        object.set_vertex_buffer(
            VertexBuffer::from_slice(api.clone(), &geometry::lit_cube())?
                .with_layout(&LitVertex::layout()),
        )?;
        object.unbind();

        let light_shader = ShaderProgram::from_files(
            api.clone(),
            shaders.join("light_box.vert"),
            shaders.join("light_box.frag"),
        )
        .context("failed to build light_box shader")?;

        let object_shader = ShaderProgram::from_files(
            api,
            shaders.join("lighting.vert"),
            shaders.join("lighting.frag"),
        )
        .context("failed to build lighting shader")?;

        object_shader.use_program();
        object_shader.set_vec3("objectColor", OBJECT_COLOR)?;
        object_shader.set_vec3("lightColor", LIGHT_COLOR)?;
        object_shader.set_vec3("lightPos", LIGHT_POSITION)?;
        object_shader.unuse();

        log::info!("lighting scene loaded");

        Ok(Self {
            view: FlyView::new(),
            object,
            object_shader,
            light,
            light_shader,
        })
    }

    fn render(&self, ctx: &FrameCtx<'_>) -> Result<()> {
        let gl = ctx.gl();
        let [r, g, b, a] = CLEAR_COLOR;
        gl.clear_color(r, g, b, a);
        gl.clear(ClearMask::COLOR_DEPTH);

        let view = self.view.camera.view_matrix();
        let projection = self.view.camera.projection_matrix(ctx.aspect_ratio());
        let model = Mat4::IDENTITY;

        self.object_shader.use_program();
        self.object.bind();
        self.object_shader.set_mat4("model", &model)?;
        self.object_shader.set_mat4("view", &view)?;
        self.object_shader.set_mat4("projection", &projection)?;
        self.object_shader.set_mat3("normal", &normal_matrix(&model))?;
        self.object_shader.set_vec3("viewPos", self.view.camera.position())?;
        gl.draw_arrays(Primitive::Triangles, 0, CUBE_VERTEX_COUNT as i32);
        self.object.unbind();
        self.object_shader.unuse();

        self.light_shader.use_program();
        self.light.bind();
        self.light_shader.set_mat4("model", &light_model())?;
        self.light_shader.set_mat4("view", &view)?;
        self.light_shader.set_mat4("projection", &projection)?;
        gl.draw_arrays(Primitive::Triangles, 0, CUBE_VERTEX_COUNT as i32);
        self.light.unbind();
        self.light_shader.unuse();

        Ok(())
    }
}

impl App for Lighting {
    fn input(&mut self) -> &mut InputState {
        &mut self.view.input
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> Result<AppControl> {
        self.view.update(ctx);
        self.render(ctx)?;
        Ok(AppControl::Continue)
    }
}
