use std::path::Path;

use anyhow::{Context, Result};
use glam::{Mat4, Vec3};

use learngl_engine::core::{App, AppControl, FrameCtx};
use learngl_engine::gl::{ClearMask, GlContext, Primitive};
use learngl_engine::graphics::{ShaderProgram, Texture2D, VertexArray, VertexBuffer};
use learngl_engine::input::InputState;

use super::FlyView;
use super::geometry::{self, TexturedVertex, CUBE_VERTEX_COUNT};
use super::textures;

const CLEAR_COLOR: [f32; 4] = [0.393, 0.585, 0.930, 1.0];
const TEXTURE_SIZE: u32 = 256;

const CUBE_POSITIONS: [Vec3; 10] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(2.0, 5.0, -15.0),
    Vec3::new(-1.5, -2.2, -2.5),
    Vec3::new(-3.8, -2.0, -12.3),
    Vec3::new(2.4, -0.4, -3.5),
    Vec3::new(-1.7, 3.0, -7.5),
    Vec3::new(1.3, -2.0, -2.5),
    Vec3::new(1.5, 2.0, -2.5),
    Vec3::new(1.5, 0.2, -1.5),
    Vec3::new(-1.3, 1.0, -1.5),
];

/// Model matrix of one cube: placed at `position`, tumbling at a rate
/// proportional to its depth.
fn cube_model(position: Vec3, elapsed: f32) -> Mat4 {
    let axis = Vec3::new(1.0, 0.3, 0.5).normalize();
    let angle = elapsed * (20.0 * position.z).to_radians();
    Mat4::from_translation(position) * Mat4::from_axis_angle(axis, angle)
}

/// Ten textured cubes.
pub struct GettingStarted {
    view: FlyView,

    cube: VertexArray,
    shader: ShaderProgram,
    box_texture: Texture2D,
    face_texture: Texture2D,
}

impl GettingStarted {
    pub fn new(gl: &GlContext, shaders: &Path) -> Result<Self> {
        let api = gl.api();
        api.enable_depth_test();

        let box_texture = textures::upload(api.clone(), &textures::crate_image(TEXTURE_SIZE))
            .context("failed to upload crate texture")?;
        let face_texture = textures::upload(api.clone(), &textures::face_image(TEXTURE_SIZE))
            .context("failed to upload face texture")?;

        let vertices = VertexBuffer::from_slice(api.clone(), &geometry::textured_cube())?
            .with_layout(&TexturedVertex::layout());
        let mut cube = VertexArray::new(api.clone())?;
        cube.set_vertex_buffer(vertices)?;
        cube.unbind();

        let shader = ShaderProgram::from_files(
            api,
            shaders.join("getting_started.vert"),
            shaders.join("getting_started.frag"),
        )
        .context("failed to build getting_started shader")?;

        shader.use_program();
        shader.set_int("boxTexture", 0)?;
        shader.set_int("faceTexture", 1)?;
        shader.unuse();

        log::info!("getting-started scene loaded");

        Ok(Self {
            view: FlyView::new(),
            cube,
            shader,
            box_texture,
            face_texture,
        })
    }

    fn render(&self, ctx: &FrameCtx<'_>) -> Result<()> {
        let gl = ctx.gl();
        let [r, g, b, a] = CLEAR_COLOR;
        gl.clear_color(r, g, b, a);
        gl.clear(ClearMask::COLOR_DEPTH);

        self.box_texture.bind(0);
        self.face_texture.bind(1);
        self.cube.bind();
        self.shader.use_program();

        self.shader.set_mat4("view", &self.view.camera.view_matrix())?;
        self.shader
            .set_mat4("projection", &self.view.camera.projection_matrix(ctx.aspect_ratio()))?;

        let elapsed = ctx.elapsed_time() as f32;
        for position in CUBE_POSITIONS {
            self.shader.set_mat4("model", &cube_model(position, elapsed))?;
            gl.draw_arrays(Primitive::Triangles, 0, CUBE_VERTEX_COUNT as i32);
        }

        self.cube.unbind();
        self.shader.unuse();
        Ok(())
    }
}

impl App for GettingStarted {
    fn input(&mut self) -> &mut InputState {
        &mut self.view.input
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> Result<AppControl> {
        self.view.update(ctx);
        self.render(ctx)?;
        Ok(AppControl::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_at_origin_never_rotates() {
        assert_eq!(cube_model(Vec3::ZERO, 12.5), Mat4::IDENTITY);
    }

    #[test]
    fn model_translation_is_cube_position() {
        let position = CUBE_POSITIONS[3];
        let model = cube_model(position, 3.0);
        assert!(model.w_axis.truncate().abs_diff_eq(position, 1e-6));
    }

    #[test]
    fn no_rotation_at_start() {
        for position in CUBE_POSITIONS {
            let model = cube_model(position, 0.0);
            assert!(model.abs_diff_eq(Mat4::from_translation(position), 1e-6));
        }
    }

    #[test]
    fn rotation_keeps_distances() {
        let model = cube_model(CUBE_POSITIONS[1], 4.2);
        let corner = model.transform_point3(Vec3::splat(0.5)) - CUBE_POSITIONS[1];
        assert!((corner.length() - Vec3::splat(0.5).length()).abs() < 1e-5);
    }
}
