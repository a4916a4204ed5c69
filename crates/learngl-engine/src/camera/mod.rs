//! Free-fly camera.
//!
//! Keyboard moves the eye along the camera basis, cursor motion turns it
//! (yaw/pitch in degrees) and scroll adjusts the zoom, used as the vertical
//! field of view.

use glam::{Mat4, Vec3};

use crate::input::{InputState, Key};

/// Pitch is kept strictly inside ±90° so `front` never aligns with world up.
const PITCH_LIMIT: f32 = 89.0;
const MIN_ZOOM: f32 = 1.0;

const DEFAULT_YAW: f32 = -90.0;
const DEFAULT_PITCH: f32 = 0.0;
const DEFAULT_SPEED: f32 = 2.5;
const DEFAULT_SENSITIVITY: f32 = 0.1;

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;

/// Keys driving camera movement.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CameraBindings {
    pub forward: Key,
    pub backward: Key,
    pub left: Key,
    pub right: Key,
    pub up: Key,
    pub down: Key,
}

impl Default for CameraBindings {
    fn default() -> Self {
        Self {
            forward: Key::W,
            backward: Key::S,
            left: Key::A,
            right: Key::D,
            up: Key::Space,
            down: Key::ControlLeft,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,

    yaw: f32,
    pitch: f32,

    movement_speed: f32,
    mouse_sensitivity: f32,
    zoom: f32,
    max_zoom: f32,

    user_control: bool,
    previous_cursor: (f64, f64),
    bindings: CameraBindings,
}

impl Camera {
    /// Creates a camera looking down -Z.
    ///
    /// Zoom starts at `max_zoom`, which stays fixed for the camera's lifetime.
    /// Values below 1 (and NaN) are raised to 1.
    pub fn new(position: Vec3, world_up: Vec3, max_zoom: f32) -> Self {
        let max_zoom = max_zoom.max(MIN_ZOOM);
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: world_up,
            right: Vec3::X,
            world_up,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            zoom: max_zoom,
            max_zoom,
            user_control: true,
            previous_cursor: (0.0, 0.0),
            bindings: CameraBindings::default(),
        };
        camera.update_vectors();
        camera
    }

    pub fn with_bindings(mut self, bindings: CameraBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Advances the camera by one frame of input.
    ///
    /// Does nothing while user control is disabled.
    pub fn update(&mut self, dt: f32, input: &InputState) {
        if !self.user_control {
            return;
        }

        self.apply_movement(dt, input);
        self.apply_look(input.cursor_position());
        self.apply_zoom(input.scroll_value() as f32);
    }

    fn apply_movement(&mut self, dt: f32, input: &InputState) {
        let velocity = self.movement_speed * dt;
        let b = self.bindings;

        // Opposite keys cancel; diagonals are not normalized.
        if input.is_key_down(b.forward) {
            self.position += self.front * velocity;
        }
        if input.is_key_down(b.backward) {
            self.position -= self.front * velocity;
        }
        if input.is_key_down(b.left) {
            self.position -= self.right * velocity;
        }
        if input.is_key_down(b.right) {
            self.position += self.right * velocity;
        }
        if input.is_key_down(b.up) {
            self.position += self.up * velocity;
        }
        if input.is_key_down(b.down) {
            self.position -= self.up * velocity;
        }
    }

    fn apply_look(&mut self, cursor: (f64, f64)) {
        // Screen y grows downwards.
        let dx = (cursor.0 - self.previous_cursor.0) as f32;
        let dy = (self.previous_cursor.1 - cursor.1) as f32;
        self.previous_cursor = cursor;

        self.yaw += dx * self.mouse_sensitivity;
        self.pitch = (self.pitch + dy * self.mouse_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        self.update_vectors();
    }

    fn apply_zoom(&mut self, scroll: f32) {
        self.zoom = (self.zoom - scroll).clamp(MIN_ZOOM, self.max_zoom);
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    /// Right-handed look-at from the current basis.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// OpenGL-style perspective with the zoom as vertical field of view.
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.zoom.to_radians(), aspect_ratio, NEAR_PLANE, FAR_PLANE)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Sets yaw in degrees and recomputes the basis.
    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.update_vectors();
    }

    /// Sets pitch in degrees (clamped to ±89) and recomputes the basis.
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    pub fn set_movement_speed(&mut self, speed: f32) {
        self.movement_speed = speed;
    }

    pub fn mouse_sensitivity(&self) -> f32 {
        self.mouse_sensitivity
    }

    pub fn set_mouse_sensitivity(&mut self, sensitivity: f32) {
        self.mouse_sensitivity = sensitivity;
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    pub fn user_control(&self) -> bool {
        self.user_control
    }

    pub fn set_user_control(&mut self, enabled: bool) {
        self.user_control = enabled;
    }

    /// Re-bases cursor deltas, e.g. right after capturing the cursor.
    pub fn set_previous_cursor(&mut self, x: f64, y: f64) {
        self.previous_cursor = (x, y);
    }

    pub fn bindings(&self) -> &CameraBindings {
        &self.bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, 45.0)
    }

    fn assert_vec_near(a: Vec3, b: Vec3) {
        assert!(a.abs_diff_eq(b, EPS), "{a} != {b}");
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn starts_looking_down_negative_z() {
        let cam = camera();
        assert_vec_near(cam.front(), Vec3::NEG_Z);
        assert_vec_near(cam.right(), Vec3::X);
        assert_vec_near(cam.up(), Vec3::Y);
        assert_eq!(cam.zoom(), 45.0);
        assert_eq!(cam.movement_speed(), 2.5);
        assert_eq!(cam.mouse_sensitivity(), 0.1);
    }

    #[test]
    fn view_matrix_is_valid_before_first_update() {
        let cam = camera();
        let origin_in_view = cam.view_matrix().transform_point3(Vec3::ZERO);
        assert_vec_near(origin_in_view, Vec3::new(0.0, 0.0, -3.0));
    }

    // ── movement ──────────────────────────────────────────────────────────

    #[test]
    fn forward_moves_along_front() {
        let mut cam = camera();
        let mut input = InputState::new();
        input.press_key(Key::W);

        cam.update(0.5, &input);

        assert_vec_near(cam.position(), Vec3::new(0.0, 0.0, 3.0 - 1.25));
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut cam = camera();
        let mut input = InputState::new();
        input.press_key(Key::A);
        input.press_key(Key::D);
        input.press_key(Key::Space);
        input.press_key(Key::ControlLeft);

        cam.update(1.0, &input);

        assert_vec_near(cam.position(), Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn diagonal_movement_is_not_normalized() {
        let mut cam = camera();
        let mut input = InputState::new();
        input.press_key(Key::W);
        input.press_key(Key::D);

        cam.update(1.0, &input);

        let moved = cam.position() - Vec3::new(0.0, 0.0, 3.0);
        assert!((moved.length() - 2.5 * 2f32.sqrt()).abs() < EPS);
    }

    #[test]
    fn custom_bindings_replace_defaults() {
        let bindings = CameraBindings { forward: Key::ArrowUp, ..CameraBindings::default() };
        let mut cam = camera().with_bindings(bindings);
        let mut input = InputState::new();
        input.press_key(Key::W);

        cam.update(1.0, &input);

        assert_vec_near(cam.position(), Vec3::new(0.0, 0.0, 3.0));
    }

    // ── look ──────────────────────────────────────────────────────────────

    #[test]
    fn cursor_delta_scales_by_sensitivity() {
        let mut cam = camera();
        let mut input = InputState::new();
        input.set_cursor_position(100.0, -50.0);

        cam.update(0.0, &input);

        assert!((cam.yaw() - (-90.0 + 10.0)).abs() < EPS);
        assert!((cam.pitch() - 5.0).abs() < EPS);
    }

    #[test]
    fn stationary_cursor_does_not_turn() {
        let mut cam = camera();
        let mut input = InputState::new();
        input.set_cursor_position(400.0, 300.0);
        cam.update(0.0, &input);
        let (yaw, pitch) = (cam.yaw(), cam.pitch());

        cam.update(0.0, &input);

        assert_eq!((cam.yaw(), cam.pitch()), (yaw, pitch));
    }

    #[test]
    fn pitch_never_reaches_ninety() {
        let mut cam = camera();
        let mut input = InputState::new();
        input.set_cursor_position(0.0, -1.0e6);

        cam.update(0.0, &input);

        assert_eq!(cam.pitch(), 89.0);
        assert!(cam.front().y < 1.0);
        assert!(cam.right().is_finite());

        input.set_cursor_position(0.0, 1.0e6);
        cam.update(0.0, &input);
        assert_eq!(cam.pitch(), -89.0);
    }

    #[test]
    fn basis_stays_orthonormal() {
        let mut cam = camera();
        cam.set_yaw(33.0);
        cam.set_pitch(-61.0);

        assert!((cam.front().length() - 1.0).abs() < EPS);
        assert!(cam.front().dot(cam.right()).abs() < EPS);
        assert!(cam.up().dot(cam.front()).abs() < EPS);
    }

    // ── zoom ──────────────────────────────────────────────────────────────

    #[test]
    fn zoom_clamps_to_bounds() {
        let mut cam = camera();
        let mut input = InputState::new();

        input.scroll(100.0);
        cam.update(0.0, &input);
        assert_eq!(cam.zoom(), 1.0);

        input.scroll(-1000.0);
        cam.update(0.0, &input);
        assert_eq!(cam.zoom(), 45.0);
    }

    #[test]
    fn max_zoom_below_one_is_raised() {
        for max_zoom in [0.5, -3.0, f32::NAN] {
            let mut cam = Camera::new(Vec3::ZERO, Vec3::Y, max_zoom);
            assert_eq!(cam.max_zoom(), 1.0);

            let mut input = InputState::new();
            input.scroll(-2.0);
            cam.update(0.016, &input);

            assert_eq!(cam.zoom(), 1.0);
        }
    }

    #[test]
    fn projection_uses_zoom_as_fov() {
        let cam = camera();
        let expected = Mat4::perspective_rh_gl(45f32.to_radians(), 16.0 / 9.0, 0.1, 100.0);
        assert!(cam.projection_matrix(16.0 / 9.0).abs_diff_eq(expected, EPS));
    }

    // ── user control ──────────────────────────────────────────────────────

    #[test]
    fn disabled_control_freezes_camera() {
        let mut cam = camera();
        cam.set_user_control(false);
        let mut input = InputState::new();
        input.press_key(Key::W);
        input.set_cursor_position(50.0, 50.0);
        input.scroll(3.0);

        cam.update(1.0, &input);

        assert_vec_near(cam.position(), Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(cam.yaw(), -90.0);
        assert_eq!(cam.zoom(), 45.0);
    }
}
