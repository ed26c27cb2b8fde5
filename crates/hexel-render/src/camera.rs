//! First-person fly camera.
//!
//! Orientation is stored as yaw and pitch (radians internally, degrees at the
//! API). Every yaw/pitch change rebuilds the `front`/`right`/`up` basis
//! against a fixed world up of +Y, so the camera never rolls. Pitch stays
//! strictly inside ±90° to keep `front × Y` from degenerating.

use glam::{Mat4, Vec2, Vec3};
use hexel_input::{InputManager, KeyCode};
use tracing::debug;

/// Near clip plane distance.
pub const NEAR_PLANE: f32 = 0.01;
/// Far clip plane distance.
pub const FAR_PLANE: f32 = 100.0;
/// Translation speed in units per second.
pub const MOVE_SPEED: f32 = 1.5;
/// Degrees of rotation per pixel of pointer movement.
pub const LOOK_SENSITIVITY: f32 = 0.2;
/// Pitch is clamped to `±PITCH_LIMIT` degrees.
pub const PITCH_LIMIT: f32 = 89.0;
/// Narrowest field of view, in degrees.
pub const FOV_MIN: f32 = 1.0;
/// Widest field of view, in degrees.
pub const FOV_MAX: f32 = 90.0;

const WORLD_UP: Vec3 = Vec3::Y;

/// FPS-style camera.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Radians.
    yaw: f32,
    /// Radians.
    pitch: f32,
    /// Vertical field of view, radians.
    fov: f32,
    aspect: f32,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    /// Set until the first pointer sample after (re)activation.
    first_move: bool,
    last_pointer: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 3.0), 16.0 / 9.0)
    }
}

impl Camera {
    /// Create a camera at `position` looking down -Z with a 90° field of view.
    #[must_use]
    pub fn new(position: Vec3, aspect: f32) -> Self {
        let mut camera = Self {
            position,
            yaw: (-90.0_f32).to_radians(),
            pitch: 0.0,
            fov: FOV_MAX.to_radians(),
            aspect,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            first_move: true,
            last_pointer: Vec2::ZERO,
        };
        camera.update_vectors();
        camera
    }

    /// Pitch in degrees.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch.to_degrees()
    }

    /// Set pitch in degrees, clamped to `[-89, 89]`.
    pub fn set_pitch(&mut self, degrees: f32) {
        self.pitch = degrees.clamp(-PITCH_LIMIT, PITCH_LIMIT).to_radians();
        self.update_vectors();
    }

    /// Yaw in degrees.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw.to_degrees()
    }

    /// Set yaw in degrees. Unbounded.
    pub fn set_yaw(&mut self, degrees: f32) {
        self.yaw = degrees.to_radians();
        self.update_vectors();
    }

    /// Vertical field of view in degrees.
    #[must_use]
    pub fn fov(&self) -> f32 {
        self.fov.to_degrees()
    }

    /// Set the vertical field of view in degrees, clamped to `[1, 90]`.
    pub fn set_fov(&mut self, degrees: f32) {
        self.fov = degrees.clamp(FOV_MIN, FOV_MAX).to_radians();
    }

    #[must_use]
    pub const fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        debug_assert!(aspect.is_finite() && aspect > 0.0);
        self.aspect = aspect;
    }

    /// Update the aspect ratio from a new viewport size.
    ///
    /// A zero-sized (minimised) viewport is ignored.
    #[allow(clippy::cast_precision_loss)]
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            debug!(width, height, "Ignoring empty viewport");
            return;
        }
        self.set_aspect(width as f32 / height as f32);
    }

    #[must_use]
    pub const fn front(&self) -> Vec3 {
        self.front
    }

    #[must_use]
    pub const fn up(&self) -> Vec3 {
        self.up
    }

    #[must_use]
    pub const fn right(&self) -> Vec3 {
        self.right
    }

    /// Returns `true` until the first pointer sample has been recorded.
    #[must_use]
    pub const fn first_move(&self) -> bool {
        self.first_move
    }

    /// Pointer position from the last processed sample.
    #[must_use]
    pub const fn last_pointer(&self) -> Vec2 {
        self.last_pointer
    }

    /// Forget the last pointer sample, so the next one only re-anchors.
    ///
    /// Call when the camera is re-activated (focus regained, cursor
    /// re-grabbed) to avoid a jump from the pointer having moved meanwhile.
    pub fn reset_first_move(&mut self) {
        self.first_move = true;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// OpenGL-convention perspective projection (depth in `[-1, 1]`).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, self.aspect, NEAR_PLANE, FAR_PLANE)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get camera uniforms for the GPU.
    pub fn uniforms(&self) -> CameraUniforms {
        CameraUniforms::from(self)
    }

    /// Apply one frame of keyboard movement and pointer look.
    ///
    /// W/S move along `front`, A/D along `right`, Space/Left Shift along
    /// `up`, at [`MOVE_SPEED`] units per second.
    pub fn process_input(&mut self, input: &InputManager, dt: f32) {
        let bindings = [
            (KeyCode::KeyW, self.front),
            (KeyCode::KeyS, -self.front),
            (KeyCode::KeyA, -self.right),
            (KeyCode::KeyD, self.right),
            (KeyCode::Space, self.up),
            (KeyCode::ShiftLeft, -self.up),
        ];

        let step = MOVE_SPEED * dt;
        for (key, direction) in bindings {
            if input.is_key_pressed(key) {
                self.position += direction * step;
            }
        }

        self.look_at_pointer(input.pointer_position());
    }

    /// Rotate by the pointer movement since the previous sample.
    ///
    /// The first sample after (re)activation only records the position.
    /// Screen Y grows downward, so moving the pointer up pitches up.
    pub fn look_at_pointer(&mut self, pointer: Vec2) {
        if self.first_move {
            self.last_pointer = pointer;
            self.first_move = false;
            return;
        }

        let delta = pointer - self.last_pointer;
        self.last_pointer = pointer;
        if delta == Vec2::ZERO {
            return;
        }

        self.yaw += (delta.x * LOOK_SENSITIVITY).to_radians();
        self.set_pitch(self.pitch() - delta.y * LOOK_SENSITIVITY);
    }

    /// Mouse-wheel zoom: scrolling up narrows the field of view.
    pub fn zoom(&mut self, scroll: f32) {
        self.set_fov(self.fov() - scroll);
    }

    fn update_vectors(&mut self) {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();

        self.front = Vec3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw).normalize();
        self.right = self.front.cross(WORLD_UP).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

/// Camera uniform buffer data for the GPU.
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub position: [f32; 4],
    pub front: [f32; 4],
}

impl From<&Camera> for CameraUniforms {
    fn from(camera: &Camera) -> Self {
        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            projection: camera.projection_matrix().to_cols_array_2d(),
            position: camera.position.extend(1.0).to_array(),
            front: camera.front.extend(0.0).to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hexel_core::math::{is_orthonormal_basis, EPSILON};

    fn assert_vec3_eq(actual: Vec3, expected: Vec3) {
        assert!(
            actual.abs_diff_eq(expected, 1e-5),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn starts_looking_down_negative_z() {
        let camera = Camera::default();
        assert_vec3_eq(camera.front(), Vec3::NEG_Z);
        assert_vec3_eq(camera.right(), Vec3::X);
        assert_vec3_eq(camera.up(), Vec3::Y);
        assert_relative_eq!(camera.yaw(), -90.0, epsilon = 1e-4);
        assert_relative_eq!(camera.fov(), 90.0, epsilon = 1e-4);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::default();
        camera.set_pitch(200.0);
        assert_relative_eq!(camera.pitch(), 89.0, epsilon = 1e-4);
        camera.set_pitch(-200.0);
        assert_relative_eq!(camera.pitch(), -89.0, epsilon = 1e-4);
        camera.set_pitch(45.0);
        assert_relative_eq!(camera.pitch(), 45.0, epsilon = 1e-4);
    }

    #[test]
    fn yaw_is_not_clamped() {
        let mut camera = Camera::default();
        camera.set_yaw(540.0);
        assert_relative_eq!(camera.yaw(), 540.0, epsilon = 1e-3);
        // 540° faces the same way as 180°.
        assert_vec3_eq(camera.front(), Vec3::NEG_X);
    }

    #[test]
    fn fov_is_clamped() {
        let mut camera = Camera::default();
        camera.set_fov(0.0);
        assert_relative_eq!(camera.fov(), 1.0, epsilon = 1e-4);
        camera.set_fov(150.0);
        assert_relative_eq!(camera.fov(), 90.0, epsilon = 1e-4);
    }

    #[test]
    fn basis_stays_orthonormal() {
        let mut camera = Camera::default();
        for pitch in [-200.0, -89.0, -45.0, 0.0, 30.0, 88.9, 89.0, 200.0] {
            for yaw in [-720.0, -90.0, 0.0, 45.0, 123.4, 359.0] {
                camera.set_pitch(pitch);
                camera.set_yaw(yaw);
                assert!(
                    is_orthonormal_basis(camera.front(), camera.right(), camera.up(), EPSILON),
                    "basis degenerated at pitch {pitch}, yaw {yaw}"
                );
                assert!(camera.up().y >= 0.0, "camera rolled over at pitch {pitch}");
            }
        }
    }

    #[test]
    fn first_move_only_anchors() {
        let mut camera = Camera::default();
        let (yaw, pitch) = (camera.yaw(), camera.pitch());

        camera.look_at_pointer(Vec2::new(100.0, 100.0));
        assert!(!camera.first_move());
        assert_eq!(camera.last_pointer(), Vec2::new(100.0, 100.0));
        assert_relative_eq!(camera.yaw(), yaw);
        assert_relative_eq!(camera.pitch(), pitch);

        camera.look_at_pointer(Vec2::new(110.0, 90.0));
        assert_relative_eq!(camera.yaw(), yaw + 2.0, epsilon = 1e-4);
        assert_relative_eq!(camera.pitch(), pitch + 2.0, epsilon = 1e-4);
        assert_eq!(camera.last_pointer(), Vec2::new(110.0, 90.0));
    }

    #[test]
    fn reset_first_move_suppresses_jump() {
        let mut camera = Camera::default();
        camera.look_at_pointer(Vec2::new(0.0, 0.0));
        camera.reset_first_move();
        let yaw = camera.yaw();

        camera.look_at_pointer(Vec2::new(500.0, 0.0));
        assert_relative_eq!(camera.yaw(), yaw);
    }

    #[test]
    fn look_respects_pitch_clamp() {
        let mut camera = Camera::default();
        camera.look_at_pointer(Vec2::ZERO);
        camera.look_at_pointer(Vec2::new(0.0, -10_000.0));
        assert_relative_eq!(camera.pitch(), 89.0, epsilon = 1e-4);
    }

    #[test]
    fn keyboard_moves_along_basis() {
        let mut input = InputManager::new();
        let mut camera = Camera::new(Vec3::ZERO, 1.0);

        input.press_key(KeyCode::KeyW);
        camera.process_input(&input, 1.0);
        assert_vec3_eq(camera.position, Vec3::new(0.0, 0.0, -MOVE_SPEED));

        input.release_key(KeyCode::KeyW);
        input.press_key(KeyCode::KeyD);
        input.press_key(KeyCode::Space);
        camera.process_input(&input, 0.5);
        assert_vec3_eq(
            camera.position,
            Vec3::new(0.75, 0.75, -MOVE_SPEED),
        );

        input.release_key(KeyCode::KeyD);
        input.release_key(KeyCode::Space);
        input.press_key(KeyCode::KeyS);
        input.press_key(KeyCode::KeyA);
        input.press_key(KeyCode::ShiftLeft);
        camera.process_input(&input, 0.5);
        assert_vec3_eq(camera.position, Vec3::new(0.0, 0.0, -0.75));
    }

    #[test]
    fn process_input_applies_first_move_rule() {
        let mut input = InputManager::new();
        let mut camera = Camera::default();
        let yaw = camera.yaw();

        input.move_pointer(Vec2::new(100.0, 100.0));
        camera.process_input(&input, 0.016);
        assert_relative_eq!(camera.yaw(), yaw);

        input.move_pointer(Vec2::new(110.0, 100.0));
        camera.process_input(&input, 0.016);
        assert_relative_eq!(camera.yaw(), yaw + 2.0, epsilon = 1e-4);
    }

    #[test]
    fn zoom_narrows_fov() {
        let mut camera = Camera::default();
        camera.zoom(10.0);
        assert_relative_eq!(camera.fov(), 80.0, epsilon = 1e-4);
        camera.zoom(-50.0);
        assert_relative_eq!(camera.fov(), 90.0, epsilon = 1e-4);
    }

    #[test]
    fn viewport_sets_aspect() {
        let mut camera = Camera::default();
        camera.set_viewport(1280, 640);
        assert_relative_eq!(camera.aspect(), 2.0);
        camera.set_viewport(1280, 0);
        assert_relative_eq!(camera.aspect(), 2.0);
    }

    #[test]
    fn view_matrix_looks_along_front() {
        let mut camera = Camera::new(Vec3::new(1.0, 2.0, 3.0), 1.0);
        camera.set_yaw(30.0);
        camera.set_pitch(20.0);

        let target = camera.view_matrix().transform_point3(camera.position + camera.front());
        assert_vec3_eq(target, Vec3::new(0.0, 0.0, -1.0));
        let eye = camera.view_matrix().transform_point3(camera.position);
        assert_vec3_eq(eye, Vec3::ZERO);
    }

    #[test]
    fn projection_uses_fov_and_planes() {
        let mut camera = Camera::new(Vec3::ZERO, 2.0);
        let projection = camera.projection_matrix();
        // cot(45°) = 1
        assert_relative_eq!(projection.y_axis.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(projection.x_axis.x, 0.5, epsilon = 1e-5);

        let near = projection.project_point3(Vec3::new(0.0, 0.0, -NEAR_PLANE));
        let far = projection.project_point3(Vec3::new(0.0, 0.0, -FAR_PLANE));
        assert_relative_eq!(near.z, -1.0, epsilon = 1e-4);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-4);

        camera.set_fov(45.0);
        assert!(camera.projection_matrix().y_axis.y > 1.0);
    }

    #[test]
    fn uniforms_match_matrices() {
        let camera = Camera::default();
        let uniforms = camera.uniforms();
        assert_eq!(uniforms.view, camera.view_matrix().to_cols_array_2d());
        assert_eq!(uniforms.position, [0.0, 0.0, 3.0, 1.0]);
        assert_eq!(bytemuck::bytes_of(&uniforms).len(), 2 * 64 + 2 * 16);
    }
}
