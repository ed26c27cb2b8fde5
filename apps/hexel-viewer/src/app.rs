//! Scripted viewer session.

use glam::{Vec2, Vec3};
use hexel_input::{CursorMode, InputManager, KeyCode};
use hexel_render::{Camera, HeadlessBackend, Result, VoxelRenderer};
use hexel_voxel::{PropertyFlags, Voxel};
use tracing::{debug, info};

use crate::config::ViewerConfig;

/// Where the camera starts, slightly left of and above the first voxel.
const START_POSITION: Vec3 = Vec3::new(-1.5, 0.5, 2.0);

/// Distance between neighbouring voxels along +X.
const VOXEL_SPACING: f32 = 2.0;

/// Pointer travel per frame while panning, in pixels.
const PAN_STEP: Vec2 = Vec2::new(3.0, -1.0);

/// Scroll applied once, halfway through the session, in lines.
const ZOOM_LINES: f32 = 15.0;

/// Number of frames the window stays unfocused.
const UNFOCUSED_FRAMES: u32 = 10;

/// Viewer state.
pub struct Viewer {
    config: ViewerConfig,
    camera: Camera,
    input: InputManager,
    backend: HeadlessBackend,
    renderer: VoxelRenderer<HeadlessBackend>,
    frame: u32,
    draw_calls: usize,
    was_focused: bool,
    should_exit: bool,
}

impl Viewer {
    /// Build the scene: one row of voxels in front of the camera.
    pub fn new(config: ViewerConfig) -> Result<Self> {
        let mut backend = HeadlessBackend::new();
        let mut renderer = VoxelRenderer::new(&mut backend)?;

        for i in 0..config.voxels {
            #[allow(clippy::cast_precision_loss)]
            let coordinate = Vec3::new(i as f32 * VOXEL_SPACING, 0.0, 0.0);
            renderer.add_voxel(
                &mut backend,
                Voxel::new(coordinate, config.faces, PropertyFlags::empty()),
            )?;
        }
        info!(
            voxels = renderer.len(),
            active = renderer.active_count(),
            faces = ?config.faces,
            "Scene ready"
        );

        let mut input = InputManager::new();
        input.set_cursor_mode(CursorMode::Grabbed);

        Ok(Self {
            camera: Camera::new(START_POSITION, config.aspect()),
            config,
            input,
            backend,
            renderer,
            frame: 0,
            draw_calls: 0,
            was_focused: true,
            should_exit: false,
        })
    }

    /// Feed the scripted input for the current frame.
    ///
    /// Walks forward for the first half, strafes right for the second,
    /// pans the pointer throughout, zooms once at the midpoint, resizes at
    /// the first quarter, drops focus briefly after the third quarter and
    /// presses Escape on the last frame.
    pub fn script_input(&mut self) {
        let frames = self.config.frames;
        let frame = self.frame;
        let half = frames / 2;

        if frame == 0 {
            #[allow(clippy::cast_precision_loss)]
            let center = Vec2::new(self.config.width as f32, self.config.height as f32) * 0.5;
            self.input.move_pointer(center);
            self.input.press_key(KeyCode::KeyW);
        }
        if frame == frames / 4 {
            self.on_resize(self.config.width, self.config.height.saturating_mul(2));
        }
        if frame == half {
            self.input.release_key(KeyCode::KeyW);
            self.input.press_key(KeyCode::KeyD);
            self.input.scroll(ZOOM_LINES);
        }

        let unfocus_at = frames / 4 * 3;
        if frame == unfocus_at {
            self.input.set_focused(false);
        }
        if frame == unfocus_at + UNFOCUSED_FRAMES {
            self.input.set_focused(true);
            self.input.press_key(KeyCode::KeyD);
        }

        self.input
            .move_pointer(self.input.pointer_position() + PAN_STEP);

        if frame + 1 == frames {
            // Short sessions can end inside the unfocused stretch.
            self.input.set_focused(true);
            self.input.press_key(KeyCode::Escape);
        }
    }

    /// Advance the simulation by one fixed step.
    pub fn update(&mut self, dt: f32) {
        let focused = self.input.is_focused();
        if focused && !self.was_focused {
            self.camera.reset_first_move();
        }
        self.was_focused = focused;

        if focused {
            if self.input.is_key_just_pressed(KeyCode::Escape) {
                info!(frame = self.frame, "Escape pressed, exiting");
                self.should_exit = true;
            }

            let scroll = self.input.scroll_delta();
            if scroll != 0.0 {
                self.camera.zoom(scroll);
                debug!(fov = self.camera.fov(), "Zoomed");
            }
            self.camera.process_input(&self.input, dt);
        }

        self.input.end_frame();
        self.frame += 1;
    }

    /// Draw every active voxel. Returns the number of draw calls.
    pub fn render(&mut self) -> Result<usize> {
        let draws = self.renderer.render(&mut self.backend, &self.camera)?;
        self.backend.take_draws();
        self.draw_calls += draws;
        Ok(draws)
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        debug!(width, height, "Viewport resized");
        self.camera.set_viewport(width, height);
    }

    #[must_use]
    pub const fn should_exit(&self) -> bool {
        self.should_exit
    }

    #[must_use]
    pub const fn frame(&self) -> u32 {
        self.frame
    }

    #[must_use]
    pub const fn draw_calls(&self) -> usize {
        self.draw_calls
    }

    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub const fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Buffers still held by the renderer.
    #[must_use]
    pub fn live_buffers(&self) -> usize {
        self.backend.live_buffers()
    }
}
