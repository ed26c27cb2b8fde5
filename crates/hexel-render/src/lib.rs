//! Camera and voxel rendering for the Hexel engine.
//!
//! The GPU itself sits behind the [`GpuBackend`] trait: the renderer only
//! uploads the shared prism vertex buffer, one index buffer per active voxel,
//! and issues one indexed draw per active voxel each frame. Buffer handles
//! release their GPU memory when dropped.

pub mod backend;
pub mod camera;
mod voxel_render;

pub use backend::{
    DrawUniforms, GpuBackend, HeadlessBackend, HeadlessBuffer, RecordedDraw, RenderError, Result,
};
pub use camera::{Camera, CameraUniforms};
pub use voxel_render::VoxelRenderer;
