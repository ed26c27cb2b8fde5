//! GPU backend contract and an in-memory implementation.
//!
//! A backend hands out buffer handles that own their GPU allocation: dropping
//! a handle releases it. Owners therefore release GPU memory simply by going
//! out of scope, and nothing needs a leak check at exit.

use std::cell::Cell;
use std::rc::Rc;

use glam::Mat4;
use hexel_voxel::VertexAttribute;
use thiserror::Error;
use tracing::trace;

use crate::camera::Camera;

/// Rendering error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Tried to upload a buffer with no contents
    #[error("Empty {0} buffer upload")]
    EmptyBuffer(&'static str),

    /// A draw referenced more indices than the index buffer holds
    #[error("Draw of {requested} indices exceeds index buffer of {available}")]
    IndexCountExceeded { requested: u32, available: u32 },

    /// An index points past the end of the vertex buffer
    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: u32 },

    /// A buffer was bound to the wrong slot
    #[error("Buffer {id} bound as {expected} buffer")]
    WrongBufferKind { id: u64, expected: &'static str },

    /// Backend-specific failure
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type alias using [`RenderError`].
pub type Result<T> = std::result::Result<T, RenderError>;

/// Per-draw shader uniforms.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl DrawUniforms {
    pub fn new(model: Mat4, camera: &Camera) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            projection: camera.projection_matrix().to_cols_array_2d(),
        }
    }
}

/// The graphics API as seen by the renderer.
pub trait GpuBackend {
    /// Handle to a GPU buffer. Dropping it releases the buffer.
    type Buffer;

    /// Upload interleaved vertex data described by `attributes`.
    fn create_vertex_buffer(
        &mut self,
        data: &[u8],
        stride: usize,
        attributes: &[VertexAttribute],
    ) -> Result<Self::Buffer>;

    /// Upload a triangle-list index buffer.
    fn create_index_buffer(&mut self, indices: &[u32]) -> Result<Self::Buffer>;

    /// Draw the first `index_count` indices of `indices` as triangles.
    fn draw_indexed(
        &mut self,
        vertices: &Self::Buffer,
        indices: &Self::Buffer,
        index_count: u32,
        uniforms: &DrawUniforms,
    ) -> Result<()>;
}

#[derive(Debug)]
enum Contents {
    Vertices { count: u32 },
    Indices(Box<[u32]>),
}

/// Buffer handle of [`HeadlessBackend`].
#[derive(Debug)]
pub struct HeadlessBuffer {
    id: u64,
    contents: Contents,
    live: Rc<Cell<usize>>,
}

impl HeadlessBuffer {
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for HeadlessBuffer {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
        trace!(id = self.id, "Released buffer");
    }
}

/// A draw captured by [`HeadlessBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub vertex_buffer: u64,
    pub index_buffer: u64,
    pub index_count: u32,
    pub uniforms: DrawUniforms,
}

/// Backend that keeps buffers in memory and records draws instead of
/// issuing them. Validates every draw against its buffers.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    live: Rc<Cell<usize>>,
    next_id: u64,
    draws: Vec<RecordedDraw>,
}

impl HeadlessBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers created and not yet dropped.
    #[must_use]
    pub fn live_buffers(&self) -> usize {
        self.live.get()
    }

    /// Draws recorded since the last [`HeadlessBackend::take_draws`].
    #[must_use]
    pub fn draws(&self) -> &[RecordedDraw] {
        &self.draws
    }

    /// Drain the recorded draws, typically once per frame.
    pub fn take_draws(&mut self) -> Vec<RecordedDraw> {
        std::mem::take(&mut self.draws)
    }

    fn allocate(&mut self, contents: Contents) -> HeadlessBuffer {
        let id = self.next_id;
        self.next_id += 1;
        self.live.set(self.live.get() + 1);
        HeadlessBuffer {
            id,
            contents,
            live: Rc::clone(&self.live),
        }
    }
}

impl GpuBackend for HeadlessBackend {
    type Buffer = HeadlessBuffer;

    fn create_vertex_buffer(
        &mut self,
        data: &[u8],
        stride: usize,
        attributes: &[VertexAttribute],
    ) -> Result<Self::Buffer> {
        if data.is_empty() {
            return Err(RenderError::EmptyBuffer("vertex"));
        }
        if stride == 0 || data.len() % stride != 0 {
            return Err(RenderError::Backend(format!(
                "vertex data of {} bytes is not a multiple of stride {stride}",
                data.len()
            )));
        }
        if let Some(attr) = attributes
            .iter()
            .find(|a| a.offset + a.components as usize * size_of::<f32>() > stride)
        {
            return Err(RenderError::Backend(format!(
                "attribute {} overruns stride {stride}",
                attr.name
            )));
        }

        let count = u32::try_from(data.len() / stride)
            .map_err(|_| RenderError::Backend("too many vertices".to_string()))?;
        let buffer = self.allocate(Contents::Vertices { count });
        trace!(id = buffer.id, count, "Created vertex buffer");
        Ok(buffer)
    }

    fn create_index_buffer(&mut self, indices: &[u32]) -> Result<Self::Buffer> {
        if indices.is_empty() {
            return Err(RenderError::EmptyBuffer("index"));
        }
        let buffer = self.allocate(Contents::Indices(indices.into()));
        trace!(id = buffer.id, count = indices.len(), "Created index buffer");
        Ok(buffer)
    }

    fn draw_indexed(
        &mut self,
        vertices: &Self::Buffer,
        indices: &Self::Buffer,
        index_count: u32,
        uniforms: &DrawUniforms,
    ) -> Result<()> {
        let Contents::Vertices {
            count: vertex_count,
        } = vertices.contents
        else {
            return Err(RenderError::WrongBufferKind {
                id: vertices.id,
                expected: "vertex",
            });
        };
        let Contents::Indices(ref data) = indices.contents else {
            return Err(RenderError::WrongBufferKind {
                id: indices.id,
                expected: "index",
            });
        };

        let available = u32::try_from(data.len()).unwrap_or(u32::MAX);
        if index_count > available {
            return Err(RenderError::IndexCountExceeded {
                requested: index_count,
                available,
            });
        }
        if let Some(&index) = data[..index_count as usize]
            .iter()
            .find(|&&i| i >= vertex_count)
        {
            return Err(RenderError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }

        self.draws.push(RecordedDraw {
            vertex_buffer: vertices.id,
            index_buffer: indices.id,
            index_count,
            uniforms: *uniforms,
        });
        Ok(())
    }
}
