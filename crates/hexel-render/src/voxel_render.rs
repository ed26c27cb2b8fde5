//! Voxel draw submission.

use hexel_voxel::{prism_vertices, MeshVertex, Voxel, VERTEX_ATTRIBUTES};
use tracing::debug;

use crate::backend::{DrawUniforms, GpuBackend, Result};
use crate::camera::Camera;

struct Entry<B: GpuBackend> {
    voxel: Voxel,
    /// `None` for inactive voxels, which never reach the GPU.
    indices: Option<B::Buffer>,
}

/// Draws hexagonal voxels from one shared prism vertex buffer.
///
/// Each active voxel owns an index buffer holding its assembled face list;
/// every frame it is drawn once, translated to its coordinate. All buffers
/// are released when the renderer (or [`VoxelRenderer::clear`]) drops them.
pub struct VoxelRenderer<B: GpuBackend> {
    vertices: B::Buffer,
    entries: Vec<Entry<B>>,
}

impl<B: GpuBackend> VoxelRenderer<B> {
    /// Upload the shared prism vertex buffer.
    pub fn new(backend: &mut B) -> Result<Self> {
        let vertices = backend.create_vertex_buffer(
            bytemuck::cast_slice(prism_vertices().as_slice()),
            MeshVertex::STRIDE,
            &VERTEX_ATTRIBUTES,
        )?;
        debug!("Uploaded shared prism vertex buffer");

        Ok(Self {
            vertices,
            entries: Vec::new(),
        })
    }

    /// Add a voxel, uploading its index buffer if it has any visible face.
    ///
    /// Returns the voxel's slot.
    pub fn add_voxel(&mut self, backend: &mut B, voxel: Voxel) -> Result<usize> {
        let indices = if voxel.is_active() {
            Some(backend.create_index_buffer(voxel.draw_indices())?)
        } else {
            debug!(coordinate = ?voxel.coordinate(), "Skipping upload of inactive voxel");
            None
        };

        self.entries.push(Entry { voxel, indices });
        Ok(self.entries.len() - 1)
    }

    /// Voxel in `slot`, if any.
    #[must_use]
    pub fn voxel(&self, slot: usize) -> Option<&Voxel> {
        self.entries.get(slot).map(|entry| &entry.voxel)
    }

    /// All voxels, in slot order.
    pub fn voxels(&self) -> impl Iterator<Item = &Voxel> {
        self.entries.iter().map(|entry| &entry.voxel)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of voxels that produce a draw call.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|e| e.indices.is_some()).count()
    }

    /// Remove every voxel and release their index buffers.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Issue one draw per active voxel. Returns the number of draws.
    pub fn render(&self, backend: &mut B, camera: &Camera) -> Result<usize> {
        let mut draws = 0;
        for entry in &self.entries {
            let Some(indices) = &entry.indices else {
                continue;
            };
            let uniforms = DrawUniforms::new(entry.voxel.model_matrix(), camera);
            backend.draw_indexed(&self.vertices, indices, entry.voxel.index_count(), &uniforms)?;
            draws += 1;
        }
        Ok(draws)
    }
}
