//! The voxel entity.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::flags::{FaceFlags, PropertyFlags};
use crate::mesh::assemble_indices;

/// A single hexagonal voxel.
///
/// Flags are fixed at construction and the draw-index list is assembled once,
/// eagerly. Changing which faces are visible means building a new voxel (see
/// [`Voxel::with_faces`]), which always re-assembles from scratch.
#[derive(Debug, Clone, PartialEq)]
pub struct Voxel {
    coordinate: Vec3,
    faces: FaceFlags,
    properties: PropertyFlags,
    indices: Box<[u32]>,
}

impl Voxel {
    /// Create a voxel at `coordinate` with the given face and property sets.
    #[must_use]
    pub fn new(coordinate: Vec3, faces: FaceFlags, properties: PropertyFlags) -> Self {
        let indices = assemble_indices(faces).into_boxed_slice();
        trace!(
            ?coordinate,
            faces = faces.bits(),
            index_count = indices.len(),
            "Assembled voxel"
        );
        Self {
            coordinate,
            faces,
            properties,
            indices,
        }
    }

    /// A copy of this voxel with a different face set and a freshly
    /// assembled index list.
    #[must_use]
    pub fn with_faces(&self, faces: FaceFlags) -> Self {
        Self::new(self.coordinate, faces, self.properties)
    }

    /// World position, applied as a translation at draw time.
    #[inline]
    #[must_use]
    pub const fn coordinate(&self) -> Vec3 {
        self.coordinate
    }

    #[inline]
    #[must_use]
    pub const fn faces(&self) -> FaceFlags {
        self.faces
    }

    #[inline]
    #[must_use]
    pub const fn properties(&self) -> PropertyFlags {
        self.properties
    }

    /// Returns `false` only when no face is visible.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.faces != FaceFlags::NONE
    }

    /// Indices into the shared prism vertex buffer, in draw order.
    #[inline]
    #[must_use]
    pub fn draw_indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of indices to draw (at most 72).
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Model matrix translating the unit prism to this voxel's position.
    #[inline]
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.coordinate)
    }
}

/// Serializable description of a voxel.
///
/// Flag sets are stored as their raw bytes in every format; the index list
/// is not stored since it is derived from the faces.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VoxelDesc {
    pub coordinate: [f32; 3],
    #[serde(with = "crate::flags::as_byte")]
    pub faces: FaceFlags,
    #[serde(default, with = "crate::flags::as_byte")]
    pub properties: PropertyFlags,
}

impl From<&Voxel> for VoxelDesc {
    fn from(voxel: &Voxel) -> Self {
        Self {
            coordinate: voxel.coordinate.to_array(),
            faces: voxel.faces,
            properties: voxel.properties,
        }
    }
}

impl From<VoxelDesc> for Voxel {
    fn from(desc: VoxelDesc) -> Self {
        Self::new(Vec3::from_array(desc.coordinate), desc.faces, desc.properties)
    }
}
