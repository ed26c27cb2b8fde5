//! Hexagonal voxel cells for the Hexel engine.
//!
//! A voxel is a hexagonal prism with eight possible faces: two caps and six
//! sides. Which faces are present is stored as a [`FaceFlags`] byte, and the
//! draw-index list for a voxel is assembled from fixed per-face tables into a
//! shared 72-vertex prism buffer, so hidden faces cost nothing at draw time.
//!
//! # Usage
//!
//! ```
//! use glam::Vec3;
//! use hexel_voxel::{FaceFlags, PropertyFlags, Voxel};
//!
//! let voxel = Voxel::new(Vec3::ZERO, FaceFlags::TOP | FaceFlags::BOTTOM, PropertyFlags::empty());
//! assert!(voxel.is_active());
//! assert_eq!(voxel.draw_indices().len(), 36);
//! ```

mod flags;
pub mod mesh;
mod voxel;

pub use flags::{FaceFlags, PropertyFlags};
pub use mesh::{
    assemble_indices, index_count, prism_vertices, Face, MeshVertex, VertexAttribute,
    BOTTOM_INDICES, PRISM_VERTEX_COUNT, SIDE_INDICES, TOP_INDICES, VERTEX_ATTRIBUTES,
};
pub use voxel::{Voxel, VoxelDesc};
