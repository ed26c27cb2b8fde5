//! Prism mesh tables and draw-index assembly.
//!
//! Every voxel shares one 72-vertex buffer holding all eight faces of the
//! prism, already triangulated:
//!
//! ```text
//! vertices  0..18   bottom cap  (6 triangles, normal -Y)
//! vertices 18..36   top cap     (6 triangles, normal +Y)
//! vertices 36..72   sides 0..5  (2 triangles each, outward normals)
//! ```
//!
//! A face's index table is simply the contiguous range of its vertices, and a
//! voxel's index list is the concatenation of the tables of its visible faces
//! in [`Face::CANONICAL_ORDER`]. Triangles wind counter-clockwise seen from
//! outside, so back-face culling works on the assembled list as-is.

use std::mem::{offset_of, size_of};
use std::sync::LazyLock;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use hexel_core::constants::VOXEL_HALF_THICKNESS;
use hexel_core::HEX_POINTS;

use crate::flags::FaceFlags;

/// Indices per hexagonal cap (6 triangles).
pub const CAP_INDEX_COUNT: usize = 18;
/// Indices per side quad (2 triangles).
pub const SIDE_INDEX_COUNT: usize = 6;
/// Vertices in the shared prism buffer.
pub const PRISM_VERTEX_COUNT: usize = 2 * CAP_INDEX_COUNT + 6 * SIDE_INDEX_COUNT;

#[allow(clippy::cast_possible_truncation)]
const fn sequence<const N: usize>(start: u32) -> [u32; N] {
    let mut out = [0; N];
    let mut i = 0;
    while i < N {
        out[i] = start + i as u32;
        i += 1;
    }
    out
}

/// Index table for the bottom cap.
pub static BOTTOM_INDICES: [u32; CAP_INDEX_COUNT] = sequence(0);
/// Index table for the top cap.
pub static TOP_INDICES: [u32; CAP_INDEX_COUNT] = sequence(18);
/// Index tables for sides 0..5.
pub static SIDE_INDICES: [[u32; SIDE_INDEX_COUNT]; 6] = [
    sequence(36),
    sequence(42),
    sequence(48),
    sequence(54),
    sequence(60),
    sequence(66),
];

/// One face of the hexagonal prism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Bottom,
    Top,
    Side0,
    Side1,
    Side2,
    Side3,
    Side4,
    Side5,
}

impl Face {
    /// Order in which faces are appended to a draw-index list.
    pub const CANONICAL_ORDER: [Self; 8] = [
        Self::Bottom,
        Self::Top,
        Self::Side0,
        Self::Side1,
        Self::Side2,
        Self::Side3,
        Self::Side4,
        Self::Side5,
    ];

    /// The bit representing this face.
    #[must_use]
    pub const fn flag(self) -> FaceFlags {
        match self {
            Self::Bottom => FaceFlags::BOTTOM,
            Self::Top => FaceFlags::TOP,
            Self::Side0 => FaceFlags::SIDE0,
            Self::Side1 => FaceFlags::SIDE1,
            Self::Side2 => FaceFlags::SIDE2,
            Self::Side3 => FaceFlags::SIDE3,
            Self::Side4 => FaceFlags::SIDE4,
            Self::Side5 => FaceFlags::SIDE5,
        }
    }

    /// Side number (0..6), or `None` for the caps.
    #[must_use]
    pub const fn side_index(self) -> Option<usize> {
        match self {
            Self::Bottom | Self::Top => None,
            Self::Side0 => Some(0),
            Self::Side1 => Some(1),
            Self::Side2 => Some(2),
            Self::Side3 => Some(3),
            Self::Side4 => Some(4),
            Self::Side5 => Some(5),
        }
    }

    /// This face's fixed index table into [`prism_vertices`].
    #[must_use]
    pub fn indices(self) -> &'static [u32] {
        match self.side_index() {
            Some(side) => &SIDE_INDICES[side],
            None if self == Self::Bottom => &BOTTOM_INDICES,
            None => &TOP_INDICES,
        }
    }
}

/// Number of indices [`assemble_indices`] produces for `faces`.
#[must_use]
pub const fn index_count(faces: FaceFlags) -> usize {
    faces.cap_count() as usize * CAP_INDEX_COUNT + faces.side_count() as usize * SIDE_INDEX_COUNT
}

/// Build the draw-index list for a set of visible faces.
///
/// Face tables are concatenated in [`Face::CANONICAL_ORDER`], regardless of
/// how `faces` was put together. The result feeds an index buffer directly.
#[must_use]
pub fn assemble_indices(faces: FaceFlags) -> Vec<u32> {
    if faces == FaceFlags::NONE {
        return Vec::new();
    }

    let mut indices = Vec::with_capacity(index_count(faces));
    for face in Face::CANONICAL_ORDER {
        if faces.contains(face.flag()) {
            indices.extend_from_slice(face.indices());
        }
    }
    indices
}

/// Interleaved vertex of the prism buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    /// Byte distance between consecutive vertices.
    pub const STRIDE: usize = size_of::<Self>();

    fn new(position: Vec3, normal: Vec3, uv: [f32; 2]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv,
        }
    }
}

/// Layout of one vertex attribute inside [`MeshVertex`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input name.
    pub name: &'static str,
    /// Number of `f32` components.
    pub components: u32,
    /// Byte offset from the start of the vertex.
    pub offset: usize,
}

/// Attribute layout of [`MeshVertex`], in shader location order.
pub const VERTEX_ATTRIBUTES: [VertexAttribute; 3] = [
    VertexAttribute {
        name: "aPosition",
        components: 3,
        offset: offset_of!(MeshVertex, position),
    },
    VertexAttribute {
        name: "aNormal",
        components: 3,
        offset: offset_of!(MeshVertex, normal),
    },
    VertexAttribute {
        name: "aUVCoord",
        components: 2,
        offset: offset_of!(MeshVertex, uv),
    },
];

// Cap triangles as hexagon table indices (0 = center).
const BOTTOM_TRIANGLES: [[usize; 3]; 6] =
    [[0, 1, 2], [2, 3, 0], [0, 3, 4], [4, 5, 0], [0, 5, 6], [6, 1, 0]];
const TOP_TRIANGLES: [[usize; 3]; 6] =
    [[2, 1, 0], [0, 3, 2], [4, 3, 0], [0, 5, 4], [6, 5, 0], [0, 1, 6]];

// Caps alternate between these two UV layouts.
const CAP_UVS: [[[f32; 2]; 3]; 2] = [
    [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]],
    [[1.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
];
const SIDE_UVS: [[f32; 2]; 6] = [
    [0.0, 0.0],
    [0.0, 1.0],
    [1.0, 0.0],
    [0.0, 1.0],
    [1.0, 1.0],
    [1.0, 0.0],
];

static PRISM_VERTICES: LazyLock<[MeshVertex; PRISM_VERTEX_COUNT]> =
    LazyLock::new(|| build_prism_vertices(&HEX_POINTS, VOXEL_HALF_THICKNESS));

/// The shared prism vertex buffer, built once from the unit hexagon table.
#[must_use]
pub fn prism_vertices() -> &'static [MeshVertex; PRISM_VERTEX_COUNT] {
    &PRISM_VERTICES
}

fn build_prism_vertices(
    points: &[Vec2; 7],
    half_thickness: f32,
) -> [MeshVertex; PRISM_VERTEX_COUNT] {
    let at = |point: usize, y: f32| Vec3::new(points[point].x, y, points[point].y);

    let mut vertices = Vec::with_capacity(PRISM_VERTEX_COUNT);

    for (triangles, y, normal) in [
        (&BOTTOM_TRIANGLES, -half_thickness, Vec3::NEG_Y),
        (&TOP_TRIANGLES, half_thickness, Vec3::Y),
    ] {
        for (t, triangle) in triangles.iter().enumerate() {
            for (&point, uv) in triangle.iter().zip(CAP_UVS[t % 2]) {
                vertices.push(MeshVertex::new(at(point, y), normal, uv));
            }
        }
    }

    for side in 0..6 {
        let a = side + 1;
        let b = (side + 1) % 6 + 1;
        let mid = (points[a] + points[b]) * 0.5;
        let normal = Vec3::new(mid.x, 0.0, mid.y).normalize();

        let corners = [
            at(a, -half_thickness),
            at(a, half_thickness),
            at(b, -half_thickness),
            at(a, half_thickness),
            at(b, half_thickness),
            at(b, -half_thickness),
        ];
        for (position, uv) in corners.into_iter().zip(SIDE_UVS) {
            vertices.push(MeshVertex::new(position, normal, uv));
        }
    }

    let mut out = [MeshVertex::default(); PRISM_VERTEX_COUNT];
    out.copy_from_slice(&vertices);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn table_sizes() {
        assert_eq!(BOTTOM_INDICES.len(), 18);
        assert_eq!(TOP_INDICES.len(), 18);
        assert!(SIDE_INDICES.iter().all(|side| side.len() == 6));
        assert_eq!(PRISM_VERTEX_COUNT, 72);
        assert_eq!(MeshVertex::STRIDE, 8 * size_of::<f32>());
    }

    #[test]
    fn tables_cover_the_vertex_buffer_once() {
        let mut all: Vec<u32> = Face::CANONICAL_ORDER
            .iter()
            .flat_map(|face| face.indices().iter().copied())
            .collect();
        all.sort_unstable();
        assert_eq!(all, (0..72).collect::<Vec<u32>>());
    }

    #[test]
    fn none_assembles_to_nothing() {
        assert!(assemble_indices(FaceFlags::NONE).is_empty());
        assert_eq!(index_count(FaceFlags::NONE), 0);
    }

    #[test]
    fn caps_in_canonical_order() {
        let expected: Vec<u32> = BOTTOM_INDICES.iter().chain(&TOP_INDICES).copied().collect();

        let top_first = assemble_indices(FaceFlags::TOP | FaceFlags::BOTTOM);
        let bottom_first = assemble_indices(FaceFlags::BOTTOM | FaceFlags::TOP);
        assert_eq!(top_first.len(), 36);
        assert_eq!(top_first, expected);
        assert_eq!(bottom_first, expected);
    }

    #[test]
    fn sides_follow_caps() {
        let indices = assemble_indices(FaceFlags::SIDE4 | FaceFlags::TOP | FaceFlags::SIDE1);
        let expected: Vec<u32> = TOP_INDICES
            .iter()
            .chain(&SIDE_INDICES[1])
            .chain(&SIDE_INDICES[4])
            .copied()
            .collect();
        assert_eq!(indices, expected);
    }

    #[test]
    fn assembly_is_idempotent() {
        for byte in 0..=u8::MAX {
            let faces = FaceFlags::from_bits_truncate(byte);
            let first = assemble_indices(faces);
            assert_eq!(first, assemble_indices(faces));
            assert_eq!(first.len(), index_count(faces));
        }
    }

    #[test]
    fn all_faces_is_full_buffer() {
        assert_eq!(assemble_indices(FaceFlags::ALL), (0..72).collect::<Vec<u32>>());
    }

    #[test]
    fn face_flags_round_trip_through_faces() {
        let union = Face::CANONICAL_ORDER
            .iter()
            .fold(FaceFlags::NONE, |acc, face| acc | face.flag());
        assert_eq!(union, FaceFlags::ALL);
        assert_eq!(Face::Side3.side_index(), Some(3));
        assert_eq!(Face::Top.side_index(), None);
    }

    #[test]
    fn caps_sit_at_half_thickness() {
        let vertices = prism_vertices();
        for &i in &BOTTOM_INDICES {
            assert_relative_eq!(vertices[i as usize].position[1], -VOXEL_HALF_THICKNESS);
            assert_eq!(vertices[i as usize].normal, [0.0, -1.0, 0.0]);
        }
        for &i in &TOP_INDICES {
            assert_relative_eq!(vertices[i as usize].position[1], VOXEL_HALF_THICKNESS);
            assert_eq!(vertices[i as usize].normal, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn triangles_wind_outward() {
        let vertices = prism_vertices();
        for triangle in vertices.chunks_exact(3) {
            let [a, b, c] = [0, 1, 2].map(|k| Vec3::from_array(triangle[k].position));
            let face_normal = (b - a).cross(c - a);
            let normal = Vec3::from_array(triangle[0].normal);

            assert_relative_eq!(normal.length(), 1.0, epsilon = 1e-5);
            assert!(
                face_normal.dot(normal) > 0.0,
                "triangle {a} {b} {c} winds against its normal {normal}"
            );
            // Outward: the triangle centroid lies on the normal's side of the origin.
            assert!(((a + b + c) / 3.0).dot(normal) > 0.0);
        }
    }

    #[test]
    fn attribute_layout() {
        assert_eq!(VERTEX_ATTRIBUTES[0].offset, 0);
        assert_eq!(VERTEX_ATTRIBUTES[1].offset, 12);
        assert_eq!(VERTEX_ATTRIBUTES[2].offset, 24);
        let floats: u32 = VERTEX_ATTRIBUTES.iter().map(|a| a.components).sum();
        assert_eq!(floats as usize * size_of::<f32>(), MeshVertex::STRIDE);
    }
}
