//! Per-voxel bit sets.
//!
//! Both sets are single bytes with all eight bits named, so any byte is a
//! valid value and the layout is stable for persistence.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Faces of a hexagonal prism that are present (visible).
    ///
    /// ```text
    /// bit  7     6     5     4     3     2     1      0
    ///      SIDE5 SIDE4 SIDE3 SIDE2 SIDE1 SIDE0 BOTTOM TOP
    /// ```
    ///
    /// The empty set ([`FaceFlags::NONE`]) marks an inactive voxel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct FaceFlags: u8 {
        /// Upper hexagonal cap.
        const TOP    = 0b0000_0001;
        /// Lower hexagonal cap.
        const BOTTOM = 0b0000_0010;
        /// Side between ring points 1 and 2.
        const SIDE0  = 0b0000_0100;
        /// Side between ring points 2 and 3.
        const SIDE1  = 0b0000_1000;
        /// Side between ring points 3 and 4.
        const SIDE2  = 0b0001_0000;
        /// Side between ring points 4 and 5.
        const SIDE3  = 0b0010_0000;
        /// Side between ring points 5 and 6.
        const SIDE4  = 0b0100_0000;
        /// Side between ring points 6 and 1.
        const SIDE5  = 0b1000_0000;
    }
}

impl FaceFlags {
    /// No faces. The only value for which a voxel is inactive.
    pub const NONE: Self = Self::empty();
    /// Both caps.
    pub const CAPS: Self = Self::TOP.union(Self::BOTTOM);
    /// All six sides.
    pub const SIDES: Self = Self::from_bits_truncate(0b1111_1100);
    /// Every face.
    pub const ALL: Self = Self::all();

    /// Flag for side `index` (0..6).
    ///
    /// # Panics
    ///
    /// Panics if `index >= 6`.
    #[must_use]
    pub const fn side(index: usize) -> Self {
        assert!(index < 6, "hexagon side index out of range");
        Self::from_bits_truncate(Self::SIDE0.bits() << index)
    }

    /// Number of visible caps.
    #[inline]
    #[must_use]
    pub const fn cap_count(self) -> u32 {
        self.intersection(Self::CAPS).bits().count_ones()
    }

    /// Number of visible sides.
    #[inline]
    #[must_use]
    pub const fn side_count(self) -> u32 {
        self.intersection(Self::SIDES).bits().count_ones()
    }
}

bitflags! {
    /// Gameplay and material attributes of a voxel.
    ///
    /// Independent of [`FaceFlags`]: stored next to it, never mixed with it,
    /// and ignored by rendering.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct PropertyFlags: u8 {
        /// Cannot be destroyed.
        const UNBREAKABLE  = 0b0000_0001;
        /// Lets light and sight through.
        const TRANSPARENT  = 0b0000_0010;
        /// Ignored by collision queries.
        const NO_COLLISION = 0b0000_0100;
        /// Simulated by physics.
        const HAS_PHYSICS  = 0b0000_1000;
        /// Can catch fire.
        const FLAMMABLE    = 0b0001_0000;
        /// Reserved.
        const RESERVED1    = 0b0010_0000;
        /// Reserved.
        const RESERVED2    = 0b0100_0000;
        /// Reserved.
        const RESERVED3    = 0b1000_0000;
    }
}

impl PropertyFlags {
    #[inline]
    #[must_use]
    pub const fn is_unbreakable(self) -> bool {
        self.contains(Self::UNBREAKABLE)
    }

    #[inline]
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.contains(Self::TRANSPARENT)
    }

    /// Returns `true` unless [`PropertyFlags::NO_COLLISION`] is set.
    #[inline]
    #[must_use]
    pub const fn has_collision(self) -> bool {
        !self.contains(Self::NO_COLLISION)
    }

    #[inline]
    #[must_use]
    pub const fn has_physics(self) -> bool {
        self.contains(Self::HAS_PHYSICS)
    }

    #[inline]
    #[must_use]
    pub const fn is_flammable(self) -> bool {
        self.contains(Self::FLAMMABLE)
    }
}

/// Serde adapter storing a flag set as its raw byte.
///
/// The derived impls write flag names in human-readable formats; this keeps
/// the persisted form equal to the bit layout above.
pub mod as_byte {
    use bitflags::Flags;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<F, S>(flags: &F, serializer: S) -> Result<S::Ok, S::Error>
    where
        F: Flags<Bits = u8>,
        S: Serializer,
    {
        flags.bits().serialize(serializer)
    }

    pub fn deserialize<'de, F, D>(deserializer: D) -> Result<F, D::Error>
    where
        F: Flags<Bits = u8>,
        D: Deserializer<'de>,
    {
        u8::deserialize(deserializer).map(F::from_bits_truncate)
    }
}
