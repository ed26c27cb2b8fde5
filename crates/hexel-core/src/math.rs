//! Vector and matrix primitives.
//!
//! The engine uses glam's `f32` types directly. They are plain `Copy` values
//! with componentwise `+ - * / %` against scalars (on either side) and
//! same-rank vectors, componentwise `==`, and `length()` for the Euclidean
//! magnitude.
//!
//! # Normalization
//!
//! `normalize()` divides by the magnitude and is **not** guarded: a
//! zero-length input produces non-finite (NaN) components. Code that can see
//! a degenerate vector must either prove it cannot happen (the camera does,
//! through its pitch clamp) or call `normalize_or_zero()` explicitly.

pub use glam::{Mat4, Vec2, Vec3, Vec4};

/// Default tolerance for float comparisons on unit-scale geometry.
pub const EPSILON: f32 = 1e-5;

/// Check that three vectors form an orthonormal basis.
///
/// Every pair must have a dot product within `eps` of zero and every vector a
/// magnitude within `eps` of one.
#[must_use]
pub fn is_orthonormal_basis(a: Vec3, b: Vec3, c: Vec3, eps: f32) -> bool {
    let unit = |v: Vec3| (v.length() - 1.0).abs() <= eps;
    unit(a)
        && unit(b)
        && unit(c)
        && a.dot(b).abs() <= eps
        && b.dot(c).abs() <= eps
        && a.dot(c).abs() <= eps
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn componentwise_scalar_ops() {
        let v = Vec3::new(2.0, 4.0, 6.0);
        assert_eq!(v + 1.0, Vec3::new(3.0, 5.0, 7.0));
        assert_eq!(1.0 - v, Vec3::new(-1.0, -3.0, -5.0));
        assert_eq!(v * 0.5, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(12.0 / v, Vec3::new(6.0, 3.0, 2.0));
        assert_eq!(v % 4.0, Vec3::new(2.0, 0.0, 2.0));
        assert_eq!(7.0 % Vec2::new(2.0, 4.0), Vec2::new(1.0, 3.0));
    }

    #[test]
    fn componentwise_vector_ops() {
        let a = Vec4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vec4::new(4.0, 3.0, 2.0, 1.0);
        assert_eq!(a + b, Vec4::splat(5.0));
        assert_eq!(a * b, Vec4::new(4.0, 6.0, 6.0, 4.0));
        assert_eq!(a - a, Vec4::ZERO);
        assert_eq!(b % Vec4::new(3.0, 2.0, 2.0, 1.0), Vec4::new(1.0, 1.0, 0.0, 0.0));
    }

    #[test]
    fn magnitude_and_normalize() {
        let v = Vec2::new(3.0, 4.0);
        assert_relative_eq!(v.length(), 5.0);
        assert_relative_eq!(v.normalize().length(), 1.0);
    }

    #[test]
    fn normalizing_zero_is_not_finite() {
        assert!(!Vec3::ZERO.normalize().is_finite());
        assert_eq!(Vec3::ZERO.normalize_or_zero(), Vec3::ZERO);
    }

    #[test]
    fn orthonormal_basis() {
        assert!(is_orthonormal_basis(Vec3::X, Vec3::Y, Vec3::Z, EPSILON));
        assert!(!is_orthonormal_basis(Vec3::X, Vec3::X, Vec3::Z, EPSILON));
        assert!(!is_orthonormal_basis(Vec3::X * 2.0, Vec3::Y, Vec3::Z, EPSILON));
    }
}
