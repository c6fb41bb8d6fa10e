use approx::{AbsDiffEq, RelativeEq};
use std::ops::Mul;

use super::{common::FloatValueType, vector::Vec3};

/// A row-major 4x4 homogeneous transform.
///
/// Points transform with the full matrix including translation, vectors with
/// the upper 3x3 only.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix4x4<T>
where
    T: FloatValueType,
{
    /// Raw values in row-major order.
    pub m: [[T; 4]; 4],
}

impl<T> Matrix4x4<T>
where
    T: FloatValueType,
{
    /// Creates a new `Matrix4x4`.
    pub fn new(m: [[T; 4]; 4]) -> Self {
        let ret = Self { m };
        debug_assert!(!ret.has_nans());
        ret
    }

    /// Creates a new identity `Matrix4x4`.
    pub fn identity() -> Self {
        Self {
            m: [
                [T::one(), T::zero(), T::zero(), T::zero()],
                [T::zero(), T::one(), T::zero(), T::zero()],
                [T::zero(), T::zero(), T::one(), T::zero()],
                [T::zero(), T::zero(), T::zero(), T::one()],
            ],
        }
    }

    /// Creates a new `Matrix4x4` filled with zeros.
    pub fn zeros() -> Self {
        Self {
            m: [[T::zero(); 4]; 4],
        }
    }

    /// Checks if this `Matrix4x4` contains NaNs.
    pub fn has_nans(&self) -> bool {
        // NaNs are the rare special case so no need to early out
        self.m.iter().flatten().any(|t| t.is_nan())
    }

    /// Returns the transpose of this `Matrix4x4`.
    pub fn transposed(&self) -> Self {
        Self {
            m: [
                [self.m[0][0], self.m[1][0], self.m[2][0], self.m[3][0]],
                [self.m[0][1], self.m[1][1], self.m[2][1], self.m[3][1]],
                [self.m[0][2], self.m[1][2], self.m[2][2], self.m[3][2]],
                [self.m[0][3], self.m[1][3], self.m[2][3], self.m[3][3]],
            ],
        }
    }

    /// Returns the inverse of this `Matrix4x4`.
    ///
    /// Cramer's rule over 2x2 subfactors. Panics on a singular matrix since
    /// the transforms fed in here are always invertible TRS compositions.
    pub fn inverted(&self) -> Self {
        let m = &self.m;

        let s0 = m[0][0] * m[1][1] - m[1][0] * m[0][1];
        let s1 = m[0][0] * m[1][2] - m[1][0] * m[0][2];
        let s2 = m[0][0] * m[1][3] - m[1][0] * m[0][3];
        let s3 = m[0][1] * m[1][2] - m[1][1] * m[0][2];
        let s4 = m[0][1] * m[1][3] - m[1][1] * m[0][3];
        let s5 = m[0][2] * m[1][3] - m[1][2] * m[0][3];

        let c5 = m[2][2] * m[3][3] - m[3][2] * m[2][3];
        let c4 = m[2][1] * m[3][3] - m[3][1] * m[2][3];
        let c3 = m[2][1] * m[3][2] - m[3][1] * m[2][2];
        let c2 = m[2][0] * m[3][3] - m[3][0] * m[2][3];
        let c1 = m[2][0] * m[3][2] - m[3][0] * m[2][2];
        let c0 = m[2][0] * m[3][1] - m[3][0] * m[2][1];

        let det = s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0;
        assert!(det != T::zero(), "Can't invert a singular matrix");
        let inv_det = T::one() / det;

        Matrix4x4::new([
            [
                (m[1][1] * c5 - m[1][2] * c4 + m[1][3] * c3) * inv_det,
                (-m[0][1] * c5 + m[0][2] * c4 - m[0][3] * c3) * inv_det,
                (m[3][1] * s5 - m[3][2] * s4 + m[3][3] * s3) * inv_det,
                (-m[2][1] * s5 + m[2][2] * s4 - m[2][3] * s3) * inv_det,
            ],
            [
                (-m[1][0] * c5 + m[1][2] * c2 - m[1][3] * c1) * inv_det,
                (m[0][0] * c5 - m[0][2] * c2 + m[0][3] * c1) * inv_det,
                (-m[3][0] * s5 + m[3][2] * s2 - m[3][3] * s1) * inv_det,
                (m[2][0] * s5 - m[2][2] * s2 + m[2][3] * s1) * inv_det,
            ],
            [
                (m[1][0] * c4 - m[1][1] * c2 + m[1][3] * c0) * inv_det,
                (-m[0][0] * c4 + m[0][1] * c2 - m[0][3] * c0) * inv_det,
                (m[3][0] * s4 - m[3][1] * s2 + m[3][3] * s0) * inv_det,
                (-m[2][0] * s4 + m[2][1] * s2 - m[2][3] * s0) * inv_det,
            ],
            [
                (-m[1][0] * c3 + m[1][1] * c1 - m[1][2] * c0) * inv_det,
                (m[0][0] * c3 - m[0][1] * c1 + m[0][2] * c0) * inv_det,
                (-m[3][0] * s3 + m[3][1] * s1 - m[3][2] * s0) * inv_det,
                (m[2][0] * s3 - m[2][1] * s1 + m[2][2] * s0) * inv_det,
            ],
        ])
    }

    /// Transforms a position with this `Matrix4x4`, translation included.
    #[inline]
    pub fn transform_point(&self, p: Vec3<T>) -> Vec3<T> {
        let m = &self.m;
        let xp = m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z + m[0][3];
        let yp = m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z + m[1][3];
        let zp = m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z + m[2][3];
        let wp = m[3][0] * p.x + m[3][1] * p.y + m[3][2] * p.z + m[3][3];
        if wp == T::one() {
            Vec3::new(xp, yp, zp)
        } else {
            Vec3::new(xp, yp, zp) / wp
        }
    }

    /// Transforms a direction with this `Matrix4x4`, ignoring translation.
    #[inline]
    pub fn transform_vector(&self, v: Vec3<T>) -> Vec3<T> {
        let m = &self.m;
        Vec3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }
}

// Composition chains like T * R * S would copy the full matrix at every hop
// if this took operands by value
impl<'a, 'b, T> Mul<&'b Matrix4x4<T>> for &'a Matrix4x4<T>
where
    T: FloatValueType,
{
    type Output = Matrix4x4<T>;

    fn mul(self, other: &'b Matrix4x4<T>) -> Matrix4x4<T> {
        let mut m = [[T::zero(); 4]; 4];
        for (out_row, row) in m.iter_mut().zip(&self.m) {
            for (col, out) in out_row.iter_mut().enumerate() {
                *out = row[0] * other.m[0][col]
                    + row[1] * other.m[1][col]
                    + row[2] * other.m[2][col]
                    + row[3] * other.m[3][col];
            }
        }
        Matrix4x4::new(m)
    }
}

impl<T> AbsDiffEq for Matrix4x4<T>
where
    T: FloatValueType + AbsDiffEq<Epsilon = T>,
{
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T> RelativeEq for Matrix4x4<T>
where
    T: FloatValueType + RelativeEq + AbsDiffEq<Epsilon = T>,
{
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
