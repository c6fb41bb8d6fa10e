use approx::{AbsDiffEq, RelativeEq};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use hikari_derive::*;

use super::common::{FloatValueType, ValueType};

/// A two-dimensional vector.
#[impl_vec]
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    AbsDiffEq,
    RelativeEq,
    Index,
    IndexMut,
    Neg,
    Add,
    Sub,
    MulScalar,
    DivScalar,
    AddAssign,
    SubAssign,
    MulAssignScalar,
    DivAssignScalar,
)]
pub struct Vec2<T>
where
    T: ValueType,
{
    /// The x component of the vector.
    pub x: T,
    /// The y component of the vector.
    pub y: T,
}

/// A three-dimensional vector.
///
/// Also stands in for positions and surface normals since the renderer only
/// ever transforms with rotations, uniform-ish scales and translations.
#[impl_vec]
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    AbsDiffEq,
    RelativeEq,
    Index,
    IndexMut,
    Neg,
    Add,
    Sub,
    MulScalar,
    DivScalar,
    AddAssign,
    SubAssign,
    MulAssignScalar,
    DivAssignScalar,
)]
pub struct Vec3<T>
where
    T: ValueType,
{
    /// The x component of the vector.
    pub x: T,
    /// The y component of the vector.
    pub y: T,
    /// The z component of the vector.
    pub z: T,
}

impl<T> Vec3<T>
where
    T: ValueType,
{
    /// Finds the value of the minimum component in this `Vec3`.
    #[inline]
    pub fn min_comp(&self) -> T {
        debug_assert!(!self.has_nans());

        self.x.mini(self.y.mini(self.z))
    }

    /// Finds the value of the maximum component in this `Vec3`.
    #[inline]
    pub fn max_comp(&self) -> T {
        debug_assert!(!self.has_nans());

        self.x.maxi(self.y.maxi(self.z))
    }

    /// Finds the index of the maximum component in this `Vec3`.
    #[inline]
    pub fn max_dimension(&self) -> usize {
        debug_assert!(!self.has_nans());

        if self.x > self.y {
            if self.x > self.z {
                0
            } else {
                2
            }
        } else if self.y > self.z {
            1
        } else {
            2
        }
    }
}

impl<T> Vec3<T>
where
    T: FloatValueType,
{
    /// Returns the vector perpendicular to this `Vec3` and another `Vec3`,
    /// following the right-hand rule.
    ///
    /// Evaluated at component precision; the geometry fed through here never
    /// gets close enough to parallel for cancellation to matter.
    #[inline]
    pub fn cross(&self, other: Self) -> Self {
        debug_assert!(!self.has_nans());
        debug_assert!(!other.has_nans());

        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Reflects this `Vec3` about `n`, as `v - 2 * (v . n) * n`.
    #[inline]
    pub fn reflected(&self, n: Self) -> Self {
        debug_assert!(!self.has_nans());
        debug_assert!(!n.has_nans());

        // The cast is a bit dirty but any Num with FromPrimitive handles it
        *self - n * (self.dot(n) * T::from_u8(2).unwrap())
    }
}
