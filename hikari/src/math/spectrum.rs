use approx::{AbsDiffEq, RelativeEq};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign,
};

use hikari_derive::{
    impl_spectrum, AbsDiffEq, Add, AddAssign, DivAssignScalar, DivScalar, Index, IndexMut, Mul,
    MulAssign, MulAssignScalar, MulScalar, RelativeEq, Sub, SubAssign,
};

use super::common::{FloatValueType, ValueType};

/// An RGB color value.
///
/// Component multiplication is filtering, scalar multiplication is scaling.
#[impl_spectrum]
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    AbsDiffEq,
    RelativeEq,
    Index,
    IndexMut,
    Add,
    Sub,
    Mul,
    AddAssign,
    SubAssign,
    MulAssign,
    MulScalar,
    DivScalar,
    MulAssignScalar,
    DivAssignScalar,
)]
pub struct Spectrum<T>
where
    T: ValueType,
{
    /// The red component of the color.
    pub r: T,
    /// The green component of the color.
    pub g: T,
    /// The blue component of the color.
    pub b: T,
}

impl<T> Spectrum<T>
where
    T: FloatValueType,
{
    /// Finds the value of the maximum component in this `Spectrum`.
    #[inline]
    pub fn max_comp(&self) -> T {
        debug_assert!(!self.has_nans());

        self.r.maxi(self.g.maxi(self.b))
    }

    /// Maps this `Spectrum` into `[0, 1]` by dividing all components with the
    /// largest one if it exceeds one. Smaller values pass through unchanged.
    #[inline]
    pub fn max_to_one(self) -> Self {
        let max = self.max_comp();
        if max > T::one() {
            self / max
        } else {
            self
        }
    }

    /// Interpolates linearly between `a` at `t == 0` and `b` at `t == 1`.
    #[inline]
    pub fn lerp(a: Self, b: Self, t: T) -> Self {
        a * (T::one() - t) + b * t
    }
}
