use num::cast::{FromPrimitive, ToPrimitive};
use num::traits::{Float, Num, NumAssign};

/// Generic types that can be stored in the math containers
pub trait ValueType:
    Num + NumAssign + Mini + Maxi + PartialOrd + ToPrimitive + FromPrimitive + Copy
{
}
pub trait FloatValueType: ValueType + Float {}

// Impls for all matching types
impl<T> ValueType for T where
    T: Num + NumAssign + Mini + Maxi + PartialOrd + ToPrimitive + FromPrimitive + Copy
{
}
impl<T> FloatValueType for T where T: ValueType + Float {}

/// Trait that maps to number types that implement `fn min(self, other)`
pub trait Mini {
    /// Returns the smaller of `self` and `other`
    fn mini(&self, other: Self) -> Self;
}

/// Trait that maps to number types that implement `fn max(self, other)`
pub trait Maxi {
    /// Returns the larger of `self` and `other`
    fn maxi(&self, other: Self) -> Self;
}

macro_rules! impl_minmax_float {
    ( $( $t:ty ),+ ) => {
        $(
            impl Mini for $t {
                fn mini(&self, other: $t) -> $t {
                    self.min(other)
                }
            }

            impl Maxi for $t {
                fn maxi(&self, other: $t) -> $t {
                    self.max(other)
                }
            }
        )*
    }
}
impl_minmax_float!(f32, f64);

macro_rules! impl_minmax_integer {
    ( $( $t:ty ),+ ) => {
        $(
            impl Mini for $t {
                fn mini(&self, other: $t) -> $t {
                    *self.min(&other)
                }
            }

            impl Maxi for $t {
                fn maxi(&self, other: $t) -> $t {
                    *self.max(&other)
                }
            }
        )*
    }
}
impl_minmax_integer!(u8, u16, u32, u64, i8, i16, i32, i64);
