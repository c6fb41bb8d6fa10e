use super::{common::FloatValueType, vector::Vec3};

/// The default near bound, biased off zero to dodge shadow acne.
const T_MIN_BIAS: f64 = 1e-4;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray<T>
where
    T: FloatValueType,
{
    pub o: Vec3<T>,
    pub d: Vec3<T>,
    /// Component-wise `1 / d`, cached for slab tests.
    pub inv_d: Vec3<T>,
    pub t_min: T,
    pub t_max: T,
}

impl<T> Ray<T>
where
    T: FloatValueType,
{
    /// Creates a new `Ray` with the default `[t_min, t_max]` range.
    pub fn new(o: Vec3<T>, d: Vec3<T>) -> Self {
        Self::with_bounds(o, d, T::from_f64(T_MIN_BIAS).unwrap(), T::infinity())
    }

    /// Creates a new `Ray` with an explicit `[t_min, t_max]` range.
    pub fn with_bounds(o: Vec3<T>, d: Vec3<T>, t_min: T, t_max: T) -> Self {
        let ret = Self {
            o,
            d,
            inv_d: Vec3::new(T::one() / d.x, T::one() / d.y, T::one() / d.z),
            t_min,
            t_max,
        };
        debug_assert!(!ret.o.has_nans() && !ret.d.has_nans());
        ret
    }

    /// Finds the position on this `Ray` at distance `t`.
    #[inline]
    pub fn point(&self, t: T) -> Vec3<T> {
        self.o + self.d * t
    }
}
