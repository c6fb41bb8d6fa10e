use num::Integer;

use super::{
    common::ValueType,
    ray::Ray,
    vector::{Vec2, Vec3},
};

/// Two-dimensional integer-ish bounds, used for film tile extents.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds2<T>
where
    T: ValueType,
{
    /// The minimum extent of the bounds.
    pub p_min: Vec2<T>,
    /// The maximum extent of the bounds.
    pub p_max: Vec2<T>,
}

impl<T> Bounds2<T>
where
    T: ValueType,
{
    /// Creates a new `Bounds2` around the two corners.
    pub fn new(p0: Vec2<T>, p1: Vec2<T>) -> Self {
        Self {
            p_min: p0.min(p1),
            p_max: p0.max(p1),
        }
    }

    /// Returns the extent from `p_min` to `p_max`.
    pub fn diagonal(&self) -> Vec2<T> {
        self.p_max - self.p_min
    }

    /// Calculates the area of this `Bounds2`.
    pub fn area(&self) -> T {
        let d = self.diagonal();
        d.x * d.y
    }
}

/// A row-by-row iterator over the pixel coordinates in a `Bounds2`.
/// Starts from `p_min` and excludes the upper bounds.
pub struct Bounds2IntoIter<T>
where
    T: ValueType + Integer,
{
    bb: Bounds2<T>,
    curr: Vec2<T>,
}

impl<T> IntoIterator for Bounds2<T>
where
    T: ValueType + Integer,
{
    type Item = Vec2<T>;
    type IntoIter = Bounds2IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        assert!(
            self.p_min.x < self.p_max.x && self.p_min.y < self.p_max.y,
            "Bounds2 with a dimension <= 0"
        );
        Bounds2IntoIter {
            bb: self,
            curr: self.p_min,
        }
    }
}

impl<T> Iterator for Bounds2IntoIter<T>
where
    T: ValueType + Integer,
{
    type Item = Vec2<T>;

    fn next(&mut self) -> Option<Self::Item> {
        // We exclude the max bound
        let ret = if self.curr.y >= self.bb.p_max.y {
            None
        } else {
            Some(self.curr)
        };

        if ret.is_some() {
            self.curr.x += T::one();
            if self.curr.x >= self.bb.p_max.x {
                self.curr.x = self.bb.p_min.x;
                self.curr.y += T::one();
            }
        }

        ret
    }
}

/// An axis-aligned bounding box in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3<f32>,
    pub max: Vec3<f32>,
}

impl Default for Aabb {
    /// An empty box that any `grow` collapses onto the grown value.
    fn default() -> Self {
        Self {
            min: Vec3::from(f32::MAX),
            max: Vec3::from(f32::MIN),
        }
    }
}

impl Aabb {
    /// Creates a new `Aabb` around the two corners.
    pub fn new(p0: Vec3<f32>, p1: Vec3<f32>) -> Self {
        Self {
            min: p0.min(p1),
            max: p0.max(p1),
        }
    }

    /// Extends this `Aabb` to contain `p`.
    #[inline]
    pub fn grow(&mut self, p: Vec3<f32>) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Extends this `Aabb` to contain another `Aabb`.
    #[inline]
    pub fn grow_aabb(&mut self, other: &Aabb) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Checks if `p` is inside this `Aabb`, bounds included.
    pub fn contains(&self, p: Vec3<f32>) -> bool {
        (p.x >= self.min.x && p.x <= self.max.x)
            && (p.y >= self.min.y && p.y <= self.max.y)
            && (p.z >= self.min.z && p.z <= self.max.z)
    }

    /// Returns half the surface area of this `Aabb`.
    ///
    /// Only ever compared against other values from this function so the
    /// factor of two is left out.
    #[inline]
    pub fn area(&self) -> f32 {
        // Boxes that never grew show up with inverted extents
        if self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z {
            return 0.0;
        }
        let d = self.max - self.min;
        d.x * d.y + d.y * d.z + d.z * d.x
    }

    /// Checks if `ray` passes through this `Aabb`, using the ray's cached
    /// inverse direction for the slab test.
    #[inline]
    pub fn intersect(&self, ray: &Ray<f32>) -> bool {
        fn mul(a: Vec3<f32>, b: Vec3<f32>) -> Vec3<f32> {
            Vec3::new(a.x * b.x, a.y * b.y, a.z * b.z)
        }

        let t0 = mul(self.min - ray.o, ray.inv_d);
        let t1 = mul(self.max - ray.o, ray.inv_d);

        let t_enter = t0.min(t1).max_comp();
        let t_exit = t0.max(t1).min_comp();

        t_exit > 0.0 && t_exit >= t_enter
    }
}
