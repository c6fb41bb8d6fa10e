pub mod bounds;
pub mod common;
pub mod matrix;
pub mod ray;
pub mod spectrum;
pub mod transforms;
pub mod vector;

pub use bounds::{Aabb, Bounds2};
pub use common::{FloatValueType, ValueType};
pub use matrix::Matrix4x4;
pub use ray::Ray;
pub use spectrum::Spectrum;
pub use vector::{Vec2, Vec3};
