use super::{common::FloatValueType, matrix::Matrix4x4, vector::Vec3};

/// Creates a new `Matrix4x4` that is a translation by `delta`.
pub fn translation<T>(delta: Vec3<T>) -> Matrix4x4<T>
where
    T: FloatValueType,
{
    Matrix4x4::new([
        [T::one(), T::zero(), T::zero(), delta.x],
        [T::zero(), T::one(), T::zero(), delta.y],
        [T::zero(), T::zero(), T::one(), delta.z],
        [T::zero(), T::zero(), T::zero(), T::one()],
    ])
}

/// Creates a new `Matrix4x4` that is a scaling by `x`, `y` and `z`.
pub fn scale<T>(x: T, y: T, z: T) -> Matrix4x4<T>
where
    T: FloatValueType,
{
    Matrix4x4::new([
        [x, T::zero(), T::zero(), T::zero()],
        [T::zero(), y, T::zero(), T::zero()],
        [T::zero(), T::zero(), z, T::zero()],
        [T::zero(), T::zero(), T::zero(), T::one()],
    ])
}

/// Creates a new `Matrix4x4` that is a rotation of `theta` radians around the
/// x-axis.
pub fn rotation_x<T>(theta: T) -> Matrix4x4<T>
where
    T: FloatValueType,
{
    let cos_theta = theta.cos();
    let sin_theta = theta.sin();
    Matrix4x4::new([
        [T::one(), T::zero(), T::zero(), T::zero()],
        [T::zero(), cos_theta, -sin_theta, T::zero()],
        [T::zero(), sin_theta, cos_theta, T::zero()],
        [T::zero(), T::zero(), T::zero(), T::one()],
    ])
}

/// Creates a new `Matrix4x4` that is a rotation of `theta` radians around the
/// y-axis.
pub fn rotation_y<T>(theta: T) -> Matrix4x4<T>
where
    T: FloatValueType,
{
    let cos_theta = theta.cos();
    let sin_theta = theta.sin();
    Matrix4x4::new([
        [cos_theta, T::zero(), sin_theta, T::zero()],
        [T::zero(), T::one(), T::zero(), T::zero()],
        [-sin_theta, T::zero(), cos_theta, T::zero()],
        [T::zero(), T::zero(), T::zero(), T::one()],
    ])
}

/// Creates a new `Matrix4x4` that is a rotation of `theta` radians around the
/// z-axis.
pub fn rotation_z<T>(theta: T) -> Matrix4x4<T>
where
    T: FloatValueType,
{
    let cos_theta = theta.cos();
    let sin_theta = theta.sin();
    Matrix4x4::new([
        [cos_theta, -sin_theta, T::zero(), T::zero()],
        [sin_theta, cos_theta, T::zero(), T::zero()],
        [T::zero(), T::zero(), T::one(), T::zero()],
        [T::zero(), T::zero(), T::zero(), T::one()],
    ])
}

/// Creates a new `Matrix4x4` mapping an orthonormal `(right, up, forward)`
/// frame at `origin` into world space.
///
/// `frame(..).transform_vector(Vec3::new(0, 0, 1)) == forward`.
pub fn frame<T>(
    right: Vec3<T>,
    up: Vec3<T>,
    forward: Vec3<T>,
    origin: Vec3<T>,
) -> Matrix4x4<T>
where
    T: FloatValueType,
{
    Matrix4x4::new([
        [right.x, up.x, forward.x, origin.x],
        [right.y, up.y, forward.y, origin.y],
        [right.z, up.z, forward.z, origin.z],
        [T::zero(), T::zero(), T::zero(), T::one()],
    ])
}
