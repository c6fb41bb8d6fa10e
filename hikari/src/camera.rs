use crate::math::{transforms, Matrix4x4, Ray, Vec2, Vec3};

/// A pinhole camera.
///
/// The host pushes `origin`, `fov_angle` and the accumulated pitch and yaw
/// between frames; [Camera::recompute_basis] turns them into the orthonormal
/// frame and camera-to-world transform the frame renders with. Camera space
/// is right-handed with forward along +z.
#[derive(Clone)]
pub struct Camera {
    pub origin: Vec3<f32>,
    /// Horizontal field of view in degrees.
    pub fov_angle: f32,
    /// Accumulated rotation around the camera x-axis in radians.
    pub total_pitch: f32,
    /// Accumulated rotation around the world y-axis in radians.
    pub total_yaw: f32,
    forward: Vec3<f32>,
    camera_to_world: Matrix4x4<f32>,
    fov_scale: f32,
}

impl Camera {
    /// Creates a new `Camera` at `origin`. `fov_angle` is horizontal and in
    /// degrees.
    pub fn new(origin: Vec3<f32>, fov_angle: f32) -> Self {
        let mut ret = Self {
            origin,
            fov_angle,
            total_pitch: 0.0,
            total_yaw: 0.0,
            forward: Vec3::new(0.0, 0.0, 1.0),
            camera_to_world: Matrix4x4::identity(),
            fov_scale: 1.0,
        };
        ret.recompute_basis();
        ret
    }

    /// Rebuilds the camera frame from the mutable parameters.
    pub fn recompute_basis(&mut self) {
        self.fov_scale = (self.fov_angle.to_radians() / 2.0).tan();

        let rotation = &transforms::rotation_y(self.total_yaw)
            * &transforms::rotation_x(self.total_pitch);
        self.forward = rotation
            .transform_vector(Vec3::new(0.0, 0.0, 1.0))
            .normalized();

        let world_up = Vec3::new(0.0, 1.0, 0.0);
        let right = world_up.cross(self.forward).normalized();
        let up = self.forward.cross(right);

        self.camera_to_world = transforms::frame(right, up, self.forward, self.origin);
    }

    /// Returns the camera-to-world transform of the current basis.
    pub fn camera_to_world(&self) -> &Matrix4x4<f32> {
        &self.camera_to_world
    }

    /// Creates the primary [Ray] through the film position `p_film` on a
    /// film of resolution `res`.
    pub fn ray(&self, p_film: Vec2<f32>, res: Vec2<u16>) -> Ray<f32> {
        let width = res.x as f32;
        let height = res.y as f32;
        let aspect_ratio = width / height;

        let cx = ((2.0 * p_film.x / width) - 1.0) * aspect_ratio * self.fov_scale;
        let cy = (1.0 - (2.0 * p_film.y / height)) * self.fov_scale;
        let dir_camera = Vec3::new(cx, cy, 1.0).normalized();

        Ray::new(self.origin, self.camera_to_world.transform_vector(dir_camera))
    }
}
