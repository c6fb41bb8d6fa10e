use super::{CullMode, HitRecord, Triangle};
use crate::{
    bvh::Bvh,
    math::{transforms, Matrix4x4, Ray, Vec3},
};

/// A triangle mesh with a transform and its own acceleration structure.
///
/// Geometry is authored in object space; `update_transforms` refreshes the
/// world-space caches and rebuilds the hierarchy, and has to be called after
/// changing any of the transform components. Intersection queries only ever
/// read the transformed data.
pub struct TriangleMesh {
    /// Object-space vertex positions.
    pub positions: Vec<Vec3<f32>>,
    /// Object-space normals, one per triangle.
    pub normals: Vec<Vec3<f32>>,
    /// Vertex indices, stored as triplets.
    pub indices: Vec<u32>,
    pub cull_mode: CullMode,
    pub material_index: u8,
    /// World-space vertex positions.
    pub transformed_positions: Vec<Vec3<f32>>,
    /// World-space normals, one per triangle.
    pub transformed_normals: Vec<Vec3<f32>>,
    translation: Matrix4x4<f32>,
    rotation: Matrix4x4<f32>,
    scaling: Matrix4x4<f32>,
    bvh: Bvh,
}

impl TriangleMesh {
    /// Creates a new `TriangleMesh`, deriving one normal per triangle from
    /// the winding.
    pub fn new(
        positions: Vec<Vec3<f32>>,
        indices: Vec<u32>,
        cull_mode: CullMode,
        material_index: u8,
    ) -> Self {
        let normals = calculate_normals(&positions, &indices);
        Self::with_normals(positions, indices, normals, cull_mode, material_index)
    }

    /// Creates a new `TriangleMesh` with externally supplied per-triangle
    /// normals.
    pub fn with_normals(
        positions: Vec<Vec3<f32>>,
        indices: Vec<u32>,
        normals: Vec<Vec3<f32>>,
        cull_mode: CullMode,
        material_index: u8,
    ) -> Self {
        debug_assert!(indices.len() % 3 == 0);
        debug_assert!(normals.len() == indices.len() / 3);

        let mut ret = Self {
            positions,
            normals,
            indices,
            cull_mode,
            material_index,
            transformed_positions: Vec::new(),
            transformed_normals: Vec::new(),
            translation: Matrix4x4::identity(),
            rotation: Matrix4x4::identity(),
            scaling: Matrix4x4::identity(),
            bvh: Bvh::new(),
        };
        ret.update_transforms();
        ret
    }

    /// Creates a new `TriangleMesh` from loose triangles, with the cull mode
    /// and material of the mesh overriding theirs.
    pub fn from_triangles(
        triangles: &[Triangle],
        cull_mode: CullMode,
        material_index: u8,
    ) -> Self {
        let mut positions = Vec::with_capacity(triangles.len() * 3);
        let mut indices = Vec::with_capacity(triangles.len() * 3);
        let mut normals = Vec::with_capacity(triangles.len());
        for triangle in triangles {
            let first_index = positions.len() as u32;
            positions.push(triangle.v0);
            positions.push(triangle.v1);
            positions.push(triangle.v2);
            indices.push(first_index);
            indices.push(first_index + 1);
            indices.push(first_index + 2);
            normals.push(triangle.normal);
        }
        Self::with_normals(positions, indices, normals, cull_mode, material_index)
    }

    /// Sets the translation component of the mesh transform.
    pub fn translate(&mut self, delta: Vec3<f32>) {
        self.translation = transforms::translation(delta);
    }

    /// Sets the rotation component of the mesh transform to a rotation of
    /// `yaw` radians around the y-axis.
    pub fn rotate_y(&mut self, yaw: f32) {
        self.rotation = transforms::rotation_y(yaw);
    }

    /// Sets the scaling component of the mesh transform.
    pub fn scale(&mut self, scale: Vec3<f32>) {
        self.scaling = transforms::scale(scale.x, scale.y, scale.z);
    }

    /// Recomputes the world-space caches and rebuilds the hierarchy.
    ///
    /// Positions see the full scale-rotate-translate composition, normals
    /// rotation only since translation is inert for directions and the
    /// supported scales don't warrant a full normal matrix.
    pub fn update_transforms(&mut self) {
        let object_to_world = &(&self.translation * &self.rotation) * &self.scaling;
        let normal_to_world = &self.translation * &self.rotation;

        self.transformed_positions.clear();
        self.transformed_positions.extend(
            self.positions
                .iter()
                .map(|p| object_to_world.transform_point(*p)),
        );

        self.transformed_normals.clear();
        self.transformed_normals.extend(
            self.normals
                .iter()
                .map(|n| normal_to_world.transform_vector(*n)),
        );

        self.bvh.build(
            &self.transformed_positions,
            &mut self.indices,
            &mut self.normals,
            &mut self.transformed_normals,
        );
    }

    /// Returns the acceleration structure over the current world-space
    /// geometry.
    pub fn bvh(&self) -> &Bvh {
        &self.bvh
    }

    /// Intersects `ray` with this `TriangleMesh`, returning the closest hit.
    pub fn intersect(&self, ray: &Ray<f32>) -> Option<HitRecord> {
        if self.bvh.nodes().is_empty() {
            return None;
        }

        let mut closest = None;
        self.intersect_node(0, ray, &mut closest);
        closest
    }

    /// Checks if `ray` hits any triangle in this `TriangleMesh`, with the
    /// cull mode inverted per the any-hit convention.
    pub fn intersects(&self, ray: &Ray<f32>) -> bool {
        if self.bvh.nodes().is_empty() {
            return false;
        }

        self.any_hit_node(0, ray)
    }

    fn leaf_triangle(&self, index_offset: usize) -> Triangle {
        Triangle::with_normal(
            self.transformed_positions[self.indices[index_offset] as usize],
            self.transformed_positions[self.indices[index_offset + 1] as usize],
            self.transformed_positions[self.indices[index_offset + 2] as usize],
            self.transformed_normals[index_offset / 3],
            self.cull_mode,
            self.material_index,
        )
    }

    fn intersect_node(&self, node_idx: usize, ray: &Ray<f32>, closest: &mut Option<HitRecord>) {
        let node = &self.bvh.nodes()[node_idx];

        if !node.aabb.intersect(ray) {
            return;
        }

        if !node.is_leaf() {
            self.intersect_node(node.left_child as usize, ray, closest);
            self.intersect_node(node.right_child() as usize, ray, closest);
            return;
        }

        let first = node.first_index as usize;
        for offset in (0..node.index_count as usize).step_by(3) {
            if let Some(hit) = self.leaf_triangle(first + offset).intersect(ray) {
                if closest.as_ref().map_or(true, |c| hit.t < c.t) {
                    *closest = Some(hit);
                }
            }
        }
    }

    fn any_hit_node(&self, node_idx: usize, ray: &Ray<f32>) -> bool {
        let node = &self.bvh.nodes()[node_idx];

        if !node.aabb.intersect(ray) {
            return false;
        }

        if !node.is_leaf() {
            return self.any_hit_node(node.left_child as usize, ray)
                || self.any_hit_node(node.right_child() as usize, ray);
        }

        let first = node.first_index as usize;
        (0..node.index_count as usize)
            .step_by(3)
            .any(|offset| self.leaf_triangle(first + offset).intersects(ray))
    }
}

/// Derives one geometric normal per triangle from the winding.
///
/// Degenerate triangles get a zero normal and never pass the intersection
/// determinant test.
fn calculate_normals(positions: &[Vec3<f32>], indices: &[u32]) -> Vec<Vec3<f32>> {
    let mut normals = Vec::with_capacity(indices.len() / 3);
    for triangle in indices.chunks_exact(3) {
        let v0 = positions[triangle[0] as usize];
        let v1 = positions[triangle[1] as usize];
        let v2 = positions[triangle[2] as usize];

        let n = (v1 - v0).cross(v2 - v0);
        normals.push(if n.len_sqr() > 0.0 {
            n.normalized()
        } else {
            Vec3::zeros()
        });
    }
    normals
}
