use std::time::Instant;

use crate::{
    hikari_debug,
    math::{Aabb, Vec3},
};

// Binned SAH construction in the spirit of
// How to Build a BVH, Jacco Bikker
// https://jacco.ompf2.com/2022/04/13/how-to-build-a-bvh-part-1-basics/

const BIN_COUNT: usize = 8;
// A leaf holding one triangle can't be split further
const MIN_INDICES_IN_NODE: u32 = 5;

/// A node in the flattened hierarchy.
///
/// Children are always allocated as a pair so only the left index is stored;
/// the right child lives at `left_child + 1`. A node is a leaf exactly when
/// `index_count > 0`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BvhNode {
    pub aabb: Aabb,
    pub left_child: u32,
    /// Offset of the first vertex index this node covers.
    pub first_index: u32,
    /// Number of vertex indices this node covers, zero for interior nodes.
    pub index_count: u32,
}

impl BvhNode {
    pub fn is_leaf(&self) -> bool {
        self.index_count > 0
    }

    pub fn right_child(&self) -> u32 {
        self.left_child + 1
    }
}

#[derive(Copy, Clone)]
struct Bin {
    bounds: Aabb,
    index_count: u32,
}

impl Default for Bin {
    fn default() -> Self {
        Self {
            bounds: Aabb::default(),
            index_count: 0,
        }
    }
}

/// A bounding volume hierarchy over the triangles of a single mesh.
///
/// The nodes live in one preallocated arena with the root at index 0 and
/// child pairs in consecutive slots, so traversal is index arithmetic over a
/// flat array. Rebuilt from scratch whenever the owning mesh moves.
#[derive(Default)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
    nodes_used: usize,
}

impl Bvh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the nodes in use, root first. Empty for an empty mesh.
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes[..self.nodes_used]
    }

    /// Rebuilds the hierarchy over `indices`.
    ///
    /// `positions` are the world-space vertices the triangle triples in
    /// `indices` point at. Partitioning reorders the index triples in place
    /// and `normals` and `transformed_normals` hold one entry per triangle,
    /// so both are permuted in lockstep to keep `normals[i / 3]` addressing
    /// the triangle at index offset `i`.
    pub fn build(
        &mut self,
        positions: &[Vec3<f32>],
        indices: &mut [u32],
        normals: &mut [Vec3<f32>],
        transformed_normals: &mut [Vec3<f32>],
    ) {
        let build_start = Instant::now();

        let triangle_count = indices.len() / 3;
        self.nodes.clear();
        self.nodes_used = 0;
        if triangle_count == 0 {
            return;
        }

        // Worst case is 2N - 1 nodes for N triangles
        self.nodes.resize(2 * triangle_count, BvhNode::default());
        self.nodes[0] = BvhNode {
            aabb: Aabb::default(),
            left_child: 0,
            first_index: 0,
            index_count: indices.len() as u32,
        };
        // Index 0 stays reserved for the root, children go out in pairs
        self.nodes_used = 1;

        self.update_node_bounds(0, positions, indices);
        self.subdivide(0, positions, indices, normals, transformed_normals);

        hikari_debug!(
            "bvh: built over {} triangles in {:.2}ms, {} nodes",
            triangle_count,
            (build_start.elapsed().as_micros() as f32) * 1e-3,
            self.nodes_used
        );
    }

    /// Recomputes a node's bounds from the triangle vertices it covers.
    fn update_node_bounds(&mut self, node_idx: usize, positions: &[Vec3<f32>], indices: &[u32]) {
        let node = &mut self.nodes[node_idx];

        let mut aabb = Aabb::default();
        let first = node.first_index as usize;
        for i in &indices[first..first + node.index_count as usize] {
            aabb.grow(positions[*i as usize]);
        }
        node.aabb = aabb;
    }

    fn subdivide(
        &mut self,
        node_idx: usize,
        positions: &[Vec3<f32>],
        indices: &mut [u32],
        normals: &mut [Vec3<f32>],
        transformed_normals: &mut [Vec3<f32>],
    ) {
        let node = self.nodes[node_idx];

        if node.index_count <= MIN_INDICES_IN_NODE {
            return;
        }

        let (split_cost, axis, split_pos) = match self.find_best_split(&node, positions, indices)
        {
            Some(split) => split,
            None => return,
        };

        // Splitting has to beat intersecting the node as is
        let no_split_cost = (node.index_count as f32) * node.aabb.area();
        if split_cost >= no_split_cost {
            return;
        }

        // Partition triangles around the plane in place. The swaps move
        // index triples as a unit and keep the per-triangle normal arrays
        // addressed by the same triangle slots.
        let mut i = node.first_index as isize;
        let mut j = i + (node.index_count as isize) - 1;
        while i <= j {
            let centroid = (positions[indices[i as usize] as usize]
                + positions[indices[i as usize + 1] as usize]
                + positions[indices[i as usize + 2] as usize])
                / 3.0;

            if centroid[axis] < split_pos {
                i += 3;
            } else {
                let (front, back) = (i as usize, j as usize);
                indices.swap(front, back - 2);
                indices.swap(front + 1, back - 1);
                indices.swap(front + 2, back);
                normals.swap(front / 3, (back - 2) / 3);
                transformed_normals.swap(front / 3, (back - 2) / 3);

                j -= 3;
            }
        }

        let left_count = (i as u32) - node.first_index;
        if left_count == 0 || left_count == node.index_count {
            return;
        }

        let left_child = self.nodes_used;
        let right_child = left_child + 1;
        self.nodes_used += 2;

        self.nodes[left_child].first_index = node.first_index;
        self.nodes[left_child].index_count = left_count;
        self.nodes[right_child].first_index = i as u32;
        self.nodes[right_child].index_count = node.index_count - left_count;

        self.nodes[node_idx].left_child = left_child as u32;
        self.nodes[node_idx].index_count = 0;

        self.update_node_bounds(left_child, positions, indices);
        self.update_node_bounds(right_child, positions, indices);

        self.subdivide(left_child, positions, indices, normals, transformed_normals);
        self.subdivide(right_child, positions, indices, normals, transformed_normals);
    }

    /// Finds the cheapest of the candidate split planes over all three axes.
    ///
    /// Returns `None` when the centroids are too tightly packed to split on
    /// any axis.
    fn find_best_split(
        &self,
        node: &BvhNode,
        positions: &[Vec3<f32>],
        indices: &[u32],
    ) -> Option<(f32, usize, f32)> {
        let first = node.first_index as usize;
        let count = node.index_count as usize;
        let node_indices = &indices[first..first + count];

        let centroid = |tri: usize| -> Vec3<f32> {
            (positions[node_indices[tri] as usize]
                + positions[node_indices[tri + 1] as usize]
                + positions[node_indices[tri + 2] as usize])
                / 3.0
        };

        let mut best: Option<(f32, usize, f32)> = None;
        for axis in 0..3 {
            let mut bounds_min = f32::MAX;
            let mut bounds_max = f32::MIN;
            for tri in (0..count).step_by(3) {
                let c = centroid(tri)[axis];
                bounds_min = bounds_min.min(c);
                bounds_max = bounds_max.max(c);
            }

            if (bounds_max - bounds_min).abs() < f32::EPSILON {
                continue;
            }

            // Bin the triangles over the centroid range
            let mut bins = [Bin::default(); BIN_COUNT];
            let bin_scale = (BIN_COUNT as f32) / (bounds_max - bounds_min);
            for tri in (0..count).step_by(3) {
                let v0 = positions[node_indices[tri] as usize];
                let v1 = positions[node_indices[tri + 1] as usize];
                let v2 = positions[node_indices[tri + 2] as usize];
                let c = (v0 + v1 + v2) / 3.0;

                let bin_idx =
                    (((c[axis] - bounds_min) * bin_scale) as usize).min(BIN_COUNT - 1);
                bins[bin_idx].index_count += 3;
                bins[bin_idx].bounds.grow(v0);
                bins[bin_idx].bounds.grow(v1);
                bins[bin_idx].bounds.grow(v2);
            }

            // Sweep both ways to get counts and grown areas per plane
            let mut left_area = [0.0f32; BIN_COUNT - 1];
            let mut right_area = [0.0f32; BIN_COUNT - 1];
            let mut left_count = [0u32; BIN_COUNT - 1];
            let mut right_count = [0u32; BIN_COUNT - 1];

            let mut left_box = Aabb::default();
            let mut right_box = Aabb::default();
            let mut left_sum = 0;
            let mut right_sum = 0;
            for plane in 0..BIN_COUNT - 1 {
                left_sum += bins[plane].index_count;
                left_count[plane] = left_sum;
                left_box.grow_aabb(&bins[plane].bounds);
                left_area[plane] = left_box.area();

                right_sum += bins[BIN_COUNT - 1 - plane].index_count;
                right_count[BIN_COUNT - 2 - plane] = right_sum;
                right_box.grow_aabb(&bins[BIN_COUNT - 1 - plane].bounds);
                right_area[BIN_COUNT - 2 - plane] = right_box.area();
            }

            let plane_width = (bounds_max - bounds_min) / (BIN_COUNT as f32);
            for plane in 0..BIN_COUNT - 1 {
                let plane_cost = (left_count[plane] as f32) * left_area[plane]
                    + (right_count[plane] as f32) * right_area[plane];
                if best.map_or(true, |(cost, ..)| plane_cost < cost) {
                    best = Some((
                        plane_cost,
                        axis,
                        bounds_min + plane_width * ((plane + 1) as f32),
                    ));
                }
            }
        }
        best
    }
}
