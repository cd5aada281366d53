//! Octree node and its retained triangle entries

use super::octant::Octant;
use super::triangle::Triangle;
use crate::core::types::Vec3;
use crate::math::Aabb;

/// Index of a node in its octree's node arena
pub type NodeId = u32;

/// A triangle retained at a node
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleEntry {
    pub triangle: Triangle,
    /// Child octant its first vertex classified into at this node
    pub octant: Octant,
    /// True if the triangle fits `octant` and may be pushed down on split.
    /// False for triangles straddling a mid-plane; those stay here for good.
    pub movable: bool,
}

impl TriangleEntry {
    pub fn movable(triangle: Triangle, octant: Octant) -> Self {
        Self { triangle, octant, movable: true }
    }

    pub fn straddling(triangle: Triangle, octant: Octant) -> Self {
        Self { triangle, octant, movable: false }
    }
}

/// One cube of the octree.
///
/// The cube spans `[corner - 2 * half_size, corner]` on every axis.
/// Children are owned by the arena and referenced by index; `parent` is a
/// plain back-reference.
#[derive(Clone, Debug)]
pub struct OctreeNode {
    half_size: f32,
    corner: Vec3,
    has_children: bool,
    children: [Option<NodeId>; 8],
    parent: Option<NodeId>,
    data: Vec<TriangleEntry>,
}

impl OctreeNode {
    /// Create a parentless node
    pub fn root(half_size: f32, corner: Vec3) -> Self {
        Self {
            half_size,
            corner,
            has_children: false,
            children: [None; 8],
            parent: None,
            data: Vec::new(),
        }
    }

    /// Create the node for `octant` of `parent_node`
    pub fn child(parent: NodeId, parent_node: &OctreeNode, octant: Octant) -> Self {
        Self {
            half_size: parent_node.half_size * 0.5,
            corner: octant.child_corner(parent_node.corner, parent_node.half_size),
            has_children: false,
            children: [None; 8],
            parent: Some(parent),
            data: Vec::new(),
        }
    }

    pub fn half_size(&self) -> f32 {
        self.half_size
    }

    /// Maximum corner of the cube
    pub fn corner(&self) -> Vec3 {
        self.corner
    }

    /// Full cube covered by this node
    pub fn bounds(&self) -> Aabb {
        Aabb::from_max_corner(self.corner, self.half_size)
    }

    /// Set once the node has split; never cleared
    pub fn has_children(&self) -> bool {
        self.has_children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child in `octant`, if materialized
    pub fn child_at(&self, octant: Octant) -> Option<NodeId> {
        self.children[octant.index()]
    }

    /// Child slots in file order
    pub fn child_slots(&self) -> &[Option<NodeId>; 8] {
        &self.children
    }

    /// Number of materialized children
    pub fn child_count(&self) -> usize {
        self.children.iter().filter(|c| c.is_some()).count()
    }

    /// Retained entries in insertion order
    pub fn data(&self) -> &[TriangleEntry] {
        &self.data
    }

    pub fn is_leaf(&self) -> bool {
        !self.has_children
    }

    /// Octant the triangle's first vertex falls in
    pub fn classify(&self, triangle: &Triangle) -> Octant {
        Octant::classify(triangle.a, self.corner, self.half_size)
    }

    /// True if the whole triangle lies inside the cube of `octant`
    pub fn fits(&self, triangle: &Triangle, octant: Octant) -> bool {
        let bounds = octant.child_bounds(self.corner, self.half_size);
        triangle.vertices().iter().all(|v| bounds.contains_point(*v))
    }

    /// Children of this node would still have a usable, non-zero size
    pub fn can_split(&self) -> bool {
        let child_half = self.half_size * 0.5;
        child_half.is_finite() && child_half > 0.0
    }

    pub(crate) fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub(crate) fn set_child(&mut self, octant: Octant, child: NodeId) {
        self.children[octant.index()] = Some(child);
    }

    pub(crate) fn mark_split(&mut self) {
        self.has_children = true;
    }

    pub(crate) fn push_entry(&mut self, entry: TriangleEntry) {
        self.data.push(entry);
    }

    pub(crate) fn take_data(&mut self) -> Vec<TriangleEntry> {
        std::mem::take(&mut self.data)
    }

    pub(crate) fn set_data(&mut self, data: Vec<TriangleEntry>) {
        self.data = data;
    }
}
