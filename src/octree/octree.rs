//! Triangle octree with deferred splitting
//!
//! Triangles are pushed as deep as they fit without crossing a mid-plane.
//! A triangle that straddles one is kept, unsplit, at the coarsest node
//! containing it. Leaves buffer fitting triangles until their list grows past
//! the split threshold, and only then materialize children.

use super::node::{NodeId, OctreeNode, TriangleEntry};
use super::octant::Octant;
use super::triangle::Triangle;
use crate::core::config::DEFAULT_SPLIT_THRESHOLD;
use crate::core::types::Vec3;

/// Octree of triangles. All nodes live in one arena; the root is at index 0.
#[derive(Debug, Clone)]
pub struct Octree {
    nodes: Vec<OctreeNode>,
    split_threshold: usize,
}

impl Octree {
    /// Root index
    pub const ROOT: NodeId = 0;

    /// Create an empty tree whose root cube is `(corner, half_size)`
    pub fn new(half_size: f32, corner: Vec3) -> Self {
        Self::with_split_threshold(half_size, corner, DEFAULT_SPLIT_THRESHOLD)
    }

    /// Create an empty tree with a custom leaf capacity
    pub fn with_split_threshold(half_size: f32, corner: Vec3, split_threshold: usize) -> Self {
        Self {
            nodes: vec![OctreeNode::root(half_size, corner)],
            split_threshold,
        }
    }

    /// Get root node
    pub fn root(&self) -> &OctreeNode {
        &self.nodes[Self::ROOT as usize]
    }

    /// Get node by index
    pub fn node(&self, id: NodeId) -> &OctreeNode {
        &self.nodes[id as usize]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut OctreeNode {
        &mut self.nodes[id as usize]
    }

    /// Get number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn split_threshold(&self) -> usize {
        self.split_threshold
    }

    /// Insert one triangle, starting at the root
    pub fn insert(&mut self, triangle: Triangle) {
        self.insert_from(Self::ROOT, triangle);
    }

    fn insert_from(&mut self, start: NodeId, triangle: Triangle) {
        let mut id = start;
        loop {
            let node = self.node(id);
            let octant = node.classify(&triangle);

            if !node.fits(&triangle, octant) {
                self.node_mut(id).push_entry(TriangleEntry::straddling(triangle, octant));
                return;
            }

            if let Some(child) = node.child_at(octant) {
                id = child;
                continue;
            }

            if node.has_children() {
                id = self.add_child(id, octant);
                continue;
            }

            let threshold = self.split_threshold;
            let node = self.node_mut(id);
            node.push_entry(TriangleEntry::movable(triangle, octant));
            if node.data().len() > threshold && node.can_split() {
                self.split(id);
            }
            return;
        }
    }

    /// Push every movable entry of `id` down into its octant, keep the rest
    fn split(&mut self, id: NodeId) {
        let node = self.node_mut(id);
        node.mark_split();

        let (movable, retained): (Vec<TriangleEntry>, Vec<TriangleEntry>) =
            node.take_data().into_iter().partition(|entry| entry.movable);
        node.set_data(retained);

        log::debug!(
            "Splitting node {} (half size {}): {} pushed down, {} retained",
            id,
            self.node(id).half_size(),
            movable.len(),
            self.node(id).data().len()
        );

        for entry in movable {
            let existing = self.node(id).child_at(entry.octant);
            let child = match existing {
                Some(child) => child,
                None => self.add_child(id, entry.octant),
            };
            self.insert_from(child, entry.triangle);
        }
    }

    /// Materialize the child of `parent` in `octant`
    fn add_child(&mut self, parent: NodeId, octant: Octant) -> NodeId {
        let child = OctreeNode::child(parent, self.node(parent), octant);
        let id = self.push_node(child);
        self.node_mut(parent).set_child(octant, id);
        id
    }

    pub(crate) fn push_node(&mut self, node: OctreeNode) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        id
    }

    /// Node ids in preorder: node, then its children in octant order
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![Self::ROOT],
        }
    }

    /// Every retained triangle, in preorder
    pub fn triangles(&self) -> Vec<Triangle> {
        self.preorder()
            .flat_map(|id| self.node(id).data().iter().map(|entry| entry.triangle))
            .collect()
    }

    /// Total number of retained triangles
    pub fn triangle_count(&self) -> usize {
        self.nodes.iter().map(|node| node.data().len()).sum()
    }

    /// Distance from the root (root is depth 0)
    pub fn depth_of(&self, id: NodeId) -> u32 {
        let mut depth = 0;
        let mut current = self.node(id).parent();
        while let Some(parent) = current {
            depth += 1;
            current = self.node(parent).parent();
        }
        depth
    }

    /// Octant `id` occupies in its parent, `None` for the root
    pub fn octant_of(&self, id: NodeId) -> Option<Octant> {
        let parent = self.node(id).parent()?;
        Octant::ALL
            .into_iter()
            .find(|octant| self.node(parent).child_at(*octant) == Some(id))
    }
}

/// Preorder walk over node ids, driven by an explicit stack
pub struct Preorder<'a> {
    tree: &'a Octree,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id);
        // reversed so octant 0 is visited first
        self.stack.extend(node.child_slots().iter().rev().flatten());
        Some(id)
    }
}
