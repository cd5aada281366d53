//! Summary statistics for a built or loaded octree

use serde::{Deserialize, Serialize};

use super::octree::Octree;

/// Shape summary of an octree
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OctreeStats {
    /// Materialized nodes, root included
    pub node_count: usize,
    /// Nodes that never split
    pub leaf_count: usize,
    /// Depth of the deepest node (root is 0)
    pub max_depth: u32,
    /// Triangles retained across all nodes
    pub triangle_count: usize,
    /// Retained triangles that straddle a mid-plane of their node
    pub straddling_count: usize,
    /// Most triangles held by a single node
    pub max_node_triangles: usize,
    /// Half-width of the root cube
    pub root_half_size: f32,
}

impl OctreeStats {
    /// Walk the tree once and gather statistics
    pub fn collect(tree: &Octree) -> Self {
        let mut stats = Self {
            root_half_size: tree.root().half_size(),
            ..Self::default()
        };

        // (node, depth) pairs; parents are always visited before children
        let mut stack = vec![(Octree::ROOT, 0u32)];
        while let Some((id, depth)) = stack.pop() {
            let node = tree.node(id);

            stats.node_count += 1;
            stats.max_depth = stats.max_depth.max(depth);
            stats.triangle_count += node.data().len();
            stats.straddling_count += node.data().iter().filter(|e| !e.movable).count();
            stats.max_node_triangles = stats.max_node_triangles.max(node.data().len());
            if node.is_leaf() {
                stats.leaf_count += 1;
            }

            stack.extend(node.child_slots().iter().flatten().map(|child| (*child, depth + 1)));
        }

        stats
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl std::fmt::Display for OctreeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Root half size:     {}", self.root_half_size)?;
        writeln!(f, "Nodes:              {} ({} leaves)", self.node_count, self.leaf_count)?;
        writeln!(f, "Max depth:          {}", self.max_depth)?;
        writeln!(f, "Triangles:          {}", self.triangle_count)?;
        writeln!(f, "Straddling:         {}", self.straddling_count)?;
        write!(f, "Max per node:       {}", self.max_node_triangles)
    }
}
