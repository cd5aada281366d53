//! Baked octree file format
//!
//! Little-endian, no magic number, no padding. Nodes are written in preorder:
//!
//! ```text
//! Node      := half_size: f32, corner: [f32; 3], data_count: u32, has_children: u8,
//!              data_count x Triangle,
//!              if has_children { 8 x ChildSlot }      // octant order 0..7
//! ChildSlot := Node | 0.0f32                          // 0.0 marks an absent child
//! Triangle  := a: [f32; 3], b: [f32; 3], c: [f32; 3], tag: u32
//! ```
//!
//! A child slot is told apart from a node by its leading `f32`. This relies on
//! every non-root node having a non-zero half size; the builder never
//! materializes a child whose half size would be zero.

pub mod reader;
pub mod text;
pub mod writer;

use crate::octree::{NodeId, Octant, Octree};

pub use reader::{MAX_READ_DEPTH, load_octree, read_octree};
pub use text::{save_text_dump, write_text_dump};
pub use writer::{encoded_len, save_octree, write_octree};

/// Size of a node header in bytes
pub const NODE_HEADER_SIZE: usize = 4 + 12 + 4 + 1;

/// Value written in place of an absent child
pub const ABSENT_CHILD: f32 = 0.0;

/// One position in the file's preorder sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Node(NodeId),
    Absent(Octant),
}

/// Walks the tree in exactly the order its records appear on disk
pub(crate) struct FileOrder<'a> {
    tree: &'a Octree,
    stack: Vec<Slot>,
}

impl<'a> FileOrder<'a> {
    pub(crate) fn new(tree: &'a Octree) -> Self {
        Self {
            tree,
            stack: vec![Slot::Node(Octree::ROOT)],
        }
    }
}

impl Iterator for FileOrder<'_> {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        let slot = self.stack.pop()?;
        if let Slot::Node(id) = slot {
            let node = self.tree.node(id);
            if node.has_children() {
                for octant in Octant::ALL.into_iter().rev() {
                    self.stack.push(match node.child_at(octant) {
                        Some(child) => Slot::Node(child),
                        None => Slot::Absent(octant),
                    });
                }
            }
        }
        Some(slot)
    }
}
