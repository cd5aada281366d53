//! Triangle octree: input records, construction and statistics

pub mod triangle;
pub mod extent;
pub mod octant;
pub mod node;
pub mod octree;
pub mod builder;
pub mod stats;

pub use triangle::{SurfaceTag, Triangle, TriangleStore, TRIANGLE_SIZE};
pub use extent::Extent;
pub use octant::Octant;
pub use node::{NodeId, OctreeNode, TriangleEntry};
pub use octree::{Octree, Preorder};
pub use builder::OctreeBuilder;
pub use stats::OctreeStats;
