//! Octbake - bakes imported mesh triangles into a binary collision octree

pub mod core;
pub mod math;
pub mod octree;
pub mod format;
