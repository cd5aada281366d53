//! Octree baking for one imported asset
//!
//! The import step feeds vertices and triangles in while walking a mesh, then
//! calls [`OctreeBuilder::build`] once to produce and persist the tree.
//!
//! ```no_run
//! use octbake::core::BakeConfig;
//! use octbake::octree::{OctreeBuilder, SurfaceTag};
//! use glam::Vec3;
//!
//! let mut builder = OctreeBuilder::open(BakeConfig::with_output_dir("data/scenes"))?;
//! let (a, b, c) = (Vec3::ZERO, Vec3::X, Vec3::Y);
//! for v in [a, b, c] {
//!     builder.record_extent(v.x, v.y, v.z);
//! }
//! builder.record_triangle(a, b, c, SurfaceTag::from_name("floor"));
//! let path = builder.build("level1")?;
//! builder.close();
//! # let _ = path;
//! # Ok::<(), octbake::core::Error>(())
//! ```

use std::path::{Path, PathBuf};

use super::extent::Extent;
use super::octree::Octree;
use super::stats::OctreeStats;
use super::triangle::{SurfaceTag, Triangle, TriangleStore};
use crate::core::config::BakeConfig;
use crate::core::types::{Result, Vec3};
use crate::format;

/// Collects one asset's geometry and bakes it into an octree file
pub struct OctreeBuilder {
    config: BakeConfig,
    extent: Extent,
    triangles: TriangleStore,
    tree: Option<Octree>,
}

impl OctreeBuilder {
    /// Start a bake pass with the given configuration
    pub fn open(config: BakeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            extent: Extent::new(),
            triangles: TriangleStore::new(),
            tree: None,
        })
    }

    /// Record one mesh vertex for the bounding extent
    pub fn record_extent(&mut self, x: f32, y: f32, z: f32) {
        self.extent.record(x, y, z);
    }

    /// Record one triangle. Stored as given, without validation.
    pub fn record_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, tag: SurfaceTag) {
        self.triangles.push(Triangle::new(a, b, c, tag));
    }

    /// Build the tree in memory, replacing any previous one
    pub fn construct(&mut self) -> &Octree {
        // drop the old tree before allocating the new one
        self.tree = None;

        let corner = self.extent.finalized(self.config.extent_margin);
        let half_size = Extent::root_half_size(corner);

        if self.triangles.is_empty() {
            log::warn!("Building octree with no triangles");
        }
        if !(half_size > 0.0 && half_size.is_finite()) {
            log::warn!("Degenerate extent {:?}; root will not split", self.extent.max());
        }

        let mut tree = Octree::with_split_threshold(half_size, corner, self.config.split_threshold);
        for triangle in self.triangles.iter() {
            log::trace!("Inserting {:?} {:?} {:?} tag {}", triangle.a, triangle.b, triangle.c, triangle.tag.0);
            tree.insert(*triangle);
        }

        let stats = OctreeStats::collect(&tree);
        log::info!(
            "Built octree: {} triangles, {} nodes, depth {}, root half size {}",
            stats.triangle_count,
            stats.node_count,
            stats.max_depth,
            stats.root_half_size
        );

        self.tree.insert(tree)
    }

    /// Build the tree and write it to `<output_dir>/<stem><file_suffix>`.
    ///
    /// Returns the written path. On failure nothing is left at that path
    /// (an existing file there is kept as it was). The optional text dump goes
    /// next to it with a `b` appended to the name; failing to write the dump
    /// is logged and does not fail the build.
    pub fn build(&mut self, stem: &str) -> Result<PathBuf> {
        let path = self.config.output_path(stem);
        let write_dump = self.config.write_text_dump;
        let tree = self.construct();

        let len = format::save_octree(tree, &path)?;
        log::info!("Wrote {} ({} bytes)", path.display(), len);

        if write_dump {
            let dump_path = dump_path_for(&path);
            // the binary is already in place; a missing dump does not undo it
            match format::save_text_dump(tree, &dump_path) {
                Ok(()) => log::debug!("Wrote text dump {}", dump_path.display()),
                Err(e) => log::warn!("Skipping text dump: {}", e),
            }
        }

        Ok(path)
    }

    /// Most recently built tree
    pub fn tree(&self) -> Option<&Octree> {
        self.tree.as_ref()
    }

    /// Tracked extent before the margin is applied
    pub fn extent(&self) -> Vec3 {
        self.extent.max()
    }

    /// Recorded triangles in record order
    pub fn triangles(&self) -> &[Triangle] {
        self.triangles.as_slice()
    }

    pub fn config(&self) -> &BakeConfig {
        &self.config
    }

    /// End the pass: forget recorded geometry and the built tree.
    /// The builder can be reused for the next asset.
    pub fn close(&mut self) {
        self.extent.clear();
        self.triangles.clear();
        self.tree = None;
    }
}

/// `<output>b`, next to the binary file
fn dump_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push("b");
    PathBuf::from(name)
}
