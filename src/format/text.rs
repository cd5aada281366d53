//! Human-readable dump of a baked octree

use std::io::Write;
use std::path::Path;

use super::writer::save_atomic;
use super::{FileOrder, Slot};
use crate::core::types::{Result, Vec3};
use crate::octree::Octree;

/// Write every node in file order, absent child slots included
pub fn write_text_dump<W: Write>(tree: &Octree, writer: &mut W) -> Result<()> {
    let mut total = 0usize;

    for slot in FileOrder::new(tree) {
        let id = match slot {
            Slot::Node(id) => id,
            Slot::Absent(octant) => {
                writeln!(writer, "Node {}: 0", octant.index())?;
                continue;
            }
        };

        let node = tree.node(id);
        total += node.data().len();

        writeln!(writer, "Size: {}", node.half_size())?;
        writeln!(writer, "Max dimension: {}", fmt_point(node.corner()))?;
        writeln!(writer, "Total data: {}", node.data().len())?;
        writeln!(writer, "Has children: {}", node.has_children() as u8)?;

        for entry in node.data() {
            let t = &entry.triangle;
            writeln!(writer, "{{")?;
            writeln!(writer, "    {}", fmt_point(t.a))?;
            writeln!(writer, "    {}", fmt_point(t.b))?;
            writeln!(writer, "    {}", fmt_point(t.c))?;
            writeln!(writer, "    {}", t.tag.0)?;
            writeln!(writer, "}}")?;
        }
    }

    writeln!(writer, "Total data in octree: {}", total)?;
    Ok(())
}

/// Write the dump to `path`, replacing it atomically like the binary file
pub fn save_text_dump(tree: &Octree, path: &Path) -> Result<()> {
    save_atomic(path, |writer| write_text_dump(tree, writer))
}

fn fmt_point(p: Vec3) -> String {
    format!("{}, {}, {}", p.x, p.y, p.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::format::writer::temp_path_for;
    use crate::octree::{SurfaceTag, Triangle};
    use tempfile::TempDir;

    #[test]
    fn test_leaf_dump() {
        let mut tree = Octree::new(1.5, Vec3::new(1.5, 1.0, 0.5));
        tree.insert(Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y, SurfaceTag(9)));

        let mut out = Vec::new();
        write_text_dump(&tree, &mut out).expect("dump failed");
        let text = String::from_utf8(out).expect("dump is not utf-8");

        let expected = "Size: 1.5\n\
                        Max dimension: 1.5, 1, 0.5\n\
                        Total data: 1\n\
                        Has children: 0\n\
                        {\n    0, 0, 0\n    1, 0, 0\n    0, 1, 0\n    9\n}\n\
                        Total data in octree: 1\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_dump_lists_absent_slots() {
        let mut tree = Octree::with_split_threshold(1.05, Vec3::splat(1.05), 1);
        for i in 0..2 {
            let y = 0.1 + i as f32 * 0.1;
            tree.insert(Triangle::new(
                Vec3::new(0.1, y, 0.1),
                Vec3::new(0.9, y, 0.1),
                Vec3::new(0.1, y, 0.9),
                SurfaceTag(i),
            ));
        }

        let mut out = Vec::new();
        write_text_dump(&tree, &mut out).expect("dump failed");
        let text = String::from_utf8(out).expect("dump is not utf-8");

        for i in 1..8 {
            assert!(text.contains(&format!("Node {}: 0\n", i)));
        }
        assert!(!text.contains("Node 0: 0"));
        assert_eq!(text.matches("Size: ").count(), 2);
        assert!(text.ends_with("Total data in octree: 2\n"));
    }

    #[test]
    fn test_save_dump_is_atomic() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("levelOctree.txtb");
        let tree = Octree::new(1.0, Vec3::ONE);

        save_text_dump(&tree, &path).expect("save failed");
        let first = std::fs::read_to_string(&path).expect("read failed");
        assert!(first.ends_with("Total data in octree: 0\n"));
        assert!(!temp_path_for(&path).exists());

        std::fs::create_dir(temp_path_for(&path)).expect("create_dir failed");
        let err = save_text_dump(&tree, &path).expect_err("save should fail");
        assert!(matches!(err, Error::Output { .. }));
        assert_eq!(std::fs::read_to_string(&path).expect("read failed"), first);
    }
}
