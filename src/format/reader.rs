//! Octree deserialization

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use super::ABSENT_CHILD;
use crate::core::error::Error;
use crate::core::types::{Result, Vec3};
use crate::octree::{NodeId, Octant, OctreeNode, Octree, TRIANGLE_SIZE, Triangle, TriangleEntry};

/// Deepest nesting accepted when reading; deeper files are rejected as malformed.
///
/// Halving an f32 half size from `f32::MAX` down to the smallest subnormal
/// takes 277 steps, so no built tree is deeper than that.
pub const MAX_READ_DEPTH: u32 = 300;

/// Read a tree written by [`write_octree`](super::write_octree).
///
/// Retained entries get their octant recomputed against the node they sit
/// in. Entries of a leaf that fit their octant come back movable.
pub fn read_octree<R: Read>(reader: &mut R) -> Result<Octree> {
    let half_size = read_f32(reader)?;
    let header = read_header(reader)?;

    let mut tree = Octree::new(half_size, header.corner);
    fill_node(reader, &mut tree, Octree::ROOT, header, 0)?;
    Ok(tree)
}

/// Load a baked octree file. Trailing bytes after the root are an error.
pub fn load_octree(path: &Path) -> Result<Octree> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let tree = read_octree(&mut reader)?;

    let mut probe = [0u8; 1];
    if reader.read(&mut probe)? != 0 {
        return Err(Error::Format(format!("{}: trailing data after root node", path.display())));
    }

    log::debug!("Loaded octree {} ({} nodes)", path.display(), tree.node_count());
    Ok(tree)
}

/// Node header fields after `half_size`
struct Header {
    corner: Vec3,
    count: u32,
    has_children: bool,
}

fn read_header<R: Read>(reader: &mut R) -> Result<Header> {
    let corner = Vec3::new(read_f32(reader)?, read_f32(reader)?, read_f32(reader)?);
    let count = u32::from_le_bytes(read_array(reader)?);
    let has_children = match read_array::<R, 1>(reader)?[0] {
        0 => false,
        1 => true,
        other => return Err(Error::Format(format!("invalid has_children flag {}", other))),
    };
    Ok(Header { corner, count, has_children })
}

/// Read the triangles and child slots of `id`, whose header is already consumed
fn fill_node<R: Read>(
    reader: &mut R,
    tree: &mut Octree,
    id: NodeId,
    header: Header,
    depth: u32,
) -> Result<()> {
    // cap the up-front reservation; the count comes from untrusted input
    let mut entries = Vec::with_capacity((header.count as usize).min(4096));
    for _ in 0..header.count {
        let bytes: [u8; TRIANGLE_SIZE] = read_array(reader)?;
        let triangle = bytemuck::pod_read_unaligned::<Triangle>(&bytes).from_le();

        let node = tree.node(id);
        let octant = node.classify(&triangle);
        entries.push(if node.fits(&triangle, octant) && !header.has_children {
            TriangleEntry::movable(triangle, octant)
        } else {
            TriangleEntry::straddling(triangle, octant)
        });
    }
    tree.node_mut(id).set_data(entries);

    if !header.has_children {
        return Ok(());
    }

    tree.node_mut(id).mark_split();

    for octant in Octant::ALL {
        let half_size = read_f32(reader)?;
        if half_size == ABSENT_CHILD {
            continue;
        }

        if depth + 1 > MAX_READ_DEPTH {
            return Err(Error::Format(format!("nesting deeper than {} levels", MAX_READ_DEPTH)));
        }

        let child_header = read_header(reader)?;
        let child = tree.push_node(OctreeNode::root(half_size, child_header.corner).with_parent(id));
        tree.node_mut(id).set_child(octant, child);
        fill_node(reader, tree, child, child_header, depth + 1)?;
    }

    Ok(())
}

fn read_f32<R: Read>(reader: &mut R) -> Result<f32> {
    Ok(f32::from_le_bytes(read_array(reader)?))
}

fn read_array<R: Read, const N: usize>(reader: &mut R) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => Error::Format("unexpected end of file".to_string()),
        _ => Error::Io(e),
    })?;
    Ok(buf)
}
