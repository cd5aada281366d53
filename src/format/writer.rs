//! Octree serialization

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{ABSENT_CHILD, FileOrder, NODE_HEADER_SIZE, Slot};
use crate::core::error::Error;
use crate::core::types::Result;
use crate::octree::{OctreeNode, Octree, TRIANGLE_SIZE};

/// Write the whole tree in preorder. Returns the number of bytes written.
pub fn write_octree<W: Write>(tree: &Octree, writer: &mut W) -> Result<u64> {
    let mut written = 0u64;

    for slot in FileOrder::new(tree) {
        match slot {
            Slot::Node(id) => written += write_node(tree.node(id), writer)?,
            Slot::Absent(_) => {
                writer.write_all(&ABSENT_CHILD.to_le_bytes())?;
                written += 4;
            }
        }
    }

    Ok(written)
}

/// Header followed by the node's retained triangles
fn write_node<W: Write>(node: &OctreeNode, writer: &mut W) -> Result<u64> {
    let count = u32::try_from(node.data().len())
        .map_err(|_| Error::TooManyTriangles { count: node.data().len() })?;

    let corner = node.corner();
    let mut header = [0u8; NODE_HEADER_SIZE];
    header[0..4].copy_from_slice(&node.half_size().to_le_bytes());
    header[4..8].copy_from_slice(&corner.x.to_le_bytes());
    header[8..12].copy_from_slice(&corner.y.to_le_bytes());
    header[12..16].copy_from_slice(&corner.z.to_le_bytes());
    header[16..20].copy_from_slice(&count.to_le_bytes());
    header[20] = node.has_children() as u8;
    writer.write_all(&header)?;

    for entry in node.data() {
        writer.write_all(bytemuck::bytes_of(&entry.triangle.to_le()))?;
    }

    Ok((NODE_HEADER_SIZE + node.data().len() * TRIANGLE_SIZE) as u64)
}

/// Exact size of the serialized tree in bytes
pub fn encoded_len(tree: &Octree) -> u64 {
    FileOrder::new(tree)
        .map(|slot| match slot {
            Slot::Node(id) => (NODE_HEADER_SIZE + tree.node(id).data().len() * TRIANGLE_SIZE) as u64,
            Slot::Absent(_) => 4,
        })
        .sum()
}

/// Save the tree to `path`.
///
/// The file is written next to its destination under a temporary name and
/// renamed into place once complete, so a failed save leaves any existing
/// file at `path` untouched and never leaves a partial one behind.
pub fn save_octree(tree: &Octree, path: &Path) -> Result<u64> {
    save_atomic(path, |writer| write_octree(tree, writer))
}

/// Run `write` against `<path>.tmp`, then rename it over `path`.
/// IO failures are reported as [`Error::Output`] for `path`.
pub(crate) fn save_atomic<T, F>(path: &Path, write: F) -> Result<T>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<T>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| output_error(path, source))?;
        }
    }

    let temp_path = temp_path_for(path);
    let result = write_file(&temp_path, write).and_then(|value| {
        fs::rename(&temp_path, path).map_err(|source| output_error(path, source))?;
        Ok(value)
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result.map_err(|e| match e {
        Error::Io(source) => output_error(path, source),
        other => other,
    })
}

fn write_file<T, F>(path: &Path, write: F) -> Result<T>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<T>,
{
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let value = write(&mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(value)
}

/// `<name>.tmp` in the same directory as `path`
pub(crate) fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn output_error(path: &Path, source: std::io::Error) -> Error {
    Error::Output {
        path: path.to_path_buf(),
        source,
    }
}
