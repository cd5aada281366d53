//! Input triangles and the append-only triangle store

use bytemuck::{Pod, Zeroable};

use crate::core::types::Vec3;

/// Hash of a semantic surface name (water, ladder, ...). Zero means untagged.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct SurfaceTag(pub u32);

impl SurfaceTag {
    pub const UNTAGGED: SurfaceTag = SurfaceTag(0);

    const OFFSET_BASIS: u32 = 2_166_136_261;
    const PRIME: u32 = 16_777_619;

    /// Hash a surface name the same way the runtime does.
    /// An empty name is untagged.
    pub fn from_name(name: &str) -> Self {
        if name.is_empty() {
            return Self::UNTAGGED;
        }

        let hash = name
            .bytes()
            .fold(Self::OFFSET_BASIS, |hash, byte| Self::PRIME.wrapping_mul(hash ^ byte as u32));
        SurfaceTag(hash ^ (hash >> 16))
    }

    pub fn is_untagged(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for SurfaceTag {
    fn from(value: u32) -> Self {
        SurfaceTag(value)
    }
}

/// A model-space triangle with its surface tag.
///
/// 40 bytes, no padding: three `f32x3` points followed by a `u32` tag.
/// This is also the exact on-disk record.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
    pub tag: SurfaceTag,
}

/// Size of one triangle record in bytes
pub const TRIANGLE_SIZE: usize = std::mem::size_of::<Triangle>();

const _: () = assert!(TRIANGLE_SIZE == 40);

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3, tag: SurfaceTag) -> Self {
        Self { a, b, c, tag }
    }

    /// The three vertices in order
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.a, self.b, self.c]
    }

    /// Convert every field to little-endian representation (no-op on LE targets)
    pub fn to_le(self) -> Self {
        Self {
            a: vec3_to_le(self.a),
            b: vec3_to_le(self.b),
            c: vec3_to_le(self.c),
            tag: SurfaceTag(self.tag.0.to_le()),
        }
    }

    /// Convert every field from little-endian representation (no-op on LE targets)
    pub fn from_le(self) -> Self {
        Self {
            a: vec3_from_le(self.a),
            b: vec3_from_le(self.b),
            c: vec3_from_le(self.c),
            tag: SurfaceTag(u32::from_le(self.tag.0)),
        }
    }
}

fn vec3_to_le(v: Vec3) -> Vec3 {
    Vec3::from_array(v.to_array().map(|f| f32::from_bits(f.to_bits().to_le())))
}

fn vec3_from_le(v: Vec3) -> Vec3 {
    Vec3::from_array(v.to_array().map(|f| f32::from_bits(u32::from_le(f.to_bits()))))
}

/// Append-only, ordered list of recorded triangles.
///
/// No winding, degeneracy or bounds validation is done here.
#[derive(Debug, Default, Clone)]
pub struct TriangleStore {
    triangles: Vec<Triangle>,
}

impl TriangleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a triangle as-is
    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Triangles in record order
    pub fn as_slice(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    pub fn clear(&mut self) {
        self.triangles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_layout() {
        assert_eq!(TRIANGLE_SIZE, 40);
        let tri = Triangle::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(7.0, 8.0, 9.0),
            SurfaceTag(0xAABBCCDD),
        );
        let bytes = bytemuck::bytes_of(&tri);
        assert_eq!(bytes.len(), 40);
        // tag sits in the last four bytes
        assert_eq!(&bytes[36..40], &0xAABBCCDDu32.to_ne_bytes());
        assert_eq!(&bytes[0..4], &1.0f32.to_ne_bytes());
    }

    #[test]
    fn test_le_conversion_is_involution() {
        let tri = Triangle::new(Vec3::X, Vec3::Y, Vec3::Z, SurfaceTag(7));
        assert_eq!(tri.to_le().from_le(), tri);
    }

    #[test]
    fn test_surface_tag_empty_is_untagged() {
        assert_eq!(SurfaceTag::from_name(""), SurfaceTag::UNTAGGED);
        assert!(SurfaceTag::from_name("").is_untagged());
    }

    #[test]
    fn test_surface_tag_hash_values() {
        // single byte: one multiply round, then the fold-down
        let hash = 16_777_619u32.wrapping_mul(2_166_136_261u32 ^ 0x61);
        assert_eq!(SurfaceTag::from_name("a"), SurfaceTag(hash ^ (hash >> 16)));
        assert_ne!(SurfaceTag::from_name("water"), SurfaceTag::from_name("ladder"));
        assert_eq!(SurfaceTag::from_name("water"), SurfaceTag::from_name("water"));
        assert!(!SurfaceTag::from_name("water").is_untagged());
    }

    #[test]
    fn test_store_preserves_order_and_degenerates() {
        let mut store = TriangleStore::new();
        let degenerate = Triangle::new(Vec3::ONE, Vec3::ONE, Vec3::ONE, SurfaceTag::UNTAGGED);
        let normal = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y, SurfaceTag(3));
        store.push(degenerate);
        store.push(normal);
        store.push(degenerate);

        assert_eq!(store.len(), 3);
        assert_eq!(store.as_slice(), &[degenerate, normal, degenerate]);

        store.clear();
        assert!(store.is_empty());
    }
}
