//! Octant classification and child cube derivation
//!
//! A node's cube spans `[corner - 2 * half_size, corner]` on every axis.
//! The octant index packs one bit per axis: 4 for Y, 2 for Z, 1 for X.
//! A set bit selects the lower half of that axis `[corner - 2S, corner - S]`,
//! a clear bit the upper half `[corner - S, corner]`.

use crate::core::types::Vec3;
use crate::math::Aabb;

const Y_BIT: u8 = 4;
const Z_BIT: u8 = 2;
const X_BIT: u8 = 1;

/// One of the eight child cubes of a node.
///
/// Discriminants are the packed octant index, which is also the order child
/// slots appear in the baked file.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Octant {
    UpperFrontRight = 0,
    UpperFrontLeft = 1,
    UpperBackRight = 2,
    UpperBackLeft = 3,
    LowerFrontRight = 4,
    LowerFrontLeft = 5,
    LowerBackRight = 6,
    LowerBackLeft = 7,
}

impl Octant {
    /// Every octant in file order
    pub const ALL: [Octant; 8] = [
        Octant::UpperFrontRight,
        Octant::UpperFrontLeft,
        Octant::UpperBackRight,
        Octant::UpperBackLeft,
        Octant::LowerFrontRight,
        Octant::LowerFrontLeft,
        Octant::LowerBackRight,
        Octant::LowerBackLeft,
    ];

    /// Octant from its packed index, `None` if out of range
    pub fn from_index(index: u8) -> Option<Octant> {
        Self::ALL.get(index as usize).copied()
    }

    /// Packed index (0..8)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Classify `p` against the mid-planes of the cube `(corner, half_size)`
    pub fn classify(p: Vec3, corner: Vec3, half_size: f32) -> Octant {
        let mid = corner - Vec3::splat(half_size);
        let mut bits = 0u8;
        if p.y < mid.y {
            bits |= Y_BIT;
        }
        if p.z < mid.z {
            bits |= Z_BIT;
        }
        if p.x < mid.x {
            bits |= X_BIT;
        }
        Self::ALL[bits as usize]
    }

    /// Lower half along Y
    pub fn is_lower(self) -> bool {
        (self as u8) & Y_BIT != 0
    }

    /// Lower half along Z
    pub fn is_back(self) -> bool {
        (self as u8) & Z_BIT != 0
    }

    /// Lower half along X
    pub fn is_left(self) -> bool {
        (self as u8) & X_BIT != 0
    }

    /// Corner of this child within a parent cube `(corner, half_size)`
    pub fn child_corner(self, corner: Vec3, half_size: f32) -> Vec3 {
        let shift = |lower: bool| if lower { half_size } else { 0.0 };
        Vec3::new(
            corner.x - shift(self.is_left()),
            corner.y - shift(self.is_lower()),
            corner.z - shift(self.is_back()),
        )
    }

    /// Exact cube of this child within a parent cube `(corner, half_size)`
    pub fn child_bounds(self, corner: Vec3, half_size: f32) -> Aabb {
        let max = self.child_corner(corner, half_size);
        Aabb::new(max - Vec3::splat(half_size), max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminants_follow_file_order() {
        for (i, octant) in Octant::ALL.iter().enumerate() {
            assert_eq!(octant.index(), i);
            assert_eq!(Octant::from_index(i as u8), Some(*octant));
        }
        assert_eq!(Octant::from_index(8), None);
    }

    #[test]
    fn test_axis_flags() {
        assert!(!Octant::UpperFrontRight.is_lower());
        assert!(!Octant::UpperFrontRight.is_back());
        assert!(!Octant::UpperFrontRight.is_left());

        assert!(Octant::LowerBackLeft.is_lower());
        assert!(Octant::LowerBackLeft.is_back());
        assert!(Octant::LowerBackLeft.is_left());

        assert!(Octant::UpperFrontLeft.is_left());
        assert!(Octant::UpperBackRight.is_back());
        assert!(Octant::LowerFrontRight.is_lower());
    }

    #[test]
    fn test_classify() {
        // Cube [-2, 2] on every axis, mid-planes at 0
        let corner = Vec3::splat(2.0);
        let s = 2.0;
        assert_eq!(Octant::classify(Vec3::splat(1.0), corner, s), Octant::UpperFrontRight);
        assert_eq!(Octant::classify(Vec3::new(-1.0, 1.0, 1.0), corner, s), Octant::UpperFrontLeft);
        assert_eq!(Octant::classify(Vec3::new(1.0, 1.0, -1.0), corner, s), Octant::UpperBackRight);
        assert_eq!(Octant::classify(Vec3::new(1.0, -1.0, 1.0), corner, s), Octant::LowerFrontRight);
        assert_eq!(Octant::classify(Vec3::splat(-1.0), corner, s), Octant::LowerBackLeft);
    }

    #[test]
    fn test_classify_on_mid_plane_is_upper() {
        let corner = Vec3::splat(2.0);
        assert_eq!(Octant::classify(Vec3::ZERO, corner, 2.0), Octant::UpperFrontRight);
    }

    #[test]
    fn test_child_corner() {
        let corner = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(Octant::UpperFrontRight.child_corner(corner, 1.0), corner);
        assert_eq!(Octant::LowerBackLeft.child_corner(corner, 1.0), Vec3::new(3.0, 4.0, 5.0));
        assert_eq!(Octant::UpperFrontLeft.child_corner(corner, 1.0), Vec3::new(3.0, 5.0, 6.0));
        assert_eq!(Octant::LowerFrontRight.child_corner(corner, 1.0), Vec3::new(4.0, 4.0, 6.0));
    }

    #[test]
    fn test_children_tile_parent() {
        let corner = Vec3::splat(2.0);
        let s = 2.0;
        let parent = Aabb::from_max_corner(corner, s);

        let mut total_volume = 0.0;
        for octant in Octant::ALL {
            let child = octant.child_bounds(corner, s);
            assert_eq!(child.size(), Vec3::splat(s));
            assert!(parent.contains_point(child.min));
            assert!(parent.contains_point(child.max));
            // a point at the child's center classifies back into the same octant
            assert_eq!(Octant::classify(child.center(), corner, s), octant);
            total_volume += child.size().x * child.size().y * child.size().z;
        }
        assert_eq!(total_volume, 64.0);
    }
}
