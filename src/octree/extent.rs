//! Running per-axis extent of recorded vertices

use crate::core::types::Vec3;

/// Running maximum of `|coordinate|` on each axis.
///
/// Each component only ever grows. Recording the same vertex twice, or
/// recording vertices in a different order, gives the same result.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Extent {
    max: Vec3,
}

impl Extent {
    pub fn new() -> Self {
        Self { max: Vec3::ZERO }
    }

    /// Fold one vertex into the running maxima
    pub fn record(&mut self, x: f32, y: f32, z: f32) {
        self.record_point(Vec3::new(x, y, z));
    }

    /// Fold one vertex into the running maxima
    pub fn record_point(&mut self, p: Vec3) {
        let abs = p.abs();
        // Explicit compares so a NaN coordinate never replaces a tracked value
        if abs.x > self.max.x {
            self.max.x = abs.x;
        }
        if abs.y > self.max.y {
            self.max.y = abs.y;
        }
        if abs.z > self.max.z {
            self.max.z = abs.z;
        }
    }

    /// Raw running maxima
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Maxima grown by `margin`. Does not modify the tracker.
    pub fn finalized(&self, margin: f32) -> Vec3 {
        self.max * margin
    }

    /// Half-width of the root cube for a finalized extent
    pub fn root_half_size(finalized: Vec3) -> f32 {
        finalized.max_element()
    }

    pub fn clear(&mut self) {
        self.max = Vec3::ZERO;
    }
}
