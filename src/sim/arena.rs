//! Square arena bounds
//!
//! Movement never leaves `[-half_extent, half_extent]` on x and z.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::clamp_to_arena;
use crate::consts::ARENA_BOUND;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    pub half_extent: f32,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self::new(ARENA_BOUND)
    }
}

impl ArenaBounds {
    pub fn new(half_extent: f32) -> Self {
        Self {
            half_extent: half_extent.abs(),
        }
    }

    /// Clamp x and z into the arena, leaving height untouched
    #[inline]
    pub fn clamp(&self, pos: Vec3) -> Vec3 {
        clamp_to_arena(pos, self.half_extent)
    }

    #[inline]
    pub fn contains(&self, pos: Vec3) -> bool {
        pos.x.abs() <= self.half_extent && pos.z.abs() <= self.half_extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_corner() {
        let bounds = ArenaBounds::default();
        let p = bounds.clamp(Vec3::new(-30.0, 0.5, 30.0));
        assert_eq!(p, Vec3::new(-8.0, 0.5, 8.0));
        assert!(bounds.contains(p));
    }

    #[test]
    fn test_edge_is_inside() {
        let bounds = ArenaBounds::new(8.0);
        assert!(bounds.contains(Vec3::new(8.0, 0.0, -8.0)));
        assert!(!bounds.contains(Vec3::new(8.01, 0.0, 0.0)));
    }
}
