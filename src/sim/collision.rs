//! Collision detection for axis-aligned boxes
//!
//! Everything in the game collides as a rectangle. Overlap is strict: boxes
//! that only share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAGNET_PULL, MAGNET_RADIUS};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos, pos + size)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap test on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Displacement that pulls a star at `item_center` toward the ship
///
/// Returns `None` outside the magnet radius. Inside, the star moves a fixed
/// fraction of the remaining distance each tick.
pub fn magnet_pull(item_center: Vec2, player_center: Vec2) -> Option<Vec2> {
    let to_player = player_center - item_center;
    if to_player.length() < MAGNET_RADIUS {
        Some(to_player * MAGNET_PULL)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square(x: f32, y: f32, size: f32) -> Aabb {
        Aabb::from_pos_size(Vec2::new(x, y), Vec2::splat(size))
    }

    #[test]
    fn test_overlap() {
        let player = square(100.0, 100.0, 40.0);
        assert!(player.overlaps(&square(120.0, 120.0, 30.0)));
        assert!(player.overlaps(&square(90.0, 90.0, 60.0)));
        assert!(!player.overlaps(&square(300.0, 100.0, 30.0)));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let player = square(100.0, 100.0, 40.0);
        // Hazard directly above, bottom edge on the player's top edge
        assert!(!player.overlaps(&square(100.0, 70.0, 30.0)));
        // Right neighbour
        assert!(!player.overlaps(&square(140.0, 100.0, 30.0)));
        // Corner contact only
        assert!(!player.overlaps(&square(140.0, 140.0, 30.0)));
        // A hair of overlap counts
        assert!(player.overlaps(&square(100.0, 70.01, 30.0)));
    }

    #[test]
    fn test_magnet_pull_inside_radius() {
        let pull = magnet_pull(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
        assert_eq!(pull, Some(Vec2::new(5.0, 0.0)));
    }

    #[test]
    fn test_magnet_pull_outside_radius() {
        assert!(magnet_pull(Vec2::ZERO, Vec2::new(150.0, 0.0)).is_none());
        assert!(magnet_pull(Vec2::ZERO, Vec2::new(120.0, 120.0)).is_none());
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, asz in 1.0f32..80.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, bsz in 1.0f32..80.0,
        ) {
            let a = square(ax, ay, asz);
            let b = square(bx, by, bsz);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn adjacent_boxes_never_overlap(
            x in -500.0f32..500.0, y in -500.0f32..500.0, size in 1.0f32..80.0,
        ) {
            let a = Aabb::new(Vec2::new(x, y), Vec2::new(x + size, y + size));
            let right = Aabb::new(Vec2::new(a.max.x, y), Vec2::new(a.max.x + size, y + size));
            let below = Aabb::new(Vec2::new(x, a.max.y), Vec2::new(x + size, a.max.y + size));
            prop_assert!(!a.overlaps(&right));
            prop_assert!(!a.overlaps(&below));
        }
    }
}
