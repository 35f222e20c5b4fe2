//! Axis-aligned collision detection
//!
//! The player is tested with an inset hurtbox so grazing the sprite's
//! outline is forgiven. Obstacles use their full bounding box.

use glam::Vec2;

use super::state::{Obstacle, Player};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Shrink by `margin` on every side
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(margin),
            max: self.max - Vec2::splat(margin),
        }
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// The player's collision rectangle
pub fn hurtbox(player: &Player, inset: f32) -> Aabb {
    Aabb::from_pos_size(player.pos, player.size).inset(inset)
}

pub fn obstacle_box(obstacle: &Obstacle) -> Aabb {
    Aabb::from_pos_size(obstacle.pos, obstacle.size)
}

/// IDs of every obstacle overlapping the player's hurtbox, in collection order
pub fn overlapping(player: &Player, obstacles: &[Obstacle], inset: f32) -> Vec<u32> {
    let hurt = hurtbox(player, inset);
    obstacles
        .iter()
        .filter(|o| hurt.overlaps(&obstacle_box(o)))
        .map(|o| o.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleKind;
    use crate::tuning::Tuning;

    fn obstacle_at(id: u32, x: f32, y: f32) -> Obstacle {
        Obstacle {
            id,
            kind: ObstacleKind::GroundSpike,
            pos: Vec2::new(x, y),
            size: Vec2::splat(35.0),
            speed: 6.0,
        }
    }

    #[test]
    fn test_overlap_basic() {
        let a = Aabb::from_pos_size(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::from_pos_size(Vec2::new(5.0, 5.0), Vec2::splat(10.0));
        let c = Aabb::from_pos_size(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Shared edge is not a hit
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_hurtbox_is_inset() {
        let tuning = Tuning::default();
        let player = Player::new(&tuning);
        let hb = hurtbox(&player, 10.0);
        assert_eq!(hb.min, Vec2::new(130.0, 338.0));
        assert_eq!(hb.max, Vec2::new(142.0, 370.0));
    }

    #[test]
    fn test_grazing_the_sprite_is_forgiven() {
        let tuning = Tuning::default();
        let player = Player::new(&tuning);
        // Overlaps the full sprite (x 120..152) by 5px but not the hurtbox (130..142)
        let obstacles = [obstacle_at(1, 152.0 - 5.0, 345.0)];
        assert!(Aabb::from_pos_size(player.pos, player.size).overlaps(&obstacle_box(&obstacles[0])));
        assert!(overlapping(&player, &obstacles, 10.0).is_empty());
    }

    #[test]
    fn test_spike_under_player_hits() {
        let tuning = Tuning::default();
        let player = Player::new(&tuning);
        let obstacles = [obstacle_at(4, 400.0, 345.0), obstacle_at(7, 120.0, 345.0)];
        assert_eq!(overlapping(&player, &obstacles, 10.0), vec![7]);
    }

    #[test]
    fn test_floating_hazard_clears_grounded_player() {
        let tuning = Tuning::default();
        let player = Player::new(&tuning);
        // Lowest floating placement: bottom edge at 380 - 140 + 35 = 275, hurtbox top at 338
        let obstacles = [obstacle_at(1, 120.0, 240.0)];
        assert!(overlapping(&player, &obstacles, 10.0).is_empty());
    }
}
