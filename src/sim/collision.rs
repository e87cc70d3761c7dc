//! Hit tests between bullets, the player and baddies
//!
//! Bullets are tested by their two endpoints only. Both tests are inclusive
//! on the boundary.

use glam::Vec2;

use crate::Rect;
use crate::sim::bullet::Bullet;

/// Circular hitbox in field coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub center: Vec2,
    pub radius: f32,
}

/// Check if a bullet point lies inside the player's hitbox
#[inline]
pub fn bullet_hits_player(hitbox: &Hitbox, point: Vec2) -> bool {
    hitbox.center.distance(point) <= hitbox.radius
}

/// Check if a bullet point lies inside a baddie's sprite rectangle
#[inline]
pub fn bullet_hits_baddie(bounds: &Rect, point: Vec2) -> bool {
    bounds.contains(point)
}

/// Either endpoint of `bullet` inside the hitbox
pub fn bullet_touches_player(hitbox: &Hitbox, bullet: &Bullet) -> bool {
    bullet
        .endpoints()
        .iter()
        .any(|p| bullet_hits_player(hitbox, *p))
}

/// Either endpoint of `bullet` inside the rectangle
pub fn bullet_touches_baddie(bounds: &Rect, bullet: &Bullet) -> bool {
    bullet
        .endpoints()
        .iter()
        .any(|p| bullet_hits_baddie(bounds, *p))
}

/// Outcome of one frame's collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Hits taken by the player (reflected or enemy bullets)
    pub player_hits: u32,
    /// Baddie/bullet pairs that connected
    pub baddie_hits: u32,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        self.player_hits == 0 && self.baddie_hits == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::CanvasSize;
    use crate::sim::bullet::{BulletKind, BulletSpawn};
    use crate::sim::pool::Poolable;

    #[test]
    fn test_circle_boundary_is_inclusive() {
        let hitbox = Hitbox {
            center: Vec2::ZERO,
            radius: 12.0,
        };
        assert!(bullet_hits_player(&hitbox, Vec2::new(12.0, 0.0)));
        assert!(bullet_hits_player(&hitbox, Vec2::new(0.0, -12.0)));
        assert!(!bullet_hits_player(&hitbox, Vec2::new(12.0001, 0.0)));
    }

    #[test]
    fn test_box_corners_are_inclusive() {
        let draw_point = Vec2::new(100.0, 40.0);
        let bounds = Rect::from_origin(draw_point, 21.0, 30.0);
        assert!(bullet_hits_baddie(&bounds, draw_point));
        assert!(bullet_hits_baddie(&bounds, Vec2::new(121.0, 70.0)));
        assert!(bullet_hits_baddie(&bounds, Vec2::new(121.0, 40.0)));
        assert!(bullet_hits_baddie(&bounds, Vec2::new(100.0, 70.0)));
        assert!(!bullet_hits_baddie(&bounds, Vec2::new(99.9, 40.0)));
        assert!(!bullet_hits_baddie(&bounds, Vec2::new(100.0, 70.1)));
    }

    #[test]
    fn test_report_is_empty_until_a_hit() {
        let mut report = CollisionReport::default();
        assert!(report.is_empty());
        report.baddie_hits = 1;
        assert!(!report.is_empty());
    }

    #[test]
    fn test_either_endpoint_counts() {
        let mut bullet = Bullet::new(BulletKind::Enemy, CanvasSize::new(800.0, 500.0));
        // Segment from (100, 250) to (120, 250)
        bullet.spawn(BulletSpawn::from_orbit(0.0, 4.0, 300.0));

        let near_start = Hitbox {
            center: Vec2::new(95.0, 250.0),
            radius: 5.0,
        };
        let near_end = Hitbox {
            center: Vec2::new(125.0, 250.0),
            radius: 5.0,
        };
        let between = Hitbox {
            center: Vec2::new(110.0, 250.0),
            radius: 5.0,
        };
        assert!(bullet_touches_player(&near_start, &bullet));
        assert!(bullet_touches_player(&near_end, &bullet));
        // Only endpoints are tested, not the segment body
        assert!(!bullet_touches_player(&between, &bullet));

        let bounds = Rect::new(118.0, 240.0, 21.0, 30.0);
        assert!(bullet_touches_baddie(&bounds, &bullet));
    }
}
