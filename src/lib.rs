//! Rail Shooter - a rail arcade shooter on HTML canvas
//!
//! Core modules:
//! - `sim`: Entity pools, player, baddies, collisions and the per-frame field
//! - `renderer`: 2D surface abstraction, HUD drawing, canvas backend
//! - `game_loop`: Loop owner with an explicit running flag
//! - `assets`: Sprite manifest and load readiness
//! - `settings`: Data-driven game tuning

pub mod assets;
pub mod error;
pub mod game_loop;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use game_loop::{FixedTicker, GameLoop, Ticker};
pub use settings::{InvincibilityPolicy, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Foreground field canvas
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 500.0;
    /// Player rail canvas
    pub const RAIL_CANVAS_SIZE: f32 = 150.0;
    /// Status bar canvas
    pub const STATUS_WIDTH: f32 = 800.0;
    pub const STATUS_HEIGHT: f32 = 25.0;

    /// Bullets are kept alive while any endpoint is within this margin
    pub const OFFSCREEN_MARGIN: f32 = 5.0;
    /// Length of every bullet segment (start radius - end radius)
    pub const BULLET_LENGTH: f32 = 20.0;
    /// Player bullets start just in front of the field center
    pub const PLAYER_BULLET_START_RADIUS: f32 = 12.0;

    /// Player defaults
    pub const PLAYER_RAIL_RADIUS: f32 = 50.0;
    pub const PLAYER_ACCELERATION: f32 = 0.02;
    pub const PLAYER_MAX_SPEED: f32 = 0.3;
    pub const PLAYER_FIRE_COOLDOWN: u32 = 25;
    pub const PLAYER_BULLET_SPEED: f32 = 4.0;
    pub const PLAYER_LIFE: u8 = 3;
    pub const PLAYER_HITBOX_RADIUS: f32 = 12.0;
    pub const PLAYER_PORT_THETA: f32 = -1.23;
    pub const PLAYER_STARBOARD_THETA: f32 = 1.9106;
    pub const PLAYER_BOW_THETA: f32 = std::f32::consts::FRAC_PI_2;
    /// Distance of the bow vertex from the rail center (toward the ship)
    pub const PLAYER_BOW_OFFSET: f32 = -15.0;
    /// Distance of the hitbox center from the rail center (toward the ship)
    pub const PLAYER_HITBOX_OFFSET: f32 = -35.0;
    pub const INVINCIBILITY_THRESHOLD: u32 = 50;

    /// Rail guide circle drawn on the rail canvas
    pub const RAIL_GUIDE_RADIUS: f32 = 60.0;

    /// Baddie defaults
    pub const BADDIE_ORBIT_RADIUS: f32 = 300.0;
    pub const BADDIE_CENTER_X: f32 = 390.0;
    pub const BADDIE_CENTER_Y: f32 = 232.0;
    pub const BADDIE_FIRE_THRESHOLD: f32 = 0.01;
    pub const BADDIE_SPAWN_THETA: f32 = std::f32::consts::FRAC_PI_2;
    pub const BADDIE_SPAWN_SPEED: f32 = 0.005;
    pub const BADDIE_BULLET_SPEED: f32 = 4.0;

    /// Pool capacities
    pub const PLAYER_BULLET_POOL: usize = 8;
    pub const ENEMY_BULLET_POOL: usize = 1;
    pub const BADDIE_POOL: usize = 1;

    /// Points awarded per baddie hit
    pub const SCORE_PER_HIT: u64 = 100;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Point at `radius` along the ray at `theta`, measured back toward the
/// screen origin from `center`.
///
/// Positive radii land up-left of the center for angles in the first
/// quadrant, negative radii cross to the other side. Bullets and baddies share
/// this convention.
#[inline]
pub fn ray_point(center: Vec2, theta: f32, radius: f32) -> Vec2 {
    center - polar_to_cartesian(radius, theta)
}

/// Axis-aligned rectangle with inclusive edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin(origin: Vec2, width: f32, height: f32) -> Self {
        Self::new(origin.x, origin.y, width, height)
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Grow the rectangle by `margin` on every side
    pub fn inflate(&self, margin: f32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + margin * 2.0,
            self.height + margin * 2.0,
        )
    }

    /// Inclusive containment on all four edges
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.x <= p.x && p.x <= self.x + self.width && self.y <= p.y && p.y <= self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_ray_point_zero_angle() {
        let center = Vec2::new(50.0, 50.0);
        // Positive radius moves left, negative radius moves right
        assert_eq!(ray_point(center, 0.0, 10.0), Vec2::new(40.0, 50.0));
        assert_eq!(ray_point(center, 0.0, -10.0), Vec2::new(60.0, 50.0));
    }

    #[test]
    fn test_ray_point_quarter_turn() {
        let p = ray_point(Vec2::new(400.0, 250.0), FRAC_PI_2, 12.0);
        assert!((p.x - 400.0).abs() < 1e-4);
        assert!((p.y - 238.0).abs() < 1e-4);
    }

    #[test]
    fn test_rect_contains_is_inclusive() {
        let r = Rect::new(10.0, 20.0, 21.0, 30.0);
        assert!(r.contains(Vec2::new(10.0, 20.0)));
        assert!(r.contains(Vec2::new(31.0, 50.0)));
        assert!(!r.contains(Vec2::new(9.999, 20.0)));
        assert!(!r.contains(Vec2::new(31.0, 50.01)));
    }

    #[test]
    fn test_rect_inflate() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0).inflate(5.0);
        assert_eq!(r, Rect::new(5.0, 5.0, 30.0, 30.0));
    }
}
