//! Projectiles travelling along rays through the field center
//!
//! A bullet is a 20px segment on the ray at `path_angle`. Its two endpoints
//! sit at `start_radius` and `end_radius` from the center; every update both
//! radii shrink by `speed`, so the segment slides along the ray and out the
//! far side of the field.

use glam::Vec2;

use crate::consts::{
    BADDIE_ORBIT_RADIUS, BULLET_LENGTH, OFFSCREEN_MARGIN, PLAYER_BULLET_START_RADIUS,
};
use crate::renderer::{Surface, colors};
use crate::settings::CanvasSize;
use crate::sim::pool::Poolable;
use crate::{Rect, ray_point};

/// Who fired the bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletKind {
    /// Fired inward from the player's bow
    Player,
    /// Fired by a baddie from its orbit
    Enemy,
}

impl BulletKind {
    /// Start radius used when the spawn data doesn't carry one
    pub fn default_start_radius(&self) -> f32 {
        match self {
            BulletKind::Player => PLAYER_BULLET_START_RADIUS,
            BulletKind::Enemy => BADDIE_ORBIT_RADIUS,
        }
    }

    /// Whether spawn data may override the start radius
    pub fn takes_spawn_radius(&self) -> bool {
        matches!(self, BulletKind::Enemy)
    }
}

/// Spawn parameters for a bullet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletSpawn {
    pub theta: f32,
    pub speed: f32,
    /// Start radius (enemy bullets fire from the orbit they sit on)
    pub radius: Option<f32>,
}

impl BulletSpawn {
    pub fn player(theta: f32, speed: f32) -> Self {
        Self {
            theta,
            speed,
            radius: None,
        }
    }

    pub fn from_orbit(theta: f32, speed: f32, radius: f32) -> Self {
        Self {
            theta,
            speed,
            radius: Some(radius),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bullet {
    pub kind: BulletKind,
    pub path_angle: f32,
    pub speed: f32,
    pub start_radius: f32,
    pub end_radius: f32,
    start_point: Vec2,
    end_point: Vec2,
    spawned: bool,
    /// Registered a hit; retires on its next update
    spent: bool,
    center: Vec2,
    bounds: CanvasSize,
}

impl Bullet {
    pub fn new(kind: BulletKind, field: CanvasSize) -> Self {
        let start_radius = kind.default_start_radius();
        Self {
            kind,
            path_angle: 0.0,
            speed: 0.0,
            start_radius,
            end_radius: start_radius - BULLET_LENGTH,
            start_point: Vec2::ZERO,
            end_point: Vec2::ZERO,
            spawned: false,
            spent: false,
            center: field.center(),
            bounds: field,
        }
    }

    pub fn start_point(&self) -> Vec2 {
        self.start_point
    }

    pub fn end_point(&self) -> Vec2 {
        self.end_point
    }

    /// Both endpoints, for collision tests
    pub fn endpoints(&self) -> [Vec2; 2] {
        [self.start_point, self.end_point]
    }

    pub fn is_spent(&self) -> bool {
        self.spent
    }

    /// Mark the bullet as having hit something
    pub fn mark_spent(&mut self) {
        self.spent = true;
    }

    fn compute_points(&mut self) {
        self.start_point = ray_point(self.center, self.path_angle, self.start_radius);
        self.end_point = ray_point(self.center, self.path_angle, self.end_radius);
    }

    /// Visible while any endpoint is inside the field plus margin, per axis
    pub fn is_visible(&self) -> bool {
        let (s, e) = (self.start_point, self.end_point);
        let max_x = self.bounds.width + OFFSCREEN_MARGIN;
        let max_y = self.bounds.height + OFFSCREEN_MARGIN;
        (s.y > -OFFSCREEN_MARGIN || e.y > -OFFSCREEN_MARGIN)
            && (s.y < max_y || e.y < max_y)
            && (s.x > -OFFSCREEN_MARGIN || e.x > -OFFSCREEN_MARGIN)
            && (s.x < max_x || e.x < max_x)
    }

    /// Area the segment may have painted last frame
    fn dirty_rect(&self) -> Rect {
        let x = self.start_point.x.min(self.end_point.x);
        let y = self.start_point.y.min(self.end_point.y);
        Rect::new(x - 5.0, y - 5.0, 30.0, 30.0)
    }

    /// Advance one frame and draw. Returns true when the bullet should retire.
    pub fn update(&mut self, surface: &mut dyn Surface) -> bool {
        surface.clear_rect(self.dirty_rect());
        if self.spent {
            return true;
        }

        self.start_radius -= self.speed;
        self.end_radius -= self.speed;
        self.compute_points();

        if self.is_visible() {
            surface.stroke_line(self.start_point, self.end_point, colors::BULLET, 2.0);
            false
        } else {
            true
        }
    }
}

impl Poolable for Bullet {
    type Spawn = BulletSpawn;

    fn is_spawned(&self) -> bool {
        self.spawned
    }

    fn spawn(&mut self, data: BulletSpawn) {
        debug_assert!(
            data.radius.is_none() || self.kind.takes_spawn_radius(),
            "player bullets always start at the bow"
        );
        let start = match data.radius {
            Some(r) if self.kind.takes_spawn_radius() => r,
            _ => self.kind.default_start_radius(),
        };
        self.path_angle = data.theta;
        self.speed = data.speed;
        self.start_radius = start;
        self.end_radius = start - BULLET_LENGTH;
        self.compute_points();
        self.spent = false;
        self.spawned = true;
    }

    fn reset(&mut self) {
        *self = Bullet::new(self.kind, self.bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSurface;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn field(w: f32, h: f32) -> CanvasSize {
        CanvasSize::new(w, h)
    }

    #[test]
    fn test_player_bullet_spawns_at_bow_radius() {
        let mut bullet = Bullet::new(BulletKind::Player, field(800.0, 500.0));
        bullet.spawn(BulletSpawn::player(FRAC_PI_2, 4.0));
        assert!(bullet.is_spawned());
        assert_eq!(bullet.start_radius, 12.0);
        assert_eq!(bullet.end_radius, -8.0);
        // Start point 12px above the center, end point 8px below
        assert!((bullet.start_point().y - 238.0).abs() < 1e-3);
        assert!((bullet.end_point().y - 258.0).abs() < 1e-3);
        assert!((bullet.start_point().x - 400.0).abs() < 1e-3);
    }

    #[test]
    fn test_enemy_bullet_trails_behind_orbit() {
        let mut bullet = Bullet::new(BulletKind::Enemy, field(800.0, 500.0));
        bullet.spawn(BulletSpawn::from_orbit(0.0, 4.0, 300.0));
        assert_eq!(bullet.start_radius, 300.0);
        assert_eq!(bullet.end_radius, 280.0);
        assert_eq!(bullet.start_point(), Vec2::new(100.0, 250.0));
        assert_eq!(bullet.end_point(), Vec2::new(120.0, 250.0));
    }

    #[test]
    fn test_update_moves_both_radii_and_draws() {
        let mut surface = RecordingSurface::new(800.0, 500.0);
        let mut bullet = Bullet::new(BulletKind::Enemy, field(800.0, 500.0));
        bullet.spawn(BulletSpawn::from_orbit(0.0, 4.0, 300.0));

        assert!(!bullet.update(&mut surface));
        assert_eq!(bullet.start_radius, 296.0);
        assert_eq!(bullet.end_radius, 276.0);
        let lines: Vec<_> = surface.lines().collect();
        assert_eq!(lines, vec![(Vec2::new(104.0, 250.0), Vec2::new(124.0, 250.0))]);
    }

    #[test]
    fn test_retires_on_exact_frame_leaving_field() {
        // 100x100 field, ray pointing right through the center: the start
        // point is at x = 50 - r and the end point 20px further along.
        // Both are past x = 105 once r <= -55, i.e. after 105 updates.
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let mut bullet = Bullet::new(BulletKind::Enemy, field(100.0, 100.0));
        bullet.spawn(BulletSpawn::from_orbit(0.0, 1.0, 50.0));

        for frame in 1..105 {
            assert!(!bullet.update(&mut surface), "retired early at frame {frame}");
        }
        assert_eq!(bullet.start_point().x, 104.0);
        assert!(bullet.update(&mut surface));
        assert_eq!(bullet.start_point().x, 105.0);
        assert_eq!(bullet.end_point().x, 125.0);
    }

    #[test]
    fn test_one_visible_endpoint_keeps_bullet_alive() {
        let mut bullet = Bullet::new(BulletKind::Enemy, field(100.0, 100.0));
        // start at x = 104 (inside margin), end at x = 124 (outside)
        bullet.spawn(BulletSpawn::from_orbit(0.0, 1.0, -54.0));
        assert!(bullet.is_visible());
    }

    /// Updates until the bullet retires, on a 100x100 field at speed 1
    fn frames_until_retired(theta: f32, radius: f32) -> u32 {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let mut bullet = Bullet::new(BulletKind::Enemy, field(100.0, 100.0));
        bullet.spawn(BulletSpawn::from_orbit(theta, 1.0, radius));
        for frame in 1..=1000 {
            if bullet.update(&mut surface) {
                return frame;
            }
        }
        panic!("bullet never left the field");
    }

    /// Bullet with its endpoints placed directly
    fn segment(start: Vec2, end: Vec2) -> Bullet {
        let mut bullet = Bullet::new(BulletKind::Enemy, field(100.0, 100.0));
        bullet.spawn(BulletSpawn::from_orbit(0.0, 0.0, 50.0));
        bullet.start_point = start;
        bullet.end_point = end;
        bullet
    }

    #[test]
    fn test_retires_on_exact_frame_through_each_edge() {
        // Radius 49.5 leaves the leading endpoint at 104.5 or -4.5 on
        // frame 104 and past the margin on frame 105.
        assert_eq!(frames_until_retired(PI, 49.5), 105, "left");
        assert_eq!(frames_until_retired(-FRAC_PI_2, 49.5), 105, "top");
        assert_eq!(frames_until_retired(FRAC_PI_2, 49.5), 105, "bottom");
        assert_eq!(frames_until_retired(0.0, 49.5), 105, "right");
    }

    #[test]
    fn test_off_screen_on_one_axis_is_not_visible() {
        // In range vertically, both endpoints past the right margin
        assert!(!segment(Vec2::new(106.0, 50.0), Vec2::new(126.0, 50.0)).is_visible());
        // In range horizontally, both endpoints past the top margin
        assert!(!segment(Vec2::new(50.0, -6.0), Vec2::new(50.0, -26.0)).is_visible());
        // ...and past the bottom and left margins
        assert!(!segment(Vec2::new(50.0, 106.0), Vec2::new(50.0, 126.0)).is_visible());
        assert!(!segment(Vec2::new(-6.0, 50.0), Vec2::new(-26.0, 50.0)).is_visible());
    }

    #[test]
    fn test_visibility_is_checked_per_axis() {
        // Start is below the field, end is right of it; each axis still has
        // one endpoint in range
        assert!(segment(Vec2::new(50.0, 110.0), Vec2::new(110.0, 50.0)).is_visible());
    }

    #[test]
    fn test_endpoints_straddling_margin_stay_alive() {
        assert!(segment(Vec2::new(50.0, -6.0), Vec2::new(50.0, -4.0)).is_visible());
        assert!(segment(Vec2::new(104.9, 50.0), Vec2::new(106.0, 50.0)).is_visible());
        assert!(segment(Vec2::new(50.0, 106.0), Vec2::new(50.0, 104.9)).is_visible());
        assert!(segment(Vec2::new(-6.0, 50.0), Vec2::new(-4.9, 50.0)).is_visible());
        // Exactly on the margin counts as gone
        assert!(!segment(Vec2::new(-5.0, 50.0), Vec2::new(-25.0, 50.0)).is_visible());
    }

    #[test]
    fn test_spent_bullet_retires_without_moving() {
        let mut surface = RecordingSurface::new(800.0, 500.0);
        let mut bullet = Bullet::new(BulletKind::Player, field(800.0, 500.0));
        bullet.spawn(BulletSpawn::player(FRAC_PI_2, 4.0));
        bullet.mark_spent();
        assert!(bullet.update(&mut surface));
        assert_eq!(bullet.start_radius, 12.0);
        assert_eq!(surface.lines().count(), 0);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut bullet = Bullet::new(BulletKind::Player, field(800.0, 500.0));
        bullet.spawn(BulletSpawn::player(1.0, 4.0));
        bullet.mark_spent();
        bullet.reset();
        assert!(!bullet.is_spawned());
        assert!(!bullet.is_spent());
        assert_eq!(bullet.speed, 0.0);
        assert_eq!(bullet.start_radius, 12.0);
        assert_eq!(bullet.end_radius, -8.0);
    }
}
