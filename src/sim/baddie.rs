//! Orbiting enemy
//!
//! A baddie circles the field on a fixed-radius track and fires down the
//! radius toward the center. Each frame it rolls once against its fire
//! threshold.

use glam::Vec2;
use rand::Rng;

use crate::assets::Sprite;
use crate::renderer::Surface;
use crate::settings::BaddieTuning;
use crate::sim::bullet::{Bullet, BulletSpawn};
use crate::sim::pool::{ObjectPool, Poolable};
use crate::{Rect, ray_point};

/// Spawn parameters for a baddie
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaddieSpawn {
    pub theta: f32,
    pub speed: f32,
}

#[derive(Debug, Clone)]
pub struct Baddie {
    /// Orbital angle
    pub theta: f32,
    /// Radians per frame (theta decreases)
    pub speed: f32,
    /// Orbit track radius
    pub radius: f32,
    pub fire_threshold: f32,
    /// Set by collision checks, consumed by the next update
    pub is_hit: bool,
    draw_point: Vec2,
    spawned: bool,
    center: Vec2,
    bullet_speed: f32,
    sprite: Sprite,
    tuning: BaddieTuning,
}

impl Baddie {
    pub fn new(tuning: &BaddieTuning, sprite: Sprite) -> Self {
        let center = Vec2::new(tuning.center_x, tuning.center_y);
        Self {
            theta: 0.0,
            speed: 0.1,
            radius: tuning.orbit_radius,
            fire_threshold: tuning.fire_threshold,
            is_hit: false,
            // Parked near the middle of the field until spawned
            draw_point: Vec2::new(400.0, 250.0),
            spawned: false,
            center,
            bullet_speed: tuning.bullet_speed,
            sprite,
            tuning: tuning.clone(),
        }
    }

    pub fn draw_point(&self) -> Vec2 {
        self.draw_point
    }

    pub fn width(&self) -> f32 {
        self.sprite.width()
    }

    pub fn height(&self) -> f32 {
        self.sprite.height()
    }

    /// Sprite rectangle in field coordinates
    pub fn bounds(&self) -> Rect {
        Rect::from_origin(self.draw_point, self.width(), self.height())
    }

    fn compute_draw_point(&self) -> Vec2 {
        ray_point(self.center, self.theta, self.radius)
    }

    /// Advance one frame, draw, maybe fire. Returns true when the baddie
    /// should retire.
    pub fn update<R: Rng>(
        &mut self,
        surface: &mut dyn Surface,
        rng: &mut R,
        bullets: &mut ObjectPool<Bullet>,
    ) -> bool {
        surface.clear_rect(self.bounds().inflate(5.0));
        if self.is_hit {
            return true;
        }

        self.theta -= self.speed;
        self.draw_point = self.compute_draw_point();
        surface.draw_sprite(&self.sprite, self.draw_point);

        let roll: u32 = rng.random_range(0..=100);
        if (roll as f32 / 100.0) < self.fire_threshold {
            self.fire(bullets);
        }
        false
    }

    fn fire(&self, bullets: &mut ObjectPool<Bullet>) {
        let shot = BulletSpawn::from_orbit(self.theta, self.bullet_speed, self.radius);
        if bullets.spawn(shot) {
            log::debug!("Baddie fired at theta {:.3}", self.theta);
        }
    }
}

impl Poolable for Baddie {
    type Spawn = BaddieSpawn;

    fn is_spawned(&self) -> bool {
        self.spawned
    }

    fn spawn(&mut self, data: BaddieSpawn) {
        self.theta = data.theta;
        self.draw_point = self.compute_draw_point();
        self.speed = data.speed;
        self.spawned = true;
    }

    fn reset(&mut self) {
        *self = Baddie::new(&self.tuning, self.sprite);
    }
}
