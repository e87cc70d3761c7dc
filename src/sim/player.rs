//! The player's ship
//!
//! A triangle riding a circular rail on its own small canvas. Three angles
//! (port, starboard, bow) define the vertices; steering shifts all three.
//! Geometry is always derived from the angles, never stored.

use glam::Vec2;

use crate::consts::{PLAYER_BOW_OFFSET, PLAYER_HITBOX_OFFSET};
use crate::renderer::{Surface, colors};
use crate::settings::{CanvasSize, PlayerTuning};
use crate::sim::bullet::{Bullet, BulletSpawn};
use crate::sim::collision::Hitbox;
use crate::sim::input::InputState;
use crate::sim::pool::ObjectPool;

#[derive(Debug, Clone)]
pub struct Player {
    pub port_theta: f32,
    pub starboard_theta: f32,
    pub bow_theta: f32,
    pub velocity: f32,
    pub acceleration: f32,
    pub max_speed: f32,
    /// Rail radius on the rail canvas
    pub radius: f32,
    /// Frames since the last shot
    pub fire_charge: u32,
    pub fire_cooldown: u32,
    /// Frames since the last hit
    pub invincibility_frames: u32,
    pub invincibility_threshold: u32,
    pub life: u8,
    pub hitbox_radius: f32,
    bullet_speed: f32,
    canvas_center: Vec2,
}

impl Player {
    pub fn new(tuning: &PlayerTuning, rail: CanvasSize) -> Self {
        Self {
            port_theta: tuning.port_theta,
            starboard_theta: tuning.starboard_theta,
            bow_theta: tuning.bow_theta,
            velocity: 0.0,
            acceleration: tuning.acceleration,
            max_speed: tuning.max_speed,
            radius: tuning.rail_radius,
            fire_charge: 0,
            fire_cooldown: tuning.fire_cooldown,
            // Start outside the hit window
            invincibility_frames: tuning.invincibility_threshold,
            invincibility_threshold: tuning.invincibility_threshold,
            life: tuning.life,
            hitbox_radius: tuning.hitbox_radius,
            bullet_speed: tuning.bullet_speed,
            canvas_center: rail.center(),
        }
    }

    pub fn port_vertex(&self) -> Vec2 {
        Vec2::new(
            self.port_theta.cos() * self.radius,
            self.port_theta.sin() * self.radius,
        ) + self.canvas_center
    }

    /// Starboard is mirrored vertically relative to port
    pub fn starboard_vertex(&self) -> Vec2 {
        Vec2::new(
            self.starboard_theta.cos() * self.radius,
            -self.starboard_theta.sin() * self.radius,
        ) + self.canvas_center
    }

    fn bow_point(&self, offset: f32) -> Vec2 {
        Vec2::new(self.bow_theta.cos() * offset, self.bow_theta.sin() * offset)
            + self.canvas_center
    }

    pub fn bow_vertex(&self) -> Vec2 {
        self.bow_point(PLAYER_BOW_OFFSET)
    }

    /// Hitbox center on the rail canvas
    pub fn hitbox_center(&self) -> Vec2 {
        self.bow_point(PLAYER_HITBOX_OFFSET)
    }

    /// Hitbox mapped onto the field canvas (both canvases share a center)
    pub fn field_hitbox(&self, field: CanvasSize) -> Hitbox {
        Hitbox {
            center: self.hitbox_center() - self.canvas_center + field.center(),
            radius: self.hitbox_radius,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility_frames < self.invincibility_threshold
    }

    /// Ready to fire on the next frame the button is held
    pub fn charge_ready(&self) -> bool {
        self.fire_charge >= self.fire_cooldown
    }

    /// Steer and fire for one frame. Returns true if a shot was fired.
    pub fn move_ship(&mut self, input: &InputState, bullets: &mut ObjectPool<Bullet>) -> bool {
        self.fire_charge = self.fire_charge.saturating_add(1);
        self.invincibility_frames = self.invincibility_frames.saturating_add(1);

        if input.left {
            self.accelerate();
            self.starboard_theta += self.velocity;
            self.port_theta -= self.velocity;
            self.bow_theta -= self.velocity;
        } else if input.right {
            self.accelerate();
            self.starboard_theta -= self.velocity;
            self.port_theta += self.velocity;
            self.bow_theta += self.velocity;
        } else {
            self.velocity = 0.0;
        }

        if input.fire && self.charge_ready() {
            self.fire(bullets);
            return true;
        }
        false
    }

    /// Ramp toward max speed; may overshoot by one step
    fn accelerate(&mut self) {
        if self.velocity <= self.max_speed {
            self.velocity += self.acceleration;
        }
    }

    fn fire(&mut self, bullets: &mut ObjectPool<Bullet>) {
        self.fire_charge = 0;
        let shot = BulletSpawn::player(self.bow_theta, self.bullet_speed);
        if !bullets.spawn(shot) {
            log::debug!("Player bullet pool full, shot dropped");
        }
    }

    /// Register a hit from a bullet
    pub fn take_hit(&mut self) {
        self.life = self.life.saturating_sub(1);
        self.invincibility_frames = 0;
        log::info!("Player hit, {} lives left", self.life);
        if self.life == 0 {
            log::warn!("Player has no lives remaining");
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let color = if self.is_invincible() {
            colors::SHIP_HIT
        } else {
            colors::SHIP
        };
        let hull = [self.starboard_vertex(), self.port_vertex(), self.bow_vertex()];
        surface.fill_polygon(&hull, color);
    }
}
