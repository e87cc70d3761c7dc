//! Game settings and tuning
//!
//! Every gameplay constant in `consts` can be overridden from JSON. Missing
//! fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Which bullet class may hit the player, depending on invincibility frames
///
/// `Legacy` reproduces the shipped behaviour: reflected player bullets only
/// hit while the player is still inside the invincibility window, enemy
/// bullets only once the window is over. `Uniform` protects the player from
/// both while the window is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InvincibilityPolicy {
    #[default]
    Legacy,
    Uniform,
}

impl InvincibilityPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvincibilityPolicy::Legacy => "legacy",
            InvincibilityPolicy::Uniform => "uniform",
        }
    }

    /// Whether a reflected player bullet counts as a hit
    pub fn player_bullet_hits(&self, frames: u32, threshold: u32) -> bool {
        match self {
            InvincibilityPolicy::Legacy => frames < threshold,
            InvincibilityPolicy::Uniform => frames >= threshold,
        }
    }

    /// Whether an enemy bullet counts as a hit
    pub fn enemy_bullet_hits(&self, frames: u32, threshold: u32) -> bool {
        match self {
            InvincibilityPolicy::Legacy => frames > threshold,
            InvincibilityPolicy::Uniform => frames >= threshold,
        }
    }
}

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Player ship tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub rail_radius: f32,
    pub acceleration: f32,
    pub max_speed: f32,
    /// Frames between shots while fire is held
    pub fire_cooldown: u32,
    pub bullet_speed: f32,
    pub life: u8,
    pub hitbox_radius: f32,
    /// Frames after a hit during which the ship is drawn as "just hit"
    pub invincibility_threshold: u32,
    pub port_theta: f32,
    pub starboard_theta: f32,
    pub bow_theta: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            rail_radius: PLAYER_RAIL_RADIUS,
            acceleration: PLAYER_ACCELERATION,
            max_speed: PLAYER_MAX_SPEED,
            fire_cooldown: PLAYER_FIRE_COOLDOWN,
            bullet_speed: PLAYER_BULLET_SPEED,
            life: PLAYER_LIFE,
            hitbox_radius: PLAYER_HITBOX_RADIUS,
            invincibility_threshold: INVINCIBILITY_THRESHOLD,
            port_theta: PLAYER_PORT_THETA,
            starboard_theta: PLAYER_STARBOARD_THETA,
            bow_theta: PLAYER_BOW_THETA,
        }
    }
}

/// Baddie tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BaddieTuning {
    pub orbit_radius: f32,
    pub center_x: f32,
    pub center_y: f32,
    /// Per-frame probability of firing (0.0 - 1.0)
    pub fire_threshold: f32,
    pub spawn_theta: f32,
    pub spawn_speed: f32,
    pub bullet_speed: f32,
}

impl Default for BaddieTuning {
    fn default() -> Self {
        Self {
            orbit_radius: BADDIE_ORBIT_RADIUS,
            center_x: BADDIE_CENTER_X,
            center_y: BADDIE_CENTER_Y,
            fire_threshold: BADDIE_FIRE_THRESHOLD,
            spawn_theta: BADDIE_SPAWN_THETA,
            spawn_speed: BADDIE_SPAWN_SPEED,
            bullet_speed: BADDIE_BULLET_SPEED,
        }
    }
}

/// Pool capacities, fixed for the lifetime of a field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSizes {
    pub player_bullets: usize,
    pub enemy_bullets: usize,
    pub baddies: usize,
}

impl Default for PoolSizes {
    fn default() -> Self {
        Self {
            player_bullets: PLAYER_BULLET_POOL,
            enemy_bullets: ENEMY_BULLET_POOL,
            baddies: BADDIE_POOL,
        }
    }
}

/// Complete game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Canvases ===
    pub field: CanvasSize,
    pub rail: CanvasSize,
    pub status: CanvasSize,

    // === Entities ===
    pub player: PlayerTuning,
    pub baddie: BaddieTuning,
    pub pools: PoolSizes,

    // === Rules ===
    pub score_per_hit: u64,
    pub invincibility: InvincibilityPolicy,

    // === Visuals ===
    /// Fade the foreground instead of clearing it, leaving short trails
    pub trails: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field: CanvasSize::new(FIELD_WIDTH, FIELD_HEIGHT),
            rail: CanvasSize::new(RAIL_CANVAS_SIZE, RAIL_CANVAS_SIZE),
            status: CanvasSize::new(STATUS_WIDTH, STATUS_HEIGHT),
            player: PlayerTuning::default(),
            baddie: BaddieTuning::default(),
            pools: PoolSizes::default(),
            score_per_hit: SCORE_PER_HIT,
            invincibility: InvincibilityPolicy::default(),
            trails: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        for (field, size) in [
            ("field", &self.field),
            ("rail", &self.rail),
            ("status", &self.status),
        ] {
            if !(size.width > 0.0 && size.height > 0.0) {
                return Err(invalid(field, "width and height must be positive"));
            }
        }
        if !(self.player.rail_radius > 0.0) {
            return Err(invalid("player.rail_radius", "must be positive"));
        }
        if self.player.fire_cooldown == 0 {
            return Err(invalid("player.fire_cooldown", "must be at least 1"));
        }
        if !(self.player.hitbox_radius >= 0.0) {
            return Err(invalid("player.hitbox_radius", "must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.baddie.fire_threshold) {
            return Err(invalid(
                "baddie.fire_threshold",
                "must be between 0.0 and 1.0",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> GameError {
    GameError::InvalidSettings {
        field,
        reason: reason.to_string(),
    }
}
