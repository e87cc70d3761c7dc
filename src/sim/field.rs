//! Per-frame orchestration
//!
//! The field owns the player, both bullet pools, the baddie pool, the score
//! and the RNG. `render` runs one frame in a fixed order; collisions are
//! tested against the previous frame's geometry before anything moves.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::Rect;
use crate::assets::{ImageStore, Sprite, SpriteId};
use crate::error::GameError;
use crate::renderer::{Layers, Surface, colors, hud};
use crate::settings::Settings;
use crate::sim::baddie::{Baddie, BaddieSpawn};
use crate::sim::bullet::{Bullet, BulletKind};
use crate::sim::collision::{CollisionReport, bullet_touches_baddie, bullet_touches_player};
use crate::sim::input::{InputEvent, InputState};
use crate::sim::player::Player;
use crate::sim::pool::ObjectPool;

pub struct Field {
    settings: Settings,
    player: Player,
    player_bullets: ObjectPool<Bullet>,
    enemy_bullets: ObjectPool<Bullet>,
    baddies: ObjectPool<Baddie>,
    score: u64,
    rng: Pcg32,
    input: InputState,
    pending: VecDeque<InputEvent>,
    heart: Sprite,
    frame: u64,
}

impl Field {
    /// Build a field with every pool allocated up front
    pub fn new(settings: Settings, assets: &ImageStore, seed: u64) -> Result<Self, GameError> {
        settings.validate()?;

        let field_size = settings.field;
        let player = Player::new(&settings.player, settings.rail);
        let player_bullets = ObjectPool::new(settings.pools.player_bullets, || {
            Bullet::new(BulletKind::Player, field_size)
        });
        let enemy_bullets = ObjectPool::new(settings.pools.enemy_bullets, || {
            Bullet::new(BulletKind::Enemy, field_size)
        });
        let demon = assets.sprite(SpriteId::RedDemon);
        let baddies = ObjectPool::new(settings.pools.baddies, || {
            Baddie::new(&settings.baddie, demon)
        });

        log::info!(
            "Field ready: {} player bullets, {} enemy bullets, {} baddies, {} invincibility, seed {}",
            player_bullets.capacity(),
            enemy_bullets.capacity(),
            baddies.capacity(),
            settings.invincibility.as_str(),
            seed
        );

        Ok(Self {
            player,
            player_bullets,
            enemy_bullets,
            baddies,
            score: 0,
            rng: Pcg32::seed_from_u64(seed),
            input: InputState::default(),
            pending: VecDeque::new(),
            heart: assets.sprite(SpriteId::Heart),
            frame: 0,
            settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn player_bullets(&self) -> &ObjectPool<Bullet> {
        &self.player_bullets
    }

    pub fn player_bullets_mut(&mut self) -> &mut ObjectPool<Bullet> {
        &mut self.player_bullets
    }

    pub fn enemy_bullets(&self) -> &ObjectPool<Bullet> {
        &self.enemy_bullets
    }

    pub fn enemy_bullets_mut(&mut self) -> &mut ObjectPool<Bullet> {
        &mut self.enemy_bullets
    }

    pub fn baddies(&self) -> &ObjectPool<Baddie> {
        &self.baddies
    }

    pub fn baddies_mut(&mut self) -> &mut ObjectPool<Baddie> {
        &mut self.baddies
    }

    pub fn input(&self) -> InputState {
        self.input
    }

    /// Queue a key transition; applied at the top of the next frame
    pub fn queue_input(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    /// Paint the whole status bar. Call once before the first frame.
    pub fn start_round(&self, status: &mut dyn Surface) {
        hud::draw_status_bar(status, self.score, self.player.life, &self.heart);
    }

    /// Run one frame
    pub fn render<S: Surface>(&mut self, layers: &mut Layers<S>) {
        while let Some(event) = self.pending.pop_front() {
            self.input.apply(event);
        }

        self.clear_field(&mut layers.field);
        layers.rail.clear();
        hud::update_charge(
            &mut layers.status,
            self.player.fire_charge,
            self.player.fire_cooldown,
        );
        hud::draw_rail_guide(&mut layers.rail);

        let report = self.check_collisions();

        self.player.move_ship(&self.input, &mut self.player_bullets);
        self.player.draw(&mut layers.rail);

        let spawn = BaddieSpawn {
            theta: self.settings.baddie.spawn_theta,
            speed: self.settings.baddie.spawn_speed,
        };
        if self.baddies.spawn(spawn) {
            log::info!("Baddie spawned");
        }

        let field = &mut layers.field;
        let rng = &mut self.rng;
        let enemy_bullets = &mut self.enemy_bullets;
        self.baddies
            .draw(|baddie| baddie.update(&mut *field, &mut *rng, &mut *enemy_bullets));
        self.player_bullets.draw(|bullet| bullet.update(&mut *field));
        self.enemy_bullets.draw(|bullet| bullet.update(&mut *field));

        if !report.is_empty() {
            log::debug!("Frame {}: {:?}", self.frame, report);
            if report.baddie_hits > 0 {
                hud::draw_score(&mut layers.status, self.score);
            }
            if report.player_hits > 0 {
                hud::draw_hearts(&mut layers.status, self.player.life, &self.heart);
            }
        }

        self.frame += 1;
    }

    fn clear_field(&self, surface: &mut dyn Surface) {
        if self.settings.trails {
            let full = Rect::new(0.0, 0.0, surface.width(), surface.height());
            surface.fill_rect(full, colors::FIELD_FADE);
        } else {
            surface.clear();
        }
    }

    /// Test every live bullet against the player and the baddies
    pub fn check_collisions(&mut self) -> CollisionReport {
        let mut report = CollisionReport::default();
        let hitbox = self.player.field_hitbox(self.settings.field);
        let policy = self.settings.invincibility;
        let threshold = self.player.invincibility_threshold;

        // Player bullets that come back around
        for bullet in self.player_bullets.iter_spawned_mut() {
            if bullet.is_spent() || !bullet_touches_player(&hitbox, bullet) {
                continue;
            }
            if policy.player_bullet_hits(self.player.invincibility_frames, threshold) {
                self.player.take_hit();
                bullet.mark_spent();
                report.player_hits += 1;
            }
        }

        for bullet in self.enemy_bullets.iter_spawned_mut() {
            if bullet.is_spent() || !bullet_touches_player(&hitbox, bullet) {
                continue;
            }
            if policy.enemy_bullet_hits(self.player.invincibility_frames, threshold) {
                self.player.take_hit();
                bullet.mark_spent();
                report.player_hits += 1;
            }
        }

        for baddie in self.baddies.iter_spawned_mut() {
            if baddie.is_hit {
                continue;
            }
            let bounds = baddie.bounds();
            for bullet in self.player_bullets.iter_spawned_mut() {
                if bullet.is_spent() || !bullet_touches_baddie(&bounds, bullet) {
                    continue;
                }
                self.score += self.settings.score_per_hit;
                baddie.is_hit = true;
                bullet.mark_spent();
                report.baddie_hits += 1;
                log::info!("Baddie hit, score {}", self.score);
            }
        }

        report
    }
}
