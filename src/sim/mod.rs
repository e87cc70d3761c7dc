//! Gameplay simulation
//!
//! Everything that moves lives here. Entities draw themselves through
//! `Surface` as they update, so a frame is one pass over each pool.
//! - Seeded RNG only
//! - Pools are allocated once and never grow
//! - Collisions are tested before anything moves

pub mod baddie;
pub mod bullet;
pub mod collision;
pub mod field;
pub mod input;
pub mod player;
pub mod pool;

pub use baddie::{Baddie, BaddieSpawn};
pub use bullet::{Bullet, BulletKind, BulletSpawn};
pub use collision::{
    CollisionReport, Hitbox, bullet_hits_baddie, bullet_hits_player, bullet_touches_baddie,
    bullet_touches_player,
};
pub use field::Field;
pub use input::{Action, InputEvent, InputState};
pub use player::Player;
pub use pool::{ObjectPool, PoolStats, Poolable};
