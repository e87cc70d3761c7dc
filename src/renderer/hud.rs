//! Status bar and rail guide
//!
//! Layout on the 800x25 status canvas: score at x=100, hearts from x=400,
//! charge meter at x=634.

use glam::Vec2;

use crate::Rect;
use crate::assets::Sprite;
use crate::consts::RAIL_GUIDE_RADIUS;
use crate::renderer::{Surface, colors};

const FONT: &str = "16px Arial";
const SCORE_AT: Vec2 = Vec2::new(100.0, 19.0);
const SCORE_AREA: Rect = Rect::new(99.0, 5.0, 200.0, 20.0);
const HEARTS_AREA: Rect = Rect::new(399.0, 5.0, 200.0, 20.0);
const HEART_X: f32 = 400.0;
const HEART_Y: f32 = 6.0;
const HEART_SPACING: f32 = 20.0;
const CHARGE_FRAME: Rect = Rect::new(634.0, 6.0, 98.0, 13.0);
const CHARGE_AREA: Rect = Rect::new(635.0, 7.0, 96.0, 11.0);
/// Meter pixels per frame of charge
const CHARGE_STEP: f32 = 4.0;

/// Paint the full status bar from scratch
pub fn draw_status_bar(surface: &mut dyn Surface, score: u64, life: u8, heart: &Sprite) {
    let full = Rect::new(0.0, 0.0, surface.width(), surface.height());
    surface.fill_rect(full, colors::WHITE);
    surface.fill_text(&score.to_string(), SCORE_AT, colors::BLACK, FONT);
    draw_hearts(surface, life, heart);
    surface.stroke_rect(CHARGE_FRAME, colors::CHARGE, 1.0);
}

pub fn draw_score(surface: &mut dyn Surface, score: u64) {
    surface.clear_rect(SCORE_AREA);
    surface.fill_text(&score.to_string(), SCORE_AT, colors::BLACK, FONT);
}

/// One heart per remaining life
pub fn draw_hearts(surface: &mut dyn Surface, life: u8, heart: &Sprite) {
    surface.clear_rect(HEARTS_AREA);
    for i in 0..life {
        let at = Vec2::new(HEART_X + f32::from(i) * HEART_SPACING, HEART_Y);
        surface.draw_sprite(heart, at);
    }
}

/// Grow the charge meter while the gun recharges; empty it after a shot
pub fn update_charge(surface: &mut dyn Surface, fire_charge: u32, fire_cooldown: u32) {
    if fire_charge == 0 {
        surface.clear_rect(CHARGE_AREA);
    } else if fire_charge < fire_cooldown {
        let width = (fire_charge as f32 * CHARGE_STEP).min(CHARGE_AREA.width);
        let bar = Rect::new(CHARGE_AREA.x, CHARGE_AREA.y, width, CHARGE_AREA.height);
        surface.fill_rect(bar, colors::CHARGE);
    }
}

/// Circle the ship rides on, centered on the rail canvas
pub fn draw_rail_guide(surface: &mut dyn Surface) {
    let center = Vec2::new(surface.width() / 2.0, surface.height() / 2.0);
    surface.stroke_circle(center, RAIL_GUIDE_RADIUS, colors::RAIL, 2.0);
}
