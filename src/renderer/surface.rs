//! 2D drawing surface abstraction
//!
//! The simulation draws through `Surface` so it can target an HTML canvas on
//! the web and a command log everywhere else.

use glam::Vec2;

use crate::Rect;
use crate::assets::Sprite;

/// RGBA color (alpha 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS color string for canvas fill/stroke styles
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const BULLET: Color = BLACK;
    pub const SHIP: Color = BLACK;
    pub const SHIP_HIT: Color = Color::rgb(255, 0, 0);
    pub const RAIL: Color = BLACK;
    pub const CHARGE: Color = Color::rgb(0, 0, 255);
    /// Translucent wash used instead of a full clear when trails are on
    pub const FIELD_FADE: Color = Color::rgba(255, 255, 255, 0.1);
}

/// Minimal immediate-mode 2D drawing API
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn clear_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, line_width: f32);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, line_width: f32);
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn fill_text(&mut self, text: &str, at: Vec2, color: Color, font: &str);
    /// Blit the sprite's source rectangle at `at`, unscaled
    fn draw_sprite(&mut self, sprite: &Sprite, at: Vec2);

    /// Clear the whole surface
    fn clear(&mut self) {
        let rect = Rect::new(0.0, 0.0, self.width(), self.height());
        self.clear_rect(rect);
    }
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ClearRect(Rect),
    FillRect(Rect, Color),
    StrokeRect(Rect, Color),
    Line { from: Vec2, to: Vec2, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Polygon { points: Vec<Vec2>, color: Color },
    Text { text: String, at: Vec2 },
    Sprite { sprite: Sprite, at: Vec2 },
}

/// Surface that records every call instead of rasterizing
///
/// Used by the native runner and by tests to inspect what a frame drew.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Forget everything recorded so far
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn sprites(&self) -> impl Iterator<Item = (&Sprite, Vec2)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite { sprite, at } => Some((sprite, *at)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::ClearRect(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, _line_width: f32) {
        self.commands.push(DrawCommand::StrokeRect(rect, color));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, _line_width: f32) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, _line_width: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_text(&mut self, text: &str, at: Vec2, _color: Color, _font: &str) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
        });
    }

    fn draw_sprite(&mut self, sprite: &Sprite, at: Vec2) {
        self.commands.push(DrawCommand::Sprite {
            sprite: *sprite,
            at,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_colors() {
        assert_eq!(colors::SHIP_HIT.to_css(), "rgb(255, 0, 0)");
        assert_eq!(colors::FIELD_FADE.to_css(), "rgba(255, 255, 255, 0.1)");
    }

    #[test]
    fn test_default_clear_covers_surface() {
        let mut surface = RecordingSurface::new(150.0, 150.0);
        surface.clear();
        assert_eq!(
            surface.commands,
            vec![DrawCommand::ClearRect(Rect::new(0.0, 0.0, 150.0, 150.0))]
        );
    }

    #[test]
    fn test_recorded_lines_filter() {
        let mut surface = RecordingSurface::new(10.0, 10.0);
        surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), colors::WHITE);
        surface.stroke_line(Vec2::ZERO, Vec2::ONE, colors::BULLET, 2.0);
        let lines: Vec<_> = surface.lines().collect();
        assert_eq!(lines, vec![(Vec2::ZERO, Vec2::ONE)]);
    }
}
