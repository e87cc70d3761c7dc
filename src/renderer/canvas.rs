//! `Surface` backed by an HTML canvas 2D context

use std::collections::HashMap;
use std::f64::consts::TAU;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};

use super::{Color, Surface};
use crate::Rect;
use crate::assets::{Sprite, SpriteId};
use crate::error::GameError;
use crate::settings::CanvasSize;

/// Loaded image elements shared by every canvas
pub type SpriteImages = Rc<HashMap<SpriteId, HtmlImageElement>>;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f32,
    height: f32,
    images: SpriteImages,
}

impl CanvasSurface {
    /// Look up a canvas by element id, size it, and grab its 2D context
    pub fn from_element_id(
        document: &Document,
        id: &str,
        size: CanvasSize,
        images: SpriteImages,
    ) -> Result<Self, GameError> {
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| GameError::Canvas(format!("no element with id `{id}`")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| GameError::Canvas(format!("`{id}` is not a canvas")))?;
        canvas.set_width(size.width as u32);
        canvas.set_height(size.height as u32);

        let ctx = canvas
            .get_context("2d")
            .map_err(|e| GameError::Canvas(format!("{e:?}")))?
            .ok_or_else(|| GameError::Canvas(format!("`{id}` has no 2d context")))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| GameError::Canvas(format!("`{id}` context is not 2d")))?;

        Ok(Self {
            ctx,
            width: size.width,
            height: size.height,
            images,
        })
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear_rect(&mut self, r: Rect) {
        self.ctx
            .clear_rect(r.x as f64, r.y as f64, r.width as f64, r.height as f64);
    }

    fn fill_rect(&mut self, r: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(r.x as f64, r.y as f64, r.width as f64, r.height as f64);
    }

    fn stroke_rect(&mut self, r: Rect, color: Color, line_width: f32) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(line_width as f64);
        self.ctx
            .stroke_rect(r.x as f64, r.y as f64, r.width as f64, r.height as f64);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, line_width: f32) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(line_width as f64);
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, line_width: f32) {
        self.ctx.begin_path();
        if let Err(e) = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
        {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(line_width as f64);
        self.ctx.stroke();
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, at: Vec2, color: Color, font: &str) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.set_font(font);
        if let Err(e) = self.ctx.fill_text(text, at.x as f64, at.y as f64) {
            log::warn!("fill_text failed: {:?}", e);
        }
    }

    fn draw_sprite(&mut self, sprite: &Sprite, at: Vec2) {
        let Some(image) = self.images.get(&sprite.id) else {
            log::warn!("Sprite {} not loaded", sprite.id.as_str());
            return;
        };
        let src = sprite.src;
        let result = self
            .ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                image,
                src.x as f64,
                src.y as f64,
                src.width as f64,
                src.height as f64,
                at.x as f64,
                at.y as f64,
                src.width as f64,
                src.height as f64,
            );
        if let Err(e) = result {
            log::warn!("draw_image failed: {:?}", e);
        }
    }
}
