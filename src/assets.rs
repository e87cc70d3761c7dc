//! Sprite manifest and load tracking
//!
//! Images load asynchronously in the browser. The loop must not run a frame
//! until every image in the manifest reports loaded.

use serde::{Deserialize, Serialize};

use crate::Rect;

/// Every image the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    RedDemon,
    Heart,
}

impl SpriteId {
    pub const ALL: [SpriteId; 2] = [SpriteId::RedDemon, SpriteId::Heart];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpriteId::RedDemon => "red_demon",
            SpriteId::Heart => "heart",
        }
    }
}

/// Manifest entry: where the image lives and which part of it to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageAsset {
    pub path: &'static str,
    pub width: f32,
    pub height: f32,
    pub src_x: f32,
    pub src_y: f32,
}

impl ImageAsset {
    pub fn for_id(id: SpriteId) -> Self {
        match id {
            SpriteId::RedDemon => Self {
                path: "assets/sprites/demon_test.png",
                width: 21.0,
                height: 30.0,
                src_x: 0.0,
                src_y: 0.0,
            },
            SpriteId::Heart => Self {
                path: "assets/sprites/heart.png",
                width: 13.0,
                height: 13.0,
                src_x: 0.0,
                src_y: 0.0,
            },
        }
    }
}

/// A drawable cut of a loaded image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub id: SpriteId,
    /// Source rectangle within the image
    pub src: Rect,
}

impl Sprite {
    pub fn width(&self) -> f32 {
        self.src.width
    }

    pub fn height(&self) -> f32 {
        self.src.height
    }
}

/// Tracks which manifest images have finished loading
#[derive(Debug, Clone, Default)]
pub struct ImageStore {
    loaded: Vec<SpriteId>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self { loaded: Vec::new() }
    }

    /// Store with every image already available (native runner, tests)
    pub fn preloaded() -> Self {
        Self {
            loaded: SpriteId::ALL.to_vec(),
        }
    }

    /// Record an image load. Returns true exactly once: when the last
    /// outstanding image arrives.
    pub fn mark_loaded(&mut self, id: SpriteId) -> bool {
        if self.loaded.contains(&id) {
            return false;
        }
        self.loaded.push(id);
        log::debug!(
            "Loaded sprite {} ({}/{})",
            id.as_str(),
            self.loaded.len(),
            SpriteId::ALL.len()
        );
        self.is_ready()
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn is_ready(&self) -> bool {
        SpriteId::ALL.iter().all(|id| self.loaded.contains(id))
    }

    /// Sprite for a manifest image (full source rectangle)
    pub fn sprite(&self, id: SpriteId) -> Sprite {
        let asset = ImageAsset::for_id(id);
        Sprite {
            id,
            src: Rect::new(asset.src_x, asset.src_y, asset.width, asset.height),
        }
    }
}
