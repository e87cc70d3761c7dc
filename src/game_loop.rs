//! Frame driver
//!
//! The loop refuses to start before every image is loaded, then renders one
//! field frame per tick until it is stopped.

use crate::assets::ImageStore;
use crate::error::GameError;
use crate::renderer::{Layers, Surface};
use crate::settings::Settings;
use crate::sim::{Field, InputEvent};

/// Source of frame ticks
pub trait Ticker {
    /// Whether another frame should run
    fn next_frame(&mut self) -> bool;
}

/// Yields a fixed number of frames
#[derive(Debug, Clone, Copy)]
pub struct FixedTicker {
    remaining: u64,
}

impl FixedTicker {
    pub fn new(frames: u64) -> Self {
        Self { remaining: frames }
    }
}

impl Ticker for FixedTicker {
    fn next_frame(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

pub struct GameLoop {
    field: Field,
    running: bool,
    frames: u64,
}

impl GameLoop {
    pub fn new(settings: Settings, assets: &ImageStore, seed: u64) -> Result<Self, GameError> {
        Ok(Self {
            field: Field::new(settings, assets, seed)?,
            running: false,
            frames: 0,
        })
    }

    /// Paint the status bar and begin running. Fails until every image has loaded.
    pub fn start<S: Surface>(
        &mut self,
        assets: &ImageStore,
        layers: &mut Layers<S>,
    ) -> Result<(), GameError> {
        if !assets.is_ready() {
            return Err(GameError::AssetsNotReady {
                loaded: assets.loaded_count(),
                expected: crate::assets::SpriteId::ALL.len(),
            });
        }
        self.field.start_round(&mut layers.status);
        self.running = true;
        log::info!("Game loop started");
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.running {
            log::info!("Game loop stopped after {} frames", self.frames);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn queue_input(&mut self, event: InputEvent) {
        self.field.queue_input(event);
    }

    /// Render one frame. Returns whether the next frame should be scheduled.
    pub fn frame<S: Surface>(&mut self, layers: &mut Layers<S>) -> bool {
        if !self.running {
            return false;
        }
        self.field.render(layers);
        self.frames += 1;
        self.running
    }

    /// Drive frames until the ticker runs dry or the loop stops
    pub fn run<S: Surface>(&mut self, ticker: &mut dyn Ticker, layers: &mut Layers<S>) -> u64 {
        let before = self.frames;
        while self.running && ticker.next_frame() {
            self.frame(layers);
        }
        self.frames - before
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }
}
