//! Render submission contract
//!
//! The simulation never talks to a GPU. Entities describe what they want drawn
//! as `DrawCommand`s and hand them to a `RenderSink`. `SpriteBatch` is the
//! headless sink: it queues commands for a frame and hands them back on `end`.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

/// Opaque texture handle owned by whoever loaded the texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextureId(pub u32);

impl TextureId {
    /// Plain white texel, for untextured quads
    pub const SOLID: TextureId = TextureId(0);
}

/// Source rectangle in normalized (0-1) texture space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SrcRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl SrcRect {
    /// The whole texture
    pub const FULL: SrcRect = SrcRect::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Cell `(col, row)` of a sprite sheet laid out as a `cols` x `rows` grid
    pub fn grid_cell(col: u32, row: u32, cols: u32, rows: u32) -> Self {
        let w = 1.0 / cols.max(1) as f32;
        let h = 1.0 / rows.max(1) as f32;
        Self::new(col as f32 * w, row as f32 * h, w, h)
    }
}

impl Default for SrcRect {
    fn default() -> Self {
        Self::FULL
    }
}

/// White, fully opaque
pub const WHITE: Vec4 = Vec4::ONE;

/// One sprite to draw, centered on `pos`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub texture: TextureId,
    pub pos: Vec2,
    pub size: Vec2,
    pub src: SrcRect,
    pub tint: Vec4,
}

impl DrawCommand {
    pub fn new(texture: TextureId, pos: Vec2, size: Vec2) -> Self {
        Self {
            texture,
            pos,
            size,
            src: SrcRect::FULL,
            tint: WHITE,
        }
    }

    pub fn with_src(mut self, src: SrcRect) -> Self {
        self.src = src;
        self
    }

    pub fn with_tint(mut self, tint: Vec4) -> Self {
        self.tint = tint;
        self
    }
}

/// Anything that accepts draw commands. Expected to enqueue, not execute.
pub trait RenderSink {
    fn draw(&mut self, cmd: DrawCommand);
}

/// Default sprite capacity per batch
pub const DEFAULT_MAX_SPRITES: usize = 10_000;

/// Headless sprite batch: collects one frame of draw commands
#[derive(Debug)]
pub struct SpriteBatch {
    commands: Vec<DrawCommand>,
    max_sprites: usize,
    begun: bool,
    dropped: usize,
}

impl Default for SpriteBatch {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SPRITES)
    }
}

impl SpriteBatch {
    pub fn new(max_sprites: usize) -> Self {
        Self {
            commands: Vec::with_capacity(max_sprites.min(1024)),
            max_sprites,
            begun: false,
            dropped: 0,
        }
    }

    /// Start a frame. Discards anything left over from an unfinished frame.
    pub fn begin(&mut self) {
        if self.begun {
            log::warn!("SpriteBatch::begin called twice without end");
        }
        self.commands.clear();
        self.dropped = 0;
        self.begun = true;
    }

    /// Finish the frame and take the queued commands in submission order
    pub fn end(&mut self) -> Vec<DrawCommand> {
        if !self.begun {
            log::warn!("SpriteBatch::end called without begin");
        }
        self.begun = false;
        if self.dropped > 0 {
            log::warn!("SpriteBatch dropped {} sprites over capacity", self.dropped);
        }
        std::mem::take(&mut self.commands)
    }

    pub fn sprite_count(&self) -> usize {
        self.commands.len()
    }
}

impl RenderSink for SpriteBatch {
    fn draw(&mut self, cmd: DrawCommand) {
        if self.commands.len() >= self.max_sprites {
            self.dropped += 1;
            return;
        }
        self.commands.push(cmd);
    }
}
