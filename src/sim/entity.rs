//! The entity contract
//!
//! Every actor carries an `EntityCore` (transform, velocity, collision
//! filter, lifecycle flags) and implements `Entity` for its behavior.
//! Cross-type interaction goes through `kind()` and capability accessors
//! such as `damageable_mut()` rather than concrete type checks.

use std::any::Any;

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::context::{FrameContext, UpdateContext};
use crate::audio::SoundSink;
use crate::render::RenderSink;

bitflags! {
    /// Collision categories. An entity sits on one layer and lists the layers
    /// it reacts to in its mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Layer: u32 {
        const PLAYER = 1;
        const ENEMY = 2;
        const PLAYER_ATTACK = 4;
        const ENEMY_ATTACK = 8;
    }
}

/// Which concrete behavior an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Enemy,
    PlayerAttack,
    Paddle,
    Ball,
    /// Anything defined outside this crate
    Custom,
}

/// State shared by every entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCore {
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub layer: Layer,
    pub mask: Layer,
    active: bool,
    pending_destroy: bool,
}

impl Default for EntityCore {
    fn default() -> Self {
        Self::new(Vec2::ZERO, Vec2::splat(16.0))
    }
}

impl EntityCore {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            layer: Layer::empty(),
            mask: Layer::empty(),
            active: true,
            pending_destroy: false,
        }
    }

    pub fn with_collision(mut self, layer: Layer, mask: Layer) -> Self {
        self.layer = layer;
        self.mask = mask;
        self
    }

    /// Hitbox always matches the render size
    pub fn hitbox(&self) -> Aabb {
        Aabb::from_center_size(self.pos, self.size)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Flag for removal at the next cleanup. The entity stays in place and
    /// keeps taking part in the current frame.
    pub fn destroy(&mut self) {
        self.pending_destroy = true;
    }

    pub fn is_pending_destroy(&self) -> bool {
        self.pending_destroy
    }
}

/// Something that can be hurt
pub trait Damageable {
    fn take_damage(&mut self, amount: i32, audio: &mut dyn SoundSink);
    fn health(&self) -> i32;
}

/// Upcast helper so entities can be resolved back to their concrete type
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub trait Entity: AsAny {
    fn core(&self) -> &EntityCore;
    fn core_mut(&mut self) -> &mut EntityCore;

    fn kind(&self) -> EntityKind;

    /// Advance this entity by `dt` seconds
    fn update(&mut self, dt: f32, ctx: &mut UpdateContext<'_, '_>);

    /// Submit draw commands. Must not change simulation state.
    fn render(&self, batch: &mut dyn RenderSink);

    /// Called once per overlapping, filter-passing pair per collision pass
    fn on_collision(&mut self, _other: &mut dyn Entity, _frame: &mut FrameContext<'_>) {}

    fn damageable_mut(&mut self) -> Option<&mut dyn Damageable> {
        None
    }

    fn set_active(&mut self, active: bool) {
        self.core_mut().set_active(active);
    }

    fn destroy(&mut self) {
        self.core_mut().destroy();
    }
}
