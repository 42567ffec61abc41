//! Short-lived hitbox spawned by a player swing

use glam::Vec2;

use crate::consts::ATTACK_SIZE;
use crate::render::RenderSink;
use crate::sim::{Entity, EntityCore, EntityKind, FrameContext, Layer, UpdateContext};

pub struct PlayerAttack {
    core: EntityCore,
    lifetime: f32,
    pub damage: i32,
}

impl PlayerAttack {
    pub fn new(pos: Vec2, lifetime: f32, damage: i32) -> Self {
        Self {
            core: EntityCore::new(pos, Vec2::splat(ATTACK_SIZE))
                .with_collision(Layer::PLAYER_ATTACK, Layer::ENEMY),
            lifetime,
            damage,
        }
    }

    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }
}

impl Entity for PlayerAttack {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn kind(&self) -> EntityKind {
        EntityKind::PlayerAttack
    }

    fn update(&mut self, dt: f32, _ctx: &mut UpdateContext<'_, '_>) {
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            self.destroy();
        }
    }

    /// Invisible
    fn render(&self, _batch: &mut dyn RenderSink) {}

    fn on_collision(&mut self, other: &mut dyn Entity, frame: &mut FrameContext<'_>) {
        if other.kind() != EntityKind::Enemy {
            return;
        }
        if let Some(target) = other.damageable_mut() {
            target.take_damage(self.damage, frame.audio);
            self.destroy();
        }
    }
}
