//! Top-down arena: one player against a handful of chasing enemies

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::enemy::Enemy;
use super::player::Player;
use super::Scene;
use crate::consts::*;
use crate::render::{RenderSink, TextureId};
use crate::sim::{CollisionSystem, EntityManager, FrameContext, Handle, TickReport, tick};

const PLAYER_TEXTURE: TextureId = TextureId(1);
const ENEMY_TEXTURE: TextureId = TextureId(2);

/// Enemies spawn on a ring around the player, outside detection range so the
/// opening frames are quiet
const SPAWN_RADIUS_MIN: f32 = 85.0;
const SPAWN_RADIUS_MAX: f32 = 110.0;

pub struct ArenaScene {
    entities: EntityManager,
    collisions: CollisionSystem,
    player: Handle<Player>,
    enemies: Vec<Handle<Enemy>>,
}

impl ArenaScene {
    pub fn new(enemy_count: u32, seed: u64) -> Self {
        let mut entities = EntityManager::new();
        let mut rng = Pcg32::seed_from_u64(seed);

        let player = entities.spawn(Player::new(Vec2::ZERO, PLAYER_TEXTURE));

        let enemies = (0..enemy_count)
            .map(|_| {
                let angle = rng.random_range(0.0..TAU);
                let radius = rng.random_range(SPAWN_RADIUS_MIN..SPAWN_RADIUS_MAX);
                let pos = Vec2::from_angle(angle) * radius;
                let pos = pos.clamp(
                    Vec2::new(-PLAYER_BOUND_X, -PLAYER_BOUND_Y),
                    Vec2::new(PLAYER_BOUND_X, PLAYER_BOUND_Y),
                );
                entities.spawn(Enemy::new(pos, ENEMY_TEXTURE).with_target(player))
            })
            .collect();

        log::info!("Arena ready with {} enemies", enemy_count);

        Self {
            entities,
            collisions: CollisionSystem::new(),
            player,
            enemies,
        }
    }

    /// `None` once the player has been reaped
    pub fn player(&self) -> Option<&Player> {
        self.entities.get(self.player)
    }

    pub fn player_handle(&self) -> Handle<Player> {
        self.player
    }

    pub fn enemies_alive(&self) -> usize {
        self.enemies
            .iter()
            .filter(|h| self.entities.get(**h).is_some())
            .count()
    }

    pub fn enemy(&self, index: usize) -> Option<&Enemy> {
        self.enemies.get(index).and_then(|h| self.entities.get(*h))
    }

    pub fn entities(&self) -> &EntityManager {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityManager {
        &mut self.entities
    }
}

impl Scene for ArenaScene {
    fn name(&self) -> &'static str {
        "arena"
    }

    fn step(&mut self, dt: f32, frame: &mut FrameContext<'_>) -> TickReport {
        let before = self.enemies_alive();
        let report = tick(&mut self.entities, &self.collisions, dt, frame);

        if report.removed > 0 {
            let after = self.enemies_alive();
            if after < before {
                log::info!("{} enemies left", after);
            }
            if self.is_over() {
                log::info!("Player down");
            }
        }
        report
    }

    fn render(&self, batch: &mut dyn RenderSink) {
        self.entities.render(batch);
    }

    fn is_over(&self) -> bool {
        self.player().is_none()
    }
}
