//! AI-controlled enemy
//!
//! Small state machine: `Idle` until the target comes within detection range,
//! then `Chase` toward it. Damage comes from touching the player, not from a
//! state. `Attack` only parks the enemy for a short wind-up once it is close,
//! after which it resumes chasing.

use glam::{Vec2, Vec4};

use crate::audio::{SoundEffect, SoundSink};
use crate::consts::*;
use crate::render::{DrawCommand, RenderSink, TextureId};
use crate::sim::{
    Animation, AnimationFrame, Animator, Damageable, Entity, EntityCore, EntityId, EntityKind,
    FrameContext, Layer, UpdateContext,
};

const TINT: Vec4 = Vec4::new(0.3, 0.4, 0.9, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    Idle,
    Chase,
    /// Holding still before lunging again
    Attack,
}

pub struct Enemy {
    core: EntityCore,
    texture: TextureId,
    animator: Animator,
    target: Option<EntityId>,
    speed: f32,
    health: i32,
    state: EnemyState,
    state_timer: f32,
    detection_range: f32,
}

impl Enemy {
    pub fn new(pos: Vec2, texture: TextureId) -> Self {
        let core = EntityCore::new(pos, Vec2::splat(ENEMY_SIZE))
            .with_collision(Layer::ENEMY, Layer::PLAYER | Layer::PLAYER_ATTACK);

        let mut animator = Animator::new();
        animator.add_animation("idle", Animation::looping(vec![AnimationFrame::full(0.6); 2]));
        animator.add_animation("chase", Animation::looping(vec![AnimationFrame::full(0.12); 4]));
        animator.play("idle");

        Self {
            core,
            texture,
            animator,
            target: None,
            speed: ENEMY_SPEED,
            health: ENEMY_MAX_HEALTH,
            state: EnemyState::Idle,
            state_timer: 0.0,
            detection_range: ENEMY_DETECTION_RANGE,
        }
    }

    pub fn with_target(mut self, target: impl Into<EntityId>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn set_target(&mut self, target: Option<EntityId>) {
        self.target = target;
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    fn enter(&mut self, state: EnemyState) {
        if self.state != state {
            log::trace!("enemy {:?} -> {:?}", self.state, state);
            self.state = state;
            self.state_timer = 0.0;
        }
    }
}

impl Entity for Enemy {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Enemy
    }

    fn update(&mut self, dt: f32, ctx: &mut UpdateContext<'_, '_>) {
        self.state_timer += dt;

        // Target may have been reaped; fall back to idling
        let target = self
            .target
            .and_then(|id| ctx.get_dyn(id))
            .filter(|e| e.core().is_active())
            .map(|e| e.core().pos);

        match target {
            None => self.enter(EnemyState::Idle),
            Some(target_pos) => {
                let to_target = target_pos - self.core.pos;
                let distance = to_target.length();

                match self.state {
                    EnemyState::Idle => {
                        if distance < self.detection_range {
                            self.enter(EnemyState::Chase);
                        }
                    }
                    EnemyState::Chase => {
                        if distance > 1.0 {
                            self.core.pos += to_target / distance * self.speed * dt;
                        }
                        if distance > self.detection_range * ENEMY_LOSE_FACTOR {
                            self.enter(EnemyState::Idle);
                        } else if distance < ENEMY_ATTACK_RANGE {
                            self.enter(EnemyState::Attack);
                        }
                    }
                    EnemyState::Attack => {
                        if self.state_timer >= ENEMY_ATTACK_WINDUP {
                            self.enter(EnemyState::Chase);
                        }
                    }
                }
            }
        }

        match self.state {
            EnemyState::Idle => self.animator.play("idle"),
            EnemyState::Chase | EnemyState::Attack => self.animator.play("chase"),
        }
        self.animator.update(dt);
    }

    fn render(&self, batch: &mut dyn RenderSink) {
        batch.draw(
            DrawCommand::new(self.texture, self.core.pos, self.core.size)
                .with_src(self.animator.current_frame())
                .with_tint(TINT),
        );
    }

    fn on_collision(&mut self, other: &mut dyn Entity, frame: &mut FrameContext<'_>) {
        if other.kind() != EntityKind::Player {
            return;
        }
        if let Some(player) = other.damageable_mut() {
            player.take_damage(ENEMY_CONTACT_DAMAGE, frame.audio);
        }
    }

    fn damageable_mut(&mut self) -> Option<&mut dyn Damageable> {
        Some(self)
    }
}

impl Damageable for Enemy {
    fn take_damage(&mut self, amount: i32, audio: &mut dyn SoundSink) {
        self.health -= amount;
        audio.play_sound(SoundEffect::Hit, None);

        if self.health <= 0 {
            audio.play_sound(SoundEffect::EnemyDeath, None);
            self.destroy();
        }
    }

    fn health(&self) -> i32 {
        self.health
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundLog;
    use crate::game::Player;
    use crate::input::InputState;
    use crate::sim::{EntityManager, Handle};

    fn step(entities: &mut EntityManager, dt: f32) {
        let input = InputState::new();
        let mut sounds = SoundLog::default();
        let mut frame = FrameContext::new(&input, &mut sounds);
        entities.update(dt, &mut frame);
    }

    fn setup(enemy_at: Vec2) -> (EntityManager, Handle<Player>, Handle<Enemy>) {
        let mut entities = EntityManager::new();
        let player = entities.spawn(Player::new(Vec2::ZERO, TextureId(1)));
        let enemy = entities.spawn(Enemy::new(enemy_at, TextureId(2)).with_target(player));
        (entities, player, enemy)
    }

    #[test]
    fn test_idle_until_in_range() {
        let (mut entities, _player, enemy) = setup(Vec2::new(100.0, 0.0));
        step(&mut entities, 0.016);
        let e = entities.get(enemy).unwrap();
        assert_eq!(e.state(), EnemyState::Idle);
        assert_eq!(e.core().pos, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_chases_when_detected() {
        let (mut entities, _player, enemy) = setup(Vec2::new(60.0, 0.0));
        step(&mut entities, 0.016);
        assert_eq!(entities.get(enemy).unwrap().state(), EnemyState::Chase);

        step(&mut entities, 0.1);
        let x = entities.get(enemy).unwrap().core().pos.x;
        assert!((x - (60.0 - ENEMY_SPEED * 0.1)).abs() < 1e-3);
        assert_eq!(
            entities.get(enemy).unwrap().animator.current_animation(),
            Some("chase")
        );
    }

    #[test]
    fn test_gives_up_when_far() {
        let (mut entities, player, enemy) = setup(Vec2::new(60.0, 0.0));
        step(&mut entities, 0.016);
        assert_eq!(entities.get(enemy).unwrap().state(), EnemyState::Chase);

        entities.get_mut(player).unwrap().core_mut().pos = Vec2::new(-120.0, 0.0);
        step(&mut entities, 0.016);
        assert_eq!(entities.get(enemy).unwrap().state(), EnemyState::Idle);
    }

    #[test]
    fn test_winds_up_when_close() {
        let (mut entities, _player, enemy) = setup(Vec2::new(10.0, 0.0));
        step(&mut entities, 0.016); // Idle -> Chase
        step(&mut entities, 0.016); // Chase -> Attack
        assert_eq!(entities.get(enemy).unwrap().state(), EnemyState::Attack);

        let held = entities.get(enemy).unwrap().core().pos;
        step(&mut entities, 0.1);
        assert_eq!(entities.get(enemy).unwrap().core().pos, held);

        // Wind-up elapsed
        step(&mut entities, 0.35);
        assert_eq!(entities.get(enemy).unwrap().state(), EnemyState::Chase);
    }

    #[test]
    fn test_stale_target_is_tolerated() {
        let (mut entities, player, enemy) = setup(Vec2::new(60.0, 0.0));
        step(&mut entities, 0.016);

        entities.get_mut(player).unwrap().destroy();
        entities.cleanup();
        step(&mut entities, 0.016);

        let e = entities.get(enemy).unwrap();
        assert_eq!(e.state(), EnemyState::Idle);
    }

    #[test]
    fn test_no_target_idles() {
        let mut entities = EntityManager::new();
        let enemy = entities.spawn(Enemy::new(Vec2::ZERO, TextureId(2)));
        step(&mut entities, 0.5);
        assert_eq!(entities.get(enemy).unwrap().state(), EnemyState::Idle);
    }

    #[test]
    fn test_dies_after_three_hits() {
        let mut enemy = Enemy::new(Vec2::ZERO, TextureId(2));
        let mut sounds = SoundLog::default();
        enemy.take_damage(1, &mut sounds);
        enemy.take_damage(1, &mut sounds);
        assert!(!enemy.core().is_pending_destroy());
        enemy.take_damage(1, &mut sounds);
        assert!(enemy.core().is_pending_destroy());
        assert_eq!(sounds.count(SoundEffect::Hit), 3);
        assert_eq!(sounds.count(SoundEffect::EnemyDeath), 1);
    }
}
