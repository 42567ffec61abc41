//! Player-controlled hero
//!
//! Moves with the arrow keys inside the screen, swings a short-lived attack
//! hitbox on the attack key, and blinks through a second of invincibility
//! after being hurt.

use glam::{Vec2, Vec4};

use super::attack::PlayerAttack;
use crate::audio::{SoundEffect, SoundSink};
use crate::consts::*;
use crate::input::Key;
use crate::render::{DrawCommand, RenderSink, TextureId};
use crate::sim::{
    Animation, AnimationFrame, Animator, Damageable, Entity, EntityCore, EntityKind, Layer,
    UpdateContext,
};

const TINT: Vec4 = Vec4::new(0.2, 0.9, 0.3, 1.0);

pub struct Player {
    core: EntityCore,
    texture: TextureId,
    animator: Animator,
    speed: f32,
    health: i32,
    invincible_timer: f32,
    attacking: bool,
    attack_timer: f32,
    facing_right: bool,
}

impl Player {
    pub fn new(pos: Vec2, texture: TextureId) -> Self {
        let core = EntityCore::new(pos, Vec2::splat(PLAYER_SIZE))
            .with_collision(Layer::PLAYER, Layer::ENEMY | Layer::ENEMY_ATTACK);

        let mut animator = Animator::new();
        // Single-sprite art for now: every frame shows the whole texture
        animator.add_animation("idle", Animation::looping(vec![AnimationFrame::full(0.5); 2]));
        animator.add_animation("walk", Animation::looping(vec![AnimationFrame::full(0.1); 4]));
        animator.add_animation(
            "attack",
            Animation::once(vec![
                AnimationFrame::full(0.05), // wind up
                AnimationFrame::full(0.1),  // strike
                AnimationFrame::full(0.05), // recover
            ]),
        );
        animator.play("idle");

        Self {
            core,
            texture,
            animator,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            invincible_timer: 0.0,
            attacking: false,
            attack_timer: 0.0,
            facing_right: true,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Whether the blink cycle hides the sprite this frame
    fn flicker_hidden(&self) -> bool {
        self.is_invincible() && ((self.invincible_timer * 10.0) as i32) % 2 == 0
    }
}

impl Entity for Player {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn update(&mut self, dt: f32, ctx: &mut UpdateContext<'_, '_>) {
        if self.invincible_timer > 0.0 {
            self.invincible_timer -= dt;
        }

        let input = ctx.input();
        let mut vel = Vec2::ZERO;
        if input.is_down(Key::Left) {
            vel.x = -self.speed;
            self.facing_right = false;
        }
        if input.is_down(Key::Right) {
            vel.x = self.speed;
            self.facing_right = true;
        }
        if input.is_down(Key::Up) {
            vel.y = self.speed;
        }
        if input.is_down(Key::Down) {
            vel.y = -self.speed;
        }
        let swing = input.is_pressed(Key::Attack);

        self.core.vel = vel;
        self.core.pos += vel * dt;
        self.core.pos = self.core.pos.clamp(
            Vec2::new(-PLAYER_BOUND_X, -PLAYER_BOUND_Y),
            Vec2::new(PLAYER_BOUND_X, PLAYER_BOUND_Y),
        );

        if swing && !self.attacking {
            self.attacking = true;
            self.attack_timer = ATTACK_LIFETIME;
            ctx.play_sound(SoundEffect::Attack);

            let reach = if self.facing_right { ATTACK_REACH } else { -ATTACK_REACH };
            let spot = self.core.pos + Vec2::new(reach, 0.0);
            ctx.spawn(PlayerAttack::new(spot, ATTACK_LIFETIME, ATTACK_DAMAGE));
        }

        if self.attacking {
            self.attack_timer -= dt;
            if self.attack_timer <= 0.0 {
                self.attacking = false;
            }
        }

        if self.attacking {
            self.animator.play("attack");
        } else if vel.x.abs() > 0.1 || vel.y.abs() > 0.1 {
            self.animator.play("walk");
        } else {
            self.animator.play("idle");
        }
        self.animator.update(dt);
    }

    fn render(&self, batch: &mut dyn RenderSink) {
        if self.flicker_hidden() {
            return;
        }
        batch.draw(
            DrawCommand::new(self.texture, self.core.pos, self.core.size)
                .with_src(self.animator.current_frame())
                .with_tint(TINT),
        );
    }

    fn damageable_mut(&mut self) -> Option<&mut dyn Damageable> {
        Some(self)
    }
}

impl Damageable for Player {
    fn take_damage(&mut self, amount: i32, audio: &mut dyn SoundSink) {
        if self.is_invincible() {
            return;
        }

        self.health -= amount;
        self.invincible_timer = PLAYER_INVINCIBLE_SECS;
        audio.play_sound(SoundEffect::PlayerHurt, None);

        if self.health <= 0 {
            log::info!("player defeated");
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
    use crate::input::InputState;
    use crate::render::SpriteBatch;
    use crate::sim::{EntityManager, FrameContext};

    fn step(entities: &mut EntityManager, input: &InputState, sounds: &mut SoundLog, dt: f32) {
        let mut frame = FrameContext::new(input, sounds);
        entities.update(dt, &mut frame);
    }

    #[test]
    fn test_moves_and_clamps() {
        let mut entities = EntityManager::new();
        let player = entities.spawn(Player::new(Vec2::new(115.0, 0.0), TextureId(1)));
        let mut input = InputState::new();
        let mut sounds = SoundLog::default();

        input.set_key(Key::Right, true);
        input.set_key(Key::Up, true);
        step(&mut entities, &input, &mut sounds, 0.1);

        let p = entities.get(player).unwrap();
        assert_eq!(p.core().pos.x, PLAYER_BOUND_X);
        assert!((p.core().pos.y - 10.0).abs() < 1e-4);
        assert_eq!(p.animator().current_animation(), Some("walk"));
    }

    #[test]
    fn test_attack_spawns_hitbox_in_front() {
        let mut entities = EntityManager::new();
        let player = entities.spawn(Player::new(Vec2::ZERO, TextureId(1)));
        let mut input = InputState::new();
        let mut sounds = SoundLog::default();

        input.begin_frame();
        input.set_key(Key::Left, true);
        input.set_key(Key::Attack, true);
        step(&mut entities, &input, &mut sounds, 0.016);

        assert_eq!(entities.count(), 2);
        assert_eq!(sounds.count(SoundEffect::Attack), 1);
        let attack_id = entities.ids().nth(1).unwrap();
        let attack = entities.get_dyn(attack_id).unwrap();
        assert_eq!(attack.kind(), EntityKind::PlayerAttack);
        let player_x = entities.get(player).unwrap().core().pos.x;
        assert!((attack.core().pos.x - (player_x - ATTACK_REACH)).abs() < 1e-4);
        assert!(entities.get(player).unwrap().is_attacking());

        // Holding the key does not swing again
        input.begin_frame();
        step(&mut entities, &input, &mut sounds, 0.016);
        assert_eq!(sounds.count(SoundEffect::Attack), 1);
    }

    #[test]
    fn test_damage_grants_invincibility() {
        let mut player = Player::new(Vec2::ZERO, TextureId(1));
        let mut sounds = SoundLog::default();

        player.take_damage(1, &mut sounds);
        assert_eq!(player.health(), PLAYER_MAX_HEALTH - 1);
        assert!(player.is_invincible());

        // Ignored while invincible
        player.take_damage(1, &mut sounds);
        assert_eq!(player.health(), PLAYER_MAX_HEALTH - 1);
        assert_eq!(sounds.count(SoundEffect::PlayerHurt), 1);
    }

    #[test]
    fn test_dies_at_zero_health() {
        let mut player = Player::new(Vec2::ZERO, TextureId(1));
        let mut sounds = SoundLog::default();
        for _ in 0..PLAYER_MAX_HEALTH {
            player.invincible_timer = 0.0;
            player.take_damage(1, &mut sounds);
        }
        assert!(player.core().is_pending_destroy());
    }

    #[test]
    fn test_flicker_only_hides_draw() {
        let mut player = Player::new(Vec2::ZERO, TextureId(1));
        let mut batch = SpriteBatch::default();

        batch.begin();
        player.render(&mut batch);
        assert_eq!(batch.end().len(), 1);

        // 0.95 s left -> frame 9 -> visible; 0.85 s left -> frame 8 -> hidden
        player.invincible_timer = 0.95;
        batch.begin();
        player.render(&mut batch);
        assert_eq!(batch.end().len(), 1);

        player.invincible_timer = 0.85;
        let before = player.core().clone();
        batch.begin();
        player.render(&mut batch);
        assert_eq!(batch.end().len(), 0);
        assert_eq!(player.core(), &before);
    }
}
