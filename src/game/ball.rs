//! Pong ball
//!
//! Moves in a straight line, bounces off the top and bottom of the court and
//! resolves its own paddle hits against the paddles it was given.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::paddle::{Paddle, Side};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::render::{DrawCommand, RenderSink, TextureId};
use crate::sim::{Aabb, Entity, EntityCore, EntityKind, Handle, UpdateContext};

pub struct Ball {
    core: EntityCore,
    base_speed: f32,
    rng: Pcg32,
    paddles: Vec<Handle<Paddle>>,
}

impl Ball {
    /// Serves immediately from the center
    pub fn new(seed: u64) -> Self {
        let mut ball = Self {
            core: EntityCore::new(Vec2::ZERO, Vec2::splat(BALL_SIZE)),
            base_speed: BALL_BASE_SPEED,
            rng: Pcg32::seed_from_u64(seed),
            paddles: Vec::new(),
        };
        ball.reset();
        ball
    }

    pub fn set_paddles(&mut self, left: Handle<Paddle>, right: Handle<Paddle>) {
        self.paddles = vec![left, right];
    }

    /// Back to the center, served at a random angle within 45° of horizontal
    /// toward a random side
    pub fn reset(&mut self) {
        self.core.pos = Vec2::ZERO;

        let degrees = self.rng.random_range(0..90) - 45;
        let angle = (degrees as f32).to_radians();
        let direction = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };

        self.core.vel = Vec2::new(
            angle.cos() * self.base_speed * direction,
            angle.sin() * self.base_speed,
        );
    }

    /// Side that wins the point if the ball has left the court
    pub fn scoring_side(&self) -> Option<Side> {
        if self.core.pos.x < -SCREEN_HALF_WIDTH {
            Some(Side::Right)
        } else if self.core.pos.x > SCREEN_HALF_WIDTH {
            Some(Side::Left)
        } else {
            None
        }
    }

    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    fn bounce_walls(&mut self) -> bool {
        let half = self.core.size.y * 0.5;
        if self.core.pos.y + half > SCREEN_HALF_HEIGHT {
            self.core.pos.y = SCREEN_HALF_HEIGHT - half;
            self.core.vel.y = -self.core.vel.y;
            true
        } else if self.core.pos.y - half < -SCREEN_HALF_HEIGHT {
            self.core.pos.y = -SCREEN_HALF_HEIGHT + half;
            self.core.vel.y = -self.core.vel.y;
            true
        } else {
            false
        }
    }

    /// Paddle contact. Reflects and snaps outside only when heading toward
    /// the paddle; english and speed-up apply on every overlapping frame.
    fn bounce_paddle(&mut self, paddle: Aabb) -> bool {
        if !self.core.hitbox().overlaps(&paddle) {
            return false;
        }

        let half_w = self.core.size.x * 0.5;
        let paddle_x = paddle.center.x;
        if self.core.vel.x < 0.0 && paddle_x < 0.0 {
            self.core.vel.x = -self.core.vel.x;
            self.core.pos.x = paddle_x + paddle.half_extents.x + half_w;
        } else if self.core.vel.x > 0.0 && paddle_x > 0.0 {
            self.core.vel.x = -self.core.vel.x;
            self.core.pos.x = paddle_x - paddle.half_extents.x - half_w;
        }

        // English from where it struck the paddle
        let hit_offset = self.core.pos.y - paddle.center.y;
        self.core.vel.y += hit_offset * BALL_ENGLISH;

        if self.core.vel.length() < self.base_speed * BALL_SPEED_CAP {
            self.core.vel *= BALL_PADDLE_BOOST;
        }
        true
    }
}

impl Entity for Ball {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Ball
    }

    fn update(&mut self, dt: f32, ctx: &mut UpdateContext<'_, '_>) {
        self.core.pos += self.core.vel * dt;

        if self.bounce_walls() {
            ctx.play_sound(SoundEffect::WallBounce);
        }

        for handle in self.paddles.clone() {
            let Some(paddle) = ctx.get(handle).map(|p| p.core().hitbox()) else {
                continue;
            };
            if self.bounce_paddle(paddle) {
                ctx.play_sound(SoundEffect::PaddleHit);
            }
        }
    }

    fn render(&self, batch: &mut dyn RenderSink) {
        batch.draw(DrawCommand::new(TextureId::SOLID, self.core.pos, self.core.size));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundLog;
    use crate::game::PaddleControl;
    use crate::input::InputState;
    use crate::sim::{EntityManager, FrameContext};

    fn step(entities: &mut EntityManager, sounds: &mut SoundLog, dt: f32) {
        let input = InputState::new();
        let mut frame = FrameContext::new(&input, sounds);
        entities.update(dt, &mut frame);
    }

    #[test]
    fn test_serve_within_45_degrees() {
        for seed in 0..32 {
            let ball = Ball::new(seed);
            let vel = ball.core().vel;
            assert!((vel.length() - BALL_BASE_SPEED).abs() < 1e-2);
            assert!(vel.y.abs() <= vel.x.abs() + 1e-3);
            assert_eq!(ball.core().pos, Vec2::ZERO);
        }
    }

    #[test]
    fn test_same_seed_same_serve() {
        assert_eq!(Ball::new(42).core().vel, Ball::new(42).core().vel);
    }

    #[test]
    fn test_wall_bounce() {
        let mut entities = EntityManager::new();
        let ball = entities.spawn(Ball::new(3));
        {
            let core = entities.get_mut(ball).unwrap().core_mut();
            core.pos = Vec2::new(0.0, 115.0);
            core.vel = Vec2::new(0.0, 100.0);
        }
        let mut sounds = SoundLog::default();
        step(&mut entities, &mut sounds, 0.1);

        let core = entities.get(ball).unwrap().core();
        assert_eq!(core.pos.y, SCREEN_HALF_HEIGHT - BALL_SIZE * 0.5);
        assert!(core.vel.y < 0.0);
        assert_eq!(sounds.count(SoundEffect::WallBounce), 1);
    }

    #[test]
    fn test_paddle_bounce_speeds_up() {
        let mut entities = EntityManager::new();
        let left = entities.spawn(Paddle::new(-PADDLE_X, PaddleControl::Player));
        let right = entities.spawn(Paddle::new(PADDLE_X, PaddleControl::Player));
        let ball = entities.spawn(Ball::new(5));
        {
            let b = entities.get_mut(ball).unwrap();
            b.set_paddles(left, right);
            b.core_mut().pos = Vec2::new(-PADDLE_X + 5.0, 0.0);
            b.core_mut().vel = Vec2::new(-100.0, 0.0);
        }

        let mut sounds = SoundLog::default();
        step(&mut entities, &mut sounds, 0.01);

        let core = entities.get(ball).unwrap().core();
        assert!((core.vel.x - 105.0).abs() < 1e-3);
        assert_eq!(
            core.pos.x,
            -PADDLE_X + PADDLE_WIDTH * 0.5 + BALL_SIZE * 0.5
        );
        assert_eq!(sounds.count(SoundEffect::PaddleHit), 1);
    }

    #[test]
    fn test_overlap_moving_away_keeps_direction_but_adds_english() {
        let mut entities = EntityManager::new();
        let left = entities.spawn(Paddle::new(-PADDLE_X, PaddleControl::Player));
        let right = entities.spawn(Paddle::new(PADDLE_X, PaddleControl::Player));
        let ball = entities.spawn(Ball::new(5));
        {
            let b = entities.get_mut(ball).unwrap();
            b.set_paddles(left, right);
            b.core_mut().pos = Vec2::new(-108.0, 10.0);
            b.core_mut().vel = Vec2::new(100.0, 0.0);
        }

        let mut sounds = SoundLog::default();
        step(&mut entities, &mut sounds, 0.01);

        // No flip or snap, but offset 10 * 2 of english and the 5% boost
        let core = entities.get(ball).unwrap().core();
        assert!((core.pos.x - -107.0).abs() < 1e-4);
        assert!((core.vel.x - 105.0).abs() < 1e-3);
        assert!((core.vel.y - 21.0).abs() < 1e-3);
        assert_eq!(sounds.count(SoundEffect::PaddleHit), 1);
    }

    #[test]
    fn test_scoring_side() {
        let mut ball = Ball::new(1);
        assert_eq!(ball.scoring_side(), None);
        ball.core_mut().pos.x = -130.0;
        assert_eq!(ball.scoring_side(), Some(Side::Right));
        ball.core_mut().pos.x = 130.0;
        assert_eq!(ball.scoring_side(), Some(Side::Left));
    }
}
