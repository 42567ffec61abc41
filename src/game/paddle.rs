//! Pong paddle, driven by the keyboard or by a simple tracking AI

use glam::Vec2;

use super::ball::Ball;
use crate::consts::*;
use crate::input::Key;
use crate::render::{DrawCommand, RenderSink, TextureId};
use crate::sim::{Entity, EntityCore, EntityKind, Handle, Layer, UpdateContext};

/// Court side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaddleControl {
    /// Up/Down keys
    Player,
    /// Follows the ball's height
    Ai { target: Option<Handle<Ball>> },
}

pub struct Paddle {
    core: EntityCore,
    control: PaddleControl,
    speed: f32,
}

impl Paddle {
    pub fn new(x: f32, control: PaddleControl) -> Self {
        Self {
            // Paddles never react to collisions; the ball resolves its own bounces
            core: EntityCore::new(Vec2::new(x, 0.0), Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT))
                .with_collision(Layer::PLAYER, Layer::empty()),
            control,
            speed: PADDLE_SPEED,
        }
    }

    pub fn set_ai_target(&mut self, ball: Handle<Ball>) {
        self.control = PaddleControl::Ai { target: Some(ball) };
    }

    pub fn control(&self) -> PaddleControl {
        self.control
    }

    pub fn side(&self) -> Side {
        if self.core.pos.x < 0.0 { Side::Left } else { Side::Right }
    }
}

impl Entity for Paddle {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Paddle
    }

    fn update(&mut self, dt: f32, ctx: &mut UpdateContext<'_, '_>) {
        match self.control {
            PaddleControl::Player => {
                let input = ctx.input();
                if input.is_down(Key::Up) {
                    self.core.pos.y += self.speed * dt;
                }
                if input.is_down(Key::Down) {
                    self.core.pos.y -= self.speed * dt;
                }
            }
            PaddleControl::Ai { target } => {
                if let Some(ball) = target.and_then(|h| ctx.get(h)) {
                    // Proportional controller, capped at paddle speed
                    let diff = ball.core().pos.y - self.core.pos.y;
                    let ai_speed = (diff * PADDLE_AI_GAIN).clamp(-self.speed, self.speed);
                    self.core.pos.y += ai_speed * dt;
                }
            }
        }

        let half = self.core.size.y * 0.5;
        self.core.pos.y = self
            .core
            .pos
            .y
            .clamp(-SCREEN_HALF_HEIGHT + half, SCREEN_HALF_HEIGHT - half);
    }

    fn render(&self, batch: &mut dyn RenderSink) {
        batch.draw(DrawCommand::new(TextureId::SOLID, self.core.pos, self.core.size));
    }
}
