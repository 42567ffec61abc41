//! Two-paddle pong: keyboard on the left, AI on the right

use super::ball::Ball;
use super::paddle::{Paddle, PaddleControl, Side};
use super::Scene;
use crate::audio::SoundEffect;
use crate::consts::PADDLE_X;
use crate::render::RenderSink;
use crate::sim::{CollisionSystem, EntityManager, FrameContext, Handle, TickReport, tick};

pub struct PongScene {
    entities: EntityManager,
    collisions: CollisionSystem,
    left: Handle<Paddle>,
    right: Handle<Paddle>,
    ball: Handle<Ball>,
    score: [u32; 2],
}

impl PongScene {
    pub fn new(seed: u64) -> Self {
        let mut entities = EntityManager::new();

        let left = entities.spawn(Paddle::new(-PADDLE_X, PaddleControl::Player));
        let right = entities.spawn(Paddle::new(PADDLE_X, PaddleControl::Ai { target: None }));
        let ball = entities.spawn(Ball::new(seed));

        if let Some(b) = entities.get_mut(ball) {
            b.set_paddles(left, right);
        }
        if let Some(p) = entities.get_mut(right) {
            p.set_ai_target(ball);
        }

        log::info!("Pong ready");

        Self {
            entities,
            collisions: CollisionSystem::new(),
            left,
            right,
            ball,
            score: [0, 0],
        }
    }

    /// `[left, right]`
    pub fn score(&self) -> [u32; 2] {
        self.score
    }

    pub fn ball(&self) -> Option<&Ball> {
        self.entities.get(self.ball)
    }

    pub fn ball_mut(&mut self) -> Option<&mut Ball> {
        self.entities.get_mut(self.ball)
    }

    pub fn paddle(&self, side: Side) -> Option<&Paddle> {
        match side {
            Side::Left => self.entities.get(self.left),
            Side::Right => self.entities.get(self.right),
        }
    }

    pub fn entities(&self) -> &EntityManager {
        &self.entities
    }
}

impl Scene for PongScene {
    fn name(&self) -> &'static str {
        "pong"
    }

    fn step(&mut self, dt: f32, frame: &mut FrameContext<'_>) -> TickReport {
        let report = tick(&mut self.entities, &self.collisions, dt, frame);

        let Some(ball) = self.entities.get_mut(self.ball) else {
            return report;
        };
        if let Some(side) = ball.scoring_side() {
            let idx = match side {
                Side::Left => 0,
                Side::Right => 1,
            };
            self.score[idx] += 1;
            ball.reset();
            frame.play_sound(SoundEffect::Score);
            log::info!("Point {:?}: {} - {}", side, self.score[0], self.score[1]);
        }
        report
    }

    fn render(&self, batch: &mut dyn RenderSink) {
        self.entities.render(batch);
    }

    /// Pong runs until the caller stops it
    fn is_over(&self) -> bool {
        false
    }
}
