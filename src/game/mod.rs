//! Concrete actors and the scenes that wire them together

pub mod arena;
pub mod attack;
pub mod ball;
pub mod enemy;
pub mod paddle;
pub mod player;
pub mod pong;

pub use arena::ArenaScene;
pub use attack::PlayerAttack;
pub use ball::Ball;
pub use enemy::{Enemy, EnemyState};
pub use paddle::{Paddle, PaddleControl, Side};
pub use player::Player;
pub use pong::PongScene;

use crate::render::RenderSink;
use crate::settings::{SceneKind, Settings};
use crate::sim::{FrameContext, TickReport};

/// A self-contained playable setup driven one frame at a time
pub trait Scene {
    fn name(&self) -> &'static str;

    /// Advance one frame: update, collisions, cleanup, then scene rules
    fn step(&mut self, dt: f32, frame: &mut FrameContext<'_>) -> TickReport;

    fn render(&self, batch: &mut dyn RenderSink);

    fn is_over(&self) -> bool;
}

/// Build the scene selected in `settings`
pub fn build_scene(settings: &Settings) -> Box<dyn Scene> {
    match settings.scene {
        SceneKind::Arena => Box::new(ArenaScene::new(settings.enemy_count, settings.seed)),
        SceneKind::Pong => Box::new(PongScene::new(settings.seed)),
    }
}
