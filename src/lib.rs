//! Eightbit Engine - a tiny retro simulation core
//!
//! Core modules:
//! - `sim`: Entity lifecycle, layered AABB collisions, sprite animation
//! - `game`: Concrete actors (player, enemies, pong pieces) and scenes
//! - `audio`, `render`, `input`, `timer`: Collaborator contracts the core
//!   talks to, with headless implementations
//! - `settings`: JSON configuration

pub mod audio;
pub mod game;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;
pub mod timer;

pub use settings::{SceneKind, Settings};

/// Game configuration constants
pub mod consts {
    /// Upper bound on a single frame's delta time (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Default target frame rate
    pub const TARGET_FPS: u32 = 60;

    /// NES-style playfield, centered on the origin
    pub const SCREEN_HALF_WIDTH: f32 = 128.0;
    pub const SCREEN_HALF_HEIGHT: f32 = 120.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_SPEED: f32 = 100.0;
    pub const PLAYER_MAX_HEALTH: i32 = 3;
    pub const PLAYER_BOUND_X: f32 = 120.0;
    pub const PLAYER_BOUND_Y: f32 = 110.0;
    /// Invincibility window after taking a hit (seconds)
    pub const PLAYER_INVINCIBLE_SECS: f32 = 1.0;

    /// Attack hitbox spawned by the player
    pub const ATTACK_SIZE: f32 = 24.0;
    pub const ATTACK_REACH: f32 = 20.0;
    pub const ATTACK_LIFETIME: f32 = 0.15;
    pub const ATTACK_DAMAGE: i32 = 1;

    /// Enemy defaults - slower than the player
    pub const ENEMY_SIZE: f32 = 24.0;
    pub const ENEMY_SPEED: f32 = 40.0;
    pub const ENEMY_MAX_HEALTH: i32 = 3;
    pub const ENEMY_DETECTION_RANGE: f32 = 80.0;
    /// Chase is abandoned beyond detection range times this factor
    pub const ENEMY_LOSE_FACTOR: f32 = 1.5;
    pub const ENEMY_ATTACK_RANGE: f32 = 16.0;
    pub const ENEMY_ATTACK_WINDUP: f32 = 0.4;
    pub const ENEMY_CONTACT_DAMAGE: i32 = 1;

    /// Pong pieces
    pub const PADDLE_WIDTH: f32 = 8.0;
    pub const PADDLE_HEIGHT: f32 = 40.0;
    pub const PADDLE_SPEED: f32 = 120.0;
    pub const PADDLE_X: f32 = 110.0;
    /// Proportional gain of the AI paddle controller
    pub const PADDLE_AI_GAIN: f32 = 4.0;

    pub const BALL_SIZE: f32 = 6.0;
    pub const BALL_BASE_SPEED: f32 = 150.0;
    /// Multiplicative speed-up per paddle hit
    pub const BALL_PADDLE_BOOST: f32 = 1.05;
    /// Ball stops speeding up past base speed times this cap
    pub const BALL_SPEED_CAP: f32 = 1.5;
    /// Vertical "english" per unit of off-center paddle contact
    pub const BALL_ENGLISH: f32 = 2.0;
}
