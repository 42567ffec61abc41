//! Simulation core
//!
//! Entity storage and dispatch, layered AABB collisions and sprite animation.
//! Nothing here touches a device: rendering, audio and input are reached
//! through the traits in `render`, `audio` and `input`.
//!
//! Per-frame order is fixed: update, collisions, cleanup, then render.

pub mod aabb;
pub mod animation;
pub mod collision;
pub mod context;
pub mod entity;
pub mod manager;
pub mod tick;

pub use aabb::Aabb;
pub use animation::{Animation, AnimationFrame, Animator};
pub use collision::{CollisionSystem, should_collide};
pub use context::{FrameContext, UpdateContext};
pub use entity::{Damageable, Entity, EntityCore, EntityKind, Layer};
pub use manager::{EntityId, EntityManager, Handle};
pub use tick::{TickReport, tick};
