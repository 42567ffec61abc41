//! One simulation step
//!
//! Phases run strictly in order: update, collisions, cleanup. Rendering is a
//! separate read-only pass over whatever survived.

use super::collision::CollisionSystem;
use super::context::FrameContext;
use super::manager::EntityManager;
use crate::consts::MAX_FRAME_DT;

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Overlapping pairs dispatched by the collision pass
    pub contacts: usize,
    /// Entities reaped by cleanup
    pub removed: usize,
}

/// Advance the world by `dt` seconds
pub fn tick(
    entities: &mut EntityManager,
    collisions: &CollisionSystem,
    dt: f32,
    frame: &mut FrameContext<'_>,
) -> TickReport {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);

    entities.update(dt, frame);
    let contacts = collisions.check_collisions(entities, frame);
    let removed = entities.cleanup();

    TickReport { contacts, removed }
}
