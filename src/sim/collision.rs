//! Pairwise collision detection with layer/mask filtering
//!
//! Brute force over every pair: O(n²). Fine for the few dozen actors a scene
//! holds; anything bigger needs a broad phase first.

use super::context::FrameContext;
use super::entity::EntityCore;
use super::manager::{EntityId, EntityManager};

/// Whether a pair is eligible for the overlap test: both active, and at least
/// one of them lists the other's layer in its mask.
#[inline]
pub fn should_collide(a: &EntityCore, b: &EntityCore) -> bool {
    a.is_active()
        && b.is_active()
        && (a.layer.intersects(b.mask) || b.layer.intersects(a.mask))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionSystem;

impl CollisionSystem {
    pub fn new() -> Self {
        Self
    }

    /// Test every pair `(i, j)` with `i < j` in insertion order and fire
    /// `a.on_collision(b)` then `b.on_collision(a)` for each overlap.
    ///
    /// Returns the number of overlapping pairs dispatched.
    pub fn check_collisions(
        &self,
        entities: &mut EntityManager,
        frame: &mut FrameContext<'_>,
    ) -> usize {
        let ids: Vec<EntityId> = entities.ids().collect();
        let mut contacts = 0;

        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                let (Some(a), Some(b)) = (entities.get_dyn(ids[i]), entities.get_dyn(ids[j]))
                else {
                    continue;
                };
                if !should_collide(a.core(), b.core()) {
                    continue;
                }
                if !a.core().hitbox().overlaps(&b.core().hitbox()) {
                    continue;
                }

                let fired = entities.with_pair(ids[i], ids[j], |a, b| {
                    a.on_collision(b, frame);
                    b.on_collision(a, frame);
                });
                if fired {
                    contacts += 1;
                }
            }
        }

        if contacts > 0 {
            log::trace!("{} contacts among {} entities", contacts, ids.len());
        }
        contacts
    }
}
