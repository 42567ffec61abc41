//! Entity storage and per-frame dispatch
//!
//! Entities live in a slot map so handles held by other entities stay cheap
//! and go stale (resolve to `None`) once the target is reaped by `cleanup`.
//! A separate id list keeps insertion order, which is the update, render and
//! collision order.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use slotmap::SlotMap;

use super::context::{FrameContext, UpdateContext};
use super::entity::Entity;
use crate::render::RenderSink;

slotmap::new_key_type! {
    /// Untyped entity id
    pub struct EntityId;
}

/// Typed, non-owning reference to an entity
pub struct Handle<T> {
    id: EntityId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    fn new(id: EntityId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:?})", self.id)
    }
}

impl<T> From<Handle<T>> for EntityId {
    fn from(handle: Handle<T>) -> Self {
        handle.id
    }
}

/// A stored entity. Empty only while the entity is checked out for a callback.
type Slot = Option<Box<dyn Entity>>;

/// Owns every entity
#[derive(Default)]
pub struct EntityManager {
    slots: SlotMap<EntityId, Slot>,
    order: Vec<EntityId>,
}

impl fmt::Debug for EntityManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityManager")
            .field("count", &self.order.len())
            .finish()
    }
}

impl EntityManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `entity` and append it to the iteration order
    pub fn spawn<T: Entity>(&mut self, entity: T) -> Handle<T> {
        let kind = entity.kind();
        let id = self.slots.insert(Some(Box::new(entity)));
        self.order.push(id);
        log::debug!("spawned {:?} as {:?}", kind, id);
        Handle::new(id)
    }

    /// Resolve a handle. `None` once the entity is gone.
    pub fn get<T: Entity>(&self, handle: Handle<T>) -> Option<&T> {
        self.get_dyn(handle.id)?.as_any().downcast_ref::<T>()
    }

    pub fn get_mut<T: Entity>(&mut self, handle: Handle<T>) -> Option<&mut T> {
        self.get_dyn_mut(handle.id)?.as_any_mut().downcast_mut::<T>()
    }

    pub fn get_dyn(&self, id: EntityId) -> Option<&dyn Entity> {
        self.slots.get(id)?.as_deref()
    }

    pub fn get_dyn_mut(&mut self, id: EntityId) -> Option<&mut dyn Entity> {
        match self.slots.get_mut(id) {
            Some(Some(entity)) => Some(entity.as_mut()),
            _ => None,
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.slots.contains_key(id)
    }

    pub fn count(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.order.iter().copied()
    }

    /// Entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Entity> + '_ {
        self.order.iter().filter_map(|id| self.get_dyn(*id))
    }

    /// Update every active entity in insertion order. Entities spawned during
    /// the pass are not updated until the next call.
    pub fn update(&mut self, dt: f32, frame: &mut FrameContext<'_>) {
        let len = self.order.len();
        for i in 0..len {
            let id = self.order[i];
            let Some(mut entity) = self.check_out(id) else {
                continue;
            };
            if entity.core().is_active() {
                let mut ctx = UpdateContext::new(self, frame, id);
                entity.update(dt, &mut ctx);
            }
            self.check_in(id, entity);
        }
    }

    /// Render every active entity; later entities draw on top
    pub fn render(&self, batch: &mut dyn RenderSink) {
        for entity in self.iter() {
            if entity.core().is_active() {
                entity.render(batch);
            }
        }
    }

    /// Drop every entity flagged for destruction, keeping the order of the
    /// rest. Returns how many were removed.
    pub fn cleanup(&mut self) -> usize {
        let before = self.order.len();
        let slots = &mut self.slots;
        self.order.retain(|&id| {
            let doomed = slots
                .get(id)
                .and_then(|slot| slot.as_deref())
                .is_none_or(|e| e.core().is_pending_destroy());
            if doomed {
                slots.remove(id);
            }
            !doomed
        });

        let removed = before - self.order.len();
        if removed > 0 {
            log::debug!("cleanup removed {} entities", removed);
        }
        removed
    }

    /// Remove everything (scene teardown)
    pub fn clear(&mut self) {
        log::debug!("clearing {} entities", self.order.len());
        self.slots.clear();
        self.order.clear();
    }

    /// Lend out two distinct entities at once. Returns false if either is
    /// missing or `a == b`.
    pub(crate) fn with_pair<F>(&mut self, a: EntityId, b: EntityId, f: F) -> bool
    where
        F: FnOnce(&mut dyn Entity, &mut dyn Entity),
    {
        if a == b {
            return false;
        }
        let Some(mut first) = self.check_out(a) else {
            return false;
        };
        let Some(mut second) = self.check_out(b) else {
            self.check_in(a, first);
            return false;
        };

        f(first.as_mut(), second.as_mut());

        self.check_in(a, first);
        self.check_in(b, second);
        true
    }

    fn check_out(&mut self, id: EntityId) -> Option<Box<dyn Entity>> {
        self.slots.get_mut(id).and_then(Option::take)
    }

    fn check_in(&mut self, id: EntityId, entity: Box<dyn Entity>) {
        if let Some(slot) = self.slots.get_mut(id) {
            *slot = Some(entity);
        }
    }
}
