//! Per-frame collaborators handed to entity callbacks

use glam::Vec2;

use super::entity::Entity;
use super::manager::{EntityId, EntityManager, Handle};
use crate::audio::{SoundEffect, SoundSink};
use crate::input::InputState;

/// Input snapshot and sound trigger for the current frame
pub struct FrameContext<'a> {
    pub input: &'a InputState,
    pub audio: &'a mut dyn SoundSink,
}

impl<'a> FrameContext<'a> {
    pub fn new(input: &'a InputState, audio: &'a mut dyn SoundSink) -> Self {
        Self { input, audio }
    }

    pub fn play_sound(&mut self, effect: SoundEffect) {
        self.audio.play_sound(effect, None);
    }
}

/// What an entity may touch while it updates: its frame collaborators,
/// read-only views of other entities, and `spawn`.
///
/// The updating entity itself is checked out of storage for the duration of
/// the call, so looking up its own id yields `None`.
pub struct UpdateContext<'a, 'f> {
    entities: &'a mut EntityManager,
    frame: &'a mut FrameContext<'f>,
    id: EntityId,
}

impl<'a, 'f> UpdateContext<'a, 'f> {
    pub(crate) fn new(
        entities: &'a mut EntityManager,
        frame: &'a mut FrameContext<'f>,
        id: EntityId,
    ) -> Self {
        Self {
            entities,
            frame,
            id,
        }
    }

    /// Id of the entity being updated
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn input(&self) -> &InputState {
        self.frame.input
    }

    pub fn play_sound(&mut self, effect: SoundEffect) {
        self.frame.play_sound(effect);
    }

    pub fn audio(&mut self) -> &mut dyn SoundSink {
        &mut *self.frame.audio
    }

    /// Spawn a new entity. It is stored right away but first updates next frame.
    pub fn spawn<T: Entity>(&mut self, entity: T) -> Handle<T> {
        self.entities.spawn(entity)
    }

    pub fn get<T: Entity>(&self, handle: Handle<T>) -> Option<&T> {
        self.entities.get(handle)
    }

    pub fn get_dyn(&self, id: EntityId) -> Option<&dyn Entity> {
        self.entities.get_dyn(id)
    }

    /// Position of another entity, if it is still around
    pub fn position_of(&self, id: EntityId) -> Option<Vec2> {
        self.entities.get_dyn(id).map(|e| e.core().pos)
    }

    pub fn entities(&self) -> &EntityManager {
        self.entities
    }
}
