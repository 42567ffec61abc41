//! Keyboard snapshot for a single frame
//!
//! The platform layer feeds key events in; entities only read. Edge triggers
//! compare against the previous frame's snapshot.

use bitflags::bitflags;

/// Logical keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Space or Z
    Attack,
    /// Escape
    Back,
}

bitflags! {
    /// Set of held keys
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Keys: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const ATTACK = 1 << 4;
        const BACK = 1 << 5;
    }
}

impl From<Key> for Keys {
    fn from(key: Key) -> Self {
        match key {
            Key::Up => Keys::UP,
            Key::Down => Keys::DOWN,
            Key::Left => Keys::LEFT,
            Key::Right => Keys::RIGHT,
            Key::Attack => Keys::ATTACK,
            Key::Back => Keys::BACK,
        }
    }
}

/// Current and previous keyboard state
#[derive(Debug, Clone, Default)]
pub struct InputState {
    current: Keys,
    previous: Keys,
    quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call once per frame before applying this frame's events
    pub fn begin_frame(&mut self) {
        self.previous = self.current;
    }

    /// Apply a key event
    pub fn set_key(&mut self, key: Key, down: bool) {
        self.current.set(key.into(), down);
        if key == Key::Back && down {
            self.quit = true;
        }
    }

    /// Replace the whole held set (e.g. from a polled keyboard state)
    pub fn set_held(&mut self, keys: Keys) {
        self.current = keys;
        if keys.contains(Keys::BACK) {
            self.quit = true;
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Key is held this frame
    pub fn is_down(&self, key: Key) -> bool {
        self.current.contains(key.into())
    }

    /// Key went from up to down this frame
    pub fn is_pressed(&self, key: Key) -> bool {
        let k = Keys::from(key);
        self.current.contains(k) && !self.previous.contains(k)
    }

    /// Key went from down to up this frame
    pub fn is_released(&self, key: Key) -> bool {
        let k = Keys::from(key);
        !self.current.contains(k) && self.previous.contains(k)
    }
}
