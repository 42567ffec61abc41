//! Sound effect triggers
//!
//! Gameplay code fires `SoundEffect`s at a `SoundSink` and forgets about them.
//! `AudioManager` maps effects onto whatever the backend loaded and swallows
//! backend failures so they never reach simulation control flow.

use std::collections::HashMap;

use thiserror::Error;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball bounces off top/bottom wall
    WallBounce,
    /// Player swings
    Attack,
    /// Enemy takes a hit
    Hit,
    /// Enemy destroyed
    EnemyDeath,
    /// Player takes damage
    PlayerHurt,
    /// Point scored in pong
    Score,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 7] = [
        SoundEffect::PaddleHit,
        SoundEffect::WallBounce,
        SoundEffect::Attack,
        SoundEffect::Hit,
        SoundEffect::EnemyDeath,
        SoundEffect::PlayerHurt,
        SoundEffect::Score,
    ];

    /// Default asset name for this effect
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::PaddleHit => "paddle_hit.wav",
            SoundEffect::WallBounce => "wall_bounce.wav",
            SoundEffect::Attack => "attack.wav",
            SoundEffect::Hit => "hit.wav",
            SoundEffect::EnemyDeath => "enemy_death.wav",
            SoundEffect::PlayerHurt => "player_hurt.wav",
            SoundEffect::Score => "score.wav",
        }
    }
}

/// Fire-and-forget sound trigger. `volume` overrides the default (0.0 - 1.0).
pub trait SoundSink {
    fn play_sound(&mut self, effect: SoundEffect, volume: Option<f32>);
}

/// Backend-assigned sound handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundId(pub u32);

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio device not initialized")]
    NotInitialized,
    #[error("failed to load sound '{0}'")]
    Load(String),
    #[error("unknown sound handle {0:?}")]
    UnknownSound(SoundId),
}

/// The native mixer, or a stand-in for it
pub trait AudioBackend {
    fn load(&mut self, name: &str) -> Result<SoundId, AudioError>;
    fn play(&mut self, id: SoundId, volume: f32) -> Result<(), AudioError>;
}

/// Backend that accepts everything and outputs nothing
#[derive(Debug, Default)]
pub struct NullBackend {
    loaded: Vec<String>,
}

impl AudioBackend for NullBackend {
    fn load(&mut self, name: &str) -> Result<SoundId, AudioError> {
        self.loaded.push(name.to_string());
        Ok(SoundId(self.loaded.len() as u32 - 1))
    }

    fn play(&mut self, id: SoundId, volume: f32) -> Result<(), AudioError> {
        match self.loaded.get(id.0 as usize) {
            Some(name) => {
                log::trace!("play {} at {:.2}", name, volume);
                Ok(())
            }
            None => Err(AudioError::UnknownSound(id)),
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    bindings: HashMap<SoundEffect, SoundId>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(NullBackend::default()))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            bindings: HashMap::new(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Load a sound for `effect`. A failed load leaves the effect silent.
    pub fn bind(&mut self, effect: SoundEffect, name: &str) -> Result<SoundId, AudioError> {
        let id = self.backend.load(name)?;
        self.bindings.insert(effect, id);
        Ok(id)
    }

    /// Load every effect's default asset, logging the ones that fail
    pub fn bind_defaults(&mut self) {
        for effect in SoundEffect::ALL {
            if let Err(e) = self.bind(effect, effect.asset_name()) {
                log::warn!("{:?} will be silent: {}", effect, e);
            }
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

impl SoundSink for AudioManager {
    fn play_sound(&mut self, effect: SoundEffect, volume: Option<f32>) {
        let vol = self.effective_volume() * volume.unwrap_or(1.0).clamp(0.0, 1.0);
        if vol <= 0.0 {
            return;
        }

        let Some(&id) = self.bindings.get(&effect) else {
            log::debug!("no sound bound for {:?}", effect);
            return;
        };

        if let Err(e) = self.backend.play(id, vol) {
            log::warn!("failed to play {:?}: {}", effect, e);
        }
    }
}

/// Records triggered effects instead of playing them
#[derive(Debug, Default, Clone)]
pub struct SoundLog {
    pub played: Vec<SoundEffect>,
}

impl SoundLog {
    pub fn count(&self, effect: SoundEffect) -> usize {
        self.played.iter().filter(|e| **e == effect).count()
    }
}

impl SoundSink for SoundLog {
    fn play_sound(&mut self, effect: SoundEffect, _volume: Option<f32>) {
        self.played.push(effect);
    }
}
