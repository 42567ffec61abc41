//! Frame-based sprite animation
//!
//! Each entity owns an `Animator` holding named frame sequences. Frames carry
//! their own duration, and `update` consumes elapsed time frame by frame so a
//! long delta skips as many short frames as it covers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::render::SrcRect;

/// One frame: where it lives on the sheet and how long it shows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationFrame {
    pub src: SrcRect,
    /// Seconds
    pub duration: f32,
}

impl AnimationFrame {
    pub const fn new(src: SrcRect, duration: f32) -> Self {
        Self { src, duration }
    }

    /// Whole-texture frame, for single-sprite art
    pub const fn full(duration: f32) -> Self {
        Self::new(SrcRect::FULL, duration)
    }
}

/// An ordered frame sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub frames: Vec<AnimationFrame>,
    #[serde(default = "default_loop")]
    pub looping: bool,
}

fn default_loop() -> bool {
    true
}

impl Animation {
    pub fn looping(frames: Vec<AnimationFrame>) -> Self {
        Self {
            frames,
            looping: true,
        }
    }

    pub fn once(frames: Vec<AnimationFrame>) -> Self {
        Self {
            frames,
            looping: false,
        }
    }

    /// Total length of one pass through the frames
    pub fn cycle_duration(&self) -> f32 {
        self.frames.iter().map(|f| f.duration).sum()
    }
}

/// Playback state over a set of named animations
#[derive(Debug, Clone, Default)]
pub struct Animator {
    animations: HashMap<String, Animation>,
    current: Option<String>,
    frame_index: usize,
    frame_timer: f32,
    playing: bool,
    finished: bool,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an animation. An existing one with the same name is replaced.
    pub fn add_animation(&mut self, name: impl Into<String>, animation: Animation) {
        let name = name.into();
        // Keep the index valid if the active sequence shrank
        if self.current.as_deref() == Some(name.as_str()) {
            let last = animation.frames.len().saturating_sub(1);
            self.frame_index = self.frame_index.min(last);
        }
        self.animations.insert(name, animation);
    }

    /// Switch to `name` from its first frame.
    ///
    /// Replaying the animation that is already running does nothing, and
    /// unknown names leave the current state untouched.
    pub fn play(&mut self, name: &str) {
        if self.current.as_deref() == Some(name) && self.playing && !self.finished {
            return;
        }
        if !self.animations.contains_key(name) {
            log::trace!("unknown animation '{}'", name);
            return;
        }

        self.current = Some(name.to_string());
        self.frame_index = 0;
        self.frame_timer = 0.0;
        self.playing = true;
        self.finished = false;
    }

    /// Halt playback where it is
    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.playing || self.finished {
            return;
        }
        let Some(anim) = self.current.as_ref().and_then(|n| self.animations.get(n)) else {
            return;
        };
        if anim.frames.is_empty() {
            return;
        }
        // A looping cycle of zero length would never consume the timer
        if anim.looping && anim.cycle_duration() <= 0.0 {
            return;
        }

        self.frame_timer += dt.max(0.0);

        while self.frame_timer >= anim.frames[self.frame_index].duration {
            self.frame_timer -= anim.frames[self.frame_index].duration;
            self.frame_index += 1;

            if self.frame_index >= anim.frames.len() {
                if anim.looping {
                    self.frame_index = 0;
                } else {
                    self.frame_index = anim.frames.len() - 1;
                    self.finished = true;
                    self.playing = false;
                    return;
                }
            }
        }
    }

    /// Source rectangle of the frame on screen; the full texture when nothing
    /// is selected
    pub fn current_frame(&self) -> SrcRect {
        self.current
            .as_ref()
            .and_then(|n| self.animations.get(n))
            .and_then(|a| a.frames.get(self.frame_index))
            .map(|f| f.src)
            .unwrap_or(SrcRect::FULL)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current_animation(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Time spent on the current frame so far
    pub fn frame_timer(&self) -> f32 {
        self.frame_timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn idle() -> Animation {
        Animation::looping(vec![AnimationFrame::full(0.5), AnimationFrame::full(0.5)])
    }

    fn swing() -> Animation {
        Animation::once(vec![
            AnimationFrame::new(SrcRect::grid_cell(0, 0, 3, 1), 0.05),
            AnimationFrame::new(SrcRect::grid_cell(1, 0, 3, 1), 0.1),
            AnimationFrame::new(SrcRect::grid_cell(2, 0, 3, 1), 0.05),
        ])
    }

    #[test]
    fn test_partial_frame_leaves_remainder() {
        let mut animator = Animator::new();
        animator.add_animation("idle", idle());
        animator.play("idle");

        animator.update(0.6);
        assert_eq!(animator.frame_index(), 1);
        assert!((animator.frame_timer() - 0.1).abs() < 1e-5);
        assert!(animator.is_playing());
    }

    #[test]
    fn test_loop_wraps_after_full_cycle() {
        let mut animator = Animator::new();
        animator.add_animation("idle", idle());
        animator.play("idle");

        animator.update(1.0);
        assert_eq!(animator.frame_index(), 0);
        assert!(!animator.is_finished());
        assert!(animator.is_playing());
    }

    #[test]
    fn test_large_dt_skips_several_frames() {
        let mut animator = Animator::new();
        animator.add_animation(
            "walk",
            Animation::looping(vec![AnimationFrame::full(0.25); 4]),
        );
        animator.play("walk");

        animator.update(0.75);
        assert_eq!(animator.frame_index(), 3);
    }

    #[test]
    fn test_once_finishes_on_last_frame() {
        let mut animator = Animator::new();
        animator.add_animation("attack", swing());
        animator.play("attack");

        animator.update(0.5);
        assert!(animator.is_finished());
        assert!(!animator.is_playing());
        assert_eq!(animator.frame_index(), 2);
        assert_eq!(animator.current_frame(), SrcRect::grid_cell(2, 0, 3, 1));

        // Further time does nothing
        animator.update(1.0);
        assert_eq!(animator.frame_index(), 2);
    }

    #[test]
    fn test_play_same_animation_does_not_restart() {
        let mut animator = Animator::new();
        animator.add_animation("idle", idle());
        animator.play("idle");
        animator.update(0.6);

        animator.play("idle");
        assert_eq!(animator.frame_index(), 1);
    }

    #[test]
    fn test_play_finished_animation_restarts() {
        let mut animator = Animator::new();
        animator.add_animation("attack", swing());
        animator.play("attack");
        animator.update(1.0);
        assert!(animator.is_finished());

        animator.play("attack");
        assert_eq!(animator.frame_index(), 0);
        assert!(animator.is_playing());
        assert!(!animator.is_finished());
    }

    #[test]
    fn test_play_unknown_keeps_state() {
        let mut animator = Animator::new();
        animator.add_animation("idle", idle());
        animator.play("idle");
        animator.update(0.6);

        animator.play("does-not-exist");
        assert_eq!(animator.current_animation(), Some("idle"));
        assert_eq!(animator.frame_index(), 1);
        assert!(animator.is_playing());
    }

    #[test]
    fn test_stop_keeps_position() {
        let mut animator = Animator::new();
        animator.add_animation("idle", idle());
        animator.play("idle");
        animator.update(0.6);
        animator.stop();

        animator.update(5.0);
        assert!(!animator.is_playing());
        assert_eq!(animator.frame_index(), 1);
        assert!((animator.frame_timer() - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_stopped_animation_can_resume_via_play() {
        let mut animator = Animator::new();
        animator.add_animation("idle", idle());
        animator.play("idle");
        animator.update(0.6);
        animator.stop();

        // Not playing, so play restarts it
        animator.play("idle");
        assert!(animator.is_playing());
        assert_eq!(animator.frame_index(), 0);
    }

    #[test]
    fn test_default_frame_without_animation() {
        let mut animator = Animator::new();
        assert_eq!(animator.current_frame(), SrcRect::FULL);

        animator.add_animation("empty", Animation::looping(Vec::new()));
        animator.play("empty");
        animator.update(1.0);
        assert_eq!(animator.current_frame(), SrcRect::FULL);
    }

    #[test]
    fn test_overwrite_last_write_wins() {
        let mut animator = Animator::new();
        animator.add_animation("idle", idle());
        animator.add_animation("idle", swing());
        animator.play("idle");
        animator.update(1.0);
        assert!(animator.is_finished());
    }

    #[test]
    fn test_zero_length_loop_does_not_hang() {
        let mut animator = Animator::new();
        animator.add_animation("flat", Animation::looping(vec![AnimationFrame::full(0.0); 2]));
        animator.play("flat");
        animator.update(0.1);
        assert_eq!(animator.frame_index(), 0);
    }

    #[test]
    fn test_animation_from_json() {
        let anim: Animation = serde_json::from_str(
            r#"{ "frames": [ { "src": { "x": 0.0, "y": 0.0, "w": 0.5, "h": 1.0 }, "duration": 0.2 } ] }"#,
        )
        .unwrap();
        assert!(anim.looping);
        assert_eq!(anim.frames.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_once_always_finishes(
            durations in proptest::collection::vec(0.01f32..0.5, 1..8),
            extra in 0.0f32..1.0,
        ) {
            let total: f32 = durations.iter().sum();
            let frames = durations.iter().map(|d| AnimationFrame::full(*d)).collect();
            let mut animator = Animator::new();
            animator.add_animation("a", Animation::once(frames));
            animator.play("a");

            // Feed in chunks no larger than the upstream clamp
            let mut left = total + extra + 0.01;
            while left > 0.0 {
                let step = left.min(0.1);
                animator.update(step);
                left -= step;
            }

            prop_assert!(animator.is_finished());
            prop_assert!(!animator.is_playing());
            prop_assert_eq!(animator.frame_index(), durations.len() - 1);
        }

        #[test]
        fn prop_index_always_valid(
            durations in proptest::collection::vec(0.01f32..0.5, 1..8),
            steps in proptest::collection::vec(0.0f32..0.1, 0..50),
        ) {
            let n = durations.len();
            let frames = durations.into_iter().map(AnimationFrame::full).collect();
            let mut animator = Animator::new();
            animator.add_animation("a", Animation::looping(frames));
            animator.play("a");
            for dt in steps {
                animator.update(dt);
                prop_assert!(animator.frame_index() < n);
            }
        }
    }
}
