//! Frame timing: clamped delta time, smoothed FPS, frame pacing

use std::time::{Duration, Instant};

use crate::consts::MAX_FRAME_DT;

const FPS_SAMPLES: usize = 60;

/// Measures time between frames and paces the loop to a target rate
#[derive(Debug)]
pub struct FrameTimer {
    origin: Instant,
    last_time: f64,
    delta: f32,
    target_frame_time: f32,
    fps_buffer: [f32; FPS_SAMPLES],
    fps_index: usize,
    frame_count: u64,
}

impl FrameTimer {
    pub fn new(target_fps: u32) -> Self {
        let target_fps = target_fps.max(1) as f32;
        Self {
            origin: Instant::now(),
            last_time: 0.0,
            delta: 0.0,
            target_frame_time: 1.0 / target_fps,
            fps_buffer: [target_fps; FPS_SAMPLES],
            fps_index: 0,
            frame_count: 0,
        }
    }

    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    /// Call once per frame
    pub fn tick(&mut self) {
        let now = self.now();
        self.tick_at(now);
    }

    /// Advance with an explicit timestamp in seconds
    pub fn tick_at(&mut self, now: f64) {
        // No previous timestamp on the first frame
        self.delta = if self.frame_count == 0 {
            0.0
        } else {
            ((now - self.last_time).max(0.0) as f32).min(MAX_FRAME_DT)
        };

        self.last_time = now;
        self.frame_count += 1;

        if self.delta > 0.0 {
            self.fps_buffer[self.fps_index] = 1.0 / self.delta;
            self.fps_index = (self.fps_index + 1) % FPS_SAMPLES;
        }
    }

    /// Seconds since the previous tick, at most `MAX_FRAME_DT`
    pub fn delta_time(&self) -> f32 {
        self.delta
    }

    /// Average over the last 60 frames
    pub fn fps(&self) -> f32 {
        self.fps_buffer.iter().sum::<f32>() / FPS_SAMPLES as f32
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Time left in the current frame budget as of `now`
    pub fn remaining_at(&self, now: f64) -> Duration {
        let elapsed = (now - self.last_time).max(0.0) as f32;
        let remaining = self.target_frame_time - elapsed;
        if remaining > 0.0 {
            Duration::from_secs_f32(remaining)
        } else {
            Duration::ZERO
        }
    }

    /// Sleep out the rest of the frame (call at end of frame)
    pub fn sync(&self) {
        let remaining = self.remaining_at(self.now());
        if remaining >= Duration::from_millis(1) {
            std::thread::sleep(remaining);
        }
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(crate::consts::TARGET_FPS)
    }
}
