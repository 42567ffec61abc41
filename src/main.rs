//! Eightbit headless demo
//!
//! Runs the selected scene for a fixed number of frames with scripted input,
//! a silent audio backend and a sprite batch standing in for the GPU.
//!
//! Usage: `eightbit [arena|pong] [settings.json]`

use std::path::PathBuf;

use eightbit_engine::audio::{AudioManager, NullBackend};
use eightbit_engine::game::build_scene;
use eightbit_engine::input::{InputState, Keys};
use eightbit_engine::render::SpriteBatch;
use eightbit_engine::sim::FrameContext;
use eightbit_engine::timer::FrameTimer;
use eightbit_engine::{SceneKind, Settings};

const DEFAULT_SETTINGS: &str = "eightbit.json";

/// Frames between progress reports
const REPORT_EVERY: u64 = 120;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Eightbit (headless) starting...");

    let mut scene_arg = None;
    let mut settings_path = PathBuf::from(DEFAULT_SETTINGS);
    for arg in std::env::args().skip(1) {
        match SceneKind::parse(&arg) {
            Some(kind) => scene_arg = Some(kind),
            None => settings_path = PathBuf::from(arg),
        }
    }

    let mut settings = Settings::load_or_default(&settings_path);
    if let Some(kind) = scene_arg {
        settings.scene = kind;
    }

    let mut audio = AudioManager::new(Box::new(NullBackend::default()));
    audio.bind_defaults();
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_muted(settings.muted);

    let mut scene = build_scene(&settings);
    let mut input = InputState::new();
    let mut timer = FrameTimer::new(settings.target_fps);
    let mut batch = SpriteBatch::default();

    log::info!(
        "Running {} for {} frames",
        scene.name(),
        settings.demo_frames
    );

    let mut contacts = 0;
    let mut removed = 0;
    for frame_no in 0..settings.demo_frames as u64 {
        input.begin_frame();
        script_input(&mut input, frame_no);
        if input.should_quit() {
            break;
        }

        let dt = if settings.realtime {
            timer.tick();
            timer.delta_time()
        } else {
            settings.fixed_dt()
        };

        let mut frame = FrameContext::new(&input, &mut audio);
        let report = scene.step(dt, &mut frame);
        contacts += report.contacts;
        removed += report.removed;

        batch.begin();
        scene.render(&mut batch);
        let drawn = batch.end().len();

        if frame_no % REPORT_EVERY == 0 {
            log::info!(
                "frame {}: {} sprites, {} contacts, {} removed so far",
                frame_no,
                drawn,
                contacts,
                removed
            );
        }

        if scene.is_over() {
            log::info!("{} finished at frame {}", scene.name(), frame_no);
            break;
        }

        if settings.realtime {
            timer.sync();
        }
    }

    log::info!("Done: {} contacts, {} entities removed", contacts, removed);
}

/// Canned input: wander in a square, swinging every half second
fn script_input(input: &mut InputState, frame_no: u64) {
    let mut held = match (frame_no / 60) % 4 {
        0 => Keys::RIGHT,
        1 => Keys::UP,
        2 => Keys::LEFT,
        _ => Keys::DOWN,
    };
    if frame_no % 30 == 0 {
        held |= Keys::ATTACK;
    }
    input.set_held(held);
}
