//! Froggr entry point
//!
//! Headless native runner: loads settings, drives the loop with a scripted
//! hop pattern and a logging presenter, and stops after a fixed time.

#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
use froggr::assets::SpriteAtlas;
#[cfg(not(target_arch = "wasm32"))]
use froggr::renderer::LogPresenter;
#[cfg(not(target_arch = "wasm32"))]
use froggr::sim::{InputSnapshot, Key, ScriptedInput};
#[cfg(not(target_arch = "wasm32"))]
use froggr::{GameLoop, LoopExit, Settings};

#[cfg(not(target_arch = "wasm32"))]
const RUN_TIME: Duration = Duration::from_secs(10);

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Froggr (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&path).unwrap_or_else(|e| {
            log::error!("{e}; using default settings");
            Settings::default()
        }),
        None => Settings::default(),
    };

    let mut game = GameLoop::new(
        &settings,
        ScriptedInput::new(demo_script()),
        LogPresenter::new(),
        SpriteAtlas::new(),
    );

    let stop = game.stop_handle();
    std::thread::spawn(move || {
        std::thread::sleep(RUN_TIME);
        stop.stop();
    });

    let exit = game.run();
    let state = game.state();
    match exit {
        LoopExit::GameOver => log::info!("Game over: {} crossings", state.crossings),
        LoopExit::Stopped => log::info!(
            "Stopped after {} frames: {} lives, {} crossings",
            state.frame,
            state.player.lives(),
            state.crossings
        ),
    }
    log::info!(
        "{} frames presented, {} sprites loaded",
        game.presenter().frames(),
        game.assets().len()
    );
}

/// Wait for traffic, then hop up the field one lane every half second
#[cfg(not(target_arch = "wasm32"))]
fn demo_script() -> Vec<InputSnapshot> {
    let mut script = vec![InputSnapshot::empty(); 240];
    for _ in 0..12 {
        script.push(InputSnapshot::with_held(&[Key::Up]));
        script.extend(std::iter::repeat_n(InputSnapshot::empty(), 24));
    }
    script
}

#[cfg(target_arch = "wasm32")]
fn main() {}
