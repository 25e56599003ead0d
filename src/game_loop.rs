//! Frame pacing and the outer loop
//!
//! Owns the game state, an input source, a presenter and an asset resolver.
//! Each frame: check the surface, run simulation steps, drain events,
//! hand the draw list to the presenter.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::assets::AssetResolver;
use crate::renderer::{Presenter, build_frame};
use crate::settings::Settings;
use crate::sim::input::InputSource;
use crate::sim::state::{GameEvent, GameState};
use crate::sim::tick;

/// How wall-clock time maps to simulation steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pacing {
    /// Fixed-step accumulator, at most `max_substeps` steps per frame
    #[default]
    Accumulator,
    /// One step per frame followed by a fixed sleep
    FixedDelay,
}

/// Cloneable cooperative stop flag, checked at every frame boundary
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Why [`GameLoop::run`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Stopped,
    GameOver,
}

/// What one call to [`GameLoop::run_frame`] did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Simulation steps run
    pub ticks: u32,
    /// Surface was not ready; nothing advanced or presented
    pub skipped: bool,
}

pub struct GameLoop<I, P, A> {
    state: GameState,
    input: I,
    presenter: P,
    assets: A,
    pacing: Pacing,
    step: Duration,
    max_substeps: u32,
    accumulator: Duration,
    stop: StopHandle,
}

impl<I, P, A> GameLoop<I, P, A>
where
    I: InputSource,
    P: Presenter,
    A: AssetResolver,
{
    pub fn new(settings: &Settings, input: I, presenter: P, mut assets: A) -> Self {
        let state = GameState::new(settings, &mut assets);
        Self {
            state,
            input,
            presenter,
            assets,
            pacing: settings.pacing,
            step: settings.frame_delay(),
            max_substeps: settings.max_substeps.max(1),
            accumulator: Duration::ZERO,
            stop: StopHandle::new(),
        }
    }

    /// Handle that ends [`run`](Self::run) from another thread
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn assets(&self) -> &A {
        &self.assets
    }

    /// Advance by `elapsed` wall-clock time and present the result
    pub fn run_frame(&mut self, elapsed: Duration) -> FrameReport {
        if !self.presenter.is_ready() {
            self.accumulator = Duration::ZERO;
            log::debug!("Surface not ready, skipping frame");
            return FrameReport {
                ticks: 0,
                skipped: true,
            };
        }

        let ticks = match self.pacing {
            Pacing::Accumulator => {
                // Clamp long stalls so the loop cannot spiral
                self.accumulator += elapsed.min(self.step * self.max_substeps);

                let mut substeps = 0;
                while self.accumulator >= self.step && substeps < self.max_substeps {
                    self.step_once();
                    self.accumulator -= self.step;
                    substeps += 1;
                }
                substeps
            }
            Pacing::FixedDelay => {
                self.step_once();
                1
            }
        };

        for event in self.state.drain_events() {
            match event {
                GameEvent::Spawned { .. } => log::trace!("{event:?}"),
                _ => log::debug!("{event:?}"),
            }
        }

        let frame = build_frame(&self.state);
        if let Err(e) = self.presenter.present(&frame) {
            log::warn!("Present failed: {e}");
        }

        FrameReport {
            ticks,
            skipped: false,
        }
    }

    fn step_once(&mut self) {
        let input = self.input.snapshot();
        tick(&mut self.state, &input, &mut self.assets);
    }

    /// Run until stopped or the game ends
    pub fn run(&mut self) -> LoopExit {
        log::info!(
            "Game loop running ({:?}, {:?} per step, {:?} spawn timers)",
            self.pacing,
            self.step,
            self.state.spawner.policy()
        );
        let mut last = Instant::now();

        loop {
            if self.stop.is_stopped() {
                log::info!("Game loop stopped at frame {}", self.state.frame);
                return LoopExit::Stopped;
            }

            let frame_start = Instant::now();
            let elapsed = frame_start.duration_since(last);
            last = frame_start;

            self.run_frame(elapsed);

            if self.state.is_game_over() {
                log::info!(
                    "Game over at frame {} with {} crossings",
                    self.state.frame,
                    self.state.crossings
                );
                return LoopExit::GameOver;
            }

            let delay = match self.pacing {
                Pacing::FixedDelay => Some(self.step),
                Pacing::Accumulator => self.step.checked_sub(frame_start.elapsed()),
            };
            if let Some(delay) = delay {
                std::thread::sleep(delay);
            }
        }
    }
}
