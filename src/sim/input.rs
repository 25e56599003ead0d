//! Per-frame input snapshot and movement triggering
//!
//! Key events arrive on whatever thread owns the window. They land in a
//! [`KeyState`] (an atomic bitset), and the simulation takes one immutable
//! [`InputSnapshot`] of it per frame.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

/// Logical control keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    pub const ALL: [Key; 4] = [Key::Up, Key::Down, Key::Left, Key::Right];

    #[inline]
    const fn bit(self) -> u8 {
        match self {
            Key::Up => 1 << 0,
            Key::Down => 1 << 1,
            Key::Left => 1 << 2,
            Key::Right => 1 << 3,
        }
    }

    #[inline]
    const fn index(self) -> usize {
        match self {
            Key::Up => 0,
            Key::Down => 1,
            Key::Left => 2,
            Key::Right => 3,
        }
    }
}

/// Which control keys are held during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    bits: u8,
}

impl InputSnapshot {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub fn with_held(keys: &[Key]) -> Self {
        let mut snapshot = Self::empty();
        for &key in keys {
            snapshot.set(key, true);
        }
        snapshot
    }

    #[inline]
    pub const fn is_held(&self, key: Key) -> bool {
        self.bits & key.bit() != 0
    }

    #[inline]
    pub fn set(&mut self, key: Key, held: bool) {
        if held {
            self.bits |= key.bit();
        } else {
            self.bits &= !key.bit();
        }
    }

    /// Keys held now that were not held in `previous`
    #[inline]
    pub const fn pressed_since(&self, previous: &InputSnapshot) -> InputSnapshot {
        InputSnapshot {
            bits: self.bits & !previous.bits,
        }
    }
}

/// Source of one input snapshot per frame
pub trait InputSource {
    fn snapshot(&mut self) -> InputSnapshot;
}

/// Shared key state written by an event thread and polled by the game loop
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    bits: Arc<AtomicU8>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press or release
    pub fn set(&self, key: Key, pressed: bool) {
        if pressed {
            self.bits.fetch_or(key.bit(), Ordering::AcqRel);
        } else {
            self.bits.fetch_and(!key.bit(), Ordering::AcqRel);
        }
    }
}

impl InputSource for KeyState {
    fn snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            bits: self.bits.load(Ordering::Acquire),
        }
    }
}

/// Replays a fixed list of snapshots, then reports no keys held
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<InputSnapshot>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<InputSnapshot>) -> Self {
        Self { frames, cursor: 0 }
    }
}

impl InputSource for ScriptedInput {
    fn snapshot(&mut self) -> InputSnapshot {
        let snapshot = self.frames.get(self.cursor).copied().unwrap_or_default();
        self.cursor += 1;
        snapshot
    }
}

/// How held keys turn into single-cell steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoveMode {
    /// One step per press
    #[default]
    Edge,
    /// One step on press, then one every `repeat_frames` while held
    Held { repeat_frames: u32 },
}

impl MoveMode {
    /// Held-key movement at the standard repeat rate
    pub const fn held() -> Self {
        MoveMode::Held {
            repeat_frames: crate::consts::HELD_REPEAT_FRAMES,
        }
    }
}

/// Per-key trigger state for the player's movement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveTrigger {
    mode: MoveMode,
    previous: InputSnapshot,
    held_for: [u32; 4],
    /// Keys ignored until released
    #[serde(default)]
    suppressed: InputSnapshot,
}

impl MoveTrigger {
    pub fn new(mode: MoveMode) -> Self {
        Self {
            mode,
            previous: InputSnapshot::empty(),
            held_for: [0; 4],
            suppressed: InputSnapshot::empty(),
        }
    }

    /// Keys that produce a step this frame
    pub fn update(&mut self, input: &InputSnapshot) -> InputSnapshot {
        let pressed = input.pressed_since(&self.previous);
        self.previous = *input;
        self.suppressed.bits &= input.bits;

        let mut fired = InputSnapshot::empty();
        for key in Key::ALL {
            let held_for = &mut self.held_for[key.index()];
            if !input.is_held(key) || self.suppressed.is_held(key) {
                *held_for = 0;
                continue;
            }
            *held_for += 1;
            let fire = match self.mode {
                MoveMode::Edge => pressed.is_held(key),
                MoveMode::Held { repeat_frames } => {
                    pressed.is_held(key)
                        || (repeat_frames > 0 && (*held_for - 1) % repeat_frames == 0)
                }
            };
            fired.set(key, fire);
        }
        fired
    }

    /// Forget held keys, e.g. after the player is reset. Keys down right
    /// now stay inert until released.
    pub fn clear(&mut self) {
        self.held_for = [0; 4];
        self.suppressed = self.previous;
    }
}
