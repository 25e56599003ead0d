//! The player-controlled frog

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Direction, Motion, MovingEntity};
use super::input::{InputSnapshot, Key, MoveMode, MoveTrigger};
use crate::consts::*;
use crate::lane_y;

/// Way the player sprite faces (last step taken)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl From<Direction> for Facing {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Left => Facing::Left,
            Direction::Right => Facing::Right,
        }
    }
}

/// Rightmost x the player may occupy
pub const PLAYER_MAX_X: f32 = GAME_WIDTH - CELL_SIZE;

/// Lowest lane top the player may occupy
pub fn player_max_y() -> f32 {
    lane_y(NUMBER_OF_LANES - 1)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Only `pos` and the one-cell length are used; the player moves by
    /// stepping and riding, never through `Motion::advance`
    motion: Motion,
    lives: u8,
    facing: Facing,
    start: Vec2,
    trigger: MoveTrigger,
}

impl Player {
    pub fn new(start: Vec2, lives: u8, mode: MoveMode) -> Self {
        Self {
            motion: Motion::new(start, 1, Direction::Right, 0.0),
            lives,
            facing: Facing::Up,
            start,
            trigger: MoveTrigger::new(mode),
        }
    }

    /// Player at the standard start cell
    pub fn spawn(lives: u8, mode: MoveMode) -> Self {
        Self::new(Vec2::new(PLAYER_START_X, PLAYER_START_Y), lives, mode)
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    /// Move one cell toward `key`, clamped to the field
    pub fn step(&mut self, key: Key) {
        let pos = &mut self.motion.pos;
        match key {
            Key::Up => {
                pos.y = (pos.y - LANE_HEIGHT).max(0.0);
                self.facing = Facing::Up;
            }
            Key::Down => {
                pos.y = (pos.y + LANE_HEIGHT).min(player_max_y());
                self.facing = Facing::Down;
            }
            Key::Left => {
                pos.x = (pos.x - CELL_SIZE).max(0.0);
                self.facing = Facing::Left;
            }
            Key::Right => {
                pos.x = (pos.x + CELL_SIZE).min(PLAYER_MAX_X);
                self.facing = Facing::Right;
            }
        }
    }

    /// Follow a platform's displacement for this frame
    pub fn ride(&mut self, delta: f32) {
        self.motion.pos.x = (self.motion.pos.x + delta).clamp(0.0, PLAYER_MAX_X);
    }

    /// Back to the start cell, facing up; held keys must be re-pressed
    pub fn reset_to_start(&mut self) {
        self.motion.pos = self.start;
        self.facing = Facing::Up;
        self.trigger.clear();
    }

    /// Fatal collision or drowning: one life gone, back to start
    pub fn lose_life(&mut self) -> u8 {
        self.lives = self.lives.saturating_sub(1);
        self.reset_to_start();
        self.lives
    }
}

impl MovingEntity for Player {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn tick(&mut self, input: &InputSnapshot) {
        let fired = self.trigger.update(input);
        for key in Key::ALL {
            if fired.is_held(key) {
                self.step(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(player: &mut Player, key: Key) {
        player.tick(&InputSnapshot::with_held(&[key]));
        player.tick(&InputSnapshot::empty());
    }

    #[test]
    fn test_spawn_on_start_lane() {
        let player = Player::spawn(STARTING_LIVES, MoveMode::Edge);
        assert_eq!(player.pos(), Vec2::new(250.0, 600.0));
        assert_eq!(player.pos().y, lane_y(LANE_START));
        assert_eq!(player.lives(), 3);
        assert!(player.is_alive());
    }

    #[test]
    fn test_one_cell_per_press() {
        let mut player = Player::spawn(3, MoveMode::Edge);
        let up = InputSnapshot::with_held(&[Key::Up]);
        for _ in 0..10 {
            player.tick(&up);
        }
        assert_eq!(player.pos().y, 550.0);
        assert_eq!(player.facing(), Facing::Up);

        player.tick(&InputSnapshot::empty());
        player.tick(&up);
        assert_eq!(player.pos().y, 500.0);
    }

    #[test]
    fn test_movement_clamped_to_field() {
        let mut player = Player::spawn(3, MoveMode::Edge);
        for _ in 0..10 {
            press(&mut player, Key::Right);
        }
        assert_eq!(player.pos().x, PLAYER_MAX_X);

        for _ in 0..20 {
            press(&mut player, Key::Left);
        }
        assert_eq!(player.pos().x, 0.0);

        press(&mut player, Key::Down);
        assert_eq!(player.pos().y, player_max_y());

        for _ in 0..20 {
            press(&mut player, Key::Up);
        }
        assert_eq!(player.pos().y, 0.0);
    }

    #[test]
    fn test_held_mode_repeats() {
        let mut player = Player::spawn(3, MoveMode::Held { repeat_frames: 2 });
        let left = InputSnapshot::with_held(&[Key::Left]);
        for _ in 0..4 {
            player.tick(&left);
        }
        // Steps on frames 1 and 3
        assert_eq!(player.pos().x, 150.0);
    }

    #[test]
    fn test_ride_clamps() {
        let mut player = Player::spawn(3, MoveMode::Edge);
        player.ride(2.0);
        assert_eq!(player.pos().x, 252.0);
        player.ride(1000.0);
        assert_eq!(player.pos().x, PLAYER_MAX_X);
        player.ride(-1000.0);
        assert_eq!(player.pos().x, 0.0);
    }

    #[test]
    fn test_held_key_after_reset_needs_release() {
        let mut player = Player::spawn(3, MoveMode::held());
        let up = InputSnapshot::with_held(&[Key::Up]);
        player.tick(&up);
        assert_eq!(player.pos().y, 550.0);

        player.lose_life();
        for _ in 0..(2 * HELD_REPEAT_FRAMES) {
            player.tick(&up);
            assert_eq!(player.pos(), player.start());
        }

        player.tick(&InputSnapshot::empty());
        player.tick(&up);
        assert_eq!(player.pos().y, 550.0);
    }

    #[test]
    fn test_lose_life_resets() {
        let mut player = Player::spawn(2, MoveMode::Edge);
        press(&mut player, Key::Up);
        press(&mut player, Key::Left);
        assert_eq!(player.lose_life(), 1);
        assert_eq!(player.pos(), player.start());
        assert_eq!(player.facing(), Facing::Up);
        assert_eq!(player.lose_life(), 0);
        assert!(!player.is_alive());
        assert_eq!(player.lose_life(), 0);
    }
}
