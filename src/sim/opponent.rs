//! Right paddle control
//!
//! The computer opponent is a pure function of one uniform draw plus state, so
//! callers decide where randomness comes from. A human opponent hands the core
//! an explicit displacement each tick instead of editing paddle state directly.

use serde::{Deserialize, Serialize};

/// Human displacement request for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpponentInput {
    #[default]
    Stay,
    Up,
    Down,
}

impl OpponentInput {
    /// Signed displacement for a paddle moving `speed` units per tick
    #[inline]
    pub fn displacement(&self, speed: f32) -> f32 {
        match self {
            OpponentInput::Stay => 0.0,
            OpponentInput::Up => -speed,
            OpponentInput::Down => speed,
        }
    }

    /// Combine two held keys; opposing keys cancel out
    pub fn from_keys(up: bool, down: bool) -> Self {
        match (up, down) {
            (true, false) => OpponentInput::Up,
            (false, true) => OpponentInput::Down,
            _ => OpponentInput::Stay,
        }
    }
}

/// Displacement chosen by the scripted opponent
///
/// `draw` is a uniform sample from `[0, 1)`. The paddle skips its move when the
/// draw falls below `error_rate`; otherwise it steps `speed` toward `ball_y`
/// and stays put if already level with the ball.
pub fn computer_move(draw: f32, paddle_y: f32, ball_y: f32, speed: f32, error_rate: f32) -> f32 {
    if draw < error_rate {
        return 0.0;
    }
    if paddle_y < ball_y {
        speed
    } else if paddle_y > ball_y {
        -speed
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_ball() {
        assert_eq!(computer_move(0.5, 200.0, 250.0, 10.0, 0.1), 10.0);
        assert_eq!(computer_move(0.5, 200.0, 150.0, 10.0, 0.1), -10.0);
        assert_eq!(computer_move(0.5, 200.0, 200.0, 10.0, 0.1), 0.0);
    }

    #[test]
    fn test_skips_when_draw_below_error_rate() {
        assert_eq!(computer_move(0.05, 200.0, 250.0, 10.0, 0.1), 0.0);
        // Boundary draw counts as a move
        assert_eq!(computer_move(0.1, 200.0, 250.0, 10.0, 0.1), 10.0);
    }

    #[test]
    fn test_error_rate_extremes() {
        for draw in [0.0, 0.25, 0.5, 0.999] {
            assert_eq!(computer_move(draw, 100.0, 300.0, 10.0, 0.0), 10.0);
            assert_eq!(computer_move(draw, 100.0, 300.0, 10.0, 1.0), 0.0);
        }
    }

    #[test]
    fn test_keys_cancel() {
        assert_eq!(OpponentInput::from_keys(true, true), OpponentInput::Stay);
        assert_eq!(OpponentInput::from_keys(true, false), OpponentInput::Up);
        assert_eq!(OpponentInput::from_keys(false, true), OpponentInput::Down);
        assert_eq!(OpponentInput::Up.displacement(10.0), -10.0);
    }
}
