//! Fixed tick simulation
//!
//! One call advances the match by exactly one tick: paddles move, the ball
//! moves, collisions resolve, then the tick is scored.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{
    PaddleZone, bounce_walls, deflect_left, deflect_right, left_paddle_contact,
    right_paddle_contact,
};
use super::opponent::{OpponentInput, computer_move};
use super::state::{MatchState, Outcome};
use crate::config::{EnemyMode, EnvConfig};
use crate::consts::*;
use crate::error::EnvError;

/// Agent command for the left paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Action {
    #[default]
    Stay = 0,
    Up = 1,
    Down = 2,
}

impl Action {
    pub const ALL: [Action; ACTION_COUNT] = [Action::Stay, Action::Up, Action::Down];

    /// Map a discrete action index (e.g. a policy's argmax) to an action
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Signed displacement; up moves toward y = 0
    #[inline]
    pub fn displacement(&self, speed: f32) -> f32 {
        match self {
            Action::Stay => 0.0,
            Action::Up => -speed,
            Action::Down => speed,
        }
    }
}

impl TryFrom<u8> for Action {
    type Error = EnvError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value as usize).ok_or(EnvError::InvalidAction(value))
    }
}

/// Commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub action: Action,
    /// Right paddle displacement; only read when the enemy is human
    pub opponent: OpponentInput,
}

/// What happened during a tick (for logging and rendering cues)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickEvents {
    pub wall_bounce: bool,
    pub left_hit: Option<PaddleZone>,
    pub right_hit: bool,
}

/// Scored result of a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub reward: f64,
    /// Set when the ball left the arena on this tick
    pub outcome: Option<Outcome>,
    pub events: TickEvents,
}

impl TickOutcome {
    #[inline]
    pub fn terminated(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Advance the match by one tick
///
/// `rng` is only sampled for the computer opponent, once per tick.
pub fn tick<R: Rng + ?Sized>(
    state: &mut MatchState,
    config: &EnvConfig,
    input: &TickInput,
    rng: &mut R,
) -> TickOutcome {
    if state.is_terminated() {
        log::warn!("Stepping a finished episode (tick {}); reset expected", state.ticks);
    }
    state.ticks += 1;

    state
        .left
        .shift(input.action.displacement(config.paddle_speed), config);

    let opponent_dy = match config.enemy_mode {
        EnemyMode::Computer => computer_move(
            rng.random::<f32>(),
            state.right.y,
            state.ball.pos.y,
            config.paddle_speed,
            config.opponent_error_rate,
        ),
        EnemyMode::Human => input.opponent.displacement(config.paddle_speed),
    };
    state.right.shift(opponent_dy, config);

    state.ball.advance();

    let mut events = TickEvents {
        wall_bounce: bounce_walls(&mut state.ball, config.height),
        ..Default::default()
    };

    if let Some(zone) = left_paddle_contact(&state.ball, &state.left, config) {
        state.ball.vel = deflect_left(state.ball.vel, zone, config.max_ball_speed);
        events.left_hit = Some(zone);
    }

    if right_paddle_contact(&state.ball, &state.right, config) {
        state.ball.vel = deflect_right(state.ball.vel);
        events.right_hit = true;
    }

    let outcome = if state.ball.pos.x > config.width {
        Some(Outcome::AgentScored)
    } else if state.ball.pos.x <= 0.0 {
        Some(Outcome::OpponentScored)
    } else {
        None
    };

    let reward = match outcome {
        Some(outcome) => {
            if state.outcome.is_none() {
                state.outcome = Some(outcome);
            }
            outcome.reward()
        }
        None => SURVIVAL_REWARD,
    };

    TickOutcome {
        reward,
        outcome,
        events,
    }
}
