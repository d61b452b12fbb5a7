//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall-clock time
//! - Randomness only through the caller's RNG
//! - No rendering, input or platform dependencies

pub mod collision;
pub mod opponent;
pub mod state;
pub mod tick;

pub use collision::{PaddleZone, bounce_walls, deflect_left, deflect_right};
pub use opponent::{OpponentInput, computer_move};
pub use state::{Ball, MatchState, Outcome, Paddle, RngState};
pub use tick::{Action, TickEvents, TickInput, TickOutcome, tick};
