//! Match state and core simulation types
//!
//! Everything a tick reads or writes lives here. A state is built fresh at
//! every reset and replaced wholesale; nothing carries over between episodes.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::EnvConfig;
use crate::consts::*;

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Position in world units, origin at the top-left corner
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
}

impl Ball {
    /// Ball at the arena center with a serve velocity of random signs
    pub fn serve<R: Rng + ?Sized>(config: &EnvConfig, rng: &mut R) -> Self {
        let sign_x = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let sign_y = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        Self {
            pos: Vec2::new(config.width / 2.0, config.height / 2.0),
            vel: Vec2::new(SERVE_SPEED_X * sign_x, SERVE_SPEED_Y * sign_y),
        }
    }

    /// Advance one tick along the current velocity
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// A paddle, identified by its vertical center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub y: f32,
}

impl Paddle {
    pub fn centered(config: &EnvConfig) -> Self {
        Self {
            y: config.height / 2.0,
        }
    }

    /// Move by `dy` and clamp to the arena
    pub fn shift(&mut self, dy: f32, config: &EnvConfig) {
        self.y = config.clamp_paddle(self.y + dy);
    }

    /// Signed vertical distance from the paddle center to `y`
    #[inline]
    pub fn offset_to(&self, y: f32) -> f32 {
        y - self.y
    }
}

/// How an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Ball passed the right edge
    AgentScored,
    /// Ball passed the left edge
    OpponentScored,
}

impl Outcome {
    pub fn reward(&self) -> f64 {
        match self {
            Outcome::AgentScored => WIN_REWARD,
            Outcome::OpponentScored => LOSS_REWARD,
        }
    }
}

/// RNG seed wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete state of one episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub ball: Ball,
    /// Agent paddle (left edge)
    pub left: Paddle,
    /// Opponent paddle (right edge)
    pub right: Paddle,
    /// Ticks elapsed in this episode
    pub ticks: u64,
    /// Set on the tick the ball leaves the arena
    pub outcome: Option<Outcome>,
}

impl MatchState {
    /// Fresh episode: ball served from the center, both paddles centered
    pub fn new<R: Rng + ?Sized>(config: &EnvConfig, rng: &mut R) -> Self {
        Self {
            ball: Ball::serve(config, rng),
            left: Paddle::centered(config),
            right: Paddle::centered(config),
            ticks: 0,
            outcome: None,
        }
    }

    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.outcome.is_some()
    }

    #[inline]
    pub fn ball_x(&self) -> f32 {
        self.ball.pos.x
    }

    #[inline]
    pub fn ball_y(&self) -> f32 {
        self.ball.pos.y
    }

    #[inline]
    pub fn p1_y(&self) -> f32 {
        self.left.y
    }

    #[inline]
    pub fn p2_y(&self) -> f32 {
        self.right.y
    }
}
