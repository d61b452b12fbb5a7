//! Paddle Duel - a two-paddle ball-bounce reinforcement-learning environment
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddles, ball, collisions, scoring)
//! - `env`: Gym-style `reset`/`step` wrapper with observation and action spaces
//! - `config`: Arena configuration loaded from JSON
//! - `policy`: Policies and checkpoint loading
//! - `driver`: Fixed-timestep loop that plays a policy against an opponent
//! - `scoreboard`: Episode statistics

pub mod config;
pub mod driver;
pub mod env;
pub mod error;
pub mod policy;
pub mod scoreboard;
pub mod sim;

pub use config::{EnemyMode, EnvConfig};
pub use driver::{Driver, FixedStep, Frame};
pub use env::{BoxSpace, Discrete, Info, Observation, PaddleEnv, Step};
pub use error::{ConfigError, EnvError, PolicyError};
pub use policy::{LinearPolicy, Policy, TrackBall, load_checkpoint};
pub use scoreboard::{EpisodeEnd, EpisodeResult, Scoreboard};
pub use sim::{Action, OpponentInput};

/// Game configuration constants
pub mod consts {
    /// Driver tick rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Maximum ticks per driver frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock gap (seconds) the driver will catch up on
    pub const MAX_FRAME_TIME: f32 = 0.1;

    /// Default arena
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 400.0;
    pub const PADDLE_HEIGHT: f32 = 80.0;
    pub const PADDLE_WIDTH: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 10.0; // units per tick
    pub const MAX_BALL_SPEED: f32 = 10.0;
    pub const OPPONENT_ERROR_RATE: f32 = 0.10;

    /// Serve speed magnitudes; signs are random
    pub const SERVE_SPEED_X: f32 = 5.0;
    pub const SERVE_SPEED_Y: f32 = 1.0;

    /// Half-width of the paddle's dead-center zone
    pub const CENTER_ZONE_HALF_WIDTH: f32 = 1.0;
    /// Horizontal boost for a dead-center hit
    pub const CENTER_BOOST: f32 = 5.0;
    /// Increment used by the inner-zone rule
    pub const INNER_BOOST: f32 = 2.0;
    /// Horizontal speed lost on an edge hit
    pub const EDGE_DRAG: f32 = 3.0;
    /// Floor on horizontal speed after an edge hit
    pub const EDGE_MIN_SPEED: f32 = 1.0;
    /// Vertical kick from an edge hit
    pub const EDGE_SPIN: f32 = 5.0;

    /// Rewards
    pub const SURVIVAL_REWARD: f64 = 0.001;
    pub const WIN_REWARD: f64 = 1.0;
    pub const LOSS_REWARD: f64 = -1.0;

    /// Discrete actions: stay, up, down
    pub const ACTION_COUNT: usize = 3;
    /// Observation vector length
    pub const OBS_DIM: usize = 6;
    /// Declared observation envelope (not enforced)
    pub const OBS_LOW: f32 = -1.0;
    pub const OBS_HIGH: f32 = 2.0;

    /// On-screen ball radius for renderers
    pub const BALL_RADIUS: f32 = 10.0;
}
