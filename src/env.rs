//! Gym-style environment wrapper
//!
//! Owns the match state, the arena config and the seeded RNG, and exposes the
//! usual single-agent contract: `reset` then `step` once per tick until the
//! episode terminates. Episodes are never truncated.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::EnvConfig;
use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{
    Action, MatchState, OpponentInput, RngState, TickEvents, TickInput, TickOutcome, tick,
};

/// Normalized view of the match fed to a policy
///
/// Layout: `[ball_x/width, ball_y/height, vx/max_speed, vy/max_speed,
/// p1_y/height, p2_y/height]`. Values are not clamped; boosted velocities and
/// a ball past the edge can leave `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Observation(pub [f32; OBS_DIM]);

impl Observation {
    pub fn from_state(state: &MatchState, config: &EnvConfig) -> Self {
        Self([
            state.ball.pos.x / config.width,
            state.ball.pos.y / config.height,
            state.ball.vel.x / config.max_ball_speed,
            state.ball.vel.y / config.max_ball_speed,
            state.left.y / config.height,
            state.right.y / config.height,
        ])
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

/// Per-step metadata. Always empty; kept for interface parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Info {}

/// Discrete action space of `n` choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrete {
    pub n: usize,
}

impl Discrete {
    pub fn contains(&self, index: usize) -> bool {
        index < self.n
    }
}

/// Box observation space with a uniform per-component envelope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSpace {
    pub low: f32,
    pub high: f32,
    pub shape: usize,
}

impl BoxSpace {
    pub fn contains(&self, obs: &Observation) -> bool {
        obs.0.len() == self.shape && obs.0.iter().all(|v| (self.low..=self.high).contains(v))
    }
}

/// Result of one environment step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub observation: Observation,
    pub reward: f64,
    pub terminated: bool,
    /// Always false: there is no time limit
    pub truncated: bool,
    pub info: Info,
    /// Bounces and paddle hits during this tick
    pub events: TickEvents,
}

impl Step {
    #[inline]
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Two-paddle environment; the agent controls the left paddle
#[derive(Debug, Clone)]
pub struct PaddleEnv {
    config: EnvConfig,
    state: MatchState,
    rng_state: RngState,
    rng: Pcg32,
    episodes: u64,
}

impl PaddleEnv {
    /// Build an environment and serve the first episode
    ///
    /// The config is trusted as-is; use [`PaddleEnv::from_config`] for
    /// configs that came from outside the program. Paddle clamping panics
    /// on a config whose paddle is taller than the arena; debug builds catch
    /// any invalid config here instead.
    pub fn new(config: EnvConfig, seed: u64) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid config: {config:?}");
        let rng_state = RngState::new(seed);
        let mut rng = rng_state.to_rng();
        let state = MatchState::new(&config, &mut rng);
        Self {
            config,
            state,
            rng_state,
            rng,
            episodes: 1,
        }
    }

    /// Validate the config, then build
    pub fn from_config(config: EnvConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, seed))
    }

    pub fn action_space(&self) -> Discrete {
        Discrete { n: ACTION_COUNT }
    }

    pub fn observation_space(&self) -> BoxSpace {
        BoxSpace {
            low: OBS_LOW,
            high: OBS_HIGH,
            shape: OBS_DIM,
        }
    }

    /// Start a new episode
    ///
    /// A seed reseeds the RNG; without one the current stream continues.
    pub fn reset(&mut self, seed: Option<u64>) -> (Observation, Info) {
        if let Some(seed) = seed {
            self.rng_state = RngState::new(seed);
            self.rng = self.rng_state.to_rng();
        }
        self.state = MatchState::new(&self.config, &mut self.rng);
        self.episodes += 1;
        log::debug!(
            "Episode {} served with velocity ({}, {})",
            self.episodes,
            self.state.ball.vel.x,
            self.state.ball.vel.y
        );
        (self.observation(), Info::default())
    }

    /// Advance one tick; a human opponent holds still
    pub fn step(&mut self, action: Action) -> Step {
        self.step_with_opponent(action, OpponentInput::Stay)
    }

    /// Advance one tick with an explicit human displacement for the right paddle
    ///
    /// `opponent` is ignored when the enemy is the computer.
    pub fn step_with_opponent(&mut self, action: Action, opponent: OpponentInput) -> Step {
        let input = TickInput { action, opponent };
        let TickOutcome {
            reward,
            outcome,
            events,
        } = tick(&mut self.state, &self.config, &input, &mut self.rng);

        if let Some(zone) = events.left_hit {
            log::trace!("Tick {}: left paddle hit ({:?})", self.state.ticks, zone);
        }
        if events.right_hit {
            log::trace!("Tick {}: right paddle hit", self.state.ticks);
        }
        if events.wall_bounce {
            log::trace!("Tick {}: wall bounce", self.state.ticks);
        }

        if let Some(outcome) = outcome {
            log::debug!(
                "Episode {} ended after {} ticks: {:?}",
                self.episodes,
                self.state.ticks,
                outcome
            );
        }

        Step {
            observation: self.observation(),
            reward,
            terminated: outcome.is_some(),
            truncated: false,
            info: Info::default(),
            events,
        }
    }

    pub fn observation(&self) -> Observation {
        Observation::from_state(&self.state, &self.config)
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Direct state access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Seed of the current RNG stream (last explicit reseed)
    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    /// Episodes served so far, including the current one
    pub fn episodes(&self) -> u64 {
        self.episodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces() {
        let env = PaddleEnv::new(EnvConfig::default(), 0);
        assert_eq!(env.action_space().n, 3);
        assert!(env.action_space().contains(2));
        assert!(!env.action_space().contains(3));

        let space = env.observation_space();
        assert_eq!(space.shape, 6);
        assert_eq!((space.low, space.high), (-1.0, 2.0));
        assert!(space.contains(&env.observation()));
    }

    #[test]
    fn test_reset_observation() {
        let mut env = PaddleEnv::new(EnvConfig::default(), 5);
        let (obs, info) = env.reset(Some(5));
        assert_eq!(info, Info::default());
        assert_eq!(obs.0[0], 0.5);
        assert_eq!(obs.0[1], 0.5);
        assert_eq!(obs.0[2].abs(), 0.5);
        assert_eq!(obs.0[3].abs(), 0.1);
        assert_eq!(obs.0[4], 0.5);
        assert_eq!(obs.0[5], 0.5);
        assert_eq!(env.episodes(), 2);
    }

    #[test]
    fn test_reseed_reproduces_serve() {
        let mut env = PaddleEnv::new(EnvConfig::default(), 0);
        let mut serves = Vec::new();
        for _ in 0..2 {
            env.reset(Some(42));
            serves.push(env.state().ball.vel);
        }
        assert_eq!(serves[0], serves[1]);
    }

    #[test]
    fn test_seeding_matches_rng_state() {
        let config = EnvConfig::default();
        let env = PaddleEnv::new(config.clone(), 77);
        let mut rng = RngState::new(77).to_rng();
        assert_eq!(env.state(), &MatchState::new(&config, &mut rng));
        assert_eq!(env.seed(), 77);

        let mut env = env;
        env.reset(Some(5));
        assert_eq!(env.seed(), 5);
        let mut rng = RngState::new(5).to_rng();
        assert_eq!(env.state(), &MatchState::new(&config, &mut rng));
    }

    #[test]
    fn test_step_reports_events() {
        let mut env = PaddleEnv::new(EnvConfig::versus_human(), 1);
        {
            let state = env.state_mut();
            state.ball.pos = glam::Vec2::new(778.0, 200.0);
            state.ball.vel = glam::Vec2::new(5.0, 0.0);
        }
        let step = env.step(Action::Stay);
        assert!(step.events.right_hit);
        assert_eq!(step.events.left_hit, None);
        assert!(!step.events.wall_bounce);

        {
            let state = env.state_mut();
            state.ball.pos = glam::Vec2::new(25.0, 200.0);
            state.ball.vel = glam::Vec2::new(-5.0, 0.0);
        }
        let step = env.step(Action::Stay);
        assert_eq!(step.events.left_hit, Some(crate::sim::PaddleZone::Center));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "invalid config")]
    fn test_new_rejects_invalid_config_in_debug() {
        let config = EnvConfig {
            paddle_h: 500.0,
            ..EnvConfig::default()
        };
        PaddleEnv::new(config, 0);
    }

    #[test]
    fn test_from_config_validates() {
        let config = EnvConfig {
            width: -1.0,
            ..EnvConfig::default()
        };
        assert!(PaddleEnv::from_config(config, 0).is_err());
    }

    #[test]
    fn test_step_never_truncates() {
        let mut env = PaddleEnv::new(EnvConfig::default(), 8);
        for _ in 0..500 {
            let step = env.step(Action::Stay);
            assert!(!step.truncated);
            if step.terminated {
                assert!(step.done());
                env.reset(None);
            }
        }
    }
}
