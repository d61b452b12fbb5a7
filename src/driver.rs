//! Fixed-timestep driver loop
//!
//! Glue between a policy, an optional human opponent and the environment: one
//! environment step per tick, automatic reset on episode end, and a frame view
//! a renderer can draw from.

use std::time::{Duration, Instant};

use glam::Vec2;

use crate::consts::*;
use crate::env::{Observation, PaddleEnv};
use crate::policy::Policy;
use crate::scoreboard::{EpisodeEnd, EpisodeResult, Scoreboard};
use crate::sim::OpponentInput;

/// Accumulator that converts wall-clock time into whole ticks
#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f32,
    dt: f32,
    max_substeps: u32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(TICK_RATE, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(rate_hz: u32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            dt: 1.0 / rate_hz as f32,
            max_substeps,
        }
    }

    /// Seconds per tick
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Add elapsed seconds and return how many ticks to run now
    ///
    /// Long stalls are capped so a slow frame cannot snowball.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.min(MAX_FRAME_TIME);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            self.accumulator -= self.dt;
            substeps += 1;
        }
        substeps
    }
}

/// Everything a renderer needs to draw one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub ball: Vec2,
    pub ball_radius: f32,
    pub p1_y: f32,
    pub p2_y: f32,
    pub paddle_w: f32,
    pub paddle_h: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn capture(env: &PaddleEnv) -> Self {
        let state = env.state();
        let config = env.config();
        Self {
            ball: state.ball.pos,
            ball_radius: BALL_RADIUS,
            p1_y: state.left.y,
            p2_y: state.right.y,
            paddle_w: config.paddle_w,
            paddle_h: config.paddle_h,
            width: config.width,
            height: config.height,
        }
    }
}

/// Result of one driver tick
#[derive(Debug, Clone, Copy)]
pub struct DriverTick {
    /// State after the tick (after the reset, if the episode ended)
    pub frame: Frame,
    pub finished: Option<EpisodeResult>,
}

/// Runs a policy against the environment's opponent
pub struct Driver<P: Policy> {
    env: PaddleEnv,
    policy: P,
    obs: Observation,
    episode_return: f64,
    /// Driver-side guard against endless rallies; the environment never truncates
    max_ticks: Option<u64>,
    scoreboard: Scoreboard,
}

impl<P: Policy> Driver<P> {
    pub fn new(env: PaddleEnv, policy: P) -> Self {
        let obs = env.observation();
        Self {
            env,
            policy,
            obs,
            episode_return: 0.0,
            max_ticks: None,
            scoreboard: Scoreboard::new(),
        }
    }

    pub fn with_max_ticks(mut self, max_ticks: Option<u64>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn env(&self) -> &PaddleEnv {
        &self.env
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Run one tick with the given human input (ignored against the computer)
    pub fn tick(&mut self, opponent: OpponentInput) -> DriverTick {
        let action = self.policy.act(&self.obs);
        let step = self.env.step_with_opponent(action, opponent);
        self.episode_return += step.reward;
        self.obs = step.observation;

        let ticks = self.env.state().ticks;
        let end = match self.env.state().outcome {
            Some(outcome) if step.terminated => Some(EpisodeEnd::from(outcome)),
            _ if self.max_ticks.is_some_and(|max| ticks >= max) => Some(EpisodeEnd::Draw),
            _ => None,
        };

        let finished = end.map(|end| {
            let result = EpisodeResult {
                end,
                ticks,
                total_reward: self.episode_return,
            };
            log::info!(
                "Episode {} ({}): {:?} after {} ticks, return {:.3}",
                self.env.episodes(),
                self.policy.name(),
                end,
                ticks,
                self.episode_return
            );
            self.scoreboard.record(result);
            self.obs = self.env.reset(None).0;
            self.episode_return = 0.0;
            result
        });

        DriverTick {
            frame: Frame::capture(&self.env),
            finished,
        }
    }

    /// Play `episodes` more episodes with no human input
    ///
    /// With `realtime` the loop is paced to the tick rate; otherwise it runs
    /// as fast as possible.
    pub fn run(&mut self, episodes: u32, realtime: bool) -> &Scoreboard {
        let target = self.scoreboard.episodes() + episodes;

        if !realtime {
            while self.scoreboard.episodes() < target {
                self.tick(OpponentInput::Stay);
            }
            return &self.scoreboard;
        }

        let mut clock = FixedStep::default();
        let mut last = Instant::now();
        while self.scoreboard.episodes() < target {
            let now = Instant::now();
            let elapsed = now.duration_since(last).as_secs_f32();
            last = now;

            for _ in 0..clock.advance(elapsed) {
                self.tick(OpponentInput::Stay);
                if self.scoreboard.episodes() >= target {
                    break;
                }
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        &self.scoreboard
    }
}
