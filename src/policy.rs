//! Policies that drive the left paddle
//!
//! A trained policy is loaded from a JSON checkpoint holding a linear scoring
//! layer over the observation; the action with the highest score wins.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::env::Observation;
use crate::error::PolicyError;
use crate::sim::Action;

/// Current checkpoint format version
pub const CHECKPOINT_VERSION: u32 = 1;

/// Maps observations to actions
pub trait Policy {
    fn act(&mut self, obs: &Observation) -> Action;

    /// Policy name for logs
    fn name(&self) -> &str;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn act(&mut self, obs: &Observation) -> Action {
        (**self).act(obs)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// On-disk checkpoint layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub version: u32,
    /// One row of observation weights per action
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
}

/// Linear action scorer: `logits = W · obs + b`, act = argmax
#[derive(Debug, Clone, PartialEq)]
pub struct LinearPolicy {
    weights: [[f32; OBS_DIM]; ACTION_COUNT],
    bias: [f32; ACTION_COUNT],
}

impl LinearPolicy {
    pub fn new(weights: [[f32; OBS_DIM]; ACTION_COUNT], bias: [f32; ACTION_COUNT]) -> Self {
        Self { weights, bias }
    }

    pub fn logits(&self, obs: &Observation) -> [f32; ACTION_COUNT] {
        let mut logits = self.bias;
        for (logit, row) in logits.iter_mut().zip(&self.weights) {
            *logit += row.iter().zip(obs.as_slice()).map(|(w, x)| w * x).sum::<f32>();
        }
        logits
    }

    pub fn from_checkpoint(checkpoint: Checkpoint) -> Result<Self, PolicyError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(PolicyError::UnsupportedVersion {
                found: checkpoint.version,
                expected: CHECKPOINT_VERSION,
            });
        }

        let rows_ok = checkpoint.weights.len() == ACTION_COUNT
            && checkpoint.weights.iter().all(|row| row.len() == OBS_DIM);
        if !rows_ok {
            let cols: Vec<usize> = checkpoint.weights.iter().map(Vec::len).collect();
            return Err(PolicyError::Shape {
                tensor: "weights",
                found: format!("{}x{:?}", checkpoint.weights.len(), cols),
                expected: format!("{ACTION_COUNT}x{OBS_DIM}"),
            });
        }
        if checkpoint.bias.len() != ACTION_COUNT {
            return Err(PolicyError::Shape {
                tensor: "bias",
                found: checkpoint.bias.len().to_string(),
                expected: ACTION_COUNT.to_string(),
            });
        }

        if checkpoint.weights.iter().flatten().any(|w| !w.is_finite()) {
            return Err(PolicyError::NonFinite { tensor: "weights" });
        }
        if checkpoint.bias.iter().any(|b| !b.is_finite()) {
            return Err(PolicyError::NonFinite { tensor: "bias" });
        }

        let mut weights = [[0.0; OBS_DIM]; ACTION_COUNT];
        for (dst, src) in weights.iter_mut().zip(&checkpoint.weights) {
            dst.copy_from_slice(src);
        }
        let mut bias = [0.0; ACTION_COUNT];
        bias.copy_from_slice(&checkpoint.bias);

        Ok(Self { weights, bias })
    }

    pub fn to_checkpoint(&self) -> Checkpoint {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            weights: self.weights.iter().map(|row| row.to_vec()).collect(),
            bias: self.bias.to_vec(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, PolicyError> {
        let checkpoint: Checkpoint = serde_json::from_str(json)?;
        Self::from_checkpoint(checkpoint)
    }
}

impl Policy for LinearPolicy {
    fn act(&mut self, obs: &Observation) -> Action {
        let logits = self.logits(obs);
        // First maximum wins ties
        let mut best = 0;
        for (i, logit) in logits.iter().enumerate().skip(1) {
            if *logit > logits[best] {
                best = i;
            }
        }
        Action::from_index(best).unwrap_or_default()
    }

    fn name(&self) -> &str {
        "linear"
    }
}

/// Load a linear policy checkpoint from disk
pub fn load_checkpoint(path: impl AsRef<Path>) -> Result<LinearPolicy, PolicyError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let policy = LinearPolicy::from_json_str(&json)?;
    log::info!("Loaded policy checkpoint {}", path.display());
    Ok(policy)
}

/// Scripted policy: chase the ball's height
#[derive(Debug, Clone, Copy)]
pub struct TrackBall {
    /// Normalized distance within which the paddle holds still
    pub dead_zone: f32,
}

impl Default for TrackBall {
    fn default() -> Self {
        Self { dead_zone: 0.02 }
    }
}

impl Policy for TrackBall {
    fn act(&mut self, obs: &Observation) -> Action {
        let ball_y = obs.0[1];
        let paddle_y = obs.0[4];
        if ball_y < paddle_y - self.dead_zone {
            Action::Up
        } else if ball_y > paddle_y + self.dead_zone {
            Action::Down
        } else {
            Action::Stay
        }
    }

    fn name(&self) -> &str {
        "track-ball"
    }
}
