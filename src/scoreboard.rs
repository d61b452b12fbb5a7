//! Match statistics across episodes
//!
//! Tallies wins and losses and keeps the most recent episodes for the summary
//! printed at the end of a run.

use serde::{Deserialize, Serialize};

use crate::sim::Outcome;

/// Maximum number of recent episodes to keep
pub const MAX_RECENT_EPISODES: usize = 10;

/// How an episode finished, from the agent's side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeEnd {
    Win,
    Loss,
    /// Cut off by the driver's tick guard
    Draw,
}

impl From<Outcome> for EpisodeEnd {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::AgentScored => EpisodeEnd::Win,
            Outcome::OpponentScored => EpisodeEnd::Loss,
        }
    }
}

/// One finished episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeResult {
    pub end: EpisodeEnd,
    pub ticks: u64,
    /// Sum of rewards over the episode
    pub total_reward: f64,
}

/// Running tally of a session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub total_ticks: u64,
    /// Longest episode in ticks
    pub longest_rally: u64,
    pub best_return: Option<f64>,
    /// Newest first
    pub recent: Vec<EpisodeResult>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: EpisodeResult) {
        match result.end {
            EpisodeEnd::Win => self.wins += 1,
            EpisodeEnd::Loss => self.losses += 1,
            EpisodeEnd::Draw => self.draws += 1,
        }
        self.total_ticks += result.ticks;
        self.longest_rally = self.longest_rally.max(result.ticks);
        self.best_return = Some(match self.best_return {
            Some(best) => best.max(result.total_reward),
            None => result.total_reward,
        });

        self.recent.insert(0, result);
        self.recent.truncate(MAX_RECENT_EPISODES);
    }

    pub fn episodes(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    pub fn is_empty(&self) -> bool {
        self.episodes() == 0
    }

    /// Fraction of episodes won (0 when nothing was played)
    pub fn win_rate(&self) -> f64 {
        match self.episodes() {
            0 => 0.0,
            n => self.wins as f64 / n as f64,
        }
    }

    pub fn mean_episode_ticks(&self) -> f64 {
        match self.episodes() {
            0 => 0.0,
            n => self.total_ticks as f64 / n as f64,
        }
    }
}
