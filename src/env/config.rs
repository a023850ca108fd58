//! Environment construction parameters
//!
//! [`GameConfig`] carries the options every game recognizes: the optional
//! one-shot perturbation, the global step at which it fires, and an
//! optional RNG seed. Game-specific starting positions live on the game
//! constructors themselves.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::env::perturb::PerturbKind;

/// Default perturbation trigger step
pub const DEFAULT_PERTURB_STEP: u64 = 5000;

/// Common construction parameters
///
/// Each environment instance owns its own random generator. Leaving `seed`
/// unset draws from entropy; setting it makes the instance fully
/// deterministic regardless of how many other instances exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Optional one-shot perturbation kind
    pub perturb: Option<PerturbKind>,

    /// Global step count at which the perturbation fires (exact match)
    pub perturb_step: u64,

    /// Seed for the per-instance random generator
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { perturb: None, perturb_step: DEFAULT_PERTURB_STEP, seed: None }
    }
}

impl GameConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the perturbation kind
    pub fn perturb(mut self, kind: PerturbKind) -> Self {
        self.perturb = Some(kind);
        self
    }

    /// Set the perturbation kind from its string form
    ///
    /// Fails on anything other than `None`, `"None"`, `"color"`, `"shape"`.
    pub fn perturb_str(mut self, value: Option<&str>) -> Result<Self> {
        self.perturb = PerturbKind::parse(value)?;
        Ok(self)
    }

    /// Set the perturbation trigger step
    pub fn perturb_step(mut self, step: u64) -> Self {
        self.perturb_step = step;
        self
    }

    /// Set the RNG seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.perturb_step == 0 {
            return Err(anyhow!("perturb_step must be a positive integer"));
        }
        Ok(())
    }
}
