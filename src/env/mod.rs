//! Environment contract and implementations
//!
//! This module defines the core reset/step interface shared by all ten
//! gameworld games, the generic step engine that drives them, and the
//! factory that maps game names to constructed environments.

use anyhow::Result;

pub mod config;
pub mod engine;
pub mod factory;
pub mod games;
pub mod perturb;

/// Core trait for pixel environments
///
/// A call to [`Environment::step`] performs one full frame update and runs
/// to completion before returning; there are no suspension points and no
/// recoverable error paths inside a step.
pub trait Environment {
    /// Observation type
    type Observation;

    /// Action type
    type Action;

    /// Reset per-episode state and return the initial observation
    ///
    /// Lifetime-scoped state (the global step counter and the style
    /// configuration) survives resets.
    fn reset(&mut self) -> Result<(Self::Observation, StepInfo)>;

    /// Advance the environment by one frame
    fn step(&mut self, action: Self::Action) -> Result<StepResult<Self::Observation>>;

    /// Get the observation space description
    fn observation_space(&self) -> SpaceInfo;

    /// Get the action space description
    fn action_space(&self) -> SpaceInfo;
}

/// Result of an environment step
#[derive(Debug, Clone)]
pub struct StepResult<O> {
    /// Next observation
    pub observation: O,

    /// Reward received
    pub reward: f32,

    /// Whether the episode terminated
    pub terminated: bool,

    /// Whether the episode was truncated
    ///
    /// Always false from the core; episode-length limits belong to an
    /// external wrapper.
    pub truncated: bool,

    /// Additional info
    pub info: StepInfo,
}

/// Space information for observations and actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceInfo {
    /// Shape of the space
    pub shape: Vec<usize>,

    /// Data type
    pub dtype: SpaceType,
}

/// Space data types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceType {
    /// Discrete space with n options
    Discrete(usize),

    /// Byte-valued box space (pixels in 0..=255)
    Box,
}

/// Additional step information; empty for every gameworld game
#[derive(Debug, Clone, Copy, Default)]
pub struct StepInfo {}
