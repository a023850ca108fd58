//! # Gameworld
//!
//! Ten miniature arcade-style environments with a uniform reset/step
//! interface, pixel observations, and one-shot lifetime perturbations.
//!
//! Every game is a deterministic, single-threaded, fixed-timestep state
//! machine. A step applies the agent's action, advances physics and
//! stochastic spawning, resolves collisions into a reward and a termination
//! flag, and renders a 210x160 RGB frame. An environment may additionally
//! carry a perturbation schedule that mutates its colors or geometry
//! exactly once, at a configured global step count.
//!
//! ## Quick start
//!
//! ```rust
//! use gameworld::prelude::*;
//!
//! let config = GameConfig::new().seed(7);
//! let mut env = create_gameworld_env("Impact", &config).unwrap();
//! let (obs, _info) = env.reset().unwrap();
//! assert_eq!(obs.as_bytes().len(), 210 * 160 * 3);
//! let result = env.step(1).unwrap();
//! assert!(!result.truncated);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Environment contract, step engine, perturbations, and the ten games
pub mod env;

/// Software rasterizer producing the pixel observations
pub mod render;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::env::config::GameConfig;
    pub use crate::env::engine::{Game, GameEnv, Outcome};
    pub use crate::env::factory::{create_gameworld_env, env_id, PixelEnv, GAMES};
    pub use crate::env::perturb::PerturbKind;
    pub use crate::env::{Environment, SpaceInfo, SpaceType, StepInfo, StepResult};
    pub use crate::render::{Frame, Rgb, FRAME_HEIGHT, FRAME_WIDTH};
}

/// Current version of gameworld
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }
}
