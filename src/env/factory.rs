//! Construction of environments by game name
//!
//! [`create_gameworld_env`] erases the per-game type so callers can hold
//! any of the ten games behind one trait object; [`env_id`] produces the
//! registry-style identifier for a game.

use anyhow::{anyhow, Result};

use crate::env::config::GameConfig;
use crate::env::engine::GameEnv;
use crate::env::games::{
    Aviate, Bounce, Cross, Drive, Explode, Fruits, Gold, Hunt, Impact, Jump,
};
use crate::env::Environment;
use crate::render::Frame;

/// The ten game names accepted by [`create_gameworld_env`]
pub const GAMES: [&str; 10] = [
    "Aviate", "Bounce", "Cross", "Drive", "Explode", "Fruits", "Gold", "Hunt", "Impact", "Jump",
];

/// Namespace used in registry ids
pub const NAMESPACE: &str = "Gameworld";

/// Boxed environment over raw pixel observations
pub type PixelEnv = Box<dyn Environment<Observation = Frame, Action = i64>>;

/// Registry-style id for a game, e.g. `Gameworld-Impact-v0`
pub fn env_id(game: &str) -> String {
    format!("{NAMESPACE}-{game}-v0")
}

/// Build the named game behind a [`PixelEnv`]
///
/// Names are matched case-sensitively against [`GAMES`].
pub fn create_gameworld_env(game: &str, config: &GameConfig) -> Result<PixelEnv> {
    Ok(match game {
        "Aviate" => Box::new(GameEnv::new(Aviate::default(), config)?),
        "Bounce" => Box::new(GameEnv::new(Bounce::default(), config)?),
        "Cross" => Box::new(GameEnv::new(Cross::default(), config)?),
        "Drive" => Box::new(GameEnv::new(Drive::default(), config)?),
        "Explode" => Box::new(GameEnv::new(Explode::default(), config)?),
        "Fruits" => Box::new(GameEnv::new(Fruits::default(), config)?),
        "Gold" => Box::new(GameEnv::new(Gold::default(), config)?),
        "Hunt" => Box::new(GameEnv::new(Hunt::default(), config)?),
        "Impact" => Box::new(GameEnv::new(Impact::default(), config)?),
        "Jump" => Box::new(GameEnv::new(Jump::default(), config)?),
        other => {
            return Err(anyhow!("unsupported game in the gameworld set: {other}"));
        }
    })
}

#[cfg(test)]
impl std::fmt::Debug for dyn Environment<Observation = Frame, Action = i64> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PixelEnv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_game_constructs() {
        let config = GameConfig::new().seed(0);
        for game in GAMES {
            let mut env = create_gameworld_env(game, &config)
                .unwrap_or_else(|e| panic!("{game} failed to construct: {e}"));
            let (obs, _info) = env.reset().unwrap();
            assert_eq!(obs.as_bytes().len(), 210 * 160 * 3, "{game} observation size");
        }
    }

    #[test]
    fn test_unknown_game_is_rejected() {
        let config = GameConfig::new();
        let err = create_gameworld_env("Pinball", &config).unwrap_err();
        assert!(err.to_string().contains("Pinball"), "error names the offending game");
    }

    #[test]
    fn test_env_id_format() {
        assert_eq!(env_id("Impact"), "Gameworld-Impact-v0");
    }

    #[test]
    fn test_invalid_config_propagates() {
        let config = GameConfig::new().perturb_step(0);
        assert!(create_gameworld_env("Bounce", &config).is_err());
    }
}
