//! Generic fixed-timestep step engine
//!
//! [`GameEnv`] owns everything the ten games have in common: the global
//! step counter, the per-instance random generator, and the perturbation
//! schedule. The game itself is an injected ruleset implementing [`Game`],
//! which supplies the per-frame state transition (action, spawning,
//! integration, collision resolution) and the rendering of its entities.
//!
//! Ownership of the style configuration is enforced structurally: a
//! game's style is written only by [`Game::apply_perturbation`], and the
//! engine is the only caller of that method.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::env::config::GameConfig;
use crate::env::perturb::{PerturbKind, PerturbSchedule};
use crate::env::{Environment, SpaceInfo, SpaceType, StepInfo, StepResult};
use crate::render::{Frame, FRAME_HEIGHT, FRAME_WIDTH};

/// Reward and termination produced by one frame update
#[derive(Debug, Clone, Copy, Default)]
pub struct Outcome {
    /// Reward delta for this step
    pub reward: f32,

    /// Whether the episode ended this step
    pub terminated: bool,
}

/// Per-game ruleset driven by [`GameEnv`]
///
/// Implementations keep the original frame order inside [`Game::update`]:
/// player action, automatic/AI movement, spawning, position integration,
/// collision resolution, culling. Later stages depend on positions updated
/// by earlier stages, so the order must not change.
pub trait Game {
    /// Game name as used in the factory and registry ids
    const NAME: &'static str;

    /// Number of discrete actions
    const ACTIONS: usize;

    /// Whether `reset` also clears the global step counter
    ///
    /// Most games keep the counter for the whole environment lifetime;
    /// Impact clears it per episode. Preserved per-game rather than
    /// unified, since changing it would change perturbation timing.
    const RESET_CLEARS_COUNTER: bool = false;

    /// Reinitialize all per-episode entities
    ///
    /// Must not touch the style configuration.
    fn reset(&mut self, rng: &mut StdRng);

    /// Advance one frame and resolve it into a reward and termination flag
    ///
    /// Actions outside the known set act as "stay".
    fn update(&mut self, action: i64, rng: &mut StdRng) -> Outcome;

    /// Mutate the style configuration for the given perturbation kind
    ///
    /// Called exactly once per lifetime by the engine, when the step
    /// counter equals the configured trigger.
    fn apply_perturbation(&mut self, kind: PerturbKind);

    /// Render the current state
    ///
    /// `alt_shapes` selects the post-perturbation drawing primitives.
    fn draw(&self, alt_shapes: bool) -> Frame;
}

/// Step engine wrapping a [`Game`] ruleset
#[derive(Debug)]
pub struct GameEnv<G: Game> {
    game: G,
    schedule: PerturbSchedule,
    num_steps: u64,
    rng: StdRng,
}

impl<G: Game> GameEnv<G> {
    /// Construct an environment around a game ruleset
    ///
    /// The game is reset once so the first observation is valid even
    /// before an explicit `reset` call.
    pub fn new(mut game: G, config: &GameConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        game.reset(&mut rng);
        Ok(Self {
            game,
            schedule: PerturbSchedule::new(config.perturb, config.perturb_step),
            num_steps: 0,
            rng,
        })
    }

    /// Immutable access to the wrapped game
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Mutable access to the wrapped game, for scenario setup in tests
    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    /// Steps taken since construction (or, for episode-scoped games,
    /// since the last reset)
    pub fn num_steps(&self) -> u64 {
        self.num_steps
    }

    fn render(&self) -> Frame {
        self.game.draw(self.schedule.shapes_swapped(self.num_steps))
    }
}

impl<G: Game> Environment for GameEnv<G> {
    type Observation = Frame;
    type Action = i64;

    fn reset(&mut self) -> Result<(Frame, StepInfo)> {
        self.game.reset(&mut self.rng);
        if G::RESET_CLEARS_COUNTER {
            self.num_steps = 0;
        }
        Ok((self.render(), StepInfo::default()))
    }

    fn step(&mut self, action: i64) -> Result<StepResult<Frame>> {
        let outcome = self.game.update(action, &mut self.rng);

        self.num_steps += 1;
        if let Some(kind) = self.schedule.due(self.num_steps) {
            tracing::info!(game = G::NAME, ?kind, step = self.num_steps, "applying perturbation");
            self.game.apply_perturbation(kind);
        }

        Ok(StepResult {
            observation: self.render(),
            reward: outcome.reward,
            terminated: outcome.terminated,
            truncated: false,
            info: StepInfo::default(),
        })
    }

    fn observation_space(&self) -> SpaceInfo {
        SpaceInfo { shape: vec![FRAME_HEIGHT, FRAME_WIDTH, 3], dtype: SpaceType::Box }
    }

    fn action_space(&self) -> SpaceInfo {
        SpaceInfo { shape: vec![], dtype: SpaceType::Discrete(G::ACTIONS) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::config::GameConfig;
    use crate::env::perturb::PerturbKind;
    use crate::render::Frame;

    /// Minimal ruleset recording how the engine drives it
    #[derive(Debug, Default)]
    struct Probe {
        resets: usize,
        updates: usize,
        perturbations: Vec<PerturbKind>,
    }

    impl Game for Probe {
        const NAME: &'static str = "Probe";
        const ACTIONS: usize = 2;

        fn reset(&mut self, _rng: &mut StdRng) {
            self.resets += 1;
        }

        fn update(&mut self, _action: i64, _rng: &mut StdRng) -> Outcome {
            self.updates += 1;
            Outcome { reward: 1.0, terminated: false }
        }

        fn apply_perturbation(&mut self, kind: PerturbKind) {
            self.perturbations.push(kind);
        }

        fn draw(&self, _alt_shapes: bool) -> Frame {
            Frame::filled((0, 0, 0))
        }
    }

    fn probe_env(config: &GameConfig) -> GameEnv<Probe> {
        GameEnv::new(Probe::default(), config).unwrap()
    }

    #[test]
    fn test_new_resets_once() {
        let env = probe_env(&GameConfig::new().seed(0));
        assert_eq!(env.game().resets, 1);
        assert_eq!(env.num_steps(), 0);
    }

    #[test]
    fn test_counter_survives_reset() {
        let mut env = probe_env(&GameConfig::new().seed(0));
        for _ in 0..3 {
            env.step(0).unwrap();
        }
        assert_eq!(env.num_steps(), 3);
        env.reset().unwrap();
        assert_eq!(env.num_steps(), 3, "lifetime counter must survive reset");
        assert_eq!(env.game().resets, 2);
    }

    #[test]
    fn test_perturbation_fires_exactly_once() {
        let config = GameConfig::new().seed(0).perturb(PerturbKind::Color).perturb_step(3);
        let mut env = probe_env(&config);
        for _ in 0..10 {
            env.step(1).unwrap();
        }
        assert_eq!(env.game().perturbations, vec![PerturbKind::Color]);
    }

    #[test]
    fn test_no_perturbation_without_kind() {
        let mut env = probe_env(&GameConfig::new().seed(0).perturb_step(2));
        for _ in 0..5 {
            env.step(0).unwrap();
        }
        assert!(env.game().perturbations.is_empty());
    }

    #[test]
    fn test_step_result_contract() {
        let mut env = probe_env(&GameConfig::new().seed(0));
        let result = env.step(0).unwrap();
        assert_eq!(result.reward, 1.0);
        assert!(!result.terminated);
        assert!(!result.truncated, "truncation is owned by an external wrapper");
        assert_eq!(result.observation.as_bytes().len(), 210 * 160 * 3);
    }

    #[test]
    fn test_spaces() {
        let env = probe_env(&GameConfig::new().seed(0));
        assert_eq!(env.observation_space().shape, vec![210, 160, 3]);
        assert_eq!(env.observation_space().dtype, SpaceType::Box);
        assert_eq!(env.action_space().dtype, SpaceType::Discrete(2));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig::new().perturb_step(0);
        assert!(GameEnv::new(Probe::default(), &config).is_err());
    }
}
