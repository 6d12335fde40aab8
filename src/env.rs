//! Step driver
//!
//! Wraps a `GameState` for an agent-training loop: discrete actions in, per-agent
//! reward (the change in cumulative score) out. Frames are only rasterized on
//! demand unless `display_screen` is set.

use crate::config::{EnvConfig, PongConfig, RewardValues};
use crate::error::{ConfigError, PongError};
use crate::renderer::{FrameBuffer, Renderer};
use crate::sim::{GameRng, GameState, NUM_AGENTS, Observation, PaddleAction, TickInput, tick};

/// Maps a symbolic observation to a feature vector
pub type StatePreprocessor = Box<dyn Fn(&Observation) -> Vec<f64>>;

/// Action names, one row per agent
pub const ACTIONS_SET: [[&str; 3]; NUM_AGENTS] = [
    ["p1_noop", "p1_up", "p1_down"],
    ["p2_noop", "p2_up", "p2_down"],
];

pub struct PongEnv {
    state: GameState,
    rng: GameRng,
    config: EnvConfig,
    frame: FrameBuffer,
    preprocessor: Option<StatePreprocessor>,
    previous_scores: [f64; NUM_AGENTS],
    frame_count: u64,
}

impl PongEnv {
    /// Validate both configs and initialize the arena (no random draws)
    pub fn new(game: PongConfig, config: EnvConfig) -> Result<Self, PongError> {
        game.validate()?;
        config.validate(&game)?;

        let state = GameState::new(game);
        let frame = FrameBuffer::for_scene(&state.scene());
        log::info!(
            "Pong env {}x{} (max score {}, {} fps, frame skip {}, seed {})",
            state.config.width,
            state.config.height,
            state.config.max_score,
            config.fps,
            config.frame_skip,
            config.seed
        );

        Ok(Self {
            state,
            rng: GameRng::new(config.seed),
            config,
            frame,
            preprocessor: None,
            previous_scores: [0.0; NUM_AGENTS],
            frame_count: 0,
        })
    }

    /// Install a preprocessor, enabling `game_state`
    pub fn with_preprocessor(mut self, preprocessor: StatePreprocessor) -> Self {
        self.preprocessor = Some(preprocessor);
        self
    }

    pub fn actions_set(&self) -> [[&'static str; 3]; NUM_AGENTS] {
        ACTIONS_SET
    }

    /// Frames advanced since construction
    pub fn frame_number(&self) -> u64 {
        self.frame_count
    }

    pub fn game_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// Cumulative reward per agent this episode
    pub fn scores(&self) -> [f64; NUM_AGENTS] {
        self.state.scores()
    }

    pub fn state(&self) -> Observation {
        self.state.observation()
    }

    pub fn game(&self) -> &GameState {
        &self.state
    }

    /// Preprocessed state vector
    pub fn game_state(&self) -> Result<Vec<f64>, PongError> {
        let preprocess = self.preprocessor.as_ref().ok_or(PongError::StateUnsupported)?;
        Ok(preprocess(&self.state.observation()))
    }

    /// Length of the preprocessed state vector, if a preprocessor is installed
    pub fn game_state_dims(&self) -> Option<usize> {
        self.game_state().ok().map(|v| v.len())
    }

    pub fn screen_dims(&self) -> (usize, usize) {
        self.frame.dims()
    }

    /// Current frame, row-major RGB8
    pub fn screen_rgb(&mut self) -> &[u8] {
        self.frame.draw(&self.state.scene());
        self.frame.rgb()
    }

    pub fn screen_grayscale(&mut self) -> Vec<u8> {
        self.frame.draw(&self.state.scene());
        self.frame.grayscale()
    }

    pub fn expert_policy(&self, agent: usize) -> Result<PaddleAction, PongError> {
        self.state.expert_policy(agent)
    }

    /// Change difficulty between steps
    pub fn set_speed_ratios(&mut self, players: f64, ball: f64) -> Result<(), ConfigError> {
        self.state.set_speed_ratios(players, ball)?;
        log::info!("Speed ratios set to players {players}, ball {ball}");
        Ok(())
    }

    pub fn set_rewards(&mut self, rewards: RewardValues) {
        self.state.set_rewards(rewards);
    }

    /// Start a new episode
    pub fn reset_game(&mut self) {
        self.previous_scores = [0.0; NUM_AGENTS];
        self.state.reset(&mut self.rng);
        log::info!("Episode reset (frame {})", self.frame_count);
    }

    /// Apply raw action indices, left agent first
    pub fn act(&mut self, actions: [usize; NUM_AGENTS]) -> Result<[f64; NUM_AGENTS], PongError> {
        let input = TickInput::from_indices(actions)?;
        Ok(self.act_input(&input))
    }

    /// Repeat `input` for `frame_skip` frames and sum the rewards
    pub fn act_input(&mut self, input: &TickInput) -> [f64; NUM_AGENTS] {
        let mut total = [0.0; NUM_AGENTS];
        for _ in 0..self.config.frame_skip {
            let rewards = self.one_step_act(input);
            for (t, r) in total.iter_mut().zip(rewards) {
                *t += r;
            }
        }
        total
    }

    fn one_step_act(&mut self, input: &TickInput) -> [f64; NUM_AGENTS] {
        if self.game_over() {
            return [0.0; NUM_AGENTS];
        }

        let dt_ms = self.config.tick_ms();
        for _ in 0..self.config.num_steps {
            let outcome = tick(&mut self.state, input, dt_ms, &mut self.rng);
            if self.config.display_screen {
                self.frame.draw(&self.state.scene());
            }
            if outcome.terminal {
                log::info!(
                    "Episode over after {} points (scores {:?})",
                    self.state.score_count,
                    self.state.scores
                );
            }
        }
        self.frame_count += u64::from(self.config.num_steps);

        self.rewards()
    }

    /// Score change since the last call
    fn rewards(&mut self) -> [f64; NUM_AGENTS] {
        let scores = self.state.scores();
        let rewards = std::array::from_fn(|i| scores[i] - self.previous_scores[i]);
        self.previous_scores = scores;
        rewards
    }
}
