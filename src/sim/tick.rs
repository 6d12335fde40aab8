//! Simulation tick
//!
//! One call advances the arena by exactly one physics step:
//! speeds → actions → ball → scoring → paddles.

use serde::{Deserialize, Serialize};

use super::ball::PaddleHits;
use super::paddle::PaddleAction;
use super::rng::RandomSource;
use super::state::{GamePhase, GameState, LEFT, NUM_AGENTS, RIGHT};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Left agent first
    pub actions: [PaddleAction; NUM_AGENTS],
}

impl TickInput {
    pub fn new(left: PaddleAction, right: PaddleAction) -> Self {
        Self {
            actions: [left, right],
        }
    }

    /// Validate raw action indices (left agent first)
    pub fn from_indices(actions: [usize; NUM_AGENTS]) -> Result<Self, crate::PongError> {
        Ok(Self {
            actions: [
                PaddleAction::from_index(LEFT, actions[LEFT])?,
                PaddleAction::from_index(RIGHT, actions[RIGHT])?,
            ],
        })
    }
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickOutcome {
    /// Agent that won the point, if one ended
    pub scorer: Option<usize>,
    /// Paddles the ball struck
    pub paddle_hits: PaddleHits,
    /// Episode is over after this tick
    pub terminal: bool,
}

/// Advance the arena by `dt_ms` milliseconds
///
/// A terminal episode is left untouched; call `GameState::reset` to start over.
pub fn tick<R: RandomSource + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    dt_ms: f64,
    rng: &mut R,
) -> TickOutcome {
    if state.is_terminal() {
        state.phase = GamePhase::Terminal;
        return TickOutcome {
            terminal: true,
            ..Default::default()
        };
    }

    let dt = dt_ms / 1000.0;

    state.refresh_speeds();

    state.actions = input.actions;
    for (agent, action) in input.actions.iter().enumerate() {
        state.accelerations[agent] = action.acceleration(state.paddles[agent].speed);
    }

    let [left, right] = &state.paddles;
    let paddle_hits = state.ball.update(left, right, dt, rng);

    let rewards = state.config.rewards;
    let scorer = if state.ball.past_left_goal() {
        state.score_count += 1;
        state.scores[LEFT] += rewards.negative;
        state.scores[RIGHT] += rewards.positive;
        state.reset_ball(-1.0, rng);
        Some(RIGHT)
    } else if state.ball.past_right_goal() {
        state.score_count += 1;
        state.scores[LEFT] += rewards.positive;
        state.scores[RIGHT] += rewards.negative;
        state.reset_ball(1.0, rng);
        Some(LEFT)
    } else {
        None
    };

    // Paddles stall for the tick in which a point ends
    if scorer.is_none() {
        for (paddle, acceleration) in state.paddles.iter_mut().zip(state.accelerations) {
            paddle.update(acceleration, dt);
        }
    }

    let terminal = state.is_terminal();
    state.phase = match (terminal, scorer) {
        (true, _) => GamePhase::Terminal,
        (false, Some(_)) => GamePhase::PointScored,
        (false, None) => GamePhase::Playing,
    };

    if let Some(agent) = scorer {
        log::debug!(
            "Point {} to agent {} (scores {:?})",
            state.score_count,
            agent,
            state.scores
        );
    }

    TickOutcome {
        scorer,
        paddle_hits,
        terminal,
    }
}
