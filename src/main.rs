//! Pong Env demo
//!
//! Plays one episode of the scripted expert against itself and logs the points.
//! Pass a JSON game config path as the first argument to override the arena.

use pong_env::sim::{LEFT, RIGHT, TickInput};
use pong_env::{EnvConfig, PongConfig, PongEnv, PongError};

/// Stop the demo even if the rally never ends
const MAX_FRAMES: u64 = 200_000;

fn main() {
    env_logger::init();
    log::info!("Pong Env (native) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), PongError> {
    let game = match std::env::args().nth(1) {
        Some(path) => PongConfig::load(path)?,
        None => PongConfig {
            width: 256.0,
            height: 200.0,
            ..Default::default()
        },
    };
    let config = EnvConfig {
        fps: 60,
        ..Default::default()
    };

    let mut env = PongEnv::new(game, config)?;
    env.reset_game();

    let mut totals = [0.0; 2];
    while !env.game_over() && env.frame_number() < MAX_FRAMES {
        let input = TickInput::new(env.expert_policy(LEFT)?, env.expert_policy(RIGHT)?);
        let rewards = env.act_input(&input);
        for (t, r) in totals.iter_mut().zip(rewards) {
            *t += r;
        }
        if rewards != [0.0, 0.0] {
            log::info!(
                "Frame {}: rewards {:?}, state {:?}",
                env.frame_number(),
                rewards,
                env.state()
            );
        }
    }

    println!(
        "Finished after {} frames: left {:.1}, right {:.1}",
        env.frame_number(),
        totals[LEFT],
        totals[RIGHT]
    );
    Ok(())
}
