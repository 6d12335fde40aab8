use glam::DVec2;
use pong_env::sim::{GameRng, GameState, LEFT, PaddleAction, PaddleSide, RIGHT, TickInput, tick};
use pong_env::{EnvConfig, PongConfig, PongEnv, PongError};

const DT_MS: f64 = 1000.0 / 30.0;

fn seeded_env(seed: u64) -> PongEnv {
    let mut env = PongEnv::new(
        PongConfig::default(),
        EnvConfig {
            seed,
            ..Default::default()
        },
    )
    .unwrap();
    env.reset_game();
    env
}

#[test]
fn test_same_seed_same_episode() {
    let play = |seed| {
        let mut env = seeded_env(seed);
        let mut trace = Vec::new();
        for i in 0..3000 {
            let actions = [i % 3, env.expert_policy(RIGHT).unwrap().index()];
            let rewards = env.act(actions).unwrap();
            trace.push((env.state(), rewards));
        }
        trace
    };
    assert_eq!(play(24), play(24));
}

#[test]
fn test_episode_terminates_exactly_at_max_score() {
    let mut env = PongEnv::new(
        PongConfig {
            max_score: 3,
            ..Default::default()
        },
        EnvConfig::default(),
    )
    .unwrap();
    env.reset_game();

    let mut points = 0;
    let mut frames = 0;
    // Both paddles idle at centre, so points come quickly
    while !env.game_over() {
        let rewards = env.act([0, 0]).unwrap();
        if rewards != [0.0, 0.0] {
            points += 1;
            assert_eq!(env.game_over(), points == 3);
        }
        frames += 1;
        assert!(frames < 100_000, "episode never ended");
    }

    assert_eq!(points, 3);
    assert_eq!(env.game().score_count, 3);
    let [left, right] = env.scores();
    assert_eq!(left + right, 0.0);
}

#[test]
fn test_high_speed_ball_hits_stationary_paddle() {
    // speed = arena height
    let mut state = GameState::new(PongConfig {
        ball_speed_ratio: 1.0,
        ..Default::default()
    });
    let mut rng = GameRng::new(1);
    let paddle_y = state.paddles[LEFT].pos.y;
    state.ball.pos = DVec2::new(10.0, paddle_y);
    state.ball.prev_pos = state.ball.pos;
    state.ball.vel = DVec2::new(-state.config.height * 10.0, 0.0);

    let mut hit = false;
    for _ in 0..5 {
        let outcome = tick(&mut state, &TickInput::default(), DT_MS, &mut rng);
        assert_eq!(outcome.scorer, None, "ball passed through the paddle");
        if outcome.paddle_hits.contains(PaddleSide::Left) {
            hit = true;
            break;
        }
    }

    assert!(hit);
    assert!(state.ball.vel.x > 0.0);
}

#[test]
fn test_config_file_round_trip() {
    let path = std::env::temp_dir().join(format!("pong_env_config_{}.json", std::process::id()));
    let config = PongConfig {
        width: 256.0,
        height: 200.0,
        max_score: 5,
        ..Default::default()
    };
    config.save(&path).unwrap();

    let loaded = PongConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded, config);
    let env = PongEnv::new(loaded, EnvConfig::default()).unwrap();
    assert_eq!(env.screen_dims(), (256, 200));
}

#[test]
fn test_invalid_config_rejected() {
    let result = PongEnv::new(
        PongConfig {
            ball_speed_ratio: 0.0,
            ..Default::default()
        },
        EnvConfig::default(),
    );
    assert!(matches!(result, Err(PongError::Config(_))));
}

#[test]
fn test_expert_beats_idle_opponent() {
    let mut env = seeded_env(7);
    let mut totals = [0.0; 2];
    while !env.game_over() {
        let actions = [env.expert_policy(LEFT).unwrap().index(), PaddleAction::Noop.index()];
        let rewards = env.act(actions).unwrap();
        totals[0] += rewards[0];
        totals[1] += rewards[1];
        assert!(env.frame_number() < 200_000);
    }
    assert!(totals[LEFT] > totals[RIGHT]);
    assert_eq!(totals, env.scores());
}
