use proptest::prelude::*;

use paddle_duel::{Action, EnemyMode, EnvConfig, OpponentInput, PaddleEnv};

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![Just(Action::Stay), Just(Action::Up), Just(Action::Down)]
}

fn opponent_input() -> impl Strategy<Value = OpponentInput> {
    prop_oneof![
        Just(OpponentInput::Stay),
        Just(OpponentInput::Up),
        Just(OpponentInput::Down)
    ]
}

fn enemy_mode() -> impl Strategy<Value = EnemyMode> {
    prop_oneof![Just(EnemyMode::Computer), Just(EnemyMode::Human)]
}

proptest! {
    #[test]
    fn paddles_stay_in_bounds(
        seed in any::<u64>(),
        mode in enemy_mode(),
        error_rate in 0.0f32..=1.0,
        moves in prop::collection::vec((action(), opponent_input()), 1..400),
    ) {
        let config = EnvConfig {
            enemy_mode: mode,
            opponent_error_rate: error_rate,
            ..EnvConfig::default()
        };
        let (lo, hi) = (config.paddle_min_y(), config.paddle_max_y());
        let mut env = PaddleEnv::new(config, seed);

        for (action, opponent) in moves {
            let step = env.step_with_opponent(action, opponent);
            let state = env.state();
            prop_assert!(state.p1_y() >= lo && state.p1_y() <= hi);
            prop_assert!(state.p2_y() >= lo && state.p2_y() <= hi);
            if step.terminated {
                env.reset(None);
            }
        }
    }

    #[test]
    fn rewards_match_termination(
        seed in any::<u64>(),
        moves in prop::collection::vec(action(), 1..600),
    ) {
        let mut env = PaddleEnv::new(EnvConfig::default(), seed);
        for action in moves {
            let step = env.step(action);
            let x = env.state().ball_x();
            prop_assert!(!step.truncated);
            prop_assert_eq!(step.observation.as_slice().len(), 6);
            prop_assert!(step.observation.is_finite());
            if step.terminated {
                if x > 800.0 {
                    prop_assert_eq!(step.reward, 1.0);
                } else {
                    prop_assert!(x <= 0.0);
                    prop_assert_eq!(step.reward, -1.0);
                }
                env.reset(None);
            } else {
                prop_assert!(x > 0.0 && x <= 800.0);
                prop_assert_eq!(step.reward, 0.001);
            }
        }
    }

    #[test]
    fn same_seed_same_episode(
        seed in any::<u64>(),
        moves in prop::collection::vec(action(), 1..200),
    ) {
        let mut a = PaddleEnv::new(EnvConfig::default(), seed);
        let mut b = PaddleEnv::new(EnvConfig::default(), seed);
        for action in moves {
            let step_a = a.step(action);
            let step_b = b.step(action);
            prop_assert_eq!(step_a, step_b);
            if step_a.terminated {
                a.reset(None);
                b.reset(None);
            }
        }
    }
}
