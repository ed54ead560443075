use route_engine::game::{choose_move, GameState, Policy};
use route_engine::scoring::{calculate_score, longest_route, TrackNetwork};
use route_engine::tile::{Connector, Dice};

/// 随机打完一局，每一步都比较增量网络和从头计算的结果
fn check_random_game(seed: u64) {
    let mut dice = Dice::seeded(seed);
    let mut state = GameState::with_dice(&mut dice);

    while !state.is_game_over() {
        if state.can_end_round() {
            state = state.end_round(&mut dice).unwrap();
            continue;
        }
        let moves = state.possible_moves();
        let candidate = choose_move(&state, &moves, Policy::Random, dice.rng_mut()).unwrap();
        let m = candidate.placement;
        state = state
            .place_tile_from(candidate.source, m.position, m.tile)
            .unwrap();

        let board = state.board();
        let [road, rail] = state.networks();
        assert_eq!(
            road.longest_route(),
            longest_route(board, Connector::Road),
            "seed {} road after {}: {}",
            seed,
            m,
            board
        );
        assert_eq!(
            rail.longest_route(),
            longest_route(board, Connector::Rail),
            "seed {} rail after {}: {}",
            seed,
            m,
            board
        );
    }

    assert_eq!(state.score(), calculate_score(state.board()), "seed {}", seed);
}

#[test]
fn test_incremental_matches_full_recompute() {
    for seed in 0..40 {
        check_random_game(seed);
    }
}

#[test]
fn test_replay_matches_incremental() {
    for seed in 100..110 {
        let mut dice = Dice::seeded(seed);
        let state = route_engine::game::play_game(&mut dice, Policy::Random).unwrap();
        let board = state.board();
        for (i, track) in Connector::TRACKS.into_iter().enumerate() {
            let replayed = TrackNetwork::from_board(board, track);
            assert_eq!(replayed.longest_route(), state.networks()[i].longest_route());
        }
    }
}

#[test]
fn test_greedy_games_consistent() {
    for seed in 0..5 {
        let mut dice = Dice::seeded(seed);
        let state = route_engine::game::play_game(&mut dice, Policy::Greedy).unwrap();
        assert!(state.is_game_over());
        assert_eq!(state.score(), calculate_score(state.board()));
        assert!(state.special_count() <= 3);
    }
}
