use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::error::GameError;
use crate::game::moves::CandidateMove;
use crate::game::state::GameState;
use crate::tile::Dice;

/// 演示用的选步策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// 选择使当前得分最高的放置（相同时取第一个）
    #[default]
    Greedy,
    /// 在所有候选放置中均匀随机选择
    Random,
}

/// 按策略选一步
pub fn choose_move<R: Rng + ?Sized>(
    state: &GameState,
    moves: &[CandidateMove],
    policy: Policy,
    rng: &mut R,
) -> Option<CandidateMove> {
    match policy {
        Policy::Random => moves.choose(rng).copied(),
        Policy::Greedy => {
            let mut best: Option<(i32, CandidateMove)> = None;
            for &candidate in moves {
                let m = candidate.placement;
                let Ok(next) = state.place_tile_from(candidate.source, m.position, m.tile) else {
                    continue;
                };
                let total = next.score().total;
                if best.map_or(true, |(b, _)| total > b) {
                    best = Some((total, candidate));
                }
            }
            best.map(|(_, c)| c)
        }
    }
}

/// 用给定策略从头打完一局
///
/// 每回合一直放置，直到没有可用地块能合法放置，再结束回合
pub fn play_game(dice: &mut Dice, policy: Policy) -> Result<GameState, GameError> {
    let mut state = GameState::with_dice(dice);

    while !state.is_game_over() {
        if state.can_end_round() {
            state = state.end_round(dice)?;
            continue;
        }

        let moves = state.possible_moves();
        let Some(candidate) = choose_move(&state, &moves, policy, dice.rng_mut()) else {
            // 没有候选时交给 end_round 报告错误
            state = state.end_round(dice)?;
            continue;
        };
        let m = candidate.placement;
        debug!(round = state.round(), placement = %m, "policy move");
        state = state.place_tile_from(candidate.source, m.position, m.tile)?;
    }

    info!(score = %state.score(), tiles = state.board().tile_count(), "game finished");
    Ok(state)
}
