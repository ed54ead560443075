use smallvec::SmallVec;
use tracing::debug;

use crate::board::{meaningful_placements, Board, Position};
use crate::error::GameError;
use crate::game::constants::{
    MAX_SPECIAL_PER_ROUND, MAX_SPECIAL_TILES, NUM_ROUNDS, NUM_SPECIAL_TILES, SPECIAL_TILES,
    TILES_PER_ROUND,
};
use crate::game::moves::{CandidateMove, Move, TileSource};
use crate::scoring::{center_score, errors_score, exits_score, Score, TrackNetwork};
use crate::tile::{Connector, Dice, Tile};

/// 游戏阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum GamePhase {
    /// 第 n 回合进行中（还有地块能合法放置）
    InRound(u8),
    /// 第 n 回合的地块已用完或都无处可放，可以结束回合
    RoundEnded(u8),
    /// 第 7 回合结束后
    GameEnded,
}

/// 游戏状态
///
/// 持久值：所有状态转换都返回新的 `GameState`，失败时原值不变。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    /// 棋盘
    board: Board,
    /// 当前回合（1-7）
    round: u8,
    /// 本回合掷出的地块
    round_tiles: [Tile; TILES_PER_ROUND],
    /// 本回合已使用的地块
    used_tiles: [bool; TILES_PER_ROUND],
    /// 已使用的特殊地块（整局）
    used_specials: [bool; NUM_SPECIAL_TILES],
    /// 本回合已使用的特殊地块数
    specials_this_round: usize,
    /// 游戏是否结束
    game_ended: bool,
    /// 公路、铁路的增量网络
    networks: [TrackNetwork; 2],
}

impl GameState {
    /// 以给定的第一回合地块开始新游戏
    pub fn new(round_tiles: [Tile; TILES_PER_ROUND]) -> Self {
        Self {
            board: Board::new(),
            round: 1,
            round_tiles,
            used_tiles: [false; TILES_PER_ROUND],
            used_specials: [false; NUM_SPECIAL_TILES],
            specials_this_round: 0,
            game_ended: false,
            networks: [
                TrackNetwork::new(Connector::Road),
                TrackNetwork::new(Connector::Rail),
            ],
        }
    }

    /// 掷骰子开始新游戏
    pub fn with_dice(dice: &mut Dice) -> Self {
        Self::new(dice.roll())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn round(&self) -> u8 {
        self.round
    }

    pub fn round_tiles(&self) -> &[Tile; TILES_PER_ROUND] {
        &self.round_tiles
    }

    /// 本回合第 i 个地块是否已使用（越界视为已使用）
    pub fn is_tile_used(&self, index: usize) -> bool {
        self.used_tiles.get(index).copied().unwrap_or(true)
    }

    /// 第 i 个特殊地块是否已使用（越界视为已使用）
    pub fn is_special_used(&self, index: usize) -> bool {
        self.used_specials.get(index).copied().unwrap_or(true)
    }

    /// 整局已使用的特殊地块数
    pub fn special_count(&self) -> usize {
        self.used_specials.iter().filter(|&&u| u).count()
    }

    /// 本回合是否已用满特殊地块
    pub fn special_used_this_round(&self) -> bool {
        self.specials_this_round >= MAX_SPECIAL_PER_ROUND
    }

    pub fn is_game_over(&self) -> bool {
        self.game_ended
    }

    /// 公路、铁路的增量网络
    pub fn networks(&self) -> &[TrackNetwork; 2] {
        &self.networks
    }

    /// 当前阶段
    pub fn phase(&self) -> GamePhase {
        if self.game_ended {
            GamePhase::GameEnded
        } else if self.can_end_round() {
            GamePhase::RoundEnded(self.round)
        } else {
            GamePhase::InRound(self.round)
        }
    }

    /// 本回合还能使用特殊地块
    pub fn can_use_special(&self) -> bool {
        !self.game_ended
            && !self.special_used_this_round()
            && self.special_count() < MAX_SPECIAL_TILES
    }

    /// 当前可用的地块：本回合未使用的地块，以及（允许时）未使用的特殊地块
    pub fn available_tiles(&self) -> SmallVec<[(TileSource, Tile); 10]> {
        let mut tiles = SmallVec::new();
        if self.game_ended {
            return tiles;
        }
        for (i, &tile) in self.round_tiles.iter().enumerate() {
            if !self.used_tiles[i] {
                tiles.push((TileSource::Round(i), tile));
            }
        }
        if self.can_use_special() {
            for (i, &tile) in SPECIAL_TILES.iter().enumerate() {
                if !self.used_specials[i] {
                    tiles.push((TileSource::Special(i), tile));
                }
            }
        }
        tiles
    }

    /// 找出放置该地块时使用的来源
    ///
    /// 优先本回合第一个（任意变换下）匹配的未使用地块，其次第一个匹配的可用特殊地块
    pub fn resolve_source(&self, tile: &Tile) -> Result<TileSource, GameError> {
        if self.game_ended {
            return Err(GameError::GameOver);
        }
        self.available_tiles()
            .into_iter()
            .find(|(_, available)| tile.is_transform_of(available))
            .map(|(source, _)| source)
            .ok_or(GameError::NoMatchingTile(*tile))
    }

    /// 放置一个地块，自动选择来源
    pub fn place_tile(&self, position: Position, tile: Tile) -> Result<Self, GameError> {
        let source = self.resolve_source(&tile)?;
        self.place_tile_from(source, position, tile)
    }

    /// 执行一步放置
    pub fn make_move(&self, placement: Move) -> Result<Self, GameError> {
        self.place_tile(placement.position, placement.tile)
    }

    /// 依次执行多步放置，任何一步失败都返回错误
    pub fn make_moves(&self, moves: &[Move]) -> Result<Self, GameError> {
        moves.iter().try_fold(self.clone(), |state, &m| state.make_move(m))
    }

    /// 用指定来源的地块放置
    ///
    /// 所有检查都在修改之前完成
    pub fn place_tile_from(
        &self,
        source: TileSource,
        position: Position,
        tile: Tile,
    ) -> Result<Self, GameError> {
        if self.game_ended {
            return Err(GameError::GameOver);
        }

        let expected = match source {
            TileSource::Round(i) => {
                let expected = *self
                    .round_tiles
                    .get(i)
                    .ok_or(GameError::InvalidTileIndex(source))?;
                if self.used_tiles[i] {
                    return Err(GameError::TileAlreadyUsed(source));
                }
                expected
            }
            TileSource::Special(i) => {
                let expected = *SPECIAL_TILES
                    .get(i)
                    .ok_or(GameError::InvalidTileIndex(source))?;
                if self.used_specials[i] {
                    return Err(GameError::TileAlreadyUsed(source));
                }
                if self.special_used_this_round() {
                    return Err(GameError::SpecialAlreadyUsedThisRound);
                }
                if self.special_count() >= MAX_SPECIAL_TILES {
                    return Err(GameError::SpecialLimitReached);
                }
                expected
            }
        };

        if !tile.is_transform_of(&expected) {
            return Err(GameError::TileMismatch {
                from: source,
                expected,
                tile,
            });
        }

        let board = self.board.set(position, tile)?;

        let mut next = self.clone();
        for network in next.networks.iter_mut() {
            *network = network.update(self.board.tile_grid(), position, tile);
        }
        next.board = board;
        match source {
            TileSource::Round(i) => next.used_tiles[i] = true,
            TileSource::Special(i) => {
                next.used_specials[i] = true;
                next.specials_this_round += 1;
            }
        }

        debug!(round = self.round, %position, %tile, ?source, "tile placed");
        Ok(next)
    }

    /// 是否可以结束本回合
    ///
    /// 所有未使用的地块（包括本回合还能使用的特殊地块）在任何变换下
    /// 都没有合法位置时才可以结束
    pub fn can_end_round(&self) -> bool {
        if self.game_ended {
            return false;
        }
        let slots = self.board.open_slot_entries();
        self.available_tiles().iter().all(|(_, tile)| {
            let transforms = tile.all_transforms();
            !slots
                .iter()
                .any(|(_, slot)| transforms.iter().any(|t| slot.accepts(t)))
        })
    }

    /// 结束本回合，下一回合的地块由骰子决定
    pub fn end_round(&self, dice: &mut Dice) -> Result<Self, GameError> {
        self.check_can_end()?;
        if self.round >= NUM_ROUNDS {
            return Ok(self.finish());
        }
        self.end_round_with(dice.roll())
    }

    /// 结束本回合，使用给定的下一回合地块（最后一回合时忽略）
    pub fn end_round_with(&self, next_tiles: [Tile; TILES_PER_ROUND]) -> Result<Self, GameError> {
        self.check_can_end()?;
        if self.round >= NUM_ROUNDS {
            return Ok(self.finish());
        }

        let mut next = self.clone();
        next.round += 1;
        next.round_tiles = next_tiles;
        next.used_tiles = [false; TILES_PER_ROUND];
        next.specials_this_round = 0;

        debug!(round = next.round, "round started");
        Ok(next)
    }

    fn check_can_end(&self) -> Result<(), GameError> {
        if self.game_ended {
            return Err(GameError::GameOver);
        }
        if !self.can_end_round() {
            return Err(GameError::CannotEndRound(self.round));
        }
        Ok(())
    }

    fn finish(&self) -> Self {
        let mut next = self.clone();
        next.game_ended = true;
        debug!(score = %next.score(), "game ended");
        next
    }

    /// 当前所有值得尝试的放置
    ///
    /// 对每个可用地块（相同或互为变换的地块只算一次）和每个空位，
    /// 列出有意义的放置方向
    pub fn possible_moves(&self) -> Vec<CandidateMove> {
        let mut moves = Vec::new();
        if self.game_ended {
            return moves;
        }

        let mut seen: SmallVec<[Tile; 10]> = SmallVec::new();
        let slots = self.board.open_slot_entries();
        for (source, tile) in self.available_tiles() {
            if seen.iter().any(|s| tile.is_transform_of(s)) {
                continue;
            }
            seen.push(tile);

            for (position, slot) in &slots {
                for placed in meaningful_placements(&tile, slot) {
                    moves.push(CandidateMove {
                        source,
                        placement: Move::new(*position, placed),
                    });
                }
            }
        }
        moves
    }

    /// 当前得分（最长路线来自增量网络）
    pub fn score(&self) -> Score {
        Score::new(
            exits_score(&self.board),
            self.networks[0].longest_route() as i32,
            self.networks[1].longest_route() as i32,
            center_score(&self.board),
            errors_score(&self.board),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::calculate_score;

    fn tile(s: &str) -> Tile {
        s.parse().unwrap()
    }

    fn p(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    fn straight_roads() -> [Tile; 4] {
        [tile("_D_D"), tile("_D_D"), tile("_L_L"), tile("_DD_")]
    }

    #[test]
    fn test_new_game() {
        let state = GameState::new(straight_roads());
        assert_eq!(state.round(), 1);
        assert_eq!(state.phase(), GamePhase::InRound(1));
        assert_eq!(state.available_tiles().len(), 4 + NUM_SPECIAL_TILES);
        assert_eq!(state.score(), Score::default());
    }

    #[test]
    fn test_place_tile_uses_first_matching() {
        let state = GameState::new(straight_roads());
        let next = state.place_tile(p(3, 0), tile("_D_D")).unwrap();
        assert!(next.is_tile_used(0));
        assert!(!next.is_tile_used(1));

        // 旋转后的地块也能匹配
        let next = next.place_tile(p(0, 1), tile("D_D_")).unwrap();
        assert!(next.is_tile_used(1));
        // 原状态不变
        assert!(!state.is_tile_used(0));
    }

    #[test]
    fn test_place_tile_falls_back_to_special() {
        let state = GameState::new(straight_roads());
        let next = state.place_tile(p(3, 0), tile("DDDD")).unwrap();
        assert!(next.is_special_used(2));
        assert!(next.special_used_this_round());
        assert_eq!(
            next.place_tile(p(3, 6), tile("DDDD")),
            Err(GameError::NoMatchingTile(tile("DDDD")))
        );
        assert_eq!(
            next.place_tile_from(TileSource::Special(0), p(3, 6), tile("DDLD")),
            Err(GameError::SpecialAlreadyUsedThisRound)
        );
    }

    #[test]
    fn test_place_tile_from_checks() {
        let state = GameState::new(straight_roads());
        assert_eq!(
            state.place_tile_from(TileSource::Round(4), p(3, 0), tile("_D_D")),
            Err(GameError::InvalidTileIndex(TileSource::Round(4)))
        );
        assert_eq!(
            state.place_tile_from(TileSource::Round(2), p(3, 0), tile("_D_D")),
            Err(GameError::TileMismatch {
                from: TileSource::Round(2),
                expected: tile("_L_L"),
                tile: tile("_D_D"),
            })
        );
        let next = state.place_tile_from(TileSource::Round(0), p(3, 0), tile("_D_D")).unwrap();
        assert_eq!(
            next.place_tile_from(TileSource::Round(0), p(3, 6), tile("_D_D")),
            Err(GameError::TileAlreadyUsed(TileSource::Round(0)))
        );
    }

    #[test]
    fn test_illegal_placement_leaves_state() {
        let state = GameState::new(straight_roads());
        let result = state.place_tile(p(3, 3), tile("_D_D"));
        assert!(matches!(result, Err(GameError::Placement(_))));
        assert!(!state.is_tile_used(0));
    }

    #[test]
    fn test_round_cannot_end_early() {
        let state = GameState::new(straight_roads());
        assert!(!state.can_end_round());
        assert_eq!(
            state.end_round_with(straight_roads()),
            Err(GameError::CannotEndRound(1))
        );
    }

    #[test]
    fn test_possible_moves_are_legal() {
        let state = GameState::new(straight_roads());
        let moves = state.possible_moves();
        assert!(!moves.is_empty());
        for candidate in &moves {
            let m = candidate.placement;
            assert!(state.board().is_valid(m.position, &m.tile));
            assert!(state.place_tile_from(candidate.source, m.position, m.tile).is_ok());
        }
        // 两个相同的 _D_D 只列一次
        assert!(moves.iter().all(|c| c.source != TileSource::Round(1)));
    }

    #[test]
    fn test_incremental_score_matches() {
        let state = GameState::new(straight_roads());
        let moves: Vec<Move> = ["30_D_D", "31_D_D", "32__DD"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let next = state.make_moves(&moves).unwrap();
        assert_eq!(next.score(), calculate_score(next.board()));
        assert_eq!(next.score().road, 3);
    }
}
