use std::fmt;

use smallvec::SmallVec;
use tracing::trace;

use super::exits::exit_at;
use super::grid::{Direction, Grid, Position};
use crate::error::PlacementError;
use crate::tile::{Connector, Slot, Tile};

/// 错误统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ErrorCount {
    /// 全部错误（包括轨道伸向空格子、以后还可能补上的）
    pub total: u32,
    /// 无法再修复的错误（轨道对着已放置地块的非匹配边）
    pub unfixable: u32,
}

/// 棋盘
///
/// 每个格子要么有一个地块，要么有一个空位描述（由相邻地块、棋盘边界和出口推导）。
/// `Board` 是持久值：所有修改操作都返回新的 `Board`，不会改动原值。
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    tiles: Grid<Tile>,
    slots: Grid<Slot>,
}

impl Board {
    /// 边长
    pub const SIZE: u8 = super::grid::BOARD_SIZE;

    /// 创建空棋盘
    ///
    /// 每个格子的空位都从出口和边界推导：出口一侧为出口的轨道类型，
    /// 其余朝外的一侧为 `Edge`，朝内的一侧为 `Unfilled`
    pub fn new() -> Self {
        let mut board = Self {
            tiles: Grid::new(),
            slots: Grid::new(),
        };
        for position in Position::all() {
            let slot = board.derive_slot(position);
            board.slots.set(position, slot);
        }
        board
    }

    /// 依次放置一组地块，任何一步非法都返回错误
    pub fn from_placements<I>(placements: I) -> Result<Self, PlacementError>
    where
        I: IntoIterator<Item = (Position, Tile)>,
    {
        placements
            .into_iter()
            .try_fold(Self::new(), |board, (position, tile)| board.set(position, tile))
    }

    /// 获取某格的地块
    pub fn get(&self, position: Position) -> Option<Tile> {
        self.tiles.get(position)
    }

    /// 获取某个空格子的空位描述；已有地块的格子返回 `None`
    pub fn open_slot(&self, position: Position) -> Option<Slot> {
        self.slots.get(position)
    }

    /// 已放置的地块，按行优先顺序
    pub fn tiles(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        self.tiles.entries()
    }

    /// 已放置的地块网格
    pub fn tile_grid(&self) -> &Grid<Tile> {
        &self.tiles
    }

    /// 已放置的地块数
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// 在某格放置该地块（不做变换）是否合法
    pub fn is_valid(&self, position: Position, tile: &Tile) -> bool {
        match self.open_slot(position) {
            Some(slot) => slot.accepts(tile),
            None => false,
        }
    }

    /// 该地块的某个变换能否放在此格
    pub fn is_valid_with_transform(&self, position: Position, tile: &Tile) -> bool {
        match self.open_slot(position) {
            Some(slot) => tile.all_transforms().iter().any(|t| slot.accepts(t)),
            None => false,
        }
    }

    /// 该地块所有能合法放在此格的不同变换
    pub fn valid_transforms(&self, position: Position, tile: &Tile) -> SmallVec<[Tile; 8]> {
        let mut result = tile.all_transforms();
        match self.open_slot(position) {
            Some(slot) => result.retain(|t| slot.accepts(t)),
            None => result.clear(),
        }
        result
    }

    /// 放置地块，返回新棋盘
    ///
    /// 非法放置返回错误，原棋盘不变。合法时：
    /// - 目标格子变为已占用
    /// - 每个仍为空的相邻格子，其朝向新地块的一侧更新为新地块这一侧的轨道；
    ///   新地块这一侧没有轨道时更新为 `None`（已有的轨道要求不会被清除）
    pub fn set(&self, position: Position, tile: Tile) -> Result<Board, PlacementError> {
        if self.tiles.contains(position) {
            return Err(PlacementError::Occupied(position));
        }
        if !self.is_valid(position, &tile) {
            return Err(PlacementError::Rejected { position, tile });
        }

        let mut next = *self;
        next.tiles.set(position, tile);
        next.slots.remove(position);

        for direction in Direction::ALL {
            let Some(neighbor) = position.step(direction) else {
                continue;
            };
            if next.tiles.contains(neighbor) {
                continue;
            }

            let facing = direction.opposite();
            let slot = next
                .slots
                .get(neighbor)
                .unwrap_or_else(|| next.derive_slot(neighbor));
            let offered = tile.side(direction);
            let updated = if offered.is_track() || !slot.side(facing).is_track() {
                slot.with_side(facing, offered)
            } else {
                slot
            };
            next.slots.set(neighbor, updated);
        }

        trace!(%position, %tile, "tile placed on board");
        Ok(next)
    }

    /// 移除某格的地块，返回新棋盘
    ///
    /// 用于假设分析，正常对局不会用到。该格和相邻空格子的空位重新推导。
    pub fn erase(&self, position: Position) -> Board {
        let mut next = *self;
        if next.tiles.remove(position).is_none() {
            return next;
        }

        let slot = next.derive_slot(position);
        next.slots.set(position, slot);
        for direction in Direction::ALL {
            if let Some(neighbor) = position.step(direction) {
                if !next.tiles.contains(neighbor) {
                    let slot = next.derive_slot(neighbor);
                    next.slots.set(neighbor, slot);
                }
            }
        }
        next
    }

    /// 所有还能放地块的空格子（至少一侧有轨道要求），按行优先顺序
    pub fn open_positions(&self) -> Vec<Position> {
        self.open_slot_entries().into_iter().map(|(p, _)| p).collect()
    }

    /// 所有还能放地块的空格子及其空位描述，按行优先顺序
    ///
    /// 顺序只保证稳定，不具有游戏含义
    pub fn open_slot_entries(&self) -> Vec<(Position, Slot)> {
        self.slots
            .entries()
            .filter(|(_, slot)| slot.has_requirement())
            .collect()
    }

    /// 统计错误
    ///
    /// 每条轨道边：
    /// - 对着已放置地块但对方这一侧不是同种轨道：无法修复
    /// - 对着空格子：还能修复，只计入总数
    /// - 对着棋盘外：不算错误（出口处放置时已保证类型一致）
    pub fn count_errors(&self) -> ErrorCount {
        let mut count = ErrorCount::default();
        for (position, tile) in self.tiles.entries() {
            for direction in Direction::ALL {
                let track = tile.side(direction);
                if !track.is_track() {
                    continue;
                }
                let Some(neighbor) = position.step(direction) else {
                    continue;
                };
                match self.tiles.get(neighbor) {
                    None => count.total += 1,
                    Some(other) => {
                        if other.side(direction.opposite()) != track {
                            count.unfixable += 1;
                        }
                    }
                }
            }
        }
        count.total += count.unfixable;
        count
    }

    /// 根据当前相邻地块、边界和出口推导某格的空位
    fn derive_slot(&self, position: Position) -> Slot {
        let mut sides = [Connector::Unfilled; 4];
        for direction in Direction::ALL {
            sides[direction.index()] = match position.step(direction) {
                None => match exit_at(position, direction) {
                    Some(exit) => exit.track,
                    None => Connector::Edge,
                },
                Some(neighbor) => match self.tiles.get(neighbor) {
                    None => Connector::Unfilled,
                    Some(tile) => tile.side(direction.opposite()),
                },
            };
        }
        Slot::new(sides)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// 形如 `"3,0_D_D 3,1__DD "`；空棋盘为 `"Empty"`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tiles.is_empty() {
            return write!(f, "Empty");
        }
        for (position, tile) in self.tiles.entries() {
            write!(f, "{}{} ", position, tile)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    fn tile(s: &str) -> Tile {
        s.parse().unwrap()
    }

    fn slot(s: &str) -> Slot {
        s.parse().unwrap()
    }

    #[test]
    fn test_initial_slots() {
        let board = Board::new();
        assert_eq!(board.open_slot(p(0, 0)), Some(slot("E..E")));
        assert_eq!(board.open_slot(p(0, 1)), Some(slot("D...")));
        assert_eq!(board.open_slot(p(3, 6)), Some(slot(".D..")));
        assert_eq!(board.open_slot(p(6, 3)), Some(slot("..L.")));
        assert_eq!(board.open_slot(p(3, 3)), Some(slot("....")));
        assert_eq!(board.open_slot(p(2, 6)), Some(slot(".E..")));
    }

    #[test]
    fn test_only_exits_open_initially() {
        let board = Board::new();
        let open = board.open_positions();
        assert_eq!(open.len(), 12);
        assert!(open.contains(&p(0, 1)));
        assert!(open.contains(&p(5, 0)));
    }

    #[test]
    fn test_set_updates_neighbor_slots() {
        let board = Board::new().set(p(3, 0), tile("_DDD")).unwrap();
        // 东侧：新地块东边有公路
        assert_eq!(board.open_slot(p(3, 1)), Some(slot("...D")));
        // 南侧：新地块南边有公路
        assert_eq!(board.open_slot(p(4, 0)), Some(slot("D..E")));
        // 北侧：新地块北边没有轨道
        assert_eq!(board.open_slot(p(2, 0)), Some(slot(".._E")));
        assert_eq!(board.open_slot(p(3, 0)), None);
    }

    #[test]
    fn test_set_is_persistent() {
        let empty = Board::new();
        let placed = empty.set(p(3, 6), tile("_D_D")).unwrap();
        assert!(empty.get(p(3, 6)).is_none());
        assert_eq!(placed.get(p(3, 6)), Some(tile("_D_D")));
    }

    #[test]
    fn test_set_rejects_occupied() {
        let board = Board::new().set(p(3, 6), tile("_D_D")).unwrap();
        assert_eq!(
            board.set(p(3, 6), tile("_D_D")),
            Err(PlacementError::Occupied(p(3, 6)))
        );
        assert!(!board.is_valid(p(3, 6), &tile("DDDD")));
    }

    #[test]
    fn test_erase_restores_slots() {
        let empty = Board::new();
        let board = empty.set(p(3, 6), tile("_D_D")).unwrap();
        let erased = board.erase(p(3, 6));
        assert_eq!(erased, empty);
        // 移除空格子不改变棋盘
        assert_eq!(empty.erase(p(2, 2)), empty);
    }

    #[test]
    fn test_count_errors() {
        let board = Board::new().set(p(3, 0), tile("_D_D")).unwrap();
        assert_eq!(board.count_errors(), ErrorCount { total: 1, unfixable: 0 });

        let board = Board::from_placements([
            (p(3, 6), tile("_DD_")),
            (p(4, 6), tile("D__D")),
            // 北边公路对着 (4,6) 南边的 None：无法修复
            (p(5, 6), tile("DL__")),
        ])
        .unwrap();
        // (4,6) 西边伸向空格子：还能修复
        assert_eq!(board.count_errors(), ErrorCount { total: 2, unfixable: 1 });
    }

    #[test]
    fn test_track_off_board_is_not_an_error() {
        // (0,0) 西边伸出棋盘（没有出口），(0,1) 北边接公路出口
        let board = Board::from_placements([(p(0, 1), tile("DD_D")), (p(0, 0), tile("_D_D"))]).unwrap();
        // 只有 (0,1) 东边伸向空格子
        assert_eq!(board.count_errors(), ErrorCount { total: 1, unfixable: 0 });

        // 出口处的轨道类型在放置时就必须一致
        assert!(!Board::new().is_valid(p(0, 1), &tile("L_L_")));
        assert!(!Board::new().is_valid(p(5, 0), &tile("_D_D")));
    }

    #[test]
    fn test_display() {
        assert_eq!(Board::new().to_string(), "Empty");
        let board = Board::new().set(p(3, 0), tile("_D_D")).unwrap();
        assert_eq!(board.to_string(), "3,0_D_D ");
    }
}
