use super::grid::{Direction, Position};
use crate::tile::Connector;

/// 棋盘边界上的出口
///
/// 出口所在格子朝向棋盘外的那一侧要求指定的轨道类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Exit {
    pub position: Position,
    pub direction: Direction,
    pub track: Connector,
}

const fn exit(row: u8, col: u8, direction: Direction, track: Connector) -> Exit {
    Exit {
        position: Position::at(row, col),
        direction,
        track,
    }
}

/// 12 个固定出口，顺时针从北边开始
pub const EXITS: [Exit; 12] = [
    exit(0, 1, Direction::North, Connector::Road),
    exit(0, 3, Direction::North, Connector::Rail),
    exit(0, 5, Direction::North, Connector::Road),
    exit(1, 6, Direction::East, Connector::Rail),
    exit(3, 6, Direction::East, Connector::Road),
    exit(5, 6, Direction::East, Connector::Rail),
    exit(6, 5, Direction::South, Connector::Road),
    exit(6, 3, Direction::South, Connector::Rail),
    exit(6, 1, Direction::South, Connector::Road),
    exit(5, 0, Direction::West, Connector::Rail),
    exit(3, 0, Direction::West, Connector::Road),
    exit(1, 0, Direction::West, Connector::Rail),
];

/// 查找位于某格某侧的出口
pub fn exit_at(position: Position, direction: Direction) -> Option<&'static Exit> {
    EXITS
        .iter()
        .find(|e| e.position == position && e.direction == direction)
}
