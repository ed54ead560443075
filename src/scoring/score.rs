use std::fmt;

use super::exits::exits_score;
use super::route::longest_route;
use crate::board::Board;
use crate::tile::Connector;

/// 计分结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct Score {
    /// 出口连通得分
    pub exits: i32,
    /// 最长公路
    pub road: i32,
    /// 最长铁路
    pub rail: i32,
    /// 中心 3×3 区域占用数
    pub center: i32,
    /// 错误扣分（非正数）
    pub errors: i32,
    /// 总分
    pub total: i32,
}

impl Score {
    /// 由各项得分组装，总分为各项之和
    pub fn new(exits: i32, road: i32, rail: i32, center: i32, errors: i32) -> Self {
        Self {
            exits,
            road,
            rail,
            center,
            errors,
            total: exits + road + rail + center + errors,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "exits {} + road {} + rail {} + center {} + errors {} = {}",
            self.exits, self.road, self.rail, self.center, self.errors, self.total
        )
    }
}

/// 中心得分：中心 3×3 区域内已放置的地块数
pub fn center_score(board: &Board) -> i32 {
    board.tiles().filter(|(p, _)| p.is_center()).count() as i32
}

/// 错误扣分
pub fn errors_score(board: &Board) -> i32 {
    -(board.count_errors().total as i32)
}

/// 从头计算棋盘得分
pub fn calculate_score(board: &Board) -> Score {
    Score::new(
        exits_score(board),
        longest_route(board, Connector::Road) as i32,
        longest_route(board, Connector::Rail) as i32,
        center_score(board),
        errors_score(board),
    )
}
