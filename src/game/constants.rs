/// 游戏常量定义
///
/// 集中管理所有规则数字

use crate::tile::Connector::{Rail as L, Road as D};
use crate::tile::Tile;

/// 每局回合数
pub const NUM_ROUNDS: u8 = 7;

/// 每回合掷出的地块数
pub const TILES_PER_ROUND: usize = 4;

/// 每局最多使用的特殊地块数
pub const MAX_SPECIAL_TILES: usize = 3;

/// 每回合最多使用的特殊地块数
pub const MAX_SPECIAL_PER_ROUND: usize = 1;

/// 特殊地块数
pub const NUM_SPECIAL_TILES: usize = 6;

/// 六个固定的特殊地块（每局每个最多用一次）
pub const SPECIAL_TILES: [Tile; NUM_SPECIAL_TILES] = [
    Tile::from_parts([D, D, L, D], false),
    Tile::from_parts([D, L, L, L], false),
    Tile::from_parts([D, D, D, D], false),
    Tile::from_parts([L, L, L, L], false),
    Tile::from_parts([D, L, L, D], false),
    Tile::from_parts([D, L, D, L], false),
];

/// 出口分组得分表：索引为同一组连通的出口数
///
/// 只连到一个出口的组不得分
pub const EXIT_SCORES: [i32; 13] = [0, 0, 4, 8, 12, 16, 20, 24, 28, 32, 36, 40, 45];
