use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::connector::Connector::{None as N, Rail as L, Road as D};
use super::tile::Tile;
use crate::game::constants::TILES_PER_ROUND;

/// 骰子 A 的六个面：直路、弯路、丁字路（公路 / 铁路各一）
pub const ROUTE_DIE_A: [Tile; 6] = [
    Tile::from_parts([N, D, N, D], false),
    Tile::from_parts([N, L, N, L], false),
    Tile::from_parts([N, D, D, N], false),
    Tile::from_parts([N, L, L, N], false),
    Tile::from_parts([N, D, D, D], false),
    Tile::from_parts([N, L, L, L], false),
];

/// 骰子 B 的三个面：立交、直线车站、弯道车站
pub const ROUTE_DIE_B: [Tile; 3] = [
    Tile::from_parts([D, L, D, L], true),
    Tile::from_parts([N, D, N, L], false),
    Tile::from_parts([N, N, D, L], false),
];

/// 每回合掷骰子 A 的次数（另外掷一次骰子 B）
pub const DIE_A_ROLLS: usize = TILES_PER_ROUND - 1;

/// 路线骰子
///
/// 每回合掷三次骰子 A、一次骰子 B，得到本回合的 4 个地块
#[derive(Debug, Clone)]
pub struct Dice {
    rng: StdRng,
}

impl Dice {
    /// 使用系统熵初始化
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// 使用固定种子初始化（结果可复现）
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// 掷一回合的骰子
    pub fn roll(&mut self) -> [Tile; TILES_PER_ROUND] {
        let mut tiles = [ROUTE_DIE_B[0]; TILES_PER_ROUND];
        for tile in tiles.iter_mut().take(DIE_A_ROLLS) {
            *tile = *ROUTE_DIE_A.choose(&mut self.rng).unwrap_or(&ROUTE_DIE_A[0]);
        }
        tiles[DIE_A_ROLLS] = *ROUTE_DIE_B.choose(&mut self.rng).unwrap_or(&ROUTE_DIE_B[0]);
        tiles
    }

    /// 内部随机数发生器（供外部策略共享同一随机序列）
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl Default for Dice {
    fn default() -> Self {
        Self::new()
    }
}
