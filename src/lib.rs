/// 路线拼图游戏引擎
///
/// 7×7 棋盘上的公路 / 铁路地块放置：放置规则、回合状态机和连通计分

pub mod tile;
pub mod utils;
pub mod board;
pub mod game;
pub mod scoring;
pub mod error;
pub mod config;

// 重新导出常用类型
pub use tile::{Connector, Dice, Slot, SlotFit, Tile, Transform};
pub use utils::EdgeMask;
pub use board::{meaningful_placements, Board, Direction, ErrorCount, Exit, Grid, Position, EXITS};
pub use game::{CandidateMove, GamePhase, GameState, Move, Policy, TileSource};
pub use scoring::{calculate_score, longest_route, Score, TrackNetwork};
pub use error::{ConfigError, GameError, ParseError, PlacementError};
pub use config::SimulationConfig;

// Python 绑定模块
#[cfg(feature = "python")]
pub mod python;
