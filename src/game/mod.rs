/// 游戏逻辑模块
///
/// 包含规则常量、放置编码、回合状态机和演示用的选步策略

pub mod constants;
pub mod moves;
pub mod state;
pub mod simulation;

pub use moves::{CandidateMove, Move, TileSource};
pub use state::{GamePhase, GameState};
pub use simulation::{choose_move, play_game, Policy};
