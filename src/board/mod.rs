/// 棋盘相关模块
///
/// 包含坐标与网格（Position / Grid）、固定出口（Exit）、
/// 棋盘持久值（Board）和有意义放置过滤

pub mod grid;
pub mod exits;
pub mod board;
pub mod placement;

// 重新导出常用类型
pub use grid::{Direction, Grid, Position, BOARD_SIZE, CELL_COUNT};
pub use exits::{exit_at, Exit, EXITS};
pub use board::{Board, ErrorCount};
pub use placement::meaningful_placements;
