/// 地块相关模块
///
/// 包含连接类型（Connector）、地块与对称变换（Tile / Transform）、
/// 空位描述（Slot）和路线骰子（Dice）

pub mod connector;
pub mod tile;
pub mod slot;
pub mod dice;

// 重新导出常用类型
pub use connector::Connector;
pub use tile::{Tile, Transform};
pub use slot::{Slot, SlotFit};
pub use dice::{Dice, ROUTE_DIE_A, ROUTE_DIE_B};
