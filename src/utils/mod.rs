/// 工具模块

pub mod bitops;

pub use bitops::{EdgeMask, EDGE_COUNT};
