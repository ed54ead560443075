/// 计分模块
///
/// 出口连通、最长公路 / 铁路、中心占用和错误扣分。
/// 最长路线既有从头计算的版本，也有随放置增量维护的 `TrackNetwork`。

pub mod score;
pub mod exits;
pub mod route;
pub mod network;

// 重新导出常用类型
pub use score::{calculate_score, center_score, errors_score, Score};
pub use exits::{exit_group_sizes, exits_score, network_ids, NetworkIds};
pub use route::longest_route;
pub use network::{Link, TrackNetwork};
