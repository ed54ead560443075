use std::path::PathBuf;

use crate::board::Position;
use crate::game::moves::TileSource;
use crate::tile::Tile;

/// 放置地块失败
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    /// 目标格子已有地块
    #[error("cell {0} is already occupied")]
    Occupied(Position),

    /// 地块与空位要求冲突，或没有任何一侧连上已有轨道 / 出口
    #[error("tile {tile} cannot be placed at {position}")]
    Rejected { position: Position, tile: Tile },
}

/// 游戏状态转换失败
///
/// 所有错误都在修改状态之前返回
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// 游戏已结束
    #[error("game is over")]
    GameOver,

    /// 本回合剩余地块（及可用的特殊地块）中没有与之匹配的
    #[error("no matching tile available for {0}")]
    NoMatchingTile(Tile),

    /// 指定来源的地块经任何变换都不是这个地块
    #[error("{from:?} holds {expected}, not {tile}")]
    TileMismatch {
        from: TileSource,
        expected: Tile,
        tile: Tile,
    },

    /// 地块索引越界
    #[error("no tile at {0:?}")]
    InvalidTileIndex(TileSource),

    /// 地块已经用过
    #[error("{0:?} has already been used")]
    TileAlreadyUsed(TileSource),

    /// 整局特殊地块已用满
    #[error("special tile limit reached")]
    SpecialLimitReached,

    /// 本回合已用过特殊地块
    #[error("a special tile was already used this round")]
    SpecialAlreadyUsedThisRound,

    /// 仍有合法放置时不能结束回合
    #[error("round {0} cannot end while a legal placement remains")]
    CannotEndRound(u8),

    /// 非法放置
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// 字符串解析失败
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown connector symbol {0:?}")]
    UnknownSymbol(char),

    #[error("invalid tile string {0:?}")]
    InvalidTile(String),

    #[error("invalid slot string {0:?}")]
    InvalidSlot(String),

    #[error("invalid move string {0:?}")]
    InvalidMove(String),
}

/// 读取配置失败
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
