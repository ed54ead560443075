use crate::error::ParseError;

/// 连接类型
///
/// 地块和空位的每一条边都是一个连接值：
/// - `Road`/`Rail`：公路 / 铁路
/// - `None`：这一侧没有轨道
/// - `Unfilled`：（仅空位）相邻格子还没有地块
/// - `Edge`：（仅空位）这一侧是棋盘边界且没有出口
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Connector {
    Road,
    Rail,
    None,
    Unfilled,
    Edge,
}

impl Connector {
    /// 两种轨道类型
    pub const TRACKS: [Connector; 2] = [Connector::Road, Connector::Rail];

    /// 是否为轨道（公路或铁路）
    pub const fn is_track(self) -> bool {
        matches!(self, Connector::Road | Connector::Rail)
    }

    /// 是否可以出现在地块上（公路、铁路或无）
    pub const fn is_tile_side(self) -> bool {
        matches!(self, Connector::Road | Connector::Rail | Connector::None)
    }

    /// 编码字符
    pub const fn symbol(self) -> char {
        match self {
            Connector::Road => 'D',
            Connector::Rail => 'L',
            Connector::None => '_',
            Connector::Unfilled => '.',
            Connector::Edge => 'E',
        }
    }

    /// 从编码字符解析
    pub fn from_symbol(symbol: char) -> Result<Self, ParseError> {
        match symbol {
            'D' => Ok(Connector::Road),
            'L' => Ok(Connector::Rail),
            '_' => Ok(Connector::None),
            '.' => Ok(Connector::Unfilled),
            'E' => Ok(Connector::Edge),
            other => Err(ParseError::UnknownSymbol(other)),
        }
    }
}

impl std::fmt::Display for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
