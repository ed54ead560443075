use std::fmt;
use std::str::FromStr;

use crate::board::Position;
use crate::error::ParseError;
use crate::tile::Tile;

/// 一步放置：在某格放下一个（已变换的）地块
///
/// 字符串形式为 `{行}{列}{地块}`，如 `"30_D_D"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Move {
    pub position: Position,
    pub tile: Tile,
}

impl Move {
    pub fn new(position: Position, tile: Tile) -> Self {
        Self { position, tile }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.position.row, self.position.col, self.tile)
    }
}

impl FromStr for Move {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidMove(s.to_string());

        let mut chars = s.chars();
        let row = chars.next().and_then(|c| c.to_digit(10)).ok_or_else(invalid)?;
        let col = chars.next().and_then(|c| c.to_digit(10)).ok_or_else(invalid)?;
        let position = Position::new(row as u8, col as u8).ok_or_else(invalid)?;
        let tile = chars.as_str().parse::<Tile>()?;

        Ok(Self { position, tile })
    }
}

/// 地块来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TileSource {
    /// 本回合掷出的第 i 个地块
    Round(usize),
    /// 第 i 个特殊地块
    Special(usize),
}

/// 候选放置：一步放置及其使用的地块来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CandidateMove {
    pub source: TileSource,
    pub placement: Move,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_encoding() {
        let m: Move = "30_D_D".parse().unwrap();
        assert_eq!(m.position, Position::new(3, 0).unwrap());
        assert_eq!(m.tile, "_D_D".parse().unwrap());
        assert_eq!(m.to_string(), "30_D_D");

        let crossing: Move = "66DLDLo".parse().unwrap();
        assert!(crossing.tile.is_crossing());
        assert_eq!(crossing.to_string(), "66DLDLo");
    }

    #[test]
    fn test_move_parse_errors() {
        assert_eq!(
            "70_D_D".parse::<Move>(),
            Err(ParseError::InvalidMove("70_D_D".to_string()))
        );
        assert!("3_D_D".parse::<Move>().is_err());
        assert!("".parse::<Move>().is_err());
        assert_eq!(
            "30_D_".parse::<Move>(),
            Err(ParseError::InvalidTile("_D_".to_string()))
        );
    }
}
