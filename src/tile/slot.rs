use std::fmt;
use std::str::FromStr;

use super::connector::Connector;
use super::tile::Tile;
use crate::board::Direction;
use crate::error::ParseError;

/// 空位描述
///
/// 空格子每一侧当前的要求：
/// - `Road`/`Rail`：相邻地块或出口要求这一侧必须是这种轨道
/// - `None`：相邻地块这一侧没有轨道（允许放轨道，但计分时算错误）
/// - `Unfilled`：相邻格子为空，无约束
/// - `Edge`：棋盘边界，无约束
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Slot {
    sides: [Connector; 4],
}

/// 地块放入空位时的匹配统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotFit {
    /// 与空位要求的轨道完全一致的边数
    pub matches: u8,
    /// 会产生计分错误的边数
    pub errors: u8,
}

impl Slot {
    /// 完全无约束的空位
    pub const UNFILLED: Slot = Slot { sides: [Connector::Unfilled; 4] };

    pub const fn new(sides: [Connector; 4]) -> Self {
        Self { sides }
    }

    /// 某一侧的要求
    pub fn side(&self, direction: Direction) -> Connector {
        self.sides[direction.index()]
    }

    pub fn sides(&self) -> [Connector; 4] {
        self.sides
    }

    /// 返回替换了某一侧的新空位
    pub fn with_side(&self, direction: Direction, connector: Connector) -> Self {
        let mut sides = self.sides;
        sides[direction.index()] = connector;
        Self { sides }
    }

    /// 是否至少有一侧要求轨道（否则没有任何地块能合法放入）
    pub fn has_requirement(&self) -> bool {
        self.sides.iter().any(|c| c.is_track())
    }

    /// 地块放入此空位是否合法
    ///
    /// 空位要求某种轨道时，地块这一侧不能是另一种轨道；
    /// 地块这一侧为 `None` 是允许的（相邻轨道变成断头，计分时算错误）。
    /// 另外至少要有一侧与要求的轨道完全一致。
    pub fn accepts(&self, tile: &Tile) -> bool {
        let mut matches = 0;
        for direction in Direction::ALL {
            let required = self.side(direction);
            let offered = tile.side(direction);
            if !required.is_track() {
                continue;
            }
            if offered == required {
                matches += 1;
            } else if offered.is_track() {
                return false;
            }
        }
        matches >= 1
    }

    /// 统计地块放入此空位的匹配数和错误数
    ///
    /// 轨道类型冲突时返回 `None`
    pub fn fit(&self, tile: &Tile) -> Option<SlotFit> {
        let mut fit = SlotFit::default();
        for direction in Direction::ALL {
            let required = self.side(direction);
            let offered = tile.side(direction);
            match (offered, required) {
                (Connector::None, r) if r.is_track() => fit.errors += 1,
                (Connector::None, _) => {}
                (o, r) if r.is_track() => {
                    if o == r {
                        fit.matches += 1;
                    } else {
                        return None;
                    }
                }
                (_, Connector::None) => fit.errors += 1,
                _ => {}
            }
        }
        Some(fit)
    }
}

impl Default for Slot {
    fn default() -> Self {
        Self::UNFILLED
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for side in self.sides {
            write!(f, "{}", side.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for Slot {
    type Err = ParseError;

    /// 解析 `"D..E"` 形式的字符串
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 4 {
            return Err(ParseError::InvalidSlot(s.to_string()));
        }
        let mut sides = [Connector::Unfilled; 4];
        for (side, &c) in sides.iter_mut().zip(chars.iter()) {
            *side = Connector::from_symbol(c)?;
        }
        Ok(Self { sides })
    }
}
