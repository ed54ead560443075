use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use super::connector::Connector;
use crate::board::Direction;
use crate::error::ParseError;

/// 立交标记字符
pub const CROSSING_MARKER: char = 'o';

/// 路线地块
///
/// 四条边依次为 北、东、南、西（索引 0-3，与旋转无关），
/// 每条边是 `Road`/`Rail`/`None` 之一。
///
/// `crossing` 为真时是立交地块：公路和铁路在同一格内交叉但不相连，
/// 一条轨道占据南北轴，另一条占据东西轴。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Tile {
    sides: [Connector; 4],
    crossing: bool,
}

/// 对称变换：先顺时针旋转 `rotation` 步，再可选地东西翻转
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transform {
    pub rotation: u8,
    pub flip: bool,
}

impl Transform {
    /// 二面体群的全部 8 个元素，按 (旋转, 翻转) 顺序
    pub const ALL: [Transform; 8] = [
        Transform { rotation: 0, flip: false },
        Transform { rotation: 0, flip: true },
        Transform { rotation: 1, flip: false },
        Transform { rotation: 1, flip: true },
        Transform { rotation: 2, flip: false },
        Transform { rotation: 2, flip: true },
        Transform { rotation: 3, flip: false },
        Transform { rotation: 3, flip: true },
    ];

    pub const IDENTITY: Transform = Transform { rotation: 0, flip: false };
}

impl Tile {
    /// 不做校验的构造，仅供常量表使用
    pub(crate) const fn from_parts(sides: [Connector; 4], crossing: bool) -> Self {
        Self { sides, crossing }
    }

    /// 创建地块，验证输入有效性
    ///
    /// - 每条边必须是 `Road`/`Rail`/`None`
    /// - 立交地块必须南北同一种轨道、东西另一种轨道
    pub fn new(sides: [Connector; 4], crossing: bool) -> Option<Self> {
        if !sides.iter().all(|c| c.is_tile_side()) {
            return None;
        }
        if crossing {
            let [n, e, s, w] = sides;
            let axes_ok = n == s && e == w && n.is_track() && e.is_track() && n != e;
            if !axes_ok {
                return None;
            }
        }
        Some(Self { sides, crossing })
    }

    /// 某一侧的连接
    pub fn side(&self, direction: Direction) -> Connector {
        self.sides[direction.index()]
    }

    /// 四条边
    pub fn sides(&self) -> [Connector; 4] {
        self.sides
    }

    /// 是否为立交地块
    pub fn is_crossing(&self) -> bool {
        self.crossing
    }

    /// 是否含有某种轨道
    pub fn has_track(&self, track: Connector) -> bool {
        track.is_track() && self.sides.contains(&track)
    }

    /// 含有某种轨道的方向
    pub fn track_directions(&self, track: Connector) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |&d| track.is_track() && self.side(d) == track)
    }

    /// 顺时针旋转 `steps` 步（北边的连接转到东边）
    pub fn rotate(&self, steps: u8) -> Self {
        let steps = (steps % 4) as usize;
        let mut sides = self.sides;
        for (i, side) in sides.iter_mut().enumerate() {
            *side = self.sides[(i + 4 - steps) % 4];
        }
        Self { sides, crossing: self.crossing }
    }

    /// 东西翻转，南北保持不变
    pub fn flip(&self) -> Self {
        let [n, e, s, w] = self.sides;
        Self { sides: [n, w, s, e], crossing: self.crossing }
    }

    /// 应用一个变换：先旋转，再翻转
    pub fn transform(&self, transform: Transform) -> Self {
        let rotated = self.rotate(transform.rotation);
        if transform.flip {
            rotated.flip()
        } else {
            rotated
        }
    }

    /// 所有不同的对称变换结果（最多 8 个）
    ///
    /// 按 `Transform::ALL` 的顺序生成，重复的结果只保留第一次出现
    pub fn all_transforms(&self) -> SmallVec<[Tile; 8]> {
        let mut result: SmallVec<[Tile; 8]> = SmallVec::new();
        for transform in Transform::ALL {
            let tile = self.transform(transform);
            if !result.contains(&tile) {
                result.push(tile);
            }
        }
        result
    }

    /// `self` 是否是 `other` 的某个变换
    pub fn is_transform_of(&self, other: &Tile) -> bool {
        Transform::ALL.iter().any(|&t| other.transform(t) == *self)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for side in self.sides {
            write!(f, "{}", side.symbol())?;
        }
        if self.crossing {
            write!(f, "{}", CROSSING_MARKER)?;
        }
        Ok(())
    }
}

impl FromStr for Tile {
    type Err = ParseError;

    /// 解析 `"D_D_"` / `"DLDLo"` 形式的字符串
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        let crossing = match chars.len() {
            4 => false,
            5 if chars[4] == CROSSING_MARKER => true,
            _ => return Err(ParseError::InvalidTile(s.to_string())),
        };

        let mut sides = [Connector::None; 4];
        for (side, &c) in sides.iter_mut().zip(chars.iter()) {
            *side = Connector::from_symbol(c)?;
        }

        Tile::new(sides, crossing).ok_or_else(|| ParseError::InvalidTile(s.to_string()))
    }
}
