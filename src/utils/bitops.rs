/// 位掩码工具
///
/// 7×7 棋盘上相邻格子之间共有 84 条边（横向 42 条、纵向 42 条），
/// 每条边分配一个 0-83 的编号，用 u128 的一位表示。
///
/// 最长路线搜索用它记录“当前路径已经走过哪些边”，
/// 因此环路检测只是一次按位与，而不是维护已访问节点集合。

/// 棋盘上的边总数
pub const EDGE_COUNT: u8 = 84;

/// 边集合位掩码
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EdgeMask(u128);

impl EdgeMask {
    /// 空集合
    pub const EMPTY: EdgeMask = EdgeMask(0);

    /// 创建空集合
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// 只包含一条边的集合
    ///
    /// 超出范围的编号返回空集合
    pub const fn single(edge: u8) -> Self {
        if edge >= EDGE_COUNT {
            return Self::EMPTY;
        }
        EdgeMask(1u128 << edge)
    }

    /// 是否包含某条边
    pub const fn contains(&self, edge: u8) -> bool {
        edge < EDGE_COUNT && (self.0 >> edge) & 1 == 1
    }

    /// 添加一条边
    pub fn insert(&mut self, edge: u8) {
        self.0 |= Self::single(edge).0;
    }

    /// 并集
    pub const fn union(self, other: EdgeMask) -> Self {
        EdgeMask(self.0 | other.0)
    }

    /// 差集（在 self 中但不在 other 中）
    pub const fn difference(self, other: EdgeMask) -> Self {
        EdgeMask(self.0 & !other.0)
    }

    /// 两个集合是否没有公共边
    pub const fn is_disjoint(&self, other: EdgeMask) -> bool {
        self.0 & other.0 == 0
    }

    /// 边数（popcount）
    pub const fn count(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for EdgeMask {
    type Output = EdgeMask;

    fn bitor(self, rhs: EdgeMask) -> EdgeMask {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for EdgeMask {
    fn bitor_assign(&mut self, rhs: EdgeMask) {
        self.0 |= rhs.0;
    }
}
