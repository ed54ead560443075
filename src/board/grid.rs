use std::fmt;

/// 棋盘边长
pub const BOARD_SIZE: u8 = 7;

/// 格子总数
pub const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// 方向（也是地块四条边的索引）
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    /// 按索引顺序的全部方向
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// 相反方向
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// 是否为东西方向
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }
}

/// 棋盘坐标（行、列均为 0-6）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// 创建坐标，越界返回 `None`
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// 不做越界检查的构造，仅供常量表使用
    pub(crate) const fn at(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// 转换为格子索引（0-48，按行优先）
    pub const fn index(&self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }

    /// 从格子索引恢复坐标
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= CELL_COUNT {
            return None;
        }
        let size = BOARD_SIZE as usize;
        Some(Self {
            row: (index / size) as u8,
            col: (index % size) as u8,
        })
    }

    /// 向某个方向走一格；走出棋盘返回 `None`
    pub fn step(&self, direction: Direction) -> Option<Position> {
        match direction {
            Direction::North => self.row.checked_sub(1).and_then(|r| Position::new(r, self.col)),
            Direction::East => Position::new(self.row, self.col + 1),
            Direction::South => Position::new(self.row + 1, self.col),
            Direction::West => self.col.checked_sub(1).and_then(|c| Position::new(self.row, c)),
        }
    }

    /// 是否位于中心 3×3 区域
    pub const fn is_center(&self) -> bool {
        self.row >= 2 && self.row <= 4 && self.col >= 2 && self.col <= 4
    }

    /// 本格与某方向相邻格之间的边编号（0-83）
    ///
    /// 横向边编号 0-41，纵向边编号 42-83；走出棋盘返回 `None`
    pub fn edge_id(&self, direction: Direction) -> Option<u8> {
        let other = self.step(direction)?;
        let (a, b) = if other < *self { (other, *self) } else { (*self, other) };
        let size = BOARD_SIZE;
        if a.row == b.row {
            Some(a.row * (size - 1) + a.col)
        } else {
            Some(size * (size - 1) + a.row * size + a.col)
        }
    }

    /// 按行优先顺序遍历所有坐标
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).filter_map(Position::from_index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// 固定 7×7 的稀疏网格
///
/// 用于存放已放置的地块和每个空格子的空位描述。
/// 数据是定长数组，复制整个网格即可得到独立的新值。
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid<T: Copy> {
    cells: [Option<T>; CELL_COUNT],
}

impl<T: Copy> Grid<T> {
    /// 创建空网格
    pub fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }

    /// 从 (坐标, 值) 列表创建
    pub fn from_entries<I: IntoIterator<Item = (Position, T)>>(entries: I) -> Self {
        let mut grid = Self::new();
        for (position, value) in entries {
            grid.set(position, value);
        }
        grid
    }

    pub fn get(&self, position: Position) -> Option<T> {
        self.cells[position.index()]
    }

    pub fn contains(&self, position: Position) -> bool {
        self.cells[position.index()].is_some()
    }

    pub fn set(&mut self, position: Position, value: T) {
        self.cells[position.index()] = Some(value);
    }

    /// 删除并返回原值
    pub fn remove(&mut self, position: Position) -> Option<T> {
        self.cells[position.index()].take()
    }

    /// 修改已有的值；不存在时不做任何事
    pub fn update<F: FnOnce(&mut T)>(&mut self, position: Position, f: F) {
        if let Some(value) = self.cells[position.index()].as_mut() {
            f(value);
        }
    }

    /// 按行优先顺序遍历所有非空格子
    pub fn entries(&self) -> impl Iterator<Item = (Position, T)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| Some((Position::from_index(i)?, (*cell)?)))
    }

    /// 所有非空格子的坐标
    pub fn keys(&self) -> impl Iterator<Item = Position> + '_ {
        self.entries().map(|(p, _)| p)
    }

    /// 非空格子数量
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }
}

impl<T: Copy> Default for Grid<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}
