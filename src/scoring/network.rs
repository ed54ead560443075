use tracing::trace;

use crate::board::{Board, Direction, Grid, Position};
use crate::tile::{Connector, Tile};
use crate::utils::EdgeMask;

/// 节点某一侧的连接状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Link {
    /// 没有轨道，或轨道伸出棋盘 / 对着不匹配的地块
    Dead,
    /// 轨道对着空格子，以后还可能接上
    Open,
    /// 连到另一个节点
    ///
    /// `key` 是这条连接上第一条棋盘边的编号，在整个网络中唯一；
    /// `len` 是这条连接串联的棋盘边数
    To { cell: u8, key: u8, len: u8 },
}

impl Link {
    fn target(&self) -> Option<Position> {
        match *self {
            Link::To { cell, .. } => Position::from_index(cell as usize),
            _ => None,
        }
    }

    fn is_link(&self) -> bool {
        matches!(self, Link::To { .. })
    }
}

type Node = [Link; 4];

/// 增量维护的单一轨道网络
///
/// 每次放置只在局部修改：
/// 1. 新地块不接轨道的一侧，把邻居朝向它的 `Open` 改为 `Dead`
/// 2. 新地块的轨道边接到已有节点，或标记为 `Open` / `Dead`
/// 3. 没有 `Open`、恰好两条连接的节点收缩进连接（串联化简）
/// 4. 分叉点只剩一个可延伸方向时，剪掉最短的叶子分支
/// 5. 不再有 `Open` 的连通块已经定型：记下它的最长路线后整体删除
///
/// 任何时刻 `longest_route` 都与对同一棋盘从头计算的结果相同。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackNetwork {
    track: Connector,
    nodes: Grid<Node>,
    closed_best: u32,
}

impl TrackNetwork {
    /// 创建空网络
    pub fn new(track: Connector) -> Self {
        Self {
            track,
            nodes: Grid::new(),
            closed_best: 0,
        }
    }

    /// 按行优先顺序重放棋盘上的所有地块
    pub fn from_board(board: &Board, track: Connector) -> Self {
        let mut tiles: Grid<Tile> = Grid::new();
        let mut network = Self::new(track);
        for (position, tile) in board.tiles() {
            network = network.update(&tiles, position, tile);
            tiles.set(position, tile);
        }
        network
    }

    pub fn track(&self) -> Connector {
        self.track
    }

    /// 仍在网络中的节点数（已收缩、剪掉或定型的格子不计）
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// 某格的节点
    pub fn node(&self, position: Position) -> Option<[Link; 4]> {
        self.nodes.get(position)
    }

    /// 已定型连通块中最长路线的最大值
    pub fn closed_best(&self) -> u32 {
        self.closed_best
    }

    /// 放置一个地块后的新网络
    ///
    /// # 参数
    ///
    /// - `tiles`: 放置之前棋盘上的地块
    /// - `position`: 放置位置
    /// - `tile`: 放置的地块（已变换）
    pub fn update(&self, tiles: &Grid<Tile>, position: Position, tile: Tile) -> Self {
        let mut next = *self;
        let track = self.track;

        for direction in Direction::ALL {
            if tile.side(direction) == track {
                continue;
            }
            if let Some(neighbor) = position.step(direction) {
                let facing = direction.opposite().index();
                next.nodes.update(neighbor, |node| {
                    if node[facing] == Link::Open {
                        node[facing] = Link::Dead;
                    }
                });
            }
        }

        if tile.has_track(track) {
            let mut node = [Link::Dead; 4];
            for direction in tile.track_directions(track) {
                let Some(neighbor) = position.step(direction) else {
                    continue;
                };
                let facing = direction.opposite().index();
                node[direction.index()] = match tiles.get(neighbor) {
                    None => Link::Open,
                    Some(other) if other.side(direction.opposite()) != track => Link::Dead,
                    Some(_) => {
                        let waiting = next.nodes.get(neighbor).map(|n| n[facing]) == Some(Link::Open);
                        match position.edge_id(direction) {
                            Some(key) if waiting => {
                                next.nodes.update(neighbor, |n| {
                                    n[facing] = Link::To {
                                        cell: position.index() as u8,
                                        key,
                                        len: 1,
                                    };
                                });
                                Link::To {
                                    cell: neighbor.index() as u8,
                                    key,
                                    len: 1,
                                }
                            }
                            _ => Link::Dead,
                        }
                    }
                };
            }
            next.nodes.set(position, node);
        }

        next.simplify();
        next.close_finished();
        next
    }

    /// 当前最长路线（格子数）
    pub fn longest_route(&self) -> u32 {
        let open_best = self
            .nodes
            .keys()
            .map(|p| self.trail_from(p, EdgeMask::EMPTY, 0) + 1)
            .max()
            .unwrap_or(0);
        open_best.max(self.closed_best)
    }

    fn simplify(&mut self) {
        while self.prune_passthrough() || self.prune_leaf() {}
    }

    /// 收缩一个没有 `Open`、恰好两条连接的节点
    fn prune_passthrough(&mut self) -> bool {
        let candidate = self.nodes.entries().find_map(|(p, node)| {
            if node.contains(&Link::Open) {
                return None;
            }
            let mut links = node.iter().filter(|l| l.is_link());
            let (Some(&left), Some(&right), None) = (links.next(), links.next(), links.next()) else {
                return None;
            };
            // 孤立环路的最后一个节点：两条连接是同一个自环
            if left.target() == Some(p) {
                return None;
            }
            Some((p, left, right))
        });

        let Some((position, left, right)) = candidate else {
            return false;
        };
        let (
            Link::To { cell: a, key: left_key, len: left_len },
            Link::To { cell: b, key: right_key, len: right_len },
        ) = (left, right)
        else {
            return false;
        };

        let len = left_len + right_len;
        self.rewire(a, position, left_key, Link::To { cell: b, key: left_key, len });
        self.rewire(b, position, right_key, Link::To { cell: a, key: left_key, len });
        self.nodes.remove(position);
        true
    }

    /// 把 `at` 上指向 `from`、编号为 `key` 的那一侧替换为 `link`
    fn rewire(&mut self, at: u8, from: Position, key: u8, link: Link) {
        let Some(at) = Position::from_index(at as usize) else {
            return;
        };
        let from_cell = from.index() as u8;
        self.nodes.update(at, |node| {
            let side = node.iter_mut().find(|l| {
                matches!(**l, Link::To { cell, key: k, .. } if cell == from_cell && k == key)
            });
            if let Some(side) = side {
                *side = link;
            }
        });
    }

    /// 叶子节点：只有一侧不是 `Dead`
    fn is_leaf(&self, position: Position) -> bool {
        self.nodes
            .get(position)
            .map_or(false, |node| node.iter().filter(|l| **l != Link::Dead).count() == 1)
    }

    /// 剪掉一个分叉点上多余的叶子分支
    ///
    /// 分叉点至少三条连接，且 `Open` 与通向非叶子节点的连接合计不超过一条时，
    /// 最短的连接（长度相同时优先叶子）如果通向叶子，就把这片叶子删掉。
    /// 路线最多用到分叉点上的两个方向，最短的叶子总能被更长的方向替换。
    fn prune_leaf(&mut self) -> bool {
        let candidate = self.nodes.entries().find_map(|(p, node)| {
            let links = node.iter().filter(|l| l.is_link()).count();
            if links < 3 {
                return None;
            }
            let extendable = node
                .iter()
                .filter(|l| match l.target() {
                    Some(target) => !self.is_leaf(target),
                    None => **l == Link::Open,
                })
                .count();
            if extendable > 1 {
                return None;
            }

            let (side, shortest) = node
                .iter()
                .enumerate()
                .filter_map(|(i, l)| match *l {
                    Link::To { len, .. } => {
                        let leaf = l.target().map_or(false, |t| self.is_leaf(t));
                        Some((i, *l, (len, !leaf)))
                    }
                    _ => None,
                })
                .min_by_key(|&(_, _, rank)| rank)
                .map(|(i, l, _)| (i, l))?;

            let target = shortest.target()?;
            self.is_leaf(target).then_some((p, side, target))
        });

        let Some((position, side, leaf)) = candidate else {
            return false;
        };
        self.nodes.remove(leaf);
        self.nodes.update(position, |node| node[side] = Link::Dead);
        true
    }

    /// 删除所有已定型的连通块，记下它们的最长路线
    fn close_finished(&mut self) {
        let mut seen: Grid<()> = Grid::new();
        let starts: Vec<Position> = self.nodes.keys().collect();

        for start in starts {
            if seen.contains(start) || !self.nodes.contains(start) {
                continue;
            }

            let component = self.component(start);
            for &p in &component {
                seen.set(p, ());
            }

            let finished = component
                .iter()
                .all(|&p| self.nodes.get(p).map_or(true, |n| !n.contains(&Link::Open)));
            if !finished {
                continue;
            }

            let best = component
                .iter()
                .map(|&p| self.trail_from(p, EdgeMask::EMPTY, 0) + 1)
                .max()
                .unwrap_or(0);
            trace!(track = ?self.track, %start, best, nodes = component.len(), "network component closed");
            self.closed_best = self.closed_best.max(best);
            for p in component {
                self.nodes.remove(p);
            }
        }
    }

    /// 与某节点连通的所有节点
    fn component(&self, start: Position) -> Vec<Position> {
        let mut found = vec![start];
        let mut stack = vec![start];
        while let Some(p) = stack.pop() {
            let Some(node) = self.nodes.get(p) else {
                continue;
            };
            for target in node.iter().filter_map(Link::target) {
                if !found.contains(&target) {
                    found.push(target);
                    stack.push(target);
                }
            }
        }
        found
    }

    /// 从某节点出发、不重复使用连接的最长路线的边数
    fn trail_from(&self, position: Position, used: EdgeMask, length: u32) -> u32 {
        let Some(node) = self.nodes.get(position) else {
            return length;
        };
        let mut best = length;
        for link in node.iter() {
            if let Link::To { key, len, .. } = *link {
                if used.contains(key) {
                    continue;
                }
                if let Some(target) = link.target() {
                    let mut next_used = used;
                    next_used.insert(key);
                    best = best.max(self.trail_from(target, next_used, length + len as u32));
                }
            }
        }
        best
    }
}
