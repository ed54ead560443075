use smallvec::SmallVec;

use crate::board::{Board, CELL_COUNT};
use crate::tile::Connector;
use crate::utils::EdgeMask;

/// 路线图中的一条边（可能是多条棋盘边串联成的超级边）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RouteLink {
    to: usize,
    mask: EdgeMask,
}

/// 某种轨道的路线图
///
/// 节点是含有该轨道的格子（按格子索引存放），边是相邻格子之间
/// 相对两侧都是该轨道的连接。每条边占用 `EdgeMask` 的一位。
/// 自环在所属节点的邻接表里出现两次。
#[derive(Debug, Clone)]
struct RouteGraph {
    nodes: Vec<Option<SmallVec<[RouteLink; 4]>>>,
}

impl RouteGraph {
    fn build(board: &Board, track: Connector) -> Self {
        let mut nodes: Vec<Option<SmallVec<[RouteLink; 4]>>> = vec![None; CELL_COUNT];

        for (position, tile) in board.tiles() {
            if !tile.has_track(track) {
                continue;
            }
            let mut links = SmallVec::new();
            for direction in tile.track_directions(track) {
                let Some(neighbor) = position.step(direction) else {
                    continue;
                };
                let connected = board
                    .get(neighbor)
                    .map_or(false, |t| t.side(direction.opposite()) == track);
                if !connected {
                    continue;
                }
                if let Some(edge) = position.edge_id(direction) {
                    links.push(RouteLink {
                        to: neighbor.index(),
                        mask: EdgeMask::single(edge),
                    });
                }
            }
            nodes[position.index()] = Some(links);
        }

        Self { nodes }
    }

    fn is_empty(&self) -> bool {
        self.nodes.iter().all(Option::is_none)
    }

    fn links(&self, node: usize) -> &[RouteLink] {
        self.nodes[node].as_deref().unwrap_or(&[])
    }

    /// 串联化简：反复把度为 2 的节点收缩成一条超级边
    ///
    /// 两条邻接都是同一个自环的节点（孤立的环）保留
    fn contract_series(&mut self) {
        loop {
            let mut changed = false;
            for node in 0..self.nodes.len() {
                let (left, right) = match self.nodes[node].as_deref() {
                    Some([left, right]) => (*left, *right),
                    _ => continue,
                };
                if left.to == node {
                    continue;
                }

                let merged = left.mask | right.mask;
                self.redirect(left.to, node, left.mask, right.to, merged);
                self.redirect(right.to, node, right.mask, left.to, merged);
                self.nodes[node] = None;
                changed = true;
            }
            if !changed {
                break;
            }
        }
    }

    /// 把 `at` 上指向 `from`、掩码为 `mask` 的那条边改为指向 `to`、掩码为 `merged`
    fn redirect(&mut self, at: usize, from: usize, mask: EdgeMask, to: usize, merged: EdgeMask) {
        if let Some(links) = self.nodes[at].as_mut() {
            if let Some(link) = links.iter_mut().find(|l| l.to == from && l.mask == mask) {
                link.to = to;
                link.mask = merged;
            }
        }
    }

    /// 最长不重复边的路线（格子数）
    fn longest_trail(&self) -> u32 {
        if self.is_empty() {
            return 0;
        }

        let mut best = 0;
        let mut visited = EdgeMask::EMPTY;

        // 先从分叉点和端点出发
        for node in 0..self.nodes.len() {
            if self.nodes[node].is_some() && self.links(node).len() != 2 {
                self.walk(node, EdgeMask::EMPTY, &mut visited, &mut best);
            }
        }

        // 纯环路上没有分叉点，从任一碰到未访问边的节点重新开始
        let all = self
            .nodes
            .iter()
            .flatten()
            .flat_map(|links| links.iter())
            .fold(EdgeMask::EMPTY, |acc, l| acc | l.mask);
        while !all.difference(visited).is_empty() {
            let unvisited = all.difference(visited);
            let start = (0..self.nodes.len()).find(|&n| {
                self.links(n).iter().any(|l| !l.mask.is_disjoint(unvisited))
            });
            match start {
                Some(node) => self.walk(node, EdgeMask::EMPTY, &mut visited, &mut best),
                None => break,
            }
        }

        best
    }

    fn walk(&self, node: usize, used: EdgeMask, visited: &mut EdgeMask, best: &mut u32) {
        *visited |= used;
        *best = (*best).max(used.count() + 1);

        for link in self.links(node) {
            if link.mask.is_disjoint(used) {
                self.walk(link.to, used | link.mask, visited, best);
            }
        }
    }
}

/// 某种轨道的最长路线（路线经过的格子数，环路回到起点时起点算两次）
///
/// - 棋盘上没有该轨道：0
/// - 有该轨道但没有任何连接：1
///
/// 先做串联化简，只在分叉点和端点之间搜索；每条边一位，
/// 路线不能重复使用已在掩码中的边
pub fn longest_route(board: &Board, track: Connector) -> u32 {
    let mut graph = RouteGraph::build(board, track);
    graph.contract_series();
    graph.longest_trail()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;
    use crate::tile::Tile;

    fn board(placements: &[(u8, u8, &str)]) -> Board {
        Board::from_placements(placements.iter().map(|&(row, col, tile)| {
            (Position::new(row, col).unwrap(), tile.parse::<Tile>().unwrap())
        }))
        .unwrap()
    }

    #[test]
    fn test_empty_board() {
        assert_eq!(longest_route(&Board::new(), Connector::Road), 0);
        assert_eq!(longest_route(&Board::new(), Connector::Rail), 0);
    }

    #[test]
    fn test_isolated_stub() {
        let b = board(&[(3, 0, "_D_D")]);
        assert_eq!(longest_route(&b, Connector::Road), 1);
        assert_eq!(longest_route(&b, Connector::Rail), 0);
    }

    #[test]
    fn test_chain_contracts_to_single_edge() {
        let b = board(&[(3, 0, "_D_D"), (3, 1, "_D_D"), (3, 2, "_D_D")]);
        let mut graph = RouteGraph::build(&b, Connector::Road);
        graph.contract_series();
        let alive = graph.nodes.iter().flatten().count();
        assert_eq!(alive, 2);
        assert_eq!(graph.longest_trail(), 3);
    }

    #[test]
    fn test_closed_loop_counts_start_twice() {
        let b = board(&[(3, 0, "_DDD"), (3, 1, "__DD"), (4, 1, "D__D"), (4, 0, "DD__")]);
        assert_eq!(longest_route(&b, Connector::Road), 5);
    }
}
