use crate::board::{Board, Direction, Grid, CELL_COUNT, EXITS};
use crate::game::constants::EXIT_SCORES;

/// 单个格子的网络标识
///
/// 普通地块的横向、纵向标识总是相同；立交地块两者独立
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkIds {
    pub horizontal: u8,
    pub vertical: u8,
}

/// 为每个已放置的格子分配网络标识
///
/// 按行优先顺序扫描，每个格子先拿到两个新标识：
/// - 普通地块把纵向标识并入横向标识
/// - 与左邻居相连（相对两侧是同种轨道）时，横向标识并入左邻居的横向标识
/// - 与上邻居相连时，纵向标识并入上邻居的纵向标识
///
/// 合并时把所有格子上的旧标识都改成新标识，因此扫描结束后
/// 同一连通块内的标识一致
pub fn network_ids(board: &Board) -> Grid<NetworkIds> {
    let mut ids: Grid<NetworkIds> = Grid::new();
    let mut next_id: u8 = 0;

    for (position, tile) in board.tiles() {
        let own = NetworkIds {
            horizontal: next_id,
            vertical: next_id + 1,
        };
        next_id += 2;
        ids.set(position, own);

        if !tile.is_crossing() {
            relabel(&mut ids, own.vertical, own.horizontal);
        }

        if let Some(left) = position.step(Direction::West) {
            let facing = tile.side(Direction::West);
            let connected = board
                .get(left)
                .map_or(false, |t| facing.is_track() && t.side(Direction::East) == facing);
            if connected {
                if let (Some(l), Some(c)) = (ids.get(left), ids.get(position)) {
                    relabel(&mut ids, c.horizontal, l.horizontal);
                }
            }
        }

        if let Some(above) = position.step(Direction::North) {
            let facing = tile.side(Direction::North);
            let connected = board
                .get(above)
                .map_or(false, |t| facing.is_track() && t.side(Direction::South) == facing);
            if connected {
                if let (Some(a), Some(c)) = (ids.get(above), ids.get(position)) {
                    relabel(&mut ids, c.vertical, a.vertical);
                }
            }
        }
    }

    ids
}

/// 把所有格子上的 `from` 标识改为 `to`
fn relabel(ids: &mut Grid<NetworkIds>, from: u8, to: u8) {
    if from == to {
        return;
    }
    let positions: Vec<_> = ids.keys().collect();
    for position in positions {
        ids.update(position, |cell| {
            if cell.horizontal == from {
                cell.horizontal = to;
            }
            if cell.vertical == from {
                cell.vertical = to;
            }
        });
    }
}

/// 每个网络连到的出口数（只列出至少连到一个出口的网络）
pub fn exit_group_sizes(board: &Board) -> Vec<usize> {
    let ids = network_ids(board);
    let mut counts = [0usize; 2 * CELL_COUNT];

    for exit in EXITS.iter() {
        let Some(tile) = board.get(exit.position) else {
            continue;
        };
        if tile.side(exit.direction) != exit.track {
            continue;
        }
        if let Some(cell) = ids.get(exit.position) {
            let id = if exit.direction.is_horizontal() {
                cell.horizontal
            } else {
                cell.vertical
            };
            counts[id as usize] += 1;
        }
    }

    counts.into_iter().filter(|&c| c > 0).collect()
}

/// 出口得分
///
/// 每个网络按连到的出口数查表，只连到一个出口的网络不得分
pub fn exits_score(board: &Board) -> i32 {
    exit_group_sizes(board)
        .into_iter()
        .map(|count| EXIT_SCORES[count.min(EXIT_SCORES.len() - 1)])
        .sum()
}
