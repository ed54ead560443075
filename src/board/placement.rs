use smallvec::SmallVec;

use crate::tile::{Slot, SlotFit, Tile};

/// 有意义的放置方向
///
/// 给定地块和目标空位，返回值得尝试的不同变换：
/// 1. 相同结果的变换只保留一个
/// 2. 与空位没有任何匹配、或轨道类型冲突的变换直接丢弃
/// 3. 丢弃存在更好方向的变换：另一个方向匹配数更多，
///    或匹配数相同而错误数更少
///
/// 只用于缩小搜索分支；放置是否合法仍由 `Board::is_valid` 决定。
pub fn meaningful_placements(tile: &Tile, slot: &Slot) -> SmallVec<[Tile; 8]> {
    let candidates: SmallVec<[(Tile, SlotFit); 8]> = tile
        .all_transforms()
        .into_iter()
        .filter_map(|t| slot.fit(&t).map(|fit| (t, fit)))
        .filter(|(_, fit)| fit.matches > 0)
        .collect();

    candidates
        .iter()
        .enumerate()
        .filter(|&(i, &(_, fit))| {
            !candidates
                .iter()
                .enumerate()
                .any(|(j, &(_, other))| i != j && dominates(other, fit))
        })
        .map(|(_, &(t, _))| t)
        .collect()
}

/// `a` 是否严格优于 `b`
fn dominates(a: SlotFit, b: SlotFit) -> bool {
    a.matches > b.matches || (a.matches == b.matches && a.errors < b.errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(s: &str) -> Tile {
        s.parse().unwrap()
    }

    fn slot(s: &str) -> Slot {
        s.parse().unwrap()
    }

    fn placements(t: &str, s: &str) -> Vec<String> {
        meaningful_placements(&tile(t), &slot(s))
            .iter()
            .map(|t| t.to_string())
            .collect()
    }

    #[test]
    fn test_no_valid_placements() {
        assert!(placements("D_D_", "L...").is_empty());
    }

    #[test]
    fn test_equal_fits_are_all_kept() {
        assert_eq!(placements("D_D_", "D..."), vec!["D_D_"]);
        assert_eq!(placements("DD__", "D..."), vec!["DD__", "D__D"]);
    }

    #[test]
    fn test_open_slot_drops_orientation_with_extra_error() {
        // 东边已经是没有轨道的地块：DD__ 多一个错误
        assert_eq!(placements("DD__", "D_.."), vec!["D__D"]);
    }

    #[test]
    fn test_dominance_ties_are_kept() {
        let a = SlotFit { matches: 1, errors: 1 };
        assert!(!dominates(a, a));
        assert!(dominates(SlotFit { matches: 2, errors: 1 }, a));
        assert!(dominates(SlotFit { matches: 1, errors: 0 }, a));
        // 匹配数优先
        assert!(dominates(SlotFit { matches: 2, errors: 2 }, a));
        assert!(!dominates(a, SlotFit { matches: 2, errors: 0 }));
    }
}
