use route_engine::board::{Board, Direction, Position, EXITS};
use route_engine::error::PlacementError;
use route_engine::tile::{Connector, Slot, Tile};

fn p(row: u8, col: u8) -> Position {
    Position::new(row, col).unwrap()
}

fn tile(s: &str) -> Tile {
    s.parse().unwrap()
}

/// 放置除最后一个以外的所有地块，返回最后一个是否合法
fn try_placement(placements: &[(u8, u8, &str)]) -> bool {
    let (last, rest) = placements.split_last().unwrap();
    let mut board = Board::new();
    for &(row, col, s) in rest {
        board = board.set(p(row, col), tile(s)).unwrap();
    }
    board.is_valid(p(last.0, last.1), &tile(last.2))
}

#[test]
fn test_exit_connection() {
    assert!(try_placement(&[(3, 6, "_D_D")]));
}

#[test]
fn test_exit_connection_invalid_track_type() {
    assert!(!try_placement(&[(3, 6, "_L_L")]));
}

#[test]
fn test_exit_connection_invalid_rotation() {
    assert!(!try_placement(&[(3, 6, "D_D_")]));
}

#[test]
fn test_not_connected_to_anything() {
    assert!(!try_placement(&[(3, 3, "_D_D")]));
}

#[test]
fn test_space_already_filled() {
    assert!(!try_placement(&[(3, 6, "_D_D"), (3, 6, "_D_D")]));
}

#[test]
fn test_existing_tile_connection() {
    assert!(try_placement(&[(3, 6, "_DD_"), (4, 6, "D__D")]));
}

#[test]
fn test_existing_tile_connection_invalid_track_type() {
    assert!(!try_placement(&[(3, 6, "_DD_"), (4, 6, "L__L")]));
}

#[test]
fn test_existing_tile_invalid_rotation() {
    assert!(!try_placement(&[(3, 6, "_DD_"), (4, 6, "_D_D")]));
}

#[test]
fn test_existing_tile_no_connection() {
    assert!(!try_placement(&[(5, 0, "_L_L"), (6, 0, "_D_D")]));
}

#[test]
fn test_existing_tile_ignoring_exit() {
    // (6,1) 南边是公路出口，地块这一侧没有轨道也可以放
    assert!(try_placement(&[(5, 0, "__DL"), (6, 0, "DD__"), (6, 1, "D__D")]));
}

#[test]
fn test_track_against_neighbor_without_track() {
    // (5,6) 北边对着 (4,6) 没有轨道的一侧：合法，只在计分时算错误
    let board = Board::from_placements([(p(3, 6), tile("_DD_")), (p(4, 6), tile("DD__"))])
        .unwrap_or_else(|e| panic!("setup failed: {}", e));
    let slot = board.open_slot(p(5, 6)).unwrap();
    assert_eq!(slot.side(Direction::North), Connector::None);
    assert_eq!(slot.side(Direction::East), Connector::Rail);
    assert!(board.is_valid(p(5, 6), &tile("DL__")));
    assert!(!board.is_valid(p(5, 6), &tile("LD__")));
}

#[test]
fn test_set_rejects_without_mutation() {
    let board = Board::new();
    let result = board.set(p(3, 3), tile("_D_D"));
    assert_eq!(
        result,
        Err(PlacementError::Rejected {
            position: p(3, 3),
            tile: tile("_D_D"),
        })
    );
    assert!(board.is_empty());
}

#[test]
fn test_occupied_is_always_illegal() {
    let board = Board::new().set(p(3, 0), tile("_DDD")).unwrap();
    for s in ["_D_D", "DDDD", "LLLL", "DLDLo", "__DL"] {
        for t in tile(s).all_transforms() {
            assert!(!board.is_valid(p(3, 0), &t));
            assert_eq!(board.set(p(3, 0), t), Err(PlacementError::Occupied(p(3, 0))));
        }
    }
}

#[test]
fn test_initial_slots_from_exits() {
    let board = Board::new();
    let open = board.open_slot_entries();
    assert_eq!(open.len(), EXITS.len());
    for exit in EXITS.iter() {
        let slot = board.open_slot(exit.position).unwrap();
        assert_eq!(slot.side(exit.direction), exit.track);
    }
    // 所有空格子都有空位描述
    assert!(Position::all().all(|position| board.open_slot(position).is_some()));
}

#[test]
fn test_slot_propagation() {
    let board = Board::new()
        .set(p(3, 0), tile("_D_D"))
        .unwrap()
        .set(p(2, 0), tile("_D_D"))
        .ok();
    // (2,0) 没有任何匹配，放不下
    assert!(board.is_none());

    let board = Board::from_placements([
        (p(3, 0), tile("_D_D")),
        (p(3, 1), tile("_D_D")),
        (p(3, 2), tile("DD_D")),
    ])
    .unwrap();
    let slot: Slot = board.open_slot(p(2, 2)).unwrap();
    assert_eq!(slot.side(Direction::South), Connector::Road);
    let slot = board.open_slot(p(4, 2)).unwrap();
    assert_eq!(slot.side(Direction::North), Connector::None);
}

#[test]
fn test_valid_transforms() {
    let board = Board::new();
    let valid = board.valid_transforms(p(3, 6), &tile("_D_D"));
    assert_eq!(valid.as_slice(), &[tile("_D_D")]);
    assert!(board.is_valid_with_transform(p(0, 1), &tile("_D_D")));
    assert!(!board.is_valid_with_transform(p(0, 3), &tile("_D_D")));
    assert!(board.valid_transforms(p(3, 3), &tile("DDDD")).is_empty());
}

#[test]
fn test_erase_round_trip() {
    let board = Board::from_placements([(p(3, 0), tile("_D_D")), (p(3, 1), tile("__DD"))]).unwrap();
    let erased = board.erase(p(3, 1));
    assert_eq!(erased, Board::new().set(p(3, 0), tile("_D_D")).unwrap());
}

#[test]
fn test_tiles_iterator_row_major() {
    let board = Board::from_placements([(p(3, 6), tile("_D_D")), (p(0, 1), tile("D_D_"))]).unwrap();
    let positions: Vec<Position> = board.tiles().map(|(position, _)| position).collect();
    assert_eq!(positions, vec![p(0, 1), p(3, 6)]);
    assert_eq!(board.tile_count(), 2);
    assert_eq!(board.to_string(), "0,1D_D_ 3,6_D_D ");
}
