use bevy::math::UVec2;
use slide_puzzle::board::{Board, Cell, Tile, scramble, slice_tiles};

const PHOTO_SIZE: UVec2 = UVec2::new(906, 450);
const GRID: usize = 3;
const REMOVED: usize = 2;

fn cell_for(tiles: &[Tile], slice: usize) -> Cell {
    let tile = tiles
        .iter()
        .copied()
        .find(|tile| tile.slice() == slice)
        .expect("slice index inside the grid");
    Cell::Tile(tile)
}

fn empty_count(board: &Board) -> usize {
    let n = board.dimension();
    (0..n)
        .flat_map(|row| (0..n).map(move |col| (row, col)))
        .filter(|&(row, col)| matches!(board.get(row, col), Some(Cell::Empty)))
        .count()
}

// Scrambled layout, slice numbers row-major (. is the empty slot):
//
//   00 01 05
//   03 07 04
//    . 06 08
//
// Sliding (2,1), (1,1), (1,2) and finally (0,2) walks every displaced tile
// home, so the board must report solved exactly once, on the last move.
#[test]
fn known_scramble_solves_exactly_on_the_last_move() {
    let tiles = slice_tiles(PHOTO_SIZE, GRID);
    let cells = vec![
        cell_for(&tiles, 0),
        cell_for(&tiles, 1),
        cell_for(&tiles, 5),
        cell_for(&tiles, 3),
        cell_for(&tiles, 7),
        cell_for(&tiles, 4),
        Cell::Empty,
        cell_for(&tiles, 6),
        cell_for(&tiles, 8),
    ];
    let mut board = Board::new(cells, PHOTO_SIZE / GRID as u32, PHOTO_SIZE, GRID);
    board.reposition();
    assert!(!board.is_solved(), "the scrambled start must not be solved");

    for (row, col) in [(2, 1), (1, 1), (1, 2)] {
        assert!(board.slide(row, col), "move ({row}, {col}) must be legal");
        assert!(
            !board.is_solved(),
            "({row}, {col}) must not finish the puzzle",
        );
        assert_eq!(empty_count(&board), 1, "one empty slot after every move");
    }

    assert!(board.slide(0, 2), "the final move must be legal");
    assert!(board.is_solved(), "the last move reassembles the photo");
    assert!(
        matches!(board.get(0, 2), Some(Cell::Empty)),
        "the empty slot ends at the removed tile's home",
    );
}

// Clicking every cell in turn, legal or not, must never create or lose an
// empty slot.
#[test]
fn empty_slot_survives_any_sequence_of_slides() {
    let cells = scramble(
        slice_tiles(PHOTO_SIZE, GRID),
        REMOVED,
        &mut fastrand::Rng::with_seed(42),
    );
    let mut board = Board::new(cells, PHOTO_SIZE / GRID as u32, PHOTO_SIZE, GRID);
    board.reposition();

    for row in 0..GRID {
        for col in 0..GRID {
            board.slide(row, col);
            assert_eq!(
                empty_count(&board),
                1,
                "sliding ({row}, {col}) must leave exactly one empty slot",
            );
        }
    }
}
