use std::fmt::{self, Display, Formatter};

use bevy::prelude::*;

/// One rectangular slice of the photo. `home` is the pixel position the
/// slice was cut from and never changes; `pos` is where the slice currently
/// sits and is rewritten by the board on every reposition pass.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Tile {
    slice: usize,
    home: IVec2,
    pos: IVec2,
    size: UVec2,
}

impl Tile {
    pub const fn new(slice: usize, home: IVec2, size: UVec2) -> Self {
        Self {
            slice,
            home,
            pos: home,
            size,
        }
    }

    pub const fn slice(&self) -> usize {
        self.slice
    }

    pub const fn pos(&self) -> IVec2 {
        self.pos
    }

    /// Half-open containment: the left and top edges count as inside, the
    /// right and bottom edges belong to the neighbor.
    pub fn is_hit(&self, point: IVec2) -> bool {
        let max = self.pos + self.size.as_ivec2();
        point.x >= self.pos.x && point.x < max.x && point.y >= self.pos.y && point.y < max.y
    }

    pub fn is_at_home(&self) -> bool {
        self.pos == self.home
    }

    fn set_position(&mut self, pos: IVec2) {
        self.pos = pos;
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Cell {
    Empty,
    Tile(Tile),
}

/// The n x n arrangement of tiles with its single empty slot. Cells are
/// stored row-major; all pixel arithmetic happens in board space with the
/// origin at the photo's top-left corner, y pointing down.
#[derive(Component, Debug, Clone, Eq, PartialEq)]
pub struct Board {
    n: usize,
    tile_size: UVec2,
    board_size: UVec2,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(cells: Vec<Cell>, tile_size: UVec2, board_size: UVec2, n: usize) -> Self {
        debug_assert!(cells.len() == n * n, "cell count must fill the grid");
        Self {
            n,
            tile_size,
            board_size,
            cells,
        }
    }

    pub const fn dimension(&self) -> usize {
        self.n
    }

    pub const fn tile_size(&self) -> UVec2 {
        self.tile_size
    }

    pub const fn board_size(&self) -> UVec2 {
        self.board_size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if row >= self.n || col >= self.n {
            return None;
        }
        self.cells.get(self.index(row, col))
    }

    /// Row-major iteration over the occupied cells.
    pub fn tiles(&self) -> impl Iterator<Item = ((usize, usize), &Tile)> {
        let n = self.n;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(index, cell)| match cell {
                Cell::Tile(tile) => Some(((index / n, index % n), tile)),
                Cell::Empty => None,
            })
    }

    /// First occupied cell containing `point`, scanning row-major. Tile
    /// regions cannot overlap, so the scan order only fixes a tie-break.
    pub fn hit_test(&self, point: IVec2) -> Option<(usize, usize)> {
        self.tiles()
            .find(|(_, tile)| tile.is_hit(point))
            .map(|(cell, _)| cell)
    }

    /// Moves the tile at (row, col) into the adjacent empty slot, if there
    /// is one, and repositions every tile. Returns whether a move happened;
    /// a cell with no empty neighbor is left untouched.
    pub fn slide(&mut self, row: usize, col: usize) -> bool {
        if row >= self.n || col >= self.n {
            return false;
        }
        let Some((empty_row, empty_col)) = self.empty_neighbor(row, col) else {
            return false;
        };
        let from = self.index(row, col);
        let to = self.index(empty_row, empty_col);
        self.cells.swap(from, to);
        self.reposition();
        true
    }

    pub fn is_solved(&self) -> bool {
        self.tiles().all(|(_, tile)| tile.is_at_home())
    }

    /// Rewrites every tile's pixel position from the cell it currently
    /// occupies. Idempotent while the cells stay put.
    pub fn reposition(&mut self) {
        let n = self.n;
        let tile_size = self.tile_size;
        for (index, cell) in self.cells.iter_mut().enumerate() {
            if let Cell::Tile(tile) = cell {
                let row = index / n;
                let col = index % n;
                tile.set_position(IVec2::new(
                    col as i32 * tile_size.x as i32,
                    row as i32 * tile_size.y as i32,
                ));
            }
        }
    }

    /// Current pixel position of the tile cut from atlas cell `slice`.
    pub fn tile_position(&self, slice: usize) -> Option<IVec2> {
        self.tiles()
            .find(|(_, tile)| tile.slice() == slice)
            .map(|(_, tile)| tile.pos())
    }

    const fn index(&self, row: usize, col: usize) -> usize {
        row * self.n + col
    }

    fn is_empty_at(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(Cell::Empty))
    }

    // Vertical neighbors take priority over horizontal ones; with a single
    // empty slot at most one candidate can match.
    fn empty_neighbor(&self, row: usize, col: usize) -> Option<(usize, usize)> {
        let above_below = [row.checked_sub(1), (row + 1 < self.n).then_some(row + 1)];
        for neighbor_row in above_below.into_iter().flatten() {
            if self.is_empty_at(neighbor_row, col) {
                return Some((neighbor_row, col));
            }
        }
        let beside = [col.checked_sub(1), (col + 1 < self.n).then_some(col + 1)];
        for neighbor_col in beside.into_iter().flatten() {
            if self.is_empty_at(row, neighbor_col) {
                return Some((row, neighbor_col));
            }
        }
        None
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..self.n {
            for col in 0..self.n {
                match self.get(row, col) {
                    Some(Cell::Tile(tile)) => write!(f, "{:>02} ", tile.slice())?,
                    Some(Cell::Empty) => write!(f, " . ")?,
                    None => {}
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Cuts the photo into an n x n grid of tiles in row-major order. Tile
/// dimensions use integer division, so a photo that does not divide evenly
/// leaves its remainder pixels uncovered along the right and bottom edges.
pub fn slice_tiles(photo_size: UVec2, n: usize) -> Vec<Tile> {
    let tile_size = photo_size / n as u32;
    let mut tiles = Vec::with_capacity(n * n);
    for row in 0..n {
        for col in 0..n {
            let home = IVec2::new(
                col as i32 * tile_size.x as i32,
                row as i32 * tile_size.y as i32,
            );
            tiles.push(Tile::new(row * n + col, home, tile_size));
        }
    }
    tiles
}

/// Removes the tile at `removed`, shuffles the remainder uniformly with the
/// given rng and puts the empty slot back at the same index.
pub fn scramble(mut tiles: Vec<Tile>, removed: usize, rng: &mut fastrand::Rng) -> Vec<Cell> {
    debug_assert!(removed < tiles.len(), "removed tile index must be on the board");
    if removed < tiles.len() {
        tiles.remove(removed);
    }
    rng.shuffle(&mut tiles);
    let mut cells: Vec<Cell> = tiles.into_iter().map(Cell::Tile).collect();
    cells.insert(removed.min(cells.len()), Cell::Empty);
    cells
}
