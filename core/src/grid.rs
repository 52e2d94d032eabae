use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Owned square matrix of cells. Indexed `(row, col)` with row 0 at the top;
/// cells fall toward higher row indices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    pub(crate) fn from_cells(cells: Array2<Cell>) -> Self {
        Self { cells }
    }

    /// Builds a grid from row-major symbol ids, assigning sequential uids.
    /// Intended for deterministic fixtures; gameplay grids come from the
    /// generator.
    pub fn from_symbols(size: Coord, symbols: &[SymbolId]) -> Result<Self> {
        let side = usize::from(size);
        if symbols.len() != side * side {
            return Err(GameError::GridShapeMismatch);
        }

        let mut uids = UidCounter::default();
        let cells = Array2::from_shape_fn((side, side), |(row, col)| {
            Cell::new(
                symbols[row * side + col],
                uids.next(),
                (row as Coord, col as Coord),
            )
        });
        Ok(Self { cells })
    }

    pub fn size(&self) -> Coord {
        self.cells.dim().0 as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    /// Swaps two cells and re-syncs their stored positions.
    pub(crate) fn swap(&mut self, a: Coord2, b: Coord2) {
        self.cells.swap(a.to_nd_index(), b.to_nd_index());
        self.resync_position(a);
        self.resync_position(b);
    }

    fn resync_position(&mut self, coords: Coord2) {
        let cell = self.cell_mut(coords);
        cell.row = coords.0;
        cell.col = coords.1;
    }

    /// Invariant check: every cell's stored position equals its actual index.
    pub fn positions_in_sync(&self) -> bool {
        self.cells.indexed_iter().all(|((row, col), cell)| {
            usize::from(cell.row) == row && usize::from(cell.col) == col
        })
    }

    pub(crate) fn set_selected(&mut self, coords: Coord2, selected: bool) {
        self.cell_mut(coords).selected = selected;
    }

    pub(crate) fn clear_matches(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.matched = false;
        }
    }

    pub fn matched_count(&self) -> CellCount {
        self.iter().filter(|cell| cell.matched).count() as CellCount
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Largest uid present; used to seed a counter when adopting a fixture grid.
    pub(crate) fn max_uid(&self) -> CellUid {
        self.iter().map(|cell| cell.uid).max().unwrap_or(0)
    }

    pub(crate) fn column_cells(&self, col: Coord) -> Vec<Cell> {
        (0..self.size()).map(|row| self.cell_at((row, col))).collect()
    }

    pub(crate) fn write_column(&mut self, col: Coord, cells: &[Cell]) {
        for (row, cell) in cells.iter().enumerate() {
            let coords = (row as Coord, col);
            *self.cell_mut(coords) = *cell;
            self.resync_position(coords);
        }
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    // The 6x6 minimum applies to sessions, not raw grids; tiny grids keep
    // these tests readable.
    fn grid_2x2() -> Grid {
        Grid::from_symbols(2, &[0, 1, 2, 0]).unwrap()
    }

    #[test]
    fn from_symbols_rejects_wrong_length() {
        assert_eq!(
            Grid::from_symbols(2, &[0, 1, 2]).unwrap_err(),
            GameError::GridShapeMismatch
        );
    }

    #[test]
    fn from_symbols_assigns_row_major_positions_and_uids() {
        let grid = grid_2x2();

        assert_eq!(grid[(0, 1)].symbol, 1);
        assert_eq!(grid[(1, 0)].symbol, 2);
        assert_eq!(grid[(0, 0)].uid, 0);
        assert_eq!(grid[(1, 1)].uid, 3);
        assert!(grid.positions_in_sync());
    }

    #[test]
    fn swap_resyncs_both_positions() {
        let mut grid = grid_2x2();
        let a = grid[(0, 0)];
        let b = grid[(1, 0)];

        grid.swap((0, 0), (1, 0));

        assert_eq!(grid[(0, 0)].uid, b.uid);
        assert_eq!(grid[(1, 0)].uid, a.uid);
        assert!(grid.positions_in_sync());
    }

    #[test]
    fn validate_coords_bounds() {
        let grid = grid_2x2();

        assert_eq!(grid.validate_coords((1, 1)).unwrap(), (1, 1));
        assert_eq!(
            grid.validate_coords((2, 0)).unwrap_err(),
            GameError::InvalidCoords
        );
        assert_eq!(
            grid.validate_coords((0, 2)).unwrap_err(),
            GameError::InvalidCoords
        );
    }

    #[test]
    fn write_column_fixes_positions() {
        let mut grid = grid_2x2();
        let column = vec![grid[(1, 1)], grid[(0, 1)]];

        grid.write_column(1, &column);

        assert_eq!(grid[(0, 1)].symbol, 0);
        assert_eq!(grid[(1, 1)].symbol, 1);
        assert!(grid.positions_in_sync());
    }
}
