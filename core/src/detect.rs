use alloc::vec::Vec;

use crate::*;

/// Minimum run length that counts as a match.
pub const MATCH_RUN: usize = 3;

/// Result of one detection pass over a grid.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchScan {
    /// Copy of the scanned grid with `matched` set on every cell that belongs
    /// to a run of >=3, scanned along rows and columns independently.
    pub grid: Grid,
    /// Distinct matched cells; a cell in both a row run and a column run
    /// counts once (marking is an idempotent flag, not a counter).
    pub matched: CellCount,
}

impl MatchScan {
    pub const fn any(&self) -> bool {
        self.matched > 0
    }
}

/// Scans for runs of >=3 equal adjacent symbols along every row and column.
///
/// Pure: the input grid is never touched, which is what lets the same pass
/// serve both swap validation (dry run) and committed cascade resolution.
pub fn scan_matches(grid: &Grid) -> MatchScan {
    let mut marked = grid.clone();
    marked.clear_matches();
    let size = grid.size();

    for row in 0..size {
        mark_runs(&mut marked, (0..size).map(|col| (row, col)));
    }
    for col in 0..size {
        mark_runs(&mut marked, (0..size).map(|row| (row, col)));
    }

    let matched = marked.matched_count();
    MatchScan { grid: marked, matched }
}

/// Marks every maximal run of >=MATCH_RUN equal symbols along one line of
/// coordinates: find three in a row, then extend while the symbol holds.
fn mark_runs(grid: &mut Grid, line: impl Iterator<Item = Coord2>) {
    let coords: Vec<Coord2> = line.collect();

    let mut start = 0;
    while start < coords.len() {
        let symbol = grid[coords[start]].symbol;
        let mut end = start + 1;
        while end < coords.len() && grid[coords[end]].symbol == symbol {
            end += 1;
        }
        if end - start >= MATCH_RUN {
            for &pos in &coords[start..end] {
                grid.cell_mut(pos).matched = true;
            }
        }
        start = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_in_a_row_is_marked() {
        let grid = Grid::from_symbols(
            3,
            &[
                0, 0, 0, //
                1, 2, 1, //
                2, 1, 2,
            ],
        )
        .unwrap();

        let scan = scan_matches(&grid);

        assert_eq!(scan.matched, 3);
        assert!(scan.grid[(0, 0)].matched);
        assert!(scan.grid[(0, 1)].matched);
        assert!(scan.grid[(0, 2)].matched);
        assert!(!scan.grid[(1, 0)].matched);
    }

    #[test]
    fn runs_extend_past_three() {
        let grid = Grid::from_symbols(
            4,
            &[
                1, 1, 1, 1, //
                0, 2, 0, 2, //
                2, 0, 2, 0, //
                0, 2, 0, 2,
            ],
        )
        .unwrap();

        let scan = scan_matches(&grid);

        assert_eq!(scan.matched, 4);
        assert!((0..4).all(|col| scan.grid[(0, col)].matched));
    }

    #[test]
    fn columns_are_scanned_like_rows() {
        let grid = Grid::from_symbols(
            3,
            &[
                1, 0, 2, //
                1, 2, 0, //
                1, 0, 2,
            ],
        )
        .unwrap();

        let scan = scan_matches(&grid);

        assert_eq!(scan.matched, 3);
        assert!((0..3).all(|row| scan.grid[(row, 0)].matched));
    }

    #[test]
    fn crossing_runs_count_each_cell_once() {
        // A plus shape: a row run and a column run sharing the center.
        let grid = Grid::from_symbols(
            3,
            &[
                1, 0, 2, //
                0, 0, 0, //
                2, 0, 1,
            ],
        )
        .unwrap();

        let scan = scan_matches(&grid);

        assert_eq!(scan.matched, 5);
        assert!(scan.grid[(1, 1)].matched);
    }

    #[test]
    fn two_in_a_row_is_not_a_match() {
        let grid = Grid::from_symbols(
            3,
            &[
                0, 0, 1, //
                1, 2, 0, //
                0, 1, 2,
            ],
        )
        .unwrap();

        assert!(!scan_matches(&grid).any());
    }

    #[test]
    fn scan_never_mutates_the_input() {
        let grid = Grid::from_symbols(
            3,
            &[
                0, 0, 0, //
                1, 2, 1, //
                2, 1, 2,
            ],
        )
        .unwrap();
        let before = grid.clone();

        let _ = scan_matches(&grid);

        assert_eq!(grid, before);
    }

    #[test]
    fn stale_marks_are_cleared_before_scanning() {
        let mut grid = Grid::from_symbols(
            3,
            &[
                0, 1, 0, //
                1, 2, 1, //
                2, 1, 2,
            ],
        )
        .unwrap();
        grid.cell_mut((0, 0)).matched = true;

        let scan = scan_matches(&grid);

        assert!(!scan.any());
        assert!(!scan.grid[(0, 0)].matched);
    }
}
