use alloc::vec::Vec;
use ndarray::Array2;
use rand::Rng;

use super::*;

/// Uniform random fill that resamples any symbol that would complete a run
/// of three with its two left or two upper neighbors, so the opening grid
/// never contains a match. Always terminates: with at least 3 symbols in the
/// alphabet, some choice breaks both run conditions.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RandomGridGenerator;

impl GridGenerator for RandomGridGenerator {
    fn generate(
        &self,
        settings: &GameSettings,
        rng: &mut SmallRng,
        uids: &mut UidCounter,
    ) -> Grid {
        let side = usize::from(settings.grid_size);
        let mut symbols: Vec<SymbolId> = Vec::with_capacity(side * side);

        for row in 0..side {
            for col in 0..side {
                let symbol = loop {
                    let candidate = rng.random_range(0..settings.alphabet_size);
                    if !completes_run(&symbols, side, row, col, candidate) {
                        break candidate;
                    }
                };
                symbols.push(symbol);
            }
        }

        let cells = Array2::from_shape_fn((side, side), |(row, col)| {
            Cell::new(
                symbols[row * side + col],
                uids.next(),
                (row as Coord, col as Coord),
            )
        });
        Grid::from_cells(cells)
    }
}

/// Whether placing `candidate` at `(row, col)` would finish a horizontal or
/// vertical run of three with the already-filled neighbors.
fn completes_run(
    symbols: &[SymbolId],
    side: usize,
    row: usize,
    col: usize,
    candidate: SymbolId,
) -> bool {
    let at = |r: usize, c: usize| symbols[r * side + c];
    let horizontal = col >= 2 && at(row, col - 1) == candidate && at(row, col - 2) == candidate;
    let vertical = row >= 2 && at(row - 1, col) == candidate && at(row - 2, col) == candidate;
    horizontal || vertical
}
