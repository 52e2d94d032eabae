use alloc::vec::Vec;
use rand::Rng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Hard stop for resolution rounds. Cascades on 6-8 grids settle in a
/// handful of rounds; the cap only exists for pathological configurations.
pub const MAX_CASCADE_ROUNDS: usize = 4096;

/// One settled round of cascade resolution, snapshotted so a renderer can
/// replay the sequence on its own clock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CascadeStep {
    /// Grid as detected, with `matched` set on every cell about to clear.
    pub marked: Grid,
    /// Grid after collapse, drop, and refill.
    pub settled: Grid,
    /// Distinct cells cleared this round.
    pub cleared: CellCount,
    /// Points awarded for this round (`cleared x 15 x level`).
    pub points: u32,
    /// Level the points were scored at.
    pub level: u16,
}

/// Resolves the grid to a fixed point: detect, clear, drop, refill, repeat
/// until a detection pass finds nothing. Synchronous by design; the caller
/// observes only the settled result plus the returned step snapshots.
pub(crate) fn resolve_to_fixed_point(
    grid: &mut Grid,
    settings: &GameSettings,
    rng: &mut SmallRng,
    uids: &mut UidCounter,
    progress: &mut Progress,
) -> Vec<CascadeStep> {
    let mut steps = Vec::new();

    loop {
        let scan = scan_matches(grid);
        if !scan.any() {
            break;
        }
        if steps.len() >= MAX_CASCADE_ROUNDS {
            log::warn!(
                "cascade did not settle after {} rounds, stopping",
                MAX_CASCADE_ROUNDS
            );
            break;
        }

        let marked = scan.grid;
        let cleared = scan.matched;
        let level = progress.level();
        let points = progress.apply_clears(cleared);

        *grid = marked.clone();
        collapse_and_refill(grid, settings, rng, uids);

        steps.push(CascadeStep {
            marked,
            settled: grid.clone(),
            cleared,
            points,
            level,
        });
    }

    steps
}

/// Collapses matched cells column by column: survivors drop toward the
/// bottom preserving their relative order, and the vacated top rows are
/// backfilled with fresh symbols. Refill is unconstrained; new matches are
/// intended and feed the next round.
fn collapse_and_refill(
    grid: &mut Grid,
    settings: &GameSettings,
    rng: &mut SmallRng,
    uids: &mut UidCounter,
) {
    let size = grid.size();
    for col in 0..size {
        let survivors: Vec<Cell> = grid
            .column_cells(col)
            .into_iter()
            .filter(|cell| !cell.matched)
            .collect();
        let vacancies = usize::from(size) - survivors.len();
        if vacancies == 0 {
            continue;
        }

        let mut column = Vec::with_capacity(size.into());
        for _ in 0..vacancies {
            let symbol = rng.random_range(0..settings.alphabet_size);
            column.push(Cell::new(symbol, uids.next(), (0, col)));
        }
        column.extend(survivors);
        grid.write_column(col, &column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn settings_6x6() -> GameSettings {
        GameSettings::new(6, 3, "hearts")
    }

    fn resolve(grid: &mut Grid, progress: &mut Progress, seed: u64) -> Vec<CascadeStep> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut uids = UidCounter::starting_at(grid.total_cells().into());
        resolve_to_fixed_point(grid, &settings_6x6(), &mut rng, &mut uids, progress)
    }

    // Worst case: a monochrome board clears entirely on round one and then
    // cascades on whatever random refills produce.
    #[test]
    fn monochrome_board_resolves_to_a_fixed_point() {
        for seed in 0..8 {
            let mut grid = Grid::from_symbols(6, &[0; 36]).unwrap();
            let mut progress = Progress::new();

            let steps = resolve(&mut grid, &mut progress, seed);

            assert!(!steps.is_empty());
            assert!(steps.len() < MAX_CASCADE_ROUNDS);
            assert!(!scan_matches(&grid).any(), "seed={}", seed);
            assert!(grid.positions_in_sync());
            assert_eq!(steps[0].cleared, 36);
        }
    }

    #[test]
    fn survivors_drop_in_order_and_fresh_cells_fill_the_top() {
        // Column 0 holds a vertical 3-run in the middle rows.
        #[rustfmt::skip]
        let mut grid = Grid::from_symbols(6, &[
            0, 1, 0, 1, 0, 1,
            1, 2, 1, 2, 1, 2,
            2, 0, 2, 0, 2, 0,
            2, 1, 0, 1, 0, 1,
            2, 2, 1, 2, 1, 2,
            1, 0, 2, 0, 2, 0,
        ]).unwrap();
        let before = grid.clone();
        let marked = scan_matches(&grid);
        assert_eq!(marked.matched, 3);

        let mut progress = Progress::new();
        let steps = resolve(&mut grid, &mut progress, 3);

        let first = &steps[0];
        // Rows 2..4 of column 0 cleared; rows 0 and 1 dropped to rows 3 and 4.
        assert_eq!(first.settled[(3, 0)].uid, before[(0, 0)].uid);
        assert_eq!(first.settled[(4, 0)].uid, before[(1, 0)].uid);
        assert_eq!(first.settled[(5, 0)].uid, before[(5, 0)].uid);
        // The three vacated top rows hold fresh uids.
        for row in 0..3 {
            assert!(first.settled[(row, 0)].uid >= 36);
        }
        // Untouched columns keep their cells.
        assert_eq!(first.settled[(0, 3)].uid, before[(0, 3)].uid);
        assert!(first.settled.positions_in_sync());
    }

    #[test]
    fn each_round_scores_cleared_times_fifteen_times_level() {
        let mut grid = Grid::from_symbols(6, &[0; 36]).unwrap();
        let mut progress = Progress::new();

        let steps = resolve(&mut grid, &mut progress, 1);

        let mut expected_score = 0;
        for step in &steps {
            assert_eq!(
                step.points,
                u32::from(step.cleared) * POINTS_PER_CELL * u32::from(step.level)
            );
            expected_score += step.points;
        }
        assert_eq!(progress.score(), expected_score);
    }

    #[test]
    fn refill_consumes_fresh_uids_only() {
        let mut grid = Grid::from_symbols(6, &[0; 36]).unwrap();
        let mut progress = Progress::new();

        let steps = resolve(&mut grid, &mut progress, 5);

        let mut seen = alloc::collections::BTreeSet::new();
        for cell in steps.last().unwrap().settled.iter() {
            assert!(seen.insert(cell.uid), "uid {} reused", cell.uid);
        }
    }
}
