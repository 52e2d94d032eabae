use alloc::vec::Vec;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Moves granted at the start of a session.
pub const INITIAL_MOVES: u16 = 20;
/// Points per cleared cell, multiplied by the current level.
pub const POINTS_PER_CELL: u32 = 15;
/// Cumulative score that gates each level: level N lasts until N x 300.
pub const LEVEL_SCORE_STEP: u32 = 300;
/// Bonus moves granted on every level-up.
pub const LEVEL_BONUS_MOVES: u16 = 3;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionState {
    Active,
    Over,
}

impl SessionState {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Over)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Active
    }
}

/// Outcome of a `select` call. Rejections are outcomes, not errors; errors
/// are reserved for out-of-bounds coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SelectOutcome {
    /// The selection changed, or an adjacent swap produced a match and was
    /// committed (cascades included).
    Accepted,
    /// An adjacent swap produced no match. The grid is back in its pre-swap
    /// arrangement, the selection is cleared, and the move cost nothing.
    RejectedNoMatch,
    /// Resolution was in progress; the call was a no-op.
    IgnoredBusy,
    /// The session is over; the call was a no-op.
    IgnoredOver,
}

impl SelectOutcome {
    /// Whether this outcome could have caused a visible update.
    /// A rejected swap still clears the selection.
    pub const fn has_update(self) -> bool {
        match self {
            Self::Accepted | Self::RejectedNoMatch => true,
            Self::IgnoredBusy | Self::IgnoredOver => false,
        }
    }
}

/// Score, level, and move bookkeeping.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    score: u32,
    level: u16,
    moves_remaining: u16,
}

impl Progress {
    pub(crate) const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            moves_remaining: INITIAL_MOVES,
        }
    }

    pub const fn score(&self) -> u32 {
        self.score
    }

    pub const fn level(&self) -> u16 {
        self.level
    }

    pub const fn moves_remaining(&self) -> u16 {
        self.moves_remaining
    }

    pub(crate) fn spend_move(&mut self) {
        self.moves_remaining = self.moves_remaining.saturating_sub(1);
    }

    /// Scores one resolution round and applies level-ups. The threshold check
    /// re-fires, so one large cascade can cross several levels at once.
    pub(crate) fn apply_clears(&mut self, cleared: CellCount) -> u32 {
        let points = u32::from(cleared) * POINTS_PER_CELL * u32::from(self.level);
        self.score += points;
        while self.score >= u32::from(self.level) * LEVEL_SCORE_STEP {
            self.level += 1;
            self.moves_remaining += LEVEL_BONUS_MOVES;
        }
        points
    }
}

/// Immutable view of a session for rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub grid: Grid,
    pub selection: SmallVec<[Coord2; 2]>,
    pub score: u32,
    pub level: u16,
    pub moves_remaining: u16,
    pub is_resolving: bool,
    pub is_over: bool,
}

/// One puzzle session. Single-writer: all mutation goes through `&mut self`,
/// so a single-threaded host needs no locking and a multi-threaded one wraps
/// the session in its own mutex.
///
/// A committed swap, its cascades, scoring, and level-ups all complete inside
/// one `select` call; no partial state is observable from outside.
#[derive(Clone, Debug)]
pub struct GameSession {
    settings: GameSettings,
    grid: Grid,
    selection: SmallVec<[Coord2; 2]>,
    progress: Progress,
    state: SessionState,
    resolving: bool,
    rng: SmallRng,
    uids: UidCounter,
    pending_steps: Vec<CascadeStep>,
}

impl GameSession {
    /// Creates a session with a freshly generated, match-free grid.
    /// Fails fast on invalid settings or an unknown/undersized theme.
    pub fn new(settings: GameSettings, themes: &ThemeRegistry, seed: u64) -> Result<Self> {
        settings.validate(themes)?;

        let mut rng = SmallRng::seed_from_u64(seed);
        let mut uids = UidCounter::default();
        let grid = RandomGridGenerator.generate(&settings, &mut rng, &mut uids);

        Ok(Self {
            settings,
            grid,
            selection: SmallVec::new(),
            progress: Progress::new(),
            state: SessionState::default(),
            resolving: false,
            rng,
            uids,
            pending_steps: Vec::new(),
        })
    }

    /// Adopts an explicit grid instead of generating one. Intended for
    /// deterministic fixtures; only numeric bounds are checked, so themes
    /// play no part here.
    pub fn from_grid(settings: GameSettings, grid: Grid, seed: u64) -> Result<Self> {
        settings.validate_bounds()?;
        if grid.size() != settings.grid_size {
            return Err(GameError::GridShapeMismatch);
        }
        if grid.iter().any(|cell| cell.symbol >= settings.alphabet_size) {
            return Err(GameError::SymbolOutOfAlphabet);
        }

        let uids = UidCounter::starting_at(grid.max_uid() + 1);
        Ok(Self {
            settings,
            grid,
            selection: SmallVec::new(),
            progress: Progress::new(),
            state: SessionState::default(),
            resolving: false,
            rng: SmallRng::seed_from_u64(seed),
            uids,
            pending_steps: Vec::new(),
        })
    }

    /// Replaces all state in place. Settings changes always go through here.
    pub fn reset(&mut self, settings: GameSettings, themes: &ThemeRegistry, seed: u64) -> Result<()> {
        *self = Self::new(settings, themes, seed)?;
        Ok(())
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn selection(&self) -> &[Coord2] {
        &self.selection
    }

    pub const fn score(&self) -> u32 {
        self.progress.score()
    }

    pub const fn level(&self) -> u16 {
        self.progress.level()
    }

    pub const fn moves_remaining(&self) -> u16 {
        self.progress.moves_remaining()
    }

    pub const fn state(&self) -> SessionState {
        self.state
    }

    pub const fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub const fn is_resolving(&self) -> bool {
        self.resolving
    }

    /// Drains the cascade snapshots recorded by the last committed swap.
    pub fn take_steps(&mut self) -> Vec<CascadeStep> {
        core::mem::take(&mut self.pending_steps)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            grid: self.grid.clone(),
            selection: self.selection.clone(),
            score: self.score(),
            level: self.level(),
            moves_remaining: self.moves_remaining(),
            is_resolving: self.resolving,
            is_over: self.is_over(),
        }
    }

    /// Applies one tap of the selection/swap state machine:
    ///
    /// - nothing selected: select the cell
    /// - same cell again: deselect (toggle-off)
    /// - non-adjacent cell: move the selection there
    /// - adjacent cell: attempt the swap; commit on match, revert otherwise
    ///
    /// Calls while resolving or after game over are ignored, not errors.
    pub fn select(&mut self, coords: Coord2) -> Result<SelectOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        if self.resolving {
            return Ok(SelectOutcome::IgnoredBusy);
        }
        if self.state.is_over() {
            return Ok(SelectOutcome::IgnoredOver);
        }

        let Some(&first) = self.selection.first() else {
            self.selection.push(coords);
            self.grid.set_selected(coords, true);
            return Ok(SelectOutcome::Accepted);
        };

        if first == coords {
            self.clear_selection();
            return Ok(SelectOutcome::Accepted);
        }

        if !is_adjacent(first, coords) {
            // Replace, not extend: only orthogonal neighbors can swap.
            self.clear_selection();
            self.selection.push(coords);
            self.grid.set_selected(coords, true);
            return Ok(SelectOutcome::Accepted);
        }

        self.selection.push(coords);
        Ok(self.attempt_swap(first, coords))
    }

    fn attempt_swap(&mut self, first: Coord2, second: Coord2) -> SelectOutcome {
        self.clear_selection();

        self.grid.swap(first, second);
        let scan = scan_matches(&self.grid);
        if !scan.any() {
            // Dry run failed: the same swap restores the pre-swap arrangement.
            self.grid.swap(first, second);
            return SelectOutcome::RejectedNoMatch;
        }

        self.progress.spend_move();
        self.resolving = true;
        let steps = resolve_to_fixed_point(
            &mut self.grid,
            &self.settings,
            &mut self.rng,
            &mut self.uids,
            &mut self.progress,
        );
        self.resolving = false;
        self.pending_steps = steps;

        if self.progress.moves_remaining() == 0 {
            self.state = SessionState::Over;
        }

        SelectOutcome::Accepted
    }

    fn clear_selection(&mut self) {
        for coords in self.selection.drain(..) {
            self.grid.set_selected(coords, false);
        }
    }
}
