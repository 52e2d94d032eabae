use serde::{Deserialize, Serialize};

use crate::*;

/// Index of a symbol in the active theme's ordered symbol list.
pub type SymbolId = u8;

/// Stable identity assigned at cell creation. Never reused, never
/// semantically meaningful; exists only so renderers can track cells
/// across swaps and drops.
pub type CellUid = u32;

/// Canonical player-visible cell stored by the puzzle engine.
///
/// `row`/`col` must always equal the cell's actual position in the grid;
/// the grid re-syncs them after every swap and drop.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub symbol: SymbolId,
    pub uid: CellUid,
    pub row: Coord,
    pub col: Coord,
    pub matched: bool,
    pub selected: bool,
}

impl Cell {
    pub(crate) fn new(symbol: SymbolId, uid: CellUid, pos: Coord2) -> Self {
        Self {
            symbol,
            uid,
            row: pos.0,
            col: pos.1,
            matched: false,
            selected: false,
        }
    }

    pub const fn pos(&self) -> Coord2 {
        (self.row, self.col)
    }
}

/// Hands out monotonically increasing cell identities.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UidCounter(CellUid);

impl UidCounter {
    pub const fn starting_at(next: CellUid) -> Self {
        Self(next)
    }

    pub(crate) fn next(&mut self) -> CellUid {
        let uid = self.0;
        self.0 += 1;
        uid
    }
}
