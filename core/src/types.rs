/// Single coordinate axis used for grid size and positions.
pub type Coord = u8;

/// Count type used for matched-cell and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional grid coordinates `(row, col)`, row 0 at the top.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Whether two coordinates are orthogonal neighbors (Manhattan distance
/// exactly 1). Diagonals do not count for the swap rule.
pub const fn is_adjacent(a: Coord2, b: Coord2) -> bool {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orthogonal_neighbors_are_adjacent() {
        assert!(is_adjacent((3, 3), (3, 4)));
        assert!(is_adjacent((3, 3), (3, 2)));
        assert!(is_adjacent((3, 3), (2, 3)));
        assert!(is_adjacent((3, 3), (4, 3)));
    }

    #[test]
    fn diagonals_self_and_distant_cells_are_not_adjacent() {
        assert!(!is_adjacent((3, 3), (4, 4)));
        assert!(!is_adjacent((3, 3), (2, 2)));
        assert!(!is_adjacent((3, 3), (3, 3)));
        assert!(!is_adjacent((3, 3), (3, 5)));
        assert!(!is_adjacent((0, 0), (7, 7)));
    }
}
