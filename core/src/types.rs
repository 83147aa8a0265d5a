use serde::{Deserialize, Serialize};

/// Single coordinate axis used for grid size and positions.
pub type Coord = u8;

/// Grid position as `(row, col)`.
pub type Pos = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Pos {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// One of the four placement directions. Backwards words come for free because matching also accepts the reversed
/// string, so the opposite directions are never enumerated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Horizontal,
    Vertical,
    DiagonalDown,
    DiagonalUp,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDown,
        Direction::DiagonalUp,
    ];

    /// `(row, col)` offset of a single step.
    pub const fn delta(self) -> (isize, isize) {
        use Direction::*;
        match self {
            Horizontal => (0, 1),
            Vertical => (1, 0),
            DiagonalDown => (1, 1),
            DiagonalUp => (1, -1),
        }
    }

    /// Position reached after `steps` steps from `start`, if it stays inside a `size`×`size` grid.
    pub fn project(self, start: Pos, steps: usize, size: Coord) -> Option<Pos> {
        let (dr, dc) = self.delta();
        let steps: isize = steps.try_into().ok()?;
        apply_delta(start, (dr * steps, dc * steps), (size, size))
    }
}

/// Applies `delta` to `pos`, returning a value only when it remains in bounds.
fn apply_delta(pos: Pos, delta: (isize, isize), bounds: Pos) -> Option<Pos> {
    let (row, col) = pos;
    let (dr, dc) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(dr.try_into().ok()?)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(dc.try_into().ok()?)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

/// Whether two positions touch, including diagonally. A position does not touch itself.
pub const fn is_adjacent(a: Pos, b: Pos) -> bool {
    let row_diff = a.0.abs_diff(b.0);
    let col_diff = a.1.abs_diff(b.1);
    row_diff <= 1 && col_diff <= 1 && !(row_diff == 0 && col_diff == 0)
}
