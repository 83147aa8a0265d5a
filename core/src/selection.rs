use alloc::collections::{BTreeSet, VecDeque};
use alloc::{string::String, vec::Vec};
use serde::{Deserialize, Serialize};

use crate::*;

/// How cells are being gathered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Pointer held down and dragged over the grid. Cells are appended in the order they were entered.
    Drag,
    /// Cells picked one tap at a time. Tapping a picked cell again drops it.
    Tap,
}

/// Cells picked during one in-progress player action, in the order their letters are read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    mode: SelectionMode,
    cells: Vec<Pos>,
}

impl Selection {
    pub const fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            cells: Vec::new(),
        }
    }

    pub fn drag(start: Pos) -> Self {
        Self {
            mode: SelectionMode::Drag,
            cells: alloc::vec![start],
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }

    /// Appends without any adjacency check.
    pub fn extend(&mut self, pos: Pos) {
        self.cells.push(pos);
    }

    /// Adds the cell if absent, removes it if present. Returns whether the cell is selected afterwards.
    pub fn toggle(&mut self, pos: Pos) -> bool {
        if let Some(index) = self.cells.iter().position(|&p| p == pos) {
            self.cells.remove(index);
            false
        } else {
            self.cells.push(pos);
            true
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn is_connected(&self) -> bool {
        are_all_cells_adjacent(&self.cells)
    }

    /// Letters under the selected cells, in selection order.
    pub fn letters(&self, puzzle: &Puzzle) -> String {
        puzzle.read(self.cells.iter().copied())
    }
}

/// Whether the cells form one group when every pair of touching cells (diagonals included) is linked.
///
/// This is looser than the placement directions on purpose: an L-shaped or zigzag group passes.
pub fn are_all_cells_adjacent(cells: &[Pos]) -> bool {
    let Some(&first) = cells.first() else {
        return true;
    };

    let mut visited = BTreeSet::from([first]);
    let mut to_visit = VecDeque::from([first]);

    while let Some(current) = to_visit.pop_front() {
        for &cell in cells {
            if !visited.contains(&cell) && is_adjacent(current, cell) {
                visited.insert(cell);
                to_visit.push_back(cell);
            }
        }
    }

    visited.len() == cells.len()
}

/// Index of the first target spelled by `letters` read forwards or backwards.
pub fn find_target(letters: &str, words: &[TargetWord]) -> Option<usize> {
    let reversed: String = letters.chars().rev().collect();
    words
        .iter()
        .position(|target| target.word() == letters || target.word() == reversed)
}
