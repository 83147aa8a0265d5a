#![no_std]

extern crate alloc;

use alloc::{string::String, vec::Vec};
use core::ops::Index;
use generator::Layout;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use selection::*;
pub use types::*;
pub use word_bank::*;

mod cell;
mod engine;
mod error;
mod generator;
mod selection;
mod types;
mod word_bank;

pub const DEFAULT_GRID_SIZE: Coord = 10;
pub const DEFAULT_WORDS_PER_ROUND: usize = 8;
pub const DEFAULT_PLACEMENT_ATTEMPTS: u32 = 100;
pub const DEFAULT_ROUND_ATTEMPTS: u32 = 25;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    /// Side length of the square grid.
    pub size: Coord,
    pub words_per_round: usize,
    /// Random tries per word before it counts as unplaced.
    pub max_placement_attempts: u32,
    /// Whole-round retries under [`UnplacedWordPolicy::Regenerate`].
    pub max_round_attempts: u32,
    pub unplaced: UnplacedWordPolicy,
}

impl PuzzleConfig {
    pub const fn new_unchecked(size: Coord, words_per_round: usize) -> Self {
        Self {
            size,
            words_per_round,
            max_placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
            max_round_attempts: DEFAULT_ROUND_ATTEMPTS,
            unplaced: UnplacedWordPolicy::Regenerate,
        }
    }

    pub fn new(size: Coord, words_per_round: usize) -> Self {
        let size = size.clamp(1, Coord::MAX);
        let words_per_round = words_per_round.clamp(1, usize::from(WordIndex::MAX));
        Self::new_unchecked(size, words_per_round)
    }

    pub const fn with_policy(self, unplaced: UnplacedWordPolicy) -> Self {
        Self { unplaced, ..self }
    }

    pub const fn total_cells(&self) -> usize {
        (self.size as usize) * (self.size as usize)
    }
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_GRID_SIZE, DEFAULT_WORDS_PER_ROUND)
    }
}

/// Straight run of cells holding one word, in letter order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub start: Pos,
    pub direction: Direction,
    pub len: usize,
}

impl Placement {
    /// Returns the placement only if its last cell is inside a `size`×`size` grid.
    pub fn new(start: Pos, direction: Direction, len: usize, size: Coord) -> Option<Self> {
        if len == 0 || start.0 >= size || start.1 >= size {
            return None;
        }
        direction.project(start, len - 1, size)?;
        Some(Self {
            start,
            direction,
            len,
        })
    }

    pub fn end(&self) -> Pos {
        self.cells().last().unwrap_or(self.start)
    }

    pub fn cells(&self) -> impl Iterator<Item = Pos> + use<> {
        let Placement {
            start,
            direction,
            len,
        } = *self;
        let (dr, dc) = direction.delta();
        (0..len as isize).map(move |i| {
            (
                (start.0 as isize + dr * i) as Coord,
                (start.1 as isize + dc * i) as Coord,
            )
        })
    }
}

/// A generated round: the letter grid plus the target words it was built for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    grid: Array2<Cell>,
    words: Vec<TargetWord>,
    placements: Vec<Option<Placement>>,
}

impl Puzzle {
    pub(crate) fn from_parts(
        grid: Array2<Cell>,
        words: Vec<TargetWord>,
        placements: Vec<Option<Placement>>,
    ) -> Self {
        debug_assert_eq!(words.len(), placements.len());
        Self {
            grid,
            words,
            placements,
        }
    }

    /// Builds a puzzle from literal rows of letters and locates every word in them along the placement directions.
    /// Words are compared in their uppercase form, so `haus` repeats `HAUS`.
    pub fn from_rows(rows: &[&str], words: Vec<TargetWord>) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(PuzzleError::EmptyGrid);
        }
        let size: Coord = size.try_into().map_err(|_| PuzzleError::GridShape { size })?;

        let mut layout = Layout::new(size);
        for (row, line) in rows.iter().enumerate() {
            let letters: Vec<char> = line.chars().collect();
            if letters.len() != usize::from(size) {
                return Err(PuzzleError::GridShape {
                    size: size.into(),
                });
            }
            for (col, letter) in letters.into_iter().enumerate() {
                layout.set_letter((row as Coord, col as Coord), letter);
            }
        }

        for (index, word) in words.iter().enumerate() {
            if words[..index].iter().any(|earlier| earlier.word() == word.word()) {
                return Err(PuzzleError::DuplicateWord {
                    word: word.word().into(),
                });
            }
        }

        let mut placements = Vec::with_capacity(words.len());
        for (index, word) in words.iter().enumerate() {
            let index: WordIndex = index.try_into().map_err(|_| PuzzleError::TooManyWords {
                requested: words.len(),
            })?;
            let letters = word.letters();
            let placement = layout
                .find(&letters)
                .ok_or_else(|| PuzzleError::WordNotInGrid {
                    word: word.word().into(),
                })?;
            layout.write(index, &letters, placement);
            placements.push(Some(placement));
        }

        let grid = layout.fill(|| ' ');
        Ok(Self::from_parts(grid, words, placements))
    }

    pub fn size(&self) -> Coord {
        // always square and never larger than Coord::MAX
        self.grid.dim().0 as Coord
    }

    pub fn validate_pos(&self, pos: Pos) -> Result<Pos> {
        let size = self.size();
        if pos.0 < size && pos.1 < size {
            Ok(pos)
        } else {
            Err(PuzzleError::InvalidCoords)
        }
    }

    pub fn grid(&self) -> &Array2<Cell> {
        &self.grid
    }

    pub fn words(&self) -> &[TargetWord] {
        &self.words
    }

    pub fn placements(&self) -> &[Option<Placement>] {
        &self.placements
    }

    pub fn placement(&self, word: usize) -> Option<Placement> {
        self.placements.get(word).copied().flatten()
    }

    /// Words kept in the round without any letters in the grid.
    pub fn unplaced_words(&self) -> impl Iterator<Item = &TargetWord> {
        self.words
            .iter()
            .zip(&self.placements)
            .filter(|(_, placement)| placement.is_none())
            .map(|(word, _)| word)
    }

    pub fn is_fully_placed(&self) -> bool {
        self.placements.iter().all(Option::is_some)
    }

    /// Reads the letters along a path, in path order.
    pub fn read(&self, cells: impl IntoIterator<Item = Pos>) -> String {
        cells.into_iter().map(|pos| self[pos].letter).collect()
    }

    /// One string per grid row.
    pub fn rows(&self) -> Vec<String> {
        self.grid
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|cell| cell.letter).collect())
            .collect()
    }

    pub(crate) fn cell_mut(&mut self, pos: Pos) -> &mut Cell {
        &mut self.grid[pos.to_nd_index()]
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.grid.iter_mut()
    }
}

impl Index<Pos> for Puzzle {
    type Output = Cell;

    fn index(&self, pos: Pos) -> &Self::Output {
        &self.grid[pos.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CommitOutcome {
    /// Nothing to evaluate, e.g. fewer than two cells.
    NoChange,
    /// Tap selection whose cells do not form one connected group.
    Disconnected,
    NoMatch,
    AlreadyFound { word: usize },
    Found { word: usize, points: u32 },
    /// Found the last missing word.
    Won { word: usize, points: u32 },
}

impl CommitOutcome {
    pub const fn has_update(self) -> bool {
        use CommitOutcome::*;
        match self {
            NoChange => false,
            Disconnected => false,
            NoMatch => false,
            AlreadyFound { .. } => false,
            Found { .. } => true,
            Won { .. } => true,
        }
    }

    pub const fn is_match(self) -> bool {
        matches!(self, Self::Found { .. } | Self::Won { .. })
    }

    pub const fn points(self) -> u32 {
        match self {
            Self::Found { points, .. } | Self::Won { points, .. } => points,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn words(list: &[&str]) -> Vec<TargetWord> {
        list.iter().map(|w| TargetWord::new(w, "")).collect()
    }

    #[test]
    fn placement_rejects_runs_leaving_the_grid() {
        assert!(Placement::new((2, 3), Direction::Horizontal, 4, 10).is_some());
        assert!(Placement::new((2, 7), Direction::Horizontal, 4, 10).is_none());
        assert!(Placement::new((9, 0), Direction::Vertical, 2, 10).is_none());
        assert!(Placement::new((0, 1), Direction::DiagonalUp, 3, 10).is_none());
        assert!(Placement::new((10, 0), Direction::Horizontal, 1, 10).is_none());
        assert!(Placement::new((0, 0), Direction::Horizontal, 0, 10).is_none());
    }

    #[test]
    fn placement_cells_follow_direction() {
        let placement = Placement::new((0, 3), Direction::DiagonalUp, 4, 10).unwrap();

        let cells: Vec<_> = placement.cells().collect();

        assert_eq!(cells, [(0, 3), (1, 2), (2, 1), (3, 0)]);
        assert_eq!(placement.end(), (3, 0));
    }

    #[test]
    fn from_rows_locates_and_tags_words() {
        let puzzle = Puzzle::from_rows(
            &["HAUSX", "XMXXX", "XXOXX", "XXXNX", "XXXXD"],
            words(&["haus", "mond"]),
        )
        .unwrap();

        let haus = puzzle.placement(0).unwrap();
        assert_eq!(haus.start, (0, 0));
        assert_eq!(haus.direction, Direction::Horizontal);
        assert_eq!(puzzle.read(haus.cells()), "HAUS");
        let mond = puzzle.placement(1).unwrap();
        assert_eq!(mond.direction, Direction::DiagonalDown);
        assert_eq!(puzzle.read(mond.cells()), "MOND");
        assert_eq!(puzzle[(0, 2)].word, Some(0));
        assert_eq!(puzzle[(4, 4)].word, Some(1));
        assert!(puzzle[(1, 2)].is_filler());
        assert!(puzzle.is_fully_placed());
    }

    #[test]
    fn from_rows_reports_bad_input() {
        assert_eq!(
            Puzzle::from_rows(&[], vec![]).unwrap_err(),
            PuzzleError::EmptyGrid
        );
        assert_eq!(
            Puzzle::from_rows(&["AB", "C"], vec![]).unwrap_err(),
            PuzzleError::GridShape { size: 2 }
        );
        assert_eq!(
            Puzzle::from_rows(&["AB", "CD"], words(&["ZZ"])).unwrap_err(),
            PuzzleError::WordNotInGrid { word: "ZZ".into() }
        );
    }

    #[test]
    fn from_rows_rejects_repeated_words() {
        let err = Puzzle::from_rows(
            &["HAUSX", "XMXXX", "XXOXX", "XXXNX", "XXXXD"],
            words(&["HAUS", "mond", "haus"]),
        )
        .unwrap_err();

        assert_eq!(err, PuzzleError::DuplicateWord { word: "HAUS".into() });
    }

    #[test]
    fn out_of_bounds_positions_are_rejected() {
        let puzzle = Puzzle::from_rows(&["AB", "CD"], vec![]).unwrap();

        assert_eq!(puzzle.validate_pos((1, 1)), Ok((1, 1)));
        assert_eq!(puzzle.validate_pos((2, 0)), Err(PuzzleError::InvalidCoords));
        assert_eq!(puzzle.rows(), ["AB", "CD"]);
    }

    #[test]
    fn config_clamps_like_game_settings() {
        let config = PuzzleConfig::new(0, 0);

        assert_eq!(config.size, 1);
        assert_eq!(config.words_per_round, 1);
        assert_eq!(PuzzleConfig::default().total_cells(), 100);
    }
}
