use serde::{Deserialize, Serialize};

/// Index of a word in the round's target list.
pub type WordIndex = u8;

/// Player-visible state of a single grid position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub letter: char,
    /// Set once the cell was part of a committed match, never cleared during a round.
    pub found: bool,
    /// Part of the in-progress selection.
    pub selected: bool,
    /// Word this letter was placed for; filler letters have none.
    pub word: Option<WordIndex>,
}

impl Cell {
    pub const fn filler(letter: char) -> Self {
        Self {
            letter,
            found: false,
            selected: false,
            word: None,
        }
    }

    pub const fn placed(letter: char, word: WordIndex) -> Self {
        Self {
            letter,
            found: false,
            selected: false,
            word: Some(word),
        }
    }

    pub const fn is_filler(&self) -> bool {
        self.word.is_none()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::filler(' ')
    }
}
