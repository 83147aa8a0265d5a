use crate::*;
pub(crate) use layout::Layout;
pub use random::*;

mod layout;
mod random;

pub trait PuzzleGenerator {
    fn generate(self, bank: &WordBank, config: &PuzzleConfig) -> Result<Puzzle>;
}

/// What to do with a round where some word found no free run of cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnplacedWordPolicy {
    /// Throw the round away and draw a new one.
    Regenerate,
    /// Keep the word in the list even though it cannot be found.
    Keep,
}

impl Default for UnplacedWordPolicy {
    fn default() -> Self {
        Self::Regenerate
    }
}
