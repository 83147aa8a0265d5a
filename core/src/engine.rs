use alloc::collections::BTreeSet;
use alloc::string::String;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

pub const POINTS_PER_LETTER: u32 = 10;
/// How long a rejected tap selection stays on screen before it is cleared.
pub const INCORRECT_CLEAR_DELAY: Duration = Duration::from_millis(1500);
/// How long the success indication stays after a tap selection matched.
pub const CORRECT_FEEDBACK_DELAY: Duration = Duration::from_millis(2000);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    Active,
    Complete,
}

impl RoundState {
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::Active
    }
}

/// Transient verdict shown after confirming a tap selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    Idle,
    Correct,
    Incorrect,
}

impl Default for Feedback {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum DeferredAction {
    ClearSelection,
    ResetFeedback,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Deferred {
    action: DeferredAction,
    remaining: Duration,
}

/// View of one target word for the word list. Unfound words are masked so their letters never leak.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WordEntry<'a> {
    pub hint: &'a str,
    pub label: &'a str,
    pub found: bool,
}

/// State of one round from generation until it is complete or thrown away.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundEngine {
    puzzle: Puzzle,
    found: BTreeSet<String>,
    score: u32,
    elapsed_secs: u32,
    state: RoundState,
    selection: Selection,
    dragging: bool,
    feedback: Feedback,
    pending: Option<Deferred>,
}

impl RoundEngine {
    pub fn new(puzzle: Puzzle) -> Self {
        Self {
            puzzle,
            found: BTreeSet::new(),
            score: 0,
            elapsed_secs: 0,
            state: Default::default(),
            selection: Selection::new(SelectionMode::Tap),
            dragging: false,
            feedback: Default::default(),
            pending: None,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn size(&self) -> Coord {
        self.puzzle.size()
    }

    /// # Panics
    ///
    /// When `pos` is outside the grid. Use [`Self::try_cell_at`] for positions that come from player input.
    pub fn cell_at(&self, pos: Pos) -> Cell {
        self.puzzle[pos]
    }

    pub fn try_cell_at(&self, pos: Pos) -> Result<Cell> {
        let pos = self.puzzle.validate_pos(pos)?;
        Ok(self.puzzle[pos])
    }

    pub fn words(&self) -> &[TargetWord] {
        self.puzzle.words()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn found_words(&self) -> &BTreeSet<String> {
        &self.found
    }

    pub fn found_count(&self) -> usize {
        self.found.len()
    }

    pub fn total_count(&self) -> usize {
        self.puzzle.words().len()
    }

    pub fn is_found(&self, word: usize) -> bool {
        self.puzzle
            .words()
            .get(word)
            .is_some_and(|target| self.found.contains(target.word()))
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    pub fn word_entries(&self) -> impl Iterator<Item = WordEntry<'_>> {
        self.puzzle.words().iter().map(|target| {
            let found = self.found.contains(target.word());
            WordEntry {
                hint: target.hint(),
                label: if found { target.word() } else { MASKED_WORD },
                found,
            }
        })
    }

    /// Pointer went down on a cell: starts a new drag selection there.
    pub fn press(&mut self, pos: Pos) -> Result<()> {
        let pos = self.puzzle.validate_pos(pos)?;
        log::trace!("press {:?}", pos);

        self.cancel_pending();
        self.selection = Selection::drag(pos);
        self.dragging = true;
        self.sync_selected();
        Ok(())
    }

    /// Pointer entered a cell. Only extends a drag that is in progress.
    pub fn enter(&mut self, pos: Pos) -> Result<()> {
        let pos = self.puzzle.validate_pos(pos)?;

        if self.dragging {
            log::trace!("enter {:?}", pos);
            self.selection.extend(pos);
            self.sync_selected();
        }
        Ok(())
    }

    /// Pointer went up: evaluates the drag if it covered more than one cell, then always drops it.
    pub fn release(&mut self) -> CommitOutcome {
        if !self.dragging {
            return CommitOutcome::NoChange;
        }

        let outcome = if self.selection.len() > 1 {
            self.commit()
        } else {
            CommitOutcome::NoChange
        };

        self.dragging = false;
        self.selection = Selection::new(SelectionMode::Tap);
        self.sync_selected();
        outcome
    }

    /// Adds or removes a cell from the tap selection. Starting a new selection supersedes any pending clear.
    pub fn tap(&mut self, pos: Pos) -> Result<bool> {
        let pos = self.puzzle.validate_pos(pos)?;

        if self.selection.mode() != SelectionMode::Tap {
            self.selection = Selection::new(SelectionMode::Tap);
            self.dragging = false;
        }
        self.cancel_pending();
        let selected = self.selection.toggle(pos);
        log::trace!("tap {:?} selected: {}", pos, selected);
        self.sync_selected();
        Ok(selected)
    }

    /// Evaluates the tap selection. The cells must form one connected group before their letters are matched.
    pub fn confirm(&mut self) -> CommitOutcome {
        use CommitOutcome::*;

        if self.selection.mode() != SelectionMode::Tap || self.selection.len() < 2 {
            return NoChange;
        }

        let outcome = if self.selection.is_connected() {
            self.commit()
        } else {
            Disconnected
        };

        if outcome.is_match() {
            self.feedback = Feedback::Correct;
            self.schedule(DeferredAction::ResetFeedback, CORRECT_FEEDBACK_DELAY);
        } else {
            self.feedback = Feedback::Incorrect;
            self.schedule(DeferredAction::ClearSelection, INCORRECT_CLEAR_DELAY);
        }
        outcome
    }

    /// Drops the tap selection and any verdict on it.
    pub fn clear_selection(&mut self) {
        self.cancel_pending();
        self.dragging = false;
        self.selection.clear();
        self.sync_selected();
    }

    /// One second of the round clock. Returns whether the clock moved, which it only does until the round is
    /// complete.
    pub fn tick(&mut self) -> bool {
        if self.state.is_complete() {
            return false;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        true
    }

    /// Lets `elapsed` pass for the pending deferred action. Returns whether it fired.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };

        if elapsed < pending.remaining {
            pending.remaining -= elapsed;
            return false;
        }

        let action = pending.action;
        self.pending = None;
        match action {
            DeferredAction::ClearSelection => {
                self.selection.clear();
                self.feedback = Feedback::Idle;
                self.sync_selected();
            }
            DeferredAction::ResetFeedback => {
                self.feedback = Feedback::Idle;
            }
        }
        true
    }

    /// Time left until the pending deferred action fires.
    pub fn pending_delay(&self) -> Option<Duration> {
        self.pending.map(|pending| pending.remaining)
    }

    fn commit(&mut self) -> CommitOutcome {
        use CommitOutcome::*;

        let letters = self.selection.letters(&self.puzzle);
        let Some(word) = find_target(&letters, self.puzzle.words()) else {
            log::debug!("no target matches {}", letters);
            return NoMatch;
        };

        let target = self.puzzle.words()[word].word();
        if self.found.contains(target) {
            log::debug!("{} was already found", target);
            return AlreadyFound { word };
        }

        let points = (self.puzzle.words()[word].len() as u32).saturating_mul(POINTS_PER_LETTER);
        self.found.insert(String::from(target));
        self.score = self.score.saturating_add(points);

        let cells = core::mem::replace(&mut self.selection, Selection::new(SelectionMode::Tap));
        for &pos in cells.cells() {
            self.puzzle.cell_mut(pos).found = true;
        }
        self.sync_selected();

        log::debug!(
            "found {} for {} points, {}/{}",
            self.puzzle.words()[word].word(),
            points,
            self.found_count(),
            self.total_count()
        );

        if self.found.len() == self.total_count() {
            self.state = RoundState::Complete;
            Won { word, points }
        } else {
            Found { word, points }
        }
    }

    fn schedule(&mut self, action: DeferredAction, delay: Duration) {
        self.pending = Some(Deferred {
            action,
            remaining: delay,
        });
    }

    fn cancel_pending(&mut self) {
        self.pending = None;
        self.feedback = Feedback::Idle;
    }

    fn sync_selected(&mut self) {
        for cell in self.puzzle.cells_mut() {
            cell.selected = false;
        }
        for &pos in self.selection.cells() {
            self.puzzle.cell_mut(pos).selected = true;
        }
    }
}
