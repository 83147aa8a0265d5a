use serde::Serialize;
use std::fmt::Write;
use wortgitter_core::*;

#[derive(Serialize, Debug)]
pub struct RoundSummary<'a> {
    pub seed: u64,
    pub size: Coord,
    pub rows: Vec<String>,
    pub words: Vec<WordSummary<'a>>,
}

#[derive(Serialize, Debug)]
pub struct WordSummary<'a> {
    pub word: &'a str,
    pub hint: &'a str,
    pub placement: Option<Placement>,
}

impl<'a> RoundSummary<'a> {
    pub fn new(seed: u64, puzzle: &'a Puzzle) -> Self {
        Self {
            seed,
            size: puzzle.size(),
            rows: puzzle.rows(),
            words: puzzle
                .words()
                .iter()
                .zip(puzzle.placements())
                .map(|(target, placement)| WordSummary {
                    word: target.word(),
                    hint: target.hint(),
                    placement: *placement,
                })
                .collect(),
        }
    }
}

/// Elapsed round time as `m:ss`.
pub fn format_elapsed(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn column_header(out: &mut String, size: Coord) {
    out.push_str("   ");
    for col in 0..size {
        write!(out, "{:^3}", col).unwrap();
    }
    out.push('\n');
}

/// The generated grid, with filler letters dotted out when `solution` is set.
pub fn puzzle_grid(puzzle: &Puzzle, solution: bool) -> String {
    let mut out = String::new();
    column_header(&mut out, puzzle.size());
    for row in 0..puzzle.size() {
        write!(out, "{:>2} ", row).unwrap();
        for col in 0..puzzle.size() {
            let cell = puzzle[(row, col)];
            let letter = if solution && cell.is_filler() {
                '·'
            } else {
                cell.letter
            };
            write!(out, " {} ", letter).unwrap();
        }
        out.push('\n');
    }
    out
}

/// The grid during play: selected cells in brackets, found cells in parentheses.
pub fn round_grid(engine: &RoundEngine) -> String {
    let mut out = String::new();
    column_header(&mut out, engine.size());
    for row in 0..engine.size() {
        write!(out, "{:>2} ", row).unwrap();
        for col in 0..engine.size() {
            let cell = engine.cell_at((row, col));
            let (open, close) = match (cell.selected, cell.found) {
                (true, _) => ('[', ']'),
                (false, true) => ('(', ')'),
                (false, false) => (' ', ' '),
            };
            write!(out, "{}{}{}", open, cell.letter, close).unwrap();
        }
        out.push('\n');
    }
    out
}

pub fn word_list(engine: &RoundEngine) -> String {
    let mut out = String::new();
    for entry in engine.word_entries() {
        let mark = if entry.found { '✓' } else { ' ' };
        writeln!(out, "{} {:<8} {}", mark, entry.label, entry.hint).unwrap();
    }
    out
}

pub fn status_line(engine: &RoundEngine) -> String {
    format!(
        "time {}  score {}  words {}/{}",
        format_elapsed(engine.elapsed_secs()),
        engine.score(),
        engine.found_count(),
        engine.total_count()
    )
}

pub fn describe(outcome: CommitOutcome, engine: &RoundEngine) -> String {
    use CommitOutcome::*;

    let word = |index: usize| engine.words()[index].word();
    match outcome {
        NoChange => "Select at least two letters".into(),
        Disconnected => "Those letters are not connected".into(),
        NoMatch => "No hidden word there".into(),
        AlreadyFound { word: index } => format!("{} was already found", word(index)),
        Found {
            word: index,
            points,
        } => format!("Found {}! +{}", word(index), points),
        Won {
            word: index,
            points,
        } => format!(
            "Found {}! +{}\nAll {} words found in {} with {} points",
            word(index),
            points,
            engine.total_count(),
            format_elapsed(engine.elapsed_secs()),
            engine.score()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> RoundEngine {
        let puzzle = Puzzle::from_rows(
            &["HAUS", "XXXX", "XXXX", "XXXX"],
            vec![TargetWord::new("HAUS", "Gebäude zum Wohnen")],
        )
        .unwrap();
        RoundEngine::new(puzzle)
    }

    #[test]
    fn elapsed_time_is_minutes_and_padded_seconds() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(65), "1:05");
        assert_eq!(format_elapsed(600), "10:00");
    }

    #[test]
    fn word_list_masks_until_found() {
        let mut engine = engine();
        assert_eq!(word_list(&engine), "  ???      Gebäude zum Wohnen\n");

        for col in 0..4 {
            engine.tap((0, col)).unwrap();
        }
        engine.confirm();

        assert_eq!(word_list(&engine), "✓ HAUS     Gebäude zum Wohnen\n");
        assert_eq!(status_line(&engine), "time 0:00  score 40  words 1/1");
    }

    #[test]
    fn round_grid_marks_selected_and_found_cells() {
        let mut engine = engine();
        engine.tap((1, 0)).unwrap();

        let grid = round_grid(&engine);
        let lines: Vec<&str> = grid.lines().collect();

        assert_eq!(lines[1], " 0  H  A  U  S ");
        assert_eq!(lines[2], " 1 [X] X  X  X ");
    }

    #[test]
    fn solution_grid_hides_filler() {
        let engine = engine();

        let grid = puzzle_grid(engine.puzzle(), true);

        assert_eq!(grid.lines().nth(2), Some(" 1  ·  ·  ·  · "));
    }

    #[test]
    fn summary_lists_placements() {
        let engine = engine();

        let summary = RoundSummary::new(9, engine.puzzle());

        assert_eq!(summary.rows[0], "HAUS");
        assert_eq!(summary.words[0].placement.map(|p| p.start), Some((0, 0)));
    }
}
