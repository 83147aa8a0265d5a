use anyhow::Result;
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::{Duration, Instant};
use thiserror::Error;
use wortgitter_core::*;

use crate::render;

const HELP: &str = "\
drag R,C R,C ...   drag across cells in order and let go
tap R,C ...        toggle cells in the tap selection
check              check the tap selection
clear              drop the current selection
words              show the word list
grid               show the grid
new                start a new round
help               show this help
quit               leave";

const ONE_SECOND: Duration = Duration::from_secs(1);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Type a command, or help for a list")]
    Empty,
    #[error("Unknown command {0}")]
    Unknown(String),
    #[error("{0} needs at least one cell, like 3,4")]
    MissingCells(&'static str),
    #[error("Cannot read {0} as a cell, use row,col")]
    BadCell(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Drag(Vec<Pos>),
    Tap(Vec<Pos>),
    Check,
    Clear,
    Words,
    Grid,
    New,
    Help,
    Quit,
}

fn parse_pos(text: &str) -> Result<Pos, ParseCommandError> {
    let bad = || ParseCommandError::BadCell(text.to_owned());
    let (row, col) = text.split_once(',').ok_or_else(bad)?;
    let row = row.trim().parse().map_err(|_| bad())?;
    let col = col.trim().parse().map_err(|_| bad())?;
    Ok((row, col))
}

fn parse_cells<'a>(
    name: &'static str,
    args: impl Iterator<Item = &'a str>,
) -> Result<Vec<Pos>, ParseCommandError> {
    let cells = args.map(parse_pos).collect::<Result<Vec<_>, _>>()?;
    if cells.is_empty() {
        return Err(ParseCommandError::MissingCells(name));
    }
    Ok(cells)
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ParseCommandError::Empty);
        };

        Ok(match name.to_lowercase().as_str() {
            "drag" | "d" => Self::Drag(parse_cells("drag", words)?),
            "tap" | "t" => Self::Tap(parse_cells("tap", words)?),
            "check" | "c" => Self::Check,
            "clear" => Self::Clear,
            "words" | "w" => Self::Words,
            "grid" | "g" => Self::Grid,
            "new" | "n" => Self::New,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => return Err(ParseCommandError::Unknown(name.to_owned())),
        })
    }
}

/// A terminal game: one round at a time, driven by the wall clock between commands.
pub struct Session {
    seed: u64,
    config: PuzzleConfig,
    bank: WordBank,
    engine: RoundEngine,
    last: Instant,
    carry: Duration,
    rounds: u64,
}

impl Session {
    pub fn new(seed: u64, config: PuzzleConfig, bank: WordBank) -> Result<Self> {
        let puzzle = Self::generate(seed, &config, &bank)?;
        Ok(Self {
            seed,
            config,
            bank,
            engine: RoundEngine::new(puzzle),
            last: Instant::now(),
            carry: Duration::ZERO,
            rounds: 0,
        })
    }

    fn generate(seed: u64, config: &PuzzleConfig, bank: &WordBank) -> Result<Puzzle> {
        log::info!("generating round with seed {}", seed);
        let puzzle = RandomPuzzleGenerator::new(seed).generate(bank, config)?;
        for word in puzzle.unplaced_words() {
            log::warn!("{} is not in the grid", word.word());
        }
        Ok(puzzle)
    }

    /// Throws the current round away, including its score and clock.
    fn new_round(&mut self) -> Result<()> {
        let seed = self.seed.wrapping_add(self.rounds + 1);
        let puzzle = Self::generate(seed, &self.config, &self.bank)?;
        self.rounds += 1;
        self.engine = RoundEngine::new(puzzle);
        self.last = Instant::now();
        self.carry = Duration::ZERO;
        Ok(())
    }

    fn catch_up(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        self.pass_time(elapsed);
    }

    fn pass_time(&mut self, elapsed: Duration) {
        if self.engine.advance(elapsed) {
            log::trace!("deferred action fired");
        }

        self.carry += elapsed;
        while self.carry >= ONE_SECOND {
            self.carry -= ONE_SECOND;
            if !self.engine.tick() {
                self.carry = Duration::ZERO;
                break;
            }
        }
    }

    fn show_round(&self, out: &mut impl Write) -> Result<()> {
        write!(out, "{}", render::round_grid(&self.engine))?;
        writeln!(out)?;
        write!(out, "{}", render::word_list(&self.engine))?;
        writeln!(out, "{}", render::status_line(&self.engine))?;
        Ok(())
    }

    fn drag(&mut self, cells: &[Pos]) -> Result<CommitOutcome, PuzzleError> {
        let Some((&first, rest)) = cells.split_first() else {
            return Ok(CommitOutcome::NoChange);
        };
        self.engine.press(first)?;
        for &pos in rest {
            if let Err(err) = self.engine.enter(pos) {
                self.engine.clear_selection();
                return Err(err);
            }
        }
        Ok(self.engine.release())
    }

    fn tap(&mut self, cells: &[Pos]) -> Result<(), PuzzleError> {
        for &pos in cells {
            self.engine.tap(pos)?;
        }
        Ok(())
    }

    /// Runs one command. Returns false once the player wants to leave.
    fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<bool> {
        match command {
            Command::Drag(cells) => match self.drag(&cells) {
                Ok(outcome) => {
                    writeln!(out, "{}", render::describe(outcome, &self.engine))?;
                    if outcome.has_update() {
                        self.show_round(out)?;
                    }
                }
                Err(err) => writeln!(out, "{}", err)?,
            },
            Command::Tap(cells) => {
                if let Err(err) = self.tap(&cells) {
                    writeln!(out, "{}", err)?;
                }
                write!(out, "{}", render::round_grid(&self.engine))?;
                writeln!(out, "selected: {}", self.engine.selection().letters(self.engine.puzzle()))?;
            }
            Command::Check => {
                let outcome = self.engine.confirm();
                writeln!(out, "{}", render::describe(outcome, &self.engine))?;
                if outcome.has_update() {
                    self.show_round(out)?;
                }
            }
            Command::Clear => {
                self.engine.clear_selection();
                write!(out, "{}", render::round_grid(&self.engine))?;
            }
            Command::Words => {
                write!(out, "{}", render::word_list(&self.engine))?;
                writeln!(out, "{}", render::status_line(&self.engine))?;
            }
            Command::Grid => self.show_round(out)?,
            Command::New => match self.new_round() {
                Ok(()) => self.show_round(out)?,
                Err(err) => writeln!(out, "{:#}", err)?,
            },
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> Result<()> {
        self.show_round(&mut out)?;
        writeln!(out, "Type help for the list of commands")?;
        self.last = Instant::now();

        for line in input.lines() {
            let line = line?;
            self.catch_up();

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(ParseCommandError::Empty) => continue,
                Err(err) => {
                    writeln!(out, "{}", err)?;
                    continue;
                }
            };
            log::debug!("command: {:?}", command);

            if !self.execute(command, &mut out)? {
                break;
            }
            out.flush()?;
        }

        writeln!(
            out,
            "Final score {} with {}/{} words",
            self.engine.score(),
            self.engine.found_count(),
            self.engine.total_count()
        )?;
        Ok(())
    }
}
