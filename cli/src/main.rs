use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};
use wortgitter_core::*;

mod config;
mod play;
mod render;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// TOML file with puzzle settings and an optional word list
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a round and print it
    Show {
        /// Blank out filler letters so only the hidden words remain
        #[arg(long)]
        solution: bool,

        /// Print the round as JSON instead of a grid
        #[arg(long)]
        json: bool,
    },
    /// Play on the terminal, one command per line
    Play,
}

fn init_logger(level: log::LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false);

    // RUST_LOG wins over the command line flags when set
    builder.parse_default_env();
    builder.init();
}

/// Seed from the wall clock when none was forced.
fn random_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn run(args: Args) -> Result<()> {
    let settings = config::Settings::load(args.config.as_deref())?;
    let puzzle_config = settings.puzzle;
    let bank = settings.bank();
    let seed = args.seed.unwrap_or_else(random_seed);
    log::debug!("seed: {}", seed);

    match args.command {
        Command::Show { solution, json } => {
            let puzzle = RandomPuzzleGenerator::new(seed).generate(&bank, &puzzle_config)?;
            for word in puzzle.unplaced_words() {
                log::warn!("{} is not in the grid", word.word());
            }

            let mut out = io::stdout().lock();
            if json {
                let summary = render::RoundSummary::new(seed, &puzzle);
                serde_json::to_writer_pretty(&mut out, &summary)?;
                writeln!(out)?;
            } else {
                write!(out, "{}", render::puzzle_grid(&puzzle, solution))?;
                writeln!(out)?;
                for word in puzzle.words() {
                    let label = if solution { word.word() } else { MASKED_WORD };
                    writeln!(out, "{:<8} {}", label, word.hint())?;
                }
            }
            Ok(())
        }
        Command::Play => {
            let mut session = play::Session::new(seed, puzzle_config, bank)?;
            session.run(io::stdin().lock(), io::stdout().lock())
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.verbose.log_level_filter());

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
