use super::*;

/// Draws the round's words, directions, start cells and filler letters from a single seeded generator, so one seed
/// always yields the same round.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomPuzzleGenerator {
    seed: u64,
}

impl RandomPuzzleGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl PuzzleGenerator for RandomPuzzleGenerator {
    fn generate(self, bank: &WordBank, config: &PuzzleConfig) -> Result<Puzzle> {
        use rand::prelude::*;
        use UnplacedWordPolicy::*;

        let size = config.size;
        if size == 0 {
            return Err(PuzzleError::EmptyGrid);
        }
        if config.words_per_round > bank.len() {
            return Err(PuzzleError::NotEnoughWords {
                requested: config.words_per_round,
                available: bank.len(),
            });
        }
        if config.words_per_round > usize::from(WordIndex::MAX) {
            return Err(PuzzleError::TooManyWords {
                requested: config.words_per_round,
            });
        }

        // every draw would contain a word longer than the grid, so no retry can succeed
        let fitting = bank.words().iter().filter(|word| word.len() <= usize::from(size)).count();
        if config.unplaced == Regenerate && fitting < config.words_per_round {
            let longest = bank
                .words()
                .iter()
                .filter(|word| word.len() > usize::from(size))
                .max_by_key(|word| word.len());
            if let Some(word) = longest {
                return Err(PuzzleError::WordTooLong {
                    word: word.word().into(),
                    len: word.len(),
                    size: size.into(),
                });
            }
        }

        let round_attempts = match config.unplaced {
            Regenerate => config.max_round_attempts.max(1),
            Keep => 1,
        };
        let filler = bank.filler();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut last_unplaced = None;

        for round in 0..round_attempts {
            let mut pool: Vec<&TargetWord> = bank.words().iter().collect();
            pool.shuffle(&mut rng);
            let words: Vec<TargetWord> = pool
                .into_iter()
                .take(config.words_per_round)
                .cloned()
                .collect();

            let mut layout = Layout::new(size);
            let mut placements = Vec::with_capacity(words.len());
            for (index, word) in words.iter().enumerate() {
                let letters = word.letters();
                // bounded by the WordIndex::MAX check above
                let index = index as WordIndex;
                let mut placed = None;
                let attempts = if word.len() > usize::from(size) {
                    log::debug!("{} is longer than the grid, skipping placement", word.word());
                    0
                } else {
                    config.max_placement_attempts
                };

                for attempt in 0..attempts {
                    let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
                    let start = (rng.random_range(0..size), rng.random_range(0..size));

                    if let Some(placement) = layout.fits(&letters, start, direction) {
                        log::trace!(
                            "Placed {} at {:?} going {:?} after {} attempts",
                            word.word(),
                            start,
                            direction,
                            attempt + 1
                        );
                        layout.write(index, &letters, placement);
                        placed = Some(placement);
                        break;
                    }
                }
                placements.push(placed);
            }

            if let Some(missing) = placements.iter().position(Option::is_none) {
                let word = words[missing].word();
                match config.unplaced {
                    Regenerate => {
                        log::debug!("Round {} could not place {}, regenerating", round, word);
                        last_unplaced = Some(String::from(word));
                        continue;
                    }
                    Keep => {
                        log::warn!(
                            "Could not place {} after {} attempts, it stays in the word list",
                            word,
                            config.max_placement_attempts
                        );
                    }
                }
            }

            log::debug!(
                "Generated round with {} words, {} filler cells",
                words.len(),
                layout.blank_count()
            );
            let grid = layout.fill(|| filler[rng.random_range(0..filler.len())]);
            return Ok(Puzzle::from_parts(grid, words, placements));
        }

        Err(PuzzleError::Unplaceable {
            word: last_unplaced.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;

    fn generate(seed: u64, config: &PuzzleConfig) -> Puzzle {
        RandomPuzzleGenerator::new(seed)
            .generate(&WordBank::german(), config)
            .unwrap()
    }

    #[test]
    fn placed_words_read_back_exactly() {
        for seed in 0..20 {
            let puzzle = generate(seed, &PuzzleConfig::default());

            assert_eq!(puzzle.words().len(), DEFAULT_WORDS_PER_ROUND);
            for (index, word) in puzzle.words().iter().enumerate() {
                let placement = puzzle.placement(index).unwrap();
                assert_eq!(puzzle.read(placement.cells()), word.word());
            }
        }
    }

    #[test]
    fn every_cell_holds_an_alphabet_letter() {
        let bank = WordBank::german();
        for seed in 0..20 {
            let puzzle = generate(seed, &PuzzleConfig::default());

            assert!(
                puzzle
                    .grid()
                    .iter()
                    .all(|cell| bank.filler().contains(&cell.letter))
            );
        }
    }

    #[test]
    fn shared_cells_agree_on_letter() {
        for seed in 0..20 {
            let puzzle = generate(seed, &PuzzleConfig::default());
            let mut claimed: Vec<(Pos, char)> = Vec::new();

            for (index, word) in puzzle.words().iter().enumerate() {
                let placement = puzzle.placement(index).unwrap();
                for (pos, letter) in placement.cells().zip(word.word().chars()) {
                    if let Some(&(_, other)) = claimed.iter().find(|(p, _)| *p == pos) {
                        assert_eq!(other, letter);
                    }
                    claimed.push((pos, letter));
                }
            }
        }
    }

    #[test]
    fn drawn_words_are_distinct() {
        let puzzle = generate(7, &PuzzleConfig::default());

        let unique: BTreeSet<_> = puzzle.words().iter().map(TargetWord::word).collect();
        assert_eq!(unique.len(), puzzle.words().len());
    }

    #[test]
    fn same_seed_same_round() {
        let config = PuzzleConfig::default();

        assert_eq!(generate(42, &config), generate(42, &config));
        assert_ne!(generate(42, &config).rows(), generate(43, &config).rows());
    }

    #[test]
    fn filler_cells_carry_no_word() {
        let puzzle = generate(3, &PuzzleConfig::default());

        for (row, line) in puzzle.grid().rows().into_iter().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                let pos = (row as Coord, col as Coord);
                let on_path = puzzle
                    .placements()
                    .iter()
                    .flatten()
                    .any(|placement| placement.cells().any(|p| p == pos));
                assert_eq!(cell.word.is_some(), on_path);
            }
        }
    }

    #[test]
    fn rejects_impossible_configs() {
        let bank = WordBank::german();

        let err = RandomPuzzleGenerator::new(0)
            .generate(&bank, &PuzzleConfig::new_unchecked(10, 21))
            .unwrap_err();
        assert_eq!(
            err,
            PuzzleError::NotEnoughWords {
                requested: 21,
                available: 20
            }
        );

        let err = RandomPuzzleGenerator::new(0)
            .generate(&bank, &PuzzleConfig::new_unchecked(0, 8))
            .unwrap_err();
        assert_eq!(err, PuzzleError::EmptyGrid);

        // every bank word is at least four letters long
        let err = RandomPuzzleGenerator::new(0)
            .generate(&bank, &PuzzleConfig::new_unchecked(3, 1))
            .unwrap_err();
        assert!(matches!(err, PuzzleError::WordTooLong { size: 3, .. }));
    }

    #[test]
    fn keep_policy_reports_unplaced_words() {
        // no placement attempts at all, so nothing lands in the grid
        let bank = WordBank::new(
            [TargetWord::new("AAAA", ""), TargetWord::new("BBBB", ""), TargetWord::new("CCCC", "")],
            "X",
        );
        let config = PuzzleConfig {
            size: 4,
            words_per_round: 3,
            max_placement_attempts: 0,
            ..PuzzleConfig::default()
        }
        .with_policy(UnplacedWordPolicy::Keep);

        let puzzle = RandomPuzzleGenerator::new(1).generate(&bank, &config).unwrap();

        assert_eq!(puzzle.words().len(), 3);
        assert_eq!(puzzle.unplaced_words().count(), 3);
        assert!(!puzzle.is_fully_placed());
        assert!(puzzle.grid().iter().all(|cell| cell.letter == 'X'));
    }

    #[test]
    fn regenerate_policy_gives_up_with_an_error() {
        let bank = WordBank::new([TargetWord::new("AAAA", "")], "X");
        let config = PuzzleConfig {
            size: 4,
            words_per_round: 1,
            max_placement_attempts: 0,
            max_round_attempts: 3,
            ..PuzzleConfig::default()
        };

        let err = RandomPuzzleGenerator::new(1).generate(&bank, &config).unwrap_err();

        assert_eq!(err, PuzzleError::Unplaceable { word: "AAAA".into() });
    }

    fn long_word_bank() -> WordBank {
        WordBank::new(
            [TargetWord::new("HAUS", ""), TargetWord::new("WASSERFALL", "")],
            "XYZ",
        )
    }

    fn one_word_round(unplaced: UnplacedWordPolicy) -> PuzzleConfig {
        PuzzleConfig {
            max_round_attempts: 200,
            ..PuzzleConfig::new_unchecked(5, 1)
        }
        .with_policy(unplaced)
    }

    #[test]
    fn keep_policy_lists_words_longer_than_the_grid() {
        let bank = long_word_bank();
        let config = one_word_round(UnplacedWordPolicy::Keep);
        let mut kept = 0;

        for seed in 0..40 {
            let puzzle = RandomPuzzleGenerator::new(seed).generate(&bank, &config).unwrap();

            if puzzle.words()[0].word() == "WASSERFALL" {
                assert_eq!(puzzle.placement(0), None);
                assert_eq!(puzzle.unplaced_words().count(), 1);
                kept += 1;
            } else {
                assert!(puzzle.is_fully_placed());
            }
        }
        assert!(kept > 0);
    }

    #[test]
    fn regenerate_policy_draws_again_after_a_failed_round() {
        let bank = long_word_bank();
        let mut redrawn = 0;

        for seed in 0..40 {
            // both policies make the same first draw from the same seed
            let first_draw = RandomPuzzleGenerator::new(seed)
                .generate(&bank, &one_word_round(UnplacedWordPolicy::Keep))
                .unwrap();
            let puzzle = RandomPuzzleGenerator::new(seed)
                .generate(&bank, &one_word_round(UnplacedWordPolicy::Regenerate))
                .unwrap();

            assert!(puzzle.is_fully_placed());
            assert_eq!(puzzle.words()[0].word(), "HAUS");
            if !first_draw.is_fully_placed() {
                redrawn += 1;
            }
        }
        assert!(redrawn > 0);
    }

    #[test]
    fn regenerate_policy_rejects_banks_that_never_fit() {
        let bank = long_word_bank();
        let config = PuzzleConfig::new_unchecked(5, 2);

        for seed in 0..5 {
            let err = RandomPuzzleGenerator::new(seed).generate(&bank, &config).unwrap_err();
            assert_eq!(
                err,
                PuzzleError::WordTooLong {
                    word: "WASSERFALL".into(),
                    len: 10,
                    size: 5
                }
            );
        }

        // the same bank is still accepted when a round only needs one word
        assert!(
            RandomPuzzleGenerator::new(0)
                .generate(&bank, &one_word_round(UnplacedWordPolicy::Regenerate))
                .is_ok()
        );
    }

    #[test]
    fn regenerate_policy_places_every_word_in_a_crowded_grid() {
        let bank = WordBank::new(
            ["WASSER", "SCHULE", "FREUND", "SOMMER", "WINTER"]
                .iter()
                .map(|w| TargetWord::new(w, "")),
            "XYZ",
        );
        let config = PuzzleConfig {
            size: 6,
            words_per_round: 5,
            max_round_attempts: 200,
            ..PuzzleConfig::default()
        };

        for seed in 0..10 {
            let puzzle = RandomPuzzleGenerator::new(seed).generate(&bank, &config).unwrap();

            assert!(puzzle.is_fully_placed());
            for (index, word) in puzzle.words().iter().enumerate() {
                let placement = puzzle.placement(index).unwrap();
                assert_eq!(puzzle.read(placement.cells()), word.word());
            }
        }
    }
}
