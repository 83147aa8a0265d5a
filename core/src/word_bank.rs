use alloc::{string::String, vec::Vec};
use serde::{Deserialize, Serialize};

/// Letters drawn for filler cells. The doubled `S` stands in for `ß`.
pub const GERMAN_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZÄÖÜSS";

/// Placeholder shown for a target word that has not been found yet.
pub const MASKED_WORD: &str = "???";

const GERMAN_BANK: [(&str, &str); 20] = [
    ("HUND", "Bester Freund des Menschen"),
    ("KATZE", "Samtpfotiges Haustier, das gerne schnurrt"),
    ("HAUS", "Gebäude zum Wohnen"),
    ("BAUM", "Große Pflanze mit Stamm und Ästen"),
    ("WASSER", "Klare Flüssigkeit zum Trinken"),
    ("SONNE", "Heller Stern am Himmel"),
    ("MOND", "Himmelskörper, der nachts scheint"),
    ("BUCH", "Sammlung von Seiten zum Lesen"),
    ("AUTO", "Fahrzeug mit vier Rädern"),
    ("BLUME", "Bunte Pflanze im Garten"),
    ("SCHULE", "Ort zum Lernen für Kinder"),
    ("FREUND", "Person, die man sehr gern hat"),
    ("MUSIK", "Schöne Töne und Melodien"),
    ("SPIEL", "Aktivität zum Spaß haben"),
    ("FARBE", "Rot, Blau, Grün sind Beispiele"),
    ("ZEIT", "Vergeht von Sekunde zu Sekunde"),
    ("LIEBE", "Starkes Gefühl der Zuneigung"),
    ("GLÜCK", "Gefühl der Freude und Zufriedenheit"),
    ("TRAUM", "Was man nachts beim Schlafen erlebt"),
    ("LEBEN", "Existenz von der Geburt bis zum Tod"),
];

/// A word to find, with the clue shown to the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetWord {
    word: String,
    hint: String,
}

impl TargetWord {
    /// Stores the word in its canonical uppercase form.
    pub fn new(word: &str, hint: &str) -> Self {
        Self {
            word: word.trim().to_uppercase(),
            hint: hint.into(),
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Length in letters, which is also the number of cells the word covers.
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    pub fn letters(&self) -> Vec<char> {
        self.word.chars().collect()
    }
}

/// Static pool that each round draws its target words from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordBank {
    words: Vec<TargetWord>,
    filler: Vec<char>,
}

impl WordBank {
    /// Empty words and repeated words are dropped so that every entry can be found on its own.
    pub fn new<I>(words: I, filler: &str) -> Self
    where
        I: IntoIterator<Item = TargetWord>,
    {
        let mut unique: Vec<TargetWord> = Vec::new();
        for word in words {
            if word.is_empty() {
                log::warn!("Skipping empty word in bank");
            } else if unique.iter().any(|w| w.word == word.word) {
                log::warn!("Skipping duplicate word {} in bank", word.word);
            } else {
                unique.push(word);
            }
        }

        let mut filler: Vec<char> = filler.chars().filter(|c| !c.is_whitespace()).collect();
        if filler.is_empty() {
            log::warn!("Empty filler alphabet, fallback to German letters");
            filler = GERMAN_LETTERS.chars().collect();
        }

        Self {
            words: unique,
            filler,
        }
    }

    /// The built-in German bank.
    pub fn german() -> Self {
        Self::new(
            GERMAN_BANK
                .iter()
                .map(|&(word, hint)| TargetWord::new(word, hint)),
            GERMAN_LETTERS,
        )
    }

    pub fn words(&self) -> &[TargetWord] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn filler(&self) -> &[char] {
        &self.filler
    }

    pub fn longest_word(&self) -> usize {
        self.words.iter().map(TargetWord::len).max().unwrap_or(0)
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self::german()
    }
}
