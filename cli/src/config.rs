use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use wortgitter_core::*;

/// Contents of the optional TOML settings file. Every key can be left out.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    #[serde(flatten)]
    pub puzzle: PuzzleConfig,
    /// Letters to draw filler cells from
    pub filler: Option<String>,
    /// Replaces the built-in German word bank when not empty
    pub words: Vec<WordSpec>,
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct WordSpec {
    pub word: String,
    #[serde(default)]
    pub hint: String,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read config {}", path.display()))?;
        let settings = Self::parse(&text)
            .with_context(|| format!("Could not parse config {}", path.display()))?;
        log::debug!("loaded config from {}: {:?}", path.display(), settings.puzzle);
        Ok(settings)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn bank(&self) -> WordBank {
        let filler = self.filler.as_deref().unwrap_or(GERMAN_LETTERS);

        if self.words.is_empty() {
            if self.filler.is_none() {
                return WordBank::german();
            }
            return WordBank::new(WordBank::german().words().iter().cloned(), filler);
        }

        WordBank::new(
            self.words
                .iter()
                .map(|spec| TargetWord::new(&spec.word, &spec.hint)),
            filler,
        )
    }
}
