use crate::book::{Compression, PgnBookSource};
use crate::error::ConfigError;
use crate::sources::{BuildOutcome, OpeningSource, build};
use std::env;
use std::path::PathBuf;

pub const ECO_JSON_VAR: &str = "OPENINGS_ECO_JSON";
pub const ECO_PGN_VAR: &str = "OPENINGS_ECO_PGN";
pub const PGN_COMPRESSION_VAR: &str = "OPENINGS_PGN_COMPRESSION";
pub const PGN_MAX_PLIES_VAR: &str = "OPENINGS_PGN_MAX_PLIES";

pub const DEFAULT_ECO_JSON: &str = "data/openings/eco_small.json";

/// Which optional sources feed the corpus next to the embedded baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningsConfig {
    pub eco_json: Option<PathBuf>,
    /// Path or glob of PGN opening books.
    pub eco_pgn: Option<String>,
    pub compression: Compression,
    pub max_plies: Option<usize>,
}

impl Default for OpeningsConfig {
    fn default() -> Self {
        Self {
            eco_json: Some(PathBuf::from(DEFAULT_ECO_JSON)),
            eco_pgn: None,
            compression: Compression::Plain,
            max_plies: None,
        }
    }
}

impl OpeningsConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`; an empty value counts as unset except
    /// for the JSON table, where it disables the default path.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let eco_json = match lookup(ECO_JSON_VAR) {
            None => Some(PathBuf::from(DEFAULT_ECO_JSON)),
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(PathBuf::from(raw.trim())),
        };

        let eco_pgn = lookup(ECO_PGN_VAR)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty());

        let compression = Compression::parse(lookup(PGN_COMPRESSION_VAR).as_deref()).map_err(
            |reason| ConfigError {
                key: PGN_COMPRESSION_VAR,
                reason,
            },
        )?;

        let max_plies = match lookup(PGN_MAX_PLIES_VAR) {
            None => None,
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(0) | Err(_) => {
                    return Err(ConfigError {
                        key: PGN_MAX_PLIES_VAR,
                        reason: format!("expected a positive integer, got '{}'", raw.trim()),
                    });
                }
                Ok(n) => Some(n),
            },
        };

        Ok(Self {
            eco_json,
            eco_pgn,
            compression,
            max_plies,
        })
    }

    /// Sources in precedence order: baseline, JSON table, PGN book.
    pub fn sources(&self) -> Vec<OpeningSource> {
        let mut sources = vec![OpeningSource::Baseline];

        if let Some(path) = &self.eco_json {
            sources.push(OpeningSource::JsonFile(path.clone()));
        }

        if let Some(pattern) = &self.eco_pgn {
            sources.push(OpeningSource::PgnBook(PgnBookSource {
                pattern: pattern.clone(),
                compression: self.compression,
                max_plies: self.max_plies,
            }));
        }

        sources
    }
}

pub fn build_from_config(config: &OpeningsConfig) -> BuildOutcome {
    build(&config.sources())
}
