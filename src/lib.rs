//! Chess opening identification by longest-prefix match over SAN move lines.
//!
//! A [`Corpus`] is built once from an ordered list of [`OpeningSource`]s
//! (embedded baseline, JSON table, PGN books); the first source to define a
//! line wins. [`identify`] then returns the deepest known line that prefixes
//! a game's move history.

pub mod baseline;
pub mod book;
pub mod config;
pub mod corpus;
pub mod error;
mod log;
pub mod matcher;
pub mod moves;
pub mod sources;
pub mod table;
pub mod types;

pub use book::{Compression, PgnBookSource};
pub use config::{OpeningsConfig, build_from_config};
pub use corpus::{Corpus, Insertion};
pub use error::{ConfigError, EntryDiagnostics, EntryError, SourceError};
pub use matcher::{identify, identify_movetext};
pub use moves::{CanonicalizeError, canonicalize, canonicalize_prefix};
pub use sources::{BuildOutcome, OpeningSource, SourceReport, build};
pub use types::{MoveSequence, OpeningMatch, OpeningRecord};
