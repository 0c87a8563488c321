//! Bulk opening database import from PGN.
//!
//! Each game of an ECO book contributes one line: its mainline, optionally
//! capped at `max_plies`, labeled from the `ECO`, `Opening`, `Variation` and
//! `SubVariation` tags.

use crate::error::{EntryDiagnostics, EntryError, SourceError};
use crate::moves::canonicalize;
use crate::sources::LoadedEntries;
use crate::types::{MoveList, MoveSequence, OpeningRecord};
use pgn_reader::{Nag, Outcome, RawComment, RawTag, Reader, SanPlus, Skip, Visitor};
use std::fs::File;
use std::io::Read;
use std::mem;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use zstd::stream::read::Decoder as ZstdDecoder;

#[macro_export]
macro_rules! pgn_visitor_skip_variations {
    () => {
        fn nag(&mut self, _: &mut Self::Movetext, _: Nag) -> ControlFlow<Self::Output> {
            ControlFlow::Continue(())
        }

        fn comment(
            &mut self,
            _: &mut Self::Movetext,
            _: RawComment<'_>,
        ) -> ControlFlow<Self::Output> {
            ControlFlow::Continue(())
        }

        fn partial_comment(
            &mut self,
            _: &mut Self::Movetext,
            _: RawComment<'_>,
        ) -> ControlFlow<Self::Output> {
            ControlFlow::Continue(())
        }

        fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
            ControlFlow::Continue(Skip(true))
        }
    };
}

pub type PgnInput = Box<dyn Read + Send>;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Compression {
    #[default]
    Plain,
    Zstd,
}

impl Compression {
    /// Parse a user-supplied compression name.
    ///
    /// Unset, empty and `null` mean plain text; `zstd` is matched case-insensitively.
    pub fn parse(raw: Option<&str>) -> Result<Self, String> {
        let Some(raw) = raw else {
            return Ok(Self::Plain);
        };
        let normalized = raw.trim();
        if normalized.is_empty() || normalized.eq_ignore_ascii_case("null") {
            Ok(Self::Plain)
        } else if normalized.eq_ignore_ascii_case("zstd") {
            Ok(Self::Zstd)
        } else {
            Err(format!(
                "Invalid compression value '{}'. Supported values: 'zstd' or NULL/omitted.",
                normalized
            ))
        }
    }
}

/// A PGN opening book: one file, or every file matched by a glob pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PgnBookSource {
    pub pattern: String,
    pub compression: Compression,
    /// Keep at most this many plies of each game's mainline.
    pub max_plies: Option<usize>,
}

impl PgnBookSource {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            compression: Compression::Plain,
            max_plies: None,
        }
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_max_plies(mut self, max_plies: usize) -> Self {
        self.max_plies = Some(max_plies);
        self
    }

    /// Files this book reads, in sorted path order.
    pub fn paths(&self) -> Result<Vec<PathBuf>, SourceError> {
        let pattern = &self.pattern;
        if !(pattern.contains('*') || pattern.contains('?')) {
            return Ok(vec![PathBuf::from(pattern)]);
        }

        let mut paths: Vec<PathBuf> = glob::glob(pattern)
            .map_err(|e| SourceError::unavailable(pattern, format!("invalid glob pattern: {e}")))?
            .filter_map(|entry| entry.ok())
            .collect();
        if paths.is_empty() {
            return Err(SourceError::unavailable(pattern, "glob pattern matched no files"));
        }
        paths.sort();
        Ok(paths)
    }
}

fn open_input_stream(path: &Path, compression: Compression) -> Result<PgnInput, SourceError> {
    let label = path.display().to_string();
    let file = File::open(path)
        .map_err(|e| SourceError::unavailable(&label, format!("Failed to open file: {e}")))?;

    match compression {
        Compression::Plain => Ok(Box::new(file)),
        Compression::Zstd => ZstdDecoder::new(file)
            .map(|decoder| Box::new(decoder) as PgnInput)
            .map_err(|e| {
                SourceError::malformed(&label, format!("Failed to initialize zstd decoder: {e}"))
            }),
    }
}

pub fn load_pgn_file(
    path: &Path,
    compression: Compression,
    max_plies: Option<usize>,
) -> Result<LoadedEntries, SourceError> {
    let input = open_input_stream(path, compression)?;
    read_pgn_book(input, &path.display().to_string(), max_plies)
}

/// Read every game of a book. Any read failure rejects the whole book.
pub(crate) fn read_pgn_book<R: Read>(
    input: R,
    label: &str,
    max_plies: Option<usize>,
) -> Result<LoadedEntries, SourceError> {
    // pgn-reader buffers internally; no BufReader needed.
    let mut reader = Reader::new(input);
    let mut visitor = BookVisitor::default();
    let mut entries = Vec::new();
    let mut skipped = EntryDiagnostics::default();
    let mut game_index = 1usize;

    loop {
        match reader.read_game(&mut visitor) {
            Ok(Some(game)) => {
                match game.into_entry(max_plies) {
                    Ok(entry) => entries.push(entry),
                    Err(reason) => skipped.push(EntryError::new(format!("game {game_index}"), reason)),
                }
                game_index += 1;
            }
            Ok(None) => break,
            Err(e) => {
                return Err(SourceError::malformed(
                    label,
                    format!("read error at game {game_index}: {e}"),
                ));
            }
        }
    }

    Ok(LoadedEntries { entries, skipped })
}

/// Tags and mainline of one book game.
#[derive(Debug, Default)]
struct BookGame {
    eco: String,
    opening: String,
    variation: String,
    sub_variation: String,
    custom_start: bool,
    sans: MoveList,
}

impl BookGame {
    fn into_entry(mut self, max_plies: Option<usize>) -> Result<(MoveSequence, OpeningRecord), String> {
        if self.custom_start {
            return Err("game starts from a custom position".to_string());
        }
        if self.eco.trim().is_empty() {
            return Err("missing ECO tag".to_string());
        }
        if self.opening.trim().is_empty() {
            return Err("missing Opening tag".to_string());
        }

        let mut name = self.opening.trim().to_string();
        if !self.variation.trim().is_empty() {
            name.push_str(": ");
            name.push_str(self.variation.trim());
        }
        if !self.sub_variation.trim().is_empty() {
            name.push_str(", ");
            name.push_str(self.sub_variation.trim());
        }
        let record = OpeningRecord::validated(&self.eco, &name)?;

        if let Some(max) = max_plies {
            self.sans.truncate(max);
        }
        if self.sans.is_empty() {
            return Err("no moves".to_string());
        }
        let line = canonicalize(&self.sans).map_err(|e| format!("illegal line: {e}"))?;

        Ok((line, record))
    }
}

#[derive(Default)]
struct BookVisitor {
    game: BookGame,
}

impl BookVisitor {
    fn set_known_tag(&mut self, key: &[u8], value: RawTag<'_>) {
        let slot: &mut String = match key {
            b"ECO" => &mut self.game.eco,
            b"Opening" => &mut self.game.opening,
            b"Variation" => &mut self.game.variation,
            b"SubVariation" => &mut self.game.sub_variation,
            b"FEN" => {
                self.game.custom_start = true;
                return;
            }
            b"SetUp" => {
                if value.as_bytes() == b"1" {
                    self.game.custom_start = true;
                }
                return;
            }
            _ => return,
        };

        // Duplicate tags keep the first value.
        if !slot.is_empty() {
            return;
        }
        *slot = String::from_utf8_lossy(value.as_bytes()).into_owned();
    }
}

impl Visitor for BookVisitor {
    type Tags = ();
    type Movetext = ();
    type Output = BookGame;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        self.game = BookGame::default();
        ControlFlow::Continue(())
    }

    fn tag(
        &mut self,
        _: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        self.set_known_tag(key, value);
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, _tags: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        ControlFlow::Continue(())
    }

    fn san(&mut self, _movetext: &mut Self::Movetext, san: SanPlus) -> ControlFlow<Self::Output> {
        self.game.sans.push(san.to_string());
        ControlFlow::Continue(())
    }

    pgn_visitor_skip_variations!();

    fn outcome(
        &mut self,
        _movetext: &mut Self::Movetext,
        _outcome: Outcome,
    ) -> ControlFlow<Self::Output> {
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, _movetext: Self::Movetext) -> Self::Output {
        mem::take(&mut self.game)
    }
}
