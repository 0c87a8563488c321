use crate::baseline::baseline_entries;
use crate::book::{PgnBookSource, load_pgn_file};
use crate::corpus::{Corpus, Insertion};
use crate::error::{EntryDiagnostics, EntryError, SourceError};
use crate::log;
use crate::table::load_json_table;
use crate::types::{MoveSequence, OpeningRecord};
use std::path::PathBuf;

/// Entries decoded from one source, plus the ones rejected on the way.
#[derive(Debug, Default)]
pub struct LoadedEntries {
    pub entries: Vec<(MoveSequence, OpeningRecord)>,
    pub skipped: EntryDiagnostics,
}

/// One input of corpus construction. Order in the source list is precedence.
#[derive(Debug, Clone)]
pub enum OpeningSource {
    /// The embedded table from [`crate::baseline`].
    Baseline,
    /// Lines already in canonical SAN, e.g. a custom baseline.
    Table(Vec<(MoveSequence, OpeningRecord)>),
    /// JSON object of `"line": [code, name]`.
    JsonFile(PathBuf),
    /// PGN opening book; a glob expands to one source per file.
    PgnBook(PgnBookSource),
}

impl OpeningSource {
    pub fn label(&self) -> String {
        match self {
            Self::Baseline => "baseline".to_string(),
            Self::Table(_) => "in-memory table".to_string(),
            Self::JsonFile(path) => path.display().to_string(),
            Self::PgnBook(book) => book.pattern.clone(),
        }
    }
}

/// What one source contributed to the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub label: String,
    /// Lines new to the corpus.
    pub inserted: usize,
    /// Lines already defined by an earlier source (or earlier in this one).
    pub duplicates: usize,
    pub skipped: EntryDiagnostics,
    /// Set when the whole source was skipped.
    pub error: Option<SourceError>,
}

impl SourceReport {
    fn failed(error: SourceError) -> Self {
        Self {
            label: error.source_label().to_string(),
            inserted: 0,
            duplicates: 0,
            skipped: EntryDiagnostics::default(),
            error: Some(error),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug)]
pub struct BuildOutcome {
    pub corpus: Corpus,
    pub reports: Vec<SourceReport>,
}

/// Merge `sources` into a fresh corpus, earliest source first.
///
/// A line keeps the record of the first source that defines it. Failing
/// sources and malformed entries are logged and skipped; this never fails.
pub fn build(sources: &[OpeningSource]) -> BuildOutcome {
    let mut corpus = Corpus::new();
    let mut reports = Vec::with_capacity(sources.len());

    for source in sources {
        for (label, loaded) in load_source(source) {
            let report = match loaded {
                Ok(loaded) => merge(&mut corpus, label, loaded),
                Err(error) => SourceReport::failed(error),
            };
            log_report(&report);
            reports.push(report);
        }
    }

    log::info(format!(
        "corpus built: {} lines from {} of {} sources",
        corpus.len(),
        reports.iter().filter(|r| r.is_loaded()).count(),
        reports.len()
    ));

    BuildOutcome { corpus, reports }
}

fn load_source(source: &OpeningSource) -> Vec<(String, Result<LoadedEntries, SourceError>)> {
    match source {
        OpeningSource::Baseline => vec![(
            source.label(),
            Ok(LoadedEntries {
                entries: baseline_entries().collect(),
                skipped: EntryDiagnostics::default(),
            }),
        )],
        OpeningSource::Table(entries) => vec![(
            source.label(),
            Ok(LoadedEntries {
                entries: entries.clone(),
                skipped: EntryDiagnostics::default(),
            }),
        )],
        OpeningSource::JsonFile(path) => {
            vec![(path.display().to_string(), load_json_table(path))]
        }
        OpeningSource::PgnBook(book) => match book.paths() {
            Ok(paths) => paths
                .iter()
                .map(|path| {
                    (
                        path.display().to_string(),
                        load_pgn_file(path, book.compression, book.max_plies),
                    )
                })
                .collect(),
            Err(error) => vec![(source.label(), Err(error))],
        },
    }
}

fn merge(corpus: &mut Corpus, label: String, loaded: LoadedEntries) -> SourceReport {
    let LoadedEntries {
        entries,
        mut skipped,
    } = loaded;
    let mut inserted = 0;
    let mut duplicates = 0;

    for (line, record) in entries {
        match corpus.insert_if_absent(&line, record) {
            Insertion::Inserted => inserted += 1,
            Insertion::Duplicate => duplicates += 1,
            Insertion::EmptyKey => skipped.push(EntryError::new("empty line", "zero-length key")),
        }
    }

    SourceReport {
        label,
        inserted,
        duplicates,
        skipped,
        error: None,
    }
}

fn log_report(report: &SourceReport) {
    match &report.error {
        Some(error @ SourceError::Malformed { .. }) => log::error(format!("skipped {error}")),
        Some(error @ SourceError::Unavailable { .. }) => log::warn(format!("skipped {error}")),
        None => {
            if let Some(summary) = report.skipped.summary() {
                log::warn(format!(
                    "{}: skipped {} malformed entries: {}",
                    report.label,
                    report.skipped.count(),
                    summary
                ));
            }
            log::info(format!(
                "{}: {} lines inserted, {} already present",
                report.label, report.inserted, report.duplicates
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::BASELINE_OPENINGS;

    fn table(lines: &[(&str, &str, &str)]) -> OpeningSource {
        OpeningSource::Table(
            lines
                .iter()
                .map(|&(line, code, name)| (MoveSequence::parse(line), OpeningRecord::new(code, name)))
                .collect(),
        )
    }

    #[test]
    fn test_baseline_only() {
        let outcome = build(&[OpeningSource::Baseline]);
        assert_eq!(outcome.corpus.len(), BASELINE_OPENINGS.len());
        assert_eq!(outcome.reports.len(), 1);
        assert_eq!(outcome.reports[0].inserted, BASELINE_OPENINGS.len());
        assert!(outcome.reports[0].is_loaded());
    }

    #[test]
    fn test_earlier_source_wins_on_collision() {
        let outcome = build(&[
            table(&[("e4", "C20", "King's Pawn")]),
            table(&[("e4", "X00", "Other Name"), ("d4", "A40", "Queen's Pawn")]),
        ]);

        let e4 = outcome.corpus.get(&MoveSequence::parse("e4")).unwrap();
        assert_eq!(e4, &OpeningRecord::new("C20", "King's Pawn"));
        assert_eq!(outcome.reports[1].inserted, 1);
        assert_eq!(outcome.reports[1].duplicates, 1);
    }

    #[test]
    fn test_precedence_follows_list_order_not_content() {
        let first = table(&[("e4", "X00", "Other Name")]);
        let second = table(&[("e4", "C20", "King's Pawn")]);

        let outcome = build(&[first, second]);
        assert_eq!(outcome.corpus.get(&MoveSequence::parse("e4")).unwrap().code, "X00");
    }

    #[test]
    fn test_missing_json_does_not_block_baseline() {
        let outcome = build(&[
            OpeningSource::Baseline,
            OpeningSource::JsonFile(PathBuf::from("definitely/not/here/eco.json")),
        ]);

        assert_eq!(outcome.corpus.len(), BASELINE_OPENINGS.len());
        assert!(matches!(
            outcome.reports[1].error,
            Some(SourceError::Unavailable { .. })
        ));
    }

    #[test]
    fn test_missing_book_glob_is_reported_once() {
        let outcome = build(&[OpeningSource::PgnBook(PgnBookSource::new(
            "definitely/not/here/*.pgn",
        ))]);

        assert!(outcome.corpus.is_empty());
        assert_eq!(outcome.reports.len(), 1);
        assert_eq!(outcome.reports[0].label, "definitely/not/here/*.pgn");
        assert!(!outcome.reports[0].is_loaded());
    }

    #[test]
    fn test_empty_keys_in_table_are_skipped() {
        let outcome = build(&[table(&[("", "A00", "Nothing"), ("c4", "A10", "English Opening")])]);
        assert_eq!(outcome.corpus.len(), 1);
        assert_eq!(outcome.reports[0].skipped.count(), 1);
    }

    #[test]
    fn test_no_sources_yields_empty_corpus() {
        let outcome = build(&[]);
        assert!(outcome.corpus.is_empty());
        assert!(outcome.reports.is_empty());
    }
}
