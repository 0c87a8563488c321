use chess_openings::{
    Compression, MoveSequence, OpeningRecord, OpeningSource, OpeningsConfig, PgnBookSource,
    SourceError, build, build_from_config, identify, identify_movetext,
};
use std::fs::{create_dir_all, remove_dir_all, write};
use std::path::{Path, PathBuf};

fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("data/openings")
        .join(name)
}

/// Fresh scratch directory under the OS temp dir, unique per test.
fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chess-openings-{}-{}", test, std::process::id()));
    let _ = remove_dir_all(&dir);
    create_dir_all(&dir).unwrap();
    dir
}

fn history(text: &str) -> MoveSequence {
    MoveSequence::parse(text)
}

fn sample_config() -> OpeningsConfig {
    OpeningsConfig {
        eco_json: Some(data_path("eco_small.json")),
        eco_pgn: Some(data_path("eco_sample.pgn").display().to_string()),
        ..OpeningsConfig::default()
    }
}

#[test]
fn ruy_lopez_is_identified_from_baseline() {
    let corpus = build(&[OpeningSource::Baseline]).corpus;

    let m = identify(&corpus, &history("e4 e5 Nf3 Nc6 Bb5")).unwrap();
    assert_eq!(m.record, &OpeningRecord::new("C60", "Ruy Lopez"));
    assert_eq!(m.matched_len, 5);

    let m = identify(&corpus, &["e4", "e5", "Nf3", "Nc6", "Bb5", "Nge7"]).unwrap();
    assert_eq!(m.record.code, "C60");
    assert_eq!(m.matched_len, 5);
    assert_eq!(m.history_len, 6);

    // No baseline line starts with 1. a3.
    assert!(identify(&corpus, &["a3", "e5", "c3"]).is_none());
}

#[test]
fn unknown_opening_without_matching_line() {
    let ruy_lopez = OpeningSource::Table(vec![(
        history("e4 e5 Nf3 Nc6 Bb5"),
        OpeningRecord::new("C60", "Ruy Lopez"),
    )]);
    let corpus = build(&[ruy_lopez]).corpus;

    assert!(identify(&corpus, &["d4", "d4"]).is_none());
}

#[test]
fn sample_sources_merge_behind_baseline() {
    let outcome = build_from_config(&sample_config());
    let reports = &outcome.reports;

    assert_eq!(reports.len(), 3);
    assert!(reports.iter().all(|r| r.is_loaded()), "{reports:?}");

    // "e4 e5" is already defined by the baseline.
    assert_eq!(reports[1].inserted, 9);
    assert_eq!(reports[1].duplicates, 1);
    assert_eq!(reports[2].inserted, 5);

    let corpus = &outcome.corpus;
    assert_eq!(
        corpus.get(&history("e4 e5")).unwrap(),
        &OpeningRecord::new("C20", "King's Pawn Game")
    );

    let closed = identify(corpus, &history("e4 e5 Nf3 Nc6 Bb5 a6 Ba4 Nf6 O-O Be7 Re1")).unwrap();
    assert_eq!(closed.record.code, "C84");
    assert_eq!(closed.matched_len, 10);

    let castled = identify(corpus, &history("e4 e5 Nf3 Nc6 Bb5 a6 Ba4 Nf6 O-O b5")).unwrap();
    assert_eq!(castled.record.code, "C78");
    assert_eq!(castled.matched_len, 9);

    let rio = identify_movetext(corpus, "1. e4 e5 2. Nf3 Nc6 3. Bb5 Nf6 4. O-O Nxe4 5. Re1").unwrap();
    assert_eq!(rio.record.name, "Ruy Lopez: Berlin Defense, Rio Gambit Accepted");
}

#[test]
fn external_table_never_overrides_baseline() {
    let dir = scratch_dir("override");
    let json = dir.join("eco.json");
    write(&json, r#"{"e4 e5 Nf3 Nc6 Bb5": ["X00", "Other Name"]}"#).unwrap();

    let outcome = build(&[OpeningSource::Baseline, OpeningSource::JsonFile(json)]);
    let m = identify(&outcome.corpus, &history("e4 e5 Nf3 Nc6 Bb5")).unwrap();
    assert_eq!(m.record.code, "C60");
    assert_eq!(outcome.reports[1].duplicates, 1);
    assert_eq!(outcome.reports[1].inserted, 0);

    remove_dir_all(&dir).unwrap();
}

#[test]
fn malformed_json_source_is_skipped_entirely() {
    let dir = scratch_dir("malformed-json");
    let json = dir.join("eco.json");
    write(&json, r#"{"c4 e5": ["A20", "English"], "#).unwrap();

    let outcome = build(&[OpeningSource::Baseline, OpeningSource::JsonFile(json)]);
    assert!(matches!(
        outcome.reports[1].error,
        Some(SourceError::Malformed { .. })
    ));
    assert_eq!(
        identify(&outcome.corpus, &history("c4 e5")).unwrap().record.code,
        "A10"
    );

    remove_dir_all(&dir).unwrap();
}

#[test]
fn zstd_books_load_in_sorted_glob_order() {
    let dir = scratch_dir("zstd-glob");
    let first = r#"[ECO "A00"]
[Opening "Polish Opening"]

1. b4 *
"#;
    let second = r#"[ECO "Z99"]
[Opening "Later Name"]

1. b4 *

[ECO "A00"]
[Opening "Grob Opening"]

1. g4 *
"#;
    write(dir.join("b.pgn.zst"), zstd::stream::encode_all(second.as_bytes(), 0).unwrap()).unwrap();
    write(dir.join("a.pgn.zst"), zstd::stream::encode_all(first.as_bytes(), 0).unwrap()).unwrap();

    let pattern = dir.join("*.pgn.zst").display().to_string();
    let book = PgnBookSource::new(pattern).with_compression(Compression::Zstd);
    let outcome = build(&[OpeningSource::PgnBook(book)]);

    assert_eq!(outcome.reports.len(), 2);
    assert!(outcome.reports[0].label.ends_with("a.pgn.zst"));
    assert_eq!(outcome.reports[1].duplicates, 1);
    assert_eq!(
        identify(&outcome.corpus, &["b4", "e5"]).unwrap().record.name,
        "Polish Opening"
    );
    assert_eq!(
        identify(&outcome.corpus, &["g4"]).unwrap().record.name,
        "Grob Opening"
    );

    remove_dir_all(&dir).unwrap();
}

#[test]
fn corrupt_book_file_does_not_affect_siblings() {
    let dir = scratch_dir("corrupt-zstd");
    let good = r#"[ECO "A00"]
[Opening "Grob Opening"]

1. g4 *
"#;
    write(dir.join("good.pgn.zst"), zstd::stream::encode_all(good.as_bytes(), 0).unwrap()).unwrap();
    write(dir.join("bad.pgn.zst"), b"this is not a zstd frame").unwrap();

    let pattern = dir.join("*.pgn.zst").display().to_string();
    let book = PgnBookSource::new(pattern).with_compression(Compression::Zstd);
    let outcome = build(&[OpeningSource::Baseline, OpeningSource::PgnBook(book)]);

    let bad = outcome
        .reports
        .iter()
        .find(|r| r.label.ends_with("bad.pgn.zst"))
        .unwrap();
    assert!(matches!(bad.error, Some(SourceError::Malformed { .. })));

    let good = outcome
        .reports
        .iter()
        .find(|r| r.label.ends_with("good.pgn.zst"))
        .unwrap();
    assert_eq!(good.inserted, 1);
    assert!(identify(&outcome.corpus, &["g4"]).is_some());

    remove_dir_all(&dir).unwrap();
}

#[test]
fn max_plies_caps_book_lines() {
    let book = PgnBookSource::new(data_path("eco_sample.pgn").display().to_string()).with_max_plies(2);
    let outcome = build(&[OpeningSource::PgnBook(book)]);

    // Both Ruy Lopez games collapse to "e4 e5".
    assert_eq!(outcome.corpus.len(), 4);
    assert_eq!(outcome.reports[0].duplicates, 1);
    assert!(outcome.corpus.iter().all(|(line, _)| line.len() <= 2));
}
