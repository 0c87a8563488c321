//! Curated opening lines shipped with the crate.
//!
//! Lines are written in canonical SAN so they can be inserted without replay.
//! They always take precedence over external tables and books.

use crate::types::{MoveSequence, OpeningRecord};

/// `(line, ECO code, name)`.
pub const BASELINE_OPENINGS: &[(&str, &str, &str)] = &[
    // Flank and irregular first moves
    ("c4", "A10", "English Opening"),
    ("Nf3", "A04", "Zukertort Opening"),
    ("f4", "A02", "Bird's Opening"),
    ("b3", "A01", "Nimzo-Larsen Attack"),
    ("g3", "A00", "Hungarian Opening"),
    // 1. e4
    ("e4", "B00", "King's Pawn Opening"),
    ("e4 g6", "B06", "Modern Defense"),
    ("e4 d6", "B07", "Pirc Defense"),
    ("e4 d6 d4 Nf6 Nc3 g6", "B07", "Pirc Defense: Main Line"),
    ("e4 Nf6", "B02", "Alekhine Defense"),
    ("e4 d5", "B01", "Scandinavian Defense"),
    ("e4 d5 exd5 Qxd5 Nc3 Qa5", "B01", "Scandinavian Defense: Main Line"),
    ("e4 c6", "B10", "Caro-Kann Defense"),
    ("e4 c6 d4 d5 e5", "B12", "Caro-Kann Defense: Advance Variation"),
    ("e4 c6 d4 d5 Nc3 dxe4 Nxe4", "B15", "Caro-Kann Defense: Main Line"),
    ("e4 e6", "C00", "French Defense"),
    ("e4 e6 d4 d5 e5", "C02", "French Defense: Advance Variation"),
    ("e4 e6 d4 d5 Nd2", "C03", "French Defense: Tarrasch Variation"),
    ("e4 e6 d4 d5 Nc3 Bb4", "C15", "French Defense: Winawer Variation"),
    ("e4 c5", "B20", "Sicilian Defense"),
    ("e4 c5 c3", "B22", "Sicilian Defense: Alapin Variation"),
    ("e4 c5 d4 cxd4 c3", "B21", "Sicilian Defense: Smith-Morra Gambit"),
    ("e4 c5 Nc3", "B23", "Sicilian Defense: Closed"),
    ("e4 c5 Nf3 d6 d4 cxd4 Nxd4 Nf6 Nc3 a6", "B90", "Sicilian Defense: Najdorf Variation"),
    ("e4 c5 Nf3 d6 d4 cxd4 Nxd4 Nf6 Nc3 g6", "B70", "Sicilian Defense: Dragon Variation"),
    ("e4 c5 Nf3 Nc6 d4 cxd4 Nxd4 Nf6 Nc3 e5", "B33", "Sicilian Defense: Sveshnikov Variation"),
    ("e4 c5 Nf3 e6 d4 cxd4 Nxd4 a6", "B41", "Sicilian Defense: Kan Variation"),
    // 1. e4 e5
    ("e4 e5", "C20", "King's Pawn Game"),
    ("e4 e5 f4", "C30", "King's Gambit"),
    ("e4 e5 f4 exf4", "C33", "King's Gambit Accepted"),
    ("e4 e5 Nc3", "C25", "Vienna Game"),
    ("e4 e5 Bc4", "C23", "Bishop's Opening"),
    ("e4 e5 Nf3", "C40", "King's Knight Opening"),
    ("e4 e5 Nf3 d6", "C41", "Philidor Defense"),
    ("e4 e5 Nf3 Nf6", "C42", "Petrov's Defense"),
    ("e4 e5 Nf3 Nc6", "C44", "King's Knight Opening: Normal Variation"),
    ("e4 e5 Nf3 Nc6 d4", "C44", "Scotch Game"),
    ("e4 e5 Nf3 Nc6 d4 exd4 Nxd4", "C45", "Scotch Game"),
    ("e4 e5 Nf3 Nc6 Nc3 Nf6", "C47", "Four Knights Game"),
    ("e4 e5 Nf3 Nc6 Bc4", "C50", "Italian Game"),
    ("e4 e5 Nf3 Nc6 Bc4 Bc5", "C50", "Italian Game: Giuoco Piano"),
    ("e4 e5 Nf3 Nc6 Bc4 Bc5 b4", "C51", "Italian Game: Evans Gambit"),
    ("e4 e5 Nf3 Nc6 Bc4 Nf6", "C55", "Italian Game: Two Knights Defense"),
    ("e4 e5 Nf3 Nc6 Bb5", "C60", "Ruy Lopez"),
    ("e4 e5 Nf3 Nc6 Bb5 Nf6", "C65", "Ruy Lopez: Berlin Defense"),
    ("e4 e5 Nf3 Nc6 Bb5 a6", "C70", "Ruy Lopez: Morphy Defense"),
    ("e4 e5 Nf3 Nc6 Bb5 a6 Bxc6", "C68", "Ruy Lopez: Exchange Variation"),
    ("e4 e5 Nf3 Nc6 Bb5 a6 Ba4 Nf6 O-O Be7", "C84", "Ruy Lopez: Closed"),
    // 1. d4
    ("d4", "A40", "Queen's Pawn Opening"),
    ("d4 f5", "A80", "Dutch Defense"),
    ("d4 d5", "D00", "Queen's Pawn Game"),
    ("d4 d5 Nf3 Nf6 Bf4", "D02", "Queen's Pawn Game: London System"),
    ("d4 d5 c4", "D06", "Queen's Gambit"),
    ("d4 d5 c4 dxc4", "D20", "Queen's Gambit Accepted"),
    ("d4 d5 c4 c6", "D10", "Slav Defense"),
    ("d4 d5 c4 e6", "D30", "Queen's Gambit Declined"),
    ("d4 d5 c4 e6 Nc3 Nf6 Bg5", "D50", "Queen's Gambit Declined: Modern Variation"),
    ("d4 Nf6", "A45", "Indian Defense"),
    ("d4 Nf6 c4 c5", "A56", "Benoni Defense"),
    ("d4 Nf6 c4 c5 d5 b5", "A57", "Benko Gambit"),
    ("d4 Nf6 c4 e6 g3", "E00", "Catalan Opening"),
    ("d4 Nf6 c4 e6 Nf3 b6", "E12", "Queen's Indian Defense"),
    ("d4 Nf6 c4 e6 Nf3 Bb4+", "E11", "Bogo-Indian Defense"),
    ("d4 Nf6 c4 e6 Nc3 Bb4", "E20", "Nimzo-Indian Defense"),
    ("d4 Nf6 c4 g6 Nc3 d5", "D80", "Grünfeld Defense"),
    ("d4 Nf6 c4 g6 Nc3 Bg7 e4 d6", "E70", "King's Indian Defense"),
];

/// Baseline table as `(line, record)` pairs, in table order.
pub fn baseline_entries() -> impl Iterator<Item = (MoveSequence, OpeningRecord)> {
    BASELINE_OPENINGS
        .iter()
        .map(|&(line, code, name)| (MoveSequence::parse(line), OpeningRecord::new(code, name)))
}
