use crate::corpus::Corpus;
use crate::moves::{canonicalize_prefix, parse_movetext_mainline};
use crate::types::OpeningMatch;

/// Known opening whose line is the longest prefix of `history`.
///
/// `history` must already be in canonical per-ply SAN. `None` means the
/// opening is unknown; it is not an error.
pub fn identify<'c, S: AsRef<str>>(corpus: &'c Corpus, history: &[S]) -> Option<OpeningMatch<'c>> {
    corpus.longest_prefix(history)
}

/// Identify the opening of PGN movetext.
///
/// Comments, NAGs and variations are ignored. Moves are replayed and
/// re-rendered as canonical SAN; an illegal move ends the history, so only
/// the legal prefix is matched and reported in `history_len`. Games set up
/// from a `[FEN]` position are never matched.
pub fn identify_movetext<'c>(corpus: &'c Corpus, movetext: &str) -> Option<OpeningMatch<'c>> {
    let sans = parse_movetext_mainline(movetext)?;
    let history = canonicalize_prefix(&sans);
    identify(corpus, &history)
}
