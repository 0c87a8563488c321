use crate::types::{MoveList, MoveSequence};
use pgn_reader::{Nag, Outcome, RawComment, RawTag, Reader, SanPlus as PgnSanPlus, Skip, Visitor};
use shakmaty::{Chess, Move, Position, san::SanPlus, uci::UciMove};
use std::borrow::Cow;
use std::fmt;
use std::io;
use std::ops::ControlFlow;

/// A token that could not be replayed from the position before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalizeError {
    /// 1-based ply of the offending token.
    pub ply: usize,
    pub token: String,
    pub reason: String,
    /// Canonical plies before the offending token.
    pub prefix: MoveSequence,
}

impl fmt::Display for CanonicalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ply {} '{}': {}", self.ply, self.token, self.reason)
    }
}

impl std::error::Error for CanonicalizeError {}

/// Replay `tokens` from the standard start position and render every ply as
/// SAN relative to the position it was played in.
///
/// Tokens may be SAN in any accepted spelling (over-disambiguated, missing
/// check suffix, `0-0`) or UCI (`e2e4`, `e7e8q`). The output uses minimal
/// disambiguation and `+`/`#` suffixes, so equal games always yield equal keys.
pub fn canonicalize<S: AsRef<str>>(tokens: &[S]) -> Result<MoveSequence, CanonicalizeError> {
    let mut pos = Chess::default();
    let mut out = MoveSequence::new();

    for (i, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        let m = match resolve_move(&pos, token) {
            Ok(m) => m,
            Err(reason) => {
                return Err(CanonicalizeError {
                    ply: i + 1,
                    token: token.to_string(),
                    reason,
                    prefix: out,
                });
            }
        };
        let san = SanPlus::from_move_and_play_unchecked(&mut pos, m);
        out.push(san.to_string());
    }

    Ok(out)
}

/// Like [`canonicalize`] but stops at the first unplayable token and keeps
/// the legal prefix.
pub fn canonicalize_prefix<S: AsRef<str>>(tokens: &[S]) -> MoveSequence {
    match canonicalize(tokens) {
        Ok(line) => line,
        Err(err) => err.prefix,
    }
}

/// Rewrite zero-style castling (`0-0`, `0-0-0+`) to the letter form the SAN
/// parser accepts. Other tokens pass through untouched.
fn normalize_castling(token: &str) -> Cow<'_, str> {
    let body = token.trim_end_matches(['+', '#']);
    let suffix = &token[body.len()..];
    match body {
        "0-0" => Cow::Owned(format!("O-O{suffix}")),
        "0-0-0" => Cow::Owned(format!("O-O-O{suffix}")),
        _ => Cow::Borrowed(token),
    }
}

fn resolve_move(pos: &Chess, token: &str) -> Result<Move, String> {
    let token = normalize_castling(token);
    let token = token.as_ref();
    let san_err = match token.parse::<SanPlus>() {
        Ok(san) => match san.san.to_move(pos) {
            Ok(m) => return Ok(m),
            Err(e) => e.to_string(),
        },
        Err(e) => e.to_string(),
    };

    match token.parse::<UciMove>() {
        Ok(uci) => uci.to_move(pos).map_err(|e| e.to_string()),
        Err(_) => Err(san_err),
    }
}

/// Mainline SAN tokens of PGN movetext, with comments, NAGs and variations
/// dropped. Tokens are returned as written; nothing is replayed here.
///
/// `None` when the game starts from a `[FEN]`/`[SetUp "1"]` position, since
/// its moves cannot be replayed from the standard start.
pub(crate) fn parse_movetext_mainline(movetext: &str) -> Option<MoveList> {
    if movetext.trim().is_empty() {
        return Some(MoveList::new());
    }

    let mut reader = Reader::new(io::Cursor::new(movetext.as_bytes()));
    let mut visitor = MainlineVisitor::default();

    // A read error keeps whatever mainline was collected before it.
    let _ = reader.read_game(&mut visitor);
    if visitor.custom_start {
        None
    } else {
        Some(visitor.sans)
    }
}

#[derive(Default)]
struct MainlineVisitor {
    sans: MoveList,
    custom_start: bool,
}

impl Visitor for MainlineVisitor {
    type Tags = ();
    type Movetext = ();
    type Output = ();

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        self.sans.clear();
        self.custom_start = false;
        ControlFlow::Continue(())
    }

    fn tag(
        &mut self,
        _: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        match key {
            b"FEN" => self.custom_start = true,
            b"SetUp" if value.as_bytes() == b"1" => self.custom_start = true,
            _ => {}
        }
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, _tags: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        ControlFlow::Continue(())
    }

    fn san(
        &mut self,
        _movetext: &mut Self::Movetext,
        san_plus: PgnSanPlus,
    ) -> ControlFlow<Self::Output> {
        self.sans.push(san_plus.to_string());
        ControlFlow::Continue(())
    }

    crate::pgn_visitor_skip_variations!();

    fn outcome(
        &mut self,
        _movetext: &mut Self::Movetext,
        _outcome: Outcome,
    ) -> ControlFlow<Self::Output> {
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, _movetext: Self::Movetext) -> Self::Output {}
}
