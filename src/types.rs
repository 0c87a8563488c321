use smallvec::SmallVec;
use std::fmt;
use std::ops::Deref;

pub(crate) type MoveList = SmallVec<[String; 16]>;

const RESULT_MARKERS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// Moves from the start of a game, one SAN token per ply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoveSequence(MoveList);

impl MoveSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split whitespace-joined move text into plies.
    ///
    /// Move numbers (`1.`, `3...`) and result markers are dropped, and a move
    /// glued to its number (`12.e4`) keeps only the move. Tokens are not
    /// checked for legality; see [`crate::moves::canonicalize`].
    pub fn parse(text: &str) -> Self {
        text.split_whitespace()
            .filter_map(|token| {
                let token = match token.rfind('.') {
                    Some(idx) => &token[idx + 1..],
                    None => token,
                };
                if token.is_empty() || RESULT_MARKERS.contains(&token) {
                    None
                } else {
                    Some(token.to_string())
                }
            })
            .collect()
    }

    pub fn push(&mut self, san: impl Into<String>) {
        self.0.push(san.into());
    }

    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Deref for MoveSequence {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for MoveSequence {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<&[&str]> for MoveSequence {
    fn from(moves: &[&str]) -> Self {
        moves.iter().copied().collect()
    }
}

impl fmt::Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, san) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(san)?;
        }
        Ok(())
    }
}

/// Classification of an opening line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpeningRecord {
    /// ECO code, e.g. `C60`.
    pub code: String,
    pub name: String,
}

impl OpeningRecord {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Trim both fields and reject the record if either ends up empty.
    pub(crate) fn validated(code: &str, name: &str) -> Result<Self, String> {
        let code = code.trim();
        let name = name.trim();
        if code.is_empty() {
            return Err("empty opening code".to_string());
        }
        if name.is_empty() {
            return Err("empty opening name".to_string());
        }
        Ok(Self::new(code, name))
    }
}

impl fmt::Display for OpeningRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// Longest corpus line that prefixes a queried history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningMatch<'c> {
    pub record: &'c OpeningRecord,
    /// Plies of the matched corpus key.
    pub matched_len: usize,
    /// Plies of the queried history.
    pub history_len: usize,
}

impl OpeningMatch<'_> {
    /// True when the history ends exactly where the matched line ends.
    pub fn is_exact(&self) -> bool {
        self.matched_len == self.history_len
    }

    /// Plies played after leaving the matched line.
    pub fn plies_beyond(&self) -> usize {
        self.history_len.saturating_sub(self.matched_len)
    }
}
