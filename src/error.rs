use std::fmt;

/// A whole source could not be merged into the corpus.
///
/// Both variants are non-fatal: the source is skipped and construction
/// continues with the remaining sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// File missing or unreadable, or a glob pattern matched nothing.
    Unavailable { source: String, reason: String },
    /// Content is structurally invalid for this kind of source.
    Malformed { source: String, reason: String },
}

impl SourceError {
    pub fn unavailable(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            source: source.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            source: source.into(),
            reason: reason.into(),
        }
    }

    pub fn source_label(&self) -> &str {
        match self {
            Self::Unavailable { source, .. } | Self::Malformed { source, .. } => source,
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { source, reason } => {
                write!(f, "source unavailable: {source}: {reason}")
            }
            Self::Malformed { source, reason } => {
                write!(f, "source malformed: {source}: {reason}")
            }
        }
    }
}

impl std::error::Error for SourceError {}

/// One entry of an otherwise valid source was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryError {
    /// Where the entry lives inside its source, e.g. `key 'e4 e5'` or `game 12`.
    pub locator: String,
    pub reason: String,
}

impl EntryError {
    pub fn new(locator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.locator, self.reason)
    }
}

impl std::error::Error for EntryError {}

/// Collects skipped-entry messages for one source.
///
/// Counts every entry but keeps only the first few messages so a large,
/// mostly broken book does not produce an unbounded log line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDiagnostics {
    count: usize,
    messages: Vec<String>,
}

impl EntryDiagnostics {
    pub const MAX_MESSAGES: usize = 8;

    pub fn push(&mut self, error: EntryError) {
        self.count += 1;
        if self.messages.len() < Self::MAX_MESSAGES {
            self.messages.push(error.to_string());
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Single-line summary joined with `; `, or `None` when nothing was skipped.
    pub fn summary(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut summary = self.messages.join("; ");
        let hidden = self.count - self.messages.len();
        if hidden > 0 {
            summary.push_str(&format!("; ... and {hidden} more"));
        }
        Some(summary)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub reason: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.key, self.reason)
    }
}

impl std::error::Error for ConfigError {}
