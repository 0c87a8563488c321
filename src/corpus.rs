use crate::types::{MoveSequence, OpeningMatch, OpeningRecord};
use std::collections::BTreeMap;

/// Outcome of [`Corpus::insert_if_absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    Inserted,
    /// The key already carries a record; the existing record is kept.
    Duplicate,
    /// Zero-length keys never enter the corpus.
    EmptyKey,
}

#[derive(Debug, Default)]
struct Node {
    children: BTreeMap<String, usize>,
    record: Option<OpeningRecord>,
}

/// Opening lines indexed as a prefix tree over SAN tokens.
///
/// Each node is one ply; a node carrying a record marks the end of a known
/// line. Keys are write-once: the first record stored for a line is never
/// replaced.
#[derive(Debug)]
pub struct Corpus {
    nodes: Vec<Node>,
    len: usize,
}

const ROOT: usize = 0;

impl Default for Corpus {
    fn default() -> Self {
        Self::new()
    }
}

impl Corpus {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            len: 0,
        }
    }

    /// Number of lines carrying a record.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store `record` under `key` unless the key already has one.
    pub fn insert_if_absent<S: AsRef<str>>(&mut self, key: &[S], record: OpeningRecord) -> Insertion {
        if key.is_empty() {
            return Insertion::EmptyKey;
        }

        let mut idx = ROOT;
        for san in key {
            let san = san.as_ref();
            idx = match self.nodes[idx].children.get(san) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[idx].children.insert(san.to_string(), child);
                    child
                }
            };
        }

        let slot = &mut self.nodes[idx].record;
        if slot.is_some() {
            return Insertion::Duplicate;
        }
        *slot = Some(record);
        self.len += 1;
        Insertion::Inserted
    }

    /// Record stored for exactly `key`.
    pub fn get<S: AsRef<str>>(&self, key: &[S]) -> Option<&OpeningRecord> {
        let mut idx = ROOT;
        for san in key {
            idx = *self.nodes[idx].children.get(san.as_ref())?;
        }
        self.nodes[idx].record.as_ref()
    }

    /// Deepest line that is an element-wise prefix of `history`.
    ///
    /// Walks one ply per level, so the cost is bounded by the history length
    /// rather than the corpus size. Two distinct keys of equal length cannot
    /// both prefix the same history, so the result is unique.
    pub fn longest_prefix<S: AsRef<str>>(&self, history: &[S]) -> Option<OpeningMatch<'_>> {
        let mut best: Option<(&OpeningRecord, usize)> = None;
        let mut idx = ROOT;

        for (depth, san) in history.iter().enumerate() {
            let Some(&child) = self.nodes[idx].children.get(san.as_ref()) else {
                break;
            };
            idx = child;
            if let Some(record) = &self.nodes[idx].record {
                best = Some((record, depth + 1));
            }
        }

        best.map(|(record, matched_len)| OpeningMatch {
            record,
            matched_len,
            history_len: history.len(),
        })
    }

    /// All lines with their records, in lexicographic token order.
    pub fn iter(&self) -> impl Iterator<Item = (MoveSequence, &OpeningRecord)> + '_ {
        let mut out = Vec::with_capacity(self.len);
        let mut path = MoveSequence::new();
        self.collect_lines(ROOT, &mut path, &mut out);
        out.into_iter()
    }

    fn collect_lines<'a>(
        &'a self,
        idx: usize,
        path: &mut MoveSequence,
        out: &mut Vec<(MoveSequence, &'a OpeningRecord)>,
    ) {
        let node = &self.nodes[idx];
        if let Some(record) = &node.record {
            out.push((path.clone(), record));
        }
        for (san, &child) in &node.children {
            path.push(san.as_str());
            self.collect_lines(child, path, out);
            path.truncate(path.len() - 1);
        }
    }
}
