// Homophone groups: words that the automaton treats as the same input label.

use std::io::BufRead;
use std::path::Path;

use hashbrown::{HashMap, HashSet};

use crate::FstError;

/// Lookup from a word to the set of its homophones.
///
/// Each line of the source text is one group of mutual homophones, words
/// separated by whitespace. A word is a member of its own group. A word that
/// appears on several lines collects the union of all of them, so the
/// relation is symmetric within a line but not closed transitively across
/// lines.
#[derive(Debug, Clone, Default)]
pub struct Homophones {
    groups: HashMap<String, HashSet<String>>,
    empty: HashSet<String>,
}

impl Homophones {
    /// An index with no known homophones.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse homophone groups from text, one group per line.
    pub fn parse(text: &str) -> Self {
        let mut index = Self::new();
        for line in text.lines() {
            index.add_group(line);
        }
        index
    }

    /// Read homophone groups from a buffered reader.
    ///
    /// Lines that are not valid UTF-8 are skipped with a warning; only a
    /// failing read is an error.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, FstError> {
        let mut index = Self::new();
        for (number, line) in reader.split(b'\n').enumerate() {
            index.add_raw_group(number + 1, &line?);
        }
        Ok(index)
    }

    /// Load homophone groups from `path`. `None` yields an empty index.
    ///
    /// A file that cannot be opened or read is an error. Malformed lines in
    /// a readable file are skipped.
    pub fn load(path: Option<&Path>) -> Result<Self, FstError> {
        let Some(path) = path else {
            return Ok(Self::new());
        };
        let bytes = std::fs::read(path).map_err(|source| FstError::HomophoneFile {
            path: path.to_path_buf(),
            source,
        })?;
        let mut index = Self::new();
        for (number, line) in bytes.split(|&b| b == b'\n').enumerate() {
            index.add_raw_group(number + 1, line);
        }
        Ok(index)
    }

    fn add_raw_group(&mut self, number: usize, line: &[u8]) {
        match std::str::from_utf8(line) {
            Ok(line) => self.add_group(line),
            Err(e) => log::warn!("homophone line {number} skipped: {e}"),
        }
    }

    fn add_group(&mut self, line: &str) {
        let words: Vec<&str> = line.split_whitespace().collect();
        for &word in &words {
            let entry = self.groups.entry(word.to_string()).or_default();
            entry.extend(words.iter().map(|w| w.to_string()));
        }
    }

    /// All homophones of `label`, itself included if it belongs to any group.
    /// Unknown labels yield the empty set.
    pub fn lookup(&self, label: &str) -> &HashSet<String> {
        self.groups.get(label).unwrap_or(&self.empty)
    }

    /// `true` if `a` and `b` are the same word or `b` is a homophone of `a`.
    pub fn are_homophones(&self, a: &str, b: &str) -> bool {
        a == b || self.lookup(a).contains(b)
    }

    /// Number of words that belong to at least one group.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
