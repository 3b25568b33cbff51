// Word chain: the prompt as a linear backbone of states through the graph.

use miscue_core::{Label, Special};

use crate::FstError;
use crate::graph::{Graph, StateId};

/// One token of the prompt and the states around it.
///
/// `start` is the state entered before the word is read, `final_state` the
/// state reached after reading it correctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub start: StateId,
    pub final_state: StateId,
}

impl Word {
    /// The word as an arc label.
    pub fn label(&self) -> Label {
        Label::Word(self.text.clone())
    }
}

/// Ordered, append-only sequence of prompt words.
///
/// Consecutive words share a state: `words[i].final_state == words[i + 1].start`.
/// The first word starts at the graph's initial state.
#[derive(Debug, Clone, Default)]
pub struct WordChain {
    words: Vec<Word>,
}

impl WordChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a word, allocating its final state in `graph`.
    ///
    /// No arc is added between the word's start and final states; that is
    /// the job of the correct-path recipe, which knows the weight.
    pub fn append(&mut self, graph: &mut Graph, text: impl Into<String>) -> Result<&Word, FstError> {
        let text = text.into();
        if text.is_empty() || text.chars().any(char::is_whitespace) {
            return Err(FstError::InvalidLabel(text));
        }
        if Special::from_token(&text).is_some() {
            return Err(FstError::ReservedLabel(text));
        }
        let start = match self.words.last() {
            Some(previous) => previous.final_state,
            None => graph.initial(),
        };
        let final_state = graph.new_state();
        self.words.push(Word {
            text,
            start,
            final_state,
        });
        self.current()
    }

    /// Append every label of an already tokenised sequence.
    pub fn extend<I>(&mut self, graph: &mut Graph, labels: I) -> Result<(), FstError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for label in labels {
            self.append(graph, label)?;
        }
        Ok(())
    }

    /// The most recently appended word.
    pub fn current(&self) -> Result<&Word, FstError> {
        self.words.last().ok_or(FstError::UninitializedChain)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Adjacent `(word, next_word)` pairs, i.e. all but the last word with
    /// their successors.
    pub fn pairs(&self) -> impl Iterator<Item = (&Word, &Word)> {
        self.words.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
