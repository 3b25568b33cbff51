// Arc labels: prompt words and the special non-word symbols.

use std::fmt;

/// Surface token for the epsilon symbol (consumes / emits nothing).
pub const EPSILON: &str = "<eps>";

/// Surface token for speech-like noise, hesitations and fillers.
pub const RUBBISH: &str = "[RUB]";

/// Surface token recording that a prompt word was skipped.
pub const SKIP: &str = "[SKP]";

/// The fixed set of non-word symbols used on miscue paths.
///
/// These are disjoint from word labels: the word chain refuses prompt tokens
/// whose text equals one of the surface tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Special {
    Epsilon,
    Rubbish,
    Skip,
}

impl Special {
    /// All special symbols, in symbol-table order.
    pub const ALL: [Special; 3] = [Special::Epsilon, Special::Rubbish, Special::Skip];

    /// The surface token written to the text format.
    pub fn token(self) -> &'static str {
        match self {
            Special::Epsilon => EPSILON,
            Special::Rubbish => RUBBISH,
            Special::Skip => SKIP,
        }
    }

    /// Look up a special symbol by its surface token.
    pub fn from_token(token: &str) -> Option<Special> {
        Self::ALL.into_iter().find(|s| s.token() == token)
    }
}

/// An input or output label on an arc.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// A prompt word, as written or as its integer symbol code.
    Word(String),
    /// One of the special non-word symbols.
    Special(Special),
}

impl Label {
    pub const EPSILON: Label = Label::Special(Special::Epsilon);
    pub const RUBBISH: Label = Label::Special(Special::Rubbish);
    pub const SKIP: Label = Label::Special(Special::Skip);

    /// Create a word label.
    pub fn word(text: impl Into<String>) -> Self {
        Label::Word(text.into())
    }

    /// The word text, or `None` for special symbols.
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Label::Word(w) => Some(w),
            Label::Special(_) => None,
        }
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Label::Special(Special::Epsilon))
    }

    /// The text written to the text format.
    pub fn as_str(&self) -> &str {
        match self {
            Label::Word(w) => w,
            Label::Special(s) => s.token(),
        }
    }
}

impl From<Special> for Label {
    fn from(special: Special) -> Self {
        Label::Special(special)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
