// Miscue categories, the relative weight table, and cost conversion.
//
// Weights in the table are relative magnitudes (10:1 reads better than
// 0.9091:0.0909). They are normalised per source state when the automaton is
// written out, then turned into log-semiring costs: cost = -ln(probability).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::WeightError;

/// A class of reading behaviour, each with its own slot in the weight table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// The correct next word.
    Correct,
    /// Speech-like noises, hesitations, etc.
    Rubbish,
    /// Jump forward one word.
    Skip,
    /// Jump backward one word.
    Repeat,
    /// Jump forward multiple words.
    JumpForward,
    /// Jump backward multiple words.
    JumpBackward,
    /// An incomplete pronunciation.
    Truncation,
    /// Unexpected end of utterance.
    PrematureEnd,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Correct,
        Category::Rubbish,
        Category::Skip,
        Category::Repeat,
        Category::JumpForward,
        Category::JumpBackward,
        Category::Truncation,
        Category::PrematureEnd,
    ];

    /// Kebab-case name, as used in configuration files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Category::Correct => "correct",
            Category::Rubbish => "rubbish",
            Category::Skip => "skip",
            Category::Repeat => "repeat",
            Category::JumpForward => "jump-forward",
            Category::JumpBackward => "jump-backward",
            Category::Truncation => "truncation",
            Category::PrematureEnd => "premature-end",
        }
    }

    pub fn from_name(name: &str) -> Option<Category> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The weight attached to an arc or a final-state marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Weight {
    /// A relative magnitude, normalised against the other relative weights
    /// leaving the same state.
    Relative(f64),
    /// An absolute cost, written out unchanged.
    Cost(f64),
}

impl Weight {
    /// The relative magnitude, or `None` for an absolute cost.
    pub fn relative(self) -> Option<f64> {
        match self {
            Weight::Relative(w) => Some(w),
            Weight::Cost(_) => None,
        }
    }
}

/// Relative weights for every miscue category, plus the absolute final-state cost.
///
/// A category with weight `0` is disabled: no paths are generated for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeightTable {
    pub correct: f64,
    pub rubbish: f64,
    pub skip: f64,
    pub repeat: f64,
    pub jump_forward: f64,
    pub jump_backward: f64,
    pub truncation: f64,
    pub premature_end: f64,
    /// Cost of stopping at the end of the prompt. This is an actual cost,
    /// not a relative weight.
    pub final_state: f64,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            correct: 100.0,
            rubbish: 5.0,
            skip: 10.0,
            repeat: 30.0,
            jump_forward: 5.0,
            jump_backward: 5.0,
            truncation: 5.0,
            premature_end: 3.0,
            final_state: 0.0,
        }
    }
}

impl WeightTable {
    /// The relative weight of `category`.
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Correct => self.correct,
            Category::Rubbish => self.rubbish,
            Category::Skip => self.skip,
            Category::Repeat => self.repeat,
            Category::JumpForward => self.jump_forward,
            Category::JumpBackward => self.jump_backward,
            Category::Truncation => self.truncation,
            Category::PrematureEnd => self.premature_end,
        }
    }

    /// `Weight::Relative` for `category`.
    pub fn relative(&self, category: Category) -> Weight {
        Weight::Relative(self.get(category))
    }

    /// The cost of accepting at the end of the prompt.
    pub fn final_cost(&self) -> Weight {
        Weight::Cost(self.final_state)
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        self.get(category) > 0.0
    }

    /// Check that every weight is finite and non-negative, and that the
    /// correct path has a non-zero weight.
    pub fn validate(&self) -> Result<(), WeightError> {
        for category in Category::ALL {
            let value = self.get(category);
            if !value.is_finite() {
                return Err(WeightError::NotFinite {
                    category: category.name(),
                });
            }
            if value < 0.0 {
                return Err(WeightError::Negative {
                    category: category.name(),
                    value,
                });
            }
        }
        if !self.final_state.is_finite() {
            return Err(WeightError::NotFinite {
                category: "final-state",
            });
        }
        if self.correct == 0.0 {
            return Err(WeightError::ZeroCorrect);
        }
        Ok(())
    }
}

/// Convert a probability to a log-semiring cost.
///
/// Probability 1 maps to cost `0` (never `-0`).
pub fn probability_to_cost(probability: f64) -> f64 {
    let cost = -probability.ln();
    if cost == 0.0 { 0.0 } else { cost }
}

/// Convert a relative weight to a cost, given the sum of all relative weights
/// competing at the same state.
pub fn relative_to_cost(weight: f64, total: f64) -> f64 {
    probability_to_cost(weight / total)
}
