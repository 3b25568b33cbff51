// Miscue path recipes.
//
// Each recipe walks the word chain and adds one category of paths to the
// graph. Recipes only go through `Graph::add_arc` / `Graph::add_final_state`,
// so the determinism guard applies to all of them. Where two recipes want an
// arc with the same input label at the same state, the one that runs first
// wins; the order in `RecipeSet` is therefore part of the model.
//
// Architecture:
//   - `correct`: the backbone, one arc per prompt word, plus the final state
//   - `rubbish`: noise self-loops
//   - `skip`: jump forward one word
//   - `repeat`: jump backward one word
//   - `jump`: jump forward / backward over several words (opt-in)
//   - `premature_end`: accept before the end of the prompt (opt-in)

pub mod correct;
pub mod jump;
pub mod premature_end;
pub mod repeat;
pub mod rubbish;
pub mod skip;

use miscue_core::{Category, Label, Weight, WeightTable};
use miscue_fst::{FstError, Graph, StateId, Word, WordChain};

use crate::LmError;
use crate::config::LmConfig;

pub use correct::CorrectPaths;
pub use jump::{JumpBackwardPaths, JumpForwardPaths};
pub use premature_end::PrematureEndPaths;
pub use repeat::RepeatPaths;
pub use rubbish::RubbishPaths;
pub use skip::SkipPaths;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// A recipe that adds one category of miscue paths.
pub trait PathRecipe {
    /// The weight-table slot this recipe draws from. A recipe whose category
    /// has weight zero is not run.
    fn category(&self) -> Category;

    /// Add this recipe's paths. Returns the number of entries (arcs and final
    /// markers) actually inserted.
    fn add_paths(
        &self,
        graph: &mut Graph,
        chain: &WordChain,
        weights: &WeightTable,
    ) -> Result<usize, FstError>;
}

// ---------------------------------------------------------------------------
// RecipeSet
// ---------------------------------------------------------------------------

/// An ordered list of recipes, run once each over the same graph.
pub struct RecipeSet {
    recipes: Vec<Box<dyn PathRecipe>>,
}

impl RecipeSet {
    /// An empty set. Recipes run in the order they are pushed.
    pub fn new() -> Self {
        Self {
            recipes: Vec::new(),
        }
    }

    /// Correct, rubbish, skip and repeat paths, in that order.
    pub fn core() -> Self {
        let mut set = Self::new();
        set.push(Box::new(CorrectPaths));
        set.push(Box::new(RubbishPaths));
        set.push(Box::new(SkipPaths));
        set.push(Box::new(RepeatPaths));
        set
    }

    /// The core recipes followed by the extensions enabled in `config`, in
    /// the fixed order jump-forward, jump-backward, premature-end.
    pub fn from_config(config: &LmConfig) -> Result<Self, LmError> {
        if config.is_extension_enabled(Category::Truncation) {
            // No special symbol exists for a truncated word.
            return Err(LmError::UnsupportedCategory(Category::Truncation));
        }
        let mut set = Self::core();
        if config.is_extension_enabled(Category::JumpForward) {
            set.push(Box::new(JumpForwardPaths::new(config.jump_span)));
        }
        if config.is_extension_enabled(Category::JumpBackward) {
            set.push(Box::new(JumpBackwardPaths::new(config.jump_span)));
        }
        if config.is_extension_enabled(Category::PrematureEnd) {
            set.push(Box::new(PrematureEndPaths));
        }
        Ok(set)
    }

    pub fn push(&mut self, recipe: Box<dyn PathRecipe>) {
        self.recipes.push(recipe);
    }

    /// Categories of the recipes, in run order.
    pub fn categories(&self) -> Vec<Category> {
        self.recipes.iter().map(|r| r.category()).collect()
    }

    /// Run every recipe once, in order.
    pub fn apply(
        &self,
        graph: &mut Graph,
        chain: &WordChain,
        weights: &WeightTable,
    ) -> Result<(), FstError> {
        for recipe in &self.recipes {
            let category = recipe.category();
            if !weights.is_enabled(category) {
                log::debug!("{category}: weight is zero, no paths added");
                continue;
            }
            let added = recipe.add_paths(graph, chain, weights)?;
            log::debug!("{category}: {added} entries added");
        }
        Ok(())
    }
}

impl Default for RecipeSet {
    fn default() -> Self {
        Self::core()
    }
}

// ---------------------------------------------------------------------------
// Shared helper
// ---------------------------------------------------------------------------

/// Add a path from `from` that consumes `target`'s label and lands after it,
/// recording `skipped` skip markers on the way.
///
/// The first arc carries `weight` and emits one skip marker; `skipped - 1`
/// epsilon arcs emit the rest; a last epsilon arc emits the target word. The
/// intermediate states are fresh, so only the first arc can be suppressed by
/// the determinism guard. If it would be, nothing is added and no state is
/// allocated.
///
/// Returns the number of arcs inserted.
pub(crate) fn add_skip_path(
    graph: &mut Graph,
    from: StateId,
    target: &Word,
    skipped: usize,
    weight: Weight,
    weights: &WeightTable,
) -> usize {
    let label = target.label();
    if graph.has_equivalent_arc(from, &label) {
        log::trace!("state {from}: skip path on {label} suppressed");
        return 0;
    }
    let mut state = graph.new_state();
    graph.add_arc(from, state, label, Label::SKIP, weight);
    let mut added = 1;
    for _ in 1..skipped {
        let next = graph.new_state();
        graph.add_arc(
            state,
            next,
            Label::EPSILON,
            Label::SKIP,
            weights.relative(Category::Correct),
        );
        state = next;
        added += 1;
    }
    graph.add_arc(
        state,
        target.final_state,
        Label::EPSILON,
        target.label(),
        weights.relative(Category::Correct),
    );
    added + 1
}
