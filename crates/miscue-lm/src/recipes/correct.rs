// Correct paths: the backbone of the model.

use miscue_core::{Category, WeightTable};
use miscue_fst::{FstError, Graph, WordChain};

use super::PathRecipe;

/// One arc per prompt word from its start to its final state, consuming and
/// emitting the word. The last word's final state becomes accepting with the
/// final-state cost.
pub struct CorrectPaths;

impl PathRecipe for CorrectPaths {
    fn category(&self) -> Category {
        Category::Correct
    }

    fn add_paths(
        &self,
        graph: &mut Graph,
        chain: &WordChain,
        weights: &WeightTable,
    ) -> Result<usize, FstError> {
        let last = chain.current()?;
        let mut added = 0;
        for word in chain.words() {
            let inserted = graph.add_arc(
                word.start,
                word.final_state,
                word.label(),
                word.label(),
                weights.relative(Category::Correct),
            );
            added += usize::from(inserted);
        }
        graph.add_final_state(last.final_state, weights.final_cost())?;
        Ok(added + 1)
    }
}
