// Repeat paths: the reader re-reads the word just finished.

use miscue_core::{Category, WeightTable};
use miscue_fst::{FstError, Graph, WordChain};

use super::PathRecipe;

/// A self-loop at `word.final_state` consuming and emitting `word`, for every
/// word followed by a different word, and always for the last word.
///
/// As with skips, a run of identical words gets a single loop at the end of
/// the run, which covers any number of repetitions.
pub struct RepeatPaths;

impl PathRecipe for RepeatPaths {
    fn category(&self) -> Category {
        Category::Repeat
    }

    fn add_paths(
        &self,
        graph: &mut Graph,
        chain: &WordChain,
        weights: &WeightTable,
    ) -> Result<usize, FstError> {
        let last = chain.current()?;
        let weight = weights.relative(Category::Repeat);
        let words = chain
            .pairs()
            .filter(|(word, next)| word.text != next.text)
            .map(|(word, _)| word)
            .chain(std::iter::once(last));
        let mut added = 0;
        for word in words {
            let inserted = graph.add_arc(
                word.final_state,
                word.final_state,
                word.label(),
                word.label(),
                weight,
            );
            added += usize::from(inserted);
        }
        Ok(added)
    }
}
