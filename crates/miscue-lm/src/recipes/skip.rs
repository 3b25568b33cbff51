// Skip paths: the reader jumps forward one word.

use miscue_core::{Category, Label, WeightTable};
use miscue_fst::{FstError, Graph, WordChain};

use super::{PathRecipe, add_skip_path};

/// For each adjacent `(word, next)` pair with different labels, a path from
/// `word.start` that consumes `next`, records a skip, then emits `next` and
/// lands at `next.final_state`.
///
/// Pairs of identical words get no skip, so a skip inside a run of repeated
/// words is only ever recorded once, at the end of the run. The last word
/// also gets an epsilon skip over itself.
pub struct SkipPaths;

impl PathRecipe for SkipPaths {
    fn category(&self) -> Category {
        Category::Skip
    }

    fn add_paths(
        &self,
        graph: &mut Graph,
        chain: &WordChain,
        weights: &WeightTable,
    ) -> Result<usize, FstError> {
        let last = chain.current()?;
        let weight = weights.relative(Category::Skip);
        let mut added = 0;
        for (word, next) in chain.pairs() {
            if word.text == next.text {
                continue;
            }
            added += add_skip_path(graph, word.start, next, 1, weight, weights);
        }
        let inserted = graph.add_arc(
            last.start,
            last.final_state,
            Label::EPSILON,
            Label::SKIP,
            weight,
        );
        Ok(added + usize::from(inserted))
    }
}
