// Premature end: the reader stops before the end of the prompt.

use miscue_core::{Category, WeightTable};
use miscue_fst::{FstError, Graph, WordChain};

use super::PathRecipe;

/// Every word's final state except the last one's becomes accepting. The
/// marker weight is relative: stopping competes with the arcs leaving the
/// state.
pub struct PrematureEndPaths;

impl PathRecipe for PrematureEndPaths {
    fn category(&self) -> Category {
        Category::PrematureEnd
    }

    fn add_paths(
        &self,
        graph: &mut Graph,
        chain: &WordChain,
        weights: &WeightTable,
    ) -> Result<usize, FstError> {
        let (_, early) = chain
            .words()
            .split_last()
            .ok_or(FstError::UninitializedChain)?;
        for word in early {
            graph.add_final_state(word.final_state, weights.relative(Category::PrematureEnd))?;
        }
        Ok(early.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::test_util::*;
    use miscue_core::Weight;

    #[test]
    fn early_states_become_final() {
        let (mut graph, chain) = chain_of(&["a", "b", "c"], "");
        let added = PrematureEndPaths
            .add_paths(&mut graph, &chain, &WeightTable::default())
            .unwrap();
        assert_eq!(added, 2);
        assert!(!graph.is_final(0));
        assert_eq!(graph.final_weight(1), Some(Weight::Relative(3.0)));
        assert_eq!(graph.final_weight(2), Some(Weight::Relative(3.0)));
        assert!(!graph.is_final(3));
    }

    #[test]
    fn single_word_prompt_has_no_early_states() {
        let (mut graph, chain) = chain_of(&["a"], "");
        let added = PrematureEndPaths
            .add_paths(&mut graph, &chain, &WeightTable::default())
            .unwrap();
        assert_eq!(added, 0);
    }

    #[test]
    fn empty_chain_fails() {
        let (mut graph, chain) = chain_of(&[], "");
        assert!(matches!(
            PrematureEndPaths.add_paths(&mut graph, &chain, &WeightTable::default()),
            Err(FstError::UninitializedChain)
        ));
    }
}
