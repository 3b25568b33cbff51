// Rubbish paths: noise, hesitations and fillers between words.

use miscue_core::{Category, Label, WeightTable};
use miscue_fst::{FstError, Graph, WordChain};

use super::PathRecipe;

/// A noise self-loop at every word's start state and at the end of the
/// prompt. Being loops, they allow any amount of noise before a word or
/// after the utterance.
pub struct RubbishPaths;

impl PathRecipe for RubbishPaths {
    fn category(&self) -> Category {
        Category::Rubbish
    }

    fn add_paths(
        &self,
        graph: &mut Graph,
        chain: &WordChain,
        weights: &WeightTable,
    ) -> Result<usize, FstError> {
        let last = chain.current()?;
        let weight = weights.relative(Category::Rubbish);
        let states = chain
            .words()
            .iter()
            .map(|word| word.start)
            .chain(std::iter::once(last.final_state));
        let mut added = 0;
        for state in states {
            added += usize::from(graph.add_arc(state, state, Label::RUBBISH, Label::RUBBISH, weight));
        }
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::test_util::*;

    #[test]
    fn loops_at_every_start_and_at_the_end() {
        let (mut graph, chain) = chain_of(&["the", "cat", "sat"], "");
        let added = RubbishPaths
            .add_paths(&mut graph, &chain, &WeightTable::default())
            .unwrap();
        assert_eq!(added, 4);
        assert_eq!(
            arc_tuples(&graph),
            vec![
                t(0, 0, "[RUB]", "[RUB]"),
                t(1, 1, "[RUB]", "[RUB]"),
                t(2, 2, "[RUB]", "[RUB]"),
                t(3, 3, "[RUB]", "[RUB]"),
            ]
        );
    }

    #[test]
    fn running_twice_adds_nothing() {
        let (mut graph, chain) = chain_of(&["a"], "");
        let weights = WeightTable::default();
        RubbishPaths.add_paths(&mut graph, &chain, &weights).unwrap();
        let added = RubbishPaths.add_paths(&mut graph, &chain, &weights).unwrap();
        assert_eq!(added, 0);
        assert_eq!(graph.num_arcs(), 2);
    }
}
