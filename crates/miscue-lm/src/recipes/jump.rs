// Jump paths: the reader jumps forward or backward over several words.
//
// Skip and repeat already cover a distance of one word in each direction;
// these recipes cover distances from 2 up to the configured span.

use miscue_core::{Category, WeightTable};
use miscue_fst::{FstError, Graph, WordChain};

use super::{PathRecipe, add_skip_path};

/// From each word's start, jump ahead to a later word, skipping `k` words
/// for `k` in `2..=span`. One skip marker is emitted per skipped word.
///
/// As with single skips, a jump never lands inside a run of identical words.
pub struct JumpForwardPaths {
    span: usize,
}

impl JumpForwardPaths {
    pub fn new(span: usize) -> Self {
        Self { span }
    }
}

impl PathRecipe for JumpForwardPaths {
    fn category(&self) -> Category {
        Category::JumpForward
    }

    fn add_paths(
        &self,
        graph: &mut Graph,
        chain: &WordChain,
        weights: &WeightTable,
    ) -> Result<usize, FstError> {
        chain.current()?;
        let words = chain.words();
        let weight = weights.relative(Category::JumpForward);
        let mut added = 0;
        for (i, word) in words.iter().enumerate() {
            for skipped in 2..=self.span {
                let Some(target) = words.get(i + skipped) else {
                    break;
                };
                if words[i + skipped - 1].text == target.text {
                    continue;
                }
                added += add_skip_path(graph, word.start, target, skipped, weight, weights);
            }
        }
        Ok(added)
    }
}

/// After finishing a word, go back and re-read an earlier word, moving back
/// over `d` words for `d` in `2..=span`: a self-loop-free generalisation of
/// the repeat path.
///
/// The target must end a run of identical words, like repeat loops do.
pub struct JumpBackwardPaths {
    span: usize,
}

impl JumpBackwardPaths {
    pub fn new(span: usize) -> Self {
        Self { span }
    }
}

impl PathRecipe for JumpBackwardPaths {
    fn category(&self) -> Category {
        Category::JumpBackward
    }

    fn add_paths(
        &self,
        graph: &mut Graph,
        chain: &WordChain,
        weights: &WeightTable,
    ) -> Result<usize, FstError> {
        chain.current()?;
        let words = chain.words();
        let weight = weights.relative(Category::JumpBackward);
        let mut added = 0;
        for (i, word) in words.iter().enumerate() {
            for distance in 2..=self.span {
                let Some(j) = (i + 1).checked_sub(distance) else {
                    break;
                };
                let target = &words[j];
                if target.text == words[j + 1].text {
                    continue;
                }
                let inserted = graph.add_arc(
                    word.final_state,
                    target.final_state,
                    target.label(),
                    target.label(),
                    weight,
                );
                added += usize::from(inserted);
            }
        }
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::CorrectPaths;
    use crate::recipes::test_util::*;

    #[test]
    fn forward_jump_over_two_words() {
        let (mut graph, chain) = chain_of(&["a", "b", "c"], "");
        let added = JumpForwardPaths::new(3)
            .add_paths(&mut graph, &chain, &WeightTable::default())
            .unwrap();
        assert_eq!(added, 3);
        assert_eq!(
            arc_tuples(&graph),
            vec![
                t(0, 4, "c", "[SKP]"),
                t(4, 5, "<eps>", "[SKP]"),
                t(5, 3, "<eps>", "c"),
            ]
        );
    }

    #[test]
    fn forward_span_limits_distance() {
        let words = ["a", "b", "c", "d", "e"];
        let (mut graph, chain) = chain_of(&words, "");
        JumpForwardPaths::new(2)
            .add_paths(&mut graph, &chain, &WeightTable::default())
            .unwrap();
        // Only distance 2 jumps: a->c, b->d, c->e.
        let heads: Vec<_> = arc_tuples(&graph)
            .into_iter()
            .filter(|(_, _, input, _)| input != "<eps>")
            .map(|(from, _, input, _)| (from, input))
            .collect();
        assert_eq!(
            heads,
            vec![(0, "c".to_string()), (1, "d".to_string()), (2, "e".to_string())]
        );
    }

    #[test]
    fn forward_jump_suppressed_by_existing_label() {
        let (mut graph, chain) = chain_of(&["a", "b", "a"], "");
        let weights = WeightTable::default();
        CorrectPaths.add_paths(&mut graph, &chain, &weights).unwrap();
        let added = JumpForwardPaths::new(3)
            .add_paths(&mut graph, &chain, &weights)
            .unwrap();
        assert_eq!(added, 0);
        assert_eq!(graph.num_arcs(), 3);
    }

    #[test]
    fn forward_jump_does_not_land_inside_a_run() {
        let (mut graph, chain) = chain_of(&["x", "a", "a"], "");
        let added = JumpForwardPaths::new(3)
            .add_paths(&mut graph, &chain, &WeightTable::default())
            .unwrap();
        assert_eq!(added, 0);
    }

    #[test]
    fn backward_jumps() {
        let (mut graph, chain) = chain_of(&["a", "b", "c"], "");
        let added = JumpBackwardPaths::new(3)
            .add_paths(&mut graph, &chain, &WeightTable::default())
            .unwrap();
        assert_eq!(added, 3);
        assert_eq!(
            arc_tuples(&graph),
            vec![t(2, 1, "a", "a"), t(3, 2, "b", "b"), t(3, 1, "a", "a")]
        );
    }

    #[test]
    fn backward_jump_targets_end_of_run() {
        let (mut graph, chain) = chain_of(&["a", "a", "b", "c"], "");
        JumpBackwardPaths::new(3)
            .add_paths(&mut graph, &chain, &WeightTable::default())
            .unwrap();
        // Never back to state 1 (the first "a" inside the run).
        assert!(arc_tuples(&graph).iter().all(|(_, to, _, _)| *to != 1));
    }

    #[test]
    fn span_below_two_adds_nothing() {
        let (mut graph, chain) = chain_of(&["a", "b", "c"], "");
        let weights = WeightTable::default();
        assert_eq!(
            JumpForwardPaths::new(1)
                .add_paths(&mut graph, &chain, &weights)
                .unwrap(),
            0
        );
        assert_eq!(
            JumpBackwardPaths::new(1)
                .add_paths(&mut graph, &chain, &weights)
                .unwrap(),
            0
        );
        assert_eq!(graph.num_arcs(), 0);
    }
}
