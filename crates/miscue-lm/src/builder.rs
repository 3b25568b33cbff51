// PromptLm: build a miscue tolerant model for one prompt.

use std::io;

use miscue_core::WeightTable;
use miscue_fst::text;
use miscue_fst::{Graph, Homophones, Word, WordChain};

use crate::LmError;
use crate::config::LmConfig;
use crate::recipes::RecipeSet;

/// A fully built prompt model: the automaton and the word chain it was
/// built from.
#[derive(Debug, Clone)]
pub struct PromptLm {
    graph: Graph,
    chain: WordChain,
}

impl PromptLm {
    /// Build the model for an already tokenised prompt.
    ///
    /// Runs the core recipes and the extensions enabled in `config`. Fails
    /// without producing anything if the prompt is empty, a token is not a
    /// valid word label, or the configuration is invalid.
    pub fn build<I>(labels: I, homophones: Homophones, config: &LmConfig) -> Result<Self, LmError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        config.validate()?;
        let recipes = RecipeSet::from_config(config)?;
        Self::build_with_recipes(labels, homophones, &config.weights, &recipes)
    }

    /// Build the model with an explicit recipe set.
    pub fn build_with_recipes<I>(
        labels: I,
        homophones: Homophones,
        weights: &WeightTable,
        recipes: &RecipeSet,
    ) -> Result<Self, LmError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        weights.validate()?;
        let mut graph = Graph::new(homophones);
        let mut chain = WordChain::new();
        chain.extend(&mut graph, labels)?;
        chain.current()?;

        recipes.apply(&mut graph, &chain, weights)?;

        log::info!(
            "built prompt model: {} words, {} states, {} arcs",
            chain.len(),
            graph.num_states(),
            graph.num_arcs()
        );
        Ok(Self { graph, chain })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn words(&self) -> &[Word] {
        self.chain.words()
    }

    /// Label-exact determinism check over the built automaton.
    pub fn is_deterministic(&self) -> bool {
        self.graph.is_deterministic()
    }

    /// Write the model in OpenFst text format, optionally preceded by an id line.
    pub fn write_text<W: io::Write>(&self, id: Option<&str>, out: &mut W) -> io::Result<()> {
        text::write_text(&self.graph, id, out)
    }

    pub fn to_text(&self, id: Option<&str>) -> String {
        text::to_text(&self.graph, id)
    }
}
