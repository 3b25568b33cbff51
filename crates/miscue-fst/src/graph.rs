// Automaton graph: numbered states, outgoing arcs and final markers.
//
// Arc insertion is guarded so that no state ever has two outgoing arcs whose
// input labels are equal or homophones of each other. The first arc inserted
// for a label class wins; later attempts are dropped silently.

use miscue_core::weights::relative_to_cost;
use miscue_core::{Label, Weight};

use crate::FstError;
use crate::homophones::Homophones;

/// State identifier. Ids are allocated densely, starting from the initial state `0`.
pub type StateId = u32;

/// A directed, labelled, weighted transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub from: StateId,
    pub to: StateId,
    pub input: Label,
    pub output: Label,
    pub weight: Weight,
}

/// Marks `state` as accepting, with the given exit weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accept {
    pub state: StateId,
    pub weight: Weight,
}

/// One item in a state's outgoing list.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Transition(Arc),
    Accept(Accept),
}

impl Entry {
    pub fn weight(&self) -> Weight {
        match self {
            Entry::Transition(arc) => arc.weight,
            Entry::Accept(accept) => accept.weight,
        }
    }
}

/// The prompt automaton.
///
/// Owns every state and its outgoing entries, in insertion order. States are
/// never removed.
#[derive(Debug, Clone)]
pub struct Graph {
    states: Vec<Vec<Entry>>,
    homophones: Homophones,
}

impl Graph {
    /// Create a graph holding only the initial state.
    pub fn new(homophones: Homophones) -> Self {
        Self {
            states: vec![Vec::new()],
            homophones,
        }
    }

    /// The unique initial state.
    pub fn initial(&self) -> StateId {
        0
    }

    /// Allocate a fresh state with no outgoing entries.
    pub fn new_state(&mut self) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(Vec::new());
        id
    }

    pub fn homophones(&self) -> &Homophones {
        &self.homophones
    }

    /// Add an arc unless `from` already has an arc whose input label is
    /// equal to, or a homophone of, `input`.
    ///
    /// Returns `true` if the arc was inserted. A suppressed arc is the
    /// defined behaviour, not an error.
    pub fn add_arc(
        &mut self,
        from: StateId,
        to: StateId,
        input: Label,
        output: Label,
        weight: Weight,
    ) -> bool {
        if self.has_equivalent_arc(from, &input) {
            log::trace!("state {from}: arc on {input} suppressed, label class already present");
            return false;
        }
        self.states[from as usize].push(Entry::Transition(Arc {
            from,
            to,
            input,
            output,
            weight,
        }));
        true
    }

    /// `true` if an arc leaving `from` has an input label equivalent to `input`.
    ///
    /// Word labels are compared through the homophone index; special symbols
    /// only match themselves.
    pub fn has_equivalent_arc(&self, from: StateId, input: &Label) -> bool {
        self.arcs(from)
            .any(|arc| self.labels_equivalent(&arc.input, input))
    }

    fn labels_equivalent(&self, existing: &Label, candidate: &Label) -> bool {
        match (existing, candidate) {
            (Label::Word(a), Label::Word(b)) => self.homophones.are_homophones(a, b),
            _ => existing == candidate,
        }
    }

    /// Mark `state` as accepting.
    ///
    /// A state carries at most one final marker; a second one is rejected
    /// with [`FstError::AlreadyFinal`].
    pub fn add_final_state(&mut self, state: StateId, weight: Weight) -> Result<(), FstError> {
        if self.is_final(state) {
            return Err(FstError::AlreadyFinal(state));
        }
        self.states[state as usize].push(Entry::Accept(Accept { state, weight }));
        Ok(())
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.final_weight(state).is_some()
    }

    /// The exit weight of `state`, if it is accepting.
    pub fn final_weight(&self, state: StateId) -> Option<Weight> {
        self.entries(state).iter().find_map(|entry| match entry {
            Entry::Accept(accept) => Some(accept.weight),
            Entry::Transition(_) => None,
        })
    }

    /// Label-exact determinism check: no state has two arcs with identical
    /// input labels. Epsilon is treated like any other label.
    ///
    /// This is coarser than the insertion guard, which also merges homophones.
    pub fn is_deterministic(&self) -> bool {
        self.states().all(|state| {
            let mut seen = hashbrown::HashSet::new();
            self.arcs(state).all(|arc| seen.insert(&arc.input))
        })
    }

    /// All state ids, in creation order.
    pub fn states(&self) -> impl Iterator<Item = StateId> {
        0..self.states.len() as StateId
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Total number of arcs over all states.
    pub fn num_arcs(&self) -> usize {
        self.states().map(|s| self.arcs(s).count()).sum()
    }

    /// Outgoing entries of `state`, in insertion order.
    pub fn entries(&self, state: StateId) -> &[Entry] {
        &self.states[state as usize]
    }

    /// Outgoing arcs of `state`, in insertion order.
    pub fn arcs(&self, state: StateId) -> impl Iterator<Item = &Arc> {
        self.entries(state).iter().filter_map(|entry| match entry {
            Entry::Transition(arc) => Some(arc),
            Entry::Accept(_) => None,
        })
    }

    /// Costs of the entries of `state`, in the same order as [`entries`](Self::entries).
    ///
    /// Relative weights are normalised against the sum of all relative
    /// weights at the state and converted to `-ln(p)`. Absolute costs pass
    /// through unchanged.
    pub fn costs(&self, state: StateId) -> Vec<f64> {
        let entries = self.entries(state);
        let total: f64 = entries.iter().filter_map(|e| e.weight().relative()).sum();
        entries
            .iter()
            .map(|entry| match entry.weight() {
                Weight::Cost(cost) => cost,
                Weight::Relative(w) if w > 0.0 => relative_to_cost(w, total),
                Weight::Relative(_) => f64::INFINITY,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(w: &str) -> Label {
        Label::word(w)
    }

    #[test]
    fn new_graph_has_initial_state() {
        let graph = Graph::new(Homophones::new());
        assert_eq!(graph.initial(), 0);
        assert_eq!(graph.num_states(), 1);
        assert!(graph.entries(0).is_empty());
    }

    #[test]
    fn new_state_ids_are_fresh() {
        let mut graph = Graph::new(Homophones::new());
        let a = graph.new_state();
        let b = graph.new_state();
        assert_eq!((a, b), (1, 2));
        assert_eq!(graph.num_states(), 3);
    }

    #[test]
    fn exact_duplicate_label_is_suppressed() {
        let mut graph = Graph::new(Homophones::new());
        let s = graph.new_state();
        assert!(graph.add_arc(0, s, word("cat"), word("cat"), Weight::Relative(1.0)));
        assert!(!graph.add_arc(0, 0, word("cat"), word("cat"), Weight::Relative(5.0)));
        assert_eq!(graph.arcs(0).count(), 1);
        assert_eq!(graph.arcs(0).next().unwrap().to, s);
    }

    #[test]
    fn homophone_label_is_suppressed() {
        let mut graph = Graph::new(Homophones::parse("read red"));
        let s = graph.new_state();
        assert!(graph.add_arc(0, s, word("read"), word("read"), Weight::Relative(1.0)));
        assert!(!graph.add_arc(0, s, word("red"), word("red"), Weight::Relative(1.0)));
        assert_eq!(graph.arcs(0).count(), 1);
    }

    #[test]
    fn special_labels_compare_by_identity() {
        let mut graph = Graph::new(Homophones::new());
        let s = graph.new_state();
        assert!(graph.add_arc(0, 0, Label::RUBBISH, Label::RUBBISH, Weight::Relative(1.0)));
        assert!(graph.add_arc(0, s, Label::EPSILON, Label::SKIP, Weight::Relative(1.0)));
        assert!(!graph.add_arc(0, s, Label::EPSILON, word("x"), Weight::Relative(1.0)));
        // A word spelled like a special token is still a word.
        assert!(graph.add_arc(0, s, word("[RUB]"), word("x"), Weight::Relative(1.0)));
        assert_eq!(graph.arcs(0).count(), 3);
    }

    #[test]
    fn arcs_at_different_states_do_not_interfere() {
        let mut graph = Graph::new(Homophones::new());
        let s = graph.new_state();
        assert!(graph.add_arc(0, s, word("a"), word("a"), Weight::Relative(1.0)));
        assert!(graph.add_arc(s, s, word("a"), word("a"), Weight::Relative(1.0)));
        assert_eq!(graph.num_arcs(), 2);
    }

    #[test]
    fn second_final_marker_is_rejected() {
        let mut graph = Graph::new(Homophones::new());
        let s = graph.new_state();
        graph.add_final_state(s, Weight::Cost(0.0)).unwrap();
        let err = graph.add_final_state(s, Weight::Cost(1.0)).unwrap_err();
        assert!(matches!(err, FstError::AlreadyFinal(1)));
        assert_eq!(graph.final_weight(s), Some(Weight::Cost(0.0)));
        assert!(!graph.is_final(0));
    }

    #[test]
    fn final_marker_does_not_block_arcs() {
        let mut graph = Graph::new(Homophones::new());
        graph.add_final_state(0, Weight::Cost(0.0)).unwrap();
        assert!(graph.add_arc(0, 0, Label::RUBBISH, Label::RUBBISH, Weight::Relative(1.0)));
        assert_eq!(graph.entries(0).len(), 2);
    }

    #[test]
    fn determinism_check_is_label_exact() {
        let mut graph = Graph::new(Homophones::parse("read red"));
        let s = graph.new_state();
        graph.add_arc(0, s, word("read"), word("read"), Weight::Relative(1.0));
        graph.add_arc(0, s, word("cat"), word("cat"), Weight::Relative(1.0));
        graph.add_final_state(s, Weight::Cost(0.0)).unwrap();
        assert!(graph.is_deterministic());

        // Bypass the guard to build a nondeterministic graph.
        graph.states[0].push(Entry::Transition(Arc {
            from: 0,
            to: 0,
            input: word("cat"),
            output: word("cat"),
            weight: Weight::Relative(1.0),
        }));
        assert!(!graph.is_deterministic());
    }

    #[test]
    fn costs_normalise_relative_weights_per_state() {
        let mut graph = Graph::new(Homophones::new());
        let s = graph.new_state();
        graph.add_arc(0, s, word("a"), word("a"), Weight::Relative(10.0));
        graph.add_arc(0, s, word("b"), word("b"), Weight::Relative(30.0));
        graph.add_arc(s, s, word("c"), word("c"), Weight::Relative(7.0));
        graph.add_final_state(s, Weight::Cost(0.5)).unwrap();

        let costs = graph.costs(0);
        assert!((costs[0] - -(0.25f64.ln())).abs() < 1e-12);
        assert!((costs[1] - -(0.75f64.ln())).abs() < 1e-12);

        // The only relative weight at `s` has probability 1; the final cost is absolute.
        assert_eq!(graph.costs(s), vec![0.0, 0.5]);
    }

    #[test]
    fn relative_final_weight_competes_with_arcs() {
        let mut graph = Graph::new(Homophones::new());
        let s = graph.new_state();
        graph.add_arc(0, s, word("a"), word("a"), Weight::Relative(3.0));
        graph.add_final_state(0, Weight::Relative(1.0)).unwrap();
        let costs = graph.costs(0);
        assert!((costs[0] - -(0.75f64.ln())).abs() < 1e-12);
        assert!((costs[1] - -(0.25f64.ln())).abs() < 1e-12);
    }
}
