// OpenFst text format output.
//
// Layout, one line per entry, grouped by source state in creation order:
//
//   [id]
//   from to input output cost     (arc)
//   state cost                    (final marker)
//
// The optional id line names the automaton, e.g. the utterance key when many
// prompts are written into one Kaldi-style text archive.

use std::fmt;
use std::io::{self, Write};

use crate::graph::{Entry, Graph};

/// Display adapter rendering a graph in OpenFst text format.
pub struct TextFormat<'a> {
    graph: &'a Graph,
    id: Option<&'a str>,
}

impl<'a> TextFormat<'a> {
    pub fn new(graph: &'a Graph, id: Option<&'a str>) -> Self {
        Self { graph, id }
    }
}

impl fmt::Display for TextFormat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(id) = self.id {
            writeln!(f, "{id}")?;
        }
        for state in self.graph.states() {
            let costs = self.graph.costs(state);
            for (entry, cost) in self.graph.entries(state).iter().zip(costs) {
                match entry {
                    Entry::Transition(arc) => writeln!(
                        f,
                        "{} {} {} {} {}",
                        arc.from, arc.to, arc.input, arc.output, cost
                    )?,
                    Entry::Accept(accept) => writeln!(f, "{} {}", accept.state, cost)?,
                }
            }
        }
        Ok(())
    }
}

/// Write `graph` in OpenFst text format.
pub fn write_text<W: Write>(graph: &Graph, id: Option<&str>, out: &mut W) -> io::Result<()> {
    write!(out, "{}", TextFormat::new(graph, id))
}

/// Render `graph` in OpenFst text format.
pub fn to_text(graph: &Graph, id: Option<&str>) -> String {
    TextFormat::new(graph, id).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::homophones::Homophones;
    use miscue_core::{Label, Weight};

    fn two_state_graph() -> Graph {
        let mut graph = Graph::new(Homophones::new());
        let s = graph.new_state();
        graph.add_arc(0, s, Label::word("hi"), Label::word("hi"), Weight::Relative(4.0));
        graph.add_arc(0, 0, Label::RUBBISH, Label::RUBBISH, Weight::Relative(4.0));
        graph.add_final_state(s, Weight::Cost(0.0)).unwrap();
        graph
    }

    #[test]
    fn render_arcs_and_final_marker() {
        let graph = two_state_graph();
        let p = -(0.5f64.ln());
        let expected = format!("0 1 hi hi {p}\n0 0 [RUB] [RUB] {p}\n1 0\n");
        assert_eq!(to_text(&graph, None), expected);
    }

    #[test]
    fn render_with_id_line() {
        let graph = two_state_graph();
        let text = to_text(&graph, Some("utt-001"));
        assert!(text.starts_with("utt-001\n0 1 hi hi "));
    }

    #[test]
    fn writer_and_display_agree() {
        let graph = two_state_graph();
        let mut buf = Vec::new();
        write_text(&graph, Some("utt-002"), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), to_text(&graph, Some("utt-002")));
        assert_eq!(
            TextFormat::new(&graph, None).to_string(),
            to_text(&graph, None)
        );
    }

    #[test]
    fn empty_graph_renders_nothing() {
        let graph = Graph::new(Homophones::new());
        assert_eq!(to_text(&graph, None), "");
    }

    #[test]
    fn states_are_grouped_in_creation_order() {
        let mut graph = Graph::new(Homophones::new());
        let a = graph.new_state();
        let b = graph.new_state();
        // Insert arcs for later states first.
        graph.add_arc(b, b, Label::word("z"), Label::word("z"), Weight::Relative(1.0));
        graph.add_arc(a, b, Label::word("y"), Label::word("y"), Weight::Relative(1.0));
        graph.add_arc(0, a, Label::word("x"), Label::word("x"), Weight::Relative(1.0));
        let text = to_text(&graph, None);
        let sources: Vec<&str> = text
            .lines()
            .map(|l| l.split(' ').next().unwrap())
            .collect();
        assert_eq!(sources, vec!["0", "1", "2"]);
    }

    #[test]
    fn epsilon_renders_as_token() {
        let mut graph = Graph::new(Homophones::new());
        let s = graph.new_state();
        graph.add_arc(0, s, Label::EPSILON, Label::SKIP, Weight::Relative(1.0));
        assert_eq!(to_text(&graph, None), "0 1 <eps> [SKP] 0\n");
    }
}
