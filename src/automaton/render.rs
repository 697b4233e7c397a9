//! DOT export of the acceptor graph
//!
//! Output shape:
//!
//! ```text
//! digraph {
//! graph [rankdir=LR];
//! "2" -> "2" [label="s"];
//! "1" -> "2" [label="s"];
//! "2" [peripheries=2];
//! }
//! ```
//!
//! States with several predecessors get a point-shaped junction node
//! (`"<id>_a"`) so the renderer draws one labelled edge into the state.

use super::{Automaton, State};

impl Automaton {
    /// Render the graph; the root is visited first when `include_root` is set,
    /// then every indexed state in first-association order
    pub fn render(&self, include_root: bool) -> String {
        let mut body = String::new();

        if include_root {
            self.render_state(self.root(), &mut body);
        }
        for (_, ids) in self.labels() {
            for id in ids {
                if let Some(state) = self.state(*id) {
                    self.render_state(state, &mut body);
                }
            }
        }

        format!("digraph {{\ngraph [rankdir=LR];\n{body}}}")
    }

    fn render_state(&self, state: &State, out: &mut String) {
        let node = format!("\"{}\"", state.id());
        let name = escape(&state.display_name());

        if state.is_self_loop() {
            let label = state
                .edge_description()
                .map_or_else(|| escape(state.label().as_str()), escape);
            out.push_str(&format!("{node} -> {node} [label=\"{label}\"];\n"));
        }

        let junction = state.predecessors().len() > 1;
        let target = if junction {
            let point = format!("\"{}_a\"", state.id());
            out.push_str(&format!("{point} [shape=point, width=0.01, height=0.01];\n"));
            out.push_str(&format!("{point} -> {node} [label=\"{name}\"];\n"));
            point
        } else {
            node.clone()
        };

        for pred in state.predecessors() {
            let attrs = if junction {
                " [dir=none]".to_string()
            } else if self.state(*pred).map(State::label) == Some(state.label()) {
                String::new()
            } else {
                match state.edge_description() {
                    Some(desc) => format!(" [label=\"{name} {}\"]", escape(desc)),
                    None => format!(" [label=\"{name}\"]"),
                }
            };
            out.push_str(&format!("\"{pred}\" -> {target}{attrs};\n"));
        }

        let mut style: Vec<&str> = Vec::new();
        if state.is_start() {
            style.push("shape=diamond");
        }
        if state.is_final() {
            style.push("peripheries=2");
        }
        if state.is_highlighted() {
            style.push("color=Orange, fontcolor=White, fillcolor=Orange, style=filled");
        }
        if !style.is_empty() {
            out.push_str(&format!("{node} [{}];\n", style.join(", ")));
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
