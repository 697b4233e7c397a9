use crate::step::Token;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Stable identifier of a state inside one automaton
///
/// Ids are assigned in creation order and never reused. The root is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StateId(usize);

impl StateId {
    pub const ROOT: StateId = StateId(0);

    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A vertex of the acceptor graph
///
/// Adjacency is stored as id lists. An id appears at most once per list and a
/// state never lists itself: a self-reference sets the self-loop flag instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct State {
    id: StateId,
    label: Token,
    aliases: BTreeSet<Token>,
    edge_description: Option<String>,
    is_start: bool,
    is_final: bool,
    is_self_loop: bool,
    loop_count: usize,
    predecessors: Vec<StateId>,
    successors: Vec<StateId>,
    highlighted: bool,
}

impl State {
    pub(crate) fn new(id: StateId, label: Token, is_start: bool, is_final: bool) -> Self {
        Self {
            id,
            label,
            aliases: BTreeSet::new(),
            edge_description: None,
            is_start,
            is_final,
            is_self_loop: false,
            loop_count: 0,
            predecessors: Vec::new(),
            successors: Vec::new(),
            highlighted: false,
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn label(&self) -> &Token {
        &self.label
    }

    pub fn aliases(&self) -> &BTreeSet<Token> {
        &self.aliases
    }

    pub fn edge_description(&self) -> Option<&str> {
        self.edge_description.as_deref()
    }

    pub fn is_start(&self) -> bool {
        self.is_start
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn is_self_loop(&self) -> bool {
        self.is_self_loop
    }

    pub fn loop_count(&self) -> usize {
        self.loop_count
    }

    pub fn predecessors(&self) -> &[StateId] {
        &self.predecessors
    }

    pub fn successors(&self) -> &[StateId] {
        &self.successors
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// True if `label` is this state's label or one of its aliases
    pub fn matches(&self, label: &Token) -> bool {
        self.label == *label || self.aliases.contains(label)
    }

    /// Label followed by the aliases, comma separated
    pub fn display_name(&self) -> String {
        let mut name = self.label.to_string();
        for alias in &self.aliases {
            name.push_str(", ");
            name.push_str(alias.as_str());
        }
        name
    }

    pub(crate) fn push_successor(&mut self, other: StateId) {
        if other == self.id {
            self.mark_self_loop();
        } else if !self.successors.contains(&other) {
            self.successors.push(other);
        }
    }

    pub(crate) fn push_predecessor(&mut self, other: StateId) {
        if other == self.id {
            self.mark_self_loop();
        } else if !self.predecessors.contains(&other) {
            self.predecessors.push(other);
        }
    }

    /// Self-reference: flag the loop and count one more pass (never below 2)
    pub(crate) fn mark_self_loop(&mut self) {
        self.is_self_loop = true;
        self.loop_count = (self.loop_count + 1).max(2);
    }

    /// Flag the loop without counting a pass; an unset count becomes 2
    pub(crate) fn flag_self_loop(&mut self) {
        self.is_self_loop = true;
        if self.loop_count == 0 {
            self.loop_count = 2;
        }
    }

    pub(crate) fn raise_loop_count(&mut self, count: usize) {
        if count > self.loop_count {
            self.loop_count = count;
        }
    }

    pub(crate) fn set_start(&mut self) {
        self.is_start = true;
    }

    pub(crate) fn set_final(&mut self) {
        self.is_final = true;
    }

    pub(crate) fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    pub(crate) fn set_edge_description(&mut self, description: Option<String>) {
        self.edge_description = description.filter(|d| !d.is_empty());
    }

    pub(crate) fn add_alias(&mut self, alias: Token) {
        if alias != self.label {
            self.aliases.insert(alias);
        }
    }
}
