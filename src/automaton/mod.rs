// Prefix/suffix factorized acceptor
//
// Builds one shared graph of states that accepts every inserted sequence.
// Common prefixes reuse existing successors, common tails are spliced onto
// an existing final chain, and back-to-back repeats can collapse into a
// single self-looping state.
//
// States live in an arena indexed by `StateId`; adjacency is stored as id
// lists so cycles never become ownership cycles. The root (id 0, label
// "Init") is the start of every path.
//
// Call-scoped bookkeeping (the states touched by the current sequence, the
// final states already registered in this call) lives in locals of
// `insert`, so an automaton can be extended any number of times.

mod builder;
mod render;
mod state;

pub use state::{State, StateId};

use crate::error::{Error, Result};
use crate::step::{Sequence, Token};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Label of the root state
pub const ROOT_LABEL: &str = "Init";

/// Builder and export options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomatonConfig {
    /// Collapse back-to-back repeats into a self-looping state
    pub build_with_loop: bool,

    /// Emit the root state's attribute line when rendering
    pub include_root: bool,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            build_with_loop: true,
            include_root: true,
        }
    }
}

/// Shared acceptor graph over canonical tokens
///
/// # Example Usage
/// ```
/// use tracefold::automaton::Automaton;
/// use tracefold::step::Sequence;
///
/// let mut automaton = Automaton::new(true);
/// automaton.insert(&[
///     Sequence::from_labels(["u", "s", "s"]),
///     Sequence::from_labels(["u", "s"]),
/// ])?;
///
/// // root, u, s
/// assert_eq!(automaton.state_count(), 3);
/// assert!(automaton.render(true).starts_with("digraph {"));
/// # Ok::<(), tracefold::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Automaton {
    states: Vec<State>,
    build_with_loop: bool,
    /// Label -> states, in first-association order
    alphabet: Vec<(Token, Vec<StateId>)>,
    alphabet_slots: HashMap<Token, usize>,
    indexed: HashSet<StateId>,
    /// Label -> final states, in registration order
    final_index: HashMap<Token, Vec<StateId>>,
    accepted: Vec<Vec<Token>>,
    accepted_set: HashSet<Vec<Token>>,
}

impl Automaton {
    /// Create an automaton holding only the root state
    pub fn new(build_with_loop: bool) -> Self {
        let root = State::new(StateId::ROOT, Token::from(ROOT_LABEL), true, false);
        Self {
            states: vec![root],
            build_with_loop,
            alphabet: Vec::new(),
            alphabet_slots: HashMap::new(),
            indexed: HashSet::new(),
            final_index: HashMap::new(),
            accepted: Vec::new(),
            accepted_set: HashSet::new(),
        }
    }

    pub fn from_config(config: &AutomatonConfig) -> Self {
        Self::new(config.build_with_loop)
    }

    /// Insert raw sequences
    ///
    /// # Errors
    /// Returns `InvalidInput` if any sequence is empty. Validation happens
    /// before the graph is touched, so a failed call changes nothing.
    pub fn insert(&mut self, sequences: &[Sequence]) -> Result<()> {
        let canonical: Vec<Vec<Token>> = sequences.iter().map(Sequence::tokens).collect();
        self.insert_tokens(&canonical)
    }

    /// Insert sequences that are already canonical tokens
    pub fn insert_tokens(&mut self, sequences: &[Vec<Token>]) -> Result<()> {
        if let Some(position) = sequences.iter().position(Vec::is_empty) {
            return Err(Error::invalid(format!(
                "sequence {position} is empty and cannot be inserted"
            )));
        }

        let mut registered: HashSet<StateId> =
            self.final_index.values().flatten().copied().collect();

        for tokens in sequences {
            self.insert_one(tokens, &mut registered);
            if self.accepted_set.insert(tokens.clone()) {
                self.accepted.push(tokens.clone());
            }
        }

        Ok(())
    }

    pub fn build_with_loop(&self) -> bool {
        self.build_with_loop
    }

    pub fn root(&self) -> &State {
        &self.states[StateId::ROOT.index()]
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id.index())
    }

    /// All states in id order, root first
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Number of states including the root
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Labels in first-association order with the states carrying them
    pub fn labels(&self) -> impl Iterator<Item = (&Token, &[StateId])> + '_ {
        self.alphabet
            .iter()
            .map(|(label, ids)| (label, ids.as_slice()))
    }

    /// Final states registered under `label`
    pub fn final_states(&self, label: &str) -> &[StateId] {
        self.final_index.get(label).map(Vec::as_slice).unwrap_or_default()
    }

    /// Canonical sequences accepted so far, without repeats
    pub fn distinct_sequences(&self) -> &[Vec<Token>] {
        &self.accepted
    }

    pub fn set_highlighted(&mut self, id: StateId, highlighted: bool) -> Result<()> {
        self.state_mut(id)?.set_highlighted(highlighted);
        Ok(())
    }

    /// Attach a description to the edges entering `id`
    ///
    /// A described state is no longer reused as a shared prefix.
    pub fn set_edge_description(&mut self, id: StateId, description: impl Into<String>) -> Result<()> {
        self.state_mut(id)?.set_edge_description(Some(description.into()));
        Ok(())
    }

    pub fn add_alias(&mut self, id: StateId, alias: impl Into<Token>) -> Result<()> {
        self.state_mut(id)?.add_alias(alias.into());
        Ok(())
    }

    fn state_mut(&mut self, id: StateId) -> Result<&mut State> {
        self.states
            .get_mut(id.index())
            .ok_or(Error::UnknownState(id.index()))
    }
}
