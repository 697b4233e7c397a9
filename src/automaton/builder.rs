use super::{Automaton, State, StateId};
use crate::step::Token;
use std::collections::{BTreeMap, HashSet};

/// Entry point of an existing tail that matches the end of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Tail {
    pub entry: StateId,
    /// Offset within the searched suffix where the matched tail starts
    pub stop: usize,
}

impl Automaton {
    pub(super) fn insert_one(&mut self, tokens: &[Token], registered: &mut HashSet<StateId>) {
        let last = tokens.len() - 1;
        let mut current = StateId::ROOT;
        let mut touched: HashSet<StateId> = HashSet::from([StateId::ROOT]);
        let mut runs: BTreeMap<StateId, usize> = BTreeMap::new();
        let mut splice: Option<(StateId, usize)> = None;
        let mut searched = false;

        for (index, token) in tokens.iter().enumerate() {
            let is_start = index == 0;
            let is_final = index == last;

            if let Some((entry, at)) = splice {
                if index >= at {
                    self.link(current, entry);
                    break;
                }
            }

            if let Some(next) = self.find_successor(current, token) {
                current = next;
                touched.insert(next);
            } else {
                if self.build_with_loop
                    && current != StateId::ROOT
                    && self.states[current.index()].label() == token
                {
                    let state = &mut self.states[current.index()];
                    state.flag_self_loop();
                    if is_start {
                        state.set_start();
                    }
                    if is_final {
                        state.set_final();
                    }
                    *runs.entry(current).or_insert(1) += 1;
                    continue;
                }

                if splice.is_none() && !searched && !self.final_index.is_empty() {
                    searched = true;
                    let tail = self
                        .factorize(&tokens[index..], &touched)
                        .filter(|tail| tail.entry != current);
                    if let Some(tail) = tail {
                        tracing::trace!(entry = %tail.entry, stop = tail.stop + index, "suffix matched");
                        if is_final {
                            self.link(current, tail.entry);
                            break;
                        }
                        if tail.stop > 0 {
                            splice = Some((tail.entry, tail.stop + index));
                        }
                    }
                }

                let next = self.allocate(token.clone(), is_start, is_final);
                touched.insert(next);
                self.link(current, next);
                current = next;
            }

            if is_final {
                self.states[current.index()].set_final();
                if registered.insert(current) {
                    let label = self.states[current.index()].label().clone();
                    self.final_index.entry(label).or_default().push(current);
                }
            }
            self.index_label(token, current);
        }

        for (id, run) in runs {
            self.states[id.index()].raise_loop_count(run);
        }

        tracing::debug!(steps = tokens.len(), states = self.states.len(), "sequence inserted");
    }

    /// Find an existing tail that ends the way `suffix` ends
    ///
    /// The candidate is the first final state labelled like the last token
    /// that has no successors and is not in `touched`. From there the walk
    /// follows predecessors backwards while they match, again skipping
    /// states already used by the sequence being inserted.
    pub(crate) fn factorize(&mut self, suffix: &[Token], touched: &HashSet<StateId>) -> Option<Tail> {
        let last = suffix.last()?;
        let mut current = self.final_index.get(last)?.iter().copied().find(|id| {
            let state = &self.states[id.index()];
            state.label() == last && state.successors().is_empty() && !touched.contains(id)
        })?;

        let mut stop = suffix.len() - 1;
        for position in (1..suffix.len().saturating_sub(1)).rev() {
            let token = &suffix[position];
            let mut found = self
                .find_predecessor(current, token)
                .filter(|id| !touched.contains(id));

            if found.is_none() && self.build_with_loop && self.states[current.index()].label() == token {
                self.states[current.index()].flag_self_loop();
                found = Some(current);
            }

            match found {
                Some(id) => {
                    current = id;
                    stop = position;
                }
                None => break,
            }
        }

        Some(Tail {
            entry: current,
            stop,
        })
    }

    fn find_successor(&self, from: StateId, token: &Token) -> Option<StateId> {
        self.states[from.index()]
            .successors()
            .iter()
            .copied()
            .find(|id| {
                let state = &self.states[id.index()];
                state.matches(token) && state.edge_description().is_none()
            })
    }

    fn find_predecessor(&self, from: StateId, token: &Token) -> Option<StateId> {
        self.states[from.index()]
            .predecessors()
            .iter()
            .copied()
            .find(|id| self.states[id.index()].matches(token))
    }

    fn allocate(&mut self, label: Token, is_start: bool, is_final: bool) -> StateId {
        let id = StateId::new(self.states.len());
        tracing::trace!(%id, %label, "new state");
        self.states.push(State::new(id, label, is_start, is_final));
        id
    }

    /// Add the edge `from -> to` on both ends; a self-link marks a loop once
    pub(crate) fn link(&mut self, from: StateId, to: StateId) {
        if from == to {
            self.states[from.index()].mark_self_loop();
            return;
        }
        self.states[from.index()].push_successor(to);
        self.states[to.index()].push_predecessor(from);
    }

    /// Index a state under the token that first reached it
    fn index_label(&mut self, label: &Token, id: StateId) {
        if !self.indexed.insert(id) {
            return;
        }
        match self.alphabet_slots.get(label) {
            Some(&slot) => self.alphabet[slot].1.push(id),
            None => {
                self.alphabet_slots.insert(label.clone(), self.alphabet.len());
                self.alphabet.push((label.clone(), vec![id]));
            }
        }
    }
}
