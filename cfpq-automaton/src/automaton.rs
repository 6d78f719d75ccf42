//! Finite automata with labeled transitions.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use cfpq_matrix::MatrixFamily;
use log::debug;

/// Dense index of a state.
pub type StateId = usize;

/// A finite automaton, deterministic or not. States are numbered `0..n`, and
/// this numbering is the row and column order of its boolean matrices.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Automaton {
    states: Vec<State>,
    start: BTreeSet<StateId>,
    finals: BTreeSet<StateId>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct State {
    /// External name, such as a graph vertex.
    name: Option<usize>,
    transitions: BTreeMap<String, BTreeSet<StateId>>,
    epsilon: BTreeSet<StateId>,
}

impl Automaton {
    /// Creates an automaton with no states.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a state.
    pub fn add_state(&mut self) -> StateId {
        self.states.push(State::default());
        self.states.len() - 1
    }

    /// Adds a state that stands for something external, such as a graph vertex.
    pub fn add_named_state(&mut self, name: usize) -> StateId {
        let id = self.add_state();
        self.states[id].name = Some(name);
        id
    }

    /// Returns the number of states.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Adds a transition on a label.
    pub fn add_transition(&mut self, from: StateId, label: &str, to: StateId) {
        assert!(to < self.states.len(), "transition to a missing state");
        self.states[from]
            .transitions
            .entry(label.to_string())
            .or_default()
            .insert(to);
    }

    /// Adds a transition that consumes no label.
    pub fn add_epsilon(&mut self, from: StateId, to: StateId) {
        assert!(to < self.states.len(), "transition to a missing state");
        self.states[from].epsilon.insert(to);
    }

    /// Marks a state as a start state.
    pub fn add_start(&mut self, state: StateId) {
        assert!(state < self.states.len(), "missing start state");
        self.start.insert(state);
    }

    /// Marks a state as a final state.
    pub fn add_final(&mut self, state: StateId) {
        assert!(state < self.states.len(), "missing final state");
        self.finals.insert(state);
    }

    /// Returns the start states.
    pub fn start_states(&self) -> &BTreeSet<StateId> {
        &self.start
    }

    /// Returns the final states.
    pub fn final_states(&self) -> &BTreeSet<StateId> {
        &self.finals
    }

    /// Checks whether a state is a start state.
    pub fn is_start(&self, state: StateId) -> bool {
        self.start.contains(&state)
    }

    /// Checks whether a state is a final state.
    pub fn is_final(&self, state: StateId) -> bool {
        self.finals.contains(&state)
    }

    /// Returns the external name of a state.
    pub fn state_name(&self, state: StateId) -> Option<usize> {
        self.states.get(state).and_then(|state| state.name)
    }

    /// Looks up a state by its external name.
    pub fn index_of(&self, name: usize) -> Option<StateId> {
        self.states
            .iter()
            .position(|state| state.name == Some(name))
    }

    /// Iterates over labeled transitions, ordered by source state and label.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, &str, StateId)> + '_ {
        self.states.iter().enumerate().flat_map(|(from, state)| {
            state.transitions.iter().flat_map(move |(label, targets)| {
                targets.iter().map(move |&to| (from, label.as_str(), to))
            })
        })
    }

    /// Returns the set of labels on transitions.
    pub fn labels(&self) -> BTreeSet<&str> {
        self.transitions().map(|(_, label, _)| label).collect()
    }

    /// Checks whether the automaton has a single start state, no epsilon transitions
    /// and at most one target per state and label.
    pub fn is_deterministic(&self) -> bool {
        self.start.len() <= 1
            && self.states.iter().all(|state| {
                state.epsilon.is_empty()
                    && state.transitions.values().all(|targets| targets.len() <= 1)
            })
    }

    /// Returns the states reachable from the given states through epsilon transitions
    /// alone, including the given states.
    pub fn epsilon_closure(&self, states: &BTreeSet<StateId>) -> BTreeSet<StateId> {
        let mut closure = states.clone();
        let mut work_stack: Vec<StateId> = states.iter().copied().collect();
        while let Some(state) = work_stack.pop() {
            for &next in &self.states[state].epsilon {
                if closure.insert(next) {
                    work_stack.push(next);
                }
            }
        }
        closure
    }

    fn step(&self, states: &BTreeSet<StateId>, label: &str) -> BTreeSet<StateId> {
        let mut result = BTreeSet::new();
        for &state in states {
            if let Some(targets) = self.states[state].transitions.get(label) {
                result.extend(targets.iter().copied());
            }
        }
        self.epsilon_closure(&result)
    }

    /// Checks whether the automaton accepts a sequence of labels.
    pub fn accepts<'a>(&self, word: impl IntoIterator<Item = &'a str>) -> bool {
        let mut current = self.epsilon_closure(&self.start);
        for label in word {
            current = self.step(&current, label);
            if current.is_empty() {
                return false;
            }
        }
        current.iter().any(|state| self.finals.contains(state))
    }

    /// Builds an equivalent deterministic automaton with the subset construction.
    /// Only subsets reachable from the start are created, and state `0` is the start.
    /// External names are dropped.
    pub fn determinize(&self) -> Automaton {
        let mut dfa = Automaton::new();
        let mut subsets: BTreeMap<BTreeSet<StateId>, StateId> = BTreeMap::new();
        let mut work_stack = vec![];

        let initial = self.epsilon_closure(&self.start);
        let initial_id = dfa.add_state();
        dfa.add_start(initial_id);
        subsets.insert(initial.clone(), initial_id);
        work_stack.push(initial);

        while let Some(subset) = work_stack.pop() {
            let id = subsets[&subset];
            if subset.iter().any(|state| self.finals.contains(state)) {
                dfa.add_final(id);
            }
            let labels: BTreeSet<&str> = subset
                .iter()
                .flat_map(|&state| self.states[state].transitions.keys())
                .map(String::as_str)
                .collect();
            for label in labels {
                let next = self.step(&subset, label);
                let next_id = match subsets.get(&next) {
                    Some(&next_id) => next_id,
                    None => {
                        let next_id = dfa.add_state();
                        subsets.insert(next.clone(), next_id);
                        work_stack.push(next);
                        next_id
                    }
                };
                dfa.add_transition(id, label, next_id);
            }
        }
        debug!(
            "determinized {} states into {} states",
            self.num_states(),
            dfa.num_states()
        );
        dfa
    }

    /// Builds the minimal deterministic automaton with Moore's partition refinement.
    /// States that are unreachable or cannot reach a final state are dropped, and state
    /// `0` is the start.
    pub fn minimize(&self) -> Automaton {
        let dfa = if self.is_deterministic() {
            self.clone()
        } else {
            self.determinize()
        };
        let start = match dfa.start.iter().next() {
            Some(&start) => start,
            None => return Automaton::new(),
        };

        let mut live = dfa.finals.clone();
        let mut changed = true;
        while changed {
            changed = false;
            for (from, _, to) in dfa.transitions() {
                if live.contains(&to) {
                    changed |= live.insert(from);
                }
            }
        }
        let mut kept = BTreeSet::new();
        kept.insert(start);
        let mut work_stack = vec![start];
        while let Some(state) = work_stack.pop() {
            for targets in dfa.states[state].transitions.values() {
                for &target in targets {
                    if live.contains(&target) && kept.insert(target) {
                        work_stack.push(target);
                    }
                }
            }
        }

        let mut class: BTreeMap<StateId, usize> = kept
            .iter()
            .map(|&state| (state, usize::from(dfa.is_final(state))))
            .collect();
        loop {
            let num_classes = class.values().collect::<BTreeSet<_>>().len();
            let mut signatures: BTreeMap<(usize, Vec<(&str, usize)>), usize> = BTreeMap::new();
            let mut refined = BTreeMap::new();
            for &state in &kept {
                let transitions = dfa.states[state]
                    .transitions
                    .iter()
                    .filter_map(|(label, targets)| {
                        let target = targets.iter().next()?;
                        class.get(target).map(|&c| (label.as_str(), c))
                    })
                    .collect();
                let next_class = signatures.len();
                let id = *signatures
                    .entry((class[&state], transitions))
                    .or_insert(next_class);
                refined.insert(state, id);
            }
            class = refined;
            if signatures.len() == num_classes {
                break;
            }
        }

        let mut result = Automaton::new();
        let mut ids: BTreeMap<usize, StateId> = BTreeMap::new();
        ids.insert(class[&start], result.add_state());
        result.add_start(0);
        let mut queue = VecDeque::new();
        queue.push_back(start);
        while let Some(state) = queue.pop_front() {
            let id = ids[&class[&state]];
            if dfa.is_final(state) {
                result.add_final(id);
            }
            for (label, targets) in &dfa.states[state].transitions {
                for target in targets {
                    if let Some(&c) = class.get(target) {
                        let next_id = match ids.get(&c) {
                            Some(&next_id) => next_id,
                            None => {
                                let next_id = result.add_state();
                                ids.insert(c, next_id);
                                queue.push_back(*target);
                                next_id
                            }
                        };
                        result.add_transition(id, label, next_id);
                    }
                }
            }
        }
        debug!(
            "minimized {} states into {} states",
            dfa.num_states(),
            result.num_states()
        );
        result
    }

    /// Decomposes the transition relation into one square boolean matrix per label.
    /// Rows and columns follow state indices.
    pub fn boolean_matrices(&self) -> MatrixFamily {
        let mut family = MatrixFamily::new(self.num_states());
        for (from, label, to) in self.transitions() {
            family.set(label, from, to);
        }
        family
    }
}
