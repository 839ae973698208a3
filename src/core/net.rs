//! Host-side description of the net the rate callbacks are evaluated on.
//!
//! The host engine owns the net. It hands the rate callbacks the place and transition names
//! together with the input arcs of every transition. The callbacks only ever read from it.

use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap};

use crate::errors::{RateError, Result};

/// A single input arc of a transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputArc {
    pub place: usize,
    pub cardinality: f64,
}

/// Input arcs of a transition in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionRecord {
    pub inputs: SmallVec<[InputArc; 4]>,
}

impl TransitionRecord {
    pub fn new(inputs: &[(usize, f64)]) -> Self {
        Self {
            inputs: inputs
                .iter()
                .map(|&(place, cardinality)| InputArc { place, cardinality })
                .collect(),
        }
    }
}

/// Place and transition metadata of a net.
///
/// Places are kept in an ordered map, such that scanning them by name is deterministic.
#[derive(Clone, Debug, Default)]
pub struct Net {
    places: BTreeMap<String, usize>,
    transition_index: HashMap<String, usize>,
    transition_names: Vec<String>,
    transitions: Vec<TransitionRecord>,
}

impl Net {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a place and return its index.
    pub fn add_place(&mut self, name: &str) -> usize {
        let next = self.places.len();
        *self.places.entry(name.to_string()).or_insert(next)
    }

    /// Register a transition with its input arcs and return its index.
    pub fn add_transition(&mut self, name: &str, record: TransitionRecord) -> usize {
        let index = self.transition_names.len();
        self.transition_index.insert(name.to_string(), index);
        self.transition_names.push(name.to_string());
        self.transitions.push(record);
        index
    }

    pub fn places(&self) -> &BTreeMap<String, usize> {
        &self.places
    }

    pub fn n_places(&self) -> usize {
        self.places.len()
    }

    pub fn place(&self, name: &str) -> Result<usize> {
        self.places
            .get(name)
            .copied()
            .ok_or_else(|| RateError::UnknownPlace(name.to_string()))
    }

    pub fn transition_index(&self, name: &str) -> Option<usize> {
        self.transition_index.get(name).copied()
    }

    pub fn transition_name(&self, transition: usize) -> Result<&String> {
        self.transition_names
            .get(transition)
            .ok_or(RateError::UnknownTransition(transition))
    }

    pub fn transition(&self, transition: usize) -> Result<&TransitionRecord> {
        self.transitions
            .get(transition)
            .ok_or(RateError::UnknownTransition(transition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_place_is_idempotent() {
        let mut net = Net::new();
        assert_eq!(net.add_place("S_a1"), 0);
        assert_eq!(net.add_place("I_a1"), 1);
        assert_eq!(net.add_place("S_a1"), 0);
        assert_eq!(net.n_places(), 2);
    }

    #[test]
    fn lookup_transitions() {
        let mut net = Net::new();
        let s = net.add_place("S");
        let i = net.add_place("I");
        let t = net.add_transition("Infection", TransitionRecord::new(&[(s, 1.), (i, 1.)]));

        assert_eq!(net.transition_index("Infection"), Some(t));
        assert_eq!(net.transition_name(t).unwrap(), "Infection");
        assert_eq!(net.transition(t).unwrap().inputs.len(), 2);
        assert!(matches!(
            net.transition(7),
            Err(RateError::UnknownTransition(7))
        ));
        assert!(matches!(net.place("R"), Err(RateError::UnknownPlace(_))));
    }
}
