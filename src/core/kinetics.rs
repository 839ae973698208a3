//! Mass-action intensity of a transition.

use super::net::TransitionRecord;

/// Compute the product of input place values raised to their arc cardinalities.
///
/// A transition without inputs has intensity one.
#[inline]
pub fn mass_action(record: &TransitionRecord, marking: &[f64]) -> f64 {
    record
        .inputs
        .iter()
        .fold(1., |acc, arc| acc * marking[arc.place].powf(arc.cardinality))
}
