//! Population sizes of the age classes.
//!
//! Places are assigned to an age class by name the first time the class is queried. The
//! assignment is permanent for the run. Class sizes are cached together with the simulation time
//! they were computed at, so within one time instant every rate function asking for a class size
//! shares a single summation.

use parking_lot::Mutex;
use regex::Regex;

use crate::config::{NamingRules, compile_pattern};
use crate::core::N_AGE_CLASSES;
use crate::core::net::Net;
use crate::errors::{RateError, Result, TableError};

#[derive(Clone, Debug)]
struct AgeClass {
    members: Option<Vec<usize>>,
    size: f64,
    cached_at: f64,
    summations: usize,
}

impl AgeClass {
    fn new() -> Self {
        Self {
            members: None,
            size: 0.,
            cached_at: -1.,
            summations: 0,
        }
    }

    fn refresh(&mut self, marking: &[f64], time: f64) {
        self.size = self
            .members
            .iter()
            .flatten()
            .map(|&place| marking[place])
            .sum();
        self.cached_at = time;
        self.summations += 1;
    }
}

pub struct AgeClassRegistry {
    patterns: [Regex; N_AGE_CLASSES],
    counter: Regex,
    classes: Mutex<[AgeClass; N_AGE_CLASSES]>,
}

impl AgeClassRegistry {
    pub fn new(rules: &NamingRules) -> std::result::Result<Self, TableError> {
        let [a1, a2, a3] = &rules.age_classes;
        Ok(Self {
            patterns: [compile_pattern(a1)?, compile_pattern(a2)?, compile_pattern(a3)?],
            counter: compile_pattern(&rules.counter_marker)?,
            classes: Mutex::new(std::array::from_fn(|_| AgeClass::new())),
        })
    }

    fn resolve_members(&self, class: usize, net: &Net) -> Vec<usize> {
        net.places()
            .iter()
            .filter(|(name, _)| {
                self.patterns[class].is_match(name) && !self.counter.is_match(name)
            })
            .map(|(_, &place)| place)
            .collect()
    }

    /// Population size of an age class at `time`.
    ///
    /// The size is only summed again if `time` differs from the time of the cached value.
    pub fn population_of(
        &self,
        class: usize,
        net: &Net,
        marking: &[f64],
        time: f64,
    ) -> Result<f64> {
        let mut classes = self.classes.lock();
        let entry = classes
            .get_mut(class)
            .ok_or_else(|| RateError::UnknownAgeClass(format!("a{}", class + 1)))?;

        if entry.members.is_none() {
            let members = self.resolve_members(class, net);
            log::debug!(
                "Age class {} consists of {} places: {:?}",
                class + 1,
                members.len(),
                members
            );
            entry.members = Some(members);
        } else if entry.cached_at == time {
            return Ok(entry.size);
        }

        entry.refresh(marking, time);
        Ok(entry.size)
    }

    /// Population size summed over all age classes.
    pub fn total_population(&self, net: &Net, marking: &[f64], time: f64) -> Result<f64> {
        (0..N_AGE_CLASSES).try_fold(0., |total, class| {
            Ok(total + self.population_of(class, net, marking, time)?)
        })
    }

    /// Places assigned to an age class, if already resolved.
    pub fn members(&self, class: usize) -> Option<Vec<usize>> {
        self.classes.lock().get(class)?.members.clone()
    }

    /// Number of times the size of an age class has been summed.
    pub fn summations(&self, class: usize) -> usize {
        self.classes
            .lock()
            .get(class)
            .map_or(0, |entry| entry.summations)
    }

    /// Forget memberships and cached sizes.
    pub fn reset(&self) {
        *self.classes.lock() = std::array::from_fn(|_| AgeClass::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_net() -> Net {
        let mut net = Net::new();
        for name in [
            "S_a1", "Ip_a1", "R_a1", "S_a2", "Is_a2", "S_a3", "CountInf_a1", "CountInf_a3",
        ] {
            net.add_place(name);
        }
        net
    }

    #[test]
    fn membership_excludes_counters() {
        let net = sample_net();
        let registry = AgeClassRegistry::new(&NamingRules::default()).unwrap();
        let marking = [1., 2., 3., 4., 5., 6., 100., 200.];

        assert_eq!(registry.members(0), None);
        registry.population_of(0, &net, &marking, 0.).unwrap();

        let mut members = registry.members(0).unwrap();
        members.sort();
        assert_eq!(members, vec![0, 1, 2]);
    }

    #[test]
    fn population_is_direct_sum() {
        let net = sample_net();
        let registry = AgeClassRegistry::new(&NamingRules::default()).unwrap();
        let marking = [1., 2., 3., 4., 5., 6., 100., 200.];

        assert_eq!(registry.population_of(0, &net, &marking, 0.).unwrap(), 6.);
        assert_eq!(registry.population_of(1, &net, &marking, 0.).unwrap(), 9.);
        assert_eq!(registry.population_of(2, &net, &marking, 0.).unwrap(), 6.);
        assert_eq!(registry.total_population(&net, &marking, 0.).unwrap(), 21.);
    }

    #[test]
    fn cached_within_time_instant() {
        let net = sample_net();
        let registry = AgeClassRegistry::new(&NamingRules::default()).unwrap();
        let marking = [1., 2., 3., 4., 5., 6., 100., 200.];
        let changed = [10., 2., 3., 4., 5., 6., 100., 200.];

        assert_eq!(registry.population_of(0, &net, &marking, 1.).unwrap(), 6.);
        // same time, the cached value is returned even though the marking changed
        assert_eq!(registry.population_of(0, &net, &changed, 1.).unwrap(), 6.);
        assert_eq!(registry.summations(0), 1);

        // new time, recompute from the known members
        assert_eq!(registry.population_of(0, &net, &changed, 1.5).unwrap(), 15.);
        assert_eq!(registry.summations(0), 2);
    }

    #[test]
    fn membership_is_permanent() {
        let net = sample_net();
        let registry = AgeClassRegistry::new(&NamingRules::default()).unwrap();
        let marking = [1., 2., 3., 4., 5., 6., 100., 200.];
        registry.population_of(1, &net, &marking, 0.).unwrap();

        let mut grown = sample_net();
        grown.add_place("R_a2");
        let marking = [1., 2., 3., 4., 5., 6., 100., 200., 50.];
        assert_eq!(registry.population_of(1, &grown, &marking, 1.).unwrap(), 9.);
    }

    #[test]
    fn reset_forgets_members() {
        let net = sample_net();
        let registry = AgeClassRegistry::new(&NamingRules::default()).unwrap();
        let marking = [1., 2., 3., 4., 5., 6., 100., 200.];
        registry.population_of(2, &net, &marking, 0.).unwrap();
        registry.reset();
        assert_eq!(registry.members(2), None);
        assert_eq!(registry.summations(2), 0);
    }

    #[test]
    fn unknown_class() {
        let net = sample_net();
        let registry = AgeClassRegistry::new(&NamingRules::default()).unwrap();
        assert!(matches!(
            registry.population_of(3, &net, &[], 0.),
            Err(RateError::UnknownAgeClass(_))
        ));
    }
}
