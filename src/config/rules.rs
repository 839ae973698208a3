//! Naming rules used to recover the semantics of places and transitions from their names.
//!
//! The host net only provides names, so age classes and infection categories have to be sniffed
//! from them. All patterns live in this one table. Entries are tested in the order given here and
//! the first match wins.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::N_AGE_CLASSES;
use crate::errors::TableError;

pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex, TableError> {
    Regex::new(pattern).map_err(|err| TableError::PatternError(pattern.to_string(), err))
}

/// Epidemiological category of an infection transition.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// A vaccinated or recovered individual gains resistance after contact.
    Boost,
    /// A susceptible individual becomes infected.
    PrimaryInfection,
    /// A previously recovered or vaccinated individual becomes infected again.
    SecondaryInfection,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategoryRule {
    pub category: Category,
    pub pattern: String,
}

impl CategoryRule {
    pub fn new(category: Category, pattern: &str) -> Self {
        Self {
            category,
            pattern: pattern.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NamingRules {
    /// Pattern selecting the places of each age class.
    #[serde(default = "default_age_classes")]
    pub age_classes: [String; N_AGE_CLASSES],

    /// Places matching this pattern only count events and do not hold individuals.
    #[serde(default = "default_counter_marker")]
    pub counter_marker: String,

    /// Pattern assigning an infection transition to the age class of the infectant.
    #[serde(default = "default_owner_markers")]
    pub owner_markers: [String; N_AGE_CLASSES],

    /// Death transitions carry their age class code right after this marker.
    #[serde(default = "default_death_marker")]
    pub death_marker: String,

    /// Length of the age class code following `death_marker`.
    #[serde(default = "default_death_code_length")]
    pub death_code_length: usize,

    /// Category rules in priority order.
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryRule>,
}

fn default_age_classes() -> [String; N_AGE_CLASSES] {
    ["a1".to_string(), "a2".to_string(), "a3".to_string()]
}

fn default_counter_marker() -> String {
    "Count".to_string()
}

fn default_owner_markers() -> [String; N_AGE_CLASSES] {
    ["b_a1".to_string(), "b_a2".to_string(), "b_a3".to_string()]
}

fn default_death_marker() -> String {
    "_a_".to_string()
}

fn default_death_code_length() -> usize {
    2
}

fn default_categories() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(Category::Boost, r"lambda[VR]i_I[sp]to[VR]ii_"),
        CategoryRule::new(Category::PrimaryInfection, r"lambdaS_I[sp]toIp_"),
        CategoryRule::new(Category::SecondaryInfection, r"lambda[VR]1_I[sp]toIs_"),
    ]
}

impl Default for NamingRules {
    fn default() -> Self {
        Self {
            age_classes: default_age_classes(),
            counter_marker: default_counter_marker(),
            owner_markers: default_owner_markers(),
            death_marker: default_death_marker(),
            death_code_length: default_death_code_length(),
            categories: default_categories(),
        }
    }
}

impl NamingRules {
    /// Extract the age class code of a death transition, e.g. `a2` from `Death_a_a2`.
    pub fn death_code<'a>(&self, transition: &'a str) -> Option<&'a str> {
        let start = transition.find(&self.death_marker)? + self.death_marker.len();
        transition.get(start..start + self.death_code_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn death_code() {
        let rules = NamingRules::default();
        assert_eq!(rules.death_code("Death_a_a2"), Some("a2"));
        assert_eq!(rules.death_code("DeathS_a_a3_L1"), Some("a3"));
        assert_eq!(rules.death_code("Death_a_"), None);
        assert_eq!(rules.death_code("Death"), None);
    }

    #[test]
    fn default_patterns_compile() {
        let rules = NamingRules::default();
        for pattern in rules
            .age_classes
            .iter()
            .chain(rules.owner_markers.iter())
            .chain(rules.categories.iter().map(|rule| &rule.pattern))
        {
            assert!(compile_pattern(pattern).is_ok());
        }
        assert!(matches!(
            compile_pattern("lambda[VR"),
            Err(TableError::PatternError(_, _))
        ));
    }

    #[test]
    fn boost_has_priority() {
        let rules = NamingRules::default();
        assert_eq!(rules.categories[0].category, Category::Boost);
        assert_eq!(rules.categories[1].category, Category::PrimaryInfection);
        assert_eq!(rules.categories[2].category, Category::SecondaryInfection);
    }
}
