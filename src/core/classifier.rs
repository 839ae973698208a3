//! Classification of infection transitions by name.
//!
//! A transition name is resolved into
//!
//! 1. the age class owning the transition, i.e. the class of the infectant whose population size
//!    normalizes the force of infection, and
//! 2. the contact rate of the transition, scaled by the probability of its category.
//!
//! Both resolutions are cached permanently per transition name.

use regex::Regex;

use super::N_AGE_CLASSES;
use super::cache::NameCache;
use super::tables::DataTables;
use crate::config::{Category, NamingRules, compile_pattern};
use crate::errors::{RateError, Result, TableError};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassifiedTransition {
    /// Contact rate of the first matching contact pattern.
    pub base_rate: f64,
    pub category: Category,
    /// `base_rate` scaled by the probability of `category`.
    pub rate: f64,
}

pub struct TransitionClassifier {
    owners: [Regex; N_AGE_CLASSES],
    categories: Vec<(Category, Regex)>,
    owner_cache: NameCache<usize>,
    rate_cache: NameCache<ClassifiedTransition>,
}

impl TransitionClassifier {
    pub fn new(rules: &NamingRules) -> std::result::Result<Self, TableError> {
        let [b1, b2, b3] = &rules.owner_markers;
        let categories = rules
            .categories
            .iter()
            .map(|rule| Ok((rule.category, compile_pattern(&rule.pattern)?)))
            .collect::<std::result::Result<Vec<_>, TableError>>()?;
        Ok(Self {
            owners: [compile_pattern(b1)?, compile_pattern(b2)?, compile_pattern(b3)?],
            categories,
            owner_cache: NameCache::new(),
            rate_cache: NameCache::new(),
        })
    }

    /// Category of a transition name. Rules are tested in priority order, so a name matching
    /// several rules gets the first one.
    pub fn category_of(&self, name: &str) -> Option<Category> {
        self.categories
            .iter()
            .find(|(_, pattern)| pattern.is_match(name))
            .map(|(category, _)| *category)
    }

    /// Index of the age class owning an infection transition.
    pub fn owner(&self, name: &str) -> Result<usize> {
        self.owner_cache.get_or_try_insert_with(name, || {
            self.owners
                .iter()
                .position(|marker| marker.is_match(name))
                .ok_or_else(|| RateError::UnknownAgeClass(name.to_string()))
        })
    }

    /// Resolve the category adjusted contact rate of an infection transition.
    pub fn classify(&self, name: &str, tables: &DataTables) -> Result<ClassifiedTransition> {
        self.rate_cache.get_or_try_insert_with(name, || {
            let classified = self.resolve(name, tables)?;
            log::debug!("Classified {name} as {classified:?}");
            Ok(classified)
        })
    }

    fn resolve(&self, name: &str, tables: &DataTables) -> Result<ClassifiedTransition> {
        let base_rate = tables
            .contacts()
            .iter()
            .find(|contact| contact.matches(name))
            .map(|contact| contact.rate)
            .ok_or_else(|| RateError::UnclassifiedTransition(name.to_string()))?;
        let category = self
            .category_of(name)
            .ok_or_else(|| RateError::UnclassifiedTransition(name.to_string()))?;

        Ok(ClassifiedTransition {
            base_rate,
            category,
            rate: base_rate * tables.probabilities().of(category),
        })
    }

    /// Number of classifications answered from the cache.
    pub fn cache_hits(&self) -> u64 {
        self.rate_cache.hits()
    }

    pub fn reset(&self) {
        self.owner_cache.clear();
        self.rate_cache.clear();
    }
}
