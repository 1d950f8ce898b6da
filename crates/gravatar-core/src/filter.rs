//! Registration of the `gravatar` filter with a template engine.
//!
//! Engines are reached through [`FilterRegistry`]: a name plus a
//! string-to-string function, registered explicitly during setup.

use crate::resolver::AvatarResolver;
use std::collections::BTreeMap;
use std::fmt;

pub const FILTER_NAME: &str = "gravatar";

type BoxedFilter = Box<dyn Fn(&str) -> String + Send + Sync>;

pub trait FilterRegistry {
    fn register_filter<F>(&mut self, name: &str, filter: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static;
}

/// Registers the `gravatar` filter backed by `resolver`.
pub fn register<R: FilterRegistry>(registry: &mut R, resolver: AvatarResolver) {
    registry.register_filter(FILTER_NAME, move |input| {
        resolver.resolve(input).into_string()
    });
}

/// Name-to-function table for collaborators that only need lookup.
#[derive(Default)]
pub struct FilterSet {
    filters: BTreeMap<String, BoxedFilter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, name: &str, input: &str) -> Option<String> {
        self.filters.get(name).map(|filter| filter(input))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl FilterRegistry for FilterSet {
    fn register_filter<F>(&mut self, name: &str, filter: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.filters.insert(name.to_string(), Box::new(filter));
    }
}

impl fmt::Debug for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.filters.keys()).finish()
    }
}

#[cfg(feature = "minijinja")]
impl<'source> FilterRegistry for minijinja::Environment<'source> {
    fn register_filter<F>(&mut self, name: &str, filter: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.add_filter(name.to_string(), move |value: String| filter(&value));
    }
}
