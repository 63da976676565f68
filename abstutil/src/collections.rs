use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Counts occurrences of keys. Incrementing a key that isn't present creates it, so a fixed set
/// of expected keys and ad-hoc keys discovered at runtime share the same buckets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counter<T: Ord> {
    map: BTreeMap<T, usize>,
}

impl<T: Ord> Default for Counter<T> {
    fn default() -> Counter<T> {
        Counter::new()
    }
}

impl<T: Ord> Counter<T> {
    pub fn new() -> Counter<T> {
        Counter {
            map: BTreeMap::new(),
        }
    }

    /// Adds `amount` to the key, returning the new count.
    pub fn add(&mut self, key: T, amount: usize) -> usize {
        let entry = self.map.entry(key).or_insert(0);
        *entry += amount;
        *entry
    }

    pub fn inc(&mut self, key: T) -> usize {
        self.add(key, 1)
    }

    /// Makes sure the key exists, without changing a present count.
    pub fn touch(&mut self, key: T) {
        self.map.entry(key).or_insert(0);
    }

    pub fn get<Q>(&self, key: &Q) -> usize
    where
        T: std::borrow::Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.get(key).cloned().unwrap_or(0)
    }

    /// Sum of every count.
    pub fn sum(&self) -> usize {
        self.map.values().sum()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> {
        self.map.iter().map(|(k, v)| (k, *v))
    }

    /// Drops every key whose count fails the predicate.
    pub fn retain<F: FnMut(&T, usize) -> bool>(&mut self, mut keep: F) {
        self.map.retain(|k, v| keep(k, *v));
    }

    /// Folds another counter into this one. The combination is associative and commutative.
    pub fn extend(&mut self, other: Counter<T>) {
        for (key, cnt) in other.map {
            self.add(key, cnt);
        }
    }
}

impl<T: Ord> FromIterator<T> for Counter<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Counter<T> {
        let mut counter = Counter::new();
        for key in iter {
            counter.inc(key);
        }
        counter
    }
}
