//! Deduplication of classified entries across every method of every interface

use super::classifier::classify;
use super::entries::{EnumFormatterEntry, GenericFormatterEntry, RawEntry};
use crate::core::ServiceInterfaceDefinition;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

/// Entries keyed by full name; the first entry seen for a name wins and
/// later duplicates are dropped.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct EntrySet<T> {
    entries: Vec<T>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl<T> Default for EntrySet<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Clone> EntrySet<T> {
    /// Insert unless an entry with the same key exists. Returns whether the
    /// entry was added.
    pub fn insert(&mut self, key: &str, entry: T) -> bool {
        if self.contains(key) {
            return false;
        }
        self.index.insert(key.to_string(), self.entries.len());
        self.entries.push(entry);
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by key
    pub fn sorted_by_key<F>(&self, key: F) -> Vec<T>
    where
        F: Fn(&T) -> &str,
    {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| key(a).cmp(key(b)));
        sorted
    }
}

/// The two deduplicated entry collections of a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolverEntries {
    pub generic: EntrySet<GenericFormatterEntry>,
    pub enums: EntrySet<EnumFormatterEntry>,
}

impl ResolverEntries {
    pub fn add(&mut self, entry: RawEntry) {
        match entry {
            RawEntry::Generic(generic) => {
                let key = generic.full_name.clone();
                self.generic.insert(&key, generic);
            }
            RawEntry::Enum(enum_entry) => {
                let key = enum_entry.full_name.clone();
                self.enums.insert(&key, enum_entry);
            }
        }
    }

    pub fn sorted_generic(&self) -> Vec<GenericFormatterEntry> {
        self.generic.sorted_by_key(|e| e.full_name.as_str())
    }

    pub fn sorted_enums(&self) -> Vec<EnumFormatterEntry> {
        self.enums.sorted_by_key(|e| e.full_name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.generic.is_empty() && self.enums.is_empty()
    }
}

/// Fold raw entries into deduplicated sets
pub fn aggregate<I>(raw: I) -> ResolverEntries
where
    I: IntoIterator<Item = RawEntry>,
{
    raw.into_iter()
        .fold(ResolverEntries::default(), |mut acc, entry| {
            acc.add(entry);
            acc
        })
}

/// Classify every method of every definition and aggregate the result.
///
/// With `parallel` set, methods are classified on the rayon pool. The
/// per-method results are collected in input order and merged sequentially,
/// so the outcome is identical to a sequential run.
pub fn collect_entries(
    definitions: &[ServiceInterfaceDefinition],
    parallel: bool,
) -> ResolverEntries {
    let methods: Vec<_> = definitions.iter().flat_map(|d| d.methods.iter()).collect();

    let per_method: Vec<Vec<RawEntry>> = if parallel {
        methods.par_iter().map(|m| classify(m)).collect()
    } else {
        methods.iter().map(|m| classify(m)).collect()
    };

    let entries = aggregate(per_method.into_iter().flatten());
    log::debug!(
        "Collected {} generic and {} enum formatter entries from {} methods",
        entries.generic.len(),
        entries.enums.len(),
        methods.len()
    );
    entries
}
