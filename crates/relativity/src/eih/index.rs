use std::collections::HashMap;

use super::Error;

/// Stable name to index table shared by every cache in the engine.
///
/// Accelerated bodies take indices `0..accelerated_count` in the order given;
/// accelerating-only bodies follow in their own order.
#[derive(Debug, Clone)]
pub(super) struct BodyIndex {
    names: Vec<String>,
    lookup: HashMap<String, usize>,
    accelerated_count: usize,
    accelerating: Vec<usize>,
    is_accelerating: Vec<bool>,
}

impl BodyIndex {
    pub(super) fn allocate(accelerated: &[&str], accelerating: &[&str]) -> Result<Self, Error> {
        let mut names: Vec<String> = Vec::with_capacity(accelerated.len() + accelerating.len());
        let mut lookup = HashMap::new();

        for &name in accelerated {
            if lookup.insert(name.to_owned(), names.len()).is_some() {
                return Err(Error::DuplicateListEntry(name.to_owned()));
            }
            names.push(name.to_owned());
        }
        let accelerated_count = names.len();

        let mut accelerating_indices = Vec::with_capacity(accelerating.len());
        for &name in accelerating {
            let index = if let Some(&index) = lookup.get(name) {
                index
            } else {
                let index = names.len();
                lookup.insert(name.to_owned(), index);
                names.push(name.to_owned());
                index
            };
            if accelerating_indices.contains(&index) {
                return Err(Error::DuplicateListEntry(name.to_owned()));
            }
            accelerating_indices.push(index);
        }

        let mut is_accelerating = vec![false; names.len()];
        for &index in &accelerating_indices {
            is_accelerating[index] = true;
        }

        Ok(Self {
            names,
            lookup,
            accelerated_count,
            accelerating: accelerating_indices,
            is_accelerating,
        })
    }

    /// Number of distinct bodies across both lists.
    pub(super) fn len(&self) -> usize {
        self.names.len()
    }

    pub(super) fn accelerated_count(&self) -> usize {
        self.accelerated_count
    }

    /// Indices of the accelerating bodies, in the order they were listed.
    pub(super) fn accelerating(&self) -> &[usize] {
        &self.accelerating
    }

    pub(super) fn is_accelerated(&self, index: usize) -> bool {
        index < self.accelerated_count
    }

    pub(super) fn is_accelerating(&self, index: usize) -> bool {
        self.is_accelerating.get(index).copied().unwrap_or(false)
    }

    pub(super) fn index_of(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    pub(super) fn name(&self, index: usize) -> &str {
        &self.names[index]
    }

    pub(super) fn names(&self) -> &[String] {
        &self.names
    }
}
