//! Exact frequency counting with deterministic ordering

use serde::Serialize;
use std::collections::HashMap;

/// A distinct value and how often it occurred
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: usize,
}

/// Counts of distinct values, ordered by descending count.
///
/// Ties keep the order in which values were first seen.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
    first_seen: Vec<String>,
    total: usize,
}

impl FrequencyTable {
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<FrequencyEntry> = Vec::new();
        let mut total = 0usize;

        for value in values {
            let value = value.as_ref();
            total += 1;
            match index.get(value) {
                Some(&slot) => entries[slot].count += 1,
                None => {
                    index.insert(value.to_string(), entries.len());
                    entries.push(FrequencyEntry {
                        value: value.to_string(),
                        count: 1,
                    });
                }
            }
        }

        let first_seen = entries.iter().map(|e| e.value.clone()).collect();
        // stable sort keeps first-seen order among equal counts
        entries.sort_by(|a, b| b.count.cmp(&a.count));

        FrequencyTable {
            entries,
            first_seen,
            total,
        }
    }

    /// The `k` most frequent values
    pub fn top(&self, k: usize) -> &[FrequencyEntry] {
        &self.entries[..k.min(self.entries.len())]
    }

    /// The single most frequent value, `None` when nothing was counted
    pub fn most_common(&self) -> Option<&FrequencyEntry> {
        self.entries.first()
    }

    /// Distinct values in the order they first appeared
    pub fn first_seen(&self) -> &[String] {
        &self.first_seen
    }

    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of values counted, duplicates included
    pub fn total(&self) -> usize {
        self.total
    }
}

/// Top-`k` values of a sequence as `(value, count)` pairs
pub fn top_k<I, S>(values: I, k: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    FrequencyTable::from_values(values)
        .top(k)
        .iter()
        .map(|e| (e.value.clone(), e.count))
        .collect()
}
