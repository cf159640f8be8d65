use std::collections::BTreeMap;

use crate::normalize::TextCollator;
use crate::{Field, Job};

/// One distinct value of a field and how many jobs carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub value: String,
    pub count: usize,
}

/// Distinct non-empty values per filterable field, in collation order.
///
/// Built once per data load and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterOptionsIndex {
    fields: BTreeMap<Field, Vec<OptionEntry>>,
}

impl FilterOptionsIndex {
    pub fn build(jobs: &[Job], fields: &[Field]) -> Self {
        let fields = fields
            .iter()
            .map(|field| (field.clone(), collect_entries(jobs, field)))
            .collect();
        Self { fields }
    }

    /// Entries for `field`; empty when the field was not indexed.
    pub fn entries(&self, field: &Field) -> &[OptionEntry] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn values(&self, field: &Field) -> Vec<&str> {
        self.entries(field)
            .iter()
            .map(|entry| entry.value.as_str())
            .collect()
    }

    pub fn count(&self, field: &Field, value: &str) -> usize {
        self.entries(field)
            .iter()
            .find(|entry| entry.value == value)
            .map_or(0, |entry| entry.count)
    }
}

fn collect_entries(jobs: &[Job], field: &Field) -> Vec<OptionEntry> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in jobs.iter().filter_map(|job| job.field(field)) {
        *counts.entry(value).or_default() += 1;
    }

    let mut entries: Vec<OptionEntry> = counts
        .into_iter()
        .map(|(value, count)| OptionEntry {
            value: value.to_string(),
            count,
        })
        .collect();
    let mut collator = TextCollator::new();
    entries.sort_by(|a, b| collator.compare(&a.value, &b.value));
    entries
}
