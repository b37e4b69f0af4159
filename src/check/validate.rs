use std::collections::BTreeMap;

use serde::Serialize;

use super::merge::{families_by_name, samples_by_family};
use crate::dump::Dump;
use crate::model::{MetricFamily, MetricName, SampleIdentity};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DuplicateSample {
    pub identity: SampleIdentity,
    pub count: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    /// Names declared by more than one block, with every conflicting block.
    pub duplicate_families: BTreeMap<MetricName, Vec<MetricFamily>>,
    /// Per family name, identities seen more than once across all blocks
    /// of that name.
    pub duplicate_samples: BTreeMap<MetricName, Vec<DuplicateSample>>,
}

impl ValidationResult {
    pub fn is_clean(&self) -> bool {
        self.duplicate_families.is_empty() && self.duplicate_samples.is_empty()
    }
}

pub fn validate(dump: &Dump) -> ValidationResult {
    ValidationResult {
        duplicate_families: find_duplicate_families(dump),
        duplicate_samples: find_duplicate_samples(dump),
    }
}

fn find_duplicate_families(dump: &Dump) -> BTreeMap<MetricName, Vec<MetricFamily>> {
    families_by_name(dump)
        .into_iter()
        .filter(|(_, group)| group.len() > 1)
        .map(|(name, group)| (name.to_owned(), group.into_iter().cloned().collect()))
        .collect()
}

fn find_duplicate_samples(dump: &Dump) -> BTreeMap<MetricName, Vec<DuplicateSample>> {
    let mut duplicates = BTreeMap::new();

    for (name, samples) in samples_by_family(dump) {
        let mut counts: BTreeMap<&SampleIdentity, usize> = BTreeMap::new();
        for sample in samples {
            *counts.entry(sample.identity()).or_insert(0) += 1;
        }

        let repeated: Vec<_> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(identity, count)| DuplicateSample {
                identity: identity.clone(),
                count,
            })
            .collect();

        if !repeated.is_empty() {
            duplicates.insert(name.to_owned(), repeated);
        }
    }

    duplicates
}
