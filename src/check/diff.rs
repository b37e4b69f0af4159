use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::merge::{families_by_name, identities_by_family};
use crate::dump::Dump;
use crate::model::{MetricFamily, MetricName, MetricType, SampleIdentity};

pub type SamplesByFamily = BTreeMap<MetricName, BTreeSet<SampleIdentity>>;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FamilyMetadata {
    #[serde(rename = "type")]
    pub typ: MetricType,
    pub help: Option<String>,
}

impl FamilyMetadata {
    fn of(family: &MetricFamily) -> Self {
        Self {
            typ: family.typ(),
            help: family.help().map(String::from),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetadataChange {
    pub from: FamilyMetadata,
    pub to: FamilyMetadata,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DiffResult {
    pub added_families: BTreeSet<MetricName>,
    pub removed_families: BTreeSet<MetricName>,
    pub added_samples_by_family: SamplesByFamily,
    pub removed_samples_by_family: SamplesByFamily,
    /// Type or help text of the first block of a family present on both
    /// sides differs.
    pub metadata_changes: BTreeMap<MetricName, MetadataChange>,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.added_families.is_empty()
            && self.removed_families.is_empty()
            && self.added_samples_by_family.is_empty()
            && self.removed_samples_by_family.is_empty()
            && self.metadata_changes.is_empty()
    }
}

/// Compares `to` against the baseline `from` by family name and sample
/// identity. Blocks sharing a name are merged on both sides first.
pub fn diff(from: &Dump, to: &Dump) -> DiffResult {
    let from_samples = identities_by_family(from);
    let to_samples = identities_by_family(to);

    let from_names: BTreeSet<&str> = from_samples.keys().cloned().collect();
    let to_names: BTreeSet<&str> = to_samples.keys().cloned().collect();

    let mut result = DiffResult {
        added_families: to_names.difference(&from_names).map(|n| n.to_string()).collect(),
        removed_families: from_names.difference(&to_names).map(|n| n.to_string()).collect(),
        ..DiffResult::default()
    };

    for name in from_names.intersection(&to_names) {
        let (before, after) = (&from_samples[name], &to_samples[name]);

        let added: BTreeSet<SampleIdentity> =
            after.difference(before).map(|&id| id.clone()).collect();
        if !added.is_empty() {
            result.added_samples_by_family.insert(name.to_string(), added);
        }

        let removed: BTreeSet<SampleIdentity> =
            before.difference(after).map(|&id| id.clone()).collect();
        if !removed.is_empty() {
            result.removed_samples_by_family.insert(name.to_string(), removed);
        }
    }

    result.metadata_changes = metadata_changes(from, to);
    result
}

fn metadata_changes(from: &Dump, to: &Dump) -> BTreeMap<MetricName, MetadataChange> {
    let before = families_by_name(from);
    let after = families_by_name(to);

    before
        .iter()
        .filter_map(|(name, blocks)| {
            let old = FamilyMetadata::of(blocks[0]);
            let new = FamilyMetadata::of(after.get(name)?[0]);
            if old == new {
                None
            } else {
                Some((name.to_string(), MetadataChange { from: old, to: new }))
            }
        })
        .collect()
}
