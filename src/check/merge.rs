use std::collections::{BTreeMap, BTreeSet};

use crate::dump::Dump;
use crate::model::{MetricFamily, Sample, SampleIdentity};

/// Family blocks grouped by name, each group in source order.
pub fn families_by_name(dump: &Dump) -> BTreeMap<&str, Vec<&MetricFamily>> {
    let mut groups: BTreeMap<&str, Vec<&MetricFamily>> = BTreeMap::new();
    for family in dump.families() {
        groups.entry(family.name()).or_default().push(family);
    }
    groups
}

/// The samples of all blocks sharing a family name, combined into one
/// sequence per name.
pub fn samples_by_family(dump: &Dump) -> BTreeMap<&str, Vec<&Sample>> {
    families_by_name(dump)
        .into_iter()
        .map(|(name, group)| {
            let samples: Vec<&Sample> = group.into_iter().flat_map(|f| f.samples()).collect();
            (name, samples)
        })
        .collect()
}

/// Like `samples_by_family`, but only the distinct identities survive.
pub fn identities_by_family(dump: &Dump) -> BTreeMap<&str, BTreeSet<&SampleIdentity>> {
    samples_by_family(dump)
        .into_iter()
        .map(|(name, samples)| {
            let identities: BTreeSet<&SampleIdentity> =
                samples.into_iter().map(Sample::identity).collect();
            (name, identities)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParseError;

    #[test]
    fn test_merge_across_blocks() -> Result<(), ParseError> {
        let dump = Dump::from_text(
            r#"
# TYPE a counter
a{x="1"} 1
b 0
# TYPE a gauge
a{x="1"} 2
a{x="2"} 3
"#,
        )?;

        let groups = families_by_name(&dump);
        assert_eq!(groups.keys().cloned().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(groups["a"].len(), 2);
        assert_eq!(groups["b"].len(), 1);

        let samples = samples_by_family(&dump);
        let values: Vec<f64> = samples["a"].iter().map(|s| s.value()).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);

        let identities = identities_by_family(&dump);
        assert_eq!(identities["a"].len(), 2);
        assert_eq!(identities["b"].len(), 1);
        Ok(())
    }
}
