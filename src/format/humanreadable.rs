use std::collections::BTreeSet;

use super::formatter::{Formatter, Report};
use crate::check::{DiffResult, FamilyMetadata, ValidationResult};
use crate::error::Result;
use crate::model::SampleIdentity;

pub struct HumanReadableFormatter {
    verbose: bool,
}

impl HumanReadableFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn format_validation(&self, result: &ValidationResult) -> Vec<String> {
        if result.is_clean() {
            return vec![String::from("No problems found.")];
        }

        let mut lines = vec![];

        if !result.duplicate_families.is_empty() {
            lines.push(String::from("The following metric families are duplicated:"));
            for (name, blocks) in &result.duplicate_families {
                lines.push(format!("\t{}", name));
                if self.verbose {
                    for block in blocks {
                        lines.push(format!(
                            "\t\t{} with {} sample(s)",
                            block.typ(),
                            block.samples().len()
                        ));
                    }
                }
            }
        }

        for (name, duplicates) in &result.duplicate_samples {
            lines.push(format!(
                "Metric family \"{}\" contains duplicate samples:",
                name
            ));
            for duplicate in duplicates {
                lines.push(format!(
                    "\t{} ({} occurrences)",
                    duplicate.identity, duplicate.count
                ));
            }
        }

        lines
    }

    fn format_diff(&self, result: &DiffResult) -> Vec<String> {
        if result.is_empty() {
            return vec![String::from("No differences found.")];
        }

        let mut lines = vec![];

        if !result.added_families.is_empty() {
            lines.push(String::from("The following metric families are new:"));
            lines.extend(result.added_families.iter().map(|n| format!("\t{}", n)));
        }

        if !result.removed_families.is_empty() {
            lines.push(String::from("The following metric families no longer exist:"));
            lines.extend(result.removed_families.iter().map(|n| format!("\t{}", n)));
        }

        for (name, samples) in &result.added_samples_by_family {
            lines.push(format!(
                "The following samples are new for metric family \"{}\":",
                name
            ));
            lines.extend(self.format_samples(samples));
        }

        for (name, samples) in &result.removed_samples_by_family {
            lines.push(format!(
                "The following samples no longer exist for metric family \"{}\":",
                name
            ));
            lines.extend(self.format_samples(samples));
        }

        for (name, change) in &result.metadata_changes {
            lines.push(format!("The metadata of metric family \"{}\" changed:", name));
            if change.from.typ != change.to.typ {
                lines.push(format!("\ttype: {} -> {}", change.from.typ, change.to.typ));
            }
            if change.from.help != change.to.help {
                lines.push(format!(
                    "\thelp: {} -> {}",
                    format_help(&change.from),
                    format_help(&change.to)
                ));
            }
        }

        lines
    }

    fn format_samples<'a>(
        &self,
        samples: &'a BTreeSet<SampleIdentity>,
    ) -> impl Iterator<Item = String> + 'a {
        samples.iter().map(|id| format!("\t{}", id))
    }
}

fn format_help(metadata: &FamilyMetadata) -> String {
    match &metadata.help {
        Some(help) => format!("{:?}", help),
        None => String::from("(none)"),
    }
}

impl Formatter for HumanReadableFormatter {
    fn format(&self, report: &Report) -> Result<Vec<u8>> {
        let lines = match report {
            Report::Validation(result) => self.format_validation(result),
            Report::Diff(result) => self.format_diff(result),
        };
        Ok(String::into_bytes(lines.join("\n")))
    }
}
