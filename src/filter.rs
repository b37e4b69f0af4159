use regex::Regex;

use crate::dump::Dump;
use crate::error::Result;

/// Drops whole families whose name fully matches any of the patterns.
#[derive(Debug, Default)]
pub struct FamilyFilter {
    excludes: Vec<Regex>,
}

impl FamilyFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let excludes = patterns
            .iter()
            .map(|p| {
                Regex::new(&format!("^(?:{})$", p.as_ref()))
                    .map_err(|e| (format!("bad exclude pattern '{}'", p.as_ref()), e).into())
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { excludes })
    }

    pub fn is_empty(&self) -> bool {
        self.excludes.is_empty()
    }

    pub fn excludes(&self, family_name: &str) -> bool {
        self.excludes.iter().any(|re| re.is_match(family_name))
    }

    pub fn apply(&self, dump: Dump) -> Dump {
        if self.is_empty() {
            return dump;
        }

        let families = dump
            .families()
            .iter()
            .filter(|f| !self.excludes(f.name()))
            .cloned()
            .collect();
        Dump::new(dump.origin().clone(), families)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excludes_are_anchored() -> Result<()> {
        let filter = FamilyFilter::new(&["jvm_.*", "process_cpu_seconds"])?;

        assert!(filter.excludes("jvm_memory_bytes_used"));
        assert!(filter.excludes("process_cpu_seconds"));
        assert!(!filter.excludes("process_cpu_seconds_total"));
        assert!(!filter.excludes("cassandra_jvm_threads"));
        Ok(())
    }

    #[test]
    fn test_bad_pattern() {
        match FamilyFilter::new(&["jvm_("]) {
            Err(e) => assert!(e.to_string().starts_with("bad exclude pattern 'jvm_('")),
            Ok(filter) => panic!("expected error but found {:?}", filter),
        }
    }

    #[test]
    fn test_apply() -> Result<()> {
        let dump = Dump::from_text("jvm_threads 4\nup 1\n# TYPE jvm_threads gauge\njvm_threads 5\n")?;

        let filtered = FamilyFilter::new(&["jvm_.*"])?.apply(dump.clone());
        assert_eq!(filtered.origin(), dump.origin());
        assert_eq!(
            filtered.families().iter().map(|f| f.name().as_str()).collect::<Vec<_>>(),
            vec!["up"]
        );

        let unfiltered = FamilyFilter::new::<&str>(&[])?.apply(dump.clone());
        assert_eq!(unfiltered, dump);
        Ok(())
    }
}
