use serde::Serialize;

use super::sample::Sample;
use super::types::{MetricName, MetricType};

/// One contiguous block of a dump: the samples read under a single
/// `# TYPE`/`# HELP` preamble (or an implicit untyped one).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricFamily {
    name: MetricName,
    #[serde(rename = "type")]
    typ: MetricType,
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
    samples: Vec<Sample>,
}

impl MetricFamily {
    pub fn new<N: Into<MetricName>>(
        name: N,
        typ: MetricType,
        help: Option<String>,
        samples: Vec<Sample>,
    ) -> Self {
        Self {
            name: name.into(),
            typ,
            help,
            samples,
        }
    }

    #[inline]
    pub fn name(&self) -> &MetricName {
        &self.name
    }

    #[inline]
    pub fn typ(&self) -> MetricType {
        self.typ
    }

    #[inline]
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Samples in the order they appeared in the source.
    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

pub(crate) fn accepts(family_name: &str, typ: MetricType, sample_name: &str) -> bool {
    if sample_name == family_name {
        return true;
    }
    match sample_name.strip_prefix(family_name) {
        Some(suffix) => typ.sample_suffixes().contains(&suffix),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_sample_name() {
        #[rustfmt::skip]
        let tests = [
            ("foo", MetricType::Counter, "foo", true),
            ("foo", MetricType::Counter, "foo_total", false),
            ("foo", MetricType::Untyped, "foo_bucket", false),
            ("foo", MetricType::Histogram, "foo_bucket", true),
            ("foo", MetricType::Histogram, "foo_sum", true),
            ("foo", MetricType::Histogram, "foo_count", true),
            ("foo", MetricType::Histogram, "foobar", false),
            ("foo", MetricType::Histogram, "foo", true),
            ("foo", MetricType::Summary, "foo", true),
            ("foo", MetricType::Summary, "foo_count", true),
            ("foo", MetricType::Summary, "foo_bucket", false),
            ("foo", MetricType::Gauge, "bar", false),
        ];

        for (family, typ, sample, expected) in &tests {
            assert_eq!(
                accepts(family, *typ, sample),
                *expected,
                "while testing {} {} <- {}",
                typ,
                family,
                sample
            );
        }
    }
}
