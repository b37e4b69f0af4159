use std::fmt;

use serde::Serialize;

use super::labels::Labels;
use super::types::{MetricName, SampleValue, Timestamp};

/// What makes two samples "the same time series": the sample name and its
/// label set. Values and timestamps never take part in comparison.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct SampleIdentity {
    name: MetricName,
    labels: Labels,
}

impl SampleIdentity {
    pub fn new<N: Into<MetricName>>(name: N, labels: Labels) -> Self {
        Self {
            name: name.into(),
            labels,
        }
    }

    #[inline]
    pub fn name(&self) -> &MetricName {
        &self.name
    }

    #[inline]
    pub fn labels(&self) -> &Labels {
        &self.labels
    }
}

impl fmt::Display for SampleIdentity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.name, self.labels)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sample {
    #[serde(flatten)]
    identity: SampleIdentity,
    value: SampleValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<Timestamp>,
}

impl Sample {
    pub fn new<N: Into<MetricName>>(
        name: N,
        labels: Labels,
        value: SampleValue,
        timestamp: Option<Timestamp>,
    ) -> Self {
        Self {
            identity: SampleIdentity::new(name, labels),
            value,
            timestamp,
        }
    }

    #[inline]
    pub fn identity(&self) -> &SampleIdentity {
        &self.identity
    }

    #[inline]
    pub fn name(&self) -> &MetricName {
        self.identity.name()
    }

    #[inline]
    pub fn labels(&self) -> &Labels {
        self.identity.labels()
    }

    #[inline]
    pub fn value(&self) -> SampleValue {
        self.value
    }

    #[inline]
    pub fn timestamp(&self) -> Option<Timestamp> {
        self.timestamp
    }
}
