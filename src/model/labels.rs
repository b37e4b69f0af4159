use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

pub type LabelName = String;

pub type LabelValue = String;

/// An unordered label set.
///
/// Backed by a sorted map, so two label sets written in a different order
/// compare and hash the same.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Labels(BTreeMap<LabelName, LabelValue>);

impl Labels {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the previous value if the label was already set.
    pub fn insert<N, V>(&mut self, name: N, value: V) -> Option<LabelValue>
    where
        N: Into<LabelName>,
        V: Into<LabelValue>,
    {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&LabelValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LabelName, &LabelValue)> {
        self.0.iter()
    }
}

impl<N, V> std::iter::FromIterator<(N, V)> for Labels
where
    N: Into<LabelName>,
    V: Into<LabelValue>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        )
    }
}

// Exposition syntax: {a="1",b="2"}
impl fmt::Display for Labels {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}=\"{}\"", name, escape_label_value(value))?;
        }
        write!(f, "}}")
    }
}

fn escape_label_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    escaped
}
