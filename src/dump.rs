use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::model::{MetricFamily, MetricName};
use crate::parser::{parse_exposition, ParseError};

/// Where a dump was read from.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    File(PathBuf),
    Stdin,
    Memory,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Origin::File(path) => write!(f, "{}", path.display()),
            Origin::Stdin => write!(f, "<stdin>"),
            Origin::Memory => write!(f, "<memory>"),
        }
    }
}

/// One complete, parsed snapshot of exposition text.
///
/// Families are kept exactly as they appeared, including families that
/// share a name. There is no way to change a dump once it is built.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dump {
    origin: Origin,
    families: Vec<MetricFamily>,
}

impl Dump {
    pub(crate) fn new(origin: Origin, families: Vec<MetricFamily>) -> Self {
        Self { origin, families }
    }

    pub fn from_text(text: &str) -> std::result::Result<Self, ParseError> {
        Self::parse(Origin::Memory, text)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| (format!("couldn't read '{}'", path.display()), e))?;
        Self::parse(Origin::File(path.to_path_buf()), &text)
            .map_err(|e| (format!("error while parsing '{}'", path.display()), e).into())
    }

    pub fn from_reader<R: Read>(mut reader: R, origin: Origin) -> Result<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| (format!("couldn't read {}", origin), e))?;
        let name = origin.to_string();
        Self::parse(origin, &text).map_err(|e| (format!("error while parsing '{}'", name), e).into())
    }

    fn parse(origin: Origin, text: &str) -> std::result::Result<Self, ParseError> {
        Ok(Self::new(origin, parse_exposition(text)?))
    }

    #[inline]
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Every family block, in source order.
    #[inline]
    pub fn families(&self) -> &[MetricFamily] {
        &self.families
    }

    /// Distinct family names, sorted.
    pub fn family_names(&self) -> BTreeSet<&MetricName> {
        self.families.iter().map(MetricFamily::name).collect()
    }

    /// Number of family blocks, counting repeated names separately.
    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}
