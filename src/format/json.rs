use serde::Serialize;
use serde_json;

use super::formatter::{Formatter, Report};
use crate::error::Result;

pub struct JSONFormatter {
    pretty: bool,
}

impl JSONFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_vec<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        let buf = if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        };
        buf.map_err(|e| ("JSON serialization failed", e).into())
    }
}

impl Formatter for JSONFormatter {
    fn format(&self, report: &Report) -> Result<Vec<u8>> {
        match report {
            Report::Validation(result) => self.to_vec(result),
            Report::Diff(result) => self.to_vec(result),
        }
    }
}
