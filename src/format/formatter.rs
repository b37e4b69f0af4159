use crate::check::{DiffResult, ValidationResult};
use crate::error::Result;

pub enum Report<'a> {
    Validation(&'a ValidationResult),
    Diff(&'a DiffResult),
}

pub trait Formatter {
    fn format(&self, report: &Report) -> Result<Vec<u8>>;
}
