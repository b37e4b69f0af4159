use std::fmt;

use super::result::LineError;
use crate::error;

/// A line of exposition text that is neither a valid comment nor a valid
/// sample. Parsing stops at the first one.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    line: usize,
    column: usize,
    text: String,
    expected: &'static str,
}

impl ParseError {
    pub(crate) fn from_line_error(line: usize, text: &str, err: LineError) -> Self {
        Self {
            line,
            column: err.column(),
            text: text.to_owned(),
            expected: err.expected(),
        }
    }

    /// 1-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column where the offending token starts.
    pub fn column(&self) -> usize {
        self.column
    }

    /// The offending line, verbatim.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn expected(&self) -> &'static str {
        self.expected
    }

    fn found(&self) -> String {
        let found = self
            .text
            .chars()
            .skip(self.column.saturating_sub(1))
            .take_while(|c| !c.is_whitespace())
            .collect::<String>();

        match found.as_str() {
            "" => String::from("end of line"),
            v => format!("\"{}\"", v),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}:{} unexpected {}, expected {} in line \"{}\"",
            self.line,
            self.column,
            self.found(),
            self.expected,
            self.text,
        )
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for error::Error {
    fn from(err: ParseError) -> Self {
        ("malformed exposition text", err).into()
    }
}
