mod common;
mod error;
mod exposition;
mod line;
mod number;
mod result;
mod string;

pub use error::ParseError;
pub use exposition::parse_exposition;
