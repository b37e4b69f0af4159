use nom;

use nom_locate::LocatedSpan;

pub type Span<'a> = LocatedSpan<&'a str>;

pub type IResult<'a, O> = nom::IResult<Span<'a>, O, LineError<'a>>;

/// Where, within a single line, parsing stopped and what was expected there.
#[derive(Debug, PartialEq)]
pub struct LineError<'a> {
    expected: &'static str,
    at: Span<'a>,
}

impl<'a> LineError<'a> {
    pub fn new(expected: &'static str, at: Span<'a>) -> Self {
        Self { expected, at }
    }

    pub fn expected(&self) -> &'static str {
        self.expected
    }

    /// 1-based, counted in characters.
    pub fn column(&self) -> usize {
        self.at.get_utf8_column()
    }
}

impl<'a> nom::error::ParseError<Span<'a>> for LineError<'a> {
    fn from_error_kind(input: Span<'a>, _kind: nom::error::ErrorKind) -> Self {
        Self::new("valid syntax", input)
    }

    fn append(_input: Span<'a>, _kind: nom::error::ErrorKind, other: Self) -> Self {
        other
    }

    fn from_char(input: Span<'a>, c: char) -> Self {
        Self::new(
            match c {
                '{' => "'{'",
                '}' => "'}'",
                '=' => "'='",
                '"' => "'\"'",
                '#' => "'#'",
                _ => "character",
            },
            input,
        )
    }
}

impl<'a> From<nom::Err<LineError<'a>>> for LineError<'a> {
    fn from(err: nom::Err<LineError<'a>>) -> Self {
        match err {
            nom::Err::Error(e) | nom::Err::Failure(e) => e,
            nom::Err::Incomplete(_) => unreachable!(),
        }
    }
}
