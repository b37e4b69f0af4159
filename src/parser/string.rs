use nom::{
    bytes::complete::{escaped_transform, is_not},
    character::complete::{anychar, char},
    combinator::{map, opt},
    ExtendInto,
};

use super::common::expect;
use super::result::{IResult, Span};

/// A double-quoted label value. Understands `\\`, `\"` and `\n`; any other
/// escape sequence is kept verbatim.
pub fn string_literal(input: Span) -> IResult<String> {
    let (rest, _) = char('"')(input)?;
    let (rest, value) = opt(escaped_transform(
        is_not("\\\""),
        '\\',
        map(anychar, Escaped::from),
    ))(rest)?;
    let (rest, _) = expect("closing '\"'", char('"'))(rest)?;
    Ok((rest, value.unwrap_or_default()))
}

/// The character following a backslash in a label value.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Escaped {
    Char(char),
    Verbatim(char),
}

impl From<char> for Escaped {
    fn from(c: char) -> Self {
        match c {
            '\\' | '"' => Escaped::Char(c),
            'n' => Escaped::Char('\n'),
            c => Escaped::Verbatim(c),
        }
    }
}

impl ExtendInto for Escaped {
    type Item = char;
    type Extender = String;

    fn new_builder(&self) -> String {
        String::new()
    }

    fn extend_into(&self, acc: &mut String) {
        match *self {
            Escaped::Char(c) => acc.push(c),
            Escaped::Verbatim(c) => {
                acc.push('\\');
                acc.push(c);
            }
        }
    }
}

/// HELP text escaping: only `\\` and `\n` are special.
pub fn unescape_help(text: &str) -> String {
    let mut help = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            help.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => help.push('\\'),
            Some('n') => help.push('\n'),
            Some(other) => {
                help.push('\\');
                help.push(other);
            }
            None => help.push('\\'),
        }
    }
    help
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_literal_valid() {
        #[rustfmt::skip]
        let tests = [
            (r#""""#, "", ""),
            (r#""world""#, "world", ""),
            (r#""world"}"#, "world", "}"),
            (r#""123 qux", b="x""#, "123 qux", r#", b="x""#),
            (r#""a\"b""#, "a\"b", ""),
            (r#""C:\\tmp""#, "C:\\tmp", ""),
            (r#""two\nlines""#, "two\nlines", ""),
            (r#""keep\tit""#, "keep\\tit", ""),
            (r#""ünïcödé" 1"#, "ünïcödé", " 1"),
        ];

        for (input, expected, expected_rest) in &tests {
            match string_literal(Span::new(*input)) {
                Ok((rest, actual)) => {
                    assert_eq!(&actual, expected, "while parsing {}", input);
                    assert_eq!(rest.fragment(), expected_rest, "while parsing {}", input);
                }
                Err(e) => panic!("unexpected error {:?} while parsing {}", e, input),
            }
        }
    }

    #[test]
    fn test_string_literal_invalid() {
        assert!(matches!(
            string_literal(Span::new("world\"")),
            Err(nom::Err::Error(_))
        ));

        for input in &[r#""world"#, r#""world\""#, r#"""#] {
            match string_literal(Span::new(*input)) {
                Err(nom::Err::Failure(e)) => {
                    assert_eq!(e.expected(), "closing '\"'");
                    assert_eq!(e.column(), input.chars().count() + 1);
                }
                res => panic!("expected failure but found {:?} while parsing {}", res, input),
            }
        }
    }

    #[test]
    fn test_unescape_help() {
        let tests = [
            ("plain text", "plain text"),
            (r"a\\b", "a\\b"),
            (r"first\nsecond", "first\nsecond"),
            (r#"quote \" stays"#, r#"quote \" stays"#),
            ("trailing \\", "trailing \\"),
        ];

        for (input, expected) in &tests {
            assert_eq!(&unescape_help(input), expected);
        }
    }
}
