use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{digit1, one_of},
    combinator::{opt, recognize},
    number::complete::double,
    sequence::pair,
};

use super::result::{IResult, LineError, Span};
use crate::model::{SampleValue, Timestamp};

pub fn sample_value(input: Span) -> IResult<SampleValue> {
    alt((special_value, double))(input)
}

// NaN and signed infinities, in any letter case.
fn special_value(input: Span) -> IResult<SampleValue> {
    let (rest, (sign, word)) = pair(
        opt(one_of("+-")),
        alt((tag_no_case("inf"), tag_no_case("nan"))),
    )(input)?;

    let value = match word.fragment().to_ascii_lowercase().as_str() {
        "nan" => SampleValue::NAN,
        _ if sign == Some('-') => SampleValue::NEG_INFINITY,
        _ => SampleValue::INFINITY,
    };
    Ok((rest, value))
}

pub fn timestamp(input: Span) -> IResult<Timestamp> {
    let (rest, m) = recognize(pair(opt(one_of("+-")), digit1))(input)?;
    match m.fragment().parse::<Timestamp>() {
        Ok(ts) => Ok((rest, ts)),
        Err(_) => Err(nom::Err::Failure(LineError::new(
            "timestamp within 64-bit range",
            m,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sample_value() -> std::result::Result<(), nom::Err<LineError<'static>>> {
        let tests = [
            ("1", 1.0),
            ("1.", 1.0),
            (".1", 0.1),
            ("-3.5", -3.5),
            ("2e-5", 0.00002),
            ("1234", 1234.0),
            ("Inf", SampleValue::INFINITY),
            ("+Inf", SampleValue::INFINITY),
            ("-Inf", SampleValue::NEG_INFINITY),
            ("+inf", SampleValue::INFINITY),
        ];

        for (input, expected) in &tests {
            let (_, actual) = sample_value(Span::new(*input))?;
            assert_eq!(expected, &actual, "while parsing {}", input);
        }
        Ok(())
    }

    #[test]
    fn test_nan_sample_value() {
        for input in &["NaN", "nan", "NAN"] {
            match sample_value(Span::new(*input)) {
                Ok((rest, v)) => {
                    assert!(v.is_nan(), "while parsing {}", input);
                    assert_eq!(*rest.fragment(), "");
                }
                Err(e) => panic!("unexpected error {:?} while parsing {}", e, input),
            }
        }
    }

    #[test]
    fn test_invalid_sample_value() {
        for input in &["busted", "", "x1", "{}"] {
            assert!(sample_value(Span::new(*input)).is_err(), "while parsing {}", input);
        }
    }

    #[test]
    fn test_timestamp() {
        let ok = [
            ("0", 0),
            ("1234", 1234),
            ("-1", -1),
            ("1622104500000", 1_622_104_500_000),
        ];
        for (input, expected) in &ok {
            assert_eq!(
                timestamp(Span::new(*input)).map(|(_, ts)| ts),
                Ok(*expected),
                "while parsing {}",
                input
            );
        }

        assert!(matches!(timestamp(Span::new("abc")), Err(nom::Err::Error(_))));
        assert!(matches!(
            timestamp(Span::new("99999999999999999999")),
            Err(nom::Err::Failure(_))
        ));
    }
}
