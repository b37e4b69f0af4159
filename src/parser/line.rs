use std::convert::TryFrom;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, char, space0, space1},
    combinator::{eof, opt, rest as remaining},
    sequence::{preceded, terminated},
};

use super::common::{expect, label_identifier, maybe_padded, metric_identifier, separated_list};
use super::number::{sample_value, timestamp};
use super::result::{IResult, LineError, Span};
use super::string::{string_literal, unescape_help};
use crate::model::{Labels, MetricName, MetricType, Sample};

/// What a single line of exposition text turned out to be.
#[derive(Debug, PartialEq)]
pub enum Line {
    Blank,
    Comment,
    Help(MetricName, String),
    Type(MetricName, MetricType),
    Sample(Sample),
}

pub fn line(input: Span) -> IResult<Line> {
    let (rest, _) = space0(input)?;
    let (rest, line) = alt((blank, comment, sample))(rest)?;
    Ok((rest, line))
}

fn blank(input: Span) -> IResult<Line> {
    let (rest, _) = eof(input)?;
    Ok((rest, Line::Blank))
}

fn comment(input: Span) -> IResult<Line> {
    let (rest, _) = char('#')(input)?;
    let (rest, _) = space0(rest)?;
    alt((help, type_, plain_comment))(rest)
}

fn plain_comment(input: Span) -> IResult<Line> {
    let (rest, _) = remaining(input)?;
    Ok((rest, Line::Comment))
}

fn help(input: Span) -> IResult<Line> {
    // HELP metric_identifier [text]
    let (rest, _) = terminated(tag("HELP"), space1)(input)?;
    let (rest, name) = expect("metric name", metric_identifier)(rest)?;
    let (rest, text) = opt(preceded(space1, remaining))(rest)?;
    let (rest, _) = expect("help text", eof)(rest)?;

    let text = text.map(|t| unescape_help(t.fragment().trim_end()));
    Ok((rest, Line::Help(name, text.unwrap_or_default())))
}

fn type_(input: Span) -> IResult<Line> {
    // TYPE metric_identifier type_keyword
    let (rest, _) = terminated(tag("TYPE"), space1)(input)?;
    let (rest, name) = expect("metric name", metric_identifier)(rest)?;
    let (rest, _) = expect("metric type", space1)(rest)?;
    let (after, keyword) = expect("metric type", alpha1)(rest)?;

    let typ = MetricType::try_from(*keyword.fragment()).map_err(|_| {
        nom::Err::Failure(LineError::new(
            "one of counter, gauge, histogram, summary, untyped",
            keyword,
        ))
    })?;

    let (after, _) = space0(after)?;
    let (after, _) = expect("end of line", eof)(after)?;
    Ok((after, Line::Type(name, typ)))
}

fn sample(input: Span) -> IResult<Line> {
    // metric_identifier [label_set] value [timestamp]
    let (rest, name) = metric_identifier(input)?;
    let (rest, labels) = opt(preceded(space0, label_set))(rest)?;
    let (rest, _) = expect("sample value", space1)(rest)?;
    let (rest, value) = expect("sample value", sample_value)(rest)?;
    let (rest, ts) = opt(preceded(space1, timestamp))(rest)?;
    let (rest, _) = space0(rest)?;
    let (rest, _) = expect("end of line", eof)(rest)?;

    Ok((
        rest,
        Line::Sample(Sample::new(name, labels.unwrap_or_default(), value, ts)),
    ))
}

fn label_set(input: Span) -> IResult<Labels> {
    let (rest, pairs) = separated_list('{', '}', ',', label_pair, "',' or '}'")(input)?;

    let mut labels = Labels::new();
    for (name, value) in pairs {
        if labels.insert(name, value).is_some() {
            return Err(nom::Err::Failure(LineError::new("unique label names", input)));
        }
    }
    Ok((rest, labels))
}

fn label_pair(input: Span) -> IResult<(String, String)> {
    // label_identifier = string_literal
    let (rest, name) = label_identifier(input)?;
    let (rest, _) = expect("'='", maybe_padded(char('=')))(rest)?;
    let (rest, value) = expect("quoted label value", string_literal)(rest)?;
    Ok((rest, (name, value)))
}
