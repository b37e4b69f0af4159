use super::error::ParseError;
use super::line::{line, Line};
use super::result::{LineError, Span};
use crate::model::{accepts, MetricFamily, MetricName, MetricType, Sample};

// Lines are read one at a time and fed into a two-state machine:
//
//   SeekingPreamble --(HELP | TYPE | sample)--> InFamily
//   InFamily --(sample accepted by the block)--> InFamily
//   InFamily --(HELP/TYPE/sample opening a new block)--> InFamily  [emits the closed block]
//   any --(blank | comment)--> same state
//   any --(end of text)--> done  [emits the open block, if any]
//
// A malformed line aborts the whole parse.

/// Parses a complete exposition text into metric families, in source order.
/// Repeated families and samples are kept as they are.
pub fn parse_exposition(text: &str) -> Result<Vec<MetricFamily>, ParseError> {
    let mut families = Vec::new();
    let mut state = State::SeekingPreamble;

    for (i, text_line) in text.lines().enumerate() {
        let (_, parsed) = line(Span::new(text_line))
            .map_err(|e| ParseError::from_line_error(i + 1, text_line, LineError::from(e)))?;

        let (next, closed) = state.next(parsed);
        families.extend(closed);
        state = next;
    }

    families.extend(state.finish());
    Ok(families)
}

#[derive(Debug)]
enum State {
    SeekingPreamble,
    InFamily(FamilyBlock),
}

impl State {
    fn next(self, line: Line) -> (State, Option<MetricFamily>) {
        match (self, line) {
            (state, Line::Blank) | (state, Line::Comment) => (state, None),

            (State::SeekingPreamble, Line::Help(name, help)) => {
                (State::InFamily(FamilyBlock::with_help(name, help)), None)
            }
            (State::SeekingPreamble, Line::Type(name, typ)) => {
                (State::InFamily(FamilyBlock::with_type(name, typ)), None)
            }
            (State::SeekingPreamble, Line::Sample(sample)) => {
                (State::InFamily(FamilyBlock::implicit(sample)), None)
            }

            (State::InFamily(mut block), Line::Help(name, help)) => {
                if block.takes_help(&name) {
                    block.help = Some(help);
                    (State::InFamily(block), None)
                } else {
                    (
                        State::InFamily(FamilyBlock::with_help(name, help)),
                        Some(block.close()),
                    )
                }
            }
            (State::InFamily(mut block), Line::Type(name, typ)) => {
                if block.takes_type(&name) {
                    block.typ = Some(typ);
                    (State::InFamily(block), None)
                } else {
                    (
                        State::InFamily(FamilyBlock::with_type(name, typ)),
                        Some(block.close()),
                    )
                }
            }
            (State::InFamily(mut block), Line::Sample(sample)) => {
                if block.takes_sample(&sample) {
                    block.samples.push(sample);
                    (State::InFamily(block), None)
                } else {
                    (
                        State::InFamily(FamilyBlock::implicit(sample)),
                        Some(block.close()),
                    )
                }
            }
        }
    }

    fn finish(self) -> Option<MetricFamily> {
        match self {
            State::SeekingPreamble => None,
            State::InFamily(block) => Some(block.close()),
        }
    }
}

/// The family currently being accumulated.
#[derive(Debug)]
struct FamilyBlock {
    name: MetricName,
    typ: Option<MetricType>,
    help: Option<String>,
    samples: Vec<Sample>,
}

impl FamilyBlock {
    fn with_help(name: MetricName, help: String) -> Self {
        Self {
            name,
            typ: None,
            help: Some(help),
            samples: vec![],
        }
    }

    fn with_type(name: MetricName, typ: MetricType) -> Self {
        Self {
            name,
            typ: Some(typ),
            help: None,
            samples: vec![],
        }
    }

    fn implicit(sample: Sample) -> Self {
        Self {
            name: sample.name().clone(),
            typ: None,
            help: None,
            samples: vec![sample],
        }
    }

    // Only a preamble (HELP + TYPE in either order, before any sample)
    // extends the open block. Anything else for the same name starts over.
    fn takes_help(&self, name: &str) -> bool {
        self.name == name && self.help.is_none() && self.samples.is_empty()
    }

    fn takes_type(&self, name: &str) -> bool {
        self.name == name && self.typ.is_none() && self.samples.is_empty()
    }

    fn takes_sample(&self, sample: &Sample) -> bool {
        accepts(&self.name, self.typ.unwrap_or_default(), sample.name())
    }

    fn close(self) -> MetricFamily {
        MetricFamily::new(
            self.name,
            self.typ.unwrap_or_default(),
            self.help,
            self.samples,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Labels;

    fn summary(families: &[MetricFamily]) -> Vec<(&str, MetricType, Option<&str>, usize)> {
        families
            .iter()
            .map(|f| (f.name().as_str(), f.typ(), f.help(), f.samples().len()))
            .collect()
    }

    #[test]
    fn test_grouping() -> Result<(), ParseError> {
        let families = parse_exposition(
            r#"
# HELP test_family_a The first family.
# TYPE test_family_a counter
test_family_a {} 1234 1234

test_family_b {} 0 0

# TYPE test_family_a gauge
test_family_a {} 5678 1234

# the following are duplicate samples, not duplicate families
# TYPE test_family_c gauge
test_family_c {} 1234 1234
test_family_c {} 1234 1234
"#,
        )?;

        assert_eq!(
            summary(&families),
            vec![
                ("test_family_a", MetricType::Counter, Some("The first family."), 1),
                ("test_family_b", MetricType::Untyped, None, 1),
                ("test_family_a", MetricType::Gauge, None, 1),
                ("test_family_c", MetricType::Gauge, None, 2),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_histogram_and_summary_suffixes() -> Result<(), ParseError> {
        let families = parse_exposition(
            r#"
# TYPE rpc_duration_seconds histogram
rpc_duration_seconds_bucket{le="0.1"} 3
rpc_duration_seconds_bucket{le="+Inf"} 5
rpc_duration_seconds_sum 1.7
rpc_duration_seconds_count 5
# TYPE gc_pause_seconds summary
gc_pause_seconds{quantile="0.5"} 0.01
gc_pause_seconds_sum 3
gc_pause_seconds_count 300
gc_pause_seconds_bucket 1
"#,
        )?;

        assert_eq!(
            summary(&families),
            vec![
                ("rpc_duration_seconds", MetricType::Histogram, None, 4),
                ("gc_pause_seconds", MetricType::Summary, None, 3),
                ("gc_pause_seconds_bucket", MetricType::Untyped, None, 1),
            ]
        );

        let bucket = &families[0].samples()[1];
        assert_eq!(bucket.name(), "rpc_duration_seconds_bucket");
        assert_eq!(bucket.labels().get("le"), Some(&String::from("+Inf")));
        Ok(())
    }

    #[test]
    fn test_preamble_in_either_order() -> Result<(), ParseError> {
        let families = parse_exposition(
            "# TYPE up gauge\n# HELP up Target health.\nup 1\n# HELP down Other.\n# TYPE down gauge\ndown 0\n",
        )?;

        assert_eq!(
            summary(&families),
            vec![
                ("up", MetricType::Gauge, Some("Target health."), 1),
                ("down", MetricType::Gauge, Some("Other."), 1),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_repeated_type_opens_new_block() -> Result<(), ParseError> {
        let families =
            parse_exposition("# TYPE a counter\na 1\n# TYPE a counter\na 2\n# TYPE b gauge\n")?;

        assert_eq!(
            summary(&families),
            vec![
                ("a", MetricType::Counter, None, 1),
                ("a", MetricType::Counter, None, 1),
                ("b", MetricType::Gauge, None, 0),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_consecutive_samples_share_block() -> Result<(), ParseError> {
        let families = parse_exposition(
            "test_family_d{abc=\"123\"} 0 0\ntest_family_d{abc=\"456\"} 0 0\n\ntest_family_d{abc=\"789\"} 0 0\n",
        )?;

        assert_eq!(families.len(), 1);
        assert_eq!(families[0].samples().len(), 3);
        assert_eq!(
            families[0].samples()[2].labels(),
            &vec![("abc", "789")].into_iter().collect::<Labels>()
        );
        Ok(())
    }

    #[test]
    fn test_empty_input() -> Result<(), ParseError> {
        assert!(parse_exposition("")?.is_empty());
        assert!(parse_exposition("\n\n# just a comment\n")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_malformed_line_aborts() {
        let err = match parse_exposition("\nbusted busted busted\n") {
            Ok(families) => panic!("expected error but found {:?}", families),
            Err(e) => e,
        };

        assert_eq!(err.line(), 2);
        assert_eq!(err.column(), 8);
        assert_eq!(err.text(), "busted busted busted");
        assert_eq!(
            err.to_string(),
            "2:8 unexpected \"busted\", expected sample value in line \"busted busted busted\""
        );
    }

    #[test]
    fn test_malformed_line_after_valid_ones() {
        let err = match parse_exposition("# TYPE a gauge\na 1\na{x=\"1\"} one\n") {
            Ok(families) => panic!("expected error but found {:?}", families),
            Err(e) => e,
        };

        assert_eq!(err.line(), 3);
        assert_eq!(err.column(), 10);
        assert_eq!(err.expected(), "sample value");
    }

    #[test]
    fn test_unknown_type_keyword() {
        match parse_exposition("# TYPE a timer\n") {
            Err(e) => {
                assert_eq!(e.line(), 1);
                assert_eq!(e.column(), 10);
            }
            Ok(families) => panic!("expected error but found {:?}", families),
        }
    }
}
