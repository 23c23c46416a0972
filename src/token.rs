//! Numeric token extraction.
//!
//! Navigation records are made of fixed width floating point values that
//! are often glued to one another (negative values eat the separating space)
//! and that some producers still write with the legacy `D` exponent marker.
//! The extractor has no knowledge of field boundaries: non numeric content
//! (satellite identifiers, dates) must be sliced out by the caller.
use regex::Regex;

use crate::error::ParseError;

lazy_static! {
    static ref NUMERIC_TOKEN: Regex =
        Regex::new(r"[-+]?(?:\d+\.\d*|\.\d+|\d+)(?:[eE][-+]?\d+)?").unwrap();
}

/// Replaces the legacy `D` exponent marker with the standard one.
pub fn normalize_exponent(content: &str) -> String {
    content.replace(|c: char| c == 'D' || c == 'd', "E")
}

/// Converts a single token, which must have been normalized.
/// Values that do not fit in a finite f64 are rejected
/// rather than coerced into something else.
pub fn parse_token(token: &str) -> Result<f64, ParseError> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ParseError {
            token: token.to_string(),
        }),
    }
}

/// Lazy [Iterator] over the numeric tokens of a line, in order of appearance.
#[derive(Debug, Clone)]
pub struct Tokens {
    content: String,
    offset: usize,
}

impl Iterator for Tokens {
    type Item = Result<f64, ParseError>;
    fn next(&mut self) -> Option<Self::Item> {
        let m = NUMERIC_TOKEN.find_at(&self.content, self.offset)?;
        self.offset = m.end();
        Some(parse_token(m.as_str()))
    }
}

/// Extracts all numeric tokens from given content.
pub fn tokens(content: &str) -> Tokens {
    Tokens {
        content: normalize_exponent(content),
        offset: 0,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn legacy_exponent() {
        let values = tokens(" 0.165891833603D-03 0.727595761418D-11 0.000000000000D+00")
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(values, vec![0.165891833603E-03, 0.727595761418E-11, 0.0]);
    }
    #[test]
    fn glued_negative_values() {
        let values = tokens("    0.963107487053D+00 0.218156250000D+03 0.176879497140D+00-0.791532971007D-08")
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(values.len(), 4);
        assert_eq!(values[2], 0.176879497140);
        assert_eq!(values[3], -0.791532971007E-08);
    }
    #[test]
    fn mixed_notations() {
        let values = tokens("-1.457519829273E-04 .25e+01 +12 -7 3.5 1.2d2")
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(values, vec![-1.457519829273E-04, 2.5, 12.0, -7.0, 3.5, 120.0]);
    }
    #[test]
    fn no_tokens() {
        assert_eq!(tokens("").count(), 0);
        assert_eq!(tokens("    ").count(), 0);
        assert_eq!(tokens("END OF HEADER").count(), 0);
    }
    #[test]
    fn overflowing_token() {
        let mut tokens = tokens(" 0.1D+01 0.1D+999 0.2D+01");
        assert_eq!(tokens.next(), Some(Ok(1.0)));
        assert_eq!(
            tokens.next(),
            Some(Err(ParseError {
                token: "0.1E+999".to_string()
            }))
        );
        assert_eq!(tokens.next(), Some(Ok(2.0)));
        assert_eq!(tokens.next(), None);
    }
}
