//! Klobuchar ionospheric model parameters, as broadcast in navigation headers
use crate::token::tokens;

/// Klobuchar model payload
#[derive(Default, Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KbModel {
    /// Alpha coefficients
    /// ((sec), (sec.semi-circle⁻¹), (sec.semi-circle⁻²), (sec.semi-circle⁻³))
    pub alpha: (f64, f64, f64, f64),
    /// Beta coefficients
    /// ((sec), (sec.semi-circle⁻¹), (sec.semi-circle⁻²), (sec.semi-circle⁻³))
    pub beta: (f64, f64, f64, f64),
}

/// Set of four Klobuchar coefficients
pub(crate) type Coefficients = (f64, f64, f64, f64);

impl KbModel {
    /// Decodes one set of four coefficients, as found on
    /// `ION ALPHA`, `ION BETA` and `IONOSPHERIC CORR` header lines
    /// (label removed). Returns None unless exactly four valid values are found.
    pub(crate) fn parse_coefficients(content: &str) -> Option<Coefficients> {
        let values = tokens(content).collect::<Result<Vec<_>, _>>().ok()?;
        match values[..] {
            [a0, a1, a2, a3] => Some((a0, a1, a2, a3)),
            _ => None,
        }
    }
}
