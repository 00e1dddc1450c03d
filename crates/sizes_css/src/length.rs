//! Validation of the size at the end of each candidate.
//!
//! A size is a non-negative `<length>` in one of the absolute, font-relative or viewport
//! units, a unitless zero, or a loosely checked `calc()` expression. Percentages are not
//! allowed by the sizes grammar.
use lazy_static::lazy_static;
use regex::Regex;

/// Units accepted after the number, matched case-insensitively
pub const LENGTH_UNITS: [&str; 14] = [
    "ch", "cm", "em", "ex", "in", "mm", "pc", "pt", "px", "rem", "vh", "vmin", "vmax", "vw",
];

/// Signed decimal number with an optional exponent, shared with the media condition lexer
pub(crate) const NUMBER_PATTERN: &str = r"[+-]?(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?";

lazy_static! {
    static ref LENGTH_RE: Regex = Regex::new(&format!(
        r"(?i)^({NUMBER_PATTERN})(?:{})$",
        LENGTH_UNITS.join("|")
    ))
    .unwrap_or_else(|e| unreachable!("length pattern is valid: {e}"));
    static ref CALC_RE: Regex = Regex::new(r"(?i)^calc\([0-9a-z .+\-*/()]+\)$")
        .unwrap_or_else(|e| unreachable!("calc pattern is valid: {e}"));
}

/// Returns true when the token is a valid non-negative length, a unitless zero or a
/// `calc()` expression.
///
/// The `calc()` check is purely syntactic: only the allowed characters and the closing
/// parenthesis at the end are checked, not whether the expression makes sense.
#[must_use]
pub fn is_valid_non_negative_length(token: &str) -> bool {
    is_unitless_zero(token) || is_non_negative_dimension(token) || is_calc(token)
}

/// `0`, `+0` and `-0` are the only lengths allowed without a unit
fn is_unitless_zero(token: &str) -> bool {
    matches!(token, "0" | "+0" | "-0")
}

fn is_non_negative_dimension(token: &str) -> bool {
    let Some(captures) = LENGTH_RE.captures(token) else {
        return false;
    };

    // -0 compares equal to 0, so negative zero is accepted
    captures
        .get(1)
        .and_then(|number| number.as_str().parse::<f64>().ok())
        .is_some_and(|value| value >= 0.0)
}

fn is_calc(token: &str) -> bool {
    CALC_RE.is_match(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_unit_is_accepted() {
        for unit in LENGTH_UNITS {
            assert!(is_valid_non_negative_length(&format!("10{unit}")), "{unit}");
            assert!(
                is_valid_non_negative_length(&format!("1.5{}", unit.to_uppercase())),
                "{unit}"
            );
        }
    }

    #[test]
    fn numeric_forms() {
        for token in [
            "1px", "+1px", "0px", "-0px", "0.5em", ".5em", "1e3px", "1E3px", "1e+3px", "1e-3px",
            "+.5e-2vw", "-0e-0px", "007vmin",
        ] {
            assert!(is_valid_non_negative_length(token), "{token}");
        }
    }

    #[test]
    fn negative_lengths_are_rejected() {
        for token in ["-1px", "-0.1em", "-1e-30px", "-.5vw"] {
            assert!(!is_valid_non_negative_length(token), "{token}");
        }
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        for token in ["px", "1.px", "1..2px", "1e px", "1epx", "++1px", "1 px", "1px ", "", "."] {
            assert!(!is_valid_non_negative_length(token), "{token:?}");
        }
    }

    #[test]
    fn other_units_are_rejected() {
        for token in [
            "50%", "0%", "1s", "10ms", "90deg", "1rad", "1turn", "10hz", "1khz", "2dppx", "96dpi",
            "1fr", "1q", "1vb", "1cqw", "1pxx",
        ] {
            assert!(!is_valid_non_negative_length(token), "{token}");
        }
    }

    #[test]
    fn unitless_zero() {
        assert!(is_valid_non_negative_length("0"));
        assert!(is_valid_non_negative_length("+0"));
        assert!(is_valid_non_negative_length("-0"));

        assert!(!is_valid_non_negative_length("1"));
        assert!(!is_valid_non_negative_length("0.0"));
        assert!(!is_valid_non_negative_length("00"));
    }

    #[test]
    fn calc_expressions() {
        for token in [
            "calc(200px * 1.4)",
            "calc((5px + 5px)*2)",
            "CALC(100vw - 10px)",
            "calc(100vw/3 - 2em)",
            "calc((1px)",
            "calc(var(--gutter))",
        ] {
            assert!(is_valid_non_negative_length(token), "{token}");
        }

        for token in [
            "calc(1px",
            "calc()",
            "CALC()",
            "calc(50% - 10px)",
            "calc (1px)",
            "min(1px, 2px)",
            "calc(1px) 2px",
            "xcalc(1px)",
        ] {
            assert!(!is_valid_non_negative_length(token), "{token}");
        }
    }
}
