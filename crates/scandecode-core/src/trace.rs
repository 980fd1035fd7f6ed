// Scandecode Trace Parser
// Parses recorded raw event batches, one batch per line

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::event::EventBatch;
use crate::input::{RawEvent, RawFlag};

/// Errors that can occur while parsing a trace
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    #[error("line {line}: malformed token '{token}', expected code:flag")]
    BadToken { line: usize, token: String },

    #[error("line {line}: invalid scan code '{code}'")]
    BadCode { line: usize, code: String },

    #[error("line {line}: unknown flag '{flag}'")]
    BadFlag { line: usize, flag: String },
}

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<code>0[xX][0-9a-fA-F]+|[0-9]+):(?<flag>[A-Za-z0-9]+)$")
        .expect("token pattern is valid")
});

/// Parse a single trace line into a batch.
///
/// Returns `Ok(None)` for blank and comment-only lines. `line` is the
/// 1-based line number used in error messages.
///
/// # Examples
/// ```
/// use scandecode_core::trace::parse_line;
/// use scandecode_core::{RawEvent, RawFlag};
///
/// let batch = parse_line("29:E1Down 69:0  # pause", 1).unwrap().unwrap();
/// assert_eq!(batch.as_slice(), &[
///     RawEvent::new(29, RawFlag::E1Down),
///     RawEvent::new(69, RawFlag::Down),
/// ]);
/// ```
pub fn parse_line(text: &str, line: usize) -> Result<Option<EventBatch>, TraceError> {
    let content = match text.split_once('#') {
        Some((before, _)) => before,
        None => text,
    };

    let mut batch = EventBatch::new();
    for token in content.split_whitespace() {
        batch.push(parse_token(token, line)?);
    }

    Ok((!batch.is_empty()).then_some(batch))
}

/// Parse a whole trace into numbered batches.
///
/// Stops at the first error.
pub fn parse_trace(text: &str) -> Result<Vec<(usize, EventBatch)>, TraceError> {
    let mut batches = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(batch) = parse_line(line, idx + 1)? {
            batches.push((idx + 1, batch));
        }
    }
    Ok(batches)
}

fn parse_token(token: &str, line: usize) -> Result<RawEvent, TraceError> {
    let caps = TOKEN.captures(token).ok_or_else(|| TraceError::BadToken {
        line,
        token: token.to_string(),
    })?;

    let code = parse_code(&caps["code"]).ok_or_else(|| TraceError::BadCode {
        line,
        code: caps["code"].to_string(),
    })?;
    let flag = parse_flag(&caps["flag"]).ok_or_else(|| TraceError::BadFlag {
        line,
        flag: caps["flag"].to_string(),
    })?;

    Ok(RawEvent::new(code, flag))
}

fn parse_code(text: &str) -> Option<u16> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

/// Flag by name, or by the driver's numeric key state
fn parse_flag(text: &str) -> Option<RawFlag> {
    match text.parse::<u16>() {
        Ok(state) => RawFlag::try_from(state).ok(),
        Err(_) => text.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_flags() {
        let batch = parse_line("42:ExtendedDown 71:extendeddown", 1)
            .unwrap()
            .unwrap();
        assert_eq!(
            batch.as_slice(),
            &[
                RawEvent::new(42, RawFlag::ExtendedDown),
                RawEvent::new(71, RawFlag::ExtendedDown),
            ]
        );
    }

    #[test]
    fn test_parse_numeric_state_and_hex() {
        let batch = parse_line("0x1D:3", 1).unwrap().unwrap();
        assert_eq!(batch.as_slice(), &[RawEvent::new(29, RawFlag::ExtendedUp)]);
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(parse_line("", 1), Ok(None));
        assert_eq!(parse_line("   ", 1), Ok(None));
        assert_eq!(parse_line("# header", 1), Ok(None));
    }

    #[test]
    fn test_bad_token() {
        assert_eq!(
            parse_line("28-Down", 4),
            Err(TraceError::BadToken {
                line: 4,
                token: "28-Down".to_string()
            })
        );
    }

    #[test]
    fn test_bad_flag() {
        assert_eq!(
            parse_line("28:Sideways", 2),
            Err(TraceError::BadFlag {
                line: 2,
                flag: "Sideways".to_string()
            })
        );
        assert!(matches!(
            parse_line("28:7", 2),
            Err(TraceError::BadFlag { .. })
        ));
    }

    #[test]
    fn test_bad_code() {
        assert!(matches!(
            parse_line("70000:Down", 3),
            Err(TraceError::BadCode { line: 3, .. })
        ));
    }

    #[test]
    fn test_parse_trace_numbers_lines() {
        let trace = "# recorded\n28:Down\n\n28:Up\n";
        let batches = parse_trace(trace).unwrap();
        let lines: Vec<usize> = batches.iter().map(|(line, _)| *line).collect();
        assert_eq!(lines, vec![2, 4]);
    }

    #[test]
    fn test_parse_keeps_long_batches() {
        let batch = parse_line("1:Down 2:Down 3:Down", 1).unwrap().unwrap();
        assert_eq!(batch.len(), 3);
    }
}
