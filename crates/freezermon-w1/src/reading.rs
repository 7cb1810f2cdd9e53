//! Parser for the `w1_slave` text format.
//!
//! The `w1_therm` driver emits two lines per read:
//!
//! ```text
//! 72 01 4b 46 7f ff 0e 10 57 : crc=57 YES
//! 72 01 4b 46 7f ff 0e 10 57 t=23125
//! ```
//!
//! The first line ends with the driver's CRC verdict, the second carries the
//! temperature in milli-degrees Celsius.

use std::num::ParseFloatError;
use thiserror::Error;

/// CRC verdict the driver appends to a valid scratchpad read.
const CRC_OK: &str = "YES";

/// Separator in front of the temperature field.
const TEMPERATURE_SEPARATOR: &str = "t=";

/// Ways a raw reading can be malformed.
#[derive(Error, Debug)]
pub enum ReadingError {
    /// Fewer than two lines of output.
    #[error("expected at least 2 lines, got {0}")]
    TooFewLines(usize),

    /// The first line does not end with the CRC success marker.
    #[error("first line does not end with YES: {0}")]
    CrcCheckFailed(String),

    /// The second line does not split into exactly one `t=` field.
    #[error("unexpected format in second line: {0}")]
    MalformedTemperatureLine(String),

    /// The temperature field is not a number.
    #[error("invalid temperature {value:?}: {source}")]
    InvalidTemperature {
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

/// Parses raw `w1_slave` contents into degrees Celsius.
pub fn parse_reading(contents: &str) -> Result<f64, ReadingError> {
    let lines: Vec<&str> = contents.split('\n').collect();
    if lines.len() < 2 {
        return Err(ReadingError::TooFewLines(lines.len()));
    }

    if !lines[0].ends_with(CRC_OK) {
        return Err(ReadingError::CrcCheckFailed(lines[0].to_string()));
    }

    let parts: Vec<&str> = lines[1].split(TEMPERATURE_SEPARATOR).collect();
    if parts.len() != 2 {
        return Err(ReadingError::MalformedTemperatureLine(lines[1].to_string()));
    }

    let millis: f64 = parts[1]
        .parse()
        .map_err(|source| ReadingError::InvalidTemperature {
            value: parts[1].to_string(),
            source,
        })?;

    Ok(millis / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "72 01 4b 46 7f ff 0e 10 57 : crc=57 YES\n\
                        72 01 4b 46 7f ff 0e 10 57 t=23625\n";

    #[test]
    fn test_parse_good_reading() {
        assert_eq!(parse_reading(GOOD).unwrap(), 23.625);
    }

    #[test]
    fn test_parse_negative_reading() {
        let raw = "ff ff : crc=a2 YES\nff ff t=-18062\n";
        assert_eq!(parse_reading(raw).unwrap(), -18.062);
    }

    #[test]
    fn test_parse_without_trailing_newline() {
        assert_eq!(parse_reading("crc=57 YES\nt=1500").unwrap(), 1.5);
    }

    #[test]
    fn test_crc_failure() {
        let raw = "72 01 4b 46 : crc=00 NO\nxxx t=20000\n";
        assert!(matches!(
            parse_reading(raw),
            Err(ReadingError::CrcCheckFailed(line)) if line.ends_with("NO")
        ));
    }

    #[test]
    fn test_single_line() {
        assert!(matches!(
            parse_reading("crc=57 YES"),
            Err(ReadingError::TooFewLines(1))
        ));
        assert!(matches!(parse_reading(""), Err(ReadingError::TooFewLines(1))));
    }

    #[test]
    fn test_missing_separator() {
        let raw = "crc=57 YES\n72 01 4b 46 7f ff 0e 10 57\n";
        assert!(matches!(
            parse_reading(raw),
            Err(ReadingError::MalformedTemperatureLine(_))
        ));
    }

    #[test]
    fn test_repeated_separator() {
        let raw = "crc=57 YES\nt=1 t=2\n";
        assert!(matches!(
            parse_reading(raw),
            Err(ReadingError::MalformedTemperatureLine(_))
        ));
    }

    #[test]
    fn test_non_numeric_temperature() {
        let raw = "crc=57 YES\n72 01 t=abc\n";
        match parse_reading(raw) {
            Err(ReadingError::InvalidTemperature { value, .. }) => assert_eq!(value, "abc"),
            other => panic!("expected InvalidTemperature, got {:?}", other),
        }
    }

    #[test]
    fn test_fractional_temperature() {
        assert_eq!(parse_reading("YES\nt=2500.5").unwrap(), 2.5005);
    }
}
