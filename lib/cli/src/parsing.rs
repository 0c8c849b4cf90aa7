use std::io;
use std::io::Read;
use std::time::Duration;

use itertools::Itertools;
use simplelog::LevelFilter;

/// The formula argument itself, or standard input for `-`.
///
/// Lines read from standard input are joined with spaces, so a formula may span several lines.
pub fn read_formula(arg: &str) -> io::Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf.lines().map(str::trim).filter(|s| !s.is_empty()).join(" "))
}

/// Seconds, possibly fractional: `2`, `0.5`.
pub fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs: f64 = s.parse().map_err(|e| format!("invalid number of seconds '{}': {}", s, e))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(format!("timeout must be a non-negative number of seconds, got '{}'", s));
    }
    Ok(Duration::from_secs_f64(secs))
}

pub fn parse_level(s: &str) -> Result<LevelFilter, String> {
    match s.to_ascii_lowercase().as_str() {
        "off" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        _ => Err(format!("unknown log level '{}'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("2"), Ok(Duration::from_secs(2)));
        assert_eq!(parse_seconds("0.5"), Ok(Duration::from_millis(500)));
        assert!(parse_seconds("-1").is_err());
        assert!(parse_seconds("soon").is_err());
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Ok(LevelFilter::Debug));
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn test_formula_argument_is_taken_verbatim() {
        assert_eq!(read_formula("p -> q").unwrap(), "p -> q");
    }
}
