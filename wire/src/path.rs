//! Derivation-path codec
//!
//! Converts between the human-readable `m/44'/43'/0'/0'/0'` notation and the
//! ordered `u32` component sequence sent to the device. Hardened components
//! carry the high bit; `unharden` recovers the display index.

use thiserror::Error;

/// High bit marking a hardened path component.
pub const HARDENED: u32 = 0x8000_0000;

/// Errors raised while parsing or validating a derivation path.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PathError {
    #[error("derivation path is empty")]
    Empty,

    #[error("invalid path component: {0:?}")]
    InvalidComponent(String),

    #[error("path has {actual} components, expected {expected}")]
    WrongLength { expected: usize, actual: usize },
}

/// Parse a path string into its component sequence.
///
/// Accepts an optional `m/` prefix; each component is a decimal index below
/// 2^31, optionally suffixed with `'` or `h` to mark it hardened. When
/// `required_len` is given the component count must match exactly.
pub fn parse(input: &str, required_len: Option<usize>) -> Result<Vec<u32>, PathError> {
    let trimmed = input.strip_prefix("m/").or_else(|| input.strip_prefix("M/")).unwrap_or(input);

    if trimmed.is_empty() || trimmed == "m" || trimmed == "M" {
        return Err(PathError::Empty);
    }

    let mut components = Vec::new();
    for part in trimmed.split('/') {
        components.push(parse_component(part)?);
    }

    check_len(&components, required_len)?;
    Ok(components)
}

/// Validate an already-decoded component sequence.
pub fn validate(components: &[u32], required_len: Option<usize>) -> Result<(), PathError> {
    if components.is_empty() {
        return Err(PathError::Empty);
    }
    check_len(components, required_len)
}

/// Strip the hardening bit from a component.
pub fn unharden(component: u32) -> u32 {
    component & !HARDENED
}

/// Serialize a component sequence back to `m/...` notation.
pub fn format(components: &[u32]) -> String {
    let mut out = String::from("m");
    for &c in components {
        if c >= HARDENED {
            out.push_str(&format!("/{}'", c - HARDENED));
        } else {
            out.push_str(&format!("/{}", c));
        }
    }
    out
}

fn parse_component(part: &str) -> Result<u32, PathError> {
    if part.is_empty() {
        return Err(PathError::InvalidComponent(part.to_string()));
    }

    let (digits, hardened) = match part.strip_suffix(&['\'', 'h', 'H'][..]) {
        Some(rest) => (rest, true),
        None => (part, false),
    };

    let index: u32 = digits
        .parse()
        .map_err(|_| PathError::InvalidComponent(part.to_string()))?;

    if index >= HARDENED {
        return Err(PathError::InvalidComponent(part.to_string()));
    }

    Ok(if hardened { index + HARDENED } else { index })
}

fn check_len(components: &[u32], required_len: Option<usize>) -> Result<(), PathError> {
    match required_len {
        Some(expected) if components.len() != expected => Err(PathError::WrongLength {
            expected,
            actual: components.len(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hardened_path() {
        let path = parse("m/44'/43'/0'/0'/0'", Some(5)).expect("parse failed");
        assert_eq!(
            path,
            vec![
                44 + HARDENED,
                43 + HARDENED,
                HARDENED,
                HARDENED,
                HARDENED,
            ]
        );
    }

    #[test]
    fn test_parse_mixed_and_h_suffix() {
        let path = parse("m/44h/43'/2", None).expect("parse failed");
        assert_eq!(path, vec![44 + HARDENED, 43 + HARDENED, 2]);
    }

    #[test]
    fn test_parse_without_prefix() {
        let path = parse("44'/43'/1'/0'/0'", Some(5)).expect("parse failed");
        assert_eq!(path[2], 1 + HARDENED);
    }

    #[test]
    fn test_wrong_length() {
        let err = parse("m/44'/43'/0'", Some(5)).unwrap_err();
        assert_eq!(
            err,
            PathError::WrongLength {
                expected: 5,
                actual: 3
            }
        );
    }

    #[test]
    fn test_invalid_component() {
        assert!(matches!(
            parse("m/44'/abc/0'", None),
            Err(PathError::InvalidComponent(_))
        ));
        // Index at or above 2^31 must be written in hardened notation.
        assert!(matches!(
            parse("m/2147483648", None),
            Err(PathError::InvalidComponent(_))
        ));
    }

    #[test]
    fn test_empty_path() {
        assert_eq!(parse("m/", None).unwrap_err(), PathError::Empty);
        assert_eq!(parse("", None).unwrap_err(), PathError::Empty);
        assert_eq!(validate(&[], None).unwrap_err(), PathError::Empty);
    }

    #[test]
    fn test_unharden() {
        assert_eq!(unharden(44 + HARDENED), 44);
        assert_eq!(unharden(44), 44);
    }

    #[test]
    fn test_format_roundtrip() {
        let input = "m/44'/43'/0'/0'/0'";
        let path = parse(input, Some(5)).expect("parse failed");
        assert_eq!(format(&path), input);

        let mixed = vec![44 + HARDENED, 1, 2];
        assert_eq!(format(&mixed), "m/44'/1/2");
        assert_eq!(parse(&format(&mixed), None).unwrap(), mixed);
    }
}
