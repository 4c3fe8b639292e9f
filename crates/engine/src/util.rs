//! Internal helpers for model validation.
//!
//! These utilities are **not** part of the public API. They centralize
//! column constraints so inserts and updates enforce the same rules.

use crate::{EngineError, ResultEngine};

/// Reject text longer than the column allows (counted in characters).
pub(crate) fn check_max_len(field: &str, value: &str, max: usize) -> ResultEngine<()> {
    let len = value.chars().count();
    if len > max {
        return Err(EngineError::InvalidField(format!(
            "{field} must be at most {max} characters, got {len}"
        )));
    }
    Ok(())
}

/// Currency codes are three ASCII letters, stored upper case.
pub(crate) fn normalize_currency(value: &str) -> ResultEngine<String> {
    let code = value.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(EngineError::InvalidField(format!(
            "currency must be a 3-letter code, got '{value}'"
        )));
    }
    Ok(code.to_ascii_uppercase())
}

/// Text identifying the creator of a record.
///
/// Blank identities count as missing.
pub fn creator_name(identity: Option<&str>) -> String {
    identity
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(crate::expenses::SYSTEM_USER)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_is_upper_cased() {
        assert_eq!(normalize_currency(" eur ").unwrap(), "EUR");
        assert!(normalize_currency("EURO").is_err());
        assert!(normalize_currency("U$D").is_err());
    }

    #[test]
    fn max_len_counts_characters() {
        assert!(check_max_len("name", "àèìòù", 5).is_ok());
        assert!(check_max_len("name", "abcdef", 5).is_err());
    }

    #[test]
    fn missing_identity_falls_back_to_system() {
        assert_eq!(creator_name(None), "System");
        assert_eq!(creator_name(Some("  ")), "System");
        assert_eq!(creator_name(Some("a@example.com")), "a@example.com");
    }
}
