use crate::error::EngineError;

/// Maximum accepted user name length, in characters.
pub const MAX_USER_NAME_LEN: usize = 32;

/// Validate a user name, returning the trimmed form.
///
/// Accepts 1..=32 characters of alphanumerics, spaces, `_` and `-` after
/// trimming. Pure; UI layers call this before attempting a write, and the
/// engine enforces it again in `set_user`.
pub fn validate_user_name(name: &str) -> Result<String, EngineError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(EngineError::InvalidUserName {
            reason: "name is empty".to_string(),
        });
    }
    if trimmed.chars().count() > MAX_USER_NAME_LEN {
        return Err(EngineError::InvalidUserName {
            reason: format!("name exceeds {} characters", MAX_USER_NAME_LEN),
        });
    }
    if let Some(bad) = trimmed
        .chars()
        .find(|c| !(c.is_alphanumeric() || *c == ' ' || *c == '_' || *c == '-'))
    {
        return Err(EngineError::InvalidUserName {
            reason: format!("invalid character: {:?}", bad),
        });
    }

    Ok(trimmed.to_string())
}

/// Convenience predicate form of [`validate_user_name`].
pub fn is_valid_user_name(name: &str) -> bool {
    validate_user_name(name).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_trimmed_simple_names() {
        assert_eq!(validate_user_name("  alice  ").unwrap(), "alice");
        assert_eq!(validate_user_name("Bob Smith-2").unwrap(), "Bob Smith-2");
        assert!(is_valid_user_name("under_score"));
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert!(validate_user_name("").is_err());
        assert!(validate_user_name("   ").is_err());
    }

    #[test]
    fn test_rejects_overlong_names() {
        let long = "x".repeat(MAX_USER_NAME_LEN + 1);
        assert!(validate_user_name(&long).is_err());
        assert!(is_valid_user_name(&"x".repeat(MAX_USER_NAME_LEN)));
    }

    #[test]
    fn test_rejects_path_hostile_characters() {
        // The name becomes part of a file name; separators must not pass.
        assert!(validate_user_name("../etc/passwd").is_err());
        assert!(validate_user_name("a/b").is_err());
        assert!(validate_user_name("semi;colon").is_err());
    }
}
