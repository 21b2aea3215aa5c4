//! Input validation functions
//!
//! Length rules live on the request types via `validator` derives; this
//! module holds the username rules that need custom logic.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use validator::ValidationError;

/// Normalize a username for storage and lookup.
///
/// Every existence check, insert and login goes through this so that
/// matching is case-insensitive.
pub fn normalize_username(username: &str) -> String {
    username.to_lowercase()
}

static USERNAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("username pattern is valid"));

/// Usernames start with an ASCII letter or digit and may contain `.`, `_`, `-`
pub fn username_charset(username: &str) -> Result<(), ValidationError> {
    if USERNAME.is_match(username) {
        Ok(())
    } else {
        let mut err = ValidationError::new("username_charset");
        err.message = Some(
            "Username may only contain letters, digits, '.', '_' and '-'".into(),
        );
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("Alice", "alice")]
    #[case("BOB", "bob")]
    #[case("carol.smith", "carol.smith")]
    #[case("MiXeD_42", "mixed_42")]
    fn test_normalize_username(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_username(input), expected);
    }

    #[rstest]
    #[case("bob", true)]
    #[case("bob.smith", true)]
    #[case("b-o_b9", true)]
    #[case("9lives", true)]
    #[case(".hidden", false)]
    #[case("bob smith", false)]
    #[case("bob@example", false)]
    #[case("", false)]
    fn test_username_charset(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(username_charset(input).is_ok(), valid);
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(name in "[A-Za-z0-9._-]{1,50}") {
            let once = normalize_username(&name);
            prop_assert_eq!(normalize_username(&once), once.clone());
        }

        #[test]
        fn prop_normalize_ignores_case(name in "[a-z0-9]{1,50}") {
            prop_assert_eq!(normalize_username(&name.to_uppercase()), name);
        }
    }
}
