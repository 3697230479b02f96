//! Property-based tests for profile URL parsing.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::handle::{extract_handle, GITHUB_PROFILE_PREFIX};
    use proptest::prelude::*;

    proptest! {
        /// Property: any well-formed profile URL yields exactly its first path segment
        #[test]
        fn extract_handle_returns_first_segment(
            user in "[a-zA-Z0-9][a-zA-Z0-9-]{0,38}",
            tail in "(/[a-zA-Z0-9._-]*){0,3}",
        ) {
            let url = format!("{}{}{}", GITHUB_PROFILE_PREFIX, user, tail);
            let handle = extract_handle(&url).unwrap();
            prop_assert_eq!(handle.as_str(), user.as_str());
        }

        /// Property: a successful extraction never yields an empty handle or a slash
        #[test]
        fn extract_handle_never_empty(input in ".*") {
            let url = format!("{}{}", GITHUB_PROFILE_PREFIX, input);
            if let Ok(handle) = extract_handle(&url) {
                prop_assert!(!handle.as_str().is_empty());
                prop_assert!(!handle.as_str().contains('/'));
            }
        }

        /// Property: inputs without the expected prefix are always rejected
        #[test]
        fn extract_handle_rejects_foreign_prefix(input in "[a-z]{1,10}://[a-z.]{1,20}/[a-z]{1,10}") {
            prop_assume!(!input.starts_with(GITHUB_PROFILE_PREFIX));
            prop_assert!(extract_handle(&input).is_err());
        }

        /// Property: extraction is deterministic
        #[test]
        fn extract_handle_is_deterministic(input in ".*") {
            let first = extract_handle(&input).map(|h| h.to_string()).ok();
            let second = extract_handle(&input).map(|h| h.to_string()).ok();
            prop_assert_eq!(first, second);
        }
    }
}
