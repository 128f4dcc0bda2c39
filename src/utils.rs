//!
//! Small helpers shared by the configuration loader and the router.
//!
//! - [`replace_handlebars_with_env`] - Template substitution for environment variables
//! - [`starts_with_ignore_case`] / [`strip_prefix_ignore_case`] - Case-insensitive prefix handling for content paths
//!

use {
    regex::{Captures, Regex},
    std::{env, sync::LazyLock},
};

/// Matches `{{ VAR_NAME }}` with optional whitespace around the variable name.
/// Variable names must be uppercase letters, digits, or underscores.
static HANDLEBAR_REGEXP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Z0-9_]+)\s*\}\}").unwrap());

/// Replaces every `{{ VAR_NAME }}` reference in `input` with the value of the
/// corresponding environment variable.
///
/// Missing variables are substituted with an empty string and logged at
/// `warn` level, so a configuration file never fails to load only because
/// an optional variable is unset.
///
/// ```
/// use splash_router::replace_handlebars_with_env;
///
/// let out = replace_handlebars_with_env("splash_item_id = \"{{ SPLASH_ITEM_UNSET_FOR_DOCS }}\"");
/// assert_eq!(out, "splash_item_id = \"\"");
/// ```
pub fn replace_handlebars_with_env(input: &str) -> String {
    HANDLEBAR_REGEXP
        .replace_all(input, |caps: &Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| {
                tracing::warn!(
                    variable = %var_name,
                    "Environment variable not found, substituting with empty string"
                );
                String::new()
            })
        })
        .to_string()
}

/// Returns true when `haystack` begins with `prefix`, ignoring ASCII case.
pub fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    strip_prefix_ignore_case(haystack, prefix).is_some()
}

/// Removes `prefix` from the front of `haystack`, ignoring ASCII case.
///
/// The matched head has exactly `prefix.len()` bytes, so the remainder is
/// always sliced on the boundary that was compared.
pub fn strip_prefix_ignore_case<'a>(haystack: &'a str, prefix: &str) -> Option<&'a str> {
    let head = haystack.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    haystack.get(prefix.len()..)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Strings without handlebars patterns should pass through unchanged
        #[test]
        fn handlebars_no_pattern_unchanged(s in "[^{}]*") {
            let result = replace_handlebars_with_env(&s);
            prop_assert_eq!(result, s);
        }

        #[test]
        fn handlebars_never_panics(s in ".*") {
            let _ = replace_handlebars_with_env(&s);
        }

        #[test]
        fn prefix_of_itself_in_any_case(s in "[a-zA-Z/]{0,20}") {
            prop_assert!(starts_with_ignore_case(&s.to_uppercase(), &s.to_lowercase()));
        }
    }

    #[test]
    fn test_replace_handlebars_with_env_with_variables() {
        unsafe {
            env::set_var("SPLASH_TEST_ITEM", "{1E2F3A4B-0000-0000-0000-000000000001}");
        }
        let output = replace_handlebars_with_env("splash_item_id = \"{{ SPLASH_TEST_ITEM }}\"");
        assert_eq!(
            output,
            "splash_item_id = \"{1E2F3A4B-0000-0000-0000-000000000001}\""
        );
        unsafe {
            env::remove_var("SPLASH_TEST_ITEM");
        }
    }

    #[test]
    fn test_replace_handlebars_with_env_missing_variable() {
        unsafe {
            env::remove_var("SPLASH_NONEXISTENT_VAR");
        }
        let output = replace_handlebars_with_env("Value: {{SPLASH_NONEXISTENT_VAR}}");
        assert_eq!(output, "Value: ");
    }

    #[test]
    fn test_starts_with_ignore_case() {
        assert!(starts_with_ignore_case("/Sitecore/Content/Home/Products", "/sitecore/content/home"));
        assert!(starts_with_ignore_case("/home", "/HOME"));
        assert!(!starts_with_ignore_case("/about", "/home"));
        assert!(!starts_with_ignore_case("/ho", "/home"));
    }

    #[test]
    fn test_strip_prefix_ignore_case() {
        assert_eq!(strip_prefix_ignore_case("/Home/Products", "/home"), Some("/Products"));
        assert_eq!(strip_prefix_ignore_case("/home", "/HOME"), Some(""));
        assert_eq!(strip_prefix_ignore_case("/about", "/home"), None);
        // KELVIN SIGN lower-cases to an ASCII 'k' but is three bytes long.
        assert_eq!(strip_prefix_ignore_case("/\u{212A}ome/products", "/kome"), None);
        assert_eq!(strip_prefix_ignore_case("/\u{212A}ome", "/\u{212A}"), Some("ome"));
    }
}
