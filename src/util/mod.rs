pub mod logging;

/// Case-insensitive substring test, matching on lowercased text.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
	haystack.to_lowercase().contains(&needle.to_lowercase())
}
