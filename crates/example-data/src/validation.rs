//! Name validation mirroring the backend's member and item name rules.
//!
//! Names must be non-empty after trimming, carry no surrounding whitespace
//! and hold at most [`NAME_MAX`] characters. The backend trims on input, so
//! generated names are stored exactly as produced.

/// Maximum allowed length for member and grocery names.
pub const NAME_MAX: usize = 64;

/// Validates a member or grocery name against backend constraints.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_name;
///
/// assert!(is_valid_name("Ada"));
/// assert!(is_valid_name("O'Brien"));
/// assert!(!is_valid_name(""));
/// assert!(!is_valid_name(" Ada"));
/// ```
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty() && trimmed.len() == name.len() && name.chars().count() <= NAME_MAX
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("A", true)]
    #[case("Ada Lovelace", true)]
    #[case("Marie-Claire", true)]
    #[case("", false)]
    #[case("   ", false)]
    #[case("Ada ", false)]
    #[case("\tRice", false)]
    fn validates_names(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_valid_name(name), expected);
    }

    #[test]
    fn rejects_names_exceeding_max_length() {
        assert!(is_valid_name(&"A".repeat(NAME_MAX)));
        assert!(!is_valid_name(&"A".repeat(NAME_MAX + 1)));
    }
}
