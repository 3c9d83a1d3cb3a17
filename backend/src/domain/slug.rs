//! Slug validation for human-readable identifiers such as week ids.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, and hyphens.

/// Longest slug accepted as an identifier.
pub(crate) const SLUG_MAX: usize = 64;

/// Return `true` when `value` is a valid domain slug.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= SLUG_MAX
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("week-1", true)]
    #[case("week-52", true)]
    #[case("", false)]
    #[case(" week-1", false)]
    #[case("Week-1", false)]
    #[case("week_1", false)]
    fn validates_slugs(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_slug(value), expected);
    }

    #[rstest]
    fn rejects_overlong_slugs() {
        assert!(!is_valid_slug(&"w".repeat(SLUG_MAX + 1)));
    }
}
