//! [`LikePattern`] definition.

use derive_more::Display;
use postgres_types::{FromSql, ToSql};

/// SQL pattern matching a substring case-insensitively via `ILIKE`.
#[derive(Clone, Debug, Display, Eq, FromSql, PartialEq, ToSql)]
#[postgres(transparent)]
pub struct LikePattern(String);

impl LikePattern {
    /// Creates a new [`LikePattern`] matching any value containing the given
    /// `input` as a substring.
    ///
    /// `LIKE` metacharacters of the `input` are escaped, so it always
    /// matches literally.
    #[must_use]
    pub fn contains(input: &str) -> Self {
        Self(format!(
            "%{}%",
            input
                .replace('\\', r"\\")
                .replace('%', r"\%")
                .replace('_', r"\_"),
        ))
    }
}

#[cfg(test)]
mod spec {
    use super::LikePattern;

    #[test]
    fn wraps_input_into_wildcards() {
        assert_eq!(
            LikePattern::contains("spring"),
            LikePattern("%spring%".to_owned()),
        );
    }

    #[test]
    fn escapes_metacharacters() {
        assert_eq!(
            LikePattern::contains(r"100%_\done"),
            LikePattern(r"%100\%\_\\done%".to_owned()),
        );
    }
}
