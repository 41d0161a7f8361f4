//! Tenant slug type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum SlugError {
    /// The input string is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[a-z0-9-]`.
    #[error("slug may only contain lowercase letters, digits, and hyphens (found {found:?})")]
    InvalidChar {
        /// The offending character.
        found: char,
    },
    /// The input starts or ends with a hyphen.
    #[error("slug cannot start or end with a hyphen")]
    EdgeHyphen,
}

/// A URL-safe tenant identifier.
///
/// Slugs appear in public URLs (`/companies/{slug}/...`) and must be stable,
/// so validation is strict: lowercase ASCII letters, digits, and interior
/// hyphens only.
///
/// ## Examples
///
/// ```
/// use turnera_core::Slug;
///
/// assert!(Slug::parse("tamanaco-spa").is_ok());
/// assert!(Slug::parse("salon24").is_ok());
///
/// assert!(Slug::parse("").is_err());          // empty
/// assert!(Slug::parse("Tamanaco").is_err());  // uppercase
/// assert!(Slug::parse("-spa").is_err());      // edge hyphen
/// assert!(Slug::parse("spa barber").is_err()); // whitespace
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Maximum length of a slug.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `Slug` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 64 characters,
    /// contains a character outside `[a-z0-9-]`, or has a leading/trailing
    /// hyphen.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(found) = s
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(SlugError::InvalidChar { found });
        }

        if s.starts_with('-') || s.ends_with('-') {
            return Err(SlugError::EdgeHyphen);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Slug {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Slug {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Slug {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_slugs() {
        assert!(Slug::parse("tamanaco-spa").is_ok());
        assert!(Slug::parse("spa").is_ok());
        assert!(Slug::parse("salon-24-7").is_ok());
        assert!(Slug::parse("x").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Slug::parse(""), Err(SlugError::Empty)));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(65);
        assert!(matches!(Slug::parse(&long), Err(SlugError::TooLong { .. })));
    }

    #[test]
    fn test_parse_invalid_chars() {
        assert!(matches!(
            Slug::parse("Tamanaco"),
            Err(SlugError::InvalidChar { found: 'T' })
        ));
        assert!(matches!(
            Slug::parse("spa barber"),
            Err(SlugError::InvalidChar { found: ' ' })
        ));
        assert!(matches!(
            Slug::parse("café"),
            Err(SlugError::InvalidChar { .. })
        ));
    }

    #[test]
    fn test_parse_edge_hyphen() {
        assert!(matches!(Slug::parse("-spa"), Err(SlugError::EdgeHyphen)));
        assert!(matches!(Slug::parse("spa-"), Err(SlugError::EdgeHyphen)));
    }

    #[test]
    fn test_display_and_from_str() {
        let slug: Slug = "tamanaco-spa".parse().unwrap();
        assert_eq!(slug.to_string(), "tamanaco-spa");
        assert_eq!(slug.as_str(), "tamanaco-spa");
    }

    #[test]
    fn test_serde_roundtrip() {
        let slug = Slug::parse("tamanaco-spa").unwrap();
        let json = serde_json::to_string(&slug).unwrap();
        assert_eq!(json, "\"tamanaco-spa\"");

        let parsed: Slug = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, slug);
    }
}
