//! Macro for defining identifier-shaped name newtypes.
//!
//! Source names become table names and query names are typed on the command
//! line, so both share one rule: ASCII letters, digits and underscores, not
//! starting with a digit.

use crate::error::{CoreError, CoreResult};

/// Check that `name` is a plain SQL-style identifier.
pub(crate) fn validate_identifier(kind: &'static str, name: &str) -> CoreResult<()> {
    let reason = if name.is_empty() {
        Some("must not be empty")
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        Some("must not start with a digit")
    } else if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Some("must contain only ASCII letters, digits and underscores")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CoreError::InvalidName {
            kind,
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Define a validated identifier newtype.
///
/// Generates `parse()` (fallible), `new()` (panics, for literals), `as_str()`,
/// plus `Display`, `FromStr`, `AsRef<str>`, `Deref<Target=str>`,
/// `Borrow<str>`, string comparisons and serde impls that reject invalid
/// names.
macro_rules! define_identifier_name {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident($kind:literal);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
        #[serde(transparent)]
        $vis struct $Name(String);

        impl $Name {
            /// Validate and wrap `name`.
            pub fn parse(name: impl Into<String>) -> $crate::error::CoreResult<Self> {
                let name = name.into();
                $crate::newtype_name::validate_identifier($kind, &name)?;
                Ok(Self(name))
            }

            /// Wrap a name known to be valid, panicking otherwise.
            ///
            /// Intended for literals; use [`parse`](Self::parse) for user input.
            pub fn new(name: impl Into<String>) -> Self {
                match Self::parse(name) {
                    Ok(parsed) => parsed,
                    Err(e) => panic!("{e}"),
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::str::FromStr for $Name {
            type Err = $crate::error::CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl<'de> serde::Deserialize<'de> for $Name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                $Name::parse(s).map_err(serde::de::Error::custom)
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $Name {
            fn as_ref(&self) -> &str { &self.0 }
        }

        impl std::ops::Deref for $Name {
            type Target = str;
            fn deref(&self) -> &str { &self.0 }
        }

        impl std::borrow::Borrow<str> for $Name {
            fn borrow(&self) -> &str { &self.0 }
        }

        impl PartialEq<str> for $Name {
            fn eq(&self, other: &str) -> bool { self.0 == other }
        }

        impl PartialEq<&str> for $Name {
            fn eq(&self, other: &&str) -> bool { self.0 == *other }
        }
    };
}

pub(crate) use define_identifier_name;
