//! Strongly-typed source and query names.

use crate::newtype_name::define_identifier_name;

define_identifier_name! {
    /// Name of a tabular source; also the name of the table it loads into.
    pub struct SourceName("source");
}

define_identifier_name! {
    /// Name of an entry in the query catalog.
    pub struct QueryName("query");
}

/// The eight entities of the painting dataset, in load order.
pub const DEFAULT_SOURCES: &[&str] = &[
    "artist",
    "canvas_size",
    "image_link",
    "museum_hours",
    "museum",
    "product_size",
    "subject",
    "work",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn parse_accepts_identifiers() {
        let name = SourceName::parse("museum_hours").unwrap();
        assert_eq!(name, "museum_hours");
        assert_eq!(name.to_string(), "museum_hours");
    }

    #[test]
    fn parse_rejects_empty() {
        let err = SourceName::parse("").unwrap_err();
        assert!(matches!(err, CoreError::InvalidName { kind: "source", .. }));
    }

    #[test]
    fn parse_rejects_leading_digit_and_punctuation() {
        assert!(QueryName::parse("1st").is_err());
        assert!(QueryName::parse("drop table;").is_err());
        assert!(QueryName::parse("a-b").is_err());
    }

    #[test]
    fn from_str_round_trips() {
        let name: QueryName = "top_subjects".parse().unwrap();
        assert_eq!(name.as_str(), "top_subjects");
    }

    #[test]
    fn deserialize_rejects_invalid_name() {
        let ok: Vec<SourceName> = serde_yaml::from_str("[artist, work]").unwrap();
        assert_eq!(ok.len(), 2);

        let bad: Result<Vec<SourceName>, _> = serde_yaml::from_str("['bad name']");
        assert!(bad.is_err());
    }

    #[test]
    fn default_sources_are_valid_names() {
        for name in DEFAULT_SOURCES {
            assert!(SourceName::parse(*name).is_ok(), "{name}");
        }
    }

    #[test]
    #[should_panic]
    fn new_panics_on_invalid_literal() {
        let _ = QueryName::new("not valid");
    }
}
