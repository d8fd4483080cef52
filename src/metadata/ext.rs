//! Method-call access to the global registry

use crate::error::Result;
use crate::metadata::cache::MetadataRegistry;
use crate::metadata::types::Enumeration;
use std::any::Any;

/// Lookups on enum values, backed by [`MetadataRegistry::global`]
pub trait EnumMetadataExt: Enumeration {
    fn display_text(self) -> Result<&'static str> {
        MetadataRegistry::global().display_text(self)
    }

    fn synonym(self) -> Result<&'static str> {
        MetadataRegistry::global().synonym(self)
    }

    fn try_synonym(self) -> Option<&'static str> {
        MetadataRegistry::global().try_synonym(self)
    }

    fn parse_synonym(synonym: &str) -> Result<Self> {
        MetadataRegistry::global().parse_synonym(synonym)
    }

    fn try_parse_synonym(synonym: &str) -> Option<Self> {
        MetadataRegistry::global().try_parse_synonym(synonym)
    }

    fn synonym_exists(synonym: &str) -> Result<bool> {
        MetadataRegistry::global().synonym_exists::<Self>(synonym)
    }

    fn has_annotation<A: Any>(self) -> Result<bool> {
        MetadataRegistry::global().has_annotation::<A>(self)
    }

    fn annotation<A: Any>(self) -> Result<&'static A> {
        MetadataRegistry::global().annotation::<A>(self)
    }
}

impl<E: Enumeration> EnumMetadataExt for E {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetadataError;

    #[derive(Debug, PartialEq)]
    struct Retired;

    crate::annotated_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum TimeInForce {
            Day => ("Day", "DAY"),
            GoodTillCancel => ("Good till cancel", "GTC"),
            FillOrKill => ("Fill or kill", "FOK"; Retired),
        }
    }

    #[test]
    fn test_value_methods() {
        assert_eq!(TimeInForce::GoodTillCancel.display_text().unwrap(), "Good till cancel");
        assert_eq!(TimeInForce::Day.synonym().unwrap(), "DAY");
        assert_eq!(TimeInForce::FillOrKill.try_synonym(), Some("FOK"));
    }

    #[test]
    fn test_associated_parse() {
        assert_eq!(TimeInForce::parse_synonym("GTC").unwrap(), TimeInForce::GoodTillCancel);
        assert!(TimeInForce::synonym_exists("FOK").unwrap());
        assert!(!TimeInForce::synonym_exists("IOC").unwrap());
        assert_eq!(TimeInForce::try_parse_synonym("IOC"), None);
        assert!(matches!(
            TimeInForce::parse_synonym("IOC").unwrap_err(),
            MetadataError::UnknownSynonym { .. }
        ));
    }

    #[test]
    fn test_annotation_methods() {
        assert!(TimeInForce::FillOrKill.has_annotation::<Retired>().unwrap());
        assert!(!TimeInForce::Day.has_annotation::<Retired>().unwrap());
        assert_eq!(TimeInForce::FillOrKill.annotation::<Retired>().unwrap(), &Retired);
        assert!(TimeInForce::Day.annotation::<Retired>().is_err());
    }
}
