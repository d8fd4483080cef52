//! Serialize enum fields as their synonym.
//!
//! Use with `#[serde(with = "enum_metadata::serde_synonym")]`. Lookups go
//! through [`MetadataRegistry::global`].

use crate::metadata::{Enumeration, MetadataRegistry};
use serde::{Deserialize, Deserializer, Serializer, de, ser};
use std::borrow::Cow;

pub fn serialize<E, S>(value: &E, serializer: S) -> Result<S::Ok, S::Error>
where
    E: Enumeration,
    S: Serializer,
{
    let synonym = MetadataRegistry::global()
        .synonym(*value)
        .map_err(ser::Error::custom)?;
    serializer.serialize_str(synonym)
}

pub fn deserialize<'de, E, D>(deserializer: D) -> Result<E, D::Error>
where
    E: Enumeration,
    D: Deserializer<'de>,
{
    let synonym = Cow::<'de, str>::deserialize(deserializer)?;
    MetadataRegistry::global()
        .parse_synonym(&synonym)
        .map_err(de::Error::custom)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    crate::annotated_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Currency {
            Euro => ("Euro", "EUR"),
            PoundSterling => ("Pound sterling", "GBP"),
        }
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Payment {
        amount: u64,
        #[serde(with = "crate::serde_synonym")]
        currency: Currency,
    }

    #[test]
    fn test_serializes_synonym() {
        let payment = Payment {
            amount: 250,
            currency: Currency::PoundSterling,
        };

        let json = serde_json::to_string(&payment).unwrap();
        assert_eq!(json, r#"{"amount":250,"currency":"GBP"}"#);
    }

    #[test]
    fn test_deserializes_synonym() {
        let payment: Payment = serde_json::from_str(r#"{"amount":10,"currency":"EUR"}"#).unwrap();

        assert_eq!(
            payment,
            Payment {
                amount: 10,
                currency: Currency::Euro,
            }
        );
    }

    #[test]
    fn test_unknown_synonym_is_deserialize_error() {
        let err = serde_json::from_str::<Payment>(r#"{"amount":10,"currency":"JPY"}"#).unwrap_err();

        assert!(err.to_string().contains("'JPY'"));
    }
}
