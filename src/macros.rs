//! Declaration macro for annotated enumerations.

/// Declares an enum together with its [`Enumeration`](crate::Enumeration) table.
///
/// Each variant lists its display text and synonym, optionally followed by
/// extra annotations after a `;`:
///
/// ```
/// use enum_metadata::{annotated_enum, EnumMetadataExt};
///
/// pub struct Deprecated;
///
/// annotated_enum! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     pub enum Party {
///         Buyer => ("Buyer", "BUY"),
///         Seller => ("Seller", "SELL"),
///         Broker => ("Broker", "BRK"; Deprecated),
///     }
/// }
///
/// assert_eq!(Party::Seller.synonym().unwrap(), "SELL");
/// assert_eq!(Party::parse_synonym("BUY").unwrap(), Party::Buyer);
/// assert!(Party::Broker.has_annotation::<Deprecated>().unwrap());
/// ```
///
/// Annotation expressions must be constant, since they are stored in
/// per-member statics.
#[macro_export]
macro_rules! annotated_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => ($display:expr, $synonym:expr $(; $($annotation:expr),+ $(,)?)?)
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $crate::Enumeration for $name {
            const MEMBERS: &'static [Self] = &[$(Self::$variant),*];

            fn name(&self) -> &'static str {
                match *self {
                    $(Self::$variant => stringify!($variant),)*
                }
            }

            fn annotations(&self) -> &'static [$crate::Annotation] {
                match *self {
                    $(
                        Self::$variant => {
                            static ANNOTATIONS: &[$crate::Annotation] = &[
                                &$crate::MemberMetadata {
                                    display_text: $display,
                                    synonym: $synonym,
                                },
                                $($(&$annotation,)+)?
                            ];
                            ANNOTATIONS
                        }
                    )*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Enumeration, MemberMetadata, MetadataError, MetadataRegistry};

    #[derive(Debug, PartialEq)]
    struct Deprecated {
        since: &'static str,
    }

    #[derive(Debug, PartialEq)]
    struct Wire(u8);

    crate::annotated_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        enum Side {
            /// Purchasing side
            Bid => ("Bid", "B"),
            Ask => ("Ask", "A"; Wire(2)),
            Cross => ("Cross", "X"; Deprecated { since: "1.4" }, Wire(3),),
        }
    }

    crate::annotated_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Unlisted {}
    }

    #[test]
    fn test_members_in_declaration_order() {
        assert_eq!(Side::MEMBERS, &[Side::Bid, Side::Ask, Side::Cross]);

        let names: Vec<_> = Side::MEMBERS.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["Bid", "Ask", "Cross"]);
    }

    #[test]
    fn test_metadata_is_first_annotation() {
        assert_eq!(
            Side::Bid.member_metadata(),
            Some(&MemberMetadata::new("Bid", "B"))
        );
        assert_eq!(Side::Bid.annotations().len(), 1);
        assert_eq!(Side::Cross.annotations().len(), 3);
    }

    #[test]
    fn test_extra_annotations_are_queryable() {
        assert_eq!(Side::Ask.find_annotation::<Wire>(), Some(&Wire(2)));
        assert_eq!(Side::Cross.find_annotation::<Wire>(), Some(&Wire(3)));
        assert_eq!(
            Side::Cross.find_annotation::<Deprecated>(),
            Some(&Deprecated { since: "1.4" })
        );
        assert!(Side::Bid.find_annotation::<Wire>().is_none());
    }

    #[test]
    fn test_empty_enum_is_invalid_type_argument() {
        assert!(Unlisted::MEMBERS.is_empty());

        let registry = MetadataRegistry::new();
        assert!(matches!(
            registry.parse_synonym::<Unlisted>("ANY").unwrap_err(),
            MetadataError::InvalidTypeArgument { ref reason, .. } if reason == "declares no members"
        ));
        assert!(registry.try_parse_synonym::<Unlisted>("ANY").is_none());
    }
}
