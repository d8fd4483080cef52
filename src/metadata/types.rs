//! Declaration types for annotated enumerations

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Display text and synonym declared for one enum member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MemberMetadata {
    /// Human-readable label (e.g., "Buyer")
    pub display_text: &'static str,

    /// Alternate identifier used when parsing external strings (e.g., "BUY")
    pub synonym: &'static str,
}

impl MemberMetadata {
    pub const fn new(display_text: &'static str, synonym: &'static str) -> Self {
        Self {
            display_text,
            synonym,
        }
    }
}

/// A piece of static metadata attached to an enum member.
///
/// `MemberMetadata` is one kind; any `'static + Send + Sync` value can be
/// attached and later queried by its concrete type.
pub type Annotation = &'static (dyn Any + Send + Sync);

/// A closed set of named values with per-member annotations.
///
/// Usually implemented through [`annotated_enum!`](crate::annotated_enum).
/// The implementation acts as the static registration table: nothing is
/// discovered at runtime beyond what these items return.
pub trait Enumeration: Copy + Eq + Send + Sync + 'static {
    /// Every member, in declaration order
    const MEMBERS: &'static [Self];

    /// The member's declared name
    fn name(&self) -> &'static str;

    /// Annotations attached to the member, in declaration order
    fn annotations(&self) -> &'static [Annotation];

    /// First annotation of kind `A` on this member
    fn find_annotation<A: Any>(&self) -> Option<&'static A> {
        self.annotations()
            .iter()
            .find_map(|annotation| annotation.downcast_ref::<A>())
    }

    /// The member's `MemberMetadata`, if declared
    fn member_metadata(&self) -> Option<&'static MemberMetadata> {
        self.find_annotation::<MemberMetadata>()
    }
}

/// Serializable view of one member's metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDescription {
    pub name: String,
    pub display_text: String,
    pub synonym: String,
}

/// Serializable view of an enumerated type's metadata table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDescription {
    /// Fully qualified Rust type name
    pub type_name: String,

    /// Members in declaration order
    pub members: Vec<MemberDescription>,
}

impl EnumDescription {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn member(&self, name: &str) -> Option<&MemberDescription> {
        self.members.iter().find(|m| m.name == name)
    }
}
