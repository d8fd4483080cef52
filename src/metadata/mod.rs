//! Metadata resolution for annotated enumerations
//!
//! This module resolves the display text and synonym declared on each member
//! of an enumerated type, and answers generic annotation queries.
//!
//! Key features:
//! - Lazy-loading: A type's declarations are scanned on first use only
//! - Two independent tables per type: member name -> metadata, synonym -> value
//! - Keyed by `TypeId`, never by a hash of the type
//! - Failed builds are not cached: every call on a misdeclared type fails alike

mod cache;
mod ext;
mod types;

pub use cache::{CacheStats, MetadataRegistry};
pub use ext::EnumMetadataExt;
pub use types::{Annotation, EnumDescription, Enumeration, MemberDescription, MemberMetadata};
