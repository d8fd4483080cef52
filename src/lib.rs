pub mod config;
pub mod error;
pub mod logging;
mod macros;
pub mod metadata;
pub mod serde_synonym;

pub use config::{DuplicateSynonymPolicy, RegistryConfig, load_config};
pub use error::{MetadataError, Result};
pub use metadata::{
    Annotation, CacheStats, EnumDescription, EnumMetadataExt, Enumeration, MemberDescription,
    MemberMetadata, MetadataRegistry,
};
