use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("{type_name} is not an enumerated type: {reason}")]
    InvalidTypeArgument {
        type_name: &'static str,
        reason: String,
    },

    #[error("Member {member} of {type_name} has no MemberMetadata annotation")]
    MissingMetadata {
        type_name: &'static str,
        member: &'static str,
    },

    #[error("Synonym '{synonym}' does not match any member of {type_name}")]
    UnknownSynonym {
        type_name: &'static str,
        synonym: String,
    },

    #[error("Member {member} of {type_name} has no annotation of type {annotation}")]
    MissingAnnotation {
        type_name: &'static str,
        member: &'static str,
        annotation: &'static str,
    },

    #[error("Synonym '{synonym}' is declared by both {first} and {second} in {type_name}")]
    DuplicateSynonym {
        type_name: &'static str,
        synonym: &'static str,
        first: &'static str,
        second: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, MetadataError>;
