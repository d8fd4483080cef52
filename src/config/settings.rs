use crate::error::{MetadataError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DUPLICATE_SYNONYMS_VAR: &str = "ENUM_METADATA_DUPLICATE_SYNONYMS";
pub const CASE_INSENSITIVE_SYNONYMS_VAR: &str = "ENUM_METADATA_CASE_INSENSITIVE_SYNONYMS";

/// What a synonym table build does when two members declare the same synonym
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateSynonymPolicy {
    /// Later members overwrite earlier ones, in declaration order
    #[default]
    LastWriteWins,
    /// Fail the build with `MetadataError::DuplicateSynonym`
    Reject,
}

impl DuplicateSynonymPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateSynonymPolicy::LastWriteWins => "last-write-wins",
            DuplicateSynonymPolicy::Reject => "reject",
        }
    }
}

impl fmt::Display for DuplicateSynonymPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicateSynonymPolicy {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "last-write-wins" => Ok(DuplicateSynonymPolicy::LastWriteWins),
            "reject" => Ok(DuplicateSynonymPolicy::Reject),
            other => Err(MetadataError::Config(format!(
                "Invalid {}: {}",
                DUPLICATE_SYNONYMS_VAR, other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub duplicate_synonyms: DuplicateSynonymPolicy,
    pub case_insensitive_synonyms: bool,
}

pub fn load_config() -> Result<RegistryConfig> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    config_from_lookup(|key| std::env::var(key).ok())
}

/// Build a config from an arbitrary key lookup; unset keys keep their defaults
pub fn config_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<RegistryConfig> {
    let duplicate_synonyms = match lookup(DUPLICATE_SYNONYMS_VAR) {
        Some(value) => value.parse()?,
        None => DuplicateSynonymPolicy::default(),
    };

    let case_insensitive_synonyms: bool = lookup(CASE_INSENSITIVE_SYNONYMS_VAR)
        .unwrap_or_else(|| "false".to_string())
        .trim()
        .parse()
        .map_err(|_| {
            MetadataError::Config(format!("Invalid {}", CASE_INSENSITIVE_SYNONYMS_VAR))
        })?;

    Ok(RegistryConfig {
        duplicate_synonyms,
        case_insensitive_synonyms,
    })
}
