mod settings;

pub use settings::{
    CASE_INSENSITIVE_SYNONYMS_VAR, DUPLICATE_SYNONYMS_VAR, DuplicateSynonymPolicy,
    RegistryConfig, config_from_lookup, load_config,
};
