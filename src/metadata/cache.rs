//! Metadata registry with lazily built, per-type lookup tables

use crate::config::{DuplicateSynonymPolicy, RegistryConfig, load_config};
use crate::error::{MetadataError, Result};
use crate::logging::{Timer, log_failure};
use crate::metadata::types::{EnumDescription, Enumeration, MemberDescription, MemberMetadata};
use dashmap::{DashMap, DashSet};
use serde::Serialize;
use std::any::{Any, TypeId, type_name, type_name_of_val};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// Cache statistics for monitoring
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub name_hits: u64,
    pub name_misses: u64,
    pub synonym_hits: u64,
    pub synonym_misses: u64,
    /// Declaration scans performed (one per table build attempt)
    pub scans: u64,
    pub build_failures: u64,
}

#[derive(Debug, Default)]
struct StatCounters {
    name_hits: AtomicU64,
    name_misses: AtomicU64,
    synonym_hits: AtomicU64,
    synonym_misses: AtomicU64,
    scans: AtomicU64,
    build_failures: AtomicU64,
}

impl StatCounters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> CacheStats {
        CacheStats {
            name_hits: self.name_hits.load(Ordering::Relaxed),
            name_misses: self.name_misses.load(Ordering::Relaxed),
            synonym_hits: self.synonym_hits.load(Ordering::Relaxed),
            synonym_misses: self.synonym_misses.load(Ordering::Relaxed),
            scans: self.scans.load(Ordering::Relaxed),
            build_failures: self.build_failures.load(Ordering::Relaxed),
        }
    }
}

/// Member name -> declared metadata, for one enumerated type
type NameTable = HashMap<&'static str, &'static MemberMetadata>;

/// Synonym -> member value, for one enumerated type
struct SynonymTable<E> {
    case_insensitive: bool,
    members: HashMap<Cow<'static, str>, E>,
}

impl<E: Copy> SynonymTable<E> {
    fn get(&self, synonym: &str) -> Option<E> {
        if self.case_insensitive {
            self.members.get(synonym.to_lowercase().as_str()).copied()
        } else {
            self.members.get(synonym).copied()
        }
    }
}

static GLOBAL: OnceLock<MetadataRegistry> = OnceLock::new();

/// Registry of display text and synonym tables, keyed by enumerated type
///
/// Tables are built from the type's declarations on first use and kept for
/// the registry's lifetime. A failed build is never cached: the next call
/// scans the declarations again.
pub struct MetadataRegistry {
    config: RegistryConfig,

    /// Name tables (lazy-populated)
    names: DashMap<TypeId, Arc<NameTable>>,

    /// Synonym tables, type-erased `SynonymTable<E>` (lazy-populated)
    synonyms: DashMap<TypeId, Arc<dyn Any + Send + Sync>>,

    /// Types that passed the enumeration check
    validated: DashSet<TypeId>,

    stats: StatCounters,
}

impl Default for MetadataRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataRegistry {
    /// Create a new registry with the default configuration
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a new registry with a custom configuration
    pub fn with_config(config: RegistryConfig) -> Self {
        tracing::info!(
            duplicate_synonyms = %config.duplicate_synonyms,
            case_insensitive_synonyms = config.case_insensitive_synonyms,
            "Creating enum metadata registry with lazy-loading"
        );

        Self {
            config,
            names: DashMap::new(),
            synonyms: DashMap::new(),
            validated: DashSet::new(),
            stats: StatCounters::default(),
        }
    }

    /// Process-wide registry, configured from the environment on first access
    pub fn global() -> &'static MetadataRegistry {
        GLOBAL.get_or_init(|| {
            let config = load_config().unwrap_or_else(|e| {
                tracing::warn!(
                    error = %e,
                    "Invalid enum metadata configuration, using defaults"
                );
                RegistryConfig::default()
            });
            MetadataRegistry::with_config(config)
        })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Declared metadata record for `value`
    pub fn metadata<E: Enumeration>(&self, value: E) -> Result<&'static MemberMetadata> {
        self.ensure_enumeration::<E>()?;
        let table = self.name_table::<E>()?;

        table
            .get(value.name())
            .copied()
            .ok_or_else(|| MetadataError::MissingMetadata {
                type_name: type_name::<E>(),
                member: value.name(),
            })
    }

    /// Human-readable label declared for `value`
    pub fn display_text<E: Enumeration>(&self, value: E) -> Result<&'static str> {
        Ok(self.metadata(value)?.display_text)
    }

    /// Synonym declared for `value`
    pub fn synonym<E: Enumeration>(&self, value: E) -> Result<&'static str> {
        Ok(self.metadata(value)?.synonym)
    }

    /// Like [`synonym`](Self::synonym), but any failure yields `None`
    pub fn try_synonym<E: Enumeration>(&self, value: E) -> Option<&'static str> {
        self.synonym(value).ok()
    }

    /// Member whose declared synonym is `synonym`
    pub fn parse_synonym<E: Enumeration>(&self, synonym: &str) -> Result<E> {
        self.ensure_enumeration::<E>()?;

        self.synonym_table::<E>()?
            .get(synonym)
            .ok_or_else(|| MetadataError::UnknownSynonym {
                type_name: type_name::<E>(),
                synonym: synonym.to_string(),
            })
    }

    /// Like [`parse_synonym`](Self::parse_synonym), but any failure yields `None`
    pub fn try_parse_synonym<E: Enumeration>(&self, synonym: &str) -> Option<E> {
        self.parse_synonym(synonym).ok()
    }

    pub fn synonym_exists<E: Enumeration>(&self, synonym: &str) -> Result<bool> {
        self.ensure_enumeration::<E>()?;
        Ok(self.synonym_table::<E>()?.get(synonym).is_some())
    }

    /// Whether `value` carries at least one annotation of kind `A`
    pub fn has_annotation<A: Any>(&self, value: impl Enumeration) -> Result<bool> {
        Ok(self.find_member_annotation::<_, A>(value)?.is_some())
    }

    /// First annotation of kind `A` on `value`
    pub fn annotation<A: Any>(&self, value: impl Enumeration) -> Result<&'static A> {
        self.find_member_annotation::<_, A>(value)?
            .ok_or_else(|| MetadataError::MissingAnnotation {
                type_name: type_name_of_val(&value),
                member: value.name(),
                annotation: type_name::<A>(),
            })
    }

    /// Metadata of every member of `E`, in declaration order
    pub fn describe<E: Enumeration>(&self) -> Result<EnumDescription> {
        self.ensure_enumeration::<E>()?;
        let table = self.name_table::<E>()?;

        let members = E::MEMBERS
            .iter()
            .map(|member| -> Result<MemberDescription> {
                let metadata = table.get(member.name()).ok_or_else(|| {
                    MetadataError::MissingMetadata {
                        type_name: type_name::<E>(),
                        member: member.name(),
                    }
                })?;
                Ok(MemberDescription {
                    name: member.name().to_string(),
                    display_text: metadata.display_text.to_string(),
                    synonym: metadata.synonym.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(EnumDescription {
            type_name: type_name::<E>().to_string(),
            members,
        })
    }

    /// Build both tables for `E` now, surfacing declaration defects early
    pub fn preload<E: Enumeration>(&self) -> Result<()> {
        self.ensure_enumeration::<E>()?;
        self.name_table::<E>()?;
        self.synonym_table::<E>()?;
        Ok(())
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    /// Number of types with a cached (name, synonym) table
    pub fn cache_sizes(&self) -> (usize, usize) {
        (self.names.len(), self.synonyms.len())
    }

    /// Log cache statistics (for periodic monitoring)
    pub fn log_stats(&self) {
        let stats = self.stats();
        let (name_tables, synonym_tables) = self.cache_sizes();

        let hits = stats.name_hits + stats.synonym_hits;
        let lookups = hits + stats.name_misses + stats.synonym_misses;
        let hit_rate = if lookups > 0 {
            (hits as f32 / lookups as f32 * 100.0) as u32
        } else {
            0
        };

        tracing::info!(
            name_tables = name_tables,
            synonym_tables = synonym_tables,
            hit_rate = hit_rate,
            scans = stats.scans,
            build_failures = stats.build_failures,
            "Enum metadata cache statistics"
        );
    }

    fn name_table<E: Enumeration>(&self) -> Result<Arc<NameTable>> {
        let key = TypeId::of::<E>();

        // Check cache first
        if let Some(table) = self.names.get(&key) {
            StatCounters::bump(&self.stats.name_hits);
            tracing::trace!(enum_type = type_name::<E>(), "Name table cache hit");
            return Ok(Arc::clone(table.value()));
        }

        // The shard stays locked while building, so racing callers wait for
        // this build instead of scanning again.
        let mut built = false;
        let table = self.names.entry(key).or_try_insert_with(|| {
            built = true;
            StatCounters::bump(&self.stats.name_misses);
            tracing::debug!(
                enum_type = type_name::<E>(),
                "Name table cache miss, scanning declarations"
            );
            self.build_name_table::<E>()
        })?;

        if !built {
            StatCounters::bump(&self.stats.name_hits);
        }
        Ok(Arc::clone(table.value()))
    }

    fn synonym_table<E: Enumeration>(&self) -> Result<Arc<SynonymTable<E>>> {
        let key = TypeId::of::<E>();

        let erased = match self.synonyms.get(&key) {
            Some(table) => {
                StatCounters::bump(&self.stats.synonym_hits);
                tracing::trace!(enum_type = type_name::<E>(), "Synonym table cache hit");
                Arc::clone(table.value())
            }
            None => {
                let mut built = false;
                let table = self.synonyms.entry(key).or_try_insert_with(|| {
                    built = true;
                    StatCounters::bump(&self.stats.synonym_misses);
                    tracing::debug!(
                        enum_type = type_name::<E>(),
                        "Synonym table cache miss, scanning declarations"
                    );
                    self.build_synonym_table::<E>()
                        .map(|table| Arc::new(table) as Arc<dyn Any + Send + Sync>)
                })?;

                if !built {
                    StatCounters::bump(&self.stats.synonym_hits);
                }
                Arc::clone(table.value())
            }
        };

        erased.downcast::<SynonymTable<E>>().map_err(|_| {
            MetadataError::Internal(format!(
                "synonym table cached for {} has an unexpected type",
                type_name::<E>()
            ))
        })
    }

    fn build_name_table<E: Enumeration>(&self) -> Result<Arc<NameTable>> {
        let scanned = self
            .scan_declarations::<E>()
            .inspect_err(|e| self.record_build_failure::<E>("build name table", e))?;

        let table: NameTable = scanned
            .into_iter()
            .map(|(member, metadata)| (member.name(), metadata))
            .collect();

        tracing::info!(
            enum_type = type_name::<E>(),
            members = table.len(),
            "Built and cached name table"
        );
        Ok(Arc::new(table))
    }

    fn build_synonym_table<E: Enumeration>(&self) -> Result<SynonymTable<E>> {
        let scanned = self
            .scan_declarations::<E>()
            .inspect_err(|e| self.record_build_failure::<E>("build synonym table", e))?;

        let case_insensitive = self.config.case_insensitive_synonyms;
        let mut members = HashMap::with_capacity(scanned.len());

        for (member, metadata) in scanned {
            let key = if case_insensitive {
                Cow::Owned(metadata.synonym.to_lowercase())
            } else {
                Cow::Borrowed(metadata.synonym)
            };

            let Some(previous) = members.insert(key, member) else {
                continue;
            };

            match self.config.duplicate_synonyms {
                DuplicateSynonymPolicy::Reject => {
                    let err = MetadataError::DuplicateSynonym {
                        type_name: type_name::<E>(),
                        synonym: metadata.synonym,
                        first: previous.name(),
                        second: member.name(),
                    };
                    self.record_build_failure::<E>("build synonym table", &err);
                    return Err(err);
                }
                DuplicateSynonymPolicy::LastWriteWins => {
                    tracing::warn!(
                        enum_type = type_name::<E>(),
                        synonym = metadata.synonym,
                        replaced = previous.name(),
                        member = member.name(),
                        "Duplicate synonym, keeping the later member"
                    );
                }
            }
        }

        tracing::info!(
            enum_type = type_name::<E>(),
            synonyms = members.len(),
            "Built and cached synonym table"
        );
        Ok(SynonymTable {
            case_insensitive,
            members,
        })
    }

    /// Walk every member in declaration order and collect its metadata.
    ///
    /// Stops at the first member without `MemberMetadata`.
    fn scan_declarations<E: Enumeration>(&self) -> Result<Vec<(E, &'static MemberMetadata)>> {
        let _timer = Timer::new("scan declarations", type_name::<E>());
        StatCounters::bump(&self.stats.scans);

        E::MEMBERS
            .iter()
            .map(|&member| {
                member
                    .member_metadata()
                    .map(|metadata| (member, metadata))
                    .ok_or_else(|| MetadataError::MissingMetadata {
                        type_name: type_name::<E>(),
                        member: member.name(),
                    })
            })
            .collect()
    }

    fn record_build_failure<E: Enumeration>(&self, operation: &str, error: &MetadataError) {
        StatCounters::bump(&self.stats.build_failures);
        log_failure(operation, type_name::<E>(), error);
    }

    /// Reject types that cannot act as an enumeration: no members, or two
    /// members sharing a name. A type is checked once per registry; failures
    /// are checked again on the next call.
    fn ensure_enumeration<E: Enumeration>(&self) -> Result<()> {
        let key = TypeId::of::<E>();
        if self.validated.contains(&key) {
            return Ok(());
        }

        let members = E::MEMBERS;
        if members.is_empty() {
            return Err(MetadataError::InvalidTypeArgument {
                type_name: type_name::<E>(),
                reason: "declares no members".to_string(),
            });
        }

        let mut seen = HashSet::with_capacity(members.len());
        for member in members {
            let name = member.name();
            if !seen.insert(name) {
                return Err(MetadataError::InvalidTypeArgument {
                    type_name: type_name::<E>(),
                    reason: format!("member name {} is declared more than once", name),
                });
            }
        }

        self.validated.insert(key);
        Ok(())
    }

    fn find_member_annotation<E: Enumeration, A: Any>(
        &self,
        value: E,
    ) -> Result<Option<&'static A>> {
        self.ensure_enumeration::<E>()?;
        Ok(value.find_annotation::<A>())
    }
}
