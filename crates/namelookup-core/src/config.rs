//! Configuration types for namelookup.
//!
//! [`Config::load`] layers, lowest precedence first: the embedded defaults, an
//! optional TOML file, and `NAMELOOKUP__*` environment variables (for example
//! `NAMELOOKUP__SOLR__HOST`). [`Config::defaults`] returns the embedded
//! defaults without touching the filesystem or environment (useful in tests).
//!
//! The loaded value is handed to each component at construction; nothing
//! reads process state after startup.

use crate::error::ConfigError;
use crate::ranking::RankingProfile;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[server]
bind = "0.0.0.0:2433"

[solr]
host         = "localhost"
port         = 8983
core         = "name_lookup"
timeout_secs = 30

[lookup]
default_limit        = 10
max_limit            = 1000
reverse_lookup_limit = 1000000
bulk_failure_policy  = "abort"

[ranking]
boost = "log_clique_size"

[ranking.query_fields]
preferred_name_exactish = 250.0
names_exactish          = 100.0
preferred_name          = 25.0
names                   = 10.0

[ranking.phrase_fields]
preferred_name_exactish = 500.0
names_exactish          = 200.0
preferred_name          = 50.0
names                   = 20.0

[highlighting]
pre_tag  = "<strong>"
post_tag = "</strong>"
"#;

const ENV_PREFIX: &str = "NAMELOOKUP";

/// Hard upper bound on a page size. `lookup.max_limit` may lower it, never raise it.
pub const LIMIT_CEILING: usize = 1000;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub solr: SolrConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub ranking: RankingProfile,
    #[serde(default)]
    pub highlighting: HighlightConfig,
}

/// `[server]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "0.0.0.0:2433".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

/// `[solr]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SolrConfig {
    #[serde(default = "default_solr_host")]
    pub host: String,
    #[serde(default = "default_solr_port")]
    pub port: u16,
    #[serde(default = "default_solr_core")]
    pub core: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_solr_host() -> String { "localhost".to_string() }
fn default_solr_port() -> u16 { 8983 }
fn default_solr_core() -> String { "name_lookup".to_string() }
fn default_timeout_secs() -> u64 { 30 }

impl Default for SolrConfig {
    fn default() -> Self {
        Self {
            host: default_solr_host(),
            port: default_solr_port(),
            core: default_solr_core(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SolrConfig {
    /// Base URL of the core, e.g. `http://localhost:8983/solr/name_lookup`.
    pub fn core_url(&self) -> String {
        format!("http://{}:{}/solr/{}", self.host, self.port, self.core)
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

/// What a bulk lookup does when one of its sub-lookups fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkFailurePolicy {
    /// The first failure fails the whole batch.
    #[default]
    Abort,
    /// Failed keys carry an error marker; the rest of the batch is returned.
    PerKey,
}

/// `[lookup]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    #[serde(default = "default_reverse_lookup_limit")]
    pub reverse_lookup_limit: usize,
    #[serde(default)]
    pub bulk_failure_policy: BulkFailurePolicy,
}

fn default_limit() -> usize { 10 }
fn default_max_limit() -> usize { 1000 }
fn default_reverse_lookup_limit() -> usize { 1_000_000 }

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            reverse_lookup_limit: default_reverse_lookup_limit(),
            bulk_failure_policy: BulkFailurePolicy::default(),
        }
    }
}

/// `[highlighting]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct HighlightConfig {
    #[serde(default = "default_pre_tag")]
    pub pre_tag: String,
    #[serde(default = "default_post_tag")]
    pub post_tag: String,
}

fn default_pre_tag() -> String { "<strong>".to_string() }
fn default_post_tag() -> String { "</strong>".to_string() }

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            pre_tag: default_pre_tag(),
            post_tag: default_post_tag(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load configuration. `path` overrides the default location
    /// (`$XDG_CONFIG_HOME/namelookup/config.toml`); an explicit path must
    /// exist, the default one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (file, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (config_path(), false),
        };

        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(file.as_path()).required(required))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ranking.validate()?;
        if self.lookup.max_limit > LIMIT_CEILING {
            return Err(ConfigError::Invalid(format!(
                "lookup.max_limit ({}) exceeds {LIMIT_CEILING}",
                self.lookup.max_limit
            )));
        }
        if self.lookup.default_limit > self.lookup.max_limit {
            return Err(ConfigError::Invalid(format!(
                "lookup.default_limit ({}) exceeds lookup.max_limit ({})",
                self.lookup.default_limit, self.lookup.max_limit
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("namelookup")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::BoostFunction;
    use std::io::Write;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.solr.port, 8983);
        assert_eq!(cfg.solr.core, "name_lookup");
        assert_eq!(cfg.lookup.max_limit, 1000);
        assert_eq!(cfg.lookup.bulk_failure_policy, BulkFailurePolicy::Abort);
        assert_eq!(cfg.ranking, RankingProfile::default());
        assert_eq!(cfg.highlighting.pre_tag, "<strong>");
        cfg.validate().unwrap();
    }

    #[test]
    fn core_url_from_parts() {
        let cfg = Config::defaults();
        assert_eq!(cfg.solr.core_url(), "http://localhost:8983/solr/name_lookup");
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[solr]
host = "solr.internal"

[lookup]
bulk_failure_policy = "per_key"

[ranking]
boost = "none"
"#
        )
        .unwrap();

        let cfg = Config::load(Some(file.path())).unwrap();
        assert_eq!(cfg.solr.host, "solr.internal");
        assert_eq!(cfg.solr.port, 8983);
        assert_eq!(cfg.lookup.bulk_failure_policy, BulkFailurePolicy::PerKey);
        assert_eq!(cfg.ranking.boost, BoostFunction::None);
        assert_eq!(cfg.ranking.query_fields.names, 10.0);
    }

    #[test]
    fn inverted_weights_fail_to_load() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[ranking.query_fields]
names = 500.0
"#
        )
        .unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Ranking(_)), "{err}");
    }

    #[test]
    fn oversized_limit_ceiling_fails_to_load() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[lookup]\nmax_limit = 5000").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
        assert!(err.to_string().contains("max_limit"), "{err}");
    }

    #[test]
    fn default_limit_above_max_limit_fails_to_load() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[lookup]\ndefault_limit = 50\nmax_limit = 20").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
        assert!(err.to_string().contains("default_limit"), "{err}");
    }

    #[test]
    fn lowered_limit_ceiling_loads() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[lookup]\ndefault_limit = 5\nmax_limit = 100").unwrap();

        let cfg = Config::load(Some(file.path())).unwrap();
        assert_eq!(cfg.lookup.max_limit, 100);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::load(Some(&missing)).is_err());
    }
}
