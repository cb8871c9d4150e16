//! Loader and builder policies.
//!
//! Values come from defaults, an optional TOML file and `BLOCK_BUILDER_`
//! prefixed environment variables, in increasing order of precedence.

use crate::error::ConfigError;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const ENV_PREFIX: &str = "BLOCK_BUILDER_";

/// How the fields after `txid,fee,weight` name the parents of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentEncoding {
    /// Every trailing field is one parent txid.
    #[default]
    TrailingFields,
    /// A single trailing field holding parent txids joined by `;`.
    SubDelimited,
    /// Only the first trailing field is read, the rest is dropped.
    /// Matches producers that joined parents with the field delimiter.
    FirstFieldOnly,
}

/// What to do when a txid appears on more than one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    #[default]
    Reject,
    KeepFirst,
}

/// Post-selection filter applied to the greedy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootFilter {
    /// Drop transactions without declared parents from the block. Roots are
    /// still selected during the loop so their children become eligible.
    #[default]
    DropRoots,
    KeepAll,
}

impl fmt::Display for ParentEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentEncoding::TrailingFields => write!(f, "trailing_fields"),
            ParentEncoding::SubDelimited => write!(f, "sub_delimited"),
            ParentEncoding::FirstFieldOnly => write!(f, "first_field_only"),
        }
    }
}

impl fmt::Display for RootFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootFilter::DropRoots => write!(f, "drop_roots"),
            RootFilter::KeepAll => write!(f, "keep_all"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub parent_encoding: ParentEncoding,
    pub duplicate_policy: DuplicatePolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub root_filter: RootFilter,
}

/// Complete configuration.
///
/// # Example config (TOML)
/// ```toml
/// [loader]
/// parent_encoding = "sub_delimited"
/// duplicate_policy = "keep_first"
///
/// [builder]
/// root_filter = "keep_all"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub loader: LoaderConfig,
    pub builder: BuildConfig,
}

impl Config {
    /// Load configuration from a `.toml` file, overridden by the environment
    /// (e.g. `BLOCK_BUILDER_BUILDER__ROOT_FILTER=keep_all`).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let figment = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::defaults().merge(Toml::file_exact(path)),
            Some(ext) => return Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => return Err(ConfigError::MissingExtension(path.to_path_buf())),
        };
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        Self::extract(figment)
    }

    /// Defaults overridden by the environment only.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::extract(Self::defaults())
    }

    fn defaults() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ConfigError::Invalid(Box::new(e)))
    }
}
