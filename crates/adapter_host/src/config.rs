//! Bridge configuration.
//!
//! Controls how strictly container shapes are detected and which class
//! names the registrar attaches to the host module. Loaded from defaults,
//! a TOML file, or `RISKS_BRIDGE_*` environment variables.
//!
//! # Examples
//!
//! ```rust
//! use adapter_host::config::{BridgeConfig, ElementSampling};
//!
//! let config = BridgeConfig::builder()
//!     .sampling(ElementSampling::All)
//!     .vector_class("RealVector")
//!     .build()
//!     .expect("valid configuration");
//!
//! assert_eq!(config.sampling, ElementSampling::All);
//! assert_eq!(config.vector_class, "RealVector");
//! assert_eq!(config.pair_vector_class, "DoublePairVector");
//! ```

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{BridgeError, BridgeResult};
use crate::host::ContainerKind;

/// Environment variable overriding [`BridgeConfig::sampling`].
pub const ENV_SAMPLING: &str = "RISKS_BRIDGE_SAMPLING";
/// Environment variable overriding [`BridgeConfig::vector_class`].
pub const ENV_VECTOR_CLASS: &str = "RISKS_BRIDGE_VECTOR_CLASS";
/// Environment variable overriding [`BridgeConfig::vector_vector_class`].
pub const ENV_VECTOR_VECTOR_CLASS: &str = "RISKS_BRIDGE_VECTOR_VECTOR_CLASS";
/// Environment variable overriding [`BridgeConfig::pair_vector_class`].
pub const ENV_PAIR_VECTOR_CLASS: &str = "RISKS_BRIDGE_PAIR_VECTOR_CLASS";

/// How many container elements a shape predicate inspects.
///
/// `First` inspects only the first element, so a container whose later
/// elements are incompatible passes the predicate and fails at conversion.
/// `All` inspects every element, making the predicate exact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementSampling {
    /// Inspect the first element only
    #[default]
    First,
    /// Inspect every element
    All,
}

impl FromStr for ElementSampling {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" => Ok(ElementSampling::First),
            "all" => Ok(ElementSampling::All),
            _ => Err(BridgeError::Config(format!(
                "invalid sampling '{}': must be one of first, all",
                s
            ))),
        }
    }
}

impl fmt::Display for ElementSampling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementSampling::First => write!(f, "first"),
            ElementSampling::All => write!(f, "all"),
        }
    }
}

/// Boundary adapter configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Element sampling used by shape predicates
    pub sampling: ElementSampling,
    /// Class name of the sequence-of-Real container
    pub vector_class: String,
    /// Class name of the sequence-of-sequences container
    pub vector_vector_class: String,
    /// Class name of the sequence-of-pairs container
    pub pair_vector_class: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            sampling: ElementSampling::First,
            vector_class: ContainerKind::RealVector.default_class_name().to_string(),
            vector_vector_class: ContainerKind::RealVectorVector
                .default_class_name()
                .to_string(),
            pair_vector_class: ContainerKind::RealPairVector
                .default_class_name()
                .to_string(),
        }
    }
}

impl BridgeConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> BridgeConfigBuilder {
        BridgeConfigBuilder::default()
    }

    /// Returns the configured class name for `kind`.
    pub fn class_name(&self, kind: ContainerKind) -> &str {
        match kind {
            ContainerKind::RealVector => &self.vector_class,
            ContainerKind::RealVectorVector => &self.vector_vector_class,
            ContainerKind::RealPairVector => &self.pair_vector_class,
        }
    }

    /// Loads configuration from a TOML file. Missing keys take defaults.
    pub fn from_file(path: &Path) -> BridgeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> BridgeResult<Self> {
        let config: BridgeConfig = toml::from_str(content)
            .map_err(|e| BridgeError::Config(format!("failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `RISKS_BRIDGE_*` environment variables.
    pub fn from_env() -> BridgeResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> BridgeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(sampling) = lookup(ENV_SAMPLING) {
            config.sampling = sampling.parse()?;
        }
        if let Some(name) = lookup(ENV_VECTOR_CLASS) {
            config.vector_class = name;
        }
        if let Some(name) = lookup(ENV_VECTOR_VECTOR_CLASS) {
            config.vector_vector_class = name;
        }
        if let Some(name) = lookup(ENV_PAIR_VECTOR_CLASS) {
            config.pair_vector_class = name;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Config` if a class name is not an identifier or
    /// two container kinds share a class name.
    pub fn validate(&self) -> BridgeResult<()> {
        for kind in ContainerKind::ALL {
            let name = self.class_name(kind);
            if !is_identifier(name) {
                return Err(BridgeError::Config(format!(
                    "class name '{}' for {:?} is not a valid identifier",
                    name, kind
                )));
            }
        }
        let [a, b, c] = ContainerKind::ALL.map(|kind| self.class_name(kind));
        if a == b || a == c || b == c {
            return Err(BridgeError::Config(
                "container class names must be distinct".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Builder for [`BridgeConfig`], validated at build time.
#[derive(Clone, Debug, Default)]
pub struct BridgeConfigBuilder {
    sampling: ElementSampling,
    vector_class: Option<String>,
    vector_vector_class: Option<String>,
    pair_vector_class: Option<String>,
}

impl BridgeConfigBuilder {
    /// Sets the element sampling used by shape predicates.
    #[inline]
    pub fn sampling(mut self, sampling: ElementSampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Sets the sequence-of-Real class name.
    #[inline]
    pub fn vector_class(mut self, name: impl Into<String>) -> Self {
        self.vector_class = Some(name.into());
        self
    }

    /// Sets the sequence-of-sequences class name.
    #[inline]
    pub fn vector_vector_class(mut self, name: impl Into<String>) -> Self {
        self.vector_vector_class = Some(name.into());
        self
    }

    /// Sets the sequence-of-pairs class name.
    #[inline]
    pub fn pair_vector_class(mut self, name: impl Into<String>) -> Self {
        self.pair_vector_class = Some(name.into());
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> BridgeResult<BridgeConfig> {
        let defaults = BridgeConfig::default();
        let config = BridgeConfig {
            sampling: self.sampling,
            vector_class: self.vector_class.unwrap_or(defaults.vector_class),
            vector_vector_class: self
                .vector_vector_class
                .unwrap_or(defaults.vector_vector_class),
            pair_vector_class: self.pair_vector_class.unwrap_or(defaults.pair_vector_class),
        };
        config.validate()?;
        Ok(config)
    }
}
