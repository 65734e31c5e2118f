pub mod conllu;
pub mod parser;
pub mod spacy;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::annotation::Doc;
use crate::error::{Result, SceneGraphError};

pub use conllu::ConlluBackend;
pub use parser::Parser;
pub use spacy::SpacyBackend;

/// Identifier of the backend used when none is configured.
pub const DEFAULT_BACKEND: &str = "spacy";

/// Trait for annotation backends
///
/// A backend turns a raw sentence into a `Doc` (tokens, dependencies, noun
/// chunks). Implementations must be `Send + Sync` so a parser can be shared
/// across threads; a backend that is not reentrant must serialize internally.
pub trait Backend: Send + Sync {
    /// Identifier the backend is registered under
    fn identifier(&self) -> &str;

    /// Annotate one sentence. `options` are per-call settings forwarded verbatim.
    fn annotate(&self, sentence: &str, options: &BackendOptions) -> Result<Doc>;
}

/// Scalar accepted as an option value in configuration files; stored as its string form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::String(s) => f.write_str(s),
            OptionValue::Integer(n) => write!(f, "{}", n),
            OptionValue::Float(x) => write!(f, "{}", x),
            OptionValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Free-form keyword configuration for a backend (e.g. `model = "en_core_web_sm"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, OptionValue>")]
pub struct BackendOptions(BTreeMap<String, String>);

impl From<BTreeMap<String, OptionValue>> for BackendOptions {
    fn from(values: BTreeMap<String, OptionValue>) -> Self {
        Self(
            values
                .into_iter()
                .map(|(key, value)| (key, value.to_string()))
                .collect(),
        )
    }
}

impl BackendOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `key=value` pair (as given on the command line).
    pub fn parse_pair(pair: &str) -> Result<(String, String)> {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            SceneGraphError::Config(format!("expected KEY=VALUE, got {:?}", pair))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(SceneGraphError::Config(format!("empty option name in {:?}", pair)));
        }
        Ok((key.to_string(), value.trim().to_string()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy of `self` with every entry of `overrides` applied on top.
    pub fn merged(&self, overrides: &BackendOptions) -> BackendOptions {
        let mut merged = self.clone();
        for (key, value) in overrides.iter() {
            merged.insert(key, value);
        }
        merged
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for BackendOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Constructor stored in the registry.
pub type BackendFactory = fn(&BackendOptions) -> Result<Box<dyn Backend>>;

/// Backend registry that builds a backend by identifier
pub struct BackendRegistry {
    factories: BTreeMap<String, BackendFactory>,
}

impl BackendRegistry {
    /// Create a new registry with all built-in backends
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register(spacy::IDENTIFIER, spacy_factory);
        registry.register(conllu::IDENTIFIER, conllu_factory);

        registry
    }

    /// Create a registry with no backends
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Register a backend factory, replacing any previous one with the same identifier
    pub fn register(&mut self, identifier: &str, factory: BackendFactory) {
        self.factories.insert(identifier.to_string(), factory);
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.factories.contains_key(identifier)
    }

    /// Registered identifiers, sorted
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Construct the backend registered under `identifier`
    pub fn create(&self, identifier: &str, options: &BackendOptions) -> Result<Box<dyn Backend>> {
        let factory = self
            .factories
            .get(identifier)
            .ok_or_else(|| SceneGraphError::UnknownBackend(identifier.to_string()))?;
        let backend = factory(options)?;
        log::info!("Backend initialized: {}", identifier);
        Ok(backend)
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn spacy_factory(options: &BackendOptions) -> Result<Box<dyn Backend>> {
    Ok(Box::new(SpacyBackend::new(options)?))
}

fn conllu_factory(options: &BackendOptions) -> Result<Box<dyn Backend>> {
    Ok(Box::new(ConlluBackend::new(options)?))
}
