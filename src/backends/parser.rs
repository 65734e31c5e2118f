//! Sentence-to-graph front end over an annotation backend.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::{Backend, BackendOptions, BackendRegistry};
use crate::annotation::Doc;
use crate::cache::GraphCache;
use crate::config::Config;
use crate::error::Result;
use crate::graph::{self, Graph};
use crate::lexicon::{Lexicon, LexiconCache};

/// Sentences with nothing but punctuation, symbols and whitespace.
static DEGENERATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{P}\p{S}\s]*$").expect("degenerate-sentence pattern is valid"));

/// Scene graph parser
///
/// Owns one annotation backend, the lexicon used by the extraction rules and
/// an optional cache of parsed graphs. Shareable across threads.
pub struct Parser {
    identifier: String,
    init_options: BackendOptions,
    backend: Box<dyn Backend>,
    lexicon: Arc<Lexicon>,
    cache: Option<GraphCache>,
}

impl Parser {
    /// Create a parser over a built-in backend with the built-in lexicon
    ///
    /// # Errors
    ///
    /// `UnknownBackend` for an unregistered identifier, `Config` when the
    /// backend rejects its options.
    pub fn new(identifier: &str, options: BackendOptions) -> Result<Self> {
        Self::with_registry(&BackendRegistry::new(), identifier, options)
    }

    /// Create a parser over any backend of `registry`
    pub fn with_registry(
        registry: &BackendRegistry,
        identifier: &str,
        options: BackendOptions,
    ) -> Result<Self> {
        let backend = registry.create(identifier, &options)?;
        Ok(Self {
            identifier: identifier.to_string(),
            init_options: options,
            backend,
            lexicon: Lexicon::builtin(),
            cache: None,
        })
    }

    /// Create a parser from configuration, loading word lists through `lexicons`
    pub fn from_config(config: &Config, lexicons: &LexiconCache) -> Result<Self> {
        let mut parser = Self::new(&config.parser.backend, config.parser.options.clone())?;

        if let Some(dir) = &config.lexicon.data_dir {
            parser = parser.with_lexicon(Arc::new(Lexicon::from_dir(dir, lexicons)?));
        }

        Ok(parser.with_cache(config.cache.capacity))
    }

    /// Replace the lexicon used by the extraction rules
    pub fn with_lexicon(mut self, lexicon: Arc<Lexicon>) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Cache up to `capacity` graphs; 0 disables caching
    pub fn with_cache(mut self, capacity: usize) -> Self {
        self.cache = (capacity > 0).then(|| GraphCache::new(capacity));
        self
    }

    /// Identifier of the backend in use
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Options the backend was constructed with
    pub fn init_options(&self) -> &BackendOptions {
        &self.init_options
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn cache(&self) -> Option<&GraphCache> {
        self.cache.as_ref()
    }

    /// Parse a sentence into a scene graph
    pub fn parse(&self, sentence: &str) -> Result<Graph> {
        self.parse_with_options(sentence, &BackendOptions::new())
    }

    /// Parse a sentence, passing per-call options to the backend
    ///
    /// Graphs are cached only for calls without per-call options.
    pub fn parse_with_options(&self, sentence: &str, options: &BackendOptions) -> Result<Graph> {
        if is_degenerate(sentence) {
            return Ok(Graph::empty());
        }

        let cache = self.cache.as_ref().filter(|_| options.is_empty());
        if let Some(graph) = cache.and_then(|cache| cache.get(sentence)) {
            log::debug!("Graph cache hit: {:?}", sentence);
            return Ok(graph);
        }

        let (graph, _) = self.annotate_and_build(sentence, options)?;

        if let Some(cache) = cache {
            cache.put(sentence.to_string(), graph.clone());
        }
        Ok(graph)
    }

    /// Parse a sentence and also return the annotation it was built from
    ///
    /// Bypasses the graph cache.
    pub fn parse_with_doc(&self, sentence: &str, options: &BackendOptions) -> Result<(Graph, Doc)> {
        if is_degenerate(sentence) {
            return Ok((Graph::empty(), Doc::new(Vec::new(), Vec::new())?));
        }
        self.annotate_and_build(sentence, options)
    }

    fn annotate_and_build(&self, sentence: &str, options: &BackendOptions) -> Result<(Graph, Doc)> {
        let doc = self.backend.annotate(sentence, options)?;
        let graph = graph::build(&doc, &self.lexicon);
        Ok((graph, doc))
    }
}

/// True for empty or all-punctuation input.
pub fn is_degenerate(sentence: &str) -> bool {
    DEGENERATE.is_match(sentence)
}
