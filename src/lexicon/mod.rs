//! Word-list lexicons consulted by the scene graph rules.
//!
//! Three lists drive the lookups: scene nouns (entity classification), phrasal
//! verbs ("play with") and phrasal prepositions ("in front of"). Each list is a
//! newline-delimited file of lowercase phrases. Built-in copies are compiled
//! into the binary; a data directory can override them through `LexiconCache`.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::error::{Result, SceneGraphError};

pub const SCENE_NOUNS_FILE: &str = "scene-nouns.txt";
pub const PHRASAL_VERBS_FILE: &str = "phrasal-verbs.txt";
pub const PHRASAL_PREPS_FILE: &str = "phrasal-preps.txt";

/// An immutable set of phrases; membership is exact string equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    /// Parse newline-delimited phrases. Lines are trimmed, blank lines ignored.
    pub fn parse(contents: &str) -> Self {
        let words = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { words }
    }

    /// Read and parse a word-list file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SceneGraphError::Config(format!("failed to read word list {}: {}", path.display(), e))
        })?;
        Ok(Self::parse(&contents))
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.words.contains(phrase)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

static BUILTIN: LazyLock<Arc<Lexicon>> = LazyLock::new(|| {
    Arc::new(Lexicon::new(
        Arc::new(WordList::parse(include_str!("../../data/scene-nouns.txt"))),
        Arc::new(WordList::parse(include_str!("../../data/phrasal-verbs.txt"))),
        Arc::new(WordList::parse(include_str!("../../data/phrasal-preps.txt"))),
    ))
});

/// The three lookups used during extraction.
#[derive(Debug, Clone)]
pub struct Lexicon {
    scene_nouns: Arc<WordList>,
    phrasal_verbs: Arc<WordList>,
    phrasal_preps: Arc<WordList>,
}

impl Lexicon {
    pub fn new(
        scene_nouns: Arc<WordList>,
        phrasal_verbs: Arc<WordList>,
        phrasal_preps: Arc<WordList>,
    ) -> Self {
        Self {
            scene_nouns,
            phrasal_verbs,
            phrasal_preps,
        }
    }

    /// Lexicon built from the word lists shipped with the crate.
    pub fn builtin() -> Arc<Lexicon> {
        Arc::clone(&BUILTIN)
    }

    /// Load the three lists from `dir`, sharing already-loaded files through `cache`.
    pub fn from_dir(dir: &Path, cache: &LexiconCache) -> Result<Self> {
        let lexicon = Self::new(
            cache.get_or_load(&dir.join(SCENE_NOUNS_FILE))?,
            cache.get_or_load(&dir.join(PHRASAL_VERBS_FILE))?,
            cache.get_or_load(&dir.join(PHRASAL_PREPS_FILE))?,
        );
        log::info!(
            "Lexicon loaded from {}: {} scene nouns, {} phrasal verbs, {} phrasal prepositions",
            dir.display(),
            lexicon.scene_nouns.len(),
            lexicon.phrasal_verbs.len(),
            lexicon.phrasal_preps.len()
        );
        Ok(lexicon)
    }

    /// A noun is a scene noun if the whole phrase or its last word is listed.
    pub fn is_scene_noun(&self, noun: &str) -> bool {
        let head = noun.rsplit(' ').next().unwrap_or(noun);
        self.scene_nouns.contains(noun) || self.scene_nouns.contains(head)
    }

    pub fn is_phrasal_verb(&self, verb: &str) -> bool {
        self.phrasal_verbs.contains(verb)
    }

    pub fn is_phrasal_prep(&self, prep: &str) -> bool {
        self.phrasal_preps.contains(prep)
    }
}

/// Cache of loaded word lists, keyed by file path.
///
/// Safe to share across threads. Two callers racing on the same path may both
/// read the file, but only one `Arc<WordList>` is kept and every reader sees a
/// fully built list.
pub struct LexiconCache {
    inner: RwLock<HashMap<PathBuf, Arc<WordList>>>,
}

impl LexiconCache {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Return the cached list for `path`, loading it on first use.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<WordList>> {
        if let Some(list) = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
        {
            return Ok(Arc::clone(list));
        }

        // Load outside the lock; the first insert wins.
        let loaded = Arc::new(WordList::load(path)?);
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let list = inner.entry(path.to_path_buf()).or_insert(loaded);
        Ok(Arc::clone(list))
    }

    /// Number of cached lists
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached list
    pub fn clear(&self) {
        self.inner.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl Default for LexiconCache {
    fn default() -> Self {
        Self::new()
    }
}
