//! Annotation contract: tokens, noun chunks, and the dependency arena.
//!
//! A `Doc` is what an annotation backend hands to the scene graph rules. Tokens
//! live in an arena indexed by sentence position; each stores the index of its
//! head, and the children of every token are precomputed at construction so the
//! rules can walk the tree in both directions without back-references.

pub mod conllu;

#[cfg(test)]
pub(crate) mod fixtures;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SceneGraphError};

/// Lemma the annotation provider assigns to bare pronouns ("it", "she", ...).
pub const PRONOUN_LEMMA: &str = "-PRON-";

/// Dependency label (ClearNLP / spaCy English scheme).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Dep {
    Det,
    NumMod,
    AdjMod,
    Compound,
    NSubj,
    NSubjPass,
    Acl,
    PObj,
    Prep,
    Agent,
    DObj,
    Attr,
    AdvMod,
    Conj,
    PComp,
    Dative,
    Appos,
    Root,
    Other(String),
}

impl Dep {
    pub fn as_str(&self) -> &str {
        match self {
            Dep::Det => "det",
            Dep::NumMod => "nummod",
            Dep::AdjMod => "amod",
            Dep::Compound => "compound",
            Dep::NSubj => "nsubj",
            Dep::NSubjPass => "nsubjpass",
            Dep::Acl => "acl",
            Dep::PObj => "pobj",
            Dep::Prep => "prep",
            Dep::Agent => "agent",
            Dep::DObj => "dobj",
            Dep::Attr => "attr",
            Dep::AdvMod => "advmod",
            Dep::Conj => "conj",
            Dep::PComp => "pcomp",
            Dep::Dative => "dative",
            Dep::Appos => "appos",
            Dep::Root => "ROOT",
            Dep::Other(label) => label,
        }
    }
}

impl From<&str> for Dep {
    fn from(label: &str) -> Self {
        match label {
            "det" => Dep::Det,
            "nummod" => Dep::NumMod,
            "amod" => Dep::AdjMod,
            "compound" => Dep::Compound,
            "nsubj" => Dep::NSubj,
            "nsubjpass" => Dep::NSubjPass,
            "acl" => Dep::Acl,
            "pobj" => Dep::PObj,
            "prep" => Dep::Prep,
            "agent" => Dep::Agent,
            "dobj" => Dep::DObj,
            "attr" => Dep::Attr,
            "advmod" => Dep::AdvMod,
            "conj" => Dep::Conj,
            "pcomp" => Dep::PComp,
            "dative" => Dep::Dative,
            "appos" => Dep::Appos,
            "ROOT" | "root" => Dep::Root,
            other => Dep::Other(other.to_string()),
        }
    }
}

impl From<String> for Dep {
    fn from(label: String) -> Self {
        Dep::from(label.as_str())
    }
}

impl From<Dep> for String {
    fn from(dep: Dep) -> Self {
        dep.as_str().to_string()
    }
}

impl fmt::Display for Dep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse part-of-speech tag (Universal POS).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Pos {
    Noun,
    Propn,
    Pron,
    Verb,
    Aux,
    Adp,
    Det,
    Adj,
    Adv,
    Num,
    Punct,
    Other(String),
}

impl Pos {
    pub fn as_str(&self) -> &str {
        match self {
            Pos::Noun => "NOUN",
            Pos::Propn => "PROPN",
            Pos::Pron => "PRON",
            Pos::Verb => "VERB",
            Pos::Aux => "AUX",
            Pos::Adp => "ADP",
            Pos::Det => "DET",
            Pos::Adj => "ADJ",
            Pos::Adv => "ADV",
            Pos::Num => "NUM",
            Pos::Punct => "PUNCT",
            Pos::Other(tag) => tag,
        }
    }
}

impl From<&str> for Pos {
    fn from(tag: &str) -> Self {
        match tag {
            "NOUN" => Pos::Noun,
            "PROPN" => Pos::Propn,
            "PRON" => Pos::Pron,
            "VERB" => Pos::Verb,
            "AUX" => Pos::Aux,
            "ADP" => Pos::Adp,
            "DET" => Pos::Det,
            "ADJ" => Pos::Adj,
            "ADV" => Pos::Adv,
            "NUM" => Pos::Num,
            "PUNCT" => Pos::Punct,
            other => Pos::Other(other.to_string()),
        }
    }
}

impl From<String> for Pos {
    fn from(tag: String) -> Self {
        Pos::from(tag.as_str())
    }
}

impl From<Pos> for String {
    fn from(pos: Pos) -> Self {
        pos.as_str().to_string()
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_whitespace() -> bool {
    true
}

/// A single annotated token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Position in the sentence (0-based, equal to the arena index).
    pub i: usize,
    pub text: String,
    pub lemma: String,
    pub pos: Pos,
    pub dep: Dep,
    /// Position of the governing token; the sentence root points at itself.
    pub head: usize,
    /// Whether the token is followed by a space in the source text.
    #[serde(default = "default_whitespace")]
    pub whitespace: bool,
}

impl Token {
    pub fn new(
        i: usize,
        text: impl Into<String>,
        lemma: impl Into<String>,
        pos: impl Into<Pos>,
        dep: impl Into<Dep>,
        head: usize,
    ) -> Self {
        Self {
            i,
            text: text.into(),
            lemma: lemma.into(),
            pos: pos.into(),
            dep: dep.into(),
            head,
            whitespace: true,
        }
    }
}

/// A base noun phrase covering token positions `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounChunk {
    pub start: usize,
    pub end: usize,
    /// Position of the chunk's head token.
    pub root: usize,
}

impl NounChunk {
    pub fn new(start: usize, end: usize, root: usize) -> Self {
        Self { start, end, root }
    }

    /// Whether token position `i` lies inside the chunk.
    pub fn contains(&self, i: usize) -> bool {
        self.start <= i && i < self.end
    }
}

/// Wire form of a `Doc`, as produced by annotation services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDoc {
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub noun_chunks: Vec<NounChunk>,
}

/// An annotated sentence: token arena plus noun chunks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDoc", into = "RawDoc")]
pub struct Doc {
    tokens: Vec<Token>,
    noun_chunks: Vec<NounChunk>,
    children: Vec<Vec<usize>>,
}

impl Doc {
    /// Build a document, validating the annotation contract.
    ///
    /// Pronoun lemmas are rewritten to `PRONOUN_LEMMA` whatever the backend
    /// reported, so pronoun chunks are recognized for every backend.
    pub fn new(mut tokens: Vec<Token>, noun_chunks: Vec<NounChunk>) -> Result<Self> {
        for token in tokens.iter_mut().filter(|token| token.pos == Pos::Pron) {
            token.lemma = PRONOUN_LEMMA.to_string();
        }

        for (k, token) in tokens.iter().enumerate() {
            if token.i != k {
                return Err(invalid(format!(
                    "token {:?} has position {} but sits at index {}",
                    token.text, token.i, k
                )));
            }
            if token.head >= tokens.len() {
                return Err(invalid(format!(
                    "token {} has head {} outside the sentence",
                    k, token.head
                )));
            }
        }

        // Every head chain must end at a self-headed root.
        for start in 0..tokens.len() {
            let mut current = start;
            let mut steps = 0;
            while tokens[current].head != current {
                current = tokens[current].head;
                steps += 1;
                if steps > tokens.len() {
                    return Err(invalid(format!("head chain from token {} is cyclic", start)));
                }
            }
        }

        let mut children = vec![Vec::new(); tokens.len()];
        for token in &tokens {
            if token.head != token.i {
                children[token.head].push(token.i);
            }
        }

        let doc = Self {
            tokens,
            noun_chunks: Vec::new(),
            children,
        };
        doc.with_noun_chunks(noun_chunks)
    }

    /// Replace the noun chunks, validating them against the tokens.
    pub fn with_noun_chunks(mut self, noun_chunks: Vec<NounChunk>) -> Result<Self> {
        let mut previous_end = 0;
        for chunk in &noun_chunks {
            if chunk.start >= chunk.end || chunk.end > self.tokens.len() {
                return Err(invalid(format!(
                    "noun chunk [{}, {}) is empty or out of range",
                    chunk.start, chunk.end
                )));
            }
            if !chunk.contains(chunk.root) {
                return Err(invalid(format!(
                    "noun chunk [{}, {}) does not contain its root {}",
                    chunk.start, chunk.end, chunk.root
                )));
            }
            if chunk.start < previous_end {
                return Err(invalid(format!(
                    "noun chunk [{}, {}) overlaps or precedes the previous chunk",
                    chunk.start, chunk.end
                )));
            }
            previous_end = chunk.end;
        }
        self.noun_chunks = noun_chunks;
        Ok(self)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn noun_chunks(&self) -> &[NounChunk] {
        &self.noun_chunks
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at position `i`. Positions handed out by the doc are always valid.
    pub fn token(&self, i: usize) -> &Token {
        &self.tokens[i]
    }

    /// Position of the head of token `i`.
    pub fn head(&self, i: usize) -> usize {
        self.tokens[i].head
    }

    /// Children of token `i`, in sentence order.
    pub fn children(&self, i: usize) -> &[usize] {
        &self.children[i]
    }

    /// Leftmost position in the subtree rooted at `i`.
    pub fn left_edge(&self, i: usize) -> usize {
        self.children[i]
            .iter()
            .map(|&child| self.left_edge(child))
            .fold(i, usize::min)
    }

    /// All positions in the subtree rooted at `i` (including `i`), unordered.
    pub fn subtree(&self, i: usize) -> Vec<usize> {
        let mut out = vec![i];
        let mut stack = vec![i];
        while let Some(node) = stack.pop() {
            for &child in &self.children[node] {
                out.push(child);
                stack.push(child);
            }
        }
        out
    }

    /// Surface text of `[start, end)`, respecting token whitespace.
    pub fn span_text(&self, start: usize, end: usize) -> String {
        self.join_span(start, end, |token| token.text.as_str())
    }

    /// Lemmas of `[start, end)`, joined the same way as the surface text.
    pub fn span_lemma(&self, start: usize, end: usize) -> String {
        self.join_span(start, end, |token| token.lemma.as_str())
    }

    fn join_span<'a>(&'a self, start: usize, end: usize, field: impl Fn(&'a Token) -> &'a str) -> String {
        let mut out = String::new();
        let end = end.min(self.tokens.len());
        for k in start..end {
            let token = &self.tokens[k];
            out.push_str(field(token));
            if k + 1 < end && token.whitespace {
                out.push(' ');
            }
        }
        out
    }
}

impl TryFrom<RawDoc> for Doc {
    type Error = SceneGraphError;

    fn try_from(raw: RawDoc) -> Result<Self> {
        Doc::new(raw.tokens, raw.noun_chunks)
    }
}

impl From<Doc> for RawDoc {
    fn from(doc: Doc) -> Self {
        RawDoc {
            tokens: doc.tokens,
            noun_chunks: doc.noun_chunks,
        }
    }
}

fn invalid(message: String) -> SceneGraphError {
    SceneGraphError::InvalidDocument(message)
}
