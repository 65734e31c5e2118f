//! Scene graph extraction: entities, relations, and graph assembly.
//!
//! `build` runs the whole rule pipeline over one annotated sentence:
//! entities from noun chunks, subject resolution, the relation cascade,
//! removal of fake entities, and finally mapping token positions back to
//! entity indices.

mod entities;
mod relations;
mod resolve;
mod subjects;

pub use entities::extract_entities;
pub use relations::{extract_relations, Extraction, RelationCandidate};
pub use resolve::{drop_fake_entities, locate_chunk, resolve_relations};
pub use subjects::{resolve_subjects, SubjectMap};

use serde::{Deserialize, Serialize};

use crate::annotation::Doc;
use crate::error::Result;
use crate::lexicon::Lexicon;

/// Entity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// The head noun names a place or setting ("room", "city area").
    Scene,
    Unknown,
}

/// A determiner, numeral, or adjective attached to an entity head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    pub dep: String,
    pub span: String,
    pub lemma_span: String,
}

/// A graph node derived from one noun chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub span: String,
    pub lemma_span: String,
    /// Head noun, with compound nouns folded in ("space craft").
    pub head: String,
    pub lemma_head: String,
    /// Token range `[start, end)` of the source chunk.
    pub span_bounds: (usize, usize),
    pub modifiers: Vec<Modifier>,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
}

/// A labeled edge between two entities (indices into `Graph::entities`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub subject: usize,
    pub object: usize,
    pub relation: String,
    pub lemma_relation: String,
}

/// The parsed scene graph of one sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub entities: Vec<Entity>,
    pub relations: Vec<Relation>,
}

impl Graph {
    /// Graph with no entities and no relations.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relations.is_empty()
    }

    /// Pretty-printed JSON form of the graph.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the scene graph of an annotated sentence.
pub fn build(doc: &Doc, lexicon: &Lexicon) -> Graph {
    let entities = extract_entities(doc, lexicon);
    let subjects = resolve_subjects(doc);
    let extraction = extract_relations(doc, &subjects, lexicon);

    // Fake chunks must be gone before positions are resolved.
    let (entities, chunks) = drop_fake_entities(entities, &extraction.fake_roots);
    let relations = resolve_relations(extraction.candidates, &chunks);

    log::debug!(
        "Scene graph built: {} tokens, {} entities, {} relations",
        doc.len(),
        entities.len(),
        relations.len()
    );

    Graph {
        entities,
        relations,
    }
}
