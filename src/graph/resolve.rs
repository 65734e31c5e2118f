//! Fake-entity filtering and position-to-entity resolution.

use std::collections::HashSet;

use super::{Entity, Relation, RelationCandidate};
use crate::annotation::NounChunk;

/// Remove entities whose chunk root was marked fake, returning the survivors
/// and their chunks in the same order.
pub fn drop_fake_entities(
    entities: Vec<(Entity, NounChunk)>,
    fake_roots: &HashSet<usize>,
) -> (Vec<Entity>, Vec<NounChunk>) {
    entities
        .into_iter()
        .filter(|(_, chunk)| !fake_roots.contains(&chunk.root))
        .unzip()
}

/// Index of the first chunk containing token position `i`.
pub fn locate_chunk(chunks: &[NounChunk], i: usize) -> Option<usize> {
    chunks.iter().position(|chunk| chunk.contains(i))
}

/// Map candidates to entity indices, silently dropping any with an endpoint
/// outside every surviving chunk. Extraction order is preserved.
pub fn resolve_relations(candidates: Vec<RelationCandidate>, chunks: &[NounChunk]) -> Vec<Relation> {
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let subject = locate_chunk(chunks, candidate.subject)?;
            let object = locate_chunk(chunks, candidate.object)?;
            Some(Relation {
                subject,
                object,
                relation: candidate.relation,
                lemma_relation: candidate.lemma_relation,
            })
        })
        .collect()
}
