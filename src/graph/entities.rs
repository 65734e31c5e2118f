//! Entity extraction from noun chunks.

use super::{Entity, EntityType, Modifier};
use crate::annotation::{Dep, Doc, NounChunk, PRONOUN_LEMMA};
use crate::lexicon::Lexicon;

/// Build one entity per noun chunk, paired with its chunk.
///
/// Chunks rooted at a bare pronoun are skipped, so the returned chunk list is
/// the one entity indices refer to.
pub fn extract_entities(doc: &Doc, lexicon: &Lexicon) -> Vec<(Entity, NounChunk)> {
    doc.noun_chunks()
        .iter()
        .filter(|chunk| doc.token(chunk.root).lemma != PRONOUN_LEMMA)
        .map(|chunk| (extract_entity(doc, chunk, lexicon), *chunk))
        .collect()
}

fn extract_entity(doc: &Doc, chunk: &NounChunk, lexicon: &Lexicon) -> Entity {
    let root = doc.token(chunk.root);
    let mut entity = Entity {
        span: doc.span_text(chunk.start, chunk.end),
        lemma_span: doc.span_lemma(chunk.start, chunk.end),
        head: root.text.clone(),
        lemma_head: root.lemma.clone(),
        span_bounds: (chunk.start, chunk.end),
        modifiers: Vec::new(),
        entity_type: EntityType::Unknown,
    };

    collect_modifiers(doc, chunk.root, &mut entity);

    if lexicon.is_scene_noun(&entity.lemma_head) {
        entity.entity_type = EntityType::Scene;
    }
    entity
}

/// Walk the head's children in order; compounds fold into the head and are walked too.
fn collect_modifiers(doc: &Doc, node: usize, entity: &mut Entity) {
    for &child in doc.children(node) {
        let token = doc.token(child);
        match token.dep {
            Dep::Det | Dep::NumMod | Dep::AdjMod => entity.modifiers.push(Modifier {
                dep: token.dep.to_string(),
                span: token.text.clone(),
                lemma_span: token.lemma.clone(),
            }),
            Dep::Compound => {
                entity.head = format!("{} {}", token.text, entity.head);
                entity.lemma_head = format!("{} {}", token.lemma, entity.lemma_head);
                collect_modifiers(doc, child, entity);
            }
            _ => {}
        }
    }
}
