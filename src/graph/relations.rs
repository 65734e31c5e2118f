//! Relation extraction: the per-chunk cascade of structural patterns.
//!
//! Every candidate is keyed by token positions; `resolve` maps them back to
//! entities once fake chunks have been removed.

use std::collections::HashSet;

use super::SubjectMap;
use crate::annotation::{Dep, Doc, Pos};
use crate::lexicon::Lexicon;

/// A relation between token positions, not yet mapped to entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationCandidate {
    pub subject: usize,
    pub object: usize,
    pub relation: String,
    pub lemma_relation: String,
}

/// Output of the relation pass.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Candidates in chunk order.
    pub candidates: Vec<RelationCandidate>,
    /// Chunk roots that only exist as part of a multi-word preposition.
    pub fake_roots: HashSet<usize>,
}

/// Run the relation cascade over every noun chunk.
pub fn extract_relations(doc: &Doc, subjects: &SubjectMap, lexicon: &Lexicon) -> Extraction {
    let mut extraction = Extraction::default();

    for chunk in doc.noun_chunks() {
        let root = doc.token(chunk.root);
        let candidate = match root.dep {
            // A woman is playing the [piano]. / The woman is a [pianist].
            Dep::DObj | Dep::Attr => subjects
                .get(&root.head)
                .map(|&subject| word_relation(doc, subject, root.i, root.head)),
            Dep::PObj => {
                prepositional_relation(doc, root.i, subjects, lexicon, &mut extraction.fake_roots)
            }
            // The [piano] is played by a woman: the passive subject becomes the object.
            Dep::NSubjPass => subjects
                .get(&root.head)
                .map(|&subject| word_relation(doc, subject, root.i, root.head)),
            _ => None,
        };

        if let Some(candidate) = candidate {
            extraction.candidates.push(candidate);
        }
    }

    extraction
}

/// Sub-cases for an object of preposition, tried in order; the first match wins.
fn prepositional_relation(
    doc: &Doc,
    object: usize,
    subjects: &SubjectMap,
    lexicon: &Lexicon,
    fake_roots: &mut HashSet<usize>,
) -> Option<RelationCandidate> {
    let prep = doc.token(doc.head(object));
    let governor = doc.token(prep.head);

    // The piano is played [by] a [woman]: already consumed as a passive agent.
    if prep.dep == Dep::Agent {
        return None;
    }

    // A woman is [playing with] the piano.
    if governor.pos == Pos::Verb
        && governor.i + 1 == prep.i
        && lexicon.is_phrasal_verb(&format!("{} {}", governor.lemma, prep.lemma))
    {
        if let Some(&subject) = subjects.get(&governor.i) {
            return Some(fused_relation(doc, subject, object, governor.i, prep.i));
        }
    }

    // A woman is playing the piano [in] the room.
    if governor.pos == Pos::Verb || governor.dep == Dep::Acl {
        if let Some(&subject) = subjects.get(&governor.i) {
            return Some(word_relation(doc, subject, object, prep.i));
        }
    }

    // A woman [in front of] a piano: "front" is an artifact of the preposition.
    if governor.dep == Dep::PObj {
        let outer = governor.head;
        if outer <= prep.i {
            let text = doc.span_text(outer, prep.i + 1);
            if lexicon.is_phrasal_prep(&text.to_lowercase()) {
                fake_roots.insert(governor.i);
                return Some(RelationCandidate {
                    subject: doc.head(outer),
                    object,
                    relation: text,
                    lemma_relation: doc.span_lemma(outer, prep.i + 1),
                });
            }
        }
    }

    // A [piano in] the room.
    if governor.pos == Pos::Noun {
        return Some(word_relation(doc, governor.i, object, prep.i));
    }

    if matches!(governor.dep, Dep::AdjMod | Dep::AdvMod) {
        let outer = doc.token(governor.head);
        // A woman [next to] a piano.
        if outer.pos == Pos::Noun {
            return Some(fused_relation(doc, outer.i, object, governor.i, prep.i));
        }
        // A woman standing [next to] a piano.
        if outer.pos == Pos::Verb {
            if let Some(&subject) = subjects.get(&outer.i) {
                return Some(fused_relation(doc, subject, object, governor.i, prep.i));
            }
        }
    }

    if governor.pos == Pos::Verb {
        if let Some(&subject) = subjects.get(&governor.i) {
            return Some(word_relation(doc, subject, object, prep.i));
        }
    }

    None
}

/// Relation labeled by a single token.
fn word_relation(doc: &Doc, subject: usize, object: usize, label: usize) -> RelationCandidate {
    let token = doc.token(label);
    RelationCandidate {
        subject,
        object,
        relation: token.text.clone(),
        lemma_relation: token.lemma.clone(),
    }
}

/// Relation labeled by two tokens joined with a space.
fn fused_relation(
    doc: &Doc,
    subject: usize,
    object: usize,
    first: usize,
    second: usize,
) -> RelationCandidate {
    let (first, second) = (doc.token(first), doc.token(second));
    RelationCandidate {
        subject,
        object,
        relation: format!("{} {}", first.text, second.text),
        lemma_relation: format!("{} {}", first.lemma, second.lemma),
    }
}
