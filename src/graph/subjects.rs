//! Subject resolution for verbs and participles.

use std::collections::HashMap;

use crate::annotation::{Dep, Doc, Pos};

/// Governing token position -> position of its resolved subject.
pub type SubjectMap = HashMap<usize, usize>;

/// Resolve the subject of every verb-like governor in one pass over the tokens.
///
/// Tokens are keyed by position rather than text so repeated words stay distinct.
pub fn resolve_subjects(doc: &Doc) -> SubjectMap {
    let mut subjects = SubjectMap::new();

    for token in doc.tokens() {
        match token.dep {
            // A [woman] is [playing] the piano.
            Dep::NSubj => {
                subjects.insert(token.head, token.i);
            }
            // A [woman] [playing] the piano: the participle's subject is the noun it modifies.
            Dep::Acl => {
                subjects.insert(token.i, token.head);
            }
            // The piano is [played] by a [woman].
            Dep::PObj => {
                let prep = doc.token(token.head);
                let governor = doc.token(prep.head);
                if prep.dep == Dep::Agent && governor.pos == Pos::Verb {
                    subjects.insert(governor.i, token.i);
                }
            }
            _ => {}
        }
    }

    subjects
}
