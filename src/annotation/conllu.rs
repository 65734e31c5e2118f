//! CoNLL-U reading and English base noun phrase derivation.
//!
//! Treebanks carry tokens and dependencies but no noun chunks, so chunks are
//! derived here with the usual English base-NP rule: a nominal in an argument
//! position, spanning from the left edge of its subtree to itself.

use super::{Dep, Doc, NounChunk, Pos, Token};
use crate::error::{Result, SceneGraphError};

/// One annotated sentence of a treebank.
#[derive(Debug, Clone)]
pub struct Sentence {
    /// Sentence text from the `# text =` comment, or the joined forms.
    pub text: String,
    pub doc: Doc,
}

/// Parse every sentence of a CoNLL-U document.
pub fn parse_conllu(input: &str) -> Result<Vec<Sentence>> {
    let mut sentences = Vec::new();
    let mut block = Vec::new();

    for line in input.lines() {
        if line.trim().is_empty() {
            if !block.is_empty() {
                sentences.push(parse_lines(&block)?);
                block.clear();
            }
        } else {
            block.push(line);
        }
    }
    if !block.is_empty() {
        sentences.push(parse_lines(&block)?);
    }

    Ok(sentences)
}

/// Parse a single sentence block.
pub fn parse_sentence(block: &str) -> Result<Sentence> {
    let lines: Vec<&str> = block.lines().filter(|l| !l.trim().is_empty()).collect();
    parse_lines(&lines)
}

fn parse_lines(lines: &[&str]) -> Result<Sentence> {
    let mut text = None;
    let mut tokens = Vec::new();

    for line in lines {
        if let Some(comment) = line.strip_prefix('#') {
            if let Some(value) = comment.trim_start().strip_prefix("text =") {
                text = Some(value.trim().to_string());
            }
            continue;
        }

        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() != 10 {
            return Err(parse_error(format!(
                "expected 10 tab-separated columns, found {}: {:?}",
                columns.len(),
                line
            )));
        }

        // Multiword token ranges and empty nodes carry no dependency.
        if columns[0].contains('-') || columns[0].contains('.') {
            continue;
        }

        let id: usize = columns[0]
            .parse()
            .map_err(|_| parse_error(format!("invalid token id {:?}", columns[0])))?;
        if id != tokens.len() + 1 {
            return Err(parse_error(format!(
                "token id {} out of sequence (expected {})",
                id,
                tokens.len() + 1
            )));
        }
        let i = id - 1;

        let head: usize = columns[6]
            .parse()
            .map_err(|_| parse_error(format!("invalid head {:?} for token {}", columns[6], id)))?;
        let head = if head == 0 { i } else { head - 1 };

        let form = columns[1];
        let pos = Pos::from(columns[3]);
        let lemma = if columns[2] == "_" {
            form.to_lowercase()
        } else {
            columns[2].to_string()
        };

        let mut token = Token::new(i, form, lemma, pos, columns[7], head);
        token.whitespace = !columns[9].split('|').any(|item| item == "SpaceAfter=No");
        tokens.push(token);
    }

    if tokens.is_empty() {
        return Err(parse_error("sentence block has no tokens".to_string()));
    }

    let doc = Doc::new(tokens, Vec::new())?;
    let chunks = noun_chunks(&doc);
    let doc = doc.with_noun_chunks(chunks)?;
    let text = text.unwrap_or_else(|| doc.span_text(0, doc.len()));

    Ok(Sentence { text, doc })
}

fn is_np_dep(dep: &Dep) -> bool {
    matches!(
        dep,
        Dep::NSubj
            | Dep::DObj
            | Dep::NSubjPass
            | Dep::PComp
            | Dep::PObj
            | Dep::Dative
            | Dep::Appos
            | Dep::Attr
            | Dep::Root
    )
}

/// Derive base noun phrases for an English dependency parse.
///
/// Nested chunks are never produced: once a token is claimed by a chunk, any
/// later nominal whose subtree touches it is skipped.
pub fn noun_chunks(doc: &Doc) -> Vec<NounChunk> {
    let mut seen = vec![false; doc.len()];
    let mut chunks = Vec::new();

    for token in doc.tokens() {
        if !matches!(token.pos, Pos::Noun | Pos::Propn | Pos::Pron) || seen[token.i] {
            continue;
        }

        let is_np = if is_np_dep(&token.dep) {
            true
        } else if token.dep == Dep::Conj {
            // Coordinated to an NP: walk back along the conjunction chain.
            let mut head = doc.token(token.head);
            while head.dep == Dep::Conj && head.head < head.i {
                head = doc.token(head.head);
            }
            is_np_dep(&head.dep)
        } else {
            false
        };
        if !is_np {
            continue;
        }

        let start = doc.left_edge(token.i);
        if doc.subtree(token.i).iter().any(|&j| seen[j]) || (start..=token.i).any(|j| seen[j]) {
            continue;
        }
        for flag in &mut seen[start..=token.i] {
            *flag = true;
        }
        chunks.push(NounChunk::new(start, token.i + 1, token.i));
    }

    chunks
}

fn parse_error(message: String) -> SceneGraphError {
    SceneGraphError::InvalidDocument(message)
}
