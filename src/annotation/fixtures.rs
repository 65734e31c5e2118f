//! Hand-annotated sentences shared by the unit tests.

use super::{Doc, NounChunk, Token};

/// Build a doc from `(text, lemma, pos, dep, head)` rows and `(start, end, root)` chunks.
pub(crate) fn build(rows: &[(&str, &str, &str, &str, usize)], chunks: &[(usize, usize, usize)]) -> Doc {
    let tokens = rows
        .iter()
        .enumerate()
        .map(|(i, &(text, lemma, pos, dep, head))| Token::new(i, text, lemma, pos, dep, head))
        .collect();
    let chunks = chunks
        .iter()
        .map(|&(start, end, root)| NounChunk::new(start, end, root))
        .collect();
    Doc::new(tokens, chunks).expect("fixture must satisfy the annotation contract")
}

/// "A woman is playing the piano in the room"
pub(crate) fn woman_is_playing_piano_in_room() -> Doc {
    build(
        &[
            ("A", "a", "DET", "det", 1),
            ("woman", "woman", "NOUN", "nsubj", 3),
            ("is", "be", "AUX", "aux", 3),
            ("playing", "play", "VERB", "ROOT", 3),
            ("the", "the", "DET", "det", 5),
            ("piano", "piano", "NOUN", "dobj", 3),
            ("in", "in", "ADP", "prep", 3),
            ("the", "the", "DET", "det", 8),
            ("room", "room", "NOUN", "pobj", 6),
        ],
        &[(0, 2, 1), (4, 6, 5), (7, 9, 8)],
    )
}

/// "A woman playing the piano in the room" (reduced relative clause)
pub(crate) fn woman_playing_piano_in_room() -> Doc {
    build(
        &[
            ("A", "a", "DET", "det", 1),
            ("woman", "woman", "NOUN", "ROOT", 1),
            ("playing", "play", "VERB", "acl", 1),
            ("the", "the", "DET", "det", 4),
            ("piano", "piano", "NOUN", "dobj", 2),
            ("in", "in", "ADP", "prep", 2),
            ("the", "the", "DET", "det", 7),
            ("room", "room", "NOUN", "pobj", 5),
        ],
        &[(0, 2, 1), (3, 5, 4), (6, 8, 7)],
    )
}

/// "A piano is played by a woman in the room"
pub(crate) fn piano_is_played_by_woman() -> Doc {
    build(
        &[
            ("A", "a", "DET", "det", 1),
            ("piano", "piano", "NOUN", "nsubjpass", 3),
            ("is", "be", "AUX", "auxpass", 3),
            ("played", "play", "VERB", "ROOT", 3),
            ("by", "by", "ADP", "agent", 3),
            ("a", "a", "DET", "det", 6),
            ("woman", "woman", "NOUN", "pobj", 4),
            ("in", "in", "ADP", "prep", 3),
            ("the", "the", "DET", "det", 9),
            ("room", "room", "NOUN", "pobj", 7),
        ],
        &[(0, 2, 1), (5, 7, 6), (8, 10, 9)],
    )
}

/// "A woman."
pub(crate) fn a_woman() -> Doc {
    build(
        &[
            ("A", "a", "DET", "det", 1),
            ("woman", "woman", "NOUN", "ROOT", 1),
            (".", ".", "PUNCT", "punct", 1),
        ],
        &[(0, 2, 1)],
    )
}

/// "Woman piano."
pub(crate) fn woman_piano() -> Doc {
    build(
        &[
            ("Woman", "woman", "NOUN", "ROOT", 0),
            ("piano", "piano", "NOUN", "appos", 0),
            (".", ".", "PUNCT", "punct", 0),
        ],
        &[(0, 1, 0), (1, 2, 1)],
    )
}

/// "A woman is playing with a piano"
pub(crate) fn woman_is_playing_with_piano() -> Doc {
    build(
        &[
            ("A", "a", "DET", "det", 1),
            ("woman", "woman", "NOUN", "nsubj", 3),
            ("is", "be", "AUX", "aux", 3),
            ("playing", "play", "VERB", "ROOT", 3),
            ("with", "with", "ADP", "prep", 3),
            ("a", "a", "DET", "det", 6),
            ("piano", "piano", "NOUN", "pobj", 4),
        ],
        &[(0, 2, 1), (5, 7, 6)],
    )
}

/// "A woman is playing happily with a piano"
pub(crate) fn woman_is_playing_happily_with_piano() -> Doc {
    build(
        &[
            ("A", "a", "DET", "det", 1),
            ("woman", "woman", "NOUN", "nsubj", 3),
            ("is", "be", "AUX", "aux", 3),
            ("playing", "play", "VERB", "ROOT", 3),
            ("happily", "happily", "ADV", "advmod", 3),
            ("with", "with", "ADP", "prep", 3),
            ("a", "a", "DET", "det", 7),
            ("piano", "piano", "NOUN", "pobj", 5),
        ],
        &[(0, 2, 1), (6, 8, 7)],
    )
}

/// "A woman seated at a piano", with the participle tagged as an adjective
pub(crate) fn woman_seated_at_piano() -> Doc {
    build(
        &[
            ("A", "a", "DET", "det", 1),
            ("woman", "woman", "NOUN", "ROOT", 1),
            ("seated", "seated", "ADJ", "acl", 1),
            ("at", "at", "ADP", "prep", 2),
            ("a", "a", "DET", "det", 5),
            ("piano", "piano", "NOUN", "pobj", 3),
        ],
        &[(0, 2, 1), (4, 6, 5)],
    )
}

/// "A woman in front of a piano"
pub(crate) fn woman_in_front_of_piano() -> Doc {
    build(
        &[
            ("A", "a", "DET", "det", 1),
            ("woman", "woman", "NOUN", "ROOT", 1),
            ("in", "in", "ADP", "prep", 1),
            ("front", "front", "NOUN", "pobj", 2),
            ("of", "of", "ADP", "prep", 3),
            ("a", "a", "DET", "det", 6),
            ("piano", "piano", "NOUN", "pobj", 4),
        ],
        &[(0, 2, 1), (3, 4, 3), (5, 7, 6)],
    )
}

/// "A woman next to a piano"
pub(crate) fn woman_next_to_piano() -> Doc {
    build(
        &[
            ("A", "a", "DET", "det", 1),
            ("woman", "woman", "NOUN", "ROOT", 1),
            ("next", "next", "ADV", "advmod", 1),
            ("to", "to", "ADP", "prep", 2),
            ("a", "a", "DET", "det", 5),
            ("piano", "piano", "NOUN", "pobj", 3),
        ],
        &[(0, 2, 1), (4, 6, 5)],
    )
}

/// "A woman standing next to a piano"
pub(crate) fn woman_standing_next_to_piano() -> Doc {
    build(
        &[
            ("A", "a", "DET", "det", 1),
            ("woman", "woman", "NOUN", "ROOT", 1),
            ("standing", "stand", "VERB", "acl", 1),
            ("next", "next", "ADV", "advmod", 2),
            ("to", "to", "ADP", "prep", 3),
            ("a", "a", "DET", "det", 6),
            ("piano", "piano", "NOUN", "pobj", 4),
        ],
        &[(0, 2, 1), (5, 7, 6)],
    )
}

/// "The woman is a pianist"
pub(crate) fn woman_is_pianist() -> Doc {
    build(
        &[
            ("The", "the", "DET", "det", 1),
            ("woman", "woman", "NOUN", "nsubj", 2),
            ("is", "be", "AUX", "ROOT", 2),
            ("a", "a", "DET", "det", 4),
            ("pianist", "pianist", "NOUN", "attr", 2),
        ],
        &[(0, 2, 1), (3, 5, 4)],
    )
}

/// "A woman is playing the space craft at NASA"
pub(crate) fn woman_playing_space_craft() -> Doc {
    build(
        &[
            ("A", "a", "DET", "det", 1),
            ("woman", "woman", "NOUN", "nsubj", 3),
            ("is", "be", "AUX", "aux", 3),
            ("playing", "play", "VERB", "ROOT", 3),
            ("the", "the", "DET", "det", 6),
            ("space", "space", "NOUN", "compound", 6),
            ("craft", "craft", "NOUN", "dobj", 3),
            ("at", "at", "ADP", "prep", 3),
            ("NASA", "NASA", "PROPN", "pobj", 7),
        ],
        &[(0, 2, 1), (4, 7, 6), (8, 9, 8)],
    )
}

/// "It is on the old wooden table"
pub(crate) fn it_is_on_table() -> Doc {
    build(
        &[
            ("It", "-PRON-", "PRON", "nsubj", 1),
            ("is", "be", "VERB", "ROOT", 1),
            ("on", "on", "ADP", "prep", 1),
            ("the", "the", "DET", "det", 6),
            ("old", "old", "ADJ", "amod", 6),
            ("wooden", "wooden", "ADJ", "amod", 6),
            ("table", "table", "NOUN", "pobj", 2),
        ],
        &[(0, 1, 0), (3, 7, 6)],
    )
}

/// "Cow standing on sidewalk in city area near shops"
pub(crate) fn cow_on_sidewalk_in_city_area() -> Doc {
    build(
        &[
            ("Cow", "cow", "NOUN", "ROOT", 0),
            ("standing", "stand", "VERB", "acl", 0),
            ("on", "on", "ADP", "prep", 1),
            ("sidewalk", "sidewalk", "NOUN", "pobj", 2),
            ("in", "in", "ADP", "prep", 3),
            ("city", "city", "NOUN", "compound", 6),
            ("area", "area", "NOUN", "pobj", 4),
            ("near", "near", "ADP", "prep", 6),
            ("shops", "shop", "NOUN", "pobj", 7),
        ],
        &[(0, 1, 0), (3, 4, 3), (5, 7, 6), (8, 9, 8)],
    )
}
