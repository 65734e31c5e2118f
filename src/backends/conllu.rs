//! Offline backend serving annotations from a CoNLL-U treebank.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::{Backend, BackendOptions};
use crate::annotation::conllu::{parse_conllu, parse_sentence};
use crate::annotation::Doc;
use crate::error::{Result, SceneGraphError};

pub const IDENTIFIER: &str = "conllu";

/// Treebank lookup backend
///
/// With a `path` option the file is read once and indexed by sentence text.
/// Input that is itself a CoNLL-U block is parsed inline.
#[derive(Debug, Default)]
pub struct ConlluBackend {
    treebank: HashMap<String, Doc>,
}

impl ConlluBackend {
    pub fn new(options: &BackendOptions) -> Result<Self> {
        match options.get("path") {
            Some(path) => Self::from_file(Path::new(path)),
            None => Ok(Self::default()),
        }
    }

    /// Load and index a treebank file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            SceneGraphError::Config(format!("Failed to read treebank {}: {}", path.display(), e))
        })?;
        let sentences = parse_conllu(&contents).map_err(|e| {
            SceneGraphError::Config(format!("Malformed treebank {}: {}", path.display(), e))
        })?;

        let mut treebank = HashMap::new();
        for sentence in sentences {
            // First occurrence wins for repeated sentences.
            treebank
                .entry(sentence.text.trim().to_string())
                .or_insert(sentence.doc);
        }

        log::info!("Loaded {} treebank sentences from {}", treebank.len(), path.display());
        Ok(Self { treebank })
    }

    /// Number of indexed sentences
    pub fn len(&self) -> usize {
        self.treebank.len()
    }

    pub fn is_empty(&self) -> bool {
        self.treebank.is_empty()
    }
}

impl Backend for ConlluBackend {
    fn identifier(&self) -> &str {
        IDENTIFIER
    }

    fn annotate(&self, sentence: &str, _options: &BackendOptions) -> Result<Doc> {
        if let Some(doc) = self.treebank.get(sentence.trim()) {
            return Ok(doc.clone());
        }

        if sentence.lines().any(|line| line.contains('\t')) {
            return parse_sentence(sentence).map(|parsed| parsed.doc);
        }

        Err(SceneGraphError::Annotation(format!(
            "sentence not in treebank: {:?}",
            sentence
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TREEBANK: &str = "\
# text = A woman is playing the piano.
1\tA\ta\tDET\tDT\t_\t2\tdet\t_\t_
2\twoman\twoman\tNOUN\tNN\t_\t4\tnsubj\t_\t_
3\tis\tbe\tAUX\tVBZ\t_\t4\taux\t_\t_
4\tplaying\tplay\tVERB\tVBG\t_\t0\tROOT\t_\t_
5\tthe\tthe\tDET\tDT\t_\t6\tdet\t_\t_
6\tpiano\tpiano\tNOUN\tNN\t_\t4\tdobj\t_\tSpaceAfter=No
7\t.\t.\tPUNCT\t.\t_\t4\tpunct\t_\t_

# text = A cat.
1\tA\ta\tDET\tDT\t_\t2\tdet\t_\t_
2\tcat\tcat\tNOUN\tNN\t_\t0\tROOT\t_\tSpaceAfter=No
3\t.\t.\tPUNCT\t.\t_\t2\tpunct\t_\t_
";

    fn treebank_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn path_options(file: &NamedTempFile) -> BackendOptions {
        [("path", file.path().to_string_lossy().into_owned())]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_lookup_by_text() {
        let file = treebank_file(TREEBANK);
        let backend = ConlluBackend::new(&path_options(&file)).unwrap();
        assert_eq!(backend.len(), 2);

        let doc = backend
            .annotate("  A woman is playing the piano.\n", &BackendOptions::new())
            .unwrap();
        assert_eq!(doc.len(), 7);
        assert_eq!(doc.token(3).lemma, "play");
        assert_eq!(doc.head(3), 3);
        assert_eq!(doc.noun_chunks().len(), 2);
    }

    #[test]
    fn test_missing_sentence() {
        let file = treebank_file(TREEBANK);
        let backend = ConlluBackend::new(&path_options(&file)).unwrap();
        let err = backend.annotate("A dog.", &BackendOptions::new()).err().unwrap();
        assert!(matches!(err, SceneGraphError::Annotation(_)));
    }

    #[test]
    fn test_inline_block() {
        let backend = ConlluBackend::new(&BackendOptions::new()).unwrap();
        assert!(backend.is_empty());

        let block = TREEBANK.split("\n\n").nth(1).unwrap();
        let doc = backend.annotate(block, &BackendOptions::new()).unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.token(1).text, "cat");
    }

    #[test]
    fn test_unreadable_treebank() {
        let options: BackendOptions = [("path", "/nonexistent/treebank.conllu")].into_iter().collect();
        let err = ConlluBackend::new(&options).err().unwrap();
        assert!(matches!(err, SceneGraphError::Config(_)));
    }

    #[test]
    fn test_malformed_treebank() {
        let file = treebank_file("1\tA\ta\tDET\n");
        let err = ConlluBackend::new(&path_options(&file)).err().unwrap();
        assert!(matches!(err, SceneGraphError::Config(_)));
    }
}
