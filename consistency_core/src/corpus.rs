//! External corpus - full-length source texts searched alongside the narrative.

use std::path::Path;

use crate::error::{JudgeError, JudgeResult};

/// One plain-text document of the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name, used to label evidence.
    pub name: String,
    pub text: String,
}

impl Document {
    /// Build a document from its file name and contents.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Read-only set of documents, in a stable order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// Build a corpus from documents, keeping their order.
    pub fn from_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        Self {
            documents: documents.into_iter().collect(),
        }
    }

    /// Load every file directly inside `dir`, ordered by file name.
    ///
    /// Files that cannot be read are logged and skipped. Invalid UTF-8 is replaced
    /// rather than rejected.
    pub fn load_dir(dir: &Path) -> JudgeResult<Self> {
        let entries = std::fs::read_dir(dir).map_err(|source| JudgeError::Io {
            path: dir.display().to_string(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => {
                    let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                    if !is_dir {
                        paths.push(entry.path());
                    }
                }
                Err(e) => tracing::warn!(error = %e, dir = %dir.display(), "skipping corpus entry"),
            }
        }
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            match std::fs::read(&path) {
                Ok(bytes) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    let text = String::from_utf8_lossy(&bytes).into_owned();
                    documents.push(Document { name, text });
                }
                Err(e) => {
                    tracing::warn!(error = %e, path = %path.display(), "skipping unreadable corpus file");
                }
            }
        }

        let corpus = Self { documents };
        tracing::info!(
            dir = %dir.display(),
            documents = corpus.len(),
            bytes = corpus.total_bytes(),
            "loaded corpus"
        );
        Ok(corpus)
    }

    /// Documents in file-name order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Number of loaded documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether no documents were loaded.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Combined size of all document texts, in bytes.
    pub fn total_bytes(&self) -> usize {
        self.documents.iter().map(|d| d.text.len()).sum()
    }
}
