//! Ingestion - locating inputs, reading records and writing the results table.

mod output;
mod table;

pub use output::*;
pub use table::*;

use std::path::{Path, PathBuf};

use crate::error::{JudgeError, JudgeResult};

/// Places an input table is looked for, relative to the working directory.
pub const INPUT_CANDIDATES: &[&str] = &[
    "test.csv",
    "Dataset/test.csv",
    "Data/test.csv",
    "data/test.csv",
    "/content/test.csv",
    "/mnt/data/test.csv",
];

/// Places a novel corpus is looked for, relative to the working directory.
pub const CORPUS_CANDIDATES: &[&str] = &[
    "novels",
    "Books",
    "Dataset/Books",
    "Data/novels",
    "/content/novels",
    "/mnt/data/novels",
    "/mnt/data/Books",
];

/// Resolve the input table: the explicit path if given, else the first existing candidate under `base`.
pub fn discover_input(base: &Path, explicit: Option<&Path>) -> JudgeResult<PathBuf> {
    if let Some(path) = explicit {
        let path = base.join(path);
        return if path.is_file() {
            Ok(path)
        } else {
            Err(JudgeError::InputNotFound {
                searched: path.display().to_string(),
            })
        };
    }

    INPUT_CANDIDATES
        .iter()
        .map(|candidate| base.join(candidate))
        .find(|path| path.is_file())
        .ok_or_else(|| JudgeError::InputNotFound {
            searched: INPUT_CANDIDATES.join(", "),
        })
}

/// Resolve the corpus directory. Without an explicit path a missing corpus is not an error.
pub fn discover_corpus_dir(base: &Path, explicit: Option<&Path>) -> JudgeResult<Option<PathBuf>> {
    if let Some(path) = explicit {
        let path = base.join(path);
        return if path.is_dir() {
            Ok(Some(path))
        } else {
            Err(JudgeError::CorpusNotFound {
                path: path.display().to_string(),
            })
        };
    }

    let found = CORPUS_CANDIDATES
        .iter()
        .map(|candidate| base.join(candidate))
        .find(|path| path.is_dir());
    if found.is_none() {
        tracing::info!("no corpus directory found, scanning narratives only");
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_input_prefers_first_candidate() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/test.csv"), "id").unwrap();

        let found = discover_input(dir.path(), None).unwrap();
        assert_eq!(found, dir.path().join("data/test.csv"));

        std::fs::write(dir.path().join("test.csv"), "id").unwrap();
        let found = discover_input(dir.path(), None).unwrap();
        assert_eq!(found, dir.path().join("test.csv"));
    }

    #[test]
    fn test_explicit_input_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_input(dir.path(), Some(Path::new("nope.csv"))).unwrap_err();
        assert!(matches!(err, JudgeError::InputNotFound { .. }));
    }

    #[test]
    fn test_corpus_is_optional_unless_explicit() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(discover_corpus_dir(dir.path(), None).unwrap(), None);

        let err = discover_corpus_dir(dir.path(), Some(Path::new("Books"))).unwrap_err();
        assert!(matches!(err, JudgeError::CorpusNotFound { .. }));

        std::fs::create_dir(dir.path().join("Books")).unwrap();
        assert_eq!(
            discover_corpus_dir(dir.path(), None).unwrap(),
            Some(dir.path().join("Books"))
        );
    }
}
