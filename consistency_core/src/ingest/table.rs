//! Input table - column resolution and record reading.

use std::io::Read;
use std::path::Path;

use crate::error::{JudgeError, JudgeResult};
use crate::record::Record;

/// Positions of the three required columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub story_id: usize,
    pub backstory: usize,
    pub narrative: usize,
}

/// Lowercase a header and drop everything but letters and digits.
fn normalize(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

impl ColumnMap {
    /// Match headers by normalized name.
    ///
    /// - identifier: first header containing "id"
    /// - backstory: first header containing "caption" or "backstory"
    /// - narrative: first header equal to "content", "story" or "narrative"
    pub fn resolve<'h, I>(headers: I) -> JudgeResult<Self>
    where
        I: IntoIterator<Item = &'h str>,
    {
        let raw: Vec<&str> = headers.into_iter().collect();
        let normalized: Vec<String> = raw.iter().map(|h| normalize(h)).collect();
        let missing = |column: &'static str| JudgeError::MissingColumn {
            column,
            headers: raw.join(", "),
        };

        Ok(Self {
            story_id: position(&normalized, |h| h.contains("id"))
                .ok_or_else(|| missing("story id"))?,
            backstory: position(&normalized, |h| h.contains("caption") || h.contains("backstory"))
                .ok_or_else(|| missing("backstory"))?,
            narrative: position(&normalized, |h| matches!(h, "content" | "story" | "narrative"))
                .ok_or_else(|| missing("narrative"))?,
        })
    }
}

fn position(headers: &[String], pred: impl Fn(&str) -> bool) -> Option<usize> {
    headers.iter().position(|h| pred(h.as_str()))
}

/// Read all records from CSV data with a header row.
///
/// Short rows are tolerated; absent cells read as empty strings.
pub fn read_records_from<R: Read>(reader: R) -> JudgeResult<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = ColumnMap::resolve(reader.headers()?.iter())?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let cell = |i: usize| row.get(i).unwrap_or("").to_string();
        records.push(Record::new(
            cell(columns.story_id),
            cell(columns.backstory),
            cell(columns.narrative),
        ));
    }
    Ok(records)
}

/// Read all records from a CSV file.
pub fn read_records(path: &Path) -> JudgeResult<Vec<Record>> {
    let file = std::fs::File::open(path).map_err(|source| JudgeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let records = read_records_from(file)?;
    tracing::info!(path = %path.display(), records = records.len(), "read input table");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Story_ID"), "storyid");
        assert_eq!(normalize(" Back-Story "), "backstory");
    }

    #[test]
    fn test_resolve_competition_headers() {
        let map = ColumnMap::resolve(["id", "book_name", "char", "caption", "content"]).unwrap();
        assert_eq!(
            map,
            ColumnMap {
                story_id: 0,
                backstory: 3,
                narrative: 4
            }
        );
    }

    #[test]
    fn test_resolve_ignores_case_and_separators() {
        let map = ColumnMap::resolve(["Narrative", "Story ID", "BACK_STORY"]).unwrap();
        assert_eq!(map.story_id, 1);
        assert_eq!(map.backstory, 2);
        assert_eq!(map.narrative, 0);
    }

    #[test]
    fn test_story_id_is_not_the_story_column() {
        let map = ColumnMap::resolve(["story_id", "backstory", "story"]).unwrap();
        assert_eq!(map.story_id, 0);
        assert_eq!(map.narrative, 2);
    }

    #[test]
    fn test_missing_column_is_named() {
        let err = ColumnMap::resolve(["id", "caption", "text"]).unwrap_err();
        assert!(matches!(
            err,
            JudgeError::MissingColumn { column: "narrative", ref headers } if headers == "id, caption, text"
        ));
    }

    #[test]
    fn test_read_records_with_quotes_and_short_rows() {
        let data = "id,caption,content\n\
                    1,\"A poor, destitute farmer.\",\"He found gold, then more.\"\n\
                    2,\n";
        let records = read_records_from(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].backstory, "A poor, destitute farmer.");
        assert_eq!(records[0].narrative, "He found gold, then more.");
        assert_eq!(records[1].story_id.as_str(), "2");
        assert_eq!(records[1].narrative, "");
    }

    #[test]
    fn test_read_records_missing_file() {
        let err = read_records(Path::new("/no/such/test.csv")).unwrap_err();
        assert!(matches!(err, JudgeError::Io { .. }));
    }
}
