//! Results table and evidence log.

use std::io::Write;
use std::path::Path;

use crate::error::{JudgeError, JudgeResult};
use crate::record::Verdict;

/// Header row of the results table.
pub const RESULT_HEADERS: [&str; 3] = ["Story ID", "Prediction", "Rationale"];

/// Write one `(id, prediction, rationale)` row per verdict, in order.
pub fn write_results<W: Write>(writer: W, verdicts: &[Verdict]) -> JudgeResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(RESULT_HEADERS)?;
    for verdict in verdicts {
        let label = verdict.prediction.label().to_string();
        writer.write_record([
            verdict.story_id.as_str(),
            label.as_str(),
            verdict.rationale.as_str(),
        ])?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the results table to `path`, replacing any previous file.
pub fn write_results_file(path: &Path, verdicts: &[Verdict]) -> JudgeResult<()> {
    let file = create(path)?;
    write_results(file, verdicts)?;
    tracing::info!(path = %path.display(), rows = verdicts.len(), "wrote results table");
    Ok(())
}

/// Write every verdict, evidence included, as one JSON object per line.
pub fn write_evidence_log<W: Write>(mut writer: W, verdicts: &[Verdict]) -> JudgeResult<()> {
    for verdict in verdicts {
        serde_json::to_writer(&mut writer, verdict)?;
        writer.write_all(b"\n").map_err(serde_json::Error::io)?;
    }
    writer.flush().map_err(serde_json::Error::io)?;
    Ok(())
}

/// Write the evidence log to `path`, one JSON object per verdict.
pub fn write_evidence_file(path: &Path, verdicts: &[Verdict]) -> JudgeResult<()> {
    let file = std::io::BufWriter::new(create(path)?);
    write_evidence_log(file, verdicts)?;
    tracing::info!(path = %path.display(), "wrote evidence log");
    Ok(())
}

fn create(path: &Path) -> JudgeResult<std::fs::File> {
    std::fs::File::create(path).map_err(|source| JudgeError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grounding::Grounding;
    use crate::record::{Basis, Prediction, StoryId};

    fn verdict(id: &str, prediction: Prediction, rationale: &str) -> Verdict {
        Verdict {
            story_id: StoryId::from(id),
            prediction,
            rationale: rationale.to_string(),
            basis: Basis::Grounding {
                grounding: Grounding::Ungrounded,
            },
            evidence: None,
        }
    }

    #[test]
    fn test_results_table_layout() {
        let verdicts = vec![
            verdict("7", Prediction::Contradictory, "Ungrounded: no backstory."),
            verdict("8", Prediction::Consistent, "Fine, \"quoted\" text."),
        ];
        let mut buffer = Vec::new();
        write_results(&mut buffer, &verdicts).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Story ID,Prediction,Rationale");
        assert_eq!(lines[1], "7,0,Ungrounded: no backstory.");
        assert_eq!(lines[2], "8,1,\"Fine, \"\"quoted\"\" text.\"");
    }

    #[test]
    fn test_evidence_log_is_json_lines() {
        let verdicts = vec![
            verdict("1", Prediction::Contradictory, "a"),
            verdict("2", Prediction::Contradictory, "b"),
        ];
        let mut buffer = Vec::new();
        write_evidence_log(&mut buffer, &verdicts).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let parsed: Vec<Verdict> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed, verdicts);
    }
}
