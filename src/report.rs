use std::fmt::Write as _;
use std::fs::OpenOptions;

use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dice::DiceResult;

/// Default file name of the cumulative score log.
pub const CSV_FILENAME: &str = "dice_scores.csv";

/// One row of the score log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(rename = "Label")]
    pub label: i64,
    #[serde(rename = "Volume Input1")]
    pub volume1: u64,
    #[serde(rename = "Volume Input2")]
    pub volume2: u64,
    #[serde(rename = "Common Volume")]
    pub common: u64,
    #[serde(rename = "Dice Score")]
    pub score: f64,
}

impl From<&DiceResult> for ScoreRecord {
    fn from(result: &DiceResult) -> Self {
        Self {
            label: result.label,
            volume1: result.volume1,
            volume2: result.volume2,
            common: result.intersection,
            score: result.score,
        }
    }
}

pub fn format_summary(result: &DiceResult) -> String {
    let mut out = String::new();
    let label = result.label;

    let _ = writeln!(out);
    let _ = writeln!(out, "Volume for label {} in input1 = {}", label, result.volume1);
    let _ = writeln!(out, "Volume for label {} in input2 = {}", label, result.volume2);
    let _ = writeln!(out, "Area of overlapped volumes = {}", result.intersection);
    let _ = writeln!(out);
    let _ = writeln!(out, "Dice score for label {} is {:?}", label, result.score);
    let _ = writeln!(out);

    out
}

/// Append `result` to the log at `path`, writing the header first when the
/// file is new or empty. Returns whether a header was written.
pub fn append_row(path: &Utf8Path, result: &DiceResult) -> Result<bool> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path))?;
    let needs_header = file
        .metadata()
        .with_context(|| format!("reading metadata of {}", path))?
        .len()
        == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(file);
    writer
        .serialize(ScoreRecord::from(result))
        .with_context(|| format!("writing row to {}", path))?;
    writer.flush().with_context(|| format!("flushing {}", path))?;

    debug!(path = %path, header = needs_header, "appended score row");
    Ok(needs_header)
}

pub fn read_rows(path: &Utf8Path) -> Result<Vec<ScoreRecord>> {
    let mut reader = csv::Reader::from_path(path).with_context(|| format!("opening {}", path))?;
    reader
        .deserialize()
        .enumerate()
        .map(|(row_no, row)| row.with_context(|| format!("{} row {}", path, row_no + 1)))
        .collect()
}

pub fn format_log(rows: &[ScoreRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6}  {:>14}  {:>14}  {:>14}  {:>10}",
        "Label", "Volume Input1", "Volume Input2", "Common Volume", "Dice Score"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:>6}  {:>14}  {:>14}  {:>14}  {:>10.4}",
            row.label, row.volume1, row.volume2, row.common, row.score
        );
    }
    out
}
