use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use tracing::info;

use crate::cli::Cli;
use crate::config::{self, to_utf8};
use crate::dice::compute_dice;
use crate::{input, report, volume};

/// Validated inputs for a single scoring run.
#[derive(Debug)]
struct RunRequest {
    input1: Utf8PathBuf,
    input2: Utf8PathBuf,
    label: i64,
    temp: Option<Utf8PathBuf>,
    config: Option<PathBuf>,
    show_log: bool,
}

impl TryFrom<Cli> for RunRequest {
    type Error = anyhow::Error;

    fn try_from(cli: Cli) -> Result<Self> {
        Ok(Self {
            input1: to_utf8(cli.input1)?,
            input2: to_utf8(cli.input2)?,
            label: cli.label,
            temp: cli.temp.map(to_utf8).transpose()?,
            config: cli.config,
            show_log: cli.show_log,
        })
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let request = RunRequest::try_from(cli)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    score(&request, &mut out)?;
    Ok(())
}

/// Run the pipeline, writing the summary to `out`. Returns the CSV log path.
fn score(request: &RunRequest, out: &mut dyn Write) -> Result<Utf8PathBuf> {
    let loaded = config::resolve(request.config.as_deref())?;
    info!(
        source = loaded.source.as_str(),
        path = ?loaded.path,
        "configuration resolved"
    );

    input::ensure_input_file(&request.input1)?;
    input::ensure_input_file(&request.input2)?;

    let csv_name = loaded.config.csv_filename()?;
    let output_dir = loaded.config.output_dir(request.temp.as_deref())?;
    input::ensure_dir(&output_dir)?;
    let csv_path = output_dir.join(csv_name);

    info!(input1 = %request.input1, input2 = %request.input2, label = request.label, "scoring");
    let first = volume::load_volume(&request.input1)?;
    let second = volume::load_volume(&request.input2)?;
    info!(
        first = %first.path(),
        second = %second.path(),
        shape = ?first.shape(),
        voxels = first.len(),
        "volumes loaded"
    );

    let result = compute_dice(first.data(), second.data(), request.label)?;

    write!(out, "{}", report::format_summary(&result)).context("writing summary")?;

    let header = report::append_row(&csv_path, &result)?;
    info!(path = %csv_path, header, "score appended");

    if request.show_log {
        let rows = report::read_rows(&csv_path)?;
        write!(out, "{}", report::format_log(&rows)).context("writing score log")?;
    }

    Ok(csv_path)
}
