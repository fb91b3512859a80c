use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

/// Flags that are also accepted with a single leading dash (`-input1 a.nii`).
const LEGACY_FLAGS: [&str; 4] = ["input1", "input2", "label", "temp"];

/// Compute the Dice score for one label between two segmentation images.
#[derive(Parser, Debug)]
#[command(
    name = "dice-score",
    version,
    about = "Calculate Dice score for a label in two segmented images"
)]
pub struct Cli {
    /// Path to the first segmented file.
    #[arg(long = "input1", value_name = "PATH")]
    pub input1: PathBuf,
    /// Path to the second segmented file.
    #[arg(long = "input2", value_name = "PATH")]
    pub input2: PathBuf,
    /// Label number to compare volumes.
    #[arg(long = "label", allow_negative_numbers = true)]
    pub label: i64,
    /// Directory receiving `dice_scores.csv` (default: system temp directory).
    #[arg(long = "temp", value_name = "DIR")]
    pub temp: Option<PathBuf>,
    /// Explicit configuration file.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Print the accumulated score log after appending.
    #[arg(long = "show-log", default_value_t = false)]
    pub show_log: bool,
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Helper entry point so `main` can stay minimal.
pub fn parse() -> Cli {
    Cli::parse_from(normalize_legacy_flags(std::env::args_os()))
}

/// Rewrite `-input1`, `-label=3` and friends into their `--` spelling.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut out: Vec<OsString> = args.next().into_iter().collect();

    for arg in args {
        let legacy = arg.to_str().and_then(|raw| {
            let body = raw.strip_prefix('-').filter(|b| !b.starts_with('-'))?;
            let name = body.split_once('=').map_or(body, |(name, _)| name);
            LEGACY_FLAGS.contains(&name).then(|| format!("-{raw}"))
        });
        out.push(legacy.map(OsString::from).unwrap_or(arg));
    }

    out
}
