use anyhow::{Context, Result};
use clap::Parser;

use std::fs;
use std::io::{self, BufWriter, Write};

use flatscript::extract::Extractor;
use flatscript::logging;
use flatscript::opts::Opts;
use flatscript::output_type::OutputType;
use flatscript::recording::Recording;

fn main() -> Result<()> {
    logging::init();
    let params = Params::parse();

    let opts = build_opts(&params)?;
    let extractor = Extractor::new(opts)?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    for path in &params.files {
        let raw = fs::read_to_string(path).with_context(|| format!("failed to read '{path}'"))?;
        let recording: Recording = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse transcript '{path}'"))?;
        extractor.extract(&recording, &mut writer)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "flatscript")]
#[command(about = "Extract and render speech-recognition transcripts")]
struct Params {
    /// Merge blocks whose start times fall in the same interval (in seconds)
    #[arg(short = 'i', long = "interval")]
    interval_seconds: Option<i64>,

    /// Break blocks on the first trailing punctuation after this many characters
    #[arg(short = 's', long = "softbreak")]
    softbreak: Option<usize>,

    /// Break blocks unconditionally at this many characters
    #[arg(long = "hardbreak")]
    hardbreak: Option<usize>,

    /// Join words with trailing hyphens
    #[arg(short = 'j', long = "join-hyphens", default_value_t = false)]
    join_hyphens: bool,

    /// Break apart words with inline hyphens
    #[arg(short = 'b', long = "break-hyphens", default_value_t = false)]
    break_hyphens: bool,

    /// Search and replace using word pairs from a JSON file
    #[arg(short = 'r', long = "replace-words")]
    replace_words: Option<String>,

    /// Shift captions by the specified offset (in milliseconds)
    #[arg(short = 't', long = "timeshift")]
    timeshift: Option<i64>,

    /// Output format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value_t = OutputType::Transcript
    )]
    format: OutputType,

    /// Transcript JSON files to process
    #[arg(required = true)]
    files: Vec<String>,
}

fn build_opts(params: &Params) -> Result<Opts> {
    let replacements = match &params.replace_words {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read replacement file '{path}'"))?;
            serde_json::from_str::<Vec<(String, String)>>(&raw)
                .with_context(|| format!("failed to parse replacement pairs '{path}'"))?
        }
        None => Vec::new(),
    };

    Ok(Opts {
        interval_ms: params.interval_seconds.map(|s| s * 1000),
        soft_break_chars: params.softbreak,
        hard_break_chars: params.hardbreak,
        split_hyphens: params.break_hyphens,
        join_hyphens: params.join_hyphens,
        replacements,
        timeshift_ms: params.timeshift,
        output_type: params.format,
    })
}
