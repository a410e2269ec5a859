//! CLI binary for transcript-renamer.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ProcessConfig`, prints the processed transcript, and writes or encodes
//! the PDF export.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use transcript_renamer::{
    export_to_file, paginate, process_file, ProcessConfig, ProcessedTranscript, SourceFormat,
    SpeakerMap, DEFAULT_PDF_NAME,
};

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Rename two speakers, print the result
  transcript-renamer call.txt -s 0=Alice -s 1=Bob

  # Word document in, PDF out (processed_transcript.pdf)
  transcript-renamer meeting.docx -s 0="Dr. Jane Doe" -s 1=Sam --pdf

  # PDF to a chosen path, text to a file
  transcript-renamer notes.rtf -s 0=Ann --pdf out/notes.pdf --text-out out/notes.txt

  # Which labels does this transcript use?
  transcript-renamer call.txt --detect

  # Embed the PDF in a web page
  transcript-renamer call.txt -s 0=Alice --html-link > link.html

  # Machine-readable result
  transcript-renamer call.txt -s 0=Alice --json

FORMATS:
  Extension  Tag              Decoding
  ─────────  ───────────────  ──────────────────────────────────────────
  .txt       plain            UTF-8, verbatim
  .docx      word-processor   body paragraphs, one per line (tables dropped)
  .rtf       rich-text        text stream, formatting and objects dropped

PDF LAYOUT:
  US Letter, Times-Roman 12 pt, 50 lines per page, no wrapping.

ENVIRONMENT VARIABLES:
  TRANSCRIPT_SPEAKERS     Number of speaker slots (1–10)
  TRANSCRIPT_FORMAT       Force the input format
  TRANSCRIPT_PDF          Write the PDF here
  RUST_LOG                Override log filter (e.g. transcript_renamer=debug)
"#;

/// Replace "Speaker N" labels in transcripts and export them as PDF.
#[derive(Parser, Debug)]
#[command(
    name = "transcript-renamer",
    version,
    about = "Replace \"Speaker N\" labels in transcripts and export them as PDF",
    long_about = "Load a meeting transcript (.txt, .docx or .rtf), replace placeholder speaker \
labels such as \"Speaker 0\" with real names, print the result, and optionally export it as a \
paginated PDF.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Transcript file (.txt, .docx or .rtf).
    input: PathBuf,

    /// Name a speaker: INDEX=NAME (repeatable).
    #[arg(short, long = "speaker", value_name = "INDEX=NAME", value_parser = parse_speaker)]
    speakers: Vec<(u32, String)>,

    /// Number of speaker slots that may be named (1–10).
    #[arg(short = 'n', long = "speakers", env = "TRANSCRIPT_SPEAKERS", default_value_t = 4,
          value_parser = clap::value_parser!(u8).range(1..=10))]
    speaker_count: u8,

    /// Input format, overriding the file extension.
    #[arg(long, env = "TRANSCRIPT_FORMAT", value_enum)]
    format: Option<FormatArg>,

    /// Export a PDF (default path: processed_transcript.pdf).
    #[arg(long, env = "TRANSCRIPT_PDF", value_name = "PATH", num_args = 0..=1,
          default_missing_value = DEFAULT_PDF_NAME)]
    pdf: Option<PathBuf>,

    /// Write the processed transcript to this file instead of stdout.
    #[arg(long, value_name = "PATH")]
    text_out: Option<PathBuf>,

    /// Print the PDF as a data:application/pdf;base64 URI.
    #[arg(long)]
    data_uri: bool,

    /// Print an HTML anchor that downloads the PDF.
    #[arg(long)]
    html_link: bool,

    /// Output structured JSON (ProcessedTranscript) instead of text.
    #[arg(long)]
    json: bool,

    /// List the speaker labels found and exit.
    #[arg(long)]
    detect: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Plain,
    WordProcessor,
    RichText,
}

impl From<FormatArg> for SourceFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Plain => SourceFormat::Plain,
            FormatArg::WordProcessor => SourceFormat::WordProcessor,
            FormatArg::RichText => SourceFormat::RichText,
        }
    }
}

fn parse_speaker(s: &str) -> Result<(u32, String), String> {
    SpeakerMap::parse_assignment(s).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;

    // ── Detect-only mode ─────────────────────────────────────────────────
    if cli.detect {
        let detect_only = ProcessConfig {
            speakers: SpeakerMap::new(),
            ..config
        };
        let output = process_file(&cli.input, &detect_only)
            .await
            .context("Failed to read transcript")?;
        print_labels(&output, cli.json)?;
        return Ok(());
    }

    if config.speakers.is_empty() && !cli.quiet {
        eprintln!(
            "{} no speaker names given (use -s INDEX=NAME); transcript left unchanged",
            yellow("⚠")
        );
    }

    // ── Process ──────────────────────────────────────────────────────────
    let output = process_file(&cli.input, &config)
        .await
        .context("Failed to process transcript")?;

    if let Some(ref path) = cli.text_out {
        tokio::fs::write(path, &output.text)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        if !cli.quiet {
            eprintln!("{} text  →  {}", green("✔"), bold(&path.display().to_string()));
        }
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        writeln!(handle, "{json}").context("Failed to write to stdout")?;
    } else if cli.text_out.is_none() && !cli.data_uri && !cli.html_link {
        write_text(&mut handle, &output.text)?;
    }

    // ── Export ───────────────────────────────────────────────────────────
    if cli.data_uri || cli.html_link {
        let pdf = paginate(&output.text).context("Failed to render PDF")?;
        if cli.data_uri {
            writeln!(handle, "{}", pdf.to_data_uri()).context("Failed to write to stdout")?;
        }
        if cli.html_link {
            let filename = cli
                .pdf
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| DEFAULT_PDF_NAME.to_string());
            writeln!(handle, "{}", pdf.download_link(&filename))
                .context("Failed to write to stdout")?;
        }
    }
    drop(handle);

    if let Some(ref path) = cli.pdf {
        let stats = export_to_file(output.text.clone(), path)
            .await
            .context("PDF export failed")?;
        if !cli.quiet {
            eprintln!(
                "{}  {} page(s), {} lines  →  {}",
                green("✔"),
                stats.page_count,
                stats.line_count,
                bold(&stats.path.display().to_string()),
            );
        }
    }

    if !cli.quiet {
        eprintln!(
            "   {}",
            dim(&format!(
                "{} label(s) replaced{}",
                output.substitutions.total(),
                unmapped_note(&output.unmapped_labels)
            ))
        );
    }

    Ok(())
}

/// Map CLI args to `ProcessConfig`.
fn build_config(cli: &Cli) -> Result<ProcessConfig> {
    let speakers: SpeakerMap = cli.speakers.iter().cloned().collect();
    let mut builder = ProcessConfig::builder()
        .speaker_count(cli.speaker_count as usize)
        .speakers(speakers);
    if let Some(format) = cli.format {
        builder = builder.format(format.into());
    }
    builder.build().context("Invalid configuration")
}

/// Write the transcript, ending it with a newline if it lacks one.
fn write_text(out: &mut impl Write, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())
        .context("Failed to write to stdout")?;
    if !text.ends_with('\n') {
        out.write_all(b"\n").context("Failed to write to stdout")?;
    }
    Ok(())
}

fn print_labels(output: &ProcessedTranscript, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string(&output.unmapped_labels).context("Failed to serialise labels")?
        );
    } else if output.unmapped_labels.is_empty() {
        eprintln!("No speaker labels found.");
    } else {
        for index in &output.unmapped_labels {
            println!("Speaker {index}");
        }
    }
    Ok(())
}

fn unmapped_note(unmapped: &[u32]) -> String {
    if unmapped.is_empty() {
        String::new()
    } else {
        let list: Vec<String> = unmapped.iter().map(|i| format!("Speaker {i}")).collect();
        format!("; still unnamed: {}", list.join(", "))
    }
}
