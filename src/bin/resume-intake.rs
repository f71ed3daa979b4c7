//! CLI binary for resume-intake.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `IntakeConfig`, drives the controller, and prints the rendered result.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use resume_intake::{
    render, IntakeConfig, IntakeController, IntakeError, NoticeLevel, PreviewState, SelectedFile,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Upload a resume and print the parsed fields
  resume-intake resume.pdf

  # Point at a specific parsing service
  resume-intake --endpoint https://parser.example.com/api/upload resume.docx

  # Preview only: convert a DOCX to HTML without contacting the service
  resume-intake --preview-only --preview-output preview.html resume.docx

  # Raw JSON output for scripting
  resume-intake --json resume.pdf > parsed.json

ENVIRONMENT VARIABLES:
  RESUME_INTAKE_ENDPOINT   Parsing-service upload URL
  RESUME_INTAKE_TIMEOUT    Upload timeout in seconds
"#;

/// Upload a resume to a parsing service and display the extracted fields.
#[derive(Parser, Debug)]
#[command(
    name = "resume-intake",
    version,
    about = "Upload a PDF or DOCX resume to a parsing service and display the extracted fields",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the resume file (.pdf or .docx).
    input: PathBuf,

    /// Parsing-service upload URL.
    #[arg(long, env = "RESUME_INTAKE_ENDPOINT")]
    endpoint: Option<String>,

    /// Multipart field name the service expects.
    #[arg(long, default_value = "resume")]
    field_name: String,

    /// Upload timeout in seconds.
    #[arg(long, env = "RESUME_INTAKE_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Generate the preview and stop; no upload is performed.
    #[arg(long)]
    preview_only: bool,

    /// Write preview content (HTML markup or data-URI) to this file.
    #[arg(long, requires = "preview_only")]
    preview_output: Option<PathBuf>,

    /// Output the parsed result as raw JSON instead of formatted text.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors and the result.
    #[arg(short, long)]
    quiet: bool,
}

fn spinner(msg: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(msg.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("resume_intake=debug")
    } else if cli.quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("resume_intake=warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut builder = IntakeConfig::builder()
        .field_name(&cli.field_name)
        .upload_timeout_secs(cli.timeout);
    if let Some(endpoint) = &cli.endpoint {
        builder = builder.endpoint(endpoint);
    }
    let config = builder.build()?;

    let file = SelectedFile::from_path(&cli.input)
        .with_context(|| format!("cannot load '{}'", cli.input.display()))?;
    let mut controller = IntakeController::new(config)?;

    // ── Preview ──────────────────────────────────────────────────────────
    let bar = spinner("Generating preview…");
    let preview_result = controller.preview_file(file).await;
    bar.finish_and_clear();

    match preview_result {
        Ok(_) => {
            if !cli.quiet {
                eprintln!("{} Preview ready", green("✔"));
            }
        }
        Err(IntakeError::ConversionFailed { .. }) => {
            // The upload does not depend on the preview.
            eprintln!("{} Preview unavailable; continuing", yellow("⚠"));
        }
        Err(err) => {
            print_notices(&controller);
            return Err(err.into());
        }
    }

    if cli.preview_only {
        let content = match controller.preview() {
            PreviewState::PdfUrl(url) => url.clone(),
            PreviewState::HtmlMarkup(html) => html.clone(),
            PreviewState::None => anyhow::bail!("no preview content was produced"),
        };
        match &cli.preview_output {
            Some(path) => {
                std::fs::write(path, &content)
                    .with_context(|| format!("cannot write '{}'", path.display()))?;
                if !cli.quiet {
                    eprintln!("{} Preview written to {}", green("✔"), bold(&path.display().to_string()));
                }
            }
            None => println!("{content}"),
        }
        return Ok(());
    }

    // ── Submit ───────────────────────────────────────────────────────────
    let bar = spinner("Uploading resume…");
    let submit_result = controller.submit().await;
    bar.finish_and_clear();

    match submit_result {
        Ok(parsed) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(parsed)?);
            } else {
                if !cli.quiet {
                    eprintln!("{} Resume parsed successfully\n", green("✔"));
                }
                print!("{}", render(parsed));
            }
            Ok(())
        }
        Err(err) => {
            print_notices(&controller);
            Err(err.into())
        }
    }
}

fn print_notices(controller: &IntakeController) {
    for notice in controller.notices() {
        let tag = match notice.level {
            NoticeLevel::Info => green("info"),
            NoticeLevel::Warning => yellow("warning"),
            NoticeLevel::Error => red("error"),
        };
        eprintln!("{tag}: {}", notice.message);
    }
}
