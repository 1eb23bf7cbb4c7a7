use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::Duration;

use crate::cli::Cli;
use crate::config::Config;
use crate::extractors::TranscriptProvider;
use crate::transcript::TranscriptPipeline;
use crate::{output, video, TranscriptError};

/// Exit code for runtime failures without a more specific code
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_INVALID_REFERENCE: i32 = 3;
pub const EXIT_NO_TRANSCRIPT: i32 = 4;
pub const EXIT_OUTPUT: i32 = 5;

/// Resolve, fetch and write a transcript as requested on the command line.
///
/// Nothing reaches `stdout` or the output file unless every earlier step succeeded.
pub async fn run<W: Write>(
    cli: &Cli,
    config: &Config,
    provider: &dyn TranscriptProvider,
    stdout: &mut W,
) -> Result<()> {
    let video = video::resolve(&cli.video)?;

    if let Some(path) = &cli.output {
        output::validate_output_path(path)?;
    }

    let pipeline = TranscriptPipeline::new(provider);

    if cli.list_languages {
        let spinner = spinner(cli.quiet, "Listing transcript tracks...");
        let tracks = pipeline.available_tracks(&video).await;
        spinner.finish_and_clear();

        let tracks = tracks?;
        if tracks.is_empty() {
            return Err(TranscriptError::NoTranscriptAvailable(format!(
                "video {} has no caption tracks",
                video
            ))
            .into());
        }

        let listing = tracks
            .iter()
            .map(|track| format!("{}\t{}\t{}", track.language, track.name, track.kind))
            .collect::<Vec<_>>()
            .join("\n");
        output::write_output(&listing, cli.output.as_deref(), stdout)?;
        return Ok(());
    }

    let preferences = cli.language_preference(&config.default_languages);
    tracing::info!("Fetching transcript for {} (languages: {})", video, preferences);

    let spinner = spinner(cli.quiet, "Fetching transcript...");
    let transcript = pipeline.fetch(&video, &preferences).await;
    spinner.finish_and_clear();
    let transcript = transcript?;

    output::write_output(&transcript.text, cli.output.as_deref(), stdout)?;

    if let Some(path) = &cli.output {
        tracing::info!("Transcript saved to: {}", path.display());
    }

    Ok(())
}

/// Map an error to the documented process exit code
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<TranscriptError>() {
        Some(TranscriptError::InvalidReference(_)) => EXIT_INVALID_REFERENCE,
        Some(TranscriptError::NoTranscriptAvailable(_)) => EXIT_NO_TRANSCRIPT,
        Some(TranscriptError::Io { .. }) | Some(TranscriptError::InvalidOutputPath(_)) => {
            EXIT_OUTPUT
        }
        Some(TranscriptError::Retrieval(_)) | None => EXIT_FAILURE,
    }
}

/// Spinner on stderr; hidden when quiet or when stderr is not a terminal
fn spinner(quiet: bool, message: &'static str) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new_spinner();
    let template = "{spinner:.green} [{elapsed_precise}] {msg}";
    if let Ok(style) = ProgressStyle::default_spinner().template(template) {
        progress.set_style(style);
    }
    progress.set_message(message);
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}
