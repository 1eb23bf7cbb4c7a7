use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{utils, TranscriptError};

/// System directories transcripts must never be written into
const PROTECTED_DIRS: &[&str] = &[
    "/etc",
    "/sys",
    "/proc",
    "/boot",
    "/dev",
    "/private/etc",
    "/System",
    "/Library",
    "/Applications",
];

/// Reject empty paths and paths resolving into protected system directories
pub fn validate_output_path(path: &Path) -> Result<(), TranscriptError> {
    let invalid = || TranscriptError::InvalidOutputPath(path.to_path_buf());

    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(invalid());
    }

    let resolved = utils::resolve_path(path).map_err(|_| invalid())?;
    if PROTECTED_DIRS.iter().any(|dir| resolved.starts_with(dir)) {
        tracing::debug!("Output path {} resolves to {}", path.display(), resolved.display());
        return Err(invalid());
    }

    Ok(())
}

/// Write text followed by a newline to a file, or to `stdout` when no file is given
pub fn write_output<W: Write>(
    text: &str,
    destination: Option<&Path>,
    stdout: &mut W,
) -> Result<(), TranscriptError> {
    match destination {
        Some(path) => save_to_file(text, path),
        None => print_to_console(text, stdout),
    }
}

/// Create or truncate the file and write the transcript
pub fn save_to_file(text: &str, path: &Path) -> Result<(), TranscriptError> {
    fs_err::write(path, format!("{}\n", text)).map_err(|source| TranscriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Transcript saved to {}", path.display());
    Ok(())
}

/// Print the transcript to the console
pub fn print_to_console<W: Write>(text: &str, stdout: &mut W) -> Result<(), TranscriptError> {
    writeln!(stdout, "{}", text)
        .and_then(|_| stdout.flush())
        .map_err(|source| TranscriptError::Io {
            path: PathBuf::from("<stdout>"),
            source,
        })
}
