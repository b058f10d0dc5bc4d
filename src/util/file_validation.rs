//! Pre-open validation for files passed on the command line.
//!
//! Rejects directories, oversized files, and files that look binary
//! before any text is loaded into a buffer.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

/// Maximum file size in bytes (50 MB)
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Errors that can occur when validating a file for opening
#[derive(Debug, Clone)]
pub enum FileOpenError {
    NotFound,
    PermissionDenied,
    IsDirectory,
    /// File contains null bytes in its leading chunk
    BinaryFile,
    TooLarge {
        size_mb: f64,
    },
    Io(String),
}

impl std::fmt::Display for FileOpenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "file not found"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::IsDirectory => write!(f, "is a directory"),
            Self::BinaryFile => write!(f, "binary file"),
            Self::TooLarge { size_mb } => write!(
                f,
                "file too large ({:.1} MB, max {} MB)",
                size_mb,
                MAX_FILE_SIZE / (1024 * 1024)
            ),
            Self::Io(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FileOpenError {}

/// Validate a path before reading it as text: must exist, be a regular
/// file, fit the size limit, and not look binary.
pub fn validate_text_file(path: &Path) -> Result<(), FileOpenError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => FileOpenError::NotFound,
        std::io::ErrorKind::PermissionDenied => FileOpenError::PermissionDenied,
        _ => FileOpenError::Io(e.to_string()),
    })?;

    if metadata.is_dir() {
        return Err(FileOpenError::IsDirectory);
    }

    if metadata.len() > MAX_FILE_SIZE {
        return Err(FileOpenError::TooLarge {
            size_mb: metadata.len() as f64 / (1024.0 * 1024.0),
        });
    }

    if is_likely_binary(path) {
        return Err(FileOpenError::BinaryFile);
    }

    Ok(())
}

/// Scan the first 8KB for null bytes, common in binary files and rare in
/// text. Returns `false` on read errors so the actual open can produce a
/// better message.
fn is_likely_binary(path: &Path) -> bool {
    let Ok(mut file) = File::open(path) else {
        return false;
    };

    let mut buffer = [0u8; 8192];
    let Ok(bytes_read) = file.read(&mut buffer) else {
        return false;
    };

    buffer[..bytes_read].contains(&0)
}
