//! Error types for release extraction.

use std::fmt;
use thiserror::Error;

/// Which manifest schema a codec error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    /// `release.MF` at the root of the release archive.
    Release,
    /// `job.MF` inside a job archive.
    Job,
}

impl ManifestKind {
    /// Short lowercase tag, `release` or `job`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ManifestKind::Release => "release",
            ManifestKind::Job => "job",
        }
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while reading or writing release archives.
///
/// Every variant is terminal for an extraction call: no partial
/// [`ReleaseMetadata`](crate::ReleaseMetadata) is ever returned.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// The release archive could not be opened or is not gzip-compressed.
    #[error("failed to open release archive: {0}")]
    ArchiveOpen(#[source] std::io::Error),

    /// The release archive is corrupt or truncated.
    #[error("failed to read release archive: {0}")]
    ArchiveRead(#[source] std::io::Error),

    /// A manifest is not valid YAML for its schema.
    #[error("failed to decode {kind} manifest {entry}: {source}")]
    ManifestDecode {
        kind: ManifestKind,
        entry: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// A manifest could not be serialized.
    #[error("failed to encode {kind} manifest: {source}")]
    ManifestEncode {
        kind: ManifestKind,
        #[source]
        source: serde_yaml::Error,
    },

    /// A job entry is not a gzip-compressed archive.
    #[error("job archive {job_entry} is not a gzip-compressed tar archive: {source}")]
    NestedArchiveOpen {
        job_entry: String,
        #[source]
        source: std::io::Error,
    },

    /// A job archive opened but its tar stream is corrupt or truncated.
    #[error("failed to read job archive {job_entry}: {source}")]
    NestedArchiveRead {
        job_entry: String,
        #[source]
        source: std::io::Error,
    },

    /// A job archive holds no `job.MF`.
    #[error("job archive {job_entry} does not contain a job.MF manifest")]
    JobManifestNotFound { job_entry: String },

    /// I/O error while writing an archive.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReleaseError {
    /// The archive entry this error is attributed to, if any.
    #[must_use]
    pub fn entry(&self) -> Option<&str> {
        match self {
            ReleaseError::ManifestDecode { entry, .. } => Some(entry),
            ReleaseError::NestedArchiveOpen { job_entry, .. }
            | ReleaseError::NestedArchiveRead { job_entry, .. }
            | ReleaseError::JobManifestNotFound { job_entry } => Some(job_entry),
            _ => None,
        }
    }
}
