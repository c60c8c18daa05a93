//! File entries found in a release archive.

use serde::Serialize;

const KIB: f64 = 1024.0;

/// A package or job payload entry of the release archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseFile {
    /// Full entry path inside the archive (e.g., `./packages/libA.tgz`).
    pub path: String,

    /// Declared entry size in bytes.
    pub size: u64,
}

impl ReleaseFile {
    /// Create a file record.
    #[must_use]
    pub fn new(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    /// Last path segment without its extension.
    ///
    /// `./packages/foo-1.2.3.tgz` yields `foo-1.2.3`.
    #[must_use]
    pub fn name(&self) -> &str {
        let trimmed = self.path.trim_end_matches('/');
        let base = match trimmed.rfind('/') {
            Some(idx) => &trimmed[idx + 1..],
            None => trimmed,
        };

        match base.rfind('.') {
            Some(idx) => &base[..idx],
            None => base,
        }
    }

    /// Size formatted with [`format_size`].
    #[must_use]
    pub fn human_readable_size(&self) -> String {
        format_size(self.size)
    }
}

/// Format a byte count as `B`, `KB` or `MB` with two decimals.
///
/// Units are powers of 1024; anything of a mebibyte or more stays in `MB`.
#[must_use]
pub fn format_size(size: u64) -> String {
    let bytes = size as f64;
    let kilobytes = bytes / KIB;
    let megabytes = kilobytes / KIB;

    if kilobytes < 1.0 {
        format!("{bytes:.2} B")
    } else if megabytes < 1.0 {
        format!("{kilobytes:.2} KB")
    } else {
        format!("{megabytes:.2} MB")
    }
}
