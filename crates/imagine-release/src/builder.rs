//! Release archive creation.
//!
//! The [`ReleaseBuilder`] provides a fluent API for writing release tarballs
//! in the layout read by [`extract_release_metadata`](crate::extract_release_metadata).

use crate::{
    JOB_MANIFEST_PREFIX, JOBS_PREFIX, JobManifest, PACKAGES_PREFIX, RELEASE_MANIFEST_PATH,
    ReleaseManifest, ReleaseResult,
};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs;
use std::io;
use std::path::Path;
use tar::{EntryType, Header};

/// Longest path that fits the plain tar name field.
const MAX_PATH_LEN: usize = 100;

/// Builder for release archives.
///
/// # Example
///
/// ```no_run
/// use imagine_release::{JobManifest, ReleaseBuilder, ReleaseManifest};
///
/// let builder = ReleaseBuilder::new(ReleaseManifest::new("demo"))
///     .add_package("libA.tgz", b"payload".to_vec())
///     .add_job("worker.tgz", &JobManifest::new("worker", &["libA"]))?;
///
/// builder.write("demo.tgz")?;
/// # Ok::<(), imagine_release::ReleaseError>(())
/// ```
pub struct ReleaseBuilder {
    manifest: ReleaseManifest,
    entries: Vec<ArchiveEntry>,
}

/// An entry to include in the archive.
struct ArchiveEntry {
    /// Path within the archive, written verbatim.
    archive_path: String,
    /// File contents, or `None` for a directory.
    contents: Option<Vec<u8>>,
}

impl ReleaseBuilder {
    /// Create a new builder with the given release manifest.
    #[must_use]
    pub fn new(manifest: ReleaseManifest) -> Self {
        Self {
            manifest,
            entries: Vec::new(),
        }
    }

    /// Add a package payload at `./packages/<file_name>`.
    #[must_use]
    pub fn add_package(self, file_name: &str, contents: Vec<u8>) -> Self {
        self.add_bytes(&format!("{PACKAGES_PREFIX}/{file_name}"), contents)
    }

    /// Add a job archive at `./jobs/<file_name>` containing `./job.MF`.
    pub fn add_job(self, file_name: &str, job_manifest: &JobManifest) -> ReleaseResult<Self> {
        let job_mf = job_manifest.to_yaml()?;
        let archive = gzip_tar(&[(JOB_MANIFEST_PREFIX, job_mf.as_bytes())])?;

        Ok(self.add_job_archive(file_name, archive))
    }

    /// Add raw bytes as the job archive at `./jobs/<file_name>`.
    #[must_use]
    pub fn add_job_archive(self, file_name: &str, contents: Vec<u8>) -> Self {
        self.add_bytes(&format!("{JOBS_PREFIX}/{file_name}"), contents)
    }

    /// Add a directory entry.
    #[must_use]
    pub fn add_directory(mut self, archive_path: &str) -> Self {
        self.entries.push(ArchiveEntry {
            archive_path: archive_path.to_string(),
            contents: None,
        });
        self
    }

    /// Add raw bytes as a file in the archive.
    #[must_use]
    pub fn add_bytes(mut self, archive_path: &str, contents: Vec<u8>) -> Self {
        self.entries.push(ArchiveEntry {
            archive_path: archive_path.to_string(),
            contents: Some(contents),
        });
        self
    }

    /// Encode the archive into memory.
    ///
    /// `./release.MF` is written first, then every added entry in order.
    pub fn to_bytes(&self) -> ReleaseResult<Vec<u8>> {
        let release_mf = ArchiveEntry {
            archive_path: RELEASE_MANIFEST_PATH.to_string(),
            contents: Some(self.manifest.to_yaml()?.into_bytes()),
        };

        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.push(&release_mf);
        entries.extend(self.entries.iter());

        write_gzip_tar(entries)
    }

    /// Write the archive to a file.
    pub fn write<P: AsRef<Path>>(&self, output_path: P) -> ReleaseResult<()> {
        fs::write(output_path, self.to_bytes()?)?;
        Ok(())
    }
}

/// Write regular files as a gzip-compressed tar stream.
pub(crate) fn gzip_tar(files: &[(&str, &[u8])]) -> ReleaseResult<Vec<u8>> {
    let entries: Vec<ArchiveEntry> = files
        .iter()
        .map(|(archive_path, contents)| ArchiveEntry {
            archive_path: (*archive_path).to_string(),
            contents: Some(contents.to_vec()),
        })
        .collect();

    write_gzip_tar(&entries)
}

/// Write entries as a gzip-compressed tar stream.
fn write_gzip_tar<'a, I>(entries: I) -> ReleaseResult<Vec<u8>>
where
    I: IntoIterator<Item = &'a ArchiveEntry>,
{
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut tar = tar::Builder::new(encoder);

    for entry in entries {
        let header = entry_header(entry)?;
        let contents = entry.contents.as_deref().unwrap_or_default();
        tar.append(&header, contents)?;
    }

    let encoder = tar.into_inner()?;
    Ok(encoder.finish()?)
}

/// Build a header whose name field holds the path verbatim.
///
/// `Header::set_path` normalises away a leading `./`, which release archives
/// rely on, so the name bytes are copied in directly.
fn entry_header(entry: &ArchiveEntry) -> io::Result<Header> {
    let name = entry.archive_path.as_bytes();
    if name.len() > MAX_PATH_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("archive path too long: {}", entry.archive_path),
        ));
    }

    let mut header = Header::new_ustar();
    header.as_old_mut().name[..name.len()].copy_from_slice(name);

    match &entry.contents {
        Some(contents) => {
            header.set_entry_type(EntryType::Regular);
            header.set_mode(0o644);
            header.set_size(contents.len() as u64);
        }
        None => {
            header.set_entry_type(EntryType::Directory);
            header.set_mode(0o755);
            header.set_size(0);
        }
    }
    header.set_mtime(0);
    header.set_cksum();

    Ok(header)
}
