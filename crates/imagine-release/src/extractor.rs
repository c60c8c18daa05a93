//! Release archive traversal.
//!
//! [`extract_release_metadata`] streams the outer gzip tar once, entry by
//! entry, and opens every job archive in memory to read its `job.MF`.

use crate::manifest::decode_manifest;
use crate::{
    JOB_MANIFEST_PREFIX, JOBS_PREFIX, JobManifest, ManifestKind, PACKAGES_PREFIX,
    RELEASE_MANIFEST_PATH, ReleaseError, ReleaseFile, ReleaseManifest, ReleaseResult,
};
use flate2::read::MultiGzDecoder;
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Chain, Cursor, Read};
use std::path::Path;
use tar::{Archive, Entry};
use tracing::{debug, trace, warn};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

type GzipTar<R> = Archive<MultiGzDecoder<Chain<Cursor<[u8; 2]>, R>>>;

/// Everything extracted from one release archive.
///
/// Built in a single pass by [`extract_release_metadata`] and read-only
/// afterwards. `job_files` and `job_manifests` always have the same length
/// and line up index by index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseMetadata {
    manifest: ReleaseManifest,
    package_files: Vec<ReleaseFile>,
    job_files: Vec<ReleaseFile>,
    job_manifests: Vec<JobManifest>,
}

/// A dependency whose target package is neither declared nor shipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference<'a> {
    /// Package or job name holding the reference.
    pub from: &'a str,
    /// Missing package name.
    pub to: &'a str,
    /// Whether the reference comes from a `job.MF`.
    pub from_job: bool,
}

impl ReleaseMetadata {
    /// Open and extract a release archive from disk.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use imagine_release::ReleaseMetadata;
    ///
    /// let metadata = ReleaseMetadata::open("redis-12.tgz")?;
    /// assert_eq!(metadata.job_files().len(), metadata.job_manifests().len());
    /// # Ok::<(), imagine_release::ReleaseError>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> ReleaseResult<Self> {
        let file = File::open(path.as_ref()).map_err(ReleaseError::ArchiveOpen)?;
        extract_release_metadata(file)
    }

    /// The decoded `release.MF`, or the zero value if the archive had none.
    #[must_use]
    pub fn manifest(&self) -> &ReleaseManifest {
        &self.manifest
    }

    /// Files under `./packages`, in archive order.
    #[must_use]
    pub fn package_files(&self) -> &[ReleaseFile] {
        &self.package_files
    }

    /// Files under `./jobs`, in archive order.
    #[must_use]
    pub fn job_files(&self) -> &[ReleaseFile] {
        &self.job_files
    }

    /// One `job.MF` per entry of [`job_files`](Self::job_files).
    #[must_use]
    pub fn job_manifests(&self) -> &[JobManifest] {
        &self.job_manifests
    }

    /// Job files paired with the manifest decoded from each.
    pub fn jobs(&self) -> impl Iterator<Item = (&ReleaseFile, &JobManifest)> {
        self.job_files.iter().zip(&self.job_manifests)
    }

    /// References to packages that appear neither in `release.MF` nor as a
    /// package file. Package dependencies come first, then job usages.
    #[must_use]
    pub fn dangling_dependencies(&self) -> Vec<DanglingReference<'_>> {
        let known: HashSet<&str> = self
            .manifest
            .packages
            .iter()
            .map(|p| p.name.as_str())
            .chain(self.package_files.iter().map(ReleaseFile::name))
            .collect();

        let from_packages = self.manifest.packages.iter().flat_map(|package| {
            package.dependencies.iter().map(move |dep| DanglingReference {
                from: package.name.as_str(),
                to: dep.as_str(),
                from_job: false,
            })
        });
        let from_jobs = self.job_manifests.iter().flat_map(|job| {
            job.packages.iter().map(move |pkg| DanglingReference {
                from: job.name.as_str(),
                to: pkg.as_str(),
                from_job: true,
            })
        });

        from_packages
            .chain(from_jobs)
            .filter(|reference| !known.contains(reference.to))
            .collect()
    }
}

/// Extract release metadata from a gzip-compressed tar stream.
///
/// The whole archive is read in one forward pass. Any failure aborts the
/// call; no partial metadata is returned.
///
/// # Errors
///
/// - [`ReleaseError::ArchiveOpen`] if the source is not gzip data.
/// - [`ReleaseError::ArchiveRead`] if the archive is corrupt or truncated.
/// - [`ReleaseError::ManifestDecode`] if `release.MF` or a `job.MF` is malformed.
/// - [`ReleaseError::NestedArchiveOpen`] / [`ReleaseError::NestedArchiveRead`]
///   if a job archive is not a readable gzip tar.
/// - [`ReleaseError::JobManifestNotFound`] if a job archive has no `job.MF`.
pub fn extract_release_metadata<R: Read>(source: R) -> ReleaseResult<ReleaseMetadata> {
    let mut archive = open_gzip_tar(source).map_err(ReleaseError::ArchiveOpen)?;
    let mut metadata = ReleaseMetadata::default();
    let mut seen_release_manifest = false;

    let entries = archive.entries().map_err(ReleaseError::ArchiveRead)?;
    for entry in entries {
        let mut entry = entry.map_err(ReleaseError::ArchiveRead)?;
        let path = entry_path(&entry);

        if !is_regular(&entry) {
            trace!(path = %path, "skipping non-regular entry");
            continue;
        }

        let size = entry.size();

        if path == RELEASE_MANIFEST_PATH {
            if seen_release_manifest {
                warn!(path = %path, "duplicate release manifest, keeping the last one");
            }
            let data = read_entry(&mut entry, size).map_err(ReleaseError::ArchiveRead)?;
            metadata.manifest = decode_manifest(ManifestKind::Release, &path, &data)?;
            seen_release_manifest = true;
            debug!(release = %metadata.manifest.name, "decoded release manifest");
        } else if path.starts_with(PACKAGES_PREFIX) {
            debug!(path = %path, size, "found package");
            metadata.package_files.push(ReleaseFile::new(path, size));
        } else if path.starts_with(JOBS_PREFIX) {
            let data = read_entry(&mut entry, size).map_err(ReleaseError::ArchiveRead)?;
            let job_manifest = extract_job_manifest(&path, &data)?;
            debug!(path = %path, size, job = %job_manifest.name, "found job");

            metadata.job_files.push(ReleaseFile::new(path, size));
            metadata.job_manifests.push(job_manifest);
        } else {
            trace!(path = %path, "ignoring entry");
        }
    }

    Ok(metadata)
}

/// Read the `job.MF` of one job archive held in memory.
///
/// The first regular entry under `./job.MF` wins.
fn extract_job_manifest(job_entry: &str, data: &[u8]) -> ReleaseResult<JobManifest> {
    let nested_read = |source| ReleaseError::NestedArchiveRead {
        job_entry: job_entry.to_string(),
        source,
    };

    let mut archive = open_gzip_tar(data).map_err(|source| ReleaseError::NestedArchiveOpen {
        job_entry: job_entry.to_string(),
        source,
    })?;

    let entries = archive.entries().map_err(nested_read)?;
    for entry in entries {
        let mut entry = entry.map_err(nested_read)?;
        if !is_regular(&entry) {
            continue;
        }

        let path = entry_path(&entry);
        if !path.starts_with(JOB_MANIFEST_PREFIX) {
            continue;
        }

        let size = entry.size();
        let manifest = read_entry(&mut entry, size).map_err(nested_read)?;
        return decode_manifest(ManifestKind::Job, job_entry, &manifest);
    }

    Err(ReleaseError::JobManifestNotFound {
        job_entry: job_entry.to_string(),
    })
}

/// Check the gzip magic, then wrap the stream in a decoder and tar reader.
///
/// Every gzip member is decoded, so a stream of concatenated members reads
/// as one tar.
fn open_gzip_tar<R: Read>(mut source: R) -> io::Result<GzipTar<R>> {
    let mut magic = [0u8; 2];
    source.read_exact(&mut magic).map_err(|e| {
        io::Error::new(e.kind(), format!("unable to read gzip header: {e}"))
    })?;

    if magic != GZIP_MAGIC {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("not gzip data (magic {:02x}{:02x})", magic[0], magic[1]),
        ));
    }

    let decoder = MultiGzDecoder::new(Cursor::new(magic).chain(source));
    Ok(Archive::new(decoder))
}

/// Regular file entry. Old-style entries with a trailing `/` are directories.
fn is_regular<R: Read>(entry: &Entry<'_, R>) -> bool {
    entry.header().entry_type().is_file() && !entry.path_bytes().ends_with(b"/")
}

/// Entry path exactly as stored, including any leading `./`.
fn entry_path<R: Read>(entry: &Entry<'_, R>) -> String {
    String::from_utf8_lossy(&entry.path_bytes()).into_owned()
}

/// Read exactly `size` bytes of entry data.
fn read_entry<R: Read>(entry: &mut R, size: u64) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    entry.by_ref().take(size).read_to_end(&mut data)?;

    if data.len() as u64 != size {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("entry truncated: expected {size} bytes, got {}", data.len()),
        ));
    }

    Ok(data)
}
