//! Release archive metadata extraction
//!
//! This crate reads packaged release tarballs (`.tgz`) and builds an
//! in-memory model of their packages, jobs, and dependency edges.
//!
//! # Archive Structure
//!
//! ```text
//! my-release-1.0.0.tgz
//! ├── ./release.MF               # release manifest (YAML)
//! ├── ./packages/
//! │   ├── libA.tgz               # opaque package payloads
//! │   └── libB.tgz
//! └── ./jobs/
//!     └── worker.tgz             # nested gzip tar
//!         └── ./job.MF           # job manifest (YAML)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use imagine_release::ReleaseMetadata;
//!
//! let metadata = ReleaseMetadata::open("my-release-1.0.0.tgz")?;
//! println!("release: {}", metadata.manifest().name);
//!
//! for job in metadata.job_manifests() {
//!     println!("{} uses {:?}", job.name, job.packages);
//! }
//! # Ok::<(), imagine_release::ReleaseError>(())
//! ```

mod error;
mod file;
mod manifest;

pub mod builder;
pub mod extractor;

pub use builder::ReleaseBuilder;
pub use error::{ManifestKind, ReleaseError};
pub use extractor::{DanglingReference, ReleaseMetadata, extract_release_metadata};
pub use file::{ReleaseFile, format_size};
pub use manifest::{
    JobDeclaration, JobManifest, PackageDeclaration, ReleaseManifest, decode_job_manifest,
    decode_release_manifest,
};

/// Result type for release operations.
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Path of the release manifest inside the outer archive.
pub const RELEASE_MANIFEST_PATH: &str = "./release.MF";

/// Path prefix of package payload entries.
pub const PACKAGES_PREFIX: &str = "./packages";

/// Path prefix of job archive entries.
pub const JOBS_PREFIX: &str = "./jobs";

/// Path prefix of the job manifest inside a job archive.
pub const JOB_MANIFEST_PREFIX: &str = "./job.MF";
