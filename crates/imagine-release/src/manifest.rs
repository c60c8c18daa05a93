//! Manifest schemas for release archives.
//!
//! Two YAML documents are decoded: `release.MF` at the archive root and
//! `job.MF` inside every job archive. Decoding is pure; no I/O happens here.

use crate::{JOB_MANIFEST_PREFIX, ManifestKind, RELEASE_MANIFEST_PATH, ReleaseError, ReleaseResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Release manifest - the root descriptor of a release archive.
///
/// This corresponds to the `release.MF` file in the archive root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseManifest {
    /// Release name (e.g., "redis").
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Release version.
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,

    /// Commit the release was built from.
    #[serde(default, deserialize_with = "null_as_default")]
    pub commit_hash: String,

    /// Packages in declaration order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub packages: Vec<PackageDeclaration>,

    /// Jobs in declaration order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub jobs: Vec<JobDeclaration>,
}

/// A package entry of `release.MF`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDeclaration {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub sha1: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub fingerprint: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,

    /// Names of packages this package depends on. Names need not be
    /// declared anywhere else in the manifest.
    #[serde(default, deserialize_with = "null_as_default")]
    pub dependencies: Vec<String>,
}

/// A job entry of `release.MF`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDeclaration {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub sha1: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub fingerprint: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
}

/// Job manifest - the `job.MF` file embedded in a job archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobManifest {
    /// Job name as written in its own manifest. Not reconciled with the
    /// name in `release.MF`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Packages the job uses at runtime.
    #[serde(default, deserialize_with = "null_as_default")]
    pub packages: Vec<String>,
}

impl ReleaseManifest {
    /// Create a manifest with only a release name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Find a declared package by name.
    #[must_use]
    pub fn package(&self, name: &str) -> Option<&PackageDeclaration> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> ReleaseResult<String> {
        encode_manifest(ManifestKind::Release, self)
    }
}

impl PackageDeclaration {
    /// Create a package declaration with a name and dependency list.
    #[must_use]
    pub fn new(name: &str, dependencies: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            dependencies: dependencies.iter().map(|d| (*d).to_string()).collect(),
            ..Self::default()
        }
    }
}

impl JobDeclaration {
    /// Create a job declaration with only a name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

impl JobManifest {
    /// Create a job manifest.
    #[must_use]
    pub fn new(name: &str, packages: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            packages: packages.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> ReleaseResult<String> {
        encode_manifest(ManifestKind::Job, self)
    }
}

/// Decode a `release.MF` document.
pub fn decode_release_manifest(bytes: &[u8]) -> ReleaseResult<ReleaseManifest> {
    decode_manifest(ManifestKind::Release, RELEASE_MANIFEST_PATH, bytes)
}

/// Decode a `job.MF` document.
pub fn decode_job_manifest(bytes: &[u8]) -> ReleaseResult<JobManifest> {
    decode_manifest(ManifestKind::Job, JOB_MANIFEST_PREFIX, bytes)
}

/// Decode a manifest, attributing failures to `entry`.
///
/// An empty or whitespace-only document yields the zero value.
pub(crate) fn decode_manifest<T>(kind: ManifestKind, entry: &str, bytes: &[u8]) -> ReleaseResult<T>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_yaml::from_slice(bytes).map_err(|source| ReleaseError::ManifestDecode {
        kind,
        entry: entry.to_string(),
        source,
    })
}

fn encode_manifest<T: Serialize>(kind: ManifestKind, manifest: &T) -> ReleaseResult<String> {
    serde_yaml::to_string(manifest).map_err(|source| ReleaseError::ManifestEncode { kind, source })
}

/// Treat an explicit YAML null like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
#[path = "manifest/manifest_tests.rs"]
mod manifest_tests;
