//! `imagine inspect` command

use anyhow::{Context, Result};
use imagine_release::ReleaseMetadata;
use std::fmt::Write;
use std::path::Path;

pub fn run(release: &Path, json: bool) -> Result<()> {
    if !release.exists() {
        anyhow::bail!("Release archive not found: {}", release.display());
    }

    let metadata = ReleaseMetadata::open(release)
        .with_context(|| format!("Failed to read release archive: {}", release.display()))?;

    if json {
        let json =
            serde_json::to_string_pretty(&metadata).context("Failed to serialize metadata")?;
        println!("{json}");
    } else {
        print!("{}", summary(&metadata));
    }

    Ok(())
}

/// Human-readable overview of a release.
pub fn summary(metadata: &ReleaseMetadata) -> String {
    let manifest = metadata.manifest();
    let mut out = String::new();

    // Writing to a String cannot fail, so results are ignored below.
    let _ = write!(out, "Release: {}", display_or_unnamed(&manifest.name));
    if !manifest.version.is_empty() {
        let _ = write!(out, " {}", manifest.version);
    }
    if !manifest.commit_hash.is_empty() {
        let _ = write!(out, " (commit {})", manifest.commit_hash);
    }
    out.push('\n');

    let _ = writeln!(out, "\nPackages ({}):", metadata.package_files().len());
    for file in metadata.package_files() {
        let _ = write!(out, "  {} [{}]", file.name(), file.human_readable_size());
        if let Some(package) = manifest.package(file.name())
            && !package.dependencies.is_empty()
        {
            let _ = write!(out, " -> {}", package.dependencies.join(", "));
        }
        out.push('\n');
    }

    let _ = writeln!(out, "\nJobs ({}):", metadata.job_files().len());
    for (file, job) in metadata.jobs() {
        let _ = write!(out, "  {} [{}]", file.name(), file.human_readable_size());
        if !job.packages.is_empty() {
            let _ = write!(out, " uses {}", job.packages.join(", "));
        }
        out.push('\n');
    }

    let dangling = metadata.dangling_dependencies();
    if !dangling.is_empty() {
        let _ = writeln!(out, "\nDangling references ({}):", dangling.len());
        for reference in dangling {
            let kind = if reference.from_job { "job" } else { "package" };
            let _ = writeln!(out, "  {} {} -> {}", kind, reference.from, reference.to);
        }
    }

    out
}

fn display_or_unnamed(name: &str) -> &str {
    if name.is_empty() { "<unnamed>" } else { name }
}
