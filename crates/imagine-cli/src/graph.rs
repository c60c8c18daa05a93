//! `imagine graph` command

use anyhow::{Context, Result};
use imagine_graph::{GraphConfig, render_dot};
use imagine_release::ReleaseMetadata;
use std::path::Path;
use tracing::info;

pub fn run(release: &Path, output: Option<&Path>, config: Option<&Path>) -> Result<()> {
    if !release.exists() {
        anyhow::bail!("Release archive not found: {}", release.display());
    }

    let config = match config {
        Some(path) => GraphConfig::from_file(path)
            .with_context(|| format!("Failed to load graph config: {}", path.display()))?,
        None => GraphConfig::default(),
    };

    let metadata = ReleaseMetadata::open(release)
        .with_context(|| format!("Failed to read release archive: {}", release.display()))?;

    let dot = render_dot(&metadata, &config);

    match output {
        Some(path) => {
            std::fs::write(path, &dot)
                .with_context(|| format!("Failed to write graph: {}", path.display()))?;
            info!(path = %path.display(), "wrote graph");
        }
        None => print!("{dot}"),
    }

    Ok(())
}
