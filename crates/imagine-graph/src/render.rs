//! Release metadata to DOT graph.

use crate::{Digraph, Edge, GraphConfig, Node, Subgraph, attributes};
use imagine_release::{ReleaseFile, ReleaseMetadata};
use tracing::debug;

const PACKAGES_GROUP: &str = "packages";
const JOBS_GROUP: &str = "jobs";

/// Node id of a package.
#[must_use]
pub fn package_node_id(name: &str) -> String {
    format!("{PACKAGES_GROUP}-{name}")
}

/// Node id of a job.
#[must_use]
pub fn job_node_id(name: &str) -> String {
    format!("{JOBS_GROUP}-{name}")
}

/// Build the dependency graph of a release.
///
/// Packages and jobs each get a cluster with one node per archive file.
/// Edges run from every job to the packages its `job.MF` lists and, unless
/// disabled in `config`, from every package to its declared dependencies.
/// Edges may point at ids that have no node; DOT creates those implicitly.
#[must_use]
pub fn render_graph(metadata: &ReleaseMetadata, config: &GraphConfig) -> Digraph {
    let mut graph = Digraph {
        name: metadata.manifest().name.clone(),
        attrs: attributes::graph(config),
        subgraphs: vec![
            group_cluster(PACKAGES_GROUP, metadata.package_files(), config),
            group_cluster(JOBS_GROUP, metadata.job_files(), config),
        ],
        edges: Vec::new(),
    };

    for job in metadata.job_manifests() {
        for package in &job.packages {
            graph.edges.push(Edge {
                from: job_node_id(&job.name),
                to: package_node_id(package),
                attrs: attributes::job_to_package_edge(),
            });
        }
    }

    if config.package_dependencies {
        for package in &metadata.manifest().packages {
            for dependency in &package.dependencies {
                graph.edges.push(Edge {
                    from: package_node_id(&package.name),
                    to: package_node_id(dependency),
                    attrs: attributes::package_to_package_edge(),
                });
            }
        }
    }

    debug!(
        release = %graph.name,
        nodes = graph.node_count(),
        edges = graph.edges.len(),
        "rendered release graph"
    );

    graph
}

/// Render the dependency graph of a release as DOT source.
#[must_use]
pub fn render_dot(metadata: &ReleaseMetadata, config: &GraphConfig) -> String {
    render_graph(metadata, config).to_string()
}

fn group_cluster(group: &str, files: &[ReleaseFile], config: &GraphConfig) -> Subgraph {
    let nodes = files
        .iter()
        .map(|file| Node {
            id: format!("{group}-{}", file.name()),
            attrs: attributes::file_node(
                file.name(),
                &file.human_readable_size(),
                &config.node_font_size,
            ),
        })
        .collect();

    Subgraph {
        name: format!("cluster_{group}"),
        attrs: attributes::cluster(group, &config.cluster_font_size),
        subgraphs: vec![Subgraph {
            name: format!("same_rank_{group}"),
            attrs: attributes::same_rank(),
            subgraphs: Vec::new(),
            nodes,
        }],
        nodes: Vec::new(),
    }
}
