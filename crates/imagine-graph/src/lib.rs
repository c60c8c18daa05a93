//! imagine-graph - Graphviz rendering for release metadata
//!
//! This crate provides:
//! - [`render_dot`] to turn a [`ReleaseMetadata`] into a DOT document
//! - [`GraphConfig`] for layout and styling options
//! - [`attributes`] with the pure node, edge, and cluster styling functions
//!
//! [`ReleaseMetadata`]: imagine_release::ReleaseMetadata

pub mod attributes;
mod config;
mod dot;
mod render;

pub use config::{ConfigError, GraphConfig};
pub use dot::{Attrs, Digraph, Edge, Node, Subgraph, escape_id};
pub use render::{job_node_id, package_node_id, render_dot, render_graph};
