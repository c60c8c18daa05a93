//! Styling attributes for release graphs.
//!
//! Every function here is pure: the same arguments always produce the same
//! attribute list, and nothing is shared between calls.

use crate::{Attrs, GraphConfig};

/// Graph-level layout attributes.
#[must_use]
pub fn graph(config: &GraphConfig) -> Attrs {
    Attrs::from([
        ("rankdir", config.rankdir.clone()),
        ("nodesep", config.nodesep.clone()),
        ("ranksep", config.ranksep.clone()),
    ])
}

/// Attributes of a labelled group cluster.
#[must_use]
pub fn cluster(label: &str, font_size: &str) -> Attrs {
    let mut attrs = same_rank();
    attrs.insert("color", "blue".to_string());
    attrs.insert("style", "rounded".to_string());
    attrs.insert("label", label.to_string());
    attrs.insert("fontsize", font_size.to_string());
    attrs
}

/// Attributes of the subgraph that keeps a group on one rank.
#[must_use]
pub fn same_rank() -> Attrs {
    Attrs::from([("rank", "same".to_string())])
}

/// Attributes of a package or job node: a record showing name and size.
#[must_use]
pub fn file_node(name: &str, size: &str, font_size: &str) -> Attrs {
    Attrs::from([
        ("shape", "Mrecord".to_string()),
        ("style", "striped".to_string()),
        ("color", "#ff000022;0.3:blue:yellow".to_string()),
        ("label", format!("{{ {name} | {size} }}")),
        ("fontsize", font_size.to_string()),
    ])
}

/// Attributes of a job -> package edge.
#[must_use]
pub fn job_to_package_edge() -> Attrs {
    Attrs::from([
        ("arrowhead", "vee".to_string()),
        ("tailport", "e".to_string()),
        ("headport", "_w".to_string()),
    ])
}

/// Attributes of a package -> package dependency edge.
#[must_use]
pub fn package_to_package_edge() -> Attrs {
    let mut attrs = job_to_package_edge();
    attrs.insert("headport", "_e".to_string());
    attrs.insert("color", "red".to_string());
    attrs.insert("constraint", "true".to_string());
    attrs
}
