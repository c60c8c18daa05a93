//! Minimal DOT document model.
//!
//! Only the subset needed for release graphs: one directed graph with
//! attributes, nested subgraphs holding nodes, and top-level edges.

use std::collections::BTreeMap;
use std::fmt::{self, Write};

/// Attribute list, emitted sorted by key.
pub type Attrs = BTreeMap<&'static str, String>;

/// Keywords that must be quoted when used as identifiers.
const KEYWORDS: [&str; 6] = ["node", "edge", "graph", "digraph", "subgraph", "strict"];

/// A directed graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Digraph {
    pub name: String,
    pub attrs: Attrs,
    pub subgraphs: Vec<Subgraph>,
    pub edges: Vec<Edge>,
}

/// A subgraph or cluster (`cluster_` name prefix).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subgraph {
    pub name: String,
    pub attrs: Attrs,
    pub subgraphs: Vec<Subgraph>,
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub attrs: Attrs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub attrs: Attrs,
}

impl Digraph {
    /// Total number of nodes across all subgraphs.
    #[must_use]
    pub fn node_count(&self) -> usize {
        fn count(subgraphs: &[Subgraph]) -> usize {
            subgraphs
                .iter()
                .map(|s| s.nodes.len() + count(&s.subgraphs))
                .sum()
        }
        count(&self.subgraphs)
    }
}

impl fmt::Display for Digraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            writeln!(f, "digraph {{")?;
        } else {
            writeln!(f, "digraph {} {{", escape_id(&self.name))?;
        }

        for (key, value) in &self.attrs {
            writeln!(f, "\t{key}={};", escape_id(value))?;
        }
        for subgraph in &self.subgraphs {
            write_subgraph(f, subgraph, 1)?;
        }
        for edge in &self.edges {
            writeln!(
                f,
                "\t{}->{}{};",
                escape_id(&edge.from),
                escape_id(&edge.to),
                attr_list(&edge.attrs)
            )?;
        }

        writeln!(f, "}}")
    }
}

fn write_subgraph(f: &mut fmt::Formatter<'_>, subgraph: &Subgraph, depth: usize) -> fmt::Result {
    let indent = "\t".repeat(depth);

    writeln!(f, "{indent}subgraph {} {{", escape_id(&subgraph.name))?;
    for (key, value) in &subgraph.attrs {
        writeln!(f, "{indent}\t{key}={};", escape_id(value))?;
    }
    for nested in &subgraph.subgraphs {
        write_subgraph(f, nested, depth + 1)?;
    }
    for node in &subgraph.nodes {
        writeln!(f, "{indent}\t{}{};", escape_id(&node.id), attr_list(&node.attrs))?;
    }
    writeln!(f, "{indent}}}")
}

/// Render ` [ k=v, k=v ]`, or nothing for an empty list.
fn attr_list(attrs: &Attrs) -> String {
    if attrs.is_empty() {
        return String::new();
    }

    let mut out = String::from(" [ ");
    for (i, (key, value)) in attrs.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        // Writing to a String cannot fail.
        let _ = write!(out, "{key}={}", escape_id(value));
    }
    out.push_str(" ]");
    out
}

/// Quote a DOT identifier unless it can stand bare.
///
/// Alphanumeric identifiers (not starting with a digit) and numerals are
/// returned as-is; everything else is double-quoted with `"` escaped.
#[must_use]
pub fn escape_id(id: &str) -> String {
    if is_bare_identifier(id) || is_numeral(id) {
        return id.to_string();
    }

    format!("\"{}\"", id.replace('"', "\\\""))
}

fn is_bare_identifier(id: &str) -> bool {
    let mut chars = id.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii();
    let starts_ok = first.is_ascii_alphabetic() || first == '_' || !first.is_ascii();

    starts_ok
        && chars.all(is_word)
        && !KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(id))
}

fn is_numeral(id: &str) -> bool {
    let digits = id.strip_prefix('-').unwrap_or(id);
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

    match digits.split_once('.') {
        None => !digits.is_empty() && all_digits(digits),
        Some((int, frac)) => {
            all_digits(int) && all_digits(frac) && !(int.is_empty() && frac.is_empty())
        }
    }
}
