//! Board Graph Builder
//!
//! Turns a board into nodes and links in two passes:
//!
//! 1. Every component becomes a node, followed by a node and a containment
//!    link for each of its pins.
//! 2. Every net is expanded pairwise: for pin positions `i < j` a net link
//!    runs from pin `i` to pin `j`, so a net of `k` pins yields `k(k-1)/2`
//!    links. Repeated references still pair by position.
//!
//! The builder trusts its input. It does not look up whether a net's
//! references exist among the components; such links simply point at ids
//! that have no node.

use serde_json::Value;
use std::collections::HashSet;

use super::model::{BoardGraph, GraphLink, GraphNode, LinkGroup, NodeGroup};
use crate::core::BoardGraphError;
use crate::schema::{Board, PinRef};

/// How names and pin labels are turned into node ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdEncoding {
    /// Plain concatenation: `Comp-<name>`, `Pin-<name>-<pin>`. Compatible with
    /// existing renderers, but `("A-B", "C")` and `("A", "B-C")` share an id.
    #[default]
    Legacy,
    /// Backslash-escapes `\`, `-` and `.` inside names and labels so that
    /// distinct pairs always get distinct ids.
    Escaped,
}

/// Options for a graph build.
#[derive(Clone, Debug, Default)]
pub struct GraphOptions {
    pub id_encoding: IdEncoding,
    /// Drop net links whose endpoints were not declared by any component.
    pub skip_dangling_links: bool,
}

fn encode(part: &str, encoding: IdEncoding) -> std::borrow::Cow<'_, str> {
    match encoding {
        IdEncoding::Legacy => part.into(),
        IdEncoding::Escaped => {
            if !part.contains(['\\', '-', '.']) {
                return part.into();
            }
            let mut out = String::with_capacity(part.len() + 4);
            for c in part.chars() {
                if matches!(c, '\\' | '-' | '.') {
                    out.push('\\');
                }
                out.push(c);
            }
            out.into()
        }
    }
}

/// Id of the node for component `name`.
pub fn component_id(name: &str, encoding: IdEncoding) -> String {
    format!("Comp-{}", encode(name, encoding))
}

/// Id of the node for pin `pin` of component `component`.
pub fn pin_id(component: &str, pin: &str, encoding: IdEncoding) -> String {
    format!("Pin-{}-{}", encode(component, encoding), encode(pin, encoding))
}

/// Display label of a pin node.
pub fn pin_label(component: &str, pin: &str) -> String {
    format!("{}.{}", component, pin)
}

/// Build the graph for `board` with default options.
pub fn build_graph(board: &Board) -> BoardGraph {
    build_graph_with(board, &GraphOptions::default())
}

/// Build the graph for a raw JSON board.
///
/// Callers are expected to run [`crate::validator::validate`] first. A value
/// that does not even decode into a [`Board`] is returned as an error instead
/// of producing a partial graph.
pub fn build_graph_from_value(raw: &Value) -> Result<BoardGraph, BoardGraphError> {
    let board: Board = serde::Deserialize::deserialize(raw)?;
    Ok(build_graph(&board))
}

pub fn build_graph_with(board: &Board, options: &GraphOptions) -> BoardGraph {
    let encoding = options.id_encoding;
    let net_link_total: usize = board.nets.iter().map(|n| n.link_count()).sum();
    let mut graph = BoardGraph {
        nodes: Vec::with_capacity(board.components.len() + board.pin_count()),
        links: Vec::with_capacity(board.pin_count() + net_link_total),
    };
    let mut declared_pins: HashSet<String> = HashSet::new();

    for component in &board.components {
        let comp_id = component_id(&component.name, encoding);
        graph.nodes.push(GraphNode {
            id: comp_id.clone(),
            name: component.name.clone(),
            group: NodeGroup::Component,
        });

        for pin in &component.pins {
            let id = pin_id(&component.name, pin, encoding);
            graph.nodes.push(GraphNode {
                id: id.clone(),
                name: pin_label(&component.name, pin),
                group: NodeGroup::Pin,
            });
            graph.links.push(GraphLink {
                source: comp_id.clone(),
                target: id.clone(),
                group: LinkGroup::Containment,
            });
            if options.skip_dangling_links {
                declared_pins.insert(id);
            }
        }
    }

    let mut skipped = 0usize;
    for net in &board.nets {
        let ids: Vec<String> = net
            .pin_refs()
            .map(|PinRef { component, pin }| pin_id(component, pin, encoding))
            .collect();

        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                if options.skip_dangling_links
                    && !(declared_pins.contains(&ids[i]) && declared_pins.contains(&ids[j]))
                {
                    skipped += 1;
                    continue;
                }
                graph.links.push(GraphLink {
                    source: ids[i].clone(),
                    target: ids[j].clone(),
                    group: LinkGroup::Net,
                });
            }
        }
    }

    if skipped > 0 {
        tracing::debug!("Skipped {} net link(s) with undeclared pins", skipped);
    }
    tracing::debug!(
        "Built graph for board '{}': {} nodes, {} links",
        board.name,
        graph.nodes.len(),
        graph.links.len()
    );

    graph
}
