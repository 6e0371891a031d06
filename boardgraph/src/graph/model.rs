//! Board Graph Model
//!
//! The node/link document handed to the force-directed visualizer. Links
//! reference nodes by id; a link whose endpoint has no node is kept as-is
//! (the renderer ignores it) and can be listed with
//! [`BoardGraph::dangling_links`].

use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Node category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeGroup {
    Component,
    Pin,
}

impl std::fmt::Display for NodeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeGroup::Component => write!(f, "component"),
            NodeGroup::Pin => write!(f, "pin"),
        }
    }
}

/// Link category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkGroup {
    /// Component to one of its pins.
    #[serde(rename = "cmp-pin")]
    Containment,
    /// Pin to pin, both listed in the same net.
    #[serde(rename = "net")]
    Net,
}

impl std::fmt::Display for LinkGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkGroup::Containment => write!(f, "cmp-pin"),
            LinkGroup::Net => write!(f, "net"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    /// Display label.
    pub name: String,
    pub group: NodeGroup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub group: LinkGroup,
}

/// Nodes and links derived from one board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl BoardGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn links_in(&self, group: LinkGroup) -> impl Iterator<Item = &GraphLink> {
        self.links.iter().filter(move |l| l.group == group)
    }

    pub fn nodes_in(&self, group: NodeGroup) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(move |n| n.group == group)
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn node_ids(&self) -> HashSet<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    /// Links with a source or target that matches no node.
    pub fn dangling_links(&self) -> Vec<&GraphLink> {
        let ids = self.node_ids();
        self.links
            .iter()
            .filter(|l| !ids.contains(l.source.as_str()) || !ids.contains(l.target.as_str()))
            .collect()
    }

    /// Node ids emitted more than once, in first-seen order.
    ///
    /// Happens with repeated pin labels, repeated component names, or when
    /// unescaped names contain the `-` separator and two (component, pin)
    /// pairs concatenate to the same id.
    pub fn duplicate_node_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for node in &self.nodes {
            let id = node.id.as_str();
            if !seen.insert(id) && reported.insert(id) {
                duplicates.push(id);
            }
        }
        duplicates
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            component_nodes: self.nodes_in(NodeGroup::Component).count(),
            pin_nodes: self.nodes_in(NodeGroup::Pin).count(),
            containment_links: self.links_in(LinkGroup::Containment).count(),
            net_links: self.links_in(LinkGroup::Net).count(),
            dangling_links: self.dangling_links().len(),
        }
    }

    /// Resolvable part of the graph as a petgraph `DiGraph`.
    ///
    /// Each id maps to the first node that carries it; links with an
    /// unresolved endpoint are skipped.
    pub fn to_petgraph(&self) -> DiGraph<GraphNode, LinkGroup> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.links.len());
        let mut indices: HashMap<&str, NodeIndex> = HashMap::new();

        for node in &self.nodes {
            if !indices.contains_key(node.id.as_str()) {
                let idx = graph.add_node(node.clone());
                indices.insert(node.id.as_str(), idx);
            }
        }

        for link in &self.links {
            if let (Some(&from), Some(&to)) = (
                indices.get(link.source.as_str()),
                indices.get(link.target.as_str()),
            ) {
                graph.add_edge(from, to, link.group);
            }
        }

        graph
    }

    /// Number of weakly connected groups among resolvable nodes.
    pub fn connected_groups(&self) -> usize {
        petgraph::algo::connected_components(&self.to_petgraph())
    }
}

/// Counts reported alongside a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub component_nodes: usize,
    pub pin_nodes: usize,
    pub containment_links: usize,
    pub net_links: usize,
    pub dangling_links: usize,
}

impl GraphStats {
    pub fn total_nodes(&self) -> usize {
        self.component_nodes + self.pin_nodes
    }

    pub fn total_links(&self) -> usize {
        self.containment_links + self.net_links
    }
}
