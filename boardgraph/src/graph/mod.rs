//! Board graph derivation.
//!
//! [`builder`] expands a board into component/pin nodes and containment/net
//! links; [`model`] holds the resulting document plus the queries used for
//! reporting (stats, dangling links, duplicate ids, petgraph view).

pub mod builder;
pub mod model;

pub use builder::{
    build_graph, build_graph_from_value, build_graph_with, component_id, pin_id, pin_label,
    GraphOptions, IdEncoding,
};
pub use model::{BoardGraph, GraphLink, GraphNode, GraphStats, LinkGroup, NodeGroup};
