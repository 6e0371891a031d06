//! BoardGraph - circuit board description validation and graph derivation
//!
//! This library checks user-supplied board JSON (components, pins, nets) for
//! structural problems and turns valid boards into a node/link graph for
//! force-directed visualizers.
//!
//! # Quick Start
//!
//! ```
//! use boardgraph::{build_graph, validate, Board};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "name": "B1",
//!     "components": [{ "name": "R1", "pins": ["1", "2"] }],
//!     "nets": [{ "name": "GND", "pins": ["R1.1"] }]
//! });
//!
//! assert!(validate(&raw).is_empty());
//!
//! let board: Board = serde_json::from_value(raw).unwrap();
//! let graph = build_graph(&board);
//! assert_eq!(graph.nodes.len(), 3);
//! ```
//!
//! # Features
//!
//! - **Validation**: every violation, path-qualified (`[components[2].pins] ...`)
//! - **Graph building**: component/pin nodes, containment and pairwise net links
//! - **Inspection**: upload envelopes, naming, dangling-reference and id-collision diagnostics

pub mod core;
pub mod graph;
pub mod schema;
pub mod validator;

// Re-export main types
pub use crate::core::{
    load_board_value, parse_board_str, BoardGraphError, BoardInspector, BoardReport,
    DiagnosticKind, GraphDiagnostic, InspectOptions,
};
pub use graph::{
    build_graph, build_graph_from_value, build_graph_with, BoardGraph, GraphLink, GraphNode,
    GraphOptions, GraphStats, IdEncoding, LinkGroup, NodeGroup,
};
pub use schema::{Board, BoardDocument, Component, Net, PinRef};
pub use validator::{validate, validate_board, FieldPath, Violation, ViolationKind};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        build_graph, validate, Board, BoardGraph, BoardGraphError, BoardInspector, BoardReport,
        GraphOptions, InspectOptions, Violation,
    };
}
