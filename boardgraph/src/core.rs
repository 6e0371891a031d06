//! Core inspection flow shared by the CLI and any embedding service.
//! Sequences validation and graph building; holds no state between calls.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::graph::{build_graph_with, pin_id, BoardGraph, GraphOptions, GraphStats};
use crate::schema::{Board, BoardDocument};
use crate::validator::{validate_board, Violation};

#[derive(Debug, thiserror::Error)]
pub enum BoardGraphError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid board: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Options for an inspection run (CLI or service).
#[derive(Clone, Debug, Default)]
pub struct InspectOptions {
    pub graph: GraphOptions,
    /// Treat net references to undeclared pins as failures.
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A net lists a pin that no component declares.
    DanglingReference,
    /// Two nodes were given the same id.
    DuplicateNodeId,
}

/// Connectivity finding on a structurally valid board. These never make the
/// board invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphDiagnostic {
    pub kind: DiagnosticKind,
    pub subject: String,
    pub message: String,
}

/// Validation outcome plus, for valid boards, the derived graph.
#[derive(Debug, Clone, Serialize)]
pub struct BoardReport {
    pub name: String,
    /// `"[<path>] <message>"` lines; empty when the board is valid.
    pub validation: Vec<String>,
    pub violations: Vec<Violation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<BoardGraph>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<GraphStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected_groups: Option<usize>,
    pub diagnostics: Vec<GraphDiagnostic>,
    #[serde(skip)]
    strict: bool,
}

impl BoardReport {
    pub fn is_valid(&self) -> bool {
        self.validation.is_empty()
    }

    pub fn dangling_references(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::DanglingReference)
            .count()
    }

    /// False when validation failed, or in strict mode when a net references
    /// an undeclared pin.
    pub fn passes(&self) -> bool {
        self.is_valid() && !(self.strict && self.dangling_references() > 0)
    }
}

/// Read a board JSON file from disk.
pub fn load_board_value(path: &Path) -> Result<Value, BoardGraphError> {
    let text = std::fs::read_to_string(path)?;
    parse_board_str(&text)
}

pub fn parse_board_str(text: &str) -> Result<Value, BoardGraphError> {
    Ok(serde_json::from_str(text)?)
}

/// Validation-then-graph sequencing used by both CLI and services.
pub struct BoardInspector;

impl BoardInspector {
    /// Inspect an uploaded body (bare board or `{ "json": .., "name": .. }`).
    pub fn inspect_value(
        body: Value,
        options: &InspectOptions,
    ) -> Result<BoardReport, BoardGraphError> {
        Self::inspect(&BoardDocument::from_upload(body), options)
    }

    pub fn inspect_file(
        path: &Path,
        options: &InspectOptions,
    ) -> Result<BoardReport, BoardGraphError> {
        Self::inspect_value(load_board_value(path)?, options)
    }

    pub fn inspect(
        doc: &BoardDocument,
        options: &InspectOptions,
    ) -> Result<BoardReport, BoardGraphError> {
        let violations = validate_board(&doc.json);
        let validation: Vec<String> = violations.iter().map(ToString::to_string).collect();

        let mut report = BoardReport {
            name: doc.name.clone(),
            validation,
            violations,
            graph: None,
            stats: None,
            connected_groups: None,
            diagnostics: Vec::new(),
            strict: options.strict,
        };

        if !report.is_valid() {
            tracing::debug!(
                "Board '{}' failed validation with {} issue(s); graph not built",
                doc.name,
                report.validation.len()
            );
            return Ok(report);
        }

        let board = doc.to_board()?;
        let graph = build_graph_with(&board, &options.graph);
        report.diagnostics = collect_diagnostics(&board, &graph, &options.graph);
        report.stats = Some(graph.stats());
        report.connected_groups = Some(graph.connected_groups());
        report.graph = Some(graph);

        Ok(report)
    }

    /// Build the graph for a body, refusing boards that fail validation.
    pub fn graph_for(body: Value, options: &GraphOptions) -> Result<BoardGraph, BoardGraphError> {
        let doc = BoardDocument::from_upload(body);
        let validation: Vec<String> = validate_board(&doc.json)
            .iter()
            .map(ToString::to_string)
            .collect();
        if !validation.is_empty() {
            return Err(BoardGraphError::Invalid(validation));
        }
        let board = doc.to_board()?;
        Ok(build_graph_with(&board, options))
    }
}

fn collect_diagnostics(
    board: &Board,
    graph: &BoardGraph,
    options: &GraphOptions,
) -> Vec<GraphDiagnostic> {
    let mut diagnostics = Vec::new();
    let declared: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();

    for net in &board.nets {
        let mut reported = HashSet::new();
        for pin_ref in net.pin_refs() {
            let id = pin_id(pin_ref.component, pin_ref.pin, options.id_encoding);
            if !declared.contains(id.as_str()) && reported.insert(id) {
                tracing::warn!("Net '{}' references undeclared pin '{}'", net.name, pin_ref);
                diagnostics.push(GraphDiagnostic {
                    kind: DiagnosticKind::DanglingReference,
                    subject: net.name.clone(),
                    message: format!("Net '{}' references undeclared pin '{}'", net.name, pin_ref),
                });
            }
        }
    }

    for id in graph.duplicate_node_ids() {
        tracing::warn!("Node id '{}' is produced more than once", id);
        diagnostics.push(GraphDiagnostic {
            kind: DiagnosticKind::DuplicateNodeId,
            subject: id.to_string(),
            message: format!("Node id '{}' is produced more than once", id),
        });
    }

    diagnostics
}
