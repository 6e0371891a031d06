//! Simple validation example: validate a board JSON file and print its graph summary.

use boardgraph::prelude::*;
use std::path::Path;

fn main() -> Result<(), BoardGraphError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "boardgraph/tests/fixtures/valid_board.json".to_string());
    let path = Path::new(&path);

    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        eprintln!("Usage: cargo run --example simple_validation [path/to/board.json]");
        std::process::exit(1);
    }

    let report = BoardInspector::inspect_file(path, &InspectOptions::default())?;

    println!("Board: {}", report.name);

    if !report.is_valid() {
        println!("Validation failed:");
        for message in &report.validation {
            println!("  - {}", message);
        }
        std::process::exit(1);
    }

    if let Some(stats) = report.stats {
        println!(
            "Nodes: {} ({} components, {} pins)",
            stats.total_nodes(),
            stats.component_nodes,
            stats.pin_nodes
        );
        println!(
            "Links: {} ({} containment, {} net)",
            stats.total_links(),
            stats.containment_links,
            stats.net_links
        );
    }
    for diagnostic in &report.diagnostics {
        println!("  note: {}", diagnostic.message);
    }

    println!("\nValidation passed.");
    Ok(())
}
