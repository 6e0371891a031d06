//! Graph builder tests against the documented board scenarios

use boardgraph::prelude::*;
use boardgraph::{build_graph_from_value, LinkGroup, NodeGroup};
use serde_json::json;

fn link_pairs(graph: &BoardGraph, group: LinkGroup) -> Vec<(String, String)> {
    graph
        .links
        .iter()
        .filter(|l| l.group == group)
        .map(|l| (l.source.clone(), l.target.clone()))
        .collect()
}

#[test]
fn test_single_pin_net_board() {
    let raw = json!({
        "name": "B1",
        "components": [{ "name": "R1", "pins": ["1", "2"] }],
        "nets": [{ "name": "GND", "pins": ["R1.1"] }]
    });
    assert!(validate(&raw).is_empty());

    let graph = build_graph_from_value(&raw).expect("Should build");
    let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["Comp-R1", "Pin-R1-1", "Pin-R1-2"]);
    assert_eq!(
        link_pairs(&graph, LinkGroup::Containment),
        vec![
            ("Comp-R1".to_string(), "Pin-R1-1".to_string()),
            ("Comp-R1".to_string(), "Pin-R1-2".to_string()),
        ]
    );
    assert!(link_pairs(&graph, LinkGroup::Net).is_empty());
}

#[test]
fn test_three_pin_net_board() {
    let raw = json!({
        "name": "B2",
        "components": [
            { "name": "R1", "pins": ["1", "2"] },
            { "name": "C1", "pins": ["A", "B"] }
        ],
        "nets": [{ "name": "SIG", "pins": ["R1.1", "C1.A", "C1.B"] }]
    });
    let graph = build_graph_from_value(&raw).unwrap();

    assert_eq!(link_pairs(&graph, LinkGroup::Net).len(), 3);
    assert_eq!(graph.nodes_in(NodeGroup::Component).count(), 2);
    assert_eq!(graph.nodes_in(NodeGroup::Pin).count(), 4);
}

#[test]
fn test_graph_json_shape() {
    let raw = json!({
        "name": "B",
        "components": [{ "name": "R1", "pins": ["1", "2"] }],
        "nets": [{ "name": "N", "pins": ["R1.1", "R1.2"] }]
    });
    let graph = build_graph_from_value(&raw).unwrap();

    assert_eq!(
        serde_json::to_value(&graph).unwrap(),
        json!({
            "nodes": [
                { "id": "Comp-R1", "name": "R1", "group": "component" },
                { "id": "Pin-R1-1", "name": "R1.1", "group": "pin" },
                { "id": "Pin-R1-2", "name": "R1.2", "group": "pin" }
            ],
            "links": [
                { "source": "Comp-R1", "target": "Pin-R1-1", "group": "cmp-pin" },
                { "source": "Comp-R1", "target": "Pin-R1-2", "group": "cmp-pin" },
                { "source": "Pin-R1-1", "target": "Pin-R1-2", "group": "net" }
            ]
        })
    );
}

#[test]
fn test_graph_json_reads_back() {
    let board = Board::new("B")
        .with_component(boardgraph::Component::new("U1", ["1", "2", "3"]))
        .with_net(boardgraph::Net::new("N", ["U1.1", "U1.3"]));
    let graph = build_graph(&board);

    let text = serde_json::to_string(&graph).unwrap();
    let parsed: BoardGraph = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, graph);
}
