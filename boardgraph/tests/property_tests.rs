//! Property tests: validator robustness on arbitrary JSON and graph count invariants

use boardgraph::{build_graph, validate, Board, Component, LinkGroup, Net, NodeGroup};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn label() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_]{1,4}"
}

fn component() -> impl Strategy<Value = Component> {
    (label(), prop::collection::vec(label(), 1..6)).prop_map(|(name, pins)| Component { name, pins })
}

fn net() -> impl Strategy<Value = Net> {
    (
        label(),
        prop::collection::vec((label(), label()), 1..7),
    )
        .prop_map(|(name, refs)| Net {
            name,
            pins: refs.into_iter().map(|(c, p)| format!("{}.{}", c, p)).collect(),
        })
}

fn board() -> impl Strategy<Value = Board> {
    (
        label(),
        prop::collection::vec(component(), 1..6),
        prop::collection::vec(net(), 1..5),
    )
        .prop_map(|(name, components, nets)| Board {
            name,
            components,
            nets,
        })
}

fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("name".to_string()),
        Just("components".to_string()),
        Just("nets".to_string()),
        Just("pins".to_string()),
        "[a-z]{0,3}",
    ]
}

/// Arbitrary JSON trees, biased toward board-shaped keys so the nested checks run.
fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
        "[A-Za-z0-9.]{0,4}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((key(), inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

proptest! {
    #[test]
    fn validate_handles_any_json(raw in json_value()) {
        let first = validate(&raw);
        let second = validate(&raw);
        prop_assert_eq!(&first, &second);
        for message in &first {
            prop_assert!(message.starts_with('['), "Message should carry a path: {}", message);
        }
    }

    #[test]
    fn non_object_roots_get_one_root_message(raw in json_value()) {
        prop_assume!(!raw.is_object());
        let messages = validate(&raw);
        prop_assert_eq!(messages.len(), 1);
        prop_assert!(messages[0].starts_with("[(root)] Expected object, received "));
    }


    #[test]
    fn generated_boards_validate(board in board()) {
        let raw = serde_json::to_value(&board).unwrap();
        prop_assert!(validate(&raw).is_empty());
    }

    #[test]
    fn node_and_containment_counts(board in board()) {
        let graph = build_graph(&board);
        let pins: usize = board.components.iter().map(|c| c.pins.len()).sum();

        prop_assert_eq!(graph.nodes.len(), board.components.len() + pins);
        prop_assert_eq!(graph.nodes.iter().filter(|n| n.group == NodeGroup::Pin).count(), pins);
        prop_assert_eq!(graph.links_in(LinkGroup::Containment).count(), pins);
    }

    #[test]
    fn net_links_are_pairwise(board in board()) {
        let graph = build_graph(&board);
        let expected: usize = board
            .nets
            .iter()
            .map(|n| n.pins.len() * (n.pins.len() - 1) / 2)
            .sum();
        prop_assert_eq!(graph.links_in(LinkGroup::Net).count(), expected);
    }

    #[test]
    fn building_is_deterministic(board in board()) {
        prop_assert_eq!(build_graph(&board), build_graph(&board));
    }
}
