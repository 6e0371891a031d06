//! Board Document Data Types
//!
//! Typed form of the board JSON that users upload:
//!
//! ```json
//! {
//!   "name": "Valid Basic Board",
//!   "components": [ { "name": "R1", "pins": ["1", "2"] } ],
//!   "nets": [ { "name": "GND", "pins": ["R1.1"] } ]
//! }
//! ```
//!
//! Deserializing into [`Board`] only checks JSON types. The emptiness rules
//! live in [`crate::validator`], which works on the raw value so it can report
//! every problem at once.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A complete board description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub name: String,
    pub components: Vec<Component>,
    pub nets: Vec<Net>,
}

impl Board {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
            nets: Vec::new(),
        }
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    pub fn with_net(mut self, net: Net) -> Self {
        self.nets.push(net);
        self
    }

    /// Total number of pins declared across all components.
    pub fn pin_count(&self) -> usize {
        self.components.iter().map(|c| c.pins.len()).sum()
    }
}

/// A named part with an ordered list of pin labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub pins: Vec<String>,
}

impl Component {
    pub fn new<I, S>(name: impl Into<String>, pins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            pins: pins.into_iter().map(Into::into).collect(),
        }
    }
}

/// A named electrical connection between pin references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Net {
    pub name: String,
    /// Pin references of the form `componentName.pinLabel`.
    pub pins: Vec<String>,
}

impl Net {
    pub fn new<I, S>(name: impl Into<String>, pins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            pins: pins.into_iter().map(Into::into).collect(),
        }
    }

    /// Parsed pin references, in list order.
    pub fn pin_refs(&self) -> impl Iterator<Item = PinRef<'_>> {
        self.pins.iter().map(|p| PinRef::parse(p))
    }

    /// Number of net links this net expands into: one per position pair.
    pub fn link_count(&self) -> usize {
        let k = self.pins.len();
        k * k.saturating_sub(1) / 2
    }
}

/// A `componentName.pinLabel` reference borrowed from a net.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinRef<'a> {
    pub component: &'a str,
    pub pin: &'a str,
}

impl<'a> PinRef<'a> {
    /// Split on the first `.`. The pin label keeps any further dots; a
    /// reference without a dot has an empty pin label.
    pub fn parse(reference: &'a str) -> Self {
        match reference.split_once('.') {
            Some((component, pin)) => Self { component, pin },
            None => Self {
                component: reference,
                pin: "",
            },
        }
    }
}

impl std::fmt::Display for PinRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.component, self.pin)
    }
}

/// A board payload as received from an upload, before validation.
///
/// Uploads may wrap the board as `{ "json": <board>, "name": "..." }` or send
/// the board itself. Nothing here rejects a payload; invalid boards are kept so
/// their violations can be shown later.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardDocument {
    pub name: String,
    pub json: Value,
}

impl BoardDocument {
    pub fn from_upload(body: Value) -> Self {
        let fallback = format!(
            "Board file uploaded at {}",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
        );
        Self::from_upload_with_fallback(body, fallback)
    }

    /// Like [`BoardDocument::from_upload`] with an explicit fallback name.
    pub fn from_upload_with_fallback(body: Value, fallback: impl Into<String>) -> Self {
        let (json, envelope_name) = match body {
            Value::Object(mut map) => {
                let envelope_name = match map.get("name") {
                    Some(Value::String(s)) => Some(s.clone()),
                    _ => None,
                };
                match map.remove("json") {
                    Some(inner) if !inner.is_null() => (inner, envelope_name),
                    removed => {
                        if let Some(v) = removed {
                            map.insert("json".to_string(), v);
                        }
                        (Value::Object(map), envelope_name)
                    }
                }
            }
            other => (other, None),
        };

        let name = match json.get("name") {
            Some(Value::String(s)) => s.clone(),
            _ => envelope_name.unwrap_or_else(|| fallback.into()),
        };

        Self { name, json }
    }

    /// Decode the payload into a typed [`Board`].
    pub fn to_board(&self) -> Result<Board, serde_json::Error> {
        Board::deserialize(&self.json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pin_ref_splits_on_first_dot() {
        let r = PinRef::parse("U1.PA.0");
        assert_eq!(r.component, "U1");
        assert_eq!(r.pin, "PA.0");
        assert_eq!(r.to_string(), "U1.PA.0");
    }

    #[test]
    fn test_pin_ref_without_dot() {
        let r = PinRef::parse("R1");
        assert_eq!(r.component, "R1");
        assert_eq!(r.pin, "");
    }

    #[test]
    fn test_net_link_count() {
        assert_eq!(Net::new("N", Vec::<String>::new()).link_count(), 0);
        assert_eq!(Net::new("N", ["R1.1"]).link_count(), 0);
        assert_eq!(Net::new("N", ["R1.1", "C1.A", "C1.B"]).link_count(), 3);
        assert_eq!(Net::new("N", ["a.1", "b.1", "c.1", "d.1"]).link_count(), 6);
    }

    #[test]
    fn test_board_deserialize() {
        let board: Board = serde_json::from_value(json!({
            "name": "B1",
            "components": [{ "name": "R1", "pins": ["1", "2"] }],
            "nets": [{ "name": "GND", "pins": ["R1.1"] }]
        }))
        .unwrap();

        assert_eq!(board.name, "B1");
        assert_eq!(board.components[0], Component::new("R1", ["1", "2"]));
        assert_eq!(board.pin_count(), 2);
    }

    #[test]
    fn test_upload_plain_board_uses_board_name() {
        let doc = BoardDocument::from_upload_with_fallback(
            json!({ "name": "Main", "components": [], "nets": [] }),
            "fallback",
        );
        assert_eq!(doc.name, "Main");
        assert_eq!(doc.json["components"], json!([]));
    }

    #[test]
    fn test_upload_envelope_unwraps_json() {
        let doc = BoardDocument::from_upload_with_fallback(
            json!({ "name": "Envelope", "json": { "components": [] } }),
            "fallback",
        );
        assert_eq!(doc.name, "Envelope");
        assert_eq!(doc.json, json!({ "components": [] }));
    }

    #[test]
    fn test_upload_board_name_beats_envelope_name() {
        let doc = BoardDocument::from_upload_with_fallback(
            json!({ "name": "Envelope", "json": { "name": "Inner" } }),
            "fallback",
        );
        assert_eq!(doc.name, "Inner");
    }

    #[test]
    fn test_upload_null_json_keeps_body() {
        let doc = BoardDocument::from_upload_with_fallback(
            json!({ "name": "B", "json": null }),
            "fallback",
        );
        assert_eq!(doc.json, json!({ "name": "B", "json": null }));
        assert_eq!(doc.name, "B");
    }

    #[test]
    fn test_upload_non_object_gets_timestamp_name() {
        let doc = BoardDocument::from_upload(json!([1, 2, 3]));
        assert!(doc.name.starts_with("Board file uploaded at "));
        assert_eq!(doc.json, json!([1, 2, 3]));
    }

    #[test]
    fn test_to_board_reports_type_errors() {
        let doc = BoardDocument::from_upload_with_fallback(json!({ "name": 5 }), "x");
        assert_eq!(doc.name, "x");
        assert!(doc.to_board().is_err());
    }
}
