//! Board Document Validator
//!
//! Checks an arbitrary JSON value against the board shape and reports every
//! violation it finds, each qualified with the path of the offending value:
//!
//! ```text
//! [name] String must contain at least 1 character(s)
//! [components[0].pins] Component must have at least one pin
//! [(root)] Expected object, received array
//! ```
//!
//! Checks never stop at the first problem. Order follows the document:
//! `name`, `components`, `nets`; inside a list the length check comes before
//! the per-element checks; inside an element `name` comes before `pins`.
//!
//! Net pin references are not cross-checked against declared components.
//! Dangling references are a graph concern, see
//! [`BoardGraph::dangling_links`](crate::graph::BoardGraph::dangling_links).

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

const BLANK_STRING: &str = "String must contain at least 1 character(s)";
const EMPTY_ARRAY: &str = "Array must contain at least 1 element(s)";
const REQUIRED: &str = "Required";

/// Messages specific to one kind of list entry (components or nets).
struct EntryRules {
    blank_name: &'static str,
    no_pins: &'static str,
}

const COMPONENT_RULES: EntryRules = EntryRules {
    blank_name: "Component name can't be blank",
    no_pins: "Component must have at least one pin",
};

const NET_RULES: EntryRules = EntryRules {
    blank_name: "Net name can't be blank",
    no_pins: "Net must connect at least one pin",
};

/// One step in a path into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(&'static str),
    Index(usize),
}

/// Location of a value inside the board document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn field(&self, name: &'static str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Field(name));
        Self(segments)
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What went wrong at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Field is absent.
    Required,
    /// Value has the wrong JSON type.
    InvalidType,
    /// String or list is empty.
    TooSmall,
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub path: FieldPath,
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.path, self.message)
    }
}

/// Validate a raw JSON value, returning `"[<path>] <message>"` strings.
/// An empty list means the document is a well-formed board.
pub fn validate(raw: &Value) -> Vec<String> {
    validate_board(raw).iter().map(ToString::to_string).collect()
}

/// Validate a raw JSON value, returning structured violations.
pub fn validate_board(raw: &Value) -> Vec<Violation> {
    let mut checker = Checker::default();
    checker.board(raw);
    tracing::debug!("Board validation found {} violation(s)", checker.violations.len());
    checker.violations
}

/// JSON type name as shown in messages.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Default)]
struct Checker {
    violations: Vec<Violation>,
}

impl Checker {
    fn board(&mut self, raw: &Value) {
        let root = FieldPath::root();
        let Some(doc) = self.object(Some(raw), &root) else {
            return;
        };

        self.string(doc.get("name"), &root.field("name"), None);
        self.entries(doc.get("components"), &root.field("components"), &COMPONENT_RULES);
        self.entries(doc.get("nets"), &root.field("nets"), &NET_RULES);
    }

    fn entries(&mut self, value: Option<&Value>, path: &FieldPath, rules: &EntryRules) {
        let Some(items) = self.array(value, path, None) else {
            return;
        };

        for (i, item) in items.iter().enumerate() {
            let item_path = path.index(i);
            let Some(entry) = self.object(Some(item), &item_path) else {
                continue;
            };

            self.string(entry.get("name"), &item_path.field("name"), Some(rules.blank_name));

            let pins_path = item_path.field("pins");
            if let Some(pins) = self.array(entry.get("pins"), &pins_path, Some(rules.no_pins)) {
                for (j, pin) in pins.iter().enumerate() {
                    self.string(Some(pin), &pins_path.index(j), None);
                }
            }
        }
    }

    fn object<'v>(
        &mut self,
        value: Option<&'v Value>,
        path: &FieldPath,
    ) -> Option<&'v Map<String, Value>> {
        match value {
            Some(Value::Object(map)) => Some(map),
            other => {
                self.type_mismatch(other, "object", path);
                None
            }
        }
    }

    fn array<'v>(
        &mut self,
        value: Option<&'v Value>,
        path: &FieldPath,
        empty_message: Option<&str>,
    ) -> Option<&'v Vec<Value>> {
        match value {
            Some(Value::Array(items)) => {
                if items.is_empty() {
                    self.push(ViolationKind::TooSmall, path, empty_message.unwrap_or(EMPTY_ARRAY));
                }
                Some(items)
            }
            other => {
                self.type_mismatch(other, "array", path);
                None
            }
        }
    }

    fn string(&mut self, value: Option<&Value>, path: &FieldPath, blank_message: Option<&str>) {
        match value {
            Some(Value::String(s)) => {
                if s.is_empty() {
                    self.push(ViolationKind::TooSmall, path, blank_message.unwrap_or(BLANK_STRING));
                }
            }
            other => self.type_mismatch(other, "string", path),
        }
    }

    fn type_mismatch(&mut self, value: Option<&Value>, expected: &str, path: &FieldPath) {
        match value {
            None => self.push(ViolationKind::Required, path, REQUIRED),
            Some(v) => self.push(
                ViolationKind::InvalidType,
                path,
                &format!("Expected {}, received {}", expected, type_name(v)),
            ),
        }
    }

    fn push(&mut self, kind: ViolationKind, path: &FieldPath, message: &str) {
        self.violations.push(Violation {
            kind,
            path: path.clone(),
            message: message.to_string(),
        });
    }
}
