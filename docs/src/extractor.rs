//! Extracts a documentation model from a parsed JSON Schema document.
//!
//! The model keeps only what the page shows: titles, descriptions, types,
//! properties, constraints, combinators and local definitions. Key order
//! follows the source document.

use serde_json::{Map, Value};

/// Nesting depth past which sub-schemas are no longer expanded.
pub const MAX_DEPTH: usize = 24;

/// A whole schema document ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDoc {
    /// Page title: the schema's `title`, or the fallback passed in.
    pub title: String,
    /// `$schema` dialect URI.
    pub dialect: Option<String>,
    /// `$id` of the document.
    pub id: Option<String>,
    /// The root schema.
    pub root: SchemaNode,
    /// Entries of `definitions` and `$defs`, in document order.
    pub definitions: Vec<Definition>,
}

/// A named entry under `definitions` or `$defs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    /// Definition name.
    pub name: String,
    /// Definition schema.
    pub schema: SchemaNode,
}

/// One object property.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Property name (or a pattern for `patternProperties`).
    pub name: String,
    /// Listed in the parent's `required`.
    pub required: bool,
    /// Declared through `patternProperties`.
    pub pattern: bool,
    /// Property schema.
    pub schema: SchemaNode,
}

/// Schema combinator keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `allOf`
    AllOf,
    /// `anyOf`
    AnyOf,
    /// `oneOf`
    OneOf,
}

impl Combinator {
    const ALL: [(Combinator, &'static str); 3] = [
        (Combinator::AllOf, "allOf"),
        (Combinator::AnyOf, "anyOf"),
        (Combinator::OneOf, "oneOf"),
    ];

    /// Heading shown above the branches.
    pub fn label(self) -> &'static str {
        match self {
            Combinator::AllOf => "All of",
            Combinator::AnyOf => "Any of",
            Combinator::OneOf => "One of",
        }
    }
}

/// A labelled constraint such as `Maximum length: 64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    /// Human label.
    pub label: &'static str,
    /// Compact JSON rendering of the value.
    pub value: String,
}

/// A (sub-)schema reduced to what the page displays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaNode {
    /// `Some(b)` for boolean schemas.
    pub boolean: Option<bool>,
    /// `title` keyword.
    pub title: Option<String>,
    /// `description` keyword (Markdown).
    pub description: Option<String>,
    /// Declared `type` values.
    pub types: Vec<String>,
    /// `$ref` target.
    pub reference: Option<String>,
    /// Object properties, `patternProperties` last.
    pub properties: Vec<Property>,
    /// Schema for `additionalProperties` when it is itself a schema object.
    pub additional: Option<Box<SchemaNode>>,
    /// Array item schemas: one entry for `items`, several for tuples.
    pub items: Vec<SchemaNode>,
    /// Combinator branches.
    pub combinators: Vec<(Combinator, Vec<SchemaNode>)>,
    /// `not` sub-schema.
    pub not: Option<Box<SchemaNode>>,
    /// Scalar constraints in display order.
    pub constraints: Vec<Constraint>,
    /// Expansion stopped at [`MAX_DEPTH`].
    pub truncated: bool,
}

/// Constraint keywords and their labels, in display order.
const CONSTRAINTS: &[(&str, &str)] = &[
    ("const", "Constant"),
    ("default", "Default"),
    ("format", "Format"),
    ("pattern", "Pattern"),
    ("minLength", "Minimum length"),
    ("maxLength", "Maximum length"),
    ("minimum", "Minimum"),
    ("exclusiveMinimum", "Exclusive minimum"),
    ("maximum", "Maximum"),
    ("exclusiveMaximum", "Exclusive maximum"),
    ("multipleOf", "Multiple of"),
    ("minItems", "Minimum items"),
    ("maxItems", "Maximum items"),
    ("uniqueItems", "Unique items"),
    ("minProperties", "Minimum properties"),
    ("maxProperties", "Maximum properties"),
    ("contentMediaType", "Content media type"),
    ("contentEncoding", "Content encoding"),
    ("deprecated", "Deprecated"),
    ("readOnly", "Read only"),
    ("writeOnly", "Write only"),
];

impl SchemaDoc {
    /// Builds the model for a schema document.
    ///
    /// Returns `None` when `value` is neither an object nor a boolean.
    pub fn from_value(value: &Value, fallback_title: &str) -> Option<Self> {
        let root = match value {
            Value::Object(_) | Value::Bool(_) => SchemaNode::from_value(value, 0),
            _ => return None,
        };
        let obj = value.as_object();
        let text = |key: &str| {
            obj.and_then(|o| o.get(key))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        let mut definitions = Vec::new();
        for key in ["definitions", "$defs"] {
            if let Some(defs) = obj.and_then(|o| o.get(key)).and_then(Value::as_object) {
                for (name, schema) in defs {
                    definitions.push(Definition {
                        name: name.clone(),
                        schema: SchemaNode::from_value(schema, 1),
                    });
                }
            }
        }

        Some(Self {
            title: root
                .title
                .clone()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| fallback_title.to_string()),
            dialect: text("$schema"),
            id: text("$id").or_else(|| text("id")),
            root,
            definitions,
        })
    }
}

impl SchemaNode {
    /// Builds a node from any JSON value. Non-schema values yield an empty node.
    pub fn from_value(value: &Value, depth: usize) -> Self {
        match value {
            Value::Bool(b) => Self {
                boolean: Some(*b),
                ..Self::default()
            },
            Value::Object(obj) if depth >= MAX_DEPTH => Self {
                title: str_field(obj, "title"),
                reference: str_field(obj, "$ref"),
                truncated: true,
                ..Self::default()
            },
            Value::Object(obj) => Self::from_object(obj, depth),
            _ => Self::default(),
        }
    }

    fn from_object(obj: &Map<String, Value>, depth: usize) -> Self {
        let child = |v: &Value| SchemaNode::from_value(v, depth + 1);

        let required: Vec<&str> = obj
            .get("required")
            .and_then(Value::as_array)
            .map(|r| r.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut properties = Vec::new();
        if let Some(props) = obj.get("properties").and_then(Value::as_object) {
            for (name, schema) in props {
                properties.push(Property {
                    name: name.clone(),
                    required: required.contains(&name.as_str()),
                    pattern: false,
                    schema: child(schema),
                });
            }
        }
        if let Some(props) = obj.get("patternProperties").and_then(Value::as_object) {
            for (pattern, schema) in props {
                properties.push(Property {
                    name: pattern.clone(),
                    required: false,
                    pattern: true,
                    schema: child(schema),
                });
            }
        }

        let mut items = Vec::new();
        match obj.get("prefixItems").or_else(|| obj.get("items")) {
            Some(Value::Array(tuple)) => items.extend(tuple.iter().map(child)),
            Some(schema @ (Value::Object(_) | Value::Bool(_))) => items.push(child(schema)),
            _ => {}
        }
        if obj.contains_key("prefixItems") {
            if let Some(rest @ Value::Object(_)) = obj.get("items") {
                items.push(child(rest));
            }
        }

        let combinators = Combinator::ALL
            .iter()
            .filter_map(|(kind, key)| {
                let branches = obj.get(*key)?.as_array()?;
                Some((*kind, branches.iter().map(child).collect()))
            })
            .collect();

        let mut constraints: Vec<Constraint> = CONSTRAINTS
            .iter()
            .filter_map(|(key, label)| {
                obj.get(*key).map(|v| Constraint {
                    label: *label,
                    value: compact(v),
                })
            })
            .collect();
        if let Some(Value::Array(values)) = obj.get("enum") {
            constraints.insert(
                0,
                Constraint {
                    label: "Allowed values",
                    value: values.iter().map(compact).collect::<Vec<_>>().join(", "),
                },
            );
        }
        if obj.get("additionalProperties") == Some(&Value::Bool(false)) {
            constraints.push(Constraint {
                label: "Additional properties",
                value: "not allowed".to_string(),
            });
        }
        if let Some(examples) = obj.get("examples").and_then(Value::as_array) {
            constraints.push(Constraint {
                label: "Examples",
                value: examples.iter().map(compact).collect::<Vec<_>>().join(", "),
            });
        }

        Self {
            boolean: None,
            title: str_field(obj, "title"),
            description: str_field(obj, "description"),
            types: types_of(obj),
            reference: str_field(obj, "$ref"),
            properties,
            additional: match obj.get("additionalProperties") {
                Some(schema @ Value::Object(_)) => Some(Box::new(child(schema))),
                _ => None,
            },
            items,
            combinators,
            not: obj.get("not").map(|n| Box::new(child(n))),
            constraints,
            truncated: false,
        }
    }

    /// True when the node has structure worth its own section on the page.
    pub fn has_structure(&self) -> bool {
        !self.properties.is_empty()
            || self.additional.is_some()
            || !self.combinators.is_empty()
            || self.not.is_some()
            || self.items.iter().any(SchemaNode::has_structure)
    }
}

/// Declared types, with `object`/`array` inferred when the keyword is absent.
fn types_of(obj: &Map<String, Value>) -> Vec<String> {
    match obj.get("type") {
        Some(Value::String(t)) => vec![t.clone()],
        Some(Value::Array(ts)) => ts
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ if obj.contains_key("properties") || obj.contains_key("patternProperties") => {
            vec!["object".to_string()]
        }
        _ if obj.contains_key("items") || obj.contains_key("prefixItems") => {
            vec!["array".to_string()]
        }
        _ => Vec::new(),
    }
}

fn str_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Compact JSON text for a value.
fn compact(value: &Value) -> String {
    value.to_string()
}
