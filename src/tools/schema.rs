//! Argument schemas for career tools
//!
//! A [`ToolSchema`] is an ordered list of named, typed fields, each optionally
//! carrying a default. Schemas drive two things: the JSON Schema sent to the
//! reasoner for argument extraction, and validation of what comes back.
//! Validation applies defaults and reports every missing required field at
//! once, so the agent can ask for all of them in a single clarification.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{CareerError, Result};

/// Declared type of an argument field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgKind {
    /// Free-form text
    String,
    /// Whole number
    Integer,
    /// Decimal number
    Number,
}

impl ArgKind {
    /// JSON Schema type name for this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            ArgKind::String => "string",
            ArgKind::Integer => "integer",
            ArgKind::Number => "number",
        }
    }
}

/// A single named, typed argument field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgField {
    /// Field name as it appears in extracted arguments
    pub name: String,
    /// Declared type
    pub kind: ArgKind,
    /// Human-readable description, sent to the reasoner
    pub description: String,
    /// Whether extraction must produce this field
    pub required: bool,
    /// Default applied when an optional field is absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ArgField {
    /// A required field.
    pub fn required(name: &str, kind: ArgKind, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            description: description.to_string(),
            required: true,
            default: None,
        }
    }

    /// An optional field with no default.
    pub fn optional(name: &str, kind: ArgKind, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            description: description.to_string(),
            required: false,
            default: None,
        }
    }

    /// Attach a default value (marks the field optional).
    pub fn with_default(mut self, default: Value) -> Self {
        self.required = false;
        self.default = Some(default);
        self
    }

    /// Coerce a raw value to this field's declared kind.
    ///
    /// Returns `None` when the value is absent, empty, or cannot be coerced;
    /// the caller decides whether that makes the field missing.
    fn coerce(&self, value: &Value) -> Option<Value> {
        match self.kind {
            ArgKind::String => match value {
                Value::String(s) if !s.trim().is_empty() => Some(Value::String(s.clone())),
                Value::Number(n) => Some(Value::String(n.to_string())),
                _ => None,
            },
            ArgKind::Integer => match value {
                Value::Number(n) if n.is_i64() || n.is_u64() => Some(value.clone()),
                Value::Number(n) => n.as_f64().map(|f| json!(f.round() as i64)),
                Value::String(s) => s.trim().parse::<i64>().ok().map(|i| json!(i)),
                _ => None,
            },
            ArgKind::Number => match value {
                Value::Number(_) => Some(value.clone()),
                Value::String(s) => s.trim().parse::<f64>().ok().map(|f| json!(f)),
                _ => None,
            },
        }
    }
}

/// Ordered argument schema for one tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    fields: Vec<ArgField>,
}

impl ToolSchema {
    /// Create a schema from an ordered field list.
    pub fn new(fields: Vec<ArgField>) -> Self {
        Self { fields }
    }

    /// The fields of this schema, in declaration order.
    pub fn fields(&self) -> &[ArgField] {
        &self.fields
    }

    /// Names of all required fields, in declaration order.
    pub fn required_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Validate extracted arguments against this schema.
    ///
    /// Applies defaults for absent optional fields, coerces values to their
    /// declared kinds, and drops fields the schema does not declare. Fails
    /// with [`CareerError::MissingArguments`] listing every required field
    /// that is absent, empty, or uncoercible; values are never synthesized
    /// for missing required fields.
    pub fn validate(&self, tool: &str, raw: &Value) -> Result<Value> {
        let empty = Map::new();
        let raw = raw.as_object().unwrap_or(&empty);

        let mut validated = Map::new();
        let mut missing = Vec::new();

        for field in &self.fields {
            let coerced = raw.get(&field.name).and_then(|v| field.coerce(v));
            match coerced {
                Some(value) => {
                    validated.insert(field.name.clone(), value);
                }
                None => {
                    if let Some(default) = &field.default {
                        validated.insert(field.name.clone(), default.clone());
                    } else if field.required {
                        missing.push(field.name.clone());
                    }
                }
            }
        }

        if !missing.is_empty() {
            return Err(CareerError::MissingArguments {
                tool: tool.to_string(),
                fields: missing,
            });
        }

        Ok(Value::Object(validated))
    }

    /// Render this schema as a JSON Schema object for the reasoner.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in &self.fields {
            properties.insert(
                field.name.clone(),
                json!({
                    "type": field.kind.type_name(),
                    "description": field.description,
                }),
            );
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": self.required_names(),
        })
    }
}
