// Declarative payload schemas
//
// Create/update payloads are validated client-side before any network call.
// A failed validation reports every failing field, not just the first.

use crate::types::{ApiError, ApiResult, Violation};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Type constraint for a single schema field.
#[derive(Debug, Clone)]
enum FieldKind {
    Str {
        min_length: Option<usize>,
        max_length: Option<usize>,
        one_of: Option<Vec<String>>,
    },
    Int {
        min: Option<i64>,
        max: Option<i64>,
    },
    Bool,
    StrList,
    /// An opaque JSON object whose inner shape is owned by a typed payload.
    Object,
}

/// Validation rule for a single named field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    required: bool,
    default: Option<Value>,
    kind: FieldKind,
}

impl FieldRule {
    pub fn string() -> Self {
        Self {
            required: false,
            default: None,
            kind: FieldKind::Str {
                min_length: None,
                max_length: None,
                one_of: None,
            },
        }
    }

    pub fn integer() -> Self {
        Self {
            required: false,
            default: None,
            kind: FieldKind::Int { min: None, max: None },
        }
    }

    pub fn boolean() -> Self {
        Self {
            required: false,
            default: None,
            kind: FieldKind::Bool,
        }
    }

    pub fn string_list() -> Self {
        Self {
            required: false,
            default: None,
            kind: FieldKind::StrList,
        }
    }

    pub fn object() -> Self {
        Self {
            required: false,
            default: None,
            kind: FieldKind::Object,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Default applied when the field is absent from the payload.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn min_length(mut self, len: usize) -> Self {
        if let FieldKind::Str { min_length, .. } = &mut self.kind {
            *min_length = Some(len);
        }
        self
    }

    pub fn max_length(mut self, len: usize) -> Self {
        if let FieldKind::Str { max_length, .. } = &mut self.kind {
            *max_length = Some(len);
        }
        self
    }

    pub fn one_of(mut self, values: &[&str]) -> Self {
        if let FieldKind::Str { one_of, .. } = &mut self.kind {
            *one_of = Some(values.iter().map(|v| v.to_string()).collect());
        }
        self
    }

    pub fn min(mut self, value: i64) -> Self {
        if let FieldKind::Int { min, .. } = &mut self.kind {
            *min = Some(value);
        }
        self
    }

    pub fn max(mut self, value: i64) -> Self {
        if let FieldKind::Int { max, .. } = &mut self.kind {
            *max = Some(value);
        }
        self
    }

    /// Check a present value against this rule, appending any violation.
    fn check(&self, field: &str, value: &Value, violations: &mut Vec<Violation>) {
        match &self.kind {
            FieldKind::Str {
                min_length,
                max_length,
                one_of,
            } => match value.as_str() {
                Some(s) => {
                    if let Some(min) = min_length {
                        if s.len() < *min {
                            violations.push(Violation::new(
                                field,
                                format!("must be at least {} characters", min),
                            ));
                            return;
                        }
                    }
                    if let Some(max) = max_length {
                        if s.len() > *max {
                            violations.push(Violation::new(
                                field,
                                format!("must be at most {} characters", max),
                            ));
                            return;
                        }
                    }
                    if let Some(allowed) = one_of {
                        if !allowed.iter().any(|a| a == s) {
                            violations.push(Violation::new(
                                field,
                                format!("must be one of: {}", allowed.join(", ")),
                            ));
                        }
                    }
                }
                None => violations.push(Violation::new(field, "must be a string")),
            },
            FieldKind::Int { min, max } => match value.as_i64() {
                Some(n) => {
                    if let Some(min) = min {
                        if n < *min {
                            violations
                                .push(Violation::new(field, format!("must be at least {}", min)));
                            return;
                        }
                    }
                    if let Some(max) = max {
                        if n > *max {
                            violations
                                .push(Violation::new(field, format!("must be at most {}", max)));
                        }
                    }
                }
                None => violations.push(Violation::new(field, "must be an integer")),
            },
            FieldKind::Bool => {
                if !value.is_boolean() {
                    violations.push(Violation::new(field, "must be a boolean"));
                }
            }
            FieldKind::StrList => match value.as_array() {
                Some(items) => {
                    if items.iter().any(|item| !item.is_string()) {
                        violations.push(Violation::new(field, "must be a list of strings"));
                    }
                }
                None => violations.push(Violation::new(field, "must be a list of strings")),
            },
            FieldKind::Object => {
                if !value.is_object() {
                    violations.push(Violation::new(field, "must be an object"));
                }
            }
        }
    }
}

/// A closed set of field rules for one payload shape.
///
/// Unknown keys are rejected; the schema enumerates every supported field.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: BTreeMap<String, FieldRule>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.fields.insert(name.into(), rule);
        self
    }

    /// Validate a payload against this schema.
    ///
    /// On success returns the payload with defaults applied for absent fields;
    /// present fields pass through unchanged. On failure returns
    /// `ApiError::Schema` listing every violating field.
    pub fn validate(&self, payload: &Value) -> ApiResult<Value> {
        let object = match payload.as_object() {
            Some(object) => object,
            None => {
                return Err(ApiError::schema(vec![Violation::new(
                    "",
                    "payload must be a JSON object",
                )]))
            }
        };

        let mut violations = Vec::new();
        let mut coerced = Map::new();

        for (key, value) in object {
            match self.fields.get(key) {
                Some(rule) => {
                    // Null counts as absent; a required field may not be null.
                    if value.is_null() {
                        if rule.required {
                            violations.push(Violation::new(key, "is required"));
                        }
                        continue;
                    }
                    rule.check(key, value, &mut violations);
                    coerced.insert(key.clone(), value.clone());
                }
                None => violations.push(Violation::new(key, "is not a supported field")),
            }
        }

        for (name, rule) in &self.fields {
            if coerced.contains_key(name) {
                continue;
            }
            // Explicit null and an absent key are equivalent: both take
            // the default. An explicitly-null required field was already
            // flagged above.
            if let Some(default) = &rule.default {
                coerced.insert(name.clone(), default.clone());
            } else if rule.required && !object.contains_key(name) {
                violations.push(Violation::new(name, "is required"));
            }
        }

        if violations.is_empty() {
            Ok(Value::Object(coerced))
        } else {
            Err(ApiError::schema(violations))
        }
    }
}
