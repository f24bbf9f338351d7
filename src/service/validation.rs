//! Declarative input schemas: per-field type, presence, default and rule checks, plus
//! cross-field refinements. `Schema::parse` returns only declared fields (unknown keys are
//! dropped) or every field's first violation, in declaration order.

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Clone, Debug, Error)]
#[error("{}", self.first_message())]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            errors: vec![FieldError {
                field: field.into(),
                message: message.into(),
            }],
        }
    }

    pub fn first_message(&self) -> &str {
        self.errors
            .first()
            .map(|e| e.message.as_str())
            .unwrap_or("Validation error")
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == name)
            .map(|e| e.message.as_str())
    }
}

#[derive(Clone, Copy, Debug)]
pub enum FieldKind {
    String,
    Number,
    Integer,
    Boolean,
}

#[derive(Debug)]
pub enum Rule {
    MinLength(usize, &'static str),
    Min(f64, &'static str),
    Max(f64, &'static str),
    Email(&'static str),
    Url(&'static str),
    /// Empty string or `#RRGGBB`, case-insensitive.
    Color(&'static str),
    OneOf(&'static [&'static str], &'static str),
}

#[derive(Clone, Copy, Debug)]
pub enum DefaultValue {
    Bool(bool),
    Int(i64),
    Str(&'static str),
}

impl DefaultValue {
    fn to_value(self) -> Value {
        match self {
            DefaultValue::Bool(b) => Value::Bool(b),
            DefaultValue::Int(n) => Value::Number(n.into()),
            DefaultValue::Str(s) => Value::String(s.to_string()),
        }
    }
}

#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<DefaultValue>,
    pub rules: &'static [Rule],
}

impl Field {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        Field {
            name,
            kind,
            required: true,
            default: None,
            rules: &[],
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub const fn number(name: &'static str) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    /// Absent or null input is accepted and left out of the output.
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Absent or null input is replaced by `value`.
    pub const fn default(mut self, value: DefaultValue) -> Self {
        self.required = false;
        self.default = Some(value);
        self
    }

    pub const fn rules(mut self, rules: &'static [Rule]) -> Self {
        self.rules = rules;
        self
    }
}

#[derive(Debug)]
pub enum Refinement {
    /// `field` must equal `other`; the error is attached to `field`.
    Matches {
        field: &'static str,
        other: &'static str,
        message: &'static str,
    },
}

#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [Field],
    pub refinements: &'static [Refinement],
}

impl Schema {
    pub fn parse(&self, input: &Value) -> Result<Map<String, Value>, ValidationError> {
        let Some(obj) = input.as_object() else {
            return Err(ValidationError::single("body", "Expected object"));
        };
        let mut out = Map::new();
        let mut errors = Vec::new();
        for field in self.fields {
            match check_field(field, obj.get(field.name)) {
                Ok(Some(v)) => {
                    out.insert(field.name.to_string(), v);
                }
                Ok(None) => {}
                Err(message) => errors.push(FieldError {
                    field: field.name.to_string(),
                    message,
                }),
            }
        }
        // Refinements only run once every field is individually valid.
        if errors.is_empty() {
            for refinement in self.refinements {
                match refinement {
                    Refinement::Matches { field, other, message } => {
                        if out.get(*field) != out.get(*other) {
                            errors.push(FieldError {
                                field: field.to_string(),
                                message: message.to_string(),
                            });
                        }
                    }
                }
            }
        }
        if errors.is_empty() {
            Ok(out)
        } else {
            tracing::debug!(schema = self.name, errors = ?errors, "validation failed");
            Err(ValidationError { errors })
        }
    }
}

fn check_field(field: &Field, v: Option<&Value>) -> Result<Option<Value>, String> {
    let v = match v {
        None | Some(Value::Null) => {
            return match (field.default, field.required) {
                (Some(d), _) => Ok(Some(d.to_value())),
                (None, true) => Err("Required".to_string()),
                (None, false) => Ok(None),
            };
        }
        Some(v) => v,
    };
    let v = coerce_kind(field.kind, v)?;
    for rule in field.rules {
        check_rule(rule, &v)?;
    }
    Ok(Some(v))
}

fn coerce_kind(kind: FieldKind, v: &Value) -> Result<Value, String> {
    match kind {
        FieldKind::String if v.is_string() => Ok(v.clone()),
        FieldKind::String => Err("Expected string".into()),
        FieldKind::Number if v.is_number() => Ok(v.clone()),
        FieldKind::Number => Err("Expected number".into()),
        // Integer columns are 32-bit in storage.
        FieldKind::Integer => match v.as_f64() {
            Some(f) if f.fract() == 0.0 && f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX) => {
                Ok(Value::Number(Number::from(f as i64)))
            }
            Some(_) => Err("Expected integer".into()),
            None => Err("Expected number".into()),
        },
        FieldKind::Boolean if v.is_boolean() => Ok(v.clone()),
        FieldKind::Boolean => Err("Expected boolean".into()),
    }
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
            .expect("email pattern compiles")
    })
}

fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://[^\s/?#]+[^\s]*$").expect("url pattern compiles")
    })
}

fn color_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("color pattern compiles"))
}

fn check_rule(rule: &Rule, v: &Value) -> Result<(), String> {
    let s = v.as_str();
    let n = v.as_f64();
    let ok = match rule {
        Rule::MinLength(min, _) => s.map_or(true, |s| s.chars().count() >= *min),
        Rule::Min(min, _) => n.map_or(true, |n| n >= *min),
        Rule::Max(max, _) => n.map_or(true, |n| n <= *max),
        Rule::Email(_) => s.map_or(true, |s| email_re().is_match(s)),
        Rule::Url(_) => s.map_or(true, |s| url_re().is_match(s)),
        Rule::Color(_) => s.map_or(true, |s| s.is_empty() || color_re().is_match(s)),
        Rule::OneOf(allowed, _) => s.map_or(true, |s| allowed.contains(&s)),
    };
    if ok {
        Ok(())
    } else {
        Err(rule_message(rule).to_string())
    }
}

fn rule_message(rule: &Rule) -> &'static str {
    match rule {
        Rule::MinLength(_, m)
        | Rule::Min(_, m)
        | Rule::Max(_, m)
        | Rule::Email(m)
        | Rule::Url(m)
        | Rule::Color(m)
        | Rule::OneOf(_, m) => m,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static SAMPLE: Schema = Schema {
        name: "sample",
        fields: &[
            Field::string("title").rules(&[Rule::MinLength(3, "Title too short")]),
            Field::string("code")
                .optional()
                .rules(&[Rule::MinLength(2, "Bad code")]),
            Field::integer("order").default(DefaultValue::Int(0)),
            Field::string("kind").default(DefaultValue::Str("plain")).rules(&[Rule::OneOf(
                &["plain", "fancy"],
                "Bad kind",
            )]),
            Field::string("repeat").optional(),
        ],
        refinements: &[Refinement::Matches {
            field: "repeat",
            other: "title",
            message: "Must repeat title",
        }],
    };

    #[test]
    fn applies_defaults_and_strips_unknown_keys() {
        let out = SAMPLE
            .parse(&json!({ "title": "Hello", "repeat": "Hello", "extra": 1 }))
            .unwrap();
        assert_eq!(out["order"], 0);
        assert_eq!(out["kind"], "plain");
        assert!(!out.contains_key("extra"));
        assert!(!out.contains_key("code"));
    }

    #[test]
    fn reports_first_violation_per_field_in_order() {
        let err = SAMPLE
            .parse(&json!({ "title": "Hi", "code": "x", "order": "one", "kind": "odd" }))
            .unwrap_err();
        let fields: Vec<_> = err.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "code", "order", "kind"]);
        assert_eq!(err.first_message(), "Title too short");
        assert_eq!(err.field("order"), Some("Expected number"));
    }

    #[test]
    fn missing_required_field_is_reported() {
        let err = SAMPLE.parse(&json!({})).unwrap_err();
        assert_eq!(err.field("title"), Some("Required"));
    }

    #[test]
    fn integral_floats_are_accepted_as_integers() {
        let out = SAMPLE
            .parse(&json!({ "title": "Hello", "order": 4.0, "repeat": "Hello" }))
            .unwrap();
        assert_eq!(out["order"], 4);
        let err = SAMPLE.parse(&json!({ "title": "Hello", "order": 4.5 })).unwrap_err();
        assert_eq!(err.field("order"), Some("Expected integer"));
    }

    #[test]
    fn integers_must_fit_in_32_bits() {
        let out = SAMPLE
            .parse(&json!({ "title": "Hello", "order": 2147483647, "repeat": "Hello" }))
            .unwrap();
        assert_eq!(out["order"], 2147483647);
        for big in [json!(3000000000u64), json!(-2147483649i64), json!(1e12)] {
            let err = SAMPLE.parse(&json!({ "title": "Hello", "order": big })).unwrap_err();
            assert_eq!(err.field("order"), Some("Expected integer"));
        }
    }

    #[test]
    fn refinement_attaches_to_its_field() {
        let err = SAMPLE
            .parse(&json!({ "title": "Hello", "repeat": "Hullo" }))
            .unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.field("repeat"), Some("Must repeat title"));
    }

    #[test]
    fn non_object_input_is_rejected() {
        let err = SAMPLE.parse(&json!([1, 2])).unwrap_err();
        assert_eq!(err.field("body"), Some("Expected object"));
    }
}
