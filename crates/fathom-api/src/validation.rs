//! Declarative parameter validation.
//!
//! A [`Schema`] describes a strict JSON object: which fields exist, which are
//! required, and the [`Rule`] each one must satisfy, plus optional
//! cross-field [`Refinement`]s. [`validate`] checks a typed parameter struct
//! (via its serde representation) and hands it back untouched on success;
//! on failure every violated constraint is folded into a single
//! [`Error::Validation`].
//!
//! The schemas used by the resource wrappers live at the bottom of this
//! module as lazily built statics.

use std::fmt::Write as _;
use std::sync::LazyLock;

use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use crate::error::Error;

// ── Rules ────────────────────────────────────────────────────────────

/// Constraint on a single value.
#[derive(Debug)]
pub enum Rule {
    String {
        min: Option<usize>,
        max: Option<usize>,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
        positive: bool,
    },
    Enum(&'static [&'static str]),
    Bool,
    Url,
    Array(Box<Rule>),
    Object(Schema),
}

impl Rule {
    pub fn string() -> Self {
        Self::String {
            min: None,
            max: None,
        }
    }

    pub fn number() -> Self {
        Self::Number {
            min: None,
            max: None,
            positive: false,
        }
    }

    pub fn one_of(values: &'static [&'static str]) -> Self {
        Self::Enum(values)
    }

    pub fn array_of(item: Self) -> Self {
        Self::Array(Box::new(item))
    }

    /// Minimum string length (in characters) or minimum number.
    pub fn min(self, bound: usize) -> Self {
        match self {
            Self::String { max, .. } => Self::String {
                min: Some(bound),
                max,
            },
            #[allow(clippy::cast_precision_loss)]
            Self::Number { max, positive, .. } => Self::Number {
                min: Some(bound as f64),
                max,
                positive,
            },
            other => other,
        }
    }

    /// Maximum string length (in characters) or maximum number.
    pub fn max(self, bound: usize) -> Self {
        match self {
            Self::String { min, .. } => Self::String {
                min,
                max: Some(bound),
            },
            #[allow(clippy::cast_precision_loss)]
            Self::Number { min, positive, .. } => Self::Number {
                min,
                max: Some(bound as f64),
                positive,
            },
            other => other,
        }
    }

    /// Number must be strictly greater than zero.
    pub fn positive(self) -> Self {
        match self {
            Self::Number { min, max, .. } => Self::Number {
                min,
                max,
                positive: true,
            },
            other => other,
        }
    }

    fn check(&self, value: &Value, path: &str, issues: &mut Vec<Issue>) {
        match self {
            Self::String { min, max } => {
                let Some(s) = value.as_str() else {
                    issues.push(Issue::type_mismatch("string", value, path));
                    return;
                };
                let len = s.chars().count();
                if let Some(min) = min.filter(|min| len < *min) {
                    issues.push(Issue::new(
                        path,
                        format!("String must contain at least {min} character(s)"),
                    ));
                }
                if let Some(max) = max.filter(|max| len > *max) {
                    issues.push(Issue::new(
                        path,
                        format!("String must contain at most {max} character(s)"),
                    ));
                }
            }
            Self::Number { min, max, positive } => {
                let Some(n) = value.as_f64() else {
                    issues.push(Issue::type_mismatch("number", value, path));
                    return;
                };
                if *positive && n <= 0.0 {
                    issues.push(Issue::new(path, "Number must be greater than 0"));
                }
                if let Some(min) = min.filter(|min| n < *min) {
                    issues.push(Issue::new(
                        path,
                        format!("Number must be greater than or equal to {min}"),
                    ));
                }
                if let Some(max) = max.filter(|max| n > *max) {
                    issues.push(Issue::new(
                        path,
                        format!("Number must be less than or equal to {max}"),
                    ));
                }
            }
            Self::Enum(allowed) => match value.as_str() {
                Some(s) if allowed.iter().any(|v| *v == s) => {}
                _ => {
                    let expected = allowed
                        .iter()
                        .map(|v| format!("'{v}'"))
                        .collect::<Vec<_>>()
                        .join(" | ");
                    issues.push(Issue::new(
                        path,
                        format!("Invalid enum value. Expected {expected}, received {value}"),
                    ));
                }
            },
            Self::Bool => {
                if !value.is_boolean() {
                    issues.push(Issue::type_mismatch("boolean", value, path));
                }
            }
            Self::Url => match value.as_str() {
                Some(s) if Url::parse(s).is_ok() => {}
                Some(_) => issues.push(Issue::new(path, "Invalid url")),
                None => issues.push(Issue::type_mismatch("string", value, path)),
            },
            Self::Array(item) => {
                let Some(items) = value.as_array() else {
                    issues.push(Issue::type_mismatch("array", value, path));
                    return;
                };
                for (i, element) in items.iter().enumerate() {
                    item.check(element, &format!("{path}[{i}]"), issues);
                }
            }
            Self::Object(schema) => schema.check_at(value, path, issues),
        }
    }
}

// ── Schema ───────────────────────────────────────────────────────────

#[derive(Debug)]
struct Field {
    name: &'static str,
    required: bool,
    rule: Rule,
}

/// Cross-field constraint evaluated against the whole object.
#[derive(Debug)]
pub struct Refinement {
    pub path: &'static str,
    pub message: &'static str,
    pub check: fn(&Map<String, Value>) -> bool,
}

/// Strict object schema.
#[derive(Debug, Default)]
pub struct Schema {
    fields: Vec<Field>,
    refinements: Vec<Refinement>,
}

impl Schema {
    pub fn object() -> Self {
        Self::default()
    }

    pub fn required(mut self, name: &'static str, rule: Rule) -> Self {
        self.fields.push(Field {
            name,
            required: true,
            rule,
        });
        self
    }

    pub fn optional(mut self, name: &'static str, rule: Rule) -> Self {
        self.fields.push(Field {
            name,
            required: false,
            rule,
        });
        self
    }

    pub fn refine(mut self, refinement: Refinement) -> Self {
        self.refinements.push(refinement);
        self
    }

    /// Check `value`, returning every violation found.
    pub fn issues(&self, value: &Value) -> Vec<Issue> {
        let mut issues = Vec::new();
        self.check_at(value, "", &mut issues);
        issues
    }

    fn check_at(&self, value: &Value, path: &str, issues: &mut Vec<Issue>) {
        let Some(obj) = value.as_object() else {
            issues.push(Issue::type_mismatch("object", value, path));
            return;
        };

        for field in &self.fields {
            let field_path = join_path(path, field.name);
            match obj.get(field.name) {
                Some(v) => field.rule.check(v, &field_path, issues),
                None if field.required => issues.push(Issue::new(&field_path, "Required")),
                None => {}
            }
        }

        let unknown: Vec<String> = obj
            .keys()
            .filter(|k| !self.fields.iter().any(|f| f.name == k.as_str()))
            .map(|k| format!("'{k}'"))
            .collect();
        if !unknown.is_empty() {
            issues.push(Issue::new(
                path,
                format!("Unrecognized key(s) in object: {}", unknown.join(", ")),
            ));
        }

        for refinement in &self.refinements {
            if !(refinement.check)(obj) {
                issues.push(Issue::new(
                    &join_path(path, refinement.path),
                    refinement.message,
                ));
            }
        }
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_owned()
    } else {
        format!("{parent}.{name}")
    }
}

// ── Issues ───────────────────────────────────────────────────────────

/// One violated constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Dotted path to the offending value; empty for the root object.
    pub path: String,
    pub message: String,
}

impl Issue {
    fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_owned(),
            message: message.into(),
        }
    }

    fn type_mismatch(expected: &str, value: &Value, path: &str) -> Self {
        let received = match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };
        Self::new(path, format!("Expected {expected}, received {received}"))
    }
}

fn render(issues: &[Issue]) -> String {
    let mut out = String::from("Validation error: ");
    for (i, issue) in issues.iter().enumerate() {
        if i > 0 {
            out.push_str("; ");
        }
        out.push_str(&issue.message);
        if !issue.path.is_empty() {
            let _ = write!(out, " at \"{}\"", issue.path);
        }
    }
    out
}

// ── Entry points ─────────────────────────────────────────────────────

/// Validate raw JSON against `schema`, returning it unchanged on success.
pub fn validate_value<'a>(schema: &Schema, data: &'a Value) -> Result<&'a Value, Error> {
    let issues = schema.issues(data);
    if issues.is_empty() {
        Ok(data)
    } else {
        Err(Error::Validation {
            message: render(&issues),
        })
    }
}

/// Validate a typed parameter struct through its serde representation,
/// returning it unchanged on success.
pub fn validate<'a, T: Serialize + ?Sized>(schema: &Schema, data: &'a T) -> Result<&'a T, Error> {
    let value = serde_json::to_value(data).map_err(|e| Error::Validation {
        message: format!("Validation error: parameters could not be serialized: {e}"),
    })?;
    validate_value(schema, &value)?;
    Ok(data)
}

// ── Schemas ──────────────────────────────────────────────────────────

pub const SHARING_VALUES: &[&str] = &["none", "private", "public"];
pub const ENTITY_VALUES: &[&str] = &["pageview", "event"];
pub const DATE_GROUPING_VALUES: &[&str] = &["hour", "day", "month", "year", "none"];
pub const FILTER_OPERATOR_VALUES: &[&str] = &["is", "is not", "is like", "is not like"];
pub const VERSION_VALUES: &[&str] = &["v1"];

fn private_sharing_has_password(obj: &Map<String, Value>) -> bool {
    let private = obj.get("sharing").and_then(Value::as_str) == Some("private");
    let has_password = obj
        .get("share_password")
        .and_then(Value::as_str)
        .is_some_and(|p| !p.is_empty());
    !private || has_password
}

const SHARE_PASSWORD_RULE: Refinement = Refinement {
    path: "share_password",
    message: "share_password is required when sharing is set to 'private'",
    check: private_sharing_has_password,
};

/// `limit` 1..=100 plus the two cursors.
pub static PAGINATION: LazyLock<Schema> = LazyLock::new(|| {
    Schema::object()
        .optional("limit", Rule::number().min(1).max(100))
        .optional("starting_after", Rule::string())
        .optional("ending_before", Rule::string())
});

pub static CREATE_SITE: LazyLock<Schema> = LazyLock::new(|| {
    Schema::object()
        .required("name", Rule::string().min(1).max(255))
        .optional("sharing", Rule::one_of(SHARING_VALUES))
        .optional("share_password", Rule::string().min(1))
        .refine(SHARE_PASSWORD_RULE)
});

pub static UPDATE_SITE: LazyLock<Schema> = LazyLock::new(|| {
    Schema::object()
        .optional("name", Rule::string().min(1).max(255))
        .optional("sharing", Rule::one_of(SHARING_VALUES))
        .optional("share_password", Rule::string().min(1))
        .refine(SHARE_PASSWORD_RULE)
});

pub static CREATE_EVENT: LazyLock<Schema> =
    LazyLock::new(|| Schema::object().required("name", Rule::string().min(1).max(255)));

pub static UPDATE_EVENT: LazyLock<Schema> =
    LazyLock::new(|| Schema::object().required("name", Rule::string().min(1).max(255)));

fn aggregation_filter() -> Schema {
    Schema::object()
        .required("property", Rule::string())
        .required("operator", Rule::one_of(FILTER_OPERATOR_VALUES))
        .required("value", Rule::string())
}

pub static AGGREGATION: LazyLock<Schema> = LazyLock::new(|| {
    Schema::object()
        .required("entity", Rule::one_of(ENTITY_VALUES))
        .required("entity_id", Rule::string().min(1))
        .required("aggregates", Rule::string().min(1))
        .optional("date_grouping", Rule::one_of(DATE_GROUPING_VALUES))
        .optional("field_grouping", Rule::string())
        .optional("sort_by", Rule::string())
        .optional("timezone", Rule::string())
        .optional("date_from", Rule::string())
        .optional("date_to", Rule::string())
        .optional("limit", Rule::number().positive())
        .optional(
            "filters",
            Rule::array_of(Rule::Object(aggregation_filter())),
        )
});

pub static CURRENT_VISITORS: LazyLock<Schema> = LazyLock::new(|| {
    Schema::object()
        .required("site_id", Rule::string().min(1))
        .optional("detailed", Rule::Bool)
});

pub static CLIENT_OPTIONS: LazyLock<Schema> = LazyLock::new(|| {
    Schema::object()
        .required("token", Rule::string().min(1))
        .optional("version", Rule::one_of(VERSION_VALUES))
        .optional("base_url", Rule::Url)
});
