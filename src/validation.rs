//! Declarative request schemas and the single validator that evaluates them.
//!
//! A [`Schema`] is plain data. [`validate`] walks it against an untyped JSON body and either
//! returns the cleaned values (defaults applied) or every problem found, keyed by field name.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::{Map, Value};

/// Error messages per field name. Errors that are not about one field sit under `non_field_errors`.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub const NON_FIELD_ERRORS: &str = "non_field_errors";

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_BLANK: &str = "This field may not be blank.";
const NOT_A_STRING: &str = "Not a valid string.";
const NOT_AN_INTEGER: &str = "A valid integer is required.";
const NOT_A_BOOLEAN: &str = "Must be a valid boolean.";
const BAD_DATE: &str = "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy)]
pub enum Kind {
    Text { max_length: Option<usize>, allow_blank: bool },
    /// Fits a Postgres `integer`.
    Integer,
    Date,
    Boolean,
    Choice(&'static [&'static str]),
}

/// Value used when an optional field is absent.
#[derive(Debug, Clone, Copy)]
pub enum Preset {
    Text(&'static str),
    Bool(bool),
}

impl Preset {
    fn to_value(self) -> Value {
        match self {
            Preset::Text(text) => Value::String(text.to_string()),
            Preset::Bool(flag) => Value::Bool(flag),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: Kind,
    pub required: bool,
    pub allow_null: bool,
    pub default: Option<Preset>,
}

impl Field {
    pub const fn new(name: &'static str, kind: Kind) -> Self {
        Field { name, kind, required: true, allow_null: false, default: None }
    }

    /// Defaults only fill in fields that are not required.
    pub const fn with_default(self, default: Preset) -> Self {
        Field { default: Some(default), ..self }
    }

    pub const fn optional(self) -> Self {
        Field { required: false, ..self }
    }

    pub const fn nullable(self) -> Self {
        Field { allow_null: true, ..self }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [Field],
}

pub fn validate(schema: &Schema, input: &Value) -> Result<Map<String, Value>, FieldErrors> {
    let Some(object) = input.as_object() else {
        let message = format!("Invalid data. Expected a dictionary, but got {}.", kind_name(input));
        return Err(FieldErrors::from([(NON_FIELD_ERRORS.to_string(), vec![message])]));
    };

    let mut validated = Map::new();
    let mut errors = FieldErrors::new();
    for field in schema.fields {
        let outcome = match object.get(field.name) {
            None if field.required => Err(vec![REQUIRED.to_string()]),
            None => Ok(field.default.map(Preset::to_value)),
            Some(Value::Null) if field.allow_null => Ok(field.default.map(Preset::to_value)),
            Some(Value::Null) => Err(vec![NOT_NULL.to_string()]),
            Some(value) => clean(field.kind, value).map(Some),
        };
        match outcome {
            Ok(Some(value)) => {
                validated.insert(field.name.to_string(), value);
            }
            Ok(None) => {}
            Err(messages) => {
                errors.insert(field.name.to_string(), messages);
            }
        }
    }

    if errors.is_empty() {
        Ok(validated)
    } else {
        Err(errors)
    }
}

fn clean(kind: Kind, value: &Value) -> Result<Value, Vec<String>> {
    match kind {
        Kind::Text { max_length, allow_blank } => {
            let text = match value {
                Value::String(text) => text.trim().to_string(),
                Value::Number(number) => number.to_string(),
                _ => return Err(vec![NOT_A_STRING.to_string()]),
            };
            if text.is_empty() && !allow_blank {
                return Err(vec![NOT_BLANK.to_string()]);
            }
            match max_length {
                Some(max) if text.chars().count() > max => {
                    Err(vec![format!("Ensure this field has no more than {max} characters.")])
                }
                _ => Ok(Value::String(text)),
            }
        }
        Kind::Integer => {
            let number = integer(value).ok_or_else(|| vec![NOT_AN_INTEGER.to_string()])?;
            if number > i64::from(i32::MAX) {
                Err(vec![format!("Ensure this value is less than or equal to {}.", i32::MAX)])
            } else if number < i64::from(i32::MIN) {
                Err(vec![format!("Ensure this value is greater than or equal to {}.", i32::MIN)])
            } else {
                Ok(Value::from(number))
            }
        }
        Kind::Date => value
            .as_str()
            .and_then(|text| NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok())
            .map(|date| Value::String(date.format(DATE_FORMAT).to_string()))
            .ok_or_else(|| vec![BAD_DATE.to_string()]),
        Kind::Boolean => boolean(value)
            .map(Value::Bool)
            .ok_or_else(|| vec![NOT_A_BOOLEAN.to_string()]),
        Kind::Choice(choices) => {
            let raw = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            if choices.contains(&raw.as_str()) {
                Ok(Value::String(raw))
            } else {
                Err(vec![format!("\"{raw}\" is not a valid choice.")])
            }
        }
    }
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.fract() == 0.0 && float.abs() < 1e18)
                .map(|float| float as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => match number.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
