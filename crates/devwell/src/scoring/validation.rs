use serde_json::{Map, Value};

use super::MetricRange;

/// Field-level rejection raised while checking an inbound payload. Checks fail fast on
/// the first offending field, except `MissingFields` which lists every absent one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("Missing {group}: {field}")]
    MissingField { group: &'static str, field: String },
    #[error("Missing {group}: {}", fields.join(", "))]
    MissingFields {
        group: &'static str,
        fields: Vec<String>,
    },
    #[error("Invalid type for {field}: expected {expected}")]
    InvalidType {
        field: String,
        expected: &'static str,
    },
    #[error("{} {field}: must be between {min} and {max}", style.prefix())]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        style: RangeStyle,
    },
}

impl FieldError {
    pub fn field(&self) -> &str {
        match self {
            FieldError::MissingFields { fields, .. } => {
                fields.first().map(String::as_str).unwrap_or_default()
            }
            FieldError::MissingField { field, .. }
            | FieldError::InvalidType { field, .. }
            | FieldError::OutOfRange { field, .. } => field,
        }
    }
}

/// Wording used when a value falls outside its range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RangeStyle {
    /// "Invalid value for level: must be between 1 and 10"
    #[default]
    InvalidValueFor,
    /// "Invalid eyeStrain: must be between 0 and 100"
    Invalid,
}

impl RangeStyle {
    fn prefix(self) -> &'static str {
        match self {
            RangeStyle::InvalidValueFor => "Invalid value for",
            RangeStyle::Invalid => "Invalid",
        }
    }
}

/// Borrowed view over one JSON object whose fields belong to a named group
/// ("work pattern", "health risk", ...). The group only shapes error messages.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    group: &'static str,
    object: Option<&'a Map<String, Value>>,
    range_style: RangeStyle,
}

impl<'a> Fields<'a> {
    pub fn new(group: &'static str, object: &'a Map<String, Value>) -> Self {
        Self {
            group,
            object: Some(object),
            range_style: RangeStyle::default(),
        }
    }

    pub fn with_range_style(self, range_style: RangeStyle) -> Self {
        Self {
            range_style,
            ..self
        }
    }

    /// Resolve `key` inside `parent` as a nested object. An absent or null section reads
    /// as empty so the first required field inside it is reported missing.
    pub fn section(
        group: &'static str,
        parent: &'a Map<String, Value>,
        key: &str,
    ) -> Result<Self, FieldError> {
        match parent.get(key) {
            None | Some(Value::Null) => Ok(Self {
                group,
                object: None,
                range_style: RangeStyle::default(),
            }),
            Some(Value::Object(object)) => Ok(Self::new(group, object)),
            Some(_) => Err(FieldError::InvalidType {
                field: key.to_string(),
                expected: "object",
            }),
        }
    }

    pub fn require(&self, field: &str) -> Result<&'a Value, FieldError> {
        match self.object.and_then(|object| object.get(field)) {
            None | Some(Value::Null) => Err(FieldError::MissingField {
                group: self.group,
                field: field.to_string(),
            }),
            Some(value) => Ok(value),
        }
    }

    /// Numeric field inside an inclusive range. Values outside are rejected, never clamped.
    pub fn number(&self, field: &str, range: MetricRange) -> Result<f64, FieldError> {
        let value = self
            .require(field)?
            .as_f64()
            .ok_or_else(|| invalid_type(field, "number"))?;

        if !range.contains(value) {
            return Err(FieldError::OutOfRange {
                field: field.to_string(),
                min: range.min,
                max: range.max,
                style: self.range_style,
            });
        }

        Ok(value)
    }

    /// Whole-number field inside an inclusive range. Integral floats such as `5.0` count.
    pub fn integer(&self, field: &str, min: i64, max: i64) -> Result<i64, FieldError> {
        let value = self.require(field)?;
        let value = value
            .as_i64()
            .or_else(|| {
                value
                    .as_f64()
                    .filter(|number| number.fract() == 0.0 && number.abs() <= i64::MAX as f64)
                    .map(|number| number as i64)
            })
            .ok_or_else(|| invalid_type(field, "integer"))?;

        if !(min..=max).contains(&value) {
            return Err(FieldError::OutOfRange {
                field: field.to_string(),
                min: min as f64,
                max: max as f64,
                style: self.range_style,
            });
        }

        Ok(value)
    }

    pub fn string(&self, field: &str) -> Result<String, FieldError> {
        self.require(field)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| invalid_type(field, "string"))
    }

    pub fn string_list(&self, field: &str) -> Result<Vec<String>, FieldError> {
        let items = self
            .require(field)?
            .as_array()
            .ok_or_else(|| invalid_type(field, "list of strings"))?;

        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| invalid_type(field, "list of strings"))
            })
            .collect()
    }

    /// Presence-only check; the value is passed through untouched.
    pub fn present(&self, field: &str) -> Result<(), FieldError> {
        self.require(field).map(|_| ())
    }

    /// Presence check over several fields at once, naming every absent one.
    pub fn present_all<'f>(
        &self,
        fields: impl IntoIterator<Item = &'f str>,
    ) -> Result<(), FieldError> {
        let missing: Vec<String> = fields
            .into_iter()
            .filter(|field| self.require(field).is_err())
            .map(str::to_string)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(FieldError::MissingFields {
                group: self.group,
                fields: missing,
            })
        }
    }
}

fn invalid_type(field: &str, expected: &'static str) -> FieldError {
    FieldError::InvalidType {
        field: field.to_string(),
        expected,
    }
}
