/*!
# Column Value Descriptors

A [`ValueDescriptor`] binds one CSV column to one declared field of the
target record type, together with the [`Conversion`] used to turn cell text
into a [`Value`] and back.

Column nodes carry:
- `field`: name of the bound field (required)
- `format`: conversion pattern override (optional, meaning depends on the field kind)

| kind | pattern | default |
|---|---|---|
| `Date` | chrono strftime | `%Y-%m-%d` |
| `DateTime` | chrono strftime | `%Y-%m-%dT%H:%M:%S` |
| `Float` | `0`, `0.0`, `0.00`, ... (decimal places) | shortest round-trip |
| `Boolean` | `true-token/false-token` | `true/false` |
| `Text`, `Integer` | none accepted | |
*/

use crate::{
    errors::{DescriptorError, DescriptorResult},
    record::{FieldKind, RecordType, Value},
};
use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};
use csvmap_config::ConfigNode;
use std::fmt::Write;

/// Attribute naming the bound field
pub const FIELD_ATTRIBUTE: &str = "field";
/// Attribute carrying the conversion pattern override
pub const FORMAT_ATTRIBUTE: &str = "format";

pub const DEFAULT_DATE_PATTERN: &str = "%Y-%m-%d";
pub const DEFAULT_DATE_TIME_PATTERN: &str = "%Y-%m-%dT%H:%M:%S";

/// How a column's text maps to a field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    Text,
    Integer,
    /// Fixed number of decimal places on output when set
    Float { decimals: Option<usize> },
    Boolean { true_token: String, false_token: String },
    Date { pattern: String },
    DateTime { pattern: String },
}

impl Conversion {
    /// Build the conversion for a field kind, validating an optional pattern
    pub fn for_kind(kind: FieldKind, pattern: Option<&str>) -> Result<Self, String> {
        match (kind, pattern) {
            (FieldKind::Text, None) => Ok(Conversion::Text),
            (FieldKind::Integer, None) => Ok(Conversion::Integer),
            (FieldKind::Text | FieldKind::Integer, Some(_)) => {
                Err(format!("{:?} fields take no conversion pattern", kind))
            }
            (FieldKind::Float, None) => Ok(Conversion::Float { decimals: None }),
            (FieldKind::Float, Some(p)) => Ok(Conversion::Float {
                decimals: Some(parse_decimals(p)?),
            }),
            (FieldKind::Boolean, None) => Ok(Conversion::Boolean {
                true_token: "true".to_string(),
                false_token: "false".to_string(),
            }),
            (FieldKind::Boolean, Some(p)) => {
                let (true_token, false_token) = parse_boolean_tokens(p)?;
                Ok(Conversion::Boolean {
                    true_token,
                    false_token,
                })
            }
            (FieldKind::Date, p) => {
                let pattern = p.unwrap_or(DEFAULT_DATE_PATTERN);
                check_strftime(pattern)?;
                let sample = sample_date();
                let text = render(sample.format(pattern))
                    .map_err(|_| "pattern uses fields a date does not have".to_string())?;
                if NaiveDate::parse_from_str(&text, pattern).ok() != Some(sample) {
                    return Err("pattern cannot read back the dates it writes".to_string());
                }
                Ok(Conversion::Date {
                    pattern: pattern.to_string(),
                })
            }
            (FieldKind::DateTime, p) => {
                let pattern = p.unwrap_or(DEFAULT_DATE_TIME_PATTERN);
                check_strftime(pattern)?;
                let sample = sample_date_time();
                let text = render(sample.format(pattern))
                    .map_err(|_| "pattern uses fields a date-time does not have".to_string())?;
                if NaiveDateTime::parse_from_str(&text, pattern).ok() != Some(sample) {
                    return Err("pattern cannot read back the date-times it writes".to_string());
                }
                Ok(Conversion::DateTime {
                    pattern: pattern.to_string(),
                })
            }
        }
    }

    /// Parse non-null cell text
    pub fn parse(&self, text: &str) -> Result<Value, String> {
        match self {
            Conversion::Text => Ok(Value::Text(text.to_string())),
            Conversion::Integer => text
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|e| format!("invalid integer '{}': {}", text, e)),
            Conversion::Float { .. } => text
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| format!("invalid number '{}': {}", text, e)),
            Conversion::Boolean {
                true_token,
                false_token,
            } => {
                let text = text.trim();
                if text.eq_ignore_ascii_case(true_token) {
                    Ok(Value::Boolean(true))
                } else if text.eq_ignore_ascii_case(false_token) {
                    Ok(Value::Boolean(false))
                } else {
                    Err(format!(
                        "invalid boolean '{}', expected '{}' or '{}'",
                        text, true_token, false_token
                    ))
                }
            }
            Conversion::Date { pattern } => NaiveDate::parse_from_str(text.trim(), pattern)
                .map(Value::Date)
                .map_err(|e| format!("invalid date '{}' for pattern '{}': {}", text, pattern, e)),
            Conversion::DateTime { pattern } => {
                NaiveDateTime::parse_from_str(text.trim(), pattern)
                    .map(Value::DateTime)
                    .map_err(|e| {
                        format!(
                            "invalid date-time '{}' for pattern '{}': {}",
                            text, pattern, e
                        )
                    })
            }
        }
    }

    /// Render a non-null value
    pub fn format(&self, value: &Value) -> Result<String, String> {
        match (self, value) {
            (Conversion::Text, Value::Text(s)) => Ok(s.clone()),
            (Conversion::Integer, Value::Integer(i)) => Ok(i.to_string()),
            (Conversion::Float { decimals }, Value::Float(x)) => Ok(format_float(*x, *decimals)),
            (Conversion::Float { decimals }, Value::Integer(i)) => {
                Ok(format_float(*i as f64, *decimals))
            }
            (
                Conversion::Boolean {
                    true_token,
                    false_token,
                },
                Value::Boolean(b),
            ) => {
                let token = if *b { true_token } else { false_token };
                Ok(token.clone())
            }
            (Conversion::Date { pattern }, Value::Date(d)) => render(d.format(pattern))
                .map_err(|_| format!("cannot format {} with '{}'", d, pattern)),
            (Conversion::DateTime { pattern }, Value::DateTime(dt)) => render(dt.format(pattern))
                .map_err(|_| format!("cannot format {} with '{}'", dt, pattern)),
            (conversion, value) => Err(format!(
                "value {:?} does not match conversion {:?}",
                value, conversion
            )),
        }
    }
}

fn parse_decimals(pattern: &str) -> Result<usize, String> {
    if pattern == "0" {
        return Ok(0);
    }
    match pattern.strip_prefix("0.") {
        Some(zeros) if !zeros.is_empty() && zeros.chars().all(|c| c == '0') => Ok(zeros.len()),
        _ => Err("expected '0' or '0.' followed by zeros".to_string()),
    }
}

fn parse_boolean_tokens(pattern: &str) -> Result<(String, String), String> {
    let (t, f) = pattern
        .split_once('/')
        .filter(|(_, f)| !f.contains('/'))
        .ok_or_else(|| "expected 'true-token/false-token'".to_string())?;
    let (t, f) = (t.trim(), f.trim());
    if t.is_empty() || f.is_empty() {
        return Err("boolean tokens must not be empty".to_string());
    }
    if t.eq_ignore_ascii_case(f) {
        return Err("boolean tokens must differ".to_string());
    }
    Ok((t.to_string(), f.to_string()))
}

// Every field distinct and non-zero, seconds left at zero so minute-precision
// patterns still read back the same value.
fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2001, 2, 3).unwrap_or_default()
}

fn sample_date_time() -> NaiveDateTime {
    sample_date().and_hms_opt(4, 5, 0).unwrap_or_default()
}

fn check_strftime(pattern: &str) -> Result<(), String> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err("invalid strftime specifier".to_string());
    }
    Ok(())
}

// Display on a chrono format fails instead of producing text when the pattern
// asks for fields the value lacks; `to_string` would panic on that.
fn render(display: impl std::fmt::Display) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write!(out, "{}", display)?;
    Ok(out)
}

fn format_float(x: f64, decimals: Option<usize>) -> String {
    match decimals {
        Some(places) => format!("{:.*}", places, x),
        None => x.to_string(),
    }
}

/// Binding of one CSV column to one record field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDescriptor {
    field_name: String,
    kind: FieldKind,
    conversion: Conversion,
}

impl ValueDescriptor {
    /// Build a column binding from its configuration node
    ///
    /// The field must be declared on `record_type`, so bindings are checked
    /// before any row is processed.
    pub fn new(node: &ConfigNode, record_type: &RecordType) -> DescriptorResult<Self> {
        let field_name = node.attribute(FIELD_ATTRIBUTE).ok_or_else(|| {
            DescriptorError::InvalidColumnBinding(format!(
                "column node '{}' is missing the '{}' attribute",
                node.name(),
                FIELD_ATTRIBUTE
            ))
        })?;

        let field = record_type.field(field_name).ok_or_else(|| {
            DescriptorError::InvalidColumnBinding(format!(
                "field '{}' is not declared by '{}'",
                field_name,
                record_type.name()
            ))
        })?;

        let pattern = node.attribute(FORMAT_ATTRIBUTE);
        let conversion = Conversion::for_kind(field.kind, pattern).map_err(|message| {
            DescriptorError::InvalidConversionPattern {
                field: field_name.to_string(),
                pattern: pattern.unwrap_or_default().to_string(),
                message,
            }
        })?;

        Ok(Self {
            field_name: field_name.to_string(),
            kind: field.kind,
            conversion,
        })
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn conversion(&self) -> &Conversion {
        &self.conversion
    }

    /// Convert non-null cell text into a field value
    pub fn parse(&self, text: &str) -> Result<Value, String> {
        self.conversion.parse(text)
    }

    /// Convert a non-null field value into cell text
    pub fn format(&self, value: &Value) -> Result<String, String> {
        self.conversion.format(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorReason;
    use crate::record::{FieldDef, Record};

    #[derive(Default)]
    struct Event;

    const EVENT_FIELDS: &[FieldDef] = &[
        FieldDef::new("title", FieldKind::Text),
        FieldDef::new("seats", FieldKind::Integer),
        FieldDef::new("price", FieldKind::Float),
        FieldDef::new("public", FieldKind::Boolean),
        FieldDef::new("day", FieldKind::Date),
        FieldDef::new("starts", FieldKind::DateTime),
    ];

    impl Record for Event {
        fn fields() -> &'static [FieldDef] {
            EVENT_FIELDS
        }

        fn get(&self, _field: &str) -> Option<Value> {
            None
        }

        fn set(&mut self, field: &str, _value: Value) -> Result<(), String> {
            Err(format!("read-only field {}", field))
        }
    }

    fn column(field: &str, format: Option<&str>) -> DescriptorResult<ValueDescriptor> {
        let mut node = ConfigNode::new("columns").with_attribute(FIELD_ATTRIBUTE, field);
        if let Some(format) = format {
            node = node.with_attribute(FORMAT_ATTRIBUTE, format);
        }
        ValueDescriptor::new(&node, &RecordType::of::<Event>("fixture.Event"))
    }

    #[test]
    fn test_binding_picks_conversion_from_field_kind() {
        let title = column("title", None).unwrap();
        assert_eq!(title.field_name(), "title");
        assert_eq!(title.kind(), FieldKind::Text);
        assert_eq!(title.conversion(), &Conversion::Text);

        let day = column("day", None).unwrap();
        assert_eq!(
            day.conversion(),
            &Conversion::Date {
                pattern: DEFAULT_DATE_PATTERN.to_string()
            }
        );
    }

    #[test]
    fn test_missing_field_attribute() {
        let node = ConfigNode::new("columns").with_attribute(FORMAT_ATTRIBUTE, "0.00");
        let err = ValueDescriptor::new(&node, &RecordType::of::<Event>("fixture.Event"))
            .unwrap_err();
        assert_eq!(err.reason(), ErrorReason::InvalidColumnBinding);
    }

    #[test]
    fn test_undeclared_field() {
        let err = column("organizer", None).unwrap_err();
        assert_eq!(err.reason(), ErrorReason::InvalidColumnBinding);
        assert!(err.to_string().contains("organizer"));
    }

    #[test]
    fn test_pattern_validation() {
        assert_eq!(
            column("title", Some("upper")).unwrap_err().reason(),
            ErrorReason::InvalidConversionPattern
        );
        assert_eq!(
            column("seats", Some("0")).unwrap_err().reason(),
            ErrorReason::InvalidConversionPattern
        );
        assert_eq!(
            column("price", Some("#.##")).unwrap_err().reason(),
            ErrorReason::InvalidConversionPattern
        );
        assert_eq!(
            column("public", Some("yes")).unwrap_err().reason(),
            ErrorReason::InvalidConversionPattern
        );
        assert_eq!(
            column("public", Some("Y/y")).unwrap_err().reason(),
            ErrorReason::InvalidConversionPattern
        );
        assert_eq!(
            column("day", Some("%Q")).unwrap_err().reason(),
            ErrorReason::InvalidConversionPattern
        );
        assert_eq!(
            column("day", Some("%Y-%m-%d %H:%M")).unwrap_err().reason(),
            ErrorReason::InvalidConversionPattern
        );
        assert_eq!(
            column("day", Some("%Y")).unwrap_err().reason(),
            ErrorReason::InvalidConversionPattern
        );
        assert_eq!(
            column("starts", Some("%Y-%m-%d")).unwrap_err().reason(),
            ErrorReason::InvalidConversionPattern
        );
        assert_eq!(
            column("public", Some("on/off/maybe")).unwrap_err().reason(),
            ErrorReason::InvalidConversionPattern
        );
        assert!(column("starts", Some("%d.%m.%Y %H:%M")).is_ok());
        assert!(column("day", Some("%d/%m/%y")).is_ok());
    }

    #[test]
    fn test_float_decimals() {
        let price = column("price", Some("0.00")).unwrap();
        assert_eq!(price.conversion(), &Conversion::Float { decimals: Some(2) });
        assert_eq!(price.format(&Value::Float(7.4567)).unwrap(), "7.46");
        assert_eq!(price.format(&Value::Integer(2)).unwrap(), "2.00");
        assert_eq!(price.parse(" 9.5 ").unwrap(), Value::Float(9.5));

        let whole = column("price", Some("0")).unwrap();
        assert_eq!(whole.format(&Value::Float(2.6)).unwrap(), "3");
    }

    #[test]
    fn test_boolean_tokens() {
        let public = column("public", Some("yes/no")).unwrap();
        assert_eq!(public.parse("YES").unwrap(), Value::Boolean(true));
        assert_eq!(public.parse("no").unwrap(), Value::Boolean(false));
        assert!(public.parse("true").is_err());
        assert_eq!(public.format(&Value::Boolean(false)).unwrap(), "no");
    }

    #[test]
    fn test_date_patterns() {
        let day = column("day", Some("%d/%m/%Y")).unwrap();
        let parsed = day.parse("24/12/2025").unwrap();
        assert_eq!(
            parsed,
            Value::Date(NaiveDate::from_ymd_opt(2025, 12, 24).unwrap())
        );
        assert_eq!(day.format(&parsed).unwrap(), "24/12/2025");
        assert!(day.parse("2025-12-24").is_err());

        let starts = column("starts", None).unwrap();
        let parsed = starts.parse("2025-12-24T18:30:00").unwrap();
        assert_eq!(starts.format(&parsed).unwrap(), "2025-12-24T18:30:00");
    }

    #[test]
    fn test_integer_and_mismatched_values() {
        let seats = column("seats", None).unwrap();
        assert_eq!(seats.parse("120").unwrap(), Value::Integer(120));
        assert!(seats.parse("12.5").is_err());
        assert!(seats.format(&Value::Text("many".to_string())).is_err());
        assert!(seats.format(&Value::Null).is_err());
    }
}
