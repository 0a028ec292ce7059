//! Attribute filter engine.
//!
//! Evaluates a `(field, operator, value)` predicate against each record's
//! attribute map. The user value arrives as text and is coerced against
//! whatever the record holds for that field.

use crate::models::record::MovieRecord;
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Filter operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Equals,
    GreaterThan,
    LessThan,
    Contains,
}

impl FromStr for FilterOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "equals" | "eq" | "=" => Ok(FilterOp::Equals),
            "greater_than" | "greater than" | "gt" | ">" => Ok(FilterOp::GreaterThan),
            "less_than" | "less than" | "lt" | "<" => Ok(FilterOp::LessThan),
            "contains" => Ok(FilterOp::Contains),
            other => Err(Error::InvalidFilter(format!("unknown operator '{}'", other))),
        }
    }
}

impl std::fmt::Display for FilterOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterOp::Equals => write!(f, "equals"),
            FilterOp::GreaterThan => write!(f, "greater_than"),
            FilterOp::LessThan => write!(f, "less_than"),
            FilterOp::Contains => write!(f, "contains"),
        }
    }
}

/// A parsed filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: String,
}

impl Filter {
    pub fn new(field: &str, op: &str, value: &str) -> Result<Self> {
        if field.trim().is_empty() {
            return Err(Error::InvalidFilter("empty field".to_string()));
        }
        if value.is_empty() {
            return Err(Error::InvalidFilter("empty value".to_string()));
        }
        Ok(Self {
            field: field.trim().to_string(),
            op: op.parse()?,
            value: value.to_string(),
        })
    }

    /// Whether an attribute map satisfies the filter.
    ///
    /// Records without the field never match.
    pub fn matches(&self, attributes: &Map<String, Value>) -> bool {
        match attributes.get(&self.field) {
            Some(item) => compare(item, self.op, &self.value),
            None => false,
        }
    }

    /// Records matching the filter, in input order.
    pub fn apply<'a>(&self, records: &'a [MovieRecord]) -> Vec<&'a MovieRecord> {
        records
            .iter()
            .filter(|r| self.matches(&r.attributes()))
            .collect()
    }
}

/// Filter `records` by `field`/`op`/`raw_value`, keeping input order.
pub fn apply<'a>(
    records: &'a [MovieRecord],
    field: &str,
    op: &str,
    raw_value: &str,
) -> Result<Vec<&'a MovieRecord>> {
    Ok(Filter::new(field, op, raw_value)?.apply(records))
}

/// Compare one attribute value against the raw user text.
///
/// A numeric item turns the raw text into a number. If that parse fails
/// the item drops to its string form and the comparison is textual, which
/// also means `greater_than`/`less_than` can no longer match.
fn compare(item: &Value, op: FilterOp, raw: &str) -> bool {
    let numeric = match item {
        Value::Number(n) => n.as_f64().zip(raw.trim().parse::<f64>().ok()),
        _ => None,
    };

    match (op, numeric) {
        (FilterOp::Equals, Some((item, wanted))) => item == wanted,
        (FilterOp::Equals, None) => display(item) == raw,
        (FilterOp::GreaterThan, Some((item, wanted))) => item > wanted,
        (FilterOp::LessThan, Some((item, wanted))) => item < wanted,
        (FilterOp::GreaterThan | FilterOp::LessThan, None) => false,
        // Numbers are matched in their JSON form, so `1999` contains "99".
        (FilterOp::Contains, _) => display(item).to_lowercase().contains(&raw.to_lowercase()),
    }
}

/// String form of an attribute value.
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
