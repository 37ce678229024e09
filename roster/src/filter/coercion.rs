//! Raw criterion strings → typed values.

use super::{Field, FieldKind};
use crate::error::RosterError;
use crate::player::{Profession, Race};

/// A criterion value coerced to its field's declared kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    Text(String),
    Boolean(bool),
    /// Epoch milliseconds.
    Timestamp(i64),
    Race(Race),
    Profession(Profession),
}

/// Coerce `raw` to the kind `field` declares.
pub fn coerce(field: Field, raw: &str) -> Result<Value, RosterError> {
    let invalid = || RosterError::InvalidCriterionValue {
        field: field.name(),
        value: raw.to_string(),
    };

    match field.kind() {
        FieldKind::Integer => raw.parse::<i64>().map(Value::Integer).map_err(|_| invalid()),
        FieldKind::Timestamp => raw
            .parse::<i64>()
            .map(Value::Timestamp)
            .map_err(|_| invalid()),
        FieldKind::Boolean => {
            if raw.eq_ignore_ascii_case("true") {
                Ok(Value::Boolean(true))
            } else if raw.eq_ignore_ascii_case("false") {
                Ok(Value::Boolean(false))
            } else {
                Err(invalid())
            }
        }
        FieldKind::Race => raw.parse::<Race>().map(Value::Race).map_err(|_| invalid()),
        FieldKind::Profession => raw
            .parse::<Profession>()
            .map(Value::Profession)
            .map_err(|_| invalid()),
        FieldKind::Text => Ok(Value::Text(raw.to_string())),
    }
}
