//! Dynamic search filters.
//!
//! A [`Criterion`] is the untyped instruction a caller sends (field name,
//! operator, raw value). [`build_predicate`] checks each one against the
//! static field table below, coerces its value and folds the results into a
//! conjunctive [`Predicate`] that stores can evaluate or translate.

mod coercion;
mod predicate;

pub use coercion::{coerce, Value};
pub use predicate::{build_predicate, Comparison, Condition, Predicate};

use crate::error::RosterError;
use std::fmt;
use std::str::FromStr;

/// Declared kind of a player attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Text,
    Boolean,
    Timestamp,
    Race,
    Profession,
}

impl FieldKind {
    /// Operators a criterion on an attribute of this kind may use.
    pub fn allows(self, op: QueryOperator) -> bool {
        match op {
            QueryOperator::Equals => true,
            QueryOperator::Like => self == Self::Text,
            QueryOperator::GreaterThan | QueryOperator::LessThan => self == Self::Integer,
            QueryOperator::AfterThan | QueryOperator::BeforeThan => self == Self::Timestamp,
        }
    }
}

/// Filterable player attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Title,
    Race,
    Profession,
    Birthday,
    Banned,
    Experience,
    Level,
    UntilNextLevel,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Self::Id,
        Self::Name,
        Self::Title,
        Self::Race,
        Self::Profession,
        Self::Birthday,
        Self::Banned,
        Self::Experience,
        Self::Level,
        Self::UntilNextLevel,
    ];

    /// Attribute name as it appears on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Title => "title",
            Self::Race => "race",
            Self::Profession => "profession",
            Self::Birthday => "birthday",
            Self::Banned => "banned",
            Self::Experience => "experience",
            Self::Level => "level",
            Self::UntilNextLevel => "untilNextLevel",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::Id | Self::Experience | Self::Level | Self::UntilNextLevel => FieldKind::Integer,
            Self::Name | Self::Title => FieldKind::Text,
            Self::Race => FieldKind::Race,
            Self::Profession => FieldKind::Profession,
            Self::Birthday => FieldKind::Timestamp,
            Self::Banned => FieldKind::Boolean,
        }
    }
}

impl FromStr for Field {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| RosterError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Comparison requested by a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryOperator {
    Like,
    Equals,
    GreaterThan,
    LessThan,
    AfterThan,
    BeforeThan,
}

impl QueryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "LIKE",
            Self::Equals => "EQUALS",
            Self::GreaterThan => "GREATER_THAN",
            Self::LessThan => "LESS_THAN",
            Self::AfterThan => "AFTER_THAN",
            Self::BeforeThan => "BEFORE_THAN",
        }
    }
}

impl fmt::Display for QueryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses operator names. The error carries no field, callers that know the
/// field should prefer [`Criterion::parse`].
impl FromStr for QueryOperator {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LIKE" => Ok(Self::Like),
            "EQUALS" => Ok(Self::Equals),
            "GREATER_THAN" => Ok(Self::GreaterThan),
            "LESS_THAN" => Ok(Self::LessThan),
            "AFTER_THAN" => Ok(Self::AfterThan),
            "BEFORE_THAN" => Ok(Self::BeforeThan),
            other => Err(RosterError::UnsupportedOperator {
                field: String::new(),
                operator: other.to_string(),
            }),
        }
    }
}

/// One caller-supplied filter instruction, before coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    pub field: Field,
    pub operator: QueryOperator,
    pub value: String,
}

impl Criterion {
    pub fn new(field: Field, operator: QueryOperator, value: impl Into<String>) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
        }
    }

    /// Build a criterion from untyped names, e.g. `("level", "GREATER_THAN", "5")`.
    pub fn parse(field: &str, operator: &str, value: &str) -> Result<Self, RosterError> {
        let field: Field = field.parse()?;
        let operator = operator
            .parse::<QueryOperator>()
            .map_err(|_| RosterError::UnsupportedOperator {
                field: field.name().to_string(),
                operator: operator.to_string(),
            })?;
        Ok(Self::new(field, operator, value))
    }
}
