use super::coercion::{coerce, Value};
use super::{Criterion, Field, QueryOperator};
use crate::error::RosterError;
use crate::player::PlayerRecord;

/// Operator paired with its coerced operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    /// Substring match on a text attribute.
    Contains(String),
    Equals(Value),
    GreaterThan(i64),
    LessThan(i64),
    /// Strictly later than the given epoch milliseconds.
    After(i64),
    /// Strictly earlier than the given epoch milliseconds.
    Before(i64),
}

/// A single typed test against one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub field: Field,
    pub comparison: Comparison,
}

impl Condition {
    /// Check the operator against the field table and coerce the value.
    pub fn from_criterion(criterion: &Criterion) -> Result<Self, RosterError> {
        let field = criterion.field;
        let operator = criterion.operator;
        if !field.kind().allows(operator) {
            return Err(RosterError::UnsupportedOperator {
                field: field.name().to_string(),
                operator: operator.as_str().to_string(),
            });
        }

        let value = coerce(field, &criterion.value)?;
        let comparison = match (operator, value) {
            (QueryOperator::Like, Value::Text(s)) => Comparison::Contains(s),
            (QueryOperator::Equals, v) => Comparison::Equals(v),
            (QueryOperator::GreaterThan, Value::Integer(n)) => Comparison::GreaterThan(n),
            (QueryOperator::LessThan, Value::Integer(n)) => Comparison::LessThan(n),
            (QueryOperator::AfterThan, Value::Timestamp(t)) => Comparison::After(t),
            (QueryOperator::BeforeThan, Value::Timestamp(t)) => Comparison::Before(t),
            _ => {
                return Err(RosterError::UnsupportedOperator {
                    field: field.name().to_string(),
                    operator: operator.as_str().to_string(),
                })
            }
        };

        Ok(Self { field, comparison })
    }

    pub fn matches(&self, record: &PlayerRecord) -> bool {
        let actual = attribute(record, self.field);
        match (&self.comparison, &actual) {
            (Comparison::Contains(needle), Value::Text(hay)) => hay.contains(needle.as_str()),
            (Comparison::Equals(expected), actual) => expected == actual,
            (Comparison::GreaterThan(n), Value::Integer(a)) => a > n,
            (Comparison::LessThan(n), Value::Integer(a)) => a < n,
            (Comparison::After(t), Value::Timestamp(a)) => a > t,
            (Comparison::Before(t), Value::Timestamp(a)) => a < t,
            _ => false,
        }
    }
}

/// Current value of `field` on `record`, in the field's declared kind.
fn attribute(record: &PlayerRecord, field: Field) -> Value {
    match field {
        Field::Id => Value::Integer(record.id.unwrap_or_default()),
        Field::Name => Value::Text(record.name.clone()),
        Field::Title => Value::Text(record.title.clone()),
        Field::Race => Value::Race(record.race),
        Field::Profession => Value::Profession(record.profession),
        Field::Birthday => Value::Timestamp(record.birthday),
        Field::Banned => Value::Boolean(record.banned),
        Field::Experience => Value::Integer(record.experience),
        Field::Level => Value::Integer(record.level()),
        Field::UntilNextLevel => Value::Integer(record.until_next_level()),
    }
}

/// Conjunction of conditions. No conditions matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    conditions: Vec<Condition>,
}

impl Predicate {
    /// The match-everything predicate.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, record: &PlayerRecord) -> bool {
        self.conditions.iter().all(|c| c.matches(record))
    }
}

/// AND together every criterion in `criteria`. The slice is left untouched
/// and its order has no effect on which records match.
pub fn build_predicate(criteria: &[Criterion]) -> Result<Predicate, RosterError> {
    criteria.iter().try_fold(Predicate::all(), |predicate, criterion| {
        Ok(predicate.and(Condition::from_criterion(criterion)?))
    })
}
