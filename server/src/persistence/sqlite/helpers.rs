//! Shared helpers for SQLite ↔ domain conversions and predicate translation.

use roster::{Comparison, Field, Predicate, Profession, Race, Value};
use sqlx::{QueryBuilder, Sqlite};

use crate::persistence::PersistenceError;

// ── Columns ────────────────────────────────────────────────────────────

/// Column holding `field`.
pub fn column(field: Field) -> &'static str {
    match field {
        Field::Id => "id",
        Field::Name => "name",
        Field::Title => "title",
        Field::Race => "race",
        Field::Profession => "profession",
        Field::Birthday => "birthday",
        Field::Banned => "banned",
        Field::Experience => "experience",
        Field::Level => "level",
        Field::UntilNextLevel => "until_next_level",
    }
}

// ── Predicate translation ──────────────────────────────────────────────

/// Append ` WHERE c1 AND c2 ...` for `predicate`. Appends nothing for the
/// match-everything predicate.
pub fn push_predicate(qb: &mut QueryBuilder<'_, Sqlite>, predicate: &Predicate) {
    for (i, condition) in predicate.conditions().iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        qb.push(column(condition.field));
        match &condition.comparison {
            Comparison::Contains(needle) => {
                qb.push(" LIKE ");
                qb.push_bind(like_pattern(needle));
                qb.push(" ESCAPE '\\'");
            }
            Comparison::Equals(value) => {
                qb.push(" = ");
                push_value(qb, value);
            }
            Comparison::GreaterThan(n) | Comparison::After(n) => {
                qb.push(" > ");
                qb.push_bind(*n);
            }
            Comparison::LessThan(n) | Comparison::Before(n) => {
                qb.push(" < ");
                qb.push_bind(*n);
            }
        }
    }
}

fn push_value(qb: &mut QueryBuilder<'_, Sqlite>, value: &Value) {
    match value {
        Value::Integer(n) | Value::Timestamp(n) => qb.push_bind(*n),
        Value::Text(s) => qb.push_bind(s.clone()),
        Value::Boolean(b) => qb.push_bind(i64::from(*b)),
        Value::Race(r) => qb.push_bind(r.as_str()),
        Value::Profession(p) => qb.push_bind(p.as_str()),
    };
}

/// `%needle%` with LIKE metacharacters escaped by `\`.
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ── Enums ──────────────────────────────────────────────────────────────

pub fn decode_race(id: i64, s: &str) -> Result<Race, PersistenceError> {
    s.parse().map_err(|_| PersistenceError::CorruptRow {
        id,
        reason: format!("unknown race {s:?}"),
    })
}

pub fn decode_profession(id: i64, s: &str) -> Result<Profession, PersistenceError> {
    s.parse().map_err(|_| PersistenceError::CorruptRow {
        id,
        reason: format!("unknown profession {s:?}"),
    })
}
