//! Optional search parameters → criteria.
//!
//! Values stay raw strings here so that a malformed value is reported by
//! coercion as an invalid criterion instead of being lost at binding time.

use serde::Deserialize;

use crate::error::RosterError;
use crate::filter::{Criterion, Field, QueryOperator};
use crate::query::{PageRequest, PlayerOrder, DEFAULT_PAGE_SIZE};

/// Search parameters shared by list and count. Absent parameters add no
/// criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<String>,
    pub profession: Option<String>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub banned: Option<String>,
    pub min_experience: Option<String>,
    pub max_experience: Option<String>,
    pub min_level: Option<String>,
    pub max_level: Option<String>,
}

impl SearchParams {
    /// One criterion per present parameter.
    pub fn criteria(&self) -> Vec<Criterion> {
        let mapping: [(&Option<String>, Field, QueryOperator); 11] = [
            (&self.name, Field::Name, QueryOperator::Like),
            (&self.title, Field::Title, QueryOperator::Like),
            (&self.race, Field::Race, QueryOperator::Equals),
            (&self.profession, Field::Profession, QueryOperator::Equals),
            (&self.after, Field::Birthday, QueryOperator::AfterThan),
            (&self.before, Field::Birthday, QueryOperator::BeforeThan),
            (&self.banned, Field::Banned, QueryOperator::Equals),
            (&self.min_experience, Field::Experience, QueryOperator::GreaterThan),
            (&self.max_experience, Field::Experience, QueryOperator::LessThan),
            (&self.min_level, Field::Level, QueryOperator::GreaterThan),
            (&self.max_level, Field::Level, QueryOperator::LessThan),
        ];

        mapping
            .into_iter()
            .filter_map(|(value, field, op)| {
                value.as_deref().map(|v| Criterion::new(field, op, v))
            })
            .collect()
    }
}

/// List parameters: search plus ordering and paging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    #[serde(flatten)]
    pub search: SearchParams,
    pub order: Option<String>,
    pub page_number: Option<String>,
    pub page_size: Option<String>,
}

impl ListParams {
    pub fn order(&self) -> Result<PlayerOrder, RosterError> {
        self.order
            .as_deref()
            .map_or(Ok(PlayerOrder::default()), str::parse)
    }

    pub fn page(&self) -> Result<PageRequest, RosterError> {
        let number = parse_page_value("pageNumber", self.page_number.as_deref(), 0)?;
        let size = parse_page_value("pageSize", self.page_size.as_deref(), DEFAULT_PAGE_SIZE)?;
        PageRequest::new(number, size)
    }
}

fn parse_page_value(name: &str, raw: Option<&str>, default: u32) -> Result<u32, RosterError> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| RosterError::validation(format!("{name} must be a non-negative integer, got {raw:?}"))),
    }
}
