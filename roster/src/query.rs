//! Ordering and pagination over a predicate's matches.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::RosterError;
use crate::filter::{Field, Predicate};
use crate::player::PlayerRecord;

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: u32 = 3;

/// Sortable attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerOrder {
    #[default]
    Id,
    Name,
    Experience,
    Birthday,
    Level,
}

impl PlayerOrder {
    /// Attribute the order sorts on.
    pub fn field(self) -> Field {
        match self {
            Self::Id => Field::Id,
            Self::Name => Field::Name,
            Self::Experience => Field::Experience,
            Self::Birthday => Field::Birthday,
            Self::Level => Field::Level,
        }
    }

    /// Ascending comparison on the order's attribute, ties broken by id.
    pub fn compare(self, a: &PlayerRecord, b: &PlayerRecord) -> Ordering {
        let primary = match self {
            Self::Id => Ordering::Equal,
            Self::Name => a.name.cmp(&b.name),
            Self::Experience => a.experience.cmp(&b.experience),
            Self::Birthday => a.birthday.cmp(&b.birthday),
            Self::Level => a.level().cmp(&b.level()),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

impl FromStr for PlayerOrder {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ID" => Ok(Self::Id),
            "NAME" => Ok(Self::Name),
            "EXPERIENCE" => Ok(Self::Experience),
            "BIRTHDAY" => Ok(Self::Birthday),
            "LEVEL" => Ok(Self::Level),
            other => Err(RosterError::validation(format!("unknown order: {other}"))),
        }
    }
}

/// Zero-based page number and a page size of at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(number: u32, size: u32) -> Result<Self, RosterError> {
        if size == 0 {
            return Err(RosterError::validation("page size must be at least 1"));
        }
        Ok(Self { number, size })
    }

    /// Number of records preceding this page.
    pub fn offset(self) -> u64 {
        u64::from(self.number) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            number: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of matches plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Filter, sort and slice `records` in memory.
///
/// Pages past the last match come back empty with the real total.
pub fn paginate<'a, I>(
    records: I,
    predicate: &Predicate,
    order: PlayerOrder,
    page: PageRequest,
) -> Page<PlayerRecord>
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    let mut matches: Vec<&PlayerRecord> = records
        .into_iter()
        .filter(|r| predicate.matches(r))
        .collect();
    matches.sort_by(|a, b| order.compare(a, b));

    let total = matches.len() as u64;
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let items = matches
        .into_iter()
        .skip(offset)
        .take(page.size as usize)
        .cloned()
        .collect();

    Page { items, total }
}

/// Count-only path: same predicate, no page materialized.
pub fn count_matches<'a, I>(records: I, predicate: &Predicate) -> u64
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    records.into_iter().filter(|r| predicate.matches(r)).count() as u64
}
