//! Inbound create and update payloads and their field bounds.
//!
//! Neither type carries `level` or `untilNextLevel`; those keys are dropped
//! during deserialization and recomputed from experience.

use serde::Deserialize;

use crate::error::RosterError;
use crate::level::{MAX_EXPERIENCE, MIN_EXPERIENCE};
use crate::player::{PlayerRecord, Profession, Race};

pub const MAX_NAME_CHARS: usize = 12;
pub const MAX_TITLE_CHARS: usize = 30;
/// 2000-01-01T00:00:00Z in epoch milliseconds.
pub const MIN_BIRTHDAY: i64 = 946_684_800_000;
/// 3000-12-31T23:59:59.999Z in epoch milliseconds.
pub const MAX_BIRTHDAY: i64 = 32_535_215_999_999;

/// Full payload for creating a player.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlayer {
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    pub birthday: i64,
    pub experience: i64,
    #[serde(default)]
    pub banned: Option<bool>,
}

impl NewPlayer {
    /// Check every bound and build the unsaved record.
    pub fn into_record(self) -> Result<PlayerRecord, RosterError> {
        check_name(&self.name)?;
        check_title(&self.title)?;
        check_birthday(self.birthday)?;
        check_experience(self.experience)?;
        Ok(PlayerRecord::new(
            self.name,
            self.title,
            self.race,
            self.profession,
            self.birthday,
            self.experience,
            self.banned.unwrap_or(false),
        ))
    }
}

/// Partial update. `None` means "leave as is"; an explicit JSON `null` is
/// treated the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub race: Option<Race>,
    #[serde(default)]
    pub profession: Option<Profession>,
    #[serde(default)]
    pub birthday: Option<i64>,
    #[serde(default)]
    pub experience: Option<i64>,
    #[serde(default)]
    pub banned: Option<bool>,
}

impl PlayerPatch {
    /// Validate the present fields without touching a record.
    pub fn validate(&self) -> Result<(), RosterError> {
        if let Some(name) = &self.name {
            check_name(name)?;
        }
        if let Some(title) = &self.title {
            check_title(title)?;
        }
        if let Some(birthday) = self.birthday {
            check_birthday(birthday)?;
        }
        if let Some(experience) = self.experience {
            check_experience(experience)?;
        }
        Ok(())
    }

    /// Validate, then merge the present fields into `record`.
    ///
    /// On error `record` is unchanged. Level fields are recomputed only when
    /// experience is present.
    pub fn apply(self, record: &mut PlayerRecord) -> Result<(), RosterError> {
        self.validate()?;
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(race) = self.race {
            record.race = race;
        }
        if let Some(profession) = self.profession {
            record.profession = profession;
        }
        if let Some(birthday) = self.birthday {
            record.birthday = birthday;
        }
        if let Some(banned) = self.banned {
            record.banned = banned;
        }
        if let Some(experience) = self.experience {
            record.set_experience(experience);
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn check_name(name: &str) -> Result<(), RosterError> {
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_CHARS {
        return Err(RosterError::validation(format!(
            "name must be 1-{MAX_NAME_CHARS} characters, got {len}"
        )));
    }
    Ok(())
}

fn check_title(title: &str) -> Result<(), RosterError> {
    let len = title.chars().count();
    if len > MAX_TITLE_CHARS {
        return Err(RosterError::validation(format!(
            "title must be at most {MAX_TITLE_CHARS} characters, got {len}"
        )));
    }
    Ok(())
}

fn check_birthday(birthday: i64) -> Result<(), RosterError> {
    if !(MIN_BIRTHDAY..=MAX_BIRTHDAY).contains(&birthday) {
        return Err(RosterError::validation(format!(
            "birthday {birthday} is outside years 2000-3000"
        )));
    }
    Ok(())
}

fn check_experience(experience: i64) -> Result<(), RosterError> {
    if !(MIN_EXPERIENCE..=MAX_EXPERIENCE).contains(&experience) {
        return Err(RosterError::validation(format!(
            "experience must be within {MIN_EXPERIENCE}..={MAX_EXPERIENCE}, got {experience}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const JAN_2020: i64 = 1_577_836_800_000;

    fn thrall() -> NewPlayer {
        NewPlayer {
            name: "Thrall".to_string(),
            title: "Chieftain".to_string(),
            race: Race::Orc,
            profession: Profession::Warrior,
            birthday: JAN_2020,
            experience: 2000,
            banned: None,
        }
    }

    #[test]
    fn test_into_record_derives_levels() {
        let record = thrall().into_record().unwrap();
        assert_eq!(record.level(), 5);
        assert_eq!(record.until_next_level(), 100);
        assert!(!record.banned);
    }

    #[test]
    fn test_experience_bounds() {
        let mut p = thrall();
        p.experience = MAX_EXPERIENCE;
        assert!(p.clone().into_record().is_ok());
        p.experience = MAX_EXPERIENCE + 1;
        assert!(matches!(p.clone().into_record(), Err(RosterError::ValidationFailed(_))));
        p.experience = -1;
        assert!(p.into_record().is_err());
    }

    #[test]
    fn test_name_and_title_bounds() {
        let mut p = thrall();
        p.name = String::new();
        assert!(p.clone().into_record().is_err());
        p.name = "x".repeat(12);
        assert!(p.clone().into_record().is_ok());
        p.name = "x".repeat(13);
        assert!(p.clone().into_record().is_err());

        let mut p = thrall();
        p.title = String::new();
        assert!(p.clone().into_record().is_ok());
        p.title = "t".repeat(30);
        assert!(p.clone().into_record().is_ok());
        p.title = "t".repeat(31);
        assert!(p.into_record().is_err());
    }

    #[test]
    fn test_name_counts_characters_not_bytes() {
        let mut p = thrall();
        p.name = "Ægir Åsgård".to_string();
        assert!(p.into_record().is_ok());
    }

    #[test]
    fn test_birthday_window() {
        let mut p = thrall();
        p.birthday = MIN_BIRTHDAY;
        assert!(p.clone().into_record().is_ok());
        p.birthday = MIN_BIRTHDAY - 1;
        assert!(p.clone().into_record().is_err());
        p.birthday = MAX_BIRTHDAY;
        assert!(p.clone().into_record().is_ok());
        p.birthday = MAX_BIRTHDAY + 1;
        assert!(p.into_record().is_err());
    }

    #[test]
    fn test_deserialize_ignores_derived_fields() {
        let json = r#"{
            "name": "Thrall", "title": "Chieftain", "race": "ORC",
            "profession": "WARRIOR", "birthday": 1577836800000,
            "experience": 2000, "level": 99, "untilNextLevel": 1
        }"#;
        let record = serde_json::from_str::<NewPlayer>(json)
            .unwrap()
            .into_record()
            .unwrap();
        assert_eq!(record.level(), 5);
        assert_eq!(record.until_next_level(), 100);
    }

    #[test]
    fn test_deserialize_requires_fields() {
        let json = r#"{"name": "Thrall", "race": "ORC"}"#;
        assert!(serde_json::from_str::<NewPlayer>(json).is_err());
        let json = r#"{
            "name": "Thrall", "title": "Chieftain", "race": "NOBODY",
            "profession": "WARRIOR", "birthday": 1577836800000, "experience": 2000
        }"#;
        assert!(serde_json::from_str::<NewPlayer>(json).is_err());
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let mut record = thrall().into_record().unwrap();
        let before = record.clone();
        let patch = PlayerPatch {
            experience: Some(500),
            ..Default::default()
        };
        patch.apply(&mut record).unwrap();
        assert_eq!(record.experience, 500);
        assert_eq!(record.level(), 2);
        assert_eq!(record.until_next_level(), 100);
        assert_eq!(record.name, before.name);
        assert_eq!(record.title, before.title);
        assert_eq!(record.race, before.race);
        assert_eq!(record.birthday, before.birthday);
    }

    #[test]
    fn test_patch_without_experience_keeps_levels() {
        let mut record = thrall().into_record().unwrap();
        let patch: PlayerPatch =
            serde_json::from_str(r#"{"banned": true, "level": 40, "race": null}"#).unwrap();
        patch.apply(&mut record).unwrap();
        assert!(record.banned);
        assert_eq!(record.race, Race::Orc);
        assert_eq!(record.level(), 5);
        assert_eq!(record.until_next_level(), 100);
    }

    #[test]
    fn test_invalid_patch_leaves_record_alone() {
        let mut record = thrall().into_record().unwrap();
        let before = record.clone();
        let patch = PlayerPatch {
            name: Some("Renamed".to_string()),
            title: Some("t".repeat(31)),
            ..Default::default()
        };
        assert!(patch.apply(&mut record).is_err());
        assert_eq!(record, before);
    }

    #[test]
    fn test_empty_patch() {
        assert!(PlayerPatch::default().is_empty());
        assert!(serde_json::from_str::<PlayerPatch>("{}").unwrap().is_empty());
    }
}
