//! The managed entity and its enumerated attributes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Character race. Serialized as the upper-case constant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Race {
    Human,
    Dwarf,
    Elf,
    Giant,
    Orc,
    Troll,
    Hobbit,
}

impl Race {
    pub const ALL: [Race; 7] = [
        Self::Human,
        Self::Dwarf,
        Self::Elf,
        Self::Giant,
        Self::Orc,
        Self::Troll,
        Self::Hobbit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Human => "HUMAN",
            Self::Dwarf => "DWARF",
            Self::Elf => "ELF",
            Self::Giant => "GIANT",
            Self::Orc => "ORC",
            Self::Troll => "TROLL",
            Self::Hobbit => "HOBBIT",
        }
    }
}

impl FromStr for Race {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|r| r.as_str() == s).ok_or(())
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Character profession. Serialized as the upper-case constant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Profession {
    Warrior,
    Rogue,
    Sorcerer,
    Cleric,
    Paladin,
    Nazgul,
    Warlock,
    Druid,
}

impl Profession {
    pub const ALL: [Profession; 8] = [
        Self::Warrior,
        Self::Rogue,
        Self::Sorcerer,
        Self::Cleric,
        Self::Paladin,
        Self::Nazgul,
        Self::Warlock,
        Self::Druid,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warrior => "WARRIOR",
            Self::Rogue => "ROGUE",
            Self::Sorcerer => "SORCERER",
            Self::Cleric => "CLERIC",
            Self::Paladin => "PALADIN",
            Self::Nazgul => "NAZGUL",
            Self::Warlock => "WARLOCK",
            Self::Druid => "DRUID",
        }
    }
}

impl FromStr for Profession {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|p| p.as_str() == s).ok_or(())
    }
}

impl fmt::Display for Profession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored player.
///
/// `id` is `None` until a store assigns one. `level` and `until_next_level`
/// are derived from `experience`; only [`PlayerRecord::set_experience`]
/// writes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredPlayer")]
pub struct PlayerRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    /// Epoch milliseconds.
    pub birthday: i64,
    pub experience: i64,
    pub banned: bool,
    level: i64,
    until_next_level: i64,
}

/// Wire shape of a [`PlayerRecord`] without the derived fields. Incoming
/// `level` and `untilNextLevel` are ignored and recomputed.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredPlayer {
    #[serde(default)]
    id: Option<i64>,
    name: String,
    title: String,
    race: Race,
    profession: Profession,
    birthday: i64,
    experience: i64,
    banned: bool,
}

impl From<StoredPlayer> for PlayerRecord {
    fn from(p: StoredPlayer) -> Self {
        let mut record = Self::new(
            p.name,
            p.title,
            p.race,
            p.profession,
            p.birthday,
            p.experience,
            p.banned,
        );
        record.id = p.id;
        record
    }
}

impl PlayerRecord {
    /// Build an unsaved record, deriving the level fields from `experience`.
    pub fn new(
        name: String,
        title: String,
        race: Race,
        profession: Profession,
        birthday: i64,
        experience: i64,
        banned: bool,
    ) -> Self {
        let mut record = Self {
            id: None,
            name,
            title,
            race,
            profession,
            birthday,
            experience: 0,
            banned,
            level: 0,
            until_next_level: 0,
        };
        record.set_experience(experience);
        record
    }

    /// Rebuild a record from stored columns. The derived fields are
    /// recomputed rather than trusted.
    #[allow(clippy::too_many_arguments)]
    pub fn from_stored(
        id: i64,
        name: String,
        title: String,
        race: Race,
        profession: Profession,
        birthday: i64,
        experience: i64,
        banned: bool,
    ) -> Self {
        let mut record = Self::new(name, title, race, profession, birthday, experience, banned);
        record.id = Some(id);
        record
    }

    pub fn level(&self) -> i64 {
        self.level
    }

    pub fn until_next_level(&self) -> i64 {
        self.until_next_level
    }

    /// Set experience and recompute both derived fields together.
    pub fn set_experience(&mut self, experience: i64) {
        let level = crate::level::level(experience);
        self.experience = experience;
        self.level = level;
        self.until_next_level = crate::level::experience_to_next_level(experience, level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PlayerRecord {
        PlayerRecord::new(
            "Thrall".to_string(),
            "Chieftain".to_string(),
            Race::Orc,
            Profession::Warrior,
            1_577_836_800_000,
            2000,
            false,
        )
    }

    #[test]
    fn test_new_derives_level_fields() {
        let record = sample();
        assert_eq!(record.id, None);
        assert_eq!(record.level(), 5);
        assert_eq!(record.until_next_level(), 100);
    }

    #[test]
    fn test_set_experience_recomputes() {
        let mut record = sample();
        record.set_experience(500);
        assert_eq!(record.experience, 500);
        assert_eq!(record.level(), 2);
        assert_eq!(record.until_next_level(), 100);
    }

    #[test]
    fn test_enum_names_roundtrip() {
        for race in Race::ALL {
            assert_eq!(race.as_str().parse::<Race>(), Ok(race));
        }
        for profession in Profession::ALL {
            assert_eq!(profession.as_str().parse::<Profession>(), Ok(profession));
        }
        assert!("orc".parse::<Race>().is_err());
        assert!("BARD".parse::<Profession>().is_err());
    }

    #[test]
    fn test_json_shape() {
        let mut record = sample();
        record.id = Some(7);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["race"], "ORC");
        assert_eq!(json["profession"], "WARRIOR");
        assert_eq!(json["level"], 5);
        assert_eq!(json["untilNextLevel"], 100);
    }

    #[test]
    fn test_deserialize_recomputes_derived_fields() {
        let json = r#"{
            "id": 3, "name": "Thrall", "title": "Chieftain", "race": "ORC",
            "profession": "WARRIOR", "birthday": 1577836800000,
            "experience": 0, "banned": false, "level": 99, "untilNextLevel": 7
        }"#;
        let record: PlayerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, Some(3));
        assert_eq!(record.experience, 0);
        assert_eq!(record.level(), 0);
        assert_eq!(record.until_next_level(), 100);
    }

    #[test]
    fn test_json_roundtrip_keeps_levels() {
        let mut record = sample();
        record.id = Some(1);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(serde_json::from_str::<PlayerRecord>(&json).unwrap(), record);
    }

    #[test]
    fn test_unsaved_record_omits_id() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("id").is_none());
    }
}
