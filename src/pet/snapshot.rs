//! Save-format records and the conversions to and from [`Pet`].
//!
//! The JSON layout follows the browser save format (camelCase keys, epoch
//! millisecond instants, the species under `type`), so saves move between the
//! browser and the CLI in either direction.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::engine::{ActivityLog, Pet};
use super::errors::PetError;
use super::types::{PetStats, Room, Species, Unlockables, GAUGE_MAX, MAX_LEVEL};

pub const SAVE_SCHEMA_VERSION: u8 = 1;

fn default_schema_version() -> u8 {
    SAVE_SCHEMA_VERSION
}

/// Mutable state of a companion, without its identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PetSnapshot {
    pub stats: PetStats,
    pub unlocked: Unlockables,
    pub current_room: Room,
    pub last_fed: i64,
    pub last_played: i64,
    pub last_cleaned: i64,
    pub last_slept: i64,
    /// Decay baseline. Older saves lack it; the latest activity stands in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_interaction: Option<i64>,
}

/// The record kept in the save slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    #[serde(default = "default_schema_version")]
    pub schema_version: u8,
    pub name: String,
    #[serde(rename = "type", alias = "species")]
    pub species: Species,
    pub data: PetSnapshot,
    pub created_at: i64,
}

fn to_millis(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_millis()
}

fn from_millis(field: &str, millis: i64) -> Result<DateTime<Utc>, PetError> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| PetError::CorruptSave(format!("{} out of range: {}", field, millis)))
}

impl Pet {
    /// Extract the persisted part of the state.
    pub fn snapshot(&self) -> PetSnapshot {
        PetSnapshot {
            stats: self.stats.clone(),
            unlocked: self.unlocked.clone(),
            current_room: self.current_room,
            last_fed: to_millis(self.activity.last_fed),
            last_played: to_millis(self.activity.last_played),
            last_cleaned: to_millis(self.activity.last_cleaned),
            last_slept: to_millis(self.activity.last_slept),
            last_interaction: Some(to_millis(self.last_interaction)),
        }
    }

    /// Full save record, identity included.
    pub fn to_save(&self) -> SaveData {
        SaveData {
            schema_version: SAVE_SCHEMA_VERSION,
            name: self.name.clone(),
            species: self.species,
            data: self.snapshot(),
            created_at: to_millis(self.created_at),
        }
    }

    /// Rebuild a companion from a snapshot and immediately apply the decay
    /// accrued while it was unloaded.
    pub fn from_snapshot(
        name: &str,
        species: Species,
        snapshot: PetSnapshot,
        now: DateTime<Utc>,
    ) -> Result<Pet, PetError> {
        validate_snapshot(&snapshot)?;

        let activity = ActivityLog {
            last_fed: from_millis("lastFed", snapshot.last_fed)?,
            last_played: from_millis("lastPlayed", snapshot.last_played)?,
            last_cleaned: from_millis("lastCleaned", snapshot.last_cleaned)?,
            last_slept: from_millis("lastSlept", snapshot.last_slept)?,
        };
        let last_interaction = match snapshot.last_interaction {
            Some(millis) => from_millis("lastInteraction", millis)?,
            None => activity.latest(),
        };

        let mut pet = Pet::new(name, species, now);
        pet.stats = snapshot.stats;
        pet.unlocked = snapshot.unlocked;
        pet.unlocked.dedup();
        pet.current_room = snapshot.current_room;
        pet.activity = activity;
        pet.last_interaction = last_interaction;
        pet.update(now);
        Ok(pet)
    }

    /// Rebuild a companion from a full save record.
    pub fn from_save(save: SaveData, now: DateTime<Utc>) -> Result<Pet, PetError> {
        if save.schema_version != SAVE_SCHEMA_VERSION {
            return Err(PetError::SchemaMismatch {
                entity: "save",
                expected: SAVE_SCHEMA_VERSION,
                found: save.schema_version,
            });
        }
        let created_at = from_millis("createdAt", save.created_at)?;
        let mut pet = Pet::from_snapshot(&save.name, save.species, save.data, now)?;
        pet.created_at = created_at;
        Ok(pet)
    }
}

fn validate_snapshot(snapshot: &PetSnapshot) -> Result<(), PetError> {
    for (gauge, value) in snapshot.stats.gauges() {
        if !value.is_finite() || !(0.0..=GAUGE_MAX).contains(&value) {
            return Err(PetError::CorruptSave(format!(
                "{} outside 0..=100: {}",
                gauge, value
            )));
        }
    }
    if !(1..=MAX_LEVEL).contains(&snapshot.stats.level) {
        return Err(PetError::CorruptSave(format!(
            "level outside 1..={}: {}",
            MAX_LEVEL, snapshot.stats.level
        )));
    }
    if !snapshot.unlocked.has_room(Room::Living) {
        return Err(PetError::CorruptSave("living room missing from unlocks".into()));
    }
    if !snapshot.unlocked.has_room(snapshot.current_room) {
        return Err(PetError::CorruptSave(format!(
            "current room '{}' is not unlocked",
            snapshot.current_room
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pet::types::{FoodTier, PlayIntensity};
    use chrono::Duration;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap()
    }

    #[test]
    fn round_trip_with_no_elapsed_time_is_identical() {
        let mut pet = Pet::new("Vega", Species::Nova, t0());
        pet.feed(FoodTier::Basic, t0() + Duration::seconds(10));
        pet.play(PlayIntensity::Low, t0() + Duration::seconds(20));
        let now = t0() + Duration::seconds(20);

        let rebuilt = Pet::from_save(pet.to_save(), now).unwrap();
        assert_eq!(rebuilt, pet);
    }

    #[test]
    fn reconstruction_applies_unloaded_decay() {
        let pet = Pet::new("Vega", Species::Nova, t0());
        let snapshot = pet.snapshot();
        let later = t0() + Duration::minutes(10);

        let rebuilt = Pet::from_snapshot("Vega", Species::Nova, snapshot, later).unwrap();
        assert!((rebuilt.stats().hunger - 75.0).abs() < 1e-9);
        assert_eq!(rebuilt.last_interaction(), later);
    }

    #[test]
    fn browser_save_without_baseline_loads() {
        let json = r#"{
            "name": "Pixel",
            "type": "stardust",
            "createdAt": 1767614400000,
            "data": {
                "stats": {"hunger": 64.5, "happiness": 70, "energy": 90, "hygiene": 100,
                          "health": 100, "level": 2, "experience": 15, "coins": 98},
                "unlocked": {"rooms": ["living", "kitchen"], "foods": ["basic", "premium"],
                             "toys": ["ball"], "decorations": []},
                "currentRoom": "kitchen",
                "lastFed": 1767614400000,
                "lastPlayed": 1767614430000,
                "lastCleaned": 1767614400000,
                "lastSlept": 1767614400000
            }
        }"#;
        let save: SaveData = serde_json::from_str(json).unwrap();
        assert_eq!(save.schema_version, SAVE_SCHEMA_VERSION);
        assert_eq!(save.species, Species::Stardust);

        let played = Utc.timestamp_millis_opt(1767614430000).unwrap();
        let pet = Pet::from_save(save, played + Duration::seconds(59)).unwrap();
        assert_eq!(pet.last_interaction(), played);
        assert_eq!(pet.current_room(), Room::Kitchen);
        assert_eq!(pet.stats().hunger, 64.5);
    }

    #[test]
    fn save_writes_species_under_type_key() {
        let save = Pet::new("Pixel", Species::Stardust, t0()).to_save();
        let value = serde_json::to_value(&save).unwrap();
        assert_eq!(value["type"], "stardust");
        assert!(value.get("species").is_none());
        assert_eq!(value["data"]["currentRoom"], "living");

        // older CLI exports used "species"
        let legacy = serde_json::to_string(&save)
            .unwrap()
            .replace("\"type\"", "\"species\"");
        let reread: SaveData = serde_json::from_str(&legacy).unwrap();
        assert_eq!(reread.species, Species::Stardust);
    }

    #[test]
    fn impossible_state_is_rejected() {
        let pet = Pet::new("Vega", Species::Nova, t0());

        let mut snapshot = pet.snapshot();
        snapshot.stats.energy = 140.0;
        assert!(matches!(
            Pet::from_snapshot("Vega", Species::Nova, snapshot, t0()),
            Err(PetError::CorruptSave(_))
        ));

        let mut snapshot = pet.snapshot();
        snapshot.current_room = Room::Bedroom;
        assert!(matches!(
            Pet::from_snapshot("Vega", Species::Nova, snapshot, t0()),
            Err(PetError::CorruptSave(_))
        ));

        let mut snapshot = pet.snapshot();
        snapshot.stats.level = 0;
        assert!(Pet::from_snapshot("Vega", Species::Nova, snapshot, t0()).is_err());
    }

    #[test]
    fn future_schema_is_rejected() {
        let mut save = Pet::new("Vega", Species::Nova, t0()).to_save();
        save.schema_version = 9;
        assert!(matches!(
            Pet::from_save(save, t0()),
            Err(PetError::SchemaMismatch { found: 9, .. })
        ));
    }
}
