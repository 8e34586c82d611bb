/// Integration tests for the sled-backed save slot.
/// Validates persistence across reopen and that bad saves load as "absent".

use chrono::{DateTime, Duration, TimeZone, Utc};
use etherpet::pet::{Pet, PetError, PlayIntensity, Room, Species, SAVE_SCHEMA_VERSION};
use etherpet::storage::SaveStore;
use tempfile::tempdir;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap()
}

#[test]
fn test_save_survives_reopen() {
    let dir = tempdir().unwrap();
    let mut pet = Pet::new("Quasar", Species::Nova, t0());
    pet.play(PlayIntensity::Medium, t0() + Duration::seconds(1));

    {
        let store = SaveStore::open(dir.path()).unwrap();
        store.save(&pet.to_save()).unwrap();
    }

    let store = SaveStore::open(dir.path()).unwrap();
    let loaded = store.load(t0() + Duration::seconds(2)).unwrap().unwrap();
    assert_eq!(loaded, pet);
}

#[test]
fn test_reload_after_absence_applies_decay_once() {
    let dir = tempdir().unwrap();
    let store = SaveStore::open(dir.path()).unwrap();
    store
        .save(&Pet::new("Quasar", Species::Nova, t0()).to_save())
        .unwrap();

    // six hours away: 360 minutes of decay in one step
    let back = t0() + Duration::hours(6);
    let pet = store.load(back).unwrap().unwrap();
    assert!((pet.stats().hunger - 0.0).abs() < 1e-9);
    assert!((pet.stats().energy - (90.0 - 72.0)).abs() < 1e-9);
    assert!((pet.stats().hygiene - (100.0 - 54.0)).abs() < 1e-9);
    // hunger bottomed out, so health took 0.5 per minute as well
    assert!((pet.stats().health - 0.0).abs() < 1e-9);
    assert_eq!(pet.last_interaction(), back);
}

#[test]
fn test_foreign_schema_is_absent() {
    let dir = tempdir().unwrap();
    let store = SaveStore::open(dir.path()).unwrap();
    let mut save = Pet::new("Quasar", Species::Nova, t0()).to_save();
    save.schema_version = SAVE_SCHEMA_VERSION + 1;
    store.save(&save).unwrap();

    assert!(store.load_record().unwrap().is_some());
    assert!(store.load(t0()).unwrap().is_none());
}

#[test]
fn test_impossible_room_is_absent() {
    let dir = tempdir().unwrap();
    let store = SaveStore::open(dir.path()).unwrap();
    let mut save = Pet::new("Quasar", Species::Nova, t0()).to_save();
    save.data.current_room = Room::Playground;
    store.save(&save).unwrap();

    assert!(store.load(t0()).unwrap().is_none());
}

#[test]
fn test_browser_save_without_last_interaction() {
    let dir = tempdir().unwrap();
    let store = SaveStore::open(dir.path()).unwrap();
    let mut save = Pet::new("Quasar", Species::Nova, t0()).to_save();
    save.data.last_interaction = None;
    let json = serde_json::to_string(&save).unwrap();
    assert!(!json.contains("lastInteraction"));

    let pet = store.import_json(&json, t0() + Duration::seconds(30)).unwrap();
    assert_eq!(pet.name(), "Quasar");
    assert_eq!(store.load_record().unwrap().unwrap().name, "Quasar");
}

#[test]
fn test_export_then_import_elsewhere() {
    let source_dir = tempdir().unwrap();
    let source = SaveStore::open(source_dir.path()).unwrap();
    let pet = Pet::new("Quasar", Species::Nova, t0());
    source.save(&pet.to_save()).unwrap();
    let json = source.export_json().unwrap().unwrap();
    assert!(json.contains("\"currentRoom\": \"living\""));

    let target_dir = tempdir().unwrap();
    let target = SaveStore::open(target_dir.path()).unwrap();
    let imported = target.import_json(&json, t0()).unwrap();
    assert_eq!(imported, pet);
    assert_eq!(target.load(t0()).unwrap(), Some(pet));
}

#[test]
fn test_import_of_impossible_save_is_an_error() {
    let dir = tempdir().unwrap();
    let store = SaveStore::open(dir.path()).unwrap();
    let mut save = Pet::new("Quasar", Species::Nova, t0()).to_save();
    save.data.stats.level = 11;
    let json = serde_json::to_string(&save).unwrap();

    assert!(matches!(
        store.import_json(&json, t0()),
        Err(PetError::CorruptSave(_))
    ));
    assert!(store.load(t0()).unwrap().is_none());
}
