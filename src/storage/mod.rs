//! # Save Slot Storage
//!
//! Sled-backed persistence for the single companion of an installation.
//! There is exactly one slot; saving overwrites it and clearing removes it.
//!
//! Anything in the slot that cannot be turned back into a valid companion
//! (unparseable bytes, a foreign schema version, impossible stats) loads as
//! "no saved companion" and is logged, never surfaced as a fault. Only real
//! database or IO failures are errors.
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use etherpet::pet::{Pet, Species};
//! use etherpet::storage::SaveStore;
//!
//! # fn main() -> Result<(), etherpet::pet::PetError> {
//! let store = SaveStore::open("./data/etherpet")?;
//! let pet = Pet::new("Comet", Species::Nebula, Utc::now());
//! store.save(&pet.to_save())?;
//! assert!(store.load(Utc::now())?.is_some());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::pet::{Pet, PetError, SaveData};
use crate::validation::escape_log;

const TREE_SAVES: &str = "etherpet";
/// Key of the one and only save slot.
pub const SAVE_SLOT: &str = "etherpet-save";

/// The persistence adapter: one fixed slot in a sled tree.
pub struct SaveStore {
    _db: sled::Db,
    saves: sled::Tree,
    path: PathBuf,
}

impl SaveStore {
    /// Open (or create) the store rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PetError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let saves = db.open_tree(TREE_SAVES)?;
        Ok(Self {
            _db: db,
            saves,
            path: path_ref.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the slot with `save`.
    pub fn save(&self, save: &SaveData) -> Result<(), PetError> {
        let bytes = serde_json::to_vec(save)?;
        self.saves.insert(SAVE_SLOT, bytes)?;
        self.saves.flush()?;
        debug!("saved '{}' to {}", escape_log(&save.name), self.path.display());
        Ok(())
    }

    /// Raw record in the slot, if it parses.
    pub fn load_record(&self) -> Result<Option<SaveData>, PetError> {
        let Some(bytes) = self.saves.get(SAVE_SLOT)? else {
            return Ok(None);
        };
        match serde_json::from_slice::<SaveData>(&bytes) {
            Ok(save) => Ok(Some(save)),
            Err(e) => {
                warn!("discarding unreadable save in {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    /// Load the saved companion, with decay applied up to `now`.
    pub fn load(&self, now: DateTime<Utc>) -> Result<Option<Pet>, PetError> {
        let Some(save) = self.load_record()? else {
            return Ok(None);
        };
        let name = escape_log(&save.name);
        match Pet::from_save(save, now) {
            Ok(pet) => Ok(Some(pet)),
            Err(e @ (PetError::SchemaMismatch { .. } | PetError::CorruptSave(_))) => {
                warn!("discarding save for '{}': {}", name, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Remove the slot.
    pub fn clear(&self) -> Result<(), PetError> {
        self.saves.remove(SAVE_SLOT)?;
        self.saves.flush()?;
        Ok(())
    }

    /// Pretty JSON of the slot, if it holds a readable record.
    pub fn export_json(&self) -> Result<Option<String>, PetError> {
        match self.load_record()? {
            Some(save) => Ok(Some(serde_json::to_string_pretty(&save)?)),
            None => Ok(None),
        }
    }

    /// Replace the slot with a record read from `json`.
    ///
    /// Unlike [`load`](Self::load) this is strict: the record must parse and
    /// describe a valid companion, otherwise the slot is left untouched.
    pub fn import_json(&self, json: &str, now: DateTime<Utc>) -> Result<Pet, PetError> {
        let save: SaveData = serde_json::from_str(json)?;
        let pet = Pet::from_save(save, now)?;
        self.save(&pet.to_save())?;
        Ok(pet)
    }
}
