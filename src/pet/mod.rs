//! Companion simulation: gauges, moods, levels and unlocks.
//! The engine has no IO; persistence lives in [`crate::storage`] and the
//! driving loop in [`crate::caretaker`].

pub mod catalog;
pub mod engine;
pub mod errors;
pub mod progression;
pub mod snapshot;
pub mod status;
pub mod types;

pub use catalog::{
    available_items, format_room_navigation, room_greeting, room_items, room_offers, room_title,
    species_info, unavailable_message, Requirement, RoomItem, SpeciesInfo,
};
pub use engine::{ActivityLog, Pet};
pub use errors::PetError;
pub use progression::{decoration_for_level, room_unlock_level};
pub use snapshot::{PetSnapshot, SaveData, SAVE_SCHEMA_VERSION};
pub use types::*;
