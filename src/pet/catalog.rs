//! Static descriptions of species and rooms for front ends.

use super::progression::room_unlock_level;
use super::types::{CareAction, FoodTier, PlayIntensity, Room, SleepDuration, Species, Toy, Unlockables};

/// Display data for one species.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeciesInfo {
    pub species: Species,
    pub display_name: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
}

pub fn species_info(species: Species) -> SpeciesInfo {
    let (display_name, description, emoji) = match species {
        Species::Nebula => (
            "Nebula",
            "A swirling cosmic cloud of stardust and dreams",
            "🌌",
        ),
        Species::Stardust => (
            "Stardust",
            "A shimmering star sprite made of pure light",
            "✨",
        ),
        Species::Cosmos => (
            "Cosmos",
            "A mysterious planetary being from distant worlds",
            "🪐",
        ),
        Species::Nova => (
            "Nova",
            "An explosive supernova spirit full of energy",
            "💥",
        ),
    };
    SpeciesInfo {
        species,
        display_name,
        description,
        emoji,
    }
}

pub fn room_title(room: Room) -> &'static str {
    match room {
        Room::Living => "Living Room",
        Room::Kitchen => "Kitchen",
        Room::Bathroom => "Bathroom",
        Room::Bedroom => "Bedroom",
        Room::Playground => "Playground",
    }
}

/// Message shown on entering `room`.
pub fn room_greeting(room: Room) -> &'static str {
    match room {
        Room::Living => "Welcome to the living room! Time to relax! 🛋️",
        Room::Kitchen => "Let's see what yummy treats we have! 🍔",
        Room::Bathroom => "Time to get clean and fresh! 🛁",
        Room::Bedroom => "Perfect place for a good rest! 🛏️",
        Room::Playground => "Let's play and have fun! 🎮",
    }
}

/// What an item needs before it shows up in a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Food(FoodTier),
    Toy(Toy),
}

impl Requirement {
    fn met_by(self, unlocked: &Unlockables) -> bool {
        match self {
            Self::Food(food) => unlocked.has_food(food),
            Self::Toy(toy) => unlocked.has_toy(toy),
        }
    }
}

/// One interactive item in a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomItem {
    pub label: &'static str,
    pub action: CareAction,
    pub requires: Option<Requirement>,
}

const fn item(label: &'static str, action: CareAction, requires: Option<Requirement>) -> RoomItem {
    RoomItem {
        label,
        action,
        requires,
    }
}

const BASIC: CareAction = CareAction::Feed { food: FoodTier::Basic };
const PREMIUM: CareAction = CareAction::Feed { food: FoodTier::Premium };
const NEEDS_PREMIUM: Option<Requirement> = Some(Requirement::Food(FoodTier::Premium));

/// Every item a room can offer, locked or not.
pub fn room_items(room: Room) -> &'static [RoomItem] {
    const LIVING: &[RoomItem] = &[
        item("Apple", BASIC, None),
        item("Premium", PREMIUM, NEEDS_PREMIUM),
        item("Ball", CareAction::Play { intensity: PlayIntensity::Low }, None),
        item("Disc", CareAction::Play { intensity: PlayIntensity::High }, None),
    ];
    const KITCHEN: &[RoomItem] = &[
        item("Apple", BASIC, None),
        item("Cookie", BASIC, None),
        item("Pizza", PREMIUM, NEEDS_PREMIUM),
        item("Steak", PREMIUM, NEEDS_PREMIUM),
    ];
    const BATHROOM: &[RoomItem] = &[
        item("Bath", CareAction::Clean, None),
        item("Deep Clean", CareAction::Clean, None),
    ];
    const BEDROOM: &[RoomItem] = &[
        item("Nap", CareAction::Sleep { duration: SleepDuration::Nap }, None),
        item("Sleep", CareAction::Sleep { duration: SleepDuration::Sleep }, None),
    ];
    const PLAYGROUND: &[RoomItem] = &[
        item("Ball", CareAction::Play { intensity: PlayIntensity::Low }, None),
        item(
            "Frisbee",
            CareAction::Play { intensity: PlayIntensity::Medium },
            Some(Requirement::Toy(Toy::Frisbee)),
        ),
        item(
            "Robot",
            CareAction::Play { intensity: PlayIntensity::High },
            Some(Requirement::Toy(Toy::Robot)),
        ),
    ];

    match room {
        Room::Living => LIVING,
        Room::Kitchen => KITCHEN,
        Room::Bathroom => BATHROOM,
        Room::Bedroom => BEDROOM,
        Room::Playground => PLAYGROUND,
    }
}

/// Items in `room` whose requirements are met.
pub fn available_items(room: Room, unlocked: &Unlockables) -> Vec<RoomItem> {
    room_items(room)
        .iter()
        .filter(|item| item.requires.map_or(true, |req| req.met_by(unlocked)))
        .copied()
        .collect()
}

/// Whether `room` offers `action` with the current unlocks. Moving between
/// rooms is offered everywhere.
pub fn room_offers(room: Room, unlocked: &Unlockables, action: CareAction) -> bool {
    matches!(action, CareAction::ChangeRoom { .. })
        || available_items(room, unlocked)
            .iter()
            .any(|item| item.action == action)
}

/// Refusal for an action `room` does not offer, pointing at an unlocked room
/// that does when there is one.
pub fn unavailable_message(room: Room, unlocked: &Unlockables, action: CareAction) -> String {
    let elsewhere = Room::ALL
        .iter()
        .find(|r| unlocked.has_room(**r) && room_offers(**r, unlocked, action));
    match elsewhere {
        Some(other) => format!(
            "I can't do that in the {}! Let's go to the {}. 🚪",
            room_title(room),
            room_title(*other)
        ),
        None => "I can't do that yet! Level up to unlock it! 🔒".to_string(),
    }
}

/// One line per room for a navigation bar: title, lock state, unlock level.
pub fn format_room_navigation(current: Room, unlocked: &Unlockables) -> String {
    let mut out = String::new();
    for room in Room::ALL {
        let marker = if *room == current {
            ">"
        } else if unlocked.has_room(*room) {
            " "
        } else {
            "🔒"
        };
        out.push_str(&format!("{} {}", marker, room_title(*room)));
        if !unlocked.has_room(*room) {
            out.push_str(&format!(" (level {})", room_unlock_level(*room)));
        }
        out.push('\n');
    }
    out
}
