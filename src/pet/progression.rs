//! Experience, levels and the unlock table.

use log::debug;

use super::engine::Pet;
use super::types::{FoodTier, Room, Toy, MAX_LEVEL};

/// Experience granted by each care action.
pub const FEED_XP: u32 = 15;
pub const PLAY_XP: u32 = 20;
pub const CLEAN_XP: u32 = 10;
pub const SLEEP_XP: u32 = 8;

/// Bonus coins per level reached, multiplied by the new level.
pub const LEVEL_UP_COINS_PER_LEVEL: u64 = 20;

/// First level that hands out a decoration on every level-up.
pub const DECORATION_START_LEVEL: u32 = 6;

/// Rooms in the order they open up, with the level that opens each.
pub const ROOM_UNLOCK_LEVELS: [(Room, u32); 5] = [
    (Room::Living, 1),
    (Room::Kitchen, 2),
    (Room::Bathroom, 3),
    (Room::Playground, 4),
    (Room::Bedroom, 5),
];

/// Level that opens `room`.
pub fn room_unlock_level(room: Room) -> u32 {
    ROOM_UNLOCK_LEVELS
        .iter()
        .find(|(r, _)| *r == room)
        .map(|(_, level)| *level)
        .unwrap_or(1)
}

/// Decoration tag handed out on reaching `level`.
pub fn decoration_for_level(level: u32) -> String {
    format!("deco_{}", level)
}

impl Pet {
    /// Add experience and resolve every level-up it pays for.
    ///
    /// Overflow carries into the next level; the loop re-checks against the new
    /// threshold so one large gain can climb several levels. Returns the number
    /// of levels gained.
    pub(crate) fn gain_experience(&mut self, amount: u32) -> u32 {
        self.stats.experience = self.stats.experience.saturating_add(amount);
        let mut gained = 0;
        while self.stats.level < MAX_LEVEL
            && self.stats.experience >= self.stats.experience_to_next()
        {
            self.stats.experience -= self.stats.experience_to_next();
            self.level_up();
            gained += 1;
        }
        gained
    }

    fn level_up(&mut self) {
        self.stats.level += 1;
        let level = self.stats.level;
        let bonus = u64::from(level) * LEVEL_UP_COINS_PER_LEVEL;
        self.stats.coins = self.stats.coins.saturating_add(bonus);
        self.unlock_for_level(level);
        debug!(
            "level up: now level {} (+{} coins, {} xp carried)",
            level, bonus, self.stats.experience
        );
    }

    /// One-time unlocks for reaching `level`. Every insert is guarded, so
    /// reaching the same level twice never duplicates an entry.
    pub(crate) fn unlock_for_level(&mut self, level: u32) {
        match level {
            2 => {
                self.unlock_room(Room::Kitchen);
                self.unlock_food(FoodTier::Premium);
            }
            3 => self.unlock_room(Room::Bathroom),
            4 => {
                self.unlock_room(Room::Playground);
                self.unlock_toy(Toy::Frisbee);
                self.unlock_toy(Toy::Robot);
            }
            5 => self.unlock_room(Room::Bedroom),
            l if l >= DECORATION_START_LEVEL => {
                let tag = decoration_for_level(l);
                if !self.unlocked.decorations.contains(&tag) {
                    self.unlocked.decorations.push(tag);
                }
            }
            _ => {}
        }
    }

    fn unlock_room(&mut self, room: Room) {
        if !self.unlocked.has_room(room) {
            self.unlocked.rooms.push(room);
        }
    }

    fn unlock_food(&mut self, food: FoodTier) {
        if !self.unlocked.has_food(food) {
            self.unlocked.foods.push(food);
        }
    }

    fn unlock_toy(&mut self, toy: Toy) {
        if !self.unlocked.has_toy(toy) {
            self.unlocked.toys.push(toy);
        }
    }
}
