//! Mood and attention queries. Nothing here mutates the companion.
//!
//! Mood and the attention list disagree on happiness: mood turns "sad" below
//! 40 while the attention list only flags "unhappy" below 30.

use super::engine::Pet;
use super::types::{Mood, Need, PetStatus};

/// Attention list threshold for hunger, happiness, energy and hygiene.
pub const NEED_THRESHOLD: f64 = 30.0;
/// Health is flagged (and the mood turns sick) below this.
pub const SICK_THRESHOLD: f64 = 50.0;
pub const SAD_THRESHOLD: f64 = 40.0;
pub const HAPPY_THRESHOLD: f64 = 70.0;
pub const PLAYFUL_HAPPINESS: f64 = 80.0;
pub const PLAYFUL_HUNGER: f64 = 60.0;

impl Pet {
    /// Gauges that need care, in fixed check order.
    pub fn needs_attention(&self) -> Vec<Need> {
        let s = &self.stats;
        let checks = [
            (s.hunger < NEED_THRESHOLD, Need::Hungry),
            (s.happiness < NEED_THRESHOLD, Need::Unhappy),
            (s.energy < NEED_THRESHOLD, Need::Tired),
            (s.hygiene < NEED_THRESHOLD, Need::Dirty),
            (s.health < SICK_THRESHOLD, Need::Sick),
        ];
        checks
            .into_iter()
            .filter_map(|(flagged, need)| flagged.then_some(need))
            .collect()
    }

    /// Current mood; first matching rule wins.
    pub fn mood(&self) -> Mood {
        let s = &self.stats;
        if s.health < SICK_THRESHOLD {
            Mood::Sick
        } else if s.hygiene < NEED_THRESHOLD {
            Mood::Dirty
        } else if s.hunger < NEED_THRESHOLD {
            Mood::Hungry
        } else if s.energy < NEED_THRESHOLD {
            Mood::Sleepy
        } else if s.happiness >= PLAYFUL_HAPPINESS && s.hunger >= PLAYFUL_HUNGER {
            Mood::Playful
        } else if s.happiness >= HAPPY_THRESHOLD {
            Mood::Happy
        } else if s.happiness < SAD_THRESHOLD {
            Mood::Sad
        } else {
            Mood::Neutral
        }
    }

    pub fn status(&self) -> PetStatus {
        let needs = self.needs_attention();
        let message = compose_status_message(&needs);
        PetStatus {
            message,
            mood: self.mood(),
            needs_attention: needs,
        }
    }
}

/// Only the first two needs are named, even when more are flagged.
fn compose_status_message(needs: &[Need]) -> String {
    match needs {
        [] => "I'm feeling amazing! Everything is perfect! ✨".to_string(),
        [only] => format!("I'm {}... Can you help me? 🥺", only),
        [first, second, ..] => format!("I need some care... I'm {} and {} 😢", first, second),
    }
}
