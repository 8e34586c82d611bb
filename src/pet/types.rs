use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound shared by every gauge.
pub const GAUGE_MAX: f64 = 100.0;
/// Level at which progression stops.
pub const MAX_LEVEL: u32 = 10;

/// Returned when a textual identifier does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseKindError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Generates `as_str`, `Display`, `FromStr` and an `ALL` table for a unit-only
/// identifier enum whose serde form is its lowercase name.
macro_rules! identifier_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseKindError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(ParseKindError {
                        kind: $kind,
                        value: s.to_string(),
                        expected: concat!($($text, " "),+),
                    }),
                }
            }
        }
    };
}

/// Companion species. Purely cosmetic: no rule reads it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Nebula,
    Stardust,
    Cosmos,
    Nova,
}

identifier_enum!(Species, "species", {
    Nebula => "nebula",
    Stardust => "stardust",
    Cosmos => "cosmos",
    Nova => "nova",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Room {
    Living,
    Kitchen,
    Bathroom,
    Bedroom,
    Playground,
}

identifier_enum!(Room, "room", {
    Living => "living",
    Kitchen => "kitchen",
    Bathroom => "bathroom",
    Bedroom => "bedroom",
    Playground => "playground",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FoodTier {
    Basic,
    Premium,
}

identifier_enum!(FoodTier, "food tier", {
    Basic => "basic",
    Premium => "premium",
});

impl Default for FoodTier {
    fn default() -> Self {
        Self::Basic
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Toy {
    Ball,
    Frisbee,
    Robot,
}

identifier_enum!(Toy, "toy", {
    Ball => "ball",
    Frisbee => "frisbee",
    Robot => "robot",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlayIntensity {
    Low,
    Medium,
    High,
}

identifier_enum!(PlayIntensity, "play intensity", {
    Low => "low",
    Medium => "medium",
    High => "high",
});

impl Default for PlayIntensity {
    fn default() -> Self {
        Self::Medium
    }
}

impl PlayIntensity {
    /// Energy required, and spent, by one play session.
    pub fn energy_cost(self) -> f64 {
        match self {
            Self::Low => 10.0,
            Self::Medium => 20.0,
            Self::High => 30.0,
        }
    }

    pub fn happiness_gain(self) -> f64 {
        match self {
            Self::Low => 15.0,
            Self::Medium => 25.0,
            Self::High => 40.0,
        }
    }

    pub fn hunger_cost(self) -> f64 {
        match self {
            Self::Low => 5.0,
            Self::Medium => 10.0,
            Self::High => 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SleepDuration {
    Nap,
    Sleep,
}

identifier_enum!(SleepDuration, "sleep duration", {
    Nap => "nap",
    Sleep => "sleep",
});

impl Default for SleepDuration {
    fn default() -> Self {
        Self::Nap
    }
}

/// Overall mood, derived from the gauges by a fixed precedence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
    Hungry,
    Playful,
    Sleepy,
    Dirty,
    Sick,
}

identifier_enum!(Mood, "mood", {
    Happy => "happy",
    Neutral => "neutral",
    Sad => "sad",
    Hungry => "hungry",
    Playful => "playful",
    Sleepy => "sleepy",
    Dirty => "dirty",
    Sick => "sick",
});

/// One entry of the attention list, in check order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Need {
    Hungry,
    Unhappy,
    Tired,
    Dirty,
    Sick,
}

identifier_enum!(Need, "need", {
    Hungry => "hungry",
    Unhappy => "unhappy",
    Tired => "tired",
    Dirty => "dirty",
    Sick => "sick",
});

/// Display band for a gauge value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeBand {
    /// 70 and above
    Good,
    /// 40 up to 70
    Fair,
    /// Below 40
    Low,
}

impl GaugeBand {
    pub fn of(value: f64) -> Self {
        if value >= 70.0 {
            Self::Good
        } else if value >= 40.0 {
            Self::Fair
        } else {
            Self::Low
        }
    }
}

/// Gauges and progression counters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PetStats {
    /// 0 = starving, 100 = full
    pub hunger: f64,
    pub happiness: f64,
    pub energy: f64,
    /// 0 = filthy, 100 = spotless
    pub hygiene: f64,
    pub health: f64,
    pub level: u32,
    pub experience: u32,
    pub coins: u64,
}

impl Default for PetStats {
    fn default() -> Self {
        Self {
            hunger: 80.0,
            happiness: 70.0,
            energy: 90.0,
            hygiene: 100.0,
            health: 100.0,
            level: 1,
            experience: 0,
            coins: 50,
        }
    }
}

impl PetStats {
    /// The five bounded gauges, in display order.
    pub fn gauges(&self) -> [(&'static str, f64); 5] {
        [
            ("hunger", self.hunger),
            ("happiness", self.happiness),
            ("energy", self.energy),
            ("hygiene", self.hygiene),
            ("health", self.health),
        ]
    }

    /// Experience required to leave the current level.
    pub fn experience_to_next(&self) -> u32 {
        self.level * 100
    }
}

/// Clamp a gauge into `[0, 100]`.
pub(crate) fn clamp_gauge(value: f64) -> f64 {
    value.clamp(0.0, GAUGE_MAX)
}

/// Everything unlocked so far. Each list only grows and never holds duplicates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Unlockables {
    pub rooms: Vec<Room>,
    pub foods: Vec<FoodTier>,
    pub toys: Vec<Toy>,
    #[serde(default)]
    pub decorations: Vec<String>,
}

impl Default for Unlockables {
    fn default() -> Self {
        Self {
            rooms: vec![Room::Living],
            foods: vec![FoodTier::Basic],
            toys: vec![Toy::Ball],
            decorations: Vec::new(),
        }
    }
}

impl Unlockables {
    pub fn has_room(&self, room: Room) -> bool {
        self.rooms.contains(&room)
    }

    pub fn has_food(&self, food: FoodTier) -> bool {
        self.foods.contains(&food)
    }

    pub fn has_toy(&self, toy: Toy) -> bool {
        self.toys.contains(&toy)
    }

    /// Drop repeated identifiers, keeping first occurrences in order.
    pub(crate) fn dedup(&mut self) {
        fn keep_first<T: PartialEq + Clone>(items: &mut Vec<T>) {
            let mut seen: Vec<T> = Vec::with_capacity(items.len());
            items.retain(|item| {
                if seen.contains(item) {
                    false
                } else {
                    seen.push(item.clone());
                    true
                }
            });
        }
        keep_first(&mut self.rooms);
        keep_first(&mut self.foods);
        keep_first(&mut self.toys);
        keep_first(&mut self.decorations);
    }
}

/// One user-initiated care action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum CareAction {
    Feed { food: FoodTier },
    Play { intensity: PlayIntensity },
    Clean,
    Sleep { duration: SleepDuration },
    ChangeRoom { room: Room },
}

impl fmt::Display for CareAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Feed { food } => write!(f, "feed({})", food),
            Self::Play { intensity } => write!(f, "play({})", intensity),
            Self::Clean => f.write_str("clean"),
            Self::Sleep { duration } => write!(f, "sleep({})", duration),
            Self::ChangeRoom { room } => write!(f, "room({})", room),
        }
    }
}

/// Display-only result of a care action. Refusals are never errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coins: Option<u32>,
}

impl ActionOutcome {
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            coins: None,
        }
    }

    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            coins: None,
        }
    }

    pub fn with_coins(mut self, coins: u32) -> Self {
        self.coins = Some(coins);
        self
    }
}

/// Answer to "how are you?".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PetStatus {
    pub message: String,
    pub mood: Mood,
    pub needs_attention: Vec<Need>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_parse_case_insensitively() {
        assert_eq!("Kitchen".parse::<Room>().unwrap(), Room::Kitchen);
        assert_eq!(" NOVA ".parse::<Species>().unwrap(), Species::Nova);
        assert_eq!("premium".parse::<FoodTier>().unwrap(), FoodTier::Premium);
    }

    #[test]
    fn unknown_identifier_lists_choices() {
        let err = "attic".parse::<Room>().unwrap_err();
        assert_eq!(err.kind, "room");
        assert!(err.to_string().contains("playground"));
    }

    #[test]
    fn serde_names_match_display() {
        for room in Room::ALL {
            let json = serde_json::to_string(room).unwrap();
            assert_eq!(json, format!("\"{}\"", room));
        }
    }

    #[test]
    fn gauge_bands() {
        assert_eq!(GaugeBand::of(70.0), GaugeBand::Good);
        assert_eq!(GaugeBand::of(69.9), GaugeBand::Fair);
        assert_eq!(GaugeBand::of(40.0), GaugeBand::Fair);
        assert_eq!(GaugeBand::of(12.0), GaugeBand::Low);
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let mut unlocked = Unlockables {
            rooms: vec![Room::Living, Room::Kitchen, Room::Living],
            foods: vec![FoodTier::Basic, FoodTier::Basic],
            toys: vec![Toy::Ball],
            decorations: vec!["deco_6".into(), "deco_6".into()],
        };
        unlocked.dedup();
        assert_eq!(unlocked.rooms, vec![Room::Living, Room::Kitchen]);
        assert_eq!(unlocked.foods, vec![FoodTier::Basic]);
        assert_eq!(unlocked.decorations, vec!["deco_6".to_string()]);
    }

    #[test]
    fn care_action_serde_is_tagged() {
        let json = serde_json::to_string(&CareAction::Play {
            intensity: PlayIntensity::High,
        })
        .unwrap();
        assert_eq!(json, r#"{"action":"play","intensity":"high"}"#);
    }
}
