//! The companion aggregate and its care actions.
//!
//! Every mutating call takes the current instant explicitly. A call either
//! applies all of its effects or is refused before touching anything.

use chrono::{DateTime, Utc};
use log::debug;
use rand::Rng;

use super::catalog::room_greeting;
use super::progression::{CLEAN_XP, FEED_XP, PLAY_XP, SLEEP_XP};
use super::types::{
    clamp_gauge, ActionOutcome, CareAction, FoodTier, PetStats, PlayIntensity, Room,
    SleepDuration, Species, Unlockables,
};

/// Feeding is refused at or above this hunger.
pub const FULL_THRESHOLD: f64 = 95.0;
/// Cleaning is refused at or above this hygiene.
pub const CLEAN_THRESHOLD: f64 = 90.0;
/// Sleeping is refused at or above this energy.
pub const RESTED_THRESHOLD: f64 = 90.0;

/// Passive decay is skipped until this many seconds have passed.
pub const DECAY_THRESHOLD_SECS: f64 = 60.0;
pub const HUNGER_DECAY_PER_MIN: f64 = 0.5;
pub const HAPPINESS_DECAY_PER_MIN: f64 = 0.3;
pub const ENERGY_DECAY_PER_MIN: f64 = 0.2;
pub const HYGIENE_DECAY_PER_MIN: f64 = 0.15;
pub const HEALTH_DECAY_PER_MIN: f64 = 0.5;
/// Health only decays while hunger or hygiene sits below this.
pub const NEGLECT_THRESHOLD: f64 = 20.0;

/// Last time each kind of care was given. Recorded for save compatibility;
/// no rule reads these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityLog {
    pub last_fed: DateTime<Utc>,
    pub last_played: DateTime<Utc>,
    pub last_cleaned: DateTime<Utc>,
    pub last_slept: DateTime<Utc>,
}

impl ActivityLog {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            last_fed: now,
            last_played: now,
            last_cleaned: now,
            last_slept: now,
        }
    }

    /// Most recent of the four instants.
    pub fn latest(&self) -> DateTime<Utc> {
        self.last_fed
            .max(self.last_played)
            .max(self.last_cleaned)
            .max(self.last_slept)
    }
}

/// A companion and all of its state.
#[derive(Debug, Clone, PartialEq)]
pub struct Pet {
    pub(crate) name: String,
    pub(crate) species: Species,
    pub(crate) stats: PetStats,
    pub(crate) unlocked: Unlockables,
    pub(crate) current_room: Room,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) last_interaction: DateTime<Utc>,
    pub(crate) activity: ActivityLog,
}

impl Pet {
    /// A newly adopted companion, born at `now`, in the living room.
    pub fn new(name: &str, species: Species, now: DateTime<Utc>) -> Self {
        Self {
            name: name.to_string(),
            species,
            stats: PetStats::default(),
            unlocked: Unlockables::default(),
            current_room: Room::Living,
            created_at: now,
            last_interaction: now,
            activity: ActivityLog::starting_at(now),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn stats(&self) -> &PetStats {
        &self.stats
    }

    pub fn unlocked(&self) -> &Unlockables {
        &self.unlocked
    }

    pub fn current_room(&self) -> Room {
        self.current_room
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_interaction(&self) -> DateTime<Utc> {
        self.last_interaction
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// Run one care action.
    pub fn apply(&mut self, action: CareAction, now: DateTime<Utc>) -> ActionOutcome {
        match action {
            CareAction::Feed { food } => self.feed(food, now),
            CareAction::Play { intensity } => self.play(intensity, now),
            CareAction::Clean => self.clean(now),
            CareAction::Sleep { duration } => self.sleep(duration, now),
            CareAction::ChangeRoom { room } => self.change_room(room, now),
        }
    }

    pub fn feed(&mut self, food: FoodTier, now: DateTime<Utc>) -> ActionOutcome {
        if self.stats.hunger >= FULL_THRESHOLD {
            return ActionOutcome::refused("I'm too full! Let me digest first 🌟");
        }

        let hunger_gain = match food {
            FoodTier::Basic => 25.0,
            FoodTier::Premium => 40.0,
        };
        let coins: u32 = rand::thread_rng().gen_range(3..=7);

        self.stats.hunger = clamp_gauge(self.stats.hunger + hunger_gain);
        self.stats.happiness = clamp_gauge(self.stats.happiness + 5.0);
        self.stats.coins += u64::from(coins);
        self.gain_experience(FEED_XP);
        self.activity.last_fed = now;
        self.last_interaction = now;

        let message = if self.stats.hunger >= 90.0 {
            "Yummy! I'm completely satisfied! ✨"
        } else {
            "Delicious! Thank you! 🌠"
        };
        ActionOutcome::done(message).with_coins(coins)
    }

    pub fn play(&mut self, intensity: PlayIntensity, now: DateTime<Utc>) -> ActionOutcome {
        let cost = intensity.energy_cost();
        if self.stats.energy < cost {
            return ActionOutcome::refused("I'm too tired... Let me rest first! 😴");
        }

        let coins: u32 = rand::thread_rng().gen_range(5..=14);

        self.stats.happiness = clamp_gauge(self.stats.happiness + intensity.happiness_gain());
        self.stats.energy = clamp_gauge(self.stats.energy - cost);
        self.stats.hunger = clamp_gauge(self.stats.hunger - intensity.hunger_cost());
        self.stats.coins += u64::from(coins);
        self.gain_experience(PLAY_XP);
        self.activity.last_played = now;
        self.last_interaction = now;

        ActionOutcome::done("That was so much fun! I'm glowing with joy! 💫").with_coins(coins)
    }

    pub fn clean(&mut self, now: DateTime<Utc>) -> ActionOutcome {
        if self.stats.hygiene >= CLEAN_THRESHOLD {
            return ActionOutcome::refused("I'm already sparkling clean! ✨");
        }

        self.stats.hygiene = 100.0;
        self.stats.happiness = clamp_gauge(self.stats.happiness + 10.0);
        self.stats.health = clamp_gauge(self.stats.health + 5.0);
        self.gain_experience(CLEAN_XP);
        self.activity.last_cleaned = now;
        self.last_interaction = now;

        ActionOutcome::done("Ahh~ That feels so refreshing! I'm squeaky clean! 🛁")
    }

    pub fn sleep(&mut self, duration: SleepDuration, now: DateTime<Utc>) -> ActionOutcome {
        if self.stats.energy >= RESTED_THRESHOLD {
            return ActionOutcome::refused("I'm already energized! Let's do something fun! ⚡");
        }

        let energy_gain = match duration {
            SleepDuration::Nap => 30.0,
            SleepDuration::Sleep => 50.0,
        };
        self.stats.energy = clamp_gauge(self.stats.energy + energy_gain);
        self.stats.health = clamp_gauge(self.stats.health + 5.0);
        self.gain_experience(SLEEP_XP);
        self.activity.last_slept = now;
        self.last_interaction = now;

        ActionOutcome::done(match duration {
            SleepDuration::Sleep => "That was a great sleep! I feel amazing! 💤",
            SleepDuration::Nap => "Quick nap recharged me! Let's go! ⚡",
        })
    }

    pub fn change_room(&mut self, room: Room, now: DateTime<Utc>) -> ActionOutcome {
        if !self.unlocked.has_room(room) {
            return ActionOutcome::refused("This room is locked! Level up to unlock it! 🔒");
        }

        self.current_room = room;
        self.last_interaction = now;
        ActionOutcome::done(room_greeting(room))
    }

    /// Apply passive decay for the whole minutes elapsed since the last
    /// interaction.
    ///
    /// Below the 60 second threshold nothing changes, not even the baseline.
    /// Otherwise the partial minute is dropped and the baseline moves to `now`.
    /// Returns the number of minutes applied.
    pub fn update(&mut self, now: DateTime<Utc>) -> Option<u64> {
        let elapsed_secs =
            now.signed_duration_since(self.last_interaction).num_milliseconds() as f64 / 1000.0;
        if elapsed_secs < DECAY_THRESHOLD_SECS {
            return None;
        }

        let minutes = (elapsed_secs / 60.0).floor();
        self.stats.hunger = clamp_gauge(self.stats.hunger - minutes * HUNGER_DECAY_PER_MIN);
        self.stats.happiness =
            clamp_gauge(self.stats.happiness - minutes * HAPPINESS_DECAY_PER_MIN);
        self.stats.energy = clamp_gauge(self.stats.energy - minutes * ENERGY_DECAY_PER_MIN);
        self.stats.hygiene = clamp_gauge(self.stats.hygiene - minutes * HYGIENE_DECAY_PER_MIN);

        // checked against the already decayed values
        if self.stats.hunger < NEGLECT_THRESHOLD || self.stats.hygiene < NEGLECT_THRESHOLD {
            self.stats.health = clamp_gauge(self.stats.health - minutes * HEALTH_DECAY_PER_MIN);
        }

        self.last_interaction = now;
        debug!("decay: {} minute(s) applied to {}", minutes, self.name);
        Some(minutes as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pet::types::{Toy, GAUGE_MAX};
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap()
    }

    fn pet() -> Pet {
        Pet::new("Comet", Species::Nebula, t0())
    }

    fn assert_gauges_in_range(pet: &Pet) {
        for (name, value) in pet.stats().gauges() {
            assert!(
                (0.0..=GAUGE_MAX).contains(&value),
                "{} out of range: {}",
                name,
                value
            );
        }
    }

    #[test]
    fn new_pet_defaults() {
        let pet = pet();
        assert_eq!(pet.stats().hunger, 80.0);
        assert_eq!(pet.stats().happiness, 70.0);
        assert_eq!(pet.stats().energy, 90.0);
        assert_eq!(pet.stats().coins, 50);
        assert_eq!(pet.current_room(), Room::Living);
        assert_eq!(pet.unlocked().toys, vec![Toy::Ball]);
        assert_eq!(pet.last_interaction(), t0());
    }

    #[test]
    fn feed_refused_when_full() {
        let mut pet = pet();
        pet.stats.hunger = 96.0;
        let before = pet.clone();

        let outcome = pet.feed(FoodTier::Basic, t0() + Duration::seconds(5));
        assert!(!outcome.success);
        assert!(outcome.message.contains("too full"));
        assert_eq!(outcome.coins, None);
        assert_eq!(pet, before);
    }

    #[test]
    fn feed_premium_fills_and_pays() {
        let mut pet = pet();
        pet.stats.hunger = 40.0;
        let later = t0() + Duration::minutes(3);

        let outcome = pet.feed(FoodTier::Premium, later);
        assert!(outcome.success);
        let coins = outcome.coins.unwrap();
        assert!((3..=7).contains(&coins));
        assert_eq!(pet.stats().hunger, 80.0);
        assert_eq!(pet.stats().happiness, 75.0);
        assert_eq!(pet.stats().coins, 50 + u64::from(coins));
        assert_eq!(pet.stats().experience, FEED_XP);
        assert_eq!(pet.activity().last_fed, later);
        assert_eq!(pet.last_interaction(), later);
        assert_eq!(outcome.message, "Delicious! Thank you! 🌠");
    }

    #[test]
    fn feed_clamps_hunger_and_reports_full() {
        let mut pet = pet();
        pet.stats.hunger = 90.0;
        pet.stats.happiness = 98.0;
        let outcome = pet.feed(FoodTier::Basic, t0());
        assert_eq!(pet.stats().hunger, 100.0);
        assert_eq!(pet.stats().happiness, 100.0);
        assert!(outcome.message.contains("completely satisfied"));
    }

    #[test]
    fn play_refused_without_energy() {
        let mut pet = pet();
        pet.stats.energy = 5.0;
        let before = pet.clone();

        let outcome = pet.play(PlayIntensity::Medium, t0());
        assert!(!outcome.success);
        assert!(outcome.message.contains("too tired"));
        assert_eq!(pet, before);
    }

    #[test]
    fn play_spends_energy_and_hunger() {
        let mut pet = pet();
        pet.stats.hunger = 10.0;
        let outcome = pet.play(PlayIntensity::High, t0());
        assert!(outcome.success);
        assert!((5..=14).contains(&outcome.coins.unwrap()));
        assert_eq!(pet.stats().happiness, 100.0);
        assert_eq!(pet.stats().energy, 60.0);
        assert_eq!(pet.stats().hunger, 0.0);
        assert_eq!(pet.stats().experience, PLAY_XP);
    }

    #[test]
    fn play_allowed_at_exact_cost() {
        let mut pet = pet();
        pet.stats.energy = 10.0;
        assert!(pet.play(PlayIntensity::Low, t0()).success);
        assert_eq!(pet.stats().energy, 0.0);
    }

    #[test]
    fn clean_sets_hygiene_to_full() {
        let mut pet = pet();
        pet.stats.hygiene = 12.5;
        pet.stats.health = 97.0;
        let outcome = pet.clean(t0());
        assert!(outcome.success);
        assert_eq!(outcome.coins, None);
        assert_eq!(pet.stats().hygiene, 100.0);
        assert_eq!(pet.stats().happiness, 80.0);
        assert_eq!(pet.stats().health, 100.0);
        assert_eq!(pet.stats().experience, CLEAN_XP);
    }

    #[test]
    fn clean_refused_when_clean() {
        let mut pet = pet();
        pet.stats.hygiene = 90.0;
        let before = pet.clone();
        assert!(!pet.clean(t0()).success);
        assert_eq!(pet, before);
    }

    #[test]
    fn sleep_restores_energy() {
        let mut pet = pet();
        pet.stats.energy = 40.0;
        pet.stats.health = 50.0;
        let outcome = pet.sleep(SleepDuration::Sleep, t0());
        assert!(outcome.success);
        assert!(outcome.message.contains("great sleep"));
        assert_eq!(pet.stats().energy, 90.0);
        assert_eq!(pet.stats().health, 55.0);
        assert_eq!(pet.stats().experience, SLEEP_XP);

        let outcome = pet.sleep(SleepDuration::Nap, t0());
        assert!(!outcome.success);
        assert!(outcome.message.contains("already energized"));
    }

    #[test]
    fn locked_room_is_refused() {
        let mut pet = pet();
        let outcome = pet.change_room(Room::Kitchen, t0() + Duration::minutes(1));
        assert!(!outcome.success);
        assert_eq!(pet.current_room(), Room::Living);
        assert_eq!(pet.last_interaction(), t0());
    }

    #[test]
    fn unlocked_room_greets() {
        let mut pet = pet();
        pet.unlocked.rooms.push(Room::Kitchen);
        let later = t0() + Duration::minutes(1);
        let outcome = pet.change_room(Room::Kitchen, later);
        assert!(outcome.success);
        assert_eq!(outcome.message, room_greeting(Room::Kitchen));
        assert_eq!(pet.current_room(), Room::Kitchen);
        assert_eq!(pet.last_interaction(), later);
    }

    #[test]
    fn update_below_threshold_is_noop() {
        let mut pet = pet();
        let before = pet.clone();
        assert_eq!(pet.update(t0() + Duration::seconds(30)), None);
        assert_eq!(pet, before);
    }

    #[test]
    fn update_drops_partial_minute() {
        let mut pet = pet();
        let now = t0() + Duration::seconds(125);
        assert_eq!(pet.update(now), Some(2));
        assert!((pet.stats().hunger - 79.0).abs() < 1e-9);
        assert!((pet.stats().happiness - 69.4).abs() < 1e-9);
        assert!((pet.stats().energy - 89.6).abs() < 1e-9);
        assert!((pet.stats().hygiene - 99.7).abs() < 1e-9);
        assert_eq!(pet.stats().health, 100.0);
        assert_eq!(pet.last_interaction(), now);
    }

    #[test]
    fn update_hurts_health_when_neglected() {
        let mut pet = pet();
        pet.stats.hunger = 21.0;
        // 4 minutes takes hunger to 19, below the neglect line
        pet.update(t0() + Duration::minutes(4));
        assert!((pet.stats().hunger - 19.0).abs() < 1e-9);
        assert!((pet.stats().health - 98.0).abs() < 1e-9);
    }

    #[test]
    fn long_absence_bottoms_out_at_zero() {
        let mut pet = pet();
        pet.update(t0() + Duration::days(3));
        assert_eq!(pet.stats().hunger, 0.0);
        assert_eq!(pet.stats().happiness, 0.0);
        assert_eq!(pet.stats().energy, 0.0);
        assert_eq!(pet.stats().hygiene, 0.0);
        assert_eq!(pet.stats().health, 0.0);
        assert_gauges_in_range(&pet);
    }

    #[test]
    fn clock_moving_backwards_is_noop() {
        let mut pet = pet();
        let before = pet.clone();
        assert_eq!(pet.update(t0() - Duration::hours(2)), None);
        assert_eq!(pet, before);
    }

    #[test]
    fn gauges_stay_in_range_across_action_sequences() {
        let mut pet = pet();
        let mut now = t0();
        let actions = [
            CareAction::Play { intensity: PlayIntensity::High },
            CareAction::Play { intensity: PlayIntensity::High },
            CareAction::Feed { food: FoodTier::Premium },
            CareAction::Play { intensity: PlayIntensity::Medium },
            CareAction::Sleep { duration: SleepDuration::Sleep },
            CareAction::Feed { food: FoodTier::Premium },
            CareAction::Clean,
            CareAction::ChangeRoom { room: Room::Kitchen },
        ];
        for round in 0..40 {
            for action in actions {
                now += Duration::seconds(37 * (round % 5) + 11);
                pet.update(now);
                let level = pet.stats().level;
                let before = pet.unlocked().clone();
                pet.apply(action, now);
                assert_gauges_in_range(&pet);
                assert!(pet.stats().level >= level);
                let after = pet.unlocked();
                assert!(before.rooms.iter().all(|r| after.has_room(*r)));
                assert!(before.foods.iter().all(|f| after.has_food(*f)));
                assert!(before.toys.iter().all(|t| after.has_toy(*t)));
                assert!(before
                    .decorations
                    .iter()
                    .all(|d| after.decorations.contains(d)));
                assert!(pet.unlocked().has_room(pet.current_room()));
            }
        }
    }
}
