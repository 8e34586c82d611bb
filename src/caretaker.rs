//! # Caretaker
//!
//! Drives a companion the way a front end is expected to: one care action per
//! user input, a save after every change, and a periodic decay tick that only
//! runs while a companion is loaded.
//!
//! Care is offered per room: an action the current room does not offer (or
//! whose food or toy is still locked) is refused here, before the engine sees
//! it. Moving between rooms is always allowed.
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use etherpet::caretaker::Caretaker;
//! use etherpet::pet::{CareAction, FoodTier, Species};
//! use etherpet::storage::SaveStore;
//!
//! # fn main() -> Result<(), etherpet::pet::PetError> {
//! let store = SaveStore::open("./data/etherpet")?;
//! let mut caretaker = Caretaker::open(store, Utc::now())?;
//! if !caretaker.has_companion() {
//!     caretaker.adopt("Comet", Species::Nebula, Utc::now())?;
//! }
//! let (outcome, status) =
//!     caretaker.perform(CareAction::Feed { food: FoodTier::Basic }, Utc::now())?;
//! println!("{} ({})", outcome.message, status.mood);
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::pet::{
    room_offers, unavailable_message, ActionOutcome, CareAction, FoodTier, ParseKindError, Pet,
    PetError, PetStatus, PlayIntensity, Room, SleepDuration, Species,
};
use crate::storage::SaveStore;
use crate::validation::{escape_log, validate_pet_name};

/// Nominal period between decay ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(60);

/// One line typed during an interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Care(CareAction),
    Status,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionCommandError {
    #[error("unknown command '{0}' (try feed, play, clean, sleep, room, status or quit)")]
    Unknown(String),
    #[error("'room' needs a room name")]
    MissingRoom,
    #[error(transparent)]
    BadArgument(#[from] ParseKindError),
}

impl FromStr for SessionCommand {
    type Err = SessionCommandError;

    /// `feed [basic|premium]`, `play [low|medium|high]`, `clean`,
    /// `sleep [nap|sleep]`, `room <room>`, `status` (or an empty line), `quit`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default().to_ascii_lowercase();
        let arg = words.next();
        let action = match verb.as_str() {
            "" | "status" => return Ok(Self::Status),
            "quit" | "exit" => return Ok(Self::Quit),
            "feed" => CareAction::Feed {
                food: arg.map(FoodTier::from_str).transpose()?.unwrap_or_default(),
            },
            "play" => CareAction::Play {
                intensity: arg
                    .map(PlayIntensity::from_str)
                    .transpose()?
                    .unwrap_or_default(),
            },
            "clean" => CareAction::Clean,
            "sleep" => CareAction::Sleep {
                duration: arg
                    .map(SleepDuration::from_str)
                    .transpose()?
                    .unwrap_or_default(),
            },
            "room" => CareAction::ChangeRoom {
                room: arg.ok_or(SessionCommandError::MissingRoom)?.parse::<Room>()?,
            },
            other => return Err(SessionCommandError::Unknown(other.to_string())),
        };
        Ok(Self::Care(action))
    }
}

/// What happened during an interactive session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A tick applied this many minutes of decay.
    Decayed { minutes: u64 },
    /// A typed care action ran (or was refused).
    Acted(ActionOutcome),
    /// The user asked for the status.
    Status,
    /// The line could not be acted on.
    Rejected(String),
}

/// Resolves once `signal` fires. When the signal cannot be listened for, the
/// failure is logged and the future never resolves.
pub async fn until_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!("cannot listen for the shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

pub struct Caretaker {
    store: SaveStore,
    pet: Option<Pet>,
}

impl Caretaker {
    /// Wrap `store`, loading whatever companion it holds. A missing or
    /// unreadable save simply means no companion yet.
    pub fn open(store: SaveStore, now: DateTime<Utc>) -> Result<Self, PetError> {
        let pet = store.load(now)?;
        match &pet {
            Some(p) => info!(
                "loaded {} the {} (level {})",
                escape_log(p.name()),
                p.species(),
                p.stats().level
            ),
            None => info!("no saved companion in {}", store.path().display()),
        }
        let mut caretaker = Self { store, pet };
        // persist the decay applied while unloaded
        caretaker.persist()?;
        Ok(caretaker)
    }

    pub fn has_companion(&self) -> bool {
        self.pet.is_some()
    }

    pub fn pet(&self) -> Option<&Pet> {
        self.pet.as_ref()
    }

    pub fn store(&self) -> &SaveStore {
        &self.store
    }

    /// Whether periodic ticks should be scheduled right now.
    pub fn wants_ticks(&self) -> bool {
        self.has_companion()
    }

    /// Adopt a new companion and save it.
    pub fn adopt(
        &mut self,
        name: &str,
        species: Species,
        now: DateTime<Utc>,
    ) -> Result<&Pet, PetError> {
        if let Some(existing) = &self.pet {
            return Err(PetError::AlreadyAdopted(existing.name().to_string()));
        }
        let name = validate_pet_name(name)?;
        let pet = Pet::new(&name, species, now);
        self.store.save(&pet.to_save())?;
        info!("adopted {} the {}", escape_log(&name), species);
        Ok(self.pet.insert(pet))
    }

    /// Run exactly one care action; saves when it succeeded. Actions the
    /// current room does not offer are refused without touching the companion.
    pub fn perform(
        &mut self,
        action: CareAction,
        now: DateTime<Utc>,
    ) -> Result<(ActionOutcome, PetStatus), PetError> {
        let pet = self.pet.as_mut().ok_or(PetError::NoCompanion)?;
        let room = pet.current_room();
        if !room_offers(room, pet.unlocked(), action) {
            debug!("{} is not offered in {}", action, room);
            let outcome = ActionOutcome::refused(unavailable_message(room, pet.unlocked(), action));
            return Ok((outcome, pet.status()));
        }
        let level_before = pet.stats().level;
        let outcome = pet.apply(action, now);
        let status = pet.status();
        debug!(
            "{} -> success={} coins={:?}",
            action, outcome.success, outcome.coins
        );
        if pet.stats().level > level_before {
            info!(
                "{} reached level {}",
                escape_log(pet.name()),
                pet.stats().level
            );
        }
        if outcome.success {
            self.persist()?;
        }
        Ok((outcome, status))
    }

    /// Current status, if a companion is loaded.
    pub fn status(&self) -> Option<PetStatus> {
        self.pet.as_ref().map(Pet::status)
    }

    /// One periodic decay pass. `None` when no companion is loaded; otherwise
    /// the minutes of decay applied (zero below the one minute threshold).
    pub fn tick(&mut self, now: DateTime<Utc>) -> Result<Option<u64>, PetError> {
        let Some(pet) = self.pet.as_mut() else {
            return Ok(None);
        };
        match pet.update(now) {
            Some(minutes) => {
                self.persist()?;
                Ok(Some(minutes))
            }
            None => Ok(Some(0)),
        }
    }

    /// Forget the companion and clear its save.
    pub fn release(&mut self) -> Result<Option<Pet>, PetError> {
        self.store.clear()?;
        let released = self.pet.take();
        if let Some(pet) = &released {
            info!("released {}", escape_log(pet.name()));
        }
        Ok(released)
    }

    /// Interactive session: tick every `period` and act on each line read
    /// from `input`, until `shutdown` resolves or a `quit` line arrives.
    ///
    /// Ticking pauses while no companion is loaded. When `input` reaches its
    /// end the session keeps ticking. `on_event` sees the caretaker after every
    /// typed line and after every tick that applied decay.
    pub async fn run_session<R, F, S>(
        &mut self,
        period: Duration,
        input: R,
        shutdown: S,
        mut on_event: F,
    ) -> Result<(), PetError>
    where
        R: AsyncBufRead + Unpin,
        F: FnMut(&Caretaker, &SessionEvent),
        S: Future<Output = ()>,
    {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // the first tick fires immediately
        interval.tick().await;
        tokio::pin!(shutdown);
        let mut lines = input.lines();
        let mut input_open = true;

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    debug!("session stopping");
                    return Ok(());
                }
                line = lines.next_line(), if input_open => {
                    match line? {
                        Some(line) => {
                            if !self.handle_line(&line, &mut on_event)? {
                                debug!("session closed by user");
                                return Ok(());
                            }
                        }
                        None => {
                            debug!("input closed; ticking only");
                            input_open = false;
                        }
                    }
                }
                _ = interval.tick() => {
                    if !self.wants_ticks() {
                        continue;
                    }
                    if let Some(minutes) = self.tick(Utc::now())? {
                        if minutes > 0 {
                            on_event(self, &SessionEvent::Decayed { minutes });
                        }
                    }
                }
            }
        }
    }

    /// Act on one typed line. Returns `false` when the session should end.
    fn handle_line<F>(&mut self, line: &str, on_event: &mut F) -> Result<bool, PetError>
    where
        F: FnMut(&Caretaker, &SessionEvent),
    {
        let event = match line.parse::<SessionCommand>() {
            Ok(SessionCommand::Quit) => return Ok(false),
            Ok(SessionCommand::Status) => SessionEvent::Status,
            Ok(SessionCommand::Care(action)) => match self.perform(action, Utc::now()) {
                Ok((outcome, _)) => SessionEvent::Acted(outcome),
                Err(PetError::NoCompanion) => {
                    SessionEvent::Rejected("no companion is loaded".to_string())
                }
                Err(e) => return Err(e),
            },
            Err(e) => SessionEvent::Rejected(e.to_string()),
        };
        on_event(self, &event);
        Ok(true)
    }

    fn persist(&self) -> Result<(), PetError> {
        if let Some(pet) = &self.pet {
            self.store.save(&pet.to_save())?;
        }
        Ok(())
    }
}
