//! # EtherPet - a virtual cosmic companion
//!
//! Adopt a companion, keep it fed, rested, clean and entertained, and watch
//! it level up into new rooms. Its needs keep decaying while you are away.
//!
//! ## Features
//!
//! - **Care Actions**: feed (basic or premium food), play (three intensities),
//!   clean, sleep (nap or full sleep) and move between rooms.
//! - **Passive Decay**: hunger, happiness, energy and hygiene drop for every
//!   whole minute away; neglect eats into health.
//! - **Progression**: experience, ten levels, coin bonuses, and rooms, food,
//!   toys and decorations that unlock along the way.
//! - **Moods**: a mood and an attention list derived from the gauges.
//! - **Persistence**: one save slot in a sled database; unreadable saves are
//!   treated as "no companion" rather than a crash.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use etherpet::pet::{Pet, PlayIntensity, Species};
//!
//! let mut pet = Pet::new("Comet", Species::Nebula, Utc::now());
//! let outcome = pet.play(PlayIntensity::Low, Utc::now());
//! println!("{} (+{:?} coins)", outcome.message, outcome.coins);
//! println!("{}", pet.status().message);
//! ```
//!
//! ## Module Organization
//!
//! - [`pet`] - the simulation engine: state, actions, decay, leveling, moods
//! - [`storage`] - the sled-backed save slot
//! - [`caretaker`] - the driver a front end uses: actions, saves, ticks
//! - [`config`] - configuration loading
//! - [`validation`] - name validation and log escaping
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   CLI / front   │ ← input, display, periodic timer
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   Caretaker     │ ← one action per input, save after every change
//! └─────────────────┘
//!          │
//! ┌─────────────────┐     ┌─────────────────┐
//! │   Pet engine    │ ←── │   Save store    │
//! └─────────────────┘     └─────────────────┘
//! ```

pub mod caretaker;
pub mod config;
pub mod pet;
pub mod storage;
pub mod validation;
