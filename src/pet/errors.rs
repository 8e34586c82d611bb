use thiserror::Error;

use crate::validation::PetNameError;

/// Errors that can arise while loading, saving or driving a companion.
///
/// Refused care actions (too full, too tired, locked room, ...) are not errors;
/// they come back as an unsuccessful [`ActionOutcome`](crate::pet::ActionOutcome).
#[derive(Debug, Error)]
pub enum PetError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around JSON serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapper around IO errors (directory creation, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when deserializing a save with an unexpected schema version.
    #[error("schema mismatch for {entity}: expected {expected}, got {found}")]
    SchemaMismatch {
        entity: &'static str,
        expected: u8,
        found: u8,
    },

    /// The save parsed but describes an impossible companion.
    #[error("corrupt save: {0}")]
    CorruptSave(String),

    /// An action or tick was requested while no companion is loaded.
    #[error("no companion has been adopted yet")]
    NoCompanion,

    /// Adoption was requested while a companion already exists.
    #[error("a companion named '{0}' already lives here; reset first")]
    AlreadyAdopted(String),

    #[error("invalid name: {0}")]
    InvalidName(#[from] PetNameError),
}
