//! Companion name validation and log-safe escaping of user-supplied text.

use std::fmt::Write;

/// Longest name accepted at adoption, in characters.
pub const MAX_NAME_CHARS: usize = 20;

/// Name validation errors with helpful messages
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PetNameError {
    #[error("Name cannot be empty")]
    Empty,

    #[error("Name is too long (maximum {max} characters)")]
    TooLong { max: usize },

    #[error("Name contains control characters")]
    ControlCharacters,
}

/// Validate a companion name and return its trimmed form.
pub fn validate_pet_name(name: &str) -> Result<String, PetNameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PetNameError::Empty);
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(PetNameError::TooLong {
            max: MAX_NAME_CHARS,
        });
    }
    if trimmed.chars().any(char::is_control) {
        return Err(PetNameError::ControlCharacters);
    }
    Ok(trimmed.to_string())
}

/// Escape user-supplied text so it stays on one log line.
///
/// Backslashes, newlines, carriage returns and tabs get backslash escapes,
/// other control characters become `\xNN`. Anything past 64 characters is cut
/// with an ellipsis; names that long came from a hand-edited save.
pub fn escape_log(s: &str) -> String {
    const MAX_PREVIEW: usize = 64;
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 4);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
