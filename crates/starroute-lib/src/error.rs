use thiserror::Error;

use crate::galaxy::SystemId;

/// Convenient result alias for the starroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// An unreachable system is never an error: searches report it by leaving the
/// system out of their result.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a search is started from a system the graph does not contain.
    #[error("origin system {id} is not part of the galaxy")]
    InvalidOrigin { id: SystemId },

    /// Raised when a traveller-based search is requested for a traveller that
    /// is not currently in any system.
    #[error("traveller is not located in any system")]
    NoCurrentSystem,

    /// Raised when a system name could not be found in the galaxy.
    #[error("unknown system name: {name}{}", format_suggestions(.suggestions))]
    UnknownSystem {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a galaxy description fails validation.
    #[error("invalid galaxy data: {message}")]
    GalaxyValidation { message: String },

    /// Raised when ship data fails validation.
    #[error("invalid ship data: {message}")]
    ShipDataValidation { message: String },

    /// Raised when duplicate ship names are encountered during catalog load.
    #[error("duplicate ship name encountered: {name}")]
    DuplicateShipName { name: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
