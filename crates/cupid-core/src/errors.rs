use crate::domain::ExclusionKind;

/// Core error type for the bot.
///
/// The adapter crate maps these into user-facing messages; conflict variants
/// are informational ("already in your favorites"), store errors are not.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("no profile found for user {0}")]
    ProfileNotFound(i64),

    /// The requester's gender is unset, so a preferred gender cannot be
    /// derived. The engine never guesses an orientation.
    #[error("cannot derive match preferences for user {0}: gender is not set")]
    AmbiguousPreference(i64),

    #[error("user {target} is already in the {kind} list of user {owner}")]
    AlreadyExcluded {
        kind: ExclusionKind,
        owner: i64,
        target: i64,
    },

    #[error("user {user} already has interest {interest:?}")]
    DuplicateInterest { user: i64, interest: String },

    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("external error: {0}")]
    External(String),
}

impl Error {
    /// Conflicts are recoverable duplicates, surfaced to the user as an
    /// informational message rather than a failure.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Error::AlreadyExcluded { .. } | Error::DuplicateInterest { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
