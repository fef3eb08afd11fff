use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("seed is empty")]
    EmptySeed,

    #[error("empty derivation range: min {min} is not below max {max}")]
    EmptyRange { min: u64, max: u64 },

    #[error("no persisted configuration in fragment")]
    NoPersistedState,

    #[error("malformed fragment token `{token}`: {reason}")]
    MalformedFragment { token: String, reason: String },

    #[error("invalid color `{0}` (expected #rgb or #rrggbb)")]
    InvalidColor(String),

    #[error("invalid settings file {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
