use pokecards_core::cards::CardsError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Rate limited by the card API after {attempts} attempts")]
    ThrottleExhausted { attempts: u32 },

    #[error("Card API request failed: HTTP {status} {reason}")]
    RequestFailed { status: u16, reason: String },

    #[error("Card API returned a successful response with an empty body")]
    EmptyPayload,

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to read fixture {path}: {source}")]
    Fixture {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Deserialization(#[from] CardsError),
}
