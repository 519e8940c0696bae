use thiserror::Error;

/// Errors returned when configuring a generator or parsing an id.
///
/// Parsing never guesses: an id that was not produced by a generator with the
/// same [`Config`](crate::Config) is rejected instead of decoded into a wrong
/// instant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("timestamp resolution must be between 1ns and u64::MAX ns, got {nanos}ns")]
    InvalidResolution { nanos: u128 },
    #[error("id is {len} bytes long but at least {required} are required")]
    TooShort { len: usize, required: usize },
    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },
    #[error("encoded timestamp does not fit in 64 bits")]
    Overflow,
    #[error("decoded timestamp is outside the representable range")]
    OutOfRange,
}

pub type Result<T> = std::result::Result<T, Error>;
