use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, trace, warn};

use crate::clock::{Clock, SystemClock};
use crate::encode::{self, MAX_DIGITS};
use crate::error::{Error, Result};
use crate::random::SuffixSource;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Generator settings. Fixed once a [`Generator`] is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Quantum the clock reading is truncated to before encoding.
    pub timestamp_resolution: Duration,
    /// Length of the random suffix.
    pub random_characters: usize,
}

impl Config {
    pub const fn new(timestamp_resolution: Duration, random_characters: usize) -> Self {
        Self {
            timestamp_resolution,
            random_characters,
        }
    }

    /// Check the resolution and return it in nanoseconds.
    ///
    /// # Errors
    /// [`Error::InvalidResolution`] for a zero resolution or one longer than
    /// `u64::MAX` nanoseconds.
    pub fn validate(&self) -> Result<u64> {
        let nanos = self.timestamp_resolution.as_nanos();
        match u64::try_from(nanos) {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(Error::InvalidResolution { nanos }),
        }
    }
}

/// Millisecond resolution with an 8 character suffix.
impl Default for Config {
    fn default() -> Self {
        Self::new(Duration::from_millis(1), 8)
    }
}

/// Both halves of a parsed id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parsed<'a> {
    pub timestamp: DateTime<Utc>,
    pub random: &'a str,
}

/// Produces ids of the form `[base62 timestamp][random suffix]` and takes
/// them apart again.
///
/// A generator owns its random state and is not meant to be shared between
/// threads without a lock; give each thread its own instance instead (see
/// [`next_id`](crate::next_id)).
#[derive(Debug)]
pub struct Generator<C = SystemClock> {
    config: Config,
    resolution_nanos: u64,
    clock: C,
    source: SuffixSource,
}

impl Generator<SystemClock> {
    /// Create a generator reading the system clock, seeded from the current
    /// time.
    ///
    /// # Errors
    /// See [`Config::validate`].
    pub fn new(config: Config) -> Result<Self> {
        let resolution_nanos = config.validate()?;
        debug!(
            resolution_ns = resolution_nanos,
            random_characters = config.random_characters,
            "created id generator"
        );
        Ok(Self {
            config,
            resolution_nanos,
            clock: SystemClock,
            source: SuffixSource::from_clock(),
        })
    }
}

impl Default for Generator<SystemClock> {
    fn default() -> Self {
        Self {
            config: Config::default(),
            resolution_nanos: 1_000_000,
            clock: SystemClock,
            source: SuffixSource::from_clock(),
        }
    }
}

impl<C: Clock> Generator<C> {
    /// Swap the time source, keeping configuration and random state.
    pub fn with_clock<D: Clock>(self, clock: D) -> Generator<D> {
        Generator {
            config: self.config,
            resolution_nanos: self.resolution_nanos,
            clock,
            source: self.source,
        }
    }

    /// Reseed the suffix source so output is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.source = SuffixSource::from_seed(seed);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generate an id for the current time.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> String {
        let now = self.clock.now();
        self.next_at(now)
    }

    /// Generate an id for `at` instead of the clock reading.
    pub fn next_at(&mut self, at: DateTime<Utc>) -> String {
        let mut out = String::with_capacity(MAX_DIGITS + self.config.random_characters);
        encode::encode_into(self.ticks_at(at), &mut out);
        self.source.push_suffix(self.config.random_characters, &mut out);
        out
    }

    /// Generate `n` ids.
    pub fn batch(&mut self, n: usize) -> Vec<String> {
        (0..n).map(|_| self.next()).collect()
    }

    /// Whole resolution steps between the Unix epoch and `at`.
    ///
    /// Instants before the epoch count as zero.
    pub fn ticks_at(&self, at: DateTime<Utc>) -> u64 {
        let nanos = i128::from(at.timestamp()) * NANOS_PER_SEC as i128
            + i128::from(at.timestamp_subsec_nanos());
        if nanos < 0 {
            warn!(%at, "clock reading before the unix epoch, encoding as zero");
            return 0;
        }
        let ticks = nanos as u128 / u128::from(self.resolution_nanos);
        u64::try_from(ticks).unwrap_or(u64::MAX)
    }

    /// Recover the instant an id was generated at, truncated to the
    /// configured resolution.
    ///
    /// # Errors
    /// - [`Error::TooShort`] when the id is shorter than the suffix.
    /// - [`Error::InvalidCharacter`] for characters outside the alphabet; the
    ///   position is a character index into `value`.
    /// - [`Error::Overflow`] or [`Error::OutOfRange`] when the timestamp part
    ///   cannot be a real instant.
    pub fn parse_timestamp(&self, value: &str) -> Result<DateTime<Utc>> {
        let (prefix, _) = self.split(value)?;
        let ticks = encode::decode(&encode::reverse(prefix)).map_err(|err| match err {
            Error::InvalidCharacter {
                character,
                position,
            } => Error::InvalidCharacter {
                character,
                position: prefix.chars().count() - 1 - position,
            },
            other => other,
        });
        let ticks = ticks.inspect_err(|err| {
            trace!(value, %err, "failed to parse id timestamp");
        })?;

        let nanos = u128::from(ticks) * u128::from(self.resolution_nanos);
        let secs = i64::try_from(nanos / NANOS_PER_SEC).map_err(|_| Error::OutOfRange)?;
        let subsec = (nanos % NANOS_PER_SEC) as u32;
        DateTime::from_timestamp(secs, subsec).ok_or(Error::OutOfRange)
    }

    /// The random suffix of an id, verbatim.
    ///
    /// # Errors
    /// [`Error::TooShort`], or [`Error::InvalidCharacter`] when the suffix is
    /// not made of alphabet characters.
    pub fn parse_random_string<'a>(&self, value: &'a str) -> Result<&'a str> {
        self.split(value).map(|(_, random)| random)
    }

    /// Parse both halves at once.
    pub fn parse<'a>(&self, value: &'a str) -> Result<Parsed<'a>> {
        Ok(Parsed {
            timestamp: self.parse_timestamp(value)?,
            random: self.parse_random_string(value)?,
        })
    }

    fn split<'a>(&self, value: &'a str) -> Result<(&'a str, &'a str)> {
        let required = self.config.random_characters;
        let cut = value.len().checked_sub(required).ok_or(Error::TooShort {
            len: value.len(),
            required,
        })?;

        // every char touching the suffix must be ascii, which also makes
        // `cut` a char boundary
        let bad = value
            .char_indices()
            .enumerate()
            .filter(|(_, (offset, ch))| offset + ch.len_utf8() > cut)
            .find(|(_, (_, ch))| {
                u8::try_from(*ch)
                    .ok()
                    .and_then(encode::digit_value)
                    .is_none()
            });
        if let Some((position, (_, character))) = bad {
            trace!(value, position, "invalid character in id suffix");
            return Err(Error::InvalidCharacter {
                character,
                position,
            });
        }

        Ok(value.split_at(cut))
    }
}
