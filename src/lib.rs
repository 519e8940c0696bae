//! # lexid
//!
//! Short, lexicographically sortable, unique string ids.
//! Every id is a base62-encoded timestamp followed by a fixed number of random
//! base62 characters, so ids created later sort after ids created earlier
//! without any coordination between machines.
//!
//! ## Features
//! - **Sortable**: The alphabet `0-9A-Za-z` is in code-point order, so plain string comparison follows time.
//! - **Compact**: A millisecond timestamp takes 7 characters until the year 2081.
//! - **Configurable**: Pick the timestamp resolution (nanoseconds to minutes, or anything else) and the suffix length.
//! - **Reversible**: Recover the generation instant and the random suffix from any id.
//! - **Testable**: Inject a [`Clock`] and a seed to get deterministic output.
//!
//! ## Feature Flags
//! - `serde`: Derives `Serialize` and `Deserialize` for [`Config`] so it can live in your own configuration files.
//!
//! ## Quick Start
//!
//! ```rust
//! // Millisecond resolution, 8 random characters, one generator per thread.
//! let id = lexid::next_id();
//! assert_eq!(id.len(), 7 + 8);
//! ```
//!
//! ## ID Structure
//!
//! `[timestamp][random]`, with no separator:
//! - **timestamp**: `floor(unix_nanos / resolution)` in base62, most significant digit first, no padding.
//!   Its length grows by one character each time the value crosses a power of 62.
//! - **random**: exactly `random_characters` symbols from the same alphabet.
//!
//! Because the format is not delimited, parsing needs the same [`Config`] the id
//! was generated with.
//!
//! Ids only compare correctly while their timestamp parts have the same length.
//! At a digit boundary (`"z"` is tick 61, `"10"` is tick 62) the shorter id
//! sorts after the longer one.
//!
//! ## Advanced Usage
//!
//! ### Custom Configuration
//! ```rust
//! use std::time::Duration;
//! use lexid::{Config, Generator};
//!
//! let mut generator = Generator::new(Config::new(Duration::from_secs(1), 4)).unwrap();
//! let id = generator.next();
//! assert_eq!(generator.parse_random_string(&id).unwrap().len(), 4);
//! ```
//!
//! ### Frozen Time
//! ```rust
//! use std::time::Duration;
//! use chrono::{TimeZone, Utc};
//! use lexid::{Config, FixedClock, Generator};
//!
//! let at = Utc.with_ymd_and_hms(2019, 6, 3, 20, 34, 58).unwrap();
//! let mut generator = Generator::new(Config::new(Duration::from_millis(1), 0))
//!     .unwrap()
//!     .with_clock(FixedClock(at));
//!
//! let id = generator.next();
//! assert_eq!(id, "RSMjtc8");
//! assert_eq!(generator.parse_timestamp(&id).unwrap(), at);
//! ```

use std::cell::RefCell;

mod clock;
pub mod encode;
mod error;
mod generator;
mod random;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Error, Result};
pub use generator::{Config, Generator, Parsed};
pub use random::SuffixSource;

// Each thread gets its own default generator, so no locking is needed and no
// two threads share random state.
thread_local! {
    static GENERATOR: RefCell<Generator> = RefCell::new(Generator::default());
}

/// Generate an id with the default [`Config`] using this thread's generator.
///
/// # Example
/// ```
/// let a = lexid::next_id();
/// let b = lexid::next_id();
/// assert_ne!(a, b);
/// ```
pub fn next_id() -> String {
    GENERATOR.with(|generator| generator.borrow_mut().next())
}

/// Generate `n` ids with this thread's default generator.
///
/// # Example
/// ```
/// let ids = lexid::batch(3);
/// assert_eq!(ids.len(), 3);
/// ```
pub fn batch(n: usize) -> Vec<String> {
    GENERATOR.with(|generator| generator.borrow_mut().batch(n))
}
