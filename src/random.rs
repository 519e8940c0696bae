//! Random base62 suffixes.
//!
//! Each 64-bit draw from the generator is cut into ten 6-bit windows. A window
//! indexes the alphabet directly; the two values past the end (62 and 63) are
//! dropped and the next window is tried for the same slot, which keeps every
//! symbol equally likely while spending as few draws as possible.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::encode::ALPHABET;

const WINDOW_BITS: u32 = 6;
const WINDOW_MASK: u64 = (1 << WINDOW_BITS) - 1;
const WINDOWS_PER_DRAW: u32 = u64::BITS / WINDOW_BITS;

/// Sources created so far in this process, mixed into clock seeds.
static INSTANCES: AtomicU64 = AtomicU64::new(0);

/// Owned source of random suffix characters.
///
/// Not cryptographically secure. Fine for uniqueness, never for tokens.
#[derive(Debug, Clone)]
pub struct SuffixSource {
    rng: SmallRng,
}

impl SuffixSource {
    /// Seed from the wall clock in nanoseconds.
    ///
    /// The calling thread and a process-wide counter are hashed into the seed,
    /// so generators created in the same clock tick still diverge.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        let mut hasher = DefaultHasher::new();
        std::thread::current().id().hash(&mut hasher);
        INSTANCES.fetch_add(1, Ordering::Relaxed).hash(&mut hasher);
        Self::from_seed(nanos ^ hasher.finish())
    }

    /// Seed explicitly; the same seed always yields the same suffixes.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Fill `buf` with alphabet characters, last byte first.
    pub fn fill(&mut self, buf: &mut [u8]) {
        fill_with(&mut self.rng, buf);
    }

    /// Append `len` random characters to `out`.
    pub fn push_suffix(&mut self, len: usize, out: &mut String) {
        let mut buf = vec![0u8; len];
        self.fill(&mut buf);
        out.extend(buf.iter().map(|&b| b as char));
    }
}

fn fill_with<R: RngCore + ?Sized>(rng: &mut R, buf: &mut [u8]) {
    let mut i = buf.len();
    let mut cache = 0u64;
    let mut remain = 0u32;

    while i > 0 {
        if remain == 0 {
            cache = rng.next_u64();
            remain = WINDOWS_PER_DRAW;
        }
        let idx = (cache & WINDOW_MASK) as usize;
        if idx < ALPHABET.len() {
            i -= 1;
            buf[i] = ALPHABET[idx];
        }
        cache >>= WINDOW_BITS;
        remain -= 1;
    }
}
