use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use uuid::Uuid;

/// Prefix used by [`unique_default`]
pub const DEFAULT_UNIQUE_PREFIX: &str = "unique";

/// Length of [`random_default`] tokens
pub const DEFAULT_RANDOM_LENGTH: usize = 10;

/// Alphanumerics plus printable punctuation
const WIDE_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!#$%&()*+,-./:;<=>?@[]^_{|}~";

const UNIQUE_MIN: u32 = 10_000_000;
const UNIQUE_RANGE: u64 = 90_000_000;

/// Coprime with `UNIQUE_RANGE`, so stepping by it visits every value once
const UNIQUE_STRIDE: u64 = 73_939_133;

static UNIQUE_SEQUENCE: AtomicU32 = AtomicU32::new(0);
static UNIQUE_OFFSET: OnceLock<u64> = OnceLock::new();

/// Eight scrambled digits, optionally behind `prefix-`.
///
/// The prefix is trimmed and loses trailing dashes, so `"t-"` yields
/// `t-12345678`. Every call in the process draws a fresh sequence number,
/// and the sequence is mapped through a permutation of the eight-digit
/// range, so no two calls repeat until the range is exhausted.
pub fn unique(prefix: Option<&str>) -> String {
    let offset = *UNIQUE_OFFSET.get_or_init(|| rand::thread_rng().gen_range(0..UNIQUE_RANGE));
    let sequence = u64::from(UNIQUE_SEQUENCE.fetch_add(1, Ordering::Relaxed));
    let number = u64::from(UNIQUE_MIN) + (offset + sequence * UNIQUE_STRIDE) % UNIQUE_RANGE;

    let prefix = prefix.map(|p| p.trim().trim_end_matches('-')).unwrap_or("");
    if prefix.is_empty() {
        number.to_string()
    } else {
        format!("{}-{}", prefix, number)
    }
}

/// [`unique`] with the `unique` prefix
pub fn unique_default() -> String {
    unique(Some(DEFAULT_UNIQUE_PREFIX))
}

/// `length` random ASCII characters
pub fn random(length: usize, alphanumeric_only: bool) -> String {
    let mut rng = rand::thread_rng();
    if alphanumeric_only {
        (0..length)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect()
    } else {
        (0..length)
            .map(|_| char::from(WIDE_ALPHABET[rng.gen_range(0..WIDE_ALPHABET.len())]))
            .collect()
    }
}

/// Ten characters from the wide alphabet
pub fn random_default() -> String {
    random(DEFAULT_RANDOM_LENGTH, false)
}

/// Random version-4 UUID in lowercase hyphenated form
pub fn uuid() -> String {
    Uuid::new_v4().hyphenated().to_string()
}
