//! Nonce generation for Zaif trade API authentication.
//!
//! Zaif requires every signed request to carry a `nonce` larger than the one
//! used by the previous request for the same key. The nonce is a decimal
//! number: unix seconds, a dot, and six digits of microseconds
//! (e.g. `1700000000.123456`).

use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use rust_decimal::Decimal;
use time::OffsetDateTime;

const MICROS_PER_SECOND: u64 = 1_000_000;
const NONCE_SCALE: u32 = 6;

/// A request nonce with microsecond precision.
///
/// The textual form always has exactly six fractional digits, so for
/// timestamps of equal integer width lexical and numeric order agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nonce(Decimal);

impl Nonce {
    /// Build a nonce from microseconds since the unix epoch.
    pub fn from_micros(micros: u64) -> Self {
        // Zaif nonces stay far below i64::MAX microseconds.
        let micros = i64::try_from(micros).unwrap_or(i64::MAX);
        Self(Decimal::new(micros, NONCE_SCALE))
    }

    /// The nonce as a decimal number of seconds.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for Nonce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Nonce {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s).map(Self)
    }
}

/// Trait for providing nonces for signed requests.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    fn next_nonce(&self) -> Nonce;
}

/// Current wall-clock time in microseconds since the unix epoch.
fn current_time_micros() -> u64 {
    let now = OffsetDateTime::now_utc();
    let seconds = u64::try_from(now.unix_timestamp()).unwrap_or_default();
    seconds * MICROS_PER_SECOND + u64::from(now.microsecond())
}

/// A nonce provider that reports the wall clock as-is.
///
/// Two calls within the same clock tick return the same nonce and the
/// second request is then rejected by Zaif with a nonce error.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimestampNonce;

impl TimestampNonce {
    /// Create a new wall-clock nonce provider.
    pub fn new() -> Self {
        Self
    }
}

impl NonceProvider for TimestampNonce {
    fn next_nonce(&self) -> Nonce {
        Nonce::from_micros(current_time_micros())
    }
}

/// A nonce provider that generates strictly increasing nonces based on time.
///
/// Uses microseconds since the unix epoch, with an atomic counter to ensure
/// uniqueness even for requests made in the same microsecond.
pub struct IncreasingNonce {
    last_micros: AtomicU64,
}

impl IncreasingNonce {
    /// Create a new increasing nonce provider.
    pub fn new() -> Self {
        Self {
            last_micros: AtomicU64::new(0),
        }
    }
}

impl Default for IncreasingNonce {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceProvider for IncreasingNonce {
    fn next_nonce(&self) -> Nonce {
        let time_micros = current_time_micros();

        loop {
            let last = self.last_micros.load(Ordering::SeqCst);
            let next = time_micros.max(last + 1);

            if self
                .last_micros
                .compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return Nonce::from_micros(next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_nonce_format_has_six_fraction_digits() {
        let nonce = Nonce::from_micros(1_700_000_000_000_042);
        assert_eq!(nonce.to_string(), "1700000000.000042");

        let whole = Nonce::from_micros(1_700_000_000_000_000);
        assert_eq!(whole.to_string(), "1700000000.000000");
    }

    #[test]
    fn test_nonce_round_trip() {
        let nonce = IncreasingNonce::new().next_nonce();
        let parsed: Nonce = nonce.to_string().parse().unwrap();
        assert_eq!(parsed, nonce);
        assert_eq!(parsed.as_decimal(), nonce.as_decimal());
    }

    #[test]
    fn test_lexical_and_numeric_order_agree() {
        let a = Nonce::from_micros(1_700_000_000_999_999);
        let b = Nonce::from_micros(1_700_000_001_000_000);
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }

    #[test]
    fn test_timestamp_nonce_non_decreasing() {
        let provider = TimestampNonce::new();
        let mut last = provider.next_nonce();
        for _ in 0..1000 {
            let nonce = provider.next_nonce();
            assert!(nonce >= last, "Nonce must not go backward");
            last = nonce;
        }
    }

    #[test]
    fn test_nonce_strictly_increasing() {
        let provider = IncreasingNonce::new();

        let mut last = Nonce::from_micros(0);
        for _ in 0..1000 {
            let nonce = provider.next_nonce();
            assert!(nonce > last, "Nonce must be strictly increasing");
            last = nonce;
        }
    }

    #[test]
    fn test_nonce_unique_across_threads() {
        let provider = std::sync::Arc::new(IncreasingNonce::new());
        let mut handles = vec![];

        for _ in 0..4 {
            let p = provider.clone();
            handles.push(thread::spawn(move || {
                let mut nonces = Vec::new();
                for _ in 0..1000 {
                    nonces.push(p.next_nonce());
                }
                nonces
            }));
        }

        let mut all_nonces = HashSet::new();
        for handle in handles {
            let nonces = handle.join().unwrap();
            for nonce in nonces {
                assert!(
                    all_nonces.insert(nonce),
                    "Nonce must be unique across threads"
                );
            }
        }
    }
}
