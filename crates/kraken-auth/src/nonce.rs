//! Strictly increasing nonces for private requests
//!
//! Kraken rejects a private request whose nonce is not greater than the
//! last one it saw for the same API key (`EAPI:Invalid nonce`). Nonces are
//! microseconds since the epoch, bumped past the previous value when the
//! clock stalls or steps backwards, so concurrent callers sharing a key
//! never collide.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Per-key nonce source
#[derive(Debug, Default)]
pub struct NonceGenerator {
    last: AtomicU64,
}

impl NonceGenerator {
    /// Create a generator that starts from the current clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Next nonce, strictly greater than every nonce returned before
    pub fn next(&self) -> u64 {
        let now = now_micros();
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }

    /// Last nonce handed out (0 before the first call)
    pub fn last(&self) -> u64 {
        self.last.load(Ordering::Acquire)
    }
}

fn now_micros() -> u64 {
    // A clock before the epoch reads as 0; monotonicity still holds
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_strictly_increasing() {
        let generator = NonceGenerator::new();
        let mut previous = 0;
        for _ in 0..10_000 {
            let nonce = generator.next();
            assert!(nonce > previous);
            previous = nonce;
        }
        assert_eq!(generator.last(), previous);
    }

    #[test]
    fn test_tracks_wall_clock() {
        let generator = NonceGenerator::new();
        // 2020-01-01 in microseconds
        assert!(generator.next() > 1_577_836_800_000_000);
    }

    #[test]
    fn test_unique_across_threads() {
        let generator = Arc::new(NonceGenerator::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let generator = Arc::clone(&generator);
                std::thread::spawn(move || (0..1000).map(|_| generator.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for nonce in handle.join().unwrap() {
                assert!(seen.insert(nonce), "duplicate nonce {}", nonce);
            }
        }
        assert_eq!(seen.len(), 4000);
    }
}
