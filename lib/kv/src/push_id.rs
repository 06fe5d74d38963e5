use std::sync::Mutex;

use rand::Rng;

/// 64-symbol alphabet whose byte order matches its index order, so that
/// generated ids sort lexicographically in generation order.
const ALPHABET: &[u8; 64] =
    b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

/// Number of random tail symbols appended after the timestamp prefix.
const RANDOM_LEN: usize = 12;

/// Number of leading symbols encoding the millisecond timestamp.
const TIMESTAMP_LEN: usize = 8;

struct GenState {
    last_ms: i64,
    last_rand: [u8; RANDOM_LEN],
}

/// Generator for store-assigned keys ("push ids").
///
/// Each id is 20 characters: 8 encoding the creation time in
/// milliseconds, followed by 12 random symbols. Ids generated within the
/// same millisecond reuse the previous random tail incremented by one,
/// so ids from one generator are unique and strictly increasing even
/// under rapid generation or a clock that steps backwards.
pub struct PushIdGen {
    state: Mutex<GenState>,
}

impl PushIdGen {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GenState {
                last_ms: 0,
                last_rand: [0; RANDOM_LEN],
            }),
        }
    }

    /// Generate the next id.
    pub fn next(&self) -> String {
        let now = chrono::Utc::now().timestamp_millis();
        let mut state = self.state.lock().unwrap();

        if now > state.last_ms {
            state.last_ms = now;
            let mut rng = rand::thread_rng();
            for slot in state.last_rand.iter_mut() {
                *slot = rng.gen_range(0..64);
            }
        } else {
            // Same millisecond (or clock skew): increment the previous
            // tail so ordering and uniqueness still hold.
            increment(&mut state.last_rand);
        }

        let mut id = String::with_capacity(TIMESTAMP_LEN + RANDOM_LEN);
        let mut ms = state.last_ms;
        let mut ts = [0u8; TIMESTAMP_LEN];
        for slot in ts.iter_mut().rev() {
            *slot = (ms % 64) as u8;
            ms /= 64;
        }
        for idx in ts {
            id.push(ALPHABET[idx as usize] as char);
        }
        for idx in state.last_rand {
            id.push(ALPHABET[idx as usize] as char);
        }
        id
    }
}

impl Default for PushIdGen {
    fn default() -> Self {
        Self::new()
    }
}

/// Increment a base-64 digit string with carry. Overflowing all twelve
/// digits would require 64^12 ids in one millisecond, so the silent wrap
/// is unreachable in practice.
fn increment(digits: &mut [u8; RANDOM_LEN]) {
    for slot in digits.iter_mut().rev() {
        if *slot < 63 {
            *slot += 1;
            return;
        }
        *slot = 0;
    }
}
