//! Base36 identifier helpers.

use crate::random::RandomSource;

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of alert and notification identifiers.
pub const SHORT_ID_LEN: usize = 9;

/// Lowercase base36 rendering of `value`.
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_ALPHABET[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}

/// `len` random lowercase base36 characters.
pub fn random_base36(rng: &dyn RandomSource, len: usize) -> String {
    (0..len)
        .map(|_| char::from(BASE36_ALPHABET[rng.below(36) as usize]))
        .collect()
}

/// Fresh identifier for alerts and notifications.
pub fn short_id(rng: &dyn RandomSource) -> String {
    random_base36(rng, SHORT_ID_LEN)
}
