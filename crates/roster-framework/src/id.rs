//! Record ID generation.
//!
//! IDs are a radix-36 millisecond timestamp followed by random radix-36 digits. They are
//! unique with overwhelming probability, not by construction; the store actor still checks
//! a fresh ID against its collection before using it.

use chrono::Utc;
use rand::Rng;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_DIGITS: usize = 9;

/// Generates a new time-prefixed random ID, e.g. `"lzx4k2a1q8m3c9d0r"`.
pub fn generate() -> String {
    let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
    let mut id = to_radix36(millis);

    let mut rng = rand::thread_rng();
    id.extend((0..RANDOM_DIGITS).map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char));
    id
}

fn to_radix36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ALPHABET[(value % 36) as usize]);
        value /= 36;
    }
    digits.iter().rev().map(|&b| b as char).collect()
}
