//! One-time passcode generation.

use rand::Rng;

use crate::domain::OTP_LENGTH;

const DIGITS: &[u8] = b"0123456789";

/// Generate a numeric one-time passcode of [`OTP_LENGTH`] digits.
///
/// Digits are drawn uniformly from the thread-local CSPRNG.
pub fn one_time_passcode() -> String {
    let mut rng = rand::thread_rng();
    (0..OTP_LENGTH)
        .map(|_| DIGITS[rng.gen_range(0..DIGITS.len())] as char)
        .collect()
}
