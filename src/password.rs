//! Password generation for protecting uploads.
//!
//! Passwords are drawn uniformly from [`PASSWORD_CHARS`] using `rand::rng()`,
//! the thread-local ChaCha generator reseeded from the operating system.
//! Every generated password carries at least [`MIN_ENTROPY_BITS`] bits.

use rand::Rng;

use crate::{Result, SdropError};

/// Characters a generated password may contain.
pub const PASSWORD_CHARS: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*-_";

/// Minimum entropy of a generated password, in bits.
pub const MIN_ENTROPY_BITS: f64 = 80.0;

/// Bits of entropy per generated character.
fn bits_per_char() -> f64 {
    (PASSWORD_CHARS.len() as f64).log2()
}

/// Estimated entropy of a generated password of `length` characters.
pub fn entropy_bits(length: usize) -> f64 {
    length as f64 * bits_per_char()
}

/// Shortest length that reaches [`MIN_ENTROPY_BITS`].
pub fn min_length() -> usize {
    (MIN_ENTROPY_BITS / bits_per_char()).ceil() as usize
}

/// Generate a random password of `length` characters.
///
/// Fails with a validation error when `length` is below [`min_length`].
pub fn generate_password(length: usize) -> Result<String> {
    if length < min_length() {
        return Err(SdropError::Validation(format!(
            "generated passwords need at least {} characters ({} bits)",
            min_length(),
            MIN_ENTROPY_BITS
        )));
    }

    let mut rng = rand::rng();
    Ok((0..length)
        .map(|_| {
            let idx = rng.random_range(0..PASSWORD_CHARS.len());
            PASSWORD_CHARS[idx] as char
        })
        .collect())
}
