//! Session code generation.
//!
//! Codes are 6-character uppercase alphanumeric strings that players type in
//! to join a session. Uniqueness is enforced by the store; callers retry
//! with a fresh code on collision.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::OsRng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CODE_LEN: usize = 6;

/// Generate a session join code.
///
/// Draws 6 characters from `[A-Z0-9]` using the OS's cryptographically
/// secure RNG.
pub fn generate_session_code() -> String {
    let mut rng = OsRng;
    let dist = Uniform::from(0..ALPHABET.len());

    let mut s = String::with_capacity(CODE_LEN);
    for _ in 0..CODE_LEN {
        s.push(ALPHABET[dist.sample(&mut rng)] as char);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_session_code_has_correct_shape() {
        let code = generate_session_code();
        assert_eq!(code.len(), 6);
        assert!(code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_session_code_produces_different_results() {
        // 36^6 codes; two consecutive draws colliding means a broken RNG
        let code1 = generate_session_code();
        let code2 = generate_session_code();
        assert_ne!(code1, code2);
    }
}
