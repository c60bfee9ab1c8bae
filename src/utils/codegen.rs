use rand::Rng;

use crate::consts::invite_const::{CODE_ALPHABET, CODE_LEN};

/// Draw one candidate invite code from the restricted alphabet. Uniqueness
/// is the caller's problem (conditional write + retry).
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_use_only_the_restricted_alphabet() {
        for _ in 0..200 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LEN);
            assert!(
                code.bytes().all(|b| CODE_ALPHABET.contains(&b)),
                "unexpected glyph in {code}"
            );
            for ambiguous in ['0', 'O', '1', 'I'] {
                assert!(!code.contains(ambiguous));
            }
        }
    }
}
