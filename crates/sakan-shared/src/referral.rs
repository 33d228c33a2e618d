//! Referral codes.
//!
//! A code is the sanitized uppercase prefix of the owner's name followed by a
//! random alphanumeric suffix, e.g. `LAYL-7K2Q`.  Codes are compared
//! case-insensitively.  Collisions are not checked; the suffix keeps them
//! unlikely.

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::constants::{REFERRAL_PREFIX_LEN, REFERRAL_SUFFIX_LEN};

/// Generate a referral code for the given display name.
pub fn generate_code(name: &str) -> String {
    generate_code_with(name, &mut rand::thread_rng())
}

/// Generate a referral code using the supplied RNG (deterministic in tests).
pub fn generate_code_with<R: Rng>(name: &str, rng: &mut R) -> String {
    let mut prefix: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(REFERRAL_PREFIX_LEN)
        .collect::<String>()
        .to_ascii_uppercase();
    if prefix.is_empty() {
        prefix.push_str("USER");
    }

    let suffix: String = rng
        .sample_iter(&Alphanumeric)
        .take(REFERRAL_SUFFIX_LEN)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect();

    format!("{prefix}-{suffix}")
}

/// Case-insensitive code comparison, ignoring surrounding whitespace.
pub fn codes_match(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
