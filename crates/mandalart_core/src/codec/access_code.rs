//! Access code generation and format checks.
//!
//! # Invariants
//! - Generated codes are exactly 12 ASCII digits, zero-padded.
//! - Every value in `0..10^12` is equally likely.
//! - Uniqueness against earlier codes is not checked here.

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

/// Number of digits in an access code.
pub const ACCESS_CODE_LEN: usize = 12;
/// Prefix prepended to a code to form its store key.
pub const STORE_KEY_PREFIX: &str = "mandalart_";

const CODE_SPACE: u64 = 1_000_000_000_000;

static ACCESS_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{12}$").expect("valid access code regex"));

/// Generates a fresh access code from the thread-local RNG.
pub fn generate_code() -> String {
    generate_code_with(&mut rand::thread_rng())
}

/// Generates an access code from a caller-provided RNG.
pub fn generate_code_with<R: Rng>(rng: &mut R) -> String {
    let value = rng.gen_range(0..CODE_SPACE);
    format!("{value:0width$}", width = ACCESS_CODE_LEN)
}

/// Returns true iff `input` is exactly 12 ASCII decimal digits.
pub fn validate_code_format(input: &str) -> bool {
    ACCESS_CODE_RE.is_match(input)
}

/// Store key for a code.
pub fn store_key(code: &str) -> String {
    format!("{STORE_KEY_PREFIX}{code}")
}

/// Short log-safe form of a code, keeping only the last four digits.
pub(crate) fn masked(code: &str) -> String {
    let tail: String = code
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("***{tail}")
}
