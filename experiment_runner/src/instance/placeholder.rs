//!
//! The seed placeholder substitution.
//!

/// The literal replaced by the iteration seed in flags and environment values.
pub const SEED_PLACEHOLDER: &str = "RNGSEED";

///
/// Replaces every placeholder occurrence in `value` with `seed`.
///
pub fn substitute(value: &str, seed: &str) -> String {
    value.replace(SEED_PLACEHOLDER, seed)
}

///
/// Replaces the placeholder in every element of `values` in place.
///
pub fn substitute_all(values: &mut [String], seed: &str) {
    for value in values.iter_mut() {
        if value.contains(SEED_PLACEHOLDER) {
            *value = substitute(value, seed);
        }
    }
}
