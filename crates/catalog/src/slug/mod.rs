//! Slug derivation for catalog entries
//!
//! [`normalize`] turns a product name into a URL token, [`SlugResolver`]
//! makes that token unique against the store.

pub mod normalize;
pub mod resolver;

pub use normalize::normalize;
pub use resolver::{Resolution, RetryPolicy, SlugIndex, SlugResolver};

/// Upper bound on slug length, in bytes (slugs are ASCII).
pub const MAX_SLUG_LEN: usize = 100;

/// Base token for `name`, or `placeholder` when the name normalizes to nothing.
///
/// The flag is `true` when the placeholder was used.
pub fn base_token(name: &str, placeholder: &str) -> (String, bool) {
    let token = normalize(name);
    if token.is_empty() {
        (placeholder.to_string(), true)
    } else {
        (token, false)
    }
}
