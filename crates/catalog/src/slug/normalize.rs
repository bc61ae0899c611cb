use unicode_normalization::UnicodeNormalization;

use super::MAX_SLUG_LEN;

/// Turn a display name into a canonical URL token.
///
/// Diacritics are folded to their base letter, anything that is not an ASCII
/// letter, digit, whitespace or hyphen is dropped, and separator runs become
/// a single hyphen. The result satisfies the slug format but may be empty and
/// is not guaranteed to be unique.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut pending_dash = false;

    for ch in lowered.nfd().filter(|c| !is_combining_mark(*c)) {
        let ch = if ch == 'ñ' { 'n' } else { ch };

        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else if ch == '-' || ch.is_whitespace() {
            pending_dash = true;
        }
    }

    truncate(slug, MAX_SLUG_LEN)
}

/// Cut an ASCII token to `max_len` without leaving a dangling hyphen.
pub(crate) fn truncate(mut slug: String, max_len: usize) -> String {
    if slug.len() > max_len {
        slug.truncate(max_len);
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

fn is_combining_mark(ch: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&ch)
}
