use crate::noise::NoiseSet;
use lazy_static::lazy_static;
use regex::Regex;

/// A normalized, indexable term: lower case, alphabetic characters only.
pub type Keyword = String;

/// Characters stripped from the end of a raw token. A trailing character
/// outside this set disqualifies the token outright.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', '?', ':', ';', '!'];

lazy_static! {
    static ref ALPHABETIC: Regex = Regex::new(r"^\p{Alphabetic}+$").expect("valid regex");
}

/// Normalizes a raw token into an indexable keyword.
///
/// Trailing punctuation (`. , ? : ; !`) is stripped first, then the remaining
/// prefix is case-folded. Stripping happens before validation, so trailing
/// punctuation alone never disqualifies a token while embedded punctuation
/// always does. Returns `None` for tokens that are punctuation all the way
/// down, contain a non-alphabetic character after stripping, or normalize to
/// a noise word. Rejection is common and silent.
pub fn normalize(raw: &str, noise: &NoiseSet) -> Option<Keyword> {
    let trimmed = raw.trim_end_matches(TRAILING_PUNCTUATION);
    if trimmed.is_empty() {
        return None;
    }
    let keyword = trimmed.to_lowercase();
    if !ALPHABETIC.is_match(&keyword) {
        return None;
    }
    if noise.contains(&keyword) {
        return None;
    }
    Some(keyword)
}
