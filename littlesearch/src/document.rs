use crate::index::Occurrence;
use crate::keyword::{normalize, Keyword};
use crate::noise::NoiseSet;
use std::collections::HashMap;

/// Scans one document's raw token stream into its keyword-frequency map.
///
/// Each accepted token either starts a new occurrence bound to `document`
/// with frequency 1 or bumps an existing count; rejected tokens are skipped
/// silently. The map is local to the call - nothing shared is touched, so
/// documents can be loaded independently and merged later.
pub fn load_document<I, S>(
    document: &str,
    tokens: I,
    noise: &NoiseSet,
) -> HashMap<Keyword, Occurrence>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut keywords: HashMap<Keyword, Occurrence> = HashMap::new();
    for token in tokens {
        let Some(keyword) = normalize(token.as_ref(), noise) else {
            continue;
        };
        keywords
            .entry(keyword)
            .and_modify(|occurrence| occurrence.frequency += 1)
            .or_insert_with(|| Occurrence::new(document, 1));
    }
    keywords
}
