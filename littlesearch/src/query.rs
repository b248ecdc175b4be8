//! Two-keyword OR queries over the global index.

use crate::index::{KeywordIndex, Occurrence};

/// Upper bound on the number of documents a query returns.
pub const MAX_RESULTS: usize = 5;

/// Answers the query "first OR second": up to [`MAX_RESULTS`] document ids,
/// ranked by descending occurrence frequency across both keywords.
///
/// Keywords are looked up verbatim, so callers supply them already
/// normalized. A keyword absent from the index contributes an empty
/// sequence, and an empty result simply means no document matched.
pub fn top_search(index: &KeywordIndex, first: &str, second: &str) -> Vec<String> {
    let first_sequence = index.occurrences(first).unwrap_or(&[]);
    let second_sequence = index.occurrences(second).unwrap_or(&[]);
    merge_ranked(first_sequence, second_sequence, MAX_RESULTS)
}

/// Merge-walks two descending occurrence sequences, emitting document ids in
/// frequency rank. Equal frequencies emit from `first`, so the first
/// keyword's document wins a tie. A document seen before is skipped: one
/// matching both keywords appears once, at its higher rank.
fn merge_ranked(first: &[Occurrence], second: &[Occurrence], limit: usize) -> Vec<String> {
    let mut ranked: Vec<String> = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < first.len() && j < second.len() {
        if first[i].frequency >= second[j].frequency {
            push_unique(&mut ranked, &first[i].document);
            i += 1;
        } else {
            push_unique(&mut ranked, &second[j].document);
            j += 1;
        }
    }
    for occurrence in &first[i..] {
        push_unique(&mut ranked, &occurrence.document);
    }
    for occurrence in &second[j..] {
        push_unique(&mut ranked, &occurrence.document);
    }
    ranked.truncate(limit);
    ranked
}

fn push_unique(ranked: &mut Vec<String>, document: &str) {
    if !ranked.iter().any(|seen| seen == document) {
        ranked.push(document.to_string());
    }
}
