use crate::keyword::Keyword;
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// One keyword's presence in one document: how many times the keyword occurs
/// there. The document id is an opaque stable string supplied by the caller
/// and returned verbatim from queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub document: String,
    pub frequency: u32,
}

impl Occurrence {
    pub fn new(document: impl Into<String>, frequency: u32) -> Self {
        Self {
            document: document.into(),
            frequency,
        }
    }
}

/// Snapshot shape: one record per keyword, occurrences in descending
/// frequency order.
pub type IndexRecords = Vec<(Keyword, Vec<Occurrence>)>;

/// The global index: every keyword mapped to its occurrence sequence, held
/// in non-increasing frequency order at every observable point.
///
/// Sequences are mutated only through [`KeywordIndex::merge_document`], and
/// the fields stay private so the ordering invariant cannot be broken from
/// outside. The index also registers every document id it has absorbed,
/// which lets it reject a re-indexed document loudly instead of silently
/// double-counting frequencies.
#[derive(Debug, Default)]
pub struct KeywordIndex {
    postings: HashMap<Keyword, Vec<Occurrence>>,
    documents: HashSet<String>,
}

impl KeywordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one document's keyword map into the index.
    ///
    /// A keyword new to the index starts a fresh single-occurrence sequence;
    /// an existing keyword gets the occurrence appended and then repositioned
    /// by a binary-search insertion, so only the appended element ever moves.
    /// Fails, leaving the index untouched, when `document` was already merged
    /// or an occurrence carries a zero frequency.
    pub fn merge_document(
        &mut self,
        document: &str,
        keywords: HashMap<Keyword, Occurrence>,
    ) -> Result<()> {
        ensure!(
            !self.documents.contains(document),
            "document '{document}' is already indexed"
        );
        for occurrence in keywords.values() {
            ensure!(
                occurrence.frequency >= 1,
                "zero-frequency occurrence for document '{}'",
                occurrence.document
            );
        }
        self.documents.insert(document.to_string());
        for (keyword, occurrence) in keywords {
            match self.postings.get_mut(&keyword) {
                Some(sequence) => {
                    sequence.push(occurrence);
                    insert_last_occurrence(sequence);
                }
                None => {
                    self.postings.insert(keyword, vec![occurrence]);
                }
            }
        }
        Ok(())
    }

    /// The occurrence sequence for `keyword`, highest frequency first.
    pub fn occurrences(&self, keyword: &str) -> Option<&[Occurrence]> {
        self.postings.get(keyword).map(Vec::as_slice)
    }

    pub fn contains_document(&self, document: &str) -> bool {
        self.documents.contains(document)
    }

    pub fn keyword_count(&self) -> usize {
        self.postings.len()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty() && self.documents.is_empty()
    }

    /// The registry of every document id merged so far.
    pub fn documents(&self) -> &HashSet<String> {
        &self.documents
    }

    /// Snapshot as `(keyword, occurrences)` records, sorted by keyword so
    /// equal indexes serialize byte-identically.
    pub fn to_records(&self) -> IndexRecords {
        let mut records: IndexRecords = self
            .postings
            .iter()
            .map(|(keyword, sequence)| (keyword.clone(), sequence.clone()))
            .collect();
        records.sort_by(|a, b| a.0.cmp(&b.0));
        records
    }

    /// Rebuilds an index from snapshot records plus the document registry,
    /// re-checking every invariant the in-memory index maintains. A record
    /// set that violates one is rejected whole.
    pub fn from_records(records: IndexRecords, documents: HashSet<String>) -> Result<Self> {
        let mut postings: HashMap<Keyword, Vec<Occurrence>> =
            HashMap::with_capacity(records.len());
        for (keyword, sequence) in records {
            ensure!(
                !sequence.is_empty(),
                "keyword '{keyword}' has an empty occurrence sequence"
            );
            ensure!(
                !postings.contains_key(&keyword),
                "duplicate record for keyword '{keyword}'"
            );
            for pair in sequence.windows(2) {
                ensure!(
                    pair[0].frequency >= pair[1].frequency,
                    "occurrence sequence for '{keyword}' is not in descending frequency order"
                );
            }
            for occurrence in &sequence {
                ensure!(
                    occurrence.frequency >= 1,
                    "zero-frequency occurrence for '{keyword}'"
                );
                ensure!(
                    documents.contains(&occurrence.document),
                    "occurrence of '{keyword}' references unregistered document '{}'",
                    occurrence.document
                );
            }
            postings.insert(keyword, sequence);
        }
        Ok(Self {
            postings,
            documents,
        })
    }
}

/// Restores descending frequency order after a sequence has had one new
/// occurrence appended at the end.
///
/// The prefix before the appended element is already sorted, so the element
/// is removed and binary-searched back in: an equal frequency at the probe
/// point inserts right there, a greater frequency continues in the earlier
/// half, a smaller one in the later half. When the search runs out, the
/// element lands just before or just after the last probe depending on which
/// side it belongs. Only the appended element ever moves, making this one
/// O(log n)-comparison insertion-sort step rather than a re-sort. Returns
/// the index the occurrence settles at. Sequences of length <= 1 are left
/// as they are.
fn insert_last_occurrence(sequence: &mut Vec<Occurrence>) -> usize {
    let Some(appended) = sequence.pop() else {
        return 0;
    };
    if sequence.is_empty() {
        sequence.push(appended);
        return 0;
    }
    let frequency = appended.frequency;
    let mut low = 0usize;
    let mut high = sequence.len() - 1;
    let mut mid = 0usize;
    while low <= high {
        mid = (low + high) / 2;
        match frequency.cmp(&sequence[mid].frequency) {
            Ordering::Equal => {
                sequence.insert(mid, appended);
                return mid;
            }
            Ordering::Greater => {
                // Ranks earlier than the probe point.
                if mid == 0 {
                    break;
                }
                high = mid - 1;
            }
            Ordering::Less => low = mid + 1,
        }
    }
    let at = if sequence[mid].frequency < frequency {
        mid
    } else {
        mid + 1
    };
    sequence.insert(at, appended);
    at
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occ(document: &str, frequency: u32) -> Occurrence {
        Occurrence::new(document, frequency)
    }

    fn sequence_of(frequencies: &[u32]) -> Vec<Occurrence> {
        frequencies
            .iter()
            .enumerate()
            .map(|(i, &f)| occ(&format!("doc{i}"), f))
            .collect()
    }

    fn frequencies(sequence: &[Occurrence]) -> Vec<u32> {
        sequence.iter().map(|o| o.frequency).collect()
    }

    fn assert_descending(sequence: &[Occurrence]) {
        for pair in sequence.windows(2) {
            assert!(
                pair[0].frequency >= pair[1].frequency,
                "sequence out of order: {:?}",
                frequencies(sequence)
            );
        }
    }

    #[test]
    fn insertion_above_the_maximum_goes_first() {
        let mut sequence = sequence_of(&[5, 3]);
        sequence.push(occ("new", 6));
        let at = insert_last_occurrence(&mut sequence);
        assert_eq!(at, 0);
        assert_eq!(frequencies(&sequence), vec![6, 5, 3]);
    }

    #[test]
    fn insertion_below_the_minimum_goes_last() {
        let mut sequence = sequence_of(&[5, 3]);
        sequence.push(occ("new", 1));
        let at = insert_last_occurrence(&mut sequence);
        assert_eq!(at, 2);
        assert_eq!(frequencies(&sequence), vec![5, 3, 1]);
    }

    #[test]
    fn insertion_lands_between_adjacent_frequencies() {
        let mut sequence = sequence_of(&[9, 7, 5]);
        sequence.push(occ("new", 6));
        let at = insert_last_occurrence(&mut sequence);
        assert_eq!(at, 2);
        assert_eq!(frequencies(&sequence), vec![9, 7, 6, 5]);
    }

    #[test]
    fn insertion_of_a_duplicate_frequency_stops_at_the_probe() {
        let mut sequence = sequence_of(&[9, 7, 5]);
        sequence.push(occ("new", 7));
        let at = insert_last_occurrence(&mut sequence);
        assert_eq!(at, 1);
        assert_eq!(frequencies(&sequence), vec![9, 7, 7, 5]);
    }

    #[test]
    fn short_sequences_need_no_search() {
        let mut empty: Vec<Occurrence> = Vec::new();
        assert_eq!(insert_last_occurrence(&mut empty), 0);
        assert!(empty.is_empty());

        let mut single = vec![occ("only", 4)];
        assert_eq!(insert_last_occurrence(&mut single), 0);
        assert_eq!(frequencies(&single), vec![4]);
    }

    #[test]
    fn insertion_keeps_order_for_every_frequency_value() {
        for f in 1..=10u32 {
            let mut sequence = sequence_of(&[9, 8, 6, 6, 4, 2]);
            let mut expected = frequencies(&sequence);
            sequence.push(occ("new", f));
            insert_last_occurrence(&mut sequence);

            assert_descending(&sequence);
            assert_eq!(sequence.len(), 7);
            expected.push(f);
            expected.sort_unstable_by(|a, b| b.cmp(a));
            assert_eq!(frequencies(&sequence), expected);
        }
    }

    #[test]
    fn order_survives_a_long_append_workload() {
        let mut sequence: Vec<Occurrence> = Vec::new();
        for i in 0..200u32 {
            let f = (i * 7) % 13 + 1;
            sequence.push(occ(&format!("doc{i}"), f));
            insert_last_occurrence(&mut sequence);
            assert_descending(&sequence);
        }
        assert_eq!(sequence.len(), 200);
    }

    #[test]
    fn merge_creates_a_singleton_for_a_new_keyword() {
        let mut index = KeywordIndex::new();
        let mut keywords = HashMap::new();
        keywords.insert("cats".to_string(), occ("d1", 2));
        index.merge_document("d1", keywords).unwrap();

        assert_eq!(index.occurrences("cats").unwrap(), &[occ("d1", 2)]);
        assert!(index.contains_document("d1"));
        assert_eq!(index.keyword_count(), 1);
        assert_eq!(index.document_count(), 1);
    }

    #[test]
    fn merge_repositions_occurrences_by_frequency() {
        let mut index = KeywordIndex::new();
        for (document, frequency) in [("d1", 1), ("d2", 4), ("d3", 2)] {
            let mut keywords = HashMap::new();
            keywords.insert("dog".to_string(), occ(document, frequency));
            index.merge_document(document, keywords).unwrap();
        }

        let sequence = index.occurrences("dog").unwrap();
        assert_eq!(frequencies(sequence), vec![4, 2, 1]);
        assert_eq!(sequence[0].document, "d2");
        assert_eq!(sequence[2].document, "d1");
    }

    #[test]
    fn merge_rejects_a_reindexed_document() {
        let mut index = KeywordIndex::new();
        let mut keywords = HashMap::new();
        keywords.insert("cats".to_string(), occ("d1", 2));
        index.merge_document("d1", keywords).unwrap();

        let mut again = HashMap::new();
        again.insert("dog".to_string(), occ("d1", 1));
        let err = index.merge_document("d1", again).unwrap_err();
        assert!(err.to_string().contains("already indexed"));
        // The failed merge must not have touched the index.
        assert!(index.occurrences("dog").is_none());
    }

    #[test]
    fn merge_rejects_zero_frequencies() {
        let mut index = KeywordIndex::new();
        let mut keywords = HashMap::new();
        keywords.insert("cats".to_string(), occ("d1", 0));
        let err = index.merge_document("d1", keywords).unwrap_err();
        assert!(err.to_string().contains("zero-frequency"));
        assert!(index.is_empty());
    }

    #[test]
    fn merge_registers_a_document_with_no_keywords() {
        let mut index = KeywordIndex::new();
        index.merge_document("empty", HashMap::new()).unwrap();
        assert!(index.contains_document("empty"));
        assert_eq!(index.keyword_count(), 0);
        assert!(index.merge_document("empty", HashMap::new()).is_err());
    }

    #[test]
    fn records_round_trip_and_stay_sorted_by_keyword() {
        let mut index = KeywordIndex::new();
        for (document, pairs) in [
            ("d1", vec![("cats", 2), ("dog", 1)]),
            ("d2", vec![("dog", 2)]),
        ] {
            let mut keywords = HashMap::new();
            for (k, f) in pairs {
                keywords.insert(k.to_string(), occ(document, f));
            }
            index.merge_document(document, keywords).unwrap();
        }

        let records = index.to_records();
        let names: Vec<&str> = records.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["cats", "dog"]);

        let rebuilt =
            KeywordIndex::from_records(records, index.documents().clone()).unwrap();
        assert_eq!(rebuilt.occurrences("cats"), index.occurrences("cats"));
        assert_eq!(rebuilt.occurrences("dog"), index.occurrences("dog"));
        assert_eq!(rebuilt.document_count(), 2);
    }

    #[test]
    fn from_records_rejects_broken_snapshots() {
        let documents: HashSet<String> = ["d1".to_string(), "d2".to_string()].into();

        let unsorted = vec![("dog".to_string(), vec![occ("d1", 1), occ("d2", 2)])];
        assert!(KeywordIndex::from_records(unsorted, documents.clone()).is_err());

        let zero = vec![("dog".to_string(), vec![occ("d1", 0)])];
        assert!(KeywordIndex::from_records(zero, documents.clone()).is_err());

        let duplicated = vec![
            ("dog".to_string(), vec![occ("d1", 1)]),
            ("dog".to_string(), vec![occ("d2", 1)]),
        ];
        assert!(KeywordIndex::from_records(duplicated, documents.clone()).is_err());

        let unregistered = vec![("dog".to_string(), vec![occ("ghost", 1)])];
        assert!(KeywordIndex::from_records(unregistered, documents.clone()).is_err());

        let empty_sequence = vec![("dog".to_string(), Vec::new())];
        assert!(KeywordIndex::from_records(empty_sequence, documents).is_err());
    }
}
