use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    static ref STANDARD_NOISE: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","cannot","could",
            "did","do","does","doing","down","during",
            "each","few","for","from","further",
            "had","has","have","having","he","her","here","hers","herself","him","himself","his","how",
            "i","if","in","into","is","it","its","itself",
            "me","more","most","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","should","so","some","such",
            "than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up","very",
            "was","we","were","what","when","where","which","while","who","whom","why","with","would",
            "you","your","yours","yourself","yourselves",
        ];
        words.iter().copied().collect()
    };
}

/// Set of words excluded from indexing.
///
/// Entries are case-folded on insertion and nothing else: a noise word is
/// matched against already-normalized keywords, so punctuation in a supplied
/// word is kept verbatim (and such an entry will simply never match).
#[derive(Debug, Clone, Default)]
pub struct NoiseSet {
    words: HashSet<String>,
}

impl NoiseSet {
    /// Creates an empty noise set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set from any word supply, case-folding each entry.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for word in words {
            set.insert(word.as_ref());
        }
        set
    }

    /// The built-in English noise-word list, for callers without their own.
    pub fn standard() -> Self {
        Self::from_words(STANDARD_NOISE.iter())
    }

    pub fn insert(&mut self, word: &str) {
        self.words.insert(word.to_lowercase());
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.words.contains(keyword)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
