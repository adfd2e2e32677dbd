//! Multi-label encoding of genres and keywords.
//!
//! Each namespace gets its own [`Vocabulary`], fit over every label list it
//! will encode (the catalog and the profile). Columns are ordered
//! lexicographically, so the same inputs always produce the same layout.
//! The per-namespace vectors are then concatenated, genres first.

use data_loader::{normalize_labels, CatalogItem};
use sources::InterestProfile;
use std::collections::{BTreeSet, HashMap};

const WORD_BITS: usize = 64;

/// Fixed-width boolean vector, packed into 64-bit words.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedVector {
    words: Vec<u64>,
    len: usize,
}

impl EncodedVector {
    /// All-false vector of `len` columns.
    pub fn zeros(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> bool {
        index < self.len && self.words[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    /// Set a column. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize) {
        if index < self.len {
            self.words[index / WORD_BITS] |= 1 << (index % WORD_BITS);
        }
    }

    /// Number of true columns.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Indices of the true columns, ascending.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(|&i| self.get(i))
    }

    /// Append `other`'s columns after this vector's columns.
    pub fn concat(&self, other: &EncodedVector) -> EncodedVector {
        let mut out = EncodedVector::zeros(self.len + other.len);
        for i in self.ones() {
            out.set(i);
        }
        for i in other.ones() {
            out.set(self.len + i);
        }
        out
    }

    pub(crate) fn words(&self) -> &[u64] {
        &self.words
    }
}

/// Column layout for one label namespace.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Fit over the distinct normalized labels of all lists.
    pub fn fit<S: AsRef<str>>(lists: &[&[S]]) -> Self {
        let distinct: BTreeSet<String> = lists
            .iter()
            .flat_map(|labels| normalize_labels(*labels))
            .collect();

        let labels: Vec<String> = distinct.into_iter().collect();
        let index = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();

        Self { labels, index }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in column order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn column(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Encode a label list. Labels outside the vocabulary are ignored.
    pub fn encode<S: AsRef<str>>(&self, labels: &[S]) -> EncodedVector {
        let mut vector = EncodedVector::zeros(self.len());
        for label in normalize_labels(labels) {
            if let Some(column) = self.column(&label) {
                vector.set(column);
            }
        }
        vector
    }

    /// Labels whose columns are set, in column order.
    pub fn decode(&self, vector: &EncodedVector) -> Vec<&str> {
        vector
            .ones()
            .filter_map(|i| self.labels.get(i).map(String::as_str))
            .collect()
    }
}

/// The profile and every catalog item encoded against shared vocabularies.
#[derive(Debug, Clone)]
pub struct EncodedCatalog {
    pub genres: Vocabulary,
    pub keywords: Vocabulary,
    pub profile: EncodedVector,
    /// One vector per catalog item, in catalog order
    pub items: Vec<EncodedVector>,
}

impl EncodedCatalog {
    /// Width of every combined vector.
    pub fn width(&self) -> usize {
        self.genres.len() + self.keywords.len()
    }
}

/// Encodes a profile and a catalog into one comparable vector space.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEncoder;

impl FeatureEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Fit both vocabularies and encode everything against them.
    ///
    /// Vocabularies are built fresh on every call and never shared.
    pub fn encode(&self, profile: &InterestProfile, catalog: &[CatalogItem]) -> EncodedCatalog {
        let genres = fit_namespace(&profile.genres, catalog.iter().map(|item| &item.genres));
        let keywords = fit_namespace(&profile.keywords, catalog.iter().map(|item| &item.keywords));

        let combined = |g: &[String], k: &[String]| genres.encode(g).concat(&keywords.encode(k));

        let profile_vector = combined(&profile.genres, &profile.keywords);
        let items = catalog
            .iter()
            .map(|item| combined(&item.genres, &item.keywords))
            .collect();

        EncodedCatalog {
            genres,
            keywords,
            profile: profile_vector,
            items,
        }
    }
}

fn fit_namespace<'a>(
    profile_labels: &'a [String],
    item_labels: impl Iterator<Item = &'a Vec<String>>,
) -> Vocabulary {
    let mut lists: Vec<&[String]> = vec![profile_labels];
    lists.extend(item_labels.map(Vec::as_slice));
    Vocabulary::fit(lists.as_slice())
}
