use ahash::AHashMap;
use std::error::Error;
use std::fmt::{self, Display};

/// Closed set of valid column types. Classification reports contain one row per label of the
/// vocabulary, in the order in which the labels were first given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    labels: Vec<String>,
    positions: AHashMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyVocabularyError;

impl Display for EmptyVocabularyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "The vocabulary of column types must contain at least one label")
    }
}
impl Error for EmptyVocabularyError {}

impl Vocabulary {
    /// Builds a vocabulary. Duplicated labels are only kept once.
    pub fn new<I, S>(labels: I) -> Result<Self, EmptyVocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocabulary = Vocabulary {
            labels: Vec::new(),
            positions: AHashMap::new(),
        };
        for label in labels {
            let label = label.into();
            if !vocabulary.positions.contains_key(&label) {
                vocabulary
                    .positions
                    .insert(label.clone(), vocabulary.labels.len());
                vocabulary.labels.push(label);
            }
        }
        if vocabulary.labels.is_empty() {
            return Err(EmptyVocabularyError);
        }
        Ok(vocabulary)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false, a vocabulary cannot be built empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.positions.contains_key(label)
    }

    pub(crate) fn position(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.labels.iter()
    }
}
