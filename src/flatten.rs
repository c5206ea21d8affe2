/**
Flattening of aligned tables into pools of (true, predicted) pairs. Every scored position goes
to the global pool. Positions whose true column exists (i.e. is not `MISSING`) also go to the
pools keyed by column index, data type, sparsity and table width.
*/
use crate::accuracy::{Accuracy, AccuracyReport};
use crate::align::{Aligned, SENTINEL};
use crate::instance::{DataType, Sparsity};
use crate::metrics::{classification_report, ComputationError, DivByZeroStrat};
use crate::reporter::Reporter;
use crate::search::InstanceAlignment;
use crate::vocabulary::Vocabulary;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Flat lists of true and predicted labels. Both lists always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pool<'a> {
    y_true: Vec<&'a str>,
    y_pred: Vec<&'a str>,
}

impl<'a> Pool<'a> {
    pub fn push(&mut self, true_label: &'a str, predicted: &'a str) {
        self.y_true.push(true_label);
        self.y_pred.push(predicted);
    }

    pub fn len(&self) -> usize {
        self.y_true.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y_true.is_empty()
    }

    pub fn y_true(&self) -> &[&'a str] {
        &self.y_true
    }

    pub fn y_pred(&self) -> &[&'a str] {
        &self.y_pred
    }

    /// Appends the pairs of `other` after the pairs of `self`.
    pub fn merge(mut self, other: Self) -> Self {
        self.y_true.extend(other.y_true);
        self.y_pred.extend(other.y_pred);
        self
    }

    pub fn report(
        &self,
        vocabulary: &Vocabulary,
        zero_division: DivByZeroStrat,
    ) -> Result<Reporter, ComputationError> {
        classification_report(&self.y_true, &self.y_pred, vocabulary, zero_division)
    }
}

/// Pools indexed by a bucket key. A pool only exists once a pair was pushed with its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buckets<'a, K: Ord> {
    pools: BTreeMap<K, Pool<'a>>,
}

impl<K: Ord> Default for Buckets<'_, K> {
    fn default() -> Self {
        Self {
            pools: BTreeMap::new(),
        }
    }
}

impl<'a, K: Ord> Buckets<'a, K> {
    pub fn push(&mut self, key: K, true_label: &'a str, predicted: &'a str) {
        self.pools.entry(key).or_default().push(true_label, predicted)
    }

    pub fn get(&self, key: &K) -> Option<&Pool<'a>> {
        self.pools.get(key)
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Pool<'a>)> {
        self.pools.iter()
    }

    /// Merges the pools sharing a key, the pairs of `self` coming first.
    pub fn merge(mut self, other: Self) -> Self {
        for (key, pool) in other.pools {
            let merged = match self.pools.remove(&key) {
                Some(own) => own.merge(pool),
                None => pool,
            };
            self.pools.insert(key, merged);
        }
        self
    }

    /// Computes the report of every pool independently.
    pub fn reports(
        &self,
        vocabulary: &Vocabulary,
        zero_division: DivByZeroStrat,
    ) -> Result<BTreeMap<K, Reporter>, ComputationError>
    where
        K: Clone,
    {
        self.pools
            .iter()
            .map(|(key, pool)| Ok((key.clone(), pool.report(vocabulary, zero_division)?)))
            .collect()
    }
}

/// Classification reports of one alignment family (padded or adjusted).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyReport {
    /// Report over every scored position, including the `MISSING` true columns.
    pub classification_report: Reporter,
    pub by_idx: BTreeMap<usize, Reporter>,
    pub by_data_type: BTreeMap<DataType, Reporter>,
    #[serde(serialize_with = "serialize_sparsity_keys")]
    pub by_sparsity: BTreeMap<Sparsity, Reporter>,
    pub by_num_columns: BTreeMap<usize, Reporter>,
    /// Sum of the accuracies of the aligned tables, unscored columns counting as correct.
    pub accuracy: AccuracyReport,
}

/// Float keys are written with their `Display` representation.
fn serialize_sparsity_keys<S: Serializer>(
    map: &BTreeMap<Sparsity, Reporter>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(map.iter().map(|(k, v)| (k.to_string(), v)))
}

/// Consumes the aligned tables of one family.
#[derive(Debug, Clone)]
pub(crate) struct FamilyAccumulator<'a> {
    vocabulary: &'a Vocabulary,
    global: Pool<'a>,
    by_idx: Buckets<'a, usize>,
    by_data_type: Buckets<'a, DataType>,
    by_sparsity: Buckets<'a, Sparsity>,
    by_num_columns: Buckets<'a, usize>,
    accuracy: Accuracy,
    /// Diagnostics are only collected for the padded family.
    track_diagnostics: bool,
    pub(crate) num_tables_with_column_at_idx: BTreeMap<usize, usize>,
    pub(crate) not_even_a_column_type: Vec<&'a str>,
}

impl<'a> FamilyAccumulator<'a> {
    pub(crate) fn new(vocabulary: &'a Vocabulary, track_diagnostics: bool) -> Self {
        Self {
            vocabulary,
            global: Pool::default(),
            by_idx: Buckets::default(),
            by_data_type: Buckets::default(),
            by_sparsity: Buckets::default(),
            by_num_columns: Buckets::default(),
            accuracy: Accuracy::empty(),
            track_diagnostics,
            num_tables_with_column_at_idx: BTreeMap::new(),
            not_even_a_column_type: Vec::new(),
        }
    }

    pub(crate) fn absorb(&mut self, alignment: &InstanceAlignment<'a>) {
        self.accuracy += alignment.accuracy;
        for (idx, (column, predicted)) in alignment
            .columns
            .iter()
            .zip(alignment.predicted.iter())
            .enumerate()
        {
            let predicted = predicted.as_label();
            let (true_label, column) = match column {
                Aligned::Missing => (SENTINEL, None),
                Aligned::Value(c) => match c.label {
                    Some(label) => (label, Some(c)),
                    None => continue,
                },
            };
            self.global.push(true_label, predicted);
            if self.track_diagnostics && !self.vocabulary.contains(predicted) {
                self.not_even_a_column_type.push(predicted);
            }
            if let Some(column) = column {
                if self.track_diagnostics {
                    *self.num_tables_with_column_at_idx.entry(idx).or_insert(0) += 1;
                }
                self.by_idx.push(idx, true_label, predicted);
                self.by_data_type
                    .push(column.data_type, true_label, predicted);
                self.by_sparsity.push(column.sparsity, true_label, predicted);
                self.by_num_columns.push(column.width, true_label, predicted);
            }
        }
    }

    pub(crate) fn report(
        &self,
        zero_division: DivByZeroStrat,
    ) -> Result<FamilyReport, ComputationError> {
        Ok(FamilyReport {
            classification_report: self.global.report(self.vocabulary, zero_division)?,
            by_idx: self.by_idx.reports(self.vocabulary, zero_division)?,
            by_data_type: self.by_data_type.reports(self.vocabulary, zero_division)?,
            by_sparsity: self.by_sparsity.reports(self.vocabulary, zero_division)?,
            by_num_columns: self.by_num_columns.reports(self.vocabulary, zero_division)?,
            accuracy: self.accuracy.report(),
        })
    }
}
