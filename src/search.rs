/**
Alignment of one table's predicted column types with its true columns. Plain padding appends
`MISSING` at the end of the shorter sequence. The missing column search instead tries every set
of positions where the predictor might have skipped (or invented) columns and keeps the one
giving the best accuracy.
*/
use crate::accuracy::Accuracy;
use crate::align::{insert_and_pad, pad, Aligned, AlignmentError, SENTINEL};
use crate::instance::Column;
use itertools::Itertools;
use log::warn;

/// One table after alignment. The true columns and the predictions have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceAlignment<'a> {
    pub(crate) columns: Vec<Aligned<Column<'a>>>,
    pub(crate) predicted: Vec<Aligned<&'a str>>,
    pub(crate) accuracy: Accuracy,
    pub(crate) inserted: Vec<usize>,
    pub(crate) clamped: bool,
}

/// True label at an aligned position. Sentinel positions carry the `MISSING` label, unscored
/// columns carry no label.
pub(crate) fn true_label<'a>(column: &Aligned<Column<'a>>) -> Option<&'a str> {
    match column {
        Aligned::Value(c) => c.label,
        Aligned::Missing => Some(SENTINEL),
    }
}

/// A position is correct when its true label is unscored or equals the prediction.
fn score(columns: &[Aligned<Column<'_>>], predicted: &[Aligned<&str>]) -> Accuracy {
    let mut accuracy = Accuracy::empty();
    for (column, pred) in columns.iter().zip(predicted) {
        accuracy.record(match true_label(column) {
            None => true,
            Some(label) => label == pred.as_label(),
        });
    }
    accuracy
}

impl<'a> InstanceAlignment<'a> {
    fn from_sides(
        columns: Vec<Vec<Aligned<Column<'a>>>>,
        predicted: Vec<Vec<Aligned<&'a str>>>,
        inserted: Vec<usize>,
    ) -> Self {
        let columns = columns.into_iter().next().unwrap_or_default();
        let predicted = predicted.into_iter().next().unwrap_or_default();
        let accuracy = score(&columns, &predicted);
        Self {
            columns,
            predicted,
            accuracy,
            inserted,
            clamped: false,
        }
    }

    /// Aligns the table by appending `MISSING` to the shorter sequence.
    pub fn padded(columns: &[Column<'a>], predicted: &[&'a str]) -> Result<Self, AlignmentError> {
        let (columns, predicted) = pad(&[columns], &[predicted])?;
        Ok(Self::from_sides(columns, predicted, Vec::new()))
    }

    fn with_insertions(
        columns: &[Column<'a>],
        predicted: &[&'a str],
        indexes: Vec<usize>,
    ) -> Result<Self, AlignmentError> {
        let (columns, predicted) = insert_and_pad(&[columns], &[predicted], &indexes)?;
        Ok(Self::from_sides(columns, predicted, indexes))
    }

    pub fn columns(&self) -> &[Aligned<Column<'a>>] {
        &self.columns
    }

    pub fn predicted(&self) -> &[Aligned<&'a str>] {
        &self.predicted
    }

    /// Labels of the aligned true columns, `None` for unscored columns.
    pub fn true_labels(&self) -> impl Iterator<Item = Option<&'a str>> + '_ {
        self.columns.iter().map(true_label)
    }

    /// Accuracy of the alignment, unscored columns counting as correct.
    pub fn accuracy(&self) -> Accuracy {
        self.accuracy
    }

    /// Positions where `MISSING` was inserted by the search. Empty for a padded alignment.
    pub fn inserted(&self) -> &[usize] {
        &self.inserted
    }

    /// Was the number of inserted columns capped by the maximum adjustment?
    pub fn is_clamped(&self) -> bool {
        self.clamped
    }
}

/// Brute force search of the best positions for the missing columns of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingColumnSearch {
    max_adjustment: usize,
}

impl MissingColumnSearch {
    /// * `max_adjustment`: Largest number of `MISSING` columns inserted in one table.
    pub fn new(max_adjustment: usize) -> Self {
        Self { max_adjustment }
    }

    pub fn max_adjustment(&self) -> usize {
        self.max_adjustment
    }

    /// Aligns the table, inserting `MISSING` into the shorter sequence where it maximizes the
    /// accuracy. Every combination of positions is tried in lexicographic order and the first
    /// best one is kept. When the tables differ by more than `max_adjustment` columns, only
    /// `max_adjustment` columns are inserted and the rest is padded.
    ///
    /// * `columns`: True columns of the table.
    /// * `predicted`: Predicted column types of the table.
    pub fn align<'a>(
        &self,
        columns: &[Column<'a>],
        predicted: &[&'a str],
    ) -> Result<InstanceAlignment<'a>, AlignmentError> {
        let diff = columns.len().abs_diff(predicted.len());
        let clamped = diff > self.max_adjustment;
        let insertions = if clamped {
            warn!(
                "The difference in the number of columns ({}) is greater than the configured maximum adjustment ({})",
                diff, self.max_adjustment
            );
            self.max_adjustment
        } else {
            diff
        };
        if insertions == 0 {
            let mut alignment = InstanceAlignment::padded(columns, predicted)?;
            alignment.clamped = clamped;
            return Ok(alignment);
        }

        let mut best: Option<InstanceAlignment<'a>> = None;
        for indexes in (0..columns.len().max(predicted.len())).combinations(insertions) {
            let candidate = InstanceAlignment::with_insertions(columns, predicted, indexes)?;
            let is_better = best
                .as_ref()
                .map_or(true, |b| candidate.accuracy.is_better_than(&b.accuracy));
            if is_better {
                best = Some(candidate);
            }
        }
        let mut alignment = match best {
            Some(alignment) => alignment,
            None => InstanceAlignment::padded(columns, predicted)?,
        };
        alignment.clamped = clamped;
        Ok(alignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::tests::aligned;
    use crate::instance::{DataType, Sparsity};
    use quickcheck::{QuickCheck, TestResult};
    use rstest::rstest;

    fn columns<'a>(labels: &[Option<&'a str>]) -> Vec<Column<'a>> {
        labels
            .iter()
            .map(|label| Column {
                label: *label,
                data_type: DataType::NonNumerical,
                sparsity: Sparsity::new(0.0),
                width: labels.len(),
            })
            .collect()
    }

    fn scored<'a>(labels: &[&'a str]) -> Vec<Column<'a>> {
        columns(&labels.iter().copied().map(Some).collect::<Vec<_>>())
    }

    #[test]
    fn test_missing_middle_column() {
        let true_columns = scored(&["a", "b", "c"]);
        let search = MissingColumnSearch::new(3);
        let adjusted = search.align(&true_columns, &["a", "c"]).unwrap();
        assert_eq!(adjusted.predicted(), aligned(&["a", "MISSING", "c"]).as_slice());
        assert_eq!(adjusted.inserted(), &[1]);
        assert_eq!(adjusted.accuracy(), Accuracy::new(2, 1));

        let padded = InstanceAlignment::padded(&true_columns, &["a", "c"]).unwrap();
        assert_eq!(padded.predicted(), aligned(&["a", "c", "MISSING"]).as_slice());
        assert_eq!(padded.accuracy(), Accuracy::new(1, 2));
    }

    #[test]
    fn test_ties_keep_first_combination() {
        let true_columns = scored(&["a", "b", "c"]);
        let adjusted = MissingColumnSearch::new(3)
            .align(&true_columns, &["x", "y"])
            .unwrap();
        assert_eq!(adjusted.inserted(), &[0]);
        assert_eq!(adjusted.predicted(), aligned(&["MISSING", "x", "y"]).as_slice());
    }

    #[test]
    fn test_repeated_labels() {
        let true_columns = scored(&["a", "a"]);
        let adjusted = MissingColumnSearch::new(1)
            .align(&true_columns, &["a"])
            .unwrap();
        assert_eq!(adjusted.predicted(), aligned(&["MISSING", "a"]).as_slice());
        assert_eq!(adjusted.accuracy(), Accuracy::new(1, 1));
    }

    #[test]
    fn test_extra_predicted_column() {
        let true_columns = scored(&["a", "c"]);
        let adjusted = MissingColumnSearch::new(3)
            .align(&true_columns, &["a", "b", "c"])
            .unwrap();
        let labels: Vec<_> = adjusted.true_labels().collect();
        assert_eq!(labels, vec![Some("a"), Some("MISSING"), Some("c")]);
        assert_eq!(adjusted.predicted(), aligned(&["a", "b", "c"]).as_slice());
        assert_eq!(adjusted.accuracy(), Accuracy::new(2, 1));
    }

    #[test]
    fn test_unscored_columns_are_correct() {
        let true_columns = columns(&[None, Some("b"), None]);
        let adjusted = MissingColumnSearch::new(3)
            .align(&true_columns, &["b"])
            .unwrap();
        assert_eq!(adjusted.predicted(), aligned(&["MISSING", "b", "MISSING"]).as_slice());
        assert_eq!(adjusted.accuracy(), Accuracy::new(3, 0));
    }

    #[rstest]
    #[case(&["a", "b"], &["a", "b"])]
    #[case(&["a", "b"], &["b", "a"])]
    #[case(&[], &[])]
    fn test_equal_lengths_are_padded(#[case] truth: &[&str], #[case] predicted: &[&str]) {
        let true_columns = scored(truth);
        let adjusted = MissingColumnSearch::new(3)
            .align(&true_columns, predicted)
            .unwrap();
        let padded = InstanceAlignment::padded(&true_columns, predicted).unwrap();
        assert_eq!(adjusted, padded);
    }

    #[test]
    fn test_clamped_search() {
        let true_columns = scored(&["a", "b", "c", "d"]);
        let adjusted = MissingColumnSearch::new(1)
            .align(&true_columns, &["b"])
            .unwrap();
        assert!(adjusted.is_clamped());
        assert_eq!(adjusted.inserted(), &[0]);
        assert_eq!(
            adjusted.predicted(),
            aligned(&["MISSING", "b", "MISSING", "MISSING"]).as_slice()
        );
        assert_eq!(adjusted.accuracy(), Accuracy::new(1, 3));
    }

    #[test]
    fn test_clamped_to_zero_pads() {
        let true_columns = scored(&["a", "b", "c"]);
        let adjusted = MissingColumnSearch::new(0)
            .align(&true_columns, &["b"])
            .unwrap();
        assert!(adjusted.is_clamped());
        assert!(adjusted.inserted().is_empty());
        assert_eq!(adjusted.predicted(), aligned(&["b", "MISSING", "MISSING"]).as_slice());
    }

    const LABELS: [&str; 4] = ["a", "b", "c", "d"];

    #[test]
    fn test_search_never_worse_than_padding() {
        fn never_worse(truth: Vec<u8>, predicted: Vec<u8>) -> TestResult {
            if truth.len() > 7
                || predicted.len() > 7
                || truth.len().abs_diff(predicted.len()) > 3
            {
                return TestResult::discard();
            }
            let truth: Vec<&str> = truth.iter().map(|i| LABELS[*i as usize % 4]).collect();
            let predicted: Vec<&str> =
                predicted.iter().map(|i| LABELS[*i as usize % 4]).collect();
            let true_columns = scored(&truth);
            let adjusted = MissingColumnSearch::new(3)
                .align(&true_columns, &predicted)
                .unwrap();
            let padded = InstanceAlignment::padded(&true_columns, &predicted).unwrap();
            TestResult::from_bool(
                !padded.accuracy().is_better_than(&adjusted.accuracy())
                    && adjusted.columns().len() == adjusted.predicted().len(),
            )
        }
        let mut qc = QuickCheck::new().tests(300);
        qc.quickcheck(never_worse as fn(Vec<u8>, Vec<u8>) -> TestResult)
    }
}
