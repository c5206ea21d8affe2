/**
This module computes the metrics (precision, recall, f-score, support) of a pool of true column
types and the matching pool of predicted column types, over a fixed vocabulary.
*/
use crate::reporter::{Average, ClassMetricsInner, OverallAverage, Reporter};
use crate::vocabulary::Vocabulary;
use core::fmt;
use itertools::multizip;
use ndarray::{prelude::*, Data, ScalarOperand, Zip};
use ndarray_stats::{errors::MultiInputError, SummaryStatisticsExt};
use num::{Float, Num, NumCast};
use serde::{Deserialize, Serialize};
use std::{
    error::Error,
    fmt::{Debug, Display},
    str::FromStr,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayNotUniqueOrEmpty(usize);

impl Display for ArrayNotUniqueOrEmpty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "This array contains more than one element or is empty. It has length: {} Cannot call `item` on it", self.0
        )
    }
}
impl Error for ArrayNotUniqueOrEmpty {}

trait ItemArrayExt<Output> {
    /// Returns the element out of the Array. Can return an error if the array is empty of if the
    /// array has a length superior to 1.
    fn item(&self) -> Result<Output, ArrayNotUniqueOrEmpty>;
}

impl<F: Clone, T: Data<Elem = F>> ItemArrayExt<F> for ArrayBase<T, Dim<[usize; 1]>> {
    fn item(&self) -> Result<F, ArrayNotUniqueOrEmpty> {
        match self.len() {
            1 => self.first().cloned().ok_or(ArrayNotUniqueOrEmpty(0)),
            n => Err(ArrayNotUniqueOrEmpty(n)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
/// What value do we use when a division by zero happens? A precision is undefined for a column
/// type that is never predicted and a recall is undefined for a column type that never appears in
/// the true values. By default, these metrics are set to 0.
pub enum DivByZeroStrat {
    /// Returns 0 when the denominator is 0
    #[default]
    ReplaceBy0,
    /// Returns 1 when the denominator is 0
    ReplaceBy1,
}

impl DivByZeroStrat {
    pub(crate) fn fill_value<I: Num>(&self) -> I {
        match self {
            Self::ReplaceBy0 => I::zero(),
            Self::ReplaceBy1 => I::one(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsingDivisionByZeroStrategyError<S: Debug + Display>(S);

impl<S: Debug + Display> Display for ParsingDivisionByZeroStrategyError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Could not parse the {} into a a `DivisionByZeroStrategy`",
            self.0
        )
    }
}
impl<S: Debug + Display> Error for ParsingDivisionByZeroStrategyError<S> {}

impl FromStr for DivByZeroStrat {
    type Err = ParsingDivisionByZeroStrategyError<String>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_ref() {
            "replaceby0" | "replacebyzero" | "zero" | "0" => Ok(DivByZeroStrat::ReplaceBy0),
            "replaceby1" | "replacebyone" | "one" | "1" => Ok(DivByZeroStrat::ReplaceBy1),
            _ => Err(ParsingDivisionByZeroStrategyError(String::from(s))),
        }
    }
}

/// Internal extension trait for Num's Float trait
pub trait FloatExt: Float + Send + Sync + Clone + ScalarOperand + Debug {}

impl<T: Float + Send + Sync + Clone + Copy + ScalarOperand + Debug> FloatExt for T {}

/// Divides the numerator by the denominator. Every position where the denominator is zero gets
/// the value given by the `zero_division` strategy.
fn prf_divide<I: Num + Copy, D: Dimension>(
    numerator: Array<I, D>,
    denominator: ArrayViewMut<I, D>,
    zero_division: DivByZeroStrat,
) -> Array<I, D> {
    let (mut result, zero_mask) = prf_divide_results_and_mask(numerator, denominator);
    let fill = zero_division.fill_value::<I>();
    Zip::from(&mut result).and(&zero_mask).for_each(|r, m| {
        if *m == I::zero() {
            *r = fill
        }
    });
    result
}

/// This function computes the result of the division and a mask holding `0` wherever the
/// denominator is `0` and `1` everywhere else. Zeros of the denominator are replaced by ones
/// before dividing.
///
/// * `numerator`: Numerator of the division
/// * `denominator`: Denominator of the division
fn prf_divide_results_and_mask<I: Num + Copy, D: Dimension>(
    numerator: Array<I, D>,
    mut denominator: ArrayViewMut<I, D>,
) -> (Array<I, D>, Array<I, D>) {
    let zero_at_mask =
        Zip::from(&mut denominator)
            .map_collect(|d| if *d == I::zero() { I::zero() } else { I::one() });
    denominator.mapv_inplace(|v| if v == I::zero() { I::one() } else { v });
    (numerator / denominator, zero_at_mask)
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Error type to represent when two lists or arrays are not of the
/// same length (when they should be).
pub struct InconsistentLengthError(pub(crate) usize, pub(crate) usize);

impl Display for InconsistentLengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Inconsistent length between two lists. `y_true` is length {}, `y_pred` is length {}",
            self.0, self.1
        )
    }
}
impl Error for InconsistentLengthError {}

fn check_consistent_length<T>(y_true: &[T], y_pred: &[T]) -> Result<(), InconsistentLengthError> {
    if y_true.len() != y_pred.len() {
        return Err(InconsistentLengthError(y_true.len(), y_pred.len()));
    }
    Ok(())
}

/// predicted sum, true positive sum and true sum
type ActualTPCorrect<T> = (Array1<T>, Array1<T>, Array1<T>);

/// Counts, for every label of the vocabulary, how many times it is predicted, how many times it
/// is correctly predicted and how many times it is the true value. Values outside of the
/// vocabulary are never counted for any label.
fn extract_tp_actual_correct(
    y_true: &[&str],
    y_pred: &[&str],
    vocabulary: &Vocabulary,
) -> ActualTPCorrect<usize> {
    let mut pred_sum = Array1::<usize>::zeros(vocabulary.len());
    let mut tp_sum = Array1::<usize>::zeros(vocabulary.len());
    let mut true_sum = Array1::<usize>::zeros(vocabulary.len());
    for (t, p) in y_true.iter().zip(y_pred) {
        if let Some(i) = vocabulary.position(t) {
            true_sum[i] += 1;
        }
        if let Some(j) = vocabulary.position(p) {
            pred_sum[j] += 1;
            if t == p {
                tp_sum[j] += 1;
            }
        }
    }
    (pred_sum, tp_sum, true_sum)
}

#[derive(Debug, Clone, PartialEq)]
/// Enum error encompassing many type of failures that could happen when computing the precison,
/// recall, f-score and the support.
pub enum ComputationError {
    BetaNotPositive,
    InconsistentLength(InconsistentLengthError),
    InputError(MultiInputError),
    EmptyArray(String),
    EmptyOrNotUnique(ArrayNotUniqueOrEmpty),
}
impl Display for ComputationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BetaNotPositive => write!(f, "Beta value is not positive"),
            Self::InconsistentLength(length_err) => std::fmt::Display::fmt(length_err, f),
            Self::InputError(input_err) => std::fmt::Display::fmt(&input_err, f),
            Self::EmptyArray(empty_err) => write!(f, "Found an empty array in {}", empty_err),
            Self::EmptyOrNotUnique(size_err) => std::fmt::Display::fmt(size_err, f),
        }
    }
}
impl Error for ComputationError {}

impl From<InconsistentLengthError> for ComputationError {
    fn from(value: InconsistentLengthError) -> Self {
        Self::InconsistentLength(value)
    }
}

impl From<MultiInputError> for ComputationError {
    fn from(value: MultiInputError) -> Self {
        Self::InputError(value)
    }
}

impl From<ArrayNotUniqueOrEmpty> for ComputationError {
    fn from(value: ArrayNotUniqueOrEmpty) -> Self {
        Self::EmptyOrNotUnique(value)
    }
}

/// Type alias for representing the output of the `precision_recall_fscore_support`. Each arrays
/// contain a vector of f32. The first array contains the precision, the second the recall, the
/// third the f-score and the last one the support.
pub type PrecisionRecallFScoreTrueSum = (
    Array<f32, Dim<[usize; 1]>>,
    Array<f32, Dim<[usize; 1]>>,
    Array<f32, Dim<[usize; 1]>>,
    Array<usize, Dim<[usize; 1]>>,
);

/// Computes the precision, recall, fscore and support of every label of the vocabulary, or one of
/// their averages. Values of `y_true` or `y_pred` outside of the vocabulary are simply wrong.
///
/// * `y_true`: True column types
/// * `y_pred`: Predicted column types
/// * `vocabulary`: Labels for which the metrics are computed.
/// * `beta`: Value of the `beta` parameter of the fscore. `beta=1` for F1 and `beta=0.5` for F0.5.
/// * `average`: What type of average to use.
/// * `zero_division`: What to do in case of division by zero.
pub fn precision_recall_fscore_support<F: FloatExt>(
    y_true: &[&str],
    y_pred: &[&str],
    vocabulary: &Vocabulary,
    beta: F,
    average: Average,
    zero_division: DivByZeroStrat,
) -> Result<PrecisionRecallFScoreTrueSum, ComputationError> {
    check_consistent_length(y_true, y_pred)?;
    let counts = extract_tp_actual_correct(y_true, y_pred, vocabulary);
    precision_recall_fscore_support_inner(counts, beta, average, zero_division)
}

fn precision_recall_fscore_support_inner<F: FloatExt>(
    counts: ActualTPCorrect<usize>,
    beta: F,
    average: Average,
    zero_division: DivByZeroStrat,
) -> Result<PrecisionRecallFScoreTrueSum, ComputationError> {
    if beta.is_nan() || beta.is_sign_negative() {
        return Err(ComputationError::BetaNotPositive);
    };
    let (mut pred_sum, mut tp_sum, mut true_sum) = counts;
    if matches!(average, Average::Micro) {
        tp_sum = array![tp_sum.sum()];
        pred_sum = array![pred_sum.sum()];
        true_sum = array![true_sum.sum()];
    };
    let tp = tp_sum.mapv(|x| x as f32);
    let precision = prf_divide(
        tp.clone(),
        pred_sum.mapv(|x| x as f32).view_mut(),
        zero_division,
    );
    let recall = prf_divide(tp, true_sum.mapv(|x| x as f32).view_mut(), zero_division);
    let fill = zero_division.fill_value::<f32>();
    let beta2: f32 = <f32 as NumCast>::from(beta.powi(2)).unwrap_or(f32::INFINITY);
    let f_score: Array1<f32> = if beta2.is_infinite() {
        recall.clone()
    } else {
        // A label never seen, neither true nor predicted, gets the zero division value.
        let absent = Zip::from(&true_sum)
            .and(&pred_sum)
            .map_collect(|t, p| t + p == 0);
        Zip::from(&precision)
            .and(&recall)
            .and(&absent)
            .map_collect(|&p, &r, &absent| {
                let denom = beta2 * p + r;
                if denom == 0.0 {
                    if absent {
                        fill
                    } else {
                        0.0
                    }
                } else {
                    (1.0 + beta2) * p * r / denom
                }
            })
    };
    match average {
        Average::None | Average::Micro => Ok((precision, recall, f_score, true_sum)),
        Average::Macro => {
            let final_precision = array![precision
                .mean()
                .ok_or_else(|| ComputationError::EmptyArray(String::from("precision")))?];
            let final_recall = array![recall
                .mean()
                .ok_or_else(|| ComputationError::EmptyArray(String::from("recall")))?];
            let final_f_score = array![f_score
                .mean()
                .ok_or_else(|| ComputationError::EmptyArray(String::from("fscore")))?];
            Ok((final_precision, final_recall, final_f_score, array![true_sum.sum()]))
        }
        Average::Weighted => {
            let support = true_sum.sum();
            if support == 0 {
                return Ok((array![fill], array![fill], array![fill], array![0]));
            }
            let weights = true_sum.mapv(|x| x as f32);
            let final_precision = array![precision.weighted_mean(&weights)?];
            let final_recall = array![recall.weighted_mean(&weights)?];
            let final_f_score = array![f_score.weighted_mean(&weights)?];
            Ok((final_precision, final_recall, final_f_score, array![support]))
        }
    }
}

/// Main entrypoint of the metrics. This function computes the precision, recall, fscore and
/// support of every column type of the vocabulary, their micro, macro and weighted averages and
/// the accuracy of the pool. The returned structure can be used to prettyprint the results or be
/// converted into a HashSet.
///
/// * `y_true`: True column types
/// * `y_pred`: Predicted column types
/// * `vocabulary`: Column types reported on.
/// * `zero_division`: What to do in case of division by zero.
pub fn classification_report(
    y_true: &[&str],
    y_pred: &[&str],
    vocabulary: &Vocabulary,
    zero_division: DivByZeroStrat,
) -> Result<Reporter, ComputationError> {
    check_consistent_length(y_true, y_pred)?;
    let counts = extract_tp_actual_correct(y_true, y_pred, vocabulary);
    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    let accuracy = match y_true.len() {
        0 => 0.0,
        n => correct as f32 / n as f32,
    };
    let (p, r, f1, s) = precision_recall_fscore_support_inner::<f32>(
        counts.clone(),
        1.0,
        Average::None,
        zero_division,
    )?;
    let mut reporter = Reporter::new(accuracy, y_true.len());
    for (position, (name, precision, recall, fscore, support)) in
        multizip((vocabulary.iter(), p, r, f1, s)).enumerate()
    {
        let tmp_metrics = ClassMetricsInner {
            class: name.clone(),
            position,
            precision,
            recall,
            fscore,
            support,
            average: Average::None,
        };
        reporter.insert(tmp_metrics);
    }
    for avg in OverallAverage::ALL {
        let (p, r, f1, s) = precision_recall_fscore_support_inner::<f32>(
            counts.clone(), //inexpensive to clone!
            1.0,
            avg.into(),
            zero_division,
        )?;
        let tmp_metrics =
            ClassMetricsInner::new_overall(avg, p.item()?, r.item()?, f1.item()?, s.item()?);
        reporter.insert(tmp_metrics);
    }
    Ok(reporter)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::reporter::ClassMetrics;
    use quickcheck::{QuickCheck, TestResult};
    use rstest::rstest;
    use std::collections::BTreeSet;

    pub(crate) trait CloseEnough {
        fn are_close(&self, other: &Self, eps: f32) -> bool;
    }

    impl CloseEnough for ClassMetrics {
        fn are_close(&self, other: &Self, eps: f32) -> bool {
            let are_equal = self == other;
            let precision_is_equal = f32::abs(self.precision - other.precision) < eps;
            let recall_is_equal = f32::abs(self.recall - other.recall) < eps;
            let fscore_is_equal = f32::abs(self.fscore - other.fscore) < eps;
            let support_is_equal = self.support == other.support;
            are_equal && precision_is_equal && recall_is_equal && fscore_is_equal && support_is_equal
        }
    }

    impl CloseEnough for Reporter {
        fn are_close(&self, other: &Self, eps: f32) -> bool {
            if self.classes.len() != other.classes.len()
                || self.support != other.support
                || f32::abs(self.accuracy - other.accuracy) >= eps
            {
                return false;
            }
            for (s, o) in self.iter().zip(other.iter()) {
                if !s.are_close(&o, eps) {
                    dbg!(s, o);
                    return false;
                }
            }
            true
        }
    }

    fn vocabulary() -> Vocabulary {
        Vocabulary::new(["A", "B", "C"]).unwrap()
    }

    #[test]
    fn test_reporter_output() {
        let y_true = vec!["A", "B", "MISSING", "A"];
        let y_pred = vec!["MISSING", "B", "C", "A"];
        let actual =
            classification_report(&y_true, &y_pred, &vocabulary(), DivByZeroStrat::ReplaceBy0)
                .unwrap();
        let expected = Reporter {
            classes: BTreeSet::from_iter(vec![
                ClassMetricsInner {
                    class: String::from("A"),
                    position: 0,
                    fscore: 0.6666666666666666,
                    precision: 1.0,
                    recall: 0.5,
                    support: 2,
                    average: Average::None,
                },
                ClassMetricsInner {
                    class: String::from("B"),
                    position: 1,
                    fscore: 1.0,
                    precision: 1.0,
                    recall: 1.0,
                    support: 1,
                    average: Average::None,
                },
                ClassMetricsInner {
                    class: String::from("C"),
                    position: 2,
                    fscore: 0.0,
                    precision: 0.0,
                    recall: 0.0,
                    support: 0,
                    average: Average::None,
                },
                ClassMetricsInner::new_overall(
                    OverallAverage::Macro,
                    0.66666666666666,
                    0.5,
                    0.55555555555555,
                    3,
                ),
                ClassMetricsInner::new_overall(
                    OverallAverage::Micro,
                    0.66666666666666,
                    0.66666666666666,
                    0.66666666666666,
                    3,
                ),
                ClassMetricsInner::new_overall(
                    OverallAverage::Weighted,
                    1.0,
                    0.66666666666666,
                    0.77777777777777,
                    3,
                ),
            ]),
            accuracy: 0.5,
            support: 4,
        };
        assert!(actual.are_close(&expected, 1e-6));
    }

    #[test]
    fn test_classification_report_display() {
        let y_true = vec!["A", "A", "B", "B"];
        let y_pred = vec!["A", "B", "B", "A"];
        let reporter = classification_report(
            &y_true,
            &y_pred,
            &Vocabulary::new(["A", "B"]).unwrap(),
            DivByZeroStrat::ReplaceBy0,
        )
        .unwrap();
        // NOTE: Do not change the indentation
        let expected = "Class, Precision, Recall, Fscore, Support
A, 0.5, 0.5, 0.5, 2
B, 0.5, 0.5, 0.5, 2
Overall_Micro, 0.5, 0.5, 0.5, 4
Overall_Macro, 0.5, 0.5, 0.5, 4
Overall_Weighted, 0.5, 0.5, 0.5, 4
Accuracy, 0.5, 4\n";
        assert_eq!(reporter.to_string(), expected);
    }

    #[test]
    fn test_rows_follow_vocabulary_order() {
        let vocabulary = Vocabulary::new(["zeta", "alpha"]).unwrap();
        let reporter =
            classification_report(&["zeta"], &["zeta"], &vocabulary, DivByZeroStrat::ReplaceBy0)
                .unwrap();
        let rows: Vec<_> = reporter.iter().map(|m| m.class).collect();
        assert_eq!(
            rows,
            vec![
                "zeta",
                "alpha",
                "Overall_Micro",
                "Overall_Macro",
                "Overall_Weighted"
            ]
        );
        assert!(reporter
            .to_string()
            .starts_with("Class, Precision, Recall, Fscore, Support\nzeta, 1, 1, 1, 1\nalpha, "));
        let json = serde_json::to_value(&reporter).unwrap();
        assert_eq!(json["classes"][0]["class"], "zeta");
    }

    #[test]
    fn test_classification_report_inconsistent_length() {
        let actual = classification_report(
            &["A", "B"],
            &["A"],
            &vocabulary(),
            DivByZeroStrat::ReplaceBy0,
        );
        assert_eq!(
            actual,
            Err(ComputationError::InconsistentLength(InconsistentLengthError(
                2, 1
            )))
        );
    }

    #[test]
    fn test_empty_pool_yields_zeros() {
        let reporter =
            classification_report(&[], &[], &vocabulary(), DivByZeroStrat::ReplaceBy0).unwrap();
        assert_eq!(reporter.accuracy(), 0.0);
        assert_eq!(reporter.support(), 0);
        for metrics in reporter.iter() {
            assert_eq!(
                (metrics.precision, metrics.recall, metrics.fscore, metrics.support),
                (0.0, 0.0, 0.0, 0)
            );
        }
    }

    #[rstest]
    #[case(DivByZeroStrat::ReplaceBy0, 0.0)]
    #[case(DivByZeroStrat::ReplaceBy1, 1.0)]
    fn test_zero_division_strategy(#[case] zero_division: DivByZeroStrat, #[case] fill: f32) {
        // "C" is never predicted and never true.
        let (p, r, f, s) = precision_recall_fscore_support(
            &["A"],
            &["A"],
            &vocabulary(),
            1.0f32,
            Average::None,
            zero_division,
        )
        .unwrap();
        assert_eq!(p, array![1.0, fill, fill]);
        assert_eq!(r, array![1.0, fill, fill]);
        assert_eq!(f, array![1.0, fill, fill]);
        assert_eq!(s, array![1, 0, 0]);
    }

    #[test]
    fn test_extract_tp_actual_correct() {
        let y_true = ["A", "A", "B", "MISSING", "C"];
        let y_pred = ["A", "B", "B", "A", "not a type"];
        let (pred_sum, tp_sum, true_sum) =
            extract_tp_actual_correct(&y_true, &y_pred, &vocabulary());
        assert_eq!(pred_sum, array![2, 2, 0]);
        assert_eq!(tp_sum, array![1, 1, 0]);
        assert_eq!(true_sum, array![2, 1, 1]);
    }

    #[test]
    fn test_divide_results_and_mask() {
        let numerator = array![1., 2., 4., 5.];
        let mut denominator = array![1., 0., 2., 5.];
        let (div_result, zero_mask) =
            prf_divide_results_and_mask(numerator, denominator.view_mut());
        assert_eq!(zero_mask, array![1., 0., 1., 1.]);
        assert_eq!(div_result, array![1., 2., 2., 1.]);
    }

    #[rstest]
    #[case(DivByZeroStrat::ReplaceBy0, array![1., 0., 2., 1.])]
    #[case(DivByZeroStrat::ReplaceBy1, array![1., 1., 2., 1.])]
    fn test_prf_divide(#[case] zero_division: DivByZeroStrat, #[case] expected: Array1<f64>) {
        let mut denominator = array![1., 0., 2., 5.];
        let actual = prf_divide(
            array![1., 2., 4., 5.],
            denominator.view_mut(),
            zero_division,
        );
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_f_beta() {
        // precision 1/2, recall 1
        let y_true = ["A", "B"];
        let y_pred = ["A", "A"];
        let (_, _, f, _) = precision_recall_fscore_support(
            &y_true,
            &y_pred,
            &Vocabulary::new(["A"]).unwrap(),
            2.0f64,
            Average::None,
            DivByZeroStrat::ReplaceBy0,
        )
        .unwrap();
        // (1 + 4) * 0.5 * 1 / (4 * 0.5 + 1)
        assert!((f[0] - 5.0 / 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_err_on_negative_beta() {
        let res = precision_recall_fscore_support(
            &["A"],
            &["A"],
            &vocabulary(),
            -1.0f32,
            Average::Macro,
            DivByZeroStrat::ReplaceBy0,
        );
        assert_eq!(res, Err(ComputationError::BetaNotPositive));
    }

    #[rstest]
    #[case("ReplaceBy0", DivByZeroStrat::ReplaceBy0)]
    #[case("replacebyone", DivByZeroStrat::ReplaceBy1)]
    #[case("zero", DivByZeroStrat::ReplaceBy0)]
    fn test_parse_zero_division(#[case] input: &str, #[case] expected: DivByZeroStrat) {
        assert_eq!(input.parse::<DivByZeroStrat>(), Ok(expected))
    }

    const LABELS: [&str; 5] = ["A", "B", "C", "MISSING", "other"];

    fn to_labels(indexes: &[u8]) -> Vec<&'static str> {
        indexes
            .iter()
            .map(|i| LABELS[*i as usize % LABELS.len()])
            .collect()
    }

    #[test]
    fn test_property_weighted_support_counts_vocabulary_labels() {
        fn support_of_vocabulary_labels(pairs: Vec<(u8, u8)>) -> TestResult {
            let (t, p): (Vec<u8>, Vec<u8>) = pairs.into_iter().unzip();
            let y_true = to_labels(&t);
            let y_pred = to_labels(&p);
            let reporter =
                classification_report(&y_true, &y_pred, &vocabulary(), DivByZeroStrat::ReplaceBy0)
                    .unwrap();
            let in_vocabulary = y_true.iter().filter(|l| ["A", "B", "C"].contains(*l)).count();
            let per_class: usize = reporter
                .iter()
                .filter(|m| m.average == Average::None)
                .map(|m| m.support)
                .sum();
            let weighted = reporter.overall(OverallAverage::Weighted).map(|m| m.support);
            TestResult::from_bool(
                per_class == in_vocabulary
                    && weighted == Some(in_vocabulary)
                    && reporter.support() == y_true.len(),
            )
        }
        let mut qc = QuickCheck::new().tests(500);
        qc.quickcheck(support_of_vocabulary_labels as fn(Vec<(u8, u8)>) -> TestResult)
    }

    #[test]
    fn test_property_metrics_are_bounded() {
        fn bounded(pairs: Vec<(u8, u8)>, average: u8) -> bool {
            let (t, p): (Vec<u8>, Vec<u8>) = pairs.into_iter().unzip();
            let average = [Average::None, Average::Micro, Average::Macro, Average::Weighted]
                [average as usize % 4];
            let (pr, re, f, _) = precision_recall_fscore_support(
                &to_labels(&t),
                &to_labels(&p),
                &vocabulary(),
                1.0f32,
                average,
                DivByZeroStrat::ReplaceBy0,
            )
            .unwrap();
            pr.iter()
                .chain(re.iter())
                .chain(f.iter())
                .all(|v| (0.0..=1.0 + 1e-6).contains(v))
        }
        let mut qc = QuickCheck::new().tests(500);
        qc.quickcheck(bounded as fn(Vec<(u8, u8)>, u8) -> bool)
    }
}
