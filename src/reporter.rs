/**
This modules gives a few tools to prettyprint the classification report of a pool of column
types and to query its rows.
*/
use serde::{Deserialize, Serialize};
use std::cmp::PartialOrd;
use std::collections::{BTreeSet, HashSet};
use std::fmt::Display;
use std::hash::Hash;
use std::str::FromStr;

/// The reporter holds the metrics of every column type of the vocabulary, the overall averages
/// and the accuracy of one pool of (true, predicted) pairs. It can be used to display the
/// results (i.e. prettyprint them) as if they were collected into a dataframe and can be
/// consumed to obtain a `HashSet` containing the metrics. The reporter can be built with the
/// `classification_report` function.
///
/// # Example
///
/// ```rust
/// use coltype_eval::{classification_report, DivByZeroStrat, Vocabulary};
///
/// let vocabulary = Vocabulary::new(["city", "country", "name"]).unwrap();
/// let y_true = vec!["city", "name", "country", "MISSING"];
/// let y_pred = vec!["city", "country", "country", "name"];
///
/// let reporter =
///     classification_report(&y_true, &y_pred, &vocabulary, DivByZeroStrat::ReplaceBy0).unwrap();
///
/// let city = reporter.class("city").unwrap();
/// assert_eq!((city.precision, city.recall, city.support), (1.0, 1.0, 1));
/// let name = reporter.class("name").unwrap();
/// assert_eq!((name.precision, name.recall, name.fscore), (0.0, 0.0, 0.0));
/// assert_eq!(reporter.accuracy(), 0.5);
/// assert_eq!(reporter.support(), 4);
/// assert!(reporter.to_string().starts_with("Class, Precision, Recall, Fscore, Support\ncity, 1, 1, 1, 1\n"));
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Reporter {
    pub(crate) classes: BTreeSet<ClassMetricsInner>,
    /// Fraction of the pairs whose predicted value equals the true value.
    pub(crate) accuracy: f32,
    /// Number of pairs in the pool, including the ones whose true value is not a column type.
    pub(crate) support: usize,
}

/// By converting the reporter into a `HashSet` of `ClassMetrics`, you lose the ordering of the
/// rows. If you mean to consume the data without prettyprinting it, this is not a problem.
impl From<Reporter> for HashSet<ClassMetrics> {
    fn from(value: Reporter) -> Self {
        value.classes.into_iter().map(ClassMetrics::from).collect()
    }
}

impl Reporter {
    pub(crate) fn new(accuracy: f32, support: usize) -> Self {
        Reporter {
            classes: BTreeSet::new(),
            accuracy,
            support,
        }
    }

    pub(crate) fn insert(&mut self, metrics: ClassMetricsInner) -> bool {
        self.classes.insert(metrics)
    }

    /// Metrics of a single column type.
    pub fn class(&self, class: &str) -> Option<ClassMetrics> {
        self.classes
            .iter()
            .find(|m| m.average == Average::None && m.class == class)
            .cloned()
            .map(ClassMetrics::from)
    }

    /// Metrics averaged over all the column types of the vocabulary.
    pub fn overall(&self, average: OverallAverage) -> Option<ClassMetrics> {
        let average: Average = average.into();
        self.classes
            .iter()
            .find(|m| m.average == average)
            .cloned()
            .map(ClassMetrics::from)
    }

    /// Iterates over the rows of the report: first the column types, then the averages.
    pub fn iter(&self) -> impl Iterator<Item = ClassMetrics> + '_ {
        self.classes.iter().cloned().map(ClassMetrics::from)
    }

    pub fn accuracy(&self) -> f32 {
        self.accuracy
    }

    /// Number of pairs this report was computed on.
    pub fn support(&self) -> usize {
        self.support
    }
}

/// Two reports are equal when they hold the same rows with the same values.
impl PartialEq for Reporter {
    fn eq(&self, other: &Self) -> bool {
        self.accuracy == other.accuracy
            && self.support == other.support
            && self.classes.len() == other.classes.len()
            && self
                .classes
                .iter()
                .zip(other.classes.iter())
                .all(|(s, o)| s.same_values(o))
    }
}

/// The Reporter struct acts as a dataframe when displayed.
impl Display for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Class, Precision, Recall, Fscore, Support")?;
        for v in self.classes.iter() {
            writeln!(f, "{}", v)?
        }
        writeln!(f, "Accuracy, {}, {}", self.accuracy, self.support)
    }
}

#[derive(Debug, Clone)]
/// Datastructure holding metrics about a given class.
pub struct ClassMetrics {
    /// The class, such as "city", "country", or "Overall_Macro" for an average.
    pub class: String,
    /// The average used to compute this class' metrics
    pub average: Average,
    /// Precision metric
    pub precision: f32,
    /// Recall metric
    pub recall: f32,
    /// Fscore metric
    pub fscore: f32,
    /// Support metric
    pub support: usize,
}

impl Hash for ClassMetrics {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.class.hash(state);
        self.average.hash(state)
    }
}

impl PartialEq for ClassMetrics {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class && self.average == other.average
    }
}
impl Eq for ClassMetrics {}

impl From<ClassMetricsInner> for ClassMetrics {
    fn from(value: ClassMetricsInner) -> Self {
        Self {
            class: value.class,
            average: value.average,
            precision: value.precision,
            recall: value.recall,
            fscore: value.fscore,
            support: value.support,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
/// ClassMetricsInner hold the metrics for a single class. They can't be constructed explicitely
/// and they implement a special version of the `Display` trait, allowing them to be treated as
/// the line of a dataframe. Two rows are equal when they share their class, average and position.
pub(crate) struct ClassMetricsInner {
    pub(crate) class: String,
    pub(crate) average: Average,
    /// Position of the class in the vocabulary.
    pub(crate) position: usize,
    pub(crate) precision: f32,
    pub(crate) recall: f32,
    pub(crate) fscore: f32,
    pub(crate) support: usize,
}
impl PartialEq for ClassMetricsInner {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class
            && self.average == other.average
            && self.position == other.position
    }
}
impl Eq for ClassMetricsInner {}

impl PartialOrd for ClassMetricsInner {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Rows are sorted by average first (per class rows come first), then by vocabulary position.
impl Ord for ClassMetricsInner {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.average
            .cmp(&other.average)
            .then_with(|| self.position.cmp(&other.position))
            .then_with(|| self.class.cmp(&other.class))
    }
}

impl ClassMetricsInner {
    fn same_values(&self, other: &Self) -> bool {
        self == other
            && self.precision == other.precision
            && self.recall == other.recall
            && self.fscore == other.fscore
            && self.support == other.support
    }

    pub(crate) fn new_overall(
        average: OverallAverage,
        precision: f32,
        recall: f32,
        fscore: f32,
        support: usize,
    ) -> Self {
        let class = average.to_string();
        ClassMetricsInner {
            class,
            average: average.into(),
            position: 0,
            precision,
            recall,
            fscore,
            support,
        }
    }
}

/// The Classmetrics struct acts as a line in a dataframe when displayed.
impl Display for ClassMetricsInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}",
            self.class, self.precision, self.recall, self.fscore, self.support
        )
    }
}

/// Enumeration of the different types of averaging possible and supported by this crate. &str can
/// be parsed to create an `Average`. `None` stands for the metrics of a single class.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Serialize, Deserialize)]
pub enum Average {
    None,
    Micro,
    Macro,
    Weighted,
}
impl Display for Average {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
impl FromStr for Average {
    type Err = AverageParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Average::None),
            "micro" => Ok(Average::Micro),
            "macro" => Ok(Average::Macro),
            "weighted" => Ok(Average::Weighted),
            _ => Err(AverageParsingError(String::from(s))),
        }
    }
}

#[derive(Debug, PartialEq, PartialOrd, Eq, Ord, Clone)]
pub struct AverageParsingError(String);
impl Display for AverageParsingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Impossible to parse the string ({}) into an Average",
            self.0
        )
    }
}
impl std::error::Error for AverageParsingError {}

#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum OverallAverage {
    Micro,
    Macro,
    Weighted,
}

impl OverallAverage {
    pub(crate) const ALL: [OverallAverage; 3] = [
        OverallAverage::Micro,
        OverallAverage::Macro,
        OverallAverage::Weighted,
    ];
}

impl Display for OverallAverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str_content = match self {
            Self::Micro => "Overall_Micro",
            Self::Macro => "Overall_Macro",
            Self::Weighted => "Overall_Weighted",
        };
        write!(f, "{}", str_content)
    }
}

impl From<OverallAverage> for Average {
    fn from(value: OverallAverage) -> Self {
        match value {
            OverallAverage::Micro => Average::Micro,
            OverallAverage::Macro => Average::Macro,
            OverallAverage::Weighted => Average::Weighted,
        }
    }
}
