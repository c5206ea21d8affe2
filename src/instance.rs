/**
The evaluation unit of this crate: one table, with its true column types, the predicted column
types and the attributes used to slice the metrics (data type, sparsity and width).
*/
use enum_iterator::{all, Sequence};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Data type of a column. Numerical columns are sliced apart from the other columns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Sequence,
)]
pub enum DataType {
    #[serde(rename = "numerical")]
    Numerical,
    #[serde(rename = "non-numerical")]
    NonNumerical,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numerical => "numerical",
            Self::NonNumerical => "non-numerical",
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsingDataTypeError(String);

impl Display for ParsingDataTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expected: Vec<_> = all::<DataType>().map(|d| d.as_str()).collect();
        write!(
            f,
            "Could not parse {} into a `DataType`. Expected one of {:?}",
            self.0, expected
        )
    }
}
impl Error for ParsingDataTypeError {}

impl FromStr for DataType {
    type Err = ParsingDataTypeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all::<DataType>()
            .find(|d| d.as_str() == s.to_lowercase())
            .ok_or_else(|| ParsingDataTypeError(String::from(s)))
    }
}

/// Fraction of empty cells of a table. Sparsities are used as bucket keys and are therefore
/// totally ordered (IEEE total order) and hashable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sparsity(f64);

impl Sparsity {
    pub fn new(value: f64) -> Self {
        Sparsity(value)
    }

    /// Sparsity of a table with `rows` rows and `columns` columns, `null_cells` of them being
    /// empty. A table without any cell has no sparsity.
    pub fn from_counts(null_cells: usize, rows: usize, columns: usize) -> Option<Self> {
        match rows * columns {
            0 => None,
            cells => Some(Sparsity(null_cells as f64 / cells as f64)),
        }
    }

    /// Rounds the sparsity to `decimals` decimal points. This is how sparsities are bucketized.
    pub fn rounded(self, decimals: u32) -> Self {
        let factor = 10f64.powi(decimals as i32);
        Sparsity((self.0 * factor).round() / factor)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialEq for Sparsity {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Sparsity {}

impl PartialOrd for Sparsity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sparsity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Sparsity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state)
    }
}

impl Display for Sparsity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<f64> for Sparsity {
    fn from(value: f64) -> Self {
        Sparsity(value)
    }
}

/// The true side of one column: its label (if it is scored) and the attributes used for
/// bucketing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column<'a> {
    pub label: Option<&'a str>,
    pub data_type: DataType,
    pub sparsity: Sparsity,
    /// Number of columns of the table this column belongs to.
    pub width: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Error raised when the sequences describing the instances are malformed.
pub enum InstanceError {
    /// The per-column sequences of one instance do not share the length of its true labels.
    MalformedInstance {
        instance: usize,
        field: &'static str,
        expected: usize,
        found: usize,
    },
    /// The lists of per-instance sequences do not describe the same number of instances.
    InconsistentInstanceCount {
        field: &'static str,
        expected: usize,
        found: usize,
    },
}

impl Display for InstanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedInstance {
                instance,
                field,
                expected,
                found,
            } => write!(
                f,
                "Instance {} is malformed: `{}` has length {}, but there are {} true labels",
                instance, field, found, expected
            ),
            Self::InconsistentInstanceCount {
                field,
                expected,
                found,
            } => write!(
                f,
                "Inconsistent number of instances: `{}` describes {} instances, expected {}",
                field, found, expected
            ),
        }
    }
}
impl Error for InstanceError {}

/// One table to evaluate. `true_labels`, `data_types` and `sparsities` describe the true
/// columns and must share one length. `predicted_labels` may be shorter or longer. A true label
/// set to `None` marks a column excluded from the evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub true_labels: Vec<Option<String>>,
    pub predicted_labels: Vec<String>,
    pub data_types: Vec<DataType>,
    pub sparsities: Vec<Sparsity>,
}

impl Instance {
    pub fn new(
        true_labels: Vec<Option<String>>,
        predicted_labels: Vec<String>,
        data_types: Vec<DataType>,
        sparsities: Vec<Sparsity>,
    ) -> Self {
        Self {
            true_labels,
            predicted_labels,
            data_types,
            sparsities,
        }
    }

    /// Builds an instance whose table-level sparsity is broadcast to every column.
    pub fn with_table_sparsity(
        true_labels: Vec<Option<String>>,
        predicted_labels: Vec<String>,
        data_types: Vec<DataType>,
        sparsity: Sparsity,
    ) -> Self {
        let sparsities = vec![sparsity; true_labels.len()];
        Self::new(true_labels, predicted_labels, data_types, sparsities)
    }

    /// Number of columns of the table.
    pub fn width(&self) -> usize {
        self.true_labels.len()
    }

    /// Number of predicted columns minus the number of true columns.
    pub fn length_deviation(&self) -> isize {
        self.predicted_labels.len() as isize - self.true_labels.len() as isize
    }

    pub(crate) fn predicted(&self) -> Vec<&str> {
        self.predicted_labels.iter().map(String::as_str).collect()
    }

    /// Zips the true side of the instance into columns, checking that every per-column sequence
    /// has one entry per true label.
    ///
    /// * `instance`: Position of the instance, used in the error.
    pub(crate) fn columns(&self, instance: usize) -> Result<Vec<Column<'_>>, InstanceError> {
        let expected = self.width();
        for (field, found) in [
            ("data_types", self.data_types.len()),
            ("sparsities", self.sparsities.len()),
        ] {
            if found != expected {
                return Err(InstanceError::MalformedInstance {
                    instance,
                    field,
                    expected,
                    found,
                });
            }
        }
        Ok(self
            .true_labels
            .iter()
            .zip(self.data_types.iter())
            .zip(self.sparsities.iter())
            .map(|((label, data_type), sparsity)| Column {
                label: label.as_deref(),
                data_type: *data_type,
                sparsity: *sparsity,
                width: expected,
            })
            .collect())
    }
}

/// Builds the instances out of parallel lists, one entry per table in each list.
///
/// * `all_true_labels`: True labels of each table. `None` marks an unscored column.
/// * `all_predicted_labels`: Predicted labels of each table.
/// * `all_data_types`: Data type of each true column.
/// * `all_sparsities`: Sparsity of each true column.
pub fn instances_from_lists(
    all_true_labels: Vec<Vec<Option<String>>>,
    all_predicted_labels: Vec<Vec<String>>,
    all_data_types: Vec<Vec<DataType>>,
    all_sparsities: Vec<Vec<Sparsity>>,
) -> Result<Vec<Instance>, InstanceError> {
    let expected = all_true_labels.len();
    for (field, found) in [
        ("predicted_labels", all_predicted_labels.len()),
        ("data_types", all_data_types.len()),
        ("sparsities", all_sparsities.len()),
    ] {
        if found != expected {
            return Err(InstanceError::InconsistentInstanceCount {
                field,
                expected,
                found,
            });
        }
    }
    let instances: Vec<_> = itertools::multizip((
        all_true_labels,
        all_predicted_labels,
        all_data_types,
        all_sparsities,
    ))
    .map(|(t, p, d, s)| Instance::new(t, p, d, s))
    .collect();
    for (i, instance) in instances.iter().enumerate() {
        instance.columns(i)?;
    }
    Ok(instances)
}
