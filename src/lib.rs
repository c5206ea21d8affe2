/*!
This library evaluates the column types predicted for tables (e.g. by a language model) against
their true column types. Predictors often emit the wrong number of columns, so every table is
evaluated twice:
* Padded: the shorter sequence is padded at the end with `MISSING`.
* Missing column adjusted: `MISSING` is inserted where it maximizes the accuracy of the table.
  Every combination of positions is tried, up to a maximum number of inserted columns.

The aligned (true, predicted) pairs of every table are flattened into a global pool and into
pools keyed by column index, data type, sparsity and table width. Each pool gets a full
classification report (precision, recall, fscore and support of each column type, with their
micro, macro and weighted averages, and the accuracy).

# Terminology
* A column type (or label) is a string naming the semantic type of a column, such as `city`.
* The vocabulary is the closed set of column types. Predictions outside of it are wrong.
* A true label can be absent (`None`): the column is not scored at all.
* `MISSING` is the sentinel added by the alignment. It never belongs to the vocabulary.

# Example
```rust
use coltype_eval::{evaluate_columns, DataType, EvalConfig, Instance, Sparsity};

let instance = Instance::with_table_sparsity(
    vec![Some(String::from("city")), Some(String::from("country")), None],
    vec![String::from("city"), String::from("name")],
    vec![DataType::NonNumerical; 3],
    Sparsity::new(0.1),
);
let results =
    evaluate_columns(&[instance], ["city", "country", "name"], EvalConfig::default()).unwrap();
assert_eq!(results.num_columns_deviations(), &[-1]);
assert_eq!(results.padded().classification_report.support(), 2);
```
*/

mod accuracy;
mod align;
mod config;
mod evaluate;
mod flatten;
mod instance;
mod metrics;
mod reporter;
mod search;
mod vocabulary;

// The public api starts here
pub use accuracy::{Accuracy, AccuracyReport};

pub use align::{insert_and_pad, pad, Aligned, AlignedSides, AlignmentError, Side, SENTINEL};

pub use instance::{
    instances_from_lists, Column, DataType, Instance, InstanceError, ParsingDataTypeError,
    Sparsity,
};

pub use vocabulary::{EmptyVocabularyError, Vocabulary};

pub use metrics::{
    classification_report, precision_recall_fscore_support, ComputationError, DivByZeroStrat,
    FloatExt, InconsistentLengthError, ParsingDivisionByZeroStrategyError,
    PrecisionRecallFScoreTrueSum,
};

pub use reporter::{Average, AverageParsingError, ClassMetrics, OverallAverage, Reporter};

pub use search::{InstanceAlignment, MissingColumnSearch};

pub use flatten::{Buckets, FamilyReport, Pool};

pub use evaluate::{AnnotatedColumns, ColumnTaskResults, EvaluationError};

pub use config::{EvalConfig, EvalConfigBuilder, DEFAULT_MAX_ADJUSTMENT};

/// Main entrypoint of the library. This function evaluates the predicted column types of every
/// instance over the given column types. It builds the vocabulary and runs
/// `ColumnTaskResults::compute`.
///
/// * `instances`: Tables to evaluate.
/// * `column_types`: Every valid column type. Must contain at least one.
/// * `config`: Parameters of the evaluation.
pub fn evaluate_columns<I, S>(
    instances: &[Instance],
    column_types: I,
    config: EvalConfig,
) -> Result<ColumnTaskResults, EvaluationError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let vocabulary = Vocabulary::new(column_types)?;
    ColumnTaskResults::compute(instances, &vocabulary, &config)
}
