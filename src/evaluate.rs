/**
Evaluation of a whole run. Every table is aligned twice (padded and adjusted by the missing
column search), both families are flattened into pools and every pool gets its classification
report.
*/
use crate::align::AlignmentError;
use crate::config::EvalConfig;
use crate::flatten::{FamilyAccumulator, FamilyReport};
use crate::instance::{Column, Instance, InstanceError};
use crate::metrics::{ComputationError, DivByZeroStrat};
use crate::search::{InstanceAlignment, MissingColumnSearch};
use crate::vocabulary::{EmptyVocabularyError, Vocabulary};
use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq)]
/// Every failure that can abort an evaluation.
pub enum EvaluationError {
    Instance(InstanceError),
    Alignment(AlignmentError),
    Computation(ComputationError),
    Vocabulary(EmptyVocabularyError),
}

impl Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(e) => std::fmt::Display::fmt(e, f),
            Self::Alignment(e) => std::fmt::Display::fmt(e, f),
            Self::Computation(e) => std::fmt::Display::fmt(e, f),
            Self::Vocabulary(e) => std::fmt::Display::fmt(e, f),
        }
    }
}

impl Error for EvaluationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Instance(e) => Some(e),
            Self::Alignment(e) => Some(e),
            Self::Computation(e) => Some(e),
            Self::Vocabulary(e) => Some(e),
        }
    }
}

impl From<InstanceError> for EvaluationError {
    fn from(value: InstanceError) -> Self {
        Self::Instance(value)
    }
}

impl From<AlignmentError> for EvaluationError {
    fn from(value: AlignmentError) -> Self {
        Self::Alignment(value)
    }
}

impl From<ComputationError> for EvaluationError {
    fn from(value: ComputationError) -> Self {
        Self::Computation(value)
    }
}

impl From<EmptyVocabularyError> for EvaluationError {
    fn from(value: EmptyVocabularyError) -> Self {
        Self::Vocabulary(value)
    }
}

/// Number of true columns with a label and without one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnnotatedColumns {
    pub scored: usize,
    pub unscored: usize,
}

/// Results of the column type evaluation of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnTaskResults {
    num_columns_deviations: Vec<isize>,
    num_tables_with_column_at_idx: BTreeMap<usize, usize>,
    annotated_columns: AnnotatedColumns,
    padded: FamilyReport,
    missing_column_adjusted: FamilyReport,
    not_even_a_column_type: Vec<String>,
    clamped_instances: Vec<usize>,
}

type ZippedInstance<'a> = (Vec<Column<'a>>, Vec<&'a str>);
type AlignedInstance<'a> = (InstanceAlignment<'a>, InstanceAlignment<'a>);

fn zip_instance(index: usize, instance: &Instance) -> Result<ZippedInstance<'_>, InstanceError> {
    debug!("TRUE: {:?}", instance.true_labels);
    debug!("PRED: {:?}", instance.predicted_labels);
    Ok((instance.columns(index)?, instance.predicted()))
}

fn align_instance<'a>(
    search: &MissingColumnSearch,
    (columns, predicted): &ZippedInstance<'a>,
) -> Result<AlignedInstance<'a>, AlignmentError> {
    let padded = InstanceAlignment::padded(columns, predicted)?;
    let adjusted = search.align(columns, predicted)?;
    Ok((padded, adjusted))
}

impl ColumnTaskResults {
    /// Evaluates the predicted column types of every instance.
    ///
    /// * `instances`: Tables to evaluate.
    /// * `vocabulary`: Column types reported on. Predictions outside of it are simply wrong.
    /// * `config`: Maximum adjustment, division by zero strategy and parallelism.
    pub fn compute(
        instances: &[Instance],
        vocabulary: &Vocabulary,
        config: &EvalConfig,
    ) -> Result<Self, EvaluationError> {
        let (max_adjustment, zero_division, parallel): (usize, DivByZeroStrat, bool) =
            (*config).into();
        let search = MissingColumnSearch::new(max_adjustment);
        // Malformed instances are reported in input order, whatever the parallelism.
        let zipped = instances
            .iter()
            .enumerate()
            .map(|(i, instance)| zip_instance(i, instance))
            .collect::<Result<Vec<_>, _>>()?;
        let alignments: Vec<AlignedInstance> = if parallel {
            zipped
                .par_iter()
                .map(|instance| align_instance(&search, instance))
                .collect::<Result<_, _>>()?
        } else {
            zipped
                .iter()
                .map(|instance| align_instance(&search, instance))
                .collect::<Result<_, _>>()?
        };

        let mut padded = FamilyAccumulator::new(vocabulary, true);
        let mut adjusted = FamilyAccumulator::new(vocabulary, false);
        let mut clamped_instances = Vec::new();
        for (i, (padded_alignment, adjusted_alignment)) in alignments.iter().enumerate() {
            padded.absorb(padded_alignment);
            adjusted.absorb(adjusted_alignment);
            if adjusted_alignment.is_clamped() {
                clamped_instances.push(i);
            }
        }

        let annotated_columns = instances
            .iter()
            .flat_map(|instance| instance.true_labels.iter())
            .fold(AnnotatedColumns::default(), |mut acc, label| {
                match label {
                    Some(_) => acc.scored += 1,
                    None => acc.unscored += 1,
                };
                acc
            });

        let results = Self {
            num_columns_deviations: instances.iter().map(Instance::length_deviation).collect(),
            annotated_columns,
            padded: padded.report(zero_division)?,
            missing_column_adjusted: adjusted.report(zero_division)?,
            not_even_a_column_type: padded
                .not_even_a_column_type
                .iter()
                .map(|s| s.to_string())
                .collect(),
            num_tables_with_column_at_idx: padded.num_tables_with_column_at_idx,
            clamped_instances,
        };
        info!(
            "Evaluated {} instances ({} scored columns, {} unscored), {} clamped",
            instances.len(),
            annotated_columns.scored,
            annotated_columns.unscored,
            results.clamped_instances.len()
        );
        info!(
            "Accuracy of the padded tables: {}, of the adjusted tables: {}",
            results.padded.accuracy.accuracy.unwrap_or(0.0),
            results.missing_column_adjusted.accuracy.accuracy.unwrap_or(0.0)
        );
        Ok(results)
    }

    /// Number of predicted columns minus the number of true columns, per instance.
    pub fn num_columns_deviations(&self) -> &[isize] {
        &self.num_columns_deviations
    }

    /// Number of tables having a scored column at each index.
    pub fn num_tables_with_column_at_idx(&self) -> &BTreeMap<usize, usize> {
        &self.num_tables_with_column_at_idx
    }

    pub fn annotated_columns(&self) -> AnnotatedColumns {
        self.annotated_columns
    }

    /// Reports of the tables aligned by padding the predictions.
    pub fn padded(&self) -> &FamilyReport {
        &self.padded
    }

    /// Reports of the tables aligned by the missing column search.
    pub fn missing_column_adjusted(&self) -> &FamilyReport {
        &self.missing_column_adjusted
    }

    /// Predicted values of the padded tables that are not column types, `MISSING` included.
    pub fn not_even_a_column_type(&self) -> &[String] {
        &self.not_even_a_column_type
    }

    /// Instances differing by more columns than the maximum adjustment.
    pub fn clamped_instances(&self) -> &[usize] {
        &self.clamped_instances
    }
}
