/*
 * This modules contains the `EvalConfig` struct, which implements the default trait, and its
 * builder. The config is passed to `ColumnTaskResults::compute` to simplify its arguments.
*/
use crate::metrics::DivByZeroStrat;
use either::Either as LeftOrRight;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Largest number of columns the missing column search is allowed to insert in a single table.
pub const DEFAULT_MAX_ADJUSTMENT: usize = 3;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default)]
/// Config struct used to simplify the inputs of parameters of the evaluation. It implements the
/// default trait and can be deserialized, missing fields taking their default value.
pub struct EvalConfig {
    /// Maximum number of `MISSING` columns the search inserts in a single table. Tables missing
    /// more columns than this are only partially adjusted and a warning is logged.
    max_adjustment: usize,
    /// This parameter describe what to do when we encounter a division by zero when computing
    /// precision and recall. The most common solution is to replace the results by 0.
    zero_division: DivByZeroStrat,
    /// Can we use multiple cores to align the tables? This option should be benched. The results
    /// are identical either way.
    parallel: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_adjustment: DEFAULT_MAX_ADJUSTMENT,
            zero_division: DivByZeroStrat::ReplaceBy0,
            parallel: false,
        }
    }
}

impl EvalConfig {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn max_adjustment(&self) -> usize {
        self.max_adjustment
    }
    pub fn zero_division(&self) -> DivByZeroStrat {
        self.zero_division
    }
    pub fn parallel(&self) -> bool {
        self.parallel
    }
}

impl From<(usize, DivByZeroStrat, bool)> for EvalConfig {
    fn from(value: (usize, DivByZeroStrat, bool)) -> Self {
        Self {
            max_adjustment: value.0,
            zero_division: value.1,
            parallel: value.2,
        }
    }
}

impl From<EvalConfig> for (usize, DivByZeroStrat, bool) {
    fn from(value: EvalConfig) -> Self {
        (value.max_adjustment, value.zero_division, value.parallel)
    }
}

impl<ZeroDiv> From<EvalConfigBuilder<ZeroDiv>> for EvalConfig
where
    ZeroDiv: Into<DivByZeroStrat>,
{
    fn from(value: EvalConfigBuilder<ZeroDiv>) -> Self {
        Self {
            max_adjustment: value.max_adjustment,
            zero_division: value.zero_division.either_into(),
            parallel: value.parallel,
        }
    }
}

impl Display for EvalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let string = format!("Maximum number of inserted columns: {}\n Strategy when encountering a division by zero: {:?}\n Using parallel computations: {}", self.max_adjustment, self.zero_division, self.parallel);
        write!(f, "{}", string)
    }
}

/// This builder can be used to build and customize an `EvalConfig` stucture.
pub struct EvalConfigBuilder<ZeroDiv>
where
    ZeroDiv: Into<DivByZeroStrat>,
{
    max_adjustment: usize,
    zero_division: LeftOrRight<ZeroDiv, DivByZeroStrat>,
    parallel: bool,
}

impl Default for EvalConfigBuilder<DivByZeroStrat> {
    fn default() -> Self {
        Self::new()
    }
}

impl<ZeroDiv> EvalConfigBuilder<ZeroDiv>
where
    ZeroDiv: Into<DivByZeroStrat>,
{
    pub fn max_adjustment(mut self, max_adjustment: usize) -> Self {
        self.max_adjustment = max_adjustment;
        self
    }
    pub fn division_by_zero(mut self, division_by_zero: ZeroDiv) -> Self {
        self.zero_division = LeftOrRight::Left(division_by_zero);
        self
    }
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
    pub fn new() -> Self {
        Self {
            max_adjustment: DEFAULT_MAX_ADJUSTMENT,
            zero_division: LeftOrRight::Right(DivByZeroStrat::ReplaceBy0),
            parallel: false,
        }
    }
    pub fn build(self) -> EvalConfig {
        EvalConfig::from(self)
    }
}
