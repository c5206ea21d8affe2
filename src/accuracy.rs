/**
Running tally of correct and incorrect outcomes. It is the objective function of the missing
column search and the unit in which per-instance accuracies are summed up.
*/
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Number of correct and incorrect outcomes seen so far.
pub struct Accuracy {
    pub(crate) correct: usize,
    pub(crate) incorrect: usize,
}

impl Accuracy {
    pub fn new(correct: usize, incorrect: usize) -> Self {
        Self { correct, incorrect }
    }

    /// An accuracy without any recorded outcome.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Include a single outcome.
    pub fn record(&mut self, is_match: bool) {
        if is_match {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn incorrect(&self) -> usize {
        self.incorrect
    }

    pub fn total(&self) -> usize {
        self.correct + self.incorrect
    }

    /// Fraction of correct outcomes. There is no score without any outcome, so `None` is
    /// returned for an empty tally.
    pub fn score(&self) -> Option<f32> {
        match self.total() {
            0 => None,
            total => Some(self.correct as f32 / total as f32),
        }
    }

    /// Pointwise sum of two tallies.
    pub fn merge(self, other: Self) -> Self {
        Self {
            correct: self.correct + other.correct,
            incorrect: self.incorrect + other.incorrect,
        }
    }

    /// Is the accuracy of `self` strictly greater than the accuracy of `other`? The comparison
    /// is made on the exact fractions. An empty tally is never better than anything.
    pub fn is_better_than(&self, other: &Self) -> bool {
        match (self.total(), other.total()) {
            (0, _) => false,
            (_, 0) => true,
            (total, other_total) => {
                (self.correct as u128) * (other_total as u128)
                    > (other.correct as u128) * (total as u128)
            }
        }
    }

    pub fn report(&self) -> AccuracyReport {
        AccuracyReport {
            correct: self.correct,
            incorrect: self.incorrect,
            accuracy: self.score(),
        }
    }
}

impl Add for Accuracy {
    type Output = Accuracy;
    fn add(self, rhs: Self) -> Self::Output {
        self.merge(rhs)
    }
}

impl AddAssign for Accuracy {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.merge(rhs)
    }
}

impl Sum for Accuracy {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Accuracy::empty(), Accuracy::merge)
    }
}

impl Display for Accuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.score() {
            Some(score) => write!(f, "{}/{} ({})", self.correct, self.total(), score),
            None => write!(f, "0/0"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Flat view of an `Accuracy`, convenient for serialization.
pub struct AccuracyReport {
    pub correct: usize,
    pub incorrect: usize,
    pub accuracy: Option<f32>,
}
