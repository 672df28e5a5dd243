//! Confusion counts and the Matthews correlation coefficient.

use crate::data::{ComparisonRecord, Outcome};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Confusion matrix over a batch of boolean comparisons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionCounts {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl ConfusionCounts {
    pub fn new(tp: usize, fp: usize, tn: usize, fn_: usize) -> Self {
        Self {
            true_positives: tp,
            false_positives: fp,
            true_negatives: tn,
            false_negatives: fn_,
        }
    }

    /// Count one outcome.
    pub fn add(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::TruePositive => self.true_positives += 1,
            Outcome::FalsePositive => self.false_positives += 1,
            Outcome::TrueNegative => self.true_negatives += 1,
            Outcome::FalseNegative => self.false_negatives += 1,
        }
    }

    pub fn from_outcomes<I: IntoIterator<Item = Outcome>>(outcomes: I) -> Self {
        let mut counts = Self::default();
        outcomes.into_iter().for_each(|o| counts.add(o));
        counts
    }

    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ComparisonRecord>,
    {
        Self::from_outcomes(records.into_iter().map(ComparisonRecord::outcome))
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// Matthews correlation coefficient.
    ///
    /// Returns exactly 0.0 when any marginal sum is zero.
    pub fn mcc(&self) -> f64 {
        let tp = self.true_positives as f64;
        let fp = self.false_positives as f64;
        let tn = self.true_negatives as f64;
        let fn_ = self.false_negatives as f64;

        let denominator = (tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_);
        if denominator == 0.0 {
            return 0.0;
        }
        (tp * tn - fp * fn_) / denominator.sqrt()
    }

    /// Sensitivity = TP / (TP + FN).
    pub fn sensitivity(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    /// Specificity = TN / (TN + FP).
    pub fn specificity(&self) -> f64 {
        ratio(self.true_negatives, self.true_negatives + self.false_positives)
    }

    /// Precision = TP / (TP + FP).
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// Fraction of comparisons where prediction matched observation.
    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den > 0 {
        num as f64 / den as f64
    } else {
        0.0
    }
}

impl AddAssign for ConfusionCounts {
    fn add_assign(&mut self, other: Self) {
        self.true_positives += other.true_positives;
        self.false_positives += other.false_positives;
        self.true_negatives += other.true_negatives;
        self.false_negatives += other.false_negatives;
    }
}

impl std::fmt::Display for ConfusionCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TP: {}, FP: {}, TN: {}, FN: {} (MCC {:.3})",
            self.true_positives,
            self.false_positives,
            self.true_negatives,
            self.false_negatives,
            self.mcc()
        )
    }
}
