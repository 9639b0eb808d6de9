//! Domain definitions for classifiers, predictions and verdicts.

use serde::Serialize;

use crate::common::error::{DashError, DashResult};
use crate::features::domain::InputVector;
use crate::model::domain::ModelKind;

/// A binary classifier over a fixed-width numeric row.
pub trait Classifier: Send + Sync {
    fn kind(&self) -> ModelKind;

    /// Width of the row the classifier was trained on.
    fn num_features(&self) -> usize;

    /// Column names in training order, when known.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Class label (0 or 1) for a row of `num_features` values.
    fn predict(&self, row: &[f64]) -> u8;

    /// `[p(0), p(1)]` when the classifier estimates probabilities.
    fn predict_proba(&self, _row: &[f64]) -> Option<[f64; 2]> {
        None
    }
}

/// Fail with a shape error unless `input` has the width, and when recorded the
/// column order, the classifier was trained on.
pub fn ensure_compatible(clf: &dyn Classifier, input: &InputVector) -> DashResult<()> {
    if clf.num_features() != input.len() {
        return Err(DashError::ShapeMismatch {
            expected: clf.num_features(),
            got: input.len(),
        });
    }
    if let Some(names) = clf.feature_names() {
        let mismatch = names
            .iter()
            .zip(input.columns())
            .enumerate()
            .find(|(_, (expected, got))| expected != got);
        if let Some((index, (expected, got))) = mismatch {
            return Err(DashError::ColumnOrder {
                index,
                expected: expected.clone(),
                got: got.clone(),
            });
        }
    }
    Ok(())
}

/// Credit risk verdict for class labels 0 and 1.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    Low,
    High,
}

impl RiskLabel {
    pub fn from_class(class: u8) -> Self {
        if class == 0 {
            RiskLabel::Low
        } else {
            RiskLabel::High
        }
    }

    pub fn class(&self) -> u8 {
        match self {
            RiskLabel::Low => 0,
            RiskLabel::High => 1,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            RiskLabel::Low => "PERFORMING",
            RiskLabel::High => "DEFAULT RISK",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RiskLabel::Low => "Applicant is considered safe to receive a loan.",
            RiskLabel::High => "Warning: high risk of payment default detected.",
        }
    }
}

/// Result of a single inference call.
#[derive(Clone, Debug)]
pub struct Prediction {
    pub label: RiskLabel,
    /// Highest class probability, when the classifier provides one.
    pub confidence: Option<f64>,
    pub latency_ms: u32,
}

impl Prediction {
    /// Confidence as a percentage with two decimals, e.g. `87.50%`.
    pub fn confidence_pct(&self) -> Option<String> {
        self.confidence.map(|c| format!("{:.2}%", c * 100.0))
    }
}
