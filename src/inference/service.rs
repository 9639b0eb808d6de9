//! Inference orchestration: encode the form, check shape, score.

use tracing::debug;

use crate::common::error::DashResult;
use crate::common::time;
use crate::features::domain::{InputVector, Selections};
use crate::features::service::encode;

use super::cache::Artifacts;
use super::domain::{ensure_compatible, Classifier, Prediction, RiskLabel};

/// Score one encoded row. A row that does not fit the classifier fails with a
/// shape error before anything is scored.
pub fn infer(clf: &dyn Classifier, input: &InputVector) -> DashResult<Prediction> {
    let start = time::now_ms();
    ensure_compatible(clf, input)?;

    let row = input.as_row();
    let label = RiskLabel::from_class(clf.predict(&row));
    let confidence = clf.predict_proba(&row).map(|[p0, p1]| p0.max(p1));
    let latency_ms = time::elapsed_ms(start);

    debug!(
        kind = clf.kind().as_str(),
        label = label.class(),
        confidence,
        latency_ms,
        "prediction"
    );
    Ok(Prediction {
        label,
        confidence,
        latency_ms,
    })
}

/// Encode `selections` against the loaded feature list and score the row.
pub fn predict_selections(
    artifacts: &Artifacts,
    selections: &Selections,
) -> DashResult<Prediction> {
    let input = encode(&artifacts.features, &artifacts.groups, selections)?;
    infer(artifacts.model.as_ref(), &input)
}
