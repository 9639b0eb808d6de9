//! Server-rendered markup for the dashboard page.

use crate::common::error::DashError;
use crate::common::html::escape;
use crate::features::domain::{FeatureGroup, Selections, PLACEHOLDER};
use crate::inference::cache::Artifacts;
use crate::inference::domain::{Prediction, RiskLabel};

/// Prefix of the form fields that carry group choices.
pub const FIELD_PREFIX: &str = "sb_";

/// Form field name carrying the choice for `group`.
pub fn field_name(group: &str) -> String {
    format!("{FIELD_PREFIX}{group}")
}

/// What the result panel shows.
pub enum Outcome<'a> {
    /// Nothing submitted yet.
    Pending,
    Scored(&'a Prediction),
    Failed(&'a DashError),
}

const TITLE: &str = "Credit Risk Prediction";

const STYLE: &str = r#"
body { font-family: 'Inter', sans-serif; background-color: #f8f9fa; margin: 0; color: #1f2937; }
.layout { display: flex; min-height: 100vh; }
.sidebar { width: 260px; padding: 1.5rem; background: #eef1f6; }
.main { flex: 1; padding: 2rem; }
.hero { padding: 2rem; border-radius: 20px; background: linear-gradient(135deg, #1e3a8a 0%, #3b82f6 100%); color: white; margin-bottom: 2rem; }
.hero h1 { margin: 0; color: white; }
.hero p { opacity: 0.9; }
.columns { display: flex; gap: 2rem; }
.form-col { flex: 1.4; }
.result-col { flex: 1; }
.card { padding: 1.5rem; border-radius: 15px; background: white; box-shadow: 0 4px 12px rgba(0,0,0,0.05); margin-bottom: 1rem; }
.form-grid { display: flex; gap: 1rem; }
.form-grid > div { flex: 1; }
details { margin-bottom: 0.75rem; border: 1px solid #e5e7eb; border-radius: 8px; padding: 0.5rem 0.75rem; }
select { width: 100%; padding: 0.4rem; }
button { width: 100%; padding: 0.7rem; border: 0; border-radius: 8px; background: #ef4444; color: white; font-weight: 700; cursor: pointer; }
.info, .ok, .bad { padding: 0.8rem 1rem; border-radius: 8px; margin-bottom: 0.75rem; }
.info { background: #e0ecff; }
.ok { background: #dcfce7; }
.bad { background: #fee2e2; }
.metric-value { font-size: 2rem; font-weight: 700; }
progress { width: 100%; height: 0.8rem; }
footer { margin-top: 2rem; color: #6b7280; font-size: 0.8rem; }
"#;

/// Full page for loaded artifacts.
pub fn page(artifacts: &Artifacts, selections: &Selections, outcome: Outcome<'_>) -> String {
    let mut body = String::new();
    body.push_str(&sidebar(Some(artifacts)));
    body.push_str("<main class=\"main\">");
    body.push_str(HERO);
    body.push_str("<div class=\"columns\"><section class=\"form-col\">");
    body.push_str(&form(artifacts, selections));
    body.push_str("</section><section class=\"result-col\">");
    body.push_str(&result_panel(&outcome));
    body.push_str("</section></div>");
    body.push_str(FOOTER);
    body.push_str("</main>");
    document(&body)
}

/// Page shown when the artifacts could not be loaded.
pub fn unavailable(err: &DashError) -> String {
    let mut body = String::new();
    body.push_str(&sidebar(None));
    body.push_str("<main class=\"main\">");
    body.push_str(HERO);
    body.push_str(&format!(
        "<div class=\"bad\">Artifacts unavailable: {}</div>",
        escape(&err.to_string())
    ));
    body.push_str(FOOTER);
    body.push_str("</main>");
    document(&body)
}

const HERO: &str = "<div class=\"hero\"><h1>💳 Credit Prediction Dashboard</h1>\
<p>Smart analysis of applicant loan eligibility</p></div>";

const FOOTER: &str =
    "<footer>© 2026 Credit Risk Intelligence System | Amartha Dataset Analysis</footer>";

fn document(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>{TITLE}</title><style>{STYLE}</style></head>\
<body><div class=\"layout\">{body}</div></body></html>\n"
    )
}

fn sidebar(artifacts: Option<&Artifacts>) -> String {
    let status = match artifacts {
        Some(art) => format!(
            "<div class=\"ok\">Model: Ready ({} · {})</div>\
<div class=\"ok\">Features: Ready ({} in {} groups)</div>",
            art.model.kind().as_str(),
            escape(&art.model_fingerprint),
            art.features.len(),
            art.groups.len()
        ),
        None => "<div class=\"bad\">Model: Unavailable</div>\
<div class=\"bad\">Features: Unavailable</div>"
            .to_string(),
    };
    format!(
        "<aside class=\"sidebar\"><h2>📌 Main Menu</h2>\
<div class=\"info\">This system predicts the credit risk of Amartha customers.</div><hr>\
<h3>🛠️ System Status</h3>{status}</aside>"
    )
}

fn form(artifacts: &Artifacts, selections: &Selections) -> String {
    let (left, right) = artifacts.groups.split_columns();
    format!(
        "<div class=\"card\"><h2>📋 Applicant Data Form</h2>\
<form method=\"post\" action=\"/\"><div class=\"form-grid\"><div>{}</div><div>{}</div></div>\
<button type=\"submit\">🔍 Run AI Analysis</button></form></div>",
        group_fields(left, selections),
        group_fields(right, selections)
    )
}

fn group_fields(groups: &[FeatureGroup], selections: &Selections) -> String {
    let mut out = String::new();
    for group in groups {
        let key = escape(&group.key);
        let chosen = selections.get(&group.key);
        out.push_str(&format!(
            "<details open><summary>📍 {key}</summary>\
<select name=\"{}\" aria-label=\"Select {key}\"><option value=\"\">{PLACEHOLDER}</option>",
            escape(&field_name(&group.key))
        ));
        for feature in &group.features {
            let selected = if chosen == Some(feature.as_str()) {
                " selected"
            } else {
                ""
            };
            let feature = escape(feature);
            out.push_str(&format!(
                "<option value=\"{feature}\"{selected}>{feature}</option>"
            ));
        }
        out.push_str("</select></details>");
    }
    out
}

fn result_panel(outcome: &Outcome<'_>) -> String {
    let inner = match outcome {
        Outcome::Pending => {
            "<div class=\"info\">Complete the form to start the analysis.</div>".to_string()
        }
        Outcome::Scored(prediction) => verdict(prediction),
        Outcome::Failed(err) => format!(
            "<div class=\"card\"><div class=\"bad\">Prediction failed: {}</div></div>",
            escape(&err.to_string())
        ),
    };
    format!("<h2>📊 Analysis Result</h2>{inner}")
}

fn verdict(prediction: &Prediction) -> String {
    let (class, icon) = match prediction.label {
        RiskLabel::Low => ("ok", "✅"),
        RiskLabel::High => ("bad", "❌"),
    };
    let mut out = format!(
        "<div class=\"card\"><div class=\"{class}\"><h3>{icon} RESULT: {}</h3></div><p>{}</p>",
        prediction.label.headline(),
        prediction.label.message()
    );
    if let (Some(confidence), Some(pct)) = (prediction.confidence, prediction.confidence_pct()) {
        out.push_str(&format!(
            "<hr><div class=\"metric\"><div>AI Confidence Level</div>\
<div class=\"metric-value\">{pct}</div></div>\
<progress value=\"{confidence:.4}\" max=\"1\">{pct}</progress>"
        ));
    }
    out.push_str("</div>");
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::features::domain::FeatureList;
    use crate::model::domain::{ModelBody, ModelDocument, OutputTransform};
    use crate::model::runtime::TabularModel;

    fn artifacts() -> Artifacts {
        let model = TabularModel::from_document(ModelDocument {
            num_features: 4,
            feature_names: None,
            output_transform: OutputTransform::Sigmoid,
            model: ModelBody::Linear {
                weights: vec![0.0; 4],
                intercept: 0.0,
            },
        })
        .unwrap();
        Artifacts::new(
            FeatureList::new(["age_young", "age_old", "income_high", "job_<script>"]),
            Arc::new(model),
            "deadbeef".to_string(),
        )
    }

    #[test]
    fn pending_page_lists_every_group_and_option() {
        let html = page(&artifacts(), &Selections::none(), Outcome::Pending);
        assert!(html.contains("name=\"sb_age\""));
        assert!(html.contains("name=\"sb_income\""));
        assert!(html.contains("<option value=\"age_old\">age_old</option>"));
        assert!(html.contains("Complete the form to start the analysis."));
        assert!(html.contains("deadbeef"));
    }

    #[test]
    fn feature_names_are_escaped() {
        let html = page(&artifacts(), &Selections::none(), Outcome::Pending);
        assert!(html.contains("job_&lt;script&gt;"));
        assert!(!html.contains("job_<script>"));
    }

    #[test]
    fn previous_choice_stays_selected() {
        let sel = Selections::none().with("age", "age_old");
        let html = page(&artifacts(), &sel, Outcome::Pending);
        assert!(html.contains("<option value=\"age_old\" selected>age_old</option>"));
        assert!(html.contains("<option value=\"age_young\">age_young</option>"));
    }

    #[test]
    fn scored_outcome_shows_verdict_and_confidence() {
        let prediction = Prediction {
            label: RiskLabel::High,
            confidence: Some(0.9123),
            latency_ms: 1,
        };
        let html = page(
            &artifacts(),
            &Selections::none(),
            Outcome::Scored(&prediction),
        );
        assert!(html.contains("RESULT: DEFAULT RISK"));
        assert!(html.contains("91.23%"));
        assert!(html.contains("<progress value=\"0.9123\""));
    }

    #[test]
    fn verdict_without_confidence_has_no_meter() {
        let prediction = Prediction {
            label: RiskLabel::Low,
            confidence: None,
            latency_ms: 1,
        };
        let html = verdict(&prediction);
        assert!(html.contains("RESULT: PERFORMING"));
        assert!(!html.contains("<progress"));
    }

    #[test]
    fn unavailable_page_shows_the_error() {
        let err = DashError::FeaturesMissing("data/features.json".into());
        let html = unavailable(&err);
        assert!(html.contains("feature list not found at data/features.json"));
        assert!(html.contains("Model: Unavailable"));
    }
}
