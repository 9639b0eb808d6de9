//! Serialized classifier document and its structural checks.
//!
//! The document is decoded with `serde_json` and validated once on load, so the
//! runtime scorers can index without bounds surprises:
//!
//! ```json
//! {
//!   "num_features": 3,
//!   "feature_names": ["age_young", "age_old", "income_high"],
//!   "output_transform": "sigmoid",
//!   "model": { "type": "linear", "weights": [0.4, -1.2, 0.9], "intercept": -0.1 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::common::error::{DashError, DashResult};

/// Supported model families.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ModelKind {
    Linear,
    GradientBoosting,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Linear => "linear",
            ModelKind::GradientBoosting => "gbdt",
        }
    }
}

/// Mapping applied to the raw score before it is read as a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputTransform {
    /// Raw margin; the model gives labels only.
    Identity,
    /// Logistic link; the model gives class probabilities.
    Sigmoid,
}

/// Top-level model document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDocument {
    /// Width of the input row.
    pub num_features: usize,
    /// Column names in training order, when the exporter recorded them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    pub output_transform: OutputTransform,
    pub model: ModelBody,
}

/// Family-specific parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelBody {
    Linear {
        weights: Vec<f64>,
        #[serde(default)]
        intercept: f64,
    },
    Gbdt {
        trees: Vec<TreeSchema>,
        #[serde(default)]
        base_score: f64,
    },
}

/// One regression tree in struct-of-arrays layout.
///
/// Every array has one entry per node. Node 0 is the root. A node whose
/// children are both 0 is a leaf; otherwise both children point forward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSchema {
    pub split_indices: Vec<u32>,
    pub thresholds: Vec<f64>,
    pub children_left: Vec<u32>,
    pub children_right: Vec<u32>,
    /// Direction taken when the split value is missing (NaN).
    pub default_left: Vec<bool>,
    pub leaf_values: Vec<f64>,
}

impl ModelDocument {
    /// Reject documents the runtime could not score safely.
    pub fn validate(&self) -> DashResult<()> {
        if let Some(names) = &self.feature_names {
            if names.len() != self.num_features {
                return Err(DashError::invalid_model(format!(
                    "{} feature names for {} features",
                    names.len(),
                    self.num_features
                )));
            }
        }

        match &self.model {
            ModelBody::Linear { weights, .. } => {
                if weights.len() != self.num_features {
                    return Err(DashError::invalid_model(format!(
                        "{} weights for {} features",
                        weights.len(),
                        self.num_features
                    )));
                }
            }
            ModelBody::Gbdt { trees, .. } => {
                for (idx, tree) in trees.iter().enumerate() {
                    tree.validate(self.num_features)
                        .map_err(|msg| DashError::invalid_model(format!("tree {idx}: {msg}")))?;
                }
            }
        }
        Ok(())
    }
}

impl TreeSchema {
    pub fn num_nodes(&self) -> usize {
        self.leaf_values.len()
    }

    fn validate(&self, num_features: usize) -> Result<(), String> {
        let n = self.num_nodes();
        if n == 0 {
            return Err("no nodes".to_string());
        }
        let lengths = [
            self.split_indices.len(),
            self.thresholds.len(),
            self.children_left.len(),
            self.children_right.len(),
            self.default_left.len(),
        ];
        if lengths.iter().any(|&len| len != n) {
            return Err(format!("node arrays disagree on length {n}"));
        }

        for node in 0..n {
            let (left, right) = (
                self.children_left[node] as usize,
                self.children_right[node] as usize,
            );
            match (left, right) {
                (0, 0) => continue,
                (0, _) | (_, 0) => return Err(format!("node {node} has a single child")),
                _ if left <= node || right <= node => {
                    return Err(format!("node {node} points backwards"))
                }
                _ if left >= n || right >= n => {
                    return Err(format!("node {node} points past the end"))
                }
                _ => {}
            }
            if self.split_indices[node] as usize >= num_features {
                return Err(format!(
                    "node {node} splits on feature {} of {num_features}",
                    self.split_indices[node]
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(split: u32) -> TreeSchema {
        TreeSchema {
            split_indices: vec![split, 0, 0],
            thresholds: vec![0.5, 0.0, 0.0],
            children_left: vec![1, 0, 0],
            children_right: vec![2, 0, 0],
            default_left: vec![true, false, false],
            leaf_values: vec![0.0, -1.0, 1.0],
        }
    }

    #[test]
    fn decodes_tagged_linear_document() {
        let doc: ModelDocument = serde_json::from_str(
            r#"{
                "num_features": 2,
                "output_transform": "sigmoid",
                "model": {"type": "linear", "weights": [1.0, -1.0], "intercept": 0.25}
            }"#,
        )
        .unwrap();
        assert!(matches!(doc.model, ModelBody::Linear { .. }));
        assert_eq!(doc.output_transform, OutputTransform::Sigmoid);
        assert!(doc.feature_names.is_none());
        doc.validate().unwrap();
    }

    #[test]
    fn weight_count_must_match_width() {
        let doc = ModelDocument {
            num_features: 3,
            feature_names: None,
            output_transform: OutputTransform::Identity,
            model: ModelBody::Linear {
                weights: vec![1.0],
                intercept: 0.0,
            },
        };
        assert!(matches!(doc.validate(), Err(DashError::InvalidModel(_))));
    }

    #[test]
    fn names_must_match_width() {
        let doc = ModelDocument {
            num_features: 1,
            feature_names: Some(vec!["a_x".into(), "a_y".into()]),
            output_transform: OutputTransform::Identity,
            model: ModelBody::Linear {
                weights: vec![1.0],
                intercept: 0.0,
            },
        };
        assert!(doc.validate().is_err());
    }

    #[test]
    fn tree_checks() {
        assert!(stump(0).validate(1).is_ok());
        assert!(stump(4).validate(2).is_err());

        let mut one_child = stump(0);
        one_child.children_left[0] = 0;
        assert!(one_child.validate(1).is_err());

        let mut short = stump(0);
        short.thresholds.pop();
        assert!(short.validate(1).is_err());

        let mut past_end = stump(0);
        past_end.children_right[0] = 7;
        assert!(past_end.validate(1).is_err());
    }
}
