//! Loaded classifier: a validated document turned into a scorer.

use crate::common::error::DashResult;
use crate::inference::domain::Classifier;

use super::domain::{ModelBody, ModelDocument, ModelKind, OutputTransform};
use super::linear::LinearModel;
use super::tree::Forest;

#[derive(Clone, Debug)]
enum Scorer {
    Linear(LinearModel),
    Forest(Forest),
}

/// Binary classifier backed by a linear model or a tree ensemble.
#[derive(Clone, Debug)]
pub struct TabularModel {
    num_features: usize,
    feature_names: Option<Vec<String>>,
    transform: OutputTransform,
    scorer: Scorer,
}

impl TabularModel {
    pub fn from_document(doc: ModelDocument) -> DashResult<Self> {
        doc.validate()?;
        let scorer = match doc.model {
            ModelBody::Linear { weights, intercept } => {
                Scorer::Linear(LinearModel::new(weights, intercept))
            }
            ModelBody::Gbdt { trees, base_score } => Scorer::Forest(Forest::new(trees, base_score)),
        };
        Ok(Self {
            num_features: doc.num_features,
            feature_names: doc.feature_names,
            transform: doc.output_transform,
            scorer,
        })
    }

    fn raw_score(&self, row: &[f64]) -> f64 {
        match &self.scorer {
            Scorer::Linear(model) => model.margin(row),
            Scorer::Forest(forest) => forest.raw_score(row),
        }
    }
}

impl Classifier for TabularModel {
    fn kind(&self) -> ModelKind {
        match self.scorer {
            Scorer::Linear(_) => ModelKind::Linear,
            Scorer::Forest(_) => ModelKind::GradientBoosting,
        }
    }

    fn num_features(&self) -> usize {
        self.num_features
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict(&self, row: &[f64]) -> u8 {
        u8::from(self.raw_score(row) > 0.0)
    }

    fn predict_proba(&self, row: &[f64]) -> Option<[f64; 2]> {
        match self.transform {
            OutputTransform::Identity => None,
            OutputTransform::Sigmoid => {
                let p = sigmoid(self.raw_score(row));
                Some([1.0 - p, p])
            }
        }
    }
}

/// Numerically stable logistic function.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let ez = z.exp();
        ez / (1.0 + ez)
    }
}
