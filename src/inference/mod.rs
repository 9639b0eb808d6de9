//! Inference domain: classifier contract, scoring, and the artifact cache.

pub mod cache;
pub mod domain;
pub mod service;

pub use cache::{ArtifactStore, Artifacts};
pub use domain::{Classifier, Prediction, RiskLabel};
