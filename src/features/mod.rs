//! Feature domain: the feature-list artifact, prefix grouping and one-hot encoding.

pub mod domain;
pub mod repo_fs;
pub mod service;

pub use domain::{FeatureGroup, FeatureGroups, FeatureList, InputVector, Selections};
