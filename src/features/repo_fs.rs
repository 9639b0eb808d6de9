//! Filesystem-backed repository for the feature-list artifact.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::common::config::AppCfg;
use crate::common::error::{DashError, DashResult};
use crate::common::ids::Fingerprint;

use super::domain::{FeatureList, FeatureRepo};

/// Reads the JSON feature list at `cfg.features_path()`.
pub struct FsFeatureRepo {
    path: PathBuf,
}

impl FsFeatureRepo {
    pub fn new(cfg: &AppCfg) -> Self {
        Self::at(cfg.features_path())
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl FeatureRepo for FsFeatureRepo {
    fn load_features(&self) -> DashResult<FeatureList> {
        if !self.path.exists() {
            return Err(DashError::FeaturesMissing(self.path.clone()));
        }
        let bytes = fs::read(&self.path).map_err(|e| DashError::io(&self.path, e))?;
        let features: FeatureList =
            serde_json::from_slice(&bytes).map_err(|source| DashError::Decode {
                path: self.path.clone(),
                source,
            })?;

        if let Some(dup) = features.first_duplicate() {
            return Err(DashError::InvalidFeatures(format!(
                "`{dup}` is listed more than once"
            )));
        }

        info!(
            path = %self.path.display(),
            count = features.len(),
            fingerprint = %Fingerprint::of(&bytes).finish_hex(),
            "feature list loaded"
        );
        Ok(features)
    }
}
