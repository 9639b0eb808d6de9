//! Filesystem repository for the classifier artifact, fetched on first use.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use crate::common::config::AppCfg;
use crate::common::error::{DashError, DashResult};
use crate::common::ids::Fingerprint;
use crate::inference::domain::Classifier;

use super::domain::ModelDocument;
use super::fetch;
use super::runtime::TabularModel;

/// Decoded classifier plus the fingerprint of the bytes it came from.
#[derive(Clone, Debug)]
pub struct LoadedModel {
    pub model: TabularModel,
    pub fingerprint: String,
}

/// Repository contract for the classifier artifact.
pub trait ModelRepo {
    fn load_model(&self) -> DashResult<LoadedModel>;
}

/// Model cached at `cfg.model_path()`, downloaded from `cfg.model_url` when absent.
pub struct FsModelRepo {
    path: PathBuf,
    url: String,
    timeout: Duration,
}

impl FsModelRepo {
    pub fn new(cfg: &AppCfg) -> Self {
        Self {
            path: cfg.model_path(),
            url: cfg.model_url.clone(),
            timeout: cfg.fetch_timeout(),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Download the artifact unless it is already on disk. Returns whether a
    /// download happened.
    pub async fn ensure_present(&self) -> DashResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        let client = fetch::client(self.timeout)?;
        fetch::download(&client, &self.url, &self.path).await?;
        Ok(true)
    }
}

impl ModelRepo for FsModelRepo {
    fn load_model(&self) -> DashResult<LoadedModel> {
        let bytes = fs::read(&self.path).map_err(|e| DashError::io(&self.path, e))?;
        let doc: ModelDocument =
            serde_json::from_slice(&bytes).map_err(|source| DashError::Decode {
                path: self.path.clone(),
                source,
            })?;
        let model = TabularModel::from_document(doc)?;
        let fingerprint = Fingerprint::of(&bytes).finish_hex();

        info!(
            path = %self.path.display(),
            kind = model.kind().as_str(),
            num_features = model.num_features(),
            fingerprint = %fingerprint,
            "model loaded"
        );
        Ok(LoadedModel { model, fingerprint })
    }
}
