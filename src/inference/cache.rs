//! Process-lifetime cache of the loaded artifacts.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::common::config::AppCfg;
use crate::common::error::DashResult;
use crate::features::domain::{FeatureGroups, FeatureList, FeatureRepo};
use crate::features::repo_fs::FsFeatureRepo;
use crate::features::service::group_features;
use crate::model::repo_fs::{FsModelRepo, ModelRepo};

use super::domain::Classifier;

/// Everything a request needs, read-only once built.
pub struct Artifacts {
    pub features: FeatureList,
    pub groups: FeatureGroups,
    pub model: Arc<dyn Classifier>,
    pub model_fingerprint: String,
}

impl Artifacts {
    pub fn new(
        features: FeatureList,
        model: Arc<dyn Classifier>,
        model_fingerprint: String,
    ) -> Self {
        let groups = group_features(features.iter());
        if model.num_features() != features.len() {
            warn!(
                model = model.num_features(),
                features = features.len(),
                "feature list and model disagree on width; predictions will fail"
            );
        }
        Self {
            features,
            groups,
            model,
            model_fingerprint,
        }
    }

    /// Fetch the model if it is not cached, then read both artifacts.
    pub async fn load(cfg: &AppCfg) -> DashResult<Self> {
        let model_repo = FsModelRepo::new(cfg);
        model_repo.ensure_present().await?;
        let loaded = model_repo.load_model()?;
        let features = FsFeatureRepo::new(cfg).load_features()?;

        let artifacts = Self::new(features, Arc::new(loaded.model), loaded.fingerprint);
        info!(
            features = artifacts.features.len(),
            groups = artifacts.groups.len(),
            "artifacts ready"
        );
        Ok(artifacts)
    }
}

/// Memoizes [`Artifacts::load`] on first use. A failed load is not cached.
pub struct ArtifactStore {
    cfg: AppCfg,
    cell: OnceCell<Arc<Artifacts>>,
}

impl ArtifactStore {
    pub fn new(cfg: AppCfg) -> Self {
        Self {
            cfg,
            cell: OnceCell::new(),
        }
    }

    /// Store that already holds `artifacts`; nothing is read from disk.
    pub fn preloaded(cfg: AppCfg, artifacts: Artifacts) -> Self {
        Self {
            cfg,
            cell: OnceCell::new_with(Some(Arc::new(artifacts))),
        }
    }

    pub async fn get(&self) -> DashResult<Arc<Artifacts>> {
        self.cell
            .get_or_try_init(|| async { Artifacts::load(&self.cfg).await.map(Arc::new) })
            .await
            .cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}
