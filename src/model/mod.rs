//! Model domain: the serialized classifier, its native scorers, and the
//! download-if-missing repository.

pub mod domain;
pub mod fetch;
pub mod linear;
pub mod repo_fs;
pub mod runtime;
pub mod tree;

pub use domain::{ModelDocument, ModelKind, OutputTransform};
pub use repo_fs::{FsModelRepo, LoadedModel, ModelRepo};
pub use runtime::TabularModel;
