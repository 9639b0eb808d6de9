// lib.rs - dashboard core: artifacts, grouping, encoding, scoring, page
pub mod api;
pub mod common;
pub mod features;
pub mod inference;
pub mod model;

pub use common::{DashError, DashResult};
pub use inference::{ArtifactStore, Artifacts};
