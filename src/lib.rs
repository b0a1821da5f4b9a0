pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{JsonEncoder, LocalFs, YamlEncoder};
pub use crate::config::toml_config::ToolConfig;
pub use crate::core::{
    fingerprint::{fingerprint, Fingerprint},
    lock::ManifestLock,
    operations::ManifestService,
    pipeline::modify_document,
    uniqueness::{validate_name_uniqueness, EntityKind, ValidationIssue},
};
pub use crate::domain::model::{Document, Module, PropertyMap, ProvidedService, RequiredDependency, Resource};
pub use crate::utils::error::{MtaError, Result};
