pub mod document;
pub mod fingerprint;
pub mod lock;
pub mod operations;
pub mod pipeline;
pub mod uniqueness;

pub use crate::domain::model::{Document, Module, ProvidedService, Resource};
pub use crate::domain::ports::{Encoder, FileSystem};
pub use crate::utils::error::Result;
