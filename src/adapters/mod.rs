// Adapters layer: concrete implementations of the domain ports.

pub mod encoding;
pub mod storage;

pub use encoding::{JsonEncoder, YamlEncoder};
pub use storage::LocalFs;
