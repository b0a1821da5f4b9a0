// Application layer: wires the command surface to the core operations.

#[cfg(feature = "cli")]
pub mod commands;
