// Domain layer: the manifest model and the ports operations are written against.

pub mod model;
pub mod ports;
