// Domain layer: generation models and ports (interfaces). No parsing or I/O here.

pub mod model;
pub mod ports;
