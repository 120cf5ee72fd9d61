// Domain layer: core models and ports (interfaces). Adapters live under src/adapters and src/config.

pub mod model;
pub mod ports;
