// Adapters layer: concrete implementations of the domain ports (delivery time lookup, config sources).

pub mod config;
pub mod http;
pub mod memory;
