//! Error types produced while building and querying a registry.

mod conversions;
mod types;

pub use types::{EnvTreeError, EnvTreeResult};

#[cfg(test)]
mod tests;
