//! Test helpers shared across the workspace.
//!
//! The [`env`] module provides RAII guards for mutating process environment
//! variables and for isolating every variable under a prefix.

pub mod env;
