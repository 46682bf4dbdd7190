//! Bidirectional mapping between prefixed environment variables and a
//! hierarchical configuration tree.
//!
//! Variables such as `MYAPP_DB_1_USER=admin` belong to the domain `myapp`
//! and decode to the dotted path `db.1.user`. A [`Registry`] merges every
//! such variable into one nested [`Value`], answers lookups by path, and
//! writes new values back so child processes see them as variables.
//!
//! ```
//! use envtree::{MemoryEnv, Registry, Value};
//!
//! let env = MemoryEnv::from_pairs([("MYAPP_DB_1_USER", "admin")]);
//! let registry = Registry::builder("myapp").store(env).build()?;
//!
//! let user = registry.param("db.1.user");
//! assert_eq!(user.as_ref().and_then(Value::as_str), Some("admin"));
//! assert!(registry.param("nope.nope").is_none());
//! # Ok::<_, envtree::EnvTreeError>(())
//! ```

pub mod codec;
mod domain;
mod error;
mod path;
mod registry;
mod scope;
mod store;
mod value;

pub use domain::Domain;
pub use error::{EnvTreeError, EnvTreeResult};
pub use path::ConfigPath;
pub use registry::{EnvSnapshot, Registry, RegistryBuilder, RegistryOptions};
pub use scope::Scope;
pub use store::{EnvStore, MemoryEnv, ProcessEnv};
pub use value::Value;
