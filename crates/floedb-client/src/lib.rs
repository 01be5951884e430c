//! FloeDB client query layer.
//!
//! ## Crate layout
//! - `core`: statement construction, filter/value vocabulary, task-id
//!   assignment, and observability for the query subsystem.
//!
//! A caller builds a [`core::query::Statement`] with the fluent builder,
//! then hands it by value to the execution layer, which prepares it once
//! immediately before building the wire command. The `prelude` module
//! mirrors the vocabulary used at call sites.

pub use floedb_client_core as core;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use floedb_client_core::{error, obs, query, value};

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        query::{
            Filter, QueryMode, QueryPolicy, ResourceLoader as _, Statement, StatementBuilder,
            TaskId,
        },
        value::Value,
    };
}
