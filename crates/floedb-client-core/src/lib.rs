//! Core runtime for the FloeDB client query layer: statement construction,
//! the filter/value vocabulary stored by statements, task-id assignment, and
//! the ergonomics exported via the `prelude`.

pub mod error;
pub mod obs;
pub mod query;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, loaders, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        query::{Filter, QueryMode, QueryPolicy, Statement, StatementBuilder, TaskId},
        value::Value,
    };
}
