//! Module: query
//! Responsibility: client-side statement vocabulary and construction.
//! Does not own: wire encoding, index selection, or result transport.
//! Boundary: value types handed to the execution layer at send time.

pub mod filter;
pub mod mode;
pub mod policy;
pub mod statement;
pub mod task;
pub mod udf;

pub use filter::Filter;
pub use mode::QueryMode;
pub use policy::QueryPolicy;
pub use statement::{Statement, StatementBuilder};
pub use task::TaskId;
pub use udf::{Aggregation, DirResourceLoader, ResourceLoader};
