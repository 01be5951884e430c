use crate::value::Value;
use serde::{Deserialize, Serialize};

///
/// Filter
///
/// Secondary-index predicate over a single bin.
///
/// The server honors one filter per request; narrowing beyond that is done
/// inside the aggregation function body. A filter is a closed value:
/// constructed once, stored opaquely by the statement, and encoded by the
/// wire layer. No evaluation happens on the client.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    /// Exact match on an indexed bin.
    Equal { bin: String, value: Value },

    /// Inclusive range over an indexed bin.
    Range {
        bin: String,
        begin: Value,
        end: Value,
    },
}

impl Filter {
    /// Exact-match filter.
    #[must_use]
    pub fn equal(bin: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equal {
            bin: bin.into(),
            value: value.into(),
        }
    }

    /// Inclusive range filter.
    #[must_use]
    pub fn range(bin: impl Into<String>, begin: impl Into<Value>, end: impl Into<Value>) -> Self {
        Self::Range {
            bin: bin.into(),
            begin: begin.into(),
            end: end.into(),
        }
    }

    /// Bin the filter applies to.
    ///
    /// When the statement carries no explicit index name, the execution
    /// layer infers the index from this bin.
    #[must_use]
    pub fn bin_name(&self) -> &str {
        match self {
            Self::Equal { bin, .. } | Self::Range { bin, .. } => bin,
        }
    }
}
