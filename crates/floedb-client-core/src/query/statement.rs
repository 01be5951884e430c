use crate::{
    obs::sink::{self, MetricsEvent},
    query::{
        filter::Filter,
        mode::QueryMode,
        task::TaskId,
        udf::{Aggregation, ResourceLoader},
    },
    value::Value,
};
use std::sync::Arc;

///
/// StatementBuilder
///
/// Mutable construction phase for a query statement.
///
/// This builder:
/// - Collects selection, projection, and aggregation settings
/// - Is purely declarative (no validation, planning, or I/O)
/// - Overwrites on every setter; the last write wins
///
/// Important design notes:
/// - Nothing is validated here. Empty namespaces, unknown bins, or
///   otherwise unsendable combinations are accepted as given and surface
///   at the execution layer or in the server response.
/// - The server honors a single filter per request. Additional predicates
///   must be applied inside the aggregation function body.
///

#[derive(Debug, Default)]
pub struct StatementBuilder {
    namespace: String,
    set_name: Option<String>,
    index_name: Option<String>,
    bin_names: Vec<String>,
    filter: Option<Filter>,
    aggregation: Option<Aggregation>,
    task_id: TaskId,
}

impl StatementBuilder {
    /// Create a new empty statement builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target namespace.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Restrict the request to one set within the namespace.
    #[must_use]
    pub fn set_name(mut self, set_name: impl Into<String>) -> Self {
        self.set_name = Some(set_name.into());
        self
    }

    /// Name the secondary index explicitly. When absent, the execution
    /// layer infers the index from the filter's bin name.
    #[must_use]
    pub fn index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = Some(index_name.into());
        self
    }

    /// Replace the list of bins to return.
    ///
    /// Order is preserved exactly as given (the wire layer returns bins in
    /// this order) and duplicates are kept. An empty list selects all
    /// bins.
    #[must_use]
    pub fn bins<I, S>(mut self, bins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bin_names = bins.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the secondary-index filter.
    ///
    /// One filter per request; extra predicates belong in the aggregation
    /// function body.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Reference an aggregation function in a package already deployed on
    /// the server. Replaces any previously set aggregation.
    #[must_use]
    pub fn aggregate_function<I, V>(
        mut self,
        package: impl Into<String>,
        function: impl Into<String>,
        args: I,
    ) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.aggregation = Some(Aggregation::PreDeployed {
            package: package.into(),
            function: function.into(),
            args: args.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Reference an aggregation function in a package read from a local
    /// resource and shipped with the request. Replaces any previously set
    /// aggregation.
    #[must_use]
    pub fn aggregate_function_from_resource<I, V>(
        mut self,
        loader: Arc<dyn ResourceLoader>,
        path: impl Into<String>,
        package: impl Into<String>,
        function: impl Into<String>,
        args: I,
    ) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.aggregation = Some(Aggregation::FromResource {
            loader,
            path: path.into(),
            package: package.into(),
            function: function.into(),
            args: args.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Pre-assign the correlation id. `prepare` never overwrites an
    /// explicit id.
    #[must_use]
    pub fn task_id(mut self, task_id: impl Into<TaskId>) -> Self {
        self.task_id = task_id.into();
        self
    }

    /// Finalize the builder into an immutable `Statement`.
    #[must_use]
    pub fn build(self) -> Statement {
        Statement {
            namespace: self.namespace,
            set_name: self.set_name,
            index_name: self.index_name,
            bin_names: self.bin_names,
            filter: self.filter,
            aggregation: self.aggregation,
            task_id: self.task_id,
            return_data: false,
        }
    }
}

///
/// Statement
///
/// Immutable query/scan descriptor produced by `StatementBuilder`.
///
/// A statement describes one logical request: which records to select
/// (namespace, set, optional secondary-index filter), which bins to
/// return, and an optional server-side aggregation step. It is handed to
/// the execution layer by value; the execution layer calls `prepare`
/// exactly once immediately before building the wire command, and the
/// statement is discarded when the request completes. The by-value
/// handoff is the ownership-transfer contract: no mutation after
/// `prepare`, no reuse for a second logical request.
///

#[derive(Clone, Debug)]
pub struct Statement {
    namespace: String,
    set_name: Option<String>,
    index_name: Option<String>,
    bin_names: Vec<String>,
    filter: Option<Filter>,
    aggregation: Option<Aggregation>,
    task_id: TaskId,
    return_data: bool,
}

impl Statement {
    /// Start building a statement.
    #[must_use]
    pub fn builder() -> StatementBuilder {
        StatementBuilder::new()
    }

    /// Target namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Optional set restriction.
    #[must_use]
    pub fn set_name(&self) -> Option<&str> {
        self.set_name.as_deref()
    }

    /// Optional explicit secondary-index name.
    #[must_use]
    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    /// Bins to return, in wire order; empty means all bins.
    #[must_use]
    pub fn bin_names(&self) -> &[String] {
        &self.bin_names
    }

    /// The secondary-index filter, if any.
    #[must_use]
    pub const fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    /// The aggregation step, if any.
    #[must_use]
    pub const fn aggregation(&self) -> Option<&Aggregation> {
        self.aggregation.as_ref()
    }

    /// Aggregation package name, when an aggregation is set.
    #[must_use]
    pub fn package_name(&self) -> Option<&str> {
        self.aggregation.as_ref().map(Aggregation::package)
    }

    /// Aggregation function name, when an aggregation is set.
    #[must_use]
    pub fn function_name(&self) -> Option<&str> {
        self.aggregation.as_ref().map(Aggregation::function)
    }

    /// Aggregation arguments, in call order; empty when no aggregation is
    /// set.
    #[must_use]
    pub fn function_args(&self) -> &[Value] {
        match &self.aggregation {
            Some(aggregation) => aggregation.args(),
            None => &[],
        }
    }

    /// Resource path, when the aggregation ships a local package.
    #[must_use]
    pub fn resource_path(&self) -> Option<&str> {
        self.aggregation
            .as_ref()
            .and_then(Aggregation::resource_path)
    }

    /// Resource loader, when the aggregation ships a local package.
    #[must_use]
    pub fn resource_loader(&self) -> Option<&Arc<dyn ResourceLoader>> {
        self.aggregation
            .as_ref()
            .and_then(Aggregation::resource_loader)
    }

    /// Correlation token for progress and cancellation.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Whether the request streams record data back instead of only
    /// running the side-effecting aggregation. False until `prepare`.
    #[must_use]
    pub const fn return_data(&self) -> bool {
        self.return_data
    }

    /// True iff no secondary-index filter is set.
    ///
    /// The sole scan/query discriminator: bin names and aggregation
    /// settings never affect it. Recomputed on every call, never cached.
    #[must_use]
    pub const fn is_scan(&self) -> bool {
        self.filter.is_none()
    }

    /// Resolve the wire command shape from the filter and aggregation
    /// axes.
    #[must_use]
    pub const fn mode(&self) -> QueryMode {
        QueryMode::resolve(self.filter.is_some(), self.aggregation.is_some())
    }

    /// Prepare the statement just prior to execution.
    ///
    /// Called by the execution layer exactly once per logical request,
    /// immediately before the wire command is built: `return_data`
    /// decides the command shape, and the task id must stay stable for
    /// the whole request so progress and cancellation correlate.
    ///
    /// Always sets `return_data` to the given value. Assigns a generated
    /// task id only while the id is still unassigned, so a caller-chosen
    /// id survives. Preparing the returned statement again never touches
    /// the task id, but a second call with a different `return_data`
    /// silently changes command semantics and is a caller error.
    #[must_use]
    pub fn prepare(mut self, return_data: bool) -> Self {
        self.return_data = return_data;

        if self.task_id.is_unassigned() {
            self.task_id = TaskId::next();
            sink::record(MetricsEvent::TaskIdAssigned);
        }

        sink::record(MetricsEvent::StatementPrepared {
            mode: self.mode(),
            return_data,
        });

        self
    }
}

#[cfg(test)]
mod tests;
