use thiserror::Error as ThisError;

///
/// ResourceError
/// Failures raised while locating or reading a local aggregation resource.
///
/// The statement itself never constructs these; they surface from
/// `ResourceLoader` implementations when the execution layer reads the
/// package at send time.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ResourceError {
    #[error("aggregation resource not found: {path}")]
    NotFound { path: String },

    #[error("failed to read aggregation resource {path}: {message}")]
    Read { path: String, message: String },
}
