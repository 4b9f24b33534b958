use thiserror::Error;

use goap_core::ModelError;

/// Failures raised while decoding a query or validating its model.
///
/// Everything here is reported before the search starts; a successful
/// decode+validation cannot fail later except by aborting on the expansion
/// bound, which is a plan status rather than an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("missing required field '{field}'")]
    Schema { field: String },

    #[error("value for '{context}' must set exactly one of STRING, INT, FLOAT, BOOLEAN")]
    MalformedValue { context: String },

    #[error("argument for '{context}' must be either a literal or a variable reference")]
    MalformedArgument { context: String },

    #[error("unknown operator '{op}'")]
    UnsupportedOperator { op: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, ApiError>;
