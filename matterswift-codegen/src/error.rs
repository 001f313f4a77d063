//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Required configuration option is missing.
    #[error("missing required option '{option}', provide it as '--option {option}:<value>'")]
    MissingOption {
        /// Option name.
        option: &'static str,
    },

    /// Cluster filter value outside the accepted set.
    #[error("'{value}' is not a valid cluster filter, expected one of {{all|server_side|binding}}")]
    InvalidClusterFilter {
        /// The rejected value.
        value: String,
    },

    /// Field name collides with a generated accessor name.
    #[error("field '{field}' collides with a generated list accessor name")]
    FieldNameCollision {
        /// The offending field name.
        field: String,
    },

    /// Struct resolution yielded nothing.
    #[error("struct '{name}' not found in the current lookup scope")]
    StructNotFound {
        /// The unresolved struct name.
        name: String,
    },

    /// Template loading or rendering error.
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
