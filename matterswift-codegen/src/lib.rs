//! # matterswift codegen
//!
//! Swift code generation from Matter IDL models.
//!
//! This crate provides:
//! - A static registry mapping IDL types onto Swift types
//! - Template-callable predicates and formatters over the model
//! - A render planner selecting per-cluster and per-run output targets
//! - Tera-based template rendering with embedded, overridable templates
//!
//! The model arrives pre-built (see `matterswift-idl`); this crate maps it
//! through templates into a Swift package rooted at the configured output
//! directory.

pub mod engine;
pub mod error;
pub mod generator;
pub mod options;
pub mod storage;
pub mod swift;

pub use error::CodegenError;
pub use generator::{GenerateTarget, SwiftGenerator};
pub use options::{ClusterFilter, DEFAULT_PACKAGE_NAME, GeneratorOptions};
pub use storage::{FileStorage, GeneratorStorage, MemoryStorage};

use matterswift_idl::Idl;

/// Generates the full Swift package for an IDL model.
///
/// # Arguments
/// * `idl` - Parsed IDL model
/// * `options` - Run configuration
/// * `storage` - Output sink for generated files
///
/// # Errors
/// Returns `CodegenError` if configuration, rendering or storage fails.
pub fn generate(
    idl: Idl,
    options: GeneratorOptions,
    storage: &mut dyn GeneratorStorage,
) -> Result<(), CodegenError> {
    SwiftGenerator::new(idl, options)?.render_all(storage)
}
