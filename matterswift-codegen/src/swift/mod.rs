//! Swift code generation modules.

pub mod filters;
pub mod types;

pub use types::{GLOBAL_TYPES, GlobalType, TypeRef, swift_type, swift_ui_view_type};
