//! # matterswift IDL model
//!
//! Object model for parsed Matter IDL files.
//!
//! This crate provides:
//! - Data structures for clusters, attributes, commands, events and the
//!   struct/enum/bitmap type definitions they contain
//! - Scoped type name resolution ([`TypeLookupContext`])
//! - Cluster selection helpers for server-side and binding generation
//!
//! The model is produced by an external IDL parser and consumed read-only by
//! code generators; this crate does not parse IDL text itself.

pub mod lookup;
pub mod selection;
pub mod types;

pub use lookup::TypeLookupContext;
pub use selection::{binding_clusters, server_side_clusters};
pub use types::{
    Attribute, AttributeQuality, Bitmap, Cluster, Command, ConstantEntry, DataType, Endpoint,
    Enum, Event, EventPriority, Field, FieldQuality, Idl, Struct, StructTag,
};
