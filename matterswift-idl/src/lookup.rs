//! Scoped type name resolution.
//!
//! Bare type names in an IDL file resolve against the definitions of the
//! enclosing cluster first, then against global definitions. The lookup
//! context captures that scoping rule as an explicit two-tier search.

use crate::types::{Bitmap, Cluster, Enum, Idl, Struct};

/// A view binding an [`Idl`] plus an optional [`Cluster`], used to resolve a
/// bare type name to its defining struct, enum or bitmap.
#[derive(Debug, Clone, Copy)]
pub struct TypeLookupContext<'a> {
    /// The full model.
    pub idl: &'a Idl,
    /// Cluster whose local definitions take precedence, if any.
    pub cluster: Option<&'a Cluster>,
}

impl<'a> TypeLookupContext<'a> {
    /// Creates a lookup context scoped to the given cluster.
    #[must_use]
    pub fn new(idl: &'a Idl, cluster: Option<&'a Cluster>) -> Self {
        Self { idl, cluster }
    }

    /// Resolves a struct definition by name.
    #[must_use]
    pub fn find_struct(&self, name: &str) -> Option<&'a Struct> {
        self.cluster
            .and_then(|c| c.structs.iter().find(|s| s.name == name))
            .or_else(|| self.idl.global_structs.iter().find(|s| s.name == name))
    }

    /// Resolves an enum definition by name.
    #[must_use]
    pub fn find_enum(&self, name: &str) -> Option<&'a Enum> {
        self.cluster
            .and_then(|c| c.enums.iter().find(|e| e.name == name))
            .or_else(|| self.idl.global_enums.iter().find(|e| e.name == name))
    }

    /// Resolves a bitmap definition by name.
    #[must_use]
    pub fn find_bitmap(&self, name: &str) -> Option<&'a Bitmap> {
        self.cluster
            .and_then(|c| c.bitmaps.iter().find(|b| b.name == name))
            .or_else(|| self.idl.global_bitmaps.iter().find(|b| b.name == name))
    }
}
