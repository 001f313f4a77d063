//! Swift type mapping.
//!
//! A static registry maps well-known IDL type names onto Swift type names;
//! everything outside the registry is assumed to be a generated type (a
//! struct, enum or bitmap emitted elsewhere) and passes through by name.

use matterswift_idl::{DataType, Field, Struct, TypeLookupContext};
use serde::Serialize;

/// Namespace prefix of the runtime support library.
pub const RUNTIME_NAMESPACE: &str = "matter4swift.";

/// Suffix appended by [`swift_ui_view_type`] to name the SwiftUI input view
/// for a value of the mapped type.
pub const INPUT_VIEW_SUFFIX: &str = "InputView";

/// Pairs a well-known IDL type name with its Swift equivalent.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GlobalType {
    /// Swift type name, possibly namespaced into the runtime library.
    pub swift_name: &'static str,
    /// IDL type name it maps from.
    pub idl_type: &'static str,
}

/// Types Swift sees globally. First exact match on the IDL name wins.
pub const GLOBAL_TYPES: &[GlobalType] = &[
    GlobalType { swift_name: "Bool", idl_type: "boolean" },
    GlobalType { swift_name: "String", idl_type: "char_string" },
    GlobalType { swift_name: "Double", idl_type: "double" },
    GlobalType { swift_name: "Float", idl_type: "single" },
    GlobalType { swift_name: "Int8", idl_type: "int8s" },
    GlobalType { swift_name: "UInt8", idl_type: "int8u" },
    GlobalType { swift_name: "Int16", idl_type: "int16s" },
    GlobalType { swift_name: "UInt16", idl_type: "int16u" },
    GlobalType { swift_name: "Int32", idl_type: "int24s" },
    GlobalType { swift_name: "UInt32", idl_type: "int24u" },
    GlobalType { swift_name: "Int32", idl_type: "int32s" },
    GlobalType { swift_name: "UInt32", idl_type: "int32u" },
    GlobalType { swift_name: "Int64", idl_type: "int40s" },
    GlobalType { swift_name: "UInt64", idl_type: "int40u" },
    GlobalType { swift_name: "Int64", idl_type: "int48s" },
    GlobalType { swift_name: "UInt64", idl_type: "int48u" },
    GlobalType { swift_name: "Int64", idl_type: "int56s" },
    GlobalType { swift_name: "UInt64", idl_type: "int56u" },
    GlobalType { swift_name: "Int64", idl_type: "int64s" },
    GlobalType { swift_name: "UInt64", idl_type: "int64u" },
    GlobalType { swift_name: "matter4swift.OctetString", idl_type: "octet_string" },
    GlobalType { swift_name: "UInt8", idl_type: "enum8" },
    GlobalType { swift_name: "matter4swift.CommandId", idl_type: "command_id" },
    GlobalType { swift_name: "matter4swift.EventId", idl_type: "event_id" },
    GlobalType { swift_name: "matter4swift.AttribId", idl_type: "attrib_id" },
    GlobalType { swift_name: "matter4swift.ClusterId", idl_type: "cluster_id" },
    GlobalType { swift_name: "matter4swift.EndpointNo", idl_type: "endpoint_no" },
    GlobalType { swift_name: "matter4swift.DevtypeId", idl_type: "devtype_id" },
    GlobalType { swift_name: "matter4swift.FabricIdx", idl_type: "fabric_idx" },
    GlobalType { swift_name: "matter4swift.FabricId", idl_type: "fabric_id" },
    GlobalType { swift_name: "matter4swift.NodeId", idl_type: "node_id" },
    GlobalType { swift_name: "matter4swift.GroupId", idl_type: "group_id" },
    GlobalType { swift_name: "matter4swift.VendorId", idl_type: "vendor_id" },
    GlobalType { swift_name: "UInt8", idl_type: "bitmap8" },
    GlobalType { swift_name: "UInt16", idl_type: "bitmap16" },
    GlobalType { swift_name: "UInt32", idl_type: "bitmap32" },
    GlobalType { swift_name: "UInt64", idl_type: "bitmap64" },
    GlobalType { swift_name: "matter4swift.Temperature", idl_type: "temperature" },
    GlobalType { swift_name: "matter4swift.Percent", idl_type: "percent" },
    GlobalType { swift_name: "matter4swift.EpochS", idl_type: "epoch_s" },
    GlobalType { swift_name: "matter4swift.ElapsedS", idl_type: "elapsed_s" },
    GlobalType { swift_name: "matter4swift.EpochUs", idl_type: "epoch_us" },
    GlobalType { swift_name: "String", idl_type: "long_char_string" },
    GlobalType { swift_name: "matter4swift.OctetString", idl_type: "long_octet_string" },
    GlobalType { swift_name: "UInt16", idl_type: "enum16" },
    GlobalType { swift_name: "matter4swift.Status", idl_type: "status" },
    GlobalType { swift_name: "matter4swift.DefaultSuccess", idl_type: "DefaultSuccess" },
    GlobalType { swift_name: "Int64", idl_type: "power_mw" },
    GlobalType { swift_name: "Int64", idl_type: "amperage_ma" },
    GlobalType { swift_name: "Int64", idl_type: "voltage_mv" },
    GlobalType { swift_name: "Int64", idl_type: "energy_mwh" },
    GlobalType { swift_name: "UInt16", idl_type: "percent100ths" },
    GlobalType { swift_name: "UInt64", idl_type: "systime_ms" },
    GlobalType { swift_name: "UInt64", idl_type: "systime_us" },
    GlobalType { swift_name: "UInt64", idl_type: "posix_ms" },
];

/// Looks up the Swift name registered for an IDL type name.
#[must_use]
pub fn registry_lookup(idl_type: &str) -> Option<&'static str> {
    GLOBAL_TYPES
        .iter()
        .find(|g| g.idl_type == idl_type)
        .map(|g| g.swift_name)
}

/// The accepted input shapes for type resolution.
///
/// Templates apply type mapping to fields, raw type references, struct
/// definitions and bare names alike; each shape carries its own rule for
/// deriving the IDL type name and list flag.
#[derive(Debug, Clone, Copy)]
pub enum TypeRef<'a> {
    /// A field: uses the declared data-type name and the field's list flag.
    Field(&'a Field),
    /// A raw data-type reference: uses its own name, never a list.
    DataType(&'a DataType),
    /// A struct definition: uses its own name, never a list.
    Struct(&'a Struct),
    /// A bare name: normalized through struct lookup, passed through when
    /// nothing resolves.
    Name(&'a str),
}

/// Determines the canonical IDL type name and list flag for an input shape.
#[must_use]
pub fn resolve_idl_type(input: TypeRef<'_>, context: &TypeLookupContext<'_>) -> (String, bool) {
    match input {
        TypeRef::Field(field) => (field.data_type.name.clone(), field.is_list),
        TypeRef::DataType(data_type) => (data_type.name.clone(), false),
        TypeRef::Struct(strukt) => (strukt.name.clone(), false),
        TypeRef::Name(name) => match context.find_struct(name) {
            Some(strukt) => (strukt.name.clone(), false),
            None => (name.to_string(), false),
        },
    }
}

/// Maps an input shape to its Swift type name.
///
/// Registry misses pass the IDL name through unchanged; list inputs are
/// wrapped in Swift array notation.
#[must_use]
pub fn swift_type(input: TypeRef<'_>, context: &TypeLookupContext<'_>) -> String {
    let (idl_type, is_list) = resolve_idl_type(input, context);

    let name = registry_lookup(&idl_type)
        .map(str::to_string)
        .unwrap_or(idl_type);

    if is_list { format!("[{name}]") } else { name }
}

/// Maps an input shape to the name of its SwiftUI input view type.
///
/// Registry hits gain the runtime namespace prefix unless already
/// namespaced; the result always ends in the input view suffix.
#[must_use]
pub fn swift_ui_view_type(input: TypeRef<'_>, context: &TypeLookupContext<'_>) -> String {
    let (idl_type, is_list) = resolve_idl_type(input, context);

    let name = match registry_lookup(&idl_type) {
        Some(swift_name) if swift_name.starts_with(RUNTIME_NAMESPACE) => swift_name.to_string(),
        Some(swift_name) => format!("{RUNTIME_NAMESPACE}{swift_name}"),
        None => idl_type,
    };

    let name = if is_list { format!("[{name}]") } else { name };
    format!("{name}{INPUT_VIEW_SUFFIX}")
}
