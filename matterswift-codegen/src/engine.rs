//! Template engine binding.
//!
//! Builds the per-run [`Tera`] instance: loads the embedded template set (or
//! an override directory), and registers the Swift type mapping and the
//! predicate/formatter filters under their template-facing names.
//!
//! Filters that need scoped type resolution accept a `cluster=<name>`
//! argument and rebuild the lookup context from the shared model; without
//! the argument they resolve against global definitions only.

use std::collections::HashMap;
use std::sync::Arc;

use matterswift_idl::{Attribute, Command, DataType, Field, Idl, Struct, TypeLookupContext};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tera::Tera;

use crate::error::CodegenError;
use crate::options::GeneratorOptions;
use crate::swift::filters;
use crate::swift::types::{TypeRef, swift_type, swift_ui_view_type};

/// Per-cluster Swift source template.
pub const CLUSTER_TEMPLATE: &str = "cluster.swift.tera";
/// Per-cluster SwiftUI view template.
pub const CLUSTER_VIEW_TEMPLATE: &str = "cluster_view.swift.tera";
/// Cluster description lookup template.
pub const DESCRIPTIONS_TEMPLATE: &str = "descriptions.swift.tera";
/// Navigation index view template.
pub const CLIENT_ID_VIEW_TEMPLATE: &str = "client_id_view.swift.tera";
/// Package manifest template.
pub const PACKAGE_TEMPLATE: &str = "package.swift.tera";

/// Builds the template engine for one generation run.
pub(crate) fn build(idl: Arc<Idl>, options: &GeneratorOptions) -> Result<Tera, CodegenError> {
    let mut tera = match &options.templates {
        Some(dir) => Tera::new(&format!("{}/**/*.tera", dir.display()))?,
        None => {
            let mut tera = Tera::default();
            tera.add_raw_templates(vec![
                (CLUSTER_TEMPLATE, include_str!("../templates/cluster.swift.tera")),
                (
                    CLUSTER_VIEW_TEMPLATE,
                    include_str!("../templates/cluster_view.swift.tera"),
                ),
                (
                    DESCRIPTIONS_TEMPLATE,
                    include_str!("../templates/descriptions.swift.tera"),
                ),
                (
                    CLIENT_ID_VIEW_TEMPLATE,
                    include_str!("../templates/client_id_view.swift.tera"),
                ),
                (PACKAGE_TEMPLATE, include_str!("../templates/package.swift.tera")),
            ])?;
            tera
        }
    };

    tera.register_filter("swift_type", SwiftTypeFilter { idl: idl.clone() });
    tera.register_filter("swift_ui_view_type", SwiftUiViewTypeFilter { idl: idl.clone() });
    tera.register_filter("is_struct", IsStructFilter { idl: idl.clone() });
    tera.register_filter("is_bitmap", IsBitmapFilter { idl: idl.clone() });
    tera.register_filter("struct_fields", StructFieldsFilter { idl: idl.clone() });
    tera.register_filter(
        "struct_fields_by_name",
        StructFieldsByNameFilter { idl: idl.clone() },
    );
    tera.register_filter("response_type", ResponseTypeFilter { idl });
    tera.register_filter("attribute_name", attribute_name_filter);
    tera.register_filter("is_readable", is_readable_filter);
    tera.register_filter("is_writable", is_writable_filter);
    tera.register_filter("is_nullable", is_nullable_filter);
    tera.register_filter("strip_all", strip_all_filter);

    Ok(tera)
}

fn decode<T: DeserializeOwned>(value: &Value) -> tera::Result<T> {
    serde_json::from_value(value.clone()).map_err(|e| tera::Error::msg(e.to_string()))
}

fn codegen_err(err: CodegenError) -> tera::Error {
    tera::Error::msg(err.to_string())
}

/// Resolves the lookup scope requested through the `cluster` argument.
fn scope<'a>(idl: &'a Idl, args: &HashMap<String, Value>) -> tera::Result<TypeLookupContext<'a>> {
    match args.get("cluster") {
        None => Ok(TypeLookupContext::new(idl, None)),
        Some(Value::String(name)) => {
            let cluster = idl.find_cluster(name).ok_or_else(|| {
                tera::Error::msg(format!("unknown cluster '{name}' in filter argument"))
            })?;
            Ok(TypeLookupContext::new(idl, Some(cluster)))
        }
        Some(other) => Err(tera::Error::msg(format!(
            "filter argument 'cluster' must be a cluster name, got {other}"
        ))),
    }
}

/// Owned decoding of the polymorphic type-mapping input.
enum TypeValue {
    Field(Field),
    DataType(DataType),
    Struct(Struct),
    Name(String),
}

impl TypeValue {
    fn from_value(value: &Value) -> tera::Result<Self> {
        match value {
            Value::String(name) => Ok(Self::Name(name.clone())),
            Value::Object(map) => {
                if map.contains_key("data_type") {
                    Ok(Self::Field(decode(value)?))
                } else if map.contains_key("fields") {
                    Ok(Self::Struct(decode(value)?))
                } else if map.contains_key("name") {
                    Ok(Self::DataType(decode(value)?))
                } else {
                    Err(tera::Error::msg(
                        "type mapping expects a field, data type, struct or type name",
                    ))
                }
            }
            other => Err(tera::Error::msg(format!(
                "type mapping expects a field, data type, struct or type name, got {other}"
            ))),
        }
    }

    fn as_type_ref(&self) -> TypeRef<'_> {
        match self {
            Self::Field(field) => TypeRef::Field(field),
            Self::DataType(data_type) => TypeRef::DataType(data_type),
            Self::Struct(strukt) => TypeRef::Struct(strukt),
            Self::Name(name) => TypeRef::Name(name),
        }
    }
}

struct SwiftTypeFilter {
    idl: Arc<Idl>,
}

impl tera::Filter for SwiftTypeFilter {
    fn filter(&self, value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let context = scope(&self.idl, args)?;
        let input = TypeValue::from_value(value)?;
        Ok(Value::String(swift_type(input.as_type_ref(), &context)))
    }
}

struct SwiftUiViewTypeFilter {
    idl: Arc<Idl>,
}

impl tera::Filter for SwiftUiViewTypeFilter {
    fn filter(&self, value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let context = scope(&self.idl, args)?;
        let input = TypeValue::from_value(value)?;
        Ok(Value::String(swift_ui_view_type(input.as_type_ref(), &context)))
    }
}

struct IsStructFilter {
    idl: Arc<Idl>,
}

impl tera::Filter for IsStructFilter {
    fn filter(&self, value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let context = scope(&self.idl, args)?;
        let field: Field = decode(value)?;
        let result = filters::is_struct(&field, &context).map_err(codegen_err)?;
        Ok(Value::Bool(result))
    }
}

struct IsBitmapFilter {
    idl: Arc<Idl>,
}

impl tera::Filter for IsBitmapFilter {
    fn filter(&self, value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let context = scope(&self.idl, args)?;
        let field: Field = decode(value)?;
        Ok(Value::Bool(filters::is_bitmap(&field, &context)))
    }
}

struct StructFieldsFilter {
    idl: Arc<Idl>,
}

impl tera::Filter for StructFieldsFilter {
    fn filter(&self, value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let context = scope(&self.idl, args)?;
        let field: Field = decode(value)?;
        let fields = filters::struct_fields(&field, &context).map_err(codegen_err)?;
        serde_json::to_value(fields).map_err(|e| tera::Error::msg(e.to_string()))
    }
}

struct StructFieldsByNameFilter {
    idl: Arc<Idl>,
}

impl tera::Filter for StructFieldsByNameFilter {
    fn filter(&self, value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let context = scope(&self.idl, args)?;
        let name = value.as_str().ok_or_else(|| {
            tera::Error::msg("struct_fields_by_name expects a struct name string")
        })?;
        match filters::struct_fields_by_name(name, &context) {
            Some(fields) => {
                serde_json::to_value(fields).map_err(|e| tera::Error::msg(e.to_string()))
            }
            None => Ok(Value::Null),
        }
    }
}

struct ResponseTypeFilter {
    idl: Arc<Idl>,
}

impl tera::Filter for ResponseTypeFilter {
    fn filter(&self, value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let context = scope(&self.idl, args)?;
        let command: Command = decode(value)?;
        Ok(Value::String(filters::command_response_type(&command, &context)))
    }
}

fn attribute_name_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let attribute: Attribute = decode(value)?;
    Ok(Value::String(filters::attribute_name(&attribute)))
}

fn is_readable_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let attribute: Attribute = decode(value)?;
    Ok(Value::Bool(filters::is_readable(&attribute)))
}

fn is_writable_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let attribute: Attribute = decode(value)?;
    Ok(Value::Bool(filters::is_writable(&attribute)))
}

fn is_nullable_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let field: Field = decode(value)?;
    Ok(Value::Bool(filters::is_nullable(&field)))
}

fn strip_all_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("strip_all expects a string"))?;
    Ok(Value::String(filters::strip_all_newlines(text)))
}
