//! Template-callable predicates and formatters.
//!
//! Small pure functions over model entities that drive conditional template
//! logic and derive display-ready identifiers. The template engine binding
//! in [`crate::engine`] registers each of these under its template-facing
//! name.

use matterswift_idl::{Attribute, Command, Field, FieldQuality, TypeLookupContext};

use crate::error::CodegenError;
use crate::swift::types::{TypeRef, swift_type};

/// Returns true if the attribute can be read.
#[must_use]
pub fn is_readable(attribute: &Attribute) -> bool {
    attribute.is_readable()
}

/// Returns true if the attribute can be written.
#[must_use]
pub fn is_writable(attribute: &Attribute) -> bool {
    attribute.is_writable()
}

/// Returns true if the field is nullable for generation purposes.
///
/// Optional fields are deliberately widened into nullable: both map onto a
/// Swift optional in the generated code.
#[must_use]
pub fn is_nullable(field: &Field) -> bool {
    field.has_quality(FieldQuality::Nullable) || field.has_quality(FieldQuality::Optional)
}

/// Returns true if the field's declared type resolves to a struct.
///
/// # Errors
/// A field literally named `size` is rejected: upstream models use that name
/// for list size accessors and the generated accessor would collide with it.
pub fn is_struct(field: &Field, context: &TypeLookupContext<'_>) -> Result<bool, CodegenError> {
    if field.name == "size" {
        return Err(CodegenError::FieldNameCollision {
            field: field.name.clone(),
        });
    }
    Ok(context.find_struct(&field.data_type.name).is_some())
}

/// Returns true if the field's declared type resolves to a bitmap.
#[must_use]
pub fn is_bitmap(field: &Field, context: &TypeLookupContext<'_>) -> bool {
    context.find_bitmap(&field.data_type.name).is_some()
}

/// Returns the fields of the struct named by the field's own name.
///
/// # Errors
/// Returns [`CodegenError::StructNotFound`] when the name does not resolve.
pub fn struct_fields<'a>(
    field: &Field,
    context: &TypeLookupContext<'a>,
) -> Result<&'a [Field], CodegenError> {
    context
        .find_struct(&field.name)
        .map(|s| s.fields.as_slice())
        .ok_or_else(|| CodegenError::StructNotFound {
            name: field.name.clone(),
        })
}

/// Returns the fields of the struct with the given name, or `None` when the
/// name does not resolve.
#[must_use]
pub fn struct_fields_by_name<'a>(
    name: &str,
    context: &TypeLookupContext<'a>,
) -> Option<&'a [Field]> {
    context.find_struct(name).map(|s| s.fields.as_slice())
}

/// Derives the display name of an attribute: the first character of the
/// definition name upper-cased, the rest untouched.
#[must_use]
pub fn attribute_name(attribute: &Attribute) -> String {
    capitalize_first(&attribute.definition.name)
}

fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Flattens multi-line text into a single template-safe line: each line is
/// trimmed and the lines are rejoined with single spaces.
#[must_use]
pub fn strip_all_newlines(text: &str) -> String {
    text.split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the mapped Swift name of a command's response type.
#[must_use]
pub fn command_response_type(command: &Command, context: &TypeLookupContext<'_>) -> String {
    swift_type(TypeRef::Name(&command.output_param), context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use matterswift_idl::{AttributeQuality, Cluster, DataType, Idl, Struct};

    fn attribute(qualities: Vec<AttributeQuality>) -> Attribute {
        Attribute::new(Field::new("onOff", 0, DataType::new("boolean")), qualities)
    }

    #[test]
    fn test_readable_and_writable_are_independent() {
        let read_only = attribute(vec![AttributeQuality::Readable]);
        assert!(is_readable(&read_only));
        assert!(!is_writable(&read_only));

        let read_write = attribute(vec![AttributeQuality::Readable, AttributeQuality::Writable]);
        assert!(is_readable(&read_write));
        assert!(is_writable(&read_write));
    }

    #[test]
    fn test_nullable_is_the_union_of_nullable_and_optional() {
        let plain = Field::new("a", 0, DataType::new("int8u"));
        assert!(!is_nullable(&plain));

        let nullable = plain.clone().with_quality(FieldQuality::Nullable);
        assert!(is_nullable(&nullable));

        let optional = plain.with_quality(FieldQuality::Optional);
        assert!(is_nullable(&optional));
    }

    #[test]
    fn test_is_struct_resolves_in_scope() {
        let mut idl = Idl::new();
        let mut cluster = Cluster::new("Scenes", 0x0005);
        cluster.add_struct(Struct::new("SceneInfoStruct", Vec::new()));
        idl.add_cluster(cluster);
        let context = TypeLookupContext::new(&idl, idl.find_cluster("Scenes"));

        let field = Field::new("sceneInfo", 0, DataType::new("SceneInfoStruct"));
        assert!(is_struct(&field, &context).unwrap());

        let primitive = Field::new("sceneCount", 1, DataType::new("int8u"));
        assert!(!is_struct(&primitive, &context).unwrap());
    }

    #[test]
    fn test_is_struct_rejects_a_field_named_size() {
        let idl = Idl::new();
        let context = TypeLookupContext::new(&idl, None);
        let field = Field::new("size", 0, DataType::new("int8u"));

        let err = is_struct(&field, &context).unwrap_err();
        assert!(matches!(err, CodegenError::FieldNameCollision { .. }));
    }

    #[test]
    fn test_is_bitmap() {
        let mut idl = Idl::new();
        idl.global_bitmaps
            .push(matterswift_idl::Bitmap::new("Feature", "bitmap32"));
        let context = TypeLookupContext::new(&idl, None);

        let field = Field::new("featureMap", 0, DataType::new("Feature"));
        assert!(is_bitmap(&field, &context));

        let other = Field::new("level", 1, DataType::new("int8u"));
        assert!(!is_bitmap(&other, &context));
    }

    #[test]
    fn test_struct_fields_resolves_by_field_name() {
        let mut idl = Idl::new();
        idl.global_structs.push(Struct::new(
            "target",
            vec![Field::new("endpoint", 0, DataType::new("endpoint_no"))],
        ));
        let context = TypeLookupContext::new(&idl, None);

        let field = Field::new("target", 0, DataType::new("target"));
        let fields = struct_fields(&field, &context).unwrap();
        assert_eq!(fields.len(), 1);

        let missing = Field::new("nothing", 1, DataType::new("nothing"));
        assert!(matches!(
            struct_fields(&missing, &context),
            Err(CodegenError::StructNotFound { .. })
        ));
    }

    #[test]
    fn test_struct_fields_by_name_returns_none_when_unresolved() {
        let idl = Idl::new();
        let context = TypeLookupContext::new(&idl, None);

        assert!(struct_fields_by_name("NoSuchStruct", &context).is_none());
    }

    #[test]
    fn test_attribute_name_capitalizes_only_the_first_character() {
        let attr = Attribute::new(
            Field::new("onOff", 0, DataType::new("boolean")),
            vec![AttributeQuality::Readable],
        );
        assert_eq!(attribute_name(&attr), "OnOff");

        let already = Attribute::new(
            Field::new("Already", 1, DataType::new("boolean")),
            vec![AttributeQuality::Readable],
        );
        assert_eq!(attribute_name(&already), "Already");
    }

    #[test]
    fn test_attribute_name_of_empty_definition_name() {
        let attr = Attribute::new(Field::new("", 0, DataType::new("boolean")), Vec::new());
        assert_eq!(attribute_name(&attr), "");
    }

    #[test]
    fn test_strip_all_newlines() {
        assert_eq!(strip_all_newlines("  a \n b\n  c  "), "a b c");
        assert_eq!(strip_all_newlines("single"), "single");
        assert_eq!(strip_all_newlines(""), "");
    }

    #[test]
    fn test_command_response_type_maps_through_the_registry() {
        let idl = Idl::new();
        let context = TypeLookupContext::new(&idl, None);

        let command = Command::new("Toggle", 2, "DefaultSuccess");
        assert_eq!(
            command_response_type(&command, &context),
            "matter4swift.DefaultSuccess"
        );

        let custom = Command::new("GetSceneMembership", 6, "GetSceneMembershipResponse");
        assert_eq!(
            command_response_type(&custom, &context),
            "GetSceneMembershipResponse"
        );
    }
}
