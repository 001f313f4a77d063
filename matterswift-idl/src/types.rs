//! Matter IDL model definitions.
//!
//! This module contains the data structures representing a parsed Matter IDL
//! file: clusters with their attributes, commands and events, the
//! struct/enum/bitmap definitions scoped to them, and endpoint instantiation
//! data used for cluster selection.

use serde::{Deserialize, Serialize};

/// Root of a parsed IDL file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Idl {
    /// Cluster definitions, in declaration order.
    pub clusters: Vec<Cluster>,
    /// Struct definitions visible to every cluster.
    pub global_structs: Vec<Struct>,
    /// Enum definitions visible to every cluster.
    pub global_enums: Vec<Enum>,
    /// Bitmap definitions visible to every cluster.
    pub global_bitmaps: Vec<Bitmap>,
    /// Endpoint instantiations.
    pub endpoints: Vec<Endpoint>,
}

impl Idl {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a cluster definition.
    pub fn add_cluster(&mut self, cluster: Cluster) {
        self.clusters.push(cluster);
    }

    /// Looks up a cluster by name.
    #[must_use]
    pub fn find_cluster(&self, name: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.name == name)
    }
}

/// A named bundle of attributes, commands and events representing one device
/// capability area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    /// Cluster name.
    pub name: String,
    /// Cluster identifier code.
    pub code: u32,
    /// Documentation comment, possibly spanning multiple lines.
    pub description: Option<String>,
    /// Attribute definitions.
    pub attributes: Vec<Attribute>,
    /// Command definitions.
    pub commands: Vec<Command>,
    /// Event definitions.
    pub events: Vec<Event>,
    /// Cluster-local struct definitions.
    pub structs: Vec<Struct>,
    /// Cluster-local enum definitions.
    pub enums: Vec<Enum>,
    /// Cluster-local bitmap definitions.
    pub bitmaps: Vec<Bitmap>,
}

impl Cluster {
    /// Creates a new empty cluster.
    #[must_use]
    pub fn new(name: impl Into<String>, code: u32) -> Self {
        Self {
            name: name.into(),
            code,
            description: None,
            attributes: Vec::new(),
            commands: Vec::new(),
            events: Vec::new(),
            structs: Vec::new(),
            enums: Vec::new(),
            bitmaps: Vec::new(),
        }
    }

    /// Sets the documentation comment.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an attribute definition.
    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// Adds a command definition.
    pub fn add_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Adds an event definition.
    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Adds a cluster-local struct definition.
    pub fn add_struct(&mut self, strukt: Struct) {
        self.structs.push(strukt);
    }

    /// Adds a cluster-local enum definition.
    pub fn add_enum(&mut self, enumeration: Enum) {
        self.enums.push(enumeration);
    }

    /// Adds a cluster-local bitmap definition.
    pub fn add_bitmap(&mut self, bitmap: Bitmap) {
        self.bitmaps.push(bitmap);
    }
}

/// Reference to a data type by name, with optional bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataType {
    /// Type name as written in the IDL.
    pub name: String,
    /// Maximum length for string/octet types.
    pub max_length: Option<u64>,
    /// Minimum valid value.
    pub min_value: Option<i64>,
    /// Maximum valid value.
    pub max_value: Option<i64>,
}

impl DataType {
    /// Creates a bare type reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_length: None,
            min_value: None,
            max_value: None,
        }
    }
}

/// Qualities a field may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldQuality {
    /// Field value may be null.
    Nullable,
    /// Field may be omitted entirely.
    Optional,
    /// Field is scoped to the accessing fabric.
    FabricSensitive,
}

/// A single field within a struct, event or command payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Field identifier code.
    pub code: u32,
    /// Declared data type.
    pub data_type: DataType,
    /// True if the field is a list of the declared type.
    pub is_list: bool,
    /// Qualities attached to the field.
    pub qualities: Vec<FieldQuality>,
}

impl Field {
    /// Creates a new scalar field with no qualities.
    #[must_use]
    pub fn new(name: impl Into<String>, code: u32, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            code,
            data_type,
            is_list: false,
            qualities: Vec::new(),
        }
    }

    /// Marks the field as a list.
    #[must_use]
    pub fn as_list(mut self) -> Self {
        self.is_list = true;
        self
    }

    /// Attaches a quality.
    #[must_use]
    pub fn with_quality(mut self, quality: FieldQuality) -> Self {
        self.qualities.push(quality);
        self
    }

    /// Returns true if the field carries the given quality.
    #[must_use]
    pub fn has_quality(&self, quality: FieldQuality) -> bool {
        self.qualities.contains(&quality)
    }
}

/// Qualities an attribute may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeQuality {
    /// Attribute can be read.
    Readable,
    /// Attribute can be written.
    Writable,
    /// Attribute does not support subscriptions.
    NoSubscribe,
    /// Writes must be timed.
    TimedWrite,
}

/// A readable/writable data field exposed by a cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    /// Underlying field definition (name, type, list flag, field qualities).
    pub definition: Field,
    /// Access qualities.
    pub qualities: Vec<AttributeQuality>,
    /// Documentation comment.
    pub description: Option<String>,
}

impl Attribute {
    /// Creates an attribute over the given field definition.
    #[must_use]
    pub fn new(definition: Field, qualities: Vec<AttributeQuality>) -> Self {
        Self {
            definition,
            qualities,
            description: None,
        }
    }

    /// Returns true if the attribute carries the given quality.
    #[must_use]
    pub fn has_quality(&self, quality: AttributeQuality) -> bool {
        self.qualities.contains(&quality)
    }

    /// Returns true if the attribute can be read.
    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.has_quality(AttributeQuality::Readable)
    }

    /// Returns true if the attribute can be written.
    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.has_quality(AttributeQuality::Writable)
    }
}

/// A command exposed by a cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Command {
    /// Command name.
    pub name: String,
    /// Command identifier code.
    pub code: u32,
    /// Name of the request struct, if the command takes a payload.
    pub input_param: Option<String>,
    /// Name of the response type.
    pub output_param: String,
    /// Documentation comment.
    pub description: Option<String>,
}

impl Command {
    /// Creates a new command.
    #[must_use]
    pub fn new(name: impl Into<String>, code: u32, output_param: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code,
            input_param: None,
            output_param: output_param.into(),
            description: None,
        }
    }

    /// Sets the request struct name.
    #[must_use]
    pub fn with_input(mut self, input_param: impl Into<String>) -> Self {
        self.input_param = Some(input_param.into());
        self
    }
}

/// Event delivery priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventPriority {
    /// Diagnostic events.
    Debug,
    /// Normal operational events.
    #[default]
    Info,
    /// Events that must not be dropped.
    Critical,
}

/// An event emitted by a cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Event name.
    pub name: String,
    /// Event identifier code.
    pub code: u32,
    /// Delivery priority.
    pub priority: EventPriority,
    /// Payload fields.
    pub fields: Vec<Field>,
    /// Documentation comment.
    pub description: Option<String>,
}

impl Event {
    /// Creates a new event with default priority and no payload.
    #[must_use]
    pub fn new(name: impl Into<String>, code: u32) -> Self {
        Self {
            name: name.into(),
            code,
            priority: EventPriority::default(),
            fields: Vec::new(),
            description: None,
        }
    }
}

/// Role of a struct in command exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructTag {
    /// Command request payload.
    Request,
    /// Command response payload.
    Response,
}

/// A named struct definition, scoped to a cluster or global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Struct {
    /// Struct name.
    pub name: String,
    /// Ordered field definitions.
    pub fields: Vec<Field>,
    /// Request/response role, if any.
    pub tag: Option<StructTag>,
}

impl Struct {
    /// Creates a new struct definition.
    #[must_use]
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
            tag: None,
        }
    }

    /// Sets the request/response role.
    #[must_use]
    pub fn with_tag(mut self, tag: StructTag) -> Self {
        self.tag = Some(tag);
        self
    }
}

/// A named constant within an enum or bitmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstantEntry {
    /// Constant name.
    pub name: String,
    /// Constant value.
    pub code: u64,
}

impl ConstantEntry {
    /// Creates a new constant entry.
    #[must_use]
    pub fn new(name: impl Into<String>, code: u64) -> Self {
        Self {
            name: name.into(),
            code,
        }
    }
}

/// A named enum definition, scoped to a cluster or global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enum {
    /// Enum name.
    pub name: String,
    /// Underlying IDL type, e.g. `enum8`.
    pub base_type: String,
    /// Enum entries.
    pub entries: Vec<ConstantEntry>,
}

impl Enum {
    /// Creates a new enum definition.
    #[must_use]
    pub fn new(name: impl Into<String>, base_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_type: base_type.into(),
            entries: Vec::new(),
        }
    }

    /// Adds an entry.
    pub fn add_entry(&mut self, entry: ConstantEntry) {
        self.entries.push(entry);
    }
}

/// A named bitmap definition, scoped to a cluster or global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bitmap {
    /// Bitmap name.
    pub name: String,
    /// Underlying IDL type, e.g. `bitmap32`.
    pub base_type: String,
    /// Bit constants.
    pub entries: Vec<ConstantEntry>,
}

impl Bitmap {
    /// Creates a new bitmap definition.
    #[must_use]
    pub fn new(name: impl Into<String>, base_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_type: base_type.into(),
            entries: Vec::new(),
        }
    }

    /// Adds an entry.
    pub fn add_entry(&mut self, entry: ConstantEntry) {
        self.entries.push(entry);
    }
}

/// An endpoint instantiation within the IDL file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Endpoint {
    /// Endpoint number.
    pub number: u32,
    /// Names of clusters instantiated server-side on this endpoint.
    pub server_clusters: Vec<String>,
    /// Names of clusters this endpoint binds to as a client.
    pub client_bindings: Vec<String>,
}

impl Endpoint {
    /// Creates a new empty endpoint.
    #[must_use]
    pub fn new(number: u32) -> Self {
        Self {
            number,
            server_clusters: Vec::new(),
            client_bindings: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_qualities() {
        let field = Field::new("level", 0, DataType::new("int8u"))
            .with_quality(FieldQuality::Nullable);

        assert!(field.has_quality(FieldQuality::Nullable));
        assert!(!field.has_quality(FieldQuality::Optional));
        assert!(!field.is_list);
    }

    #[test]
    fn test_field_as_list() {
        let field = Field::new("entries", 1, DataType::new("char_string")).as_list();
        assert!(field.is_list);
    }

    #[test]
    fn test_attribute_access_qualities() {
        let definition = Field::new("onOff", 0, DataType::new("boolean"));
        let attribute = Attribute::new(definition, vec![AttributeQuality::Readable]);

        assert!(attribute.is_readable());
        assert!(!attribute.is_writable());
    }

    #[test]
    fn test_cluster_construction() {
        let mut cluster = Cluster::new("OnOff", 0x0006).with_description("Turn things on and off");
        cluster.add_attribute(Attribute::new(
            Field::new("onOff", 0, DataType::new("boolean")),
            vec![AttributeQuality::Readable],
        ));
        cluster.add_command(Command::new("Toggle", 2, "DefaultSuccess"));

        assert_eq!(cluster.attributes.len(), 1);
        assert_eq!(cluster.commands.len(), 1);
        assert_eq!(cluster.description.as_deref(), Some("Turn things on and off"));
    }

    #[test]
    fn test_idl_find_cluster() {
        let mut idl = Idl::new();
        idl.add_cluster(Cluster::new("OnOff", 0x0006));

        assert!(idl.find_cluster("OnOff").is_some());
        assert!(idl.find_cluster("LevelControl").is_none());
    }

    #[test]
    fn test_command_with_input() {
        let command = Command::new("MoveToLevel", 0, "DefaultSuccess").with_input("MoveToLevelRequest");
        assert_eq!(command.input_param.as_deref(), Some("MoveToLevelRequest"));
    }

    #[test]
    fn test_field_serializes_data_type_name() {
        let field = Field::new("vendorId", 2, DataType::new("vendor_id"));
        let json = serde_json::to_value(&field).expect("serialize");

        assert_eq!(json["data_type"]["name"], "vendor_id");
        assert_eq!(json["is_list"], false);
    }

    #[test]
    fn test_quality_serialization_is_snake_case() {
        let json = serde_json::to_value(FieldQuality::FabricSensitive).expect("serialize");
        assert_eq!(json, "fabric_sensitive");
    }
}
