//! Description document model
//!
//! The description document is a JSON array of object types, each carrying its
//! messages and enumerations. The model is parsed once at the start of a run and
//! held read-only for the rest of it.
//!
//! ```json
//! [{
//!   "name": "VM",
//!   "description": "A virtual machine",
//!   "messages": [{
//!     "name": "get_name_label",
//!     "description": "Get the name/label field of the given VM.",
//!     "result": ["string", "value of the field"],
//!     "params": [{"type": "VM ref", "name": "self", "doc": "reference to the object"}]
//!   }],
//!   "enums": [{"name": "vm_power_state", "values": [{"name": "Halted"}]}]
//! }]
//! ```

use crate::error::{GenError, GenResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameter names that are always supplied by the session or the receiver.
const IMPLICIT_PARAM_NAMES: [&str; 2] = ["session_id", "self"];

/// Type-expression used when a message declares no result at all.
const NO_RESULT: &str = "void";

/// The whole description document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Description {
    pub object_types: Vec<ObjectType>,
}

/// One object type (a XenAPI class).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectType {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub messages: Vec<Message>,

    #[serde(default)]
    pub enums: Vec<Enum>,
}

/// A remote-procedure message on an object type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// First element is the result type-expression, the rest is documentation.
    #[serde(default)]
    pub result: Vec<String>,

    #[serde(default)]
    pub params: Vec<Param>,
}

/// A message parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Param {
    #[serde(rename = "type")]
    pub ty: String,

    pub name: String,

    #[serde(default)]
    pub doc: String,
}

/// An enumeration declared on an object type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,

    #[serde(default)]
    pub values: Vec<EnumValue>,
}

/// A single enumeration value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
}

impl Description {
    /// Load a description document from a file
    pub fn from_file(path: impl AsRef<Path>) -> GenResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| GenError::ReadDescription {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| GenError::ParseDescription {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a description document from a JSON string
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Look up an object type by its exact name
    pub fn object_type(&self, name: &str) -> Option<&ObjectType> {
        self.object_types.iter().find(|ot| ot.name == name)
    }
}

impl ObjectType {
    /// Remote-call identity key for one of this type's messages.
    pub fn identity(&self, message: &Message) -> String {
        format!("{}.{}", self.name, message.name)
    }

    /// Whether this type gets its own generated unit.
    pub fn is_generated(&self) -> bool {
        self.messages.len() >= 2
    }

    /// The type-expression `"<name> ref"` that denotes the receiver itself.
    pub fn self_ref_type(&self) -> String {
        format!("{} ref", self.name)
    }
}

impl Message {
    /// The result type-expression (the first `result` element).
    pub fn result_type(&self) -> &str {
        self.result.first().map(String::as_str).unwrap_or(NO_RESULT)
    }
}

impl Param {
    /// Whether the parameter is elided from the generated signature.
    ///
    /// Implicit parameters are supplied by the session or by the receiver's own
    /// reference, never by the caller.
    pub fn is_implicit(&self, owner: &ObjectType) -> bool {
        IMPLICIT_PARAM_NAMES.contains(&self.name.as_str())
            || self.name == owner.name
            || self.ty == owner.self_ref_type()
    }
}
