//! Intermediate representation of a generated unit.
//!
//! Binders and emitters build these values; [`render`](super::render) turns a
//! [`UnitIr`] into source text in one formatting pass. Keeping the two apart
//! lets each binder be tested on its structured output rather than on text.
//!
//! # Structure
//!
//! - [`UnitIr`]: one object type, its enums, its methods and the appended
//!   hand-written extension
//! - [`EnumIr`]: a typed constant set plus its wire matcher
//! - [`MethodIr`]: signature, pre-call encoding, invocation, decoding
//!
//! Code fragments held in the IR (`ty`, `encode`, `args`, `decode`) are Rust
//! snippets; multi-line fragments carry their own relative indentation.

use std::fmt;

/// Name bound to the raw wire value returned by the remote call.
pub const RAW_VALUE: &str = "value";

/// A typed parameter in a generated signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureParam {
    pub name: String,
    pub ty: String,
    pub doc: String,
}

/// Output of the parameter binder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamBinding {
    /// Explicit parameters, in schema order.
    pub signature: Vec<SignatureParam>,

    /// Statements run immediately before the call.
    pub encode: Vec<String>,

    /// Positional call arguments, receiver reference first.
    pub args: Vec<String>,
}

/// Output of the result binder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultBinding {
    /// Variable the decoded value is bound to.
    pub var: String,

    /// Rust type of the `Ok` value; `()` for void results.
    pub return_type: String,

    /// Statements decoding [`RAW_VALUE`] into `var`. Run only after the call
    /// succeeded.
    pub decode: Vec<String>,
}

impl ResultBinding {
    pub fn is_void(&self) -> bool {
        self.return_type == "()"
    }
}

/// One generated method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodIr {
    pub name: String,

    /// Remote-call identity key, `"<ObjectType>.<message>"`.
    pub identity: String,

    pub docs: String,
    pub params: ParamBinding,
    pub result: ResultBinding,
}

/// One enum constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantIr {
    pub ident: String,

    /// Declared value name, as sent on the wire.
    pub wire: String,

    /// Discriminant; starts at 1, zero is never a valid value.
    pub discriminant: usize,
}

/// One generated enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumIr {
    pub name: String,
    pub raw_name: String,
    pub variants: Vec<VariantIr>,
}

/// One generated unit, for one object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitIr {
    /// Object type name as written in the description.
    pub object_name: String,
    pub type_name: String,
    pub docs: String,
    pub enums: Vec<EnumIr>,
    pub methods: Vec<MethodIr>,

    /// Hand-written source appended verbatim after the generated items.
    pub extension: Option<String>,
}

/// Why a message produced no method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Provided by a hand-written extension instead.
    HandWritten,

    /// The result type-expression has no binding shape.
    UnsupportedResult { ty: String },

    /// A parameter type-expression has no binding shape.
    UnsupportedParam { name: String, ty: String },

    /// The normalized method name is already taken in the unit.
    NameCollision { name: String },
}

impl SkipReason {
    /// Whether the skip lost API surface (as opposed to a deliberate omission).
    pub fn is_unsupported(&self) -> bool {
        !matches!(self, SkipReason::HandWritten)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::HandWritten => write!(f, "provided by hand-written extension"),
            SkipReason::UnsupportedResult { ty } => {
                write!(f, "unsupported result type-expression '{ty}'")
            }
            SkipReason::UnsupportedParam { name, ty } => {
                write!(f, "parameter '{name}' has unsupported type-expression '{ty}'")
            }
            SkipReason::NameCollision { name } => {
                write!(f, "method name '{name}' is already taken")
            }
        }
    }
}

/// A message that produced no method, with its identity key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMessage {
    pub identity: String,
    pub reason: SkipReason,
}
