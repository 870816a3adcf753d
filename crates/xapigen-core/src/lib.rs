//! xapigen-core - Description model and type-expression grammar
//!
//! This crate provides the generation-time foundations shared by the binding
//! emitters:
//! - [`Description`] and friends, the parsed description document
//! - [`Normalizer`] for binding-safe identifiers
//! - [`TypeExpr`], [`ParamShape`] and [`ResultShape`] for classifying
//!   type-expressions
//! - [`GenError`] for run-aborting failures
//! - [`Config`] for `xapigen.toml`

pub mod config;
mod error;
pub mod naming;
pub mod schema;
pub mod shape;

pub use config::{Config, GeneratorConfig, NamingConfig};
pub use error::{GenError, GenResult};
pub use naming::Normalizer;
pub use schema::{Description, Enum, EnumValue, Message, ObjectType, Param};
pub use shape::{ParamShape, ResultShape, Scalar, TypeExpr};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Config, Description, Enum, GenError, GenResult, Message, Normalizer, ObjectType, Param,
        ParamShape, ResultShape, TypeExpr,
    };
}
