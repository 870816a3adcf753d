//! Code generation from a XenAPI description.
//!
//! This module turns each object type of the description into one Rust unit:
//! an object-reference type, its enums, and one method per remote-procedure
//! message.
//!
//! # Architecture
//!
//! The generation uses a two-stage pipeline:
//!
//! ```text
//! Description (JSON)
//!     ↓
//!  [Binders]  params.rs, result.rs, enums.rs
//!     ↓
//!    IR (UnitIr)
//!     ↓
//!  [Renderer] → <unit>.rs, mod.rs
//! ```
//!
//! Type-expressions are parsed and classified in `xapigen-core`
//! ([`ParamShape`](xapigen_core::ParamShape),
//! [`ResultShape`](xapigen_core::ResultShape)); the binders map each shape to
//! a Rust type and an encoding or decoding, and the renderer only lays text
//! out.
//!
//! # Usage
//!
//! ```rust,no_run
//! use xapigen_cli::codegen::emit_object;
//! use xapigen_core::{Description, Normalizer};
//!
//! let description = Description::from_file("xenapi.json").unwrap();
//! let normalizer = Normalizer::new();
//!
//! for ot in &description.object_types {
//!     if let Some(unit) = emit_object(ot, &normalizer, None).unwrap() {
//!         println!("{}.rs: {} methods", unit.unit_name, unit.methods);
//!     }
//! }
//! ```
//!
//! # Supported Types
//!
//! | Type-expression | Parameter | Result |
//! |-----------------|-----------|--------|
//! | `bool` | `bool` | unsupported |
//! | `string` | `&str` | `String` |
//! | `int` | `u64` | `i64` |
//! | `float` | unsupported | `f64` |
//! | `<T> ref` | `&T` | `T` |
//! | `<T> ref set` | `&[T]` | `Vec<T>` |
//! | `string set` | `&[String]` | `Vec<String>` |
//! | `bool set` / `int set` / `float set` | `&[bool]` / `&[u64]` / `&[f64]` | unsupported |
//! | `enum <E>` | `E` | `E` |
//! | `enum <E> set` | `&[E]` | `Vec<E>` |
//! | `<Owner> record` | unsupported | `HashMap<String, String>` |
//! | `(string -> string) map` | `&HashMap<String, String>` | `HashMap<String, String>` |
//! | `(<T> ref -> <scalar or ref>) map` | `&HashMap<String, String>` | `HashMap<String, String>` for `string` values |
//!
//! Messages with an unsupported parameter or result are skipped and reported.

pub mod code_writer;
mod enums;
pub mod ir;
mod message;
mod object;
mod params;
mod render;
mod result;

pub use enums::emit_enum;
pub use ir::{SkipReason, SkippedMessage, UnitIr};
pub use message::{MessageOutcome, emit_message, is_hand_written};
pub use object::{UnitOutput, build_unit, emit_object};
pub use params::bind_params;
pub use render::{CLIENT_MODULE, render_index, render_unit};
pub use result::bind_result;
