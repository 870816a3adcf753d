//! Source rendering: [`UnitIr`] to Rust text.
//!
//! A unit is laid out as: header docs, imports, the object type, its enums,
//! one `impl` block holding the constructor and every method, then the
//! hand-written extension (if any), verbatim.

use super::code_writer::CodeWriter;
use super::ir::{EnumIr, MethodIr, RAW_VALUE, UnitIr};
use anyhow::Result;

const GENERATED_NOTICE: &str = "Generated by xapigen. Do not edit; regenerate instead.";

/// Module name of the hand-written client in the output directory.
pub const CLIENT_MODULE: &str = "client";

/// Render one unit to source text.
pub fn render_unit(unit: &UnitIr) -> Result<String> {
    let mut out = String::new();
    let mut w = CodeWriter::new(&mut out);

    w.doc_comment("//!", &format!("Bindings for the `{}` object type.", unit.object_name))?;
    if !unit.docs.trim().is_empty() {
        w.writeln("//!")?;
        w.doc_comment("//!", unit.docs.trim())?;
    }
    w.writeln("//!")?;
    w.doc_comment("//!", GENERATED_NOTICE)?;
    w.blank_line()?;

    write_imports(&mut w, unit)?;
    w.blank_line()?;

    write_object(&mut w, unit)?;

    for e in &unit.enums {
        w.blank_line()?;
        write_enum(&mut w, e)?;
    }

    w.blank_line()?;
    w.block(&format!("impl {}", unit.type_name), |w| {
        w.doc_comment("///", "Wrap an existing object reference.")?;
        w.block(
            "pub fn new(reference: impl Into<String>, client: Client) -> Self",
            |w| {
                w.block("Self", |w| {
                    w.writeln("reference: reference.into(),")?;
                    w.writeln("client,")
                })
            },
        )?;

        for method in &unit.methods {
            w.blank_line()?;
            write_method(w, method)?;
        }
        Ok(())
    })?;

    if let Some(extension) = &unit.extension {
        let extension = extension.trim();
        if !extension.is_empty() {
            w.blank_line()?;
            w.write_lines(extension)?;
        }
    }

    Ok(out)
}

/// Render the `mod.rs` index declaring the client module and every unit.
pub fn render_index(unit_names: &[String]) -> Result<String> {
    let mut out = String::new();
    let mut w = CodeWriter::new(&mut out);

    w.doc_comment("//!", "XenAPI client bindings.")?;
    w.writeln("//!")?;
    w.doc_comment("//!", GENERATED_NOTICE)?;
    w.blank_line()?;
    w.writeln(&format!("pub mod {CLIENT_MODULE};"))?;
    w.writeln(&format!("pub use self::{CLIENT_MODULE}::*;"))?;

    for name in unit_names {
        w.blank_line()?;
        w.writeln(&format!("pub mod {name};"))?;
        w.writeln(&format!("pub use self::{name}::*;"))?;
    }

    Ok(out)
}

fn write_imports<W: std::fmt::Write>(w: &mut CodeWriter<W>, unit: &UnitIr) -> std::fmt::Result {
    let extension = unit.extension.as_deref().unwrap_or_default();

    let uses_map = unit.methods.iter().any(|m| {
        m.result.return_type.contains("HashMap")
            || m.params.signature.iter().any(|p| p.ty.contains("HashMap"))
    }) || extension.contains("HashMap");
    if uses_map {
        w.writeln("use std::collections::HashMap;")?;
        w.blank_line()?;
    }

    let mut names = vec!["Client"];
    if !unit.enums.is_empty() || extension.contains("Error") {
        names.push("Error");
    }
    names.extend(["Result", "Value", "XenApiObject"]);

    w.writeln(&format!(
        "use super::{CLIENT_MODULE}::{{{}}};",
        names.join(", ")
    ))?;
    w.writeln("#[allow(unused_imports)]")?;
    w.writeln("use super::*;")
}

fn write_object<W: std::fmt::Write>(w: &mut CodeWriter<W>, unit: &UnitIr) -> std::fmt::Result {
    let name = &unit.type_name;

    w.doc_comment(
        "///",
        &format!("A `{}` object reference bound to a client.", unit.object_name),
    )?;
    w.writeln("#[derive(Debug, Clone)]")?;
    w.block(&format!("pub struct {name}"), |w| {
        w.writeln("pub reference: String,")?;
        w.writeln("pub client: Client,")
    })?;
    w.blank_line()?;

    w.block(&format!("impl PartialEq for {name}"), |w| {
        w.block("fn eq(&self, other: &Self) -> bool", |w| {
            w.writeln("self.reference == other.reference")
        })
    })?;
    w.blank_line()?;
    w.writeln(&format!("impl Eq for {name} {{}}"))?;
    w.blank_line()?;

    w.block(&format!("impl std::hash::Hash for {name}"), |w| {
        w.block("fn hash<H: std::hash::Hasher>(&self, state: &mut H)", |w| {
            w.writeln("self.reference.hash(state);")
        })
    })?;
    w.blank_line()?;

    w.block(&format!("impl XenApiObject for {name}"), |w| {
        w.block("fn reference(&self) -> &str", |w| w.writeln("&self.reference"))?;
        w.blank_line()?;
        w.block("fn client(&self) -> &Client", |w| w.writeln("&self.client"))
    })
}

fn write_enum<W: std::fmt::Write>(w: &mut CodeWriter<W>, e: &EnumIr) -> std::fmt::Result {
    w.doc_comment("///", &format!("Values of `{}`.", e.raw_name))?;
    w.writeln("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]")?;
    w.block(&format!("pub enum {}", e.name), |w| {
        for variant in &e.variants {
            w.writeln(&format!("{} = {},", variant.ident, variant.discriminant))?;
        }
        Ok(())
    })?;
    w.blank_line()?;

    w.block(&format!("impl {}", e.name), |w| {
        w.doc_comment(
            "///",
            "Decode a wire value, ignoring case.\n\nAn unknown value is reported as protocol drift for `method`.",
        )?;
        w.block("pub fn from_wire(method: &str, raw: &str) -> Result<Self>", |w| {
            w.block("match raw.to_lowercase().as_str()", |w| {
                for (key, variant) in e.wire_cases() {
                    w.writeln(&format!("{key:?} => Ok(Self::{}),", variant.ident))?;
                }
                w.writeln("_ => Err(Error::ProtocolDrift {")?;
                {
                    let _indent = w.indent();
                    w.writeln("method: method.to_string(),")?;
                    w.writeln("value: raw.to_string(),")?;
                }
                w.writeln("}),")
            })
        })?;
        w.blank_line()?;

        w.doc_comment("///", "The declared value name, as sent on the wire.")?;
        w.block("pub fn as_wire(self) -> &'static str", |w| {
            w.block("match self", |w| {
                for variant in &e.variants {
                    w.writeln(&format!("Self::{} => {:?},", variant.ident, variant.wire))?;
                }
                Ok(())
            })
        })
    })
}

fn write_method<W: std::fmt::Write>(w: &mut CodeWriter<W>, method: &MethodIr) -> std::fmt::Result {
    if !method.docs.trim().is_empty() {
        w.doc_comment("///", method.docs.trim())?;
    }
    let documented: Vec<_> = method
        .params
        .signature
        .iter()
        .filter(|p| !p.doc.trim().is_empty())
        .collect();
    if !documented.is_empty() {
        if !method.docs.trim().is_empty() {
            w.writeln("///")?;
        }
        w.writeln("/// # Arguments")?;
        w.writeln("///")?;
        for param in documented {
            w.writeln(&format!("/// - `{}`: {}", param.name, param.doc.trim()))?;
        }
    }

    let mut header = format!("pub fn {}(&self", method.name);
    for param in &method.params.signature {
        header.push_str(&format!(", {}: {}", param.name, param.ty));
    }
    header.push_str(&format!(") -> Result<{}>", method.result.return_type));

    w.block(&header, |w| {
        for statement in &method.params.encode {
            w.write_lines(statement)?;
        }

        let binding = if method.result.is_void() {
            String::new()
        } else {
            format!("let {RAW_VALUE} = ")
        };

        if method.params.args.len() == 1 {
            w.writeln(&format!(
                "{binding}self.client.api_call({:?}, vec![{}])?;",
                method.identity, method.params.args[0]
            ))?;
        } else {
            w.writeln(&format!("{binding}self.client.api_call("))?;
            {
                let _indent = w.indent();
                w.writeln(&format!("{:?},", method.identity))?;
                w.writeln("vec![")?;
                {
                    let _indent = w.indent();
                    for arg in &method.params.args {
                        w.writeln(&format!("{arg},"))?;
                    }
                }
                w.writeln("],")?;
            }
            w.writeln(")?;")?;
        }

        if method.result.is_void() {
            return w.writeln("Ok(())");
        }

        for statement in &method.result.decode {
            w.write_lines(statement)?;
        }
        w.writeln(&format!("Ok({})", method.result.var))
    })
}
