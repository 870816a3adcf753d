//! Type-expression parsing and binding-shape classification.
//!
//! Type-expressions are parsed once into a small tagged structure, [`TypeExpr`],
//! and the parameter and result binders classify that structure exhaustively:
//!
//! ```text
//! "(VM ref -> string set) map"
//!     ↓ TypeExpr::parse
//! Map(Ref("VM"), Set(Scalar(String)))
//!     ↓ ResultShape::classify
//! RefToStringSetMap("VM")
//! ```
//!
//! # Grammar
//!
//! ```text
//! expr  := "(" expr "->" expr ")" "map" { "set" }
//!        | atom { "set" }
//! atom  := "bool" | "string" | "int" | "float" | "datetime" | "void"
//!        | "enum" NAME
//!        | NAME "ref"
//!        | NAME "record"
//! ```
//!
//! Anything that does not parse, or leaves tokens behind, is
//! [`TypeExpr::Unsupported`]. Classification never fails: an expression outside
//! the bindable set yields the `Unsupported` shape and the owning message is
//! skipped by the emitter.

use std::fmt;

/// Scalar keywords of the description grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    Bool,
    String,
    Int,
    Float,
    DateTime,
}

/// A parsed type-expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Scalar(Scalar),
    Void,
    /// Object reference, `"<T> ref"`.
    Ref(String),
    /// Enumeration, `"enum <E>"`.
    Enum(String),
    /// Flat record of an object type, `"<T> record"`.
    Record(String),
    /// Homogeneous collection, `"<expr> set"`.
    Set(Box<TypeExpr>),
    /// Mapping, `"(<key> -> <value>) map"`.
    Map(Box<TypeExpr>, Box<TypeExpr>),
    /// Text outside the grammar, kept verbatim for diagnostics.
    Unsupported(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    LParen,
    RParen,
    Arrow,
    Word(&'a str),
}

fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            b')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            b'-' if bytes.get(i + 1) == Some(&b'>') => {
                tokens.push(Token::Arrow);
                i += 2;
            }
            c if c.is_ascii_whitespace() => i += 1,
            _ => {
                let start = i;
                while i < bytes.len()
                    && !bytes[i].is_ascii_whitespace()
                    && bytes[i] != b'('
                    && bytes[i] != b')'
                    && !(bytes[i] == b'-' && bytes.get(i + 1) == Some(&b'>'))
                {
                    i += 1;
                }
                tokens.push(Token::Word(&input[start..i]));
            }
        }
    }

    tokens
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied();
        self.pos += 1;
        token
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn expect(&mut self, expected: Token<'a>) -> Option<()> {
        (self.next()? == expected).then_some(())
    }

    fn word(&mut self) -> Option<&'a str> {
        match self.next()? {
            Token::Word(w) => Some(w),
            _ => None,
        }
    }

    fn expr(&mut self) -> Option<TypeExpr> {
        let mut expr = match self.next()? {
            Token::LParen => {
                let key = self.expr()?;
                self.expect(Token::Arrow)?;
                let value = self.expr()?;
                self.expect(Token::RParen)?;
                self.expect(Token::Word("map"))?;
                TypeExpr::Map(Box::new(key), Box::new(value))
            }
            Token::Word("enum") => TypeExpr::Enum(self.word()?.to_string()),
            Token::Word("bool") => TypeExpr::Scalar(Scalar::Bool),
            Token::Word("string") => TypeExpr::Scalar(Scalar::String),
            Token::Word("int") => TypeExpr::Scalar(Scalar::Int),
            Token::Word("float") => TypeExpr::Scalar(Scalar::Float),
            Token::Word("datetime") => TypeExpr::Scalar(Scalar::DateTime),
            Token::Word("void") => TypeExpr::Void,
            Token::Word(name) => match self.word()? {
                "ref" => TypeExpr::Ref(name.to_string()),
                "record" => TypeExpr::Record(name.to_string()),
                _ => return None,
            },
            _ => return None,
        };

        while self.peek() == Some(Token::Word("set")) {
            self.pos += 1;
            expr = TypeExpr::Set(Box::new(expr));
        }

        Some(expr)
    }
}

impl TypeExpr {
    /// Parse a type-expression. Never fails; see [`TypeExpr::Unsupported`].
    pub fn parse(input: &str) -> TypeExpr {
        let mut parser = Parser {
            tokens: tokenize(input),
            pos: 0,
        };

        match parser.expr() {
            Some(expr) if parser.pos == parser.tokens.len() => expr,
            _ => TypeExpr::Unsupported(input.to_string()),
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, TypeExpr::Unsupported(_))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Scalar::Bool => "bool",
            Scalar::String => "string",
            Scalar::Int => "int",
            Scalar::Float => "float",
            Scalar::DateTime => "datetime",
        };
        f.write_str(keyword)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Scalar(s) => write!(f, "{s}"),
            TypeExpr::Void => f.write_str("void"),
            TypeExpr::Ref(name) => write!(f, "{name} ref"),
            TypeExpr::Enum(name) => write!(f, "enum {name}"),
            TypeExpr::Record(name) => write!(f, "{name} record"),
            TypeExpr::Set(inner) => write!(f, "{inner} set"),
            TypeExpr::Map(key, value) => write!(f, "({key} -> {value}) map"),
            TypeExpr::Unsupported(raw) => f.write_str(raw),
        }
    }
}

/// How a parameter is declared and encoded.
///
/// Names carried by the variants are raw description identifiers; the binder
/// normalizes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamShape {
    /// `bool`, passed through.
    Bool,
    /// `string`, passed through.
    String,
    /// `string set`, a sequence of strings.
    StringSet,
    /// `int`, an unsigned 64-bit integer sent as its decimal string.
    Int,
    /// `(string -> string) map`, and reference-keyed maps with a scalar or
    /// reference value, pre-encoded to a struct.
    StringMap,
    /// `<T> ref set`, a sequence of object references.
    RefSet(String),
    /// `<T> ref`, a single object reference.
    Ref(String),
    /// `enum <E>`, a typed enum value.
    Enum(String),
    /// `enum <E> set`, a sequence of enum values.
    EnumSet(String),
    /// `bool set`, `int set` or `float set`, a sequence of the element's
    /// concrete type. `datetime set` and record sets have no binding.
    ScalarSet(Scalar),
    Unsupported,
}

impl ParamShape {
    /// Classify a parameter type-expression.
    pub fn classify(expr: &TypeExpr) -> ParamShape {
        use TypeExpr as T;

        match expr {
            T::Scalar(Scalar::Bool) => ParamShape::Bool,
            T::Scalar(Scalar::String) => ParamShape::String,
            T::Scalar(Scalar::Int) => ParamShape::Int,
            T::Set(inner) => match inner.as_ref() {
                T::Scalar(Scalar::String) => ParamShape::StringSet,
                T::Ref(name) => ParamShape::RefSet(name.clone()),
                T::Enum(name) => ParamShape::EnumSet(name.clone()),
                T::Scalar(element @ (Scalar::Bool | Scalar::Int | Scalar::Float)) => {
                    ParamShape::ScalarSet(*element)
                }
                _ => ParamShape::Unsupported,
            },
            T::Map(key, value) => match (key.as_ref(), value.as_ref()) {
                (T::Scalar(Scalar::String), T::Scalar(Scalar::String)) => ParamShape::StringMap,
                // Reference keys degrade to their wire string form.
                (T::Ref(_), T::Scalar(_) | T::Ref(_)) => ParamShape::StringMap,
                _ => ParamShape::Unsupported,
            },
            T::Ref(name) => ParamShape::Ref(name.clone()),
            T::Enum(name) => ParamShape::Enum(name.clone()),
            T::Scalar(_) | T::Void | T::Record(_) | T::Unsupported(_) => ParamShape::Unsupported,
        }
    }

    /// Parse and classify in one step.
    pub fn of(expr: &str) -> ParamShape {
        Self::classify(&TypeExpr::parse(expr))
    }
}

/// How a result is declared and decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultShape {
    String,
    Float,
    Int,
    /// `<owner> record`, projected to a flat string-to-string map.
    Record,
    /// `(<T> ref -> string set) map`.
    RefToStringSetMap(String),
    /// `(<K> -> string) map`.
    StringMap,
    /// `(string -> <T> ref) map`.
    StringToRefMap(String),
    Void,
    /// `<T> ref set`.
    RefSet(String),
    /// `(<T> ref -> <U> record) map`, each record projected flat.
    RefToRecordMap(String),
    /// `<T> ref`.
    Ref(String),
    /// `string set`.
    StringSet,
    /// `(string -> enum <E>) map`.
    StringToEnumMap(String),
    /// `enum <E>`.
    Enum(String),
    /// `enum <E> set`.
    EnumSet(String),
    Unsupported,
}

impl ResultShape {
    /// Classify a result type-expression for a message of `owner`.
    ///
    /// Only the owner's own record type is bindable; records of other types
    /// are unsupported.
    pub fn classify(expr: &TypeExpr, owner: &str) -> ResultShape {
        use TypeExpr as T;

        match expr {
            T::Scalar(Scalar::String) => ResultShape::String,
            T::Scalar(Scalar::Float) => ResultShape::Float,
            T::Scalar(Scalar::Int) => ResultShape::Int,
            T::Record(name) if name == owner => ResultShape::Record,
            T::Void => ResultShape::Void,
            T::Ref(name) => ResultShape::Ref(name.clone()),
            T::Enum(name) => ResultShape::Enum(name.clone()),
            T::Set(inner) => match inner.as_ref() {
                T::Ref(name) => ResultShape::RefSet(name.clone()),
                T::Scalar(Scalar::String) => ResultShape::StringSet,
                T::Enum(name) => ResultShape::EnumSet(name.clone()),
                _ => ResultShape::Unsupported,
            },
            T::Map(key, value) => match (key.as_ref(), value.as_ref()) {
                (T::Ref(name), T::Set(element)) if **element == T::Scalar(Scalar::String) => {
                    ResultShape::RefToStringSetMap(name.clone())
                }
                (_, T::Scalar(Scalar::String)) => ResultShape::StringMap,
                (T::Scalar(Scalar::String), T::Ref(name)) => {
                    ResultShape::StringToRefMap(name.clone())
                }
                (T::Ref(name), T::Record(_)) => ResultShape::RefToRecordMap(name.clone()),
                (T::Scalar(Scalar::String), T::Enum(name)) => {
                    ResultShape::StringToEnumMap(name.clone())
                }
                _ => ResultShape::Unsupported,
            },
            T::Scalar(_) | T::Record(_) | T::Unsupported(_) => ResultShape::Unsupported,
        }
    }

    /// Parse and classify in one step.
    pub fn of(expr: &str, owner: &str) -> ResultShape {
        Self::classify(&TypeExpr::parse(expr), owner)
    }
}

#[cfg(test)]
#[path = "shape/shape_tests.rs"]
mod shape_tests;
