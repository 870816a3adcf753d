//! XenAPI client core shared by every generated unit.
//!
//! This file is linked verbatim into the output location as `client.rs`. It
//! holds the wire value model, the transport seam, the session-carrying
//! client handle and the error kinds every generated call returns.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Result type of every generated call.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a remote call or of decoding its result.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The transport could not deliver the call or its response.
    Transport(String),

    /// The server answered with a failure; the first element is the error code.
    Fault(Vec<String>),

    /// The result does not have the wire kind the binding expects.
    Decode { expected: &'static str, found: String },

    /// An enum value unknown to these bindings: the server speaks a newer
    /// protocol than the bindings were generated from.
    ProtocolDrift { method: String, value: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(msg) => write!(f, "transport error: {msg}"),
            Error::Fault(description) => write!(f, "API fault: {}", description.join(" ")),
            Error::Decode { expected, found } => {
                write!(f, "decode error: expected {expected}, found {found}")
            }
            Error::ProtocolDrift { method, value } => {
                write!(f, "protocol drift in {method}: unknown enum value '{value}'")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A value in the XML-RPC wire model.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Array(Vec<Value>),
    Struct(BTreeMap<String, Value>),
}

impl Value {
    /// Wire kind, for decode errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Struct(_) => "struct",
        }
    }

    fn mismatch<T>(&self, expected: &'static str) -> Result<T> {
        Err(Error::Decode {
            expected,
            found: self.kind().to_string(),
        })
    }

    pub fn into_string(self) -> Result<String> {
        match self {
            Value::String(s) => Ok(s),
            other => other.mismatch("string"),
        }
    }

    pub fn into_bool(self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(b),
            other => other.mismatch("boolean"),
        }
    }

    /// 64-bit integers travel as decimal strings; native ints are accepted too.
    pub fn into_i64(self) -> Result<i64> {
        match self {
            Value::Int(i) => Ok(i),
            Value::String(s) => s.parse().map_err(|_| Error::Decode {
                expected: "decimal integer",
                found: s,
            }),
            other => other.mismatch("int"),
        }
    }

    pub fn into_f64(self) -> Result<f64> {
        match self {
            Value::Double(d) => Ok(d),
            Value::Int(i) => Ok(i as f64),
            other => other.mismatch("double"),
        }
    }

    pub fn into_array(self) -> Result<Vec<Value>> {
        match self {
            Value::Array(items) => Ok(items),
            other => other.mismatch("array"),
        }
    }

    pub fn into_struct(self) -> Result<BTreeMap<String, Value>> {
        match self {
            Value::Struct(members) => Ok(members),
            other => other.mismatch("struct"),
        }
    }

    pub fn into_string_vec(self) -> Result<Vec<String>> {
        self.into_array()?.into_iter().map(Value::into_string).collect()
    }

    pub fn into_string_map(self) -> Result<HashMap<String, String>> {
        self.into_struct()?
            .into_iter()
            .map(|(key, value)| Ok((key, value.into_string()?)))
            .collect()
    }

    /// Flat projection of a record: string fields as-is, every other field in
    /// its textual wire form.
    pub fn into_record(self) -> Result<HashMap<String, String>> {
        Ok(self
            .into_struct()?
            .into_iter()
            .map(|(key, value)| (key, value.to_wire_string()))
            .collect())
    }

    fn to_wire_string(&self) -> String {
        match self {
            Value::Nil => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Double(d) => d.to_string(),
            Value::String(s) => s.clone(),
            Value::Array(items) => {
                let items: Vec<_> = items.iter().map(Value::to_wire_string).collect();
                format!("[{}]", items.join(", "))
            }
            Value::Struct(members) => {
                let members: Vec<_> = members
                    .iter()
                    .map(|(k, v)| format!("{k}: {}", v.to_wire_string()))
                    .collect();
                format!("{{{}}}", members.join(", "))
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

/// Carries one call to the server and back.
///
/// Implementations return the raw response struct (`Status`, `Value`,
/// `ErrorDescription`); [`Client::api_call`] interprets it.
pub trait Transport: fmt::Debug + Send + Sync {
    fn call(&self, method: &str, params: Vec<Value>) -> Result<Value>;
}

/// A logged-in session on one server.
#[derive(Debug, Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    session: String,
}

impl Client {
    /// Wrap an already established session.
    pub fn new(transport: Arc<dyn Transport>, session: impl Into<String>) -> Self {
        Self {
            transport,
            session: session.into(),
        }
    }

    /// Establish a session with user name and password.
    pub fn login_with_password(
        transport: Arc<dyn Transport>,
        username: &str,
        password: &str,
    ) -> Result<Self> {
        let response = transport.call(
            "session.login_with_password",
            vec![Value::from(username), Value::from(password)],
        )?;
        let session = check_response(response)?.into_string()?;
        Ok(Self::new(transport, session))
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    /// Invoke `method` with the session prepended to `args`.
    ///
    /// A failure response is returned as [`Error::Fault`] before anything is
    /// decoded.
    pub fn api_call(&self, method: &str, args: Vec<Value>) -> Result<Value> {
        let mut params = Vec::with_capacity(args.len() + 1);
        params.push(Value::String(self.session.clone()));
        params.extend(args);

        let response = self.transport.call(method, params)?;
        check_response(response)
    }

    /// End the session.
    pub fn logout(&self) -> Result<()> {
        self.api_call("session.logout", Vec::new())?;
        Ok(())
    }
}

fn check_response(response: Value) -> Result<Value> {
    let mut members = response.into_struct()?;
    match members.remove("Status") {
        Some(Value::String(status)) if status == "Success" => {
            Ok(members.remove("Value").unwrap_or(Value::Nil))
        }
        Some(Value::String(_)) => {
            let description = match members.remove("ErrorDescription") {
                Some(description) => description.into_string_vec()?,
                None => Vec::new(),
            };
            Err(Error::Fault(description))
        }
        Some(other) => other.mismatch("status string"),
        None => Err(Error::Decode {
            expected: "response with Status",
            found: "struct without Status".to_string(),
        }),
    }
}

/// Common interface of every generated object type.
pub trait XenApiObject {
    /// Opaque server-side reference (`OpaqueRef:...`).
    fn reference(&self) -> &str;

    fn client(&self) -> &Client;
}

/// A reference whose object type is only known to the caller, such as the
/// result of a finished task.
#[derive(Debug, Clone)]
pub struct OpaqueRef {
    pub reference: String,
    pub client: Client,
}

impl OpaqueRef {
    pub fn new(reference: impl Into<String>, client: Client) -> Self {
        Self {
            reference: reference.into(),
            client,
        }
    }

    /// Turn into a typed object, e.g. `task_result.bind(VM::new)`.
    pub fn bind<T: XenApiObject>(self, constructor: impl FnOnce(String, Client) -> T) -> T {
        constructor(self.reference, self.client)
    }
}

impl XenApiObject for OpaqueRef {
    fn reference(&self) -> &str {
        &self.reference
    }

    fn client(&self) -> &Client {
        &self.client
    }
}
