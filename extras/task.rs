/// Wrapper the server puts around the reference a finished task produced.
const RESULT_PREFIX: &str = "<value><array><data><value>";
const RESULT_SUFFIX: &str = "</data></array></value>";

impl Task {
    /// Object the finished task produced, if any, bound to this task's client.
    ///
    /// The server sends the result as an XML-RPC-encoded string rather than a
    /// plain value; the reference is unwrapped from it here. An empty or
    /// unrecognized wrapper yields `None`.
    pub fn get_result(&self) -> Result<Option<super::client::OpaqueRef>> {
        let value = self.client.api_call(
            "task.get_result",
            vec![Value::String(self.reference.clone())],
        )?;
        match value {
            Value::Nil => Ok(None),
            Value::String(raw) => Ok(unwrap_result_reference(&raw)
                .map(|reference| super::client::OpaqueRef::new(reference, self.client.clone()))),
            other => Err(Error::Decode {
                expected: "string or nil",
                found: other.kind().to_string(),
            }),
        }
    }
}

fn unwrap_result_reference(raw: &str) -> Option<&str> {
    let body = raw.strip_prefix(RESULT_PREFIX)?.strip_suffix(RESULT_SUFFIX)?;
    let end = body.find('<')?;
    let (reference, rest) = body.split_at(end);
    rest.starts_with("</value>").then_some(reference)
}
