use serde_json::Value;

/// A decoded echo response: status code plus the JSON body. The raw body
/// text is kept around for diagnostics output.
#[derive(Debug, Clone)]
pub struct EchoResponse {
    pub status: u16,
    pub body: Value,
    pub raw: String,
}
