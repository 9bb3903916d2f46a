use serde_json::json;

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let message = message.into();
    tracing::warn!(request_id = id, code, detail = %message, "request failed");
    let mut error = json!({
        "code": code,
        "message": message,
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

/// Reply for a line that could not be parsed, so no request id is known.
pub fn bad_json(message: impl Into<String>) -> serde_json::Value {
    let message = message.into();
    tracing::warn!(detail = %message, "unparseable request line");
    json!({
        "ok": false,
        "error": {
            "code": "bad_json",
            "message": message,
        }
    })
}
