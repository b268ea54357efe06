use serde_json::{Map, Value};

/// Parse a submission body into the flat field record based on Content-Type.
/// Only top-level objects are accepted; the dotted-key convention carries the
/// structure.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Result<Map<String, Value>, String> {
    let ct = content_type.unwrap_or("application/json");

    if ct.contains("application/json") {
        parse_json(body)
    } else if ct.contains("application/x-www-form-urlencoded") {
        parse_form_urlencoded(body)
    } else {
        // Try JSON first, then form-urlencoded
        parse_json(body).or_else(|_| parse_form_urlencoded(body))
    }
}

fn parse_json(body: &[u8]) -> Result<Map<String, Value>, String> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("Submission body must be a JSON object".to_string()),
        Err(e) => Err(format!("Invalid JSON: {e}")),
    }
}

fn parse_form_urlencoded(body: &[u8]) -> Result<Map<String, Value>, String> {
    let body_str = std::str::from_utf8(body).map_err(|e| format!("Invalid UTF-8: {e}"))?;

    let mut map = Map::new();
    for (k, v) in form_urlencoded::parse(body_str.as_bytes()) {
        map.insert(k.into_owned(), Value::String(v.into_owned()));
    }
    Ok(map)
}
