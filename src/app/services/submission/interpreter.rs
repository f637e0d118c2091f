//! Classification of records API error responses
//!
//! Turns an HTTP status and the decoded response body into the ordered list
//! of messages shown to the user, with remediation hints for the problems
//! the API is known to report.

use serde_json::Value;

use crate::constants::messages;

/// Explain a non-success response as user-facing messages
///
/// Pure function of `(status, body)`. A missing or falsy body yields a single
/// message regardless of the status.
pub fn interpret_server_errors(status: u16, body: Option<&Value>) -> Vec<String> {
    let mut out = Vec::new();

    let Some(data) = body.filter(|value| is_truthy(value)) else {
        out.push(format!(
            "Server returned status {} with no response body. Check the server log.",
            status
        ));
        return out;
    };

    match status {
        401 => {
            out.extend(messages::UNAUTHORIZED.iter().map(|m| m.to_string()));
            return out;
        }
        403 => {
            out.extend(messages::FORBIDDEN.iter().map(|m| m.to_string()));
            return out;
        }
        400 => {
            if let Some(row_errors) = data.get("errors").and_then(Value::as_array) {
                explain_row_errors(row_errors, &mut out);
                return out;
            }
            if let Some(detail) = truthy_field(data, "detail") {
                let detail = display_value(detail);
                let lowered = detail.to_lowercase();
                out.push(format!("Server: {}", detail));
                if messages::RECORDS_KEY_PHRASES
                    .iter()
                    .any(|phrase| lowered.contains(phrase))
                {
                    out.push(messages::RECORDS_KEY_HINT.to_string());
                }
                return out;
            }
        }
        _ => {}
    }

    if status >= 500 {
        out.push(format!(
            "Server error ({}). Try again later and check the server logs.",
            status
        ));
        if let Some(detail) = truthy_field(data, "detail") {
            out.push(display_value(detail));
        }
        return out;
    }

    let errors = truthy_field(data, "errors");
    let detail = truthy_field(data, "detail");
    if errors.is_some() || detail.is_some() {
        if let Some(errors) = errors {
            out.push(errors.to_string());
        }
        if let Some(detail) = detail {
            out.push(display_value(detail));
        }
        return out;
    }

    out.push(messages::UNPARSEABLE_RESPONSE.to_string());
    out
}

fn explain_row_errors(row_errors: &[Value], out: &mut Vec<String>) {
    out.push(format!(
        "Server reported errors in {} row(s):",
        row_errors.len()
    ));

    for entry in row_errors {
        let line = match entry.get("line") {
            None | Some(Value::Null) => "?".to_string(),
            Some(value) => display_value(value),
        };

        match entry.get("errors") {
            Some(Value::Array(row_messages)) => {
                let texts: Vec<String> = row_messages.iter().map(display_value).collect();
                out.push(format!("Row {}: {}", line, texts.join("; ")));
                for text in &texts {
                    out.extend(remediation_hints(&line, text));
                }
            }
            other => {
                let text = other.map_or_else(|| "undefined".to_string(), display_value);
                out.push(format!("Row {}: {}", line, text));
            }
        }
    }

    out.push(messages::FIX_AND_RETRY.to_string());
}

/// Targeted hints for one server message, keyed by the fields it mentions
fn remediation_hints(line: &str, message: &str) -> Vec<String> {
    let lowered = message.to_lowercase();
    let mut hints = Vec::new();

    if lowered.contains("calldate") {
        hints.push(format!(
            "Row {}: fix calldate: use ISO 8601 (2023-01-31T12:34:56Z) or MM/DD/YYYY HH:MM:SS.",
            line
        ));
    }
    if lowered.contains("src") || lowered.contains("dst") {
        hints.push(format!(
            "Row {}: src/dst numbers: keep only digits and + - spaces parentheses; length at most 64.",
            line
        ));
    }
    if lowered.contains("duration") || lowered.contains("billsec") {
        hints.push(format!(
            "Row {}: duration/billsec: integer >= 0, without a fractional part or spaces.",
            line
        ));
    }
    if lowered.contains("disposition") {
        hints.push(format!(
            "Row {}: disposition: use 'answered', 'no answer' or any text; uploads normalize it to ANSWERED/NO ANSWER/OTHER.",
            line
        ));
    }

    hints
}

fn truthy_field<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    data.get(key).filter(|value| is_truthy(value))
}

/// JavaScript-style truthiness of a decoded JSON value
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String form of a value: strings unquoted, everything else as JSON
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
