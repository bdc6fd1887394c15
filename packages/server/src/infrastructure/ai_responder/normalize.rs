//! Reduce an AI backend reply of unknown shape to one answer string.

use serde_json::Value;

/// Answer used when the reply contains none of the known slots
pub const FALLBACK_ANSWER: &str = "Brak odpowiedzi z AI";

/// Slots probed in order; the first one holding an answer wins.
///
/// Each entry is a path from the document root.
const ANSWER_PATHS: [&[&str]; 6] = [
    &["text"],
    &["answer", "text"],
    &["answer"],
    &["response"],
    &["output", "text"],
    &["result", "text"],
];

/// Pick the answer out of a backend reply.
///
/// A slot counts as present when it holds a non-empty string, a non-zero
/// number or `true`. Empty strings, `0`, `null`, `false`, objects and arrays
/// fall through to the next slot.
pub fn normalize_answer(reply: &Value) -> String {
    ANSWER_PATHS
        .iter()
        .find_map(|path| lookup(reply, path).and_then(as_answer))
        .unwrap_or_else(|| FALLBACK_ANSWER.to_string())
}

fn lookup<'a>(reply: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(reply, |node, key| node.as_object()?.get(*key))
}

fn as_answer(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
