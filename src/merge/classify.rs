use serde_json::Value;

/// How an array field is merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayKind {
    /// Strings, booleans or numbers; replaced wholesale by the source.
    Basic,
    /// Records (or anything else); merged element by element.
    Structured,
}

/// Classifies an array by the type of its first element only.
///
/// An empty array is [`ArrayKind::Structured`], which makes an empty source array
/// a no-op in the structured merge.
pub fn classify_array(values: &[Value]) -> ArrayKind {
    match values.first() {
        Some(Value::String(_) | Value::Bool(_) | Value::Number(_)) => ArrayKind::Basic,
        Some(Value::Object(_) | Value::Array(_) | Value::Null) | None => ArrayKind::Structured,
    }
}

/// Returns true when the source array replaces the target array outright.
pub fn is_basic_array(values: &[Value]) -> bool {
    classify_array(values) == ArrayKind::Basic
}
